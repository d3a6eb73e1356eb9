use crate::keyframe::TableEvent;
use crate::state::BallId;

/// Raw facts accumulated over one simulated shot; the rules engine's
/// physical input.
#[derive(Debug, Clone, Default)]
pub struct ShotTracker {
    /// First ball the cue ball touched this shot
    pub first_contact: Option<BallId>,
    /// Some ball reached a rail with meaningful speed after first contact
    pub rail_after_contact: bool,
    /// Cue ball was captured
    pub scratch: bool,
    /// Captured balls in capture order (cue included)
    pub pocketed: Vec<BallId>,
    /// Pocket index per captured ball, for animation
    pub pocket_map: Vec<(BallId, usize)>,
}

impl ShotTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cue_has_contacted(&self) -> bool {
        self.first_contact.is_some()
    }
}

/// Discrete collision/pocket events awaiting the next keyframe
#[derive(Debug, Clone, Default)]
pub struct EventBuffer {
    pending: Vec<TableEvent>,
}

impl EventBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: TableEvent) {
        self.pending.push(event);
    }

    /// Take everything accumulated since the last keyframe
    pub fn drain(&mut self) -> Vec<TableEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Seeded random number generator (rack shuffling)
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        use rand::seq::SliceRandom;
        items.shuffle(&mut self.0);
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}
