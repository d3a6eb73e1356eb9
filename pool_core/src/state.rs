use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::resources::GameRng;
use crate::table::Table;

/// Ball identity: the cue ball or a numbered object ball (1-15).
///
/// `Ord` puts the cue ball first and numbered balls in ascending order;
/// the simulator relies on this for deterministic pair iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallId {
    Cue,
    Ball(u8),
}

impl BallId {
    pub fn is_cue(&self) -> bool {
        matches!(self, BallId::Cue)
    }

    pub fn is_eight(&self) -> bool {
        matches!(self, BallId::Ball(8))
    }

    /// Group for a numbered ball; `None` for the cue and the 8-ball.
    pub fn group(&self) -> Option<Group> {
        match self {
            BallId::Ball(1..=7) => Some(Group::Solids),
            BallId::Ball(9..=15) => Some(Group::Stripes),
            _ => None,
        }
    }
}

/// Solids (1-7) or stripes (9-15)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Group {
    Solids,
    Stripes,
}

impl Group {
    pub fn other(&self) -> Group {
        match self {
            Group::Solids => Group::Stripes,
            Group::Stripes => Group::Solids,
        }
    }
}

/// One of the two players at the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    pub fn opponent(&self) -> Seat {
        match self {
            Seat::One => Seat::Two,
            Seat::Two => Seat::One,
        }
    }
}

/// Game phase state machine
///
/// `AwaitingBreak` -> `Aiming` <-> `BallInHand` -> `Finished`.
/// `BallInHand` returns to `Aiming` via [`crate::rules::place_cue_ball`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    AwaitingBreak,
    Aiming,
    BallInHand,
    Finished,
}

/// Where the incoming shooter may place the cue ball
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BallInHand {
    /// Anywhere on the table (after a scratch or a break foul)
    Anywhere,
    /// Behind the head string only
    Kitchen,
}

/// Foul classification, in evaluation priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Foul {
    Scratch,
    NoContact,
    NoRail,
    WrongBallFirst,
    #[serde(rename = "EARLY_8_POCKET")]
    Early8Pocket,
}

/// A ball on (or off) the table
///
/// Not-in-play balls keep their last known position for pocket-animation
/// bookkeeping but take no part in physics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// x = side spin, y = follow (+) / draw (-)
    pub spin: Vec2,
    pub in_play: bool,
}

impl Ball {
    pub fn at_rest(id: BallId, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::ZERO,
            spin: Vec2::ZERO,
            in_play: true,
        }
    }
}

/// Group assignment per seat; empty until the table stops being open
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupAssignment {
    pub one: Option<Group>,
    pub two: Option<Group>,
}

impl GroupAssignment {
    pub fn for_seat(&self, seat: Seat) -> Option<Group> {
        match seat {
            Seat::One => self.one,
            Seat::Two => self.two,
        }
    }

    pub fn assign(&mut self, seat: Seat, group: Group) {
        match seat {
            Seat::One => {
                self.one = Some(group);
                self.two = Some(group.other());
            }
            Seat::Two => {
                self.two = Some(group);
                self.one = Some(group.other());
            }
        }
    }
}

/// The persisted, transmitted game state.
///
/// Replaced wholesale after every shot by the rules engine; never mutated
/// in place. The UI diffs old vs. new state to drive animation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableState {
    pub balls: Vec<Ball>,
    /// Append-only history of pocketed object balls (break respot is the
    /// one documented exception).
    pub pocketed: Vec<BallId>,
    pub groups: GroupAssignment,
    pub open_table: bool,
    pub turn: Seat,
    pub phase: GamePhase,
    pub ball_in_hand: Option<BallInHand>,
    pub winner: Option<Seat>,
    pub last_shot: Option<ShotSummary>,
}

impl TableState {
    /// Build the initial racked state: cue ball on the head spot, object
    /// balls in a shuffled triangle on the foot spot with the 8-ball in
    /// the centre and opposite groups on the rear corners.
    pub fn rack(config: &Config, rng: &mut GameRng) -> Self {
        let table = Table::standard(config);
        let slots = table.rack_slots(config.ball_radius);

        let mut numbers: Vec<u8> = (1u8..=15).filter(|n| *n != 8).collect();
        rng.shuffle(&mut numbers);

        // Slot 4 is the centre of the third row; slots 10 and 14 are the
        // rear corners.
        let mut order: Vec<u8> = Vec::with_capacity(15);
        let mut rest = numbers.into_iter();
        for slot in 0..15u8 {
            if slot == 4 {
                order.push(8);
            } else {
                order.push(rest.next().unwrap());
            }
        }
        let (a, b) = (order[10], order[14]);
        if BallId::Ball(a).group() == BallId::Ball(b).group() {
            // Swap a corner with any ball of the other group.
            let want = BallId::Ball(a).group().map(|g| g.other());
            if let Some(idx) = order
                .iter()
                .position(|n| *n != 8 && BallId::Ball(*n).group() == want)
            {
                order.swap(14, idx);
            }
        }

        let mut balls = Vec::with_capacity(16);
        balls.push(Ball::at_rest(BallId::Cue, table.head_spot()));
        for (slot, number) in order.iter().enumerate() {
            balls.push(Ball::at_rest(BallId::Ball(*number), slots[slot]));
        }

        Self {
            balls,
            pocketed: Vec::new(),
            groups: GroupAssignment::default(),
            open_table: true,
            turn: Seat::One,
            phase: GamePhase::AwaitingBreak,
            ball_in_hand: None,
            winner: None,
            last_shot: None,
        }
    }

    pub fn ball(&self, id: BallId) -> Option<&Ball> {
        self.balls.iter().find(|b| b.id == id)
    }

    pub fn ball_mut(&mut self, id: BallId) -> Option<&mut Ball> {
        self.balls.iter_mut().find(|b| b.id == id)
    }

    pub fn cue_ball(&self) -> Option<&Ball> {
        self.ball(BallId::Cue)
    }

    /// In-play object balls belonging to `group`
    pub fn remaining_in_group(&self, group: Group) -> usize {
        self.balls
            .iter()
            .filter(|b| b.in_play && b.id.group() == Some(group))
            .count()
    }
}

/// Validated shot input. Never mutated by the core.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotParams {
    /// Aim angle in radians
    pub angle: f32,
    /// Normalized power, 0..1
    pub power: f32,
    /// Side spin, -1..1
    pub side_spin: f32,
    /// Top (+) / back (-) spin, -1..1
    pub top_spin: f32,
    /// Called pocket index for 8-ball shots
    pub called_pocket: Option<usize>,
}

impl ShotParams {
    pub fn new(angle: f32, power: f32) -> Self {
        Self {
            angle,
            power,
            side_spin: 0.0,
            top_spin: 0.0,
            called_pocket: None,
        }
    }
}

/// What the shot meant under the rules; the primary input for UI banners
/// and the event log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShotSummary {
    /// First ball the cue ball touched, if any
    pub first_contact: Option<BallId>,
    /// Balls captured this shot, in capture order (includes a scratched cue)
    pub pocketed: Vec<BallId>,
    pub scratch: bool,
    pub foul: Option<Foul>,
    pub foul_reason: Option<String>,
    pub turn_changed: bool,
    pub game_over: bool,
    pub winner: Option<Seat>,
    /// Which pocket index each captured ball fell into, for animation
    pub pocket_map: Vec<(BallId, usize)>,
}
