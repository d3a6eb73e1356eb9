use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::state::BallId;

/// A discrete thing that happened on the table, attached to the next
/// keyframe for audio/visual feedback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TableEvent {
    BallBall {
        a: BallId,
        b: BallId,
        pos: Vec2,
        speed: f32,
    },
    BallCushion {
        ball: BallId,
        pos: Vec2,
        speed: f32,
    },
    BallPocket {
        ball: BallId,
        pocket: usize,
        pos: Vec2,
        speed: f32,
    },
}

/// Ball snapshot inside a keyframe
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyFrameBall {
    pub id: BallId,
    pub pos: Vec2,
    pub in_play: bool,
}

/// A timestamped snapshot of the whole table, emitted on a fixed cadence
/// (not every physics tick) to bound message size. The final resting
/// state is always emitted as a last keyframe even if off-cadence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyFrame {
    /// Simulation time, seconds since the strike
    pub t: f32,
    pub balls: Vec<KeyFrameBall>,
    pub events: Vec<TableEvent>,
}
