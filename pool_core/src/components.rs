use glam::Vec2;

use crate::state::{Ball, BallId};

/// Kinematic state of a ball inside the simulation world
#[derive(Debug, Clone, Copy)]
pub struct SimBall {
    pub id: BallId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// x = side spin, y = follow/draw
    pub spin: Vec2,
}

impl SimBall {
    pub fn from_ball(ball: &Ball) -> Self {
        Self {
            id: ball.id,
            pos: ball.pos,
            vel: Vec2::ZERO,
            spin: Vec2::ZERO,
        }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Per-shot transient flags; never persisted into `TableState`
#[derive(Debug, Clone, Copy)]
pub struct SimStatus {
    pub in_play: bool,
    /// Speed dropped below the sliding-to-rolling threshold. One-way per
    /// shot, except a cushion or ball impact resets it.
    pub rolling: bool,
}

impl SimStatus {
    pub fn new(in_play: bool) -> Self {
        Self {
            in_play,
            rolling: false,
        }
    }
}
