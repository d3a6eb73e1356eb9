use glam::Vec2;
use hecs::World;

use crate::components::{SimBall, SimStatus};
use crate::config::Config;

/// Advance ball positions and apply the two-regime cloth friction model.
///
/// A fast ball slides and decelerates hard; once its speed falls below the
/// transition threshold it rolls and decelerates gently. The transition is
/// one-way per ball per shot; cushion and ball impacts reset it. Velocity
/// is scaled toward zero, never inverted, and snaps to exactly zero below
/// the minimum-velocity threshold.
pub fn integrate_motion(world: &mut World, config: &Config, dt: f32) {
    for (_entity, (ball, status)) in world.query_mut::<(&mut SimBall, &mut SimStatus)>() {
        if !status.in_play {
            continue;
        }
        let speed = ball.vel.length();
        if speed <= 0.0 {
            continue;
        }

        ball.pos += ball.vel * dt;

        if !status.rolling && speed < config.roll_transition_speed {
            status.rolling = true;
        }
        let friction = if status.rolling {
            config.rolling_friction
        } else {
            config.sliding_friction
        };
        let decel = friction * config.gravity * dt;
        let new_speed = (speed - decel).max(0.0);
        ball.vel *= new_speed / speed;
        if new_speed < config.min_velocity {
            ball.vel = Vec2::ZERO;
        }

        // Cloth contact bleeds spin off every frame.
        ball.spin *= config.spin_decay;
        if ball.spin.length_squared() < 1e-8 {
            ball.spin = Vec2::ZERO;
        }
    }
}
