use glam::Vec2;
use hecs::World;

use crate::components::{SimBall, SimStatus};
use crate::config::Config;
use crate::keyframe::TableEvent;
use crate::resources::{EventBuffer, ShotTracker};
use crate::table::Table;

/// Pocket capture and the gravity-well pull.
///
/// Inside the commit radius a ball is captured outright. Inside the wider
/// mouth radius a moving ball is pulled toward the pocket centre with a
/// linear falloff, bending grazing approaches in. Runs before the cushion
/// system; pocket mouths are gaps in the cushion wall.
pub fn apply_pocket_forces(
    world: &mut World,
    table: &Table,
    config: &Config,
    tracker: &mut ShotTracker,
    events: &mut EventBuffer,
    dt: f32,
) {
    for (_entity, (ball, status)) in world.query_mut::<(&mut SimBall, &mut SimStatus)>() {
        if !status.in_play {
            continue;
        }
        for pocket in &table.pockets {
            let delta = pocket.center - ball.pos;
            let dist = delta.length();

            if dist < config.pocket_capture_radius {
                let speed = ball.speed();
                status.in_play = false;
                ball.vel = Vec2::ZERO;
                ball.spin = Vec2::ZERO;
                if ball.id.is_cue() {
                    tracker.scratch = true;
                }
                tracker.pocketed.push(ball.id);
                tracker.pocket_map.push((ball.id, pocket.index));
                events.push(TableEvent::BallPocket {
                    ball: ball.id,
                    pocket: pocket.index,
                    pos: ball.pos,
                    speed,
                });
                log::trace!("{:?} captured by pocket {}", ball.id, pocket.index);
                break;
            }

            if dist < config.pocket_mouth_radius
                && dist > f32::EPSILON
                && ball.speed() >= config.min_velocity
            {
                let falloff = 1.0 - dist / config.pocket_mouth_radius;
                ball.vel += (delta / dist) * config.pocket_pull_accel * falloff * dt;
            }
        }
    }
}
