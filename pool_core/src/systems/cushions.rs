use hecs::World;

use crate::components::{SimBall, SimStatus};
use crate::config::Config;
use crate::keyframe::TableEvent;
use crate::resources::{EventBuffer, ShotTracker};
use crate::table::Table;

/// Reflect balls off the four cushions.
///
/// A ball inside a pocket mouth is skipped entirely; no cushion spans a
/// pocket opening. Reflection scales the rail-ward velocity component by
/// the cushion restitution, side spin kicks the rebound along the rail
/// tangent, and sufficiently hard hits after the cue ball's first contact
/// satisfy the no-rail rule.
pub fn resolve_cushion_collisions(
    world: &mut World,
    table: &Table,
    config: &Config,
    tracker: &mut ShotTracker,
    events: &mut EventBuffer,
) {
    let r = config.ball_radius;
    let restitution = config.cushion_restitution;
    let spin_kick = config.cushion_spin_factor;

    for (_entity, (ball, status)) in world.query_mut::<(&mut SimBall, &mut SimStatus)>() {
        if !status.in_play {
            continue;
        }
        if table.in_pocket_gap(ball.pos, config.pocket_mouth_radius) {
            continue;
        }

        let mut impact: f32 = 0.0;
        let mut hit = false;

        if ball.pos.x - r < 0.0 {
            ball.pos.x = r;
            if ball.vel.x < 0.0 {
                let speed = -ball.vel.x;
                ball.vel.x = -ball.vel.x * restitution;
                ball.vel.y += ball.spin.x * spin_kick * speed;
                impact = impact.max(speed);
                hit = true;
            }
        }
        if ball.pos.x + r > table.width {
            ball.pos.x = table.width - r;
            if ball.vel.x > 0.0 {
                let speed = ball.vel.x;
                ball.vel.x = -ball.vel.x * restitution;
                ball.vel.y -= ball.spin.x * spin_kick * speed;
                impact = impact.max(speed);
                hit = true;
            }
        }
        if ball.pos.y - r < 0.0 {
            ball.pos.y = r;
            if ball.vel.y < 0.0 {
                let speed = -ball.vel.y;
                ball.vel.y = -ball.vel.y * restitution;
                ball.vel.x -= ball.spin.x * spin_kick * speed;
                impact = impact.max(speed);
                hit = true;
            }
        }
        if ball.pos.y + r > table.height {
            ball.pos.y = table.height - r;
            if ball.vel.y > 0.0 {
                let speed = ball.vel.y;
                ball.vel.y = -ball.vel.y * restitution;
                ball.vel.x += ball.spin.x * spin_kick * speed;
                impact = impact.max(speed);
                hit = true;
            }
        }

        if hit {
            status.rolling = false;
            events.push(TableEvent::BallCushion {
                ball: ball.id,
                pos: ball.pos,
                speed: impact,
            });
            if impact > config.min_rail_speed && tracker.cue_has_contacted() {
                tracker.rail_after_contact = true;
            }
        }
    }
}
