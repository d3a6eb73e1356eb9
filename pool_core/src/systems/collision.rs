use hecs::{Entity, World};

use crate::components::{SimBall, SimStatus};
use crate::config::Config;
use crate::keyframe::TableEvent;
use crate::resources::{EventBuffer, ShotTracker};

/// Resolve ball-ball collisions as equal-mass impacts with restitution.
///
/// Pairs are iterated in ball-id order so simultaneous same-tick contacts
/// resolve deterministically. The cue ball's first contact of the shot is
/// recorded for foul detection and triggers the throw and follow/draw
/// spin adjustments.
pub fn resolve_ball_collisions(
    world: &mut World,
    config: &Config,
    tracker: &mut ShotTracker,
    events: &mut EventBuffer,
) {
    let mut balls: Vec<(Entity, SimBall, SimStatus)> = world
        .query::<(&SimBall, &SimStatus)>()
        .iter()
        .filter(|(_entity, (_ball, status))| status.in_play)
        .map(|(entity, (ball, status))| (entity, *ball, *status))
        .collect();
    balls.sort_by_key(|(_entity, ball, _status)| ball.id);

    let diameter = 2.0 * config.ball_radius;
    let mut dirty = false;

    for i in 0..balls.len() {
        for j in (i + 1)..balls.len() {
            let (head, tail) = balls.split_at_mut(j);
            let a = &mut head[i];
            let b = &mut tail[0];

            let delta = b.1.pos - a.1.pos;
            let dist_sq = delta.length_squared();
            if dist_sq >= diameter * diameter {
                continue;
            }
            let dist = dist_sq.sqrt();
            if dist <= f32::EPSILON {
                // Degenerate exact overlap; leave it for the next frame.
                continue;
            }
            let normal = delta / dist;

            let closing = (a.1.vel - b.1.vel).dot(normal);
            if closing <= 0.0 {
                // Already separating; the overlap is shrinking on its own.
                continue;
            }

            let contact = a.1.pos + normal * config.ball_radius;
            let cue_travel = a.1.vel.normalize_or_zero();

            // Equal-mass impulse along the line of centres, restitution < 1.
            let impulse = (1.0 + config.ball_restitution) * 0.5 * closing;
            a.1.vel -= normal * impulse;
            b.1.vel += normal * impulse;

            // Push apart past the contact distance so the pair does not
            // re-trigger next frame.
            let push = (diameter - dist) * 0.5 + config.separation_epsilon;
            a.1.pos -= normal * push;
            b.1.pos += normal * push;

            a.2.rolling = false;
            b.2.rolling = false;

            if a.1.id.is_cue() && tracker.first_contact.is_none() {
                tracker.first_contact = Some(b.1.id);

                let spin = a.1.spin;
                // Side spin throws the object ball off the contact line.
                if spin.x.abs() > f32::EPSILON {
                    b.1.vel += b.1.vel.perp() * spin.x * config.throw_factor;
                }
                // Top spin carries the cue ball forward, back spin pulls it
                // back along its pre-impact travel direction.
                if spin.y.abs() > f32::EPSILON {
                    a.1.vel += cue_travel * spin.y * config.follow_factor * closing;
                }
            }

            events.push(TableEvent::BallBall {
                a: a.1.id,
                b: b.1.id,
                pos: contact,
                speed: closing,
            });
            dirty = true;
        }
    }

    if dirty {
        for (entity, (ball, status)) in world.query_mut::<(&mut SimBall, &mut SimStatus)>() {
            if let Some((_e, resolved, flags)) = balls.iter().find(|(e, _, _)| *e == entity) {
                *ball = *resolved;
                *status = *flags;
            }
        }
    }
}
