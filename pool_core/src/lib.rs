pub mod components;
pub mod config;
pub mod error;
pub mod keyframe;
pub mod params;
pub mod resources;
pub mod rules;
pub mod state;
pub mod systems;
pub mod table;

pub use components::*;
pub use config::*;
pub use error::*;
pub use keyframe::*;
pub use params::*;
pub use resources::*;
pub use state::*;
pub use table::*;

use glam::Vec2;
use hecs::World;
use systems::*;

/// Everything one simulated shot produces
#[derive(Debug, Clone)]
pub struct SimulationResult {
    /// Next persisted state: resting positions, velocities zeroed,
    /// pocketed history extended
    pub final_state: TableState,
    /// Animation playback track
    pub keyframes: Vec<KeyFrame>,
    /// Rules meaning of the shot
    pub summary: ShotSummary,
}

/// Run one shot to completion.
///
/// Fails only on a caller-contract violation (cue ball not in play);
/// gameplay fouls come back inside the summary. The loop ends on the
/// settle debounce or the frame cap, whichever comes first.
pub fn simulate(
    state: &TableState,
    shot: &ShotParams,
    config: &Config,
) -> Result<SimulationResult, ShotError> {
    match state.cue_ball() {
        Some(cue) if cue.in_play => {}
        _ => return Err(ShotError::CueBallNotInPlay),
    }

    log::debug!(
        "shot: angle={:.3} power={:.2} side={:.2} top={:.2}",
        shot.angle,
        shot.power,
        shot.side_spin,
        shot.top_spin
    );

    let table = Table::standard(config);
    let mut world = World::new();
    spawn_balls(&mut world, state, shot, config);

    let mut tracker = ShotTracker::new();
    let mut events = EventBuffer::new();
    let mut keyframes = Vec::new();

    let dt = config.fixed_dt;
    let mut t = 0.0_f32;
    let mut last_keyframe_t = 0.0_f32;
    let mut settled_frames = 0_u32;
    let mut frames = 0_u32;

    keyframes.push(snapshot(&world, t, &mut events));

    while frames < config.max_frames {
        let any_moving = world
            .query::<(&SimBall, &SimStatus)>()
            .iter()
            .any(|(_entity, (ball, status))| status.in_play && ball.speed() >= config.min_velocity);
        if any_moving {
            settled_frames = 0;
        } else {
            settled_frames += 1;
            if settled_frames >= config.settle_frames {
                break;
            }
        }

        if t - last_keyframe_t >= config.keyframe_interval {
            keyframes.push(snapshot(&world, t, &mut events));
            last_keyframe_t = t;
        }

        integrate_motion(&mut world, config, dt);
        resolve_ball_collisions(&mut world, config, &mut tracker, &mut events);
        apply_pocket_forces(&mut world, &table, config, &mut tracker, &mut events, dt);
        resolve_cushion_collisions(&mut world, &table, config, &mut tracker, &mut events);

        t += dt;
        frames += 1;
    }

    // The final resting state is always emitted, cadence or not, with any
    // unflushed events.
    keyframes.push(snapshot(&world, t, &mut events));

    let mut final_state = state.clone();
    for (_entity, (ball, status)) in world.query_mut::<(&SimBall, &SimStatus)>() {
        if let Some(stored) = final_state.ball_mut(ball.id) {
            stored.pos = ball.pos;
            stored.vel = Vec2::ZERO;
            stored.spin = Vec2::ZERO;
            stored.in_play = status.in_play;
        }
    }
    final_state
        .pocketed
        .extend(tracker.pocketed.iter().filter(|id| !id.is_cue()));

    log::debug!(
        "shot done: frames={} settled={} pocketed={:?}",
        frames,
        settled_frames >= config.settle_frames,
        tracker.pocketed
    );

    let summary = rules::derive_summary(state, &tracker);

    Ok(SimulationResult {
        final_state,
        keyframes,
        summary,
    })
}

/// Simulate a shot and apply the rules, yielding the next authoritative
/// state plus the animation track and the shot summary.
pub fn play_shot(
    state: &TableState,
    shot: &ShotParams,
    config: &Config,
) -> Result<(TableState, Vec<KeyFrame>, ShotSummary), ShotError> {
    let result = simulate(state, shot, config)?;
    let mut summary = result.summary;
    let next = rules::apply(&result.final_state, &mut summary, config);
    Ok((next, result.keyframes, summary))
}

/// Load the persisted balls into a fresh simulation world; only the cue
/// ball starts with velocity and spin, from the shot parameters.
pub fn spawn_balls(world: &mut World, state: &TableState, shot: &ShotParams, config: &Config) {
    for ball in &state.balls {
        let mut sim = SimBall::from_ball(ball);
        if ball.id.is_cue() {
            let speed = config.power_to_speed(shot.power);
            sim.vel = Vec2::new(shot.angle.cos(), shot.angle.sin()) * speed;
            sim.spin = Vec2::new(
                shot.side_spin.clamp(-1.0, 1.0),
                shot.top_spin.clamp(-1.0, 1.0),
            );
        }
        world.spawn((sim, SimStatus::new(ball.in_play)));
    }
}

fn snapshot(world: &World, t: f32, events: &mut EventBuffer) -> KeyFrame {
    let mut balls: Vec<KeyFrameBall> = world
        .query::<(&SimBall, &SimStatus)>()
        .iter()
        .map(|(_entity, (ball, status))| KeyFrameBall {
            id: ball.id,
            pos: ball.pos,
            in_play: status.in_play,
        })
        .collect();
    balls.sort_by_key(|ball| ball.id);

    KeyFrame {
        t,
        balls,
        events: events.drain(),
    }
}
