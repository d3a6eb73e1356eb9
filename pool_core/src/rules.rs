//! The rules engine: pure functions from physical shot facts to rules
//! outcomes. No hidden state; classification is idempotent. The one
//! documented mutation is the break respot rewriting a summary.

use glam::Vec2;

use crate::config::Config;
use crate::error::PlacementError;
use crate::resources::ShotTracker;
use crate::state::{BallId, BallInHand, Foul, GamePhase, Group, ShotSummary, TableState};
use crate::table::Table;

/// Derive the rules meaning of a shot from the pre-shot state and the raw
/// facts the simulator gathered.
pub fn derive_summary(state: &TableState, facts: &ShotTracker) -> ShotSummary {
    let shooter = state.turn;
    let breaking = state.phase == GamePhase::AwaitingBreak;
    let eight_pocketed = facts.pocketed.iter().any(|id| id.is_eight());
    let group_cleared = match state.groups.for_seat(shooter) {
        Some(group) => state.remaining_in_group(group) == 0,
        // Open table: the shooter has no group yet, so it is not cleared.
        None => false,
    };

    let (foul, foul_reason) = classify_foul(state, facts, breaking, group_cleared, eight_pocketed);
    if let Some(foul) = foul {
        log::debug!("foul by {:?}: {:?}", shooter, foul);
    }

    let mut game_over = false;
    let mut winner = None;
    if eight_pocketed {
        if breaking {
            // An 8-ball on the break only ends the game together with a
            // scratch; otherwise apply() respots it and play continues.
            if facts.scratch {
                game_over = true;
                winner = Some(shooter.opponent());
            }
        } else {
            game_over = true;
            winner = if !group_cleared || facts.scratch {
                Some(shooter.opponent())
            } else {
                Some(shooter)
            };
        }
    }

    let mut object_pocketed = facts.pocketed.iter().filter(|id| !id.is_cue()).count();
    if breaking && eight_pocketed && !facts.scratch {
        // The respotted break 8-ball does not count as a made ball.
        object_pocketed -= 1;
    }
    let turn_changed = foul.is_some() || object_pocketed == 0;

    ShotSummary {
        first_contact: facts.first_contact,
        pocketed: facts.pocketed.clone(),
        scratch: facts.scratch,
        foul,
        foul_reason,
        turn_changed,
        game_over,
        winner,
        pocket_map: facts.pocket_map.clone(),
    }
}

/// First matching rule wins, in priority order; the early-8 check is
/// independent and only becomes the reported foul when nothing above it
/// fired.
fn classify_foul(
    state: &TableState,
    facts: &ShotTracker,
    breaking: bool,
    group_cleared: bool,
    eight_pocketed: bool,
) -> (Option<Foul>, Option<String>) {
    if facts.scratch {
        return (
            Some(Foul::Scratch),
            Some("scratch: cue ball pocketed".to_string()),
        );
    }
    if facts.first_contact.is_none() {
        let reason = if breaking {
            "break shot contacted nothing"
        } else {
            "cue ball struck no ball"
        };
        return (Some(Foul::NoContact), Some(reason.to_string()));
    }
    if !facts.rail_after_contact && facts.pocketed.is_empty() {
        return (
            Some(Foul::NoRail),
            Some("no ball reached a rail after contact".to_string()),
        );
    }
    if !state.open_table {
        if let Some(group) = state.groups.for_seat(state.turn) {
            if let Some(first) = facts.first_contact {
                if first.is_eight() && !group_cleared {
                    return (
                        Some(Foul::WrongBallFirst),
                        Some("hit the 8-ball before clearing the group".to_string()),
                    );
                }
                if first.group() == Some(group.other()) {
                    return (
                        Some(Foul::WrongBallFirst),
                        Some("first contact was an opponent ball".to_string()),
                    );
                }
            }
        }
    }
    if eight_pocketed && !breaking && !group_cleared {
        return (
            Some(Foul::Early8Pocket),
            Some("8-ball pocketed before clearing the group".to_string()),
        );
    }
    (None, None)
}

/// Apply a derived summary to the simulator's final state, producing the
/// next persisted state: group assignment, turn flip, ball-in-hand, phase
/// transitions, winner, and the break respot.
pub fn apply(state: &TableState, summary: &mut ShotSummary, config: &Config) -> TableState {
    let mut next = state.clone();
    let shooter = state.turn;
    let breaking = state.phase == GamePhase::AwaitingBreak;
    let table = Table::standard(config);

    // Break respot: an 8-ball made on the break without a scratch returns
    // to the foot spot and comes off the books entirely. This is the only
    // place a summary or the pocketed history is rewritten.
    if breaking && !summary.scratch && summary.pocketed.iter().any(|id| id.is_eight()) {
        if let Some(eight) = next.ball_mut(BallId::Ball(8)) {
            eight.in_play = true;
            eight.pos = table.foot_spot();
            eight.vel = Vec2::ZERO;
            eight.spin = Vec2::ZERO;
        }
        next.pocketed.retain(|id| !id.is_eight());
        summary.pocketed.retain(|id| !id.is_eight());
        summary.pocket_map.retain(|(id, _pocket)| !id.is_eight());
        log::debug!("8-ball respotted after the break");
    }

    // A scratched cue ball returns to play awaiting placement.
    if summary.scratch {
        if let Some(cue) = next.ball_mut(BallId::Cue) {
            cue.in_play = true;
            cue.pos = table.head_spot();
            cue.vel = Vec2::ZERO;
            cue.spin = Vec2::ZERO;
        }
    }

    // Group assignment: once, the first time balls fall legally on an
    // open table. With both groups down in one shot, the first-listed
    // capture decides.
    if next.open_table && summary.foul.is_none() {
        let first_group: Option<Group> = summary.pocketed.iter().find_map(|id| id.group());
        if let Some(group) = first_group {
            next.groups.assign(shooter, group);
            next.open_table = false;
            log::debug!("{:?} assigned {:?}", shooter, group);
        }
    }

    if summary.game_over {
        next.winner = summary.winner;
        next.phase = GamePhase::Finished;
        next.ball_in_hand = None;
    } else {
        if summary.turn_changed {
            next.turn = shooter.opponent();
        }
        if summary.foul.is_some() {
            next.ball_in_hand = Some(if summary.scratch || breaking {
                BallInHand::Anywhere
            } else {
                BallInHand::Kitchen
            });
            next.phase = GamePhase::BallInHand;
        } else {
            next.ball_in_hand = None;
            next.phase = GamePhase::Aiming;
        }
    }

    next.last_shot = Some(summary.clone());
    next
}

/// The `BALL_IN_HAND -> AIMING` edge: validate a cue ball placement and
/// clear the ball-in-hand flag.
pub fn place_cue_ball(
    state: &TableState,
    pos: Vec2,
    config: &Config,
) -> Result<TableState, PlacementError> {
    if state.phase != GamePhase::BallInHand {
        return Err(PlacementError::NotBallInHand);
    }
    let zone = state.ball_in_hand.ok_or(PlacementError::NotBallInHand)?;

    let table = Table::standard(config);
    if !table.contains(pos, config.ball_radius) {
        return Err(PlacementError::OutOfBounds);
    }
    if zone == BallInHand::Kitchen && !table.in_kitchen(pos) {
        return Err(PlacementError::OutsideKitchen);
    }
    let blocked = state.balls.iter().any(|ball| {
        ball.in_play && !ball.id.is_cue() && ball.pos.distance(pos) < 2.0 * config.ball_radius
    });
    if blocked {
        return Err(PlacementError::Overlapping);
    }

    let mut next = state.clone();
    if let Some(cue) = next.ball_mut(BallId::Cue) {
        cue.pos = pos;
        cue.vel = Vec2::ZERO;
        cue.spin = Vec2::ZERO;
        cue.in_play = true;
    }
    next.ball_in_hand = None;
    next.phase = GamePhase::Aiming;
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::GameRng;
    use crate::state::Seat;

    fn open_state() -> TableState {
        let config = Config::new();
        let mut rng = GameRng::new(3);
        let mut state = TableState::rack(&config, &mut rng);
        state.phase = GamePhase::Aiming;
        state
    }

    /// A mid-game state: groups assigned, table closed.
    fn assigned_state() -> TableState {
        let mut state = open_state();
        state.open_table = false;
        state.groups.assign(Seat::One, Group::Solids);
        state
    }

    fn facts() -> ShotTracker {
        ShotTracker {
            first_contact: Some(BallId::Ball(1)),
            rail_after_contact: true,
            ..ShotTracker::default()
        }
    }

    #[test]
    fn test_clean_shot_has_no_foul() {
        let state = assigned_state();
        let summary = derive_summary(&state, &facts());
        assert_eq!(summary.foul, None);
        assert_eq!(summary.foul_reason, None);
        assert!(!summary.game_over);
    }

    #[test]
    fn test_scratch_outranks_everything() {
        let state = assigned_state();
        let mut f = facts();
        f.scratch = true;
        f.first_contact = None; // would otherwise be NO_CONTACT
        f.pocketed = vec![BallId::Cue];

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::Scratch));
        assert!(summary.turn_changed);
    }

    #[test]
    fn test_no_contact_foul() {
        let state = assigned_state();
        let mut f = facts();
        f.first_contact = None;
        f.rail_after_contact = false;

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::NoContact));
    }

    #[test]
    fn test_no_rail_foul_when_nothing_pocketed() {
        let state = assigned_state();
        let mut f = facts();
        f.rail_after_contact = false;

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::NoRail));
    }

    #[test]
    fn test_a_pocketed_ball_excuses_the_missing_rail() {
        let mut state = assigned_state();
        state.ball_mut(BallId::Ball(1)).unwrap().in_play = false;
        let mut f = facts();
        f.rail_after_contact = false;
        f.pocketed = vec![BallId::Ball(1)];

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, None, "Pocketing satisfies the rail requirement");
        assert!(!summary.turn_changed, "Shooter made a ball and keeps the table");
    }

    #[test]
    fn test_wrong_ball_first_against_opponent_group() {
        let state = assigned_state(); // shooter One has solids
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(12));

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::WrongBallFirst));
        assert!(summary.turn_changed);
        assert!(!summary.game_over);
    }

    #[test]
    fn test_eight_first_before_clearing_group_is_wrong_ball() {
        let state = assigned_state();
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(8));

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::WrongBallFirst));
    }

    #[test]
    fn test_eight_first_is_legal_once_group_cleared() {
        let mut state = assigned_state();
        for n in 1..=7 {
            state.ball_mut(BallId::Ball(n)).unwrap().in_play = false;
        }
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(8));

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, None, "The 8-ball is a legal target when cleared");
    }

    #[test]
    fn test_no_wrong_ball_foul_on_an_open_table() {
        let state = open_state();
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(12));

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, None, "Any object ball is fair on an open table");
    }

    #[test]
    fn test_early_eight_pocket_loses_the_game() {
        let state = assigned_state();
        let mut f = facts();
        f.pocketed = vec![BallId::Ball(8)];

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::Early8Pocket));
        assert!(summary.game_over);
        assert_eq!(summary.winner, Some(Seat::Two), "Opponent wins on an early 8");
    }

    #[test]
    fn test_clean_eight_after_clearing_wins() {
        let mut state = assigned_state();
        for n in 1..=7 {
            state.ball_mut(BallId::Ball(n)).unwrap().in_play = false;
        }
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(8));
        f.pocketed = vec![BallId::Ball(8)];

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, None);
        assert!(summary.game_over);
        assert_eq!(summary.winner, Some(Seat::One), "Shooter wins a clean 8");
    }

    #[test]
    fn test_eight_with_a_scratch_loses_even_when_cleared() {
        let mut state = assigned_state();
        for n in 1..=7 {
            state.ball_mut(BallId::Ball(n)).unwrap().in_play = false;
        }
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(8));
        f.pocketed = vec![BallId::Ball(8), BallId::Cue];
        f.scratch = true;

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::Scratch));
        assert!(summary.game_over);
        assert_eq!(summary.winner, Some(Seat::Two));
    }

    #[test]
    fn test_clearing_the_last_ball_with_the_eight_is_still_early() {
        let mut state = assigned_state();
        for n in 1..=6 {
            state.ball_mut(BallId::Ball(n)).unwrap().in_play = false;
        }
        // Ball 7 falls in the same shot as the 8: the group was not clear
        // when the shot began.
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(7));
        f.pocketed = vec![BallId::Ball(7), BallId::Ball(8)];

        let summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::Early8Pocket));
        assert_eq!(summary.winner, Some(Seat::Two));
    }

    #[test]
    fn test_turn_passes_when_nothing_is_made() {
        let state = assigned_state();
        let summary = derive_summary(&state, &facts());
        assert!(summary.turn_changed, "A dry legal shot passes the table");
    }

    #[test]
    fn test_turn_held_after_making_a_ball_cleanly() {
        let mut state = assigned_state();
        state.ball_mut(BallId::Ball(2)).unwrap().in_play = false;
        let mut f = facts();
        f.pocketed = vec![BallId::Ball(2)];

        let summary = derive_summary(&state, &f);
        assert!(!summary.turn_changed);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let state = assigned_state();
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(12));

        let first = derive_summary(&state, &f);
        let second = derive_summary(&state, &f);
        assert_eq!(first, second, "Same inputs, same summary, no hidden state");
    }

    #[test]
    fn test_apply_flips_turn_and_sets_kitchen_ball_in_hand() {
        let state = assigned_state();
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(12));
        let mut summary = derive_summary(&state, &f);

        let next = apply(&state, &mut summary, &Config::new());
        assert_eq!(next.turn, Seat::Two);
        assert_eq!(next.phase, GamePhase::BallInHand);
        assert_eq!(next.ball_in_hand, Some(BallInHand::Kitchen));
    }

    #[test]
    fn test_apply_after_scratch_returns_cue_and_allows_anywhere() {
        let state = assigned_state();
        let mut f = facts();
        f.scratch = true;
        f.pocketed = vec![BallId::Cue];
        let mut summary = derive_summary(&state, &f);

        // The simulator's final state has the cue ball off the table.
        let mut sim_final = state.clone();
        sim_final.ball_mut(BallId::Cue).unwrap().in_play = false;

        let next = apply(&sim_final, &mut summary, &Config::new());
        let cue = next.ball(BallId::Cue).unwrap();
        assert!(cue.in_play, "Scratched cue ball returns to play");
        assert_eq!(next.ball_in_hand, Some(BallInHand::Anywhere));
        assert_eq!(next.phase, GamePhase::BallInHand);
        assert!(
            !next.pocketed.contains(&BallId::Cue),
            "The cue ball never enters the pocketed history"
        );
    }

    #[test]
    fn test_apply_assigns_groups_from_the_first_capture() {
        let state = open_state();
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(9));
        f.pocketed = vec![BallId::Ball(9), BallId::Ball(3)];
        let mut summary = derive_summary(&state, &f);

        let next = apply(&state, &mut summary, &Config::new());
        assert!(!next.open_table);
        assert_eq!(next.groups.for_seat(Seat::One), Some(Group::Stripes));
        assert_eq!(next.groups.for_seat(Seat::Two), Some(Group::Solids));
    }

    #[test]
    fn test_no_group_assignment_on_a_foul() {
        let state = open_state();
        let mut f = facts();
        f.scratch = true;
        f.pocketed = vec![BallId::Ball(9), BallId::Cue];
        let mut summary = derive_summary(&state, &f);

        let next = apply(&state, &mut summary, &Config::new());
        assert!(next.open_table, "Fouled captures do not assign groups");
        assert_eq!(next.groups.for_seat(Seat::One), None);
    }

    #[test]
    fn test_break_respot_rewinds_the_eight() {
        let config = Config::new();
        let mut rng = GameRng::new(11);
        let state = TableState::rack(&config, &mut rng); // AwaitingBreak
        let mut f = facts();
        f.pocketed = vec![BallId::Ball(8)];
        f.pocket_map = vec![(BallId::Ball(8), 2)];
        let mut summary = derive_summary(&state, &f);
        assert!(!summary.game_over, "A respotted break 8 does not end the game");

        let mut sim_final = state.clone();
        sim_final.ball_mut(BallId::Ball(8)).unwrap().in_play = false;
        sim_final.pocketed.push(BallId::Ball(8));

        let next = apply(&sim_final, &mut summary, &config);
        let eight = next.ball(BallId::Ball(8)).unwrap();
        let table = Table::standard(&config);
        assert!(eight.in_play);
        assert_eq!(eight.pos, table.foot_spot(), "8-ball returns to the foot spot");
        assert!(next.pocketed.is_empty(), "The documented append-only exception");
        assert!(summary.pocketed.is_empty(), "The documented summary mutation");
        assert!(summary.pocket_map.is_empty());
        assert_eq!(next.phase, GamePhase::Aiming, "Play continues after the break");
    }

    #[test]
    fn test_eight_and_scratch_on_the_break_loses() {
        let config = Config::new();
        let mut rng = GameRng::new(11);
        let state = TableState::rack(&config, &mut rng);
        let mut f = facts();
        f.scratch = true;
        f.pocketed = vec![BallId::Ball(8), BallId::Cue];

        let summary = derive_summary(&state, &f);
        assert!(summary.game_over);
        assert_eq!(summary.winner, Some(Seat::Two));
    }

    #[test]
    fn test_dry_break_with_no_contact_is_a_foul_with_anywhere_placement() {
        let config = Config::new();
        let mut rng = GameRng::new(11);
        let state = TableState::rack(&config, &mut rng);
        let f = ShotTracker::default();

        let mut summary = derive_summary(&state, &f);
        assert_eq!(summary.foul, Some(Foul::NoContact));

        let next = apply(&state, &mut summary, &config);
        assert_eq!(
            next.ball_in_hand,
            Some(BallInHand::Anywhere),
            "Break fouls give ball in hand anywhere"
        );
        assert_eq!(next.turn, Seat::Two);
    }

    #[test]
    fn test_finished_game_records_the_winner() {
        let mut state = assigned_state();
        for n in 1..=7 {
            state.ball_mut(BallId::Ball(n)).unwrap().in_play = false;
        }
        let mut f = facts();
        f.first_contact = Some(BallId::Ball(8));
        f.pocketed = vec![BallId::Ball(8)];
        let mut summary = derive_summary(&state, &f);

        let next = apply(&state, &mut summary, &Config::new());
        assert_eq!(next.phase, GamePhase::Finished);
        assert_eq!(next.winner, Some(Seat::One));
        assert_eq!(next.turn, Seat::One, "Seats stop flipping once the game ends");
    }

    #[test]
    fn test_place_cue_ball_in_kitchen() {
        let config = Config::new();
        let mut state = assigned_state();
        state.phase = GamePhase::BallInHand;
        state.ball_in_hand = Some(BallInHand::Kitchen);

        let pos = Vec2::new(0.3, 0.3);
        let next = place_cue_ball(&state, pos, &config).expect("legal placement");
        assert_eq!(next.ball(BallId::Cue).unwrap().pos, pos);
        assert_eq!(next.phase, GamePhase::Aiming);
        assert_eq!(next.ball_in_hand, None);
    }

    #[test]
    fn test_kitchen_placement_rejects_the_far_table() {
        let config = Config::new();
        let mut state = assigned_state();
        state.phase = GamePhase::BallInHand;
        state.ball_in_hand = Some(BallInHand::Kitchen);

        let err = place_cue_ball(&state, Vec2::new(1.8, 0.5), &config).unwrap_err();
        assert_eq!(err, PlacementError::OutsideKitchen);
    }

    #[test]
    fn test_placement_rejects_overlap() {
        let config = Config::new();
        let mut state = assigned_state();
        state.phase = GamePhase::BallInHand;
        state.ball_in_hand = Some(BallInHand::Anywhere);
        let occupied = state.ball(BallId::Ball(5)).unwrap().pos;

        let err = place_cue_ball(&state, occupied, &config).unwrap_err();
        assert_eq!(err, PlacementError::Overlapping);
    }

    #[test]
    fn test_placement_requires_ball_in_hand_phase() {
        let config = Config::new();
        let state = assigned_state(); // Aiming
        let err = place_cue_ball(&state, Vec2::new(0.3, 0.3), &config).unwrap_err();
        assert_eq!(err, PlacementError::NotBallInHand);
    }
}
