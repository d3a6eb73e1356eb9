use thiserror::Error;

/// Caller-contract violations surfaced by [`crate::simulate`].
///
/// Gameplay fouls are not errors; they come back inside a successful
/// `ShotSummary`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShotError {
    #[error("cue ball is not in play; shot rejected")]
    CueBallNotInPlay,
}

/// Rejections from [`crate::rules::place_cue_ball`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    #[error("table is not awaiting ball placement")]
    NotBallInHand,
    #[error("placement is outside the playing area")]
    OutOfBounds,
    #[error("placement must be behind the head string")]
    OutsideKitchen,
    #[error("placement overlaps another ball")]
    Overlapping,
}
