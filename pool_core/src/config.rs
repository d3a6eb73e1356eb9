use crate::params::Params;

/// Simulation configuration
///
/// Defaults mirror [`Params`]; tests and tools can tweak individual
/// coefficients without recompiling.
#[derive(Debug, Clone)]
pub struct Config {
    pub table_width: f32,
    pub table_height: f32,
    pub cushion_thickness: f32,
    pub ball_radius: f32,
    pub pocket_capture_radius: f32,
    pub pocket_mouth_radius: f32,
    pub pocket_pull_accel: f32,
    pub power_exponent: f32,
    pub power_scale: f32,
    pub gravity: f32,
    pub sliding_friction: f32,
    pub rolling_friction: f32,
    pub roll_transition_speed: f32,
    pub ball_restitution: f32,
    pub cushion_restitution: f32,
    pub separation_epsilon: f32,
    pub spin_decay: f32,
    pub throw_factor: f32,
    pub follow_factor: f32,
    pub cushion_spin_factor: f32,
    pub fixed_dt: f32,
    pub max_frames: u32,
    pub min_velocity: f32,
    pub min_rail_speed: f32,
    pub settle_frames: u32,
    pub keyframe_interval: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            table_width: Params::TABLE_WIDTH,
            table_height: Params::TABLE_HEIGHT,
            cushion_thickness: Params::CUSHION_THICKNESS,
            ball_radius: Params::BALL_RADIUS,
            pocket_capture_radius: Params::POCKET_CAPTURE_RADIUS,
            pocket_mouth_radius: Params::POCKET_MOUTH_RADIUS,
            pocket_pull_accel: Params::POCKET_PULL_ACCEL,
            power_exponent: Params::POWER_EXPONENT,
            power_scale: Params::POWER_SCALE,
            gravity: Params::GRAVITY,
            sliding_friction: Params::SLIDING_FRICTION,
            rolling_friction: Params::ROLLING_FRICTION,
            roll_transition_speed: Params::ROLL_TRANSITION_SPEED,
            ball_restitution: Params::BALL_RESTITUTION,
            cushion_restitution: Params::CUSHION_RESTITUTION,
            separation_epsilon: Params::SEPARATION_EPSILON,
            spin_decay: Params::SPIN_DECAY,
            throw_factor: Params::THROW_FACTOR,
            follow_factor: Params::FOLLOW_FACTOR,
            cushion_spin_factor: Params::CUSHION_SPIN_FACTOR,
            fixed_dt: Params::FIXED_DT,
            max_frames: Params::MAX_FRAMES,
            min_velocity: Params::MIN_VELOCITY,
            min_rail_speed: Params::MIN_RAIL_SPEED,
            settle_frames: Params::SETTLE_FRAMES,
            keyframe_interval: Params::KEYFRAME_INTERVAL,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map normalized shot power (0..1) to an initial cue ball speed.
    ///
    /// The curve is deliberately nonlinear so low power gives finer control.
    pub fn power_to_speed(&self, power: f32) -> f32 {
        power.clamp(0.0, 1.0).powf(self.power_exponent) * self.power_scale
    }

    /// X coordinate of the head string; the kitchen lies behind it.
    pub fn head_string_x(&self) -> f32 {
        self.table_width / 4.0
    }
}
