/// Tuning parameters for the pool simulation
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Table (playing area, metres; origin at the bottom-left corner)
    pub const TABLE_WIDTH: f32 = 2.24;
    pub const TABLE_HEIGHT: f32 = 1.12;
    pub const CUSHION_THICKNESS: f32 = 0.05;
    pub const BALL_RADIUS: f32 = 0.028575; // 57.15 mm ball

    // Pockets
    pub const POCKET_CAPTURE_RADIUS: f32 = 0.06;
    pub const POCKET_MOUTH_RADIUS: f32 = 0.12;
    pub const POCKET_PULL_ACCEL: f32 = 3.0; // m/s^2 at the pocket centre

    // Cue strike
    pub const POWER_EXPONENT: f32 = 1.3; // low power gives finer control
    pub const POWER_SCALE: f32 = 8.0; // m/s at power 1.0

    // Cloth friction
    pub const GRAVITY: f32 = 9.8;
    pub const SLIDING_FRICTION: f32 = 0.2;
    pub const ROLLING_FRICTION: f32 = 0.02;
    pub const ROLL_TRANSITION_SPEED: f32 = 1.0; // sliding below this becomes rolling

    // Impacts
    pub const BALL_RESTITUTION: f32 = 0.93;
    pub const CUSHION_RESTITUTION: f32 = 0.7;
    pub const SEPARATION_EPSILON: f32 = 0.0005;

    // Spin
    pub const SPIN_DECAY: f32 = 0.985; // per-frame multiplicative bleed
    pub const THROW_FACTOR: f32 = 0.18;
    pub const FOLLOW_FACTOR: f32 = 0.6;
    pub const CUSHION_SPIN_FACTOR: f32 = 0.25;

    // Integration
    pub const FIXED_DT: f32 = 1.0 / 240.0;
    pub const MAX_FRAMES: u32 = 30_000; // ~125 s safety valve
    pub const MIN_VELOCITY: f32 = 0.01; // below this a ball is at rest
    pub const MIN_RAIL_SPEED: f32 = 0.05; // slower rail touches don't count
    pub const SETTLE_FRAMES: u32 = 10;
    pub const KEYFRAME_INTERVAL: f32 = 1.0 / 30.0;
}
