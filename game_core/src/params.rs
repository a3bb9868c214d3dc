/// Game tuning parameters for the drop catcher
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Round
    pub const ROUND_SECONDS: i32 = 30;
    pub const COUNTDOWN_INTERVAL_MS: u64 = 1000;
    pub const LOW_TIME_WARNING_SECONDS: i32 = 10;

    // Spawner
    pub const SPAWN_INTERVAL_MS: u64 = 800; // faster than one per second
    pub const BAD_DROP_CHANCE: f64 = 0.25;

    // Drops
    pub const GOOD_DROP_VALUE: i32 = 10;
    pub const BAD_DROP_VALUE: i32 = -15;
    pub const DROP_BASE_SIZE: f32 = 60.0;
    pub const DROP_SIZE_MIN_MULT: f32 = 0.6;
    pub const DROP_SIZE_MAX_MULT: f32 = 1.2;
    pub const FALL_SECONDS_MIN: f32 = 3.0;
    pub const FALL_SECONDS_MAX: f32 = 5.0;

    // Feedback
    pub const CATCH_POPUP_MS: u64 = 1000;
    pub const MILESTONE_BANNER_MS: u64 = 2000;
    pub const CONFETTI_PARTICLES: u32 = 100;
    pub const CONFETTI_STAGGER_MS: u64 = 20;
    pub const CONFETTI_LIFETIME_MS: u64 = 3000;
    pub const CONFETTI_SIZE_MIN: f32 = 6.0;
    pub const CONFETTI_SIZE_MAX: f32 = 18.0;
    pub const CONFETTI_START_Y: f32 = -10.0;

    // End of round tiers (checked highest first)
    pub const TOP_TIER_SCORE: i32 = 150;
    pub const HIGH_TIER_SCORE: i32 = 100;
    pub const MODEST_TIER_SCORE: i32 = 50;
}
