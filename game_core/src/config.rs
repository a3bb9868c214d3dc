use crate::Params;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub round_seconds: i32,
    pub countdown_interval_ms: u64,
    pub low_time_warning_seconds: i32,
    pub spawn_interval_ms: u64,
    pub bad_drop_chance: f64,
    pub good_drop_value: i32,
    pub bad_drop_value: i32,
    pub drop_base_size: f32,
    pub drop_size_min_mult: f32,
    pub drop_size_max_mult: f32,
    pub fall_seconds_min: f32,
    pub fall_seconds_max: f32,
    pub catch_popup_ms: u64,
    pub milestone_banner_ms: u64,
    pub confetti_particles: u32,
    pub confetti_stagger_ms: u64,
    pub confetti_lifetime_ms: u64,
    pub confetti_size_min: f32,
    pub confetti_size_max: f32,
    pub confetti_start_y: f32,
    pub top_tier_score: i32,
    pub high_tier_score: i32,
    pub modest_tier_score: i32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            round_seconds: Params::ROUND_SECONDS,
            countdown_interval_ms: Params::COUNTDOWN_INTERVAL_MS,
            low_time_warning_seconds: Params::LOW_TIME_WARNING_SECONDS,
            spawn_interval_ms: Params::SPAWN_INTERVAL_MS,
            bad_drop_chance: Params::BAD_DROP_CHANCE,
            good_drop_value: Params::GOOD_DROP_VALUE,
            bad_drop_value: Params::BAD_DROP_VALUE,
            drop_base_size: Params::DROP_BASE_SIZE,
            drop_size_min_mult: Params::DROP_SIZE_MIN_MULT,
            drop_size_max_mult: Params::DROP_SIZE_MAX_MULT,
            fall_seconds_min: Params::FALL_SECONDS_MIN,
            fall_seconds_max: Params::FALL_SECONDS_MAX,
            catch_popup_ms: Params::CATCH_POPUP_MS,
            milestone_banner_ms: Params::MILESTONE_BANNER_MS,
            confetti_particles: Params::CONFETTI_PARTICLES,
            confetti_stagger_ms: Params::CONFETTI_STAGGER_MS,
            confetti_lifetime_ms: Params::CONFETTI_LIFETIME_MS,
            confetti_size_min: Params::CONFETTI_SIZE_MIN,
            confetti_size_max: Params::CONFETTI_SIZE_MAX,
            confetti_start_y: Params::CONFETTI_START_Y,
            top_tier_score: Params::TOP_TIER_SCORE,
            high_tier_score: Params::HIGH_TIER_SCORE,
            modest_tier_score: Params::MODEST_TIER_SCORE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Largest left offset that keeps a drop of `size` fully inside the container
    pub fn max_drop_x(&self, container_width: f32, size: f32) -> f32 {
        (container_width - size).max(0.0)
    }

    /// Clamp a drop's left offset to the container bounds
    pub fn clamp_drop_x(&self, x: f32, container_width: f32, size: f32) -> f32 {
        x.clamp(0.0, self.max_drop_x(container_width, size))
    }

    /// Point value for a drop kind
    pub fn drop_value(&self, kind: crate::DropKind) -> i32 {
        match kind {
            crate::DropKind::Good => self.good_drop_value,
            crate::DropKind::Bad => self.bad_drop_value,
        }
    }
}
