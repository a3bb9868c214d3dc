use crate::Config;

/// Virtual clock driven by the host (browser frames or tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct Time {
    pub now_ms: u64, // Whole milliseconds elapsed
    carry_ms: f64,   // Fractional remainder from previous frames
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a frame delta and return the new whole-millisecond time
    pub fn accumulate(&mut self, dt_ms: f64) -> u64 {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            let total = self.carry_ms + dt_ms;
            let whole = total.floor();
            self.carry_ms = total - whole;
            self.now_ms += whole as u64;
        }
        self.now_ms
    }
}

/// Lifecycle phase of a round
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Idle,
    Running,
}

/// Inputs that move a round between phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    Start,
    TimeUp,
    Reset,
}

impl RoundPhase {
    /// Next phase for an action, or None if the action does not apply
    pub fn next(self, action: RoundAction) -> Option<RoundPhase> {
        match (self, action) {
            (RoundPhase::Idle, RoundAction::Start) => Some(RoundPhase::Running),
            (RoundPhase::Running, RoundAction::TimeUp) => Some(RoundPhase::Idle),
            (_, RoundAction::Reset) => Some(RoundPhase::Idle),
            _ => None,
        }
    }
}

/// Round counters, owned by the round controller
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundState {
    pub running: bool,
    pub score: i32,
    pub time_left: i32, // Seconds
    pub drops_created: u32,
    pub drops_caught: u32, // Positive-value catches only
    pub drops_missed: u32,
}

impl RoundState {
    pub fn new(round_seconds: i32) -> Self {
        Self {
            running: false,
            score: 0,
            time_left: round_seconds,
            drops_created: 0,
            drops_caught: 0,
            drops_missed: 0,
        }
    }

    pub fn phase(&self) -> RoundPhase {
        if self.running {
            RoundPhase::Running
        } else {
            RoundPhase::Idle
        }
    }

    /// Percentage of created drops that were caught, rounded; 0 with no drops
    pub fn accuracy(&self) -> u32 {
        if self.drops_created == 0 {
            return 0;
        }
        (self.drops_caught as f64 / self.drops_created as f64 * 100.0).round() as u32
    }
}

/// End-of-round grade, selected by score
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    TryAgain,
    Modest,
    High,
    TopTier,
}

impl Tier {
    pub fn from_score(score: i32, config: &Config) -> Self {
        if score >= config.top_tier_score {
            Tier::TopTier
        } else if score >= config.high_tier_score {
            Tier::High
        } else if score >= config.modest_tier_score {
            Tier::Modest
        } else {
            Tier::TryAgain
        }
    }

    /// Whether the round ends with a confetti burst
    pub fn celebrates(&self) -> bool {
        matches!(self, Tier::High | Tier::TopTier)
    }

    pub fn message(&self, score: i32, accuracy: u32) -> String {
        match self {
            Tier::TopTier => format!("🏆 AMAZING! Score: {} | Accuracy: {}%", score, accuracy),
            Tier::High => format!("🎊 Great Job! Score: {} | Accuracy: {}%", score, accuracy),
            Tier::Modest => format!("👍 Good work! Score: {} | Accuracy: {}%", score, accuracy),
            Tier::TryAgain => format!("Game Over! Score: {} | Try again!", score),
        }
    }
}

/// Final numbers of a finished round
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundSummary {
    pub score: i32,
    pub accuracy: u32,
    pub tier: Tier,
    pub drops_created: u32,
    pub drops_caught: u32,
    pub drops_missed: u32,
}

impl RoundSummary {
    pub fn from_state(state: &RoundState, config: &Config) -> Self {
        Self {
            score: state.score,
            accuracy: state.accuracy(),
            tier: Tier::from_score(state.score, config),
            drops_created: state.drops_created,
            drops_caught: state.drops_caught,
            drops_missed: state.drops_missed,
        }
    }

    pub fn message(&self) -> String {
        self.tier.message(self.score, self.accuracy)
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Seed from the platform entropy source
    pub fn from_entropy() -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::from_entropy())
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_accumulates_fractional_frames() {
        let mut time = Time::new();
        assert_eq!(time.accumulate(16.6), 16);
        assert_eq!(time.accumulate(16.6), 33);
        assert_eq!(time.accumulate(16.9), 50);
    }

    #[test]
    fn test_time_ignores_bad_deltas() {
        let mut time = Time::new();
        time.accumulate(10.0);
        assert_eq!(time.accumulate(-5.0), 10);
        assert_eq!(time.accumulate(f64::NAN), 10);
    }

    #[test]
    fn test_phase_transitions() {
        assert_eq!(
            RoundPhase::Idle.next(RoundAction::Start),
            Some(RoundPhase::Running)
        );
        assert_eq!(RoundPhase::Running.next(RoundAction::Start), None);
        assert_eq!(
            RoundPhase::Running.next(RoundAction::TimeUp),
            Some(RoundPhase::Idle)
        );
        assert_eq!(RoundPhase::Idle.next(RoundAction::TimeUp), None);
        assert_eq!(
            RoundPhase::Running.next(RoundAction::Reset),
            Some(RoundPhase::Idle)
        );
        assert_eq!(
            RoundPhase::Idle.next(RoundAction::Reset),
            Some(RoundPhase::Idle)
        );
    }

    #[test]
    fn test_accuracy_with_no_drops_is_zero() {
        let state = RoundState::new(30);
        assert_eq!(state.accuracy(), 0);
    }

    #[test]
    fn test_accuracy_rounds_to_nearest() {
        let mut state = RoundState::new(30);
        state.drops_created = 3;
        state.drops_caught = 2;
        assert_eq!(state.accuracy(), 67, "2/3 rounds up");

        state.drops_created = 8;
        state.drops_caught = 1;
        assert_eq!(state.accuracy(), 13, "12.5 rounds half up");
    }

    #[test]
    fn test_tier_thresholds_are_monotonic() {
        let config = Config::new();
        assert_eq!(Tier::from_score(-30, &config), Tier::TryAgain);
        assert_eq!(Tier::from_score(49, &config), Tier::TryAgain);
        assert_eq!(Tier::from_score(50, &config), Tier::Modest);
        assert_eq!(Tier::from_score(99, &config), Tier::Modest);
        assert_eq!(Tier::from_score(100, &config), Tier::High);
        assert_eq!(Tier::from_score(149, &config), Tier::High);
        assert_eq!(Tier::from_score(150, &config), Tier::TopTier);

        let mut last = Tier::TryAgain;
        for score in -50..300 {
            let tier = Tier::from_score(score, &config);
            assert!(tier >= last, "tier dropped at score {}", score);
            last = tier;
        }
    }

    #[test]
    fn test_only_high_tiers_celebrate() {
        assert!(!Tier::TryAgain.celebrates());
        assert!(!Tier::Modest.celebrates());
        assert!(Tier::High.celebrates());
        assert!(Tier::TopTier.celebrates());
    }

    #[test]
    fn test_tier_messages() {
        assert_eq!(
            Tier::TopTier.message(160, 80),
            "🏆 AMAZING! Score: 160 | Accuracy: 80%"
        );
        assert_eq!(
            Tier::Modest.message(60, 50),
            "👍 Good work! Score: 60 | Accuracy: 50%"
        );
        assert_eq!(
            Tier::TryAgain.message(20, 10),
            "Game Over! Score: 20 | Try again!"
        );
    }
}
