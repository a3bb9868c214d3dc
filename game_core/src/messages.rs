//! Player-facing text

pub const IDLE_MESSAGE: &str = "Click Start to begin your mission!";
pub const START_MESSAGE: &str = "Catch the blue drops! Avoid the brown ones!";
pub const LOW_TIME_MESSAGE: &str = "⏰ Only 10 seconds left!";

pub const GOOD_CATCH_MESSAGES: [&str; 4] = [
    "💧 Great catch!",
    "🌊 Clean water secured!",
    "✨ Perfect!",
    "💙 Helping communities!",
];

pub const BAD_CATCH_MESSAGES: [&str; 3] = [
    "❌ That was contaminated!",
    "⚠️ Avoid dirty water!",
    "💔 Watch out!",
];

/// Scores that trigger a banner when hit exactly
pub const MILESTONES: [(i32, &str); 3] = [
    (50, "🎉 50 Points! You helped 5 people get clean water!"),
    (100, "🌟 100 Points! 10 people now have clean water!"),
    (200, "💫 200 Points! You're a water hero!"),
];
