use glam::Vec2;

/// Drop flavour: good drops score, bad drops cost points
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    Good,
    Bad,
}

/// Water drop component - one falling entity in the game container
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterDrop {
    pub kind: DropKind,
    pub value: i32,         // +10 good, -15 bad
    pub size: f32,          // Width and height in px
    pub x: f32,             // Left offset inside the container, px
    pub fall_seconds: f32,  // Duration of the fall animation
}

impl WaterDrop {
    pub fn new(kind: DropKind, value: i32, size: f32, x: f32, fall_seconds: f32) -> Self {
        Self {
            kind,
            value,
            size,
            x,
            fall_seconds,
        }
    }

    pub fn is_bad(&self) -> bool {
        self.kind == DropKind::Bad
    }

    pub fn fall_ms(&self) -> u64 {
        (self.fall_seconds * 1000.0).round() as u64
    }
}

/// Confetti particle shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfettiShape {
    Square,
    Circle,
}

/// Presentation class of a popup element
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopupStyle {
    CatchPositive,
    CatchNegative,
    Milestone,
    Confetti {
        color: &'static str,
        size: f32,
        shape: ConfettiShape,
    },
}

impl PopupStyle {
    /// CSS class names for the element
    pub fn class_name(&self) -> &'static str {
        match self {
            PopupStyle::CatchPositive => "click-feedback positive",
            PopupStyle::CatchNegative => "click-feedback negative",
            PopupStyle::Milestone => "milestone-message",
            PopupStyle::Confetti { .. } => "confetti",
        }
    }
}

/// Popup component - transient feedback element, never read back by the game
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub text: String,
    pub pos: Option<Vec2>, // None = global banner
    pub style: PopupStyle,
    pub lifetime_ms: u64,
}

impl Popup {
    /// `+10` / `-15` popup centred on a caught drop
    pub fn catch(value: i32, pos: Vec2, lifetime_ms: u64) -> Self {
        let (text, style) = if value > 0 {
            (format!("+{}", value), PopupStyle::CatchPositive)
        } else {
            (value.to_string(), PopupStyle::CatchNegative)
        };
        Self {
            text,
            pos: Some(pos),
            style,
            lifetime_ms,
        }
    }

    pub fn milestone(text: &str, lifetime_ms: u64) -> Self {
        Self {
            text: text.to_string(),
            pos: None,
            style: PopupStyle::Milestone,
            lifetime_ms,
        }
    }

    pub fn confetti(particle: &ConfettiParticle, start_y: f32, lifetime_ms: u64) -> Self {
        Self {
            text: String::new(),
            pos: Some(Vec2::new(particle.x, start_y)),
            style: PopupStyle::Confetti {
                color: particle.color,
                size: particle.size,
                shape: particle.shape,
            },
            lifetime_ms,
        }
    }
}

/// A confetti particle waiting for its staggered launch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiParticle {
    pub launch_delay_ms: u64,
    pub x: f32,
    pub size: f32,
    pub color: &'static str,
    pub shape: ConfettiShape,
}
