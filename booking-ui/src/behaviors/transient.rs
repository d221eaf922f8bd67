//! Self-dismissing alerts and decorative animations.

/// Alerts carrying this class fade out and remove themselves.
pub const AUTO_HIDE_SELECTOR: &str = ".alert-auto-hide";

/// Pages with this section get the floating plane.
pub const HERO_SECTION_SELECTOR: &str = ".hero-section";
pub const PLANE_ICON_SELECTOR: &str = ".plane-icon";
pub const FLOAT_CLASS: &str = "animate-float";

/// Stage of an auto-hide alert's exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertPhase {
    Visible,
    Fading,
    Removed,
}

impl AlertPhase {
    /// The phase reached when the alert's next timer fires.
    pub fn next(self) -> Self {
        match self {
            AlertPhase::Visible => AlertPhase::Fading,
            AlertPhase::Fading | AlertPhase::Removed => AlertPhase::Removed,
        }
    }

    /// Inline opacity for the phase, if it sets one.
    pub fn opacity(self) -> Option<&'static str> {
        match self {
            AlertPhase::Visible => None,
            AlertPhase::Fading | AlertPhase::Removed => Some("0"),
        }
    }
}

/// The two states of the search box's route-type pulse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pulse {
    Grown,
    Resting,
}

impl Pulse {
    pub fn transform(self) -> &'static str {
        match self {
            Pulse::Grown => "scale(1.02)",
            Pulse::Resting => "scale(1)",
        }
    }
}
