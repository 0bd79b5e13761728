use crate::activation::ActivationScheduler;
use serde::Serialize;
use strum::{Display as StrumDisplay, IntoStaticStr};

/// Half the period of the armed-selection pulse.
pub const PULSE_HALF_PERIOD_MS: f64 = 80.0;

/// Sound/visual cues the core asks the host to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay, IntoStaticStr)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// A menu opened or changed page.
    #[strum(serialize = "shwip")]
    MenuChanged,
    /// The highlighted item changed.
    #[strum(serialize = "smallSelect")]
    TargetChanged,
    /// First time an item asked to wait for the hold window.
    #[strum(serialize = "select")]
    Armed,
    #[strum(serialize = "toolSwap")]
    Activated,
}

/// Triangle wave in `[0, 1]` with a 160ms period, starting fully visible.
pub fn selection_blend(elapsed_ms: f64) -> f64 {
    ((elapsed_ms / PULSE_HALF_PERIOD_MS).rem_euclid(2.0) - 1.0).abs()
}

/// Opacity of the selection highlight: pulsing while armed, solid otherwise.
pub fn highlight_blend(scheduler: &ActivationScheduler) -> f64 {
    scheduler
        .pending()
        .filter(|p| p.is_delayed())
        .map_or(1.0, |p| selection_blend(p.elapsed_ms()))
}
