use radial::{InputSnapshot, PlayerId};
use serde::Deserialize;

pub const DEFAULT_FRAME_MS: f64 = 1000.0 / 60.0;

fn default_elapsed_ms() -> f64 {
    DEFAULT_FRAME_MS
}

/// One frame of controller state for one player.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct FrameInput {
    #[serde(default)]
    pub player: PlayerId,
    #[serde(default = "default_elapsed_ms")]
    pub elapsed_ms: f64,
    #[serde(flatten)]
    pub input: InputSnapshot,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Frame(FrameInput),
    ConfigReload,
    SessionLoaded,
    Quit,
}
