use std::path::Path;

use crate::foundation::error::{VisError, VisResult};
use crate::playback::clock::PlaybackIntent;
use crate::render::cpu::CpuRenderOpts;

/// Overlay toggles carried through to every frame snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    /// Label agents with their id.
    pub show_agent_ids: bool,
    /// Label cells with their coordinates.
    pub show_cell_ids: bool,
    /// Draw travelled paths.
    pub trace_paths: bool,
    /// Draw goal markers.
    pub show_goals: bool,
    /// Draw lines from agents to their goals.
    pub show_goal_vectors: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_agent_ids: false,
            show_cell_ids: false,
            trace_paths: true,
            show_goals: true,
            show_goal_vectors: false,
        }
    }
}

/// Settings file contents. Every section is optional.
///
/// ```json
/// { "playback": { "speed": 2.0, "looping": false }, "render": { "cell_px": 24 } }
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VisConfig {
    /// Initial playback intent.
    pub playback: PlaybackIntent,
    /// Initial overlay toggles.
    pub display: DisplayOptions,
    /// CPU rasterizer settings.
    pub render: CpuRenderOpts,
}

impl VisConfig {
    /// Parse a JSON settings document and validate it.
    pub fn from_json_str(s: &str) -> VisResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| VisError::validation(format!("invalid settings JSON: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read a JSON settings file.
    pub fn from_path(path: &Path) -> VisResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject settings no frame could be produced with.
    pub fn validate(&self) -> VisResult<()> {
        if !self.playback.speed.is_finite() || self.playback.speed <= 0.0 {
            return Err(VisError::validation("playback.speed must be > 0"));
        }
        self.render.validate()
    }
}
