use crate::color::{Color, DEFAULT_TOLERANCE};
use crate::error::ConfigError;
use crate::history::DEFAULT_MAX_SNAPSHOTS;
use crate::stroke::DEFAULT_WINDOW;
use crate::tools::ToolState;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Engine settings. Missing fields fall back to their defaults when
/// deserializing, so a partial JSON file is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub history_limit: usize,
    pub fill_tolerance: u8,
    pub stroke_window: usize,
    pub tools: ToolState,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::WHITE,
            history_limit: DEFAULT_MAX_SNAPSHOTS,
            fill_tolerance: DEFAULT_TOLERANCE,
            stroke_window: DEFAULT_WINDOW,
            tools: ToolState::default(),
        }
    }
}

impl EngineConfig {
    /// Default configuration with a different surface size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        log::info!("Loading engine config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "surface size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }
        if self.history_limit == 0 {
            return Err(ConfigError::Invalid("history_limit must be at least 1".to_owned()));
        }
        if self.stroke_window < 2 {
            return Err(ConfigError::Invalid(format!(
                "stroke_window must be at least 2, got {}",
                self.stroke_window
            )));
        }
        if self.tools.brush_size == 0 {
            return Err(ConfigError::Invalid("brush_size must be at least 1".to_owned()));
        }
        Ok(())
    }
}
