use thiserror::Error;

/// Errors that can occur while encoding the surface for saving
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Cannot export an empty surface ({width}x{height})")]
    EmptySurface { width: u32, height: u32 },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors that can occur while loading the engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}
