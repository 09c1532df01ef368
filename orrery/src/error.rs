//! Error types for configuration and texture loading.

/// Errors that can occur when loading or serializing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] ron::Error),
}

/// Errors while fetching or decoding a planet texture.
///
/// None of these are fatal; the renderer substitutes a flat colour.
#[derive(Debug, thiserror::Error)]
pub enum TextureError {
    #[error("failed to read texture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to fetch texture: {0}")]
    Http(#[from] Box<ureq::Error>),

    #[error("failed to decode texture: {0}")]
    Decode(#[from] image::ImageError),
}
