use thiserror::Error;

/// Result type for merge operations
pub type Result<T> = std::result::Result<T, MergeError>;

/// Errors raised at the record boundary.
///
/// The merge algorithms themselves never fail: an impossible merge is reported
/// as `None` and the inputs are kept as separate lines. These variants cover
/// records that cannot be compared at all and configuration problems.
#[derive(Error, Debug)]
pub enum MergeError {
    /// Tier variants of one record tokenize to different word counts
    #[error("Word count mismatch for {key}: {counts:?}")]
    WordCountMismatch { key: String, counts: Vec<usize> },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file could not be parsed
    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MergeError {
    /// Create a word count mismatch error
    pub fn word_count_mismatch(key: impl Into<String>, counts: Vec<usize>) -> Self {
        Self::WordCountMismatch {
            key: key.into(),
            counts,
        }
    }

    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
