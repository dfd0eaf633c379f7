use thiserror::Error;

/// Errors that can occur during Tsuzuki core operations.
///
/// Parsing and pattern extraction themselves are total; errors only arise
/// when building an engine, loading configuration, or compiling a stored
/// provider pattern.
#[derive(Debug, Error)]
pub enum TsuzukiError {
    /// A built-in regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// A stored provider pattern is not a valid regular expression.
    #[error("invalid provider pattern {pattern:?}: {source}")]
    InvalidPattern {
        /// The pattern as it was handed back by the caller.
        pattern: String,
        /// The underlying compilation error.
        #[source]
        source: regex::Error,
    },

    /// The extractor configuration was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The extractor configuration could not be deserialized.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Tsuzuki operations.
pub type Result<T> = std::result::Result<T, TsuzukiError>;
