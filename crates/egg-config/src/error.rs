use thiserror::Error;

/// Errors raised while loading or checking [`crate::EggConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to load objeggtives config: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the requested command has no usable values.
    #[error("config section [{section}] is missing required values")]
    NotConfigured { section: String },

    #[error("bad config value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}
