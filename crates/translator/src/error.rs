use thiserror::Error;

/// Result type for translator operations
pub type Result<T> = std::result::Result<T, TranslatorError>;

/// Errors raised while setting up a translator.
///
/// Translation itself never fails: malformed prompts degrade to literal text.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TranslatorError {
    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TranslatorError {
    /// Create an invalid config error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}
