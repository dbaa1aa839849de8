//! Application layer errors

use thiserror::Error;

/// General bot errors
#[derive(Error, Debug)]
pub enum BotError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Network error: {0}")]
    Network(String),

    /// The platform received the request and rejected it (HTTP error status).
    #[error("Platform rejected request: {0}")]
    Platform(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BotError {
    /// True when the platform answered with an error status rather than failing to answer.
    pub fn is_platform_rejection(&self) -> bool {
        matches!(self, BotError::Platform(_))
    }
}

/// Command execution errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Command not found: {0}")]
    NotFound(String),
}

/// Translation service errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("{0} --> No support for the provided language.")]
    UnsupportedLanguage(String),

    #[error("Text length need to be between 0 and {max} characters, got {len}")]
    InvalidLength { len: usize, max: usize },

    #[error("Request exception can happen due to an api connection error: {0}")]
    Network(String),

    #[error("Server Error: {0}")]
    Api(String),

    #[error("Server Error: You made too many requests to the server")]
    RateLimited,

    #[error("No translation was found using the current translator: {0}")]
    Parse(String),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),

    #[error("Parse error: {0}")]
    Parse(String),
}
