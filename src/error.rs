//! Error types for wordpos.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for wordpos operations.
#[derive(Error, Debug)]
pub enum WordposError {
    /// Input errors (unreadable file, broken stdin, etc.)
    #[error("Input error: {0}")]
    Input(String),

    /// Lexical provider errors (missing dictionary files, malformed data, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Configuration errors (invalid config file, bad flag values, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (unexpected states, bugs, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl WordposError {
    /// Creates an input error with the given message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Creates a provider error with the given message.
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Input(_) => "Input Error",
            Self::Provider(_) => "Provider Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }
}

/// Result type alias using WordposError.
pub type Result<T> = std::result::Result<T, WordposError>;
