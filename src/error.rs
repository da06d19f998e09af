//! Error handling for the DataDash-RS application
//!
//! This module defines custom error types and a Result alias for use
//! throughout the application. Every error that reaches a binding handler
//! boundary is turned into a status message for the user, so the variants
//! carry enough text to be shown as-is.

use thiserror::Error;

use crate::binding::BindingError;

/// Main error type for DataDash-RS operations
#[derive(Error, Debug)]
pub enum DashError {
    /// The default dataset could not be fetched
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Bytes are not valid, parseable CSV
    #[error("Parse error: {0}")]
    Parse(String),

    /// Archive write or read failure
    #[error("Storage error: {0}")]
    StorageIo(String),

    /// Archive entry is missing
    #[error("Not found: {0}")]
    NotFound(String),

    /// Errors related to configuration loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors raised by the binding graph itself
    #[error("Binding error: {0}")]
    Binding(#[from] BindingError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<DashError>,
    },
}

impl DashError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        DashError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, skipping any context wrappers
    pub fn root(&self) -> &DashError {
        match self {
            DashError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }

    /// Whether this is (or wraps) a `NotFound`
    pub fn is_not_found(&self) -> bool {
        matches!(self.root(), DashError::NotFound(_))
    }

    /// Whether this is (or wraps) a `Parse` error
    pub fn is_parse(&self) -> bool {
        matches!(self.root(), DashError::Parse(_))
    }
}

impl From<csv::Error> for DashError {
    fn from(err: csv::Error) -> Self {
        DashError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for DashError {
    fn from(err: toml::de::Error) -> Self {
        DashError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for DashError {
    fn from(err: serde_json::Error) -> Self {
        DashError::Serialization(err.to_string())
    }
}

/// Result type alias for DataDash-RS operations
pub type Result<T> = std::result::Result<T, DashError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}
