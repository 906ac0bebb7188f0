//! Error handling for vizprep
//!
//! This module defines the crate error type and a Result alias.
//!
//! Data preparation and chart configuration report their failures as an
//! `error` field on the returned value so a caller can render a fallback.
//! The accessors that must not run on bad input (`ChartConfig::viz_data`)
//! convert that field into a [`VizPrepError`] instead of producing
//! untrusted output.

use thiserror::Error;

/// Main error type for vizprep operations
#[derive(Error, Debug)]
pub enum VizPrepError {
    /// Inconsistent frame or field lengths
    #[error("Data shape error: {0}")]
    DataShape(String),

    /// Invalid chart configuration (e.g. a stacking group naming a missing series)
    #[error("Configuration error: {0}")]
    Config(String),

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
        source: Box<VizPrepError>,
    },
}

impl VizPrepError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        VizPrepError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }
}

impl From<serde_json::Error> for VizPrepError {
    fn from(err: serde_json::Error) -> Self {
        VizPrepError::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for VizPrepError {
    fn from(err: toml::de::Error) -> Self {
        VizPrepError::Serialization(err.to_string())
    }
}

/// Result type alias for vizprep operations
pub type Result<T> = std::result::Result<T, VizPrepError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<VizPrepError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.into().with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VizPrepError::DataShape("field \"Value\" has 3 values".to_string());
        assert_eq!(err.to_string(), "Data shape error: field \"Value\" has 3 values");
    }

    #[test]
    fn test_with_context_wraps_source() {
        let result: Result<()> = Err(VizPrepError::Config("bad group".to_string()));
        let err = result.context("building chart").unwrap_err();
        assert_eq!(err.to_string(), "building chart: Configuration error: bad group");
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_io_error_converts() {
        let io: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "missing"));
        let err = io.with_context(|| "reading panel.toml".to_string()).unwrap_err();
        assert!(matches!(err, VizPrepError::WithContext { .. }));
    }
}
