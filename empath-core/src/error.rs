//! Error kinds for the engine, split by recovery policy.
//!
//! Schema and classifier failures are recovered locally by their owners
//! (default state, neutral classification) and normally never surface;
//! the remaining kinds propagate to the caller.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// Missing or out-of-range configuration, or an unknown preset id.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// State write failure or lock collision after retry. In-memory state
    /// stays valid.
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Unreadable or malformed state file. Recovered by falling back to a
    /// default state.
    #[error("schema error: {message}")]
    Schema { message: String },

    /// Network, HTTP, or parse failure while classifying. Recovered by a
    /// neutral classification.
    #[error("classifier error: {message}")]
    Classifier { message: String },

    /// Invalid trait or config value in a mutation operation. State is
    /// unchanged.
    #[error("validation error: {message}")]
    Validation { message: String },
}

impl EngineError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    pub fn classifier(message: impl Into<String>) -> Self {
        Self::Classifier {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_kind() {
        let err = EngineError::config("unknown preset 'x'");
        assert!(err.to_string().starts_with("configuration error"));

        let err = EngineError::validation("trait out of range");
        assert!(err.to_string().contains("trait out of range"));
    }

    #[test]
    fn test_io_carries_source() {
        use std::error::Error;
        let inner = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = EngineError::io("state write failed", inner);
        assert!(err.source().is_some());
    }
}
