//! Error types for the Kotodama library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`KotodamaError`] enum. Analysis itself is total over valid tokens, so in
//! practice errors come from building a pipeline (bad options, unreadable
//! word lists, malformed lexicons) or from the external tokenizer.
//!
//! # Examples
//!
//! ```
//! use kotodama::error::{KotodamaError, Result};
//!
//! fn build() -> Result<()> {
//!     Err(KotodamaError::invalid_config("minimum_length", "must be at least 1"))
//! }
//!
//! match build() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Kotodama operations.
#[derive(Error, Debug)]
pub enum KotodamaError {
    /// I/O errors (word lists, lexicons, config files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// An option that failed validation while building a pipeline.
    #[error("Invalid configuration for option '{option}': {message}")]
    InvalidConfig { option: String, message: String },

    /// A referenced component or resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with KotodamaError.
pub type Result<T> = std::result::Result<T, KotodamaError>;

impl KotodamaError {
    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        KotodamaError::Analysis(msg.into())
    }

    /// Create a new invalid config error for the named option.
    pub fn invalid_config<O: Into<String>, S: Into<String>>(option: O, msg: S) -> Self {
        KotodamaError::InvalidConfig {
            option: option.into(),
            message: msg.into(),
        }
    }

    /// Create a new not found error.
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        KotodamaError::NotFound(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        KotodamaError::Other(msg.into())
    }

    /// The offending option, if this is a configuration error.
    pub fn option(&self) -> Option<&str> {
        match self {
            KotodamaError::InvalidConfig { option, .. } => Some(option),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = KotodamaError::analysis("Test analysis error");
        assert_eq!(error.to_string(), "Analysis error: Test analysis error");

        let error = KotodamaError::invalid_config("mode", "unknown value 'foo'");
        assert_eq!(
            error.to_string(),
            "Invalid configuration for option 'mode': unknown value 'foo'"
        );
        assert_eq!(error.option(), Some("mode"));

        let error = KotodamaError::not_found("filter 'nope'");
        assert_eq!(error.option(), None);
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = KotodamaError::from(io_error);

        match error {
            KotodamaError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }
}
