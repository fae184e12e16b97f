//! Error types for the Collectra core library
//!
//! The rendering core is pure: once it has a parsed request URL and a
//! discriminated payload, every transformation succeeds. The only fallible
//! operations are parsing a caller-supplied URL and serializing the final
//! document, so the error surface stays small.

use thiserror::Error;

/// Main error type for Collectra operations
#[derive(Error, Debug)]
pub enum Error {
    /// JSON serialization errors while writing the wire document
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// The caller-supplied request URL does not parse as an absolute URL
    #[error("Invalid request URL: {value}")]
    Href {
        value: String,
        #[source]
        source: url::ParseError,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
