//! Error types for the portfolio components

use thiserror::Error;

/// Result type alias for crate operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of a single JSON fetch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    /// The request never produced a response (bad locator, connection refused, ...)
    #[error("Transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status; the body is not parsed
    #[error("HTTP error! status: {status} {status_text}")]
    HttpStatus { status: u16, status_text: String },

    /// The body could not be parsed as JSON
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
}

/// Failures of a render call
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The target is not a real display surface; nothing was written
    #[error("Invalid render target: {0}")]
    InvalidTarget(String),
}

/// Errors that can occur across the crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fetch failure
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Render failure
    #[error(transparent)]
    Render(#[from] RenderError),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Preference store could not be read or written
    #[error("Preference storage failed: {0}")]
    Storage(String),

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_message_includes_code_and_text() {
        let e = FetchError::HttpStatus { status: 404, status_text: "Not Found".into() };
        assert_eq!(e.to_string(), "HTTP error! status: 404 Not Found");
    }

    #[test]
    fn crate_error_wraps_component_errors() {
        let e: Error = RenderError::InvalidTarget(".projects".into()).into();
        assert!(matches!(e, Error::Render(_)));
        assert_eq!(e.to_string(), "Invalid render target: .projects");
    }
}
