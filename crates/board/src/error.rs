// ABOUTME: Error types for fetching, parsing, submitting and local storage.
// ABOUTME: Display strings are the user-facing messages; extraction itself never errors.

use std::fmt;
use thiserror::Error;

/// Errors surfaced to the caller by the client and the local stores.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The request did not complete within the configured timeout.
    #[error("Connection timed out")]
    Timeout,

    /// The host could not be resolved or reached.
    #[error("No internet connection")]
    NoConnection,

    /// Transport or HTTP status failure while loading a page.
    #[error("Failed to load page: {0}")]
    Io(String),

    /// The response could not be turned into a document.
    #[error("Failed to parse HTML: {0}")]
    Parse(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The post endpoint rejected a reply or new thread.
    #[error("Failed to submit post: {0}")]
    Submit(String),

    /// Bookmark or settings file could not be read or written.
    #[error("storage error: {0}")]
    Storage(String),
}

impl BoardError {
    pub fn io(err: impl fmt::Display) -> Self {
        BoardError::Io(err.to_string())
    }

    pub fn parse(err: impl fmt::Display) -> Self {
        BoardError::Parse(err.to_string())
    }

    pub fn storage(err: impl fmt::Display) -> Self {
        BoardError::Storage(err.to_string())
    }

    /// Returns true if this is a Timeout error.
    pub fn is_timeout(&self) -> bool {
        matches!(self, BoardError::Timeout)
    }

    /// Returns true if this is a NoConnection error.
    pub fn is_no_connection(&self) -> bool {
        matches!(self, BoardError::NoConnection)
    }
}
