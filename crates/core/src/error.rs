//! Error types for Expositor operations.
//!
//! This module defines the main error type [`ExpositorError`] which represents
//! all possible errors that can occur while driving a directory page, waiting
//! for listings to render, and serializing the harvested records.
//!
//! Per-card extraction problems are deliberately NOT errors: a malformed card
//! becomes a skip outcome (see [`crate::extract::CardOutcome`]) and the batch
//! continues. Only page-level failures reach this type.
//!
//! # Example
//!
//! ```rust
//! use expositor_core::{ExpositorError, Result};
//!
//! fn require_page(html: &str) -> Result<()> {
//!     if html.is_empty() {
//!         return Err(ExpositorError::PageLoad {
//!             url: "about:blank".to_string(),
//!             message: "empty document".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! # require_page("<html></html>").unwrap();
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for harvesting operations.
///
/// This enum represents all hard failures: transport problems, a page that
/// never produces the expected listing cards, invalid selectors or URLs, and
/// file I/O. Any of these aborts the run before output is produced, since no
/// partial result is meaningful without a successfully loaded page.
#[derive(Error, Debug)]
pub enum ExpositorError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(any(feature = "fetch", feature = "webdriver"))]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a URL cannot be parsed or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Invalid CSS selector expression.
    ///
    /// Returned when a selector (card root or a field candidate list) cannot
    /// be parsed by the query engine.
    #[error("Invalid selector {selector:?}: {message}")]
    Selector { selector: String, message: String },

    /// The target page failed to load.
    ///
    /// Navigation errors are fatal: nothing can be harvested from a page
    /// that never rendered.
    #[error("Failed to load {url}: {message}")]
    PageLoad { url: String, message: String },

    /// The card selector never matched anything within the ready timeout.
    ///
    /// Either the page shape changed or the wrong selector was configured;
    /// both abort the run.
    #[error("No cards matched {selector:?} within {waited_secs} seconds")]
    MissingCards { selector: String, waited_secs: u64 },

    /// A WebDriver endpoint reported a protocol-level error.
    ///
    /// Carries the standard error code (e.g. `no such window`) and the
    /// driver's human-readable message. This variant is only available when
    /// the `webdriver` feature is enabled.
    #[cfg(feature = "webdriver")]
    #[error("WebDriver error [{error}]: {message}")]
    WebDriver { error: String, message: String },

    /// Record serialization failed.
    #[error("Failed to serialize records: {0}")]
    Serialize(String),

    /// File not found.
    ///
    /// Returned when attempting to read a file that doesn't exist.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// File read/write errors.
    ///
    /// Wraps standard I/O errors for file operations.
    #[error("I/O error: {0}")]
    WriteError(#[from] std::io::Error),

    /// Site profile configuration errors.
    ///
    /// Returned when a profile file is missing fields or is not valid JSON.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for ExpositorError.
///
/// This is a convenience alias for `std::result::Result<T, ExpositorError>`.
pub type Result<T> = std::result::Result<T, ExpositorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ExpositorError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_missing_cards_error() {
        let err = ExpositorError::MissingCards { selector: ".directory-item".to_string(), waited_secs: 30 };
        assert!(err.to_string().contains(".directory-item"));
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_selector_error() {
        let err = ExpositorError::Selector { selector: "[[".to_string(), message: "unexpected token".to_string() };
        assert!(err.to_string().contains("[["));
    }

    #[test]
    fn test_timeout_error() {
        let err = ExpositorError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }

    #[test]
    fn test_page_load_error() {
        let err = ExpositorError::PageLoad {
            url: "https://directory.example.com".to_string(),
            message: "connection refused".to_string(),
        };
        assert!(err.to_string().contains("directory.example.com"));
        assert!(err.to_string().contains("connection refused"));
    }
}
