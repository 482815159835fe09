//! Error types for mvnrepo operations.
//!
//! This module defines the main error type [`MvnRepoError`] covering HTTP
//! transport failures, unsuccessful responses, and bad configuration.
//!
//! Errors only ever travel between the fetch layer and the resolver layer:
//! the public operations on [`crate::MvnRepository`] convert every failure
//! into a warn-logged absent or empty result, so callers of the resolver
//! API never see this type unless they drop down to [`crate::PageFetcher`]
//! directly.

use reqwest::StatusCode;
use thiserror::Error;
use url::Url;

/// Main error type for page fetching.
///
/// # Example
///
/// ```rust
/// use mvnrepo_core::{MvnRepoError, PageFetcher};
/// use url::Url;
///
/// let base = Url::parse("mailto:nobody@example.com").unwrap();
/// let result = PageFetcher::new(base, reqwest::Client::new());
/// assert!(matches!(result, Err(MvnRepoError::InvalidBaseUrl(_))));
/// ```
#[derive(Error, Debug)]
pub enum MvnRepoError {
    /// HTTP request errors from reqwest.
    ///
    /// Wraps network errors, DNS failures, connection issues, timeouts,
    /// and body-decoding problems.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The site answered with a non-success status code.
    ///
    /// The URL is kept so resolver-level warnings can name the page that
    /// failed.
    #[error("request to {url} returned status {status}")]
    Status { url: Url, status: StatusCode },

    /// The configured base URL cannot carry path segments.
    ///
    /// Returned at construction time for bases like `mailto:` or `data:`
    /// URLs; never from a fetch.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Result type alias for MvnRepoError.
pub type Result<T> = std::result::Result<T, MvnRepoError>;
