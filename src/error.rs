//! Error types for the search aggregation library.

use thiserror::Error;

use crate::template::TemplateError;

/// Result type alias for search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors that can occur during search aggregation.
///
/// Per-provider failures (`Timeout`, `Http`, `Network`, `UnsupportedProvider`,
/// `Parse`) are captured at the dispatch boundary and surfaced through
/// `AggregatedResponse::provider_errors`; they never abort the aggregation.
/// Only `InvalidQuery`, `NoProviders` and `Cancelled` reach the caller as
/// hard failures.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Query failed validation.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// No valid search providers resolved from the request.
    #[error("No valid search providers specified")]
    NoProviders,

    /// Provider call exceeded the timeout ceiling.
    #[error("Request timed out")]
    Timeout,

    /// Provider returned a non-success status.
    #[error("API error: {status}")]
    Http {
        /// HTTP status code returned by the provider.
        status: u16,
    },

    /// Connection-level failure.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// No payload parser registered for the provider.
    #[error("No parser available for {0}")]
    UnsupportedProvider(String),

    /// Failed to parse a provider response.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// Endpoint template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] TemplateError),

    /// URL parsing error.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Aggregation was cancelled before any provider completed.
    #[error("Search cancelled")]
    Cancelled,
}

impl SearchError {
    /// Returns true if this error is a per-provider failure that is recorded
    /// in the error map rather than propagated.
    pub fn is_provider_error(&self) -> bool {
        matches!(
            self,
            SearchError::Timeout
                | SearchError::Http { .. }
                | SearchError::Network(_)
                | SearchError::UnsupportedProvider(_)
                | SearchError::Parse(_)
        )
    }
}
