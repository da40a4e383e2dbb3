//! Normalized search result types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderKind;

/// Type of search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultType {
    /// Standard web result.
    Web,
    /// Image result.
    Image,
    /// Video result.
    Video,
    /// News article.
    News,
    /// Source code repository.
    Code,
    /// Forum or community post.
    Forum,
    /// Related-query suggestion.
    Suggestion,
}

impl Default for ResultType {
    fn default() -> Self {
        Self::Web
    }
}

/// A single normalized search result.
///
/// All providers map their native payloads into this shape; `url` doubles as
/// the deduplication key and is compared as an exact string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResultItem {
    /// Result title.
    pub title: String,
    /// Result URL. Items with an empty URL are dropped before merging.
    pub url: String,
    /// Short description or preview of the result.
    pub snippet: String,
    /// Provider that returned this result.
    pub provider: ProviderKind,
    /// Type of result.
    #[serde(default)]
    pub result_type: ResultType,
    /// Provider-assigned relevance score in [0.0, 1.0], decreasing with
    /// native rank position.
    pub score: f64,
    /// Thumbnail or preview image URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Provider-specific metadata.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, Value>,
}

impl SearchResultItem {
    /// Creates a new result with the given core fields.
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        snippet: impl Into<String>,
        provider: ProviderKind,
        score: f64,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            snippet: snippet.into(),
            provider,
            result_type: ResultType::Web,
            score,
            image_url: None,
            metadata: serde_json::Map::new(),
        }
    }

    /// Sets the result type.
    pub fn with_type(mut self, result_type: ResultType) -> Self {
        self.result_type = result_type;
        self
    }

    /// Sets the image URL.
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Inserts a metadata entry.
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// The aggregated, merged and paginated response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedResponse {
    /// The original search query.
    pub query: String,
    /// Total number of results after deduplication, before pagination.
    pub total_results: usize,
    /// Current page number (1-indexed).
    pub page: usize,
    /// Number of results per page.
    pub page_size: usize,
    /// The paginated slice of merged results.
    pub results: Vec<SearchResultItem>,
    /// Providers that were dispatched.
    pub providers_used: Vec<ProviderKind>,
    /// Error messages for providers that failed, keyed by provider.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub provider_errors: HashMap<ProviderKind, String>,
}
