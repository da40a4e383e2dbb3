//! Search request representation.

use serde::{Deserialize, Serialize};

use crate::{ProviderKind, Result, SearchError};

/// Maximum query length in characters.
pub const MAX_QUERY_LEN: usize = 500;

/// Maximum results requested per page.
pub const MAX_LIMIT: usize = 100;

/// A search request with all parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    /// The search terms.
    pub query: String,
    /// Providers to query. Empty means all registered providers.
    pub providers: Vec<ProviderKind>,
    /// Maximum number of results per page.
    pub limit: usize,
    /// Offset into the merged result set.
    pub offset: usize,
    /// Whether to enable safe search filtering.
    pub safe_search: bool,
    /// Region code for localized results (e.g., "us").
    pub region: String,
    /// Language code for results (e.g., "en").
    pub language: String,
}

impl SearchRequest {
    /// Creates a new request with the given terms and default parameters.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            providers: Vec::new(),
            limit: 10,
            offset: 0,
            safe_search: true,
            region: "us".to_string(),
            language: "en".to_string(),
        }
    }

    /// Sets the providers to query.
    pub fn with_providers(mut self, providers: Vec<ProviderKind>) -> Self {
        self.providers = providers;
        self
    }

    /// Sets the page size.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the pagination offset.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the safe search flag.
    pub fn with_safe_search(mut self, safe_search: bool) -> Self {
        self.safe_search = safe_search;
        self
    }

    /// Sets the region code.
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Sets the language code.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Validates query text and paging bounds.
    ///
    /// Provider resolution is validated separately by the service, after
    /// defaulting an empty provider list to the full registry.
    pub fn validate(&self) -> Result<()> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return Err(SearchError::InvalidQuery("query cannot be empty".into()));
        }
        if trimmed.chars().count() > MAX_QUERY_LEN {
            return Err(SearchError::InvalidQuery(format!(
                "query exceeds {} characters",
                MAX_QUERY_LEN
            )));
        }
        if self.limit == 0 || self.limit > MAX_LIMIT {
            return Err(SearchError::InvalidQuery(format!(
                "limit must be between 1 and {}",
                MAX_LIMIT
            )));
        }
        Ok(())
    }

    /// Current page number (1-indexed), derived from offset and limit.
    pub fn page(&self) -> usize {
        self.offset / self.limit + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_new_defaults() {
        let req = SearchRequest::new("rust async");
        assert_eq!(req.query, "rust async");
        assert!(req.providers.is_empty());
        assert_eq!(req.limit, 10);
        assert_eq!(req.offset, 0);
        assert!(req.safe_search);
        assert_eq!(req.region, "us");
        assert_eq!(req.language, "en");
    }

    #[test]
    fn test_request_builder_chain() {
        let req = SearchRequest::new("rust")
            .with_providers(vec![ProviderKind::Google, ProviderKind::Bing])
            .with_limit(25)
            .with_offset(50)
            .with_safe_search(false)
            .with_region("fr")
            .with_language("fr");
        assert_eq!(req.providers.len(), 2);
        assert_eq!(req.limit, 25);
        assert_eq!(req.offset, 50);
        assert!(!req.safe_search);
        assert_eq!(req.region, "fr");
        assert_eq!(req.language, "fr");
    }

    #[test]
    fn test_validate_ok() {
        assert!(SearchRequest::new("rust").validate().is_ok());
    }

    #[test]
    fn test_validate_empty_query() {
        let req = SearchRequest::new("   ");
        assert!(matches!(
            req.validate(),
            Err(SearchError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_validate_query_too_long() {
        let req = SearchRequest::new("x".repeat(MAX_QUERY_LEN + 1));
        assert!(matches!(
            req.validate(),
            Err(SearchError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_validate_query_at_limit() {
        let req = SearchRequest::new("x".repeat(MAX_QUERY_LEN));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_limit() {
        let req = SearchRequest::new("rust").with_limit(0);
        assert!(matches!(
            req.validate(),
            Err(SearchError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_validate_limit_too_large() {
        let req = SearchRequest::new("rust").with_limit(MAX_LIMIT + 1);
        assert!(matches!(
            req.validate(),
            Err(SearchError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_page_from_offset() {
        assert_eq!(SearchRequest::new("q").page(), 1);
        assert_eq!(SearchRequest::new("q").with_offset(9).page(), 1);
        assert_eq!(SearchRequest::new("q").with_offset(10).page(), 2);
        assert_eq!(
            SearchRequest::new("q").with_limit(5).with_offset(20).page(),
            5
        );
    }

    #[test]
    fn test_request_serialization() {
        let req = SearchRequest::new("test");
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"query\":\"test\""));
    }
}
