//! Search aggregation orchestration.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::credentials::{CredentialStore, EnvCredentials};
use crate::dispatcher::Dispatcher;
use crate::normalize;
use crate::provider::{ProviderKind, Registry};
use crate::ratelimit::{NoLimit, RateLimit};
use crate::transport::Transport;
use crate::{AggregatedResponse, Result, SearchError, SearchRequest};

/// Multi-provider search service: fans a request out to every requested
/// provider, normalizes and merges what comes back, and reports per-provider
/// failures without failing the aggregation.
///
/// Construct one instance at process start and pass it to request handlers;
/// all state is read-only or internally synchronized.
pub struct SearchService {
    registry: Registry,
    dispatcher: Dispatcher,
}

impl SearchService {
    /// Creates a service with env-based credentials and no rate limiting.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_parts(transport, Arc::new(EnvCredentials::new()), Arc::new(NoLimit))
    }

    /// Creates a service with explicit collaborators.
    pub fn with_parts(
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        limiter: Arc<dyn RateLimit>,
    ) -> Self {
        let registry = Registry::new();
        let dispatcher = Dispatcher::new(registry.clone(), transport, credentials, limiter);
        Self {
            registry,
            dispatcher,
        }
    }

    /// Overrides the per-provider call timeout.
    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.dispatcher = self.dispatcher.with_call_timeout(timeout);
        self
    }

    /// Returns the provider registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Performs an aggregated search.
    pub async fn aggregate(&self, request: SearchRequest) -> Result<AggregatedResponse> {
        self.aggregate_with_cancel(request, CancellationToken::new())
            .await
    }

    /// Performs an aggregated search under an external cancellation signal.
    ///
    /// On cancellation, outstanding provider calls are abandoned: results
    /// that already completed are merged and returned, the abandoned
    /// providers appear in `provider_errors`. Cancellation before any call
    /// completed is a hard [`SearchError::Cancelled`].
    pub async fn aggregate_with_cancel(
        &self,
        request: SearchRequest,
        cancel: CancellationToken,
    ) -> Result<AggregatedResponse> {
        request.validate()?;
        let providers = self.resolve_providers(&request)?;
        debug!(count = providers.len(), "fanning out search");

        let settled = self
            .dispatcher
            .dispatch(&providers, &request, &cancel)
            .await;

        if cancel.is_cancelled()
            && settled
                .iter()
                .all(|r| matches!(r.payload, Err(SearchError::Cancelled)))
        {
            return Err(SearchError::Cancelled);
        }

        // Settled results arrive in completion order; normalized items keep
        // that order into the pool, which decides URL-collision winners.
        let mut pool = Vec::new();
        let mut provider_errors = HashMap::new();
        for raw in settled {
            match raw.payload {
                Ok(payload) => match normalize::normalize(raw.provider, &payload) {
                    Ok(normalized) => {
                        debug!(
                            provider = %raw.provider,
                            items = normalized.items.len(),
                            "provider returned results"
                        );
                        pool.extend(normalized.items);
                    }
                    Err(e) => {
                        warn!(provider = %raw.provider, error = %e, "normalization failed");
                        provider_errors.insert(raw.provider, e.to_string());
                    }
                },
                Err(e) => {
                    provider_errors.insert(raw.provider, e.to_string());
                }
            }
        }

        let (results, total_results) = crate::merge::merge(pool, request.offset, request.limit);

        Ok(AggregatedResponse {
            page: request.page(),
            page_size: request.limit,
            query: request.query,
            total_results,
            results,
            providers_used: providers,
            provider_errors,
        })
    }

    /// Resolves the request's provider set: empty defaults to the full
    /// registry, duplicates collapse to the first occurrence.
    fn resolve_providers(&self, request: &SearchRequest) -> Result<Vec<ProviderKind>> {
        let resolved = if request.providers.is_empty() {
            self.registry.kinds()
        } else {
            let mut seen = HashSet::new();
            request
                .providers
                .iter()
                .copied()
                .filter(|kind| seen.insert(*kind))
                .collect()
        };
        if resolved.is_empty() {
            return Err(SearchError::NoProviders);
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentials;
    use crate::transport::ProviderRequest;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    /// Transport answering each provider endpoint with a fixed payload or
    /// failure.
    struct FixtureTransport {
        fixtures: Vec<(&'static str, Result<Value>)>,
    }

    impl FixtureTransport {
        fn new(fixtures: Vec<(&'static str, Result<Value>)>) -> Arc<Self> {
            Arc::new(Self { fixtures })
        }
    }

    #[async_trait]
    impl Transport for FixtureTransport {
        async fn fetch(&self, request: &ProviderRequest) -> Result<Value> {
            for (marker, response) in &self.fixtures {
                if request.url.contains(marker) {
                    return match response {
                        Ok(v) => Ok(v.clone()),
                        Err(SearchError::Http { status }) => {
                            Err(SearchError::Http { status: *status })
                        }
                        Err(SearchError::Timeout) => Err(SearchError::Timeout),
                        Err(_) => Err(SearchError::Parse("fixture failure".into())),
                    };
                }
            }
            Ok(json!({}))
        }
    }

    fn service(transport: Arc<FixtureTransport>) -> SearchService {
        SearchService::with_parts(
            transport,
            Arc::new(StaticCredentials::new()),
            Arc::new(NoLimit),
        )
    }

    fn github_payload(urls: &[&str]) -> Value {
        let items: Vec<Value> = urls
            .iter()
            .map(|u| json!({"full_name": format!("repo {u}"), "html_url": u}))
            .collect();
        json!({"items": items, "total_count": urls.len()})
    }

    #[tokio::test]
    async fn test_aggregate_merges_providers() {
        let transport = FixtureTransport::new(vec![
            (
                "googleapis",
                Ok(json!({
                    "items": [
                        {"title": "A", "link": "https://a.com", "snippet": "sa"},
                        {"title": "B", "link": "https://b.com", "snippet": "sb"}
                    ],
                    "searchInformation": {"totalResults": "2"}
                })),
            ),
            (
                "github",
                Ok(github_payload(&["https://github.com/x/y"])),
            ),
        ]);
        let service = service(transport);
        let request = SearchRequest::new("rust")
            .with_providers(vec![ProviderKind::Google, ProviderKind::GitHub]);

        let response = service.aggregate(request).await.unwrap();
        assert_eq!(response.total_results, 3);
        assert_eq!(response.results.len(), 3);
        assert!(response.provider_errors.is_empty());
        assert_eq!(
            response.providers_used,
            vec![ProviderKind::Google, ProviderKind::GitHub]
        );
        // Google's 1.0-base results outrank GitHub's 0.8 base.
        assert_eq!(response.results[0].provider, ProviderKind::Google);
    }

    #[tokio::test]
    async fn test_aggregate_partial_failure_isolated() {
        let transport = FixtureTransport::new(vec![
            ("bing", Err(SearchError::Timeout)),
            ("github", Ok(github_payload(&["https://github.com/x/y"]))),
        ]);
        let service = service(transport);
        let request = SearchRequest::new("rust")
            .with_providers(vec![ProviderKind::Bing, ProviderKind::GitHub]);

        let response = service.aggregate(request).await.unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(
            response.provider_errors.get(&ProviderKind::Bing).unwrap(),
            "Request timed out"
        );
        assert!(!response.provider_errors.contains_key(&ProviderKind::GitHub));
    }

    #[tokio::test]
    async fn test_aggregate_all_providers_fail() {
        let transport = FixtureTransport::new(vec![
            ("googleapis", Err(SearchError::Http { status: 403 })),
            ("bing", Err(SearchError::Http { status: 500 })),
        ]);
        let service = service(transport);
        let request = SearchRequest::new("rust")
            .with_providers(vec![ProviderKind::Google, ProviderKind::Bing]);

        let response = service.aggregate(request).await.unwrap();
        assert!(response.results.is_empty());
        assert_eq!(response.total_results, 0);
        assert_eq!(response.provider_errors.len(), 2);
        assert_eq!(
            response.provider_errors.get(&ProviderKind::Google).unwrap(),
            "API error: 403"
        );
    }

    #[tokio::test]
    async fn test_aggregate_empty_query_rejected() {
        let service = service(FixtureTransport::new(vec![]));
        let result = service.aggregate(SearchRequest::new("  ")).await;
        assert!(matches!(result, Err(SearchError::InvalidQuery(_))));
    }

    #[tokio::test]
    async fn test_aggregate_defaults_to_all_providers() {
        let service = service(FixtureTransport::new(vec![]));
        let response = service.aggregate(SearchRequest::new("rust")).await.unwrap();
        assert_eq!(response.providers_used, ProviderKind::ALL.to_vec());
    }

    #[tokio::test]
    async fn test_aggregate_dedups_requested_providers() {
        let service = service(FixtureTransport::new(vec![]));
        let request = SearchRequest::new("rust").with_providers(vec![
            ProviderKind::GitHub,
            ProviderKind::GitHub,
            ProviderKind::Reddit,
        ]);
        let response = service.aggregate(request).await.unwrap();
        assert_eq!(
            response.providers_used,
            vec![ProviderKind::GitHub, ProviderKind::Reddit]
        );
    }

    #[tokio::test]
    async fn test_aggregate_pagination_fields() {
        let urls: Vec<String> = (0..8).map(|i| format!("https://github.com/r/{i}")).collect();
        let url_refs: Vec<&str> = urls.iter().map(String::as_str).collect();
        let transport = FixtureTransport::new(vec![("github", Ok(github_payload(&url_refs)))]);
        let service = service(transport);
        let request = SearchRequest::new("rust")
            .with_providers(vec![ProviderKind::GitHub])
            .with_limit(3)
            .with_offset(6);

        let response = service.aggregate(request).await.unwrap();
        assert_eq!(response.total_results, 8);
        assert_eq!(response.results.len(), 2);
        assert_eq!(response.page, 3);
        assert_eq!(response.page_size, 3);
    }

    #[tokio::test]
    async fn test_aggregate_cancelled_before_start() {
        let service = service(FixtureTransport::new(vec![]));
        let cancel = CancellationToken::new();
        cancel.cancel();
        let result = service
            .aggregate_with_cancel(SearchRequest::new("rust"), cancel)
            .await;
        assert!(matches!(result, Err(SearchError::Cancelled)));
    }

    #[tokio::test]
    async fn test_aggregate_unsupported_normalizer_is_provider_error() {
        // Exercise the fallback path by normalizing directly; the service
        // records it the same way it records dispatch failures.
        let err = normalize::unsupported(ProviderKind::Reddit).unwrap_err();
        assert!(err.is_provider_error());
    }
}
