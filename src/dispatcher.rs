//! Concurrent fan-out dispatch to upstream providers.
//!
//! Every requested provider is called independently; failures, timeouts and
//! non-success statuses are captured per provider and never abort the batch.
//! Results are collected in completion order, which downstream dedup uses as
//! its tie-break.

use std::collections::HashSet;
use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use serde_json::Value;
use tokio::time::{timeout, Duration};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::credentials::CredentialStore;
use crate::provider::{ProviderKind, ProviderSpec, Registry};
use crate::ratelimit::RateLimit;
use crate::template::{render, MissingKeyPolicy, TemplateContext};
use crate::transport::{ProviderRequest, Transport};
use crate::{Result, SearchError, SearchRequest};

/// Per-call timeout ceiling.
pub const CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// Outcome of one dispatched provider call: the raw payload on success, the
/// captured failure otherwise.
#[derive(Debug)]
pub struct RawProviderResult {
    /// Provider the call was issued to.
    pub provider: ProviderKind,
    /// Raw JSON payload, or the failure that prevented one.
    pub payload: Result<Value>,
}

impl RawProviderResult {
    /// Whether the call produced a payload.
    pub fn succeeded(&self) -> bool {
        self.payload.is_ok()
    }
}

/// Issues provider calls concurrently and collects settled results.
pub struct Dispatcher {
    registry: Registry,
    transport: Arc<dyn Transport>,
    credentials: Arc<dyn CredentialStore>,
    limiter: Arc<dyn RateLimit>,
    call_timeout: Duration,
}

impl Dispatcher {
    /// Creates a dispatcher over the given collaborators.
    pub fn new(
        registry: Registry,
        transport: Arc<dyn Transport>,
        credentials: Arc<dyn CredentialStore>,
        limiter: Arc<dyn RateLimit>,
    ) -> Self {
        Self {
            registry,
            transport,
            credentials,
            limiter,
            call_timeout: CALL_TIMEOUT,
        }
    }

    /// Overrides the per-call timeout ceiling.
    pub fn with_call_timeout(mut self, call_timeout: Duration) -> Self {
        self.call_timeout = call_timeout;
        self
    }

    /// Renders a provider's templates into a concrete outbound request.
    ///
    /// Unresolvable placeholders (typically missing credentials) pass
    /// through as literals; the provider then reports its own auth error
    /// instead of the whole request aborting.
    pub fn build_request(
        &self,
        spec: &ProviderSpec,
        request: &SearchRequest,
    ) -> Result<ProviderRequest> {
        let ctx = TemplateContext {
            query: request.query.trim().to_string(),
            limit: request.limit,
            offset: request.offset,
            page: request.page(),
            safe_search: request.safe_search,
            region: request.region.clone(),
            language: request.language.clone(),
            api_key: self.credentials.api_key(spec.kind),
            search_engine_id: self.credentials.search_engine_id(spec.kind),
        };

        let mut pairs = Vec::with_capacity(spec.params.len());
        for (name, template) in spec.params {
            let value = render(template, &ctx, MissingKeyPolicy::PassThrough)?;
            pairs.push(format!("{}={}", name, value));
        }
        let url = format!("{}?{}", spec.endpoint, pairs.join("&"));
        url::Url::parse(&url)?;

        let mut headers = Vec::with_capacity(spec.headers.len());
        for (name, template) in spec.headers {
            let value = render(template, &ctx, MissingKeyPolicy::PassThrough)?;
            headers.push((name.to_string(), value));
        }

        Ok(ProviderRequest { url, headers })
    }

    /// Fans the request out to `providers` and waits for every call to
    /// settle, or for cancellation.
    ///
    /// Returns one result per provider, in completion order. On
    /// cancellation, calls that have not settled are abandoned and recorded
    /// as cancelled.
    pub async fn dispatch(
        &self,
        providers: &[ProviderKind],
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Vec<RawProviderResult> {
        let mut calls = FuturesUnordered::new();

        for &kind in providers {
            let spec = self.registry.resolve(kind);
            let outbound = self.build_request(spec, request);
            let transport = Arc::clone(&self.transport);
            let limiter = Arc::clone(&self.limiter);
            let call_timeout = self.call_timeout;

            calls.push(async move {
                let payload = match outbound {
                    Ok(outbound) => {
                        limiter.acquire(kind).await;
                        debug!(provider = %kind, "dispatching provider call");
                        match timeout(call_timeout, transport.fetch(&outbound)).await {
                            Ok(Ok(payload)) => Ok(payload),
                            Ok(Err(e)) => {
                                warn!(provider = %kind, error = %e, "provider call failed");
                                Err(e)
                            }
                            Err(_) => {
                                warn!(provider = %kind, "provider call timed out");
                                Err(SearchError::Timeout)
                            }
                        }
                    }
                    Err(e) => Err(e),
                };
                RawProviderResult {
                    provider: kind,
                    payload,
                }
            });
        }

        let mut settled = Vec::with_capacity(providers.len());
        loop {
            tokio::select! {
                // Cancellation takes priority over ready results so a
                // cancelled batch settles deterministically.
                biased;
                _ = cancel.cancelled() => {
                    let done: HashSet<ProviderKind> =
                        settled.iter().map(|r: &RawProviderResult| r.provider).collect();
                    for &kind in providers {
                        if !done.contains(&kind) {
                            settled.push(RawProviderResult {
                                provider: kind,
                                payload: Err(SearchError::Cancelled),
                            });
                        }
                    }
                    debug!("dispatch cancelled with {} settled calls", done.len());
                    break;
                }
                next = calls.next() => match next {
                    Some(result) => settled.push(result),
                    None => break,
                },
            }
        }
        settled
    }
}
