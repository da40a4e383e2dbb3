//! Payload normalizers: one per provider response shape.
//!
//! Each normalizer maps a raw JSON payload into the common
//! [`SearchResultItem`](crate::SearchResultItem) schema and assigns a
//! synthetic descending score from the provider's native result order.
//! Normalizers are total: malformed or missing fields become empty values,
//! never errors.

mod bing;
mod duckduckgo;
mod github;
mod google;
mod reddit;

use serde_json::Value;

use crate::{ProviderKind, Result, SearchError, SearchResultItem};

/// Output of one provider's normalization.
#[derive(Debug, Clone, Default)]
pub struct Normalized {
    /// Items in the provider's native rank order.
    pub items: Vec<SearchResultItem>,
    /// Provider-reported total match count (the item count when the
    /// provider reports none).
    pub total_results: u64,
}

/// Normalizes a raw payload for the given provider.
///
/// Dispatch is a closed match over [`ProviderKind`]; a kind added to the
/// enum before its parser exists routes to [`unsupported`].
pub fn normalize(kind: ProviderKind, payload: &Value) -> Result<Normalized> {
    match kind {
        ProviderKind::Google => Ok(google::normalize(payload)),
        ProviderKind::Bing => Ok(bing::normalize(payload)),
        ProviderKind::DuckDuckGo => Ok(duckduckgo::normalize(payload)),
        ProviderKind::Reddit => Ok(reddit::normalize(payload)),
        ProviderKind::GitHub => Ok(github::normalize(payload)),
    }
}

/// Fallback for providers without a payload parser: zero items and an
/// explicit unsupported-provider condition, distinct from network or API
/// failure so callers can tell "misbehaved" from "unimplemented".
pub fn unsupported(kind: ProviderKind) -> Result<Normalized> {
    Err(SearchError::UnsupportedProvider(kind.id().to_string()))
}

/// Clamps a synthetic rank score into the valid range.
fn rank_score(base: f64, decay: f64, position: usize) -> f64 {
    (base - decay * position as f64).max(0.0)
}
