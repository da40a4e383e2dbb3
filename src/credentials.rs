//! Credential lookup for providers that require API keys.
//!
//! Keys live in an external store and are looked up by provider at dispatch
//! time. Values are never logged and never persisted by this crate.

use std::collections::HashMap;

use crate::ProviderKind;

/// Source of per-provider API credentials.
pub trait CredentialStore: Send + Sync {
    /// API key for the provider, if configured.
    fn api_key(&self, provider: ProviderKind) -> Option<String>;

    /// Custom-search engine id, for providers that require one (Google).
    fn search_engine_id(&self, provider: ProviderKind) -> Option<String>;
}

/// Reads credentials from environment variables.
///
/// Uses the `{PROVIDER}_API_KEY` / `{PROVIDER}_SEARCH_ENGINE_ID` convention,
/// e.g. `GOOGLE_API_KEY`, `GOOGLE_SEARCH_ENGINE_ID`, `BING_API_KEY`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvCredentials;

impl EnvCredentials {
    /// Creates a new env-backed store.
    pub fn new() -> Self {
        Self
    }

    fn var(provider: ProviderKind, suffix: &str) -> Option<String> {
        let name = format!("{}_{}", provider.id().to_ascii_uppercase(), suffix);
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

impl CredentialStore for EnvCredentials {
    fn api_key(&self, provider: ProviderKind) -> Option<String> {
        Self::var(provider, "API_KEY")
    }

    fn search_engine_id(&self, provider: ProviderKind) -> Option<String> {
        Self::var(provider, "SEARCH_ENGINE_ID")
    }
}

/// In-memory credential store for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticCredentials {
    api_keys: HashMap<ProviderKind, String>,
    engine_ids: HashMap<ProviderKind, String>,
}

impl StaticCredentials {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key for a provider.
    pub fn with_api_key(mut self, provider: ProviderKind, key: impl Into<String>) -> Self {
        self.api_keys.insert(provider, key.into());
        self
    }

    /// Sets the search-engine id for a provider.
    pub fn with_search_engine_id(
        mut self,
        provider: ProviderKind,
        id: impl Into<String>,
    ) -> Self {
        self.engine_ids.insert(provider, id.into());
        self
    }
}

impl CredentialStore for StaticCredentials {
    fn api_key(&self, provider: ProviderKind) -> Option<String> {
        self.api_keys.get(&provider).cloned()
    }

    fn search_engine_id(&self, provider: ProviderKind) -> Option<String> {
        self.engine_ids.get(&provider).cloned()
    }
}
