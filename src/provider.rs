//! Provider catalog: identities, endpoint templates and priority ranking.

use serde::{Deserialize, Serialize};

use crate::{Result, SearchError};

/// Known upstream search providers.
///
/// The set is closed: each variant carries its payload normalizer (see
/// [`crate::normalize`]) resolved at compile time, so there is no runtime
/// string-keyed parser lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Google,
    Bing,
    DuckDuckGo,
    Reddit,
    GitHub,
}

impl ProviderKind {
    /// All providers, in registration order.
    pub const ALL: [ProviderKind; 5] = [
        ProviderKind::Google,
        ProviderKind::Bing,
        ProviderKind::DuckDuckGo,
        ProviderKind::Reddit,
        ProviderKind::GitHub,
    ];

    /// Stable string identifier.
    pub fn id(self) -> &'static str {
        match self {
            ProviderKind::Google => "google",
            ProviderKind::Bing => "bing",
            ProviderKind::DuckDuckGo => "duckduckgo",
            ProviderKind::Reddit => "reddit",
            ProviderKind::GitHub => "github",
        }
    }

    /// Parses a provider id. Case-insensitive.
    pub fn parse(id: &str) -> Option<Self> {
        match id.to_ascii_lowercase().as_str() {
            "google" => Some(ProviderKind::Google),
            "bing" => Some(ProviderKind::Bing),
            "duckduckgo" | "ddg" => Some(ProviderKind::DuckDuckGo),
            "reddit" => Some(ProviderKind::Reddit),
            "github" => Some(ProviderKind::GitHub),
            _ => None,
        }
    }

    /// Fixed rank used only to break score ties deterministically.
    /// Lower ranks sort first. Inherited tuning constants.
    pub fn priority_rank(self) -> u32 {
        match self {
            ProviderKind::Google => 1,
            ProviderKind::Bing => 2,
            ProviderKind::DuckDuckGo => 3,
            ProviderKind::Reddit => 4,
            ProviderKind::GitHub => 5,
        }
    }
}

/// Parses a list of provider ids, silently dropping unknown ids.
///
/// Returns [`SearchError::NoProviders`] when `ids` is non-empty but names
/// no known provider; an empty input yields an empty list, which callers
/// treat as "all registered providers".
pub fn parse_provider_ids<S: AsRef<str>>(ids: &[S]) -> Result<Vec<ProviderKind>> {
    let kinds: Vec<ProviderKind> = ids
        .iter()
        .filter_map(|id| ProviderKind::parse(id.as_ref()))
        .collect();
    if kinds.is_empty() && !ids.is_empty() {
        return Err(SearchError::NoProviders);
    }
    Ok(kinds)
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Static description of one upstream provider: endpoint, outbound query
/// parameter templates and header templates.
///
/// Template strings use `{placeholder}` fragments substituted at dispatch
/// time; see [`crate::template`] for the placeholder set.
#[derive(Debug, Clone)]
pub struct ProviderSpec {
    /// Provider identity.
    pub kind: ProviderKind,
    /// Human label.
    pub display_name: &'static str,
    /// Endpoint URL (no query string).
    pub endpoint: &'static str,
    /// Ordered (name, template) pairs appended as the query string.
    pub params: &'static [(&'static str, &'static str)],
    /// (name, template) pairs sent as request headers.
    pub headers: &'static [(&'static str, &'static str)],
}

const SPECS: &[ProviderSpec] = &[
    ProviderSpec {
        kind: ProviderKind::Google,
        display_name: "Google",
        endpoint: "https://www.googleapis.com/customsearch/v1",
        params: &[
            ("key", "{api_key}"),
            ("cx", "{search_engine_id}"),
            ("q", "{query}"),
            ("num", "{limit}"),
            ("start", "{offset}"),
            ("safe", "{safe_search}"),
            ("hl", "{language}"),
            ("gl", "{region}"),
        ],
        headers: &[("Accept", "application/json")],
    },
    ProviderSpec {
        kind: ProviderKind::Bing,
        display_name: "Bing",
        endpoint: "https://api.bing.microsoft.com/v7.0/search",
        params: &[
            ("q", "{query}"),
            ("count", "{limit}"),
            ("offset", "{offset}"),
            ("safeSearch", "{safe_search}"),
            ("mkt", "{region}-{language}"),
        ],
        headers: &[
            ("Ocp-Apim-Subscription-Key", "{api_key}"),
            ("Accept", "application/json"),
        ],
    },
    ProviderSpec {
        kind: ProviderKind::DuckDuckGo,
        display_name: "DuckDuckGo",
        endpoint: "https://api.duckduckgo.com/",
        params: &[
            ("q", "{query}"),
            ("format", "json"),
            ("no_html", "1"),
            ("no_redirect", "1"),
            ("kp", "{safe_search}"),
            ("kl", "{language}"),
            ("region", "{region}"),
        ],
        headers: &[("Accept", "application/json")],
    },
    ProviderSpec {
        kind: ProviderKind::Reddit,
        display_name: "Reddit",
        endpoint: "https://www.reddit.com/search.json",
        params: &[
            ("q", "{query}"),
            ("limit", "{limit}"),
            ("after", "{offset}"),
            ("restrict_sr", "0"),
            ("sort", "relevance"),
        ],
        headers: &[("User-Agent", "pilot-search/0.1")],
    },
    ProviderSpec {
        kind: ProviderKind::GitHub,
        display_name: "GitHub",
        endpoint: "https://api.github.com/search/repositories",
        params: &[
            ("q", "{query}"),
            ("per_page", "{limit}"),
            ("page", "{page}"),
            ("sort", "stars"),
            ("order", "desc"),
        ],
        headers: &[
            ("Accept", "application/vnd.github.v3+json"),
            ("User-Agent", "pilot-search/0.1"),
        ],
    },
];

/// Read-only catalog of provider specs, in registration order.
///
/// Built once at startup; safe for unsynchronized concurrent reads.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    _priv: (),
}

impl Registry {
    /// Creates the registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Looks up the spec for a provider.
    pub fn resolve(&self, kind: ProviderKind) -> &'static ProviderSpec {
        // SPECS covers every ProviderKind variant, in ALL order.
        &SPECS[kind as usize]
    }

    /// All registered specs in registration order.
    pub fn specs(&self) -> &'static [ProviderSpec] {
        SPECS
    }

    /// All registered provider kinds in registration order.
    pub fn kinds(&self) -> Vec<ProviderKind> {
        SPECS.iter().map(|s| s.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ids_roundtrip() {
        for kind in ProviderKind::ALL {
            assert_eq!(ProviderKind::parse(kind.id()), Some(kind));
        }
    }

    #[test]
    fn test_kind_parse_case_insensitive() {
        assert_eq!(ProviderKind::parse("GOOGLE"), Some(ProviderKind::Google));
        assert_eq!(ProviderKind::parse("ddg"), Some(ProviderKind::DuckDuckGo));
    }

    #[test]
    fn test_kind_parse_unknown() {
        assert_eq!(ProviderKind::parse("altavista"), None);
        assert_eq!(ProviderKind::parse(""), None);
    }

    #[test]
    fn test_priority_ranks_are_total_order() {
        let mut ranks: Vec<u32> = ProviderKind::ALL
            .iter()
            .map(|k| k.priority_rank())
            .collect();
        ranks.sort_unstable();
        ranks.dedup();
        assert_eq!(ranks.len(), ProviderKind::ALL.len());
        assert_eq!(ProviderKind::Google.priority_rank(), 1);
        assert_eq!(ProviderKind::GitHub.priority_rank(), 5);
    }

    #[test]
    fn test_registry_resolve_matches_kind() {
        let registry = Registry::new();
        for kind in ProviderKind::ALL {
            assert_eq!(registry.resolve(kind).kind, kind);
        }
    }

    #[test]
    fn test_registry_registration_order() {
        let registry = Registry::new();
        let kinds = registry.kinds();
        assert_eq!(kinds, ProviderKind::ALL.to_vec());
    }

    #[test]
    fn test_registry_spec_ids_unique() {
        let registry = Registry::new();
        let mut ids: Vec<&str> = registry.specs().iter().map(|s| s.kind.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), registry.specs().len());
    }

    #[test]
    fn test_google_spec_templates() {
        let registry = Registry::new();
        let spec = registry.resolve(ProviderKind::Google);
        assert_eq!(spec.endpoint, "https://www.googleapis.com/customsearch/v1");
        assert!(spec.params.iter().any(|(k, v)| *k == "q" && *v == "{query}"));
        assert!(spec.params.iter().any(|(k, _)| *k == "cx"));
    }

    #[test]
    fn test_bing_spec_auth_header() {
        let registry = Registry::new();
        let spec = registry.resolve(ProviderKind::Bing);
        assert!(spec
            .headers
            .iter()
            .any(|(k, v)| *k == "Ocp-Apim-Subscription-Key" && *v == "{api_key}"));
    }

    #[test]
    fn test_kind_serde_lowercase() {
        let json = serde_json::to_string(&ProviderKind::DuckDuckGo).unwrap();
        assert_eq!(json, "\"duckduckgo\"");
        let back: ProviderKind = serde_json::from_str("\"github\"").unwrap();
        assert_eq!(back, ProviderKind::GitHub);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ProviderKind::Reddit.to_string(), "reddit");
    }

    #[test]
    fn test_parse_provider_ids_drops_unknown() {
        let kinds = parse_provider_ids(&["google", "doesnotexist", "bing"]).unwrap();
        assert_eq!(kinds, vec![ProviderKind::Google, ProviderKind::Bing]);
    }

    #[test]
    fn test_parse_provider_ids_all_unknown_is_error() {
        let err = parse_provider_ids(&["doesnotexist"]).unwrap_err();
        assert!(matches!(err, SearchError::NoProviders));
    }

    #[test]
    fn test_parse_provider_ids_empty_means_all() {
        let kinds = parse_provider_ids::<&str>(&[]).unwrap();
        assert!(kinds.is_empty());
    }
}
