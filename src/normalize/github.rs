//! Normalizer for the GitHub repository search API.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{rank_score, Normalized};
use crate::{ProviderKind, ResultType, SearchResultItem};

#[derive(Deserialize, Default)]
#[serde(default)]
struct Payload {
    items: Vec<Repo>,
    total_count: u64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Repo {
    full_name: String,
    html_url: String,
    description: Option<String>,
    language: Option<String>,
    stargazers_count: u64,
    forks_count: u64,
    open_issues_count: u64,
    created_at: Option<String>,
    updated_at: Option<String>,
    owner: Owner,
    license: Option<License>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Owner {
    login: String,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct License {
    name: Option<String>,
}

pub(super) fn normalize(payload: &Value) -> Normalized {
    let payload: Payload = serde_json::from_value(payload.clone()).unwrap_or_default();

    let items = payload
        .items
        .into_iter()
        .enumerate()
        .map(|(i, repo)| {
            SearchResultItem::new(
                repo.full_name,
                repo.html_url,
                repo.description.unwrap_or_default(),
                ProviderKind::GitHub,
                rank_score(0.8, 0.01, i),
            )
            .with_type(ResultType::Code)
            .with_meta("language", json!(repo.language))
            .with_meta("stars", json!(repo.stargazers_count))
            .with_meta("forks", json!(repo.forks_count))
            .with_meta("open_issues", json!(repo.open_issues_count))
            .with_meta("created_at", json!(repo.created_at))
            .with_meta("updated_at", json!(repo.updated_at))
            .with_meta("owner", json!(repo.owner.login))
            .with_meta("license", json!(repo.license.and_then(|l| l.name)))
        })
        .collect();

    Normalized {
        items,
        total_results: payload.total_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_full_payload() {
        let payload = json!({
            "total_count": 4213,
            "items": [
                {
                    "full_name": "rust-lang/rust",
                    "html_url": "https://github.com/rust-lang/rust",
                    "description": "Empowering everyone to build reliable software.",
                    "language": "Rust",
                    "stargazers_count": 90000,
                    "forks_count": 12000,
                    "open_issues_count": 9000,
                    "created_at": "2010-06-16T20:39:03Z",
                    "updated_at": "2024-05-01T00:00:00Z",
                    "owner": {"login": "rust-lang"},
                    "license": {"name": "MIT License"}
                },
                {
                    "full_name": "tokio-rs/tokio",
                    "html_url": "https://github.com/tokio-rs/tokio",
                    "description": null,
                    "owner": {"login": "tokio-rs"},
                    "license": null
                }
            ]
        });

        let normalized = normalize(&payload);
        assert_eq!(normalized.items.len(), 2);
        assert_eq!(normalized.total_results, 4213);

        let first = &normalized.items[0];
        assert_eq!(first.title, "rust-lang/rust");
        assert_eq!(first.url, "https://github.com/rust-lang/rust");
        assert_eq!(first.provider, ProviderKind::GitHub);
        assert_eq!(first.result_type, ResultType::Code);
        assert_eq!(first.score, 0.8);
        assert_eq!(first.metadata["stars"], json!(90000));
        assert_eq!(first.metadata["owner"], json!("rust-lang"));
        assert_eq!(first.metadata["license"], json!("MIT License"));

        let second = &normalized.items[1];
        assert_eq!(second.snippet, "");
        assert!((second.score - 0.79).abs() < 1e-9);
        assert_eq!(second.metadata["license"], json!(null));
    }

    #[test]
    fn test_normalize_empty_payload() {
        let normalized = normalize(&json!({}));
        assert!(normalized.items.is_empty());
        assert_eq!(normalized.total_results, 0);
    }

    #[test]
    fn test_normalize_license_without_name() {
        let payload = json!({
            "items": [{
                "full_name": "x/y",
                "html_url": "https://github.com/x/y",
                "license": {}
            }]
        });
        let normalized = normalize(&payload);
        assert_eq!(normalized.items[0].metadata["license"], json!(null));
    }
}
