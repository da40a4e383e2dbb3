//! Normalizer for the DuckDuckGo Instant Answer API.
//!
//! The API returns direct results plus related topics; related topics are
//! normalized as suggestions with a lower base score so they rank after the
//! provider's primary results.

use serde::Deserialize;
use serde_json::Value;

use super::{rank_score, Normalized};
use crate::{ProviderKind, ResultType, SearchResultItem};

#[derive(Deserialize, Default)]
#[serde(default)]
struct Payload {
    #[serde(rename = "Results")]
    results: Vec<DirectResult>,
    #[serde(rename = "RelatedTopics")]
    related_topics: Vec<Topic>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct DirectResult {
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "FirstURL")]
    first_url: String,
    #[serde(rename = "Result")]
    result: String,
    #[serde(rename = "Icon")]
    icon: Value,
}

/// Related topics may be bare topics or nested groups; groups carry no
/// FirstURL and are skipped.
#[derive(Deserialize, Default)]
#[serde(default)]
struct Topic {
    #[serde(rename = "Text")]
    text: String,
    #[serde(rename = "FirstURL")]
    first_url: Option<String>,
    #[serde(rename = "Icon")]
    icon: Value,
}

pub(super) fn normalize(payload: &Value) -> Normalized {
    let payload: Payload = serde_json::from_value(payload.clone()).unwrap_or_default();

    let mut items: Vec<SearchResultItem> = payload
        .results
        .into_iter()
        .enumerate()
        .map(|(i, result)| {
            SearchResultItem::new(
                result.text,
                result.first_url,
                result.result,
                ProviderKind::DuckDuckGo,
                rank_score(0.9, 0.01, i),
            )
            .with_meta("icon", result.icon)
        })
        .collect();

    for (i, topic) in payload.related_topics.into_iter().enumerate() {
        let Some(url) = topic.first_url else { continue };
        items.push(
            SearchResultItem::new(
                topic.text.clone(),
                url,
                topic.text,
                ProviderKind::DuckDuckGo,
                rank_score(0.8, 0.005, i),
            )
            .with_type(ResultType::Suggestion)
            .with_meta("icon", topic.icon),
        );
    }

    // The API reports no total match count.
    let total_results = items.len() as u64;
    Normalized {
        items,
        total_results,
    }
}
