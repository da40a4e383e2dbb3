//! Normalizer for the Bing Web Search API.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{rank_score, Normalized};
use crate::{ProviderKind, SearchResultItem};

#[derive(Deserialize, Default)]
#[serde(default)]
struct Payload {
    #[serde(rename = "webPages")]
    web_pages: WebPages,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct WebPages {
    value: Vec<Item>,
    #[serde(rename = "totalEstimatedMatches")]
    total_estimated_matches: u64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Item {
    name: String,
    url: String,
    snippet: String,
    #[serde(rename = "displayUrl")]
    display_url: String,
    #[serde(rename = "datePublished")]
    date_published: Option<String>,
    #[serde(rename = "isNavigational")]
    is_navigational: bool,
    #[serde(rename = "thumbnailUrl")]
    thumbnail_url: Option<String>,
}

pub(super) fn normalize(payload: &Value) -> Normalized {
    let payload: Payload = serde_json::from_value(payload.clone()).unwrap_or_default();

    let items = payload
        .web_pages
        .value
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let mut result = SearchResultItem::new(
                item.name,
                item.url,
                item.snippet,
                ProviderKind::Bing,
                rank_score(1.0, 0.01, i),
            )
            .with_meta("displayUrl", json!(item.display_url))
            .with_meta("datePublished", json!(item.date_published))
            .with_meta("isNavigational", json!(item.is_navigational));

            if let Some(thumbnail) = item.thumbnail_url {
                result = result.with_image_url(thumbnail);
            }
            result
        })
        .collect();

    Normalized {
        items,
        total_results: payload.web_pages.total_estimated_matches,
    }
}
