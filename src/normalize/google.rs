//! Normalizer for the Google Custom Search JSON API.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{rank_score, Normalized};
use crate::{ProviderKind, SearchResultItem};

#[derive(Deserialize, Default)]
#[serde(default)]
struct Payload {
    items: Vec<Item>,
    #[serde(rename = "searchInformation")]
    search_information: SearchInformation,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Item {
    title: String,
    link: String,
    snippet: String,
    #[serde(rename = "displayLink")]
    display_link: String,
    mime: String,
    #[serde(rename = "fileFormat")]
    file_format: String,
    pagemap: Pagemap,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Pagemap {
    cse_image: Vec<CseImage>,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct CseImage {
    src: String,
}

/// The API reports totalResults as a decimal string.
#[derive(Deserialize, Default)]
#[serde(default)]
struct SearchInformation {
    #[serde(rename = "totalResults")]
    total_results: String,
}

pub(super) fn normalize(payload: &Value) -> Normalized {
    let payload: Payload = serde_json::from_value(payload.clone()).unwrap_or_default();

    let items = payload
        .items
        .into_iter()
        .enumerate()
        .map(|(i, item)| {
            let mut result = SearchResultItem::new(
                item.title,
                item.link,
                item.snippet,
                ProviderKind::Google,
                rank_score(1.0, 0.01, i),
            )
            .with_meta("displayLink", json!(item.display_link))
            .with_meta("mime", json!(item.mime))
            .with_meta("fileFormat", json!(item.file_format));

            if let Some(image) = item.pagemap.cse_image.first() {
                if !image.src.is_empty() {
                    result = result.with_image_url(image.src.clone());
                }
            }
            result
        })
        .collect();

    Normalized {
        items,
        total_results: payload
            .search_information
            .total_results
            .parse()
            .unwrap_or(0),
    }
}
