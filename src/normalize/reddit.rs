//! Normalizer for the Reddit search listing API.

use serde::Deserialize;
use serde_json::{json, Value};

use super::{rank_score, Normalized};
use crate::{ProviderKind, ResultType, SearchResultItem};

#[derive(Deserialize, Default)]
#[serde(default)]
struct Payload {
    data: Listing,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Listing {
    children: Vec<Child>,
    dist: u64,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Child {
    kind: String,
    data: Post,
}

#[derive(Deserialize, Default)]
#[serde(default)]
struct Post {
    title: String,
    permalink: String,
    url: String,
    selftext: String,
    subreddit: String,
    score: i64,
    num_comments: u64,
    created_utc: Option<f64>,
    author: String,
    is_self: bool,
    domain: String,
}

/// Maximum selftext preview length in characters.
const SNIPPET_LEN: usize = 200;

pub(super) fn normalize(payload: &Value) -> Normalized {
    let payload: Payload = serde_json::from_value(payload.clone()).unwrap_or_default();
    let total_results = payload.data.dist;

    let mut items = Vec::new();
    for (i, child) in payload.data.children.into_iter().enumerate() {
        // Only link/self posts; ads and listing furniture are skipped but
        // still consume their rank position.
        if child.kind != "t3" || child.data.url.is_empty() {
            continue;
        }
        let post = child.data;

        let snippet = if post.selftext.is_empty() {
            String::new()
        } else {
            let preview: String = post.selftext.chars().take(SNIPPET_LEN).collect();
            format!("{}...", preview)
        };

        items.push(
            SearchResultItem::new(
                post.title,
                format!("https://reddit.com{}", post.permalink),
                snippet,
                ProviderKind::Reddit,
                rank_score(0.8, 0.01, i),
            )
            .with_type(ResultType::Forum)
            .with_meta("subreddit", json!(post.subreddit))
            .with_meta("score", json!(post.score))
            .with_meta("num_comments", json!(post.num_comments))
            .with_meta("created_utc", json!(post.created_utc))
            .with_meta("author", json!(post.author))
            .with_meta("is_self", json!(post.is_self))
            .with_meta("domain", json!(post.domain)),
        );
    }

    Normalized {
        items,
        total_results,
    }
}
