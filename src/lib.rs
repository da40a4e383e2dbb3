//! # pilot-search
//!
//! A multi-provider search aggregation library.
//!
//! One request fans out concurrently to several upstream search APIs
//! (Google, Bing, DuckDuckGo, Reddit, GitHub), tolerating partial provider
//! failure. Heterogeneous payloads are normalized into a common result
//! schema, deduplicated by URL, ranked by score with a deterministic
//! provider tie-break, and paginated.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pilot_search::{HttpTransport, ProviderKind, SearchRequest, SearchService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = SearchService::new(Arc::new(HttpTransport::new()));
//!
//!     let request = SearchRequest::new("rust async runtime")
//!         .with_providers(vec![ProviderKind::DuckDuckGo, ProviderKind::GitHub])
//!         .with_limit(10);
//!
//!     let response = service.aggregate(request).await?;
//!     for item in &response.results {
//!         println!("[{}] {}: {}", item.provider, item.title, item.url);
//!     }
//!     for (provider, error) in &response.provider_errors {
//!         eprintln!("{} failed: {}", provider, error);
//!     }
//!     Ok(())
//! }
//! ```

mod credentials;
mod dispatcher;
mod error;
mod merge;
mod provider;
mod query;
mod ratelimit;
mod result;
mod service;
mod template;
mod transport;

pub mod normalize;

pub use credentials::{CredentialStore, EnvCredentials, StaticCredentials};
pub use dispatcher::{Dispatcher, RawProviderResult, CALL_TIMEOUT};
pub use error::{Result, SearchError};
pub use provider::{parse_provider_ids, ProviderKind, ProviderSpec, Registry};
pub use query::{SearchRequest, MAX_LIMIT, MAX_QUERY_LEN};
pub use ratelimit::{FixedDelay, NoLimit, RateLimit};
pub use result::{AggregatedResponse, ResultType, SearchResultItem};
pub use service::SearchService;
pub use template::{render, MissingKeyPolicy, TemplateContext, TemplateError};
pub use transport::{HttpTransport, ProviderRequest, Transport};
