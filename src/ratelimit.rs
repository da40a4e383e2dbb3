//! Per-provider rate limiting consulted before each dispatch.
//!
//! The dispatcher calls [`RateLimit::acquire`] before every outbound request.
//! The default implementation is a no-op; [`FixedDelay`] enforces a minimum
//! interval between calls to the same provider.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::{sleep, Duration, Instant};

use crate::ProviderKind;

/// Pre-dispatch throttling policy.
#[async_trait]
pub trait RateLimit: Send + Sync {
    /// Waits until a call to `provider` is allowed to proceed.
    async fn acquire(&self, provider: ProviderKind);
}

/// No throttling.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLimit;

#[async_trait]
impl RateLimit for NoLimit {
    async fn acquire(&self, _provider: ProviderKind) {}
}

/// Enforces a minimum interval between consecutive calls to the same
/// provider. Each provider has its own state cell behind its own lock, so
/// throttling one provider never delays another.
pub struct FixedDelay {
    interval: Duration,
    last_call: HashMap<ProviderKind, Mutex<Option<Instant>>>,
}

impl FixedDelay {
    /// Creates a limiter with the given minimum interval per provider.
    pub fn new(interval: Duration) -> Self {
        let last_call = ProviderKind::ALL
            .iter()
            .map(|&kind| (kind, Mutex::new(None)))
            .collect();
        Self {
            interval,
            last_call,
        }
    }
}

#[async_trait]
impl RateLimit for FixedDelay {
    async fn acquire(&self, provider: ProviderKind) {
        // The lock is held across the sleep so concurrent callers to the
        // same provider queue up and space out by the full interval.
        let cell = &self.last_call[&provider];
        let mut last = cell.lock().await;
        if let Some(prev) = *last {
            let elapsed = prev.elapsed();
            if elapsed < self.interval {
                sleep(self.interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }
}
