//! Pre-request protection decisions.
//!
//! A [`RequestGuard`] sees every `/api` request before its handler and either
//! lets it through or denies it with a typed reason. The bundled guard is an
//! in-process keyed rate limiter backed by `governor`.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eckokit_config::ProtectionConfig;
use governor::clock::DefaultClock;
use governor::state::keyed::DefaultKeyedStateStore;
use governor::{Quota, RateLimiter};

/// Idle keys are dropped once this many are tracked.
const SWEEP_THRESHOLD: usize = 4096;

type KeyedLimiter = RateLimiter<String, DefaultKeyedStateStore<String>, DefaultClock>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    RateLimited,
    Bot,
    Forbidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Deny(DenialReason),
}

#[async_trait]
pub trait RequestGuard: Send + Sync {
    /// `key` identifies the caller: a user id or a client IP.
    async fn check(&self, key: &str) -> Decision;
}

/// Allows a burst of `max_requests` per key, refilled evenly over the window.
#[derive(Clone)]
pub struct KeyedRateLimiter {
    limiter: Arc<KeyedLimiter>,
}

impl KeyedRateLimiter {
    pub fn new(window: Duration, max_requests: u32) -> Self {
        let burst = NonZeroU32::new(max_requests).unwrap_or(NonZeroU32::MIN);
        let quota = Quota::with_period(window / burst.get())
            .map(|quota| quota.allow_burst(burst))
            .unwrap_or_else(|| Quota::per_second(burst));

        Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
        }
    }

    pub fn from_config(config: &ProtectionConfig) -> Self {
        Self::new(Duration::from_secs(config.window_seconds), config.max_requests)
    }
}

#[async_trait]
impl RequestGuard for KeyedRateLimiter {
    async fn check(&self, key: &str) -> Decision {
        if self.limiter.len() >= SWEEP_THRESHOLD {
            self.limiter.retain_recent();
        }

        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => Decision::Allow,
            Err(_) => Decision::Deny(DenialReason::RateLimited),
        }
    }
}
