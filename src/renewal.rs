//! Background token renewal.
//!
//! The upstream contract expires a refresh token that goes unused for 30
//! days, independent of access-token expiry. [`RenewalLoop`] keeps the pair
//! alive by unconditionally invoking the refresh flow on a fixed interval —
//! every 110 minutes by default, safely under any access-token lifetime the
//! API grants and far under the 30-day staleness window.
//!
//! The loop is fire-and-forget: outcomes are logged, never propagated. A
//! failed tick leaves the stored tokens unchanged until the next tick, or
//! until a foreground signed request triggers a successful refresh of its
//! own.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::auth::token::TokenClient;

/// Default renewal period: 110 minutes.
pub const RENEWAL_INTERVAL: Duration = Duration::from_secs(110 * 60);

/// Recurring background task that refreshes the token pair.
///
/// Runs concurrently with foreground signed requests; both paths write
/// through the same serialized credential store, so no ordering between a
/// scheduled refresh and a retry-triggered refresh is ever required.
///
/// # Example
///
/// ```rust,ignore
/// use shopee_partner_api::renewal::RenewalLoop;
///
/// let handle = RenewalLoop::new(Arc::clone(&token_client)).spawn();
/// // ... the handle can be aborted on shutdown; the loop never exits on its own.
/// ```
#[derive(Debug)]
pub struct RenewalLoop {
    token: Arc<TokenClient>,
    period: Duration,
}

impl RenewalLoop {
    /// Creates a loop with the default 110-minute period.
    #[must_use]
    pub fn new(token: Arc<TokenClient>) -> Self {
        Self {
            token,
            period: RENEWAL_INTERVAL,
        }
    }

    /// Creates a loop with a custom period (used by tests and callers whose
    /// partner grants unusual token lifetimes).
    #[must_use]
    pub const fn with_period(token: Arc<TokenClient>, period: Duration) -> Self {
        Self { token, period }
    }

    /// Spawns the loop onto the current Tokio runtime.
    #[must_use]
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(self.run())
    }

    /// Runs the loop forever.
    ///
    /// The first refresh fires one full period after start — the stored
    /// pair is assumed fresh enough at startup — and once per period after
    /// that, regardless of foreground activity.
    pub async fn run(self) {
        let mut timer = interval_at(Instant::now() + self.period, self.period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            timer.tick().await;
            self.tick().await;
        }
    }

    /// Performs one scheduled refresh, logging the outcome.
    async fn tick(&self) {
        tracing::info!("scheduled token refresh starting");
        match self.token.refresh_access_token(None).await {
            Ok(result) => {
                tracing::info!(
                    expire_in = ?result.expire_in,
                    "scheduled token refresh succeeded; refresh token staleness window reset"
                );
            }
            Err(e) if e.requires_reauthorization() => {
                tracing::error!(
                    error = %e,
                    "scheduled token refresh failed: refresh token is stale, re-authorization required"
                );
            }
            Err(e) => {
                tracing::error!(error = %e, "scheduled token refresh failed; will retry next tick");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PartnerConfig, PartnerKey};
    use crate::credentials::{CredentialStore, InMemoryPersistence};

    #[test]
    fn test_default_period_is_110_minutes() {
        assert_eq!(RENEWAL_INTERVAL, Duration::from_secs(6600));
    }

    #[tokio::test]
    async fn test_tick_without_refresh_token_only_logs() {
        let config = PartnerConfig::builder()
            .partner_id(1)
            .shop_id(2)
            .partner_key(PartnerKey::new("k").unwrap())
            .build()
            .unwrap();
        let store = Arc::new(CredentialStore::new(
            config,
            Box::<InMemoryPersistence>::default(),
        ));
        let renewal = RenewalLoop::new(Arc::new(TokenClient::new(store)));

        // Must not panic or propagate: fire-and-forget by contract.
        renewal.tick().await;
    }
}
