//! High-level client — `DaqClient` with accessors for the gateway, account
//! contexts, and per-token intent builders.

use std::sync::Arc;

use crate::domain::intent::IntentBuilder;
use crate::domain::token::TokenInfo;
use crate::error::SdkError;
use crate::http::{GatewayAccount, GatewayHttp};
use crate::shared::{AccountName, Authority};
use crate::submit::TrackingQueue;
use crate::watch::PriceFeed;

/// The primary entry point for the DaqDex SDK.
///
/// Owns the gateway client, a shared tracking queue for limit-order status
/// polling, and one price feed per client. Cheap to clone; clones share
/// all state.
pub struct DaqClient {
    pub(crate) http: GatewayHttp,
    tracking: Arc<TrackingQueue>,
    prices: PriceFeed,
}

impl DaqClient {
    pub fn builder() -> DaqClientBuilder {
        DaqClientBuilder::default()
    }

    pub fn gateway(&self) -> &GatewayHttp {
        &self.http
    }

    /// Pending limit-order transaction ids awaiting status polls.
    pub fn tracking(&self) -> &Arc<TrackingQueue> {
        &self.tracking
    }

    /// The client-wide last-trade price feed.
    pub fn prices(&self) -> &PriceFeed {
        &self.prices
    }

    /// An account context for `name`, signing under `authority`, backed by
    /// the gateway's balance endpoint.
    pub fn account(&self, name: AccountName, authority: Authority) -> Arc<GatewayAccount> {
        Arc::new(GatewayAccount::new(self.http.clone(), name, authority))
    }

    /// An intent builder for trading `token`, submitting through the
    /// gateway and registering limit orders on the shared tracking queue.
    pub fn intents(
        &self,
        token: TokenInfo,
        account: Arc<dyn crate::account::AccountContext>,
    ) -> IntentBuilder {
        IntentBuilder::new(
            token,
            account,
            Arc::new(self.http.clone()),
            self.tracking.clone(),
        )
    }
}

impl Clone for DaqClient {
    fn clone(&self) -> Self {
        Self {
            http: self.http.clone(),
            tracking: self.tracking.clone(),
            prices: self.prices.clone(),
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct DaqClientBuilder {
    base_url: String,
}

impl Default for DaqClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_GATEWAY_URL.to_string(),
        }
    }
}

impl DaqClientBuilder {
    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn build(self) -> Result<DaqClient, SdkError> {
        Ok(DaqClient {
            http: GatewayHttp::new(&self.base_url),
            tracking: Arc::new(TrackingQueue::new()),
            prices: PriceFeed::new(),
        })
    }
}
