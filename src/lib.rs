//! # DaqDex SDK
//!
//! A Rust SDK for the DaqDex token exchange. All pairs settle against a
//! fixed quote asset (EOS); orders are expressed as transfer payloads
//! carrying a JSON memo and handed to an external signing gateway.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core** — Shared newtypes, precision math, domain models
//! 2. **Seams** — `AccountContext`, `Submitter`, `OrderTracker` traits for
//!    the external account store, wallet gateway, and status poller
//! 3. **HTTP gateway** — `GatewayHttp` with per-endpoint retry policies
//! 4. **Price watch** — scoped `PriceFeed` subscriptions
//! 5. **High-Level Client** — `DaqClient` with accessor methods
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use daqdex_sdk::prelude::*;
//!
//! let client = DaqClient::builder()
//!     .base_url("https://gateway.daqdex.io")
//!     .build()?;
//!
//! let account = client.account("alice.dex".into(), Authority::default());
//! let daq = TokenInfo::new("Daq Token", "DAQ", "daqtoken.cnt", 2);
//!
//! let submission = client
//!     .intents(daq, account)
//!     .submit(OrderForm::BuyLimit {
//!         price: "0.1".parse()?,
//!         quantity: "30".parse()?,
//!     })
//!     .await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes and precision math used across all domains.
pub mod shared;

/// Domain modules (vertical slices): intents, tokens.
pub mod domain;

/// Unified SDK error types.
pub mod error;

/// Network URL constants.
pub mod network;

// ── Layer 2: Collaborator seams ──────────────────────────────────────────────

/// Account context: authentication, identity, balance lookups.
pub mod account;

/// Submission interface and order tracking.
pub mod submit;

// ── Layer 3: HTTP gateway ────────────────────────────────────────────────────

/// HTTP gateway client with retry policies.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Price watch ─────────────────────────────────────────────────────

/// Price update fan-out with scoped subscription handles.
pub mod watch;

// ── Layer 5: High-Level Client ───────────────────────────────────────────────

/// `DaqClient` — the primary entry point.
#[cfg(feature = "http")]
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes
    pub use crate::shared::{AccountName, Authority, TokenSymbol, TxId};

    // Domain types — tokens
    pub use crate::domain::token::{settlement_asset, TokenInfo, MARKET_CODE};

    // Domain types — intents
    pub use crate::domain::intent::wire::{OrderMemo, TransferPayload};
    pub use crate::domain::intent::{
        Funding, IntentBuilder, OrderForm, OrderIntent, OrderKind, Submission,
    };

    // Errors
    pub use crate::error::{OrderError, SdkError};

    // Collaborator seams
    pub use crate::account::AccountContext;
    pub use crate::submit::{
        OrderTracker, SubmitError, SubmitReceipt, Submitter, TrackingQueue,
    };

    // Price watch
    pub use crate::watch::{PriceFeed, PriceSubscription, PriceUpdate};

    // Network
    pub use crate::network::DEFAULT_GATEWAY_URL;

    // HTTP gateway + high-level client
    #[cfg(feature = "http")]
    pub use crate::client::{DaqClient, DaqClientBuilder};
    #[cfg(feature = "http")]
    pub use crate::http::{GatewayAccount, GatewayHttp, RetryConfig, RetryPolicy};
}
