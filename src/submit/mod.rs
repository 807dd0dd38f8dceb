//! Submission seam — the external wallet/gateway interface the intent
//! builder hands payloads to, plus the fire-and-forget order tracker.
//!
//! The SDK never signs transactions itself. A [`Submitter`] wraps whatever
//! does (gateway daemon, wallet bridge, test double) behind one async call
//! that either yields a transaction id or a rejection from a closed code set.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::intent::wire::TransferPayload;
use crate::shared::{AccountName, TxId};

/// Rejection code reported by the signer, wire values as the gateway
/// emits them.
pub const REJECT_CODE_WALLET_LOCKED: &str = "wallet_locked";
pub const REJECT_CODE_USER_REJECTED: &str = "user_rejected";

/// Receipt returned by a successful submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub transaction_id: TxId,
    /// Raw gateway response, surfaced untouched to callers of market
    /// orders.
    #[serde(default)]
    pub raw: serde_json::Value,
}

impl SubmitReceipt {
    pub fn new(transaction_id: impl Into<TxId>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            raw: serde_json::Value::Null,
        }
    }
}

/// Submission failure, already classified against the closed code set.
#[derive(Error, Debug, Clone)]
pub enum SubmitError {
    #[error("signing authority is locked")]
    WalletLocked,

    #[error("transaction rejected by user")]
    UserRejected,

    #[error("submission failed ({}): {message}", .code.as_deref().unwrap_or("unclassified"))]
    Other {
        code: Option<String>,
        message: String,
    },
}

impl SubmitError {
    /// Classify a gateway error code string into the closed set.
    pub fn from_code(code: &str, message: impl Into<String>) -> Self {
        match code {
            REJECT_CODE_WALLET_LOCKED => SubmitError::WalletLocked,
            REJECT_CODE_USER_REJECTED => SubmitError::UserRejected,
            other => SubmitError::Other {
                code: Some(other.to_string()),
                message: message.into(),
            },
        }
    }
}

/// External submission interface.
///
/// `submit` suspends until the signer resolves; the SDK defines no timeout
/// or cancellation contract here — callers own both at this boundary.
#[async_trait]
pub trait Submitter: Send + Sync {
    async fn submit(
        &self,
        contract: &AccountName,
        payload: &TransferPayload,
    ) -> Result<SubmitReceipt, SubmitError>;
}

/// Asynchronous order status tracking, keyed by transaction id.
///
/// Registration is fire-and-forget; polling happens elsewhere.
pub trait OrderTracker: Send + Sync {
    fn track(&self, tx_id: &TxId);
}

/// Default [`OrderTracker`]: a queue of transaction ids awaiting status
/// polls. The app-side poller drains it on its own schedule; registration
/// never blocks a submission flow.
#[derive(Default)]
pub struct TrackingQueue {
    pending: std::sync::Mutex<Vec<TxId>>,
}

impl TrackingQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all pending transaction ids, oldest first.
    pub fn drain(&self) -> Vec<TxId> {
        std::mem::take(&mut *self.pending.lock().expect("tracking queue lock poisoned"))
    }

    pub fn len(&self) -> usize {
        self.pending.lock().expect("tracking queue lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OrderTracker for TrackingQueue {
    fn track(&self, tx_id: &TxId) {
        tracing::debug!(tx_id = %tx_id, "registered order for status polling");
        self.pending
            .lock()
            .expect("tracking queue lock poisoned")
            .push(tx_id.clone());
    }
}
