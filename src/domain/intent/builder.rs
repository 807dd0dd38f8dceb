//! Intent builder — validate, balance-check, serialize, submit.
//!
//! One independent flow per call: no shared mutable state, no locking, no
//! request de-duplication. Each attempt walks
//! `Validating -> (Refused | Submitting) -> (Tracking | Completed | Failed)`;
//! the balance lookup and the submission call are the two suspension
//! points. No timeout or cancellation contract is defined here — callers
//! own both at the collaborator boundary.

use std::sync::Arc;

use tracing::debug;

use super::wire::TransferPayload;
use super::{OrderForm, OrderIntent};
use crate::account::AccountContext;
use crate::domain::token::TokenInfo;
use crate::error::OrderError;
use crate::shared::TxId;
use crate::submit::{OrderTracker, SubmitReceipt, Submitter};

/// Successful outcome of a submission attempt.
#[derive(Debug, Clone)]
pub enum Submission {
    /// Limit order accepted; asynchronous status tracking was requested.
    Tracking { transaction_id: TxId },
    /// Market order accepted; the raw receipt is surfaced directly and no
    /// tracking was requested.
    Completed(SubmitReceipt),
}

impl Submission {
    pub fn transaction_id(&self) -> &TxId {
        match self {
            Self::Tracking { transaction_id } => transaction_id,
            Self::Completed(receipt) => &receipt.transaction_id,
        }
    }
}

/// Builds validated order intents for one traded token and submits them
/// through the external collaborator seams.
pub struct IntentBuilder {
    token: TokenInfo,
    account: Arc<dyn AccountContext>,
    submitter: Arc<dyn Submitter>,
    tracker: Arc<dyn OrderTracker>,
}

impl IntentBuilder {
    pub fn new(
        token: TokenInfo,
        account: Arc<dyn AccountContext>,
        submitter: Arc<dyn Submitter>,
        tracker: Arc<dyn OrderTracker>,
    ) -> Self {
        Self {
            token,
            account,
            submitter,
            tracker,
        }
    }

    pub fn token(&self) -> &TokenInfo {
        &self.token
    }

    /// Validate `form`, check the funding balance, and submit the intent.
    ///
    /// Fails fast before any external submission call on authentication,
    /// input, and balance errors; submission-time failures are classified
    /// into [`OrderError`] and never retried automatically.
    pub async fn submit(&self, form: OrderForm) -> Result<Submission, OrderError> {
        if !self.account.is_authenticated() {
            return Err(OrderError::NotAuthenticated);
        }

        debug!(kind = %form.kind(), token = %self.token.symbol, phase = "validating", "building order intent");

        let intent = OrderIntent::from_form(
            &form,
            &self.token,
            self.account.account_name().clone(),
            self.account.authority().clone(),
        )?;

        let funding = intent.funding(&self.token);
        let available = self
            .account
            .available_balance(&funding.symbol, &funding.contract)
            .await
            .map_err(|e| OrderError::SubmissionFailed(e.to_string()))?;

        if funding.required > available {
            debug!(
                kind = %intent.kind,
                symbol = %funding.symbol,
                required = %funding.required,
                available = %available,
                phase = "refused",
                "insufficient balance"
            );
            return Err(OrderError::InsufficientBalance {
                symbol: funding.symbol,
                required: funding.required,
                available,
            });
        }

        let payload = TransferPayload::from_intent(&intent, &self.token)
            .map_err(|e| OrderError::SubmissionFailed(e.to_string()))?;

        debug!(kind = %intent.kind, contract = %funding.contract, phase = "submitting", "submitting order");
        let receipt = self.submitter.submit(&funding.contract, &payload).await?;

        if intent.kind.is_limit() {
            self.tracker.track(&receipt.transaction_id);
            debug!(tx_id = %receipt.transaction_id, phase = "tracking", "order submitted, tracking requested");
            Ok(Submission::Tracking {
                transaction_id: receipt.transaction_id,
            })
        } else {
            debug!(tx_id = %receipt.transaction_id, phase = "completed", "market order submitted");
            Ok(Submission::Completed(receipt))
        }
    }
}
