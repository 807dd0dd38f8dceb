//! Unified SDK error types.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::shared::TokenSymbol;
use crate::submit::SubmitError;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// HTTP-layer errors.
#[cfg(feature = "http")]
#[derive(Error, Debug)]
pub enum HttpError {
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Timeout")]
    Timeout,

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded { attempts: u32, last_error: String },
}

/// Refusal and failure reasons surfaced by the intent builder.
///
/// Every variant is recovered at the builder boundary and rendered as a
/// user-visible message; none propagate as unhandled faults.
/// `NotAuthenticated`, `InvalidInput`, and `InsufficientBalance` are
/// detected before any submission call is made.
#[derive(Error, Debug)]
pub enum OrderError {
    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Insufficient {symbol} balance: required {required}, available {available}")]
    InsufficientBalance {
        symbol: TokenSymbol,
        required: Decimal,
        available: Decimal,
    },

    #[error("Invalid order input: {0}")]
    InvalidInput(String),

    #[error("Submission rejected: signing authority is locked")]
    SubmissionRejected,

    #[error("Submission cancelled by user")]
    SubmissionCancelled,

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),
}

impl From<SubmitError> for OrderError {
    fn from(err: SubmitError) -> Self {
        match err {
            SubmitError::WalletLocked => OrderError::SubmissionRejected,
            SubmitError::UserRejected => OrderError::SubmissionCancelled,
            SubmitError::Other { message, .. } => OrderError::SubmissionFailed(message),
        }
    }
}
