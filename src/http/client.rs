//! Low-level gateway client — `GatewayHttp`.
//!
//! One method per endpoint, returning wire-level data; conversion to
//! domain values happens at the caller's boundary. Balance reads go
//! through the idempotent retry path; transfer submission is sent exactly
//! once.

use async_lock::RwLock;
use async_trait::async_trait;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::account::AccountContext;
use crate::domain::intent::wire::TransferPayload;
use crate::error::{HttpError, SdkError};
use crate::http::retry::{RetryConfig, RetryPolicy};
use crate::shared::{AccountName, Authority, TokenSymbol};
use crate::submit::{SubmitError, SubmitReceipt, Submitter};

#[derive(Debug, Serialize)]
struct BalanceRequest<'a> {
    code: &'a AccountName,
    account: &'a AccountName,
    symbol: &'a TokenSymbol,
}

#[derive(Debug, Serialize)]
struct TransferRequest<'a> {
    contract: &'a AccountName,
    #[serde(flatten)]
    payload: &'a TransferPayload,
}

#[derive(Debug, Deserialize)]
struct TransferResponse {
    transaction_id: String,
    #[serde(default)]
    processed: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: String,
}

/// Low-level HTTP client for the DaqDex gateway REST API.
pub struct GatewayHttp {
    base_url: String,
    client: Client,
    /// Session token injected as a bearer header. Never exposed publicly.
    auth_token: Arc<RwLock<Option<String>>>,
}

impl GatewayHttp {
    pub fn new(base_url: &str) -> Self {
        let builder = Client::builder()
            .timeout(Duration::from_secs(30))
            .pool_max_idle_per_host(10);

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build().expect("Failed to build HTTP client"),
            auth_token: Arc::new(RwLock::new(None)),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Set the session token used for authenticated endpoints.
    pub async fn set_auth_token(&self, token: Option<String>) {
        *self.auth_token.write().await = token;
    }

    pub async fn clear_auth_token(&self) {
        *self.auth_token.write().await = None;
    }

    /// Whether a session token is currently set. Non-blocking; reports
    /// `false` while the token is being written.
    pub fn has_auth_token(&self) -> bool {
        self.auth_token
            .try_read()
            .map(|t| t.is_some())
            .unwrap_or(false)
    }

    // ── Balances ─────────────────────────────────────────────────────────

    /// Raw balance strings for `symbol` held by `account` at `contract`,
    /// e.g. `["1.0000 EOS"]`. Empty when the account holds none.
    pub async fn get_currency_balance(
        &self,
        contract: &AccountName,
        account: &AccountName,
        symbol: &TokenSymbol,
    ) -> Result<Vec<String>, HttpError> {
        let url = format!("{}/v1/chain/get_currency_balance", self.base_url);
        let body = BalanceRequest {
            code: contract,
            account,
            symbol,
        };
        self.post(&url, &body, RetryPolicy::Idempotent).await
    }

    // ── Transfers ────────────────────────────────────────────────────────

    /// Submit a transfer carrying an order memo. Sent exactly once; the
    /// gateway's signer resolves or rejects it.
    pub async fn submit_transfer(
        &self,
        contract: &AccountName,
        payload: &TransferPayload,
    ) -> Result<SubmitReceipt, SubmitError> {
        let url = format!("{}/v1/wallet/transfer", self.base_url);
        let body = TransferRequest { contract, payload };

        let mut req = self.client.post(&url).json(&body);
        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let resp = req.send().await.map_err(|e| SubmitError::Other {
            code: None,
            message: e.to_string(),
        })?;
        let status = resp.status();

        if status.is_success() {
            let parsed: TransferResponse =
                resp.json().await.map_err(|e| SubmitError::Other {
                    code: None,
                    message: format!("unreadable transfer response: {}", e),
                })?;
            return Ok(SubmitReceipt {
                transaction_id: parsed.transaction_id.into(),
                raw: parsed.processed,
            });
        }

        let body_text = resp.text().await.unwrap_or_default();
        match serde_json::from_str::<GatewayErrorBody>(&body_text) {
            Ok(GatewayErrorBody {
                code: Some(code),
                message,
            }) => Err(SubmitError::from_code(&code, message)),
            _ => Err(SubmitError::Other {
                code: None,
                message: format!("gateway error {}: {}", status.as_u16(), body_text),
            }),
        }
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
        retry: RetryPolicy,
    ) -> Result<T, HttpError> {
        let config = match &retry {
            RetryPolicy::None => return self.do_post(url, body).await,
            RetryPolicy::Idempotent => RetryConfig::idempotent(),
            RetryPolicy::Custom(c) => c.clone(),
        };

        let mut last_error = None;

        for attempt in 0..=config.max_retries {
            match self.do_post::<T, B>(url, body).await {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    let should_retry = match &e {
                        HttpError::ServerError { status, .. } => {
                            config.retryable_statuses.contains(status)
                        }
                        HttpError::RateLimited { retry_after_ms } => {
                            if let Some(ms) = retry_after_ms {
                                futures_timer::Delay::new(Duration::from_millis(*ms)).await;
                            }
                            true
                        }
                        HttpError::Timeout => true,
                        HttpError::Reqwest(re) => {
                            re.is_connect() || re.is_timeout() || re.is_request()
                        }
                        _ => false,
                    };

                    if should_retry && attempt < config.max_retries {
                        let delay = config.delay_for_attempt(attempt);
                        debug!(
                            attempt = attempt + 1,
                            max = config.max_retries,
                            delay_ms = delay.as_millis() as u64,
                            "Retrying request to {}",
                            url
                        );
                        futures_timer::Delay::new(delay).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(HttpError::MaxRetriesExceeded {
            attempts: config.max_retries + 1,
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        })
    }

    async fn do_post<T: DeserializeOwned, B: Serialize>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<T, HttpError> {
        let mut req = self.client.post(url).json(body);

        if let Some(token) = self.auth_token.read().await.as_ref() {
            req = req.header("Authorization", format!("Bearer {}", token));
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            return Ok(resp.json::<T>().await?);
        }

        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited {
                retry_after_ms: None,
            }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for GatewayHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            auth_token: self.auth_token.clone(),
        }
    }
}

#[async_trait]
impl Submitter for GatewayHttp {
    async fn submit(
        &self,
        contract: &AccountName,
        payload: &TransferPayload,
    ) -> Result<SubmitReceipt, SubmitError> {
        self.submit_transfer(contract, payload).await
    }
}

// ─── GatewayAccount ──────────────────────────────────────────────────────────

/// An [`AccountContext`] backed by the gateway: identity is fixed at
/// construction, balances are fetched from the chain endpoint on demand.
pub struct GatewayAccount {
    http: GatewayHttp,
    name: AccountName,
    authority: Authority,
}

impl GatewayAccount {
    pub fn new(http: GatewayHttp, name: AccountName, authority: Authority) -> Self {
        Self {
            http,
            name,
            authority,
        }
    }
}

#[async_trait]
impl AccountContext for GatewayAccount {
    fn is_authenticated(&self) -> bool {
        self.http.has_auth_token()
    }

    fn account_name(&self) -> &AccountName {
        &self.name
    }

    fn authority(&self) -> &Authority {
        &self.authority
    }

    async fn available_balance(
        &self,
        symbol: &TokenSymbol,
        contract: &AccountName,
    ) -> Result<Decimal, SdkError> {
        let balances = self
            .http
            .get_currency_balance(contract, &self.name, symbol)
            .await?;

        // No row means the account simply holds none of this asset.
        let Some(first) = balances.first() else {
            return Ok(Decimal::ZERO);
        };

        let amount = first.split_whitespace().next().unwrap_or_default();
        Decimal::from_str(amount).map_err(|e| {
            SdkError::Validation(format!("unparseable balance '{}': {}", first, e))
        })
    }
}
