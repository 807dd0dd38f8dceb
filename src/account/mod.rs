//! Account context seam — authentication state, identity, and balance
//! lookups supplied by an external account store.
//!
//! The SDK holds no mutation rights over balances; everything here is
//! read-only from the builder's perspective. Balances are fetched fresh
//! per submission attempt and never cached in this crate.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::SdkError;
use crate::shared::{AccountName, Authority, TokenSymbol};

/// External account context consumed by the intent builder.
#[async_trait]
pub trait AccountContext: Send + Sync {
    /// Whether the caller has a live authenticated session.
    fn is_authenticated(&self) -> bool;

    /// The submitting account.
    fn account_name(&self) -> &AccountName;

    /// The permission level transactions are signed under.
    fn authority(&self) -> &Authority;

    /// Available (liquid) balance of `symbol` held at `contract`.
    ///
    /// Suspends until the lookup resolves. Transport failures propagate
    /// as [`SdkError`]; the builder converts them to a submission failure.
    async fn available_balance(
        &self,
        symbol: &TokenSymbol,
        contract: &AccountName,
    ) -> Result<Decimal, SdkError>;
}
