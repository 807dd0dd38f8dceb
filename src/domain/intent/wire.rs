//! Wire types for order submission — the transfer payload handed to the
//! gateway and the JSON memo embedded in it.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{OrderIntent, OrderKind};
use crate::domain::token::{TokenInfo, MARKET_CODE};
use crate::shared::{format_with_precision, AccountName, Authority, TokenSymbol};

/// The order memo carried inside the transfer, JSON-serialized.
///
/// `price` and `qty` travel as decimal strings (serde-str); `amount` is
/// pre-formatted to the precision of the asset it denominates, so the
/// matching engine sees exactly what the balance check compared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderMemo {
    #[serde(rename = "type")]
    pub kind: OrderKind,
    pub symbol: TokenSymbol,
    pub market: String,
    pub price: Decimal,
    pub qty: Decimal,
    pub amount: String,
}

/// The submission payload: one token transfer plus the order memo.
///
/// Buy orders move the settlement asset; sell orders move the traded token.
/// `quantity` is the precision-formatted amount of the transferred asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferPayload {
    pub account_name: AccountName,
    pub authority_level: Authority,
    pub quantity: String,
    pub precision: u32,
    pub symbol: TokenSymbol,
    /// JSON-serialized [`OrderMemo`].
    pub memo: String,
}

impl TransferPayload {
    /// Serialize an intent into its transfer payload.
    ///
    /// `traded` is the metadata of the traded token; the settlement side
    /// comes from the intent itself. Deterministic: the same intent always
    /// yields the same payload.
    pub fn from_intent(
        intent: &OrderIntent,
        traded: &TokenInfo,
    ) -> Result<Self, serde_json::Error> {
        let funding = intent.funding(traded);
        let memo = OrderMemo {
            kind: intent.kind,
            symbol: intent.base_symbol.clone(),
            market: MARKET_CODE.to_string(),
            price: intent.price,
            qty: intent.quantity,
            amount: format_with_precision(&intent.quote_amount, intent.amount_precision(traded)),
        };
        Ok(Self {
            account_name: intent.account.clone(),
            authority_level: intent.authority.clone(),
            quantity: format_with_precision(&funding.required, funding.precision),
            precision: funding.precision,
            symbol: funding.symbol,
            memo: serde_json::to_string(&memo)?,
        })
    }
}
