//! Order intent domain — validated order records and the builder that
//! submits them.

pub mod builder;
pub mod wire;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::token::{settlement_asset, TokenInfo};
use crate::error::OrderError;
use crate::shared::{round_to_precision, AccountName, Authority, TokenSymbol};

pub use builder::{IntentBuilder, Submission};

// ─── OrderKind ───────────────────────────────────────────────────────────────

/// The four supported order kinds. Closed set; terminal once an intent is
/// constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    #[serde(rename = "BUY_LIMIT")]
    BuyLimit,
    #[serde(rename = "BUY_MARKET")]
    BuyMarket,
    #[serde(rename = "SELL_LIMIT")]
    SellLimit,
    #[serde(rename = "SELL_MARKET")]
    SellMarket,
}

impl OrderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuyLimit => "BUY_LIMIT",
            Self::BuyMarket => "BUY_MARKET",
            Self::SellLimit => "SELL_LIMIT",
            Self::SellMarket => "SELL_MARKET",
        }
    }

    /// Limit orders get asynchronous status tracking after submission.
    pub fn is_limit(&self) -> bool {
        matches!(self, Self::BuyLimit | Self::SellLimit)
    }

    pub fn is_buy(&self) -> bool {
        matches!(self, Self::BuyLimit | Self::BuyMarket)
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── OrderForm ───────────────────────────────────────────────────────────────

/// Raw user input for one submission attempt.
///
/// An immutable value passed into the builder at call time; the variant
/// determines the order kind. Fields are not assumed pre-validated.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderForm {
    BuyLimit { price: Decimal, quantity: Decimal },
    BuyMarket { total: Decimal },
    SellLimit { price: Decimal, quantity: Decimal },
    SellMarket { quantity: Decimal },
}

impl OrderForm {
    pub fn kind(&self) -> OrderKind {
        match self {
            Self::BuyLimit { .. } => OrderKind::BuyLimit,
            Self::BuyMarket { .. } => OrderKind::BuyMarket,
            Self::SellLimit { .. } => OrderKind::SellLimit,
            Self::SellMarket { .. } => OrderKind::SellMarket,
        }
    }
}

// ─── Funding ─────────────────────────────────────────────────────────────────

/// The asset and amount an intent must be funded with — the settlement
/// asset for buys, the traded token for sells. Checked against the
/// account's available balance before any submission call.
#[derive(Debug, Clone, PartialEq)]
pub struct Funding {
    pub symbol: TokenSymbol,
    pub contract: AccountName,
    pub precision: u32,
    pub required: Decimal,
}

// ─── OrderIntent ─────────────────────────────────────────────────────────────

/// A fully validated, ready-to-submit order description.
///
/// Constructed fresh per submission attempt, handed to the submitter, and
/// discarded. Never mutated after construction. `kind` determines which of
/// `price`/`quantity`/`quote_amount` are authoritative versus zeroed
/// placeholders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderIntent {
    pub kind: OrderKind,
    pub base_symbol: TokenSymbol,
    /// Always the settlement asset symbol.
    pub quote_symbol: TokenSymbol,
    /// Settlement-asset price per traded token. Zero for market orders.
    pub price: Decimal,
    /// Traded-token quantity. Zero for buy-market orders.
    pub quantity: Decimal,
    /// Settlement-asset total. Zero for sell-market orders.
    pub quote_amount: Decimal,
    pub account: AccountName,
    pub authority: Authority,
}

impl OrderIntent {
    /// Validate and normalize raw form input into an intent.
    ///
    /// Pure: no I/O, deterministic for a given input. Amounts are rounded
    /// to their asset's declared precision here, before any comparison or
    /// serialization.
    pub fn from_form(
        form: &OrderForm,
        traded: &TokenInfo,
        account: AccountName,
        authority: Authority,
    ) -> Result<Self, OrderError> {
        let settlement = settlement_asset();

        let (price, quantity, quote_amount) = match form {
            OrderForm::BuyLimit { price, quantity } => {
                require_positive("price", *price)?;
                require_positive("quantity", *quantity)?;
                let price = round_to_precision(*price, settlement.precision);
                let quantity = round_to_precision(*quantity, traded.precision);
                let quote = round_to_precision(price * quantity, settlement.precision);
                (price, quantity, quote)
            }
            OrderForm::BuyMarket { total } => {
                require_positive("total", *total)?;
                let quote = round_to_precision(*total, settlement.precision);
                // Price and quantity are unknown until execution.
                (Decimal::ZERO, Decimal::ZERO, quote)
            }
            OrderForm::SellLimit { price, quantity } => {
                require_positive("price", *price)?;
                require_positive("quantity", *quantity)?;
                // Sell path rounds price and the quote amount to the traded
                // token's precision, not the settlement asset's. Kept as-is
                // until the intended behavior is confirmed; see DESIGN.md.
                let price = round_to_precision(*price, traded.precision);
                let quantity = round_to_precision(*quantity, traded.precision);
                let quote = round_to_precision(price * quantity, traded.precision);
                (price, quantity, quote)
            }
            OrderForm::SellMarket { quantity } => {
                require_positive("quantity", *quantity)?;
                let quantity = round_to_precision(*quantity, traded.precision);
                // Quantity-only order; quote side unknown until execution.
                (Decimal::ZERO, quantity, Decimal::ZERO)
            }
        };

        Ok(Self {
            kind: form.kind(),
            base_symbol: traded.symbol.clone(),
            quote_symbol: settlement.symbol.clone(),
            price,
            quantity,
            quote_amount,
            account,
            authority,
        })
    }

    /// The asset and amount this intent must be funded with.
    pub fn funding(&self, traded: &TokenInfo) -> Funding {
        let settlement = settlement_asset();
        if self.kind.is_buy() {
            Funding {
                symbol: settlement.symbol.clone(),
                contract: settlement.contract.clone(),
                precision: settlement.precision,
                required: self.quote_amount,
            }
        } else {
            Funding {
                symbol: traded.symbol.clone(),
                contract: traded.contract.clone(),
                precision: traded.precision,
                required: self.quantity,
            }
        }
    }

    /// Precision used when formatting `quote_amount` for the memo.
    ///
    /// Buy paths use the settlement asset's precision; sell paths reuse the
    /// traded token's (the preserved asymmetry noted in `from_form`).
    pub fn amount_precision(&self, traded: &TokenInfo) -> u32 {
        if self.kind.is_buy() {
            settlement_asset().precision
        } else {
            traded.precision
        }
    }
}

fn require_positive(field: &str, value: Decimal) -> Result<(), OrderError> {
    if value <= Decimal::ZERO {
        return Err(OrderError::InvalidInput(format!(
            "{} must be positive, got {}",
            field, value
        )));
    }
    Ok(())
}
