//! Token metadata — traded tokens and the fixed settlement asset.

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::shared::{AccountName, TokenSymbol};

/// Market identifier every order memo carries. All trading pairs settle
/// against the settlement asset, so there is a single market code.
pub const MARKET_CODE: &str = "EOS";

/// Static metadata for a listed token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: TokenSymbol,
    /// The token contract account that holds balances for this asset.
    pub contract: AccountName,
    /// Declared decimal precision. Amounts of this asset are normalized
    /// to this many decimal places before leaving the SDK.
    pub precision: u32,
}

impl TokenInfo {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<TokenSymbol>,
        contract: impl Into<AccountName>,
        precision: u32,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            contract: contract.into(),
            precision,
        }
    }
}

static SETTLEMENT: OnceLock<TokenInfo> = OnceLock::new();

/// The settlement asset all tokens are priced against (EOS, 4 decimals).
pub fn settlement_asset() -> &'static TokenInfo {
    SETTLEMENT.get_or_init(|| TokenInfo {
        name: "EOS".to_string(),
        symbol: TokenSymbol::new("EOS"),
        contract: AccountName::from("eosio.token"),
        precision: 4,
    })
}
