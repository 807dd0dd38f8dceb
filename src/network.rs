//! Network URL constants for the DaqDex SDK.

/// Default gateway REST base URL.
pub const DEFAULT_GATEWAY_URL: &str = "https://gateway.daqdex.io";
