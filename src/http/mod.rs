//! HTTP gateway client with per-endpoint retry policies.

pub mod client;
pub mod retry;

pub use client::{GatewayAccount, GatewayHttp};
pub use retry::{RetryConfig, RetryPolicy};
