//! Store server access for the register.
//!
//! This crate provides:
//! - `CheckoutGateway` - the operations the register needs from the server
//! - `HttpGateway` - the HTTP implementation with CSRF and session cookies
//! - `Endpoints` - URL construction for the register endpoints
//! - `TimeoutConfig` / `RetryPolicy` - per-call limits

mod client;
mod csrf;
mod endpoints;
mod gateway;
mod retry;
mod timeout;

pub use client::*;
pub use csrf::*;
pub use endpoints::*;
pub use gateway::*;
pub use retry::*;
pub use timeout::*;

pub use reqwest::Url;
