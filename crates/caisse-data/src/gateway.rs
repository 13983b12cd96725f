//! The register's view of the store server.

use async_trait::async_trait;
use caisse_commerce::checkout::{CheckoutRequest, SaleInfo};
use caisse_commerce::SaleId;

/// Error type for store server calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The server answered and refused the operation.
    #[error("Rejected by server: {}", .0.as_deref().unwrap_or("no reason given"))]
    Rejected(Option<String>),

    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    #[error("Timeout: {0}")]
    Timeout(String),

    /// The request never got an answer (DNS, refused connection, reset).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Whether the failure happened before the server could answer.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Transport(_))
    }

    /// Message supplied by the server, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Rejected(message) => message.as_deref(),
            _ => None,
        }
    }
}

/// A sale accepted by the server.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckoutReceipt {
    /// Identifier for follow-up invoice calls.
    pub sale_id: Option<SaleId>,
    /// Page the server suggests navigating to.
    pub redirect_url: Option<String>,
    /// Confirmation text.
    pub message: Option<String>,
    /// Toast level the server asks the confirmation to use (`success`, `warning`, ...).
    pub toast_type: Option<String>,
}

/// Store server operations used by the register.
///
/// Implementations report a `success: false` answer as
/// [`GatewayError::Rejected`], so `Ok` always means the sale was recorded.
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    /// Record a sale.
    async fn submit_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, GatewayError>;

    /// Fetch the invoice data of a recorded sale.
    async fn fetch_sale_info(&self, sale_id: &SaleId) -> Result<SaleInfo, GatewayError>;

    /// Address of the printable invoice of a sale.
    fn invoice_url(&self, sale_id: &SaleId) -> String;
}

#[async_trait]
impl<G: CheckoutGateway + ?Sized> CheckoutGateway for std::sync::Arc<G> {
    async fn submit_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, GatewayError> {
        (**self).submit_checkout(request).await
    }

    async fn fetch_sale_info(&self, sale_id: &SaleId) -> Result<SaleInfo, GatewayError> {
        (**self).fetch_sale_info(sale_id).await
    }

    fn invoice_url(&self, sale_id: &SaleId) -> String {
        (**self).invoice_url(sale_id)
    }
}
