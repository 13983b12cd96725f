//! HTTP implementation of [`CheckoutGateway`].

use async_trait::async_trait;
use caisse_commerce::checkout::{CheckoutRequest, CheckoutResponse, SaleInfo};
use caisse_commerce::SaleId;
use reqwest::header::{HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE, COOKIE};
use reqwest::{Client, RequestBuilder, Url};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::csrf::{cookie_value, DEFAULT_CSRF_COOKIE, DEFAULT_CSRF_HEADER};
use crate::endpoints::Endpoints;
use crate::gateway::{CheckoutGateway, CheckoutReceipt, GatewayError};
use crate::retry::RetryPolicy;
use crate::timeout::TimeoutConfig;

/// Connection settings for the store server (`[server]` in `caisse.toml`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the store application.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// `Cookie` header of an authenticated session
    /// (e.g. `sessionid=...; csrftoken=...`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    /// Cookie holding the anti-forgery token.
    #[serde(default = "default_csrf_cookie")]
    pub csrf_cookie: String,

    /// Header the token is sent in.
    #[serde(default = "default_csrf_header")]
    pub csrf_header: String,

    #[serde(default)]
    pub timeouts: TimeoutConfig,

    /// Extra attempts for sale-info lookups.
    #[serde(default = "default_sale_info_retries")]
    pub sale_info_retries: u32,
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000/".to_string()
}

fn default_csrf_cookie() -> String {
    DEFAULT_CSRF_COOKIE.to_string()
}

fn default_csrf_header() -> String {
    DEFAULT_CSRF_HEADER.to_string()
}

fn default_sale_info_retries() -> u32 {
    2
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            session_cookie: None,
            csrf_cookie: default_csrf_cookie(),
            csrf_header: default_csrf_header(),
            timeouts: TimeoutConfig::default(),
            sale_info_retries: default_sale_info_retries(),
        }
    }
}

impl GatewayConfig {
    /// Anti-forgery token found in the session cookie.
    pub fn csrf_token(&self) -> Option<String> {
        self.session_cookie
            .as_deref()
            .and_then(|cookies| cookie_value(cookies, &self.csrf_cookie))
    }
}

/// Store server client over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    endpoints: Endpoints,
    session_cookie: Option<HeaderValue>,
    csrf: Option<(HeaderName, HeaderValue)>,
    sale_info_retry: RetryPolicy,
}

impl HttpGateway {
    /// Build a client from configuration.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let endpoints = Endpoints::new(&config.base_url)?;

        let client = Client::builder()
            .connect_timeout(config.timeouts.connect())
            .timeout(config.timeouts.total())
            .build()
            .map_err(|e| GatewayError::Config(e.to_string()))?;

        let session_cookie = config
            .session_cookie
            .as_deref()
            .map(HeaderValue::from_str)
            .transpose()
            .map_err(|e| GatewayError::Config(format!("session_cookie: {e}")))?;

        let csrf = match config.csrf_token() {
            Some(token) => {
                let name = HeaderName::from_bytes(config.csrf_header.as_bytes())
                    .map_err(|e| GatewayError::Config(format!("csrf_header: {e}")))?;
                let value = HeaderValue::from_str(&token)
                    .map_err(|e| GatewayError::Config(format!("csrf token: {e}")))?;
                Some((name, value))
            }
            None => {
                warn!(cookie = %config.csrf_cookie, "no anti-forgery token in session cookie");
                None
            }
        };

        Ok(Self {
            client,
            endpoints,
            session_cookie,
            csrf,
            sale_info_retry: RetryPolicy::new(config.sale_info_retries),
        })
    }

    /// Override the sale-info retry policy.
    pub fn with_sale_info_retry(mut self, policy: RetryPolicy) -> Self {
        self.sale_info_retry = policy;
        self
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn with_session(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.session_cookie {
            Some(cookie) => builder.header(COOKIE, cookie.clone()),
            None => builder,
        }
    }

    async fn get_sale_info_once(&self, url: &Url) -> Result<SaleInfo, GatewayError> {
        let response = self
            .with_session(self.client.get(url.clone()))
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport)?;

        if !status.is_success() {
            if let Ok(body) = serde_json::from_slice::<ErrorBody>(&bytes) {
                if status.is_client_error() {
                    return Err(GatewayError::Rejected(body.error));
                }
            }
            return Err(GatewayError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

fn map_transport(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout(err.to_string())
    } else if err.is_decode() {
        GatewayError::Decode(err.to_string())
    } else {
        GatewayError::Transport(err.to_string())
    }
}

#[async_trait]
impl CheckoutGateway for HttpGateway {
    async fn submit_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, GatewayError> {
        let url = self.endpoints.checkout();
        info!(
            items = request.items.len(),
            units = request.unit_count(),
            payment_mode = %request.payment_mode,
            "submitting checkout"
        );

        let mut builder = self
            .with_session(self.client.post(url.clone()))
            .header(CONTENT_TYPE, "application/json")
            .json(request);
        if let Some((name, value)) = &self.csrf {
            builder = builder.header(name.clone(), value.clone());
        }

        let response = builder.send().await.map_err(map_transport)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport)?;

        // The server answers refusals with a JSON body whatever the status.
        let body: CheckoutResponse = match serde_json::from_slice(&bytes) {
            Ok(body) => body,
            Err(e) if status.is_success() => return Err(GatewayError::Decode(e.to_string())),
            Err(_) => {
                return Err(GatewayError::Http {
                    status: status.as_u16(),
                    url: url.to_string(),
                })
            }
        };

        if !body.success {
            warn!(status = status.as_u16(), error = ?body.error, "checkout refused");
            return Err(GatewayError::Rejected(body.error));
        }

        info!(sale_id = ?body.sale_id, "checkout accepted");
        Ok(CheckoutReceipt {
            sale_id: body.sale_id,
            redirect_url: body.redirect_url,
            message: body.message,
            toast_type: body.toast_type,
        })
    }

    async fn fetch_sale_info(&self, sale_id: &SaleId) -> Result<SaleInfo, GatewayError> {
        let url = self.endpoints.sale_info(sale_id);
        let policy = &self.sale_info_retry;
        let mut attempt = 0;

        loop {
            match self.get_sale_info_once(&url).await {
                Err(err) if policy.should_retry(&err, attempt) => {
                    let delay = policy.delay(attempt);
                    debug!(%sale_id, attempt, ?delay, error = %err, "retrying sale-info lookup");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                result => return result,
            }
        }
    }

    fn invoice_url(&self, sale_id: &SaleId) -> String {
        self.endpoints.invoice(sale_id).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use caisse_commerce::prelude::*;
    use httpmock::prelude::*;

    fn config_for(server: &MockServer) -> GatewayConfig {
        GatewayConfig {
            base_url: server.base_url(),
            session_cookie: Some("sessionid=s3ss; csrftoken=t0k3n".to_string()),
            ..GatewayConfig::default()
        }
    }

    fn request() -> CheckoutRequest {
        let mut cart = Cart::default();
        cart.add_item(Sku::new("3"), "Savon", Money::new(450, Currency::EUR));
        CheckoutRequest::from_cart(&cart, PaymentMode::Card, Money::zero(Currency::EUR))
    }

    #[test]
    fn test_csrf_token_from_cookie() {
        let config = GatewayConfig {
            session_cookie: Some("a=1; csrftoken=xyz".into()),
            ..GatewayConfig::default()
        };
        assert_eq!(config.csrf_token().as_deref(), Some("xyz"));
        assert_eq!(GatewayConfig::default().csrf_token(), None);
    }

    #[tokio::test]
    async fn test_checkout_sends_token_and_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/core/caisse/checkout/")
                .header("x-csrftoken", "t0k3n")
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "items": [{"sku": "3", "name": "Savon", "price": 4.5, "qty": 1}],
                    "payment_mode": "CARD",
                    "cash_received": 0.0
                }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"success": true, "sale_id": 17, "message": "Vente enregistrée", "toast_type": "warning"}"#);
        });

        let gateway = HttpGateway::new(&config_for(&server)).unwrap();
        let receipt = gateway.submit_checkout(&request()).await.unwrap();

        mock.assert();
        assert_eq!(receipt.sale_id, Some(SaleId::new("17")));
        assert_eq!(receipt.message.as_deref(), Some("Vente enregistrée"));
        assert_eq!(receipt.toast_type.as_deref(), Some("warning"));
    }

    #[tokio::test]
    async fn test_checkout_refusal_maps_to_rejected() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/core/caisse/checkout/");
            then.status(405)
                .header("content-type", "application/json")
                .body(r#"{"success": false, "error": "Méthode non autorisée"}"#);
        });

        let gateway = HttpGateway::new(&config_for(&server)).unwrap();
        let err = gateway.submit_checkout(&request()).await.unwrap_err();
        assert_eq!(err, GatewayError::Rejected(Some("Méthode non autorisée".into())));
    }

    #[tokio::test]
    async fn test_checkout_html_error_maps_to_http() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/core/caisse/checkout/");
            then.status(500).body("<h1>Server Error</h1>");
        });

        let gateway = HttpGateway::new(&config_for(&server)).unwrap();
        let err = gateway.submit_checkout(&request()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Http { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_sale_info_lookup() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/core/caisse/sale-info/")
                .query_param("sale_id", "17");
            then.status(200)
                .header("content-type", "application/json")
                .body(
                    r#"{"invoice_number": "F202405020001", "date": "02/05/2024 09:15",
                        "cashier": "Jean Martin", "customer": "Client", "total_amount": "4.50",
                        "items": [{"product": "Savon", "quantity": 1, "unit_price": "4.50", "line_total": "4.50"}]}"#,
                );
        });

        let gateway = HttpGateway::new(&config_for(&server)).unwrap();
        let sale = gateway.fetch_sale_info(&SaleId::new("17")).await.unwrap();
        assert_eq!(sale.invoice_number, "F202405020001");
        assert_eq!(sale.total_amount.amount_cents, 450);
    }

    #[tokio::test]
    async fn test_sale_info_not_found() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/core/caisse/sale-info/");
            then.status(404)
                .header("content-type", "application/json")
                .body(r#"{"error": "Vente introuvable"}"#);
        });

        let gateway = HttpGateway::new(&config_for(&server)).unwrap();
        let err = gateway.fetch_sale_info(&SaleId::new("999")).await.unwrap_err();
        assert_eq!(err, GatewayError::Rejected(Some("Vente introuvable".into())));
    }

    #[tokio::test]
    async fn test_sale_info_retries_server_errors() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/core/caisse/sale-info/");
            then.status(503);
        });

        let gateway = HttpGateway::new(&config_for(&server))
            .unwrap()
            .with_sale_info_retry(RetryPolicy::immediate(2));
        let err = gateway.fetch_sale_info(&SaleId::new("1")).await.unwrap_err();

        assert!(matches!(err, GatewayError::Http { status: 503, .. }));
        mock.assert_hits(3);
    }

    #[test]
    fn test_invoice_url() {
        let gateway = HttpGateway::new(&GatewayConfig {
            base_url: "http://store.local".into(),
            ..GatewayConfig::default()
        })
        .unwrap();
        assert_eq!(
            gateway.invoice_url(&SaleId::new("5")),
            "http://store.local/core/caisse/generate-invoice/?sale_id=5"
        );
    }
}
