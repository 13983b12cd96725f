//! Register configuration (`caisse.toml`).

use anyhow::{anyhow, Context, Result};
use caisse_commerce::cart::TaxRate;
use caisse_commerce::checkout::PaymentMode;
use caisse_commerce::{Currency, Money};
use caisse_data::GatewayConfig;
use caisse_ui::catalog::{Catalog, Product};
use caisse_ui::{OnSuccess, SessionOptions};
use serde::{Deserialize, Serialize};

/// Environment variable overriding `server.base_url`.
pub const ENV_BASE_URL: &str = "CAISSE_BASE_URL";
/// Environment variable overriding `server.session_cookie`.
pub const ENV_COOKIE: &str = "CAISSE_COOKIE";

/// Configuration file names, in lookup order.
pub const CONFIG_NAMES: [&str; 3] = ["caisse.toml", ".caisse.toml", "caisse.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaisseConfig {
    /// Store server connection.
    #[serde(default)]
    pub server: GatewayConfig,

    /// Register behaviour.
    #[serde(default)]
    pub register: RegisterConfig,

    /// Products offered at the register.
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,
}

impl CaisseConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;
        Self::parse(path, &content)
    }

    /// Parse config text; the format follows the file extension.
    pub fn parse(path: &str, content: &str) -> Result<Self> {
        if path.ends_with(".json") {
            serde_json::from_str(content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            toml::from_str(content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Apply `CAISSE_BASE_URL` and `CAISSE_COOKIE`.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.trim().is_empty()) {
            self.server.base_url = url;
        }
        if let Some(cookie) = lookup(ENV_COOKIE).filter(|v| !v.trim().is_empty()) {
            self.server.session_cookie = Some(cookie);
        }
    }

    /// Settings for a new cart session.
    pub fn session_options(&self) -> Result<SessionOptions> {
        Ok(SessionOptions {
            currency: self.register.currency()?,
            tax_rate: TaxRate::from_percent(self.register.tax_percent),
            payment_mode: PaymentMode::from_code(&self.register.payment_mode),
            on_success: self.register.on_success,
        })
    }

    /// Products of the `[[catalog]]` tables.
    pub fn catalog(&self) -> Result<Catalog> {
        let currency = self.register.currency()?;
        Ok(Catalog::new(
            self.catalog.iter().map(|e| e.to_product(currency)).collect(),
        ))
    }
}

/// `[register]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterConfig {
    /// `stay` or `redirect`.
    #[serde(default)]
    pub on_success: OnSuccess,

    /// Payment mode selected when the register opens.
    #[serde(default = "default_payment_mode")]
    pub payment_mode: String,

    /// ISO currency code.
    #[serde(default = "default_currency")]
    pub currency: String,

    #[serde(default = "default_tax_percent")]
    pub tax_percent: u32,
}

impl RegisterConfig {
    pub fn currency(&self) -> Result<Currency> {
        Currency::from_code(&self.currency)
            .ok_or_else(|| anyhow!("Unsupported currency: {}", self.currency))
    }
}

fn default_payment_mode() -> String {
    PaymentMode::Cash.code().to_string()
}

fn default_currency() -> String {
    Currency::EUR.code().to_string()
}

fn default_tax_percent() -> u32 {
    20
}

impl Default for RegisterConfig {
    fn default() -> Self {
        Self {
            on_success: OnSuccess::Stay,
            payment_mode: default_payment_mode(),
            currency: default_currency(),
            tax_percent: default_tax_percent(),
        }
    }
}

/// One `[[catalog]]` product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub sku: String,
    pub name: String,
    /// Unit price as a decimal amount.
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

impl CatalogEntry {
    fn to_product(&self, currency: Currency) -> Product {
        let price = Money::from_decimal(self.price.max(0.0), currency);
        let mut product = Product::new(self.sku.as_str(), self.name.as_str(), price);
        if let Some(category) = &self.category {
            product = product.in_category(category.as_str());
        }
        if !self.active {
            product = product.inactive();
        }
        product
    }
}

/// Generate a default caisse.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Caisse register configuration

[server]
base_url = "{base_url}"
# Cookie header of a logged-in session; CAISSE_COOKIE overrides it.
# session_cookie = "sessionid=...; csrftoken=..."
csrf_cookie = "csrftoken"
csrf_header = "X-CSRFToken"
sale_info_retries = 2

[server.timeouts]
connect_ms = 2000
total_ms = 10000

[register]
# "stay" keeps the register open after a sale, "redirect" follows the server.
on_success = "stay"
payment_mode = "CASH"
currency = "EUR"
tax_percent = 20

[[catalog]]
sku = "1"
name = "Baguette"
price = 1.20
category = "1"

[[catalog]]
sku = "2"
name = "Croissant"
price = 1.10
category = "1"
"#,
        base_url = base_url
    )
}
