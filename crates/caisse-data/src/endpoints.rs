//! URLs of the register endpoints on the store server.

use caisse_commerce::SaleId;
use reqwest::Url;

use crate::gateway::GatewayError;

const REGISTER_PATH: &str = "core/caisse/";
const CHECKOUT_PATH: &str = "core/caisse/checkout/";
const SALE_INFO_PATH: &str = "core/caisse/sale-info/";
const INVOICE_PATH: &str = "core/caisse/generate-invoice/";

/// Resolved endpoint URLs for one store server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    /// Parse the server base URL (`https://store.example/`).
    ///
    /// A missing trailing slash is added so relative paths join under it.
    pub fn new(base_url: &str) -> Result<Self, GatewayError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)
            .map_err(|e| GatewayError::Config(format!("invalid base_url {base_url:?}: {e}")))?;
        if base.cannot_be_a_base() {
            return Err(GatewayError::Config(format!(
                "base_url {base_url:?} cannot hold paths"
            )));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// POST target for checkouts.
    pub fn checkout(&self) -> Url {
        self.join(CHECKOUT_PATH)
    }

    /// GET target for a sale's invoice data.
    pub fn sale_info(&self, sale_id: &SaleId) -> Url {
        let mut url = self.join(SALE_INFO_PATH);
        url.query_pairs_mut().append_pair("sale_id", sale_id.as_str());
        url
    }

    /// Printable invoice document for a sale.
    pub fn invoice(&self, sale_id: &SaleId) -> Url {
        let mut url = self.join(INVOICE_PATH);
        url.query_pairs_mut().append_pair("sale_id", sale_id.as_str());
        url
    }

    /// The register page, unfiltered.
    pub fn register_page(&self) -> Url {
        self.join(REGISTER_PATH)
    }

    fn join(&self, path: &str) -> Url {
        // Paths are constants relative to a base that is known to accept them.
        self.base.join(path).unwrap_or_else(|_| self.base.clone())
    }
}

/// Register page filtered by a product search term.
///
/// A blank term removes the filter. Pagination restarts.
pub fn register_search(current: &Url, term: &str) -> Url {
    with_param(current, "q", term, true)
}

/// Register page restricted to a category; blank shows them all.
///
/// Pagination restarts.
pub fn register_category(current: &Url, category: &str) -> Url {
    with_param(current, "category", category, true)
}

/// Register page on another catalog page, keeping the filters.
pub fn register_page_number(current: &Url, page: &str) -> Url {
    with_param(current, "page", page, false)
}

fn with_param(current: &Url, key: &str, value: &str, restart_paging: bool) -> Url {
    let mut url = current.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key && !(restart_paging && k == "page"))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let value = value.trim();
    url.set_query(None);
    if !kept.is_empty() || !value.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (k, v) in &kept {
            pairs.append_pair(k, v);
        }
        if !value.is_empty() {
            pairs.append_pair(key, value);
        }
    }
    url
}
