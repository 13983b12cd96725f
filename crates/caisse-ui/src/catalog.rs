//! Product picker of the register: search, category filter and pages.

use caisse_commerce::{CategoryId, Money, Sku};
use serde::Serialize;

use crate::render::escape_html;

/// Products shown per page.
pub const CATALOG_PAGE_SIZE: usize = 6;

/// A product that can be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub sku: Sku,
    pub name: String,
    pub price: Money,
    pub category: Option<CategoryId>,
    /// Inactive products are never offered.
    pub active: bool,
}

impl Product {
    pub fn new(sku: impl Into<Sku>, name: impl Into<String>, price: Money) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            price,
            category: None,
            active: true,
        }
    }

    pub fn in_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Search parameters as they arrive from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Name fragment; blank matches everything.
    pub term: String,
    /// Category filter; blank means all categories.
    pub category: Option<String>,
    /// Requested page number as text.
    pub page: Option<String>,
}

impl CatalogQuery {
    pub fn term(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_page(mut self, page: impl Into<String>) -> Self {
        self.page = Some(page.into());
        self
    }
}

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogPage<'a> {
    pub products: Vec<&'a Product>,
    /// 1-based page number actually served.
    pub number: usize,
    /// At least 1, even without results.
    pub num_pages: usize,
    /// Number of matching products.
    pub total: usize,
}

impl CatalogPage<'_> {
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }
}

/// The products offered at the register.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, sku: &Sku) -> Option<&Product> {
        self.products.iter().find(|p| &p.sku == sku)
    }

    /// Active products matching the query, sorted by name and paginated.
    ///
    /// A page past the end serves the last page; an unreadable page number
    /// serves the first.
    pub fn search(&self, query: &CatalogQuery) -> CatalogPage<'_> {
        let term = query.term.trim().to_lowercase();
        let category = query
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());

        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|p| p.active)
            .filter(|p| term.is_empty() || p.name.to_lowercase().contains(&term))
            .filter(|p| match category {
                Some(wanted) => p.category.as_ref().is_some_and(|c| c.as_str() == wanted),
                None => true,
            })
            .collect();
        matches.sort_by(|a, b| {
            a.name
                .to_lowercase()
                .cmp(&b.name.to_lowercase())
                .then_with(|| a.name.cmp(&b.name))
        });

        let total = matches.len();
        let num_pages = total.div_ceil(CATALOG_PAGE_SIZE).max(1);
        let number = resolve_page(query.page.as_deref(), num_pages);

        let products = matches
            .into_iter()
            .skip((number - 1) * CATALOG_PAGE_SIZE)
            .take(CATALOG_PAGE_SIZE)
            .collect();

        CatalogPage {
            products,
            number,
            num_pages,
            total,
        }
    }
}

fn resolve_page(requested: Option<&str>, num_pages: usize) -> usize {
    match requested.map(str::trim).map(str::parse::<i64>) {
        Some(Ok(n)) if n >= 1 && (n as u64) <= num_pages as u64 => n as usize,
        Some(Ok(_)) => num_pages,
        _ => 1,
    }
}

/// Render a result page as the product grid.
pub fn render_catalog_page(page: &CatalogPage<'_>) -> String {
    if page.products.is_empty() {
        return r#"<div class="product-grid product-grid--empty">
    <p class="text-muted">Aucun produit trouvé</p>
</div>"#
            .to_string();
    }

    let cards: Vec<String> = page
        .products
        .iter()
        .map(|product| {
            format!(
                r#"<button class="product-card add-to-cart" data-sku="{sku}" data-name="{name}" data-price="{price}">
    <span class="product-name">{name}</span>
    <span class="product-price">{display}</span>
</button>"#,
                sku = escape_html(product.sku.as_str()),
                name = escape_html(&product.name),
                price = product.price.display_amount(),
                display = product.price.display(),
            )
        })
        .collect();

    format!(
        r#"<div class="product-grid" data-page="{number}" data-pages="{pages}">
{cards}
</div>"#,
        number = page.number,
        pages = page.num_pages,
        cards = cards.join("\n"),
    )
}
