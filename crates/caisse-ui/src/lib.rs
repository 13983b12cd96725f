//! The register screen of Caisse.
//!
//! This crate provides:
//! - `CartSession` - the in-progress sale, its checkout and post-sale actions
//! - `CaisseView` - the port the session renders and prompts through
//! - `CartViewModel` - the projection handed to the view on every change
//! - HTML renderers for the cart, totals, actions and invoice
//! - `Catalog` - product search for the product picker
//! - `chrome` - alerts, toasts, confirmations, shortcuts, sidebar and forms
//!
//! # Example
//!
//! ```rust,ignore
//! use caisse_ui::prelude::*;
//!
//! let mut session = CartSession::new(view, gateway);
//! session.add_item("12", "Baguette", Money::new(120, Currency::EUR));
//! session.set_cash_received("5");
//! let receipt = session.checkout().await?;
//! session.print_invoice()?;
//! ```

pub mod catalog;
pub mod chrome;
pub mod error;
pub mod messages;
pub mod payment;
pub mod render;
pub mod session;
pub mod view;

pub use error::SessionError;
pub use session::{CartSession, CheckoutTicket, OnSuccess, SalePhase, SessionOptions};
pub use view::{ButtonState, CaisseView, CartViewModel, LineView};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::catalog::{Catalog, CatalogPage, CatalogQuery, Product};
    pub use crate::chrome::{Toast, ToastLevel};
    pub use crate::error::SessionError;
    pub use crate::payment::PaymentToggle;
    pub use crate::session::{CartSession, CheckoutTicket, OnSuccess, SalePhase, SessionOptions};
    pub use crate::view::{CaisseView, CartViewModel};

    pub use caisse_commerce::prelude::*;
    pub use caisse_data::{CheckoutGateway, CheckoutReceipt, GatewayError};
}
