//! The view port and the view model handed to it.
//!
//! The session never touches a page directly. After every change it
//! projects its whole state into a [`CartViewModel`] and passes it to
//! [`CaisseView::render`]; prompts, toasts and navigation also go through
//! the port.

use std::time::Duration;

use caisse_commerce::checkout::{PaymentMode, SaleInfo};
use caisse_commerce::{Cart, Sku};
use serde::Serialize;

use crate::chrome::Toast;
use crate::messages;
use crate::payment::PaymentToggle;
use crate::session::SalePhase;

/// How long the invoice modal stays open.
pub const INVOICE_MODAL_DISMISS: Duration = Duration::from_secs(5);

/// Everything the session needs from its host page.
pub trait CaisseView {
    /// Redraw the register from scratch.
    fn render(&mut self, model: &CartViewModel);

    /// Show a transient notification.
    fn toast(&mut self, toast: Toast);

    /// Ask a yes/no question. Returns true on acceptance.
    fn confirm(&mut self, message: &str) -> bool;

    /// Display sale details, hiding them after `dismiss_after`.
    fn show_invoice(&mut self, sale: &SaleInfo, dismiss_after: Duration);

    /// Open a document (the printable invoice) outside the register.
    fn open_document(&mut self, url: &str);

    /// Leave the register for another page.
    fn navigate(&mut self, url: &str);
}

impl<V: CaisseView + ?Sized> CaisseView for &mut V {
    fn render(&mut self, model: &CartViewModel) {
        (**self).render(model)
    }

    fn toast(&mut self, toast: Toast) {
        (**self).toast(toast)
    }

    fn confirm(&mut self, message: &str) -> bool {
        (**self).confirm(message)
    }

    fn show_invoice(&mut self, sale: &SaleInfo, dismiss_after: Duration) {
        (**self).show_invoice(sale, dismiss_after)
    }

    fn open_document(&mut self, url: &str) {
        (**self).open_document(url)
    }

    fn navigate(&mut self, url: &str) {
        (**self).navigate(url)
    }
}

/// One rendered cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineView {
    /// Position in the cart, used by line controls.
    pub index: usize,
    pub sku: Sku,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    /// The minus control does nothing at quantity 1.
    pub can_decrement: bool,
}

/// State of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ButtonState {
    pub enabled: bool,
    pub label: &'static str,
}

impl ButtonState {
    fn new(enabled: bool, label: &'static str) -> Self {
        Self { enabled, label }
    }
}

/// Snapshot of the register screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartViewModel {
    pub lines: Vec<LineView>,
    /// Cart badge: total units.
    pub item_count: u64,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub phase: SalePhase,
    pub payment_mode: PaymentMode,
    pub cash_fields_visible: bool,
    pub cash_received: String,
    pub finalize: ButtonState,
    pub generate_invoice: ButtonState,
    pub print_invoice: ButtonState,
}

impl CartViewModel {
    /// Project the session state.
    pub fn project(
        cart: &Cart,
        payment: &PaymentToggle,
        phase: SalePhase,
        invoice_actions: bool,
    ) -> Self {
        let lines = cart
            .items()
            .iter()
            .enumerate()
            .map(|(index, item)| LineView {
                index,
                sku: item.sku.clone(),
                name: item.name.clone(),
                quantity: item.quantity,
                unit_price: item.unit_price.display(),
                line_total: item.line_total().display(),
                can_decrement: item.quantity > 1,
            })
            .collect();

        let totals = cart.totals();
        let finalize = match phase {
            SalePhase::Open => ButtonState::new(!cart.is_empty(), messages::FINALIZE_LABEL),
            SalePhase::Submitting => ButtonState::new(false, messages::FINALIZING_LABEL),
            SalePhase::Finalized => ButtonState::new(false, messages::FINALIZED_LABEL),
        };

        Self {
            lines,
            item_count: cart.item_count(),
            subtotal: totals.subtotal.display(),
            tax: totals.tax.display(),
            total: totals.total.display(),
            phase,
            payment_mode: payment.mode().clone(),
            cash_fields_visible: payment.cash_fields_visible(),
            cash_received: payment.cash_text().to_string(),
            finalize,
            generate_invoice: ButtonState::new(invoice_actions, messages::INVOICE_LABEL),
            print_invoice: ButtonState::new(invoice_actions, messages::PRINT_LABEL),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
