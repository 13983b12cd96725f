//! The cart session of the register screen.

use caisse_commerce::cart::{parse_quantity, CartTotals, LineItem, TaxRate};
use caisse_commerce::checkout::{CheckoutRequest, PaymentMode, SaleInfo};
use caisse_commerce::{Cart, Currency, Money, SaleId, Sku};
use caisse_data::{CheckoutGateway, CheckoutReceipt, GatewayError};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, info, warn};

use crate::chrome::{Toast, ToastLevel};
use crate::error::SessionError;
use crate::messages;
use crate::payment::PaymentToggle;
use crate::view::{CaisseView, CartViewModel, INVOICE_MODAL_DISMISS};

/// Where the current sale stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SalePhase {
    /// No recorded sale matches the cart contents.
    #[default]
    Open,
    /// A checkout request is in flight.
    Submitting,
    /// The server recorded the cart as a sale.
    Finalized,
}

/// What the register does after a recorded sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnSuccess {
    /// Keep the register open with the invoice actions enabled.
    #[default]
    Stay,
    /// Follow the `redirect_url` supplied by the server.
    Redirect,
}

/// Session settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    pub currency: Currency,
    pub tax_rate: TaxRate,
    pub payment_mode: PaymentMode,
    pub on_success: OnSuccess,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            currency: Currency::EUR,
            tax_rate: TaxRate::default(),
            payment_mode: PaymentMode::Cash,
            on_success: OnSuccess::Stay,
        }
    }
}

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// A checkout accepted by [`CartSession::begin_checkout`].
///
/// Hand it back to [`CartSession::finish_checkout`] with the gateway outcome.
#[derive(Debug)]
pub struct CheckoutTicket {
    id: u64,
    revision: u64,
    request: CheckoutRequest,
}

impl CheckoutTicket {
    /// The request to send.
    pub fn request(&self) -> &CheckoutRequest {
        &self.request
    }
}

/// The in-progress sale: cart, payment selection and post-sale state.
///
/// Every mutation re-renders the whole register through the view.
pub struct CartSession<V, G> {
    cart: Cart,
    payment: PaymentToggle,
    on_success: OnSuccess,
    /// Bumped on every cart change that alters a line.
    revision: u64,
    /// Cart revision recorded by the last successful checkout.
    finalized_revision: Option<u64>,
    in_flight: Option<u64>,
    last_sale: Option<SaleId>,
    invoice_actions: bool,
    view: V,
    gateway: G,
}

impl<V: CaisseView, G: CheckoutGateway> CartSession<V, G> {
    pub fn new(view: V, gateway: G) -> Self {
        Self::with_options(view, gateway, SessionOptions::default())
    }

    pub fn with_options(view: V, gateway: G, options: SessionOptions) -> Self {
        Self {
            cart: Cart::with_tax_rate(options.currency, options.tax_rate),
            payment: PaymentToggle::new(options.payment_mode),
            on_success: options.on_success,
            revision: 0,
            finalized_revision: None,
            in_flight: None,
            last_sale: None,
            invoice_actions: false,
            view,
            gateway,
        }
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add one unit of a product. Negative prices count as zero.
    ///
    /// Returns the index of the line holding the product.
    pub fn add_item(&mut self, sku: impl Into<Sku>, name: impl Into<String>, unit_price: Money) -> usize {
        let sku = sku.into();
        debug!(sku = %sku, "add item");
        let units = self.cart.item_count();
        let index = self.cart.add_item(sku, name, unit_price);
        let updated = self.cart.item_count() != units;
        self.apply(updated);
        index
    }

    /// Add one unit of a product whose price comes from page text.
    pub fn add_item_text(&mut self, sku: impl Into<Sku>, name: impl Into<String>, price: &str) -> usize {
        let unit_price = Money::parse_lenient(price, self.cart.currency());
        self.add_item(sku, name, unit_price)
    }

    /// Set the quantity of a line, at least 1.
    ///
    /// Returns false when the line is missing or already at that quantity.
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> bool {
        let updated = self.cart.set_quantity(index, quantity);
        self.apply(updated)
    }

    /// Set the quantity of a line from the quantity input.
    pub fn set_quantity_text(&mut self, index: usize, quantity: &str) -> bool {
        self.set_quantity(index, i64::from(parse_quantity(quantity)))
    }

    pub fn increment(&mut self, index: usize) -> bool {
        let updated = self.cart.increment(index);
        self.apply(updated)
    }

    /// Remove one unit. A line at quantity 1 is left as is.
    pub fn decrement(&mut self, index: usize) -> bool {
        let updated = self.cart.decrement(index);
        self.apply(updated)
    }

    pub fn remove_item(&mut self, index: usize) -> Option<LineItem> {
        let removed = self.cart.remove_item(index);
        if let Some(item) = &removed {
            debug!(sku = %item.sku, "remove item");
        }
        self.apply(removed.is_some());
        removed
    }

    /// Empty the cart after the cashier confirms.
    ///
    /// Also forgets the last sale. Returns false when declined.
    pub fn clear(&mut self) -> bool {
        if !self.view.confirm(messages::CONFIRM_CLEAR_CART) {
            return false;
        }
        info!(lines = self.cart.len(), "cart cleared");
        self.cart.clear();
        self.last_sale = None;
        self.invoice_actions = false;
        self.finalized_revision = None;
        self.changed();
        true
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // =========================================================================
    // Payment
    // =========================================================================

    pub fn select_payment_mode(&mut self, mode: PaymentMode) {
        debug!(mode = %mode, "payment mode selected");
        self.payment.select(mode);
        self.render();
    }

    /// Store the cash amount as typed.
    pub fn set_cash_received(&mut self, text: impl Into<String>) {
        self.payment.set_cash_text(text);
        self.render();
    }

    pub fn payment(&self) -> &PaymentToggle {
        &self.payment
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    pub fn phase(&self) -> SalePhase {
        if self.in_flight.is_some() {
            SalePhase::Submitting
        } else if self.finalized_revision == Some(self.revision) {
            SalePhase::Finalized
        } else {
            SalePhase::Open
        }
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validate the cart and mark a checkout as in flight.
    ///
    /// Failures are toasted and nothing is marked.
    pub fn begin_checkout(&mut self) -> Result<CheckoutTicket, SessionError> {
        if let Err(err) = self.check_can_finalize() {
            debug!(error = %err, "checkout refused");
            self.notify_error(&err);
            return Err(err);
        }

        let currency = self.cart.currency();
        let request = CheckoutRequest::from_cart(
            &self.cart,
            self.payment.mode().clone(),
            self.payment.cash_received(currency),
        );
        let id = NEXT_TICKET.fetch_add(1, Ordering::Relaxed);
        self.in_flight = Some(id);

        info!(
            items = request.items.len(),
            units = request.unit_count(),
            payment_mode = %request.payment_mode,
            total = %self.cart.totals().total,
            "checkout started"
        );
        self.render();

        Ok(CheckoutTicket {
            id,
            revision: self.revision,
            request,
        })
    }

    /// Apply the gateway outcome of a checkout.
    pub fn finish_checkout(
        &mut self,
        ticket: CheckoutTicket,
        outcome: Result<CheckoutReceipt, GatewayError>,
    ) -> Result<CheckoutReceipt, SessionError> {
        if self.in_flight != Some(ticket.id) {
            warn!(ticket = ticket.id, "ignoring outcome of an unknown checkout");
            return Err(SessionError::StaleTicket);
        }
        self.in_flight = None;

        match outcome {
            Ok(receipt) => {
                info!(
                    sale_id = receipt.sale_id.as_ref().map(SaleId::as_str).unwrap_or("-"),
                    "sale recorded"
                );
                self.last_sale = receipt.sale_id.clone();
                self.invoice_actions = self.last_sale.is_some();
                self.finalized_revision = Some(ticket.revision);

                let message = receipt
                    .message
                    .clone()
                    .unwrap_or_else(|| messages::SALE_FINALIZED.to_string());
                let level = receipt
                    .toast_type
                    .as_deref()
                    .and_then(ToastLevel::from_name)
                    .unwrap_or(ToastLevel::Success);
                self.view.toast(Toast::new(message, level));
                self.render();

                if self.on_success == OnSuccess::Redirect {
                    if let Some(url) = &receipt.redirect_url {
                        self.view.navigate(url);
                    }
                }
                Ok(receipt)
            }
            Err(err) => {
                if err.is_network() {
                    error!(error = %err, "checkout request failed");
                } else {
                    warn!(error = %err, "checkout not recorded");
                }
                let err = SessionError::Gateway(err);
                self.notify_error(&err);
                self.render();
                Err(err)
            }
        }
    }

    /// Validate, submit and apply the outcome in one call.
    pub async fn checkout(&mut self) -> Result<CheckoutReceipt, SessionError> {
        let ticket = self.begin_checkout()?;
        let outcome = self.gateway.submit_checkout(ticket.request()).await;
        self.finish_checkout(ticket, outcome)
    }

    fn check_can_finalize(&self) -> Result<(), SessionError> {
        if self.in_flight.is_some() {
            return Err(SessionError::CheckoutInFlight);
        }
        if self.phase() == SalePhase::Finalized {
            return Err(SessionError::AlreadyFinalized);
        }
        if self.cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }
        if self.payment.mode().is_cash() {
            let required = self.cart.totals().total;
            let received = self.payment.cash_received(self.cart.currency());
            if received.amount_cents < required.amount_cents {
                return Err(SessionError::InsufficientCash { required, received });
            }
        }
        Ok(())
    }

    // =========================================================================
    // Post-sale
    // =========================================================================

    /// Sale recorded by the last successful checkout.
    pub fn last_sale(&self) -> Option<&SaleId> {
        self.last_sale.as_ref()
    }

    pub fn invoice_actions_enabled(&self) -> bool {
        self.invoice_actions && self.last_sale.is_some()
    }

    /// Fetch the sale details and show them. Can be repeated.
    pub async fn show_invoice(&mut self) -> Result<SaleInfo, SessionError> {
        let sale_id = self.post_sale_target()?;
        match self.gateway.fetch_sale_info(&sale_id).await {
            Ok(info) => {
                info!(sale_id = %sale_id, invoice = %info.invoice_number, "invoice shown");
                self.view.show_invoice(&info, INVOICE_MODAL_DISMISS);
                self.view.toast(Toast::success(messages::INVOICE_GENERATED));
                Ok(info)
            }
            Err(err) => {
                error!(sale_id = %sale_id, error = %err, "sale info request failed");
                self.view.toast(Toast::danger(messages::INVOICE_FAILED));
                Err(SessionError::Gateway(err))
            }
        }
    }

    /// Open the printable invoice, then disable both invoice actions.
    ///
    /// Returns the document address.
    pub fn print_invoice(&mut self) -> Result<String, SessionError> {
        let sale_id = self.post_sale_target()?;
        let url = self.gateway.invoice_url(&sale_id);
        info!(sale_id = %sale_id, "invoice printed");
        self.view.open_document(&url);
        self.invoice_actions = false;
        self.render();
        Ok(url)
    }

    fn post_sale_target(&mut self) -> Result<SaleId, SessionError> {
        match (&self.last_sale, self.invoice_actions) {
            (Some(sale_id), true) => Ok(sale_id.clone()),
            _ => {
                let err = SessionError::NoSale;
                self.notify_error(&err);
                Err(err)
            }
        }
    }

    // =========================================================================
    // View
    // =========================================================================

    /// Current projection of the session.
    pub fn view_model(&self) -> CartViewModel {
        CartViewModel::project(
            &self.cart,
            &self.payment,
            self.phase(),
            self.invoice_actions_enabled(),
        )
    }

    /// Redraw without changing anything.
    pub fn render(&mut self) {
        let model = self.view_model();
        self.view.render(&model);
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    fn apply(&mut self, updated: bool) -> bool {
        if updated {
            self.changed();
        } else {
            self.render();
        }
        updated
    }

    fn changed(&mut self) {
        self.revision += 1;
        self.render();
    }

    fn notify_error(&mut self, err: &SessionError) {
        self.view.toast(Toast::new(err.user_message(), err.level()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use caisse_commerce::checkout::SaleInfo;
    use std::time::Duration;

    #[derive(Default)]
    struct Screen {
        renders: Vec<CartViewModel>,
        toasts: Vec<Toast>,
        answer: bool,
    }

    impl CaisseView for Screen {
        fn render(&mut self, model: &CartViewModel) {
            self.renders.push(model.clone());
        }
        fn toast(&mut self, toast: Toast) {
            self.toasts.push(toast);
        }
        fn confirm(&mut self, _message: &str) -> bool {
            self.answer
        }
        fn show_invoice(&mut self, _sale: &SaleInfo, _dismiss_after: Duration) {}
        fn open_document(&mut self, _url: &str) {}
        fn navigate(&mut self, _url: &str) {}
    }

    struct Offline;

    #[async_trait]
    impl CheckoutGateway for Offline {
        async fn submit_checkout(&self, _request: &CheckoutRequest) -> Result<CheckoutReceipt, GatewayError> {
            Err(GatewayError::Transport("offline".into()))
        }
        async fn fetch_sale_info(&self, _sale_id: &SaleId) -> Result<SaleInfo, GatewayError> {
            Err(GatewayError::Transport("offline".into()))
        }
        fn invoice_url(&self, sale_id: &SaleId) -> String {
            format!("/invoice/{sale_id}")
        }
    }

    fn eur(cents: i64) -> Money {
        Money::new(cents, Currency::EUR)
    }

    #[test]
    fn test_every_mutation_renders() {
        let mut session = CartSession::new(Screen::default(), Offline);
        session.add_item("1", "Pain", eur(120));
        session.add_item("1", "Pain", eur(120));
        session.increment(0);
        session.decrement(0);
        session.set_quantity_text(0, "abc");

        let renders = &session.view().renders;
        assert_eq!(renders.len(), 5);
        assert_eq!(renders[1].item_count, 2);
        assert_eq!(renders[4].lines[0].quantity, 1);
        assert_eq!(session.cart().len(), 1);
    }

    #[test]
    fn test_out_of_range_index_is_a_no_op() {
        let mut session = CartSession::new(Screen::default(), Offline);
        session.add_item("1", "Pain", eur(120));

        assert!(!session.increment(3));
        assert!(!session.set_quantity(3, 5));
        assert!(session.remove_item(3).is_none());
        assert_eq!(session.cart().item_count(), 1);
    }

    #[test]
    fn test_text_price_is_coerced() {
        let mut session = CartSession::new(Screen::default(), Offline);
        session.add_item_text("1", "Pain", "abc");
        session.add_item_text("2", "Vin", "-4");
        session.add_item_text("3", "Fromage", "6.5");

        let prices: Vec<i64> = session
            .cart()
            .items()
            .iter()
            .map(|i| i.unit_price.amount_cents)
            .collect();
        assert_eq!(prices, vec![0, 0, 650]);
    }

    #[test]
    fn test_declined_clear_keeps_cart() {
        let mut session = CartSession::new(Screen::default(), Offline);
        session.add_item("1", "Pain", eur(120));

        assert!(!session.clear());
        assert_eq!(session.cart().len(), 1);

        session.view_mut().answer = true;
        assert!(session.clear());
        assert!(session.cart().is_empty());
        assert_eq!(session.phase(), SalePhase::Open);
    }

    #[test]
    fn test_empty_cart_checkout_is_refused() {
        let mut session = CartSession::new(Screen::default(), Offline);

        let err = session.begin_checkout().unwrap_err();
        assert_eq!(err, SessionError::EmptyCart);
        assert!(!session.is_in_flight());
        assert_eq!(session.view().toasts, vec![Toast::danger("Le panier est vide.")]);
    }

    #[test]
    fn test_leaving_cash_mode_clears_amount_and_hides_fields() {
        let mut session = CartSession::new(Screen::default(), Offline);
        session.set_cash_received("20");
        session.select_payment_mode(PaymentMode::Card);

        let last = session.view().renders.last().unwrap();
        assert!(!last.cash_fields_visible);
        assert_eq!(last.cash_received, "");
    }
}
