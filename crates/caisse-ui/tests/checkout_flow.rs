//! Register flows driven against an in-memory store server.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use caisse_ui::prelude::*;

#[derive(Default)]
struct RecordingView {
    renders: Vec<CartViewModel>,
    toasts: Vec<Toast>,
    prompts: Vec<String>,
    answer: bool,
    invoices: Vec<(SaleInfo, Duration)>,
    documents: Vec<String>,
    navigations: Vec<String>,
}

impl RecordingView {
    fn accepting() -> Self {
        Self {
            answer: true,
            ..Self::default()
        }
    }

    fn last_toast(&self) -> &Toast {
        self.toasts.last().expect("no toast shown")
    }

    fn last_render(&self) -> &CartViewModel {
        self.renders.last().expect("nothing rendered")
    }
}

impl CaisseView for RecordingView {
    fn render(&mut self, model: &CartViewModel) {
        self.renders.push(model.clone());
    }

    fn toast(&mut self, toast: Toast) {
        self.toasts.push(toast);
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.prompts.push(message.to_string());
        self.answer
    }

    fn show_invoice(&mut self, sale: &SaleInfo, dismiss_after: Duration) {
        self.invoices.push((sale.clone(), dismiss_after));
    }

    fn open_document(&mut self, url: &str) {
        self.documents.push(url.to_string());
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }
}

/// Answers checkouts from a script and records what was sent.
#[derive(Default)]
struct ScriptedServer {
    checkouts: Mutex<VecDeque<Result<CheckoutReceipt, GatewayError>>>,
    sale_info: Mutex<VecDeque<Result<SaleInfo, GatewayError>>>,
    sent: Mutex<Vec<CheckoutRequest>>,
}

impl ScriptedServer {
    fn accepting(sale_id: &str) -> Self {
        let server = Self::default();
        server.push_checkout(Ok(receipt(sale_id)));
        server
    }

    fn push_checkout(&self, outcome: Result<CheckoutReceipt, GatewayError>) {
        self.checkouts.lock().unwrap().push_back(outcome);
    }

    fn push_sale_info(&self, outcome: Result<SaleInfo, GatewayError>) {
        self.sale_info.lock().unwrap().push_back(outcome);
    }

    fn sent(&self) -> Vec<CheckoutRequest> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl CheckoutGateway for ScriptedServer {
    async fn submit_checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReceipt, GatewayError> {
        self.sent.lock().unwrap().push(request.clone());
        self.checkouts
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted answer".into())))
    }

    async fn fetch_sale_info(&self, _sale_id: &SaleId) -> Result<SaleInfo, GatewayError> {
        self.sale_info
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Transport("no scripted answer".into())))
    }

    fn invoice_url(&self, sale_id: &SaleId) -> String {
        format!("/core/caisse/generate-invoice/?sale_id={sale_id}")
    }
}

fn eur(cents: i64) -> Money {
    Money::new(cents, Currency::EUR)
}

fn receipt(sale_id: &str) -> CheckoutReceipt {
    CheckoutReceipt {
        sale_id: Some(SaleId::new(sale_id)),
        redirect_url: Some(format!("/core/sales/{sale_id}/")),
        ..CheckoutReceipt::default()
    }
}

fn sale_info() -> SaleInfo {
    serde_json::from_value(serde_json::json!({
        "invoice_number": "FAC-2025-0042",
        "date": "03/02/2025 14:30",
        "cashier": "Awa Diop",
        "customer": "Client",
        "total_amount": "12.00",
        "items": [{"product": "Miel", "quantity": 1, "line_total": 10.0}]
    }))
    .unwrap()
}

type Session = CartSession<RecordingView, ScriptedServer>;

/// A session holding one 10.00 € product, paid by card.
fn card_session(server: ScriptedServer) -> Session {
    let mut session = CartSession::new(RecordingView::accepting(), server);
    session.add_item("7", "Miel", eur(1000));
    session.select_payment_mode(PaymentMode::Card);
    session
}

#[test]
fn adding_the_same_sku_increments_its_line() {
    let mut session = CartSession::new(RecordingView::default(), ScriptedServer::default());
    session.add_item("1", "Pain", eur(120));
    session.add_item("2", "Lait", eur(95));
    session.add_item("1", "Pain", eur(120));

    let items = session.cart().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].quantity, 2);
    assert_eq!(session.view().last_render().item_count, 3);
}

#[test]
fn totals_apply_twenty_percent_tax() {
    let mut session = CartSession::new(RecordingView::default(), ScriptedServer::default());
    session.add_item("1", "Miel", eur(1000));

    let totals = session.totals();
    assert_eq!(totals.subtotal, eur(1000));
    assert_eq!(totals.tax, eur(200));
    assert_eq!(totals.total, eur(1200));

    let view = session.view().last_render();
    assert_eq!(view.total, "12.00 €");
}

#[tokio::test]
async fn insufficient_cash_sends_nothing() {
    let mut session = CartSession::new(RecordingView::default(), ScriptedServer::accepting("1"));
    session.add_item("7", "Miel", eur(1000));
    session.set_cash_received("10");

    let err = session.checkout().await.unwrap_err();

    assert!(matches!(err, SessionError::InsufficientCash { .. }));
    assert!(session.gateway().sent().is_empty());
    assert_eq!(session.view().last_toast(), &Toast::danger("Montant en espèces insuffisant."));
    assert_eq!(session.phase(), SalePhase::Open);
}

#[tokio::test]
async fn exact_cash_is_enough() {
    let mut session = CartSession::new(RecordingView::default(), ScriptedServer::accepting("1"));
    session.add_item("7", "Miel", eur(1000));
    session.set_cash_received("12.00");

    session.checkout().await.unwrap();

    let sent = session.gateway().sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].payment_mode, PaymentMode::Cash);
    assert_eq!(sent[0].cash_received, 12.0);
}

#[tokio::test]
async fn card_checkout_sends_no_cash() {
    let mut session = card_session(ScriptedServer::accepting("1"));
    session.checkout().await.unwrap();

    let sent = session.gateway().sent();
    assert_eq!(sent[0].cash_received, 0.0);
    assert_eq!(sent[0].items[0].qty, 1);
    assert_eq!(sent[0].items[0].price, 10.0);
}

#[tokio::test]
async fn successful_checkout_finalizes_the_sale() {
    let mut session = card_session(ScriptedServer::accepting("42"));

    let receipt = session.checkout().await.unwrap();

    assert_eq!(receipt.sale_id, Some(SaleId::new("42")));
    assert_eq!(session.phase(), SalePhase::Finalized);
    assert_eq!(session.last_sale(), Some(&SaleId::new("42")));
    assert_eq!(session.view().last_toast(), &Toast::success("Vente finalisée avec succès !"));

    let view = session.view().last_render();
    assert!(!view.finalize.enabled);
    assert!(view.generate_invoice.enabled);
    assert!(view.print_invoice.enabled);
    assert!(session.view().navigations.is_empty());
}

#[tokio::test]
async fn server_message_replaces_default_confirmation() {
    let server = ScriptedServer::default();
    server.push_checkout(Ok(CheckoutReceipt {
        message: Some("Vente FAC-0042 enregistrée".into()),
        ..receipt("42")
    }));
    let mut session = card_session(server);

    session.checkout().await.unwrap();
    assert_eq!(session.view().last_toast(), &Toast::success("Vente FAC-0042 enregistrée"));
}

#[tokio::test]
async fn server_toast_type_sets_the_confirmation_level() {
    let server = ScriptedServer::default();
    server.push_checkout(Ok(CheckoutReceipt {
        message: Some("Vente enregistrée, stock bas".into()),
        toast_type: Some("warning".into()),
        ..receipt("42")
    }));
    server.push_checkout(Ok(CheckoutReceipt {
        toast_type: Some("confetti".into()),
        ..receipt("43")
    }));
    let mut session = card_session(server);

    session.checkout().await.unwrap();
    assert_eq!(
        session.view().last_toast(),
        &Toast::new("Vente enregistrée, stock bas", ToastLevel::Warning)
    );

    session.increment(0);
    session.checkout().await.unwrap();
    assert_eq!(session.view().last_toast().level, ToastLevel::Success);
}

#[tokio::test]
async fn finalize_is_blocked_until_the_cart_changes() {
    let server = ScriptedServer::accepting("1");
    server.push_checkout(Ok(receipt("2")));
    let mut session = card_session(server);
    session.checkout().await.unwrap();

    let err = session.checkout().await.unwrap_err();
    assert_eq!(err, SessionError::AlreadyFinalized);
    assert_eq!(session.gateway().sent().len(), 1);

    session.increment(0);
    assert_eq!(session.phase(), SalePhase::Open);
    assert!(session.view().last_render().finalize.enabled);

    session.checkout().await.unwrap();
    assert_eq!(session.gateway().sent().len(), 2);
    assert_eq!(session.last_sale(), Some(&SaleId::new("2")));
}

#[tokio::test]
async fn unchanged_quantity_keeps_the_sale_finalized() {
    let server = ScriptedServer::accepting("42");
    server.push_checkout(Ok(receipt("43")));
    let mut session = card_session(server);
    session.checkout().await.unwrap();
    let renders = session.view().renders.len();

    assert!(!session.set_quantity_text(0, "1"));
    assert!(!session.set_quantity(0, 0));
    assert!(!session.decrement(0));

    assert_eq!(session.view().renders.len(), renders + 3);
    assert_eq!(session.phase(), SalePhase::Finalized);
    assert!(!session.view().last_render().finalize.enabled);

    let err = session.checkout().await.unwrap_err();
    assert_eq!(err, SessionError::AlreadyFinalized);
    assert_eq!(session.gateway().sent().len(), 1);
    assert_eq!(session.last_sale(), Some(&SaleId::new("42")));
}

#[test]
fn large_quantities_are_not_capped() {
    let mut session = CartSession::new(RecordingView::default(), ScriptedServer::default());
    session.add_item("1", "Pain", eur(120));

    assert!(session.set_quantity_text(0, "12000"));
    session.add_item("1", "Pain", eur(120));

    assert_eq!(session.cart().items()[0].quantity, 12_001);
    assert_eq!(session.view().last_render().item_count, 12_001);
}

#[tokio::test]
async fn rejected_checkout_keeps_the_cart_and_can_be_retried() {
    let server = ScriptedServer::default();
    server.push_checkout(Err(GatewayError::Rejected(Some("Stock insuffisant".into()))));
    server.push_checkout(Ok(receipt("9")));
    let mut session = card_session(server);

    let err = session.checkout().await.unwrap_err();
    assert!(matches!(err, SessionError::Gateway(GatewayError::Rejected(_))));
    assert_eq!(session.view().last_toast(), &Toast::danger("Stock insuffisant"));
    assert_eq!(session.phase(), SalePhase::Open);
    assert_eq!(session.cart().len(), 1);
    assert!(!session.invoice_actions_enabled());

    session.checkout().await.unwrap();
    assert_eq!(session.phase(), SalePhase::Finalized);
}

#[tokio::test]
async fn rejection_without_reason_uses_generic_message() {
    let server = ScriptedServer::default();
    server.push_checkout(Err(GatewayError::Rejected(None)));
    let mut session = card_session(server);

    session.checkout().await.unwrap_err();
    assert_eq!(session.view().last_toast(), &Toast::danger("Erreur lors de la finalisation."));
}

#[tokio::test]
async fn transport_failure_shows_network_error() {
    let server = ScriptedServer::default();
    server.push_checkout(Err(GatewayError::Timeout("10s".into())));
    let mut session = card_session(server);

    session.checkout().await.unwrap_err();
    assert_eq!(session.view().last_toast(), &Toast::danger("Erreur réseau. Veuillez réessayer."));
    assert!(!session.is_in_flight());
    assert!(session.view().last_render().finalize.enabled);
}

#[test]
fn second_begin_while_in_flight_is_rejected() {
    let mut session = card_session(ScriptedServer::default());

    let ticket = session.begin_checkout().unwrap();
    assert_eq!(session.phase(), SalePhase::Submitting);
    assert!(!session.view().last_render().finalize.enabled);

    let err = session.begin_checkout().unwrap_err();
    assert_eq!(err, SessionError::CheckoutInFlight);

    session.finish_checkout(ticket, Ok(receipt("5"))).unwrap();
    assert!(!session.is_in_flight());
    assert_eq!(session.phase(), SalePhase::Finalized);
}

#[test]
fn edits_during_checkout_leave_the_sale_open() {
    let mut session = card_session(ScriptedServer::default());

    let ticket = session.begin_checkout().unwrap();
    session.add_item("8", "Confiture", eur(450));
    session.finish_checkout(ticket, Ok(receipt("5"))).unwrap();

    assert_eq!(session.phase(), SalePhase::Open);
    assert_eq!(session.last_sale(), Some(&SaleId::new("5")));
    assert!(session.invoice_actions_enabled());
}

#[test]
fn ticket_from_another_session_is_ignored() {
    let mut front = card_session(ScriptedServer::default());
    let mut back = card_session(ScriptedServer::default());

    let foreign = front.begin_checkout().unwrap();
    let own = back.begin_checkout().unwrap();

    assert_eq!(back.finish_checkout(foreign, Ok(receipt("6"))).unwrap_err(), SessionError::StaleTicket);
    assert!(back.is_in_flight());
    assert_eq!(back.last_sale(), None);

    back.finish_checkout(own, Ok(receipt("7"))).unwrap();
    assert_eq!(back.last_sale(), Some(&SaleId::new("7")));
    assert!(front.is_in_flight());
}

#[test]
fn success_without_sale_id_leaves_invoice_actions_off() {
    let mut session = card_session(ScriptedServer::default());

    let ticket = session.begin_checkout().unwrap();
    session
        .finish_checkout(
            ticket,
            Ok(CheckoutReceipt {
                sale_id: None,
                ..CheckoutReceipt::default()
            }),
        )
        .unwrap();

    assert_eq!(session.phase(), SalePhase::Finalized);
    assert!(!session.invoice_actions_enabled());
}

#[tokio::test]
async fn redirect_mode_follows_the_server() {
    let options = SessionOptions {
        on_success: OnSuccess::Redirect,
        payment_mode: PaymentMode::Card,
        ..SessionOptions::default()
    };
    let mut session = CartSession::with_options(RecordingView::default(), ScriptedServer::accepting("3"), options);
    session.add_item("7", "Miel", eur(1000));

    session.checkout().await.unwrap();
    assert_eq!(session.view().navigations, vec!["/core/sales/3/".to_string()]);
}

#[tokio::test]
async fn show_invoice_displays_sale_details() {
    let server = ScriptedServer::accepting("42");
    server.push_sale_info(Ok(sale_info()));
    server.push_sale_info(Ok(sale_info()));
    let mut session = card_session(server);
    session.checkout().await.unwrap();

    let info = session.show_invoice().await.unwrap();
    assert_eq!(info.invoice_number, "FAC-2025-0042");
    assert_eq!(info.items[0].unit_price(), eur(1000));

    let view = session.view();
    assert_eq!(view.invoices.len(), 1);
    assert_eq!(view.invoices[0].1, Duration::from_secs(5));
    assert_eq!(view.last_toast(), &Toast::success("Facture générée avec succès !"));

    session.show_invoice().await.unwrap();
    assert_eq!(session.view().invoices.len(), 2);
}

#[tokio::test]
async fn show_invoice_failure_is_reported() {
    let server = ScriptedServer::accepting("42");
    server.push_sale_info(Err(GatewayError::Http {
        status: 500,
        url: "/core/caisse/sale-info/".into(),
    }));
    let mut session = card_session(server);
    session.checkout().await.unwrap();

    session.show_invoice().await.unwrap_err();
    assert_eq!(
        session.view().last_toast(),
        &Toast::danger("Erreur lors de la génération de la facture.")
    );
    assert!(session.invoice_actions_enabled());
}

#[tokio::test]
async fn post_sale_actions_need_a_sale() {
    let mut session = card_session(ScriptedServer::default());

    assert_eq!(session.show_invoice().await.unwrap_err(), SessionError::NoSale);
    assert_eq!(session.print_invoice().unwrap_err(), SessionError::NoSale);
    assert_eq!(session.view().last_toast(), &Toast::danger("Aucune vente sélectionnée."));
    assert!(session.view().documents.is_empty());
}

#[tokio::test]
async fn printing_disables_invoice_actions() {
    let mut session = card_session(ScriptedServer::accepting("42"));
    session.checkout().await.unwrap();

    let url = session.print_invoice().unwrap();
    assert_eq!(url, "/core/caisse/generate-invoice/?sale_id=42");
    assert_eq!(session.view().documents, vec![url]);

    let view = session.view().last_render();
    assert!(!view.generate_invoice.enabled);
    assert!(!view.print_invoice.enabled);
    assert_eq!(session.print_invoice().unwrap_err(), SessionError::NoSale);
}

#[tokio::test]
async fn clearing_forgets_the_sale() {
    let mut session = card_session(ScriptedServer::accepting("42"));
    session.checkout().await.unwrap();

    assert!(session.clear());
    assert_eq!(session.view().prompts, vec!["Vider entièrement le panier ?".to_string()]);
    assert!(session.cart().is_empty());
    assert_eq!(session.last_sale(), None);
    assert_eq!(session.phase(), SalePhase::Open);

    let view = session.view().last_render();
    assert_eq!(view.item_count, 0);
    assert!(!view.finalize.enabled);
    assert!(!view.print_invoice.enabled);
}

#[test]
fn declined_clear_changes_nothing() {
    let mut session = CartSession::new(RecordingView::default(), ScriptedServer::default());
    session.add_item("1", "Pain", eur(120));
    let renders = session.view().renders.len();

    assert!(!session.clear());
    assert_eq!(session.cart().len(), 1);
    assert_eq!(session.view().renders.len(), renders);
}

#[tokio::test]
async fn empty_cart_checkout_is_refused() {
    let mut session = CartSession::new(RecordingView::default(), ScriptedServer::accepting("1"));

    assert_eq!(session.checkout().await.unwrap_err(), SessionError::EmptyCart);
    assert!(session.gateway().sent().is_empty());
    assert_eq!(session.view().last_toast(), &Toast::danger("Le panier est vide."));
}
