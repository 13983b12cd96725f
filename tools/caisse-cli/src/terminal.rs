//! Terminal rendition of the register screen.

use std::time::Duration;

use caisse_commerce::checkout::SaleInfo;
use caisse_ui::chrome::Toast;
use caisse_ui::{CaisseView, CartViewModel};
use dialoguer::Confirm;
use tracing::warn;

use crate::output::{action_badge, Output};

const LINE_WIDTHS: [usize; 5] = [3, 28, 5, 10, 10];

/// Draws the register on stdout and asks questions on the terminal.
pub struct TerminalView {
    output: Output,
    /// Answer every confirmation with yes.
    assume_yes: bool,
}

impl TerminalView {
    pub fn new(output: Output, assume_yes: bool) -> Self {
        Self { output, assume_yes }
    }
}

impl CaisseView for TerminalView {
    fn render(&mut self, model: &CartViewModel) {
        if self.output.is_json() {
            self.output.json(model);
            return;
        }

        self.output.header(&format!("Panier ({} articles)", model.item_count));
        if model.is_empty() {
            self.output.info(caisse_ui::messages::EMPTY_CART);
        } else {
            self.output
                .table_row(&["#", "Produit", "Qté", "PU", "Total"], &LINE_WIDTHS);
            for line in &model.lines {
                let number = (line.index + 1).to_string();
                let quantity = line.quantity.to_string();
                self.output.table_row(
                    &[&number, &line.name, &quantity, &line.unit_price, &line.line_total],
                    &LINE_WIDTHS,
                );
            }
        }

        self.output.kv("Sous-total", &model.subtotal);
        self.output.kv("TVA", &model.tax);
        self.output.kv("Total", &model.total);
        self.output.kv("Paiement", model.payment_mode.code());
        if model.cash_fields_visible {
            let cash = if model.cash_received.is_empty() {
                "-"
            } else {
                model.cash_received.as_str()
            };
            self.output.kv("Espèces reçues", cash);
        }

        let actions = [
            action_badge(model.finalize.label, model.finalize.enabled),
            action_badge(model.generate_invoice.label, model.generate_invoice.enabled),
            action_badge(model.print_invoice.label, model.print_invoice.enabled),
        ];
        self.output.kv("Actions", &actions.join(" | "));
    }

    fn toast(&mut self, toast: Toast) {
        self.output.toast(&toast);
    }

    fn confirm(&mut self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        match Confirm::new().with_prompt(message).default(false).interact() {
            Ok(answer) => answer,
            Err(e) => {
                warn!(error = %e, "confirmation prompt failed");
                false
            }
        }
    }

    fn show_invoice(&mut self, sale: &SaleInfo, _dismiss_after: Duration) {
        print_sale(&self.output, sale);
    }

    fn open_document(&mut self, url: &str) {
        if self.output.is_json() {
            self.output.json(&serde_json::json!({ "document": url }));
            return;
        }
        self.output.info(&format!("Facture : {}", url));
    }

    fn navigate(&mut self, url: &str) {
        if self.output.is_json() {
            self.output.json(&serde_json::json!({ "navigate": url }));
            return;
        }
        self.output.info(&format!("Redirection : {}", url));
    }
}

const SALE_WIDTHS: [usize; 4] = [28, 5, 10, 10];

/// Print the details of a recorded sale.
pub fn print_sale(output: &Output, sale: &SaleInfo) {
    if output.is_json() {
        output.json(sale);
        return;
    }

    output.header(&format!("Facture {}", sale.invoice_number));
    let date = match sale.parsed_date() {
        Ok(date) => date.format("%d/%m/%Y à %Hh%M").to_string(),
        Err(_) => sale.date.clone(),
    };
    output.kv("Date", &date);
    output.kv("Caissier", &sale.cashier);
    output.kv("Client", &sale.customer);

    output.table_row(&["Produit", "Qté", "PU", "Total"], &SALE_WIDTHS);
    for line in &sale.items {
        let quantity = line.quantity.to_string();
        let unit_price = line.unit_price().display();
        let line_total = line.line_total.display();
        output.table_row(
            &[&line.product, &quantity, &unit_price, &line_total],
            &SALE_WIDTHS,
        );
    }
    output.kv("Total", &sale.total_amount.display());
}
