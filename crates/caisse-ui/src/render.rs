//! HTML renderers for the register screen.

use caisse_commerce::checkout::SaleInfo;

use crate::messages;
use crate::view::{ButtonState, CartViewModel, LineView};

/// Render the cart list.
pub fn render_cart_items(model: &CartViewModel) -> String {
    if model.is_empty() {
        return format!(
            r#"<ul id="cart-items" class="list-group">
    <li class="list-group-item text-center text-muted">{}<br>{}</li>
</ul>"#,
            empty_cart_title(),
            messages::EMPTY_CART_HINT
        );
    }

    let lines: Vec<String> = model.lines.iter().map(render_line).collect();
    format!(
        r#"<ul id="cart-items" class="list-group">
{}
</ul>"#,
        lines.join("\n")
    )
}

fn render_line(line: &LineView) -> String {
    let decrease_state = if line.can_decrement { "" } else { " disabled" };
    format!(
        r#"<li class="list-group-item d-flex flex-column" data-sku="{sku}">
    <div class="d-flex justify-content-between">
        <span class="product-name">{name}</span>
        <span class="line-total">{line_total}</span>
    </div>
    <div class="d-flex justify-content-end align-items-center mt-2">
        <button class="btn btn-sm btn-outline-secondary qty-btn mx-1" data-index="{index}" data-action="decrease"{decrease_state}>&minus;</button>
        <input type="number" min="1" class="form-control form-control-sm qty-input mx-1" value="{quantity}" data-index="{index}">
        <button class="btn btn-sm btn-outline-secondary qty-btn mx-1" data-index="{index}" data-action="increase">+</button>
        <button class="btn btn-sm btn-outline-danger remove-btn ms-3" data-index="{index}">&times;</button>
    </div>
</li>"#,
        sku = escape_html(line.sku.as_str()),
        name = escape_html(&line.name),
        line_total = escape_html(&line.line_total),
        index = line.index,
        quantity = line.quantity,
        decrease_state = decrease_state,
    )
}

fn empty_cart_title() -> &'static str {
    messages::EMPTY_CART.trim_end_matches('.')
}

/// Render the badge and totals block.
pub fn render_totals(model: &CartViewModel) -> String {
    format!(
        r#"<div class="cart-summary">
    <span id="cart-count" class="badge bg-primary">{count}</span>
    <dl class="cart-totals">
        <dt>Sous-total</dt><dd id="cart-subtotal">{subtotal}</dd>
        <dt>TVA (20%)</dt><dd id="cart-tax">{tax}</dd>
        <dt>Total</dt><dd id="cart-total">{total}</dd>
    </dl>
</div>"#,
        count = model.item_count,
        subtotal = escape_html(&model.subtotal),
        tax = escape_html(&model.tax),
        total = escape_html(&model.total),
    )
}

/// Render the payment block with the action buttons.
pub fn render_actions(model: &CartViewModel) -> String {
    let cash_fields = if model.cash_fields_visible {
        format!(
            r#"<div id="cash-fields">
        <input type="number" id="cash-received" class="form-control" min="0" step="0.01" value="{}">
    </div>"#,
            escape_html(&model.cash_received)
        )
    } else {
        String::new()
    };

    format!(
        r#"<div class="cart-actions" data-payment-mode="{mode}">
    {cash_fields}
    {finalize}
    {invoice}
    {print}
</div>"#,
        mode = escape_html(model.payment_mode.code()),
        cash_fields = cash_fields,
        finalize = render_button("finalize-sale", "btn-success", model.finalize),
        invoice = render_button("generate-invoice", "btn-primary", model.generate_invoice),
        print = render_button("print-invoice", "btn-primary", model.print_invoice),
    )
}

fn render_button(id: &str, enabled_class: &str, state: ButtonState) -> String {
    let (class, disabled) = if state.enabled {
        (enabled_class, "")
    } else {
        ("btn-outline-secondary", " disabled")
    };
    format!(
        r#"<button id="{id}" class="btn {class}"{disabled}>{label}</button>"#,
        id = id,
        class = class,
        disabled = disabled,
        label = escape_html(state.label),
    )
}

/// Render the whole register panel.
pub fn render_register(model: &CartViewModel) -> String {
    format!(
        r#"<section class="caisse-cart" data-phase="{phase}">
{items}
{totals}
{actions}
</section>"#,
        phase = phase_name(model),
        items = render_cart_items(model),
        totals = render_totals(model),
        actions = render_actions(model),
    )
}

fn phase_name(model: &CartViewModel) -> &'static str {
    use crate::session::SalePhase;
    match model.phase {
        SalePhase::Open => "open",
        SalePhase::Submitting => "submitting",
        SalePhase::Finalized => "finalized",
    }
}

/// Render the body of the invoice modal.
pub fn render_invoice(sale: &SaleInfo) -> String {
    let rows: Vec<String> = sale
        .items
        .iter()
        .map(|line| {
            format!(
                r#"<tr>
    <td>{product}</td>
    <td class="text-center">{quantity}</td>
    <td class="text-end">{unit_price}</td>
    <td class="text-end">{line_total}</td>
</tr>"#,
                product = escape_html(&line.product),
                quantity = line.quantity,
                unit_price = line.unit_price().display(),
                line_total = line.line_total.display(),
            )
        })
        .collect();

    format!(
        r#"<div class="invoice-details">
    <p>Facture <strong id="modal-invoice-number">{number}</strong></p>
    <p>Date : <span id="modal-invoice-date">{date}</span></p>
    <p>Caissier : <span id="modal-invoice-cashier">{cashier}</span></p>
    <p>Client : <span id="modal-invoice-customer">{customer}</span></p>
    <table class="table table-sm">
        <thead><tr><th>Produit</th><th class="text-center">Qté</th><th class="text-end">Prix unitaire</th><th class="text-end">Total</th></tr></thead>
        <tbody id="modal-invoice-items">
{rows}
        </tbody>
    </table>
    <p class="text-end">Total : <strong id="modal-invoice-total">{total}</strong></p>
</div>"#,
        number = escape_html(&sale.invoice_number),
        date = escape_html(&sale.date),
        cashier = escape_html(&sale.cashier),
        customer = escape_html(&sale.customer),
        rows = rows.join("\n"),
        total = sale.total_amount.display(),
    )
}

/// Escape text for element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
