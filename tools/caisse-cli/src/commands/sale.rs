//! One-shot lookups of recorded sales.

use anyhow::{Context as _, Result};
use caisse_commerce::SaleId;
use caisse_data::CheckoutGateway;

use super::SaleArgs;
use crate::context::Context;
use crate::terminal::print_sale;

/// Print the invoice data of a sale.
pub async fn info(args: SaleArgs, ctx: &Context) -> Result<()> {
    let gateway = ctx.gateway()?;
    let sale_id = SaleId::new(args.sale_id);

    let spinner = ctx.output.spinner("Chargement de la vente...");
    let result = gateway.fetch_sale_info(&sale_id).await;
    spinner.finish_and_clear();

    let sale = result.with_context(|| format!("Failed to fetch sale {}", sale_id))?;
    print_sale(&ctx.output, &sale);
    Ok(())
}

/// Print the address of the printable invoice.
pub async fn invoice_url(args: SaleArgs, ctx: &Context) -> Result<()> {
    let gateway = ctx.gateway()?;
    let url = gateway.invoice_url(&SaleId::new(args.sale_id));

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "url": url }));
    } else {
        println!("{}", url);
    }
    Ok(())
}
