//! Interactive register on the terminal.

use std::io::Write;

use anyhow::{Context as _, Result};
use caisse_commerce::checkout::PaymentMode;
use caisse_commerce::Sku;
use caisse_data::{
    register_category, register_page_number, register_search, CheckoutGateway, HttpGateway, Url,
};
use caisse_ui::catalog::{Catalog, CatalogQuery};
use caisse_ui::chrome::{self, Key, KeyChord, ShellAction};
use caisse_ui::{CaisseView, CartSession};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use super::RegisterArgs;
use crate::context::Context;
use crate::output::format_row;
use crate::terminal::TerminalView;

type Register = CartSession<TerminalView, HttpGateway>;

/// A line typed at the register prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterCommand {
    /// Show the current catalog page.
    List,
    /// Search products by name; resets the page.
    Search(String),
    Page(String),
    /// Filter by category; no argument clears the filter.
    Category(Option<String>),
    Add(String),
    /// Line numbers are 1-based as displayed.
    Quantity { line: usize, quantity: String },
    Increment(usize),
    Decrement(usize),
    Remove(usize),
    Clear,
    Mode(String),
    Cash(String),
    Pay,
    Invoice,
    Print,
    Show,
    Help,
    Close,
    Quit,
}

impl RegisterCommand {
    /// Parse a prompt line. Blank lines yield `None`.
    pub fn parse(input: &str) -> Result<Option<Self>, String> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }
        if let Some(chord) = parse_key(input) {
            return match chrome::resolve(chord) {
                Some(action) => Ok(Some(Self::from_action(action))),
                None => Err(format!("Raccourci inconnu : {}", input)),
            };
        }

        let (word, rest) = match input.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (input, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "ls" | "produits" => Self::List,
            "search" | "cherche" => Self::Search(rest.to_string()),
            "page" => Self::Page(required(rest, "page")?),
            "cat" | "categorie" => Self::Category((!rest.is_empty()).then(|| rest.to_string())),
            "add" | "ajoute" => Self::Add(required(rest, "sku")?),
            "qty" | "qte" => {
                let (line, quantity) = rest
                    .split_once(char::is_whitespace)
                    .ok_or_else(|| "Usage : qty <ligne> <quantité>".to_string())?;
                Self::Quantity {
                    line: parse_line(line)?,
                    quantity: quantity.trim().to_string(),
                }
            }
            "+" => Self::Increment(parse_line(rest)?),
            "-" => Self::Decrement(parse_line(rest)?),
            "rm" | "suppr" => Self::Remove(parse_line(rest)?),
            "clear" | "vider" => Self::Clear,
            "mode" => Self::Mode(required(rest, "mode")?),
            "cash" | "especes" => Self::Cash(rest.to_string()),
            "pay" | "finaliser" => Self::Pay,
            "invoice" | "facture" => Self::Invoice,
            "print" | "imprimer" => Self::Print,
            "show" | "panier" => Self::Show,
            "help" | "aide" | "?" => Self::Help,
            "quit" | "exit" | "quitter" => Self::Quit,
            other => return Err(format!("Commande inconnue : {}", other)),
        };
        Ok(Some(command))
    }

    fn from_action(action: ShellAction) -> Self {
        match action {
            ShellAction::ShowHelp => Self::Help,
            ShellAction::CloseModals => Self::Close,
            ShellAction::FocusSearch => Self::List,
            ShellAction::FinalizeSale => Self::Pay,
        }
    }
}

fn required(value: &str, name: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("Argument manquant : {}", name))
    } else {
        Ok(value.to_string())
    }
}

fn parse_line(value: &str) -> Result<usize, String> {
    match value.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(format!("Numéro de ligne invalide : {}", value)),
    }
}

/// Read a shortcut typed by name (`F12`, `Esc`, `Ctrl+/`).
fn parse_key(input: &str) -> Option<KeyChord> {
    let lower = input.to_lowercase();
    match lower.as_str() {
        "esc" | "échap" | "escape" => return Some(KeyChord::plain(Key::Escape)),
        "ctrl+/" | "ctrl-/" => return Some(KeyChord::ctrl(Key::Char('/'))),
        _ => {}
    }
    let number = lower.strip_prefix('f')?.parse::<u8>().ok()?;
    (1..=12)
        .contains(&number)
        .then_some(KeyChord::plain(Key::Function(number)))
}

const HELP: &str = "\
ls                      produits de la page courante
cherche <terme>         rechercher un produit
page <n>                page de résultats
cat [id]                filtrer par catégorie
ajoute <sku>            ajouter un produit au panier
qty <ligne> <n>         changer la quantité d'une ligne
+ <ligne> / - <ligne>   ajouter / retirer une unité
suppr <ligne>           retirer une ligne
vider                   vider le panier
mode <CASH|CARD|...>    mode de paiement
especes <montant>       montant reçu en espèces
finaliser               finaliser la vente
facture                 afficher la facture
imprimer                ouvrir la facture imprimable
panier                  afficher le panier
quitter                 fermer la caisse";

/// Run the register until the cashier quits or input ends.
pub async fn run(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let gateway = ctx.gateway()?;
    let catalog = ctx.config.catalog()?;
    let mut options = ctx.config.session_options()?;
    if let Some(mode) = &args.payment_mode {
        options.payment_mode = PaymentMode::from_code(mode);
    }

    info!(
        server = %gateway.endpoints().base(),
        products = catalog.len(),
        "register opened"
    );

    let mut location = gateway.endpoints().register_page();
    let view = TerminalView::new(ctx.output.clone(), args.yes);
    let mut session = CartSession::with_options(view, gateway, options);
    let mut query = CatalogQuery::default();

    ctx.output.info("Caisse ouverte. Tapez `aide` pour la liste des commandes.");
    show_catalog(ctx, &catalog, &query, &location);
    session.render();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt(ctx);
        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        let command = match RegisterCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                ctx.output.warn(&message);
                continue;
            }
        };
        debug!(?command, "register command");

        match command {
            RegisterCommand::List => show_catalog(ctx, &catalog, &query, &location),
            RegisterCommand::Search(term) => {
                location = register_search(&location, &term);
                query.term = term;
                query.page = None;
                show_catalog(ctx, &catalog, &query, &location);
            }
            RegisterCommand::Page(page) => {
                location = register_page_number(&location, &page);
                query.page = Some(page);
                show_catalog(ctx, &catalog, &query, &location);
            }
            RegisterCommand::Category(category) => {
                location = register_category(&location, category.as_deref().unwrap_or(""));
                query.category = category;
                query.page = None;
                show_catalog(ctx, &catalog, &query, &location);
            }
            RegisterCommand::Add(sku) => add_product(ctx, &catalog, &mut session, &sku),
            RegisterCommand::Quantity { line, quantity } => {
                session.set_quantity_text(line - 1, &quantity);
            }
            RegisterCommand::Increment(line) => {
                session.increment(line - 1);
            }
            RegisterCommand::Decrement(line) => {
                session.decrement(line - 1);
            }
            RegisterCommand::Remove(line) => {
                session.remove_item(line - 1);
            }
            RegisterCommand::Clear => {
                session.clear();
            }
            RegisterCommand::Mode(mode) => session.select_payment_mode(PaymentMode::from_code(&mode)),
            RegisterCommand::Cash(amount) => session.set_cash_received(amount),
            RegisterCommand::Pay => finalize(ctx, &mut session).await,
            RegisterCommand::Invoice => {
                let spinner = ctx.output.spinner("Génération de la facture...");
                let result = session.show_invoice().await;
                spinner.finish_and_clear();
                if let Err(e) = result {
                    debug!(error = %e, "invoice not shown");
                }
            }
            RegisterCommand::Print => {
                if let Err(e) = session.print_invoice() {
                    debug!(error = %e, "invoice not printed");
                }
            }
            RegisterCommand::Show => session.render(),
            RegisterCommand::Help => {
                ctx.output.header("Commandes");
                println!("{}", HELP);
                ctx.output.header("Raccourcis");
                println!("{}", chrome::help_text());
            }
            RegisterCommand::Close => {}
            RegisterCommand::Quit => {
                if chrome::confirm_logout(|message| session.view_mut().confirm(message)) {
                    break;
                }
            }
        }
    }

    info!(last_sale = ?session.last_sale(), "register closed");
    Ok(())
}

/// Submit the sale with a spinner while the request is in flight.
async fn finalize(ctx: &Context, session: &mut Register) {
    let ticket = match session.begin_checkout() {
        Ok(ticket) => ticket,
        Err(e) => {
            debug!(error = %e, "checkout not started");
            return;
        }
    };

    let spinner = ctx.output.spinner("Finalisation de la vente...");
    let outcome = session.gateway().submit_checkout(ticket.request()).await;
    spinner.finish_and_clear();

    if let Err(e) = session.finish_checkout(ticket, outcome) {
        debug!(error = %e, "checkout not completed");
    }
}

fn add_product(ctx: &Context, catalog: &Catalog, session: &mut Register, sku: &str) {
    match catalog.get(&Sku::new(sku)) {
        Some(product) if product.active => {
            session.add_item(product.sku.clone(), product.name.clone(), product.price);
        }
        _ => ctx.output.warn(&format!("Produit inconnu : {}", sku)),
    }
}

fn show_catalog(ctx: &Context, catalog: &Catalog, query: &CatalogQuery, location: &Url) {
    let page = catalog.search(query);
    if ctx.output.is_json() {
        let products: Vec<_> = page.products.iter().collect();
        ctx.output.json(&serde_json::json!({
            "url": location.as_str(),
            "page": page.number,
            "pages": page.num_pages,
            "total": page.total,
            "products": products,
        }));
        return;
    }

    ctx.output.header(&format!(
        "Produits (page {}/{}, {} résultats)",
        page.number, page.num_pages, page.total
    ));
    ctx.output.debug(location.as_str());
    for product in &page.products {
        let price = product.price.display();
        println!(
            "  {}",
            format_row(&[product.sku.as_str(), &product.name, &price], &[6, 28, 10])
        );
    }
}

fn prompt(ctx: &Context) {
    if ctx.output.is_json() {
        return;
    }
    print!("> ");
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cart_commands() {
        assert_eq!(
            RegisterCommand::parse("ajoute 12").unwrap(),
            Some(RegisterCommand::Add("12".into()))
        );
        assert_eq!(
            RegisterCommand::parse("qty 2 5").unwrap(),
            Some(RegisterCommand::Quantity {
                line: 2,
                quantity: "5".into()
            })
        );
        assert_eq!(RegisterCommand::parse("+ 1").unwrap(), Some(RegisterCommand::Increment(1)));
        assert_eq!(RegisterCommand::parse("suppr 3").unwrap(), Some(RegisterCommand::Remove(3)));
        assert_eq!(RegisterCommand::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_parse_rejects_bad_lines() {
        assert!(RegisterCommand::parse("suppr 0").is_err());
        assert!(RegisterCommand::parse("+ x").is_err());
        assert!(RegisterCommand::parse("ajoute").is_err());
        assert!(RegisterCommand::parse("dance").is_err());
    }

    #[test]
    fn test_shortcuts_map_to_commands() {
        assert_eq!(RegisterCommand::parse("F12").unwrap(), Some(RegisterCommand::Pay));
        assert_eq!(RegisterCommand::parse("f4").unwrap(), Some(RegisterCommand::List));
        assert_eq!(RegisterCommand::parse("Esc").unwrap(), Some(RegisterCommand::Close));
        assert_eq!(RegisterCommand::parse("ctrl+/").unwrap(), Some(RegisterCommand::Help));
        assert!(RegisterCommand::parse("F5").is_err());
    }

    #[test]
    fn test_search_keeps_the_whole_term() {
        assert_eq!(
            RegisterCommand::parse("cherche pain de mie").unwrap(),
            Some(RegisterCommand::Search("pain de mie".into()))
        );
        assert_eq!(RegisterCommand::parse("cat").unwrap(), Some(RegisterCommand::Category(None)));
    }
}
