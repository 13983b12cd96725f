//! Configuration management commands.

use std::collections::HashSet;
use std::fs;

use anyhow::{bail, Result};
use caisse_data::Endpoints;
use caisse_ui::chrome::{self, Field};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CaisseConfig, CONFIG_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, base_url } => init_config(force, &base_url, ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let server = &ctx.config.server;
    ctx.output.info("");
    ctx.output.info("[server]");
    ctx.output.kv("base_url", &server.base_url);
    ctx.output.kv(
        "session_cookie",
        if server.session_cookie.is_some() { "(set)" } else { "(none)" },
    );
    ctx.output.kv("csrf_cookie", &server.csrf_cookie);
    ctx.output.kv("csrf_header", &server.csrf_header);
    ctx.output.kv("connect_ms", &server.timeouts.connect_ms.to_string());
    ctx.output.kv("total_ms", &server.timeouts.total_ms.to_string());
    ctx.output.kv("sale_info_retries", &server.sale_info_retries.to_string());

    let register = &ctx.config.register;
    ctx.output.info("");
    ctx.output.info("[register]");
    ctx.output.kv("on_success", &format!("{:?}", register.on_success).to_lowercase());
    ctx.output.kv("payment_mode", &register.payment_mode);
    ctx.output.kv("currency", &register.currency);
    ctx.output.kv("tax_percent", &register.tax_percent.to_string());

    if !ctx.config.catalog.is_empty() {
        ctx.output.info("");
        ctx.output.info(&format!("[[catalog]] ({} products)", ctx.config.catalog.len()));
        for entry in &ctx.config.catalog {
            let status = if entry.active { "" } else { " (inactive)" };
            ctx.output
                .list_item(&format!("{} {} {:.2}{}", entry.sku, entry.name, entry.price, status));
        }
    }

    Ok(())
}

async fn init_config(force: bool, base_url: &str, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    Endpoints::new(base_url)?;
    fs::write(&config_path, generate_default_config(base_url))?;

    ctx.output.success(&format!("Created: {}", config_path.display()));

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let report = check(&ctx.config);

    if report.errors.is_empty() && report.warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &report.errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &report.warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !report.errors.is_empty() {
        bail!("Configuration has {} error(s)", report.errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}

#[derive(Debug, Default)]
struct Report {
    errors: Vec<String>,
    warnings: Vec<String>,
}

fn check(config: &CaisseConfig) -> Report {
    let mut report = Report::default();

    if let Err(e) = Endpoints::new(&config.server.base_url) {
        report.errors.push(format!("server.base_url: {}", e));
    }
    if config.server.session_cookie.is_none() {
        report
            .warnings
            .push("server.session_cookie is not set; the server will refuse checkouts".to_string());
    } else if config.server.csrf_token().is_none() {
        report.warnings.push(format!(
            "server.session_cookie has no '{}' cookie; checkouts will be refused",
            config.server.csrf_cookie
        ));
    }
    if config.server.timeouts.total_ms == 0 {
        report.errors.push("server.timeouts.total_ms must be positive".to_string());
    }

    if let Err(e) = config.register.currency() {
        report.errors.push(format!("register.currency: {}", e));
    }
    if config.register.payment_mode.trim().is_empty() {
        report.errors.push("register.payment_mode is required".to_string());
    }
    if config.register.tax_percent > 100 {
        report.errors.push("register.tax_percent must be 0-100".to_string());
    }

    let mut seen = HashSet::new();
    for (i, entry) in config.catalog.iter().enumerate() {
        let form = chrome::validate(&[
            Field::new("sku", entry.sku.as_str()).required(),
            Field::new("name", entry.name.as_str()).required(),
        ]);
        for field in &form.invalid {
            report.errors.push(format!("catalog[{}].{} is required", i, field));
        }
        if entry.price < 0.0 {
            report.errors.push(format!("catalog[{}].price must not be negative", i));
        }
        if !entry.sku.trim().is_empty() && !seen.insert(entry.sku.trim()) {
            report.errors.push(format!("catalog[{}].sku '{}' is duplicated", i, entry.sku));
        }
    }
    if !config.catalog.iter().any(|e| e.active) {
        report.warnings.push("catalog has no active product".to_string());
    }

    report
}
