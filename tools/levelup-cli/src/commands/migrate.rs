//! Store migration.

use anyhow::Result;
use levelup_storefront::Storefront;

use super::WithCode;
use crate::context::Context;

/// Run the migrate command.
pub fn run(ctx: &Context) -> Result<()> {
    let path = ctx.store_path();
    ctx.output.debug(&format!("Store: {}", path.display()));

    let mut shop = Storefront::new(ctx.open_store()?).with_rules(ctx.config.rules.clone());
    let report = shop.migrate().coded()?;

    if ctx.output.is_json() {
        ctx.output.json(&report);
        return Ok(());
    }

    if report.is_noop() {
        ctx.output
            .info(&format!("Store already at version {}", report.to_version));
        return Ok(());
    }

    ctx.output.success(&format!(
        "Migrated store from version {} to {}",
        report.from_version, report.to_version
    ));
    ctx.output.kv("cart lines", &report.cart_lines.to_string());
    ctx.output.kv("users imported", &report.users_imported.to_string());
    ctx.output
        .kv("orders imported", &report.orders_imported.to_string());
    ctx.output
        .kv("session restored", &report.session_restored.to_string());
    if !report.removed_keys.is_empty() {
        ctx.output.info("Removed legacy keys:");
        for key in &report.removed_keys {
            ctx.output.list_item(key);
        }
    }
    Ok(())
}
