//! Checkout and receipts.

use anyhow::Result;
use levelup_storefront::{views, PageQuery};

use super::{ReceiptArgs, WithCode};
use crate::context::Context;

/// Run the checkout command.
pub fn checkout(ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_shop()?;
    let order = shop.checkout().coded()?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.success(&format!("Compra realizada: {}", order.id));
    ctx.output.page(&views::receipt(&order));
    if let Some(user) = shop.current_user() {
        ctx.output
            .info(&format!("Ahora tienes {} puntos Level-Up", user.points));
    }
    Ok(())
}

/// Run the receipt command.
pub fn receipt(args: ReceiptArgs, ctx: &Context) -> Result<()> {
    let requested = args
        .order_id
        .or_else(|| args.link.as_deref().and_then(|l| PageQuery::from_link(l).order_id));

    let shop = ctx.open_shop()?;
    let order = shop.receipt(requested.as_deref()).coded()?;

    if let Some(id) = requested.as_deref() {
        if order.id != id.trim() {
            ctx.output.warn(&format!(
                "No se encontró la orden {}; mostrando la última",
                id
            ));
        }
    }

    ctx.output
        .show(&order, "Boleta electrónica", || views::receipt(&order));
    Ok(())
}
