//! Cart commands.

use anyhow::{bail, Result};
use levelup_cache::FileStore;
use levelup_commerce::cart::QuantityUpdate;
use levelup_storefront::{views, Storefront};

use super::{confirm, CartArgs, CartCommand, WithCode};
use crate::context::Context;

/// Run the cart command.
pub fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_shop()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add { code, quantity } => {
            let total = shop.add_to_cart(&code, quantity).coded()?;
            ctx.output
                .success(&format!("{} en el carrito: {} unidades", code, total));
        }
        CartCommand::Set {
            code,
            quantity,
            yes,
        } => {
            if quantity < 1
                && !yes
                && !confirm(&format!("¿Quitar {} del carrito?", code))?
            {
                ctx.output.warn("Cancelado");
                return Ok(());
            }
            match shop.update_quantity(&code, quantity).coded()? {
                QuantityUpdate::Updated { quantity } => ctx
                    .output
                    .success(&format!("{}: {} unidades", code, quantity)),
                QuantityUpdate::Clamped { requested, applied } => ctx.output.warn(&format!(
                    "Solo hay {} unidades de {} (pediste {})",
                    applied, code, requested
                )),
                QuantityUpdate::Removed => ctx.output.success(&format!("{} eliminado", code)),
                QuantityUpdate::NotInCart => bail!("{} no está en el carrito", code),
            }
        }
        CartCommand::Remove { code } => {
            if shop.remove_from_cart(&code).coded()? {
                ctx.output.success(&format!("{} eliminado", code));
            } else {
                ctx.output.info(&format!("{} no estaba en el carrito", code));
            }
        }
        CartCommand::Clear { yes } => {
            if !yes && !confirm("¿Vaciar el carrito?")? {
                ctx.output.warn("Cancelado");
                return Ok(());
            }
            shop.clear_cart().coded()?;
            ctx.output.success("Carrito vacío");
            return Ok(());
        }
    }

    show(&shop, ctx)
}

fn show(shop: &Storefront<FileStore>, ctx: &Context) -> Result<()> {
    let pricing = shop.cart_summary().coded()?;
    let title = format!("Carrito ({} unidades)", pricing.item_count());
    ctx.output.show(&pricing, &title, || views::cart(&pricing));
    Ok(())
}
