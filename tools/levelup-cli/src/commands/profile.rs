//! Profile commands.

use anyhow::{bail, Result};
use levelup_auth::ProfileUpdate;
use levelup_storefront::views;
use serde_json::json;

use super::{confirm, ProfileArgs, ProfileCommand, WithCode};
use crate::context::Context;
use crate::output::tier_badge;

/// Run the profile command.
pub fn run(args: ProfileArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_shop()?;

    match args.command.unwrap_or(ProfileCommand::Show) {
        ProfileCommand::Show => {
            let stats = shop.profile_stats().coded()?;
            let Some(user) = shop.current_user() else {
                bail!("No user signed in");
            };
            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "id": user.id,
                    "name": user.name,
                    "email": user.email,
                    "birthdate": user.birthdate,
                    "address": user.address,
                    "phone": user.phone,
                    "preferences": user.preferences,
                    "stats": stats,
                }));
                return Ok(());
            }
            ctx.output
                .header(&format!("Perfil · {}", tier_badge(stats.tier)));
            ctx.output.page(&views::profile(&user, &stats));
        }
        ProfileCommand::Update {
            name,
            email,
            birthdate,
            address,
            phone,
            preferences,
        } => {
            let update = ProfileUpdate {
                name,
                email,
                birthdate,
                address,
                phone,
                preferences,
            };
            if update.is_empty() {
                bail!("Nothing to update. Pass at least one field, e.g. --address");
            }
            let user = shop.update_profile(&update).coded()?;
            ctx.output.success(&format!("Perfil actualizado: {}", user.email));
        }
        ProfileCommand::Delete { yes } => {
            if !yes && !confirm("¿Eliminar tu cuenta? Esta acción no se puede deshacer")? {
                ctx.output.warn("Cancelado");
                return Ok(());
            }
            let user = shop.delete_account().coded()?;
            ctx.output
                .success(&format!("Cuenta {} eliminada", user.email));
        }
        ProfileCommand::History => {
            let orders = shop.order_history().coded()?;
            let title = format!("Mis compras ({})", orders.len());
            ctx.output
                .show(&orders, &title, || views::order_history(&orders));
        }
    }
    Ok(())
}
