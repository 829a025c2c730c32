//! Registration and sign-in.

use anyhow::Result;
use levelup_auth::RegistrationForm;
use serde_json::json;

use super::{prompt_password, prompt_text, LoginArgs, RegisterArgs, WithCode};
use crate::context::Context;

/// Run the register command.
pub fn register(args: RegisterArgs, ctx: &Context) -> Result<()> {
    let form = RegistrationForm {
        name: prompt_text(args.name, "Nombre")?,
        email: prompt_text(args.email, "Email")?,
        password: prompt_password(args.password, true)?,
        password_confirmation: None,
        birthdate: prompt_text(args.birthdate, "Fecha de nacimiento (AAAA-MM-DD)")?,
        address: args.address,
        phone: args.phone,
        preferences: args.preferences,
        referral_code: args.referral,
    };

    let mut shop = ctx.open_shop()?;
    let user = shop.register(form).coded()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "id": user.id,
            "name": user.name,
            "email": user.email,
            "referral_code": user.referral_code,
            "is_duoc_affiliate": user.is_duoc_affiliate,
        }));
        return Ok(());
    }

    ctx.output.success(&format!("Bienvenido, {}", user.display_name()));
    ctx.output
        .kv("Código de referido", user.referral_code.as_str());
    if user.is_duoc_affiliate {
        ctx.output.info(&format!(
            "Descuento DUOC del {}% activado",
            shop.rules().affiliate_discount_percent
        ));
    }
    if let Some(code) = &user.referred_by {
        ctx.output.kv("Referido por", code.as_str());
    }
    Ok(())
}

/// Run the login command.
pub fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_shop()?;
    let email = prompt_text(args.email.or_else(|| shop.remembered_email()), "Email")?;
    let password = prompt_password(args.password, false)?;

    let user = shop.login(&email, &password, args.remember).coded()?;
    if ctx.output.is_json() {
        ctx.output.json(&json!({ "id": user.id, "email": user.email }));
        return Ok(());
    }
    ctx.output.success(&format!("Hola de nuevo, {}", user.display_name()));
    Ok(())
}

/// Run the logout command.
pub fn logout(ctx: &Context) -> Result<()> {
    let mut shop = ctx.open_shop()?;
    shop.logout().coded()?;
    ctx.output.success("Sesión cerrada");
    Ok(())
}
