//! Configuration management commands.

use std::fs;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.config.storage.path);
    ctx.output
        .kv("resolved", &ctx.store_path().display().to_string());

    let rules = &ctx.config.rules;
    ctx.output.info("[rules]");
    ctx.output.kv("minimum_age", &rules.minimum_age.to_string());
    ctx.output.kv(
        "affiliate_discount_percent",
        &rules.affiliate_discount_percent.to_string(),
    );
    ctx.output
        .kv("affiliate_domains", &rules.affiliate_domains.join(", "));
    ctx.output.kv(
        "community_rate_percent",
        &rules.community_rate_percent.to_string(),
    );

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
