//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, LogFormat, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.emit(&ctx.config, || print_config(ctx));
    Ok(())
}

fn print_config(ctx: &Context) {
    ctx.output.section("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.field("file", path.display()),
        None => ctx.output.field("file", "none (defaults)"),
    }

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.field("dir", ctx.storage_dir().display());
    ctx.output.field("cart_key", ctx.cart_key());
    ctx.output.field("user_key", ctx.user_key());

    ctx.output.info("");
    ctx.output.info("[log]");
    let format = match ctx.config.log.format {
        LogFormat::Compact => "compact",
        LogFormat::Json => "json",
    };
    ctx.output.field("format", format);
    ctx.output.field("filter", &ctx.config.log.filter);

    if let Some(profile) = &ctx.profile {
        ctx.output.info("");
        ctx.output.field("profile", profile);
    }
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(())
}
