//! Configuration management commands.

use anyhow::{bail, Result};
use serde_json::json;

use super::{ConfigArgs, ConfigCommand};
use crate::config::generate_default_config;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[api]");
    ctx.output.kv("base_url", &ctx.base_url());
    ctx.output.kv("timeout_ms", &config.api.timeout_ms.to_string());
    if ctx.offline {
        ctx.output.kv("mode", "offline");
    }

    ctx.output.info("[browse]");
    ctx.output.kv("page_size", &config.browse.page_size.to_string());

    ctx.output.info("[admin]");
    ctx.output.kv("username", &config.admin.username);
    let password = match (&config.admin.password, &config.admin.password_hash) {
        (_, Some(_)) => "argon2 hash",
        (Some(_), None) => "plain text",
        (None, None) => "built-in",
    };
    ctx.output.kv("password", password);
    ctx.output.kv("session_ttl_secs", &config.admin.session_ttl_secs.to_string());

    ctx.output.info("[storage]");
    ctx.output.kv("path", &ctx.storage_path().display().to_string());

    ctx.output.info("[logging]");
    ctx.output.kv("format", &format!("{:?}", config.logging.format).to_lowercase());
    ctx.output.kv("level", config.logging.level.as_str());

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("shelf.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(&config_path, generate_default_config())?;
    ctx.output.success(&format!("Created {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let problems = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&json!({ "valid": problems.is_empty(), "problems": problems }));
    } else if problems.is_empty() {
        ctx.output.success("Configuration is valid");
    } else {
        for problem in &problems {
            ctx.output.list_item(problem);
        }
    }

    if !problems.is_empty() {
        bail!("{} configuration problem(s)", problems.len());
    }
    Ok(())
}
