//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, CONFIG_FILE_NAMES};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "config_path": ctx.config_path,
            "resolved_api_url": ctx.app.api.base_url,
            "config": ctx.config,
        }));
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(none, using defaults)"),
    }
    ctx.output.kv("api url", &ctx.app.api.base_url);

    let value = toml::Value::try_from(&ctx.config).context("Failed to render configuration")?;
    let Some(sections) = value.as_table() else {
        return Ok(());
    };
    for (section, body) in sections {
        ctx.output.info("");
        ctx.output.info(&format!("[{}]", section));
        match body.as_table() {
            Some(table) => {
                for (key, value) in table {
                    ctx.output.kv(key, &render(value));
                }
            }
            None => ctx.output.kv(section, &render(body)),
        }
    }

    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join(CONFIG_FILE_NAMES[0]);

    if config_path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    let content = generate_default_config(&ctx.app.api.base_url);
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "created": config_path }));
    } else {
        ctx.output.success(&format!("Created {}", config_path.display()));
    }
    Ok(())
}

fn render(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
