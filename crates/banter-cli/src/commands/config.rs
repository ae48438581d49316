//! Config command handlers

use anyhow::{bail, Context, Result};

use banter_core::Config;

/// Show current configuration
pub fn show() -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;

    println!("Configuration:");
    println!("  server_url:   {}", config.server_url);
    println!(
        "  display_name: {}",
        config.display_name.as_deref().unwrap_or("(not set)")
    );
    println!();
    println!("Config file: {}", Config::config_file_path().display());

    Ok(())
}

/// Set a configuration value
pub fn set(key: String, value: String) -> Result<()> {
    let mut config = Config::load().context("Failed to load configuration")?;

    match key.as_str() {
        "server_url" => {
            config.server_url = value.clone();
        }
        "display_name" => {
            config.display_name = if value.is_empty() || value == "none" {
                None
            } else {
                Some(value.clone())
            };
        }
        _ => {
            bail!(
                "Unknown configuration key: '{}'\n\
                 Valid keys: server_url, display_name",
                key
            );
        }
    }

    config.save().context("Failed to save configuration")?;

    println!("Set {} = {}", key, value);

    Ok(())
}
