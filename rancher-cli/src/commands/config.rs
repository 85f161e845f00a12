//! Config file commands

use crate::config::Config;
use crate::output;
use anyhow::{Context, Result};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current configuration (secrets masked)
    Show,

    /// Set a configuration value (an empty value clears optional keys)
    Set {
        /// One of: server, default-output, token, access-key, secret-key,
        /// insecure, include-system-metadata, timeout-secs
        /// (the file's snake_case spelling is accepted too)
        key: String,
        value: String,
    },

    /// Print the config file location
    Path,
}

/// Keep only the public part of a credential (`token-abcde:secret` -> `token-abcde:****`)
fn mask(secret: &str) -> String {
    match secret.split_once(':') {
        Some((name, _)) => format!("{}:****", name),
        None => "****".to_string(),
    }
}

/// Unlike the query commands, a config file that fails to load is an error
/// here; `set` must never replace a file it could not read.
pub fn handle_config_command(command: &ConfigCommands, config_path: &Path) -> Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = load(config_path)?;
            let shown = |value: &Option<String>| value.clone().unwrap_or_else(|| "(not set)".to_string());

            println!("Config file: {}", config_path.display());
            println!("  server:                  {}", shown(&config.server));
            println!("  default-output:          {}", config.default_output);
            println!("  token:                   {}", shown(&config.token.as_deref().map(mask)));
            println!("  access-key:              {}", shown(&config.access_key));
            println!(
                "  secret-key:              {}",
                if config.secret_key.is_some() { "****" } else { "(not set)" }
            );
            println!("  insecure:                {}", config.insecure);
            println!("  include-system-metadata: {}", config.include_system_metadata);
            println!("  timeout-secs:            {}", config.timeout_secs);
        }

        ConfigCommands::Set { key, value } => {
            let mut config = load(config_path)?;
            config.set(key, value)?;
            config.save_to(config_path)?;
            output::print_success(&format!("Set '{}'", key));
        }

        ConfigCommands::Path => {
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

fn load(config_path: &Path) -> Result<Config> {
    Config::load_from(config_path).context("Failed to load config file")
}
