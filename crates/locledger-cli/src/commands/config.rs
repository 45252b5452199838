//! Configuration display command

use std::path::Path;

use anyhow::Result;
use locledger_core::default_config_path;

use super::load_config;

pub fn cmd_config(show_path: bool, config: Option<&Path>) -> Result<()> {
    if show_path {
        match config.map(Path::to_path_buf).or_else(default_config_path) {
            Some(path) => {
                let state = if path.exists() { "" } else { " (not present, using built-in defaults)" };
                println!("{}{}", path.display(), state);
            }
            None => println!("No config directory available, using built-in defaults"),
        }
        return Ok(());
    }

    print!("{}", effective_config_toml(config)?);
    Ok(())
}

/// Effective configuration rendered as TOML
pub fn effective_config_toml(config: Option<&Path>) -> Result<String> {
    Ok(load_config(config)?.to_toml()?)
}
