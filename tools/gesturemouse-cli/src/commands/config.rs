//! Show or save the effective configuration.

use anyhow::Context;
use gesturemouse_common::config::{config_file_path, AppConfig};

pub fn run(config: &AppConfig, write: bool) -> anyhow::Result<()> {
    println!("# {}", config_file_path().display());
    println!("{}", serde_json::to_string_pretty(config)?);

    if write {
        let path = config.save().context("Failed to save config")?;
        println!("Config written to: {}", path.display());
    }
    Ok(())
}
