//! Configuration commands.

use std::path::Path;
use std::process::ExitCode;

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;
use serde_json::json;
use truthlens_core::TruthLensConfig;

use super::Session;
use crate::output::pad_right;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (API key masked)
    Show,
}

pub fn execute(cmd: ConfigCommands, session: &Session, path: Option<&Path>) -> Result<ExitCode> {
    match cmd {
        ConfigCommands::Show => show(&session.config, path, session.json),
    }
    Ok(ExitCode::SUCCESS)
}

fn show(config: &TruthLensConfig, path: Option<&Path>, as_json: bool) {
    let file = path
        .map(Path::to_path_buf)
        .or_else(TruthLensConfig::default_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(none)".to_string());

    if as_json {
        let value = json!({
            "config_file": file,
            "api_key": config.masked_api_key(),
            "model": config.model,
            "image_model": config.image_model,
            "base_url": config.base_url,
            "timeout_secs": config.timeout_secs,
        });
        println!("{}", value);
        return;
    }

    let rows = [
        ("Config file", file),
        ("API key", config.masked_api_key()),
        ("Model", config.model.clone()),
        ("Image model", config.image_model.clone()),
        ("Base URL", config.base_url.clone()),
        ("Timeout", format!("{}s", config.timeout_secs)),
    ];
    println!("{}", "TruthLens configuration".cyan().bold());
    for (label, value) in rows {
        println!("  {} {}", pad_right(label, 12).bold(), value);
    }
}
