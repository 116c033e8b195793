//! Check command implementation
//!
//! Prints the fully resolved configuration (defaults, file, environment and
//! flags merged) and confirms the configured contract is valid.

use std::io::Write;

use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::output::{write_csv, write_json};
use crate::Result;

#[derive(Debug, Serialize)]
struct Setting {
    key: String,
    value: String,
}

fn flatten(prefix: &str, value: &serde_json::Value, settings: &mut Vec<Setting>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, inner) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&path, inner, settings);
            }
        }
        serde_json::Value::String(s) => settings.push(Setting {
            key: prefix.to_string(),
            value: s.clone(),
        }),
        other => settings.push(Setting {
            key: prefix.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Run the check command
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    let params = config.contract_params()?;
    info!(side = %params.side(), "configuration resolved");

    match config.format {
        OutputFormat::Json => write_json(out, config),
        OutputFormat::Csv => {
            let mut settings = Vec::new();
            flatten("", &serde_json::to_value(config)?, &mut settings);
            write_csv(out, settings)
        }
        OutputFormat::Table => {
            write!(out, "{}", toml::to_string_pretty(config)?)?;
            Ok(())
        }
    }
}
