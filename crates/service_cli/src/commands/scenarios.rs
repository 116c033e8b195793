//! Scenarios command implementation
//!
//! Reprices the configured contract under relative spot shocks.

use std::io::Write;

use pricer_risk::{run_spot_scenarios, SpotShock};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::output::{num, write_csv, write_json, Table};
use crate::{CliError, Result};

#[derive(Debug, Serialize)]
struct ScenarioRow {
    scenario: String,
    shift: f64,
    spot: f64,
    price: f64,
    pnl: f64,
    pnl_pct: f64,
}

/// Run the scenarios command
///
/// `shocks` overrides the configured list when non-empty.
pub fn run<W: Write>(config: &CliConfig, shocks: &[f64], out: &mut W) -> Result<()> {
    if let Some(bad) = shocks.iter().find(|s| !s.is_finite() || **s <= -1.0) {
        return Err(CliError::InvalidArgument(format!(
            "shock must be finite and above -1.0, got {}",
            bad
        )));
    }

    let params = config.contract_params()?;
    let shocks: Vec<SpotShock<f64>> = if shocks.is_empty() {
        config.scenarios.spot_shocks()
    } else {
        shocks.iter().copied().map(SpotShock::new).collect()
    };
    info!(count = shocks.len(), "running spot scenarios");

    let report = run_spot_scenarios(&params, &shocks)?;

    if config.format == OutputFormat::Json {
        return write_json(out, &report);
    }

    let rows: Vec<ScenarioRow> = report
        .outcomes
        .iter()
        .map(|o| ScenarioRow {
            scenario: o.shock.to_string(),
            shift: o.shock.shift,
            spot: o.spot,
            price: o.price,
            pnl: o.pnl,
            pnl_pct: o.pnl_pct,
        })
        .collect();

    match config.format {
        OutputFormat::Csv => write_csv(out, rows),
        _ => {
            writeln!(out, "Base price: {}", num(report.base_price))?;
            let mut table = Table::new(&["Scenario", "Spot", "Price", "P&L", "P&L %"]);
            for r in rows {
                table.push_row(vec![
                    r.scenario,
                    format!("{:.2}", r.spot),
                    num(r.price),
                    format!("{:+.4}", r.pnl),
                    format!("{:+.2}%", r.pnl_pct),
                ]);
            }
            table.render(out)
        }
    }
}
