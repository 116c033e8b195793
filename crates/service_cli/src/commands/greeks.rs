//! Greeks command implementation
//!
//! Prints the five sensitivities of the configured contract.

use std::io::Write;

use pricer_models::analytical::{greeks, Greeks};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::output::{num, write_csv, write_json, Table};
use crate::Result;

/// Name, value and unit of each Greek in display order.
pub(crate) fn greek_rows(g: &Greeks<f64>) -> [(&'static str, f64, &'static str); 5] {
    [
        ("Delta", g.delta, "per 1.00 spot"),
        ("Gamma", g.gamma, "per 1.00 spot"),
        ("Theta", g.theta, "per day"),
        ("Vega", g.vega, "per 1% vol"),
        ("Rho", g.rho, "per 1% rate"),
    ]
}

#[derive(Debug, Serialize)]
struct GreeksRecord {
    side: &'static str,
    delta: f64,
    gamma: f64,
    theta: f64,
    vega: f64,
    rho: f64,
}

/// Run the greeks command
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    let params = config.contract_params()?;
    info!(side = %params.side(), "computing greeks");

    let g = greeks(&params)?;

    match config.format {
        OutputFormat::Json => write_json(out, &g),
        OutputFormat::Csv => write_csv(
            out,
            [GreeksRecord {
                side: params.side().as_str(),
                delta: g.delta,
                gamma: g.gamma,
                theta: g.theta,
                vega: g.vega,
                rho: g.rho,
            }],
        ),
        OutputFormat::Table => {
            let mut table = Table::new(&["Greek", "Value", "Unit"]);
            for (name, value, unit) in greek_rows(&g) {
                table.push_row(vec![name.to_string(), num(value), unit.to_string()]);
            }
            table.render(out)
        }
    }
}
