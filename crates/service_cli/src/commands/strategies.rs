//! Strategies command implementation
//!
//! Compares long call, long put, covered call and protective put on the
//! configured contract.

use std::io::Write;

use pricer_risk::{all_strategies, Bound, StrategyMetrics};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::output::{num, write_csv, write_json, Table};
use crate::Result;

#[derive(Debug, Serialize)]
struct StrategyRow {
    strategy: &'static str,
    premium: f64,
    net_cost: f64,
    max_gain: Option<f64>,
    max_loss: Option<f64>,
    breakeven: f64,
    delta: f64,
}

impl From<&StrategyMetrics<f64>> for StrategyRow {
    fn from(m: &StrategyMetrics<f64>) -> Self {
        Self {
            strategy: m.kind.name(),
            premium: m.premium,
            net_cost: m.net_cost,
            max_gain: m.max_gain.value(),
            max_loss: m.max_loss.value(),
            breakeven: m.breakeven,
            delta: m.greeks.delta,
        }
    }
}

fn cash_flow(net_cost: f64) -> String {
    if net_cost < 0.0 {
        format!("receive {}", num(-net_cost))
    } else {
        format!("pay {}", num(net_cost))
    }
}

fn bound(b: &Bound<f64>) -> String {
    format!("{:.4}", b)
}

/// Run the strategies command
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    let params = config.contract_params()?;
    info!("evaluating strategies");

    let metrics = all_strategies(&params)?;

    match config.format {
        OutputFormat::Json => write_json(out, &metrics),
        OutputFormat::Csv => write_csv(out, metrics.iter().map(StrategyRow::from)),
        OutputFormat::Table => {
            let mut table = Table::new(&[
                "Strategy",
                "Premium",
                "Cash flow",
                "Max gain",
                "Max loss",
                "Breakeven",
                "Delta",
            ]);
            for m in &metrics {
                table.push_row(vec![
                    m.kind.name().to_string(),
                    num(m.premium),
                    cash_flow(m.net_cost),
                    bound(&m.max_gain),
                    bound(&m.max_loss),
                    format!("{:.2}", m.breakeven),
                    num(m.greeks.delta),
                ]);
            }
            table.render(out)?;
            for m in &metrics {
                writeln!(out, "{}: {}", m.kind, m.kind.description())?;
            }
            Ok(())
        }
    }
}
