//! Price command implementation
//!
//! Values the configured contract: price, intrinsic and time value,
//! moneyness, days to expiry and Greeks.

use std::io::Write;

use pricer_models::instruments::{valuation, Valuation};
use serde::Serialize;
use tracing::info;

use super::greeks::greek_rows;
use crate::config::{CliConfig, OutputFormat};
use crate::output::{num, write_csv, write_json, Table};
use crate::Result;

/// Flat valuation row for CSV output.
#[derive(Debug, Serialize)]
struct PriceRecord {
    side: &'static str,
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    price: f64,
    intrinsic: f64,
    time_value: f64,
    moneyness: f64,
    state: &'static str,
    days_to_expiry: f64,
    delta: f64,
    gamma: f64,
    theta: f64,
    vega: f64,
    rho: f64,
}

impl From<&Valuation<f64>> for PriceRecord {
    fn from(v: &Valuation<f64>) -> Self {
        let p = &v.params;
        Self {
            side: p.side().as_str(),
            spot: p.spot(),
            strike: p.strike(),
            expiry: p.time_to_expiry(),
            rate: p.risk_free_rate(),
            volatility: p.volatility(),
            price: v.price,
            intrinsic: v.intrinsic,
            time_value: v.time_value,
            moneyness: v.moneyness,
            state: v.moneyness_state.label(),
            days_to_expiry: v.days_to_expiry,
            delta: v.greeks.delta,
            gamma: v.greeks.gamma,
            theta: v.greeks.theta,
            vega: v.greeks.vega,
            rho: v.greeks.rho,
        }
    }
}

fn render_table<W: Write>(v: &Valuation<f64>, out: &mut W) -> Result<()> {
    let p = &v.params;
    let mut table = Table::new(&["Metric", "Value"]);

    let rows = [
        ("Side", p.side().to_string()),
        ("Spot", format!("{:.2}", p.spot())),
        ("Strike", format!("{:.2}", p.strike())),
        ("Expiry (years)", format!("{:.4}", p.time_to_expiry())),
        ("Rate", format!("{:.2}%", p.risk_free_rate() * 100.0)),
        ("Volatility", format!("{:.2}%", p.volatility() * 100.0)),
        ("Price", num(v.price)),
        ("Intrinsic value", num(v.intrinsic)),
        ("Time value", num(v.time_value)),
        ("Moneyness", format!("{:+.2}% ({})", v.moneyness * 100.0, v.moneyness_state)),
        ("Days to expiry", format!("{:.1}", v.days_to_expiry)),
    ];
    for (name, value) in rows {
        table.push_row(vec![name.to_string(), value]);
    }
    for (name, value, _) in greek_rows(&v.greeks) {
        table.push_row(vec![name.to_string(), num(value)]);
    }

    table.render(out)
}

/// Run the price command
pub fn run<W: Write>(config: &CliConfig, out: &mut W) -> Result<()> {
    let params = config.contract_params()?;
    info!(
        side = %params.side(),
        spot = params.spot(),
        strike = params.strike(),
        "pricing contract"
    );

    let v = valuation(&params)?;

    match config.format {
        OutputFormat::Json => write_json(out, &v),
        OutputFormat::Csv => write_csv(out, [PriceRecord::from(&v)]),
        OutputFormat::Table => render_table(&v, out),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::OptionSide;

    fn run_with(config: &CliConfig) -> String {
        let mut buf = Vec::new();
        run(config, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_table_default_contract() {
        let text = run_with(&CliConfig::default());
        assert!(text.contains("│ Price "));
        assert!(text.contains("2.4779"));
        assert!(text.contains("-4.76% (OTM)"));
        assert!(text.contains("│ Days to expiry "));
    }

    #[test]
    fn test_put_side() {
        let mut config = CliConfig::default();
        config.contract.side = OptionSide::Put;
        let text = run_with(&config);
        assert!(text.contains("6.1736"));
        assert!(text.contains("(ITM)"));
    }

    #[test]
    fn test_json_fields() {
        let config = CliConfig {
            format: OutputFormat::Json,
            ..Default::default()
        };
        let value: serde_json::Value = serde_json::from_str(&run_with(&config)).unwrap();
        let price = value["price"].as_f64().unwrap();
        assert!((price - 2.477_901_874).abs() < 1e-8);
        assert_eq!(value["moneyness_state"], "out_of_the_money");
        assert!(value["greeks"]["delta"].is_number());
    }

    #[test]
    fn test_csv_header() {
        let config = CliConfig {
            format: OutputFormat::Csv,
            ..Default::default()
        };
        let text = run_with(&config);
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("side,spot,strike,expiry,rate,volatility,price"));
        assert!(header.ends_with("delta,gamma,theta,vega,rho"));
        assert_eq!(text.lines().count(), 2);
    }
}
