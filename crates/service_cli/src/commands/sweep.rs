//! Sweep command implementation
//!
//! Reprices the configured contract along one axis (spot or volatility) or
//! over a spot × volatility grid.

use std::io::Write;

use clap::ValueEnum;
use pricer_models::instruments::ContractParameters;
use pricer_risk::{
    greeks_ladder, price_vol_grid, spot_ladder, volatility_ladder, PriceSurface, RiskError,
    SweepSpec,
};
use serde::Serialize;
use tracing::info;

use crate::config::{CliConfig, OutputFormat};
use crate::output::{num, write_csv, write_json, Table};
use crate::{CliError, Result};

/// What the sweep varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SweepAxis {
    /// Price, intrinsic value and Greeks vs spot
    Spot,
    /// Price vs volatility
    Vol,
    /// Price heatmap over spot × volatility
    Grid,
}

#[derive(Debug, Serialize)]
struct SpotRow {
    spot: f64,
    price: f64,
    intrinsic: f64,
    delta: f64,
    gamma: f64,
    theta: f64,
    vega: f64,
}

#[derive(Debug, Serialize)]
struct VolRow {
    volatility: f64,
    price: f64,
}

#[derive(Debug, Serialize)]
struct GridCell {
    spot: f64,
    volatility: f64,
    price: f64,
}

fn with_points(mut spec: SweepSpec<f64>, points: Option<usize>) -> SweepSpec<f64> {
    if let Some(n) = points {
        spec.points = n;
    }
    spec
}

fn grid_values(spec: &SweepSpec<f64>, current: f64) -> Result<Vec<f64>> {
    Ok(spec.values(current).map_err(RiskError::from)?)
}

fn spot_rows(params: &ContractParameters<f64>, spec: &SweepSpec<f64>) -> Result<Vec<SpotRow>> {
    let spots = grid_values(spec, params.spot())?;
    let prices = spot_ladder(params, &spots)?;
    let greeks = greeks_ladder(params, &spots)?;

    Ok(prices
        .rows()
        .zip(&greeks.greeks)
        .map(|((spot, price, intrinsic), g)| SpotRow {
            spot,
            price,
            intrinsic,
            delta: g.delta,
            gamma: g.gamma,
            theta: g.theta,
            vega: g.vega,
        })
        .collect())
}

fn vol_rows(params: &ContractParameters<f64>, spec: &SweepSpec<f64>) -> Result<Vec<VolRow>> {
    let vols = grid_values(spec, params.volatility())?;
    let ladder = volatility_ladder(params, &vols)?;

    Ok(ladder
        .rows()
        .map(|(volatility, price, _)| VolRow { volatility, price })
        .collect())
}

fn surface(
    config: &CliConfig,
    params: &ContractParameters<f64>,
    points: Option<usize>,
) -> Result<PriceSurface<f64>> {
    let spec = config.sweep.heatmap_spec();
    let spots = grid_values(&with_points(spec.spot, points), params.spot())?;
    let vols = grid_values(&with_points(spec.volatility, points), params.volatility())?;

    Ok(price_vol_grid(params, &spots, &vols, &config.parallel_config())?)
}

fn render_surface<W: Write>(surface: &PriceSurface<f64>, out: &mut W) -> Result<()> {
    let headers: Vec<String> = std::iter::once("Spot \\ Vol".to_string())
        .chain(surface.volatilities.iter().map(|v| format!("{:.1}%", v * 100.0)))
        .collect();
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();

    let mut table = Table::new(&header_refs);
    for (spot, row) in surface.spots.iter().zip(&surface.prices) {
        let cells = std::iter::once(format!("{:.2}", spot))
            .chain(row.iter().map(|&p| num(p)))
            .collect();
        table.push_row(cells);
    }
    table.render(out)?;

    if let Some((lo, hi)) = surface.range() {
        writeln!(out, "Price range: {} .. {}", num(lo), num(hi))?;
    }
    Ok(())
}

/// Run the sweep command
pub fn run<W: Write>(
    config: &CliConfig,
    axis: SweepAxis,
    points: Option<usize>,
    out: &mut W,
) -> Result<()> {
    if let Some(n) = points {
        if n < 2 {
            return Err(CliError::InvalidArgument(format!(
                "--points must be at least 2, got {}",
                n
            )));
        }
    }

    let params = config.contract_params()?;
    info!(?axis, "running sweep");

    match axis {
        SweepAxis::Spot => {
            let rows = spot_rows(&params, &with_points(config.sweep.spot_spec(), points))?;
            match config.format {
                OutputFormat::Json => write_json(out, &rows),
                OutputFormat::Csv => write_csv(out, rows),
                OutputFormat::Table => {
                    let mut table = Table::new(&[
                        "Spot", "Price", "Intrinsic", "Delta", "Gamma", "Theta", "Vega",
                    ]);
                    for r in &rows {
                        table.push_row(vec![
                            format!("{:.2}", r.spot),
                            num(r.price),
                            num(r.intrinsic),
                            num(r.delta),
                            num(r.gamma),
                            num(r.theta),
                            num(r.vega),
                        ]);
                    }
                    table.render(out)
                }
            }
        }
        SweepAxis::Vol => {
            let rows = vol_rows(&params, &with_points(config.sweep.volatility_spec(), points))?;
            match config.format {
                OutputFormat::Json => write_json(out, &rows),
                OutputFormat::Csv => write_csv(out, rows),
                OutputFormat::Table => {
                    let mut table = Table::new(&["Volatility", "Price"]);
                    for r in &rows {
                        table.push_row(vec![format!("{:.2}%", r.volatility * 100.0), num(r.price)]);
                    }
                    table.render(out)
                }
            }
        }
        SweepAxis::Grid => {
            let surface = surface(config, &params, points)?;
            match config.format {
                OutputFormat::Json => write_json(out, &surface),
                OutputFormat::Csv => {
                    let cells = surface.spots.iter().zip(&surface.prices).flat_map(|(&spot, row)| {
                        surface
                            .volatilities
                            .iter()
                            .zip(row)
                            .map(move |(&volatility, &price)| GridCell {
                                spot,
                                volatility,
                                price,
                            })
                    });
                    write_csv(out, cells)
                }
                OutputFormat::Table => render_surface(&surface, out),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::analytical::price;

    fn run_with(format: OutputFormat, axis: SweepAxis, points: Option<usize>) -> String {
        let config = CliConfig {
            format,
            ..Default::default()
        };
        let mut buf = Vec::new();
        run(&config, axis, points, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_spot_rows_match_engine() {
        let params = CliConfig::default().contract_params().unwrap();
        let rows = spot_rows(&params, &SweepSpec::scaled(0.9, 1.1, 5)).unwrap();

        assert_eq!(rows.len(), 5);
        assert_relative_eq!(rows[0].spot, 90.0, epsilon = 1e-12);
        for r in &rows {
            let expected = price(&params.with_spot(r.spot).unwrap()).unwrap();
            assert_eq!(r.price, expected);
        }
        assert!(rows.windows(2).all(|w| w[0].delta <= w[1].delta));
    }

    #[test]
    fn test_vol_rows_increase() {
        let params = CliConfig::default().contract_params().unwrap();
        let rows = vol_rows(&params, &SweepSpec::volatility_default()).unwrap();
        assert_eq!(rows.len(), 30);
        assert!(rows.windows(2).all(|w| w[0].price < w[1].price));
    }

    #[test]
    fn test_spot_csv_default_points() {
        let text = run_with(OutputFormat::Csv, SweepAxis::Spot, None);
        assert_eq!(
            text.lines().next(),
            Some("spot,price,intrinsic,delta,gamma,theta,vega")
        );
        assert_eq!(text.lines().count(), 51);
    }

    #[test]
    fn test_points_override() {
        let text = run_with(OutputFormat::Csv, SweepAxis::Vol, Some(3));
        assert_eq!(text.lines().count(), 4);
    }

    #[test]
    fn test_grid_json_shape() {
        let text = run_with(OutputFormat::Json, SweepAxis::Grid, Some(4));
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["spots"].as_array().unwrap().len(), 4);
        assert_eq!(value["volatilities"].as_array().unwrap().len(), 4);
        assert_eq!(value["prices"][3].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_grid_csv_long_form() {
        let text = run_with(OutputFormat::Csv, SweepAxis::Grid, None);
        assert_eq!(text.lines().next(), Some("spot,volatility,price"));
        assert_eq!(text.lines().count(), 1 + 100);
    }

    #[test]
    fn test_grid_table_has_range_footer() {
        let text = run_with(OutputFormat::Table, SweepAxis::Grid, Some(3));
        assert!(text.contains("Spot \\ Vol"));
        assert!(text.lines().last().unwrap().starts_with("Price range: "));
    }

    #[test]
    fn test_too_few_points_rejected() {
        let config = CliConfig::default();
        let mut buf = Vec::new();
        let result = run(&config, SweepAxis::Spot, Some(1), &mut buf);
        assert!(matches!(result, Err(CliError::InvalidArgument(_))));
    }
}
