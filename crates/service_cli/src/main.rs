//! optcalc - European option calculator
//!
//! Command-line front end for the Black-Scholes engine in `pricer_models`
//! and the sweep, scenario and strategy tooling in `pricer_risk`.
//!
//! # Commands
//!
//! - `optcalc price` - Price, intrinsic/time value, moneyness and Greeks
//! - `optcalc greeks` - The five sensitivities only
//! - `optcalc sweep --axis spot|vol|grid` - Price ladders and heatmaps
//! - `optcalc scenarios` - Spot-shock P&L
//! - `optcalc strategies` - Long call/put, covered call, protective put
//! - `optcalc check` - Print the resolved configuration
//!
//! Contract flags (`--spot`, `--strike`, `--expiry`, `--rate`, `--vol`,
//! `--side`) are global and override the `[contract]` section of the config.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod output;

use commands::sweep::SweepAxis;
use config::{build_config, CliArgs, LogLevel};
pub use error::{CliError, Result};

/// European option calculator
#[derive(Parser, Debug)]
#[command(name = "optcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (defaults to ./optcalc.toml when present)
    #[arg(short, long, global = true, env = "OPTCALC_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (table, json, csv)
    #[arg(short, long, global = true)]
    format: Option<String>,

    #[command(flatten)]
    contract: ContractArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Contract overrides shared by every command
#[derive(Args, Debug)]
struct ContractArgs {
    /// Underlying price
    #[arg(long, global = true)]
    spot: Option<f64>,

    /// Strike price
    #[arg(long, global = true)]
    strike: Option<f64>,

    /// Time to expiry in years
    #[arg(long, global = true)]
    expiry: Option<f64>,

    /// Risk-free rate as a decimal (0.05 = 5%)
    #[arg(long, global = true, conflicts_with = "rate_pct")]
    rate: Option<f64>,

    /// Risk-free rate in percent (5 = 5%)
    #[arg(long, global = true)]
    rate_pct: Option<f64>,

    /// Volatility as a decimal (0.2 = 20%)
    #[arg(long, global = true, conflicts_with = "vol_pct")]
    vol: Option<f64>,

    /// Volatility in percent (20 = 20%)
    #[arg(long, global = true)]
    vol_pct: Option<f64>,

    /// Option side (call, put)
    #[arg(long, global = true)]
    side: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Price the contract with derived metrics and Greeks
    Price,

    /// Compute Greeks for the contract
    Greeks,

    /// Reprice along spot or volatility, or over a spot × volatility grid
    Sweep {
        /// Axis to sweep
        #[arg(short, long, value_enum, default_value_t = SweepAxis::Spot)]
        axis: SweepAxis,

        /// Number of points per axis (overrides the config)
        #[arg(short = 'n', long)]
        points: Option<usize>,
    },

    /// Spot-shock scenario P&L
    Scenarios {
        /// Comma-separated relative shocks, e.g. -0.1,0.1 (overrides the config)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        shocks: Vec<f64>,
    },

    /// Compare basic option strategies on the contract
    Strategies,

    /// Print the resolved configuration
    Check,
}

impl Cli {
    fn to_args(&self) -> CliArgs {
        CliArgs {
            config_file: self.config.clone(),
            log_level: self.log_level.clone(),
            verbose: self.verbose,
            format: self.format.clone(),
            spot: self.contract.spot,
            strike: self.contract.strike,
            expiry: self.contract.expiry,
            rate: self.contract.rate,
            rate_pct: self.contract.rate_pct,
            vol: self.contract.vol,
            vol_pct: self.contract.vol_pct,
            side: self.contract.side.clone(),
        }
    }
}

fn init_tracing(log_level: LogLevel) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level.as_filter_str())),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.to_args())?;

    init_tracing(config.log_level);
    debug!(
        format = %config.format,
        log_level = %config.log_level,
        "configuration loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Price => commands::price::run(&config, &mut out),
        Commands::Greeks => commands::greeks::run(&config, &mut out),
        Commands::Sweep { axis, points } => commands::sweep::run(&config, axis, points, &mut out),
        Commands::Scenarios { shocks } => commands::scenarios::run(&config, &shocks, &mut out),
        Commands::Strategies => commands::strategies::run(&config, &mut out),
        Commands::Check => commands::check::run(&config, &mut out),
    }
}
