//! CLI configuration management
//!
//! Handles loading configuration from a TOML file, environment variables and
//! command-line arguments.

use pricer_core::math::grid::MIN_GRID_POINTS;
use pricer_core::types::OptionSide;
use pricer_models::analytical::AnalyticalError;
use pricer_models::instruments::ContractParameters;
use pricer_risk::scenarios::DEFAULT_SPOT_SHOCKS;
use pricer_risk::{HeatmapSpec, ParallelConfig, SpotShock, SweepSpec};
use pricer_risk::{DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// File picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "optcalc.toml";

/// Log level override
pub const ENV_LOG_LEVEL: &str = "OPTCALC_LOG_LEVEL";
/// Output format override
pub const ENV_FORMAT: &str = "OPTCALC_FORMAT";
/// Parallel threshold override
pub const ENV_PARALLEL_THRESHOLD: &str = "OPTCALC_PARALLEL_THRESHOLD";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid output format: {0}. Must be one of: table, json, csv")]
    InvalidFormat(String),

    #[error("Invalid option side: {0}. Must be one of: call, put")]
    InvalidSide(String),

    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable error: {0}")]
    EnvError(String),
}

impl ConfigError {
    fn invalid(name: &'static str, value: impl ToString) -> Self {
        ConfigError::InvalidValue {
            name,
            value: value.to_string(),
        }
    }
}

/// Log levels supported by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    #[default]
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Convert log level to tracing filter string
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

/// How command results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned box-drawn table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ConfigError::InvalidFormat(s.to_string())),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Default contract used when no contract flags are given
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContractSection {
    /// Underlying price
    pub spot: f64,
    /// Exercise price
    pub strike: f64,
    /// Years to expiry
    pub expiry: f64,
    /// Annualised risk-free rate, decimal
    pub rate: f64,
    /// Annualised volatility, decimal
    pub volatility: f64,
    /// Call or put
    pub side: OptionSide,
}

impl Default for ContractSection {
    fn default() -> Self {
        Self {
            spot: 100.0,
            strike: 105.0,
            expiry: 0.25,
            rate: 0.05,
            volatility: 0.20,
            side: OptionSide::Call,
        }
    }
}

impl ContractSection {
    /// Validated engine parameters.
    pub fn to_params(&self) -> Result<ContractParameters<f64>, AnalyticalError> {
        ContractParameters::new(
            self.spot,
            self.strike,
            self.expiry,
            self.rate,
            self.volatility,
            self.side,
        )
    }
}

/// Sweep and heatmap axes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepSection {
    pub spot_points: usize,
    pub spot_low_factor: f64,
    pub spot_high_factor: f64,
    pub vol_points: usize,
    pub vol_low: f64,
    pub vol_high: f64,
    pub grid_points: usize,
    pub grid_spot_low_factor: f64,
    pub grid_spot_high_factor: f64,
    pub grid_vol_low_factor: f64,
    pub grid_vol_high_factor: f64,
}

impl Default for SweepSection {
    fn default() -> Self {
        Self {
            spot_points: 50,
            spot_low_factor: 0.7,
            spot_high_factor: 1.3,
            vol_points: 30,
            vol_low: 0.1,
            vol_high: 0.5,
            grid_points: 10,
            grid_spot_low_factor: 0.8,
            grid_spot_high_factor: 1.2,
            grid_vol_low_factor: 0.5,
            grid_vol_high_factor: 1.5,
        }
    }
}

impl SweepSection {
    pub fn spot_spec(&self) -> SweepSpec<f64> {
        SweepSpec::scaled(self.spot_low_factor, self.spot_high_factor, self.spot_points)
    }

    pub fn volatility_spec(&self) -> SweepSpec<f64> {
        SweepSpec::fixed(self.vol_low, self.vol_high, self.vol_points)
    }

    pub fn heatmap_spec(&self) -> HeatmapSpec<f64> {
        HeatmapSpec {
            spot: SweepSpec::scaled(
                self.grid_spot_low_factor,
                self.grid_spot_high_factor,
                self.grid_points,
            ),
            volatility: SweepSpec::scaled(
                self.grid_vol_low_factor,
                self.grid_vol_high_factor,
                self.grid_points,
            ),
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, points) in [
            ("sweep.spot_points", self.spot_points),
            ("sweep.vol_points", self.vol_points),
            ("sweep.grid_points", self.grid_points),
        ] {
            if points < MIN_GRID_POINTS {
                return Err(ConfigError::invalid(name, points));
            }
        }

        for (name, low, high) in [
            ("sweep.spot_*_factor", self.spot_low_factor, self.spot_high_factor),
            ("sweep.vol_low/vol_high", self.vol_low, self.vol_high),
            (
                "sweep.grid_spot_*_factor",
                self.grid_spot_low_factor,
                self.grid_spot_high_factor,
            ),
            (
                "sweep.grid_vol_*_factor",
                self.grid_vol_low_factor,
                self.grid_vol_high_factor,
            ),
        ] {
            if !low.is_finite() || !high.is_finite() || low > high {
                return Err(ConfigError::invalid(name, format!("[{}, {}]", low, high)));
            }
        }

        Ok(())
    }
}

/// Rayon dispatch settings for heatmaps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelSection {
    pub batch_size: usize,
    pub threshold: usize,
}

impl Default for ParallelSection {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelSection {
    pub fn to_config(&self) -> ParallelConfig {
        ParallelConfig::new(self.batch_size, self.threshold)
    }
}

/// Relative spot shocks, decimal fractions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioSection {
    pub shocks: Vec<f64>,
}

impl Default for ScenarioSection {
    fn default() -> Self {
        Self {
            shocks: DEFAULT_SPOT_SHOCKS.to_vec(),
        }
    }
}

impl ScenarioSection {
    pub fn spot_shocks(&self) -> Vec<SpotShock<f64>> {
        self.shocks.iter().copied().map(SpotShock::new).collect()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        match self.shocks.iter().find(|s| !s.is_finite() || **s <= -1.0) {
            Some(bad) => Err(ConfigError::invalid("scenarios.shocks", bad)),
            None => Ok(()),
        }
    }
}

/// Resolved CLI configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Log level
    #[serde(deserialize_with = "deserialize_log_level")]
    pub log_level: LogLevel,
    /// Output format
    #[serde(deserialize_with = "deserialize_format")]
    pub format: OutputFormat,
    pub contract: ContractSection,
    pub sweep: SweepSection,
    pub parallel: ParallelSection,
    pub scenarios: ScenarioSection,
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<LogLevel, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    LogLevel::from_str(&s).map_err(serde::de::Error::custom)
}

fn deserialize_format<'de, D>(deserializer: D) -> Result<OutputFormat, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    OutputFormat::from_str(&s).map_err(serde::de::Error::custom)
}

fn parse_side(s: &str) -> Result<OptionSide, ConfigError> {
    OptionSide::from_str(s).map_err(|_| ConfigError::InvalidSide(s.to_string()))
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply `OPTCALC_*` overrides read through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = LogLevel::from_str(&level)?;
        }

        if let Some(format) = lookup(ENV_FORMAT) {
            self.format = OutputFormat::from_str(&format)?;
        }

        if let Some(threshold) = lookup(ENV_PARALLEL_THRESHOLD) {
            self.parallel.threshold = threshold.trim().parse().map_err(|_| {
                ConfigError::EnvError(format!("{}={}", ENV_PARALLEL_THRESHOLD, threshold))
            })?;
        }

        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sweep.validate()?;
        self.scenarios.validate()?;

        if self.parallel.batch_size == 0 {
            return Err(ConfigError::invalid("parallel.batch_size", 0));
        }

        Ok(())
    }

    /// Merge with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli: &CliArgs) -> Result<(), ConfigError> {
        if let Some(level) = &cli.log_level {
            self.log_level = LogLevel::from_str(level)?;
        }
        if cli.verbose {
            self.log_level = LogLevel::Debug;
        }
        if let Some(format) = &cli.format {
            self.format = OutputFormat::from_str(format)?;
        }

        let contract = &mut self.contract;
        if let Some(spot) = cli.spot {
            contract.spot = spot;
        }
        if let Some(strike) = cli.strike {
            contract.strike = strike;
        }
        if let Some(expiry) = cli.expiry {
            contract.expiry = expiry;
        }
        if let Some(rate) = cli.rate {
            contract.rate = rate;
        }
        if let Some(pct) = cli.rate_pct {
            contract.rate = pct / 100.0;
        }
        if let Some(vol) = cli.vol {
            contract.volatility = vol;
        }
        if let Some(pct) = cli.vol_pct {
            contract.volatility = pct / 100.0;
        }
        if let Some(side) = &cli.side {
            contract.side = parse_side(side)?;
        }

        Ok(())
    }

    /// Validated contract from the `[contract]` section.
    pub fn contract_params(&self) -> Result<ContractParameters<f64>, AnalyticalError> {
        self.contract.to_params()
    }

    pub fn parallel_config(&self) -> ParallelConfig {
        self.parallel.to_config()
    }
}

/// CLI arguments structure
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<String>,
    /// Shorthand for `--log-level debug`
    pub verbose: bool,
    /// Output format override
    pub format: Option<String>,
    pub spot: Option<f64>,
    pub strike: Option<f64>,
    pub expiry: Option<f64>,
    /// Rate as a decimal
    pub rate: Option<f64>,
    /// Rate in percent
    pub rate_pct: Option<f64>,
    /// Volatility as a decimal
    pub vol: Option<f64>,
    /// Volatility in percent
    pub vol_pct: Option<f64>,
    pub side: Option<String>,
}

fn load_base(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    if let Some(path) = &cli.config_file {
        return CliConfig::from_file(path);
    }

    let default_path = Path::new(DEFAULT_CONFIG_FILE);
    if default_path.is_file() {
        tracing::debug!(path = DEFAULT_CONFIG_FILE, "loading config from working directory");
        return CliConfig::from_file(default_path);
    }

    Ok(CliConfig::default())
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file (`--config`, else `optcalc.toml` if present)
/// 4. Default values
pub fn build_config(cli: &CliArgs) -> Result<CliConfig, ConfigError> {
    let mut config = load_base(cli)?;

    config.apply_env(|key| std::env::var(key).ok())?;
    config.merge_with_cli(cli)?;

    // Final validation
    config.validate()?;

    Ok(config)
}
