//! # Pricer Risk (L3: Application)
//!
//! What-if analysis built from repeated engine calls.
//!
//! This crate provides:
//! - Sensitivity sweeps: price vs spot, price vs volatility, Greeks vs spot
//! - Spot × volatility price surfaces, evaluated in parallel with Rayon
//! - Spot-shock scenarios with P&L against the base price
//! - Payoff metrics for four basic option strategies
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L3)             │
//! ├─────────────────────────────────────────┤
//! │  sweep/       - ladders, price surface  │
//! │  scenarios/   - spot shocks, P&L        │
//! │  strategies/  - strategy metrics        │
//! │  parallel/    - Rayon utilities         │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_models (L2)            │
//! │  Closed-form Black-Scholes engine       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Every point of every sweep is an independent engine call with all other
//! contract fields held fixed, so a surface cell always equals an isolated
//! `price` call on the same parameters.
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::OptionSide;
//! use pricer_models::instruments::ContractParameters;
//! use pricer_risk::sweep::{price_vol_grid, HeatmapSpec};
//! use pricer_risk::ParallelConfig;
//!
//! let base = ContractParameters::new(100.0_f64, 105.0, 0.25, 0.05, 0.20, OptionSide::Call).unwrap();
//! let spec = HeatmapSpec::heatmap_default();
//!
//! let spots = spec.spot.values(base.spot()).unwrap();
//! let vols = spec.volatility.values(base.volatility()).unwrap();
//! let surface = price_vol_grid(&base, &spots, &vols, &ParallelConfig::default()).unwrap();
//!
//! assert_eq!(surface.rows(), 10);
//! assert_eq!(surface.cols(), 10);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod error;
pub mod parallel;
pub mod scenarios;
pub mod strategies;
pub mod sweep;

// Re-export commonly used types
pub use error::RiskError;
pub use parallel::{ParallelConfig, DEFAULT_BATCH_SIZE, DEFAULT_PARALLEL_THRESHOLD};
pub use scenarios::{run_spot_scenarios, ScenarioOutcome, ScenarioReport, SpotShock};
pub use strategies::{all_strategies, Bound, StrategyKind, StrategyMetrics};
pub use sweep::{
    greeks_ladder, price_vol_grid, spot_ladder, volatility_ladder, GreeksLadder, HeatmapSpec,
    Ladder, PriceSurface, SweepRange, SweepSpec,
};
