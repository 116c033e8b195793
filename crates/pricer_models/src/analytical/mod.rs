//! Analytical pricing formulas for European options.
//!
//! This module provides the closed-form Black-Scholes engine:
//! - `price` / `greeks`: free-function entry points
//! - `BlackScholes`: the same operations plus `d1` / `d2`
//! - Standard normal CDF/PDF
//! - `AnalyticalError`: the engine's validation error
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: `f64` and `f32` share one implementation
//! - **Pure**: no I/O, no logging, no shared state
//! - **Fixed degenerate convention**: T = 0 or σ = 0 gives a zero price and zero Greeks

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod greeks;

// Re-export main types at module level
pub use black_scholes::{greeks, price, BlackScholes};
pub use distributions::{norm_cdf, norm_pdf};
pub use error::{AnalyticalError, Parameter};
pub use greeks::Greeks;
