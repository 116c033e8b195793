//! # Pricer Models (L2: Pricing Engine)
//!
//! Closed-form pricing of European calls and puts under Black-Scholes
//! dynamics, together with the contract definition the engine consumes.
//!
//! This crate provides:
//! - `ContractParameters`: validated, immutable pricing inputs
//! - `price` / `greeks`: the two engine operations
//! - Derived metrics (intrinsic value, time value, moneyness)
//!
//! ## Design Principles
//!
//! - **Stateless engine**: `BlackScholes` only wraps its contract; every call is independent
//! - **Generic over `T: Float`**: `f64` for production, `f32` where memory matters
//! - **Explicit units**: rate and volatility are decimal fractions (0.05 = 5%)
//!
//! ## Example
//!
//! ```
//! use pricer_models::analytical::{greeks, price};
//! use pricer_models::instruments::ContractParameters;
//! use pricer_core::types::OptionSide;
//!
//! let params = ContractParameters::new(100.0_f64, 105.0, 0.25, 0.05, 0.20, OptionSide::Call).unwrap();
//! let value = price(&params).unwrap();
//! let g = greeks(&params).unwrap();
//!
//! assert!(value > 2.4 && value < 2.5);
//! assert!(g.delta > 0.0 && g.delta < 1.0);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
