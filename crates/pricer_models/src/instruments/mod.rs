//! Contract definition and derived metrics.
//!
//! - [`ContractParameters`]: validated inputs for one European option
//! - [`metrics`]: intrinsic value, time value, moneyness and the
//!   [`Valuation`] record
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::OptionSide;
//! use pricer_models::instruments::{intrinsic_value, moneyness_state, ContractParameters, Moneyness};
//!
//! let params = ContractParameters::new(110.0_f64, 100.0, 0.5, 0.03, 0.25, OptionSide::Call).unwrap();
//! assert_eq!(intrinsic_value(&params), 10.0);
//! assert_eq!(moneyness_state(&params), Moneyness::InTheMoney);
//! ```

pub mod metrics;
mod params;

pub use metrics::{
    days_to_expiry, intrinsic_value, moneyness, moneyness_state, time_value, valuation, Moneyness,
    Valuation,
};
pub use params::ContractParameters;
