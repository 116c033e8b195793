//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `Parameter`: Names the contract field that failed validation
//! - `AnalyticalError`: The engine's single failure mode, `InvalidParameter`

use std::fmt;

use num_traits::Float;
use pricer_core::types::PricingError;
use thiserror::Error;

/// Contract field that can fail validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Parameter {
    /// Underlying price (S).
    Spot,
    /// Exercise price (K).
    Strike,
    /// Time to expiry in years (T).
    TimeToExpiry,
    /// Annualised risk-free rate (r).
    RiskFreeRate,
    /// Annualised volatility (σ).
    Volatility,
}

impl Parameter {
    /// Conventional symbol used in the pricing formulas.
    pub fn symbol(&self) -> &'static str {
        match self {
            Parameter::Spot => "S",
            Parameter::Strike => "K",
            Parameter::TimeToExpiry => "T",
            Parameter::RiskFreeRate => "r",
            Parameter::Volatility => "σ",
        }
    }

    /// Human-readable field name.
    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Spot => "spot",
            Parameter::Strike => "strike",
            Parameter::TimeToExpiry => "time to expiry",
            Parameter::RiskFreeRate => "risk-free rate",
            Parameter::Volatility => "volatility",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.symbol())
    }
}

/// Analytical pricing errors.
///
/// The engine has a single failure mode: a contract field outside its
/// valid domain. Degenerate-but-valid inputs (zero time, zero volatility)
/// are not errors.
///
/// # Examples
/// ```
/// use pricer_models::analytical::{AnalyticalError, Parameter};
///
/// let err = AnalyticalError::InvalidParameter { parameter: Parameter::Strike, value: -5.0 };
/// assert_eq!(format!("{}", err), "Invalid parameter: strike (K) = -5");
/// ```
#[derive(Debug, Clone, Copy, Error, PartialEq)]
pub enum AnalyticalError {
    /// A contract field is outside its valid domain.
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter {
        /// The offending field
        parameter: Parameter,
        /// The rejected value
        value: f64,
    },
}

impl AnalyticalError {
    /// Builds an `InvalidParameter` error from any float value.
    pub fn invalid<T: Float>(parameter: Parameter, value: T) -> Self {
        AnalyticalError::InvalidParameter {
            parameter,
            value: value.to_f64().unwrap_or(f64::NAN),
        }
    }

    /// The field that failed validation.
    pub fn parameter(&self) -> Parameter {
        match self {
            AnalyticalError::InvalidParameter { parameter, .. } => *parameter,
        }
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidParameter { .. } => PricingError::InvalidInput(err.to_string()),
        }
    }
}
