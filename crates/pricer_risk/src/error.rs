//! Risk layer error types.
//!
//! This module provides structured error types for sweep, scenario and
//! strategy operations using `thiserror` for derivation.

use pricer_core::types::{GridError, PricingError};
use pricer_models::analytical::AnalyticalError;
use thiserror::Error;

/// Errors that can occur during risk analysis.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RiskError {
    /// A generated contract failed engine validation.
    #[error(transparent)]
    Analytical(#[from] AnalyticalError),

    /// A sweep grid could not be built.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),
}

impl From<RiskError> for PricingError {
    fn from(err: RiskError) -> Self {
        match err {
            RiskError::Analytical(e) => e.into(),
            RiskError::Grid(e) => e.into(),
        }
    }
}
