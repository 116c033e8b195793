//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Layer-neutral errors surfaced to callers of the pricing stack
//! - `GridError`: Errors from evaluation grid construction

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Higher layers funnel their specific error types into this enum when a
/// single error type is needed across crate boundaries.
///
/// # Variants
/// - `InvalidInput`: Invalid contract parameters
/// - `InvalidGrid`: Sweep grid could not be constructed
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Invalid sweep or scenario grid
    InvalidGrid(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::InvalidGrid(msg) => write!(f, "Invalid grid: {}", msg),
        }
    }
}

impl std::error::Error for PricingError {}

/// Evaluation grid errors.
///
/// # Variants
/// - `InsufficientPoints`: Fewer points requested than the grid needs
/// - `NonFiniteBound`: A bound is NaN or infinite
/// - `ReversedBounds`: Start bound lies above end bound
///
/// # Examples
/// ```
/// use pricer_core::types::GridError;
///
/// let err = GridError::InsufficientPoints { got: 1, need: 2 };
/// assert!(format!("{}", err).contains("need at least 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GridError {
    /// Not enough points to span the interval.
    #[error("Insufficient grid points: got {got}, need at least {need}")]
    InsufficientPoints {
        /// Number of points requested
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Bound is NaN or infinite.
    #[error("Grid bounds must be finite: [{start}, {end}]")]
    NonFiniteBound {
        /// Requested start of the interval
        start: f64,
        /// Requested end of the interval
        end: f64,
    },

    /// Start lies above end.
    #[error("Grid bounds reversed: start {start} > end {end}")]
    ReversedBounds {
        /// Requested start of the interval
        start: f64,
        /// Requested end of the interval
        end: f64,
    },
}

impl From<GridError> for PricingError {
    fn from(err: GridError) -> Self {
        PricingError::InvalidGrid(err.to_string())
    }
}
