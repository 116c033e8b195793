//! Core contract and error types.
//!
//! This module provides:
//! - `side`: Call/put discriminator shared by every layer
//! - `error`: Structured error types for pricing inputs and evaluation grids
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionSide`] from `side`
//! - [`PricingError`], [`GridError`] from `error`

pub mod error;
pub mod side;

// Re-export commonly used types at module level
pub use error::{GridError, PricingError};
pub use side::OptionSide;
