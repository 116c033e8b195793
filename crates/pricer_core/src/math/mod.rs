//! Numerical helpers.
//!
//! - `grid`: Evenly spaced evaluation grids for sensitivity sweeps

pub mod grid;

pub use grid::{linspace, scaled_range};
