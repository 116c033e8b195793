//! # pricer_core: Foundation Layer for the Option Pricing Workspace
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core sits at the bottom of the layered workspace and provides:
//! - Contract side: `OptionSide` (`types::side`)
//! - Error types: `PricingError`, `GridError` (`types::error`)
//! - Evaluation grids for sensitivity sweeps (`math::grid`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::grid::linspace;
//! use pricer_core::types::OptionSide;
//!
//! let spots = linspace(70.0_f64, 130.0, 7).unwrap();
//! assert_eq!(spots.len(), 7);
//! assert_eq!(spots[3], 100.0);
//!
//! let side: OptionSide = "put".parse().unwrap();
//! assert_eq!(side, OptionSide::Put);
//! assert_eq!(side.phi(), -1.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for `OptionSide` and error types

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
