//! Command implementations
//!
//! Each command reads the resolved [`CliConfig`](crate::config::CliConfig)
//! and writes its result to the given writer in the configured format.

pub mod check;
pub mod greeks;
pub mod price;
pub mod scenarios;
pub mod strategies;
pub mod sweep;
