//! Spot-shock scenario analysis.
//!
//! Reprices the contract after relative moves in the underlying and
//! reports P&L against the unshocked price. Every other field is held fixed.

use std::fmt;

use num_traits::Float;
use pricer_models::analytical::BlackScholes;
use pricer_models::instruments::ContractParameters;

use crate::error::RiskError;

/// Default relative spot moves: -10%, -5%, unchanged, +5%, +10%.
pub const DEFAULT_SPOT_SHOCKS: [f64; 5] = [-0.10, -0.05, 0.0, 0.05, 0.10];

/// A relative move in the underlying, e.g. `-0.05` for a 5% drop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpotShock<T> {
    /// Relative change applied to spot
    pub shift: T,
}

impl<T: Float> SpotShock<T> {
    /// Creates a shock from a relative change.
    pub fn new(shift: T) -> Self {
        Self { shift }
    }

    /// The five default shocks.
    pub fn defaults() -> Vec<Self> {
        DEFAULT_SPOT_SHOCKS
            .iter()
            .map(|&s| Self::new(T::from(s).unwrap_or_else(T::nan)))
            .collect()
    }

    /// Spot after applying the shock.
    #[inline]
    pub fn apply(&self, spot: T) -> T {
        spot * (T::one() + self.shift)
    }

    /// Returns true for the unshocked scenario.
    #[inline]
    pub fn is_base(&self) -> bool {
        self.shift == T::zero()
    }
}

impl<T: Float + fmt::Display> fmt::Display for SpotShock<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_base() {
            return f.write_str("Spot unchanged");
        }
        let hundred = T::from(100.0).unwrap_or_else(T::nan);
        let pct = self.shift * hundred;
        if pct > T::zero() {
            write!(f, "Spot +{}%", pct.round())
        } else {
            write!(f, "Spot {}%", pct.round())
        }
    }
}

/// Outcome of one shocked repricing.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioOutcome<T> {
    /// Shock applied
    pub shock: SpotShock<T>,
    /// Spot after the shock
    pub spot: T,
    /// Option price at the shocked spot
    pub price: T,
    /// Price change vs base
    pub pnl: T,
    /// Price change as a percentage of the base price; zero when the base
    /// price is zero
    pub pnl_pct: T,
}

/// Base price plus one outcome per shock, in input order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ScenarioReport<T> {
    /// Unshocked option price
    pub base_price: T,
    /// Shocked repricings
    pub outcomes: Vec<ScenarioOutcome<T>>,
}

/// Reprices `base` under each spot shock.
///
/// # Errors
/// `RiskError::Analytical` if a shock drives spot to zero or below
/// (shift <= -100%).
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::instruments::ContractParameters;
/// use pricer_risk::scenarios::{run_spot_scenarios, SpotShock};
///
/// let base = ContractParameters::new(100.0_f64, 105.0, 0.25, 0.05, 0.2, OptionSide::Call).unwrap();
/// let report = run_spot_scenarios(&base, &SpotShock::defaults()).unwrap();
///
/// assert_eq!(report.outcomes.len(), 5);
/// assert_eq!(report.outcomes[2].pnl, 0.0);
/// assert!(report.outcomes[4].pnl > 0.0);
/// ```
pub fn run_spot_scenarios<T: Float>(
    base: &ContractParameters<T>,
    shocks: &[SpotShock<T>],
) -> Result<ScenarioReport<T>, RiskError> {
    let base_price = BlackScholes::new(*base)?.price();
    let hundred = T::from(100.0).unwrap_or_else(T::nan);

    tracing::debug!(shocks = shocks.len(), "running spot scenarios");

    let outcomes = shocks
        .iter()
        .map(|&shock| -> Result<ScenarioOutcome<T>, RiskError> {
            let spot = shock.apply(base.spot());
            let price = BlackScholes::new(base.with_spot(spot)?)?.price();
            let pnl = price - base_price;
            let pnl_pct = if base_price > T::zero() {
                pnl / base_price * hundred
            } else {
                T::zero()
            };

            Ok(ScenarioOutcome {
                shock,
                spot,
                price,
                pnl,
                pnl_pct,
            })
        })
        .collect::<Result<Vec<_>, RiskError>>()?;

    Ok(ScenarioReport {
        base_price,
        outcomes,
    })
}
