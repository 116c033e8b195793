//! Basic option strategy metrics.
//!
//! Four single-leg and stock-plus-option strategies, each built from engine
//! prices for the same strike, expiry, rate and volatility:
//!
//! | Strategy       | Position                  | Cost | Max gain          | Max loss  | Breakeven |
//! |----------------|---------------------------|------|-------------------|-----------|-----------|
//! | Long call      | +1 call                   | C    | unlimited         | C         | K + C     |
//! | Long put       | +1 put                    | P    | K − P             | P         | K − P     |
//! | Covered call   | +1 stock, −1 call         | −C   | (K − S) + C or C  | S − C     | S − C     |
//! | Protective put | +1 stock, +1 put          | P    | unlimited         | S − K + P | S + P     |
//!
//! Net cost is signed: negative means premium received. Stock legs are held
//! at today's spot, so their cost does not enter `net_cost`.

use std::fmt;

use num_traits::Float;
use pricer_core::types::OptionSide;
use pricer_models::analytical::{BlackScholes, Greeks};
use pricer_models::instruments::ContractParameters;

use crate::error::RiskError;

/// Supported strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrategyKind {
    /// Buy a call.
    LongCall,
    /// Buy a put.
    LongPut,
    /// Hold stock, sell a call.
    CoveredCall,
    /// Hold stock, buy a put.
    ProtectivePut,
}

impl StrategyKind {
    /// All strategies, in display order.
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::LongCall,
        StrategyKind::LongPut,
        StrategyKind::CoveredCall,
        StrategyKind::ProtectivePut,
    ];

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::LongCall => "Long Call",
            StrategyKind::LongPut => "Long Put",
            StrategyKind::CoveredCall => "Covered Call",
            StrategyKind::ProtectivePut => "Protective Put",
        }
    }

    /// One-line description of the position.
    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::LongCall => "Buy a call; bullish",
            StrategyKind::LongPut => "Buy a put; bearish",
            StrategyKind::CoveredCall => "Hold the stock and sell a call; income",
            StrategyKind::ProtectivePut => "Hold the stock and buy a put; downside insurance",
        }
    }

    /// Option leg traded by the strategy.
    pub fn option_side(&self) -> OptionSide {
        match self {
            StrategyKind::LongCall | StrategyKind::CoveredCall => OptionSide::Call,
            StrategyKind::LongPut | StrategyKind::ProtectivePut => OptionSide::Put,
        }
    }

    /// Returns true if the strategy holds the underlying.
    pub fn holds_stock(&self) -> bool {
        matches!(self, StrategyKind::CoveredCall | StrategyKind::ProtectivePut)
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A payoff extreme that is either a finite amount or unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Bound<T> {
    /// Finite amount.
    Limited(T),
    /// No upper limit.
    Unlimited,
}

impl<T: Float> Bound<T> {
    /// The finite amount, if any.
    pub fn value(&self) -> Option<T> {
        match self {
            Bound::Limited(v) => Some(*v),
            Bound::Unlimited => None,
        }
    }
}

impl<T: Float + fmt::Display> fmt::Display for Bound<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Limited(v) => match f.precision() {
                Some(p) => write!(f, "{:.*}", p, v),
                None => write!(f, "{}", v),
            },
            Bound::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Cost, payoff extremes and breakeven for one strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StrategyMetrics<T: Float> {
    /// Strategy evaluated
    pub kind: StrategyKind,
    /// Option premium (always non-negative)
    pub premium: T,
    /// Signed option cash flow: positive paid, negative received
    pub net_cost: T,
    /// Largest profit at expiry
    pub max_gain: Bound<T>,
    /// Largest loss at expiry, as a positive amount
    pub max_loss: Bound<T>,
    /// Terminal spot at which profit is zero
    pub breakeven: T,
    /// Position Greeks (stock leg contributes delta 1)
    pub greeks: Greeks<T>,
    spot: T,
    strike: T,
}

impl<T: Float> StrategyMetrics<T> {
    /// Builds the metrics for `kind` on the given contract. The contract's
    /// own side is ignored; each strategy picks its option leg.
    ///
    /// # Errors
    /// `RiskError::Analytical` if the contract is invalid.
    pub fn evaluate(kind: StrategyKind, params: &ContractParameters<T>) -> Result<Self, RiskError> {
        let model = BlackScholes::new(params.with_side(kind.option_side()))?;
        let premium = model.price();
        let option_greeks = model.greeks();

        let spot = params.spot();
        let strike = params.strike();
        let zero = T::zero();
        let one = T::one();
        let stock = Greeks::new(one, zero, zero, zero, zero);

        let metrics = match kind {
            StrategyKind::LongCall => Self {
                kind,
                premium,
                net_cost: premium,
                max_gain: Bound::Unlimited,
                max_loss: Bound::Limited(premium),
                breakeven: strike + premium,
                greeks: option_greeks,
                spot,
                strike,
            },
            StrategyKind::LongPut => Self {
                kind,
                premium,
                net_cost: premium,
                max_gain: Bound::Limited(strike - premium),
                max_loss: Bound::Limited(premium),
                breakeven: strike - premium,
                greeks: option_greeks,
                spot,
                strike,
            },
            StrategyKind::CoveredCall => Self {
                kind,
                premium,
                net_cost: -premium,
                max_gain: Bound::Limited(if strike > spot {
                    (strike - spot) + premium
                } else {
                    premium
                }),
                max_loss: Bound::Limited(spot - premium),
                breakeven: spot - premium,
                greeks: stock.add(&option_greeks.scale(-one)),
                spot,
                strike,
            },
            StrategyKind::ProtectivePut => Self {
                kind,
                premium,
                net_cost: premium,
                max_gain: Bound::Unlimited,
                max_loss: Bound::Limited(spot - strike + premium),
                breakeven: spot + premium,
                greeks: stock.add(&option_greeks),
                spot,
                strike,
            },
        };

        Ok(metrics)
    }

    /// Profit at expiry for a terminal spot, net of the premium.
    pub fn profit_at_expiry(&self, terminal_spot: T) -> T {
        let zero = T::zero();
        let call_payoff = (terminal_spot - self.strike).max(zero);
        let put_payoff = (self.strike - terminal_spot).max(zero);
        let stock_pnl = terminal_spot - self.spot;

        match self.kind {
            StrategyKind::LongCall => call_payoff - self.premium,
            StrategyKind::LongPut => put_payoff - self.premium,
            StrategyKind::CoveredCall => stock_pnl - call_payoff + self.premium,
            StrategyKind::ProtectivePut => stock_pnl + put_payoff - self.premium,
        }
    }
}

/// Evaluates all four strategies for one parameter set.
///
/// # Errors
/// `RiskError::Analytical` if the contract is invalid.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::instruments::ContractParameters;
/// use pricer_risk::strategies::{all_strategies, Bound, StrategyKind};
///
/// let params = ContractParameters::new(100.0_f64, 105.0, 0.25, 0.05, 0.2, OptionSide::Call).unwrap();
/// let metrics = all_strategies(&params).unwrap();
///
/// assert_eq!(metrics.len(), 4);
/// assert_eq!(metrics[0].kind, StrategyKind::LongCall);
/// assert_eq!(metrics[0].max_gain, Bound::Unlimited);
/// assert!(metrics[2].net_cost < 0.0);
/// ```
pub fn all_strategies<T: Float>(
    params: &ContractParameters<T>,
) -> Result<Vec<StrategyMetrics<T>>, RiskError> {
    StrategyKind::ALL
        .iter()
        .map(|&kind| StrategyMetrics::evaluate(kind, params))
        .collect()
}
