//! Derived contract metrics.
//!
//! Pure helpers layered over the engine: intrinsic and time value,
//! moneyness, and a `Valuation` record bundling them with price and Greeks.

use std::fmt;

use num_traits::Float;
use pricer_core::types::OptionSide;

use super::params::ContractParameters;
use crate::analytical::error::AnalyticalError;
use crate::analytical::greeks::{Greeks, DAYS_PER_YEAR};
use crate::analytical::BlackScholes;

/// Where the spot sits relative to the strike, from the holder's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Moneyness {
    /// Exercising now would pay out.
    InTheMoney,
    /// Spot equals strike.
    AtTheMoney,
    /// Exercising now would pay nothing.
    OutOfTheMoney,
}

impl Moneyness {
    /// Short market label (ITM / ATM / OTM).
    pub fn label(&self) -> &'static str {
        match self {
            Moneyness::InTheMoney => "ITM",
            Moneyness::AtTheMoney => "ATM",
            Moneyness::OutOfTheMoney => "OTM",
        }
    }
}

impl fmt::Display for Moneyness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Immediate exercise value: max(0, S - K) for a call, max(0, K - S) for a put.
#[inline]
pub fn intrinsic_value<T: Float>(params: &ContractParameters<T>) -> T {
    let payoff = match params.side() {
        OptionSide::Call => params.spot() - params.strike(),
        OptionSide::Put => params.strike() - params.spot(),
    };
    payoff.max(T::zero())
}

/// Price less intrinsic value.
///
/// Can be negative, e.g. a deep in-the-money put under a positive rate, or
/// any in-the-money degenerate contract (whose price is zero).
///
/// # Errors
/// `AnalyticalError::InvalidParameter` if the contract is invalid.
pub fn time_value<T: Float>(params: &ContractParameters<T>) -> Result<T, AnalyticalError> {
    let price = BlackScholes::new(*params)?.price();
    Ok(price - intrinsic_value(params))
}

/// Relative distance of spot from strike, S/K - 1, as a decimal fraction.
#[inline]
pub fn moneyness<T: Float>(params: &ContractParameters<T>) -> T {
    params.spot() / params.strike() - T::one()
}

/// Classifies the contract as in, at or out of the money.
///
/// At the money means spot exactly equals strike.
pub fn moneyness_state<T: Float>(params: &ContractParameters<T>) -> Moneyness {
    let (spot, strike) = (params.spot(), params.strike());
    if spot == strike {
        return Moneyness::AtTheMoney;
    }

    let in_the_money = match params.side() {
        OptionSide::Call => spot > strike,
        OptionSide::Put => spot < strike,
    };

    if in_the_money {
        Moneyness::InTheMoney
    } else {
        Moneyness::OutOfTheMoney
    }
}

/// Calendar days remaining, T × 365.
#[inline]
pub fn days_to_expiry<T: Float>(params: &ContractParameters<T>) -> T {
    params.time_to_expiry() * T::from(DAYS_PER_YEAR).unwrap_or_else(T::nan)
}

/// Full valuation of one contract.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::instruments::{valuation, ContractParameters, Moneyness};
///
/// let params = ContractParameters::new(100.0_f64, 105.0, 0.25, 0.05, 0.2, OptionSide::Call).unwrap();
/// let v = valuation(&params).unwrap();
///
/// assert_eq!(v.intrinsic, 0.0);
/// assert_eq!(v.time_value, v.price);
/// assert_eq!(v.moneyness_state, Moneyness::OutOfTheMoney);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Valuation<T: Float> {
    /// Contract that was valued.
    pub params: ContractParameters<T>,
    /// Theoretical price.
    pub price: T,
    /// Immediate exercise value.
    pub intrinsic: T,
    /// Price less intrinsic value.
    pub time_value: T,
    /// S/K - 1.
    pub moneyness: T,
    /// ITM / ATM / OTM classification.
    pub moneyness_state: Moneyness,
    /// Calendar days to expiry.
    pub days_to_expiry: T,
    /// Sensitivities.
    pub greeks: Greeks<T>,
}

/// Values a contract: price, Greeks and every derived metric.
///
/// # Errors
/// `AnalyticalError::InvalidParameter` if the contract is invalid.
pub fn valuation<T: Float>(params: &ContractParameters<T>) -> Result<Valuation<T>, AnalyticalError> {
    let model = BlackScholes::new(*params)?;
    let price = model.price();
    let intrinsic = intrinsic_value(params);

    Ok(Valuation {
        params: *params,
        price,
        intrinsic,
        time_value: price - intrinsic,
        moneyness: moneyness(params),
        moneyness_state: moneyness_state(params),
        days_to_expiry: days_to_expiry(params),
        greeks: model.greeks(),
    })
}
