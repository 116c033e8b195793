//! Contract parameters consumed by the pricing engine.
//!
//! `ContractParameters` is an immutable, validated value: once constructed,
//! every field is inside the domain the Black-Scholes formulas accept, so
//! the engine never re-checks anything beyond the degenerate cases.

use num_traits::Float;
use pricer_core::types::OptionSide;

use crate::analytical::error::{AnalyticalError, Parameter};

/// Market and contract inputs for a European option.
///
/// # Units
/// `risk_free_rate` and `volatility` are decimal fractions (0.05 for 5%),
/// never percentages. Callers collecting percentages must divide by 100
/// before constructing parameters; no automatic rescaling happens here.
///
/// # Domain
/// - `spot > 0`, `strike > 0`
/// - `time_to_expiry >= 0` (year fraction), `volatility >= 0`, `risk_free_rate >= 0`
/// - every field finite
///
/// Zero time or zero volatility is valid and signals a degenerate contract.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::instruments::ContractParameters;
///
/// let params = ContractParameters::new(100.0_f64, 105.0, 0.25, 0.05, 0.20, OptionSide::Call).unwrap();
/// assert_eq!(params.strike(), 105.0);
///
/// // Negative strike is rejected
/// assert!(ContractParameters::new(100.0_f64, -5.0, 0.25, 0.05, 0.20, OptionSide::Put).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ContractParameters<T: Float> {
    spot: T,
    strike: T,
    time_to_expiry: T,
    risk_free_rate: T,
    volatility: T,
    side: OptionSide,
}

#[inline]
fn require_positive<T: Float>(value: T, parameter: Parameter) -> Result<(), AnalyticalError> {
    if value.is_finite() && value > T::zero() {
        Ok(())
    } else {
        Err(AnalyticalError::invalid(parameter, value))
    }
}

#[inline]
fn require_non_negative<T: Float>(value: T, parameter: Parameter) -> Result<(), AnalyticalError> {
    if value.is_finite() && value >= T::zero() {
        Ok(())
    } else {
        Err(AnalyticalError::invalid(parameter, value))
    }
}

impl<T: Float> ContractParameters<T> {
    /// Creates validated contract parameters.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` naming the first field (in the
    /// order spot, strike, time, rate, volatility) outside its domain.
    pub fn new(
        spot: T,
        strike: T,
        time_to_expiry: T,
        risk_free_rate: T,
        volatility: T,
        side: OptionSide,
    ) -> Result<Self, AnalyticalError> {
        let params = Self {
            spot,
            strike,
            time_to_expiry,
            risk_free_rate,
            volatility,
            side,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks every field against its domain.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` for the first offending field.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        require_positive(self.spot, Parameter::Spot)?;
        require_positive(self.strike, Parameter::Strike)?;
        require_non_negative(self.time_to_expiry, Parameter::TimeToExpiry)?;
        require_non_negative(self.risk_free_rate, Parameter::RiskFreeRate)?;
        require_non_negative(self.volatility, Parameter::Volatility)?;

        // σ√T must stay representable
        if self.total_volatility().is_finite() {
            Ok(())
        } else {
            Err(AnalyticalError::invalid(Parameter::Volatility, self.volatility))
        }
    }

    /// Returns true when the total volatility σ√T is zero: time to expiry or
    /// volatility is zero, or their product underflows.
    ///
    /// Degenerate contracts price to zero and carry zero Greeks.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.time_to_expiry == T::zero()
            || self.volatility == T::zero()
            || self.total_volatility() <= T::zero()
    }

    /// Underlying price (S).
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Exercise price (K).
    #[inline]
    pub fn strike(&self) -> T {
        self.strike
    }

    /// Time to expiry as a year fraction (T).
    #[inline]
    pub fn time_to_expiry(&self) -> T {
        self.time_to_expiry
    }

    /// Annualised risk-free rate as a decimal fraction (r).
    #[inline]
    pub fn risk_free_rate(&self) -> T {
        self.risk_free_rate
    }

    /// Annualised volatility as a decimal fraction (σ).
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Call or put.
    #[inline]
    pub fn side(&self) -> OptionSide {
        self.side
    }

    /// Discount factor e^(-rT).
    #[inline]
    pub fn discount_factor(&self) -> T {
        (-self.risk_free_rate * self.time_to_expiry).exp()
    }

    /// Total volatility over the remaining life, σ√T.
    #[inline]
    pub fn total_volatility(&self) -> T {
        self.volatility * self.time_to_expiry.sqrt()
    }

    /// Copy with a different spot, re-validated.
    pub fn with_spot(&self, spot: T) -> Result<Self, AnalyticalError> {
        require_positive(spot, Parameter::Spot)?;
        Ok(Self { spot, ..*self })
    }

    /// Copy with a different strike, re-validated.
    pub fn with_strike(&self, strike: T) -> Result<Self, AnalyticalError> {
        require_positive(strike, Parameter::Strike)?;
        Ok(Self { strike, ..*self })
    }

    /// Copy with a different time to expiry, re-validated.
    pub fn with_time_to_expiry(&self, time_to_expiry: T) -> Result<Self, AnalyticalError> {
        require_non_negative(time_to_expiry, Parameter::TimeToExpiry)?;
        Ok(Self {
            time_to_expiry,
            ..*self
        })
    }

    /// Copy with a different risk-free rate, re-validated.
    pub fn with_risk_free_rate(&self, risk_free_rate: T) -> Result<Self, AnalyticalError> {
        require_non_negative(risk_free_rate, Parameter::RiskFreeRate)?;
        Ok(Self {
            risk_free_rate,
            ..*self
        })
    }

    /// Copy with a different volatility, re-validated.
    pub fn with_volatility(&self, volatility: T) -> Result<Self, AnalyticalError> {
        require_non_negative(volatility, Parameter::Volatility)?;
        Ok(Self { volatility, ..*self })
    }

    /// Copy with the given side. Always valid.
    pub fn with_side(&self, side: OptionSide) -> Self {
        Self { side, ..*self }
    }
}
