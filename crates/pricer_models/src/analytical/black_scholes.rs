//! Black-Scholes pricing model for European options.
//!
//! This module provides the closed-form Black-Scholes price and the five
//! standard Greeks for a single European call or put.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Degenerate Contracts
//!
//! When σ√T is zero (T = 0, σ = 0, or a product that underflows) the
//! formulas divide by zero. Such contracts price to
//! exactly zero and report all-zero Greeks. This is a fixed convention, not
//! an intrinsic-value or forward-value limit.

use num_traits::Float;

use super::distributions::{norm_cdf, norm_pdf};
use super::error::AnalyticalError;
use super::greeks::{Greeks, DAYS_PER_YEAR, PER_PERCENTAGE_POINT};
use crate::instruments::ContractParameters;
use pricer_core::types::OptionSide;

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Black-Scholes model bound to one validated contract.
///
/// Stateless apart from the contract it wraps; every evaluation is a pure
/// function of the parameters, so instances can be shared freely across
/// threads.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::analytical::BlackScholes;
/// use pricer_models::instruments::ContractParameters;
///
/// let call = ContractParameters::new(100.0_f64, 100.0, 1.0, 0.05, 0.2, OptionSide::Call).unwrap();
/// let put = call.with_side(OptionSide::Put);
///
/// let c = BlackScholes::new(call).unwrap().price();
/// let p = BlackScholes::new(put).unwrap().price();
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = c - p - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlackScholes<T: Float> {
    params: ContractParameters<T>,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a model for the given contract.
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` if any field is outside its domain.
    pub fn new(params: ContractParameters<T>) -> Result<Self, AnalyticalError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the wrapped contract.
    #[inline]
    pub fn params(&self) -> &ContractParameters<T> {
        &self.params
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// Evaluated as (ln(S/K) + rT)/(σ√T) + σ√T/2 so σ² never appears.
    ///
    /// # Returns
    /// `None` for degenerate contracts (σ√T = 0).
    #[inline]
    pub fn d1(&self) -> Option<T> {
        if self.params.is_degenerate() {
            return None;
        }

        let p = &self.params;
        let half = lit::<T>(0.5);
        let total_vol = p.total_volatility();
        let log_moneyness = (p.spot() / p.strike()).ln();
        let carry = p.risk_free_rate() * p.time_to_expiry();

        Some((log_moneyness + carry) / total_vol + half * total_vol)
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    ///
    /// # Returns
    /// `None` for degenerate contracts (σ√T = 0).
    #[inline]
    pub fn d2(&self) -> Option<T> {
        self.d1().map(|d1| d1 - self.params.total_volatility())
    }

    /// Computes the option price.
    ///
    /// - Call: C = S·N(d₁) - K·e^(-rT)·N(d₂)
    /// - Put: P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
    ///
    /// # Returns
    /// The theoretical price, floored at zero. Exactly zero for degenerate
    /// contracts.
    ///
    /// # Examples
    /// ```
    /// use pricer_core::types::OptionSide;
    /// use pricer_models::analytical::BlackScholes;
    /// use pricer_models::instruments::ContractParameters;
    ///
    /// let params = ContractParameters::new(100.0_f64, 100.0, 1.0, 0.05, 0.2, OptionSide::Call).unwrap();
    /// let price = BlackScholes::new(params).unwrap().price();
    ///
    /// // ATM call should have positive value
    /// assert!(price > 0.0);
    /// ```
    pub fn price(&self) -> T {
        let zero = T::zero();
        let (d1, d2) = match (self.d1(), self.d2()) {
            (Some(d1), Some(d2)) => (d1, d2),
            _ => return zero,
        };

        let p = &self.params;
        let discounted_strike = p.strike() * p.discount_factor();

        let value = match p.side() {
            // C = S·N(d₁) - K·e^(-rT)·N(d₂)
            OptionSide::Call => p.spot() * norm_cdf(d1) - discounted_strike * norm_cdf(d2),
            // P = K·e^(-rT)·N(-d₂) - S·N(-d₁)
            OptionSide::Put => discounted_strike * norm_cdf(-d2) - p.spot() * norm_cdf(-d1),
        };

        // Rounding can push deep out-of-the-money values a hair below zero
        value.max(zero)
    }

    /// Computes all five Greeks.
    ///
    /// - Delta = N(d₁) for calls, N(d₁) - 1 for puts
    /// - Gamma = φ(d₁) / (S·σ·√T)
    /// - Theta = [-(S·σ·φ(d₁))/(2√T) ∓ r·K·e^(-rT)·N(±d₂)] / 365
    /// - Vega = S·√T·φ(d₁) / 100
    /// - Rho = ±K·T·e^(-rT)·N(±d₂) / 100
    ///
    /// # Returns
    /// All-zero Greeks for degenerate contracts.
    pub fn greeks(&self) -> Greeks<T> {
        let (d1, d2) = match (self.d1(), self.d2()) {
            (Some(d1), Some(d2)) => (d1, d2),
            _ => return Greeks::zero(),
        };

        let p = &self.params;
        let two = lit::<T>(2.0);
        let days = lit::<T>(DAYS_PER_YEAR);
        let percent = lit::<T>(PER_PERCENTAGE_POINT);

        let spot = p.spot();
        let rate = p.risk_free_rate();
        let expiry = p.time_to_expiry();
        let sqrt_t = expiry.sqrt();
        let discounted_strike = p.strike() * p.discount_factor();
        let pdf_d1 = norm_pdf(d1);

        let gamma = pdf_d1 / (spot * p.total_volatility());
        // φ(d₁) multiplies first so a vanishing density is never scaled by an
        // overflowed factor
        let vega = spot * pdf_d1 * sqrt_t / percent;

        // Common term: -(S·σ·φ(d₁))/(2√T)
        let decay = -(spot * pdf_d1 * p.volatility()) / (two * sqrt_t);

        let (delta, theta_annual, rho) = match p.side() {
            OptionSide::Call => {
                let n_d2 = norm_cdf(d2);
                (
                    norm_cdf(d1),
                    decay - rate * discounted_strike * n_d2,
                    expiry * discounted_strike * n_d2,
                )
            }
            OptionSide::Put => {
                let n_minus_d2 = norm_cdf(-d2);
                (
                    norm_cdf(d1) - T::one(),
                    decay + rate * discounted_strike * n_minus_d2,
                    -expiry * discounted_strike * n_minus_d2,
                )
            }
        };

        Greeks::new(delta, gamma, theta_annual / days, vega, rho / percent)
    }
}

/// Prices a European option.
///
/// # Errors
/// `AnalyticalError::InvalidParameter` if any field is outside its domain.
///
/// # Examples
/// ```
/// use pricer_core::types::OptionSide;
/// use pricer_models::analytical::price;
/// use pricer_models::instruments::ContractParameters;
///
/// let params = ContractParameters::new(100.0_f64, 105.0, 0.25, 0.05, 0.2, OptionSide::Put).unwrap();
/// let value = price(&params).unwrap();
/// assert!((value - 6.1736).abs() < 1e-4);
/// ```
pub fn price<T: Float>(params: &ContractParameters<T>) -> Result<T, AnalyticalError> {
    Ok(BlackScholes::new(*params)?.price())
}

/// Computes the Greeks of a European option.
///
/// # Errors
/// `AnalyticalError::InvalidParameter` if any field is outside its domain.
pub fn greeks<T: Float>(params: &ContractParameters<T>) -> Result<Greeks<T>, AnalyticalError> {
    Ok(BlackScholes::new(*params)?.greeks())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn contract(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        vol: f64,
        side: OptionSide,
    ) -> ContractParameters<f64> {
        ContractParameters::new(spot, strike, expiry, rate, vol, side).unwrap()
    }

    fn reference(side: OptionSide) -> ContractParameters<f64> {
        contract(100.0, 105.0, 0.25, 0.05, 0.2, side)
    }

    fn atm(side: OptionSide) -> ContractParameters<f64> {
        contract(100.0, 100.0, 1.0, 0.05, 0.2, side)
    }

    fn bs_price(params: ContractParameters<f64>) -> f64 {
        price(&params).unwrap()
    }

    // ==========================================================
    // d1 / d2 tests
    // ==========================================================

    #[test]
    fn test_d1_d2_reference() {
        let bs = BlackScholes::new(reference(OptionSide::Call)).unwrap();
        assert_relative_eq!(bs.d1().unwrap(), -0.312_901_6, epsilon = 1e-6);
        assert_relative_eq!(bs.d2().unwrap(), -0.412_901_6, epsilon = 1e-6);
    }

    #[test]
    fn test_d1_d2_relationship() {
        let bs = BlackScholes::new(atm(OptionSide::Call)).unwrap();
        let diff = bs.d1().unwrap() - bs.d2().unwrap();
        assert_relative_eq!(diff, 0.2, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_atm() {
        // d1 = (r + σ²/2)T / (σ√T) = 0.07 / 0.2
        let bs = BlackScholes::new(atm(OptionSide::Call)).unwrap();
        assert_relative_eq!(bs.d1().unwrap(), 0.35, epsilon = 1e-12);
    }

    #[test]
    fn test_d1_degenerate_is_none() {
        let expired = atm(OptionSide::Call).with_time_to_expiry(0.0).unwrap();
        assert!(BlackScholes::new(expired).unwrap().d1().is_none());
        let flat = atm(OptionSide::Call).with_volatility(0.0).unwrap();
        assert!(BlackScholes::new(flat).unwrap().d2().is_none());
    }

    // ==========================================================
    // Price tests
    // ==========================================================

    #[test]
    fn test_call_price_reference_value() {
        assert_relative_eq!(
            bs_price(reference(OptionSide::Call)),
            2.477_901_874,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_put_price_reference_value() {
        assert_relative_eq!(
            bs_price(reference(OptionSide::Put)),
            6.173_570_926,
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_atm_reference_values() {
        assert_relative_eq!(bs_price(atm(OptionSide::Call)), 10.450_583_572, epsilon = 1e-8);
        assert_relative_eq!(bs_price(atm(OptionSide::Put)), 5.573_526_022, epsilon = 1e-8);
    }

    #[test]
    fn test_zero_rate_atm_call_equals_put() {
        let call = contract(100.0, 100.0, 1.0, 0.0, 0.2, OptionSide::Call);
        let put = call.with_side(OptionSide::Put);
        assert_relative_eq!(bs_price(call), bs_price(put), epsilon = 1e-12);
        assert_relative_eq!(bs_price(call), 7.965_567_455, epsilon = 1e-8);
    }

    #[test]
    fn test_deep_itm_call() {
        // Approaches S - K·e^(-rT)
        let call = contract(200.0, 100.0, 1.0, 0.05, 0.2, OptionSide::Call);
        let lower_bound = 200.0 - 100.0 * (-0.05_f64).exp();
        let value = bs_price(call);
        assert!(value >= lower_bound);
        assert_relative_eq!(value, lower_bound, epsilon = 1e-2);
    }

    #[test]
    fn test_deep_otm_call_is_tiny_but_non_negative() {
        let call = contract(50.0, 100.0, 0.1, 0.05, 0.2, OptionSide::Call);
        let value = bs_price(call);
        assert!(value >= 0.0);
        assert!(value < 1e-20);
    }

    #[test]
    fn test_zero_time_prices_to_zero() {
        // In-the-money on both sides; still zero, not intrinsic
        for spot in [80.0, 100.0, 120.0] {
            for side in [OptionSide::Call, OptionSide::Put] {
                let p = contract(spot, 100.0, 0.0, 0.05, 0.2, side);
                assert_eq!(bs_price(p), 0.0);
            }
        }
    }

    #[test]
    fn test_zero_volatility_prices_to_zero() {
        for side in [OptionSide::Call, OptionSide::Put] {
            let p = contract(120.0, 100.0, 1.0, 0.05, 0.0, side);
            assert_eq!(bs_price(p), 0.0);
        }
    }

    // ==========================================================
    // Put-call parity tests
    // ==========================================================

    #[test]
    fn test_put_call_parity() {
        let call = reference(OptionSide::Call);
        let c = bs_price(call);
        let p = bs_price(call.with_side(OptionSide::Put));
        let forward_gap = 100.0 - 105.0 * call.discount_factor();
        assert_relative_eq!(c - p, forward_gap, epsilon = 1e-10);
    }

    #[test]
    fn test_put_call_parity_various_strikes() {
        for strike in [60.0, 80.0, 95.0, 100.0, 105.0, 120.0, 150.0] {
            let call = contract(100.0, strike, 0.75, 0.03, 0.35, OptionSide::Call);
            let c = bs_price(call);
            let p = bs_price(call.with_side(OptionSide::Put));
            let forward_gap = 100.0 - strike * call.discount_factor();
            assert_relative_eq!(c - p, forward_gap, epsilon = 1e-10);
        }
    }

    #[test]
    fn test_put_call_parity_various_expiries() {
        for expiry in [0.01, 0.1, 0.5, 1.0, 2.0, 5.0] {
            let call = contract(100.0, 100.0, expiry, 0.05, 0.2, OptionSide::Call);
            let c = bs_price(call);
            let p = bs_price(call.with_side(OptionSide::Put));
            let forward_gap = 100.0 - 100.0 * call.discount_factor();
            assert_relative_eq!(c - p, forward_gap, epsilon = 1e-10);
        }
    }

    // ==========================================================
    // Greeks reference tests
    // ==========================================================

    #[test]
    fn test_call_greeks_reference() {
        let g = greeks(&reference(OptionSide::Call)).unwrap();
        assert_relative_eq!(g.delta, 0.377_177_7, epsilon = 1e-6);
        assert_relative_eq!(g.gamma, 0.037_988_3, epsilon = 1e-6);
        assert_relative_eq!(g.theta, -0.025_642_9, epsilon = 1e-6);
        assert_relative_eq!(g.vega, 0.189_941_4, epsilon = 1e-6);
        assert_relative_eq!(g.rho, 0.088_099_7, epsilon = 1e-6);
    }

    #[test]
    fn test_put_greeks_reference() {
        let g = greeks(&reference(OptionSide::Put)).unwrap();
        assert_relative_eq!(g.delta, -0.622_822_3, epsilon = 1e-6);
        assert_relative_eq!(g.gamma, 0.037_988_3, epsilon = 1e-6);
        assert_relative_eq!(g.theta, -0.011_438_0, epsilon = 1e-6);
        assert_relative_eq!(g.vega, 0.189_941_4, epsilon = 1e-6);
        assert_relative_eq!(g.rho, -0.171_139_5, epsilon = 1e-6);
    }

    #[test]
    fn test_delta_call_put_relationship() {
        let call = greeks(&reference(OptionSide::Call)).unwrap();
        let put = greeks(&reference(OptionSide::Put)).unwrap();
        assert_relative_eq!(call.delta - put.delta, 1.0, epsilon = 1e-12);
        assert_eq!(call.gamma, put.gamma);
        assert_eq!(call.vega, put.vega);
    }

    #[test]
    fn test_gamma_maximum_near_atm() {
        let g = |strike: f64| {
            greeks(&contract(100.0, strike, 1.0, 0.0, 0.2, OptionSide::Call))
                .unwrap()
                .gamma
        };
        assert!(g(100.0) > g(70.0));
        assert!(g(100.0) > g(140.0));
    }

    #[test]
    fn test_zero_time_greeks_are_zero() {
        for side in [OptionSide::Call, OptionSide::Put] {
            let g = greeks(&contract(120.0, 100.0, 0.0, 0.05, 0.2, side)).unwrap();
            assert!(g.is_zero());
        }
    }

    #[test]
    fn test_zero_volatility_greeks_are_zero() {
        for side in [OptionSide::Call, OptionSide::Put] {
            let g = greeks(&contract(100.0, 100.0, 1.0, 0.05, 0.0, side)).unwrap();
            assert!(g.is_zero());
        }
    }

    #[test]
    fn test_underflowing_total_volatility_greeks_are_zero() {
        for (spot, side) in [
            (100.0, OptionSide::Call),
            (100.0, OptionSide::Put),
            (120.0, OptionSide::Call),
        ] {
            let params = contract(spot, 100.0, 1e-100, 0.0, 1e-300, side);
            let model = BlackScholes::new(params).unwrap();
            let g = model.greeks();

            assert_eq!(model.d1(), None);
            assert_eq!(model.price(), 0.0);
            assert!(g.is_zero(), "{:?}", g);
        }

        let g = greeks(&contract(100.0, 105.0, 1e-100, 0.0, 1e-300, OptionSide::Call)).unwrap();
        for value in [g.delta, g.gamma, g.theta, g.vega, g.rho] {
            assert!(value.is_finite());
        }
        assert!((0.0..=1.0).contains(&g.delta));
    }

    #[test]
    fn test_huge_volatility_limits() {
        let call = contract(100.0, 105.0, 1.0, 0.05, 1e160, OptionSide::Call);
        let put = call.with_side(OptionSide::Put);

        // Infinite-variance limits: C → S, P → K·e^(-rT)
        assert_relative_eq!(price(&call).unwrap(), 100.0, epsilon = 1e-12);
        assert_relative_eq!(price(&put).unwrap(), 105.0 * (-0.05_f64).exp(), epsilon = 1e-12);

        for side in [OptionSide::Call, OptionSide::Put] {
            let g = greeks(&call.with_side(side)).unwrap();
            for value in [g.delta, g.gamma, g.theta, g.vega, g.rho] {
                assert!(value.is_finite(), "{:?}", g);
            }
            assert!(g.gamma >= 0.0 && g.vega >= 0.0);
        }
        assert_relative_eq!(greeks(&call).unwrap().delta, 1.0, epsilon = 1e-12);
    }

    // ==========================================================
    // Finite difference verification
    // ==========================================================

    #[test]
    fn test_delta_vs_finite_diff() {
        let h = 1e-3;
        for side in [OptionSide::Call, OptionSide::Put] {
            let base = reference(side);
            let up = bs_price(base.with_spot(100.0 + h).unwrap());
            let down = bs_price(base.with_spot(100.0 - h).unwrap());
            let fd = (up - down) / (2.0 * h);
            assert_relative_eq!(greeks(&base).unwrap().delta, fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_gamma_vs_finite_diff() {
        let h = 1e-2;
        let base = reference(OptionSide::Call);
        let up = bs_price(base.with_spot(100.0 + h).unwrap());
        let mid = bs_price(base);
        let down = bs_price(base.with_spot(100.0 - h).unwrap());
        let fd = (up - 2.0 * mid + down) / (h * h);
        assert_relative_eq!(greeks(&base).unwrap().gamma, fd, epsilon = 1e-5);
    }

    #[test]
    fn test_vega_vs_finite_diff() {
        let h = 1e-4;
        let base = reference(OptionSide::Put);
        let up = bs_price(base.with_volatility(0.2 + h).unwrap());
        let down = bs_price(base.with_volatility(0.2 - h).unwrap());
        let fd_per_point = (up - down) / (2.0 * h) / 100.0;
        assert_relative_eq!(greeks(&base).unwrap().vega, fd_per_point, epsilon = 1e-7);
    }

    #[test]
    fn test_rho_vs_finite_diff() {
        let h = 1e-4;
        for side in [OptionSide::Call, OptionSide::Put] {
            let base = reference(side);
            let up = bs_price(base.with_risk_free_rate(0.05 + h).unwrap());
            let down = bs_price(base.with_risk_free_rate(0.05 - h).unwrap());
            let fd_per_point = (up - down) / (2.0 * h) / 100.0;
            assert_relative_eq!(greeks(&base).unwrap().rho, fd_per_point, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_theta_vs_finite_diff() {
        let h = 1e-4;
        for side in [OptionSide::Call, OptionSide::Put] {
            let base = reference(side);
            let longer = bs_price(base.with_time_to_expiry(0.25 + h).unwrap());
            let shorter = bs_price(base.with_time_to_expiry(0.25 - h).unwrap());
            let fd_per_day = -(longer - shorter) / (2.0 * h) / 365.0;
            assert_relative_eq!(greeks(&base).unwrap().theta, fd_per_day, epsilon = 1e-7);
        }
    }

    // ==========================================================
    // Error and generic tests
    // ==========================================================

    #[test]
    fn test_invalid_contract_reports_parameter() {
        use crate::analytical::error::Parameter;

        let valid = reference(OptionSide::Call);
        let err = ContractParameters::new(0.0_f64, 105.0, 0.25, 0.05, 0.2, OptionSide::Call)
            .unwrap_err();
        assert_eq!(err.parameter(), Parameter::Spot);
        assert!(price(&valid).is_ok());
        assert!(greeks(&valid).is_ok());
    }

    #[test]
    fn test_f32_compatibility() {
        let params =
            ContractParameters::new(100.0_f32, 100.0, 1.0, 0.05, 0.2, OptionSide::Call).unwrap();
        let value = price(&params).unwrap();
        assert!((value - 10.450_584).abs() < 1e-3);
        let g = greeks(&params).unwrap();
        assert!(g.delta > 0.0 && g.delta < 1.0);
    }

    #[test]
    fn test_model_is_copy_and_debug() {
        let bs = BlackScholes::new(atm(OptionSide::Call)).unwrap();
        let copy = bs;
        assert_eq!(bs, copy);
        assert!(format!("{:?}", bs).contains("BlackScholes"));
        assert_eq!(bs.params().strike(), 100.0);
    }
}
