//! Option Greeks.
//!
//! First and second order sensitivities reported in trading units:
//! theta per calendar day, vega and rho per one percentage point.

use num_traits::Float;

/// Days used to convert annualised theta into theta per calendar day.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Divisor converting per-unit vega/rho into per-percentage-point figures.
pub const PER_PERCENTAGE_POINT: f64 = 100.0;

/// Option Greeks (sensitivities).
///
/// All five fields are always present. Under degenerate input (zero time to
/// expiry or zero volatility) every field is zero.
///
/// # Examples
/// ```
/// use pricer_models::analytical::Greeks;
///
/// let g = Greeks::<f64>::zero();
/// assert_eq!(g.delta, 0.0);
/// assert!(g.is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks<T: Float> {
    /// Delta: ∂V/∂S, per unit of underlying
    pub delta: T,
    /// Gamma: ∂²V/∂S², per unit of underlying squared
    pub gamma: T,
    /// Theta: -∂V/∂T, per calendar day
    pub theta: T,
    /// Vega: ∂V/∂σ, per one percentage point of volatility
    pub vega: T,
    /// Rho: ∂V/∂r, per one percentage point of rate
    pub rho: T,
}

impl<T: Float> Greeks<T> {
    /// Creates a Greeks record from already-scaled figures.
    pub fn new(delta: T, gamma: T, theta: T, vega: T, rho: T) -> Self {
        Self {
            delta,
            gamma,
            theta,
            vega,
            rho,
        }
    }

    /// All sensitivities zero.
    pub fn zero() -> Self {
        let zero = T::zero();
        Self::new(zero, zero, zero, zero, zero)
    }

    /// Returns true when every field is exactly zero.
    pub fn is_zero(&self) -> bool {
        let zero = T::zero();
        self.delta == zero
            && self.gamma == zero
            && self.theta == zero
            && self.vega == zero
            && self.rho == zero
    }

    /// Scale Greeks by a factor (e.g. quantity, or -1 for a short position)
    pub fn scale(&self, factor: T) -> Self {
        Self::new(
            self.delta * factor,
            self.gamma * factor,
            self.theta * factor,
            self.vega * factor,
            self.rho * factor,
        )
    }

    /// Add two Greeks (for combined positions)
    pub fn add(&self, other: &Greeks<T>) -> Self {
        Self::new(
            self.delta + other.delta,
            self.gamma + other.gamma,
            self.theta + other.theta,
            self.vega + other.vega,
            self.rho + other.rho,
        )
    }
}
