//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function Φ
//! - `norm_pdf`: Probability density function φ
//!
//! Both are generic over `T: Float`. The CDF uses Hart's double-precision
//! rational approximation (algorithm 5666, as restated by West, 2005), with
//! absolute error near machine epsilon across the real line. Put-call parity
//! relies on `Φ(x) + Φ(-x) = 1`, which holds by construction here because
//! both tails come from the same evaluation.

use num_traits::Float;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// sqrt(2 * pi), as used by the continued-fraction tail.
const SQRT_2PI: f64 = 2.506_628_274_631;

/// |x| beyond which the lower tail underflows to zero.
const TAIL_CUTOFF: f64 = 37.0;

/// |x| at which the rational approximation hands over to the continued fraction.
const RATIONAL_LIMIT: f64 = 7.071_067_811_865_47;

/// Hart numerator coefficients, highest degree first.
const NUMERATOR: [f64; 7] = [
    3.526_249_659_989_11e-2,
    0.700_383_064_443_688,
    6.373_962_203_531_65,
    33.912_866_078_383,
    112.079_291_497_871,
    221.213_596_169_931,
    220.206_867_912_376,
];

/// Hart denominator coefficients, highest degree first.
const DENOMINATOR: [f64; 8] = [
    8.838_834_764_831_84e-2,
    1.755_667_163_182_64,
    16.064_177_579_207,
    86.780_732_202_946_1,
    296.564_248_779_674,
    637.333_633_378_831,
    793.826_512_519_948,
    440.413_735_824_752,
];

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

/// Horner evaluation of a polynomial with coefficients highest degree first.
#[inline]
fn horner<T: Float>(coefficients: &[f64], x: T) -> T {
    coefficients
        .iter()
        .fold(T::zero(), |acc, &c| acc * x + lit::<T>(c))
}

/// Lower tail Φ(-|x|).
#[inline]
fn lower_tail<T: Float>(abs_x: T) -> T {
    if abs_x > lit(TAIL_CUTOFF) {
        return T::zero();
    }

    let half = lit::<T>(0.5);
    let gaussian = (-half * abs_x * abs_x).exp();

    if abs_x < lit(RATIONAL_LIMIT) {
        gaussian * horner(&NUMERATOR, abs_x) / horner(&DENOMINATOR, abs_x)
    } else {
        // Continued fraction for the far tail
        let mut b = abs_x + lit(0.65);
        for k in [4.0, 3.0, 2.0, 1.0] {
            b = abs_x + lit::<T>(k) / b;
        }
        gaussian / b / lit(SQRT_2PI)
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1).
///
/// # Arguments
/// * `x` - Input value
///
/// # Returns
/// The probability P(X <= x) for standard normal X, in range [0, 1].
///
/// # Accuracy
/// Absolute error below 1e-14 for all finite x.
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-15);
///
/// let cdf_neg = norm_cdf(-3.0_f64);
/// assert!(cdf_neg < 0.01);
///
/// let cdf_pos = norm_cdf(3.0_f64);
/// assert!(cdf_pos > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let tail = lower_tail(x.abs());
    if x > T::zero() {
        T::one() - tail
    } else {
        tail
    }
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_models::analytical::distributions::norm_pdf;
///
/// let pdf_0 = norm_pdf(0.0_f64);
/// assert!((pdf_0 - 0.3989422804).abs() < 1e-10);
///
/// let pdf_1 = norm_pdf(1.0_f64);
/// assert!((pdf_1 - 0.2419707245).abs() < 1e-10);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let half = lit::<T>(0.5);
    lit::<T>(FRAC_1_SQRT_2PI) * (-half * x * x).exp()
}
