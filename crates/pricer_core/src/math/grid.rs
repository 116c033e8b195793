//! Evenly spaced evaluation grids.
//!
//! Sensitivity sweeps hold every contract field fixed except one (or two)
//! and evaluate the engine on a grid of values for the varying field. This
//! module builds those grids.

use num_traits::Float;

use crate::types::GridError;

/// Minimum number of points for a grid spanning an interval.
pub const MIN_GRID_POINTS: usize = 2;

/// Returns `n` evenly spaced points over `[start, end]`, both ends included.
///
/// The last point is exactly `end` (no accumulated rounding).
///
/// # Errors
/// - `GridError::InsufficientPoints` if `n < 2`
/// - `GridError::NonFiniteBound` if either bound is NaN or infinite
/// - `GridError::ReversedBounds` if `start > end`
///
/// # Examples
/// ```
/// use pricer_core::math::grid::linspace;
///
/// let xs = linspace(0.1_f64, 0.5, 5).unwrap();
/// assert_eq!(xs.len(), 5);
/// assert!((xs[2] - 0.3).abs() < 1e-12);
/// assert_eq!(xs[4], 0.5);
///
/// assert!(linspace(0.0_f64, 1.0, 1).is_err());
/// ```
pub fn linspace<T: Float>(start: T, end: T, n: usize) -> Result<Vec<T>, GridError> {
    if n < MIN_GRID_POINTS {
        return Err(GridError::InsufficientPoints {
            got: n,
            need: MIN_GRID_POINTS,
        });
    }

    if !start.is_finite() || !end.is_finite() {
        return Err(GridError::NonFiniteBound {
            start: start.to_f64().unwrap_or(f64::NAN),
            end: end.to_f64().unwrap_or(f64::NAN),
        });
    }

    if start > end {
        return Err(GridError::ReversedBounds {
            start: start.to_f64().unwrap_or(f64::NAN),
            end: end.to_f64().unwrap_or(f64::NAN),
        });
    }

    let last = n - 1;
    let steps = T::from(last).unwrap_or_else(T::one);
    let width = end - start;

    let points = (0..n)
        .map(|i| {
            if i == last {
                end
            } else {
                let frac = T::from(i).unwrap_or_else(T::zero) / steps;
                start + width * frac
            }
        })
        .collect();

    Ok(points)
}

/// Returns `n` points spanning `[center * low_factor, center * high_factor]`.
///
/// Used for ranges expressed relative to the current market, e.g. spot
/// from 70% to 130% of today's level.
///
/// # Examples
/// ```
/// use pricer_core::math::grid::scaled_range;
///
/// let spots = scaled_range(100.0_f64, 0.8, 1.2, 3).unwrap();
/// assert!((spots[0] - 80.0).abs() < 1e-12);
/// assert!((spots[1] - 100.0).abs() < 1e-12);
/// assert!((spots[2] - 120.0).abs() < 1e-12);
/// ```
pub fn scaled_range<T: Float>(
    center: T,
    low_factor: T,
    high_factor: T,
    n: usize,
) -> Result<Vec<T>, GridError> {
    linspace(center * low_factor, center * high_factor, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(70.0_f64, 130.0, 50).unwrap();
        assert_eq!(xs.len(), 50);
        assert_eq!(xs[0], 70.0);
        assert_eq!(xs[49], 130.0);
    }

    #[test]
    fn test_linspace_even_spacing() {
        let xs = linspace(0.0_f64, 1.0, 11).unwrap();
        for w in xs.windows(2) {
            assert_relative_eq!(w[1] - w[0], 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_linspace_two_points() {
        let xs = linspace(1.0_f64, 2.0, 2).unwrap();
        assert_eq!(xs, vec![1.0, 2.0]);
    }

    #[test]
    fn test_linspace_degenerate_interval() {
        let xs = linspace(5.0_f64, 5.0, 4).unwrap();
        assert!(xs.iter().all(|&x| x == 5.0));
    }

    #[test]
    fn test_linspace_insufficient_points() {
        for n in [0, 1] {
            match linspace(0.0_f64, 1.0, n) {
                Err(GridError::InsufficientPoints { got, need }) => {
                    assert_eq!(got, n);
                    assert_eq!(need, 2);
                }
                other => panic!("Expected InsufficientPoints, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_linspace_rejects_non_finite() {
        assert!(matches!(
            linspace(f64::NAN, 1.0, 5),
            Err(GridError::NonFiniteBound { .. })
        ));
        assert!(matches!(
            linspace(0.0, f64::INFINITY, 5),
            Err(GridError::NonFiniteBound { .. })
        ));
    }

    #[test]
    fn test_linspace_rejects_reversed() {
        assert!(matches!(
            linspace(2.0_f64, 1.0, 5),
            Err(GridError::ReversedBounds { .. })
        ));
    }

    #[test]
    fn test_linspace_monotonic() {
        let xs = linspace(0.1_f64, 0.5, 30).unwrap();
        for w in xs.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn test_scaled_range_heatmap_defaults() {
        // 0.5σ to 1.5σ around σ = 0.2
        let vols = scaled_range(0.2_f64, 0.5, 1.5, 10).unwrap();
        assert_relative_eq!(vols[0], 0.1, epsilon = 1e-12);
        assert_relative_eq!(vols[9], 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_f32_compatibility() {
        let xs = linspace(0.0_f32, 1.0, 3).unwrap();
        assert_eq!(xs[2], 1.0_f32);
        assert!((xs[1] - 0.5).abs() < 1e-6);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_linspace_shape(
                start in -1e3_f64..1e3,
                width in 0.0_f64..1e3,
                n in 2_usize..200
            ) {
                let end = start + width;
                let xs = linspace(start, end, n).unwrap();
                let step = (end - start) / (n - 1) as f64;

                prop_assert_eq!(xs.len(), n);
                prop_assert_eq!(xs[0], start);
                prop_assert_eq!(xs[n - 1], end);
                for w in xs.windows(2) {
                    prop_assert!((w[1] - w[0] - step).abs() < 1e-9);
                }
            }
        }
    }
}
