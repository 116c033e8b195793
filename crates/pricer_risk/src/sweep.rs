//! Sensitivity sweeps.
//!
//! Each sweep holds every contract field fixed except the one (or two) being
//! varied and calls the engine once per grid point:
//!
//! - [`spot_ladder`]: price and intrinsic value vs spot
//! - [`volatility_ladder`]: price vs volatility
//! - [`greeks_ladder`]: Greeks vs spot
//! - [`price_vol_grid`]: price over a spot × volatility surface
//!
//! Grids come from [`SweepSpec`], which wraps
//! `pricer_core::math::grid::{linspace, scaled_range}`.

use num_traits::Float;
use pricer_core::math::grid::{linspace, scaled_range};
use pricer_core::types::GridError;
use pricer_models::analytical::{AnalyticalError, BlackScholes, Greeks};
use pricer_models::instruments::{intrinsic_value, ContractParameters};

use crate::error::RiskError;
use crate::parallel::ParallelConfig;

/// Bounds of a one-dimensional sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SweepRange<T> {
    /// Fixed interval `[low, high]`.
    Fixed {
        /// Lower bound
        low: T,
        /// Upper bound
        high: T,
    },
    /// Interval relative to the current value, `[c·low_factor, c·high_factor]`.
    Scaled {
        /// Multiplier for the lower bound
        low_factor: T,
        /// Multiplier for the upper bound
        high_factor: T,
    },
}

/// A one-dimensional sweep: range plus point count.
///
/// # Examples
/// ```
/// use pricer_risk::sweep::SweepSpec;
///
/// let spec = SweepSpec::spot_default();
/// let spots = spec.values(100.0_f64).unwrap();
/// assert_eq!(spots.len(), 50);
/// assert!((spots[0] - 70.0).abs() < 1e-12);
/// assert!((spots[49] - 130.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepSpec<T> {
    /// Interval covered by the sweep
    pub range: SweepRange<T>,
    /// Number of grid points, both ends included
    pub points: usize,
}

#[inline]
fn lit<T: Float>(x: f64) -> T {
    T::from(x).unwrap_or_else(T::nan)
}

impl<T: Float> SweepSpec<T> {
    /// Sweep over a fixed interval.
    pub fn fixed(low: T, high: T, points: usize) -> Self {
        Self {
            range: SweepRange::Fixed { low, high },
            points,
        }
    }

    /// Sweep relative to the current value of the varied field.
    pub fn scaled(low_factor: T, high_factor: T, points: usize) -> Self {
        Self {
            range: SweepRange::Scaled {
                low_factor,
                high_factor,
            },
            points,
        }
    }

    /// 50 spot points from 70% to 130% of the current spot.
    pub fn spot_default() -> Self {
        Self::scaled(lit(0.7), lit(1.3), 50)
    }

    /// 30 volatility points from 10% to 50%.
    pub fn volatility_default() -> Self {
        Self::fixed(lit(0.1), lit(0.5), 30)
    }

    /// Grid values; `current` anchors scaled ranges and is ignored otherwise.
    ///
    /// # Errors
    /// `GridError` if fewer than two points are requested or the bounds are
    /// non-finite or reversed.
    pub fn values(&self, current: T) -> Result<Vec<T>, GridError> {
        match self.range {
            SweepRange::Fixed { low, high } => linspace(low, high, self.points),
            SweepRange::Scaled {
                low_factor,
                high_factor,
            } => scaled_range(current, low_factor, high_factor, self.points),
        }
    }
}

/// Axes of a spot × volatility surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeatmapSpec<T> {
    /// Row axis
    pub spot: SweepSpec<T>,
    /// Column axis
    pub volatility: SweepSpec<T>,
}

impl<T: Float> HeatmapSpec<T> {
    /// 10 × 10 surface over 80%–120% of spot and 50%–150% of volatility.
    pub fn heatmap_default() -> Self {
        Self {
            spot: SweepSpec::scaled(lit(0.8), lit(1.2), 10),
            volatility: SweepSpec::scaled(lit(0.5), lit(1.5), 10),
        }
    }
}

/// Price (and intrinsic value) along one varied field.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Ladder<T> {
    /// Values of the varied field
    pub points: Vec<T>,
    /// Option price at each point
    pub prices: Vec<T>,
    /// Intrinsic value at each point
    pub intrinsic: Vec<T>,
}

impl<T: Float> Ladder<T> {
    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true when the ladder has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterates `(point, price, intrinsic)` rows.
    pub fn rows(&self) -> impl Iterator<Item = (T, T, T)> + '_ {
        self.points
            .iter()
            .zip(&self.prices)
            .zip(&self.intrinsic)
            .map(|((&x, &p), &i)| (x, p, i))
    }
}

fn ladder<T, F>(base: &ContractParameters<T>, points: &[T], bump: F) -> Result<Ladder<T>, RiskError>
where
    T: Float,
    F: Fn(&ContractParameters<T>, T) -> Result<ContractParameters<T>, AnalyticalError>,
{
    let mut prices = Vec::with_capacity(points.len());
    let mut intrinsic = Vec::with_capacity(points.len());

    for &x in points {
        let params = bump(base, x)?;
        prices.push(BlackScholes::new(params)?.price());
        intrinsic.push(intrinsic_value(&params));
    }

    Ok(Ladder {
        points: points.to_vec(),
        prices,
        intrinsic,
    })
}

/// Price and intrinsic value vs spot, everything else fixed.
///
/// # Errors
/// `RiskError::Analytical` if any spot is not strictly positive and finite.
pub fn spot_ladder<T: Float>(
    base: &ContractParameters<T>,
    spots: &[T],
) -> Result<Ladder<T>, RiskError> {
    tracing::debug!(points = spots.len(), "spot ladder");
    ladder(base, spots, ContractParameters::with_spot)
}

/// Price vs volatility, everything else fixed.
///
/// # Errors
/// `RiskError::Analytical` if any volatility is negative or non-finite.
pub fn volatility_ladder<T: Float>(
    base: &ContractParameters<T>,
    vols: &[T],
) -> Result<Ladder<T>, RiskError> {
    tracing::debug!(points = vols.len(), "volatility ladder");
    ladder(base, vols, ContractParameters::with_volatility)
}

/// Greeks along a spot grid.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GreeksLadder<T: Float> {
    /// Spot values
    pub points: Vec<T>,
    /// Greeks at each spot
    pub greeks: Vec<Greeks<T>>,
}

/// Greeks vs spot, everything else fixed.
///
/// # Errors
/// `RiskError::Analytical` if any spot is not strictly positive and finite.
pub fn greeks_ladder<T: Float>(
    base: &ContractParameters<T>,
    spots: &[T],
) -> Result<GreeksLadder<T>, RiskError> {
    tracing::debug!(points = spots.len(), "greeks ladder");
    let greeks = spots
        .iter()
        .map(|&s| -> Result<Greeks<T>, AnalyticalError> {
            Ok(BlackScholes::new(base.with_spot(s)?)?.greeks())
        })
        .collect::<Result<Vec<_>, AnalyticalError>>()?;

    Ok(GreeksLadder {
        points: spots.to_vec(),
        greeks,
    })
}

/// Option prices over a spot × volatility grid.
///
/// `prices[i][j]` is the price at `spots[i]` and `volatilities[j]`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PriceSurface<T> {
    /// Row axis
    pub spots: Vec<T>,
    /// Column axis
    pub volatilities: Vec<T>,
    /// Row-major prices
    pub prices: Vec<Vec<T>>,
}

impl<T: Float> PriceSurface<T> {
    /// Number of spot rows.
    pub fn rows(&self) -> usize {
        self.spots.len()
    }

    /// Number of volatility columns.
    pub fn cols(&self) -> usize {
        self.volatilities.len()
    }

    /// Price at row `i`, column `j`.
    pub fn get(&self, i: usize, j: usize) -> Option<T> {
        self.prices.get(i).and_then(|row| row.get(j)).copied()
    }

    /// Smallest and largest price on the surface.
    pub fn range(&self) -> Option<(T, T)> {
        self.prices.iter().flatten().fold(None, |acc, &p| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
        })
    }
}

/// Prices every (spot, volatility) pair, fanning out across Rayon workers
/// once the cell count reaches `config.parallel_threshold`.
///
/// Every cell equals a standalone `price` call on the same parameters.
///
/// # Errors
/// `RiskError::Analytical` if any spot or volatility is invalid. Axes are
/// checked before any pricing work is dispatched.
pub fn price_vol_grid<T>(
    base: &ContractParameters<T>,
    spots: &[T],
    volatilities: &[T],
    config: &ParallelConfig,
) -> Result<PriceSurface<T>, RiskError>
where
    T: Float + Send + Sync,
{
    for &s in spots {
        base.with_spot(s)?;
    }
    for &v in volatilities {
        base.with_volatility(v)?;
    }

    let cols = volatilities.len();
    let cells: Vec<(T, T)> = spots
        .iter()
        .flat_map(|&s| volatilities.iter().map(move |&v| (s, v)))
        .collect();

    tracing::debug!(
        rows = spots.len(),
        cols,
        parallel = config.should_parallelize(cells.len()),
        "price surface"
    );

    let flat = config
        .map(&cells, |&(s, v)| -> Result<T, AnalyticalError> {
            let params = base.with_spot(s)?.with_volatility(v)?;
            Ok(BlackScholes::new(params)?.price())
        })
        .into_iter()
        .collect::<Result<Vec<T>, AnalyticalError>>()?;

    let prices = if cols == 0 {
        vec![Vec::new(); spots.len()]
    } else {
        flat.chunks(cols).map(<[T]>::to_vec).collect()
    };

    Ok(PriceSurface {
        spots: spots.to_vec(),
        volatilities: volatilities.to_vec(),
        prices,
    })
}
