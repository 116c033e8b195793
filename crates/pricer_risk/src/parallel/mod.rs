//! Rayon-based parallelisation utilities.
//!
//! This module provides helpers for fanning independent engine calls out
//! across a Rayon thread pool. Small workloads stay on the calling thread;
//! the crossover is set by [`ParallelConfig::parallel_threshold`].

use rayon::prelude::*;

/// Minimum number of items handed to one Rayon task.
///
/// Empirically tuned for cache efficiency.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Item count at which work moves onto the Rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 100;

/// Configuration for parallel execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParallelConfig {
    /// Minimum items per Rayon task
    pub batch_size: usize,
    /// Minimum items before using parallelism
    pub parallel_threshold: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl ParallelConfig {
    /// Creates a new parallel configuration.
    pub fn new(batch_size: usize, parallel_threshold: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
            parallel_threshold,
        }
    }

    /// Configuration that never leaves the calling thread.
    pub fn sequential() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, usize::MAX)
    }

    /// Returns whether to use parallel processing for the given item count.
    #[inline]
    pub fn should_parallelize(&self, n_items: usize) -> bool {
        n_items >= self.parallel_threshold
    }

    /// Maps `items` through `mapper`, in parallel when the workload is large
    /// enough. Output order always matches input order.
    pub fn map<T, R, F>(&self, items: &[T], mapper: F) -> Vec<R>
    where
        T: Sync,
        R: Send,
        F: Fn(&T) -> R + Sync + Send,
    {
        if self.should_parallelize(items.len()) {
            tracing::trace!(
                items = items.len(),
                batch_size = self.batch_size,
                "dispatching to rayon"
            );
            items
                .par_iter()
                .with_min_len(self.batch_size.max(1))
                .map(mapper)
                .collect()
        } else {
            items.iter().map(mapper).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_config_default() {
        let config = ParallelConfig::default();
        assert_eq!(config.batch_size, DEFAULT_BATCH_SIZE);
        assert_eq!(config.parallel_threshold, DEFAULT_PARALLEL_THRESHOLD);
    }

    #[test]
    fn test_new_clamps_batch_size() {
        let config = ParallelConfig::new(0, 10);
        assert_eq!(config.batch_size, 1);
    }

    #[test]
    fn test_should_parallelize() {
        let config = ParallelConfig::default();
        assert!(!config.should_parallelize(50));
        assert!(config.should_parallelize(100));
        assert!(config.should_parallelize(1000));
        assert!(!ParallelConfig::sequential().should_parallelize(1_000_000));
    }

    #[test]
    fn test_map_preserves_order_both_paths() {
        let items: Vec<u64> = (0..500).collect();
        let expected: Vec<u64> = items.iter().map(|x| x * x).collect();

        let parallel = ParallelConfig::new(8, 1).map(&items, |x| x * x);
        let sequential = ParallelConfig::sequential().map(&items, |x| x * x);

        assert_eq!(parallel, expected);
        assert_eq!(sequential, expected);
    }
}
