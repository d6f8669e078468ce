//! Density clustering of accumulator peaks.
//!
//! The detector only depends on the [`Clusterer`] contract: one label per
//! input row, `0` for noise and a dense range `1..=N` for clusters.
//! [`Dbscan`] is the default implementation.

mod dbscan;

use common::Buffer2;

pub use dbscan::Dbscan;

/// Label assigned to points that belong to no cluster.
pub const NOISE: usize = 0;

/// Groups the rows of an `n x 2` coordinate table into clusters.
pub trait Clusterer {
    /// Returns one label per row of `points`: [`NOISE`] or a cluster id in
    /// `1..=N`, with no gaps.
    fn cluster(&self, points: &Buffer2<f64>, epsilon: f64, min_pts: usize) -> Vec<usize>;
}

impl<F> Clusterer for F
where
    F: Fn(&Buffer2<f64>, f64, usize) -> Vec<usize>,
{
    fn cluster(&self, points: &Buffer2<f64>, epsilon: f64, min_pts: usize) -> Vec<usize> {
        self(points, epsilon, min_pts)
    }
}

/// Number of clusters in a dense labeling, i.e. the largest label.
#[inline]
pub fn cluster_count(labels: &[usize]) -> usize {
    labels.iter().copied().max().unwrap_or(NOISE)
}
