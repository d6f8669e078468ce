//! Peak extraction from a thresholded accumulator and peak clustering.

#[cfg(test)]
mod tests;

use common::{cat_columns, Buffer2};

use crate::accumulator::Accumulator;
use crate::cluster::{cluster_count, Clusterer, NOISE};
use crate::error::{Error, Result};

/// Offset added to angle and radius bucket indices in peak coordinates.
/// Radius 0 becomes 1, so coordinates are 1-based like matrix subscripts.
pub const COORDINATE_OFFSET: usize = 1;

/// Cells need strictly more votes than this to count as a peak. Lone votes
/// are the accumulator noise floor.
const NOISE_FLOOR_VOTES: u32 = 1;

/// One accumulator cell that survived thresholding.
///
/// Stores the bucket indices; the 1-based peak coordinates are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Peak {
    angle_bucket: usize,
    radius_bucket: usize,
    votes: u32,
}

impl Peak {
    pub fn new(angle_bucket: usize, radius_bucket: usize, votes: u32) -> Self {
        Self {
            angle_bucket,
            radius_bucket,
            votes,
        }
    }

    /// Angle coordinate: bucket plus [`COORDINATE_OFFSET`].
    #[inline]
    pub fn angle(&self) -> usize {
        self.angle_bucket + COORDINATE_OFFSET
    }

    /// Radius coordinate: bucket plus [`COORDINATE_OFFSET`].
    #[inline]
    pub fn radius(&self) -> usize {
        self.radius_bucket + COORDINATE_OFFSET
    }

    #[inline]
    pub fn votes(&self) -> u32 {
        self.votes
    }

    /// Angle bucket in whole degrees, `0..180`.
    #[inline]
    pub fn angle_degrees(&self) -> usize {
        self.angle_bucket
    }

    /// Radius bucket, `0..r_max`.
    #[inline]
    pub fn radius_bucket(&self) -> usize {
        self.radius_bucket
    }
}

/// Peaks in angle-major, radius-minor scan order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PeakList {
    peaks: Vec<Peak>,
}

impl PeakList {
    /// Scans the accumulator angle by angle and keeps every cell holding
    /// more than one vote.
    pub fn from_accumulator(accumulator: &Accumulator) -> Self {
        let votes = accumulator.votes();
        let mut peaks = Vec::new();

        for (angle, row) in votes.rows_iter().enumerate() {
            for (radius, &count) in row.iter().enumerate() {
                if count > NOISE_FLOOR_VOTES {
                    peaks.push(Peak::new(angle, radius, count));
                }
            }
        }

        Self { peaks }
    }

    pub fn from_peaks(peaks: Vec<Peak>) -> Self {
        Self { peaks }
    }

    /// `L x 2` table of `(angle, radius)` coordinates handed to the clusterer.
    pub fn coordinates(&self) -> Buffer2<f64> {
        let angles: Vec<f64> = self.peaks.iter().map(|p| p.angle() as f64).collect();
        let radii: Vec<f64> = self.peaks.iter().map(|p| p.radius() as f64).collect();
        cat_columns(&angles, &radii)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Peak] {
        &self.peaks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Peak> {
        self.peaks.iter()
    }
}

/// Peaks together with their cluster labels.
#[derive(Debug, Clone, Default)]
pub struct PeakClusters {
    pub peaks: PeakList,
    /// One label per peak, [`NOISE`] or `1..=cluster_count`.
    pub labels: Vec<usize>,
    pub cluster_count: usize,
}

impl PeakClusters {
    pub fn noise_count(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE).count()
    }
}

/// Turns accumulator peaks into labeled clusters.
///
/// The clusterer is not consulted when no peak survives.
pub fn extract_clusters<C>(
    accumulator: &Accumulator,
    clusterer: &C,
    epsilon: f64,
    min_pts: usize,
) -> Result<PeakClusters>
where
    C: Clusterer + ?Sized,
{
    let peaks = PeakList::from_accumulator(accumulator);
    if peaks.is_empty() {
        tracing::debug!("No accumulator cell above the noise floor");
        return Ok(PeakClusters::default());
    }

    let labels = clusterer.cluster(&peaks.coordinates(), epsilon, min_pts);
    if labels.len() != peaks.len() {
        return Err(Error::ClusterLabelMismatch {
            expected: peaks.len(),
            actual: labels.len(),
        });
    }

    let cluster_count = cluster_count(&labels);
    tracing::debug!("Clustered {} peaks into {} clusters", peaks.len(), cluster_count);

    Ok(PeakClusters {
        peaks,
        labels,
        cluster_count,
    })
}
