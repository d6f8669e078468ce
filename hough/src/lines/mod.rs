//! Conversion of clustered peaks into analytic lines.
//!
//! A peak at angle `theta` and radius `r` describes the line
//! `x * sin(theta) + y * cos(theta) = r`, where `x` is the 1-based column
//! and `y` the 1-based row. Solving for `y` gives the slope-intercept form
//! `y = slope * x + intercept`.


use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::peaks::{Peak, PeakList};

/// Peaks this close to 90 degrees are nudged by the same amount so the
/// cosine in the slope never vanishes.
const VERTICAL_GUARD_DEG: f64 = 1e-5;

/// One detected line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
    /// Perpendicular distance from the origin, in pixels.
    pub distance: f64,
    /// Normal angle in radians.
    pub angle: f64,
}

impl Line {
    /// Builds the line for an accumulator cell given in degrees and pixels.
    pub fn from_polar_degrees(angle_deg: f64, distance: f64) -> Self {
        let angle_deg = if (90.0 - angle_deg).abs() < VERTICAL_GUARD_DEG {
            angle_deg + VERTICAL_GUARD_DEG
        } else {
            angle_deg
        };

        let angle = angle_deg.to_radians();
        let (sin, cos) = angle.sin_cos();
        Self {
            slope: sin / -cos,
            intercept: -distance / -cos,
            distance,
            angle,
        }
    }

    /// Signed offset of the point `(x, y)` from the line along its normal.
    #[inline]
    pub fn residual(&self, x: f64, y: f64) -> f64 {
        let (sin, cos) = self.angle.sin_cos();
        x * sin + y * cos - self.distance
    }

    /// Row coordinate of the line at `column`.
    #[inline]
    pub fn row_at(&self, column: f64) -> f64 {
        self.slope * column + self.intercept
    }
}

/// Lines found in one image, one per cluster.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSet {
    lines: Vec<Line>,
}

impl LineSet {
    pub fn new(lines: Vec<Line>) -> Self {
        Self { lines }
    }

    /// Number of lines, equal to the number of clusters.
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn slopes(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.slope).collect()
    }

    pub fn intercepts(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.intercept).collect()
    }

    pub fn distances(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.distance).collect()
    }

    pub fn angles(&self) -> Vec<f64> {
        self.lines.iter().map(|l| l.angle).collect()
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Strongest peak labeled `cluster_id`; ties go to the earliest in scan order.
pub fn representative_peak(peaks: &PeakList, labels: &[usize], cluster_id: usize) -> Option<Peak> {
    let mut best: Option<Peak> = None;
    for (peak, _) in peaks
        .iter()
        .zip(labels)
        .filter(|&(_, &label)| label == cluster_id)
    {
        if best.map_or(true, |b| peak.votes() > b.votes()) {
            best = Some(*peak);
        }
    }
    best
}

/// Builds one line per cluster `1..=cluster_count` from its representative peak.
pub fn extract_lines(peaks: &PeakList, labels: &[usize], cluster_count: usize) -> Result<LineSet> {
    let lines = (1..=cluster_count)
        .map(|cluster_id| {
            let peak = representative_peak(peaks, labels, cluster_id)
                .ok_or(Error::EmptyCluster(cluster_id))?;
            Ok(Line::from_polar_degrees(
                peak.angle_degrees() as f64,
                peak.radius_bucket() as f64,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(LineSet::new(lines))
}
