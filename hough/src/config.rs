//! Configuration for the line detector.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Parameters of one detection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HoughConfig {
    /// Relative vote threshold `p` in `(0, 1]`. Accumulator cells with fewer
    /// than `max_votes * p` votes are dropped. Values above 1 are clamped.
    pub threshold_fraction: f32,
    /// Neighborhood radius used when clustering peaks, in accumulator
    /// cells (degrees along the angle axis, pixels along the radius axis).
    pub epsilon: f64,
    /// Minimum neighborhood size (the peak itself included) for a peak to
    /// seed a cluster.
    pub min_pts: usize,
    /// Vote rows on the rayon pool. Results are identical to the serial sweep.
    pub parallel: bool,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            threshold_fraction: 0.5,
            epsilon: 5.0,
            min_pts: 2,
            parallel: true,
        }
    }
}

impl HoughConfig {
    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<()> {
        let p = self.threshold_fraction;
        if !p.is_finite() || p <= 0.0 {
            return Err(Error::invalid(
                "threshold_fraction",
                format!("must be a finite value above 0, got {p}"),
            ));
        }
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::invalid(
                "epsilon",
                format!("must be a finite value above 0, got {}", self.epsilon),
            ));
        }
        if self.min_pts == 0 {
            return Err(Error::invalid("min_pts", "must be at least 1"));
        }
        Ok(())
    }

    /// Threshold fraction clamped into `(0, 1]`.
    #[inline]
    pub fn clamped_threshold_fraction(&self) -> f32 {
        self.threshold_fraction.min(1.0)
    }
}
