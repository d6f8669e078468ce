//! Line detector and related types.
//!
//! [`HoughDetector`] runs the full pipeline on one edge image:
//! accumulation, peak clustering and line extraction. Intermediate buffers
//! are owned by the call and dropped on every return path.


use common::Buffer2;

use crate::accumulator::Accumulator;
use crate::cluster::{Clusterer, Dbscan};
use crate::config::HoughConfig;
use crate::error::{Error, Result};
use crate::lines::{extract_lines, LineSet};
use crate::peaks::extract_clusters;

/// Result of line detection with diagnostics.
#[derive(Debug, Clone)]
pub struct DetectionResult {
    /// One line per cluster, in cluster id order.
    pub lines: LineSet,
    pub diagnostics: HoughDiagnostics,
}

/// Counts from each stage of the pipeline, for debugging and tuning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HoughDiagnostics {
    /// Pixels above the edge epsilon.
    pub edge_pixels: usize,
    /// Number of radius buckets.
    pub r_max: usize,
    /// Strongest accumulator cell before thresholding.
    pub max_votes: u32,
    /// Absolute vote threshold applied to the accumulator.
    pub threshold: f64,
    /// Accumulator cells left non-zero after thresholding.
    pub surviving_cells: usize,
    /// Cells above the single-vote noise floor handed to clustering.
    pub peaks: usize,
    /// Peaks labeled as noise by the clusterer.
    pub noise_peaks: usize,
    /// Number of clusters, equal to the number of lines.
    pub clusters: usize,
}

/// Hough line detector, generic over the peak clusterer.
///
/// # Example
///
/// ```rust,ignore
/// use hough::{HoughConfig, HoughDetector};
///
/// let detector = HoughDetector::from_config(HoughConfig {
///     threshold_fraction: 0.5,
///     epsilon: 3.0,
///     min_pts: 2,
///     ..Default::default()
/// });
/// let result = detector.detect(&edges)?;
/// for line in &result.lines {
///     println!("y = {:.3} x + {:.3}", line.slope, line.intercept);
/// }
/// ```
#[derive(Debug, Default)]
pub struct HoughDetector<C = Dbscan> {
    config: HoughConfig,
    clusterer: C,
}

impl HoughDetector {
    /// Detector with default configuration and DBSCAN clustering.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: HoughConfig) -> Self {
        Self {
            config,
            clusterer: Dbscan,
        }
    }
}

impl<C: Clusterer> HoughDetector<C> {
    /// Detector that clusters peaks with `clusterer` instead of DBSCAN.
    pub fn with_clusterer(config: HoughConfig, clusterer: C) -> Self {
        Self { config, clusterer }
    }

    pub fn config(&self) -> &HoughConfig {
        &self.config
    }

    /// Detect lines in an edge image.
    pub fn detect(&self, edges: &Buffer2<f32>) -> Result<DetectionResult> {
        self.detect_cells(edges.cells(), edges.rows(), edges.columns())
    }

    /// Detect lines in a borrowed row-major edge buffer of `rows * columns`
    /// cells.
    pub fn detect_cells(
        &self,
        cells: &[f32],
        rows: usize,
        columns: usize,
    ) -> Result<DetectionResult> {
        self.config.validate()?;
        let expected = rows
            .checked_mul(columns)
            .ok_or_else(|| Error::invalid("rows", "rows * columns overflows"))?;
        if cells.len() != expected {
            return Err(Error::DimensionMismatch {
                expected,
                actual: cells.len(),
            });
        }
        if self.config.threshold_fraction > 1.0 {
            tracing::debug!(
                "Clamping threshold fraction {} to 1",
                self.config.threshold_fraction
            );
        }

        // Step 1: Vote
        let accumulator = Accumulator::build_from_cells(
            cells,
            rows,
            columns,
            self.config.clamped_threshold_fraction(),
            self.config.parallel,
        )?;

        // Step 2: Cluster peaks
        let clusters = extract_clusters(
            &accumulator,
            &self.clusterer,
            self.config.epsilon,
            self.config.min_pts,
        )?;

        // Step 3: One line per cluster
        let lines = extract_lines(&clusters.peaks, &clusters.labels, clusters.cluster_count)?;

        let diagnostics = HoughDiagnostics {
            edge_pixels: accumulator.edge_pixels(),
            r_max: accumulator.r_max(),
            max_votes: accumulator.max_votes(),
            threshold: accumulator.threshold(),
            surviving_cells: accumulator.nonzero_cells(),
            peaks: clusters.peaks.len(),
            noise_peaks: clusters.noise_count(),
            clusters: clusters.cluster_count,
        };
        tracing::debug!(
            "Detected {} lines from {} peaks ({} noise)",
            lines.len(),
            diagnostics.peaks,
            diagnostics.noise_peaks
        );

        Ok(DetectionResult { lines, diagnostics })
    }
}

/// Detect lines in a row-major edge buffer with DBSCAN peak clustering.
///
/// Zero-sized input yields an empty [`LineSet`].
pub fn detect_lines(
    edges: &[f32],
    rows: usize,
    columns: usize,
    config: &HoughConfig,
) -> Result<LineSet> {
    HoughDetector::from_config(*config)
        .detect_cells(edges, rows, columns)
        .map(|result| result.lines)
}
