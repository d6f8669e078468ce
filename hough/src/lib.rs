//! Hough - straight line detection in edge images.
//!
//! Edge pixels vote into a 180 x `r_max` (angle, radius) accumulator. Cells
//! that survive a relative threshold are grouped by density clustering, and
//! the strongest cell of every cluster becomes one line, reported both in
//! polar form and as slope and intercept.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hough::{Buffer2, HoughConfig, HoughDetector};
//!
//! let edges: Buffer2<f32> = load_edge_map();
//! let detector = HoughDetector::from_config(HoughConfig::default());
//! let result = detector.detect(&edges)?;
//!
//! println!("Found {} lines", result.lines.len());
//! ```

pub mod accumulator;
pub mod cluster;
mod config;
mod detector;
mod error;
pub mod lines;
pub mod peaks;
pub(crate) mod spatial;

#[cfg(test)]
pub(crate) mod testing;

pub use common::Buffer2;

pub use accumulator::Accumulator;
pub use cluster::{Clusterer, Dbscan, NOISE};
pub use config::HoughConfig;
pub use detector::{detect_lines, DetectionResult, HoughDetector, HoughDiagnostics};
pub use error::{Error, Result};
pub use lines::{Line, LineSet};
pub use peaks::{Peak, PeakClusters, PeakList};
