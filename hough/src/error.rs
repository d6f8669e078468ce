//! Error types for line detection.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors that can occur while detecting lines.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: String,
    },

    #[error("Edge data has {actual} cells, expected {expected} (rows * columns)")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Failed to allocate {what}: {source}")]
    Allocation {
        what: &'static str,
        #[source]
        source: TryReserveError,
    },

    #[error("Clusterer returned {actual} labels for {expected} peaks")]
    ClusterLabelMismatch { expected: usize, actual: usize },

    #[error("Cluster {0} has no member peaks")]
    EmptyCluster(usize),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message() {
        let err = Error::invalid("min_pts", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'min_pts': must be at least 1"
        );
    }

    #[test]
    fn test_dimension_mismatch_message() {
        let err = Error::DimensionMismatch {
            expected: 12,
            actual: 10,
        };
        assert_eq!(
            err.to_string(),
            "Edge data has 10 cells, expected 12 (rows * columns)"
        );
    }

    #[test]
    fn test_cluster_errors_message() {
        let err = Error::ClusterLabelMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Clusterer returned 3 labels for 4 peaks");
        assert_eq!(
            Error::EmptyCluster(2).to_string(),
            "Cluster 2 has no member peaks"
        );
    }

    #[test]
    fn test_allocation_error_keeps_source() {
        let source = Vec::<u8>::new().try_reserve(usize::MAX).unwrap_err();
        let err = Error::Allocation {
            what: "accumulator",
            source,
        };
        assert!(err.to_string().starts_with("Failed to allocate accumulator"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
