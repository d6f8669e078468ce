//! Tests for peak extraction.

use std::cell::Cell;

use super::*;
use crate::accumulator::ANGLE_BUCKETS;
use crate::cluster::Dbscan;
use crate::testing::diagonal_image;

fn sample_accumulator() -> Accumulator {
    let mut votes = Buffer2::<u32>::new_default(ANGLE_BUCKETS, 10);
    votes[(0, 3)] = 5;
    votes[(0, 4)] = 1; // noise floor
    votes[(2, 0)] = 2;
    votes[(179, 9)] = 7;
    Accumulator::from_votes(votes)
}

#[test]
fn test_peaks_in_scan_order_with_offset() {
    let peaks = PeakList::from_accumulator(&sample_accumulator());
    assert_eq!(
        peaks.as_slice(),
        &[
            Peak::new(0, 3, 5),
            Peak::new(2, 0, 2),
            Peak::new(179, 9, 7),
        ]
    );
    let last = peaks.as_slice()[2];
    assert_eq!((last.angle(), last.radius()), (180, 10));
    assert_eq!((last.angle_degrees(), last.radius_bucket()), (179, 9));
}

#[test]
fn test_peak_at_grid_origin() {
    // Bucket (0, 0) is the smallest representable peak.
    let peak = Peak::new(0, 0, 3);
    assert_eq!((peak.angle(), peak.radius()), (1, 1));
    assert_eq!((peak.angle_degrees(), peak.radius_bucket()), (0, 0));
    assert_eq!(peak.votes(), 3);

    let table = PeakList::from_peaks(vec![peak]).coordinates();
    assert_eq!(table.row(0), &[1.0, 1.0]);
}

#[test]
fn test_coordinates_table() {
    let peaks = PeakList::from_accumulator(&sample_accumulator());
    let table = peaks.coordinates();
    assert_eq!(table.rows(), 3);
    assert_eq!(table.columns(), 2);
    assert_eq!(table.row(0), &[1.0, 4.0]);
    assert_eq!(table.row(2), &[180.0, 10.0]);
}

#[test]
fn test_empty_accumulator_skips_clusterer() {
    let acc = Accumulator::from_votes(Buffer2::new_default(ANGLE_BUCKETS, 4));
    let clusterer = |_: &Buffer2<f64>, _: f64, _: usize| -> Vec<usize> {
        panic!("clusterer must not run without peaks")
    };
    let clusters = extract_clusters(&acc, &clusterer, 2.0, 2).unwrap();
    assert!(clusters.peaks.is_empty());
    assert!(clusters.labels.is_empty());
    assert_eq!(clusters.cluster_count, 0);
}

#[test]
fn test_only_single_votes_gives_no_peaks() {
    let acc = Accumulator::from_votes(Buffer2::new(ANGLE_BUCKETS, 3, vec![1; ANGLE_BUCKETS * 3]));
    assert!(PeakList::from_accumulator(&acc).is_empty());
}

#[test]
fn test_clusterer_receives_parameters_and_sets_count() {
    let calls = Cell::new(0);
    let clusterer = |points: &Buffer2<f64>, epsilon: f64, min_pts: usize| {
        calls.set(calls.get() + 1);
        assert_eq!(points.rows(), 3);
        assert_eq!(epsilon, 2.5);
        assert_eq!(min_pts, 4);
        vec![2, 0, 1]
    };

    let clusters = extract_clusters(&sample_accumulator(), &clusterer, 2.5, 4).unwrap();
    assert_eq!(calls.get(), 1);
    assert_eq!(clusters.labels, vec![2, 0, 1]);
    assert_eq!(clusters.cluster_count, 2);
    assert_eq!(clusters.noise_count(), 1);
}

#[test]
fn test_label_count_mismatch_is_an_error() {
    let clusterer = |_: &Buffer2<f64>, _: f64, _: usize| vec![1];
    let err = extract_clusters(&sample_accumulator(), &clusterer, 1.0, 1).unwrap_err();
    assert!(matches!(
        err,
        Error::ClusterLabelMismatch {
            expected: 3,
            actual: 1
        }
    ));
}

#[test]
fn test_diagonal_peaks_form_one_cluster() {
    let acc = Accumulator::build(&diagonal_image(50), 0.5, false).unwrap();
    let clusters = extract_clusters(&acc, &Dbscan, 3.0, 2).unwrap();

    assert_eq!(clusters.peaks.len(), 3);
    assert_eq!(clusters.labels, vec![1, 1, 1]);
    assert_eq!(clusters.cluster_count, 1);
}
