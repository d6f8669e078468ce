//! Tests for the spatial module (k-d tree).

use super::*;

fn radius_search_indices(tree: &KdTree, query: DVec2, radius: f64) -> Vec<usize> {
    let mut buf = Vec::new();
    tree.radius_indices_into(query, radius, &mut buf);
    buf.sort();
    buf
}

fn brute_force(points: &[DVec2], query: DVec2, radius: f64) -> Vec<usize> {
    points
        .iter()
        .enumerate()
        .filter(|(_, p)| p.distance_squared(query) <= radius * radius)
        .map(|(i, _)| i)
        .collect()
}

#[test]
fn test_kdtree_build_empty() {
    assert!(KdTree::build(&[]).is_none());
}

#[test]
fn test_kdtree_build_single_point() {
    let tree = KdTree::build(&[DVec2::new(1.0, 2.0)]).unwrap();
    assert_eq!(radius_search_indices(&tree, DVec2::new(1.0, 2.0), 0.0), vec![0]);
}

#[test]
fn test_radius_search_boundary_inclusive() {
    let points = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(3.0, 4.0),
        DVec2::new(3.0, 4.1),
    ];
    let tree = KdTree::build(&points).unwrap();
    assert_eq!(radius_search_indices(&tree, DVec2::ZERO, 5.0), vec![0, 1]);
}

#[test]
fn test_radius_search_duplicate_points() {
    let points = vec![DVec2::new(2.0, 2.0); 4];
    let tree = KdTree::build(&points).unwrap();
    assert_eq!(
        radius_search_indices(&tree, DVec2::new(2.0, 2.0), 0.5),
        vec![0, 1, 2, 3]
    );
}

#[test]
fn test_radius_search_matches_brute_force_on_grid() {
    // Integer lattice like accumulator coordinates.
    let points: Vec<DVec2> = (1..=12)
        .flat_map(|a| (1..=9).map(move |r| DVec2::new(a as f64, (r * r % 7) as f64)))
        .collect();
    let tree = KdTree::build(&points).unwrap();

    for query in [
        DVec2::new(1.0, 1.0),
        DVec2::new(6.0, 3.0),
        DVec2::new(12.0, 0.0),
        DVec2::new(-4.0, 20.0),
    ] {
        for radius in [0.0, 1.0, 1.5, 2.0, 4.0] {
            assert_eq!(
                radius_search_indices(&tree, query, radius),
                brute_force(&points, query, radius),
                "query {query:?}, radius {radius}"
            );
        }
    }
}
