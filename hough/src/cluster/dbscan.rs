use common::Buffer2;
use glam::DVec2;

use super::{Clusterer, NOISE};
use crate::spatial::KdTree;

/// DBSCAN over 2D points with Euclidean distance.
///
/// A point is core when at least `min_pts` points, itself included, lie
/// within `epsilon` of it. Clusters grow from core points in row order, so
/// ids are assigned in order of each cluster's first core point. A border
/// point reachable from several clusters keeps the first one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Dbscan;

impl Dbscan {
    pub fn new() -> Self {
        Self
    }
}

impl Clusterer for Dbscan {
    fn cluster(&self, points: &Buffer2<f64>, epsilon: f64, min_pts: usize) -> Vec<usize> {
        assert_eq!(points.columns(), 2, "points must be an n x 2 table");

        let positions: Vec<DVec2> = points
            .rows_iter()
            .map(|row| DVec2::new(row[0], row[1]))
            .collect();
        let Some(tree) = KdTree::build(&positions) else {
            return Vec::new();
        };

        let n = positions.len();
        let mut labels = vec![NOISE; n];
        let mut visited = vec![false; n];
        let mut neighbors = Vec::new();
        let mut seeds = Vec::new();
        let mut cluster_id = NOISE;

        for i in 0..n {
            if visited[i] {
                continue;
            }
            visited[i] = true;

            tree.radius_indices_into(positions[i], epsilon, &mut neighbors);
            if neighbors.len() < min_pts {
                continue;
            }

            cluster_id += 1;
            labels[i] = cluster_id;
            seeds.clear();
            seeds.extend_from_slice(&neighbors);

            while let Some(j) = seeds.pop() {
                if labels[j] == NOISE {
                    labels[j] = cluster_id;
                }
                if visited[j] {
                    continue;
                }
                visited[j] = true;

                tree.radius_indices_into(positions[j], epsilon, &mut neighbors);
                if neighbors.len() >= min_pts {
                    seeds.extend(
                        neighbors
                            .iter()
                            .copied()
                            .filter(|&k| !visited[k] || labels[k] == NOISE),
                    );
                }
            }
        }

        tracing::trace!("DBSCAN labeled {} points into {} clusters", n, cluster_id);

        labels
    }
}
