//! 2D k-d tree for radius queries over accumulator peaks.

#[cfg(test)]
mod tests;

use glam::DVec2;

/// A 2D k-d tree built once over a fixed point set and queried many times.
#[derive(Debug)]
pub struct KdTree {
    nodes: Vec<KdNode>,
    points: Vec<DVec2>,
}

#[derive(Debug, Clone)]
struct KdNode {
    /// Index into the points array
    point_idx: usize,
    left: Option<usize>,
    right: Option<usize>,
    /// Split dimension (0 = x, 1 = y)
    split_dim: usize,
}

impl KdTree {
    /// Build a balanced tree by median splits. Returns `None` for an empty
    /// point set.
    pub fn build(points: &[DVec2]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut indices: Vec<usize> = (0..points.len()).collect();
        let mut nodes = Vec::with_capacity(points.len());
        Self::build_recursive(points, &mut indices, 0, &mut nodes);

        Some(Self {
            nodes,
            points: points.to_vec(),
        })
    }

    fn build_recursive(
        points: &[DVec2],
        indices: &mut [usize],
        depth: usize,
        nodes: &mut Vec<KdNode>,
    ) -> Option<usize> {
        if indices.is_empty() {
            return None;
        }

        let split_dim = depth % 2;
        indices.sort_by(|&a, &b| points[a][split_dim].total_cmp(&points[b][split_dim]));

        let median = indices.len() / 2;
        let node_idx = nodes.len();
        nodes.push(KdNode {
            point_idx: indices[median],
            left: None,
            right: None,
            split_dim,
        });

        let (left_indices, right_part) = indices.split_at_mut(median);
        let right_indices = &mut right_part[1..];

        let left = Self::build_recursive(points, left_indices, depth + 1, nodes);
        let right = Self::build_recursive(points, right_indices, depth + 1, nodes);

        nodes[node_idx].left = left;
        nodes[node_idx].right = right;

        Some(node_idx)
    }

    /// Collects the indices of all points within `radius` of `query`
    /// (boundary inclusive) into `out`, which is cleared first. Order is
    /// unspecified.
    pub fn radius_indices_into(&self, query: DVec2, radius: f64, out: &mut Vec<usize>) {
        out.clear();
        if self.nodes.is_empty() {
            return;
        }
        self.radius_search_recursive(0, query, radius * radius, out);
    }

    fn radius_search_recursive(
        &self,
        node_idx: usize,
        query: DVec2,
        radius_sq: f64,
        out: &mut Vec<usize>,
    ) {
        let node = &self.nodes[node_idx];
        let point = self.points[node.point_idx];

        if query.distance_squared(point) <= radius_sq {
            out.push(node.point_idx);
        }

        let diff = query[node.split_dim] - point[node.split_dim];
        let diff_sq = diff * diff;

        if let Some(left_idx) = node.left {
            if diff <= 0.0 || diff_sq <= radius_sq {
                self.radius_search_recursive(left_idx, query, radius_sq, out);
            }
        }
        if let Some(right_idx) = node.right {
            if diff >= 0.0 || diff_sq <= radius_sq {
                self.radius_search_recursive(right_idx, query, radius_sq, out);
            }
        }
    }
}
