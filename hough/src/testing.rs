//! Synthetic edge images and helpers shared by the unit tests.

use std::ops::RangeInclusive;

use common::Buffer2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Initialize tracing subscriber for tests.
/// Safe to call multiple times - will only initialize once.
/// Respects RUST_LOG env var, defaults to "info".
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

/// `n x n` image with the main diagonal set, i.e. row == column.
pub fn diagonal_image(n: usize) -> Buffer2<f32> {
    let mut edges = Buffer2::new_default(n, n);
    for i in 0..n {
        edges[(i, i)] = 1.0;
    }
    edges
}

/// Image with one full column of edge pixels at 0-based `column`.
pub fn column_image(rows: usize, columns: usize, column: usize) -> Buffer2<f32> {
    let mut edges = Buffer2::new_default(rows, columns);
    for row in 0..rows {
        edges[(row, column)] = 1.0;
    }
    edges
}

/// Image with the 1-based pixels `column = rise * row + offset` set for every
/// row in `line_rows`.
pub fn sloped_line_image(
    rows: usize,
    columns: usize,
    rise: i64,
    offset: i64,
    line_rows: RangeInclusive<i64>,
) -> Buffer2<f32> {
    let mut edges = Buffer2::new_default(rows, columns);
    for row in line_rows {
        let column = rise * row + offset;
        edges[((row - 1) as usize, (column - 1) as usize)] = 1.0;
    }
    edges
}

/// Image with every edge pixel set independently with probability `density`.
pub fn random_edges(rows: usize, columns: usize, density: f64, seed: u64) -> Buffer2<f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let cells = (0..rows * columns)
        .map(|_| if rng.random_bool(density) { 1.0 } else { 0.0 })
        .collect();
    Buffer2::new(rows, columns, cells)
}
