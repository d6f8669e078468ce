//! Hough vote accumulation.
//!
//! Every edge pixel `(i, j)` (1-based row and column) is swept through 181
//! candidate slopes. For each slope the perpendicular from the origin to the
//! line through the pixel gives a `(angle, radius)` cell, and each distinct
//! cell collects one vote per pixel. The finished grid is thresholded
//! relative to its strongest cell.


use std::f64::consts::PI;

use rayon::prelude::*;

use common::{amax, Buffer2};
use crate::error::{Error, Result};

/// Number of angle buckets (whole degrees in `[0, 180)`).
pub const ANGLE_BUCKETS: usize = 180;

/// Number of candidate slopes tried per edge pixel (`-90..=90` degrees).
pub const CANDIDATE_ANGLES: usize = 181;

/// Offset in degrees applied to the two boundary angles before the tangent.
const BOUNDARY_ANGLE_OFFSET_DEG: f64 = 1e5;

/// Cells at or below this value are not edges.
const EDGE_EPSILON: f32 = f32::EPSILON;

/// Largest representable radius bucket count for an image:
/// `floor(sqrt(rows^2 + columns^2))`.
#[inline]
pub fn r_max(rows: usize, columns: usize) -> usize {
    (rows as f64).hypot(columns as f64).floor() as usize
}

/// Thresholded vote grid of `ANGLE_BUCKETS x r_max` cells.
#[derive(Debug, Clone)]
pub struct Accumulator {
    votes: Buffer2<u32>,
    max_votes: u32,
    threshold: f64,
    edge_pixels: usize,
}

impl Accumulator {
    /// Accumulates votes for every edge pixel and zeroes cells below
    /// `max_votes * threshold_fraction`.
    ///
    /// `threshold_fraction` above 1 behaves as 1. The caller validates that
    /// it is positive.
    pub fn build(edges: &Buffer2<f32>, threshold_fraction: f32, parallel: bool) -> Result<Self> {
        Self::build_from_cells(
            edges.cells(),
            edges.rows(),
            edges.columns(),
            threshold_fraction,
            parallel,
        )
    }

    /// Same as [`Accumulator::build`] over a borrowed row-major slice of
    /// `rows * columns` cells.
    pub fn build_from_cells(
        cells: &[f32],
        rows: usize,
        columns: usize,
        threshold_fraction: f32,
        parallel: bool,
    ) -> Result<Self> {
        debug_assert_eq!(cells.len(), rows * columns);

        let r_max = r_max(rows, columns);
        let mut votes = allocate_grid(r_max)?;

        let slopes = candidate_slopes();
        let edge_pixels = if cells.is_empty() || r_max == 0 {
            0
        } else if parallel {
            vote_parallel(cells, columns, &slopes, &mut votes)?
        } else {
            vote_serial(cells, columns, &slopes, &mut votes)
        };

        let mut accumulator = Self {
            votes,
            max_votes: 0,
            threshold: 0.0,
            edge_pixels,
        };
        accumulator.apply_threshold(threshold_fraction.min(1.0));

        tracing::debug!(
            "Accumulated {} edge pixels into {}x{} cells, max {} votes, threshold {:.2}",
            accumulator.edge_pixels,
            ANGLE_BUCKETS,
            r_max,
            accumulator.max_votes,
            accumulator.threshold
        );

        Ok(accumulator)
    }

    /// Wraps an already filled vote grid without thresholding it.
    #[cfg(test)]
    pub(crate) fn from_votes(votes: Buffer2<u32>) -> Self {
        assert_eq!(votes.rows(), ANGLE_BUCKETS, "one row per angle bucket");
        let max_votes = amax(votes.cells()).map_or(0, |(_, max)| max);
        Self {
            votes,
            max_votes,
            threshold: 0.0,
            edge_pixels: 0,
        }
    }

    fn apply_threshold(&mut self, fraction: f32) {
        self.max_votes = amax(self.votes.cells()).map_or(0, |(_, max)| max);
        self.threshold = self.max_votes as f64 * fraction as f64;

        let threshold = self.threshold;
        for cell in self.votes.iter_mut() {
            if (*cell as f64) < threshold {
                *cell = 0;
            }
        }
    }

    #[inline]
    pub fn votes(&self) -> &Buffer2<u32> {
        &self.votes
    }

    #[inline]
    pub fn get(&self, angle: usize, radius: usize) -> u32 {
        self.votes[(angle, radius)]
    }

    /// Number of radius buckets.
    #[inline]
    pub fn r_max(&self) -> usize {
        self.votes.columns()
    }

    /// Strongest cell before thresholding.
    #[inline]
    pub fn max_votes(&self) -> u32 {
        self.max_votes
    }

    #[inline]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    #[inline]
    pub fn edge_pixels(&self) -> usize {
        self.edge_pixels
    }

    /// Cells still holding votes after thresholding.
    pub fn nonzero_cells(&self) -> usize {
        self.votes.iter().filter(|&&v| v > 0).count()
    }
}

/// Slopes for the integer angles `-90..=90` degrees, with the two vertical
/// boundaries pushed off the tangent's poles.
pub fn candidate_slopes() -> [f64; CANDIDATE_ANGLES] {
    let mut slopes = [0.0; CANDIDATE_ANGLES];
    for (k, slope) in slopes.iter_mut().enumerate() {
        let degrees = match k {
            0 => -90.0 - BOUNDARY_ANGLE_OFFSET_DEG,
            k if k == CANDIDATE_ANGLES - 1 => 90.0 + BOUNDARY_ANGLE_OFFSET_DEG,
            k => k as f64 - 90.0,
        };
        *slope = degrees.to_radians().tan();
    }
    slopes
}

/// Accumulator cell `(angle_bucket, radius)` of the line with slope `k`
/// through the 1-based pixel `(i, j)`, or `None` when it falls outside the
/// grid.
#[inline]
pub fn candidate_cell(i: f64, j: f64, k: f64, r_max: usize) -> Option<(usize, usize)> {
    let m = j - k * i;

    // Foot of the perpendicular from the origin.
    let x = -k * m / (1.0 + k * k);
    let y = k * x + m;

    let r = x.hypot(y).round();
    if r >= r_max as f64 {
        return None;
    }

    let angle = if m == 0.0 {
        // Line through the origin: the foot degenerates, use the normal.
        1.0f64.atan2(-k)
    } else {
        let angle = y.atan2(x);
        if angle < 0.0 {
            angle + PI
        } else {
            angle
        }
    };

    // Normals within half a degree of 180 share bucket 0.
    let angle_bucket = angle.to_degrees().round() as usize % ANGLE_BUCKETS;

    Some((angle_bucket, r as usize))
}

/// Casts one vote per distinct cell for every edge pixel of row `row_index`.
/// Returns the number of edge pixels in the row.
fn vote_row(
    row_index: usize,
    row: &[f32],
    slopes: &[f64; CANDIDATE_ANGLES],
    r_max: usize,
    votes: &mut [u32],
    cells: &mut Vec<usize>,
) -> usize {
    let i = (row_index + 1) as f64;
    let mut edge_pixels = 0;

    for (column, &value) in row.iter().enumerate() {
        if value <= EDGE_EPSILON {
            continue;
        }
        edge_pixels += 1;

        let j = (column + 1) as f64;
        cells.clear();
        cells.extend(slopes.iter().filter_map(|&k| {
            candidate_cell(i, j, k, r_max).map(|(angle, r)| angle * r_max + r)
        }));

        // Several slopes can land in the same cell; it still gets one vote.
        cells.sort_unstable();
        cells.dedup();
        for &cell in cells.iter() {
            votes[cell] += 1;
        }
    }

    edge_pixels
}

fn vote_serial(
    edges: &[f32],
    columns: usize,
    slopes: &[f64; CANDIDATE_ANGLES],
    votes: &mut Buffer2<u32>,
) -> usize {
    let r_max = votes.columns();
    let mut cells = Vec::with_capacity(CANDIDATE_ANGLES);

    edges
        .chunks(columns)
        .enumerate()
        .map(|(row_index, row)| {
            vote_row(row_index, row, slopes, r_max, votes.cells_mut(), &mut cells)
        })
        .sum()
}

/// Zeroed `ANGLE_BUCKETS x r_max` grid, reporting allocation failure.
fn allocate_grid(r_max: usize) -> Result<Buffer2<u32>> {
    Buffer2::try_new_default(ANGLE_BUCKETS, r_max).map_err(|source| Error::Allocation {
        what: "accumulator",
        source,
    })
}

/// Number of rows per parallel band: at most one band per rayon thread.
fn rows_per_band(rows: usize) -> usize {
    let num_bands = rayon::current_num_threads().min(rows).max(1);
    rows.div_ceil(num_bands)
}

/// Rows are split into bands that vote into their own grids, which are
/// summed afterwards, so the counts match the serial sweep exactly.
fn vote_parallel(
    edges: &[f32],
    columns: usize,
    slopes: &[f64; CANDIDATE_ANGLES],
    votes: &mut Buffer2<u32>,
) -> Result<usize> {
    debug_assert!(columns > 0);
    let r_max = votes.columns();
    let band_rows = rows_per_band(edges.len() / columns);

    let bands = edges
        .par_chunks(band_rows * columns)
        .enumerate()
        .map(|(band_index, band)| -> Result<(Buffer2<u32>, usize)> {
            let mut grid = allocate_grid(r_max)?;
            let mut cells = Vec::with_capacity(CANDIDATE_ANGLES);
            let first_row = band_index * band_rows;

            let edge_pixels: usize = band
                .chunks(columns)
                .enumerate()
                .map(|(offset, row)| {
                    vote_row(first_row + offset, row, slopes, r_max, grid.cells_mut(), &mut cells)
                })
                .sum();
            Ok((grid, edge_pixels))
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::trace!("Summing {} vote bands of {} rows", bands.len(), band_rows);

    let mut edge_pixels = 0;
    for (grid, count) in bands {
        for (dst, src) in votes.iter_mut().zip(grid.cells()) {
            *dst += src;
        }
        edge_pixels += count;
    }
    Ok(edge_pixels)
}
