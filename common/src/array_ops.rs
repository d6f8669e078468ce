//! Small array helpers used when moving between flat buffers and tables.

use crate::buffer2::Buffer2;

/// Largest element of `values` together with its index.
///
/// Ties resolve to the first occurrence. A later NaN never replaces the
/// current best. Returns `None` for an empty slice.
pub fn amax<T: PartialOrd + Copy>(values: &[T]) -> Option<(usize, T)> {
    let (&first, rest) = values.split_first()?;
    let mut best = (0, first);
    for (i, &value) in rest.iter().enumerate() {
        if value > best.1 {
            best = (i + 1, value);
        }
    }
    Some(best)
}

/// Joins two equal-length columns into an `n x 2` table.
///
/// # Panics
///
/// Panics if the columns differ in length.
pub fn cat_columns<T: Copy>(left: &[T], right: &[T]) -> Buffer2<T> {
    assert_eq!(left.len(), right.len(), "columns must have equal length");

    let mut cells = Vec::with_capacity(left.len() * 2);
    for (&l, &r) in left.iter().zip(right) {
        cells.push(l);
        cells.push(r);
    }
    Buffer2::new(left.len(), 2, cells)
}
