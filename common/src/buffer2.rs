use std::collections::TryReserveError;
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::slice;

/// Dense row-major matrix of `rows x columns` cells.
///
/// Cell `(row, column)` lives at `row * columns + column`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer2<T> {
    cells: Vec<T>,
    rows: usize,
    columns: usize,
}

impl<T> Buffer2<T> {
    pub fn new(rows: usize, columns: usize, cells: Vec<T>) -> Self {
        assert_eq!(
            cells.len(),
            rows * columns,
            "cells length must equal rows * columns"
        );
        Self {
            cells,
            rows,
            columns,
        }
    }

    /// Like [`Buffer2::new`], but hands the cells back when the length is wrong.
    pub fn try_new(rows: usize, columns: usize, cells: Vec<T>) -> Result<Self, Vec<T>> {
        if cells.len() != rows * columns {
            return Err(cells);
        }
        Ok(Self {
            cells,
            rows,
            columns,
        })
    }

    /// One full row as a slice.
    #[inline]
    pub fn row(&self, row: usize) -> &[T] {
        let start = row * self.columns;
        &self.cells[start..start + self.columns]
    }

    /// Iterates rows top to bottom. Yields nothing for a zero-column buffer.
    pub fn rows_iter(&self) -> slice::Chunks<'_, T> {
        self.cells.chunks(self.columns.max(1))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [T] {
        &mut self.cells
    }
}

impl<T: Default + Clone> Buffer2<T> {
    pub fn new_default(rows: usize, columns: usize) -> Self {
        Self {
            cells: vec![T::default(); rows * columns],
            rows,
            columns,
        }
    }

    /// Allocates a default-filled buffer, reporting allocation failure
    /// instead of aborting.
    pub fn try_new_default(rows: usize, columns: usize) -> Result<Self, TryReserveError> {
        let len = rows.saturating_mul(columns);
        let mut cells = Vec::new();
        cells.try_reserve_exact(len)?;
        cells.resize(len, T::default());
        Ok(Self {
            cells,
            rows,
            columns,
        })
    }
}

impl<T> Index<(usize, usize)> for Buffer2<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, column): (usize, usize)) -> &Self::Output {
        &self.cells[row * self.columns + column]
    }
}

impl<T> IndexMut<(usize, usize)> for Buffer2<T> {
    #[inline]
    fn index_mut(&mut self, (row, column): (usize, usize)) -> &mut Self::Output {
        &mut self.cells[row * self.columns + column]
    }
}

impl<T> Deref for Buffer2<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.cells
    }
}

impl<T> DerefMut for Buffer2<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.cells
    }
}

impl<'a, T> IntoIterator for &'a Buffer2<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
