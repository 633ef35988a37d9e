//! `Matrix`: a dense two-dimensional container of reals.
//!
//! A thin newtype around `nalgebra::DMatrix<f64>`. Storage is column-major, so
//! [`Matrix::column`] and [`Matrix::column_mut`] hand out contiguous slices
//! while [`Matrix::row`] copies. Checked accessors return
//! [`Error::IndexOutOfRange`]; the `Index` / `IndexMut` impls panic on a bad
//! index the way slices do and are meant for loops whose bounds were already
//! validated.

use lsmc_core::{
    ensure,
    errors::{Error, Result},
    Real,
};
use nalgebra::DMatrix;
use std::ops::{Index, IndexMut};

/// A dynamically-sized 2D matrix of `Real` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix(DMatrix<Real>);

impl Matrix {
    /// Create a zero-filled `rows × cols` matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self(DMatrix::zeros(rows, cols))
    }

    /// Create a matrix filled with `value`.
    pub fn from_element(rows: usize, cols: usize, value: Real) -> Self {
        Self(DMatrix::from_element(rows, cols, value))
    }

    /// Create from a row-major data slice of length `rows * cols`.
    pub fn from_row_slice(rows: usize, cols: usize, data: &[Real]) -> Result<Self> {
        ensure!(
            data.len() == rows * cols,
            "expected {} elements for a {rows}×{cols} matrix, got {}",
            rows * cols,
            data.len()
        );
        Ok(Self(DMatrix::from_row_slice(rows, cols, data)))
    }

    /// Create from a sequence of equally long rows.
    ///
    /// An empty sequence yields a `0 × 0` matrix; ragged rows are rejected.
    pub fn from_rows<R: AsRef<[Real]>>(rows: &[R]) -> Result<Self> {
        let Some(first) = rows.first() else {
            return Ok(Self::zeros(0, 0));
        };
        let cols = first.as_ref().len();
        let mut m = DMatrix::zeros(rows.len(), cols);
        for (i, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            ensure!(
                row.len() == cols,
                "row {i} has {} columns, expected {cols}",
                row.len()
            );
            for (j, &v) in row.iter().enumerate() {
                m[(i, j)] = v;
            }
        }
        Ok(Self(m))
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.0.nrows()
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.0.ncols()
    }

    /// Return `true` if the matrix is square.
    pub fn is_square(&self) -> bool {
        self.0.nrows() == self.0.ncols()
    }

    /// Return `true` if the matrix has no elements.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Borrow the inner `DMatrix`.
    pub fn inner(&self) -> &DMatrix<Real> {
        &self.0
    }

    /// Consume and return the inner `DMatrix`.
    pub fn into_inner(self) -> DMatrix<Real> {
        self.0
    }

    fn check_row(&self, i: usize) -> Result<()> {
        if i < self.rows() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: i,
                size: self.rows(),
            })
        }
    }

    fn check_col(&self, j: usize) -> Result<()> {
        if j < self.cols() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: j,
                size: self.cols(),
            })
        }
    }

    /// Element at `(i, j)`.
    pub fn get(&self, i: usize, j: usize) -> Result<Real> {
        self.check_row(i)?;
        self.check_col(j)?;
        Ok(self.0[(i, j)])
    }

    /// Overwrite the element at `(i, j)`.
    pub fn set(&mut self, i: usize, j: usize, value: Real) -> Result<()> {
        self.check_row(i)?;
        self.check_col(j)?;
        self.0[(i, j)] = value;
        Ok(())
    }

    /// Copy row `i` out.
    pub fn row(&self, i: usize) -> Result<Vec<Real>> {
        self.check_row(i)?;
        Ok(self.0.row(i).iter().copied().collect())
    }

    /// Column `j` as a contiguous slice (one entry per row).
    pub fn column(&self, j: usize) -> Result<&[Real]> {
        self.check_col(j)?;
        let n = self.rows();
        Ok(&self.0.as_slice()[j * n..(j + 1) * n])
    }

    /// Column `j` as a mutable contiguous slice.
    pub fn column_mut(&mut self, j: usize) -> Result<&mut [Real]> {
        self.check_col(j)?;
        let n = self.rows();
        Ok(&mut self.0.as_mut_slice()[j * n..(j + 1) * n])
    }

    /// Iterate over copies of every row, top to bottom.
    pub fn row_iter(&self) -> impl Iterator<Item = Vec<Real>> + '_ {
        self.0
            .row_iter()
            .map(|row| row.iter().copied().collect::<Vec<_>>())
    }

    /// Swap rows `a` and `b`.
    pub fn swap_rows(&mut self, a: usize, b: usize) -> Result<()> {
        self.check_row(a)?;
        self.check_row(b)?;
        if a != b {
            self.0.swap_rows(a, b);
        }
        Ok(())
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: Real) {
        self.0.fill(value);
    }

    /// Largest absolute element (0 for an empty matrix).
    pub fn max_abs(&self) -> Real {
        self.0.iter().fold(0.0, |acc: Real, &x| acc.max(x.abs()))
    }

    /// Sum of all elements.
    pub fn sum(&self) -> Real {
        self.0.sum()
    }
}

// ── From / Into ───────────────────────────────────────────────────────────────

impl From<DMatrix<Real>> for Matrix {
    fn from(m: DMatrix<Real>) -> Self {
        Self(m)
    }
}

impl From<Matrix> for DMatrix<Real> {
    fn from(m: Matrix) -> Self {
        m.0
    }
}

// ── Indexing ──────────────────────────────────────────────────────────────────

impl Index<(usize, usize)> for Matrix {
    type Output = Real;
    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.0[(i, j)]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.0[(i, j)]
    }
}
