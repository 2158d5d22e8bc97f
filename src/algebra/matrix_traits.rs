#![allow(non_snake_case)]

use crate::algebra::MatrixError;
use std::fmt;

/// Matrices with a fixed number of rows and columns.
pub trait ShapedMatrix {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn shape(&self) -> (usize, usize) {
        (self.nrows(), self.ncols())
    }
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}

/// Common interface of the sparse storage formats.
///
/// Provides a uniform printed representation of the form
/// ```text
/// <Compressed Sparse Column matrix
///         with 10 stored elements and shape (4, 4)>
/// (1, 0): 3.1
/// ...
/// ```
pub trait SparseMatrix<T: fmt::Display>: ShapedMatrix {
    /// Human readable name of the storage format
    const FORMAT_DESC: &'static str;

    /// number of stored entries, including duplicates and explicit zeros
    fn nnz(&self) -> usize;

    /// number of entries that can be stored without reallocation
    fn nzmax(&self) -> usize;

    /// the `(row, col, value)` triple at storage position `k`
    fn entry_at(&self, k: usize) -> (usize, usize, T);

    /// Write a description of the matrix to `out`.
    ///
    /// If `verbose` is set then stored entries are listed in storage
    /// order.  When there are `threshold` or more entries, only the first
    /// and last three are written.
    fn print<W: fmt::Write>(&self, out: &mut W, verbose: bool, threshold: usize) -> fmt::Result {
        let nnz = self.nnz();
        let (m, n) = self.shape();
        writeln!(out, "<{} matrix", Self::FORMAT_DESC)?;
        writeln!(
            out,
            "        with {} stored elements and shape ({}, {})>",
            nnz, m, n
        )?;

        if verbose {
            if nnz < threshold || nnz <= 6 {
                self.print_entries(out, 0..nnz)?;
            } else {
                self.print_entries(out, 0..3)?;
                writeln!(out, "...")?;
                self.print_entries(out, (nnz - 3)..nnz)?;
            }
        }
        Ok(())
    }

    #[doc(hidden)]
    fn print_entries<W: fmt::Write>(
        &self,
        out: &mut W,
        range: std::ops::Range<usize>,
    ) -> fmt::Result {
        for k in range {
            let (i, j, v) = self.entry_at(k);
            writeln!(out, "({}, {}): {}", i, j, v)?;
        }
        Ok(())
    }
}

/// Block concatenation of matrices
pub trait BlockConcatenate: Sized {
    /// horizontal matrix concatenation
    ///
    /// ```text
    /// C = [A B]
    /// ```
    /// Errors if row dimensions are incompatible
    fn hcat(A: &Self, B: &Self) -> Result<Self, MatrixError>;

    /// vertical matrix concatenation
    ///
    /// ```text
    /// C = [ A ]
    ///     [ B ]
    /// ```
    /// Errors if column dimensions are incompatible
    fn vcat(A: &Self, B: &Self) -> Result<Self, MatrixError>;

    /// block diagonal concatenation
    ///
    /// ```text
    /// C = [ A 0 0 ]
    ///     [ 0 B 0 ]
    ///     [ 0 0 C ]
    /// ```
    /// Errors if given no blocks
    fn blockdiag(mats: &[&Self]) -> Result<Self, MatrixError>;
}

/// Ordering of dense matrix data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DenseOrder {
    /// Fortran style, columns stored contiguously
    #[default]
    ColumnMajor,
    /// C style, rows stored contiguously
    RowMajor,
}
