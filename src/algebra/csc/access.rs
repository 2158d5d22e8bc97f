//---------------------------------------------------------
// element access and assignment
//---------------------------------------------------------

use crate::algebra::{CscMatrix, FloatT, MatrixError};
use std::iter::zip;

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    #[inline]
    pub(crate) fn check_index(&self, row: usize, col: usize) -> Result<(), MatrixError> {
        if row >= self.m || col >= self.n {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                nrows: self.m,
                ncols: self.n,
            });
        }
        Ok(())
    }

    /// Returns the value at index `(row, col)`, or zero if there is no
    /// stored entry.
    ///
    /// A canonical matrix is searched by bisection.  Otherwise every entry
    /// of the column is scanned and the values of all duplicates of
    /// `(row, col)` are summed.
    pub fn get(&self, row: usize, col: usize) -> Result<T, MatrixError> {
        self.check_index(row, col)?;

        let rng = self.colrange(col);
        if self.canonical {
            let rows = &self.rowval[rng.clone()];
            match rows.binary_search(&row) {
                Ok(k) => Ok(self.nzval[rng.start + k]),
                Err(_) => Ok(T::zero()),
            }
        } else {
            let rows = &self.rowval[rng.clone()];
            let vals = &self.nzval[rng];
            Ok(zip(rows, vals)
                .filter(|(&r, _)| r == row)
                .fold(T::zero(), |acc, (_, &v)| acc + v))
        }
    }

    /// Assign `value` at index `(row, col)`, inserting a new entry if there
    /// is none.
    ///
    /// Insertion shifts all later entries and so costs O(nnz) in the worst
    /// case.  If the matrix is not canonical, any duplicates of
    /// `(row, col)` beyond the first are set to zero so that a subsequent
    /// [`get`](CscMatrix::get) returns `value`.
    ///
    /// Returns `self` to allow chained assignment.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<&mut Self, MatrixError> {
        self.check_index(row, col)?;

        let rng = self.colrange(col);

        if self.canonical {
            match self.rowval[rng.clone()].binary_search(&row) {
                Ok(k) => self.nzval[rng.start + k] = value,
                Err(k) => self.insert_entry(rng.start + k, row, col, value),
            }
            if value.is_zero() {
                self.canonical = false;
            }
            return Ok(self);
        }

        let mut found = false;
        for p in rng.clone() {
            if self.rowval[p] == row {
                if found {
                    self.nzval[p] = T::zero();
                } else {
                    self.nzval[p] = value;
                    found = true;
                }
            }
        }

        if !found {
            // keep sorted columns sorted, otherwise insert at column start
            let pos = if self.sorted {
                rng.start + self.rowval[rng].partition_point(|&r| r < row)
            } else {
                rng.start
            };
            self.insert_entry(pos, row, col, value);
        }
        Ok(self)
    }

    // insert a new entry at storage position p within column col
    fn insert_entry(&mut self, p: usize, row: usize, col: usize, value: T) {
        self.rowval.insert(p, row);
        self.nzval.insert(p, value);
        self.colptr[(col + 1)..].iter_mut().for_each(|c| *c += 1);
    }

    /// Assign a dense block of values, i.e. `A[rows, cols] = vals`, with
    /// `vals` in column-major order.
    pub fn assign_dense(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        vals: &[T],
    ) -> Result<&mut Self, MatrixError> {
        if vals.len() != rows.len() * cols.len() {
            return Err(MatrixError::IncompatibleDimension);
        }
        for (j, &col) in cols.iter().enumerate() {
            for (i, &row) in rows.iter().enumerate() {
                self.set(row, col, vals[i + j * rows.len()])?;
            }
        }
        Ok(self)
    }

    /// Assign a sparse block of values, i.e. `A[rows, cols] = B`.
    ///
    /// Entries of `A` in the block where `B` is zero are zeroed rather
    /// than removed.  No new entries are created for zeros of `B`.
    pub fn assign_sparse(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        B: &CscMatrix<T>,
    ) -> Result<&mut Self, MatrixError> {
        if B.m != rows.len() || B.n != cols.len() {
            return Err(MatrixError::IncompatibleDimension);
        }
        for (j, &col) in cols.iter().enumerate() {
            for (i, &row) in rows.iter().enumerate() {
                let v = B.get(i, j)?;
                if !v.is_zero() || !self.get(row, col)?.is_zero() {
                    self.set(row, col, v)?;
                }
            }
        }
        Ok(self)
    }
}
