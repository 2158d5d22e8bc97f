#![allow(non_snake_case)]

use super::dense::_lsolve;
use super::TriangularError;
use crate::algebra::*;

// Solves with permuted triangular matrices.  Right hand sides are given,
// and solutions returned, in the row and column order of the triangle.

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// True if the matrix is lower triangular after moving each entry
    /// `(i, j)` to position `(p_inv[i], q_inv[j])`.
    pub fn is_tril_permuted(&self, p_inv: &[usize], q_inv: &[usize]) -> Result<bool, MatrixError> {
        if p_inv.len() != self.m || q_inv.len() != self.n {
            return Err(MatrixError::IncompatibleDimension);
        }
        invperm(p_inv)?;
        invperm(q_inv)?;

        Ok((0..self.n).all(|j| {
            self.rowval[self.colrange(j)]
                .iter()
                .all(|&i| p_inv[i] >= q_inv[j])
        }))
    }

    /// Storage positions of the diagonal of a row permuted lower
    /// triangular matrix `P*L`, indexed by column.
    ///
    /// The last column holds a single entry, which must be its diagonal.
    /// Working backwards, each column must hold exactly one entry in a row
    /// not already claimed by a later column.
    pub fn find_lower_diagonals(&self) -> Result<Vec<usize>, TriangularError> {
        self.find_diagonals((0..self.n).rev())
    }

    /// Storage positions of the diagonal of a row permuted upper
    /// triangular matrix `P*U`, indexed by column.
    pub fn find_upper_diagonals(&self) -> Result<Vec<usize>, TriangularError> {
        self.find_diagonals(0..self.n)
    }

    fn find_diagonals<I>(&self, cols: I) -> Result<Vec<usize>, TriangularError>
    where
        I: Iterator<Item = usize>,
    {
        if !self.is_square() {
            return Err(TriangularError::IncompatibleDimension);
        }

        let mut marked = vec![false; self.m];
        let mut p_diags = vec![0; self.n];

        for j in cols {
            let mut unmarked = self.colrange(j).filter(|&p| !marked[self.rowval[p]]);
            match (unmarked.next(), unmarked.next()) {
                (Some(p), None) => {
                    marked[self.rowval[p]] = true;
                    p_diags[j] = p;
                }
                _ => return Err(TriangularError::NotTriangular),
            }
        }
        Ok(p_diags)
    }

    /// Solves `L*x = b` for a matrix stored as `P*L`, i.e. lower triangular
    /// up to an unknown row permutation.
    ///
    /// `b` is given in the row order of `L`, where row `k` of `L` is the
    /// stored row holding the diagonal of column `k`.
    pub fn lsolve_rows(&self, b: &[T]) -> Result<Vec<T>, TriangularError> {
        let p_diags = self.find_lower_diagonals()?;
        self.solve_rows(b, &p_diags, 0..self.n)
    }

    /// Solves `U*x = b` for a matrix stored as `P*U`, i.e. upper triangular
    /// up to an unknown row permutation.  `b` is in the row order of `U`.
    pub fn usolve_rows(&self, b: &[T]) -> Result<Vec<T>, TriangularError> {
        let p_diags = self.find_upper_diagonals()?;
        self.solve_rows(b, &p_diags, (0..self.n).rev())
    }

    // Column oriented substitution with the diagonal of column j at
    // storage position p_diags[j].  The residual is indexed by stored row.
    fn solve_rows<I>(&self, b: &[T], p_diags: &[usize], cols: I) -> Result<Vec<T>, TriangularError>
    where
        I: Iterator<Item = usize>,
    {
        if b.len() != self.m {
            return Err(TriangularError::IncompatibleDimension);
        }

        // r = P*b
        let mut r = vec![T::zero(); self.m];
        for (&d, &bk) in p_diags.iter().zip(b) {
            r[self.rowval[d]] = bk;
        }
        let mut x = vec![T::zero(); self.n];

        for j in cols {
            let d = p_diags[j];
            x[j] = r[self.rowval[d]] / self.nzval[d];
            for p in self.colrange(j).filter(|&p| p != d) {
                r[self.rowval[p]] -= self.nzval[p] * x[j];
            }
        }
        Ok(x)
    }

    /// Solves `L*x = b` for a matrix stored as `L*Q`, i.e. lower triangular
    /// up to an unknown column permutation.
    ///
    /// The diagonal of each column is its entry of smallest row index, and
    /// `x` is returned in the column order of `L`.
    pub fn lsolve_cols(&self, b: &[T]) -> Result<Vec<T>, TriangularError> {
        let diag_cols = self.find_column_diagonals(true)?;
        self.solve_cols(b, &diag_cols, 0..self.n)
    }

    /// Solves `U*x = b` for a matrix stored as `U*Q`, i.e. upper triangular
    /// up to an unknown column permutation.
    ///
    /// The diagonal of each column is its entry of largest row index, and
    /// `x` is returned in the column order of `U`.
    pub fn usolve_cols(&self, b: &[T]) -> Result<Vec<T>, TriangularError> {
        let diag_cols = self.find_column_diagonals(false)?;
        self.solve_cols(b, &diag_cols, (0..self.n).rev())
    }

    // For each row k, the column and storage position of the diagonal
    // entry in row k.
    fn find_column_diagonals(&self, lower: bool) -> Result<Vec<(usize, usize)>, TriangularError> {
        if !self.is_square() {
            return Err(TriangularError::IncompatibleDimension);
        }

        let mut diag_cols = vec![None; self.m];
        for j in 0..self.n {
            let rows = self.colrange(j).map(|p| (self.rowval[p], p));
            let d = if lower {
                rows.min_by_key(|&(i, _)| i)
            } else {
                rows.max_by_key(|&(i, _)| i)
            };
            let Some((i, p)) = d else {
                return Err(TriangularError::NotTriangular);
            };
            if diag_cols[i].replace((j, p)).is_some() {
                return Err(TriangularError::NotTriangular);
            }
        }
        diag_cols
            .into_iter()
            .collect::<Option<Vec<_>>>()
            .ok_or(TriangularError::NotTriangular)
    }

    fn solve_cols<I>(
        &self,
        b: &[T],
        diag_cols: &[(usize, usize)],
        rows: I,
    ) -> Result<Vec<T>, TriangularError>
    where
        I: Iterator<Item = usize>,
    {
        if b.len() != self.m {
            return Err(TriangularError::IncompatibleDimension);
        }

        let mut r = b.to_vec();
        let mut x = vec![T::zero(); self.n];

        // stored column j is column k of the triangle
        for k in rows {
            let (j, d) = diag_cols[k];
            x[k] = r[k] / self.nzval[d];
            for p in self.colrange(j).filter(|&p| p != d) {
                r[self.rowval[p]] -= self.nzval[p] * x[k];
            }
        }
        Ok(x)
    }

    /// Row and column permutations of a matrix that is triangular up to
    /// both.
    ///
    /// Returns `(p_inv, q_inv)` such that entry `(p_inv[i], q_inv[j])` of
    /// the stored matrix is entry `(i, j)` of a lower triangular matrix.
    /// For a permuted upper triangular matrix the vectors come out
    /// reversed, i.e. they describe the lower triangular matrix obtained by
    /// reversing the order of both rows and columns.
    ///
    /// Rows are eliminated one at a time, each time taking a row with a
    /// single entry in the columns not yet eliminated.
    pub fn find_tri_permutation(&self) -> Result<(Vec<usize>, Vec<usize>), TriangularError> {
        if !self.is_square() {
            return Err(TriangularError::IncompatibleDimension);
        }
        let n = self.n;

        // row access through the transpose
        let At = self.transpose();

        let mut rowcount: Vec<usize> = (0..n).map(|i| At.colrange(i).len()).collect();
        let mut singles: Vec<usize> = (0..n).rev().filter(|&i| rowcount[i] == 1).collect();
        let mut row_done = vec![false; n];
        let mut col_done = vec![false; n];

        let mut p_inv = Vec::with_capacity(n);
        let mut q_inv = Vec::with_capacity(n);

        while let Some(i) = singles.pop() {
            if row_done[i] || rowcount[i] != 1 {
                continue;
            }
            let Some(j) = At.rowval[At.colrange(i)]
                .iter()
                .copied()
                .find(|&j| !col_done[j])
            else {
                return Err(TriangularError::NotTriangular);
            };

            row_done[i] = true;
            col_done[j] = true;
            p_inv.push(i);
            q_inv.push(j);

            // column j no longer counts towards any row
            for &r in &self.rowval[self.colrange(j)] {
                rowcount[r] -= 1;
                if rowcount[r] == 1 && !row_done[r] {
                    singles.push(r);
                }
            }
        }

        if p_inv.len() != n {
            return Err(TriangularError::NotTriangular);
        }
        Ok((p_inv, q_inv))
    }

    /// Solves `L*x = b` for a matrix stored as `P*L*Q`, i.e. triangular up
    /// to unknown row and column permutations.
    ///
    /// `L` is the lower triangular matrix recovered by
    /// [`find_tri_permutation`](CscMatrix::find_tri_permutation), with
    /// `L[k, l] = A[p_inv[k], q_inv[l]]`.  `b` is in the row order of `L` and
    /// `x` in its column order.  For a permuted upper triangular matrix `U`
    /// the recovered `L` reverses both orders of `U`, so `b` and `x` are
    /// reversed too.
    pub fn tri_solve_perm(&self, b: &[T]) -> Result<Vec<T>, TriangularError> {
        if b.len() != self.m {
            return Err(TriangularError::IncompatibleDimension);
        }
        let (p_inv, q_inv) = self.find_tri_permutation()?;

        // L[k, l] = A[p_inv[k], q_inv[l]]
        let rows = invperm(&p_inv).map_err(|_| TriangularError::NotTriangular)?;
        let L = self
            .permute(&rows, &q_inv)
            .map_err(|_| TriangularError::NotTriangular)?;

        let mut x = b.to_vec();
        _lsolve(&L.colptr, &L.rowval, &L.nzval, &mut x);
        Ok(x)
    }
}
