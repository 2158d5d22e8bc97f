#![allow(non_snake_case)]

use crate::algebra::{CscMatrix, FloatT, MatrixError, ShapedMatrix};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// True if the matrix is square and equal to its transpose.
    ///
    /// Duplicate entries are summed and explicit zeros ignored before
    /// comparing.
    pub fn is_symmetric(&self) -> bool {
        if !self.is_square() {
            return false;
        }
        let mut C = self.clone();
        C.to_canonical();
        C.transpose() == C
    }

    /// True if no entry is stored below the diagonal
    pub fn is_triu(&self) -> bool {
        (0..self.n).all(|col| self.rowval[self.colrange(col)].iter().all(|&row| row <= col))
    }

    /// True if no entry is stored above the diagonal
    pub fn is_tril(&self) -> bool {
        (0..self.n).all(|col| self.rowval[self.colrange(col)].iter().all(|&row| row >= col))
    }

    /// Upper triangular part of the matrix, including the diagonal
    pub fn to_triu(&self) -> Self {
        self.band(0, isize::MAX)
    }

    /// Lower triangular part of the matrix, including the diagonal
    pub fn to_tril(&self) -> Self {
        self.band(isize::MIN, 0)
    }

    /// Entries with `kl <= col - row <= ku`.
    ///
    /// `band(0, 0)` is the diagonal, and `band(-1, 1)` a tridiagonal matrix.
    pub fn band(&self, kl: isize, ku: isize) -> Self {
        let mut C = self.clone();
        C.fkeep(|i, j, _| {
            let d = j as isize - i as isize;
            kl <= d && d <= ku
        });
        C
    }

    /// Contiguous submatrix `A[i0..i1, j0..j1]`.
    pub fn slice(&self, i0: usize, i1: usize, j0: usize, j1: usize) -> Result<Self, MatrixError> {
        if i0 > i1 || i1 > self.m || j0 > j1 || j1 > self.n {
            return Err(MatrixError::IncompatibleDimension);
        }

        let mut colptr = Vec::with_capacity(j1 - j0 + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();

        colptr.push(0);
        for j in j0..j1 {
            for p in self.colrange(j) {
                let i = self.rowval[p];
                if (i0..i1).contains(&i) {
                    rowval.push(i - i0);
                    nzval.push(self.nzval[p]);
                }
            }
            colptr.push(rowval.len());
        }

        // a subsequence of each column, shifted
        Ok(CscMatrix::from_parts(
            i1 - i0,
            j1 - j0,
            colptr,
            rowval,
            nzval,
            self.sorted,
            self.canonical,
        ))
    }

    /// Submatrix `C[k, l] = A[rows[k], cols[l]]`.
    ///
    /// Indices may repeat, in which case the corresponding rows or columns
    /// are copied.  Row indices of the result are sorted if the input is.
    pub fn index(&self, rows: &[usize], cols: &[usize]) -> Result<Self, MatrixError> {
        let outside = |i: usize, j: usize| MatrixError::IndexOutOfBounds {
            row: i,
            col: j,
            nrows: self.m,
            ncols: self.n,
        };
        if let Some(&i) = rows.iter().find(|&&i| i >= self.m) {
            return Err(outside(i, 0));
        }
        if let Some(&j) = cols.iter().find(|&&j| j >= self.n) {
            return Err(outside(0, j));
        }

        // linked lists of the output rows drawn from each row of A
        let mut head = vec![usize::MAX; self.m];
        let mut next = vec![usize::MAX; rows.len()];
        for (k, &i) in rows.iter().enumerate().rev() {
            next[k] = head[i];
            head[i] = k;
        }

        let mut colptr = Vec::with_capacity(cols.len() + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();
        let mut work: Vec<(usize, T)> = Vec::new();

        colptr.push(0);
        for &j in cols {
            work.clear();
            for p in self.colrange(j) {
                let mut k = head[self.rowval[p]];
                while k != usize::MAX {
                    work.push((k, self.nzval[p]));
                    k = next[k];
                }
            }
            work.sort_by_key(|&(k, _)| k);
            for &(k, v) in &work {
                rowval.push(k);
                nzval.push(v);
            }
            colptr.push(rowval.len());
        }

        Ok(CscMatrix::from_parts(
            rows.len(),
            cols.len(),
            colptr,
            rowval,
            nzval,
            self.sorted,
            self.canonical,
        ))
    }

    /// Insert `k` empty rows above the matrix, in place
    pub fn add_empty_top(&mut self, k: usize) -> &mut Self {
        self.m += k;
        self.rowval.iter_mut().for_each(|r| *r += k);
        self
    }

    /// Append `k` empty rows below the matrix, in place
    pub fn add_empty_bottom(&mut self, k: usize) -> &mut Self {
        self.m += k;
        self
    }

    /// Insert `k` empty columns to the left of the matrix, in place
    pub fn add_empty_left(&mut self, k: usize) -> &mut Self {
        self.n += k;
        self.colptr.splice(0..0, std::iter::repeat(0).take(k));
        self
    }

    /// Append `k` empty columns to the right of the matrix, in place
    pub fn add_empty_right(&mut self, k: usize) -> &mut Self {
        let nnz = self.nnz();
        self.n += k;
        self.colptr.resize(self.n + 1, nnz);
        self
    }
}
