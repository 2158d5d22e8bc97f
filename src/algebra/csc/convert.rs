#![allow(non_snake_case)]

use crate::algebra::{cumsum, CscMatrix, DenseOrder, FloatT};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Transpose of the matrix.
    ///
    /// Uses a counting sort by row, so the output always has row indices
    /// in nondecreasing order within each column.
    pub fn transpose(&self) -> Self {
        let (m, n, nnz) = (self.m, self.n, self.nnz());

        // row counts of A become the column counts of A^T
        let mut w = vec![0usize; m];
        self.rowval.iter().for_each(|&r| w[r] += 1);
        let colptr = cumsum(&w);
        w.copy_from_slice(&colptr[..m]);

        let mut rowval = vec![0usize; nnz];
        let mut nzval = vec![T::zero(); nnz];

        for j in 0..n {
            for p in self.colrange(j) {
                let q = &mut w[self.rowval[p]];
                rowval[*q] = j;
                nzval[*q] = self.nzval[p];
                *q += 1;
            }
        }

        // sorted input has no duplicates, so the output is strictly sorted
        if self.sorted {
            CscMatrix::from_parts(n, m, colptr, rowval, nzval, true, self.canonical)
        } else {
            let mut At = CscMatrix::from_parts(n, m, colptr, rowval, nzval, false, false);
            At.update_format_flags();
            At
        }
    }

    /// Sort row indices within each column, in place.
    ///
    /// Duplicate entries are kept.  If the input has no duplicates, the
    /// result is sorted.
    pub fn sort(&mut self) -> &mut Self {
        if !self.sorted {
            *self = self.transpose().transpose();
        }
        self
    }

    /// Sum the values of duplicate entries, in place.
    ///
    /// Each column keeps the first occurrence of a row index, so the
    /// relative order of entries is otherwise unchanged.
    pub fn sum_duplicates(&mut self) -> &mut Self {
        // w[i] is the position of row i in the current column, if any
        let mut w = vec![usize::MAX; self.m];
        let mut nz = 0;

        for j in 0..self.n {
            let q = nz;
            for p in self.colptr[j]..self.colptr[j + 1] {
                let i = self.rowval[p];
                if w[i] != usize::MAX && w[i] >= q {
                    let v = self.nzval[p];
                    self.nzval[w[i]] += v;
                } else {
                    w[i] = nz;
                    self.rowval[nz] = i;
                    self.nzval[nz] = self.nzval[p];
                    nz += 1;
                }
            }
            self.colptr[j] = q;
        }
        self.colptr[self.n] = nz;
        self.rowval.truncate(nz);
        self.nzval.truncate(nz);
        self.update_format_flags();
        self
    }

    /// Keep only entries for which `keep(row, col, value)` is true, in place.
    pub fn fkeep<F>(&mut self, mut keep: F) -> &mut Self
    where
        F: FnMut(usize, usize, T) -> bool,
    {
        let mut nz = 0;

        for j in 0..self.n {
            let p0 = self.colptr[j];
            self.colptr[j] = nz;
            for p in p0..self.colptr[j + 1] {
                if keep(self.rowval[p], j, self.nzval[p]) {
                    self.rowval[nz] = self.rowval[p];
                    self.nzval[nz] = self.nzval[p];
                    nz += 1;
                }
            }
        }
        self.colptr[self.n] = nz;
        self.rowval.truncate(nz);
        self.nzval.truncate(nz);

        // removing entries preserves sortedness
        self.canonical = self.sorted && self.nzval.iter().all(|v| !v.is_zero());
        self
    }

    /// Remove explicitly stored zeros, in place.
    pub fn dropzeros(&mut self) -> &mut Self {
        self.fkeep(|_, _, v| !v.is_zero())
    }

    /// Remove entries with `|value| <= tol`, in place.
    pub fn droptol(&mut self, tol: T) -> &mut Self {
        self.fkeep(|_, _, v| v.abs() > tol)
    }

    /// Convert to canonical format in place, i.e. sum duplicates,
    /// drop explicit zeros and sort row indices.
    pub fn to_canonical(&mut self) -> &mut Self {
        if !self.canonical {
            self.sum_duplicates().dropzeros().sort();
            self.canonical = true;
        }
        self
    }

    /// Dense copy of the matrix.  Duplicate entries are summed.
    pub fn to_dense(&self, order: DenseOrder) -> Vec<T> {
        let (m, n) = (self.m, self.n);
        let mut A = vec![T::zero(); m * n];

        for j in 0..n {
            for p in self.colrange(j) {
                let i = self.rowval[p];
                let idx = match order {
                    DenseOrder::ColumnMajor => i + j * m,
                    DenseOrder::RowMajor => j + i * n,
                };
                A[idx] += self.nzval[p];
            }
        }
        A
    }

    /// Build a canonical matrix from dense column-major data, dropping
    /// zeros.
    ///
    /// # Panics
    /// Panics if `vals.len() != m * n`.
    pub fn from_dense(m: usize, n: usize, vals: &[T]) -> Self {
        assert_eq!(vals.len(), m * n);

        let mut colptr = Vec::with_capacity(n + 1);
        let mut rowval = Vec::new();
        let mut nzval = Vec::new();

        colptr.push(0);
        for col in vals.chunks(m.max(1)).take(n) {
            for (i, &v) in col.iter().enumerate() {
                if !v.is_zero() {
                    rowval.push(i);
                    nzval.push(v);
                }
            }
            colptr.push(rowval.len());
        }
        // m == 0 yields no chunks
        colptr.resize(n + 1, rowval.len());

        CscMatrix::from_parts(m, n, colptr, rowval, nzval, true, true)
    }
}
