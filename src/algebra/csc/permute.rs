#![allow(non_snake_case)]

use crate::algebra::{cumsum, identity_perm, invperm, CscMatrix, FloatT, MatrixError, ShapedMatrix};
use std::cmp::{max, min};

// a permutation vector must be a bijection on 0..n
fn check_perm(p: &[usize], n: usize) -> Result<(), MatrixError> {
    if p.len() != n {
        return Err(MatrixError::IncompatibleDimension);
    }
    invperm(p).map(|_| ())
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Permuted matrix `C = P*A*Q`, i.e. `C[p_inv[i], k] = A[i, q[k]]`.
    ///
    /// `p_inv` is the inverse of the row permutation and `q` is the column
    /// permutation.  Row indices within each column of the result are
    /// sorted.
    pub fn permute(&self, p_inv: &[usize], q: &[usize]) -> Result<Self, MatrixError> {
        check_perm(p_inv, self.m)?;
        check_perm(q, self.n)?;

        let mut colptr = Vec::with_capacity(self.n + 1);
        let mut rowval = Vec::with_capacity(self.nnz());
        let mut nzval = Vec::with_capacity(self.nnz());
        let mut work: Vec<(usize, T)> = Vec::new();

        colptr.push(0);
        for &j in q {
            work.clear();
            work.extend(self.colrange(j).map(|p| (p_inv[self.rowval[p]], self.nzval[p])));
            // stable, so duplicate entries keep their relative order
            work.sort_by_key(|&(i, _)| i);

            for &(i, v) in &work {
                rowval.push(i);
                nzval.push(v);
            }
            colptr.push(rowval.len());
        }

        // a bijection on rows preserves sortedness and values
        Ok(CscMatrix::from_parts(
            self.m,
            self.n,
            colptr,
            rowval,
            nzval,
            self.sorted,
            self.canonical,
        )
        .with_updated_flags_if(!self.sorted))
    }

    /// Row permutation `C = P*A`
    pub fn permute_rows(&self, p_inv: &[usize]) -> Result<Self, MatrixError> {
        self.permute(p_inv, &identity_perm(self.n))
    }

    /// Column permutation `C = A*Q`
    pub fn permute_cols(&self, q: &[usize]) -> Result<Self, MatrixError> {
        self.permute(&identity_perm(self.m), q)
    }

    /// Symmetric permutation `C = P*A*Pᵀ` of a symmetric matrix stored as
    /// its upper triangle.
    ///
    /// Entries below the diagonal are ignored, and only the upper triangle
    /// of the result is formed.  Row indices of the result are not sorted.
    pub fn symperm(&self, p_inv: &[usize]) -> Result<Self, MatrixError> {
        if !self.is_square() {
            return Err(MatrixError::IncompatibleDimension);
        }
        check_perm(p_inv, self.n)?;

        let n = self.n;

        // 1. count the upper-triangle entries in each column of C
        let mut num_entries = vec![0; n];
        for colA in 0..n {
            let colC = p_inv[colA];
            for &rowA in &self.rowval[self.colrange(colA)] {
                if rowA <= colA {
                    num_entries[max(p_inv[rowA], colC)] += 1;
                }
            }
        }

        // 2. column pointers from counts
        let mut C = CscMatrix::with_nnz(n, n, num_entries.iter().sum());
        C.colptr = cumsum(&num_entries);

        // reuse the counts to track the next free location in each column
        let mut row_starts = num_entries;
        row_starts.copy_from_slice(&C.colptr[0..n]);

        // 3. place each entry
        for colA in 0..n {
            let colC = p_inv[colA];
            for p in self.colrange(colA) {
                let rowA = self.rowval[p];
                if rowA <= colA {
                    let rowC = p_inv[rowA];
                    let dest = &mut row_starts[max(colC, rowC)];
                    C.rowval[*dest] = min(colC, rowC);
                    C.nzval[*dest] = self.nzval[p];
                    *dest += 1;
                }
            }
        }
        C.update_format_flags();
        Ok(C)
    }

    /// Permuted transpose `C = (P*A*Q)ᵀ`, formed directly.
    ///
    /// `p_inv` and `q_inv` are the inverses of the row and column
    /// permutations.  Row indices of the result are sorted.
    pub fn permute_transpose(&self, p_inv: &[usize], q_inv: &[usize]) -> Result<Self, MatrixError> {
        check_perm(p_inv, self.m)?;
        let q = invperm(q_inv)?;
        if q.len() != self.n {
            return Err(MatrixError::IncompatibleDimension);
        }

        let (m, n, nnz) = (self.m, self.n, self.nnz());

        // row counts of P*A become column counts of C
        let mut w = vec![0usize; m];
        self.rowval.iter().for_each(|&r| w[p_inv[r]] += 1);
        let colptr = cumsum(&w);
        w.copy_from_slice(&colptr[..m]);

        let mut rowval = vec![0usize; nnz];
        let mut nzval = vec![T::zero(); nnz];

        // visit columns of P*A*Q in order so rows of C come out sorted
        for (k, &j) in q.iter().enumerate() {
            for p in self.colrange(j) {
                let dest = &mut w[p_inv[self.rowval[p]]];
                rowval[*dest] = k;
                nzval[*dest] = self.nzval[p];
                *dest += 1;
            }
        }

        Ok(
            CscMatrix::from_parts(n, m, colptr, rowval, nzval, self.sorted, self.canonical)
                .with_updated_flags_if(!self.sorted),
        )
    }

    // recompute the format flags only when they are not already known
    fn with_updated_flags_if(mut self, update: bool) -> Self {
        if update {
            self.update_format_flags();
        }
        self
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algebra::tests::*;
    use crate::algebra::CooMatrix;

    // davis_21 values in triplet order
    const VALS: [f64; 10] = [3.0, 3.1, 1.0, 3.2, 2.9, 3.5, 0.4, 0.9, 4.5, 1.7];

    #[test]
    fn test_permute_rows() {
        let A = davis_21_coo().to_csc();
        let p = [1, 0, 2, 3];

        let C = A.permute_rows(&invperm(&p).unwrap()).unwrap();
        let expect = CooMatrix::new(
            vec![2, 0, 3, 1, 0, 3, 3, 0, 1, 2],
            vec![2, 0, 3, 2, 1, 0, 1, 3, 0, 1],
            VALS.to_vec(),
        )
        .to_csc();

        assert_eq!(C, expect);
        assert!(C.has_canonical_format());
    }

    #[test]
    fn test_permute_cols() {
        let A = davis_21_coo().to_csc();
        let q = [1, 0, 2, 3];

        let C = A.permute_cols(&q).unwrap();
        let expect = CooMatrix::new(
            vec![2, 1, 3, 0, 1, 3, 3, 1, 0, 2],
            vec![2, 1, 3, 2, 0, 1, 0, 3, 1, 0],
            VALS.to_vec(),
        )
        .to_csc();

        assert_eq!(C, expect);
    }

    #[test]
    fn test_permute_both() {
        let A = davis_21_coo().to_csc();
        let p = [3, 0, 2, 1];
        let q = [2, 1, 3, 0];

        let C = A.permute(&invperm(&p).unwrap(), &q).unwrap();
        let expect = CooMatrix::new(
            vec![2, 3, 0, 1, 3, 0, 0, 3, 1, 2],
            vec![0, 3, 2, 0, 1, 3, 1, 2, 3, 1],
            VALS.to_vec(),
        )
        .to_csc();

        assert_eq!(C, expect);

        // identity is a no-op
        let I = identity_perm(4);
        assert_eq!(A.permute(&I, &I).unwrap(), A);

        // bad permutations
        assert_eq!(
            A.permute(&[0, 1, 1, 2], &q),
            Err(MatrixError::InvalidPermutation)
        );
        assert_eq!(
            A.permute(&[0, 1, 2], &q),
            Err(MatrixError::IncompatibleDimension)
        );
    }

    #[test]
    fn test_symperm() {
        // upper triangle of davis_21
        let mut A = davis_21_coo().to_csc();
        A.fkeep(|i, j, _| i <= j);
        assert_eq!(A.nnz(), 6);

        let p = [3, 0, 2, 1];
        let mut C = A.symperm(&invperm(&p).unwrap()).unwrap();
        C.to_canonical();

        let expect = CooMatrix::new(
            vec![2, 0, 1, 3, 0, 1],
            vec![2, 0, 2, 3, 3, 1],
            vec![3.0, 1.0, 3.2, 2.9, 0.9, 4.5],
        )
        .to_csc();

        assert_eq!(C, expect);
        assert!(C.is_triu());

        // lower triangle is ignored
        let Afull = davis_21_coo().to_csc();
        let mut D = Afull.symperm(&invperm(&p).unwrap()).unwrap();
        D.to_canonical();
        assert_eq!(D, expect);

        let B = CscMatrix::<f64>::zeros(3, 4);
        assert!(B.symperm(&[0, 1, 2]).is_err());
    }

    #[test]
    fn test_permute_transpose() {
        let A = davis_21_coo().to_csc();
        let p = [3, 0, 2, 1];
        let q = [2, 1, 3, 0];
        let p_inv = invperm(&p).unwrap();
        let q_inv = invperm(&q).unwrap();

        let C = A.permute_transpose(&p_inv, &q_inv).unwrap();
        let expect = A.permute(&p_inv, &q).unwrap().transpose();

        assert_eq!(C, expect);
        assert!(C.has_canonical_format());
    }
}
