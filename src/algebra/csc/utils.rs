//---------------------------------------------------------
// low-level internal utilities for counting / filling entries
// in block partitioned sparse matrices.
//---------------------------------------------------------

use crate::algebra::{CscMatrix, FloatT};
use std::iter::zip;

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    // an m x n matrix with nnz zero-filled entries, to be
    // populated by the colcount / fill functions below
    pub(crate) fn with_nnz(m: usize, n: usize, nnz: usize) -> Self {
        CscMatrix {
            m,
            n,
            colptr: vec![0; n + 1],
            rowval: vec![0; nnz],
            nzval: vec![T::zero(); nnz],
            sorted: false,
            canonical: false,
        }
    }

    // increment self.colptr by the number of nonzeros in M
    pub(crate) fn colcount_block(&mut self, M: &CscMatrix<T>, initcol: usize) {
        for i in 0..M.n {
            self.colptr[initcol + i] += M.colptr[i + 1] - M.colptr[i];
        }
    }

    // populate values from M using the self.colptr as indicator of
    // next fill location in each column.
    pub(crate) fn fill_block(&mut self, M: &CscMatrix<T>, initrow: usize, initcol: usize) {
        for i in 0..M.n {
            let rng = M.colrange(i);
            let col = i + initcol;
            for (&Mrow, &Mval) in zip(&M.rowval[rng.clone()], &M.nzval[rng]) {
                let dest = self.colptr[col];
                self.rowval[dest] = Mrow + initrow;
                self.nzval[dest] = Mval;
                self.colptr[col] += 1;
            }
        }
    }

    // column counts in colptr[0..n] become the starting
    // position of each column
    pub(crate) fn colcount_to_colptr(&mut self) {
        let mut currentptr = 0;
        for p in &mut self.colptr {
            let count = *p;
            *p = currentptr;
            currentptr += count;
        }
    }

    // after filling, colptr[j] holds the end of column j
    pub(crate) fn backshift_colptrs(&mut self) {
        self.colptr.rotate_right(1);
        self.colptr[0] = 0;
    }
}

#[test]
fn test_colcount_and_fill() {
    // [1 3]
    // [2 0]
    let A = CscMatrix::new(2, 2, vec![0, 2, 3], vec![0, 1, 0], vec![1., 2., 3.]);

    // C = [A 0; 0 A]
    let mut C = CscMatrix::<f64>::with_nnz(4, 4, 6);
    C.colcount_block(&A, 0);
    C.colcount_block(&A, 2);
    C.colcount_to_colptr();
    assert_eq!(C.colptr, vec![0, 2, 3, 5, 6]);

    C.fill_block(&A, 0, 0);
    C.fill_block(&A, 2, 2);
    C.backshift_colptrs();
    C.update_format_flags();

    assert_eq!(C.colptr, vec![0, 2, 3, 5, 6]);
    assert_eq!(C.rowval, vec![0, 1, 0, 2, 3, 2]);
    assert_eq!(C.nzval, vec![1., 2., 3., 1., 2., 3.]);
    assert!(C.has_canonical_format());
}
