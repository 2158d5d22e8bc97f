use crate::algebra::matrix_traits::ShapedMatrix;
use crate::algebra::{BlockConcatenate, CscMatrix, FloatT, MatrixError};

impl<T> BlockConcatenate for CscMatrix<T>
where
    T: FloatT,
{
    fn hcat(A: &Self, B: &Self) -> Result<Self, MatrixError> {
        //first check for compatible row dimensions
        if A.m != B.m {
            return Err(MatrixError::IncompatibleDimension);
        }

        //dimensions for C = [A B];
        let nnz = A.nnz() + B.nnz();
        let m = A.m; //rows C
        let n = A.n + B.n; //cols C
        let mut C = CscMatrix::with_nnz(m, n, nnz);

        //compute column counts and fill
        C.colcount_block(A, 0);
        C.colcount_block(B, A.n);
        C.colcount_to_colptr();

        C.fill_block(A, 0, 0);
        C.fill_block(B, 0, A.n);
        C.backshift_colptrs();

        // columns are copied whole
        C.sorted = A.sorted && B.sorted;
        C.canonical = A.canonical && B.canonical;
        Ok(C)
    }

    fn vcat(A: &Self, B: &Self) -> Result<Self, MatrixError> {
        //first check for compatible column dimensions
        if A.n != B.n {
            return Err(MatrixError::IncompatibleDimension);
        }

        //dimensions for C = [A; B];
        let nnz = A.nnz() + B.nnz();
        let m = A.m + B.m; //rows C
        let n = A.n; //cols C
        let mut C = CscMatrix::with_nnz(m, n, nnz);

        //compute column counts and fill
        C.colcount_block(A, 0);
        C.colcount_block(B, 0);
        C.colcount_to_colptr();

        C.fill_block(A, 0, 0);
        C.fill_block(B, A.m, 0);
        C.backshift_colptrs();

        // rows of B follow all rows of A in each column
        C.sorted = A.sorted && B.sorted;
        C.canonical = A.canonical && B.canonical;
        Ok(C)
    }

    fn blockdiag(mats: &[&Self]) -> Result<Self, MatrixError> {
        if mats.is_empty() {
            return Err(MatrixError::IncompatibleDimension);
        }

        let mut nrows = 0;
        let mut ncols = 0;
        let mut nnzM = 0;
        for mat in mats {
            nrows += mat.nrows();
            ncols += mat.ncols();
            nnzM += mat.nnz();
        }
        let mut M = CscMatrix::<T>::with_nnz(nrows, ncols, nnzM);

        // assemble the column counts
        let mut nextcol = 0;
        for mat in mats {
            M.colcount_block(mat, nextcol);
            nextcol += mat.ncols();
        }

        M.colcount_to_colptr();

        // fill in data and rebuild colptr
        let mut nextrow = 0;
        let mut nextcol = 0;
        for mat in mats {
            M.fill_block(mat, nextrow, nextcol);
            nextrow += mat.nrows();
            nextcol += mat.ncols();
        }

        M.backshift_colptrs();

        M.sorted = mats.iter().all(|m| m.sorted);
        M.canonical = mats.iter().all(|m| m.canonical);
        Ok(M)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algebra::tests::*;
    use crate::algebra::CooMatrix;

    const VALS: [f64; 12] = [1., -2., 1., 1., 2., 4., -2., 1., -6., 7., 1., 2.];

    #[test]
    fn test_hcat() {
        let E = elimination_matrix();
        let A = elimination_test_matrix();

        let C = CscMatrix::hcat(&E, &A).unwrap();
        let expect = CooMatrix::new(
            vec![0, 1, 1, 2, 0, 1, 2, 0, 1, 2, 0, 2],
            vec![0, 0, 1, 2, 3, 3, 3, 4, 4, 4, 5, 5],
            VALS.to_vec(),
        )
        .to_csc();

        assert_eq!(C.shape(), (3, 6));
        assert_eq!(C, expect);
        assert!(CscMatrix::hcat(&E, &CscMatrix::zeros(2, 2)).is_err());
    }

    #[test]
    fn test_vcat() {
        let E = elimination_matrix();
        let A = elimination_test_matrix();

        let C = CscMatrix::vcat(&E, &A).unwrap();
        let expect = CooMatrix::new(
            vec![0, 1, 1, 2, 3, 4, 5, 3, 4, 5, 3, 5],
            vec![0, 0, 1, 2, 0, 0, 0, 1, 1, 1, 2, 2],
            VALS.to_vec(),
        )
        .to_csc();

        assert_eq!(C.shape(), (6, 3));
        assert_eq!(C, expect);
        assert!(CscMatrix::vcat(&E, &CscMatrix::zeros(2, 2)).is_err());
    }

    #[test]
    fn test_blockdiag() {
        let E = elimination_matrix();
        let I = CscMatrix::identity(2);

        let C = CscMatrix::blockdiag(&[&E, &I]).unwrap();
        assert_eq!(C.shape(), (5, 5));
        assert_eq!(C.nnz(), E.nnz() + 2);
        assert_eq!(C.slice(0, 3, 0, 3).unwrap(), E);
        assert_eq!(C.slice(3, 5, 3, 5).unwrap(), I);
        assert_eq!(C.slice(0, 3, 3, 5).unwrap().nnz(), 0);
        assert!(C.has_canonical_format());

        assert!(CscMatrix::<f64>::blockdiag(&[]).is_err());
    }
}
