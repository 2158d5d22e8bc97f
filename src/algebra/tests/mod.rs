// shared matrices for the unit tests
#![allow(non_snake_case)]

use crate::algebra::*;


// The 4 x 4 example from Davis, Direct Methods for Sparse Linear Systems,
// eqn (2.1), in triplet form
//
// A =
//[4.5   ⋅   3.2   ⋅ ]
//[3.1  2.9   ⋅   0.9]
//[ ⋅   1.7  3.0   ⋅ ]
//[3.5  0.4   ⋅   1.0]
pub(crate) fn davis_21_coo() -> CooMatrix<f64> {
    let i = vec![2, 1, 3, 0, 1, 3, 3, 1, 0, 2];
    let j = vec![2, 0, 3, 2, 1, 0, 1, 3, 0, 1];
    let v = vec![3.0, 3.1, 1.0, 3.2, 2.9, 3.5, 0.4, 0.9, 4.5, 1.7];
    CooMatrix::new(i, j, v)
}

// davis_21 with duplicate entries and explicit zeros appended
pub(crate) fn davis_21_with_dups_coo() -> CooMatrix<f64> {
    let mut A = davis_21_coo();
    A.assign(0, 2, 100.0)
        .assign(3, 0, 100.0)
        .assign(2, 1, 100.0)
        .assign(0, 1, 0.0)
        .assign(2, 2, 0.0)
        .assign(3, 1, 0.0);
    A
}

// a symmetric matrix with the same pattern as davis_21 + davis_21ᵀ
//
// A =
//[4.5  3.1   ⋅   3.5]
//[3.1  2.9  1.7   ⋅ ]
//[ ⋅   1.7  3.0   ⋅ ]
//[3.5   ⋅    ⋅   1.0]
pub(crate) fn davis_sym_coo() -> CooMatrix<f64> {
    let i = vec![0, 1, 3, 0, 1, 2, 1, 2, 0, 3];
    let j = vec![0, 0, 0, 1, 1, 1, 2, 2, 3, 3];
    let v = vec![4.5, 3.1, 3.5, 3.1, 2.9, 1.7, 1.7, 3.0, 3.5, 1.0];
    CooMatrix::new(i, j, v)
}

// E = [1 0 0; -2 1 0; 0 0 1]
pub(crate) fn elimination_matrix() -> CscMatrix<f64> {
    CscMatrix::new(3, 3, vec![0, 2, 3, 4], vec![0, 1, 1, 2], vec![1., -2., 1., 1.])
}

// A = [2 1 1; 4 -6 0; -2 7 2]
pub(crate) fn elimination_test_matrix() -> CscMatrix<f64> {
    CscMatrix::new(
        3,
        3,
        vec![0, 3, 6, 8],
        vec![0, 1, 2, 0, 1, 2, 0, 2],
        vec![2., 4., -2., 1., -6., 7., 1., 2.],
    )
}

pub(crate) fn assert_vec_approx(a: &[f64], b: &[f64]) {
    assert_eq!(a.len(), b.len());
    for (x, y) in std::iter::zip(a, b) {
        assert!((x - y).abs() < 1e-12, "{:?} != {:?}", a, b);
    }
}
