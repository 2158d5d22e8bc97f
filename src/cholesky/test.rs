#![allow(non_snake_case)]
use super::*;
use crate::algebra::*;

const NONE: usize = NO_PARENT;

// The 11 x 11 example from Davis, Direct Methods for Sparse Linear
// Systems, Fig 4.2.  Unit off diagonals and a dominant diagonal.
fn davis_11() -> CscMatrix<f64> {
    let lower = [
        (5, 0),
        (6, 0),
        (2, 1),
        (7, 1),
        (9, 2),
        (10, 2),
        (5, 3),
        (9, 3),
        (7, 4),
        (10, 4),
        (8, 5),
        (9, 5),
        (10, 6),
        (9, 7),
        (10, 7),
        (10, 9),
    ];
    let mut A = CooMatrix::<f64>::zeros(11, 11);
    for k in 0..11 {
        A.assign(k, k, 10.0);
    }
    for &(i, j) in &lower {
        A.assign(i, j, 1.0).assign(j, i, 1.0);
    }
    A.to_csc()
}

fn natural() -> Option<CholeskySettings> {
    Some(
        CholeskySettingsBuilder::default()
            .ordering(AmdOrder::Natural)
            .build()
            .unwrap(),
    )
}

fn assert_dense_close(A: &CscMatrix<f64>, B: &CscMatrix<f64>, tol: f64) {
    assert_eq!(A.shape(), B.shape());
    let a = A.to_dense(DenseOrder::ColumnMajor);
    let b = B.to_dense(DenseOrder::ColumnMajor);
    for (x, y) in a.iter().zip(&b) {
        assert!((x - y).abs() < tol, "{} != {}", x, y);
    }
}

fn LLt(L: &CscMatrix<f64>) -> CscMatrix<f64> {
    L * &L.transpose()
}

#[test]
fn test_etree() {
    let A = davis_11();
    let parent = etree(&A, false);
    assert_eq!(parent, vec![5, 2, 7, 5, 7, 6, 8, 9, 9, 10, NONE]);

    // only the upper triangle is referenced
    assert_eq!(etree(&A.to_triu(), false), parent);

    // a diagonal matrix is a forest of singletons
    let I = CscMatrix::<f64>::identity(4);
    assert_eq!(etree(&I, false), vec![NONE; 4]);
}

#[test]
fn test_etree_ata() {
    let A = davis_21_csc();
    let AtA = A.transpose().multiply(&A).unwrap();

    let parent = etree(&A, true);
    assert_eq!(parent, etree(&AtA, false));

    let postorder = post(&parent);
    assert_eq!(
        counts(&A, &parent, &postorder, true),
        chol_colcounts(&AtA)
    );
}

#[test]
fn test_post() {
    let parent = etree(&davis_11(), false);
    let postorder = post(&parent);
    assert_eq!(postorder, vec![1, 2, 4, 7, 0, 3, 5, 6, 8, 9, 10]);

    // every node after its descendants
    let mut seen = vec![false; parent.len()];
    for &j in &postorder {
        seen[j] = true;
        if parent[j] != NONE {
            assert!(!seen[parent[j]]);
        }
    }

    // a forest
    assert_eq!(post(&[NONE, 0, NONE, 2, 2]), vec![1, 0, 3, 4, 2]);
}

#[test]
fn test_firstdesc() {
    let parent = etree(&davis_11(), false);
    let (first, level) = firstdesc(&parent, &post(&parent));
    assert_eq!(first, vec![4, 0, 0, 5, 2, 4, 4, 0, 4, 0, 0]);
    assert_eq!(level, vec![5, 4, 3, 5, 3, 4, 3, 2, 2, 1, 0]);
}

#[test]
fn test_least_common_ancestor() {
    // path 0 -> 2 and 1 -> 2, with A(2, 0) and A(2, 1) nonzero
    let parent = [2, 2, NONE];
    let postorder = post(&parent);
    let (first, _) = firstdesc(&parent, &postorder);

    let mut maxfirst = vec![None; 3];
    let mut prevleaf = vec![None; 3];
    let mut ancestor: Vec<usize> = (0..3).collect();

    let (q, status) =
        least_common_ancestor(2, 0, &first, &mut maxfirst, &mut prevleaf, &mut ancestor);
    assert_eq!((q, status), (Some(2), LeafStatus::FirstLeaf));
    ancestor[0] = parent[0];

    let (q, status) =
        least_common_ancestor(2, 1, &first, &mut maxfirst, &mut prevleaf, &mut ancestor);
    assert_eq!((q, status), (Some(2), LeafStatus::SubsequentLeaf));

    // the diagonal is never a leaf
    let (q, status) =
        least_common_ancestor(2, 2, &first, &mut maxfirst, &mut prevleaf, &mut ancestor);
    assert_eq!((q, status), (None, LeafStatus::NotLeaf));
}

#[test]
fn test_counts() {
    let A = davis_11();
    let parent = etree(&A, false);
    let postorder = post(&parent);

    let rc = rowcnt(&A, &parent, &postorder);
    let cc = counts(&A, &parent, &postorder, false);
    assert_eq!(rc, vec![1, 1, 2, 1, 1, 3, 3, 4, 3, 7, 7]);
    assert_eq!(cc, vec![3, 3, 4, 3, 3, 4, 4, 3, 3, 2, 1]);
    assert_eq!(chol_rowcounts(&A), rc);
    assert_eq!(chol_colcounts(&A), cc);

    // against the factor itself
    let S = symbolic_cholesky(&A, AmdOrder::Natural).unwrap();
    let L = chol(&A, &S).unwrap();
    let Lt = L.transpose();
    for j in 0..11 {
        assert_eq!(L.colrange(j).len(), cc[j]);
        assert_eq!(Lt.colrange(j).len(), rc[j]);
    }
    assert_eq!(S.lnz, 33);
    assert_eq!(S.lnz, L.nnz());
}

#[test]
fn test_ereach() {
    let A = davis_11();
    let parent = etree(&A, false);
    let L = chol(&A, &symbolic_cholesky(&A, AmdOrder::Natural).unwrap()).unwrap();
    let Lt = L.transpose();

    let mut stack = vec![0; 11];
    let mut marked = vec![false; 11];

    for k in 0..11 {
        let top = ereach(&A, k, &parent, &mut stack, &mut marked);
        let mut pattern = stack[top..].to_vec();

        // descendants before ancestors
        for (a, &i) in pattern.iter().enumerate() {
            let mut r = parent[i];
            while r != NONE && r != k {
                assert!(!pattern[..a].contains(&r));
                r = parent[r];
            }
        }

        // row k of L without the diagonal
        pattern.sort();
        let expect: Vec<usize> = Lt.row_indices()[Lt.colrange(k)]
            .iter()
            .copied()
            .filter(|&j| j != k)
            .collect();
        assert_eq!(pattern, expect);
        assert!(marked.iter().all(|&m| !m));
    }

    let top = ereach(&A, 10, &parent, &mut stack, &mut marked);
    let mut pattern = stack[top..].to_vec();
    pattern.sort();
    assert_eq!(pattern, vec![2, 4, 6, 7, 8, 9]);
}

#[test]
fn test_symbolic_natural() {
    let A = davis_11();
    let S = symbolic_cholesky(&A, AmdOrder::Natural).unwrap();

    assert!(S.p_inv.is_none());
    assert!(S.q.is_none());
    assert!(S.leftmost.is_empty());
    assert_eq!(S.n(), 11);
    assert_eq!(S.parent, etree(&A, false));
    assert_eq!(S.cp, cumsum(&chol_colcounts(&A)));
    assert_eq!(S.unz, S.lnz);

    assert_eq!(
        symbolic_cholesky(&CscMatrix::<f64>::zeros(3, 4), AmdOrder::Natural),
        Err(CholeskyError::IncompatibleDimension)
    );
}

#[test]
fn test_symbolic_amd() {
    let A = davis_11();

    for order in [AmdOrder::APlusAT, AmdOrder::ATimesA] {
        let S = symbolic_cholesky(&A, order).unwrap();
        let p_inv = S.p_inv.as_ref().unwrap();
        assert!(invperm(p_inv).is_ok());

        // the analysis is that of the permuted matrix
        let C = A.symperm(p_inv).unwrap();
        assert_eq!(S.parent, etree(&C, false));
        assert_eq!(S.lnz, chol_colcounts(&C).iter().sum::<usize>());
    }
}

#[test]
fn test_symbolic_with_perm() {
    let A = davis_11();
    let perm: Vec<usize> = (0..11).rev().collect();

    let S = symbolic_cholesky_with_perm(&A, &perm).unwrap();
    assert_eq!(S.p_inv, Some(invperm(&perm).unwrap()));

    let bad = vec![0; 11];
    assert_eq!(
        symbolic_cholesky_with_perm(&A, &bad),
        Err(CholeskyError::InvalidPermutation)
    );
    assert_eq!(
        symbolic_cholesky_with_perm(&A, &perm[1..]),
        Err(CholeskyError::IncompatibleDimension)
    );
}

#[test]
fn test_chol() {
    let A = davis_11();

    let S = symbolic_cholesky(&A, AmdOrder::Natural).unwrap();
    let L = chol(&A, &S).unwrap();
    assert!(L.is_tril());
    assert!(L.has_sorted_indices());
    assert_dense_close(&LLt(&L), &A, 1e-12);

    // only the upper triangle is read
    let L2 = chol(&A.to_triu(), &S).unwrap();
    assert_eq!(L, L2);

    // permuted
    let S = symbolic_cholesky(&A, AmdOrder::APlusAT).unwrap();
    let L = chol(&A, &S).unwrap();
    let p_inv = S.p_inv.as_ref().unwrap();
    let PAPt = A.permute(p_inv, &invperm(p_inv).unwrap()).unwrap();
    assert_dense_close(&LLt(&L), &PAPt, 1e-12);
}

#[test]
fn test_chol_not_positive_definite() {
    // [1 2; 2 1] has a negative eigenvalue
    let A = CscMatrix::from_dense(2, 2, &[1., 2., 2., 1.]);
    let S = symbolic_cholesky(&A, AmdOrder::Natural).unwrap();
    assert_eq!(
        chol(&A, &S),
        Err(CholeskyError::NotPositiveDefinite { column: 1 })
    );

    let A = CscMatrix::from_dense(2, 2, &[-1., 0., 0., 1.]);
    let S = symbolic_cholesky(&A, AmdOrder::Natural).unwrap();
    assert_eq!(
        chol(&A, &S),
        Err(CholeskyError::NotPositiveDefinite { column: 0 })
    );
}

#[test]
fn test_chol_pattern_mismatch() {
    // analysis of a diagonal matrix can not hold the factor of a full one
    let D = CscMatrix::<f64>::identity(3);
    let S = symbolic_cholesky(&D, AmdOrder::Natural).unwrap();
    let A = CscMatrix::from_dense(3, 3, &[4., 1., 1., 1., 4., 1., 1., 1., 4.]);
    assert_eq!(chol(&A, &S), Err(CholeskyError::PatternMismatch));
}

#[test]
fn test_update_downdate() {
    let A = davis_11();
    let S = symbolic_cholesky(&A, AmdOrder::Natural).unwrap();
    let mut L = chol(&A, &S).unwrap();
    let L0 = L.clone();

    // w has the pattern of L(:, 2)
    let rows = L.row_indices()[L.colrange(2)].to_vec();
    assert_eq!(rows, vec![2, 7, 9, 10]);
    let W = CooMatrix::with_shape(rows, vec![0; 4], vec![0.5, 1.0, -0.5, 2.0], 11, 1)
        .unwrap()
        .to_csc();
    let WWt = &W * &W.transpose();

    chol_update(&mut L, UpdateSign::Update, &W, &S.parent).unwrap();
    assert_dense_close(&LLt(&L), &(&A + &WWt), 1e-12);
    assert_eq!(L.column_pointers(), L0.column_pointers());
    assert_eq!(L.row_indices(), L0.row_indices());

    chol_update(&mut L, UpdateSign::Downdate, &W, &S.parent).unwrap();
    assert_dense_close(&LLt(&L), &A, 1e-12);
    assert_dense_close(&L, &L0, 1e-12);

    // an empty w changes nothing
    let empty = CscMatrix::zeros(11, 1);
    chol_update(&mut L, UpdateSign::Update, &empty, &S.parent).unwrap();
    assert_dense_close(&L, &L0, 1e-12);
}

#[test]
fn test_update_errors() {
    let A = davis_11();
    let S = symbolic_cholesky(&A, AmdOrder::Natural).unwrap();
    let mut L = chol(&A, &S).unwrap();

    // A - w*wᵀ is indefinite for a large w
    let W = CooMatrix::with_shape(vec![0], vec![0], vec![100.0], 11, 1)
        .unwrap()
        .to_csc();
    assert_eq!(
        chol_update(&mut L, UpdateSign::Downdate, &W, &S.parent),
        Err(CholeskyError::DowndateNotPositiveDefinite)
    );

    // L(1, 0) is zero
    let W = CooMatrix::with_shape(vec![0, 1], vec![0, 0], vec![1.0, 1.0], 11, 1)
        .unwrap()
        .to_csc();
    assert_eq!(
        chol_update(&mut L, UpdateSign::Update, &W, &S.parent),
        Err(CholeskyError::PatternMismatch)
    );

    let W = CscMatrix::zeros(10, 1);
    assert_eq!(
        chol_update(&mut L, UpdateSign::Update, &W, &S.parent),
        Err(CholeskyError::IncompatibleDimension)
    );
}

#[test]
fn test_factorisation_solve() {
    let A = davis_11();
    let b = A.dot(&[1.0; 11]).unwrap();

    let settings = vec![
        None,
        natural(),
        Some(
            CholeskySettingsBuilder::default()
                .ordering(AmdOrder::ATimesA)
                .build()
                .unwrap(),
        ),
        Some(
            CholeskySettingsBuilder::default()
                .perm((0..11).rev().collect())
                .build()
                .unwrap(),
        ),
        Some(
            CholeskySettingsBuilder::default()
                .amd_dense_scale(1.5)
                .build()
                .unwrap(),
        ),
    ];

    for opts in settings {
        let mut F = CholeskyFactorisation::new(&A, opts).unwrap();
        let mut x = b.clone();
        F.solve(&mut x);
        assert!(x.iter().all(|&xi| (xi - 1.0).abs() < 1e-10));
    }
}

#[test]
fn test_factorisation_defaults() {
    let opts = CholeskySettings::default();
    assert_eq!(opts.ordering, AmdOrder::APlusAT);
    assert_eq!(opts.amd_dense_scale, 1.0);
    assert!(opts.perm.is_none());

    let F = CholeskyFactorisation::new(&davis_11(), None).unwrap();
    assert!(F.symbolic.p_inv.is_some());
    assert_eq!(F.n(), 11);
}

#[test]
fn test_factorisation_errors() {
    let A = CscMatrix::<f64>::zeros(2, 3);
    assert_eq!(
        CholeskyFactorisation::new(&A, None).unwrap_err(),
        CholeskyError::IncompatibleDimension
    );

    let opts = CholeskySettingsBuilder::default()
        .perm(vec![0, 0, 1])
        .build()
        .unwrap();
    let A = CscMatrix::<f64>::identity(3);
    assert_eq!(
        CholeskyFactorisation::new(&A, Some(opts)).unwrap_err(),
        CholeskyError::InvalidPermutation
    );
}

#[test]
fn test_factorisation_refactor() {
    let A = davis_11();
    let mut F = CholeskyFactorisation::new(&A, None).unwrap();

    // same pattern, new values
    let mut B = A.clone();
    B.scale(2.0);
    F.refactor(&B).unwrap();

    let mut x = B.dot(&[1.0; 11]).unwrap();
    F.solve(&mut x);
    assert!(x.iter().all(|&xi| (xi - 1.0).abs() < 1e-10));
}

#[test]
fn test_factorisation_refactor_pattern() {
    let tridiag = |c: f64| {
        CooMatrix::new(
            vec![0, 1, 0, 1, 2, 1, 2],
            vec![0, 0, 1, 1, 1, 2, 2],
            vec![4., c, c, 4., 1., 1., 4.],
        )
    };
    let opts = CholeskySettingsBuilder::default()
        .ordering(AmdOrder::Natural)
        .build()
        .unwrap();
    let mut F = CholeskyFactorisation::new(&tridiag(1.0).to_csc(), Some(opts)).unwrap();
    let L0 = F.L.clone();

    // the (0, 1) coupling is dropped, leaving part of L unfilled
    let B = tridiag(0.0).to_csc();
    assert_eq!(B.nnz(), 5);
    assert_eq!(F.refactor(&B), Err(CholeskyError::PatternMismatch));
    assert_eq!(F.L, L0);

    // stored zeros keep the pattern
    let B = tridiag(0.0).compress();
    F.refactor(&B).unwrap();
    assert_eq!(F.L.row_indices(), L0.row_indices());
    assert_eq!(F.L.get(1, 0).unwrap(), 0.0);

    let mut x = vec![4.0, 5.0, 5.0];
    F.solve(&mut x);
    assert!(x.iter().all(|&xi| (xi - 1.0).abs() < 1e-12));
}

#[test]
fn test_factorisation_update() {
    let A = davis_11();
    let mut F = CholeskyFactorisation::new(&A, None).unwrap();

    // w with the pattern of column 0 of the permuted factor, expressed in
    // the original ordering
    let perm = invperm(F.symbolic.p_inv.as_ref().unwrap()).unwrap();
    let rows: Vec<usize> = F.L.row_indices()[F.L.colrange(0)]
        .iter()
        .map(|&r| perm[r])
        .collect();
    let nz = rows.len();
    let W = CooMatrix::with_shape(rows, vec![0; nz], vec![0.5; nz], 11, 1)
        .unwrap()
        .to_csc();
    let A2 = &A + &(&W * &W.transpose());

    F.update(&W).unwrap();
    let mut x = A2.dot(&[1.0; 11]).unwrap();
    F.solve(&mut x);
    assert!(x.iter().all(|&xi| (xi - 1.0).abs() < 1e-10));

    F.downdate(&W).unwrap();
    let mut x = A.dot(&[1.0; 11]).unwrap();
    F.solve(&mut x);
    assert!(x.iter().all(|&xi| (xi - 1.0).abs() < 1e-10));

    assert_eq!(
        F.update(&CscMatrix::zeros(11, 2)),
        Err(CholeskyError::IncompatibleDimension)
    );
}

// davis_21 as a CSC matrix
fn davis_21_csc() -> CscMatrix<f64> {
    CooMatrix::new(
        vec![2, 1, 3, 0, 1, 3, 3, 1, 0, 2],
        vec![2, 0, 3, 2, 1, 0, 1, 3, 0, 1],
        vec![3.0, 3.1, 1.0, 3.2, 2.9, 3.5, 0.4, 0.9, 4.5, 1.7],
    )
    .to_csc()
}
