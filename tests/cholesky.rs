#![allow(non_snake_case)]
use csparse::{algebra::*, cholesky::*};

// random SPD matrix B*Bᵀ + n*I
fn random_spd(n: usize, density: f64, seed: u64) -> CscMatrix<f64> {
    let B = CooMatrix::<f64>::random(n, n, density, seed).to_csc();
    let BBt = B.multiply(&B.transpose()).unwrap();
    let mut I = CscMatrix::<f64>::identity(n);
    I.scale(n as f64);
    BBt.add_scaled(&I, 1.0, 1.0).unwrap()
}

fn max_err(x: &[f64], y: &[f64]) -> f64 {
    x.iter()
        .zip(y)
        .map(|(a, b)| (a - b).abs())
        .fold(0.0, f64::max)
}

#[test]
fn test_random_spd_solve() {
    for (n, seed) in [(10, 1), (50, 2), (100, 3)] {
        let A = random_spd(n, 0.05, seed);

        let ones = vec![1.0; n];
        for ordering in [AmdOrder::Natural, AmdOrder::APlusAT, AmdOrder::ATimesA] {
            let opts = CholeskySettingsBuilder::default()
                .ordering(ordering)
                .build()
                .unwrap();
            let mut F = CholeskyFactorisation::new(&A, Some(opts)).unwrap();

            let mut b = &A * &ones[..];
            F.solve(&mut b);
            assert!(max_err(&b, &ones) < 1e-10);
        }
    }
}

#[test]
fn test_upper_triangle_only() {
    let n = 40;
    let A = random_spd(n, 0.1, 7);
    let U = A.to_triu();
    let natural = || {
        CholeskySettingsBuilder::default()
            .ordering(AmdOrder::Natural)
            .build()
            .unwrap()
    };

    let FA = CholeskyFactorisation::new(&A, Some(natural())).unwrap();
    let FU = CholeskyFactorisation::new(&U, Some(natural())).unwrap();
    assert_eq!(FA.symbolic, FU.symbolic);
    assert_eq!(FA.L.column_pointers(), FU.L.column_pointers());
    assert_eq!(FA.L.row_indices(), FU.L.row_indices());
    assert!(max_err(FA.L.values(), FU.L.values()) < 1e-12);
}

#[test]
fn test_factor_reconstructs() {
    let n = 30;
    let A = random_spd(n, 0.1, 11);
    let S = symbolic_cholesky(&A, AmdOrder::Natural).unwrap();
    let L = chol(&A, &S).unwrap();

    assert!(L.is_tril());
    assert_eq!(L.nnz(), S.lnz);
    assert_eq!(L.column_pointers(), &S.cp[..]);

    let LLt = L.multiply(&L.transpose()).unwrap();
    let diff = LLt.add_scaled(&A, 1.0, -1.0).unwrap();
    assert!(diff.norm() < 1e-10);
}

#[test]
fn test_update_matches_refactor() {
    let n = 25;
    let A = random_spd(n, 0.1, 5);
    let mut F = CholeskyFactorisation::new(&A, None).unwrap();

    // a column of L, mapped back to the ordering of A
    let f = 3;
    let Lf = F.L.slice(0, n, f, f + 1).unwrap();
    let mut w = match &F.symbolic.p_inv {
        Some(p_inv) => Lf.permute_rows(&invperm(p_inv).unwrap()).unwrap(),
        None => Lf,
    };
    w.scale(0.5);

    F.update(&w).unwrap();
    let Aplus = A.add_scaled(&w.multiply(&w.transpose()).unwrap(), 1.0, 1.0).unwrap();

    let ones = vec![1.0; n];
    let mut b = &Aplus * &ones[..];
    F.solve(&mut b);
    assert!(max_err(&b, &ones) < 1e-10);

    F.downdate(&w).unwrap();
    let mut b = &A * &ones[..];
    F.solve(&mut b);
    assert!(max_err(&b, &ones) < 1e-10);
}
