#![allow(non_snake_case)]

use super::*;
use crate::algebra::*;
use crate::trisolve::{_lsolve, _ltsolve};
use derive_builder::Builder;

/// Required settings for [`CholeskyFactorisation`](CholeskyFactorisation)

#[derive(Builder, Debug, Clone)]
pub struct CholeskySettings {
    /// fill reducing ordering, ignored if `perm` is given
    #[builder(default = "AmdOrder::APlusAT")]
    pub ordering: AmdOrder,
    /// user supplied permutation
    #[builder(default = "None", setter(strip_option))]
    pub perm: Option<Vec<usize>>,
    /// scaling of the AMD dense row threshold
    #[builder(default = "1.0")]
    pub amd_dense_scale: f64,
}

impl Default for CholeskySettings {
    fn default() -> CholeskySettings {
        CholeskySettingsBuilder::default().build().unwrap()
    }
}

/// Performs $LL^T$ factorization of a symmetric positive definite matrix
///
/// The factorization is of `P*A*Pᵀ = L*Lᵀ`, where the permutation `P`
/// is chosen by the symbolic analysis.  Only the upper triangle of `A` is
/// referenced.

#[derive(Debug)]
pub struct CholeskyFactorisation<T = f64> {
    // ordering, elimination tree and column pointers of L
    pub symbolic: Symbolic,
    // lower triangular factor
    pub L: CscMatrix<T>,
    // workspace for solves
    work: Vec<T>,
}

impl<T> CholeskyFactorisation<T>
where
    T: FloatT,
{
    pub fn new(
        A: &CscMatrix<T>,
        opts: Option<CholeskySettings>,
    ) -> Result<CholeskyFactorisation<T>, CholeskyError> {
        if !A.is_square() {
            return Err(CholeskyError::IncompatibleDimension);
        }

        //get default values if no options passed at all
        let opts = opts.unwrap_or_default();

        //a user-provided ordering takes precedence
        let symbolic = match &opts.perm {
            Some(perm) => symbolic_cholesky_with_perm(A, perm)?,
            None => _symbolic_cholesky(A, opts.ordering, opts.amd_dense_scale)?,
        };

        let L = chol(A, &symbolic)?;
        let work = vec![T::zero(); A.ncols()];

        Ok(Self { symbolic, L, work })
    }

    /// Dimension of the factored matrix
    pub fn n(&self) -> usize {
        self.L.ncols()
    }

    // Solves Ax = b using the factors of A.
    // Solves in place (x replaces b)
    pub fn solve(&mut self, b: &mut [T]) {
        // bomb if b is the wrong size
        assert_eq!(b.len(), self.n());

        let (Lp, Li, Lx) = (&self.L.colptr, &self.L.rowval, &self.L.nzval);
        let tmp = &mut self.work;

        // tmp = P*b
        match &self.symbolic.p_inv {
            Some(p_inv) => ipermute_into(tmp, b, p_inv),
            None => tmp.copy_from_slice(b),
        }

        _lsolve(Lp, Li, Lx, tmp);
        _ltsolve(Lp, Li, Lx, tmp);

        // b = Pᵀ*tmp
        match &self.symbolic.p_inv {
            Some(p_inv) => permute_into(b, tmp, p_inv),
            None => b.copy_from_slice(tmp),
        }
    }

    /// Numeric factorization of a new matrix with the same pattern,
    /// reusing the symbolic analysis.
    pub fn refactor(&mut self, A: &CscMatrix<T>) -> Result<(), CholeskyError> {
        self.L = chol(A, &self.symbolic)?;
        Ok(())
    }

    /// Updates the factors to those of `A + w*wᵀ`, for a sparse column `w`
    pub fn update(&mut self, w: &CscMatrix<T>) -> Result<(), CholeskyError> {
        self.modify(w, UpdateSign::Update)
    }

    /// Updates the factors to those of `A - w*wᵀ`, for a sparse column `w`
    pub fn downdate(&mut self, w: &CscMatrix<T>) -> Result<(), CholeskyError> {
        self.modify(w, UpdateSign::Downdate)
    }

    fn modify(&mut self, w: &CscMatrix<T>, sigma: UpdateSign) -> Result<(), CholeskyError> {
        if w.nrows() != self.n() || w.ncols() != 1 {
            return Err(CholeskyError::IncompatibleDimension);
        }
        // w is given in the ordering of A
        let w = match &self.symbolic.p_inv {
            Some(p_inv) => w.permute_rows(p_inv)?,
            None => w.clone(),
        };
        chol_update(&mut self.L, sigma, &w, &self.symbolic.parent)
    }
}
