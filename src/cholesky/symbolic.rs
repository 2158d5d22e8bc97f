#![allow(non_snake_case)]

use super::{counts, etree, post, CholeskyError};
use crate::algebra::*;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fill reducing orderings available to the symbolic analysis.
///
/// Orderings other than `Natural` are computed by approximate minimum
/// degree on the pattern indicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AmdOrder {
    /// No reordering
    Natural,
    /// AMD on the pattern of `A + Aᵀ`
    #[default]
    APlusAT,
    /// AMD on the pattern of `AᵀA`
    ATimesA,
}

/// Result of a symbolic analysis.
///
/// Only `p_inv`, `parent`, `cp` and the nonzero counts are produced by the
/// Cholesky analysis.  The column permutation `q`, the `leftmost` array and
/// the row count `m2` are meaningful for QR and LU analyses only and are
/// left empty here.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Symbolic {
    /// inverse row permutation, or `None` for the natural ordering
    pub p_inv: Option<Vec<usize>>,
    /// column permutation
    pub q: Option<Vec<usize>>,
    /// elimination tree of the permuted matrix
    pub parent: Vec<usize>,
    /// column pointers of `L`
    pub cp: Vec<usize>,
    /// leftmost column index in each row
    pub leftmost: Vec<usize>,
    /// number of rows for QR, after adding fictitious rows
    pub m2: usize,
    /// number of nonzeros in `L`
    pub lnz: usize,
    /// number of nonzeros in `U`, equal to `lnz` for Cholesky
    pub unz: usize,
}

impl Symbolic {
    /// Dimension of the analysed matrix
    pub fn n(&self) -> usize {
        self.parent.len()
    }
}

/// Symbolic Cholesky analysis of the symmetric matrix `A`.
///
/// Computes the ordering requested, then the elimination tree and column
/// counts of the permuted matrix `P*A*Pᵀ`.  Should the ordering fail, the
/// natural ordering is used instead.
pub fn symbolic_cholesky<T: FloatT>(
    A: &CscMatrix<T>,
    order: AmdOrder,
) -> Result<Symbolic, CholeskyError> {
    _symbolic_cholesky(A, order, 1.0)
}

/// Symbolic Cholesky analysis of `A` using the supplied ordering `perm`.
///
/// The factored matrix is `P*A*Pᵀ`, i.e. row and column `perm[k]` of `A`
/// becomes row and column `k`.
pub fn symbolic_cholesky_with_perm<T: FloatT>(
    A: &CscMatrix<T>,
    perm: &[usize],
) -> Result<Symbolic, CholeskyError> {
    check_square(A)?;
    if perm.len() != A.ncols() {
        return Err(CholeskyError::IncompatibleDimension);
    }
    let p_inv = invperm(perm)?;
    _symbolic_permuted(A, Some(p_inv))
}

pub(crate) fn _symbolic_cholesky<T: FloatT>(
    A: &CscMatrix<T>,
    order: AmdOrder,
    amd_dense_scale: f64,
) -> Result<Symbolic, CholeskyError> {
    check_square(A)?;

    let p_inv = match _get_amd_ordering(A, order, amd_dense_scale) {
        Some(perm) => Some(invperm(&perm)?),
        None => None,
    };
    let S = _symbolic_permuted(A, p_inv)?;

    log::debug!(
        "symbolic cholesky: n = {}, ordering = {:?}, lnz = {}",
        S.n(),
        order,
        S.lnz
    );
    Ok(S)
}

fn _symbolic_permuted<T: FloatT>(
    A: &CscMatrix<T>,
    p_inv: Option<Vec<usize>>,
) -> Result<Symbolic, CholeskyError> {
    let C = match &p_inv {
        Some(p_inv) => A.symperm(p_inv)?,
        None => A.to_triu(),
    };

    let parent = etree(&C, false);
    let postorder = post(&parent);
    let colcounts = counts(&C, &parent, &postorder, false);
    let cp = cumsum(&colcounts);
    let lnz = cp[C.ncols()];

    Ok(Symbolic {
        p_inv,
        q: None,
        parent,
        cp,
        leftmost: Vec::new(),
        m2: 0,
        lnz,
        unz: lnz,
    })
}

fn check_square<T: FloatT>(A: &CscMatrix<T>) -> Result<(), CholeskyError> {
    if !A.is_square() {
        return Err(CholeskyError::IncompatibleDimension);
    }
    Ok(())
}

// Fill reducing permutation of A, or None for the natural ordering.
fn _get_amd_ordering<T: FloatT>(
    A: &CscMatrix<T>,
    order: AmdOrder,
    amd_dense_scale: f64,
) -> Option<Vec<usize>> {
    // AMD expects a pattern without duplicates.  It forms A + Aᵀ itself.
    let mut C = match order {
        AmdOrder::Natural => return None,
        AmdOrder::APlusAT => A.clone(),
        AmdOrder::ATimesA => match A.transpose().multiply(A) {
            Ok(C) => C,
            Err(_) => return None,
        },
    };
    C.sum_duplicates();

    let mut control = amd::Control::default();
    control.dense *= amd_dense_scale;

    match amd::order(C.ncols(), &C.colptr, &C.rowval, &control) {
        Ok((perm, _iperm, _info)) => Some(perm),
        Err(_) => {
            log::warn!("amd ordering failed, using the natural ordering");
            None
        }
    }
}
