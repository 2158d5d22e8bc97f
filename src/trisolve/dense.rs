#![allow(non_snake_case)]

use super::TriangularError;
use crate::algebra::*;
use std::iter::zip;

/// Solves `L*x = b` for lower triangular `L`, with `x` replacing `b`.
pub fn lsolve<T: FloatT>(L: &CscMatrix<T>, x: &mut [T]) -> Result<(), TriangularError> {
    check_solve(L, x, true)?;
    _lsolve(&L.colptr, &L.rowval, &L.nzval, x);
    Ok(())
}

/// Solves `Lᵀ*x = b` for lower triangular `L`, with `x` replacing `b`.
pub fn ltsolve<T: FloatT>(L: &CscMatrix<T>, x: &mut [T]) -> Result<(), TriangularError> {
    check_solve(L, x, true)?;
    _ltsolve(&L.colptr, &L.rowval, &L.nzval, x);
    Ok(())
}

/// Solves `U*x = b` for upper triangular `U`, with `x` replacing `b`.
pub fn usolve<T: FloatT>(U: &CscMatrix<T>, x: &mut [T]) -> Result<(), TriangularError> {
    check_solve(U, x, false)?;
    _usolve(&U.colptr, &U.rowval, &U.nzval, x);
    Ok(())
}

/// Solves `Uᵀ*x = b` for upper triangular `U`, with `x` replacing `b`.
pub fn utsolve<T: FloatT>(U: &CscMatrix<T>, x: &mut [T]) -> Result<(), TriangularError> {
    check_solve(U, x, false)?;
    _utsolve(&U.colptr, &U.rowval, &U.nzval, x);
    Ok(())
}

// Square, compatible with x, and with the diagonal stored at the start
// (lower) or end (upper) of every column.  Off diagonal entries are not
// checked.
fn check_solve<T: FloatT>(A: &CscMatrix<T>, x: &[T], lower: bool) -> Result<(), TriangularError> {
    if !A.is_square() || A.ncols() != x.len() {
        return Err(TriangularError::IncompatibleDimension);
    }
    let has_diagonal = (0..A.n).all(|j| {
        let (f, l) = (A.colptr[j], A.colptr[j + 1]);
        f < l && A.rowval[if lower { f } else { l - 1 }] == j
    });
    if !has_diagonal {
        return Err(TriangularError::NotTriangular);
    }
    Ok(())
}

// -------------------------------------
// Substitution on the raw CSC arrays.  The diagonal is the first (L)
// or last (U) entry of each column.
// -------------------------------------

pub(crate) fn _lsolve<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    for j in 0..x.len() {
        let (f, l) = (Lp[j], Lp[j + 1]);
        x[j] /= Lx[f];
        let xj = x[j];
        for (&Lij, &Lxj) in zip(&Li[f + 1..l], &Lx[f + 1..l]) {
            x[Lij] -= Lxj * xj;
        }
    }
}

pub(crate) fn _ltsolve<T: FloatT>(Lp: &[usize], Li: &[usize], Lx: &[T], x: &mut [T]) {
    for j in (0..x.len()).rev() {
        let (f, l) = (Lp[j], Lp[j + 1]);
        let mut s = T::zero();
        for (&Lij, &Lxj) in zip(&Li[f + 1..l], &Lx[f + 1..l]) {
            s += Lxj * x[Lij];
        }
        x[j] = (x[j] - s) / Lx[f];
    }
}

fn _usolve<T: FloatT>(Up: &[usize], Ui: &[usize], Ux: &[T], x: &mut [T]) {
    for j in (0..x.len()).rev() {
        let (f, l) = (Up[j], Up[j + 1]);
        x[j] /= Ux[l - 1];
        let xj = x[j];
        for (&Uij, &Uxj) in zip(&Ui[f..l - 1], &Ux[f..l - 1]) {
            x[Uij] -= Uxj * xj;
        }
    }
}

fn _utsolve<T: FloatT>(Up: &[usize], Ui: &[usize], Ux: &[T], x: &mut [T]) {
    for j in 0..x.len() {
        let (f, l) = (Up[j], Up[j + 1]);
        let mut s = T::zero();
        for (&Uij, &Uxj) in zip(&Ui[f..l - 1], &Ux[f..l - 1]) {
            s += Uxj * x[Uij];
        }
        x[j] = (x[j] - s) / Ux[l - 1];
    }
}
