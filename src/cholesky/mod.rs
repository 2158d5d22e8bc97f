//! Sparse Cholesky factorization of symmetric positive definite matrices.
//!
//! The factorization proceeds in two phases.  A symbolic analysis
//! ([`symbolic_cholesky`]) chooses a fill reducing ordering, computes the
//! elimination tree and the column counts of the factor.  The numeric
//! phase ([`chol`]) then computes `L` with `P*A*Pᵀ = L*Lᵀ` one row at a
//! time.  An existing factor can be modified by rank-1 updates and
//! downdates ([`chol_update`]).
//!
//! [`CholeskyFactorisation`] wraps both phases together with the solve.
//!
//! All functions reference only the upper triangle of the input matrix.

#![allow(non_snake_case)]

use crate::algebra::MatrixError;
use thiserror::Error;

mod etree;
mod factorisation;
mod numeric;
mod symbolic;

pub use etree::*;
pub use factorisation::*;
pub use numeric::*;
pub use symbolic::*;

/// Error codes returnable from Cholesky analysis and factorization

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CholeskyError {
    #[error("Matrix dimension fields are incompatible")]
    IncompatibleDimension,
    #[error("Invalid permutation vector")]
    InvalidPermutation,
    #[error("Matrix is not positive definite (nonpositive pivot in column {column})")]
    NotPositiveDefinite { column: usize },
    #[error("Downdate would make the matrix indefinite")]
    DowndateNotPositiveDefinite,
    #[error("Nonzero pattern is not contained in the symbolic factor")]
    PatternMismatch,
}

impl From<MatrixError> for CholeskyError {
    fn from(e: MatrixError) -> Self {
        match e {
            MatrixError::InvalidPermutation => CholeskyError::InvalidPermutation,
            _ => CholeskyError::IncompatibleDimension,
        }
    }
}

//configure tests of internals
#[path = "test.rs"]
#[cfg(test)]
mod test;
