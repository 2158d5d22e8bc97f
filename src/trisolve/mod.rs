//! Triangular solves against sparse matrices.
//!
//! * [`lsolve`], [`ltsolve`], [`usolve`] and [`utsolve`] solve with a
//!   dense right hand side, overwriting it with the solution.
//!
//! * [`spsolve`] solves with a sparse right hand side, visiting only the
//!   columns reachable from its nonzeros ([`reach`], [`dfs`]).
//!
//! * Methods on [`CscMatrix`](crate::algebra::CscMatrix) in this module
//!   solve with matrices that are triangular only up to an unknown row
//!   and/or column permutation, and recover those permutations.
//!
//! Lower triangular matrices must store the diagonal as the first entry
//! of each column and upper triangular matrices as the last, as is the
//! case for any matrix with sorted row indices.

use thiserror::Error;

mod dense;
mod permuted;
mod reach;

pub use dense::*;
pub use reach::*;

pub(crate) use dense::{_lsolve, _ltsolve};

/// Error codes returnable from triangular solves

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriangularError {
    #[error("Matrix is not (permuted) triangular")]
    NotTriangular,
    #[error("Matrix and vector dimensions are incompatible")]
    IncompatibleDimension,
}
