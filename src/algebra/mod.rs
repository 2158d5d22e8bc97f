//! Sparse matrix types and the low level operations on them.
//!
//! The central type is [`CscMatrix`], a matrix in compressed sparse column
//! format.  Matrices are most easily assembled as triplets in a [`CooMatrix`]
//! and then compressed.

mod coo;
mod csc;
mod error_types;
mod floats;
mod matrix_traits;
mod permutation;

pub use coo::*;
pub use csc::*;
pub use error_types::*;
pub use floats::*;
pub use matrix_traits::*;
pub use permutation::*;

pub(crate) use permutation::{ipermute_into, permute_into};

#[cfg(test)]
mod tests;
