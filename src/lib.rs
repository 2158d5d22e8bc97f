//! __csparse__ is a sparse direct linear algebra library built around the
//! compressed sparse column (CSC) format.
//!
//! It provides
//!
//! * a [`CscMatrix`](crate::algebra::CscMatrix) store with indexed access and
//!   assignment, transposition, arithmetic, permutation, slicing and pruning,
//!   plus a [`CooMatrix`](crate::algebra::CooMatrix) triplet builder,
//!
//! * elimination tree based symbolic analysis for sparse Cholesky factorization
//!   (postordering, row and column counts of the factor),
//!
//! * an up-looking numeric Cholesky factorization with rank-1 update and
//!   downdate of an existing factor,
//!
//! * triangular solves with dense and sparse right hand sides, including
//!   solves against triangular matrices with unknown row and/or column
//!   permutations.
//!
//! A fill reducing ordering is never computed here.  Orderings are obtained
//! from the [`amd`](https://crates.io/crates/amd) crate or supplied by the
//! caller as a permutation vector.
//!
//! ```
//! use csparse::algebra::*;
//! use csparse::cholesky::*;
//!
//! // A = [4 1 0]
//! //     [1 4 1]
//! //     [0 1 4]
//! let A = CooMatrix::new(
//!     vec![0, 1, 0, 1, 2, 1, 2],
//!     vec![0, 0, 1, 1, 1, 2, 2],
//!     vec![4., 1., 1., 4., 1., 1., 4.],
//! )
//! .to_csc();
//!
//! let mut factors = CholeskyFactorisation::new(&A, None).unwrap();
//! let mut b: Vec<f64> = vec![5., 6., 5.];
//! factors.solve(&mut b);
//! assert!(b.iter().all(|x| (x - 1.).abs() < 1e-12));
//! ```
//!
//! # License
//!
//! Licensed under Apache License, Version 2.0.

pub mod algebra;
pub mod cholesky;
pub mod trisolve;
