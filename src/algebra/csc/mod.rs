#![allow(non_snake_case)]

mod core;
pub use self::core::*;
mod access;
pub use access::*;
mod convert;
pub use convert::*;
mod utils;
pub use utils::*;
mod matrix_math;
pub use matrix_math::*;
mod permute;
pub use permute::*;
mod structure;
pub use structure::*;
mod block_concatenate;
pub use block_concatenate::*;
