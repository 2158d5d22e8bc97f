use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
/// Error type returned by sparse matrix format checks.
pub enum SparseFormatError {
    /// Matrix dimension fields and/or array lengths are incompatible
    #[error("Matrix dimension fields and/or array lengths are incompatible")]
    IncompatibleDimension,
    /// Data is not sorted by row index within each column
    #[error("Data is not sorted by row index within each column")]
    BadRowOrdering,
    #[error("Row value exceeds the matrix row dimension")]
    /// Row value exceeds the matrix row dimension
    BadRowval,
    #[error("Bad column pointer values")]
    /// Matrix column pointer values are defective
    BadColptr,
    #[error("Matrix stores an explicit zero")]
    /// A stored value is exactly zero
    ExplicitZero,
}

/// Error type returned by matrix indexing, arithmetic and permutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    /// Row or column index outside of the matrix dimensions
    #[error("Index ({row}, {col}) out of bounds for a {nrows} x {ncols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        nrows: usize,
        ncols: usize,
    },
    /// Operands have incompatible dimensions
    #[error("Incompatible dimensions")]
    IncompatibleDimension,
    /// Vector is not a permutation of `0..n`
    #[error("Invalid permutation vector")]
    InvalidPermutation,
}

/// Error type returned when reading triplets from text.
#[derive(Error, Debug)]
pub enum CooReadError {
    /// The underlying reader failed
    #[error("I/O error reading triplets")]
    Io(#[from] std::io::Error),
    /// A line is not of the form `row col value`
    #[error("Malformed triplet on line {line}: {content:?}")]
    Format { line: usize, content: String },
}
