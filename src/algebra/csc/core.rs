#![allow(non_snake_case)]

use crate::algebra::{FloatT, ShapedMatrix, SparseFormatError, SparseMatrix};

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```
/// use csparse::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// assert!(A.check_format().is_ok());
/// assert!(A.has_canonical_format());
/// assert_eq!(A.get(2, 1).unwrap(), 4.);
/// ```
///
/// The matrix tracks two format flags.  It is *sorted* when row indices
/// are strictly increasing within every column, and *canonical* when it is
/// sorted and stores no explicit zeros.  Canonical matrices are indexed by
/// binary search; all others by a linear scan that sums duplicate entries.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CscMatrix<T = f64> {
    // number of rows
    pub(crate) m: usize,
    // number of columns
    pub(crate) n: usize,
    // CSC column pointers, length n+1 with colptr[n] == nnz
    pub(crate) colptr: Vec<usize>,
    // row indices, length nnz
    pub(crate) rowval: Vec<usize>,
    // stored values, length nnz
    pub(crate) nzval: Vec<T>,
    pub(crate) sorted: bool,
    pub(crate) canonical: bool,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__ ensure that row indices are
    /// in bounds.  Use [`check_format`](CscMatrix::check_format) for a full
    /// validation.  The sorted and canonical flags are computed from the data.

    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        let mut A = CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
            sorted: false,
            canonical: false,
        };
        A.update_format_flags();
        A
    }

    // internal constructor for data whose format is already known
    pub(crate) fn from_parts(
        m: usize,
        n: usize,
        colptr: Vec<usize>,
        rowval: Vec<usize>,
        nzval: Vec<T>,
        sorted: bool,
        canonical: bool,
    ) -> Self {
        debug_assert_eq!(colptr.len(), n + 1);
        debug_assert_eq!(colptr[n], rowval.len());
        debug_assert_eq!(rowval.len(), nzval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
            sorted,
            canonical: sorted && canonical,
        }
    }

    /// Allocate an empty `m x n` matrix with space for `nzmax` entries.
    ///
    /// To make an m x n matrix of zeros, use
    /// ```
    /// use csparse::algebra::CscMatrix;
    /// let A : CscMatrix<f64> = CscMatrix::spalloc(3, 4, 10);
    /// assert_eq!(A.nnz(), 0);
    /// assert!(A.nzmax() >= 10);
    /// ```

    pub fn spalloc(m: usize, n: usize, nzmax: usize) -> Self {
        CscMatrix {
            m,
            n,
            colptr: vec![0; n + 1],
            rowval: Vec::with_capacity(nzmax),
            nzval: Vec::with_capacity(nzmax),
            sorted: true,
            canonical: true,
        }
    }

    /// An `m x n` matrix with no stored entries
    pub fn zeros(m: usize, n: usize) -> Self {
        Self::spalloc(m, n, 0)
    }

    /// Identity matrix of size `n`
    pub fn identity(n: usize) -> Self {
        let colptr = (0usize..=n).collect();
        let rowval = (0usize..n).collect();
        let nzval = vec![T::one(); n];

        CscMatrix::from_parts(n, n, colptr, rowval, nzval, true, true)
    }

    /// number of stored entries
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// storage capacity for entries
    pub fn nzmax(&self) -> usize {
        self.rowval.capacity().min(self.nzval.capacity())
    }

    /// column pointers, length `n+1`
    pub fn column_pointers(&self) -> &[usize] {
        &self.colptr
    }

    /// row index of each stored entry
    pub fn row_indices(&self) -> &[usize] {
        &self.rowval
    }

    /// value of each stored entry
    pub fn values(&self) -> &[T] {
        &self.nzval
    }

    /// True if row indices are strictly increasing within every column
    pub fn has_sorted_indices(&self) -> bool {
        self.sorted
    }

    /// True if sorted with no duplicate entries and no explicit zeros
    pub fn has_canonical_format(&self) -> bool {
        self.canonical
    }

    // recompute the format flags by scanning the data
    pub(crate) fn update_format_flags(&mut self) {
        self.sorted = (0..self.n).all(|col| {
            self.rowval[self.colptr[col]..self.colptr[col + 1]]
                .windows(2)
                .all(|r| r[0] < r[1])
        });
        self.canonical = self.sorted && self.nzval.iter().all(|v| !v.is_zero());
    }

    // storage range of column `col`
    #[inline]
    pub(crate) fn colrange(&self, col: usize) -> std::ops::Range<usize> {
        self.colptr[col]..self.colptr[col + 1]
    }

    /// Check that matrix data is correctly formatted.
    ///
    /// Checks array lengths, column pointer monotonicity, row index bounds
    /// and ordering of row indices within each column.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr[0] != 0 || self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            if self.rowval[self.colrange(col)].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }

        Ok(())
    }

    /// Check that the matrix is in canonical form, i.e. correctly
    /// formatted as for [`check_format`](CscMatrix::check_format) and
    /// storing no explicit zeros.
    pub fn check_canonical(&self) -> Result<(), SparseFormatError> {
        self.check_format()?;
        if self.nzval.iter().any(|v| v.is_zero()) {
            return Err(SparseFormatError::ExplicitZero);
        }
        Ok(())
    }

    /// Validity check with optional format requirements.
    ///
    /// The structure is always checked.  If `sorted` is set then row
    /// indices must be strictly increasing within each column, and if
    /// `values` is set then no explicit zeros may be stored.
    pub fn is_valid(&self, sorted: bool, values: bool) -> bool {
        match self.check_format() {
            Ok(()) => {}
            Err(SparseFormatError::BadRowOrdering) if !sorted => {}
            Err(_) => return false,
        }
        !(values && self.nzval.iter().any(|v| v.is_zero()))
    }
}

impl<T> ShapedMatrix for CscMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

impl<T> SparseMatrix<T> for CscMatrix<T>
where
    T: FloatT,
{
    const FORMAT_DESC: &'static str = "Compressed Sparse Column";

    fn nnz(&self) -> usize {
        CscMatrix::nnz(self)
    }
    fn nzmax(&self) -> usize {
        CscMatrix::nzmax(self)
    }
    fn entry_at(&self, k: usize) -> (usize, usize, T) {
        // column owning position k is the last one starting at or before k
        let col = self.colptr.partition_point(|&p| p <= k) - 1;
        (self.rowval[k], col, self.nzval[k])
    }
}

impl<T> std::fmt::Display for CscMatrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.print(f, true, 1000)
    }
}

#[test]
fn test_csc_format_flags() {
    // A =
    //[ ⋅   4.0    ⋅    ⋅   12.0]
    //[1.0  5.0    ⋅    ⋅     ⋅ ]
    //[ ⋅   6.0    ⋅    ⋅   13.0]
    //[2.0  7.0  10.0   ⋅     ⋅ ]
    //[ ⋅   8.0  11.0   ⋅   14.0]
    //[3.0  9.0    ⋅    ⋅     ⋅ ]

    let A = CscMatrix::new(
        6,                                                                 // m
        5,                                                                 // n
        vec![0, 3, 9, 11, 11, 14],                                         // colptr
        vec![1, 3, 5, 0, 1, 2, 3, 4, 5, 3, 4, 0, 2, 4],                    // rowval
        vec![1., 2., 3., 4., 5., 6., 7., 8., 9., 10., 11., 12., 13., 14.], // nzval
    );
    assert!(A.check_format().is_ok());
    assert!(A.has_sorted_indices());
    assert!(A.has_canonical_format());
    assert_eq!(A.shape(), (6, 5));
    assert_eq!(A.nnz(), 14);

    // an explicit zero is sorted but not canonical
    let B = CscMatrix::new(2, 1, vec![0, 2], vec![0, 1], vec![1., 0.]);
    assert!(B.has_sorted_indices());
    assert!(!B.has_canonical_format());
    assert!(B.is_valid(true, false));
    assert!(!B.is_valid(true, true));
    assert!(B.check_format().is_ok());
    assert_eq!(B.check_canonical(), Err(SparseFormatError::ExplicitZero));
    assert!(A.check_canonical().is_ok());

    // a repeated row index is neither
    let C = CscMatrix::new(2, 1, vec![0, 2], vec![1, 1], vec![1., 2.]);
    assert!(!C.has_sorted_indices());
    assert!(!C.has_canonical_format());
    assert_eq!(C.check_format(), Err(SparseFormatError::BadRowOrdering));
    assert_eq!(C.check_canonical(), Err(SparseFormatError::BadRowOrdering));
    assert!(C.is_valid(false, true));

    // row index out of bounds
    let D = CscMatrix::new(2, 1, vec![0, 1], vec![2], vec![1.]);
    assert_eq!(D.check_format(), Err(SparseFormatError::BadRowval));
}
