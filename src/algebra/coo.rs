#![allow(non_snake_case)]

use crate::algebra::*;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use std::io::BufRead;
use std::iter::zip;
use std::path::Path;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Sparse matrix in COOrdinate (triplet) format.
///
/// Entries are stored as parallel `(row, col, value)` arrays in insertion
/// order.  Duplicate entries are allowed and are summed on compression.
/// The shape grows as needed when entries are assigned outside of it.
///
/// ```
/// use csparse::algebra::*;
///
/// let mut T = CooMatrix::<f64>::zeros(2, 2);
/// T.assign(0, 0, 1.0).assign(1, 1, 2.0).assign(1, 1, 3.0);
///
/// let A = T.to_csc();
/// assert_eq!(A.nnz(), 2);
/// assert_eq!(A.get(1, 1).unwrap(), 5.0);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CooMatrix<T = f64> {
    pub(crate) m: usize,
    pub(crate) n: usize,
    pub(crate) rowval: Vec<usize>,
    pub(crate) colval: Vec<usize>,
    pub(crate) nzval: Vec<T>,
}

impl<T> CooMatrix<T>
where
    T: FloatT,
{
    /// Construct from triplets.  The shape is the smallest one holding
    /// every entry.
    ///
    /// # Panics
    /// Panics if the three arrays have different lengths.
    pub fn new(rowval: Vec<usize>, colval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), colval.len());
        assert_eq!(rowval.len(), nzval.len());

        let m = rowval.iter().max().map_or(0, |&i| i + 1);
        let n = colval.iter().max().map_or(0, |&j| j + 1);
        CooMatrix {
            m,
            n,
            rowval,
            colval,
            nzval,
        }
    }

    /// Construct from triplets with an explicit `m x n` shape.
    pub fn with_shape(
        rowval: Vec<usize>,
        colval: Vec<usize>,
        nzval: Vec<T>,
        m: usize,
        n: usize,
    ) -> Result<Self, MatrixError> {
        if rowval.len() != colval.len() || rowval.len() != nzval.len() {
            return Err(MatrixError::IncompatibleDimension);
        }
        for (&i, &j) in zip(&rowval, &colval) {
            if i >= m || j >= n {
                return Err(MatrixError::IndexOutOfBounds {
                    row: i,
                    col: j,
                    nrows: m,
                    ncols: n,
                });
            }
        }
        Ok(CooMatrix {
            m,
            n,
            rowval,
            colval,
            nzval,
        })
    }

    /// An `m x n` matrix with no entries
    pub fn zeros(m: usize, n: usize) -> Self {
        Self::with_capacity(m, n, 0)
    }

    /// An `m x n` matrix with no entries and space for `nzmax` of them
    pub fn with_capacity(m: usize, n: usize, nzmax: usize) -> Self {
        CooMatrix {
            m,
            n,
            rowval: Vec::with_capacity(nzmax),
            colval: Vec::with_capacity(nzmax),
            nzval: Vec::with_capacity(nzmax),
        }
    }

    /// An `m x n` matrix with `floor(density*m*n)` entries at distinct
    /// random positions, with values uniform on `[0, 1)`.
    ///
    /// The result is reproducible for a given `seed`.
    pub fn random(m: usize, n: usize, density: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);

        let total = m * n;
        let nnz = ((density.clamp(0.0, 1.0) * total as f64).floor() as usize).min(total);

        let mut A = Self::with_capacity(m, n, nnz);
        for idx in sample(&mut rng, total, nnz) {
            let v: f64 = rng.gen();
            A.rowval.push(idx % m);
            A.colval.push(idx / m);
            A.nzval.push(v.as_T());
        }
        A
    }

    /// Read whitespace separated `row col value` triplets, one per line.
    ///
    /// Blank lines and lines starting with `%` or `#` are skipped.  The
    /// shape is the smallest one holding every entry.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, CooReadError> {
        let mut A = Self::zeros(0, 0);

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('%') || trimmed.starts_with('#') {
                continue;
            }

            let bad_line = || CooReadError::Format {
                line: lineno + 1,
                content: line.clone(),
            };

            let mut fields = trimmed.split_whitespace();
            let (Some(i), Some(j), Some(v), None) =
                (fields.next(), fields.next(), fields.next(), fields.next())
            else {
                return Err(bad_line());
            };

            let i: usize = i.parse().map_err(|_| bad_line())?;
            let j: usize = j.parse().map_err(|_| bad_line())?;
            let v = T::from_str_radix(v, 10).map_err(|_| bad_line())?;
            A.assign(i, j, v);
        }

        log::debug!(
            "read {} triplets, shape ({}, {})",
            A.nnz(),
            A.m,
            A.n
        );
        Ok(A)
    }

    /// Read triplets from a file.  See [`from_reader`](CooMatrix::from_reader).
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CooReadError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// row index of each entry
    pub fn row(&self) -> &[usize] {
        &self.rowval
    }

    /// column index of each entry
    pub fn column(&self) -> &[usize] {
        &self.colval
    }

    /// value of each entry
    pub fn data(&self) -> &[T] {
        &self.nzval
    }

    /// number of entries, including duplicates
    pub fn nnz(&self) -> usize {
        self.nzval.len()
    }

    /// storage capacity for entries
    pub fn nzmax(&self) -> usize {
        self.rowval
            .capacity()
            .min(self.colval.capacity())
            .min(self.nzval.capacity())
    }

    /// Append the entry `(row, col, value)`, growing the shape if needed.
    pub fn assign(&mut self, row: usize, col: usize, value: T) -> &mut Self {
        self.rowval.push(row);
        self.colval.push(col);
        self.nzval.push(value);
        self.m = self.m.max(row + 1);
        self.n = self.n.max(col + 1);
        self
    }

    /// Append a dense block, i.e. `A[rows, cols] += vals` with `vals` in
    /// column-major order.
    pub fn assign_dense(
        &mut self,
        rows: &[usize],
        cols: &[usize],
        vals: &[T],
    ) -> Result<&mut Self, MatrixError> {
        if vals.len() != rows.len() * cols.len() {
            return Err(MatrixError::IncompatibleDimension);
        }
        for (j, &col) in cols.iter().enumerate() {
            for (i, &row) in rows.iter().enumerate() {
                self.assign(row, col, vals[i + j * rows.len()]);
            }
        }
        Ok(self)
    }

    /// Transpose, by swapping row and column indices
    pub fn transpose(&self) -> Self {
        CooMatrix {
            m: self.n,
            n: self.m,
            rowval: self.colval.clone(),
            colval: self.rowval.clone(),
            nzval: self.nzval.clone(),
        }
    }

    /// Compress to CSC format, keeping duplicates and insertion order
    /// within each column.
    pub fn compress(&self) -> CscMatrix<T> {
        let (m, n, nnz) = (self.m, self.n, self.nnz());

        // column counts
        let mut w = vec![0usize; n];
        self.colval.iter().for_each(|&j| w[j] += 1);
        let colptr = cumsum(&w);
        w.copy_from_slice(&colptr[..n]);

        let mut rowval = vec![0usize; nnz];
        let mut nzval = vec![T::zero(); nnz];
        for (&i, &j, &v) in itertools::izip!(&self.rowval, &self.colval, &self.nzval) {
            let dest = &mut w[j];
            rowval[*dest] = i;
            nzval[*dest] = v;
            *dest += 1;
        }

        CscMatrix::new(m, n, colptr, rowval, nzval)
    }

    /// Compress to a canonical CSC matrix, i.e. with duplicates summed,
    /// zeros dropped and row indices sorted.
    pub fn to_csc(&self) -> CscMatrix<T> {
        let mut A = self.compress();
        A.to_canonical();
        A
    }

    /// Dense copy of the matrix.  Duplicate entries are summed.
    pub fn to_dense(&self, order: DenseOrder) -> Vec<T> {
        let (m, n) = (self.m, self.n);
        let mut A = vec![T::zero(); m * n];
        for (&i, &j, &v) in itertools::izip!(&self.rowval, &self.colval, &self.nzval) {
            let idx = match order {
                DenseOrder::ColumnMajor => i + j * m,
                DenseOrder::RowMajor => j + i * n,
            };
            A[idx] += v;
        }
        A
    }

    /// Matrix-vector product `A*x`
    pub fn dot(&self, x: &[T]) -> Result<Vec<T>, MatrixError> {
        if x.len() != self.n {
            return Err(MatrixError::IncompatibleDimension);
        }
        let mut y = vec![T::zero(); self.m];
        for (&i, &j, &v) in itertools::izip!(&self.rowval, &self.colval, &self.nzval) {
            y[i] += v * x[j];
        }
        Ok(y)
    }
}

impl<T> From<&CscMatrix<T>> for CooMatrix<T>
where
    T: FloatT,
{
    fn from(A: &CscMatrix<T>) -> Self {
        let mut colval = Vec::with_capacity(A.nnz());
        for j in 0..A.n {
            colval.extend(std::iter::repeat(j).take(A.colptr[j + 1] - A.colptr[j]));
        }
        CooMatrix {
            m: A.m,
            n: A.n,
            rowval: A.rowval.clone(),
            colval,
            nzval: A.nzval.clone(),
        }
    }
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// Triplet copy of the matrix, in storage order
    pub fn to_coo(&self) -> CooMatrix<T> {
        CooMatrix::from(self)
    }
}

impl<T> ShapedMatrix for CooMatrix<T> {
    fn nrows(&self) -> usize {
        self.m
    }
    fn ncols(&self) -> usize {
        self.n
    }
}

impl<T> SparseMatrix<T> for CooMatrix<T>
where
    T: FloatT,
{
    const FORMAT_DESC: &'static str = "COOrdinate Sparse";

    fn nnz(&self) -> usize {
        CooMatrix::nnz(self)
    }
    fn nzmax(&self) -> usize {
        CooMatrix::nzmax(self)
    }
    fn entry_at(&self, k: usize) -> (usize, usize, T) {
        (self.rowval[k], self.colval[k], self.nzval[k])
    }
}

impl<T> std::fmt::Display for CooMatrix<T>
where
    T: FloatT,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.print(f, true, 1000)
    }
}
