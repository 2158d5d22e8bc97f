#![allow(non_snake_case)]

use crate::algebra::*;
use std::iter::zip;
use std::ops::{Add, Mul, Neg, Sub};

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// In place `y = a*A*x + b*y`.
    ///
    /// # Panics
    /// Panics if `x` or `y` are not compatible with the dimensions of `A`.
    pub fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_N(self, y, x, a, b);
    }

    /// In place `y = a*Aᵀ*x + b*y`.
    ///
    /// # Panics
    /// Panics if `x` or `y` are not compatible with the dimensions of `A`.
    pub fn gemv_t(&self, y: &mut [T], x: &[T], a: T, b: T) {
        _csc_axpby_T(self, y, x, a, b);
    }

    /// Computes `A*x + y`.
    pub fn gaxpy(&self, x: &[T], y: &[T]) -> Result<Vec<T>, MatrixError> {
        if x.len() != self.n || y.len() != self.m {
            return Err(MatrixError::IncompatibleDimension);
        }
        let mut out = y.to_vec();
        self.gemv(&mut out, x, T::one(), T::one());
        Ok(out)
    }

    /// Computes `Aᵀ*x + y`.
    pub fn gatxpy(&self, x: &[T], y: &[T]) -> Result<Vec<T>, MatrixError> {
        if x.len() != self.m || y.len() != self.n {
            return Err(MatrixError::IncompatibleDimension);
        }
        let mut out = y.to_vec();
        self.gemv_t(&mut out, x, T::one(), T::one());
        Ok(out)
    }

    /// Computes `A*x + y` for a symmetric `A`, using only the entries in
    /// the upper triangle of `self`.
    pub fn sym_gaxpy(&self, x: &[T], y: &[T]) -> Result<Vec<T>, MatrixError> {
        if !self.is_square() || x.len() != self.n || y.len() != self.n {
            return Err(MatrixError::IncompatibleDimension);
        }
        let mut out = y.to_vec();
        _csc_symv_triu(self, &mut out, x);
        Ok(out)
    }

    /// Matrix-vector product `A*x`.
    pub fn dot(&self, x: &[T]) -> Result<Vec<T>, MatrixError> {
        self.gaxpy(x, &vec![T::zero(); self.m])
    }

    /// Sparse matrix product `A*B`.
    ///
    /// Row indices of the result are not sorted.
    pub fn multiply(&self, B: &CscMatrix<T>) -> Result<Self, MatrixError> {
        if self.n != B.m {
            return Err(MatrixError::IncompatibleDimension);
        }
        Ok(_csc_multiply(self, B))
    }

    /// Computes `alpha*A + beta*B`.
    ///
    /// Row indices of the result are not sorted.
    pub fn add_scaled(&self, B: &CscMatrix<T>, alpha: T, beta: T) -> Result<Self, MatrixError> {
        if self.shape() != B.shape() {
            return Err(MatrixError::IncompatibleDimension);
        }
        Ok(_csc_add_scaled(self, B, alpha, beta))
    }

    /// Inner product of two sparse column vectors.
    pub fn vecdot(&self, y: &CscMatrix<T>) -> Result<T, MatrixError> {
        if self.n != 1 || y.n != 1 || self.m != y.m {
            return Err(MatrixError::IncompatibleDimension);
        }

        let (xr, xv) = (&self.rowval, &self.nzval);
        let (yr, yv) = (&y.rowval, &y.nzval);

        if self.sorted && y.sorted {
            // merge the two index lists
            let (mut p, mut q) = (0, 0);
            let mut out = T::zero();
            while p < xr.len() && q < yr.len() {
                match xr[p].cmp(&yr[q]) {
                    std::cmp::Ordering::Less => p += 1,
                    std::cmp::Ordering::Greater => q += 1,
                    std::cmp::Ordering::Equal => {
                        out += xv[p] * yv[q];
                        p += 1;
                        q += 1;
                    }
                }
            }
            Ok(out)
        } else {
            // scatter x into dense workspace
            let mut w = vec![T::zero(); self.m];
            zip(xr, xv).for_each(|(&i, &v)| w[i] += v);
            Ok(zip(yr, yv).fold(T::zero(), |acc, (&i, &v)| acc + w[i] * v))
        }
    }

    /// Multiply all entries by `c`, in place.
    pub fn scale(&mut self, c: T) -> &mut Self {
        self.nzval.iter_mut().for_each(|v| *v *= c);
        if c.is_zero() {
            self.canonical = false;
        }
        self
    }

    /// Scale rows by `r` and columns by `c`, i.e. `A = diag(r)*A*diag(c)`.
    pub fn lrscale(&mut self, r: &[T], c: &[T]) -> Result<&mut Self, MatrixError> {
        if r.len() != self.m || c.len() != self.n {
            return Err(MatrixError::IncompatibleDimension);
        }

        for (col, &ci) in c.iter().enumerate() {
            let rng = self.colrange(col);
            let vals = &mut self.nzval[rng.clone()];
            let rows = &self.rowval[rng];

            for (val, row) in zip(vals, rows) {
                *val *= r[*row] * ci;
            }
        }
        if r.iter().chain(c).any(|v| v.is_zero()) {
            self.canonical = false;
        }
        Ok(self)
    }

    /// 1-norm of the matrix, i.e. the maximum absolute column sum.
    pub fn norm(&self) -> T {
        (0..self.n)
            .map(|j| {
                self.nzval[self.colrange(j)]
                    .iter()
                    .fold(T::zero(), |acc, v| acc + v.abs())
            })
            .fold(T::zero(), T::max)
    }

    /// Sum of each row, length `m`
    pub fn sum_rows(&self) -> Vec<T> {
        let mut out = vec![T::zero(); self.m];
        zip(&self.rowval, &self.nzval).for_each(|(&i, &v)| out[i] += v);
        out
    }

    /// Sum of each column, length `n`
    pub fn sum_cols(&self) -> Vec<T> {
        (0..self.n)
            .map(|j| self.nzval[self.colrange(j)].iter().copied().sum())
            .collect()
    }
}

// y += A*x, with A symmetric and supplied as its upper triangle
fn _csc_symv_triu<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T]) {
    for (col, &xcol) in x.iter().enumerate() {
        let rng = A.colrange(col);
        for (&row, &Aij) in zip(&A.rowval[rng.clone()], &A.nzval[rng]) {
            if row > col {
                continue;
            }
            y[row] += Aij * xcol;
            if row != col {
                //don't double up on the diagonal
                y[col] += Aij * x[row];
            }
        }
    }
}

// sparse matrix-vector multiply, no transpose
fn _csc_axpby_N<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.n);
    assert_eq!(y.len(), A.m);

    //first do the b*y part
    if b == T::zero() {
        y.fill(T::zero());
    } else if b != T::one() {
        y.iter_mut().for_each(|yi| *yi *= b);
    }

    // if a is zero, we're done
    if a == T::zero() {
        return;
    }

    //y += a*A*x
    for (j, &xj) in x.iter().enumerate() {
        let rng = A.colrange(j);
        for (&i, &Aij) in zip(&A.rowval[rng.clone()], &A.nzval[rng]) {
            y[i] += a * Aij * xj;
        }
    }
}

// sparse matrix-vector multiply, transposed
fn _csc_axpby_T<T: FloatT>(A: &CscMatrix<T>, y: &mut [T], x: &[T], a: T, b: T) {
    assert_eq!(x.len(), A.m);
    assert_eq!(y.len(), A.n);

    if b == T::zero() {
        y.fill(T::zero());
    } else if b != T::one() {
        y.iter_mut().for_each(|yi| *yi *= b);
    }

    if a == T::zero() {
        return;
    }

    for (j, yj) in y.iter_mut().enumerate() {
        let rng = A.colrange(j);
        let dot = zip(&A.rowval[rng.clone()], &A.nzval[rng])
            .fold(T::zero(), |acc, (&i, &Aij)| acc + Aij * x[i]);
        *yj += a * dot;
    }
}

// x += beta * A(:,j), registering new rows of column `mark-1` in rowval.
// w[i] == mark indicates that row i already has an entry in the column
fn _scatter<T: FloatT>(
    A: &CscMatrix<T>,
    j: usize,
    beta: T,
    w: &mut [usize],
    x: &mut [T],
    mark: usize,
    rowval: &mut Vec<usize>,
) {
    let rng = A.colrange(j);
    for (&i, &Aij) in zip(&A.rowval[rng.clone()], &A.nzval[rng]) {
        if w[i] < mark {
            w[i] = mark;
            rowval.push(i);
            x[i] = beta * Aij;
        } else {
            x[i] += beta * Aij;
        }
    }
}

// gather scattered values for the entries in rowval[start..]
fn _gather<T: FloatT>(x: &[T], rowval: &[usize], start: usize, nzval: &mut Vec<T>) {
    nzval.extend(rowval[start..].iter().map(|&i| x[i]));
}

fn _csc_multiply<T: FloatT>(A: &CscMatrix<T>, B: &CscMatrix<T>) -> CscMatrix<T> {
    let (m, n) = (A.m, B.n);

    let mut w = vec![0usize; m];
    let mut x = vec![T::zero(); m];

    let mut colptr = Vec::with_capacity(n + 1);
    let mut rowval = Vec::with_capacity(A.nnz() + B.nnz());
    let mut nzval = Vec::with_capacity(A.nnz() + B.nnz());

    for j in 0..n {
        let start = rowval.len();
        colptr.push(start);
        for p in B.colrange(j) {
            _scatter(A, B.rowval[p], B.nzval[p], &mut w, &mut x, j + 1, &mut rowval);
        }
        _gather(&x, &rowval, start, &mut nzval);
    }
    colptr.push(rowval.len());

    let mut C = CscMatrix::from_parts(m, n, colptr, rowval, nzval, false, false);
    C.update_format_flags();
    C
}

fn _csc_add_scaled<T: FloatT>(A: &CscMatrix<T>, B: &CscMatrix<T>, alpha: T, beta: T) -> CscMatrix<T> {
    let (m, n) = (A.m, A.n);

    let mut w = vec![0usize; m];
    let mut x = vec![T::zero(); m];

    let mut colptr = Vec::with_capacity(n + 1);
    let mut rowval = Vec::with_capacity(A.nnz() + B.nnz());
    let mut nzval = Vec::with_capacity(A.nnz() + B.nnz());

    for j in 0..n {
        let start = rowval.len();
        colptr.push(start);
        _scatter(A, j, alpha, &mut w, &mut x, j + 1, &mut rowval);
        _scatter(B, j, beta, &mut w, &mut x, j + 1, &mut rowval);
        _gather(&x, &rowval, start, &mut nzval);
    }
    colptr.push(rowval.len());

    let mut C = CscMatrix::from_parts(m, n, colptr, rowval, nzval, false, false);
    C.update_format_flags();
    C
}

//---------------------------------------------------------
// operator overloads.  These panic on incompatible dimensions
//---------------------------------------------------------

impl<'a, T: FloatT> Mul<&'a CscMatrix<T>> for &'a CscMatrix<T> {
    type Output = CscMatrix<T>;
    fn mul(self, B: &'a CscMatrix<T>) -> CscMatrix<T> {
        assert_eq!(self.n, B.m, "incompatible dimensions for matrix product");
        _csc_multiply(self, B)
    }
}

impl<T: FloatT> Mul<&[T]> for &CscMatrix<T> {
    type Output = Vec<T>;
    fn mul(self, x: &[T]) -> Vec<T> {
        let mut y = vec![T::zero(); self.m];
        self.gemv(&mut y, x, T::one(), T::zero());
        y
    }
}

impl<T: FloatT> Mul<T> for &CscMatrix<T> {
    type Output = CscMatrix<T>;
    fn mul(self, c: T) -> CscMatrix<T> {
        let mut C = self.clone();
        C.scale(c);
        C
    }
}

macro_rules! impl_scalar_lmul {
    ($($t:ty),*) => {
        $(
            impl Mul<&CscMatrix<$t>> for $t {
                type Output = CscMatrix<$t>;
                fn mul(self, A: &CscMatrix<$t>) -> CscMatrix<$t> {
                    A * self
                }
            }
        )*
    };
}
impl_scalar_lmul!(f32, f64);

impl<'a, T: FloatT> Add<&'a CscMatrix<T>> for &'a CscMatrix<T> {
    type Output = CscMatrix<T>;
    fn add(self, B: &'a CscMatrix<T>) -> CscMatrix<T> {
        assert_eq!(self.shape(), B.shape(), "incompatible dimensions for matrix sum");
        _csc_add_scaled(self, B, T::one(), T::one())
    }
}

impl<'a, T: FloatT> Sub<&'a CscMatrix<T>> for &'a CscMatrix<T> {
    type Output = CscMatrix<T>;
    fn sub(self, B: &'a CscMatrix<T>) -> CscMatrix<T> {
        assert_eq!(self.shape(), B.shape(), "incompatible dimensions for matrix difference");
        _csc_add_scaled(self, B, T::one(), -T::one())
    }
}

impl<T: FloatT> Neg for &CscMatrix<T> {
    type Output = CscMatrix<T>;
    fn neg(self) -> CscMatrix<T> {
        let mut C = self.clone();
        C.nzval.iter_mut().for_each(|v| *v = -*v);
        C
    }
}
