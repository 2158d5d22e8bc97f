//! Permutation vectors and related index utilities.
//!
//! A permutation `p` of length `n` lists, at position `k`, the index of the
//! source element that is moved to position `k`.  Its inverse satisfies
//! `p_inv[p[k]] == k`.

use crate::algebra::MatrixError;
use std::cmp::Ordering;
use std::iter::zip;

/// Permute a vector, i.e. `x[k] = b[p[k]]`.
///
/// # Panics
/// Panics if `p` indexes outside of `b`.
pub fn pvec<T: Copy>(p: &[usize], b: &[T]) -> Vec<T> {
    p.iter().map(|&k| b[k]).collect()
}

/// Inverse permute a vector, i.e. `x[p[k]] = b[k]`.
///
/// # Panics
/// Panics if `p` and `b` have different lengths.
pub fn ipvec<T: Copy>(p: &[usize], b: &[T]) -> Vec<T> {
    assert_eq!(p.len(), b.len());
    let mut x = b.to_vec();
    ipermute_into(&mut x, b, p);
    x
}

/// Inverse of the permutation vector `p`.
///
/// Returns an error unless `p` holds each of `0..p.len()` exactly once.
pub fn invperm(p: &[usize]) -> Result<Vec<usize>, MatrixError> {
    let n = p.len();
    let mut p_inv = vec![usize::MAX; n];

    for (k, &pk) in p.iter().enumerate() {
        if pk >= n || p_inv[pk] != usize::MAX {
            return Err(MatrixError::InvalidPermutation);
        }
        p_inv[pk] = k;
    }
    Ok(p_inv)
}

/// Cumulative sum of `c`, with a leading zero.
///
/// The result has length `c.len() + 1` and its last entry is the total.
/// Used to turn column counts into column pointers.
pub fn cumsum(c: &[usize]) -> Vec<usize> {
    let mut p = Vec::with_capacity(c.len() + 1);
    let mut total = 0;
    p.push(total);
    for &ck in c {
        total += ck;
        p.push(total);
    }
    p
}

/// Indices that would sort `v` in ascending order.  The sort is stable and
/// incomparable values (e.g. NaN) are treated as equal.
pub fn argsort<T: PartialOrd>(v: &[T]) -> Vec<usize> {
    let mut idx: Vec<usize> = (0..v.len()).collect();
    idx.sort_by(|&a, &b| v[a].partial_cmp(&v[b]).unwrap_or(Ordering::Equal));
    idx
}

/// The identity permutation of length `n`
pub fn identity_perm(n: usize) -> Vec<usize> {
    (0..n).collect()
}

// in place variants of pvec / ipvec writing into a preallocated x
pub(crate) fn permute_into<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, x).for_each(|(p, x)| *x = b[*p]);
}

pub(crate) fn ipermute_into<T: Copy>(x: &mut [T], b: &[T], p: &[usize]) {
    zip(p, b).for_each(|(p, b)| x[*p] = *b);
}
