#![allow(non_snake_case)]

use super::{ereach, CholeskyError, Symbolic, NO_PARENT};
use crate::algebra::*;

/// Direction of a rank-1 modification of a Cholesky factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateSign {
    /// `L*Lᵀ + w*wᵀ`
    Update,
    /// `L*Lᵀ - w*wᵀ`
    Downdate,
}

/// Up-looking numeric Cholesky factorization.
///
/// Computes `L` with `P*A*Pᵀ = L*Lᵀ`, where `P` and the structure of `L`
/// come from the symbolic analysis `S` of a matrix with the same pattern
/// as `A`.  A pattern that differs from the analysed one, including one
/// with entries missing, gives [`CholeskyError::PatternMismatch`].  Only the upper triangle of `A` is used.  Row `k` of `L` is
/// found by a sparse triangular solve over the pattern given by
/// [`ereach`].
///
/// Columns of `L` have sorted row indices with the diagonal first.
pub fn chol<T: FloatT>(A: &CscMatrix<T>, S: &Symbolic) -> Result<CscMatrix<T>, CholeskyError> {
    let n = S.n();
    if !A.is_square() || A.ncols() != n {
        return Err(CholeskyError::IncompatibleDimension);
    }

    let permuted;
    let C = match &S.p_inv {
        Some(p_inv) => {
            permuted = A.symperm(p_inv)?;
            &permuted
        }
        None => A,
    };
    let (Cp, Ci, Cx) = (&C.colptr, &C.rowval, &C.nzval);
    let cp = &S.cp;

    let mut Li = vec![0; cp[n]];
    let mut Lx = vec![T::zero(); cp[n]];

    // next free position in each column of L
    let mut c = cp[0..n].to_vec();
    let mut x = vec![T::zero(); n];
    let mut stack = vec![0; n];
    let mut marked = vec![false; n];

    for k in 0..n {
        // nonzero pattern of L(k, :)
        let top = ereach(C, k, &S.parent, &mut stack, &mut marked);

        // x = full(triu(C(:, k)))
        for p in Cp[k]..Cp[k + 1] {
            if Ci[p] <= k {
                x[Ci[p]] += Cx[p];
            }
        }
        let mut d = x[k];
        x[k] = T::zero();

        // solve L(0:k-1, 0:k-1) * x = C(:, k)
        for &i in &stack[top..n] {
            if i >= k {
                return Err(CholeskyError::PatternMismatch);
            }
            // L(i, i) is stored first in its column
            let lki = x[i] / Lx[cp[i]];
            x[i] = T::zero();
            for p in cp[i] + 1..c[i] {
                x[Li[p]] -= Lx[p] * lki;
            }
            d -= lki * lki;

            let p = c[i];
            if p >= cp[i + 1] {
                return Err(CholeskyError::PatternMismatch);
            }
            c[i] += 1;
            Li[p] = k;
            Lx[p] = lki;
        }

        if d <= T::zero() {
            log::warn!("cholesky: nonpositive pivot {:e} in column {}", d, k);
            return Err(CholeskyError::NotPositiveDefinite { column: k });
        }
        let p = c[k];
        if p >= cp[k + 1] {
            return Err(CholeskyError::PatternMismatch);
        }
        c[k] += 1;
        Li[p] = k;
        Lx[p] = d.sqrt();
    }

    // every slot of the analysed pattern must have been filled
    if c.iter().zip(&cp[1..]).any(|(ck, end)| ck != end) {
        return Err(CholeskyError::PatternMismatch);
    }

    log::debug!("cholesky: factored n = {}, nnz(L) = {}", n, cp[n]);

    Ok(CscMatrix::new(n, n, cp.clone(), Li, Lx))
}

/// Rank-1 update or downdate of a Cholesky factor, in place.
///
/// Replaces `L` by the factor of `L*Lᵀ + w*wᵀ` (or `- w*wᵀ`), where `w`
/// is the first column of `W` and `parent` the elimination tree of `L`.
/// The pattern of `w` must be contained in the pattern of column `f` of
/// `L`, for `f` the smallest row index in `w`.  The pattern of `L` does
/// not change.
///
/// A downdate that would leave a matrix that is not positive definite
/// fails with [`CholeskyError::DowndateNotPositiveDefinite`], in which
/// case `L` has been partially modified and must be discarded.
pub fn chol_update<T: FloatT>(
    L: &mut CscMatrix<T>,
    sigma: UpdateSign,
    W: &CscMatrix<T>,
    parent: &[usize],
) -> Result<(), CholeskyError> {
    let n = L.ncols();
    if !L.is_square() || W.nrows() != n || W.ncols() == 0 || parent.len() != n {
        return Err(CholeskyError::IncompatibleDimension);
    }

    let Wrows = &W.rowval[W.colrange(0)];
    let Wvals = &W.nzval[W.colrange(0)];

    // f = min(find(w))
    let Some(&f) = Wrows.iter().min() else {
        return Ok(());
    };

    // w must not create fill in L(:, f)
    let mut in_pattern = vec![false; n];
    for &i in &L.rowval[L.colrange(f)] {
        in_pattern[i] = true;
    }
    if !Wrows.iter().all(|&i| in_pattern[i]) {
        return Err(CholeskyError::PatternMismatch);
    }

    // the path from f to the root spans the pattern of every updated column
    let mut w = vec![T::zero(); n];
    for (&i, &v) in Wrows.iter().zip(Wvals) {
        w[i] += v;
    }

    let (Lp, Li, Lx) = (&L.colptr, &L.rowval, &mut L.nzval);
    let sign = match sigma {
        UpdateSign::Update => T::one(),
        UpdateSign::Downdate => -T::one(),
    };
    let mut beta = T::one();

    let mut j = f;
    while j != NO_PARENT {
        let p = Lp[j];
        let alpha = w[j] / Lx[p];
        let beta2 = beta * beta + sign * alpha * alpha;
        if beta2 <= T::zero() {
            log::warn!("cholesky downdate: lost positive definiteness in column {}", j);
            return Err(CholeskyError::DowndateNotPositiveDefinite);
        }
        let beta2 = beta2.sqrt();

        let (delta, gamma) = match sigma {
            UpdateSign::Update => (beta / beta2, alpha / (beta2 * beta)),
            UpdateSign::Downdate => (beta2 / beta, -alpha / (beta2 * beta)),
        };

        Lx[p] = delta * Lx[p]
            + match sigma {
                UpdateSign::Update => gamma * w[j],
                UpdateSign::Downdate => T::zero(),
            };
        beta = beta2;

        for p in Lp[j] + 1..Lp[j + 1] {
            let w1 = w[Li[p]];
            let w2 = w1 - alpha * Lx[p];
            w[Li[p]] = w2;
            Lx[p] = delta * Lx[p]
                + gamma
                    * match sigma {
                        UpdateSign::Update => w1,
                        UpdateSign::Downdate => w2,
                    };
        }
        j = parent[j];
    }

    // values may have become exactly zero
    L.update_format_flags();
    Ok(())
}
