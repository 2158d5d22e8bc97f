#![allow(non_snake_case)]

//! Elimination trees and nonzero counts of Cholesky factors.
//!
//! Trees are stored as parent arrays, with roots marked by [`NO_PARENT`].
//! Only the upper triangle of a symmetric input is referenced.
//!
//! Algorithms follow T. Davis, Direct Methods for Sparse Linear Systems,
//! SIAM 2006, chapter 4.

use crate::algebra::*;

/// Parent of a root node in an elimination tree
pub const NO_PARENT: usize = usize::MAX;

/// Classification of a column `j` in the row subtree of row `i`,
/// as returned by [`least_common_ancestor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeafStatus {
    /// `j` is not a leaf of the row subtree
    NotLeaf,
    /// `j` is the first leaf of the row subtree
    FirstLeaf,
    /// `j` is a subsequent leaf of the row subtree
    SubsequentLeaf,
}

/// Elimination tree of `A`, or of `AᵀA` if `ata` is set.
///
/// Without `ata`, `A` must be square and only its upper triangle is used.
pub fn etree<T: FloatT>(A: &CscMatrix<T>, ata: bool) -> Vec<usize> {
    let (m, n) = A.shape();
    let Ai = A.row_indices();

    let mut parent = vec![NO_PARENT; n];
    // virtual ancestors, path compressed
    let mut ancestor = vec![NO_PARENT; n];
    // last column seen in each row of A
    let mut prev = if ata { vec![NO_PARENT; m] } else { Vec::new() };

    for k in 0..n {
        for p in A.colrange(k) {
            let mut i = if ata { prev[Ai[p]] } else { Ai[p] };

            // traverse from i up to the root of its current subtree
            while i != NO_PARENT && i < k {
                let inext = ancestor[i];
                ancestor[i] = k;
                if inext == NO_PARENT {
                    parent[i] = k;
                }
                i = inext;
            }
            if ata {
                prev[Ai[p]] = k;
            }
        }
    }
    parent
}

/// Postorder of a forest given by `parent`.
///
/// Children are visited in increasing order, and every node appears after
/// all of its descendants.
pub fn post(parent: &[usize]) -> Vec<usize> {
    let n = parent.len();

    // linked lists of children, so that head[j] is the first child of j
    let mut head = vec![NO_PARENT; n];
    let mut next = vec![NO_PARENT; n];
    for j in (0..n).rev() {
        if parent[j] != NO_PARENT {
            next[j] = head[parent[j]];
            head[parent[j]] = j;
        }
    }

    let mut postorder = Vec::with_capacity(n);
    let mut stack = Vec::with_capacity(n);
    for j in 0..n {
        if parent[j] == NO_PARENT {
            tdfs(j, &mut head, &next, &mut postorder, &mut stack);
        }
    }
    postorder
}

// depth first search of the tree rooted at j, consuming the child lists
fn tdfs(
    j: usize,
    head: &mut [usize],
    next: &[usize],
    postorder: &mut Vec<usize>,
    stack: &mut Vec<usize>,
) {
    stack.push(j);
    while let Some(&p) = stack.last() {
        let i = head[p];
        if i == NO_PARENT {
            stack.pop();
            postorder.push(p);
        } else {
            head[p] = next[i];
            stack.push(i);
        }
    }
}

/// First descendant and depth of every node of the forest.
///
/// `first[j]` is the smallest postorder label in the subtree rooted at `j`
/// and `level[j]` the depth of `j`, with roots at level zero.
pub fn firstdesc(parent: &[usize], postorder: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let n = parent.len();
    let mut first = vec![NO_PARENT; n];
    let mut level = vec![0usize; n];

    for (k, &i) in postorder.iter().enumerate() {
        // walk up until reaching a node whose first descendant is known
        let mut len = 0;
        let mut r = i;
        while r != NO_PARENT && first[r] == NO_PARENT {
            first[r] = k;
            len += 1;
            r = parent[r];
        }
        let mut len = if r == NO_PARENT {
            len - 1
        } else {
            len + level[r]
        };
        let mut s = i;
        while s != r {
            level[s] = len;
            len = len.saturating_sub(1);
            s = parent[s];
        }
    }
    (first, level)
}

/// Leaf test for the row subtree of row `i`, given a nonzero `A(i, j)`.
///
/// Determines whether `j` is a leaf of the `i`th row subtree and, if it is,
/// the least common ancestor of `j` and the previous leaf.  For a first
/// leaf this is `i` itself.
///
/// `maxfirst`, `prevleaf` and `ancestor` are state carried across calls,
/// initialised to `None`, `None` and the identity respectively, with
/// columns `j` visited in postorder.
pub fn least_common_ancestor(
    i: usize,
    j: usize,
    first: &[usize],
    maxfirst: &mut [Option<usize>],
    prevleaf: &mut [Option<usize>],
    ancestor: &mut [usize],
) -> (Option<usize>, LeafStatus) {
    // j is not a leaf if A(i, j) is not in the strict upper part, or if j
    // lies within the subtree of the previous leaf
    if i <= j || matches!(maxfirst[i], Some(mf) if first[j] <= mf) {
        return (None, LeafStatus::NotLeaf);
    }
    maxfirst[i] = Some(first[j]);

    let jprev = prevleaf[i];
    prevleaf[i] = Some(j);

    let Some(jprev) = jprev else {
        return (Some(i), LeafStatus::FirstLeaf);
    };

    // q = root of the set containing jprev
    let mut q = jprev;
    while q != ancestor[q] {
        q = ancestor[q];
    }
    // path compression
    let mut s = jprev;
    while s != q {
        let sparent = ancestor[s];
        ancestor[s] = q;
        s = sparent;
    }
    (Some(q), LeafStatus::SubsequentLeaf)
}

/// Number of nonzeros in each row of the Cholesky factor `L`, including
/// the diagonal.
pub fn rowcnt<T: FloatT>(A: &CscMatrix<T>, parent: &[usize], postorder: &[usize]) -> Vec<usize> {
    let n = A.ncols();
    let (first, level) = firstdesc(parent, postorder);

    let mut ancestor: Vec<usize> = (0..n).collect();
    let mut maxfirst = vec![None; n];
    let mut prevleaf = vec![None; n];
    let mut rowcount = vec![1usize; n];

    // column j of Aᵀ is row j of A, so A(j, i) for i > j is an upper entry
    let At = A.transpose();
    let Ati = At.row_indices();

    for &j in postorder {
        for p in At.colrange(j) {
            let i = Ati[p];
            let (q, jleaf) =
                least_common_ancestor(i, j, &first, &mut maxfirst, &mut prevleaf, &mut ancestor);
            if let (Some(q), LeafStatus::FirstLeaf | LeafStatus::SubsequentLeaf) = (q, jleaf) {
                rowcount[i] += level[j] - level[q];
            }
        }
        if parent[j] != NO_PARENT {
            ancestor[j] = parent[j];
        }
    }
    rowcount
}

/// Number of nonzeros in each column of the Cholesky factor of `A`, or of
/// `AᵀA` if `ata` is set, including the diagonal.
///
/// `parent` and `postorder` must be the elimination tree of the same
/// matrix and its postorder.
pub fn counts<T: FloatT>(
    A: &CscMatrix<T>,
    parent: &[usize],
    postorder: &[usize],
    ata: bool,
) -> Vec<usize> {
    let n = A.ncols();
    let At = A.transpose();
    let (Atp, Ati) = (At.column_pointers(), At.row_indices());

    let mut ancestor: Vec<usize> = (0..n).collect();
    let mut maxfirst = vec![None; n];
    let mut prevleaf = vec![None; n];
    let mut first = vec![NO_PARENT; n];

    // delta[j] = 1 if j is a leaf, zero otherwise.  Can go negative
    // before the final accumulation.
    let mut delta = vec![0isize; n];
    for (k, &j) in postorder.iter().enumerate() {
        delta[j] = isize::from(first[j] == NO_PARENT);
        let mut r = j;
        while r != NO_PARENT && first[r] == NO_PARENT {
            first[r] = k;
            r = parent[r];
        }
    }

    // for AᵀA, rows of A are grouped by their leftmost column in postorder
    let (head, next) = if ata {
        init_ata(&At, postorder)
    } else {
        (Vec::new(), Vec::new())
    };

    for (k, &j) in postorder.iter().enumerate() {
        if parent[j] != NO_PARENT {
            delta[parent[j]] -= 1;
        }

        let mut J = if ata { head[k] } else { j };
        while J != NO_PARENT {
            for &i in &Ati[Atp[J]..Atp[J + 1]] {
                let (q, jleaf) = least_common_ancestor(
                    i,
                    j,
                    &first,
                    &mut maxfirst,
                    &mut prevleaf,
                    &mut ancestor,
                );
                match (jleaf, q) {
                    (LeafStatus::FirstLeaf, _) => delta[j] += 1,
                    (LeafStatus::SubsequentLeaf, Some(q)) => {
                        delta[j] += 1;
                        delta[q] -= 1;
                    }
                    _ => {}
                }
            }
            J = if ata { next[J] } else { NO_PARENT };
        }
        if parent[j] != NO_PARENT {
            ancestor[j] = parent[j];
        }
    }

    // sum up the deltas over each subtree
    for j in 0..n {
        if parent[j] != NO_PARENT {
            delta[parent[j]] += delta[j];
        }
    }
    delta.into_iter().map(|c| c as usize).collect()
}

// linked lists of the rows of A, keyed by the postorder position of the
// leftmost column in each row.  At is the transpose of A.
fn init_ata<T: FloatT>(At: &CscMatrix<T>, postorder: &[usize]) -> (Vec<usize>, Vec<usize>) {
    let (n, m) = At.shape();

    let mut w = vec![0usize; n];
    for (k, &j) in postorder.iter().enumerate() {
        w[j] = k;
    }

    let mut head = vec![NO_PARENT; n + 1];
    let mut next = vec![NO_PARENT; m];
    for i in 0..m {
        let k = At.row_indices()[At.colrange(i)]
            .iter()
            .map(|&j| w[j])
            .min()
            .unwrap_or(n);
        next[i] = head[k];
        head[k] = i;
    }
    (head, next)
}

/// Row counts of the Cholesky factor of the symmetric matrix `A`
pub fn chol_rowcounts<T: FloatT>(A: &CscMatrix<T>) -> Vec<usize> {
    let parent = etree(A, false);
    rowcnt(A, &parent, &post(&parent))
}

/// Column counts of the Cholesky factor of the symmetric matrix `A`
pub fn chol_colcounts<T: FloatT>(A: &CscMatrix<T>) -> Vec<usize> {
    let parent = etree(A, false);
    counts(A, &parent, &post(&parent), false)
}

/// Nonzero pattern of row `k` of the Cholesky factor `L`, excluding the
/// diagonal.
///
/// The pattern is written to `stack[top..n]` in topological order and
/// `top` is returned.  `stack` and `marked` are workspaces of length `n`;
/// `marked` must be all `false` on entry and is left so on return.
pub fn ereach<T: FloatT>(
    A: &CscMatrix<T>,
    k: usize,
    parent: &[usize],
    stack: &mut [usize],
    marked: &mut [bool],
) -> usize {
    let n = A.ncols();
    let Ai = A.row_indices();
    let mut top = n;

    marked[k] = true;
    for p in A.colrange(k) {
        let mut i = Ai[p];
        if i > k {
            continue;
        }
        // path from i up to the first marked node
        let mut len = 0;
        while i != NO_PARENT && !marked[i] {
            stack[len] = i;
            len += 1;
            marked[i] = true;
            i = parent[i];
        }
        // push the path onto the output stack
        while len > 0 {
            top -= 1;
            len -= 1;
            stack[top] = stack[len];
        }
    }

    for &i in &stack[top..n] {
        marked[i] = false;
    }
    marked[k] = false;
    top
}
