#![allow(non_snake_case)]

use super::TriangularError;
use crate::algebra::*;

/// Depth first search of the graph of `G`, starting at node `j`.
///
/// There is an edge from `j` to `i` for every entry `G[i, j]`.  Nodes are
/// pushed onto `xi` as they finish, so on return the newly reached nodes
/// appear in `xi` in postorder with `j` last.  Nodes already marked are
/// not visited, and every visited node is left marked.
///
/// The search keeps its own stack, so the depth of the graph is not
/// limited by the call stack.
pub fn dfs<T: FloatT>(j: usize, G: &CscMatrix<T>, marked: &mut [bool], xi: &mut Vec<usize>) {
    // (node, next position to examine in its column)
    let mut pstack: Vec<(usize, usize)> = Vec::new();

    marked[j] = true;
    pstack.push((j, G.colptr[j]));

    while let Some(top) = pstack.last_mut() {
        let (node, end) = (top.0, G.colptr[top.0 + 1]);

        // advance to the first unmarked neighbour, if any
        while top.1 < end && marked[G.rowval[top.1]] {
            top.1 += 1;
        }

        if top.1 < end {
            let i = G.rowval[top.1];
            top.1 += 1;
            marked[i] = true;
            pstack.push((i, G.colptr[i]));
        } else {
            pstack.pop();
            xi.push(node);
        }
    }
}

/// Nodes reachable in the graph of `G` from the nonzeros of column `k`
/// of `B`, in topological order.
///
/// This is the nonzero pattern of the solution of `G*x = B[:, k]` for
/// triangular `G`, ordered so that every node precedes the nodes that
/// depend on it.
pub fn reach<T: FloatT>(G: &CscMatrix<T>, B: &CscMatrix<T>, k: usize) -> Vec<usize> {
    let mut marked = vec![false; G.ncols()];
    let mut xi = Vec::with_capacity(G.ncols());

    for p in B.colrange(k) {
        let i = B.rowval[p];
        if !marked[i] {
            dfs(i, G, &mut marked, &mut xi);
        }
    }

    xi.reverse();
    xi
}

/// Solves `G*x = B[:, k]` for triangular `G` and sparse `B`.
///
/// `G` is lower triangular if `lower` is set, else upper triangular.
/// Returns the nonzero pattern `xi` of the solution in topological order
/// along with the solution as a dense vector.  Only entries of `x` listed
/// in `xi` are computed, all others are zero.
pub fn spsolve<T: FloatT>(
    G: &CscMatrix<T>,
    B: &CscMatrix<T>,
    k: usize,
    lower: bool,
) -> Result<(Vec<usize>, Vec<T>), TriangularError> {
    let n = G.ncols();
    if !G.is_square() || B.nrows() != n || k >= B.ncols() {
        return Err(TriangularError::IncompatibleDimension);
    }

    let xi = reach(G, B, k);

    // scatter B[:, k] into x
    let mut x = vec![T::zero(); n];
    for p in B.colrange(k) {
        x[B.rowval[p]] += B.nzval[p];
    }

    for &j in &xi {
        let (f, l) = (G.colptr[j], G.colptr[j + 1]);
        if f == l {
            return Err(TriangularError::NotTriangular);
        }
        let (d, offdiag) = if lower { (f, f + 1..l) } else { (l - 1, f..l - 1) };
        if G.rowval[d] != j {
            return Err(TriangularError::NotTriangular);
        }

        x[j] /= G.nzval[d];
        let xj = x[j];
        for p in offdiag {
            x[G.rowval[p]] -= G.nzval[p] * xj;
        }
    }
    Ok((xi, x))
}
