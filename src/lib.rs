//! Seymour decomposition of regular matroids.
//!
//! Decomposes a 0/±1 matrix into a tree of 1-, 2-, and 3-sums whose leaves are
//! graphic, cographic, or R₁₀ matrices, certifying regularity (or producing a
//! violating minor when the matrix is not regular). The primary entry point is
//! [`decompose`]; [`DecompositionParameters`] controls which analyses run and
//! when the search stops early.

pub mod element;
pub mod error;
pub mod graph;
pub mod io;
pub mod linked;
pub mod matrix;
pub mod minor;
pub mod node;
pub mod oracle;
pub mod params;
pub mod scheduler;
pub mod separation;
pub mod stages;

pub use element::{Element, SubmatrixSelector};
pub use error::{Error, Result};
pub use matrix::Matrix;
pub use node::{Node, NodeRef, NodeType, TriState};
pub use params::{DecomposeStrategy, DecompositionParameters, Statistics};
pub use scheduler::Scheduler;

/// Runs a full decomposition of `matrix` under `params`, returning the root of
/// the resulting decomposition tree together with the run's statistics.
///
/// `ternary` selects GF(3) pivot arithmetic for the nested-minor/graphicness
/// stages instead of the integer ("Regular") pivot rule; it does not affect
/// the input matrix's own entries, which are always read as signed `{-1, 1}`.
pub fn decompose(
    matrix: Matrix,
    ternary: bool,
    params: DecompositionParameters,
) -> Result<(NodeRef, Statistics)> {
    matrix.check_invariants()?;
    let root = Node::new_root(matrix, ternary);
    let mut scheduler = Scheduler::new(params)?;
    let root = scheduler.run(root)?;
    Ok((root, scheduler.statistics()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_matrix_decomposes_to_a_single_planar_leaf() {
        let m = Matrix::zero(0, 0);
        let (root, _stats) = decompose(m, false, DecompositionParameters::default()).unwrap();
        let n = root.borrow();
        assert_eq!(n.node_type, NodeType::Planar);
        assert_eq!(n.regularity, TriState::Yes);
        assert_eq!(n.graphicness, TriState::Yes);
        assert_eq!(n.cographicness, TriState::Yes);
    }

    #[test]
    fn identity_matrix_splits_into_singleton_graphic_leaves() {
        let m = Matrix::from_triples(3, 3, (0..3).map(|i| (i, i, 1)).collect()).unwrap();
        let (root, _stats) = decompose(m, false, DecompositionParameters::default()).unwrap();
        let n = root.borrow();
        assert_eq!(n.node_type, NodeType::OneSum);
        assert_eq!(n.children.len(), 3);
        assert_eq!(n.regularity, TriState::Yes);
    }

    #[test]
    fn canonical_r10_matrix_is_a_single_leaf() {
        let triples = vec![
            (0, 0, 1), (0, 1, 1), (0, 2, 1),
            (1, 1, 1), (1, 2, 1), (1, 3, 1),
            (2, 2, 1), (2, 3, 1), (2, 4, 1),
            (3, 3, 1), (3, 4, 1), (3, 0, 1),
            (4, 4, 1), (4, 0, 1), (4, 1, 1),
        ];
        let m = Matrix::from_triples(5, 5, triples).unwrap();
        let (root, _stats) = decompose(m, false, DecompositionParameters::default()).unwrap();
        let n = root.borrow();
        assert_eq!(n.node_type, NodeType::R10);
        assert_eq!(n.regularity, TriState::Yes);
        assert_eq!(n.graphicness, TriState::No);
        assert_eq!(n.cographicness, TriState::No);
    }
}
