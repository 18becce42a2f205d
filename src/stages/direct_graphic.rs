//! Stage C7: direct (co)graphicness via the oracle (§4.7).
//!
//! The shortcut ("cheap and exact") only actually holds when a dimension is
//! `<= 3`; outside that the oracle may fail merely because it can't read a
//! basis-changed representation directly (see `crate::oracle`), not because
//! the matrix is genuinely non-(co)graphic. So a failure only settles the
//! tri-state when the shortcut's own size bound holds; otherwise this stage
//! declines to commit and the node falls through to later stages. When it
//! does commit a negative attribute, the oracle's offending row/columns are
//! attached as a certifying minor (§7's certificate-propagation invariant).
//!
//! A successful read also settles the *other* attribute for free whenever the
//! reconstructed graph has at most 4 nodes: Kuratowski's theorem puts the
//! smallest nonplanar graphs at 5 (K5) and 6 (K3,3) vertices, so any graph on
//! <= 4 nodes is planar, and Whitney's planarity/cographicness duality then
//! gives the dual attribute directly, without a second oracle call.

use crate::element::MinorTag;
use crate::error::Result;
use crate::minor::MinorRecord;
use crate::node::{NodeRef, NodeType, TriState};
use crate::oracle;

/// Kuratowski's theorem: K5 (5 nodes) and K3,3 (6 nodes) are the smallest
/// nonplanar graphs, so any graph with this many nodes or fewer is planar.
const TRIVIALLY_PLANAR_NODE_BOUND: usize = 4;

pub struct Outcome {
    pub became_irregular: bool,
    pub became_nongraphic: bool,
    pub became_noncographic: bool,
}

pub fn run(node: &NodeRef, transposed: bool) -> Result<Option<Outcome>> {
    let (test_matrix, ternary, rows, cols) = {
        let n = node.borrow();
        let m = if transposed {
            n.matrix.transpose()
        } else {
            n.matrix.clone()
        };
        (m, n.ternary, n.matrix.num_rows(), n.matrix.num_columns())
    };
    let shortcut_exact = rows <= 3 || cols <= 3;
    let witness = oracle::test_graphic_matrix(&test_matrix, ternary);

    match witness {
        Ok(w) => {
            let trivially_planar = w.graph.num_nodes() <= TRIVIALLY_PLANAR_NODE_BOUND;
            let mut n = node.borrow_mut();
            if transposed {
                n.cographicness = TriState::Yes;
                n.cographic_cache.graph = Some(w.graph);
                if trivially_planar {
                    n.graphicness = TriState::Yes;
                }
                if n.node_type == NodeType::Unknown {
                    n.node_type = NodeType::Cograph;
                }
            } else {
                n.graphicness = TriState::Yes;
                n.graphic_cache.graph = Some(w.graph);
                if trivially_planar {
                    n.cographicness = TriState::Yes;
                }
                if n.node_type == NodeType::Unknown {
                    n.node_type = NodeType::Graph;
                }
            }
            n.regularity = TriState::Yes;
            Ok(Some(Outcome {
                became_irregular: false,
                became_nongraphic: false,
                became_noncographic: false,
            }))
        }
        Err(selector) => {
            if !shortcut_exact {
                return Ok(None);
            }
            let selector = if transposed { selector.transpose() } else { selector };
            let minor = MinorRecord::direct(selector, MinorTag::DeterminantWitness);
            let mut n = node.borrow_mut();
            if transposed {
                n.cographicness = TriState::No;
                n.add_minor(minor);
                Ok(Some(Outcome {
                    became_irregular: false,
                    became_nongraphic: false,
                    became_noncographic: true,
                }))
            } else {
                n.graphicness = TriState::No;
                n.add_minor(minor);
                Ok(Some(Outcome {
                    became_irregular: false,
                    became_nongraphic: true,
                    became_noncographic: false,
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use crate::node::Node;

    #[test]
    fn triangle_resolves_as_graph_leaf() {
        let m = Matrix::from_triples(
            3,
            3,
            vec![(0, 0, 1), (0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 1, 1), (2, 2, 1)],
        )
        .unwrap();
        let root = Node::new_root(m, false);
        let outcome = run(&root, false).unwrap().unwrap();
        assert!(!outcome.became_nongraphic);
        assert_eq!(root.borrow().node_type, NodeType::Graph);
        assert_eq!(root.borrow().graphicness, TriState::Yes);
    }

    #[test]
    fn small_non_incidence_row_sets_nongraphic() {
        let m = Matrix::from_triples(1, 3, vec![(0, 0, 1), (0, 1, 1), (0, 2, 1)]).unwrap();
        let root = Node::new_root(m, false);
        let outcome = run(&root, false).unwrap().unwrap();
        assert!(outcome.became_nongraphic);
        assert_eq!(root.borrow().graphicness, TriState::No);
    }
}
