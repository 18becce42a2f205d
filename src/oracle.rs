//! The graphicness/cographicness oracle shared by C7 (direct check on small
//! matrices) and C11 (incremental check along a nested-minor sequence).
//!
//! Each row is read as one edge: a row with two nonzero entries is a normal
//! edge between the two marked columns (nodes); a row with exactly one
//! nonzero entry is a self-loop at a freshly created node (the degenerate
//! "single loop" case named in scenario 2 of the testable properties); a row
//! with zero nonzeros is an isolated node with no edge. A row with three or
//! more nonzeros (or, in ternary mode, a two-entry row whose signs don't
//! match the arc convention) cannot be read off directly and the oracle
//! reports failure, returning the offending row/columns as a witness so the
//! caller can attach it as a certifying minor — full graphic-matroid
//! recognition (any basis, via spanning-tree/network-matrix representations)
//! is the job of `examples/original_source/src/tu/graphic.c` and is out of
//! scope for this bounded, direct-incidence oracle; see `DESIGN.md` for the
//! scoping decision.

use crate::element::{Element, SubmatrixSelector};
use crate::graph::Graph;
use crate::matrix::Matrix;

/// What the oracle returns on success: the reconstructed graph (one edge per
/// row) plus, for ternary matrices, whether the sign convention was consistent.
#[derive(Debug, Clone)]
pub struct GraphicWitness {
    pub graph: Graph,
}

/// Attempts to read `matrix` directly as an edge(row)-node(column) incidence
/// matrix. `ternary` additionally requires, for two-entry rows, that the two
/// values have opposite sign (the arc convention for a signed/network matrix).
/// On failure, returns the row (and its offending columns) that couldn't be
/// read off, so the caller can attach it as a certifying minor.
pub fn test_graphic_matrix(matrix: &Matrix, ternary: bool) -> Result<GraphicWitness, SubmatrixSelector> {
    let mut graph = Graph::new(matrix.num_columns());
    for r in 0..matrix.num_rows() {
        let nz: Vec<(usize, i8)> = matrix.row(r).collect();
        match nz.len() {
            0 => {
                // Isolated edge with no endpoints recorded: treat as a fresh
                // node with no incident edge at all.
                graph.insert_node();
            }
            1 => {
                let node = graph.insert_node();
                graph.insert_edge(node, node, false, Element::row(r));
            }
            2 => {
                let (c0, v0) = nz[0];
                let (c1, v1) = nz[1];
                if ternary && v0 as i32 * v1 as i32 != -1 {
                    return Err(SubmatrixSelector::new(vec![r], vec![c0, c1]));
                }
                graph.insert_edge(c0, c1, false, Element::row(r));
            }
            _ => return Err(SubmatrixSelector::new(vec![r], nz.iter().map(|&(c, _)| c).collect())),
        }
    }
    Ok(GraphicWitness { graph })
}

/// Cographicness is graphicness of the transpose; a failure witness is
/// expressed back in the original (non-transposed) row/column space.
pub fn test_cographic_matrix(matrix: &Matrix, ternary: bool) -> Result<GraphicWitness, SubmatrixSelector> {
    test_graphic_matrix(&matrix.transpose(), ternary).map_err(|sel| sel.transpose())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_is_graphic() {
        // Edge-node incidence of the triangle K3: each row picks 2 of 3 nodes.
        let m = Matrix::from_triples(
            3,
            3,
            vec![(0, 0, 1), (0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 1, 1), (2, 2, 1)],
        )
        .unwrap();
        let witness = test_graphic_matrix(&m, false).unwrap();
        assert_eq!(witness.graph.num_edges(), 3);
    }

    #[test]
    fn three_nonzero_row_is_rejected() {
        let m = Matrix::from_triples(1, 3, vec![(0, 0, 1), (0, 1, 1), (0, 2, 1)]).unwrap();
        let err = test_graphic_matrix(&m, false).unwrap_err();
        assert_eq!(err.rows, vec![0]);
        assert_eq!(err.columns, vec![0, 1, 2]);
    }

    #[test]
    fn single_entry_row_is_a_loop() {
        let m = Matrix::from_triples(1, 1, vec![(0, 0, 1)]).unwrap();
        let witness = test_graphic_matrix(&m, false).unwrap();
        assert_eq!(witness.graph.num_edges(), 1);
        let (_, edge, _) = witness.graph.edges().next().unwrap();
        assert_eq!(edge.head, edge.tail);
    }

    #[test]
    fn k5_incidence_matrix_is_graphic_with_expected_shape() {
        // 10 edges x 5 nodes, each row marking its two endpoints.
        let mut triples = Vec::new();
        let mut row = 0usize;
        for i in 0..5 {
            for j in (i + 1)..5 {
                triples.push((row, i, 1));
                triples.push((row, j, 1));
                row += 1;
            }
        }
        let m = Matrix::from_triples(10, 5, triples).unwrap();
        let witness = test_graphic_matrix(&m, false).unwrap();
        assert_eq!(witness.graph.num_nodes(), 5);
        assert_eq!(witness.graph.num_edges(), 10);
    }
}
