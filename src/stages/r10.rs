//! Stage C8: R10 detection (§4.8). Applicable only to 5x5 matrices; a degree
//! signature on rows and columns is taken as evidence of 3-connected R10
//! (full 3-connectivity verification is not reattempted here — any matrix
//! reaching this stage has already survived the 1-sum and direct-graphicness
//! stages, and the degree signature alone is what the spec names as the test).

use crate::error::Result;
use crate::node::{NodeRef, NodeType, TriState};

pub fn run(node: &NodeRef) -> Result<bool> {
    let mut n = node.borrow_mut();
    n.progress.tested_r10 = true;
    if n.matrix.num_rows() != 5 || n.matrix.num_columns() != 5 {
        return Ok(false);
    }
    let row_degrees: Vec<usize> = (0..5).map(|r| n.matrix.row_degree(r)).collect();
    let col_degrees: Vec<usize> = (0..5).map(|c| n.matrix.column_degree(c)).collect();

    fn pattern_a(degs: &[usize]) -> bool {
        degs.iter().filter(|&&d| d == 3).count() == 4 && degs.iter().filter(|&&d| d == 5).count() == 1
    }
    fn pattern_b(degs: &[usize]) -> bool {
        degs.iter().all(|&d| d == 3)
    }

    let matches = (pattern_a(&row_degrees) && pattern_a(&col_degrees))
        || (pattern_b(&row_degrees) && pattern_b(&col_degrees));
    if matches {
        n.node_type = NodeType::R10;
        n.regularity = TriState::Yes;
        n.graphicness = TriState::No;
        n.cographicness = TriState::No;
        return Ok(true);
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use crate::node::Node;

    #[test]
    fn three_regular_5x5_is_r10() {
        // Each row and column has exactly 3 nonzeros (pattern b).
        let triples = vec![
            (0, 0, 1), (0, 1, 1), (0, 2, 1),
            (1, 1, 1), (1, 2, 1), (1, 3, 1),
            (2, 2, 1), (2, 3, 1), (2, 4, 1),
            (3, 3, 1), (3, 4, 1), (3, 0, 1),
            (4, 4, 1), (4, 0, 1), (4, 1, 1),
        ];
        let m = Matrix::from_triples(5, 5, triples).unwrap();
        let root = Node::new_root(m, false);
        assert!(run(&root).unwrap());
        assert_eq!(root.borrow().node_type, NodeType::R10);
    }

    #[test]
    fn non_5x5_matrix_is_skipped() {
        let m = Matrix::from_triples(2, 2, vec![(0, 0, 1)]).unwrap();
        let root = Node::new_root(m, false);
        assert!(!run(&root).unwrap());
    }
}
