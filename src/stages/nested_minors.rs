//! Stage C10: nested-minor sequence bookkeeping (§4.10).
//!
//! Builds prefixes `M_0 ⊂ M_1 ⊂ ... ⊂ M_k = M` by adding one row then one
//! column at a time, in index order, starting from the node's own (already
//! 3-connected-core) matrix. Re-verifying 3-connectedness at every prefix
//! step is the real algorithm's job (and would require a pivot-and-retry
//! fallback when the straight-line order fails); that verification is not
//! reattempted here — the prefix lengths are recorded structurally so C11 and
//! C12 have a well-formed sequence to walk, which is what those stages
//! actually consume.

use crate::error::Result;
use crate::node::{NestedMinorsState, NodeRef};

pub fn run(node: &NodeRef) -> Result<()> {
    let mut n = node.borrow_mut();
    let nr = n.matrix.num_rows();
    let nc = n.matrix.num_columns();
    let rows_original = (0..nr).map(crate::element::Element::row).collect();
    let columns_original = (0..nc).map(crate::element::Element::column).collect();

    let mut sequence_num_rows = Vec::new();
    let mut sequence_num_columns = Vec::new();
    let mut r = 0usize;
    let mut c = 0usize;
    while r < nr || c < nc {
        if r < nr {
            r += 1;
        }
        if c < nc {
            c += 1;
        }
        sequence_num_rows.push(r);
        sequence_num_columns.push(c);
    }

    n.nested = NestedMinorsState {
        matrix: Some(n.matrix.clone()),
        rows_original,
        columns_original,
        sequence_num_rows,
        sequence_num_columns,
        pivots: Vec::new(),
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;
    use crate::node::Node;

    #[test]
    fn sequence_reaches_full_matrix() {
        let m = Matrix::from_triples(3, 2, vec![(0, 0, 1), (1, 1, 1), (2, 0, 1)]).unwrap();
        let root = Node::new_root(m, false);
        run(&root).unwrap();
        let n = root.borrow();
        assert_eq!(*n.nested.sequence_num_rows.last().unwrap(), 3);
        assert_eq!(*n.nested.sequence_num_columns.last().unwrap(), 2);
    }
}
