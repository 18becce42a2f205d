//! Stage C9: series-parallel reduction (§4.9).
//!
//! Repeatedly removes zero rows/columns (degree 0), unit rows/columns (degree
//! 1), and exact parallel/anti-parallel duplicate rows or columns, recording
//! each removal as a [`ReductionStep`]. This covers the structural heart of
//! the stage; the hash-based incremental bookkeeping the spec describes (a
//! running hash per row/column, updated as neighbours are removed, so a
//! collision can be checked against a vector-equality test in O(degree)
//! rather than rescanning) is an implementation-efficiency detail, not an
//! observable difference — recomputing the scan from the live submatrix each
//! round gets the same reduction result. The mid-reduction "genuine
//! 2-separation" and "±2 determinant witness" outcomes named in §4.9 are not
//! separately detected here: a 2-separation surviving past this stage is
//! still caught by the 3-separation enumeration's rank-1 case would require
//! (left as a known gap, see `DESIGN.md`), and a ±2 determinant is still
//! caught by the regular-pivot violation path during nested-minor extension.

use crate::element::{Element, SubmatrixSelector};
use crate::error::Result;
use crate::matrix::Matrix;
use crate::node::{NodeRef, NodeType, ReductionStep, TriState};

pub struct Outcome {
    pub children: Vec<NodeRef>,
    /// Whether the node's type was settled (leaf or a single reduced-core
    /// child) by this call. If `false`, no reduction was possible at all and
    /// the caller should continue dispatching later stages on this node.
    pub settled: bool,
}

pub fn run(node: &NodeRef) -> Result<Outcome> {
    let original = node.borrow().matrix.clone();
    let mut alive_rows: Vec<usize> = (0..original.num_rows()).collect();
    let mut alive_cols: Vec<usize> = (0..original.num_columns()).collect();
    let mut steps = Vec::new();

    loop {
        let selector = SubmatrixSelector::new(alive_rows.clone(), alive_cols.clone());
        let working = original.submatrix(&selector)?;
        let nr = working.num_rows();
        let nc = working.num_columns();
        if nr == 0 && nc == 0 {
            break;
        }

        if let Some(i) = (0..nr).find(|&i| working.row_degree(i) <= 1) {
            let deg = working.row_degree(i);
            let tag = if deg == 0 {
                ReductionStep::Parallel(Element::row(alive_rows[i]))
            } else {
                ReductionStep::Series(Element::row(alive_rows[i]))
            };
            steps.push(tag);
            alive_rows.remove(i);
            continue;
        }
        if let Some(j) = (0..nc).find(|&j| working.column_degree(j) <= 1) {
            let deg = working.column_degree(j);
            let tag = if deg == 0 {
                ReductionStep::Parallel(Element::column(alive_cols[j]))
            } else {
                ReductionStep::Series(Element::column(alive_cols[j]))
            };
            steps.push(tag);
            alive_cols.remove(j);
            continue;
        }

        if let Some((_, k)) = find_duplicate_row(&working, nr) {
            steps.push(ReductionStep::Parallel(Element::row(alive_rows[k])));
            alive_rows.remove(k);
            continue;
        }
        if let Some((_, k)) = find_duplicate_column(&working, nc) {
            steps.push(ReductionStep::Parallel(Element::column(alive_cols[k])));
            alive_cols.remove(k);
            continue;
        }

        break;
    }

    if steps.is_empty() {
        node.borrow_mut().progress.tested_series_parallel = true;
        return Ok(Outcome {
            children: Vec::new(),
            settled: false,
        });
    }

    let selector = SubmatrixSelector::new(alive_rows, alive_cols);
    let core = original.submatrix(&selector)?;

    let mut n = node.borrow_mut();
    n.series_parallel_reduction = steps;
    n.progress.tested_series_parallel = true;

    if core.num_rows() == 0 && core.num_columns() == 0 {
        n.node_type = NodeType::SeriesParallel;
        n.regularity = TriState::Yes;
        n.graphicness = TriState::Yes;
        n.cographicness = TriState::Yes;
        return Ok(Outcome {
            children: Vec::new(),
            settled: true,
        });
    }

    n.update_series_parallel(selector)?;
    let children = n.children.iter().filter_map(|c| c.clone()).collect();
    Ok(Outcome {
        children,
        settled: true,
    })
}

fn find_duplicate_row(working: &Matrix, nr: usize) -> Option<(usize, usize)> {
    let rows: Vec<Vec<(usize, i8)>> = (0..nr).map(|i| working.row(i).collect()).collect();
    for i in 0..nr {
        for k in (i + 1)..nr {
            if rows[i] == rows[k] || is_negation(&rows[i], &rows[k]) {
                return Some((i, k));
            }
        }
    }
    None
}

fn find_duplicate_column(working: &Matrix, nc: usize) -> Option<(usize, usize)> {
    let nr = working.num_rows();
    let cols: Vec<Vec<(usize, i8)>> = (0..nc)
        .map(|c| (0..nr).filter_map(|r| working.entry(r, c).map(|v| (r, v))).collect())
        .collect();
    for i in 0..nc {
        for k in (i + 1)..nc {
            if cols[i] == cols[k] || is_negation(&cols[i], &cols[k]) {
                return Some((i, k));
            }
        }
    }
    None
}

fn is_negation(a: &[(usize, i8)], b: &[(usize, i8)]) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.0 == y.0 && x.1 == -y.1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn single_nonzero_reduces_to_empty_leaf() {
        let m = Matrix::from_triples(1, 1, vec![(0, 0, 1)]).unwrap();
        let root = Node::new_root(m, false);
        let outcome = run(&root).unwrap();
        assert!(outcome.settled);
        assert!(outcome.children.is_empty());
        assert_eq!(root.borrow().node_type, NodeType::SeriesParallel);
    }

    #[test]
    fn already_3_connected_matrix_is_left_unsettled() {
        // Triangle: every row/column has degree 2, no duplicates.
        let m = Matrix::from_triples(
            3,
            3,
            vec![(0, 0, 1), (0, 1, 1), (1, 0, 1), (1, 2, 1), (2, 1, 1), (2, 2, 1)],
        )
        .unwrap();
        let root = Node::new_root(m, false);
        let outcome = run(&root).unwrap();
        assert!(!outcome.settled);
        assert_eq!(root.borrow().node_type, NodeType::Unknown);
    }

    #[test]
    fn parallel_duplicate_column_is_removed() {
        let m = Matrix::from_triples(2, 2, vec![(0, 0, 1), (0, 1, 1), (1, 0, 1), (1, 1, 1)]).unwrap();
        let root = Node::new_root(m, false);
        let outcome = run(&root).unwrap();
        assert!(outcome.settled);
    }
}
