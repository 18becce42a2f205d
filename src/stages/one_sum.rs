//! Stage C6: 1-sum split via connected components of the matrix's bipartite
//! row/column graph (§4.6).

use std::collections::VecDeque;

use crate::element::SubmatrixSelector;
use crate::error::Result;
use crate::matrix::Matrix;
use crate::node::NodeRef;

pub struct Outcome {
    pub children: Vec<NodeRef>,
}

/// Finds the connected components in linear time by BFS, sorts them by
/// nonzero count, and either leaves the node as a single two-connected
/// component or rewrites it as a 1-sum with one child per component.
pub fn run(node: &NodeRef) -> Result<Outcome> {
    let matrix = node.borrow().matrix.clone();
    let mut components = connected_components(&matrix);
    if components.len() <= 1 {
        node.borrow_mut().progress.tested_two_connected = true;
        return Ok(Outcome {
            children: Vec::new(),
        });
    }
    components.sort_by_key(|(rows, cols)| {
        rows.iter()
            .map(|&r| matrix.row_degree(r))
            .sum::<usize>()
            + cols
                .iter()
                .map(|&c| matrix.column_degree(c))
                .sum::<usize>()
    });
    let selectors: Vec<SubmatrixSelector> = components
        .into_iter()
        .map(|(rows, cols)| SubmatrixSelector::new(rows, cols))
        .collect();
    {
        let mut n = node.borrow_mut();
        n.update_onesum(selectors)?;
        for child in n.children.iter().filter_map(|c| c.clone()) {
            if child.borrow().matrix.num_rows() <= 1 || child.borrow().matrix.num_columns() <= 1 {
                child.borrow_mut().progress.tested_two_connected = true;
            }
        }
    }
    let children = node
        .borrow()
        .children
        .iter()
        .filter_map(|c| c.clone())
        .collect();
    Ok(Outcome { children })
}

fn connected_components(matrix: &Matrix) -> Vec<(Vec<usize>, Vec<usize>)> {
    let nr = matrix.num_rows();
    let nc = matrix.num_columns();
    let total = nr + nc;
    let mut adjacency: Vec<Vec<usize>> = vec![Vec::new(); total];
    for (r, c, _) in matrix.entries() {
        adjacency[r].push(nr + c);
        adjacency[nr + c].push(r);
    }
    let mut visited = vec![false; total];
    let mut components = Vec::new();
    for start in 0..total {
        if visited[start] {
            continue;
        }
        let mut rows = Vec::new();
        let mut cols = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);
        visited[start] = true;
        while let Some(u) = queue.pop_front() {
            if u < nr {
                rows.push(u);
            } else {
                cols.push(u - nr);
            }
            for &v in &adjacency[u] {
                if !visited[v] {
                    visited[v] = true;
                    queue.push_back(v);
                }
            }
        }
        rows.sort_unstable();
        cols.sort_unstable();
        components.push((rows, cols));
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;

    #[test]
    fn identity_splits_into_singleton_components() {
        let m = Matrix::from_triples(3, 3, (0..3).map(|i| (i, i, 1)).collect()).unwrap();
        let root = Node::new_root(m, false);
        let outcome = run(&root).unwrap();
        assert_eq!(outcome.children.len(), 3);
        for child in &outcome.children {
            assert_eq!(child.borrow().matrix.num_nonzeros(), 1);
        }
    }

    #[test]
    fn connected_matrix_stays_single_component() {
        let m = Matrix::from_triples(2, 2, vec![(0, 0, 1), (0, 1, 1), (1, 0, 1)]).unwrap();
        let root = Node::new_root(m, false);
        let outcome = run(&root).unwrap();
        assert!(outcome.children.is_empty());
        assert!(root.borrow().progress.tested_two_connected);
    }
}
