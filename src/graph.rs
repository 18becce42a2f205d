//! Minimal incidence-list graph facility.
//!
//! The specification treats a full graph facility (node/edge insertion,
//! deletion, merge, edge-list reader) as an external collaborator. The
//! graphicness oracle (C7, C11) still has to return *some* concrete graph,
//! so a small graph type is carried in-crate; it only supports what the
//! oracle needs.

use crate::element::Element;

/// An edge of a [`Graph`]: its endpoints and the arc-reversal bit recording
/// whether it is traversed against its natural (lower-to-higher node) direction
/// when read off a forest/coforest path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub head: usize,
    pub tail: usize,
    pub reversed: bool,
}

/// An incidence-list graph: nodes are `0..num_nodes`, edges carry an
/// [`Element`] label (the row/column this edge represents in some matrix).
#[derive(Debug, Clone, Default)]
pub struct Graph {
    num_nodes: usize,
    edges: Vec<Edge>,
    labels: Vec<Element>,
    incident: Vec<Vec<usize>>, // per-node list of incident edge indices
}

impl Graph {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            edges: Vec::new(),
            labels: Vec::new(),
            incident: vec![Vec::new(); num_nodes],
        }
    }

    pub fn insert_node(&mut self) -> usize {
        self.incident.push(Vec::new());
        self.num_nodes += 1;
        self.num_nodes - 1
    }

    pub fn insert_edge(&mut self, head: usize, tail: usize, reversed: bool, label: Element) -> usize {
        let idx = self.edges.len();
        self.edges.push(Edge {
            head,
            tail,
            reversed,
        });
        self.labels.push(label);
        self.incident[head].push(idx);
        self.incident[tail].push(idx);
        idx
    }

    pub fn remove_edge(&mut self, idx: usize) {
        let e = self.edges[idx];
        self.incident[e.head].retain(|&i| i != idx);
        self.incident[e.tail].retain(|&i| i != idx);
    }

    /// Merges node `b` into node `a`: every edge incident to `b` becomes
    /// incident to `a` instead (used when contracting a tree edge).
    pub fn merge_nodes(&mut self, a: usize, b: usize) {
        let incident_b = std::mem::take(&mut self.incident[b]);
        for idx in incident_b {
            let e = &mut self.edges[idx];
            if e.head == b {
                e.head = a;
            }
            if e.tail == b {
                e.tail = a;
            }
            self.incident[a].push(idx);
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edge(&self, idx: usize) -> Edge {
        self.edges[idx]
    }

    pub fn label(&self, idx: usize) -> Element {
        self.labels[idx]
    }

    pub fn edges(&self) -> impl Iterator<Item = (usize, Edge, Element)> + '_ {
        (0..self.edges.len()).map(|i| (i, self.edges[i], self.labels[i]))
    }

    /// Parses a plain edge list: one `head tail` pair per line, 0-based.
    pub fn read_edge_list(text: &str) -> Self {
        let mut pairs = Vec::new();
        let mut max_node = 0usize;
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let mut parts = line.split_whitespace();
            let head: usize = parts.next().unwrap().parse().unwrap();
            let tail: usize = parts.next().unwrap().parse().unwrap();
            max_node = max_node.max(head).max(tail);
            pairs.push((head, tail));
        }
        let mut g = Graph::new(if pairs.is_empty() { 0 } else { max_node + 1 });
        for (i, (h, t)) in pairs.into_iter().enumerate() {
            g.insert_edge(h, t, false, Element::column(i));
        }
        g
    }
}

/// Generates every labelled tree on `n` nodes (Prüfer-sequence decoding),
/// `n <= 4`. Used by the direct-graphicness shortcut (C7), which only applies
/// when a dimension is `<= 3`, i.e. a tree of at most 4 nodes.
pub(crate) fn all_labelled_trees(n: usize) -> Vec<Vec<(usize, usize)>> {
    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![vec![]];
    }
    if n == 2 {
        return vec![vec![(0, 1)]];
    }
    let seq_len = n - 2;
    let mut sequences = vec![vec![]];
    for _ in 0..seq_len {
        sequences = sequences
            .into_iter()
            .flat_map(|seq: Vec<usize>| {
                (0..n).map(move |v| {
                    let mut s = seq.clone();
                    s.push(v);
                    s
                })
            })
            .collect();
    }
    sequences.into_iter().map(|seq| prufer_decode(&seq, n)).collect()
}

fn prufer_decode(seq: &[usize], n: usize) -> Vec<(usize, usize)> {
    let mut degree = vec![1i64; n];
    for &x in seq {
        degree[x] += 1;
    }
    let mut edges = Vec::with_capacity(n - 1);
    let mut ptr = 0usize;
    while degree[ptr] != 1 {
        ptr += 1;
    }
    let mut leaf = ptr;
    for &x in seq {
        edges.push((leaf, x));
        degree[x] -= 1;
        if degree[x] == 1 && x < ptr {
            leaf = x;
        } else {
            ptr += 1;
            while degree[ptr] != 1 {
                ptr += 1;
            }
            leaf = ptr;
        }
    }
    let remaining: Vec<usize> = (0..n).filter(|&i| degree[i] == 1).collect();
    edges.push((remaining[0], remaining[1]));
    edges
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_spanning_tree(n: usize, edges: &[(usize, usize)]) -> bool {
        if edges.len() != n.saturating_sub(1) {
            return false;
        }
        let mut parent: Vec<usize> = (0..n).collect();
        fn find(parent: &mut [usize], x: usize) -> usize {
            if parent[x] != x {
                parent[x] = find(parent, parent[x]);
            }
            parent[x]
        }
        for &(a, b) in edges {
            let (ra, rb) = (find(&mut parent, a), find(&mut parent, b));
            if ra == rb {
                return false;
            }
            parent[ra] = rb;
        }
        true
    }

    #[test]
    fn generates_valid_spanning_trees() {
        for n in 1..=4 {
            let trees = all_labelled_trees(n);
            assert!(!trees.is_empty());
            for t in &trees {
                assert!(is_spanning_tree(n, t), "{t:?} not spanning on {n} nodes");
            }
        }
    }

    #[test]
    fn tree_counts_match_cayley_formula() {
        assert_eq!(all_labelled_trees(2).len(), 1);
        assert_eq!(all_labelled_trees(3).len(), 3);
        assert_eq!(all_labelled_trees(4).len(), 16);
    }
}
