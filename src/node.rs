//! Decomposition node (C4): a matrix plus type, child list, parent-maps, cached
//! analysis artefacts, and reference-counted sharing across cloned subtrees.
//!
//! Ownership/ref-counting (§9 "cyclic references") is modelled with `Rc<RefCell<Node>>`
//! rather than a hand-rolled capture/release pair: `Rc`'s drop glue already gives
//! exactly the "free when refcount hits zero" behaviour the spec asks for, and a
//! hand-rolled counter would just be reimplementing it unsafely.

use hashbrown::HashMap;
use std::cell::RefCell;
use std::rc::Rc;

use crate::element::{Element, SubmatrixSelector};
use crate::error::Result;
use crate::graph::Graph;
use crate::matrix::Matrix;
use crate::minor::{MinorList, MinorRecord};
use crate::separation::{RankClass, Separation, Side};

pub type NodeRef = Rc<RefCell<Node>>;

/// The type a node has settled into, per §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Unknown,
    Irregular,
    OneSum,
    TwoSum,
    DeltaSum,
    ThreeSum,
    YSum,
    SeriesParallel,
    Graph,
    Cograph,
    Planar,
    R10,
    Pivots,
}

/// A tri-state attribute (`-1`/`0`/`+1` in the spec's own vocabulary).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriState {
    No,
    Unknown,
    Yes,
}

impl TriState {
    /// The "minimum over children" combination rule of §7: `No` dominates,
    /// `Unknown` beats nothing but `Yes`, `Yes` only survives if every input is `Yes`.
    pub fn min(self, other: Self) -> Self {
        use TriState::*;
        match (self, other) {
            (No, _) | (_, No) => No,
            (Unknown, _) | (_, Unknown) => Unknown,
            (Yes, Yes) => Yes,
        }
    }

    pub fn as_i8(self) -> i8 {
        match self {
            TriState::No => -1,
            TriState::Unknown => 0,
            TriState::Yes => 1,
        }
    }
}

impl Default for TriState {
    fn default() -> Self {
        TriState::Unknown
    }
}

/// Per-child bookkeeping a parent keeps: how the child's rows/columns map back
/// to parent elements, plus any "special" indices shared with another child.
#[derive(Debug, Clone, Default)]
pub struct ChildLink {
    pub row_to_parent: Vec<Element>,
    pub column_to_parent: Vec<Element>,
    pub special_rows: Vec<usize>,
    pub special_columns: Vec<usize>,
}

/// Which stages have already run on this node, per the scheduler's dispatch
/// order (§4.5).
#[derive(Debug, Clone, Copy, Default)]
pub struct ProgressFlags {
    pub tested_two_connected: bool,
    pub tested_r10: bool,
    pub tested_series_parallel: bool,
    pub last_prefix_graphic: Option<usize>,
    pub last_prefix_cographic: Option<usize>,
}

/// A single series-parallel reduction step (§4.9), recorded in removal order.
#[derive(Debug, Clone, Copy)]
pub enum ReductionStep {
    Series(Element),
    Parallel(Element),
}

/// Nested-minor sequence bookkeeping (C10): the current (possibly pivoted)
/// working matrix, maps back into the node's own element space, and prefix
/// length arrays.
#[derive(Debug, Clone, Default)]
pub struct NestedMinorsState {
    pub matrix: Option<Matrix>,
    pub rows_original: Vec<Element>,
    pub columns_original: Vec<Element>,
    pub sequence_num_rows: Vec<usize>,
    pub sequence_num_columns: Vec<usize>,
    pub pivots: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, Default)]
pub struct GraphCache {
    pub graph: Option<Graph>,
}

#[derive(Debug)]
pub struct Node {
    pub ternary: bool,
    pub matrix: Matrix,
    pub transpose: Option<Matrix>,
    pub node_type: NodeType,
    pub regularity: TriState,
    pub graphicness: TriState,
    pub cographicness: TriState,
    pub children: Vec<Option<NodeRef>>,
    pub child_links: Vec<ChildLink>,
    pub row_to_child: Vec<Option<usize>>,
    pub column_to_child: Vec<Option<usize>>,
    pub minors: MinorList,
    pub progress: ProgressFlags,
    pub graphic_cache: GraphCache,
    pub cographic_cache: GraphCache,
    pub series_parallel_reduction: Vec<ReductionStep>,
    pub nested: NestedMinorsState,
}

impl Node {
    fn new_unknown(matrix: Matrix, ternary: bool) -> Self {
        let num_rows = matrix.num_rows();
        let num_columns = matrix.num_columns();
        Self {
            ternary,
            matrix,
            transpose: None,
            node_type: NodeType::Unknown,
            regularity: TriState::Unknown,
            graphicness: TriState::Unknown,
            cographicness: TriState::Unknown,
            children: Vec::new(),
            child_links: Vec::new(),
            row_to_child: vec![None; num_rows],
            column_to_child: vec![None; num_columns],
            minors: MinorList::default(),
            progress: ProgressFlags::default(),
            graphic_cache: GraphCache::default(),
            cographic_cache: GraphCache::default(),
            series_parallel_reduction: Vec::new(),
            nested: NestedMinorsState::default(),
        }
    }

    /// Creates a root node holding the input matrix.
    pub fn new_root(matrix: Matrix, ternary: bool) -> NodeRef {
        Rc::new(RefCell::new(Self::new_unknown(matrix, ternary)))
    }

    /// A fresh node with a copy of `matrix`, type `Unknown`, no children —
    /// used when a stage needs to push work back onto the scheduler without
    /// yet knowing the final node type (e.g. the SP stage's reduced core).
    pub fn clone_unknown(matrix: Matrix, ternary: bool) -> NodeRef {
        Rc::new(RefCell::new(Self::new_unknown(matrix, ternary)))
    }

    /// Certificate accumulator append (`add-minor`).
    pub fn add_minor(&mut self, minor: MinorRecord) {
        self.minors.push(minor);
    }

    fn make_child(&self, selector: &SubmatrixSelector) -> Result<NodeRef> {
        let submatrix = self.matrix.submatrix(selector)?;
        Ok(Self::clone_unknown(submatrix, self.ternary))
    }

    /// `update-onesum`: one child per connected component, each holding the
    /// component's submatrix.
    pub fn update_onesum(&mut self, components: Vec<SubmatrixSelector>) -> Result<()> {
        let mut row_to_child = vec![None; self.matrix.num_rows()];
        let mut column_to_child = vec![None; self.matrix.num_columns()];
        let mut children = Vec::with_capacity(components.len());
        let mut child_links = Vec::with_capacity(components.len());
        for (idx, selector) in components.iter().enumerate() {
            for &r in &selector.rows {
                row_to_child[r] = Some(idx);
            }
            for &c in &selector.columns {
                column_to_child[c] = Some(idx);
            }
            let child = self.make_child(selector)?;
            children.push(Some(child));
            child_links.push(ChildLink {
                row_to_parent: selector.rows.iter().copied().map(Element::row).collect(),
                column_to_parent: selector.columns.iter().copied().map(Element::column).collect(),
                special_rows: Vec::new(),
                special_columns: Vec::new(),
            });
        }
        self.node_type = NodeType::OneSum;
        self.children = children;
        self.child_links = child_links;
        self.row_to_child = row_to_child;
        self.column_to_child = column_to_child;
        self.progress.tested_two_connected = true;
        Ok(())
    }

    /// `update-series-parallel`: a single child holding the reduced core.
    pub fn update_series_parallel(&mut self, reduced: SubmatrixSelector) -> Result<()> {
        let mut row_to_child = vec![None; self.matrix.num_rows()];
        let mut column_to_child = vec![None; self.matrix.num_columns()];
        for &r in &reduced.rows {
            row_to_child[r] = Some(0);
        }
        for &c in &reduced.columns {
            column_to_child[c] = Some(0);
        }
        let child = self.make_child(&reduced)?;
        self.node_type = NodeType::SeriesParallel;
        self.children = vec![Some(child)];
        self.child_links = vec![ChildLink {
            row_to_parent: reduced.rows.iter().copied().map(Element::row).collect(),
            column_to_parent: reduced.columns.iter().copied().map(Element::column).collect(),
            special_rows: Vec::new(),
            special_columns: Vec::new(),
        }];
        self.row_to_child = row_to_child;
        self.column_to_child = column_to_child;
        self.progress.tested_series_parallel = true;
        Ok(())
    }

    /// `update-twosum`: two children, each side's rows/columns in matrix
    /// order, plus one rank-1 witness row (resp. column) from the other side
    /// appended to child 0 (resp. child 1) to carry the rank-1 overlap.
    pub fn update_twosum(&mut self, separation: &Separation) -> Result<()> {
        let witness_row_side1 = separation
            .rows
            .iter()
            .position(|f| f.side == Side::Second && f.rank_class == RankClass::Rank1Witness);
        let witness_col_side0 = separation
            .columns
            .iter()
            .position(|f| f.side == Side::First && f.rank_class == RankClass::Rank1Witness);

        let mut rows0: Vec<usize> = separation
            .rows
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::First)
            .map(|(i, _)| i)
            .collect();
        let rows1: Vec<usize> = separation
            .rows
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::Second)
            .map(|(i, _)| i)
            .collect();
        let cols0: Vec<usize> = separation
            .columns
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::First)
            .map(|(i, _)| i)
            .collect();
        let mut cols1: Vec<usize> = separation
            .columns
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::Second)
            .map(|(i, _)| i)
            .collect();

        if let Some(wr) = witness_row_side1 {
            rows0.push(wr);
        }
        if let Some(wc) = witness_col_side0 {
            cols1.push(wc);
        }

        let sel0 = SubmatrixSelector::new(rows0.clone(), cols0.clone());
        let sel1 = SubmatrixSelector::new(rows1.clone(), cols1.clone());

        let child0 = self.make_child(&sel0)?;
        let child1 = self.make_child(&sel1)?;

        let mut row_to_child = vec![None; self.matrix.num_rows()];
        for &r in &rows0 {
            row_to_child[r] = Some(0);
        }
        for &r in &rows1 {
            row_to_child[r] = Some(1);
        }
        let mut column_to_child = vec![None; self.matrix.num_columns()];
        for &c in &cols0 {
            column_to_child[c] = Some(0);
        }
        for &c in &cols1 {
            column_to_child[c] = Some(1);
        }

        self.node_type = NodeType::TwoSum;
        self.children = vec![Some(child0), Some(child1)];
        self.child_links = vec![
            ChildLink {
                row_to_parent: sel0.rows.iter().copied().map(Element::row).collect(),
                column_to_parent: sel0.columns.iter().copied().map(Element::column).collect(),
                special_rows: witness_row_side1.into_iter().collect(),
                special_columns: Vec::new(),
            },
            ChildLink {
                row_to_parent: sel1.rows.iter().copied().map(Element::row).collect(),
                column_to_parent: sel1.columns.iter().copied().map(Element::column).collect(),
                special_rows: Vec::new(),
                special_columns: witness_col_side0.into_iter().collect(),
            },
        ];
        self.row_to_child = row_to_child;
        self.column_to_child = column_to_child;
        Ok(())
    }

    /// `update-threesum`: like `update_twosum` but carries every rank-2
    /// witness row/column (there may be one or two per off-diagonal block,
    /// per §3's "distributed 1+1 or concentrated 2+0") into the opposite
    /// child, re-establishing the rank-2 overlap the 3-sum glues along.
    pub fn update_threesum(&mut self, separation: &Separation) -> Result<()> {
        let witness_rows_side1: Vec<usize> = separation
            .rows
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::Second && f.rank_class == RankClass::Rank1Witness)
            .map(|(i, _)| i)
            .collect();
        let witness_cols_side0: Vec<usize> = separation
            .columns
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::First && f.rank_class == RankClass::Rank1Witness)
            .map(|(i, _)| i)
            .collect();

        let mut rows0: Vec<usize> = separation
            .rows
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::First)
            .map(|(i, _)| i)
            .collect();
        let rows1: Vec<usize> = separation
            .rows
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::Second)
            .map(|(i, _)| i)
            .collect();
        let cols0: Vec<usize> = separation
            .columns
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::First)
            .map(|(i, _)| i)
            .collect();
        let mut cols1: Vec<usize> = separation
            .columns
            .iter()
            .enumerate()
            .filter(|(_, f)| f.side == Side::Second)
            .map(|(i, _)| i)
            .collect();

        rows0.extend(witness_rows_side1.iter().copied());
        cols1.extend(witness_cols_side0.iter().copied());

        let sel0 = SubmatrixSelector::new(rows0.clone(), cols0.clone());
        let sel1 = SubmatrixSelector::new(rows1.clone(), cols1.clone());
        let child0 = self.make_child(&sel0)?;
        let child1 = self.make_child(&sel1)?;

        let mut row_to_child = vec![None; self.matrix.num_rows()];
        for &r in &rows0 {
            row_to_child[r] = Some(0);
        }
        for &r in &rows1 {
            row_to_child[r] = Some(1);
        }
        let mut column_to_child = vec![None; self.matrix.num_columns()];
        for &c in &cols0 {
            column_to_child[c] = Some(0);
        }
        for &c in &cols1 {
            column_to_child[c] = Some(1);
        }

        self.node_type = NodeType::ThreeSum;
        self.children = vec![Some(child0), Some(child1)];
        self.child_links = vec![
            ChildLink {
                row_to_parent: sel0.rows.iter().copied().map(Element::row).collect(),
                column_to_parent: sel0.columns.iter().copied().map(Element::column).collect(),
                special_rows: witness_rows_side1.clone(),
                special_columns: Vec::new(),
            },
            ChildLink {
                row_to_parent: sel1.rows.iter().copied().map(Element::row).collect(),
                column_to_parent: sel1.columns.iter().copied().map(Element::column).collect(),
                special_rows: Vec::new(),
                special_columns: witness_cols_side0.clone(),
            },
        ];
        self.row_to_child = row_to_child;
        self.column_to_child = column_to_child;
        Ok(())
    }

    /// `update-pivots`: a single child with the post-pivot matrix; row `r`
    /// paired with pivot `(r, c)` becomes column `c` in the child's
    /// parent-map, and vice versa — everything else keeps its own kind.
    pub fn update_pivots(
        &mut self,
        pivots: &[(usize, usize)],
        matrix: Matrix,
        transpose: Option<Matrix>,
    ) -> Result<()> {
        let n = matrix.num_rows();
        let m = matrix.num_columns();
        let mut row_to_parent: Vec<Element> = (0..n).map(Element::row).collect();
        let mut column_to_parent: Vec<Element> = (0..m).map(Element::column).collect();
        for &(r, c) in pivots {
            row_to_parent[r] = Element::column(c);
            column_to_parent[c] = Element::row(r);
        }
        let child = Self::clone_unknown(matrix, self.ternary);
        self.node_type = NodeType::Pivots;
        self.children = vec![Some(child)];
        self.child_links = vec![ChildLink {
            row_to_parent,
            column_to_parent,
            special_rows: Vec::new(),
            special_columns: Vec::new(),
        }];
        self.row_to_child = vec![Some(0); n];
        self.column_to_child = vec![Some(0); m];
        self.transpose = transpose;
        Ok(())
    }

    /// `update-violator`: type=irregular, attaching `minor` as the determinant
    /// witness. Every negative attribute must be accompanied by a certificate
    /// (§7); this is the only place all three attributes are set to `No`.
    pub fn update_violator(&mut self, minor: MinorRecord) {
        self.node_type = NodeType::Irregular;
        self.regularity = TriState::No;
        self.graphicness = TriState::No;
        self.cographicness = TriState::No;
        self.minors.push(minor);
    }

    /// `set-attributes`: post-order propagation of regularity/graphicness/
    /// cographicness from children, per the rules of §7.
    pub fn set_attributes(node: &NodeRef) {
        let children: Vec<NodeRef> = node
            .borrow()
            .children
            .iter()
            .filter_map(|c| c.clone())
            .collect();
        for child in &children {
            Self::set_attributes(child);
        }
        let mut n = node.borrow_mut();
        match n.node_type {
            NodeType::Irregular => {
                n.regularity = TriState::No;
                n.graphicness = TriState::No;
                n.cographicness = TriState::No;
            }
            NodeType::Planar => {
                n.regularity = TriState::Yes;
                n.graphicness = TriState::Yes;
                n.cographicness = TriState::Yes;
            }
            NodeType::Graph => {
                n.regularity = TriState::Yes;
                n.graphicness = TriState::Yes;
            }
            NodeType::Cograph => {
                n.regularity = TriState::Yes;
                n.cographicness = TriState::Yes;
            }
            NodeType::R10 => {
                n.regularity = TriState::Yes;
                n.graphicness = TriState::No;
                n.cographicness = TriState::No;
            }
            NodeType::SeriesParallel => {
                if let Some(child) = children.first() {
                    let c = child.borrow();
                    n.regularity = c.regularity;
                    n.graphicness = c.graphicness;
                    n.cographicness = c.cographicness;
                } else {
                    n.regularity = TriState::Yes;
                    n.graphicness = TriState::Yes;
                    n.cographicness = TriState::Yes;
                }
            }
            NodeType::OneSum
            | NodeType::TwoSum
            | NodeType::ThreeSum
            | NodeType::DeltaSum
            | NodeType::YSum
            | NodeType::Pivots => {
                let mut reg = TriState::Yes;
                let mut gr = TriState::Yes;
                let mut co = TriState::Yes;
                for child in &children {
                    let c = child.borrow();
                    reg = reg.min(c.regularity);
                    gr = gr.min(c.graphicness);
                    co = co.min(c.cographicness);
                }
                n.regularity = reg;
                n.graphicness = gr;
                n.cographicness = co;
            }
            NodeType::Unknown => {}
        }
    }

    /// DAG-aware deep copy: descendants already cloned (by `Rc` pointer
    /// identity) are shared in the clone too, the way `clone-subtree` dedups
    /// via a hashtable in the spec.
    pub fn clone_subtree(node: &NodeRef, seen: &mut HashMap<usize, NodeRef>) -> NodeRef {
        let key = Rc::as_ptr(node) as usize;
        if let Some(existing) = seen.get(&key) {
            return existing.clone();
        }
        let borrowed = node.borrow();
        let cloned_children: Vec<Option<NodeRef>> = borrowed
            .children
            .iter()
            .map(|c| c.as_ref().map(|c| Self::clone_subtree(c, seen)))
            .collect();
        let clone = Rc::new(RefCell::new(Node {
            ternary: borrowed.ternary,
            matrix: borrowed.matrix.clone(),
            transpose: borrowed.transpose.clone(),
            node_type: borrowed.node_type,
            regularity: borrowed.regularity,
            graphicness: borrowed.graphicness,
            cographicness: borrowed.cographicness,
            children: cloned_children,
            child_links: borrowed.child_links.clone(),
            row_to_child: borrowed.row_to_child.clone(),
            column_to_child: borrowed.column_to_child.clone(),
            minors: borrowed.minors.clone(),
            progress: borrowed.progress,
            graphic_cache: borrowed.graphic_cache.clone(),
            cographic_cache: borrowed.cographic_cache.clone(),
            series_parallel_reduction: borrowed.series_parallel_reduction.clone(),
            nested: borrowed.nested.clone(),
        }));
        drop(borrowed);
        seen.insert(key, clone.clone());
        clone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::Matrix;

    #[test]
    fn one_sum_splits_into_expected_children() {
        let m = Matrix::from_triples(2, 2, vec![(0, 0, 1), (1, 1, 1)]).unwrap();
        let root = Node::new_root(m, false);
        let components = vec![
            SubmatrixSelector::new(vec![0], vec![0]),
            SubmatrixSelector::new(vec![1], vec![1]),
        ];
        root.borrow_mut().update_onesum(components).unwrap();
        assert_eq!(root.borrow().children.len(), 2);
        assert_eq!(root.borrow().node_type, NodeType::OneSum);
    }

    #[test]
    fn set_attributes_propagates_minimum_over_children() {
        let m = Matrix::from_triples(2, 2, vec![(0, 0, 1), (1, 1, 1)]).unwrap();
        let root = Node::new_root(m, false);
        root.borrow_mut()
            .update_onesum(vec![
                SubmatrixSelector::new(vec![0], vec![0]),
                SubmatrixSelector::new(vec![1], vec![1]),
            ])
            .unwrap();
        {
            let children = root.borrow().children.clone();
            children[0].as_ref().unwrap().borrow_mut().node_type = NodeType::Graph;
            children[1].as_ref().unwrap().borrow_mut().node_type = NodeType::R10;
        }
        Node::set_attributes(&root);
        let root = root.borrow();
        assert_eq!(root.graphicness, TriState::No);
        assert_eq!(root.regularity, TriState::Yes);
    }

    #[test]
    fn clone_subtree_shares_identical_descendant() {
        let m = Matrix::from_triples(1, 1, vec![(0, 0, 1)]).unwrap();
        let shared = Node::clone_unknown(m.clone(), false);
        let root = Node::new_root(m, false);
        root.borrow_mut().children = vec![Some(shared.clone()), Some(shared.clone())];
        let mut seen = HashMap::new();
        let cloned = Node::clone_subtree(&root, &mut seen);
        let c0 = cloned.borrow().children[0].clone().unwrap();
        let c1 = cloned.borrow().children[1].clone().unwrap();
        assert!(Rc::ptr_eq(&c0, &c1));
        assert!(!Rc::ptr_eq(&c0, &shared));
    }
}
