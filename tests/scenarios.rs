//! End-to-end coverage of the worked decomposition scenarios.

use seymour_decomp::{decompose, stages, DecompositionParameters, Matrix, NodeType, TriState};

#[test]
fn empty_matrix_is_a_single_planar_leaf() {
    let m = Matrix::zero(0, 0);
    let (root, _stats) = decompose(m, false, DecompositionParameters::default()).unwrap();
    let n = root.borrow();
    assert_eq!(n.node_type, NodeType::Planar);
    assert_eq!(n.regularity, TriState::Yes);
    assert_eq!(n.graphicness, TriState::Yes);
    assert_eq!(n.cographicness, TriState::Yes);
}

#[test]
fn identity_matrix_one_sums_into_three_graphic_leaves() {
    let m = Matrix::from_triples(3, 3, (0..3).map(|i| (i, i, 1)).collect()).unwrap();
    let (root, _stats) = decompose(m, false, DecompositionParameters::default()).unwrap();
    let n = root.borrow();
    assert_eq!(n.node_type, NodeType::OneSum);
    assert_eq!(n.regularity, TriState::Yes);
    assert_eq!(n.children.len(), 3);
    for child in &n.children {
        let child = child.as_ref().unwrap().borrow();
        assert_eq!(child.node_type, NodeType::Graph);
        assert_eq!(child.regularity, TriState::Yes);
    }
}

/// A 3x4 matrix containing the classic {110, 101, 011} violating pattern: its
/// rows and columns are too dense (3 nonzeros each) for the direct-incidence
/// oracle to read off a graph in either orientation, and too small for any
/// 2- or 3-separation to exist, so the only way through is the small-violator
/// fallback, which finds the det=-2 witness on columns {0,1,2}.
#[test]
fn dense_small_matrix_is_irregular_with_a_determinant_witness() {
    let m = Matrix::from_triples(
        3,
        4,
        vec![
            (0, 0, 1), (0, 1, 1), (0, 3, 1),
            (1, 0, 1), (1, 2, 1), (1, 3, 1),
            (2, 1, 1), (2, 2, 1), (2, 3, 1),
        ],
    )
    .unwrap();
    let (root, _stats) = decompose(m, false, DecompositionParameters::default()).unwrap();
    let n = root.borrow();
    assert_eq!(n.node_type, NodeType::Irregular);
    assert_eq!(n.regularity, TriState::No);
    assert_eq!(n.graphicness, TriState::No);
    assert_eq!(n.cographicness, TriState::No);
    assert!(!n.minors.is_empty());
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

#[test]
fn k5_incidence_matrix_is_a_single_graphic_leaf() {
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
    let (root, _stats) = decompose(m, false, DecompositionParameters::default()).unwrap();
    let n = root.borrow();
    assert_eq!(n.node_type, NodeType::Graph);
    assert_eq!(n.regularity, TriState::Yes);
    assert_eq!(n.graphicness, TriState::Yes);
}

/// Spec scenario 6: a 2-sum of two K4 incidence matrices glued along one
/// shared node column (12 rows, 7 columns, 19 elements total — within the
/// enumeration bound). Exercises the C12 stage and the `direct_graphic`
/// leaf resolution directly, node by node, rather than through the full
/// scheduler: the whole matrix is always directly graphic as a single
/// incidence reading (every row has exactly 2 nonzeros, regardless of total
/// size), so routed through `decompose`, the direct-graphicness shortcut
/// would resolve it as one `Graph` leaf at the root before ever reaching the
/// separation search — never exercising C12 at all.
#[test]
fn two_k4_incidence_matrices_two_sum_into_graphic_leaves() {
    use seymour_decomp::Node;

    let mut triples = Vec::new();
    let mut row = 0usize;
    // K4 #1 on columns 0..4
    for i in 0..4 {
        for j in (i + 1)..4 {
            triples.push((row, i, 1));
            triples.push((row, j, 1));
            row += 1;
        }
    }
    // K4 #2 on columns 3..7, sharing column 3 with the first copy.
    for i in 3..7 {
        for j in (i + 1)..7 {
            triples.push((row, i, 1));
            triples.push((row, j, 1));
            row += 1;
        }
    }
    let m = Matrix::from_triples(row, 7, triples).unwrap();
    let root = Node::new_root(m, false);

    let outcome = stages::three_separation::run(&root).unwrap();
    assert_eq!(root.borrow().node_type, NodeType::TwoSum);
    assert_eq!(outcome.children.len(), 2);

    for child in &outcome.children {
        stages::direct_graphic::run(child, false).unwrap();
        let c = child.borrow();
        assert_eq!(c.node_type, NodeType::Graph);
        assert_eq!(c.regularity, TriState::Yes);
        assert_eq!(c.graphicness, TriState::Yes);
        assert_eq!(c.cographicness, TriState::Yes);
    }

    Node::set_attributes(&root);
    let n = root.borrow();
    assert_eq!(n.node_type, NodeType::TwoSum);
    assert_eq!(n.regularity, TriState::Yes);
    assert_eq!(n.graphicness, TriState::Yes);
    assert_eq!(n.cographicness, TriState::Yes);
}
