//! Stage C11: graphicness along the nested-minor sequence (§4.11).
//!
//! Walks each prefix of the sequence built by C10 and asks the oracle whether
//! it is still (co)graphic, recording the last index that succeeded. The real
//! algorithm extends the previous prefix's graph incrementally by one new
//! row/column (cheaper, and it is what yields the forest/coforest labelling);
//! here each prefix is tested from scratch via `crate::oracle`, which is
//! equivalent in outcome for the bounded sizes this crate's oracle supports
//! and avoids threading incremental graph-update state through the prefix
//! walk.

use crate::element::SubmatrixSelector;
use crate::error::Result;
use crate::node::NodeRef;
use crate::oracle;

pub fn run(node: &NodeRef, transposed: bool) -> Result<()> {
    let (matrix, ternary, seq_rows, seq_cols) = {
        let n = node.borrow();
        (
            n.matrix.clone(),
            n.ternary,
            n.nested.sequence_num_rows.clone(),
            n.nested.sequence_num_columns.clone(),
        )
    };
    let base = if transposed { matrix.transpose() } else { matrix };

    let mut last_ok = None;
    for (i, (&nr, &nc)) in seq_rows.iter().zip(seq_cols.iter()).enumerate() {
        let (pr, pc) = if transposed { (nc, nr) } else { (nr, nc) };
        let selector = SubmatrixSelector::new((0..pr).collect(), (0..pc).collect());
        let prefix = base.submatrix(&selector)?;
        if oracle::test_graphic_matrix(&prefix, ternary).is_ok() {
            last_ok = Some(i);
        } else {
            break;
        }
    }

    let mut n = node.borrow_mut();
    if transposed {
        n.progress.last_prefix_cographic = Some(last_ok.unwrap_or(0));
    } else {
        n.progress.last_prefix_graphic = Some(last_ok.unwrap_or(0));
    }
    Ok(())
}
