//! Minor records (C1): a sequence of pivots plus a remaining-submatrix selector,
//! tagged with what kind of certificate the minor represents.

use crate::element::{MinorTag, SubmatrixSelector};

/// A sequence of pivot `(row, column)` pairs and a remaining-submatrix selector,
/// plus a tag.
///
/// Pivot coordinates refer to the matrix *at the time of the pivot*; the
/// remaining rows/columns in `selector` refer to the post-pivot matrix, exactly
/// as specified in §3.
#[derive(Debug, Clone)]
pub struct MinorRecord {
    pub pivots: Vec<(usize, usize)>,
    pub selector: SubmatrixSelector,
    pub tag: MinorTag,
}

impl MinorRecord {
    pub fn new(pivots: Vec<(usize, usize)>, selector: SubmatrixSelector, tag: MinorTag) -> Self {
        Self {
            pivots,
            selector,
            tag,
        }
    }

    /// A minor with no pivots, directly naming a submatrix of the node's own
    /// matrix — the common case for a determinant witness found without having
    /// pivoted at all.
    pub fn direct(selector: SubmatrixSelector, tag: MinorTag) -> Self {
        Self {
            pivots: Vec::new(),
            selector,
            tag,
        }
    }
}

/// Amortised-doubling accumulator of certifying minors attached to a node
/// (§4.4 `add-minor`).
#[derive(Debug, Clone, Default)]
pub struct MinorList {
    minors: Vec<MinorRecord>,
}

impl MinorList {
    pub fn push(&mut self, minor: MinorRecord) {
        // `Vec::push` already grows geometrically; we keep this as a named
        // method so call sites read as "append to the certificate accumulator"
        // rather than reaching into the field directly.
        self.minors.push(minor);
    }

    pub fn iter(&self) -> impl Iterator<Item = &MinorRecord> {
        self.minors.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.minors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.minors.len()
    }
}
