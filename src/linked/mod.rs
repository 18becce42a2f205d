//! Doubly-linked row/column nonzero lists over GF(2), GF(3), or the integers
//! (C2): the mutable working representation used for pivoting and rank-revealing
//! transformations.
//!
//! Per the spec's own design note on pointer invalidation (§9), entries live in
//! an index-linked arena (`Vec<Option<Entry>>`) rather than behind raw pointers,
//! so geometric growth is a plain reallocation and no "shift delta" needs to be
//! threaded back to in-flight iterators — the open design question the spec
//! flags for a "systems-language rewrite" is resolved that way here.

mod hermite;
mod pivot;

pub use hermite::{hermite_reduce, HermiteResult};
pub use pivot::{Characteristic, PivotOutcome};

use crate::error::{Error, Result};
use crate::matrix::Matrix;
use hashbrown::HashMap;

#[derive(Debug, Clone, Copy)]
struct Entry {
    row: usize,
    col: usize,
    value: i8,
    row_prev: Option<usize>,
    row_next: Option<usize>,
    col_prev: Option<usize>,
    col_next: Option<usize>,
}

#[derive(Debug, Clone, Copy, Default)]
struct LineHeader {
    first: Option<usize>,
    last: Option<usize>,
    degree: usize,
}

/// The linked-list matrix itself: one header per row and per column, entries in
/// an arena with a free list for O(1) recycling.
#[derive(Debug, Clone)]
pub struct LinkedMatrix {
    num_rows: usize,
    num_columns: usize,
    rows: Vec<LineHeader>,
    cols: Vec<LineHeader>,
    entries: Vec<Option<Entry>>,
    free: Vec<usize>,
    // Supplements the row/column linked traversal with O(1) point lookups,
    // the way the series-parallel stage (C9) already needs a hashtable
    // keyed on row/column content; pivoting needs the analogous per-cell
    // lookup to avoid an O(degree) walk on every inner-loop update.
    index: HashMap<(usize, usize), usize>,
}

impl LinkedMatrix {
    pub fn new(num_rows: usize, num_columns: usize) -> Self {
        Self {
            num_rows,
            num_columns,
            rows: vec![LineHeader::default(); num_rows],
            cols: vec![LineHeader::default(); num_columns],
            entries: Vec::new(),
            free: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_matrix(matrix: &Matrix) -> Self {
        let mut out = Self::new(matrix.num_rows(), matrix.num_columns());
        for (r, c, v) in matrix.entries() {
            out.insert(r, c, v);
        }
        out
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn row_degree(&self, r: usize) -> usize {
        self.rows[r].degree
    }

    pub fn col_degree(&self, c: usize) -> usize {
        self.cols[c].degree
    }

    pub fn get(&self, r: usize, c: usize) -> Option<i8> {
        self.index.get(&(r, c)).map(|&slot| self.entries[slot].unwrap().value)
    }

    /// Inserts a nonzero, appending to the end of its row's and column's list
    /// (amortised O(1)). Recycles a free slot if one exists; otherwise the
    /// arena grows geometrically by simple `Vec` push (no pointer fixup needed).
    pub fn insert(&mut self, r: usize, c: usize, value: i8) -> usize {
        debug_assert_ne!(value, 0);
        let slot = if let Some(slot) = self.free.pop() {
            slot
        } else {
            self.entries.push(None);
            self.entries.len() - 1
        };
        let row_prev = self.rows[r].last;
        let col_prev = self.cols[c].last;
        self.entries[slot] = Some(Entry {
            row: r,
            col: c,
            value,
            row_prev,
            row_next: None,
            col_prev,
            col_next: None,
        });
        if let Some(prev) = row_prev {
            self.entries[prev].as_mut().unwrap().row_next = Some(slot);
        } else {
            self.rows[r].first = Some(slot);
        }
        self.rows[r].last = Some(slot);
        self.rows[r].degree += 1;
        if let Some(prev) = col_prev {
            self.entries[prev].as_mut().unwrap().col_next = Some(slot);
        } else {
            self.cols[c].first = Some(slot);
        }
        self.cols[c].last = Some(slot);
        self.cols[c].degree += 1;
        self.index.insert((r, c), slot);
        slot
    }

    /// Unlinks and recycles the entry at `(r, c)`, if present.
    pub fn remove(&mut self, r: usize, c: usize) {
        let Some(slot) = self.index.remove(&(r, c)) else {
            return;
        };
        let entry = self.entries[slot].take().unwrap();
        match entry.row_prev {
            Some(prev) => self.entries[prev].as_mut().unwrap().row_next = entry.row_next,
            None => self.rows[r].first = entry.row_next,
        }
        match entry.row_next {
            Some(next) => self.entries[next].as_mut().unwrap().row_prev = entry.row_prev,
            None => self.rows[r].last = entry.row_prev,
        }
        match entry.col_prev {
            Some(prev) => self.entries[prev].as_mut().unwrap().col_next = entry.col_next,
            None => self.cols[c].first = entry.col_next,
        }
        match entry.col_next {
            Some(next) => self.entries[next].as_mut().unwrap().col_prev = entry.col_prev,
            None => self.cols[c].last = entry.col_prev,
        }
        self.rows[r].degree -= 1;
        self.cols[c].degree -= 1;
        self.free.push(slot);
    }

    /// Sets (inserts, updates, or deletes) the entry at `(r, c)` to `value`.
    pub fn set(&mut self, r: usize, c: usize, value: i8) {
        if value == 0 {
            self.remove(r, c);
        } else if let Some(&slot) = self.index.get(&(r, c)) {
            self.entries[slot].as_mut().unwrap().value = value;
        } else {
            self.insert(r, c, value);
        }
    }

    /// Walks a row's nonzeros in increasing column order via its linked list.
    pub fn row(&self, r: usize) -> Vec<(usize, i8)> {
        let mut out = Vec::with_capacity(self.rows[r].degree);
        let mut cur = self.rows[r].first;
        while let Some(slot) = cur {
            let e = self.entries[slot].unwrap();
            out.push((e.col, e.value));
            cur = e.row_next;
        }
        out
    }

    /// Walks a column's nonzeros via its linked list.
    pub fn column(&self, c: usize) -> Vec<(usize, i8)> {
        let mut out = Vec::with_capacity(self.cols[c].degree);
        let mut cur = self.cols[c].first;
        while let Some(slot) = cur {
            let e = self.entries[slot].unwrap();
            out.push((e.row, e.value));
            cur = e.col_next;
        }
        out
    }

    /// Exports back to the row-sliced [`Matrix`] by walking row sentinels.
    pub fn to_matrix(&self) -> Result<Matrix> {
        let mut triples = Vec::new();
        for r in 0..self.num_rows {
            for (c, v) in self.row(r) {
                triples.push((r, c, v));
            }
        }
        Matrix::from_triples(self.num_rows, self.num_columns, triples)
            .map_err(|e| Error::InternalInvariant(format!("linked matrix export invalid: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrips_through_linked_representation() {
        let m = Matrix::from_triples(3, 3, vec![(0, 0, 1), (0, 2, -1), (1, 1, 1), (2, 0, 1)])
            .unwrap();
        let linked = LinkedMatrix::from_matrix(&m);
        assert_eq!(linked.to_matrix().unwrap(), m);
    }

    #[test]
    fn insert_then_remove_is_identity() {
        let mut m = LinkedMatrix::new(2, 2);
        m.insert(0, 0, 1);
        m.insert(0, 1, -1);
        assert_eq!(m.row_degree(0), 2);
        m.remove(0, 1);
        assert_eq!(m.row_degree(0), 1);
        assert_eq!(m.row(0), vec![(0, 1)]);
    }

    #[test]
    fn recycles_free_slots() {
        let mut m = LinkedMatrix::new(1, 3);
        let a = m.insert(0, 0, 1);
        m.remove(0, 0);
        let b = m.insert(0, 1, 1);
        assert_eq!(a, b);
    }

    use proptest::prelude::*;

    fn arbitrary_matrix(rows: usize, cols: usize) -> impl Strategy<Value = Matrix> {
        prop::collection::vec(prop_oneof![Just(-1i8), Just(0i8), Just(1i8)], rows * cols).prop_map(
            move |cells| {
                let triples = cells
                    .into_iter()
                    .enumerate()
                    .filter(|&(_, v)| v != 0)
                    .map(|(idx, v)| (idx / cols, idx % cols, v))
                    .collect();
                Matrix::from_triples(rows, cols, triples).unwrap()
            },
        )
    }

    proptest! {
        #[test]
        fn export_after_import_is_identity(m in arbitrary_matrix(4, 4)) {
            let linked = LinkedMatrix::from_matrix(&m);
            prop_assert_eq!(linked.to_matrix().unwrap(), m);
        }
    }
}
