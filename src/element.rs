//! Signed-index elements (C1): a row or a column, travelling across parent/child
//! boundaries of a decomposition tree.

use crate::error::{Error, Result};

/// A signed handle identifying either a row (`+r`, `r >= 1`) or a column (`-c`,
/// `c >= 1`). `0` is not a valid element ("none" in the spec); we forbid
/// constructing it.
///
/// Internally stored as a 1-based signed `isize` exactly as the spec describes,
/// rather than a 0-based `enum Row(usize) | Column(usize)`, so that translation
/// tables (row/column -> parent element) can use a single signed array the way
/// `examples/original_source/src/cmr/dec.c` does with `CMR_ELEMENT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Element(isize);

impl Element {
    /// Constructs the element for row `r` (0-based).
    pub fn row(r: usize) -> Self {
        Element(r as isize + 1)
    }

    /// Constructs the element for column `c` (0-based).
    pub fn column(c: usize) -> Self {
        Element(-(c as isize + 1))
    }

    pub fn is_row(self) -> bool {
        self.0 > 0
    }

    pub fn is_column(self) -> bool {
        self.0 < 0
    }

    /// Extracts the 0-based row/column index, regardless of sign.
    pub fn index(self) -> usize {
        (self.0.unsigned_abs()) - 1
    }

    /// Returns the row index if this element is a row.
    pub fn as_row(self) -> Option<usize> {
        self.is_row().then(|| self.index())
    }

    /// Returns the column index if this element is a column.
    pub fn as_column(self) -> Option<usize> {
        self.is_column().then(|| self.index())
    }

    /// The opposite-kind element at the same index, used when a pivot swaps the
    /// role of a row and a column (§4.4 `update-pivots`).
    pub fn transposed(self) -> Self {
        Element(-self.0)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_row() {
            write!(f, "r{}", self.index())
        } else {
            write!(f, "c{}", self.index())
        }
    }
}

/// Two index sequences (rows, columns) into a reference matrix.
///
/// Strictly increasing is preferred but not required until [`SubmatrixSelector::sort`]
/// is called, matching the spec's "strictly increasing preferred but not required
/// until a canonicalisation call".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmatrixSelector {
    pub rows: Vec<usize>,
    pub columns: Vec<usize>,
}

impl SubmatrixSelector {
    pub fn new(rows: Vec<usize>, columns: Vec<usize>) -> Self {
        Self { rows, columns }
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Swaps the row and column arrays, i.e. the selector for the transposed matrix.
    pub fn transpose(&self) -> Self {
        Self {
            rows: self.columns.clone(),
            columns: self.rows.clone(),
        }
    }

    /// Sorts both index sequences in place (canonicalisation).
    pub fn sort(&mut self) {
        self.rows.sort_unstable();
        self.columns.sort_unstable();
    }

    pub fn is_sorted(&self) -> bool {
        self.rows.windows(2).all(|w| w[0] < w[1])
            && self.columns.windows(2).all(|w| w[0] < w[1])
    }

    /// Maps an inner submatrix through `self` as a reference selector: inner index
    /// `i` must itself be a valid position into `self.rows`/`self.columns` (a "zoom").
    ///
    /// Fails with `NoSuchRow`/`NoSuchColumn` (modelled here as `Error::Input`) if an
    /// inner index is not listed in the reference.
    pub fn zoom(&self, inner: &SubmatrixSelector) -> Result<SubmatrixSelector> {
        let rows = inner
            .rows
            .iter()
            .map(|&r| {
                self.rows
                    .get(r)
                    .copied()
                    .ok_or_else(|| Error::Input(format!("no such row {r} in reference selector")))
            })
            .collect::<Result<Vec<_>>>()?;
        let columns = inner
            .columns
            .iter()
            .map(|&c| {
                self.columns.get(c).copied().ok_or_else(|| {
                    Error::Input(format!("no such column {c} in reference selector"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SubmatrixSelector { rows, columns })
    }
}

/// Tag attached to a [`MinorRecord`](crate::minor::MinorRecord) identifying the
/// kind of certificate it represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinorTag {
    /// A 2x2 (or larger) submatrix witnessing a determinant outside {-1,0,1}.
    DeterminantWitness,
    F7,
    F7Star,
    K5,
    K5Star,
    K33,
    K33Star,
}
