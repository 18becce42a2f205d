//! Row-sliced sparse 0/±1 matrix (C1/C3), the "reference" representation
//! submatrix selectors and minors are expressed against. The mutable working
//! representation used during pivoting lives in [`crate::linked`].

use crate::element::SubmatrixSelector;
use crate::error::{Error, Result};

/// A row-sliced sparse container with dimensions, nonzero count, per-row slice
/// boundaries, per-entry column index, and per-entry signed value.
///
/// Invariants (checked by [`Matrix::check_invariants`], matching §3's "Invariants"
/// and §7's "non-monotone slice, unsorted row" failure modes):
/// * within each row, column indices are strictly increasing;
/// * no explicit zeros;
/// * every value is `+1` or `-1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    num_rows: usize,
    num_columns: usize,
    row_start: Vec<usize>,
    col_index: Vec<usize>,
    values: Vec<i8>,
}

impl Matrix {
    /// Builds a matrix from a row-major list of `(row, column, value)` triples.
    /// Rows need not be given in order; columns within a row are sorted here.
    pub fn from_triples(
        num_rows: usize,
        num_columns: usize,
        mut triples: Vec<(usize, usize, i8)>,
    ) -> Result<Self> {
        for &(r, c, v) in &triples {
            if r >= num_rows || c >= num_columns {
                return Err(Error::Input(format!(
                    "entry ({r}, {c}) out of bounds for {num_rows}x{num_columns} matrix"
                )));
            }
            if v != 1 && v != -1 {
                return Err(Error::Input(format!("entry value {v} not in {{-1, +1}}")));
            }
        }
        triples.sort_unstable_by_key(|&(r, c, _)| (r, c));
        let mut row_start = vec![0usize; num_rows + 1];
        let mut col_index = Vec::with_capacity(triples.len());
        let mut values = Vec::with_capacity(triples.len());
        let mut row = 0usize;
        let mut prev_col: Option<usize> = None;
        for (r, c, v) in triples {
            while row < r {
                row_start[row + 1] = col_index.len();
                row += 1;
                prev_col = None;
            }
            if prev_col == Some(c) {
                return Err(Error::Input(format!(
                    "duplicate entry at row {r}, column {c}"
                )));
            }
            prev_col = Some(c);
            col_index.push(c);
            values.push(v);
        }
        while row < num_rows {
            row_start[row + 1] = col_index.len();
            row += 1;
        }
        Ok(Self {
            num_rows,
            num_columns,
            row_start,
            col_index,
            values,
        })
    }

    pub fn zero(num_rows: usize, num_columns: usize) -> Self {
        Self {
            num_rows,
            num_columns,
            row_start: vec![0; num_rows + 1],
            col_index: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_columns(&self) -> usize {
        self.num_columns
    }

    pub fn num_nonzeros(&self) -> usize {
        self.col_index.len()
    }

    /// The `(column, value)` pairs of a row, in strictly increasing column order.
    pub fn row(&self, r: usize) -> impl Iterator<Item = (usize, i8)> + '_ {
        let start = self.row_start[r];
        let end = self.row_start[r + 1];
        self.col_index[start..end]
            .iter()
            .copied()
            .zip(self.values[start..end].iter().copied())
    }

    pub fn row_degree(&self, r: usize) -> usize {
        self.row_start[r + 1] - self.row_start[r]
    }

    pub fn column_degree(&self, c: usize) -> usize {
        (0..self.num_rows)
            .filter(|&r| self.entry(r, c).is_some())
            .count()
    }

    pub fn entry(&self, r: usize, c: usize) -> Option<i8> {
        let start = self.row_start[r];
        let end = self.row_start[r + 1];
        self.col_index[start..end]
            .binary_search(&c)
            .ok()
            .map(|idx| self.values[start + idx])
    }

    pub fn entries(&self) -> impl Iterator<Item = (usize, usize, i8)> + '_ {
        (0..self.num_rows).flat_map(move |r| self.row(r).map(move |(c, v)| (r, c, v)))
    }

    /// Every invariant named in §3/§7: strictly increasing column indices per row,
    /// no explicit zeros, entries in {-1, +1}, and consistent slice boundaries.
    pub fn check_invariants(&self) -> Result<()> {
        if self.row_start.len() != self.num_rows + 1 {
            return Err(Error::InternalInvariant("row_start length mismatch".into()));
        }
        for r in 0..self.num_rows {
            let start = self.row_start[r];
            let end = self.row_start[r + 1];
            if start > end {
                return Err(Error::InternalInvariant(format!(
                    "non-monotone slice at row {r}"
                )));
            }
            let cols = &self.col_index[start..end];
            if !cols.windows(2).all(|w| w[0] < w[1]) {
                return Err(Error::InternalInvariant(format!("unsorted row {r}")));
            }
            for &v in &self.values[start..end] {
                if v != 1 && v != -1 {
                    return Err(Error::InternalInvariant(format!(
                        "entry outside {{-1,+1}} in row {r}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        let mut triples: Vec<(usize, usize, i8)> =
            self.entries().map(|(r, c, v)| (c, r, v)).collect();
        triples.sort_unstable_by_key(|&(r, c, _)| (r, c));
        Matrix::from_triples(self.num_columns, self.num_rows, triples)
            .expect("transposing a valid matrix cannot fail")
    }

    /// Extracts the submatrix named by `selector`. Row/column order in the output
    /// follows the order given in `selector`, not necessarily sorted.
    pub fn submatrix(&self, selector: &SubmatrixSelector) -> Result<Self> {
        for &r in &selector.rows {
            if r >= self.num_rows {
                return Err(Error::Input(format!("no such row {r}")));
            }
        }
        for &c in &selector.columns {
            if c >= self.num_columns {
                return Err(Error::Input(format!("no such column {c}")));
            }
        }
        let col_pos: hashbrown::HashMap<usize, usize> = selector
            .columns
            .iter()
            .enumerate()
            .map(|(i, &c)| (c, i))
            .collect();
        let mut triples = Vec::new();
        for (new_r, &old_r) in selector.rows.iter().enumerate() {
            for (c, v) in self.row(old_r) {
                if let Some(&new_c) = col_pos.get(&c) {
                    triples.push((new_r, new_c, v));
                }
            }
        }
        Matrix::from_triples(selector.rows.len(), selector.columns.len(), triples)
    }

    /// Whether two matrices are entry-wise equal (dimensions and all nonzeros).
    pub fn equals(&self, other: &Matrix) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(n: usize) -> Matrix {
        Matrix::from_triples(n, n, (0..n).map(|i| (i, i, 1)).collect()).unwrap()
    }

    #[test]
    fn identity_invariants_hold() {
        let m = identity(3);
        m.check_invariants().unwrap();
        assert_eq!(m.num_nonzeros(), 3);
    }

    #[test]
    fn transpose_is_involution() {
        let m = Matrix::from_triples(2, 3, vec![(0, 0, 1), (0, 2, -1), (1, 1, 1)]).unwrap();
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn rejects_duplicate_entries() {
        let res = Matrix::from_triples(2, 2, vec![(0, 0, 1), (0, 0, -1)]);
        assert!(res.is_err());
    }

    #[test]
    fn rejects_out_of_range_value() {
        let triples = vec![(0usize, 0usize, 2i8)];
        assert!(Matrix::from_triples(1, 1, triples).is_err());
    }

    #[test]
    fn submatrix_slices_correctly() {
        let m = identity(4);
        let sel = SubmatrixSelector::new(vec![1, 3], vec![1, 3]);
        let sub = m.submatrix(&sel).unwrap();
        assert_eq!(sub.num_nonzeros(), 2);
        assert_eq!(sub.entry(0, 0), Some(1));
        assert_eq!(sub.entry(1, 1), Some(1));
    }

    #[test]
    fn submatrix_transpose_commutes() {
        let m = Matrix::from_triples(3, 2, vec![(0, 0, 1), (1, 1, -1), (2, 0, 1)]).unwrap();
        let sel = SubmatrixSelector::new(vec![2, 0], vec![1, 0]);
        let lhs = m.submatrix(&sel).unwrap().transpose();
        let rhs = m.transpose().submatrix(&sel.transpose()).unwrap();
        assert_eq!(lhs, rhs);
    }

    use proptest::prelude::*;

    /// Arbitrary `rows x cols` matrix: each cell independently `-1`, `0`, or `+1`.
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
        fn transpose_transpose_is_identity(m in arbitrary_matrix(4, 5)) {
            prop_assert_eq!(m.transpose().transpose(), m);
        }

        #[test]
        fn submatrix_then_transpose_matches_transpose_then_submatrix(
            m in arbitrary_matrix(4, 5),
            row_perm in prop::sample::subsequence(vec![0, 1, 2, 3], 0..=4),
            col_perm in prop::sample::subsequence(vec![0, 1, 2, 3, 4], 0..=5),
        ) {
            let sel = SubmatrixSelector::new(row_perm, col_perm);
            let lhs = m.submatrix(&sel).unwrap().transpose();
            let rhs = m.transpose().submatrix(&sel.transpose()).unwrap();
            prop_assert_eq!(lhs, rhs);
        }
    }
}
