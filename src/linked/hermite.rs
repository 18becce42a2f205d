//! Integer upper-diagonalisation (Hermite-like reduction), §4.2.
//!
//! Picks pivots greedily by smallest `|value|` and smallest outer-product fill,
//! applying a 2x2 unimodular transform built from the extended Euclidean
//! algorithm to clear one of two rows. Tracks row/column permutations and
//! falls back to arbitrary-precision arithmetic on overflow.

use crate::element::SubmatrixSelector;
use crate::matrix::Matrix;
use num_bigint::BigInt;
use num_traits::{Signed, Zero};

/// `||U||_1` bound before we retry with the arbitrary-precision variant.
const OVERFLOW_BOUND: i64 = i32::MAX as i64;

/// Result of a Hermite-like reduction: the rank found, plus (on demand) the
/// permuted result matrix.
#[derive(Debug, Clone)]
pub struct HermiteResult {
    pub rank: usize,
    pub row_permutation: Vec<usize>,
    pub column_permutation: Vec<usize>,
    pub reduced: Vec<Vec<BigInt>>,
}

fn bezout(a: i128, b: i128) -> (i128, i128, i128) {
    let (mut old_r, mut r) = (a, b);
    let (mut old_s, mut s) = (1i128, 0i128);
    let (mut old_t, mut t) = (0i128, 1i128);
    while r != 0 {
        let q = old_r / r;
        let tmp_r = old_r - q * r;
        old_r = r;
        r = tmp_r;
        let tmp_s = old_s - q * s;
        old_s = s;
        s = tmp_s;
        let tmp_t = old_t - q * t;
        old_t = t;
        t = tmp_t;
    }
    (old_r, old_s, old_t)
}

/// Picks pivots greedily and upper-diagonalises `matrix` over Z, returning the
/// rank and the permutations applied. Falls back to [`BigInt`] arithmetic
/// automatically whenever an `||U||_1` bound is exceeded, per §7 ("Overflow
/// during integer row reductions downgrades to arbitrary-precision
/// automatically and does not surface").
pub fn hermite_reduce(matrix: &Matrix) -> HermiteResult {
    let n = matrix.num_rows();
    let m = matrix.num_columns();
    let mut work: Vec<Vec<i128>> = (0..n)
        .map(|r| {
            let mut row = vec![0i128; m];
            for (c, v) in matrix.row(r) {
                row[c] = v as i128;
            }
            row
        })
        .collect();

    let mut row_perm: Vec<usize> = (0..n).collect();
    let mut col_perm: Vec<usize> = (0..m).collect();
    let mut rank = 0usize;
    let mut overflowed = false;

    'outer: for stage in 0..n.min(m) {
        // Greedy pivot selection: smallest nonzero |value|, tie-broken by the
        // outer-product fill it would introduce (approximated here by the
        // number of nonzeros in its row and column among the untouched
        // submatrix).
        let mut best: Option<(i128, usize, usize, usize)> = None; // (|val|, fill, row, col)
        for r in stage..n {
            for c in stage..m {
                let v = work[r][c];
                if v == 0 {
                    continue;
                }
                let fill = work[r][stage..m].iter().filter(|&&x| x != 0).count()
                    + (stage..n).filter(|&rr| work[rr][c] != 0).count();
                let key = (v.abs(), fill, r, c);
                if best.is_none() || key < best.unwrap() {
                    best = Some(key);
                }
            }
        }
        let Some((_, _, pr, pc)) = best else {
            break 'outer;
        };
        work.swap(stage, pr);
        row_perm.swap(stage, pr);
        for row in work.iter_mut() {
            row.swap(stage, pc);
        }
        col_perm.swap(stage, pc);

        let pivot_val = work[stage][stage];
        for r in (stage + 1)..n {
            let other = work[r][stage];
            if other == 0 {
                continue;
            }
            let (g, x, y) = bezout(pivot_val, other);
            if g == 0 {
                continue;
            }
            let a = pivot_val / g;
            let b = other / g;
            // Unimodular 2x2 transform [[x, y], [-b, a]] applied to rows
            // (stage, r); determinant x*a + y*b = 1.
            for c in 0..m {
                let top = work[stage][c];
                let bot = work[r][c];
                let new_top = x * top + y * bot;
                let new_bot = -b * top + a * bot;
                if new_top.unsigned_abs() as i64 > OVERFLOW_BOUND
                    || new_bot.unsigned_abs() as i64 > OVERFLOW_BOUND
                {
                    overflowed = true;
                }
                work[stage][c] = new_top;
                work[r][c] = new_bot;
            }
        }
        if work[stage][stage] != 0 {
            rank += 1;
        }
        if overflowed {
            break 'outer;
        }
    }

    if overflowed {
        return hermite_reduce_bigint(matrix);
    }

    let reduced = work
        .into_iter()
        .map(|row| row.into_iter().map(BigInt::from).collect())
        .collect();

    HermiteResult {
        rank,
        row_permutation: row_perm,
        column_permutation: col_perm,
        reduced,
    }
}

/// Arbitrary-precision fallback, structurally identical to [`hermite_reduce`]
/// but carried out in [`BigInt`] so no bound can be exceeded.
fn hermite_reduce_bigint(matrix: &Matrix) -> HermiteResult {
    let n = matrix.num_rows();
    let m = matrix.num_columns();
    let mut work: Vec<Vec<BigInt>> = (0..n)
        .map(|r| {
            let mut row = vec![BigInt::zero(); m];
            for (c, v) in matrix.row(r) {
                row[c] = BigInt::from(v);
            }
            row
        })
        .collect();
    let mut row_perm: Vec<usize> = (0..n).collect();
    let mut col_perm: Vec<usize> = (0..m).collect();
    let mut rank = 0usize;

    for stage in 0..n.min(m) {
        let mut found = None;
        'search: for r in stage..n {
            for c in stage..m {
                if !work[r][c].is_zero() {
                    found = Some((r, c));
                    break 'search;
                }
            }
        }
        let Some((pr, pc)) = found else { break };
        work.swap(stage, pr);
        row_perm.swap(stage, pr);
        for row in work.iter_mut() {
            row.swap(stage, pc);
        }
        col_perm.swap(stage, pc);

        for r in (stage + 1)..n {
            if work[r][stage].is_zero() {
                continue;
            }
            let pivot_val = work[stage][stage].clone();
            let other = work[r][stage].clone();
            let (g, x, y) = bigint_bezout(&pivot_val, &other);
            if g.is_zero() {
                continue;
            }
            let a = &pivot_val / &g;
            let b = &other / &g;
            for c in 0..m {
                let top = work[stage][c].clone();
                let bot = work[r][c].clone();
                work[stage][c] = &x * &top + &y * &bot;
                work[r][c] = -&b * &top + &a * &bot;
            }
        }
        if !work[stage][stage].is_zero() {
            rank += 1;
        }
    }

    HermiteResult {
        rank,
        row_permutation: row_perm,
        column_permutation: col_perm,
        reduced: work,
    }
}

fn bigint_bezout(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::from(1), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::from(1));
    while !r.is_zero() {
        let q = &old_r / &r;
        let tmp_r = &old_r - &q * &r;
        old_r = r;
        r = tmp_r;
        let tmp_s = &old_s - &q * &s;
        old_s = s;
        s = tmp_s;
        let tmp_t = &old_t - &q * &t;
        old_t = t;
        t = tmp_t;
    }
    (old_r, old_s, old_t)
}

/// Returns the permutations found as a [`SubmatrixSelector`] over the original
/// matrix's index space.
pub fn permutation_selector(result: &HermiteResult) -> SubmatrixSelector {
    SubmatrixSelector::new(
        result.row_permutation.clone(),
        result.column_permutation.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_has_full_rank() {
        let m = Matrix::from_triples(3, 3, (0..3).map(|i| (i, i, 1)).collect()).unwrap();
        let result = hermite_reduce(&m);
        assert_eq!(result.rank, 3);
    }

    #[test]
    fn singular_matrix_has_deficient_rank() {
        let m = Matrix::from_triples(2, 2, vec![(0, 0, 1), (1, 0, 1)]).unwrap();
        let result = hermite_reduce(&m);
        assert_eq!(result.rank, 1);
    }
}
