//! Sparse matrix text format (§6): `numRows numColumns numNonzeros` header,
//! then that many `row column value` lines, 1-based indices.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Parses the sparse text format. Duplicate `(row, column)` pairs and any
/// trailing non-whitespace after the last entry are rejected, per §6.
pub fn parse(input: &str) -> Result<Matrix> {
    let mut tokens = input.split_whitespace();

    let num_rows = next_usize(&mut tokens, "numRows")?;
    let num_columns = next_usize(&mut tokens, "numColumns")?;
    let num_nonzeros = next_usize(&mut tokens, "numNonzeros")?;

    let mut triples = Vec::with_capacity(num_nonzeros);
    for i in 0..num_nonzeros {
        let row = next_usize(&mut tokens, "row")?
            .checked_sub(1)
            .ok_or_else(|| Error::Input(format!("entry {i}: row indices are 1-based")))?;
        let column = next_usize(&mut tokens, "column")?
            .checked_sub(1)
            .ok_or_else(|| Error::Input(format!("entry {i}: column indices are 1-based")))?;
        let value = next_i8(&mut tokens, "value")?;
        triples.push((row, column, value));
    }

    if tokens.next().is_some() {
        return Err(Error::Input(
            "trailing garbage after the last matrix entry".into(),
        ));
    }

    Matrix::from_triples(num_rows, num_columns, triples)
}

/// Writes `matrix` back out in the sparse text format.
pub fn write(matrix: &Matrix) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}",
        matrix.num_rows(),
        matrix.num_columns(),
        matrix.num_nonzeros()
    );
    for (r, c, v) in matrix.entries() {
        let _ = writeln!(out, "{} {} {}", r + 1, c + 1, v);
    }
    out
}

fn next_usize<'a>(tokens: &mut impl Iterator<Item = &'a str>, field: &str) -> Result<usize> {
    tokens
        .next()
        .ok_or_else(|| Error::Input(format!("missing {field}")))?
        .parse()
        .map_err(|_| Error::Input(format!("{field} is not a non-negative integer")))
}

fn next_i8<'a>(tokens: &mut impl Iterator<Item = &'a str>, field: &str) -> Result<i8> {
    tokens
        .next()
        .ok_or_else(|| Error::Input(format!("missing {field}")))?
        .parse()
        .map_err(|_| Error::Input(format!("{field} is not an integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_small_matrix() {
        let text = "2 2 2\n1 1 1\n2 2 -1\n";
        let m = parse(text).unwrap();
        assert_eq!(m.num_rows(), 2);
        assert_eq!(m.num_nonzeros(), 2);
        assert_eq!(write(&m), text);
    }

    #[test]
    fn rejects_duplicate_entries() {
        let text = "1 1 2\n1 1 1\n1 1 -1\n";
        assert!(parse(text).is_err());
    }

    #[test]
    fn rejects_trailing_garbage() {
        let text = "1 1 1\n1 1 1\nbogus\n";
        assert!(parse(text).is_err());
    }

    #[test]
    fn rejects_zero_row_index() {
        let text = "1 1 1\n0 1 1\n";
        assert!(parse(text).is_err());
    }
}
