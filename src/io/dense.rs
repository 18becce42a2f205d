//! Dense matrix text format (§6): `numRows numColumns` header, then
//! `numRows * numColumns` row-major whitespace-separated integers.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Parses the dense text format. Every value must be `-1`, `0`, or `1` (the
/// matrix itself only ever stores the nonzero `{-1, 1}` entries); anything
/// else is rejected as malformed input.
pub fn parse(input: &str) -> Result<Matrix> {
    let mut tokens = input.split_whitespace();
    let num_rows: usize = tokens
        .next()
        .ok_or_else(|| Error::Input("missing numRows".into()))?
        .parse()
        .map_err(|_| Error::Input("numRows is not a non-negative integer".into()))?;
    let num_columns: usize = tokens
        .next()
        .ok_or_else(|| Error::Input("missing numColumns".into()))?
        .parse()
        .map_err(|_| Error::Input("numColumns is not a non-negative integer".into()))?;

    let mut triples = Vec::new();
    for r in 0..num_rows {
        for c in 0..num_columns {
            let tok = tokens
                .next()
                .ok_or_else(|| Error::Input(format!("missing entry at row {r}, column {c}")))?;
            let value: i8 = tok
                .parse()
                .map_err(|_| Error::Input(format!("entry at row {r}, column {c} is not an integer")))?;
            match value {
                0 => {}
                1 | -1 => triples.push((r, c, value)),
                other => {
                    return Err(Error::Input(format!(
                        "entry at row {r}, column {c} is {other}, expected -1, 0, or 1"
                    )))
                }
            }
        }
    }
    if tokens.next().is_some() {
        return Err(Error::Input(
            "trailing garbage after the last matrix entry".into(),
        ));
    }
    Matrix::from_triples(num_rows, num_columns, triples)
}

/// Writes `matrix` back out in the dense text format.
pub fn write(matrix: &Matrix) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", matrix.num_rows(), matrix.num_columns());
    for r in 0..matrix.num_rows() {
        let mut row = vec![0i8; matrix.num_columns()];
        for (c, v) in matrix.row(r) {
            row[c] = v;
        }
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        let _ = writeln!(out, "{}", line.join(" "));
    }
    out
}
