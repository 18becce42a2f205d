//! Submatrix selector text format (§6): one header line
//! `totalRows totalColumns selectedRows selectedColumns`, then one line of
//! `selectedRows` 1-based row indices and one line of `selectedColumns`
//! 1-based column indices.

use std::fmt::Write as _;

use crate::element::SubmatrixSelector;
use crate::error::{Error, Result};

/// Parses the submatrix text format, returning `(totalRows, totalColumns,
/// selector)` with the selector's indices converted to 0-based.
pub fn parse(input: &str) -> Result<(usize, usize, SubmatrixSelector)> {
    let mut lines = input.lines();
    let header = lines
        .next()
        .ok_or_else(|| Error::Input("missing submatrix header line".into()))?;
    let mut header_tokens = header.split_whitespace();
    let total_rows = next_usize(&mut header_tokens, "totalRows")?;
    let total_columns = next_usize(&mut header_tokens, "totalColumns")?;
    let num_selected_rows = next_usize(&mut header_tokens, "selectedRows")?;
    let num_selected_columns = next_usize(&mut header_tokens, "selectedColumns")?;
    if header_tokens.next().is_some() {
        return Err(Error::Input("trailing garbage on submatrix header".into()));
    }

    let row_line = lines
        .next()
        .ok_or_else(|| Error::Input("missing selected-rows line".into()))?;
    let rows = parse_indices(row_line, num_selected_rows, total_rows, "row")?;

    let col_line = lines
        .next()
        .ok_or_else(|| Error::Input("missing selected-columns line".into()))?;
    let columns = parse_indices(col_line, num_selected_columns, total_columns, "column")?;

    if lines.any(|l| !l.trim().is_empty()) {
        return Err(Error::Input(
            "trailing garbage after the submatrix selector".into(),
        ));
    }

    Ok((total_rows, total_columns, SubmatrixSelector::new(rows, columns)))
}

/// Writes `(totalRows, totalColumns, selector)` back out in the submatrix
/// text format.
pub fn write(total_rows: usize, total_columns: usize, selector: &SubmatrixSelector) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {} {}",
        total_rows,
        total_columns,
        selector.num_rows(),
        selector.num_columns()
    );
    let rows: Vec<String> = selector.rows.iter().map(|r| (r + 1).to_string()).collect();
    let _ = writeln!(out, "{}", rows.join(" "));
    let cols: Vec<String> = selector.columns.iter().map(|c| (c + 1).to_string()).collect();
    let _ = writeln!(out, "{}", cols.join(" "));
    out
}

fn parse_indices(line: &str, expected: usize, total: usize, kind: &str) -> Result<Vec<usize>> {
    let indices: Vec<usize> = line
        .split_whitespace()
        .map(|tok| {
            tok.parse::<usize>()
                .map_err(|_| Error::Input(format!("malformed {kind} index {tok:?}")))
        })
        .collect::<Result<_>>()?;
    if indices.len() != expected {
        return Err(Error::Input(format!(
            "expected {expected} selected {kind}s, found {}",
            indices.len()
        )));
    }
    indices
        .into_iter()
        .map(|i| {
            if i == 0 || i > total {
                Err(Error::Input(format!(
                    "{kind} index {i} out of range for {total} total {kind}s"
                )))
            } else {
                Ok(i - 1)
            }
        })
        .collect()
}

fn next_usize<'a>(tokens: &mut impl Iterator<Item = &'a str>, field: &str) -> Result<usize> {
    tokens
        .next()
        .ok_or_else(|| Error::Input(format!("missing {field}")))?
        .parse()
        .map_err(|_| Error::Input(format!("{field} is not a non-negative integer")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_a_selector() {
        let text = "5 4 2 3\n1 3\n1 2 4\n";
        let (tr, tc, sel) = parse(text).unwrap();
        assert_eq!((tr, tc), (5, 4));
        assert_eq!(sel.rows, vec![0, 2]);
        assert_eq!(sel.columns, vec![0, 1, 3]);
        assert_eq!(write(tr, tc, &sel), text);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let text = "2 2 1 1\n3\n1\n";
        assert!(parse(text).is_err());
    }

    #[test]
    fn rejects_count_mismatch() {
        let text = "2 2 2 1\n1\n1\n";
        assert!(parse(text).is_err());
    }
}
