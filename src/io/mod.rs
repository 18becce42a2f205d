//! Text format parsers/writers (§6 "External interfaces").
//!
//! None of the corpus repos read matrices from a line-oriented text format
//! (lophat reads columns via an iterator the caller constructs in memory), so
//! these modules are grounded directly on the wire grammars spec §6 names,
//! written in the style of the rest of this crate's `Matrix`/`SubmatrixSelector`
//! constructors: parse eagerly into owned data, reject malformed input with
//! `Error::Input` rather than panicking.

pub mod dense;
pub mod sparse;
pub mod submatrix;
