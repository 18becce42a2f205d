//! Error taxonomy (§6 wire values).

/// The error type returned by every fallible operation in this crate.
///
/// Variant names mirror the wire values of the external interface: a caller
/// serializing this error (e.g. to report a failed decomposition over a process
/// boundary) gets exactly the taxonomy named in the specification.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("input error: {0}")]
    Input(String),
    #[error("output error: {0}")]
    Output(String),
    #[error("memory error: {0}")]
    Memory(String),
    #[error("overflow error: {0}")]
    Overflow(String),
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("timeout")]
    Timeout,
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),
}

pub type Result<T> = std::result::Result<T, Error>;
