use thiserror::Error;

/// A structural expectation of the grid file format that the input did not meet.
///
/// Line numbers are 1-based and refer to the input text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormatError {
    #[error("unsupported dimensionality: expected '2' or '3' as the first character, found {found:?}")]
    UnsupportedDimensionality { found: String },

    #[error("missing marker line: no line starting with '{marker}' before end of input")]
    MissingMarker { marker: &'static str },

    #[error("unexpected end of input while reading {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid {expected} '{token}' (line {line})")]
    InvalidNumber {
        line: usize,
        token: String,
        expected: &'static str,
    },

    #[error("expected {expected} values on line {line}, found {found}")]
    MissingValues {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid {axis} axis: {details}")]
    InvalidAxis { axis: char, details: String },

    #[error("truncated atom list: expected {expected} atoms, found {found}")]
    TruncatedAtomList { expected: usize, found: usize },

    #[error("sample count mismatch: axes declare {expected} samples, found {found}")]
    SampleCountMismatch { expected: usize, found: usize },

    #[error("samples cannot be shaped as {shape:?}: {details}")]
    ShapeMismatch { shape: Vec<usize>, details: String },
}

/// Failure to turn a file on disk into a parsed grid.
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("I/O operation failed: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    #[error(transparent)]
    Format(#[from] FormatError),
}
