use std::io;

/// Errors raised by matrix algebra, the layer chain and model persistence.
///
/// The first three variants are the dimension-error family: a shape violated
/// the algebraic rule of the attempted operation. None of them is
/// recoverable; callers are expected to propagate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Binary operation on operands whose shapes do not agree.
    #[error("matrix dimensions do not agree: {lhs_rows}x{lhs_cols} {op} {rhs_rows}x{rhs_cols}")]
    ShapeMismatch {
        op: &'static str,
        lhs_rows: usize,
        lhs_cols: usize,
        rhs_rows: usize,
        rhs_cols: usize,
    },

    /// Matrix construction with a zero dimension or a ragged row grid, or a
    /// training sample that is not a row vector.
    #[error("illegal matrix dimensions: {rows}x{cols}")]
    IllegalDimensions { rows: usize, cols: usize },

    /// `diagonalize` on a matrix that is neither a row nor a column vector.
    #[error("matrix must be one dimensional, got {rows}x{cols}")]
    NotVector { rows: usize, cols: usize },

    /// Operation invoked on a layer or network in a state that cannot serve it,
    /// e.g. reading the bias of a bias-free layer.
    #[error("{0}")]
    IllegalState(&'static str),

    /// Malformed persistence stream. `position` is the 1-based index of the
    /// offending whitespace-delimited token.
    #[error("parse error at token {position}: expected {expected}, found `{found}`")]
    Parse {
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// I/O failure while reading or writing a persistence stream.
    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
