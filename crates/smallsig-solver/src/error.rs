//! Error types for smallsig-solver.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Gaussian elimination reached an all-zero pivot column; the system
    /// has no unique solution.
    #[error("singular system: no unique solution")]
    SingularSystem,

    #[error("invalid matrix dimensions: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("index out of bounds: {index} not below {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("could not compute operating point at omega = {omega} rad/s")]
    OperatingPoint {
        omega: f64,
        #[source]
        source: Box<Error>,
    },

    #[error("cannot measure {quantity} on component {reference}")]
    QueryUnsupported {
        reference: String,
        quantity: &'static str,
    },

    #[error("unknown component reference: {0}")]
    UnknownReference(String),

    #[error("unknown node label: {0}")]
    UnknownNode(i32),

    #[error("no solution available: call solve() first")]
    NotSolved,
}

pub type Result<T> = std::result::Result<T, Error>;
