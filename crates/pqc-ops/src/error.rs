//! Error types for the ops crate.

use thiserror::Error;

/// Errors raised by operator and state arithmetic.
#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum OpsError {
    /// Two operands live in spaces of different dimension.
    #[error("Dimension mismatch: {left} vs {right}")]
    DimensionMismatch {
        /// Dimension of the left operand.
        left: usize,
        /// Dimension of the right operand.
        right: usize,
    },

    /// A matrix that must be square is not.
    #[error("Operator must be square, got {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// A dimension is not 2^n for any n, so it cannot describe qubits.
    #[error("Dimension {0} is not a power of two")]
    NotQubitDimension(usize),

    /// A gate targets a qubit outside the register.
    #[error("Qubit {qubit} out of range for a {n_qubits}-qubit register")]
    QubitOutOfRange {
        /// The offending qubit index.
        qubit: usize,
        /// Number of qubits in the register.
        n_qubits: usize,
    },

    /// A multi-qubit gate names the same qubit twice.
    #[error("Duplicate qubit {0} in multi-qubit operation")]
    DuplicateQubit(usize),

    /// Basis index outside the space.
    #[error("Basis index {index} out of range for dimension {dim}")]
    BasisOutOfRange {
        /// Requested basis index.
        index: usize,
        /// Dimension of the space.
        dim: usize,
    },
}

/// Result type for operator arithmetic.
pub type OpsResult<T> = Result<T, OpsError>;
