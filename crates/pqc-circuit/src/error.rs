//! Error types for the circuit crate.

use thiserror::Error;

/// Errors produced while assembling or evaluating a circuit.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PqcError {
    /// Operator arithmetic failed (dimension mismatch, bad qubit index, ...).
    #[error("Operator error: {0}")]
    Ops(#[from] pqc_ops::OpsError),

    /// A gate was built for a different register width than the circuit.
    #[error("Gate '{gate}' acts on {got} qubits but the circuit has {expected}")]
    QubitCountMismatch {
        /// Display form of the offending gate.
        gate: String,
        /// Circuit width.
        expected: usize,
        /// Gate width.
        got: usize,
    },

    /// Layer position past the end of the circuit.
    #[error("Layer {pos} out of range: circuit has {n_layers} layers")]
    LayerOutOfRange {
        /// Requested position.
        pos: usize,
        /// Number of layers in the circuit.
        n_layers: usize,
    },

    /// Explicit angle list does not cover every parameterized gate.
    #[error("Expected {expected} angles, got {got}")]
    ParameterCountMismatch {
        /// Number of parameterized gates.
        expected: usize,
        /// Number of angles supplied.
        got: usize,
    },

    /// Logical parameter index past the end of the parameter vector.
    #[error("Parameter {index} out of range: circuit has {n_params} parameters")]
    ParameterOutOfRange {
        /// Requested parameter index.
        index: usize,
        /// Number of parameters.
        n_params: usize,
    },

    /// Derivative requested from a gate with no tunable angle.
    #[error("Gate '{0}' is not parameterized")]
    NotParameterized(String),

    /// Cost function name is neither `energy` nor `fidelity`.
    #[error("Unknown cost function '{0}' (expected 'energy' or 'fidelity')")]
    UnknownCostFunction(String),

    /// Fidelity requested without a reference state.
    #[error("Fidelity cost requires a reference state")]
    MissingReference,

    /// The Z₀Z₁ energy observable needs at least two qubits.
    #[error("Energy observable needs at least 2 qubits, circuit has {0}")]
    ObservableUnavailable(usize),
}

/// Result type for circuit operations.
pub type PqcResult<T> = Result<T, PqcError>;
