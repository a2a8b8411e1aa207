//! Single-qubit Pauli operators.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::operator::Operator;

/// Single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Lower-case axis label (`"x"` for X); `"i"` for the identity.
    pub fn label(self) -> &'static str {
        match self {
            Pauli::I => "i",
            Pauli::X => "x",
            Pauli::Y => "y",
            Pauli::Z => "z",
        }
    }

    /// The 2×2 matrix.
    pub fn matrix(self) -> Operator {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 0.0);
        let i = Complex64::new(0.0, 1.0);
        match self {
            Pauli::I => Operator::from_matrix([[one, zero], [zero, one]]),
            Pauli::X => Operator::from_matrix([[zero, one], [one, zero]]),
            Pauli::Y => Operator::from_matrix([[zero, -i], [i, zero]]),
            Pauli::Z => Operator::from_matrix([[one, zero], [zero, -one]]),
        }
    }

    /// The Pauli embedded on `target` of an `n_qubits` register.
    pub fn on(self, target: usize, n_qubits: usize) -> crate::OpsResult<Operator> {
        Operator::embed(&self.matrix(), &[target], n_qubits)
    }
}
