//! Standard gate matrices, local and embedded into an N-qubit register.
//!
//! Rotations follow the half-angle convention `R_a(θ) = exp(-i θ σ_a / 2)`.

use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::error::OpsResult;
use crate::operator::Operator;
use crate::pauli::Pauli;

fn c(re: f64, im: f64) -> Complex64 {
    Complex64::new(re, im)
}

// =========================================================================
// Local 2x2 and 4x4 matrices
// =========================================================================

/// RX rotation matrix.
pub fn rx_matrix(theta: f64) -> Operator {
    let cos = (theta / 2.0).cos();
    let sin = (theta / 2.0).sin();
    Operator::from_matrix([[c(cos, 0.0), c(0.0, -sin)], [c(0.0, -sin), c(cos, 0.0)]])
}

/// RY rotation matrix.
pub fn ry_matrix(theta: f64) -> Operator {
    let cos = (theta / 2.0).cos();
    let sin = (theta / 2.0).sin();
    Operator::from_matrix([[c(cos, 0.0), c(-sin, 0.0)], [c(sin, 0.0), c(cos, 0.0)]])
}

/// RZ rotation matrix.
pub fn rz_matrix(theta: f64) -> Operator {
    Operator::diagonal(&[
        Complex64::from_polar(1.0, -theta / 2.0),
        Complex64::from_polar(1.0, theta / 2.0),
    ])
}

/// Rotation about a Pauli axis. The identity axis yields the identity.
pub fn rotation_matrix(axis: Pauli, theta: f64) -> Operator {
    match axis {
        Pauli::X => rx_matrix(theta),
        Pauli::Y => ry_matrix(theta),
        Pauli::Z => rz_matrix(theta),
        Pauli::I => Operator::identity(1),
    }
}

/// Phase gate P(φ) = diag(1, e^{iφ}).
pub fn phase_matrix(phi: f64) -> Operator {
    Operator::diagonal(&[c(1.0, 0.0), Complex64::from_polar(1.0, phi)])
}

/// Hadamard matrix.
pub fn hadamard_matrix() -> Operator {
    let s = FRAC_1_SQRT_2;
    Operator::from_matrix([[c(s, 0.0), c(s, 0.0)], [c(s, 0.0), c(-s, 0.0)]])
}

/// Principal square root of the Hadamard matrix.
///
/// H has eigenvalues ±1, so √H = P₊ + i·P₋ = (1+i)/2 · I + (1−i)/2 · H.
pub fn sqrt_hadamard_matrix() -> Operator {
    let s = FRAC_1_SQRT_2;
    let a = c(0.5, 0.5);
    let b = c(0.5, -0.5);
    Operator::from_matrix([[a + b * s, b * s], [b * s, a - b * s]])
}

/// CNOT with the control as the most significant qubit.
pub fn cnot_matrix() -> Operator {
    let (o, l) = (c(0.0, 0.0), c(1.0, 0.0));
    Operator::from_matrix([[l, o, o, o], [o, l, o, o], [o, o, o, l], [o, o, l, o]])
}

/// Controlled-Z.
pub fn cz_matrix() -> Operator {
    Operator::diagonal(&[c(1.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(-1.0, 0.0)])
}

/// Square root of iSWAP.
pub fn sqrt_iswap_matrix() -> Operator {
    let (o, l) = (c(0.0, 0.0), c(1.0, 0.0));
    let r = c(FRAC_1_SQRT_2, 0.0);
    let ir = c(0.0, FRAC_1_SQRT_2);
    Operator::from_matrix([[l, o, o, o], [o, r, ir, o], [o, ir, r, o], [o, o, o, l]])
}

// =========================================================================
// Embedded gates
// =========================================================================

/// Embed a single-qubit matrix on `target`.
pub fn expand(local: &Operator, n_qubits: usize, target: usize) -> OpsResult<Operator> {
    Operator::embed(local, &[target], n_qubits)
}

/// RX(θ) on `target`.
pub fn rx(theta: f64, n_qubits: usize, target: usize) -> OpsResult<Operator> {
    expand(&rx_matrix(theta), n_qubits, target)
}

/// RY(θ) on `target`.
pub fn ry(theta: f64, n_qubits: usize, target: usize) -> OpsResult<Operator> {
    expand(&ry_matrix(theta), n_qubits, target)
}

/// RZ(θ) on `target`.
pub fn rz(theta: f64, n_qubits: usize, target: usize) -> OpsResult<Operator> {
    expand(&rz_matrix(theta), n_qubits, target)
}

/// Pauli-X on `target`.
pub fn x_gate(n_qubits: usize, target: usize) -> OpsResult<Operator> {
    Pauli::X.on(target, n_qubits)
}

/// Phase gate P(φ) on `target`.
pub fn phase_gate(phi: f64, n_qubits: usize, target: usize) -> OpsResult<Operator> {
    expand(&phase_matrix(phi), n_qubits, target)
}

/// T gate on `target`.
pub fn t_gate(n_qubits: usize, target: usize) -> OpsResult<Operator> {
    phase_gate(PI / 4.0, n_qubits, target)
}

/// √H on `target`.
pub fn sqrt_hadamard(n_qubits: usize, target: usize) -> OpsResult<Operator> {
    expand(&sqrt_hadamard_matrix(), n_qubits, target)
}

/// CNOT controlled on `control`, flipping `target`.
pub fn cnot(n_qubits: usize, control: usize, target: usize) -> OpsResult<Operator> {
    Operator::embed(&cnot_matrix(), &[control, target], n_qubits)
}

/// Controlled-Z between `control` and `target`.
pub fn cz(n_qubits: usize, control: usize, target: usize) -> OpsResult<Operator> {
    Operator::embed(&cz_matrix(), &[control, target], n_qubits)
}

/// √iSWAP between `a` and `b`.
pub fn sqrt_iswap(n_qubits: usize, a: usize, b: usize) -> OpsResult<Operator> {
    Operator::embed(&sqrt_iswap_matrix(), &[a, b], n_qubits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::State;

    const TOL: f64 = 1e-12;

    #[test]
    fn test_hadamard_is_x_times_ry_half_pi() {
        let h = Pauli::X.matrix().matmul(&ry_matrix(PI / 2.0)).unwrap();
        assert!(h.approx_eq(&hadamard_matrix(), TOL));
    }

    #[test]
    fn test_sqrt_hadamard_squares_to_hadamard() {
        let r = sqrt_hadamard_matrix();
        let sq = r.matmul(&r).unwrap();
        assert!(sq.approx_eq(&hadamard_matrix(), TOL));
        assert!(r.is_unitary());
    }

    #[test]
    fn test_rotations_at_pi_are_paulis_up_to_phase() {
        let minus_i = c(0.0, -1.0);
        for axis in [Pauli::X, Pauli::Y, Pauli::Z] {
            let r = rotation_matrix(axis, PI);
            assert!(r.approx_eq(&axis.matrix().scale(minus_i), TOL), "{axis:?}");
        }
    }

    #[test]
    fn test_cnot_non_adjacent() {
        // |100⟩ → |101⟩ for control 0, target 2.
        let op = cnot(3, 0, 2).unwrap();
        let out = op.apply(&State::basis(8, 0b100).unwrap()).unwrap();
        assert!(out.approx_eq(&State::basis(8, 0b101).unwrap(), TOL));
        // Control clear: untouched.
        let out = op.apply(&State::basis(8, 0b001).unwrap()).unwrap();
        assert!(out.approx_eq(&State::basis(8, 0b001).unwrap(), TOL));
    }

    #[test]
    fn test_cz_is_symmetric() {
        assert!(cz(3, 0, 2).unwrap().approx_eq(&cz(3, 2, 0).unwrap(), TOL));
    }

    #[test]
    fn test_sqrt_iswap_squared_is_iswap() {
        let s = sqrt_iswap_matrix();
        let iswap = s.matmul(&s).unwrap();
        assert!((iswap.get(1, 2).unwrap() - c(0.0, 1.0)).norm() < TOL);
        assert!(iswap.get(1, 1).unwrap().norm() < TOL);
        assert!(s.is_unitary());
    }

    #[test]
    fn test_t_squared_is_s() {
        let t = t_gate(1, 0).unwrap();
        let s = phase_gate(PI / 2.0, 1, 0).unwrap();
        assert!(t.matmul(&t).unwrap().approx_eq(&s, TOL));
    }
}
