//! Tests for the gate catalog.

use std::f64::consts::{FRAC_1_SQRT_2, PI};

use num_complex::Complex64;
use pqc_circuit::{FixedGate, Gate, GateKind, TwoQubitGate};
use pqc_ops::{Operator, Pauli, gates};
use proptest::prelude::*;

const TOL: f64 = 1e-10;

/// Register size with a valid single target.
fn arb_target() -> impl Strategy<Value = (usize, usize)> {
    (1_usize..=4).prop_flat_map(|n| (Just(n), 0..n))
}

/// Register size with a distinct ordered pair.
fn arb_pair() -> impl Strategy<Value = (usize, [usize; 2])> {
    (2_usize..=4).prop_flat_map(|n| {
        (Just(n), 0..n, 0..n)
            .prop_filter("qubits must differ", |(_, a, b)| a != b)
            .prop_map(|(n, a, b)| (n, [a, b]))
    })
}

fn arb_single_rotation() -> impl Strategy<Value = Pauli> {
    prop_oneof![Just(Pauli::X), Just(Pauli::Y), Just(Pauli::Z)]
}

fn arb_two_qubit_rotation() -> impl Strategy<Value = TwoQubitGate> {
    prop_oneof![
        Just(TwoQubitGate::Rxx),
        Just(TwoQubitGate::Ryy),
        Just(TwoQubitGate::Rzz)
    ]
}

fn arb_entangler() -> impl Strategy<Value = TwoQubitGate> {
    prop_oneof![
        Just(TwoQubitGate::Cnot),
        Just(TwoQubitGate::Cphase),
        Just(TwoQubitGate::Cz),
        Just(TwoQubitGate::SqrtISwap)
    ]
}

fn arb_fixed() -> impl Strategy<Value = FixedGate> {
    prop_oneof![
        Just(FixedGate::H),
        Just(FixedGate::SqrtH),
        Just(FixedGate::S),
        Just(FixedGate::T),
        Just(FixedGate::FixedRy)
    ]
}

// ---------------------------------------------------------------------------
// Dimension, unitarity, identity at zero
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn single_qubit_rotations_are_unitary(
        (n, q) in arb_target(),
        axis in arb_single_rotation(),
        theta in -10.0_f64..10.0,
    ) {
        let mut g = Gate::rotation(axis, q, n).unwrap();
        prop_assert!(g.operation().is_identity());
        g.set_theta(theta).unwrap();
        prop_assert_eq!(g.operation().dim(), 1 << n);
        prop_assert!(g.operation().is_unitary());
        prop_assert!(g.is_param());
    }

    #[test]
    fn two_qubit_rotations_are_unitary(
        (n, pair) in arb_pair(),
        kind in arb_two_qubit_rotation(),
        theta in -10.0_f64..10.0,
    ) {
        let mut g = Gate::two_qubit(kind, pair, n).unwrap();
        prop_assert!(g.operation().is_identity());
        g.set_theta(theta).unwrap();
        prop_assert_eq!(g.operation().dim(), 1 << n);
        prop_assert!(g.operation().is_unitary());
    }

    #[test]
    fn entanglers_ignore_set_theta(
        (n, pair) in arb_pair(),
        kind in arb_entangler(),
        theta in -10.0_f64..10.0,
    ) {
        let mut g = Gate::two_qubit(kind, pair, n).unwrap();
        let before = g.operation().clone();
        g.set_theta(theta).unwrap();
        prop_assert_eq!(g.operation(), &before);
        prop_assert!(!g.is_param());
        prop_assert!(g.operation().is_unitary());
    }

    #[test]
    fn fixed_gates_ignore_set_theta(
        (n, q) in arb_target(),
        kind in arb_fixed(),
        theta in -10.0_f64..10.0,
    ) {
        let mut g = Gate::fixed(kind, q, n).unwrap();
        let before = g.clone();
        g.set_theta(theta).unwrap();
        prop_assert_eq!(&g, &before);
        prop_assert_eq!(g.operation().dim(), 1 << n);
        prop_assert!(g.operation().is_unitary());
    }

    #[test]
    fn rotation_equals_exponential_of_generator(
        (n, pair) in arb_pair(),
        theta in -6.3_f64..6.3,
    ) {
        // Only R_zz is built as a true exponential of its stored generator.
        let mut g = Gate::rzz(pair, n).unwrap();
        g.set_theta(theta).unwrap();
        let Some(generator) = g.generator() else {
            return Err(TestCaseError::fail("R_zz must carry a generator"));
        };
        let expected = generator.scale(Complex64::new(0.0, -theta / 2.0)).expm();
        prop_assert!(g.operation().approx_eq(&expected, 1e-9));
    }
}

// ---------------------------------------------------------------------------
// Fixed gate matrices
// ---------------------------------------------------------------------------

#[test]
fn hadamard_matches_standard_matrix() {
    let g = Gate::h(0, 1).unwrap();
    assert!(g.operation().approx_eq(&gates::hadamard_matrix(), TOL));
    assert_eq!(g.theta(), PI / 2.0);
}

#[test]
fn sqrt_hadamard_squares_to_hadamard() {
    let g = Gate::sqrt_h(1, 2).unwrap();
    let squared = g.operation().matmul(g.operation()).unwrap();
    let h = Gate::h(1, 2).unwrap();
    assert!(squared.approx_eq(h.operation(), TOL));
}

#[test]
fn s_and_t_are_phase_gates() {
    let i = Complex64::new(0.0, 1.0);
    let one = Complex64::new(1.0, 0.0);
    let s = Gate::s(0, 1).unwrap();
    assert!(s.operation().approx_eq(&Operator::diagonal(&[one, i]), TOL));
    assert_eq!(s.theta(), PI / 2.0);

    let t = Gate::t(0, 1).unwrap();
    let phase = Complex64::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2);
    assert!(t.operation().approx_eq(&Operator::diagonal(&[one, phase]), TOL));
    assert_eq!(t.theta(), PI / 2.0);
}

#[test]
fn fixed_ry_keeps_construction_angle() {
    let g = Gate::fixed_ry(0, 2, 0.8).unwrap();
    assert!(g.operation().approx_eq(&gates::ry(0.8, 2, 0).unwrap(), TOL));
    assert!(matches!(
        g.kind(),
        GateKind::Fixed {
            gate: FixedGate::FixedRy,
            qubit: 0
        }
    ));
}

#[test]
fn cphase_equals_cz() {
    let a = Gate::cphase([0, 2], 3).unwrap();
    let b = Gate::cz([0, 2], 3).unwrap();
    assert_eq!(a.operation(), b.operation());
}

#[test]
fn cnot_respects_control_order() {
    // |10⟩ → |11⟩ with control 0; |10⟩ unchanged with control 1.
    let c01 = Gate::cnot([0, 1], 2).unwrap();
    let c10 = Gate::cnot([1, 0], 2).unwrap();
    let psi = pqc_ops::State::basis(4, 2).unwrap();
    let out = c01.operation().apply(&psi).unwrap();
    assert!(out.approx_eq(&pqc_ops::State::basis(4, 3).unwrap(), TOL));
    let out = c10.operation().apply(&psi).unwrap();
    assert!(out.approx_eq(&psi, TOL));
}

#[test]
fn sqrt_iswap_squared_is_iswap() {
    let g = Gate::sqrt_iswap([0, 1], 2).unwrap();
    let squared = g.operation().matmul(g.operation()).unwrap();
    let zero = Complex64::new(0.0, 0.0);
    let one = Complex64::new(1.0, 0.0);
    let i = Complex64::new(0.0, 1.0);
    let iswap = Operator::from_matrix([
        [one, zero, zero, zero],
        [zero, zero, i, zero],
        [zero, i, zero, zero],
        [zero, zero, zero, one],
    ]);
    assert!(squared.approx_eq(&iswap, TOL));
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

#[test]
fn generators_are_embedded_paulis() {
    let rx = Gate::rx(1, 3).unwrap();
    assert_eq!(rx.generator(), Some(&Pauli::X.on(1, 3).unwrap()));

    let ryy = Gate::ryy([2, 0], 3).unwrap();
    let yy = Pauli::Y
        .on(2, 3)
        .unwrap()
        .matmul(&Pauli::Y.on(0, 3).unwrap())
        .unwrap();
    assert!(ryy.generator().unwrap().approx_eq(&yy, TOL));

    assert!(Gate::h(0, 3).unwrap().generator().is_none());
    assert!(Gate::cz([0, 1], 3).unwrap().generator().is_none());
}

#[test]
fn derivative_is_anti_hermitian() {
    let mut g = Gate::ry(0, 2).unwrap();
    g.set_theta(0.6).unwrap();
    let d = g.derivative().unwrap();
    assert!(d.dagger().approx_eq(&d.scale(Complex64::new(-1.0, 0.0)), TOL));
}

#[test]
fn qubits_are_reported_sorted() {
    assert_eq!(Gate::cnot([2, 0], 3).unwrap().qubits(), vec![0, 2]);
    assert_eq!(Gate::rz(1, 3).unwrap().qubits(), vec![1]);
}
