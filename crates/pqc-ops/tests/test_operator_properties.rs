//! Property-based tests for embedded gate operators.

use num_complex::Complex64;
use pqc_ops::{Operator, Pauli, State, gates, tensor};
use proptest::prelude::*;

fn arb_axis() -> impl Strategy<Value = Pauli> {
    prop_oneof![Just(Pauli::X), Just(Pauli::Y), Just(Pauli::Z)]
}

/// A register size together with a valid target on it.
fn arb_register() -> impl Strategy<Value = (usize, usize)> {
    (1_usize..=4).prop_flat_map(|n| (Just(n), 0..n))
}

/// A register of at least two qubits together with a distinct pair on it.
fn arb_pair() -> impl Strategy<Value = (usize, usize, usize)> {
    (2_usize..=4).prop_flat_map(|n| {
        (Just(n), 0..n, 0..n).prop_filter("qubits must differ", |(_, a, b)| a != b)
    })
}

proptest! {
    #[test]
    fn rotation_is_unitary_with_full_dimension(
        (n, q) in arb_register(),
        axis in arb_axis(),
        theta in -10.0_f64..10.0,
    ) {
        let local = gates::rotation_matrix(axis, theta);
        let op = gates::expand(&local, n, q).unwrap();
        prop_assert_eq!(op.dim(), 1 << n);
        prop_assert!(op.is_unitary());
    }

    #[test]
    fn rotation_matches_generator_exponential(
        (n, q) in arb_register(),
        axis in arb_axis(),
        theta in -6.3_f64..6.3,
    ) {
        let generator = axis.on(q, n).unwrap().scale(Complex64::new(0.0, -theta / 2.0));
        let op = gates::expand(&gates::rotation_matrix(axis, theta), n, q).unwrap();
        prop_assert!(generator.expm().approx_eq(&op, 1e-9));
    }

    #[test]
    fn two_qubit_gates_are_unitary((n, a, b) in arb_pair()) {
        for op in [
            gates::cnot(n, a, b).unwrap(),
            gates::cz(n, a, b).unwrap(),
            gates::sqrt_iswap(n, a, b).unwrap(),
        ] {
            prop_assert_eq!(op.dim(), 1 << n);
            prop_assert!(op.is_unitary());
        }
    }

    #[test]
    fn unitaries_preserve_norm((n, q) in arb_register(), theta in -6.3_f64..6.3, index in 0_usize..16) {
        let dim = 1 << n;
        let psi = State::basis(dim, index % dim).unwrap();
        let out = gates::ry(theta, n, q).unwrap().apply(&psi).unwrap();
        prop_assert!((out.norm() - 1.0).abs() < 1e-12);
    }
}

#[test]
fn zz_expectation_on_bell_states() {
    let zz = tensor(&[Pauli::Z.matrix(), Pauli::Z.matrix()]);
    let h = std::f64::consts::FRAC_1_SQRT_2;
    let phi_plus = State::from_amplitudes(vec![
        Complex64::new(h, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(0.0, 0.0),
        Complex64::new(h, 0.0),
    ]);
    let psi_plus = State::from_amplitudes(vec![
        Complex64::new(0.0, 0.0),
        Complex64::new(h, 0.0),
        Complex64::new(h, 0.0),
        Complex64::new(0.0, 0.0),
    ]);
    assert!((phi_plus.expect(&zz).unwrap() - 1.0).abs() < 1e-12);
    assert!((psi_plus.expect(&zz).unwrap() + 1.0).abs() < 1e-12);
}

#[test]
fn embedding_a_two_qubit_product_equals_product_of_embeddings() {
    let local = tensor(&[Pauli::X.matrix(), Pauli::Y.matrix()]);
    let embedded = Operator::embed(&local, &[2, 0], 3).unwrap();
    let product = Pauli::X
        .on(2, 3)
        .unwrap()
        .matmul(&Pauli::Y.on(0, 3).unwrap())
        .unwrap();
    assert!(embedded.approx_eq(&product, 1e-12));
}
