//! `pqc-ops` — dense operators and states for parameterized circuits.
//!
//! This crate is the linear-algebra layer underneath `pqc-circuit`. It
//! provides:
//!
//! - [`Operator`]: square complex matrices with products, sums, Kronecker
//!   products, conjugate transpose and [`Operator::expm`]
//! - [`State`]: ket vectors with overlap and expectation values
//! - [`Pauli`] matrices and the standard gate builders in [`gates`],
//!   embedded into an N-qubit register
//!
//! Everything is dense (`ndarray` + `num-complex`), which limits practical
//! registers to roughly a dozen qubits.
//!
//! # Qubit ordering
//!
//! Qubit 0 is the leftmost tensor factor, so on two qubits `|10⟩` (qubit 0
//! set) is basis index 2.
//!
//! # Example
//!
//! ```rust
//! use pqc_ops::{gates, State};
//! use std::f64::consts::PI;
//!
//! // X-rotation by π on qubit 0 of a 2-qubit register, then CNOT(0 → 1).
//! let rx = gates::rx(PI, 2, 0).unwrap();
//! let cx = gates::cnot(2, 0, 1).unwrap();
//! let psi = cx.apply(&rx.apply(&State::zero(2)).unwrap()).unwrap();
//! assert!((psi.amplitude(3).unwrap().norm() - 1.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod expm;
pub mod gates;
pub mod operator;
pub mod pauli;
pub mod state;

pub use error::{OpsError, OpsResult};
pub use operator::{Operator, tensor};
pub use pauli::Pauli;
pub use state::{State, tensor_states};
