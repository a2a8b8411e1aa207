//! `pqc-circuit` — parameterized quantum circuits with analytic gradients.
//!
//! A circuit is built from layers of gates and evaluated on a dense state
//! vector:
//!
//! - [`Gate`]: single-qubit rotations and fixed gates, two-qubit entanglers
//!   and rotations, and composite blocks (CHAIN, ALLTOALL, shared-angle,
//!   ring of rotations)
//! - [`Pqc`]: layers, parameter map, evaluation, energy/fidelity cost and
//!   per-parameter gradient states
//!
//! Gradients are exact: for parameter `k` the gate carrying it is replaced by
//! `-i/2 · G · U(θ)` and the circuit is folded again.
//!
//! # Quick start
//!
//! ```rust
//! use pqc_circuit::{Gate, Pqc};
//! use std::f64::consts::PI;
//!
//! let mut pqc = Pqc::new(2);
//! pqc.add_layer(
//!     &[
//!         Gate::rx(0, 2).unwrap(),
//!         Gate::rx(1, 2).unwrap(),
//!         Gate::cnot([0, 1], 2).unwrap(),
//!     ],
//!     1,
//! )
//! .unwrap();
//!
//! let psi = pqc.run(&[PI / 2.0, 0.0]).unwrap();
//! assert!((psi.amplitude(0).unwrap().norm() - 0.5_f64.sqrt()).abs() < 1e-12);
//!
//! let grads = pqc.get_gradients().unwrap();
//! assert_eq!(grads.len(), 2);
//! ```

pub mod algebra;
pub mod block;
pub mod circuit;
pub mod cost;
pub mod error;
pub mod gate;
pub mod rng;

pub use algebra::{AsOperator, apply, compose, reverse_product, sum};
pub use circuit::{GateSlot, Layer, Pqc};
pub use cost::CostFunction;
pub use error::{PqcError, PqcResult};
pub use gate::{FixedGate, Gate, GateKind, TwoQubitGate};
pub use rng::{DEFAULT_SEED, reseed_global_rng};
