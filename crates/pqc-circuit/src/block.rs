//! Composite gates: entangler topologies and shared-angle blocks.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::debug;

use crate::error::{PqcError, PqcResult};
use crate::gate::{Gate, GateKind, TwoQubitGate};
use crate::rng::global_rng;

/// Nearest-neighbour pairs: even links `(0,1), (2,3), …` then odd links
/// `(1,2), (3,4), …`.
pub fn chain_pairs(n_qubits: usize) -> Vec<[usize; 2]> {
    let even = (0..n_qubits / 2).map(|j| [2 * j, 2 * j + 1]);
    let odd = (0..n_qubits.saturating_sub(1) / 2).map(|j| [2 * j + 1, 2 * j + 2]);
    even.chain(odd).collect()
}

/// Ring links `(i, i+1 mod n)` for every qubit.
pub fn ring_pairs(n_qubits: usize) -> Vec<[usize; 2]> {
    (0..n_qubits).map(|i| [i, (i + 1) % n_qubits]).collect()
}

/// Every unordered pair `i < j`, each put in random orientation.
pub fn all_to_all_pairs<R: Rng + ?Sized>(n_qubits: usize, rng: &mut R) -> Vec<[usize; 2]> {
    let mut pairs = Vec::with_capacity(n_qubits * n_qubits.saturating_sub(1) / 2);
    for i in 0..n_qubits {
        for j in (i + 1)..n_qubits {
            let mut pair = [i, j];
            pair.shuffle(&mut *rng);
            pairs.push(pair);
        }
    }
    pairs
}

fn place(gate: TwoQubitGate, pairs: &[[usize; 2]], n_qubits: usize) -> PqcResult<Vec<Gate>> {
    pairs
        .iter()
        .map(|&pair| Gate::two_qubit(gate, pair, n_qubits))
        .collect()
}

impl Gate {
    /// Entanglers on [`chain_pairs`]; the even links act first.
    pub fn chain(entangler: TwoQubitGate, n_qubits: usize) -> PqcResult<Self> {
        let gates = place(entangler, &chain_pairs(n_qubits), n_qubits)?;
        Self::assemble(
            GateKind::Chain { entangler, gates },
            n_qubits,
            0.0,
            false,
            None,
        )
    }

    /// Entanglers on every pair, oriented with the shared generator.
    pub fn all_to_all(entangler: TwoQubitGate, n_qubits: usize) -> PqcResult<Self> {
        let pairs = all_to_all_pairs(n_qubits, &mut *global_rng());
        Self::all_to_all_on(entangler, &pairs, n_qubits)
    }

    /// Like [`Gate::all_to_all`] with a caller-owned generator.
    pub fn all_to_all_with_rng<R: Rng + ?Sized>(
        entangler: TwoQubitGate,
        n_qubits: usize,
        rng: &mut R,
    ) -> PqcResult<Self> {
        let pairs = all_to_all_pairs(n_qubits, rng);
        Self::all_to_all_on(entangler, &pairs, n_qubits)
    }

    fn all_to_all_on(
        entangler: TwoQubitGate,
        pairs: &[[usize; 2]],
        n_qubits: usize,
    ) -> PqcResult<Self> {
        debug!(n_qubits, n_pairs = pairs.len(), "building all-to-all block");
        let gates = place(entangler, pairs, n_qubits)?;
        Self::assemble(
            GateKind::AllToAll { entangler, gates },
            n_qubits,
            0.0,
            false,
            None,
        )
    }

    /// Bind `layer` to one angle, starting at θ = 0.
    ///
    /// Fixed sub-gates are kept in place and ignore the angle.
    pub fn shared_parameter(layer: &[Gate], n_qubits: usize) -> PqcResult<Self> {
        if let Some(bad) = layer.iter().find(|g| g.n_qubits() != n_qubits) {
            return Err(PqcError::QubitCountMismatch {
                gate: bad.to_string(),
                expected: n_qubits,
                got: bad.n_qubits(),
            });
        }
        let mut block = Self::assemble(
            GateKind::Shared {
                gates: layer.to_vec(),
            },
            n_qubits,
            0.0,
            true,
            None,
        )?;
        block.set_theta(0.0)?;
        Ok(block)
    }

    /// A two-qubit rotation on every ring link, all sharing one angle.
    ///
    /// A single qubit has no ring, so `n_qubits = 1` fails with a duplicate
    /// qubit error.
    pub fn rr_block(rotator: TwoQubitGate, n_qubits: usize) -> PqcResult<Self> {
        if !rotator.is_parameterized() {
            return Err(PqcError::NotParameterized(rotator.name().to_string()));
        }
        let gates = place(rotator, &ring_pairs(n_qubits), n_qubits)?;
        let mut block = Self::assemble(
            GateKind::Ring { rotator, gates },
            n_qubits,
            0.0,
            true,
            None,
        )?;
        block.set_theta(0.0)?;
        Ok(block)
    }
}
