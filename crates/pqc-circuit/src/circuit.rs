//! Parameterized quantum circuit.
//!
//! A [`Pqc`] owns an ordered list of layers. The flattened gate sequence is a
//! list of [`GateSlot`] positions into those layers, so every gate is stored
//! exactly once and reading a layer back always shows its current angles.
//!
//! Evaluation folds the flattened sequence onto the initial state, first gate
//! first. Gradients repeat that fold once per parameter with one slot
//! temporarily replaced by `derivative · gate`.

use std::fmt;
use std::mem;

use pqc_ops::{OpsError, Operator, State, tensor_states};
use rand::Rng;
use tracing::{debug, info};

use crate::algebra::{apply, compose};
use crate::cost::{self, CostFunction};
use crate::error::{PqcError, PqcResult};
use crate::gate::Gate;
use crate::rng::{global_rng, random_angle};

/// Gates applied at one circuit depth, in order.
pub type Layer = Vec<Gate>;

/// Position of a gate inside the layer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GateSlot {
    /// Layer index.
    pub layer: usize,
    /// Index within the layer.
    pub index: usize,
}

/// A parameterized quantum circuit on a fixed number of qubits.
#[derive(Debug, Clone)]
pub struct Pqc {
    n_qubits: usize,
    layers: Vec<Layer>,
    slots: Vec<GateSlot>,
    /// Per flattened position: the logical parameter index, if any.
    parameterized: Vec<Option<usize>>,
    initial_state: State,
    /// Output of the last [`Pqc::gen_quantum_state`]; the initial state
    /// until then.
    quantum_state: State,
    /// `Z₀Z₁`, absent on fewer than two qubits.
    observable: Option<Operator>,
    cost_fn: CostFunction,
    reference: Option<State>,
}

impl Pqc {
    /// Empty circuit starting in `|0…0⟩`, scored by energy.
    pub fn new(n_qubits: usize) -> Self {
        let initial_state = State::zero(n_qubits);
        Self {
            n_qubits,
            layers: Vec::new(),
            slots: Vec::new(),
            parameterized: Vec::new(),
            quantum_state: initial_state.clone(),
            initial_state,
            observable: cost::zz_observable(n_qubits).ok(),
            cost_fn: CostFunction::Energy,
            reference: None,
        }
    }

    /// Empty circuit with an explicit cost function.
    pub fn with_cost(
        n_qubits: usize,
        cost_fn: CostFunction,
        reference: Option<State>,
    ) -> PqcResult<Self> {
        let mut pqc = Self::new(n_qubits);
        pqc.set_cost_fn(cost_fn, reference)?;
        Ok(pqc)
    }

    /// Switch the cost function.
    ///
    /// Selecting [`CostFunction::Fidelity`] always replaces the reference
    /// state, clearing it when `reference` is `None`. Selecting
    /// [`CostFunction::Energy`] leaves the stored reference untouched.
    pub fn set_cost_fn(&mut self, cost_fn: CostFunction, reference: Option<State>) -> PqcResult<()> {
        if let Some(psi) = &reference {
            self.check_state_dim(psi)?;
        }
        self.cost_fn = cost_fn;
        if cost_fn == CostFunction::Fidelity {
            self.reference = reference;
        }
        Ok(())
    }

    /// [`Pqc::set_cost_fn`] by name (`"energy"` or `"fidelity"`).
    pub fn set_cost_fn_by_name(&mut self, name: &str, reference: Option<State>) -> PqcResult<()> {
        self.set_cost_fn(name.parse()?, reference)
    }

    /// Start every qubit in `single_qubit`. The cached quantum state is
    /// left alone until the next [`Pqc::gen_quantum_state`].
    pub fn set_initial_state(&mut self, single_qubit: &State) -> PqcResult<()> {
        if single_qubit.dim() != 2 {
            return Err(OpsError::DimensionMismatch {
                left: single_qubit.dim(),
                right: 2,
            }
            .into());
        }
        let copies = vec![single_qubit.clone(); self.n_qubits];
        self.initial_state = tensor_states(&copies);
        Ok(())
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append `n` copies of `layer`.
    pub fn add_layer(&mut self, layer: &[Gate], n: usize) -> PqcResult<()> {
        self.check_layer(layer)?;
        for _ in 0..n {
            self.layers.push(layer.to_vec());
        }
        self.set_gates();
        Ok(())
    }

    /// Replace the layer at `pos`.
    pub fn set_layer(&mut self, layer: &[Gate], pos: usize) -> PqcResult<()> {
        self.check_pos(pos)?;
        self.check_layer(layer)?;
        self.layers[pos] = layer.to_vec();
        self.set_gates();
        Ok(())
    }

    /// The layer at `pos`.
    pub fn get_layer(&self, pos: usize) -> PqcResult<&[Gate]> {
        self.check_pos(pos)?;
        Ok(&self.layers[pos])
    }

    /// Rebuild the flattened sequence and parameter map from the layers.
    pub fn set_gates(&mut self) {
        self.slots.clear();
        self.parameterized.clear();
        let mut next_param = 0;
        for (layer, gates) in self.layers.iter().enumerate() {
            for (index, gate) in gates.iter().enumerate() {
                self.slots.push(GateSlot { layer, index });
                if gate.is_param() {
                    self.parameterized.push(Some(next_param));
                    next_param += 1;
                } else {
                    self.parameterized.push(None);
                }
            }
        }
        debug!(
            n_layers = self.layers.len(),
            n_gates = self.slots.len(),
            n_params = next_param,
            "rebuilt gate sequence"
        );
    }

    /// Flattened gates in application order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.slots.iter().map(move |slot| self.gate(*slot))
    }

    /// Flattened positions into the layer list.
    pub fn slots(&self) -> &[GateSlot] {
        &self.slots
    }

    /// Parameter index for every flattened position.
    pub fn parameterized(&self) -> &[Option<usize>] {
        &self.parameterized
    }

    /// All layers.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers.
    pub fn n_layers(&self) -> usize {
        self.layers.len()
    }

    /// Register width.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Number of tunable angles.
    pub fn n_params(&self) -> usize {
        self.parameterized.iter().flatten().count()
    }

    /// The state every run starts from.
    pub fn initial_state(&self) -> &State {
        &self.initial_state
    }

    /// The `Z₀Z₁` energy observable, built once for the register.
    pub fn observable(&self) -> Option<&Operator> {
        self.observable.as_ref()
    }

    /// Selected cost function.
    pub fn cost_fn(&self) -> CostFunction {
        self.cost_fn
    }

    // =========================================================================
    // Parameters
    // =========================================================================

    /// Current angle of every parameterized gate, in parameter order.
    pub fn get_params(&self) -> Vec<f64> {
        self.param_slots().map(|slot| self.gate(slot).theta()).collect()
    }

    /// Assign angles in parameter order. An empty slice draws each angle
    /// uniformly from `[0, 2π)` with the shared generator.
    pub fn set_params(&mut self, angles: &[f64]) -> PqcResult<()> {
        if angles.is_empty() {
            let drawn = self.draw_params(&mut *global_rng());
            self.assign_params(&drawn)
        } else {
            self.assign_params(angles)
        }
    }

    /// [`Pqc::set_params`] drawing from a caller-owned generator.
    pub fn set_params_with_rng<R: Rng + ?Sized>(
        &mut self,
        angles: &[f64],
        rng: &mut R,
    ) -> PqcResult<()> {
        if angles.is_empty() {
            let drawn = self.draw_params(rng);
            self.assign_params(&drawn)
        } else {
            self.assign_params(angles)
        }
    }

    fn draw_params<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let n_params = self.n_params();
        debug!(n_params, "sampling random parameters");
        (0..n_params).map(|_| random_angle(&mut *rng)).collect()
    }

    fn assign_params(&mut self, angles: &[f64]) -> PqcResult<()> {
        let slots: Vec<GateSlot> = self.param_slots().collect();
        if angles.len() != slots.len() {
            return Err(PqcError::ParameterCountMismatch {
                expected: slots.len(),
                got: angles.len(),
            });
        }
        for (slot, &theta) in slots.into_iter().zip(angles) {
            self.gate_mut(slot).set_theta(theta)?;
        }
        Ok(())
    }

    // =========================================================================
    // Evaluation
    // =========================================================================

    /// Set `angles` (random when empty) and return the output state.
    pub fn run(&mut self, angles: &[f64]) -> PqcResult<State> {
        self.set_params(angles)?;
        self.fold()
    }

    /// [`Pqc::run`] drawing random angles from a caller-owned generator.
    pub fn run_with_rng<R: Rng + ?Sized>(&mut self, angles: &[f64], rng: &mut R) -> PqcResult<State> {
        self.set_params_with_rng(angles, rng)?;
        self.fold()
    }

    /// Run with freshly drawn angles and cache the output. With `energy_out`
    /// the cost is logged.
    pub fn gen_quantum_state(&mut self, energy_out: bool) -> PqcResult<&State> {
        self.gen_quantum_state_with(&[], energy_out)
    }

    /// Run with `angles` and cache the output.
    pub fn gen_quantum_state_with(&mut self, angles: &[f64], energy_out: bool) -> PqcResult<&State> {
        self.quantum_state = self.run(angles)?;
        if energy_out {
            let cost = self.cost()?;
            info!(cost_fn = %self.cost_fn, cost, "generated quantum state");
        }
        Ok(&self.quantum_state)
    }

    /// The state cached by the last [`Pqc::gen_quantum_state`], or the
    /// initial state if none was generated yet.
    pub fn quantum_state(&self) -> &State {
        &self.quantum_state
    }

    /// The selected cost on the cached state.
    pub fn cost(&self) -> PqcResult<f64> {
        match self.cost_fn {
            CostFunction::Energy => self.energy(None),
            CostFunction::Fidelity => self.fidelity(),
        }
    }

    /// `⟨ψ|Z₀Z₁|ψ⟩` on `psi`, or on the cached state when `None`.
    pub fn energy(&self, psi: Option<&State>) -> PqcResult<f64> {
        let observable = self
            .observable
            .as_ref()
            .ok_or(PqcError::ObservableUnavailable(self.n_qubits))?;
        cost::energy(psi.unwrap_or(&self.quantum_state), observable)
    }

    /// `1 − |⟨ψ|ψ_ref⟩|²` on the cached state.
    pub fn fidelity(&self) -> PqcResult<f64> {
        let reference = self.reference.as_ref().ok_or(PqcError::MissingReference)?;
        cost::infidelity(&self.quantum_state, reference)
    }

    // =========================================================================
    // Gradients
    // =========================================================================

    /// Negate the generator of every parameterized gate.
    pub fn flip_deriv(&mut self) {
        let slots: Vec<GateSlot> = self.param_slots().collect();
        for slot in slots {
            self.gate_mut(slot).flip_pauli();
        }
    }

    /// `∂|ψ⟩/∂θ_param` at the current angles.
    ///
    /// The gate carrying `param` is swapped for `derivative · gate` during
    /// the fold and put back afterwards, whether or not the fold succeeded.
    pub fn take_derivative(&mut self, param: usize) -> PqcResult<State> {
        let n_params = self.n_params();
        let pos = self
            .parameterized
            .iter()
            .position(|p| *p == Some(param))
            .ok_or(PqcError::ParameterOutOfRange {
                index: param,
                n_params,
            })?;
        let slot = self.slots[pos];

        let gate = self.gate(slot);
        let d_op = compose(&gate.derivative()?, gate)?;
        let d_gate = Gate::custom("derivative", d_op)?;
        let original = mem::replace(self.gate_mut(slot), d_gate);

        let result = self.fold();
        *self.gate_mut(slot) = original;
        result
    }

    /// [`Pqc::take_derivative`] for every parameter, in order.
    pub fn get_gradients(&mut self) -> PqcResult<Vec<State>> {
        let n_params = self.n_params();
        debug!(n_params, "evaluating gradients");
        (0..n_params).map(|g| self.take_derivative(g)).collect()
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn fold(&self) -> PqcResult<State> {
        self.gates()
            .try_fold(self.initial_state.clone(), |psi, gate| apply(gate, &psi))
    }

    fn gate(&self, slot: GateSlot) -> &Gate {
        &self.layers[slot.layer][slot.index]
    }

    fn gate_mut(&mut self, slot: GateSlot) -> &mut Gate {
        &mut self.layers[slot.layer][slot.index]
    }

    fn param_slots(&self) -> impl Iterator<Item = GateSlot> + '_ {
        self.slots
            .iter()
            .zip(&self.parameterized)
            .filter(|(_, p)| p.is_some())
            .map(|(slot, _)| *slot)
    }

    fn check_pos(&self, pos: usize) -> PqcResult<()> {
        if pos >= self.layers.len() {
            return Err(PqcError::LayerOutOfRange {
                pos,
                n_layers: self.layers.len(),
            });
        }
        Ok(())
    }

    fn check_layer(&self, layer: &[Gate]) -> PqcResult<()> {
        match layer.iter().find(|g| g.n_qubits() != self.n_qubits) {
            Some(bad) => Err(PqcError::QubitCountMismatch {
                gate: bad.to_string(),
                expected: self.n_qubits,
                got: bad.n_qubits(),
            }),
            None => Ok(()),
        }
    }

    fn check_state_dim(&self, psi: &State) -> PqcResult<()> {
        let dim = 1usize << self.n_qubits;
        if psi.dim() != dim {
            return Err(OpsError::DimensionMismatch {
                left: psi.dim(),
                right: dim,
            }
            .into());
        }
        Ok(())
    }
}

impl fmt::Display for Pqc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A {} qubit, {} layer deep PQC.",
            self.n_qubits,
            self.layers.len()
        )?;
        for (i, layer) in self.layers.iter().enumerate() {
            write!(f, "\nLayer {i}: ")?;
            for (j, gate) in layer.iter().enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{gate}")?;
            }
        }
        Ok(())
    }
}
