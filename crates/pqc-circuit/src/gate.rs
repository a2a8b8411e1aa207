//! Gate catalog.
//!
//! Every gate is a [`Gate`]: a [`GateKind`] describing what it is, the
//! register width, the current angle, and the dense operator for that angle.
//! Parameterized gates also carry their generator, the Hermitian operator `G`
//! with `∂/∂θ U(θ) = -i/2 · G · U(θ)`.
//!
//! The operator is rebuilt eagerly inside [`Gate::set_theta`]; it is never
//! stale.

use std::f64::consts::PI;
use std::fmt;

use num_complex::Complex64;
use pqc_ops::{OpsError, Operator, Pauli, gates, tensor};
use serde::{Deserialize, Serialize};

use crate::algebra::{compose, reverse_product};
use crate::error::{PqcError, PqcResult};

/// Single-qubit gates whose angle cannot be changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FixedGate {
    /// Hadamard, built as `X · R_y(π/2)`.
    H,
    /// Principal square root of the Hadamard.
    SqrtH,
    /// Phase gate P(π/2).
    S,
    /// Phase gate P(π/4).
    T,
    /// R_y by an angle frozen at construction.
    FixedRy,
}

impl FixedGate {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            FixedGate::H => "H",
            FixedGate::SqrtH => "sqrtH",
            FixedGate::S => "S",
            FixedGate::T => "T",
            FixedGate::FixedRy => "fixed_R_y",
        }
    }
}

/// Two-qubit gate families, usable directly or as the building block of a
/// CHAIN, ALLTOALL or ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TwoQubitGate {
    /// Controlled-NOT.
    Cnot,
    /// Controlled phase (π), identical to CZ.
    Cphase,
    /// Controlled-Z.
    Cz,
    /// Square root of iSWAP.
    SqrtISwap,
    /// XX rotation.
    Rxx,
    /// YY rotation.
    Ryy,
    /// ZZ rotation.
    Rzz,
}

impl TwoQubitGate {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            TwoQubitGate::Cnot => "CNOT",
            TwoQubitGate::Cphase => "CPHASE",
            TwoQubitGate::Cz => "CZ",
            TwoQubitGate::SqrtISwap => "sqrtiSWAP",
            TwoQubitGate::Rxx => "R_xx",
            TwoQubitGate::Ryy => "R_yy",
            TwoQubitGate::Rzz => "R_zz",
        }
    }

    /// The Pauli axis of a two-qubit rotation; `None` for entanglers.
    pub fn axis(self) -> Option<Pauli> {
        match self {
            TwoQubitGate::Rxx => Some(Pauli::X),
            TwoQubitGate::Ryy => Some(Pauli::Y),
            TwoQubitGate::Rzz => Some(Pauli::Z),
            TwoQubitGate::Cnot
            | TwoQubitGate::Cphase
            | TwoQubitGate::Cz
            | TwoQubitGate::SqrtISwap => None,
        }
    }

    /// True for the rotation families.
    pub fn is_parameterized(self) -> bool {
        self.axis().is_some()
    }
}

/// What a gate is.
#[derive(Debug, Clone, PartialEq)]
pub enum GateKind {
    /// `R_x`, `R_y` or `R_z` on one qubit.
    Rotation {
        /// Rotation axis.
        axis: Pauli,
        /// Target qubit.
        qubit: usize,
    },
    /// A non-parameterized single-qubit gate.
    Fixed {
        /// Which gate.
        gate: FixedGate,
        /// Target qubit.
        qubit: usize,
    },
    /// A two-qubit entangler or rotation.
    TwoQubit {
        /// Which gate.
        gate: TwoQubitGate,
        /// `[control, target]` for entanglers, the rotated pair otherwise.
        qubits: [usize; 2],
    },
    /// Entanglers on a nearest-neighbour chain.
    Chain {
        /// Gate placed on every link.
        entangler: TwoQubitGate,
        /// One entangler per link, in application order.
        gates: Vec<Gate>,
    },
    /// Entanglers on every pair, each pair in random orientation.
    AllToAll {
        /// Gate placed on every pair.
        entangler: TwoQubitGate,
        /// One entangler per pair, in application order.
        gates: Vec<Gate>,
    },
    /// Gates sharing one angle.
    Shared {
        /// Sub-gates, in application order.
        gates: Vec<Gate>,
    },
    /// Two-qubit rotations on a ring, sharing one angle.
    Ring {
        /// Rotation placed on every link.
        rotator: TwoQubitGate,
        /// One rotation per link, in application order.
        gates: Vec<Gate>,
    },
    /// An arbitrary fixed operator.
    Custom {
        /// Display name.
        name: String,
    },
}

/// A gate embedded in an N-qubit register.
#[derive(Debug, Clone, PartialEq)]
pub struct Gate {
    kind: GateKind,
    n_qubits: usize,
    theta: f64,
    is_param: bool,
    generator: Option<Operator>,
    operation: Operator,
}

impl Gate {
    /// Build a gate and its operator for the initial angle.
    pub(crate) fn assemble(
        kind: GateKind,
        n_qubits: usize,
        theta: f64,
        is_param: bool,
        generator: Option<Operator>,
    ) -> PqcResult<Self> {
        let mut gate = Self {
            kind,
            n_qubits,
            theta,
            is_param,
            generator,
            operation: Operator::identity(n_qubits),
        };
        gate.operation = gate.build()?;
        Ok(gate)
    }

    // =========================================================================
    // Single-qubit rotations
    // =========================================================================

    /// Parameterized rotation about `axis` on `qubit`, starting at θ = 0.
    pub fn rotation(axis: Pauli, qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        let generator = axis.on(qubit, n_qubits)?;
        Self::assemble(
            GateKind::Rotation { axis, qubit },
            n_qubits,
            0.0,
            true,
            Some(generator),
        )
    }

    /// `R_x` on `qubit`.
    pub fn rx(qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        Self::rotation(Pauli::X, qubit, n_qubits)
    }

    /// `R_y` on `qubit`.
    pub fn ry(qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        Self::rotation(Pauli::Y, qubit, n_qubits)
    }

    /// `R_z` on `qubit`.
    pub fn rz(qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        Self::rotation(Pauli::Z, qubit, n_qubits)
    }

    // =========================================================================
    // Fixed single-qubit gates
    // =========================================================================

    /// A fixed gate on `qubit`. [`FixedGate::FixedRy`] is built at θ = 0;
    /// use [`Gate::fixed_ry`] to choose its angle.
    pub fn fixed(gate: FixedGate, qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        let theta = match gate {
            FixedGate::FixedRy => 0.0,
            FixedGate::H | FixedGate::SqrtH | FixedGate::S | FixedGate::T => PI / 2.0,
        };
        Self::assemble(GateKind::Fixed { gate, qubit }, n_qubits, theta, false, None)
    }

    /// Hadamard on `qubit`.
    pub fn h(qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        Self::fixed(FixedGate::H, qubit, n_qubits)
    }

    /// √H on `qubit`.
    pub fn sqrt_h(qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        Self::fixed(FixedGate::SqrtH, qubit, n_qubits)
    }

    /// S on `qubit`.
    pub fn s(qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        Self::fixed(FixedGate::S, qubit, n_qubits)
    }

    /// T on `qubit`.
    pub fn t(qubit: usize, n_qubits: usize) -> PqcResult<Self> {
        Self::fixed(FixedGate::T, qubit, n_qubits)
    }

    /// `R_y(theta)` on `qubit`, with the angle frozen.
    pub fn fixed_ry(qubit: usize, n_qubits: usize, theta: f64) -> PqcResult<Self> {
        Self::assemble(
            GateKind::Fixed {
                gate: FixedGate::FixedRy,
                qubit,
            },
            n_qubits,
            theta,
            false,
            None,
        )
    }

    // =========================================================================
    // Two-qubit gates
    // =========================================================================

    /// A two-qubit gate on `qubits`. Rotations start at θ = 0.
    pub fn two_qubit(gate: TwoQubitGate, qubits: [usize; 2], n_qubits: usize) -> PqcResult<Self> {
        if qubits[0] == qubits[1] {
            return Err(OpsError::DuplicateQubit(qubits[0]).into());
        }
        let generator = gate
            .axis()
            .map(|axis| Operator::embed(&tensor(&[axis.matrix(), axis.matrix()]), &qubits, n_qubits))
            .transpose()?;
        Self::assemble(
            GateKind::TwoQubit { gate, qubits },
            n_qubits,
            0.0,
            gate.is_parameterized(),
            generator,
        )
    }

    /// CNOT with `qubits = [control, target]`.
    pub fn cnot(qubits: [usize; 2], n_qubits: usize) -> PqcResult<Self> {
        Self::two_qubit(TwoQubitGate::Cnot, qubits, n_qubits)
    }

    /// CPHASE with `qubits = [control, target]`.
    pub fn cphase(qubits: [usize; 2], n_qubits: usize) -> PqcResult<Self> {
        Self::two_qubit(TwoQubitGate::Cphase, qubits, n_qubits)
    }

    /// CZ with `qubits = [control, target]`.
    pub fn cz(qubits: [usize; 2], n_qubits: usize) -> PqcResult<Self> {
        Self::two_qubit(TwoQubitGate::Cz, qubits, n_qubits)
    }

    /// √iSWAP on `qubits`.
    pub fn sqrt_iswap(qubits: [usize; 2], n_qubits: usize) -> PqcResult<Self> {
        Self::two_qubit(TwoQubitGate::SqrtISwap, qubits, n_qubits)
    }

    /// `R_xx` on `qubits`.
    pub fn rxx(qubits: [usize; 2], n_qubits: usize) -> PqcResult<Self> {
        Self::two_qubit(TwoQubitGate::Rxx, qubits, n_qubits)
    }

    /// `R_yy` on `qubits`.
    pub fn ryy(qubits: [usize; 2], n_qubits: usize) -> PqcResult<Self> {
        Self::two_qubit(TwoQubitGate::Ryy, qubits, n_qubits)
    }

    /// `R_zz` on `qubits`.
    pub fn rzz(qubits: [usize; 2], n_qubits: usize) -> PqcResult<Self> {
        Self::two_qubit(TwoQubitGate::Rzz, qubits, n_qubits)
    }

    // =========================================================================
    // Custom
    // =========================================================================

    /// Wrap an arbitrary operator as a non-parameterized gate.
    pub fn custom(name: impl Into<String>, operation: Operator) -> PqcResult<Self> {
        let n_qubits = operation.n_qubits()?;
        Ok(Self {
            kind: GateKind::Custom { name: name.into() },
            n_qubits,
            theta: 0.0,
            is_param: false,
            generator: None,
            operation,
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// What this gate is.
    pub fn kind(&self) -> &GateKind {
        &self.kind
    }

    /// Register width the operator is built for.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// Current angle.
    pub fn theta(&self) -> f64 {
        self.theta
    }

    /// True if the angle is tunable and the gate contributes a gradient.
    pub fn is_param(&self) -> bool {
        self.is_param
    }

    /// The operator for the current angle.
    pub fn operation(&self) -> &Operator {
        &self.operation
    }

    /// The stored generator, embedded in the full register.
    pub fn generator(&self) -> Option<&Operator> {
        self.generator.as_ref()
    }

    /// Sub-gates of a block, in application order; empty for primitives.
    pub fn sub_gates(&self) -> &[Gate] {
        match &self.kind {
            GateKind::Chain { gates, .. }
            | GateKind::AllToAll { gates, .. }
            | GateKind::Shared { gates }
            | GateKind::Ring { gates, .. } => gates,
            GateKind::Rotation { .. }
            | GateKind::Fixed { .. }
            | GateKind::TwoQubit { .. }
            | GateKind::Custom { .. } => &[],
        }
    }

    /// Qubits the gate touches, ascending.
    pub fn qubits(&self) -> Vec<usize> {
        let mut qubits = match &self.kind {
            GateKind::Rotation { qubit, .. } | GateKind::Fixed { qubit, .. } => vec![*qubit],
            GateKind::TwoQubit { qubits, .. } => qubits.to_vec(),
            GateKind::Custom { .. } => (0..self.n_qubits).collect(),
            GateKind::Chain { .. }
            | GateKind::AllToAll { .. }
            | GateKind::Shared { .. }
            | GateKind::Ring { .. } => self.sub_gates().iter().flat_map(Gate::qubits).collect(),
        };
        qubits.sort_unstable();
        qubits.dedup();
        qubits
    }

    // =========================================================================
    // Angle and derivative
    // =========================================================================

    /// Set the angle and rebuild the operator. A no-op on fixed gates.
    ///
    /// Blocks sharing one angle push it into every sub-gate before rebuilding
    /// their product.
    pub fn set_theta(&mut self, theta: f64) -> PqcResult<()> {
        if !self.is_param {
            return Ok(());
        }
        self.theta = theta;
        if let GateKind::Shared { gates } | GateKind::Ring { gates, .. } = &mut self.kind {
            for gate in gates.iter_mut() {
                gate.set_theta(theta)?;
            }
        }
        self.operation = self.build()?;
        Ok(())
    }

    /// `-i/2 · generator`, the factor that turns `U(θ)` into `∂U/∂θ` when
    /// multiplied on the left.
    ///
    /// For shared-angle blocks this is the sum of the sub-gates' derivatives.
    pub fn derivative(&self) -> PqcResult<Operator> {
        match &self.kind {
            GateKind::Shared { gates } | GateKind::Ring { gates, .. } => gates
                .iter()
                .filter(|g| g.is_param)
                .try_fold(
                    Operator::zeros(self.operation.dim()),
                    |acc, g| -> PqcResult<Operator> { Ok(acc.add(&g.derivative()?)?) },
                ),
            _ => match (&self.generator, self.is_param) {
                (Some(generator), true) => Ok(generator.scale(Complex64::new(0.0, -0.5))),
                _ => Err(PqcError::NotParameterized(self.to_string())),
            },
        }
    }

    /// Negate the stored generator. The operator is left alone, so only later
    /// derivatives change sign.
    pub fn flip_pauli(&mut self) {
        match &mut self.kind {
            GateKind::Shared { gates } | GateKind::Ring { gates, .. } => {
                for gate in gates.iter_mut() {
                    gate.flip_pauli();
                }
            }
            _ => {
                if let Some(generator) = &mut self.generator {
                    *generator = generator.scale(Complex64::new(-1.0, 0.0));
                }
            }
        }
    }

    fn build(&self) -> PqcResult<Operator> {
        let n = self.n_qubits;
        let theta = self.theta;
        let op = match &self.kind {
            GateKind::Rotation { axis, qubit } => {
                gates::expand(&gates::rotation_matrix(*axis, theta), n, *qubit)?
            }
            GateKind::Fixed { gate, qubit } => match gate {
                FixedGate::H => compose(&gates::x_gate(n, *qubit)?, &gates::ry(PI / 2.0, n, *qubit)?)?,
                FixedGate::SqrtH => gates::sqrt_hadamard(n, *qubit)?,
                FixedGate::S => gates::phase_gate(PI / 2.0, n, *qubit)?,
                FixedGate::T => gates::t_gate(n, *qubit)?,
                FixedGate::FixedRy => gates::ry(theta, n, *qubit)?,
            },
            GateKind::TwoQubit {
                gate,
                qubits: [a, b],
            } => match gate {
                TwoQubitGate::Cnot => gates::cnot(n, *a, *b)?,
                TwoQubitGate::Cphase | TwoQubitGate::Cz => gates::cz(n, *a, *b)?,
                TwoQubitGate::SqrtISwap => gates::sqrt_iswap(n, *a, *b)?,
                // Second qubit turns by -θ; the generator stays σ⊗σ regardless.
                TwoQubitGate::Rxx => compose(&gates::rx(theta, n, *a)?, &gates::rx(-theta, n, *b)?)?,
                TwoQubitGate::Ryy => compose(&gates::ry(theta, n, *a)?, &gates::ry(-theta, n, *b)?)?,
                TwoQubitGate::Rzz => {
                    let zz = Operator::embed(
                        &tensor(&[Pauli::Z.matrix(), Pauli::Z.matrix()]),
                        &[*a, *b],
                        n,
                    )?;
                    zz.scale(Complex64::new(0.0, -theta / 2.0)).expm()
                }
            },
            GateKind::Chain { gates, .. }
            | GateKind::AllToAll { gates, .. }
            | GateKind::Shared { gates }
            | GateKind::Ring { gates, .. } => reverse_product(gates, n)?,
            GateKind::Custom { .. } => self.operation.clone(),
        };
        Ok(op)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, gates: &[Gate]) -> fmt::Result {
    write!(f, "[")?;
    for (i, gate) in gates.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{gate}")?;
    }
    write!(f, "]")
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            GateKind::Rotation { axis, qubit } => {
                write!(f, "R_{}({:.2})@q{qubit}", axis.label(), self.theta)
            }
            GateKind::Fixed { gate, qubit } => {
                write!(f, "{}({:.2})@q{qubit}", gate.name(), self.theta)
            }
            GateKind::TwoQubit {
                gate,
                qubits: [a, b],
            } => {
                if gate.is_parameterized() {
                    write!(f, "{}({:.2})@q{a},q{b}", gate.name(), self.theta)
                } else {
                    write!(f, "{}@q{a},q{b}", gate.name())
                }
            }
            GateKind::Chain { entangler, .. } => write!(f, "CHAIN connected {}s", entangler.name()),
            GateKind::AllToAll { entangler, .. } => write!(f, "ALL connected {}s", entangler.name()),
            GateKind::Shared { gates } => {
                write!(f, "Block of ")?;
                write_list(f, gates)
            }
            GateKind::Ring { gates, .. } => {
                write!(f, "RR block of ")?;
                write_list(f, gates)
            }
            GateKind::Custom { name } => write!(f, "{name}"),
        }
    }
}
