//! Cost functions evaluated on a circuit's output state.

use std::fmt;
use std::str::FromStr;

use pqc_ops::{Operator, Pauli, State};
use serde::{Deserialize, Serialize};

use crate::error::{PqcError, PqcResult};

/// Which scalar a circuit reports as its cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CostFunction {
    /// `⟨ψ|Z₀Z₁|ψ⟩`.
    #[default]
    Energy,
    /// `1 − |⟨ψ_ref|ψ⟩|²`.
    Fidelity,
}

impl CostFunction {
    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            CostFunction::Energy => "energy",
            CostFunction::Fidelity => "fidelity",
        }
    }
}

impl FromStr for CostFunction {
    type Err = PqcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "energy" => Ok(CostFunction::Energy),
            "fidelity" => Ok(CostFunction::Fidelity),
            other => Err(PqcError::UnknownCostFunction(other.to_string())),
        }
    }
}

impl fmt::Display for CostFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `Z ⊗ Z ⊗ I ⊗ …` on `n_qubits`.
pub fn zz_observable(n_qubits: usize) -> PqcResult<Operator> {
    if n_qubits < 2 {
        return Err(PqcError::ObservableUnavailable(n_qubits));
    }
    Ok(Pauli::Z.on(0, n_qubits)?.matmul(&Pauli::Z.on(1, n_qubits)?)?)
}

/// Expectation of `observable` in `psi`.
pub fn energy(psi: &State, observable: &Operator) -> PqcResult<f64> {
    Ok(psi.expect(observable)?)
}

/// `1 − |⟨reference|psi⟩|²`.
pub fn infidelity(psi: &State, reference: &State) -> PqcResult<f64> {
    let overlap = reference.overlap(psi)?;
    Ok(1.0 - overlap.norm_sqr())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;

    #[test]
    fn test_parse_names() {
        assert_eq!("energy".parse::<CostFunction>().unwrap(), CostFunction::Energy);
        assert_eq!("fidelity".parse::<CostFunction>().unwrap(), CostFunction::Fidelity);
        assert!(matches!(
            "entropy".parse::<CostFunction>(),
            Err(PqcError::UnknownCostFunction(name)) if name == "entropy"
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&CostFunction::Fidelity).unwrap();
        assert_eq!(json, "\"fidelity\"");
        let back: CostFunction = serde_json::from_str("\"energy\"").unwrap();
        assert_eq!(back, CostFunction::Energy);
    }

    #[test]
    fn test_observable_needs_two_qubits() {
        assert!(matches!(
            zz_observable(1),
            Err(PqcError::ObservableUnavailable(1))
        ));
    }

    #[test]
    fn test_energy_on_basis_states() {
        // |010⟩: qubit 1 is flipped, so Z₀Z₁ = -1.
        let zz = zz_observable(3).unwrap();
        let psi = State::basis(8, 0b010).unwrap();
        assert!((energy(&psi, &zz).unwrap() + 1.0).abs() < 1e-12);
        let psi = State::basis(8, 0b001).unwrap();
        assert!((energy(&psi, &zz).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_infidelity_of_phase_shifted_state_is_zero() {
        let psi = State::basis(4, 2).unwrap();
        let shifted = psi.scale(Complex64::new(0.0, 1.0));
        assert!(infidelity(&shifted, &psi).unwrap().abs() < 1e-12);
    }
}
