//! State vectors.

use ndarray::Array1;
use num_complex::Complex64;

use crate::error::{OpsError, OpsResult};
use crate::operator::Operator;

/// A (ket) state vector of complex amplitudes.
#[derive(Debug, Clone, PartialEq)]
pub struct State {
    data: Array1<Complex64>,
}

impl State {
    /// Wrap an amplitude vector.
    pub fn from_array(data: Array1<Complex64>) -> Self {
        Self { data }
    }

    /// Build a state from a list of amplitudes.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> Self {
        Self {
            data: Array1::from_vec(amplitudes),
        }
    }

    /// Computational basis state `|index⟩` in a space of dimension `dim`.
    pub fn basis(dim: usize, index: usize) -> OpsResult<Self> {
        if index >= dim {
            return Err(OpsError::BasisOutOfRange { index, dim });
        }
        let mut data = Array1::zeros(dim);
        data[index] = Complex64::new(1.0, 0.0);
        Ok(Self { data })
    }

    /// `|0…0⟩` on `n_qubits` qubits.
    pub fn zero(n_qubits: usize) -> Self {
        let mut data = Array1::zeros(1 << n_qubits);
        data[0] = Complex64::new(1.0, 0.0);
        Self { data }
    }

    /// Length of the amplitude vector.
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.len()
    }

    /// Borrow the amplitudes.
    pub fn as_array(&self) -> &Array1<Complex64> {
        &self.data
    }

    /// Amplitude of basis state `index`.
    pub fn amplitude(&self, index: usize) -> Option<Complex64> {
        self.data.get(index).copied()
    }

    /// Tensor product `self ⊗ other`.
    #[must_use]
    pub fn kron(&self, other: &State) -> State {
        let data: Array1<Complex64> = self
            .data
            .iter()
            .flat_map(|&a| other.data.iter().map(move |&b| a * b))
            .collect();
        Self { data }
    }

    /// Inner product `⟨self|other⟩`.
    pub fn overlap(&self, other: &State) -> OpsResult<Complex64> {
        self.check_dim(other.dim())?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| a.conj() * b)
            .sum())
    }

    /// Expectation value `⟨self|op|self⟩`.
    ///
    /// Returns the real part; for Hermitian `op` the imaginary part is zero
    /// up to rounding.
    pub fn expect(&self, op: &Operator) -> OpsResult<f64> {
        let applied = op.apply(self)?;
        Ok(self.overlap(&applied)?.re)
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.data.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt()
    }

    /// Vector sum `self + other`.
    pub fn add(&self, other: &State) -> OpsResult<State> {
        self.check_dim(other.dim())?;
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    /// Multiply every amplitude by `factor`.
    #[must_use]
    pub fn scale(&self, factor: Complex64) -> State {
        Self {
            data: self.data.mapv(|z| z * factor),
        }
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &State, tol: f64) -> bool {
        self.dim() == other.dim()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).norm() < tol)
    }

    fn check_dim(&self, other: usize) -> OpsResult<()> {
        if self.dim() != other {
            return Err(OpsError::DimensionMismatch {
                left: self.dim(),
                right: other,
            });
        }
        Ok(())
    }
}

/// Tensor product of a list of states, left to right.
///
/// An empty list yields the scalar state `[1]`.
pub fn tensor_states(states: &[State]) -> State {
    states
        .iter()
        .fold(State::from_amplitudes(vec![Complex64::new(1.0, 0.0)]), |acc, s| acc.kron(s))
}
