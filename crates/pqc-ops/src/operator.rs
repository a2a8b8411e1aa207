//! Dense linear operators over qubit registers.
//!
//! Qubit 0 is the leftmost tensor factor, i.e. the most significant bit of a
//! basis index: on two qubits `|10⟩` is index 2.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{OpsError, OpsResult};
use crate::state::State;

/// Tolerance used by the `is_*` predicates.
pub const EPSILON: f64 = 1e-10;

/// A square complex matrix acting on a 2^n-dimensional space.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    data: Array2<Complex64>,
}

impl Operator {
    /// Wrap a square matrix.
    pub fn from_array(data: Array2<Complex64>) -> OpsResult<Self> {
        let (rows, cols) = data.dim();
        if rows != cols {
            return Err(OpsError::NotSquare { rows, cols });
        }
        Ok(Self { data })
    }

    /// Wrap a matrix the caller guarantees is square.
    pub(crate) fn from_square(data: Array2<Complex64>) -> Self {
        debug_assert_eq!(data.nrows(), data.ncols());
        Self { data }
    }

    /// Build a matrix from row-major entries.
    pub fn from_rows(dim: usize, entries: Vec<Complex64>) -> OpsResult<Self> {
        let len = entries.len();
        let data = Array2::from_shape_vec((dim, dim), entries).map_err(|_| {
            OpsError::DimensionMismatch {
                left: dim * dim,
                right: len,
            }
        })?;
        Ok(Self { data })
    }

    /// Build a matrix from a fixed-size row array.
    pub fn from_matrix<const N: usize>(rows: [[Complex64; N]; N]) -> Self {
        Self {
            data: ndarray::arr2(&rows),
        }
    }

    /// Diagonal matrix with the given entries.
    pub fn diagonal(entries: &[Complex64]) -> Self {
        Self {
            data: Array2::from_diag(&ndarray::ArrayView1::from(entries)),
        }
    }

    /// The identity on `n_qubits` qubits.
    pub fn identity(n_qubits: usize) -> Self {
        Self::identity_dim(1 << n_qubits)
    }

    /// The identity of a given dimension.
    pub fn identity_dim(dim: usize) -> Self {
        Self {
            data: Array2::eye(dim),
        }
    }

    /// The zero operator of a given dimension.
    pub fn zeros(dim: usize) -> Self {
        Self {
            data: Array2::zeros((dim, dim)),
        }
    }

    /// Side length of the matrix.
    #[inline]
    pub fn dim(&self) -> usize {
        self.data.nrows()
    }

    /// Number of qubits this operator acts on.
    pub fn n_qubits(&self) -> OpsResult<usize> {
        let dim = self.dim();
        if !dim.is_power_of_two() {
            return Err(OpsError::NotQubitDimension(dim));
        }
        Ok(dim.trailing_zeros() as usize)
    }

    /// Borrow the underlying matrix.
    pub fn as_array(&self) -> &Array2<Complex64> {
        &self.data
    }

    /// Consume into the underlying matrix.
    pub fn into_array(self) -> Array2<Complex64> {
        self.data
    }

    /// Matrix element `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        self.data.get((row, col)).copied()
    }

    /// Operator product `self · other`.
    pub fn matmul(&self, other: &Operator) -> OpsResult<Operator> {
        self.check_dim(other.dim())?;
        Ok(Self {
            data: self.data.dot(&other.data),
        })
    }

    /// Operator sum `self + other`.
    pub fn add(&self, other: &Operator) -> OpsResult<Operator> {
        self.check_dim(other.dim())?;
        Ok(Self {
            data: &self.data + &other.data,
        })
    }

    /// Multiply every element by `factor`.
    #[must_use]
    pub fn scale(&self, factor: Complex64) -> Operator {
        Self {
            data: self.data.mapv(|z| z * factor),
        }
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn dagger(&self) -> Operator {
        Self {
            data: self.data.t().mapv(|z| z.conj()),
        }
    }

    /// Kronecker product `self ⊗ other`.
    #[must_use]
    pub fn kron(&self, other: &Operator) -> Operator {
        Self {
            data: ndarray::linalg::kron(&self.data, &other.data),
        }
    }

    /// Apply the operator to a state vector.
    pub fn apply(&self, state: &State) -> OpsResult<State> {
        self.check_dim(state.dim())?;
        Ok(State::from_array(self.data.dot(state.as_array())))
    }

    /// Embed a local operator on `targets` into an `n_qubits` register,
    /// acting as the identity on every other qubit.
    ///
    /// `targets[0]` is the most significant qubit of `local`, so embedding a
    /// CNOT matrix with `targets = [c, t]` yields a CNOT controlled on `c`.
    pub fn embed(local: &Operator, targets: &[usize], n_qubits: usize) -> OpsResult<Operator> {
        let k = targets.len();
        if local.dim() != 1 << k {
            return Err(OpsError::DimensionMismatch {
                left: local.dim(),
                right: 1 << k,
            });
        }
        for (i, &q) in targets.iter().enumerate() {
            if q >= n_qubits {
                return Err(OpsError::QubitOutOfRange { qubit: q, n_qubits });
            }
            if targets[..i].contains(&q) {
                return Err(OpsError::DuplicateQubit(q));
            }
        }

        // Bit position of each target inside a full basis index.
        let shifts: Vec<usize> = targets.iter().map(|&q| n_qubits - 1 - q).collect();
        let mask = shifts.iter().fold(0usize, |m, &s| m | (1 << s));
        let spread = |local_index: usize| -> usize {
            shifts.iter().enumerate().fold(0usize, |acc, (bit, &s)| {
                if (local_index >> (k - 1 - bit)) & 1 == 1 {
                    acc | (1 << s)
                } else {
                    acc
                }
            })
        };
        let gather = |index: usize| -> usize {
            shifts
                .iter()
                .fold(0usize, |acc, &s| (acc << 1) | ((index >> s) & 1))
        };

        let dim = 1usize << n_qubits;
        let mut data = Array2::zeros((dim, dim));
        for row in 0..dim {
            let rest = row & !mask;
            let local_row = gather(row);
            for local_col in 0..local.dim() {
                let value = local.data[[local_row, local_col]];
                if value != Complex64::new(0.0, 0.0) {
                    data[[row, rest | spread(local_col)]] = value;
                }
            }
        }
        Ok(Self { data })
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Operator, tol: f64) -> bool {
        self.dim() == other.dim()
            && self
                .data
                .iter()
                .zip(other.data.iter())
                .all(|(a, b)| (a - b).norm() < tol)
    }

    /// True if `self† · self` is the identity.
    pub fn is_unitary(&self) -> bool {
        let product = self.dagger().data.dot(&self.data);
        Self { data: product }.approx_eq(&Self::identity_dim(self.dim()), 1e-9)
    }

    /// True if every element equals the identity's within tolerance.
    pub fn is_identity(&self) -> bool {
        self.approx_eq(&Self::identity_dim(self.dim()), EPSILON)
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

/// Kronecker product of a list of operators, left to right.
///
/// An empty list yields the 1×1 identity.
pub fn tensor(ops: &[Operator]) -> Operator {
    ops.iter()
        .fold(Operator::identity_dim(1), |acc, op| acc.kron(op))
}
