//! Matrix exponential via scaling and squaring.
//!
//! `exp(A) = (exp(A / 2^s))^(2^s)`, with `s` chosen so that `‖A / 2^s‖₁ ≤ ½`
//! and the inner exponential summed as a truncated Taylor series. At that
//! norm the series converges to machine precision in well under
//! [`MAX_TAYLOR_TERMS`] terms.

use ndarray::Array2;
use num_complex::Complex64;

use crate::operator::Operator;

/// Upper bound on Taylor terms.
const MAX_TAYLOR_TERMS: usize = 30;

/// Norm the scaled matrix is brought under before summing.
const SCALED_NORM: f64 = 0.5;

impl Operator {
    /// Matrix exponential `exp(self)`.
    #[must_use]
    pub fn expm(&self) -> Operator {
        let a = self.as_array();
        let norm = one_norm(a);
        let squarings = if norm > SCALED_NORM {
            (norm / SCALED_NORM).log2().ceil() as i32
        } else {
            0
        };
        let divisor = Complex64::new(2f64.powi(squarings), 0.0);
        let scaled = a.mapv(|z| z / divisor);

        let dim = self.dim();
        let mut result: Array2<Complex64> = Array2::eye(dim);
        let mut term: Array2<Complex64> = Array2::eye(dim);
        for k in 1..=MAX_TAYLOR_TERMS {
            let inv_k = Complex64::new(1.0 / k as f64, 0.0);
            term = term.dot(&scaled).mapv(|z| z * inv_k);
            result = result + &term;
            if one_norm(&term) < f64::EPSILON * one_norm(&result) {
                break;
            }
        }

        for _ in 0..squarings {
            result = result.dot(&result);
        }

        Operator::from_square(result)
    }
}

/// Maximum absolute column sum.
fn one_norm(a: &Array2<Complex64>) -> f64 {
    a.columns()
        .into_iter()
        .map(|col| col.iter().map(|z| z.norm()).sum::<f64>())
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::{rx_matrix, rz_matrix};
    use crate::pauli::Pauli;

    #[test]
    fn test_expm_of_zero_is_identity() {
        assert!(Operator::zeros(4).expm().is_identity());
    }

    #[test]
    fn test_expm_reproduces_rotations() {
        for theta in [0.1, 1.0, 3.0, 10.0] {
            let gen_x = Pauli::X.matrix().scale(Complex64::new(0.0, -theta / 2.0));
            assert!(gen_x.expm().approx_eq(&rx_matrix(theta), 1e-10), "θ={theta}");
            let gen_z = Pauli::Z.matrix().scale(Complex64::new(0.0, -theta / 2.0));
            assert!(gen_z.expm().approx_eq(&rz_matrix(theta), 1e-10), "θ={theta}");
        }
    }

    #[test]
    fn test_expm_of_diagonal() {
        let d = Operator::diagonal(&[Complex64::new(1.0, 0.0), Complex64::new(-2.0, 0.0)]);
        let e = d.expm();
        assert!((e.get(0, 0).unwrap().re - 1f64.exp()).abs() < 1e-10);
        assert!((e.get(1, 1).unwrap().re - (-2f64).exp()).abs() < 1e-10);
        assert!(e.get(0, 1).unwrap().norm() < 1e-12);
    }
}
