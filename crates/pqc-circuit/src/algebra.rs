//! Uniform arithmetic over gates and raw operators.
//!
//! Circuit code multiplies gates by gates, gates by operators and operators by
//! states. Every operand is reduced to its current [`Operator`] through
//! [`AsOperator`] before the product or sum is taken, so none of those call
//! sites need to know which kind of operand they hold.

use pqc_ops::{Operator, State};

use crate::error::PqcResult;
use crate::gate::Gate;

/// Anything that can be viewed as a dense operator.
pub trait AsOperator {
    /// The operator as it stands now.
    fn as_operator(&self) -> &Operator;
}

impl AsOperator for Operator {
    fn as_operator(&self) -> &Operator {
        self
    }
}

impl AsOperator for Gate {
    fn as_operator(&self) -> &Operator {
        self.operation()
    }
}

/// Operator product `a · b`.
pub fn compose<A, B>(a: &A, b: &B) -> PqcResult<Operator>
where
    A: AsOperator + ?Sized,
    B: AsOperator + ?Sized,
{
    Ok(a.as_operator().matmul(b.as_operator())?)
}

/// Operator sum `a + b`.
pub fn sum<A, B>(a: &A, b: &B) -> PqcResult<Operator>
where
    A: AsOperator + ?Sized,
    B: AsOperator + ?Sized,
{
    Ok(a.as_operator().add(b.as_operator())?)
}

/// Apply `a` to a state.
pub fn apply<A: AsOperator + ?Sized>(a: &A, state: &State) -> PqcResult<State> {
    Ok(a.as_operator().apply(state)?)
}

/// Product of `ops` taken in reverse list order: `ops[k-1] · … · ops[0]`.
///
/// `ops[0]` is therefore the first factor to act on a state. An empty list
/// gives the identity on `n_qubits` qubits.
pub fn reverse_product<G: AsOperator>(ops: &[G], n_qubits: usize) -> PqcResult<Operator> {
    ops.iter()
        .rev()
        .try_fold(Operator::identity(n_qubits), |acc, op| compose(&acc, op))
}
