use crate::errors::Result;
use ultra_algebra::prelude::*;

/// Module for the Standard PLONK constraint system.
pub mod standard;

pub use standard::{Gate, StandardCS};

/// Variable index
pub type VarIndex = usize;
/// Constraint index
pub type CsIndex = usize;

/// A list of PLONK gates over a witness vector.
pub trait ConstraintSystem {
    /// The field of the circuit.
    type Field: Scalar;

    /// Wires per gate, output wire included.
    const WIRES_PER_GATE: usize;

    /// Number of gates.
    fn size(&self) -> usize;

    /// Number of allocated variables.
    fn num_vars(&self) -> usize;

    /// Variables exposed as public inputs, in registration order.
    fn public_vars_witness_indices(&self) -> Vec<VarIndex>;

    /// Evaluate gate `cs_index` on `witness`. The result is zero iff the gate holds.
    fn eval_gate(
        &self,
        cs_index: CsIndex,
        witness: &[Self::Field],
        public_input: &Self::Field,
    ) -> Result<Self::Field>;
}
