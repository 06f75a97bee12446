//! A Standard PLONK constraint system: four input wires and one output wire
//! per gate. It carries the arithmetic needed to run the verifier widgets
//! in-circuit.
use super::{ConstraintSystem, CsIndex, VarIndex};
use crate::errors::{PlonkError, Result};
use crate::plonk::context::FieldContext;
use tracing::warn;
use ultra_algebra::prelude::*;

/// The wires number of a gate in Standard CS.
pub const N_WIRES_PER_GATE: usize = 5;

/// One gate:
/// ```text
///     q1*w1 + q2*w2 + q3*w3 + q4*w4 + qm12*w1*w2 + qm34*w3*w4 + qc + PI - qo*wo = 0
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gate<F> {
    /// `w1..w4` then `wo`.
    pub wires: [VarIndex; N_WIRES_PER_GATE],
    /// `q1..q4`.
    pub q_lin: [F; 4],
    /// Selector of `w1*w2`.
    pub q_m12: F,
    /// Selector of `w3*w4`.
    pub q_m34: F,
    /// Constant selector.
    pub q_c: F,
    /// Output selector.
    pub q_o: F,
}

impl<F: Scalar> Gate<F> {
    fn linear(inputs: [VarIndex; 4], output: VarIndex, q_lin: [F; 4], q_c: F) -> Self {
        Self {
            wires: [inputs[0], inputs[1], inputs[2], inputs[3], output],
            q_lin,
            q_m12: F::zero(),
            q_m34: F::zero(),
            q_c,
            q_o: F::one(),
        }
    }

    fn eval(&self, witness: &[F], public_input: &F) -> F {
        let w = self.wires.map(|i| witness[i]);
        let linear = self
            .q_lin
            .iter()
            .zip(w.iter())
            .fold(F::zero(), |acc, (q, v)| acc.add(&q.mul(v)));
        linear
            .add(&self.q_m12.mul(&w[0].mul(&w[1])))
            .add(&self.q_m34.mul(&w[2].mul(&w[3])))
            .add(&self.q_c)
            .add(public_input)
            .sub(&self.q_o.mul(&w[4]))
    }
}

/// Standard PLONK Constraint System.
#[derive(Serialize, Deserialize)]
pub struct StandardCS<F> {
    /// The gates, in insertion order.
    pub gates: Vec<Gate<F>>,
    /// Gate and variable of each public input.
    pub public_inputs: Vec<(CsIndex, VarIndex)>,
    /// the number of variables.
    pub num_vars: usize,
    /// A private witness for the circuit.
    pub witness: Vec<F>,
}

impl<F: Scalar> ConstraintSystem for StandardCS<F> {
    type Field = F;
    const WIRES_PER_GATE: usize = N_WIRES_PER_GATE;

    fn size(&self) -> usize {
        self.gates.len()
    }

    fn num_vars(&self) -> usize {
        self.num_vars
    }

    fn public_vars_witness_indices(&self) -> Vec<VarIndex> {
        self.public_inputs.iter().map(|(_, var)| *var).collect()
    }

    fn eval_gate(&self, cs_index: CsIndex, witness: &[F], public_input: &F) -> Result<F> {
        let gate = self.gates.get(cs_index).ok_or(PlonkError::FuncParamsError)?;
        if gate.wires.iter().any(|&var| var >= witness.len()) {
            return Err(PlonkError::FuncParamsError);
        }
        Ok(gate.eval(witness, public_input))
    }
}

impl<F: Scalar> Default for StandardCS<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Scalar> StandardCS<F> {
    /// An empty circuit whose variables 0 and 1 hold zero and one.
    pub fn new() -> StandardCS<F> {
        StandardCS {
            gates: vec![],
            public_inputs: vec![],
            num_vars: 2,
            witness: vec![F::zero(), F::one()],
        }
    }

    /// 0-index is Zero
    pub fn zero_var(&self) -> VarIndex {
        0
    }

    /// 1-index is One
    pub fn one_var(&self) -> VarIndex {
        1
    }

    /// Add a variable (with actual value `value`) into the constraint system.
    pub fn new_variable(&mut self, value: F) -> VarIndex {
        self.witness.push(value);
        self.num_vars += 1;
        self.num_vars - 1
    }

    fn push_gate(&mut self, gate: Gate<F>) {
        assert!(
            gate.wires.iter().all(|&var| var < self.num_vars),
            "wire index out of bound"
        );
        self.gates.push(gate);
    }

    /// Add a linear combination gate: wo = w1 * q1 + w2 * q2 + w3 * q3 + w4 * q4 + qc.
    pub fn insert_lc_gate(
        &mut self,
        wires_in: &[VarIndex; 4],
        wire_out: VarIndex,
        q: [F; 4],
        qc: F,
    ) {
        self.push_gate(Gate::linear(*wires_in, wire_out, q, qc));
    }

    /// Constrain `out = left + right`.
    pub fn insert_add_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        let (zero, one) = (F::zero(), F::one());
        self.insert_lc_gate(&[left_var, right_var, 0, 0], out_var, [one, one, zero, zero], zero);
    }

    /// Constrain `out = left - right`.
    pub fn insert_sub_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        let (zero, one) = (F::zero(), F::one());
        self.insert_lc_gate(
            &[left_var, right_var, 0, 0],
            out_var,
            [one, one.neg(), zero, zero],
            zero,
        );
    }

    /// Constrain `out = left * right`.
    pub fn insert_mul_gate(&mut self, left_var: VarIndex, right_var: VarIndex, out_var: VarIndex) {
        let mut gate = Gate::linear([left_var, right_var, 0, 0], out_var, [F::zero(); 4], F::zero());
        gate.q_m12 = F::one();
        self.push_gate(gate);
    }

    /// Constrain `var = constant`.
    pub fn insert_constant_gate(&mut self, var: VarIndex, constant: F) {
        self.push_gate(Gate::linear([var; 4], var, [F::zero(); 4], constant));
    }

    /// Create an output variable and insert a linear combination gate.
    pub fn linear_combine(&mut self, wires_in: &[VarIndex; 4], q: [F; 4]) -> VarIndex {
        let value = wires_in
            .iter()
            .zip(q.iter())
            .fold(F::zero(), |acc, (w, q)| acc.add(&self.witness[*w].mul(q)));
        let out = self.new_variable(value);
        self.insert_lc_gate(wires_in, out, q, F::zero());
        out
    }

    /// Create an output variable and insert an addition gate.
    pub fn add(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        let out = self.new_variable(self.witness[left_var].add(&self.witness[right_var]));
        self.insert_add_gate(left_var, right_var, out);
        out
    }

    /// Create an output variable and insert a subtraction gate.
    pub fn sub(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        let out = self.new_variable(self.witness[left_var].sub(&self.witness[right_var]));
        self.insert_sub_gate(left_var, right_var, out);
        out
    }

    /// Create an output variable and insert a multiplication gate.
    pub fn mul(&mut self, left_var: VarIndex, right_var: VarIndex) -> VarIndex {
        let out = self.new_variable(self.witness[left_var].mul(&self.witness[right_var]));
        self.insert_mul_gate(left_var, right_var, out);
        out
    }

    /// Create an output variable holding `var + constant`.
    pub fn add_constant(&mut self, var: VarIndex, constant: &F) -> VarIndex {
        let out = self.new_variable(self.witness[var].add(constant));
        let zero = F::zero();
        self.insert_lc_gate(&[var, 0, 0, 0], out, [F::one(), zero, zero, zero], *constant);
        out
    }

    /// Add a constraint that `left_var` and `right_var` have the same value.
    pub fn equal(&mut self, left_var: VarIndex, right_var: VarIndex) {
        self.insert_sub_gate(left_var, right_var, self.zero_var());
    }

    /// Expose `var` as a public input. Its gate reads `var = PI`.
    pub fn prepare_pi_variable(&mut self, var: VarIndex) {
        self.public_inputs.push((self.gates.len(), var));
        self.insert_constant_gate(var, F::zero());
    }

    /// Return the values of the public input variables, in registration order.
    pub fn public_values(&self) -> Vec<F> {
        self.public_inputs
            .iter()
            .map(|(_, var)| self.witness[*var])
            .collect()
    }

    /// Pad with empty gates up to a power of two.
    pub fn pad(&mut self) {
        let padded = self.gates.len().next_power_of_two();
        self.gates.resize(padded, Gate::default());
    }

    /// Check every gate against `witness`, with `online_vars` as the public inputs.
    pub fn verify_witness(&self, witness: &[F], online_vars: &[F]) -> Result<()> {
        if witness.len() != self.num_vars {
            return Err(PlonkError::Message(format!(
                "witness len = {}, num_vars = {}",
                witness.len(),
                self.num_vars
            )));
        }
        if online_vars.len() != self.public_inputs.len() {
            return Err(PlonkError::Message(
                "wrong number of online variables".to_string(),
            ));
        }

        let mut public_by_gate = vec![F::zero(); self.gates.len()];
        for ((cs_index, var), online) in self.public_inputs.iter().zip(online_vars) {
            if witness[*var] != *online {
                return Err(PlonkError::Message(format!(
                    "cs index {}: online var {:?} does not match witness {:?}",
                    cs_index, online, witness[*var]
                )));
            }
            public_by_gate[*cs_index] = *online;
        }

        for (cs_index, public_input) in public_by_gate.iter().enumerate() {
            if !self.eval_gate(cs_index, witness, public_input)?.is_zero() {
                return Err(PlonkError::Message(format!(
                    "cs index {}: unsatisfied gate {:?}",
                    cs_index, self.gates[cs_index]
                )));
            }
        }
        Ok(())
    }

    /// Extract and clear the entire witness of the circuit. The witness consists of
    /// secret inputs, public inputs, and the values of intermediate variables.
    pub fn get_and_clear_witness(&mut self) -> Vec<F> {
        ark_std::mem::take(&mut self.witness)
    }
}

impl<F: Scalar> FieldContext for StandardCS<F> {
    type Native = F;
    type Fr = VarIndex;

    fn constant(&mut self, c: F) -> VarIndex {
        let var = self.new_variable(c);
        self.insert_constant_gate(var, c);
        var
    }

    fn add(&mut self, a: &VarIndex, b: &VarIndex) -> VarIndex {
        StandardCS::add(self, *a, *b)
    }

    fn sub(&mut self, a: &VarIndex, b: &VarIndex) -> VarIndex {
        StandardCS::sub(self, *a, *b)
    }

    fn mul(&mut self, a: &VarIndex, b: &VarIndex) -> VarIndex {
        StandardCS::mul(self, *a, *b)
    }

    fn add_constant(&mut self, a: &VarIndex, c: &F) -> VarIndex {
        StandardCS::add_constant(self, *a, c)
    }

    fn mul_constant(&mut self, a: &VarIndex, c: &F) -> VarIndex {
        let zero = F::zero();
        self.linear_combine(&[*a, 0, 0, 0], [*c, zero, zero, zero])
    }

    /// Allocates `q` with `q * b = a`. A zero divisor leaves `q = 0`, which only
    /// satisfies the gate when `a` is zero too.
    fn div(&mut self, a: &VarIndex, b: &VarIndex) -> Result<VarIndex> {
        let q_value = match self.witness[*b].inv() {
            Ok(b_inv) => self.witness[*a].mul(&b_inv),
            Err(_) => {
                warn!(divisor = *b, "in-circuit division by a zero-valued variable");
                F::zero()
            }
        };
        let q = self.new_variable(q_value);
        self.insert_mul_gate(q, *b, *a);
        Ok(q)
    }

    fn value(&self, a: &VarIndex) -> F {
        self.witness[*a]
    }

    fn enforce_equal(&mut self, a: &VarIndex, b: &VarIndex) {
        self.equal(*a, *b)
    }
}
