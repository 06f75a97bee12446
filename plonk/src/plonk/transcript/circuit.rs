use super::{HashType, NativeTranscript, VerifierTranscript};
use crate::errors::Result;
use crate::plonk::constraint_system::{StandardCS, VarIndex};
use ark_std::{cell::RefCell, collections::BTreeMap};
use tracing::warn;
use ultra_algebra::prelude::*;

/// Exposes a native transcript to a recursive verification circuit.
///
/// Every element and challenge becomes a witness variable the first time a
/// widget asks for it and is reused afterwards, so both verifier passes see
/// the same variables. Data the native transcript lacks is replaced by a
/// variable pinned to a constant it does not hold, which leaves the circuit
/// unsatisfiable instead of aborting the build. A missing vector gets as many
/// pinned variables as the manifest says it has.
pub struct CircuitTranscript<'a, F> {
    native: &'a NativeTranscript<F>,
    vars: RefCell<BTreeMap<String, Vec<VarIndex>>>,
}

impl<'a, F: Scalar> CircuitTranscript<'a, F> {
    /// Wrap a native transcript.
    pub fn new(native: &'a NativeTranscript<F>) -> Self {
        Self {
            native,
            vars: RefCell::new(BTreeMap::new()),
        }
    }

    /// Return the wrapped transcript.
    pub fn native(&self) -> &NativeTranscript<F> {
        self.native
    }

    fn unsatisfiable(cs: &mut StandardCS<F>, key: &str) -> VarIndex {
        warn!(element = key, "transcript data missing, pinning to an unsatisfiable constraint");
        let var = cs.new_variable(F::zero());
        cs.insert_constant_gate(var, F::one());
        var
    }

    /// Return the cached variables under `key`, allocating them from `values`
    /// on first use. Missing values become `missing_len` pinned variables.
    fn lookup(
        &self,
        cs: &mut StandardCS<F>,
        key: String,
        values: Result<Vec<F>>,
        missing_len: usize,
    ) -> Vec<VarIndex> {
        if let Some(vars) = self.vars.borrow().get(&key) {
            return vars.clone();
        }
        let vars = match values {
            Ok(values) => values.into_iter().map(|v| cs.new_variable(v)).collect(),
            Err(_) if missing_len == 0 => {
                Self::unsatisfiable(cs, &key);
                vec![]
            }
            Err(_) => (0..missing_len)
                .map(|_| Self::unsatisfiable(cs, &key))
                .collect(),
        };
        self.vars.borrow_mut().insert(key, vars.clone());
        vars
    }
}

impl<'a, F: Scalar> VerifierTranscript<StandardCS<F>> for CircuitTranscript<'a, F> {
    fn hash_type(&self) -> HashType {
        self.native.hash_type()
    }

    fn num_challenge_bytes(&self) -> usize {
        self.native.num_challenge_bytes()
    }

    fn get_challenge_field_element(
        &self,
        cs: &mut StandardCS<F>,
        name: &str,
        idx: usize,
    ) -> Result<VarIndex> {
        let key = format!("challenge:{}[{}]", name, idx);
        let vars = self.lookup(cs, key, self.native.challenge(name, idx).map(|c| vec![c]), 1);
        Ok(vars[0])
    }

    fn get_field_element(&self, cs: &mut StandardCS<F>, name: &str) -> Result<VarIndex> {
        let key = format!("element:{}", name);
        let vars = self.lookup(cs, key, self.native.field_element(name).map(|e| vec![e]), 1);
        Ok(vars[0])
    }

    fn get_field_element_vector(
        &self,
        cs: &mut StandardCS<F>,
        name: &str,
    ) -> Result<Vec<VarIndex>> {
        let key = format!("vector:{}", name);
        let missing_len = self
            .native
            .manifest()
            .entry(name)
            .map_or(1, |entry| entry.num_bytes / F::bytes_len());
        Ok(self.lookup(cs, key, self.native.field_element_vector(name), missing_len))
    }
}
