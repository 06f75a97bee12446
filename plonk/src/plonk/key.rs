use crate::errors::{PlonkError, Result};
use crate::plonk::{curve::VerifierCurve, settings::ULTRA_SETTINGS};
use ark_std::collections::BTreeMap;
use ultra_algebra::prelude::*;

/// The smallest circuit the Ultra widgets support: the lookup and permutation
/// boundaries both need rows cut out of the vanishing polynomial.
pub const MIN_CIRCUIT_SIZE: usize = 8;

/// The preprocessed data the verifier widgets read: domain parameters and
/// commitments to the selector, permutation and table polynomials.
///
/// Deserialization goes through [`VerificationKey::new`], and the stored
/// domain parameters must match the ones it derives.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(bound = "", try_from = "KeyData<E>")]
pub struct VerificationKey<E: VerifierCurve> {
    /// The size of the evaluation domain.
    pub circuit_size: usize,
    /// `log2(circuit_size)`.
    pub log_circuit_size: u32,
    /// The number of public inputs.
    pub num_public_inputs: usize,
    /// A primitive `circuit_size`-th root of unity.
    pub domain_root: E::ScalarField,
    /// The coset generators `k_1 = 1, k_i = g^(i-1)` separating the wires in
    /// the permutation argument.
    pub coset_generators: Vec<E::ScalarField>,
    /// The generator `g^width` used for public inputs in the permutation argument.
    pub external_coset_generator: E::ScalarField,
    /// Commitments by label, e.g. `Q_1`, `SIGMA_4`, `TABLE_1`.
    pub commitments: BTreeMap<String, E::G1>,
}

/// The serialized form of a key, checked before it becomes one.
#[derive(Deserialize)]
#[serde(bound = "")]
struct KeyData<E: VerifierCurve> {
    circuit_size: usize,
    log_circuit_size: u32,
    num_public_inputs: usize,
    domain_root: E::ScalarField,
    coset_generators: Vec<E::ScalarField>,
    external_coset_generator: E::ScalarField,
    commitments: BTreeMap<String, E::G1>,
}

impl<E: VerifierCurve> TryFrom<KeyData<E>> for VerificationKey<E> {
    type Error = PlonkError;

    fn try_from(data: KeyData<E>) -> Result<Self> {
        let key = Self::new(data.circuit_size, data.num_public_inputs, data.commitments)?;
        if key.log_circuit_size != data.log_circuit_size
            || key.domain_root != data.domain_root
            || key.coset_generators != data.coset_generators
            || key.external_coset_generator != data.external_coset_generator
        {
            return Err(PlonkError::FuncParamsError);
        }
        Ok(key)
    }
}

impl<E: VerifierCurve> VerificationKey<E> {
    /// Build a key for a domain of `circuit_size` rows, deriving the root of
    /// unity and the coset generators.
    pub fn new(
        circuit_size: usize,
        num_public_inputs: usize,
        commitments: BTreeMap<String, E::G1>,
    ) -> Result<Self> {
        if !circuit_size.is_power_of_two() || circuit_size < MIN_CIRCUIT_SIZE {
            return Err(PlonkError::FuncParamsError);
        }
        let domain_root = E::ScalarField::get_root_of_unity(circuit_size as u64)
            .ok_or(PlonkError::FuncParamsError)?;

        let width = ULTRA_SETTINGS.program_width;
        let g = E::ScalarField::multiplicative_generator();
        let mut coset_generators = Vec::with_capacity(width);
        let mut k = E::ScalarField::one();
        for _ in 0..width {
            coset_generators.push(k);
            k.mul_assign(&g);
        }

        Ok(Self {
            circuit_size,
            log_circuit_size: circuit_size.trailing_zeros(),
            num_public_inputs,
            domain_root,
            coset_generators,
            external_coset_generator: k,
            commitments,
        })
    }

    /// Return the commitment with the given label.
    pub fn commitment(&self, label: &str) -> Option<&E::G1> {
        self.commitments.get(label)
    }

    /// Return `domain_root^exp`.
    pub fn root_pow(&self, exp: u64) -> E::ScalarField {
        self.domain_root.pow(&[exp])
    }
}
