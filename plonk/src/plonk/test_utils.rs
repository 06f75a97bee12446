//! Keys, transcripts and proofs for tests.

use crate::errors::{PlonkError, Result};
use crate::plonk::{
    constraint_system::{StandardCS, VarIndex},
    context::NativeContext,
    curve::Bn254,
    key::VerificationKey,
    settings::NUM_CHALLENGE_BYTES,
    transcript::{HashType, Manifest, NativeTranscript, VerifierTranscript, ULTRA_EVALUATIONS},
    verifier::VerifierProfile,
};
use ark_std::collections::BTreeMap;
use ultra_algebra::{
    bn254::{BN254Scalar, BN254G1},
    prelude::*,
};

pub(crate) type F = BN254Scalar;

/// Labels of the preprocessed commitments.
pub(crate) const KEY_COMMITMENTS: [&str; 23] = [
    "Q_1",
    "Q_2",
    "Q_3",
    "Q_4",
    "Q_M",
    "Q_C",
    "Q_ARITH",
    "Q_SORT",
    "Q_ELLIPTIC",
    "Q_AUX",
    "SIGMA_1",
    "SIGMA_2",
    "SIGMA_3",
    "SIGMA_4",
    "ID_1",
    "ID_2",
    "ID_3",
    "ID_4",
    "TABLE_1",
    "TABLE_2",
    "TABLE_3",
    "TABLE_4",
    "TABLE_TYPE",
];

/// Labels of the commitments a proof carries.
pub(crate) const PROOF_COMMITMENTS: [&str; 13] = [
    "W_1",
    "W_2",
    "W_3",
    "W_4",
    "S",
    "Z_PERM",
    "Z_LOOKUP",
    "T_1",
    "T_2",
    "T_3",
    "T_4",
    "PI_Z",
    "PI_Z_OMEGA",
];

/// A key with random commitments.
pub(crate) fn test_key<R: CryptoRng + RngCore>(
    prng: &mut R,
    circuit_size: usize,
    num_public_inputs: usize,
) -> VerificationKey<Bn254> {
    let commitments = KEY_COMMITMENTS
        .iter()
        .map(|label| (label.to_string(), BN254G1::random(prng)))
        .collect();
    VerificationKey::new(circuit_size, num_public_inputs, commitments).unwrap()
}

/// A transcript that hands out preset values, without Fiat-Shamir.
pub(crate) struct MapTranscript {
    pub(crate) hash_type: HashType,
    pub(crate) num_challenge_bytes: usize,
    challenges: BTreeMap<(String, usize), F>,
    elements: BTreeMap<String, F>,
    vectors: BTreeMap<String, Vec<F>>,
}

impl MapTranscript {
    /// Random challenges, evaluations and public inputs.
    pub(crate) fn random<R: CryptoRng + RngCore>(prng: &mut R, num_public_inputs: usize) -> Self {
        let mut challenges = BTreeMap::new();
        for (name, idx) in [("eta", 0), ("beta", 0), ("beta", 1), ("alpha", 0), ("z", 0)] {
            challenges.insert((name.to_string(), idx), F::random(prng));
        }
        let elements = ULTRA_EVALUATIONS
            .iter()
            .map(|name| (name.to_string(), F::random(prng)))
            .collect();
        let mut vectors = BTreeMap::new();
        vectors.insert(
            "public_inputs".to_string(),
            (0..num_public_inputs).map(|_| F::random(prng)).collect(),
        );
        Self {
            hash_type: HashType::PedersenBlake3s,
            num_challenge_bytes: NUM_CHALLENGE_BYTES,
            challenges,
            elements,
            vectors,
        }
    }

    pub(crate) fn set(&mut self, name: &str, value: F) {
        self.elements.insert(name.to_string(), value);
    }

    pub(crate) fn remove(&mut self, name: &str) {
        self.elements.remove(name);
    }

    pub(crate) fn element(&self, name: &str) -> F {
        self.elements[name]
    }

    pub(crate) fn challenge(&self, name: &str, idx: usize) -> F {
        self.challenges[&(name.to_string(), idx)]
    }

    pub(crate) fn public_inputs(&self) -> Vec<F> {
        self.vectors["public_inputs"].clone()
    }

    fn lookup_challenge(&self, name: &str, idx: usize) -> Result<F> {
        self.challenges
            .get(&(name.to_string(), idx))
            .copied()
            .ok_or_else(|| PlonkError::MissingChallenge(name.to_string(), idx))
    }

    fn lookup_element(&self, name: &str) -> Result<F> {
        self.elements
            .get(name)
            .copied()
            .ok_or_else(|| PlonkError::MissingTranscriptElement(name.to_string()))
    }

    fn lookup_vector(&self, name: &str) -> Result<Vec<F>> {
        self.vectors
            .get(name)
            .cloned()
            .ok_or_else(|| PlonkError::MissingTranscriptElement(name.to_string()))
    }
}

impl VerifierTranscript<NativeContext<F>> for MapTranscript {
    fn hash_type(&self) -> HashType {
        self.hash_type
    }

    fn num_challenge_bytes(&self) -> usize {
        self.num_challenge_bytes
    }

    fn get_challenge_field_element(
        &self,
        _cs: &mut NativeContext<F>,
        name: &str,
        idx: usize,
    ) -> Result<F> {
        self.lookup_challenge(name, idx)
    }

    fn get_field_element(&self, _cs: &mut NativeContext<F>, name: &str) -> Result<F> {
        self.lookup_element(name)
    }

    fn get_field_element_vector(&self, _cs: &mut NativeContext<F>, name: &str) -> Result<Vec<F>> {
        self.lookup_vector(name)
    }
}

impl VerifierTranscript<StandardCS<F>> for MapTranscript {
    fn hash_type(&self) -> HashType {
        self.hash_type
    }

    fn num_challenge_bytes(&self) -> usize {
        self.num_challenge_bytes
    }

    fn get_challenge_field_element(
        &self,
        cs: &mut StandardCS<F>,
        name: &str,
        idx: usize,
    ) -> Result<VarIndex> {
        Ok(cs.new_variable(self.lookup_challenge(name, idx)?))
    }

    fn get_field_element(&self, cs: &mut StandardCS<F>, name: &str) -> Result<VarIndex> {
        Ok(cs.new_variable(self.lookup_element(name)?))
    }

    fn get_field_element_vector(&self, cs: &mut StandardCS<F>, name: &str) -> Result<Vec<VarIndex>> {
        Ok(self
            .lookup_vector(name)?
            .into_iter()
            .map(|v| cs.new_variable(v))
            .collect())
    }
}

/// The prover messages of an Ultra proof.
#[derive(Clone, Debug)]
pub(crate) struct ProofData {
    pub(crate) circuit_size: usize,
    pub(crate) public_inputs: Vec<F>,
    pub(crate) commitments: BTreeMap<&'static str, BN254G1>,
    pub(crate) evaluations: BTreeMap<&'static str, F>,
}

impl ProofData {
    /// Random messages, without the quotient evaluation `t`.
    pub(crate) fn random<R: CryptoRng + RngCore>(
        prng: &mut R,
        circuit_size: usize,
        num_public_inputs: usize,
    ) -> Self {
        Self {
            circuit_size,
            public_inputs: (0..num_public_inputs).map(|_| F::random(prng)).collect(),
            commitments: PROOF_COMMITMENTS
                .iter()
                .map(|label| (*label, BN254G1::random(prng)))
                .collect(),
            evaluations: ULTRA_EVALUATIONS
                .iter()
                .filter(|name| **name != "t")
                .map(|name| (*name, F::random(prng)))
                .collect(),
        }
    }

    /// Random messages whose `t` satisfies the quotient identity under `profile`.
    pub(crate) fn honest<R: CryptoRng + RngCore>(
        prng: &mut R,
        profile: &VerifierProfile,
        key: &VerificationKey<Bn254>,
    ) -> Self {
        let mut data = Self::random(prng, key.circuit_size, key.num_public_inputs);
        let transcript = data.transcript(profile.hash_type());
        let mut cs = NativeContext::<F>::new();
        let mut quotient = F::zero();
        profile
            .compute_quotient_evaluation_contribution(
                &mut cs,
                key,
                F::one(),
                &transcript,
                &mut quotient,
            )
            .unwrap();
        let z = transcript.challenge("z", 0).unwrap();
        let vanishing_poly = z.pow(&[key.circuit_size as u64]).sub(&F::one());
        data.evaluations
            .insert("t", quotient.mul(&vanishing_poly.inv().unwrap()));
        data
    }

    /// Replay the messages into a transcript. Without `t` the transcript
    /// stops after the `z` challenge.
    pub(crate) fn transcript(&self, hash_type: HashType) -> NativeTranscript<F> {
        let manifest = Manifest::ultra::<Bn254>(self.public_inputs.len());
        let mut t = NativeTranscript::new(manifest, hash_type, NUM_CHALLENGE_BYTES).unwrap();
        t.add_element("circuit_size", (self.circuit_size as u32).to_be_bytes().to_vec())
            .unwrap();
        t.add_element(
            "public_input_size",
            (self.public_inputs.len() as u32).to_be_bytes().to_vec(),
        )
        .unwrap();
        t.apply_fiat_shamir("init").unwrap();

        t.add_field_element_vector("public_inputs", &self.public_inputs)
            .unwrap();
        let rounds: [(&[&str], &str); 4] = [
            (&["W_1", "W_2", "W_3"], "eta"),
            (&["W_4", "S"], "beta"),
            (&["Z_PERM", "Z_LOOKUP"], "alpha"),
            (&["T_1", "T_2", "T_3", "T_4"], "z"),
        ];
        for (labels, challenge) in rounds {
            for label in labels {
                t.add_commitment(label, &self.commitments[*label]).unwrap();
            }
            t.apply_fiat_shamir(challenge).unwrap();
        }

        for (name, value) in &self.evaluations {
            t.add_field_element(name, value).unwrap();
        }
        if self.evaluations.contains_key("t") {
            t.apply_fiat_shamir("nu").unwrap();
            for label in ["PI_Z", "PI_Z_OMEGA"] {
                t.add_commitment(label, &self.commitments[label]).unwrap();
            }
            t.apply_fiat_shamir("separator").unwrap();
        }
        t
    }
}
