//! Fiat-Shamir transcripts as seen by the verifier widgets.
//!
//! A transcript holds the proof elements and the challenges derived from
//! them. The widgets only read from it, through [`VerifierTranscript`], so
//! the same widget code works against a [`NativeTranscript`] and against a
//! [`CircuitTranscript`] feeding a recursive verification circuit.

use crate::errors::Result;
use crate::plonk::{context::FieldContext, curve::VerifierCurve};
use ark_std::fmt;
use ultra_algebra::prelude::*;

mod circuit;
mod native;

pub use circuit::CircuitTranscript;
pub use native::NativeTranscript;

/// The Fiat-Shamir hash a transcript is built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HashType {
    /// Keccak-256, for transcripts checked by an EVM contract.
    Keccak256,
    /// Pedersen compression followed by Blake3s.
    PedersenBlake3s,
    /// Plookup-friendly Pedersen compression followed by Blake3s.
    PlookupPedersenBlake3s,
}

impl HashType {
    /// A stable tag used for domain separation.
    pub fn tag(&self) -> &'static [u8] {
        match self {
            HashType::Keccak256 => b"keccak256",
            HashType::PedersenBlake3s => b"pedersen_blake3s",
            HashType::PlookupPedersenBlake3s => b"plookup_pedersen_blake3s",
        }
    }
}

impl fmt::Display for HashType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashType::Keccak256 => f.write_str("Keccak256"),
            HashType::PedersenBlake3s => f.write_str("PedersenBlake3s"),
            HashType::PlookupPedersenBlake3s => f.write_str("PlookupPedersenBlake3s"),
        }
    }
}

/// A proof element expected in a round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ManifestEntry {
    /// The element label.
    pub name: String,
    /// The exact serialized length.
    pub num_bytes: usize,
}

/// The elements of one prover round and the challenge derived after it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundManifest {
    /// The elements sent in this round, in order.
    pub elements: Vec<ManifestEntry>,
    /// The challenge label.
    pub challenge: String,
    /// How many challenges are squeezed under that label.
    pub num_challenges: usize,
}

impl RoundManifest {
    fn new(elements: Vec<(&str, usize)>, challenge: &str, num_challenges: usize) -> Self {
        Self {
            elements: elements
                .into_iter()
                .map(|(name, num_bytes)| ManifestEntry {
                    name: name.to_string(),
                    num_bytes,
                })
                .collect(),
            challenge: challenge.to_string(),
            num_challenges,
        }
    }

    /// Return the entry with the given label.
    pub fn entry(&self, name: &str) -> Option<&ManifestEntry> {
        self.elements.iter().find(|e| e.name == name)
    }
}

/// The round structure of a proof.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Manifest {
    /// The rounds, in protocol order.
    pub rounds: Vec<RoundManifest>,
}

/// Evaluations sent in the `nu` round of an Ultra proof.
pub const ULTRA_EVALUATIONS: [&str; 42] = [
    "w_1",
    "w_2",
    "w_3",
    "w_4",
    "w_1_omega",
    "w_2_omega",
    "w_3_omega",
    "w_4_omega",
    "q_1",
    "q_2",
    "q_3",
    "q_4",
    "q_m",
    "q_c",
    "q_arith",
    "q_sort",
    "q_elliptic",
    "q_aux",
    "table_type",
    "sigma_1",
    "sigma_2",
    "sigma_3",
    "sigma_4",
    "id_1",
    "id_2",
    "id_3",
    "id_4",
    "z_perm",
    "z_perm_omega",
    "table_value_1",
    "table_value_2",
    "table_value_3",
    "table_value_4",
    "table_value_1_omega",
    "table_value_2_omega",
    "table_value_3_omega",
    "table_value_4_omega",
    "s",
    "s_omega",
    "z_lookup",
    "z_lookup_omega",
    "t",
];

impl Manifest {
    /// Return the entry with the given label, in whichever round it is sent.
    pub fn entry(&self, name: &str) -> Option<&ManifestEntry> {
        self.rounds.iter().find_map(|round| round.entry(name))
    }

    /// The layout of an Ultra proof over curve `E` with `num_public_inputs` public inputs.
    pub fn ultra<E: VerifierCurve>(num_public_inputs: usize) -> Self {
        let fr = E::ScalarField::bytes_len();
        let g1 = <E::G1 as Group>::COMPRESSED_LEN;
        let evaluations = ULTRA_EVALUATIONS.iter().map(|name| (*name, fr)).collect();
        Self {
            rounds: vec![
                RoundManifest::new(
                    vec![("circuit_size", 4), ("public_input_size", 4)],
                    "init",
                    1,
                ),
                RoundManifest::new(
                    vec![
                        ("public_inputs", fr * num_public_inputs),
                        ("W_1", g1),
                        ("W_2", g1),
                        ("W_3", g1),
                    ],
                    "eta",
                    1,
                ),
                RoundManifest::new(vec![("W_4", g1), ("S", g1)], "beta", 2),
                RoundManifest::new(vec![("Z_PERM", g1), ("Z_LOOKUP", g1)], "alpha", 1),
                RoundManifest::new(
                    vec![("T_1", g1), ("T_2", g1), ("T_3", g1), ("T_4", g1)],
                    "z",
                    1,
                ),
                RoundManifest::new(evaluations, "nu", 1),
                RoundManifest::new(vec![("PI_Z", g1), ("PI_Z_OMEGA", g1)], "separator", 1),
            ],
        }
    }

    /// Return the index of the round whose challenge has the given label.
    pub fn round_of_challenge(&self, challenge: &str) -> Option<usize> {
        self.rounds.iter().position(|r| r.challenge == challenge)
    }
}

/// Read access to a transcript in the evaluation context `C`.
///
/// Native transcripts report malformed or missing proof data as errors;
/// in-circuit transcripts turn it into an unsatisfiable constraint.
pub trait VerifierTranscript<C: FieldContext> {
    /// The Fiat-Shamir hash this transcript was built with.
    fn hash_type(&self) -> HashType;

    /// The number of bytes squeezed per challenge.
    fn num_challenge_bytes(&self) -> usize;

    /// Return the `idx`-th challenge squeezed under `name`.
    fn get_challenge_field_element(&self, cs: &mut C, name: &str, idx: usize) -> Result<C::Fr>;

    /// Return the field element sent under `name`.
    fn get_field_element(&self, cs: &mut C, name: &str) -> Result<C::Fr>;

    /// Return the field elements sent under `name`.
    fn get_field_element_vector(&self, cs: &mut C, name: &str) -> Result<Vec<C::Fr>>;
}

#[cfg(test)]
mod test {
    use super::{HashType, Manifest, ULTRA_EVALUATIONS};
    use crate::plonk::curve::Bn254;
    use ark_std::collections::BTreeSet;

    #[test]
    fn ultra_manifest_layout() {
        let manifest = Manifest::ultra::<Bn254>(3);
        let challenges: Vec<&str> = manifest.rounds.iter().map(|r| r.challenge.as_str()).collect();
        assert_eq!(
            challenges,
            vec!["init", "eta", "beta", "alpha", "z", "nu", "separator"]
        );
        assert_eq!(manifest.rounds[2].num_challenges, 2);
        assert_eq!(manifest.round_of_challenge("alpha"), Some(3));
        assert_eq!(manifest.rounds[1].entry("public_inputs").unwrap().num_bytes, 96);
        assert_eq!(manifest.rounds[1].entry("W_1").unwrap().num_bytes, 32);

        let names: BTreeSet<&str> = ULTRA_EVALUATIONS.iter().copied().collect();
        assert_eq!(names.len(), ULTRA_EVALUATIONS.len());
    }

    #[test]
    fn hash_type_tags_are_distinct() {
        let tags = [
            HashType::Keccak256.tag(),
            HashType::PedersenBlake3s.tag(),
            HashType::PlookupPedersenBlake3s.tag(),
        ];
        assert_ne!(tags[0], tags[1]);
        assert_ne!(tags[1], tags[2]);
        assert_eq!(HashType::PedersenBlake3s.to_string(), "PedersenBlake3s");
    }
}
