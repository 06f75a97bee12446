use super::{HashType, Manifest, VerifierTranscript};
use crate::errors::{PlonkError, Result};
use crate::plonk::context::NativeContext;
use ark_std::{collections::BTreeMap, marker::PhantomData};
use merlin::Transcript;
use ultra_algebra::prelude::*;

/// A merlin-backed transcript that enforces a [`Manifest`].
///
/// Elements must be added in the round the manifest places them in, and a
/// challenge can only be squeezed once its round is complete. Each challenge
/// is `num_challenge_bytes` squeezed bytes read as a little-endian integer.
pub struct NativeTranscript<F> {
    manifest: Manifest,
    hash_type: HashType,
    num_challenge_bytes: usize,
    transcript: Transcript,
    current_round: usize,
    elements: BTreeMap<String, Vec<u8>>,
    challenges: BTreeMap<String, Vec<Vec<u8>>>,
    _field: PhantomData<F>,
}

impl<F: Scalar> NativeTranscript<F> {
    /// Create an empty transcript, domain-separated by the hash type.
    pub fn new(manifest: Manifest, hash_type: HashType, num_challenge_bytes: usize) -> Result<Self> {
        if num_challenge_bytes == 0 || num_challenge_bytes > F::bytes_len() {
            return Err(PlonkError::FuncParamsError);
        }
        let mut transcript = Transcript::new(b"Ultra PLONK");
        transcript.append_message(b"hash type", hash_type.tag());
        transcript.append_u64(b"challenge bytes", num_challenge_bytes as u64);
        Ok(Self {
            manifest,
            hash_type,
            num_challenge_bytes,
            transcript,
            current_round: 0,
            elements: BTreeMap::new(),
            challenges: BTreeMap::new(),
            _field: PhantomData,
        })
    }

    /// Return the manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Return the Fiat-Shamir hash this transcript was built with.
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    /// Return the number of bytes squeezed per challenge.
    pub fn num_challenge_bytes(&self) -> usize {
        self.num_challenge_bytes
    }

    /// Add a serialized element to the current round.
    pub fn add_element(&mut self, name: &str, bytes: Vec<u8>) -> Result<()> {
        let round = self
            .manifest
            .rounds
            .get(self.current_round)
            .ok_or_else(|| PlonkError::ManifestViolation(format!("{}: all rounds closed", name)))?;
        let entry = round.entry(name).ok_or_else(|| {
            PlonkError::ManifestViolation(format!(
                "{} is not part of the {} round",
                name, round.challenge
            ))
        })?;
        if entry.num_bytes != bytes.len() {
            return Err(PlonkError::ManifestViolation(format!(
                "{} has {} bytes, expected {}",
                name,
                bytes.len(),
                entry.num_bytes
            )));
        }
        if self.elements.contains_key(name) {
            return Err(PlonkError::ManifestViolation(format!("{} added twice", name)));
        }
        self.transcript.append_message(b"element", name.as_bytes());
        self.transcript.append_message(b"value", &bytes);
        self.elements.insert(name.to_string(), bytes);
        Ok(())
    }

    /// Add a field element to the current round.
    pub fn add_field_element(&mut self, name: &str, value: &F) -> Result<()> {
        self.add_element(name, value.to_bytes())
    }

    /// Add a vector of field elements to the current round.
    pub fn add_field_element_vector(&mut self, name: &str, values: &[F]) -> Result<()> {
        let bytes = values.iter().flat_map(|v| v.to_bytes()).collect();
        self.add_element(name, bytes)
    }

    /// Add a commitment to the current round.
    pub fn add_commitment<G: Group>(&mut self, name: &str, value: &G) -> Result<()> {
        self.add_element(name, value.to_compressed_bytes())
    }

    /// Close the current round and squeeze its challenges.
    pub fn apply_fiat_shamir(&mut self, challenge: &str) -> Result<()> {
        let round = self.manifest.rounds.get(self.current_round).ok_or_else(|| {
            PlonkError::ManifestViolation(format!("{}: all rounds closed", challenge))
        })?;
        if round.challenge != challenge {
            return Err(PlonkError::ManifestViolation(format!(
                "expected challenge {}, got {}",
                round.challenge, challenge
            )));
        }
        if let Some(missing) = round
            .elements
            .iter()
            .find(|e| !self.elements.contains_key(&e.name))
        {
            return Err(PlonkError::MissingTranscriptElement(missing.name.clone()));
        }

        let mut values = Vec::with_capacity(round.num_challenges);
        for idx in 0..round.num_challenges {
            self.transcript.append_message(b"challenge", challenge.as_bytes());
            self.transcript.append_u64(b"index", idx as u64);
            let mut buf = vec![0u8; self.num_challenge_bytes];
            self.transcript.challenge_bytes(b"squeeze", &mut buf);
            values.push(buf);
        }
        self.challenges.insert(challenge.to_string(), values);
        self.current_round += 1;
        Ok(())
    }

    /// Return the serialized element sent under `name`.
    pub fn get_element(&self, name: &str) -> Result<&[u8]> {
        self.elements
            .get(name)
            .map(|v| v.as_slice())
            .ok_or_else(|| PlonkError::MissingTranscriptElement(name.to_string()))
    }

    /// Return the `idx`-th challenge squeezed under `name`.
    pub fn challenge(&self, name: &str, idx: usize) -> Result<F> {
        let bytes = self
            .challenges
            .get(name)
            .and_then(|c| c.get(idx))
            .ok_or_else(|| PlonkError::MissingChallenge(name.to_string(), idx))?;
        Ok(F::from_bytes(bytes)?)
    }

    /// Return the field element sent under `name`.
    pub fn field_element(&self, name: &str) -> Result<F> {
        let bytes = self.get_element(name)?;
        if bytes.len() != F::bytes_len() {
            return Err(PlonkError::ManifestViolation(format!(
                "{} is not a field element",
                name
            )));
        }
        Ok(F::from_bytes(bytes)?)
    }

    /// Return the field elements sent under `name`.
    pub fn field_element_vector(&self, name: &str) -> Result<Vec<F>> {
        let bytes = self.get_element(name)?;
        if bytes.len() % F::bytes_len() != 0 {
            return Err(PlonkError::ManifestViolation(format!(
                "{} is not a vector of field elements",
                name
            )));
        }
        bytes
            .chunks(F::bytes_len())
            .map(|chunk| F::from_bytes(chunk).map_err(PlonkError::from))
            .collect()
    }

    /// Return the group element sent under `name`.
    pub fn group_element<G: Group>(&self, name: &str) -> Result<G> {
        Ok(G::from_compressed_bytes(self.get_element(name)?)?)
    }
}

impl<F: Scalar> VerifierTranscript<NativeContext<F>> for NativeTranscript<F> {
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
        self.challenge(name, idx)
    }

    fn get_field_element(&self, _cs: &mut NativeContext<F>, name: &str) -> Result<F> {
        self.field_element(name)
    }

    fn get_field_element_vector(&self, _cs: &mut NativeContext<F>, name: &str) -> Result<Vec<F>> {
        self.field_element_vector(name)
    }
}
