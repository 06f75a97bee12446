use crate::errors::{PlonkError, Result};
use crate::plonk::transcript::HashType;

/// The number of bytes squeezed from the transcript per challenge.
pub const NUM_CHALLENGE_BYTES: usize = 16;

/// Proving-system parameters a widget is built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BaseSettings {
    /// A short name for logs.
    pub name: &'static str,
    /// The number of wires per gate.
    pub program_width: usize,
    /// The number of bytes squeezed from the transcript per challenge.
    pub num_challenge_bytes: usize,
    /// The Fiat-Shamir scheme the native Ultra prover uses with these settings.
    pub hash_type: HashType,
    /// The number of roots of unity at the end of the domain excluded from
    /// the vanishing polynomial. The last constrained row is
    /// `n - num_roots_cut_out_of_vanishing_polynomial`.
    pub num_roots_cut_out_of_vanishing_polynomial: usize,
}

impl BaseSettings {
    /// Check that a transcript squeezes challenges of the expected width.
    pub fn check_challenge_bytes(&self, found: usize) -> Result<()> {
        if found != self.num_challenge_bytes {
            return Err(PlonkError::ChallengeBytesMismatch {
                expected: self.num_challenge_bytes,
                found,
            });
        }
        Ok(())
    }
}

/// Settings of the native Ultra prover.
pub const ULTRA_SETTINGS: BaseSettings = BaseSettings {
    name: "ultra",
    program_width: 4,
    num_challenge_bytes: NUM_CHALLENGE_BYTES,
    hash_type: HashType::PlookupPedersenBlake3s,
    num_roots_cut_out_of_vanishing_polynomial: 4,
};

/// Settings of an Ultra prover whose proofs are verified by a Standard circuit.
pub const ULTRA_TO_STANDARD_SETTINGS: BaseSettings = BaseSettings {
    name: "ultra_to_standard",
    hash_type: HashType::PedersenBlake3s,
    ..ULTRA_SETTINGS
};

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn presets_differ_only_in_hash() {
        assert_eq!(ULTRA_SETTINGS.program_width, 4);
        assert_eq!(ULTRA_TO_STANDARD_SETTINGS.num_challenge_bytes, 16);
        assert_ne!(ULTRA_SETTINGS.hash_type, ULTRA_TO_STANDARD_SETTINGS.hash_type);
        assert_eq!(
            BaseSettings {
                name: ULTRA_SETTINGS.name,
                hash_type: ULTRA_SETTINGS.hash_type,
                ..ULTRA_TO_STANDARD_SETTINGS
            },
            ULTRA_SETTINGS
        );
    }

    #[test]
    fn challenge_width_check() {
        assert!(ULTRA_SETTINGS.check_challenge_bytes(16).is_ok());
        assert_eq!(
            ULTRA_SETTINGS.check_challenge_bytes(32),
            Err(PlonkError::ChallengeBytesMismatch {
                expected: 16,
                found: 32
            })
        );
    }
}
