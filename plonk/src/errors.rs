use crate::plonk::transcript::HashType;
use thiserror::Error;
use ultra_algebra::prelude::AlgebraError;

pub(crate) type Result<T> = core::result::Result<T, PlonkError>;

#[derive(Error, Debug, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum PlonkError {
    #[error("Algebra: {0}")]
    Algebra(#[from] AlgebraError),
    #[error("transcript has no element named {0}")]
    MissingTranscriptElement(String),
    #[error("transcript has no challenge {0}[{1}]")]
    MissingChallenge(String, usize),
    #[error("profile requires a {expected} transcript, found {found}")]
    HashTypeMismatch { expected: HashType, found: HashType },
    #[error("profile requires {expected} challenge bytes, transcript squeezes {found}")]
    ChallengeBytesMismatch { expected: usize, found: usize },
    #[error("transcript manifest violation: {0}")]
    ManifestViolation(String),
    #[error("key expects {expected} public inputs, transcript has {found}")]
    PublicInputCountMismatch { expected: usize, found: usize },
    #[error("scalar label {0} inserted twice")]
    DuplicateScalarLabel(String),
    #[error("Division by zero.")]
    DivisionByZero,
    #[error("Function params error")]
    FuncParamsError,
    #[error("Verification error.")]
    VerificationError,
    #[error("{0}")]
    Message(String),
}
