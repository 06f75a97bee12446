use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq)]
#[allow(missing_docs)]
pub enum AlgebraError {
    #[error("Could not decompress group element")]
    DecompressElementError,
    #[error("Could not deserialize object")]
    DeserializationError,
    #[error("Could not serialize object")]
    SerializationError,
    #[error("Unexpected parameter for method or function")]
    ParameterError,
    #[error("Field element not invertible")]
    GroupInversionError,
}
