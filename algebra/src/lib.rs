#![allow(clippy::upper_case_acronyms)]
#![deny(missing_docs)]
//! Scalar field and group abstractions used by the Ultra verifier.

/// Module for serde glue.
#[macro_use]
pub mod serialization;

/// Module for the BN254 scalar field and G1 group.
pub mod bn254;

/// Module for errors.
pub mod errors;

/// Module for the prelude.
pub mod prelude;

/// Module for the test random number generator.
pub mod rand_helper;

/// Module for the field and group traits.
pub mod traits;

/// Module for byte and encoding utilities.
pub mod utils;
