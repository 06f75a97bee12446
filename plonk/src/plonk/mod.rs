//! The Ultra verifier settings: widgets, their alpha-power bookkeeping and
//! the two recursive verifier profiles.

/// Module for the evaluation contexts.
pub mod context;

/// Module for the constraint system.
pub mod constraint_system;

/// Module for the verifier curves.
pub mod curve;

/// Module for help functions.
pub mod helpers;

/// Module for the verification key.
pub mod key;

/// Module for the base settings.
pub mod settings;

/// Module for transcript.
pub mod transcript;

/// Module for the constraint widgets.
pub mod widgets;

/// Module for verifier profiles.
pub mod verifier;

#[cfg(test)]
pub(crate) mod test_utils;
