#![allow(clippy::needless_borrow)]
#![allow(clippy::upper_case_acronyms)]
//! Widget composition and alpha-power bookkeeping for Ultra PLONK verifiers,
//! usable natively or inside a recursive verification circuit.

#[macro_use]
extern crate serde_derive;

pub mod errors;
pub mod plonk;
