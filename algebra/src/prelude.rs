pub use crate::errors::AlgebraError;
pub use crate::rand_helper::test_rng;
pub use crate::serialization::*;
pub use crate::traits::{Domain, Group, Scalar};
pub use crate::utils::*;
pub use ark_std::{
    fmt::{Debug, Formatter},
    iter::Sum,
    ops::*,
    rand::{CryptoRng, Rng, RngCore, SeedableRng},
    string::String,
    vec,
    vec::Vec,
    One, UniformRand, Zero,
};

pub(crate) type Result<T> = core::result::Result<T, AlgebraError>;
