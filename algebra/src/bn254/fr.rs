use crate::bn254::BN254_SCALAR_LEN;
use crate::prelude::*;
use ark_bn254::Fr;
use ark_ff::{BigInteger, FftField, Field, PrimeField};
use ark_std::fmt::Display;

/// An element of the BN254 scalar field, the field every verifier
/// computation runs over.
#[derive(Copy, Clone, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct BN254Scalar(pub(crate) Fr);

impl Debug for BN254Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl_wrapped_ops!(BN254Scalar, BN254Scalar, Add add AddAssign add_assign);
impl_wrapped_ops!(BN254Scalar, BN254Scalar, Sub sub SubAssign sub_assign);
impl_wrapped_ops!(BN254Scalar, BN254Scalar, Mul mul MulAssign mul_assign);

impl Neg for BN254Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Zero for BN254Scalar {
    fn zero() -> Self {
        Self(Fr::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0 == Fr::ZERO
    }
}

impl One for BN254Scalar {
    fn one() -> Self {
        Self(Fr::ONE)
    }
}

impl From<u32> for BN254Scalar {
    fn from(value: u32) -> Self {
        Self(Fr::from(value))
    }
}

impl From<u64> for BN254Scalar {
    fn from(value: u64) -> Self {
        Self(Fr::from(value))
    }
}

impl Scalar for BN254Scalar {
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self {
        Self(Fr::rand(rng))
    }

    fn multiplicative_generator() -> Self {
        Self(Fr::GENERATOR)
    }

    fn modulus_le_bytes() -> Vec<u8> {
        Fr::MODULUS.to_bytes_le()
    }

    fn bytes_len() -> usize {
        BN254_SCALAR_LEN
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.0.into_bigint().to_bytes_le()
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            n if n > BN254_SCALAR_LEN => Err(AlgebraError::DeserializationError),
            _ => Ok(Self(Fr::from_le_bytes_mod_order(bytes))),
        }
    }

    fn inv(&self) -> Result<Self> {
        match self.0.inverse() {
            Some(inverse) => Ok(Self(inverse)),
            None => Err(AlgebraError::GroupInversionError),
        }
    }

    #[inline]
    fn square(&self) -> Self {
        Self(Field::square(&self.0))
    }

    fn sqrt(&self) -> Option<Self> {
        Field::sqrt(&self.0).map(Self)
    }

    #[inline]
    fn pow(&self, exponent: &[u64]) -> Self {
        Self(Field::pow(&self.0, exponent))
    }
}

impl Domain for BN254Scalar {
    type Field = Fr;

    fn get_field(&self) -> Fr {
        self.0
    }

    fn from_field(field: Fr) -> Self {
        Self(field)
    }
}
