use crate::prelude::*;
use ark_ff::FftField;
use serde::{Deserialize, Serialize};

/// An element of a prime field.
///
/// Arithmetic is available both by value and by reference so that generic
/// verifier code can write `a.mul(&b)` without caring about ownership.
pub trait Scalar:
    Copy
    + Default
    + Debug
    + Eq
    + Send
    + Sync
    + Serialize
    + for<'de> Deserialize<'de>
    + One
    + Zero
    + From<u32>
    + From<u64>
    + Neg<Output = Self>
    + Add<Self, Output = Self>
    + Sub<Self, Output = Self>
    + Mul<Self, Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> MulAssign<&'a Self>
{
    /// Sample a uniform element.
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// A generator of the multiplicative group. It is a quadratic non-residue,
    /// so its powers give disjoint cosets of any subgroup of two-power order.
    fn multiplicative_generator() -> Self;

    /// The field modulus, little-endian.
    fn modulus_le_bytes() -> Vec<u8>;

    /// Width of the canonical encoding.
    fn bytes_len() -> usize;

    /// Canonical little-endian encoding, `bytes_len()` bytes long.
    fn to_bytes(&self) -> Vec<u8>;

    /// Decode at most `bytes_len()` little-endian bytes, reducing modulo the
    /// field size. Shorter inputs are zero-extended.
    fn from_bytes(bytes: &[u8]) -> Result<Self>;

    /// The multiplicative inverse. Fails on zero.
    fn inv(&self) -> Result<Self>;

    /// `self * self`.
    fn square(&self) -> Self {
        *self * *self
    }

    /// A square root, if `self` is a quadratic residue.
    fn sqrt(&self) -> Option<Self>;

    /// `self` raised to a little-endian multi-limb exponent.
    fn pow(&self, exponent: &[u64]) -> Self {
        let mut acc = Self::one();
        for limb in exponent.iter().rev() {
            for bit in (0..64).rev() {
                acc = acc.square();
                if (limb >> bit) & 1 == 1 {
                    acc.mul_assign(self);
                }
            }
        }
        acc
    }
}

/// A scalar field with two-adic roots of unity.
pub trait Domain: Scalar {
    /// The arkworks field behind the wrapper.
    type Field: FftField;

    /// Unwrap into the arkworks field.
    fn get_field(&self) -> Self::Field;

    /// Wrap an arkworks field element.
    fn from_field(field: Self::Field) -> Self;

    /// A primitive `n`-th root of unity, if `n` divides the two-adic order.
    fn get_root_of_unity(n: u64) -> Option<Self> {
        Self::Field::get_root_of_unity(n).map(Self::from_field)
    }
}

/// A prime-order group holding commitments.
pub trait Group:
    Copy
    + Default
    + Debug
    + Eq
    + Serialize
    + for<'de> Deserialize<'de>
    + Neg
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> AddAssign<&'a Self>
    + for<'a> SubAssign<&'a Self>
    + for<'a> Mul<&'a Self::ScalarType, Output = Self>
{
    /// The scalar field of the group order.
    type ScalarType: Scalar;

    /// Width of a compressed point.
    const COMPRESSED_LEN: usize;

    /// The point at infinity.
    fn get_identity() -> Self;

    /// The fixed generator.
    fn get_base() -> Self;

    /// Sample a uniform point.
    fn random<R: CryptoRng + RngCore>(rng: &mut R) -> Self;

    /// Encode in `COMPRESSED_LEN` bytes.
    fn to_compressed_bytes(&self) -> Vec<u8>;

    /// Decode a compressed point, checking it lies in the group.
    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self>;

    /// `sum(scalars[i] * points[i])`. Empty input gives the identity; slices
    /// of different lengths are rejected.
    fn multi_exp(scalars: &[&Self::ScalarType], points: &[&Self]) -> Result<Self>;
}
