use crate::bn254::BN254Scalar;
use crate::prelude::*;
use ark_bn254::{G1Affine, G1Projective};
use ark_ec::{CurveGroup, Group as ArkGroup, VariableBaseMSM};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, Compress, Validate};
use ark_std::fmt::Display;

/// A BN254 G1 point in projective form. Commitments live here.
#[derive(Copy, Default, Clone, PartialEq, Eq)]
pub struct BN254G1(pub(crate) G1Projective);

impl Debug for BN254G1 {
    fn fmt(&self, f: &mut Formatter<'_>) -> ark_std::fmt::Result {
        Display::fmt(&self.0.into_affine(), f)
    }
}

impl_wrapped_ops!(BN254G1, BN254G1, Add add AddAssign add_assign);
impl_wrapped_ops!(BN254G1, BN254G1, Sub sub SubAssign sub_assign);
impl_wrapped_ops!(BN254G1, BN254Scalar, Mul mul MulAssign mul_assign);

impl Neg for BN254G1 {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Group for BN254G1 {
    type ScalarType = BN254Scalar;
    const COMPRESSED_LEN: usize = 32;

    fn get_identity() -> Self {
        Self(G1Projective::zero())
    }

    fn get_base() -> Self {
        Self(G1Projective::generator())
    }

    fn random<R: CryptoRng + RngCore>(prng: &mut R) -> Self {
        Self(G1Projective::rand(prng))
    }

    fn to_compressed_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::COMPRESSED_LEN);
        // writing into a Vec cannot fail
        let _ = self.0.into_affine().serialize_compressed(&mut out);
        out
    }

    fn from_compressed_bytes(bytes: &[u8]) -> Result<Self> {
        G1Affine::deserialize_with_mode(bytes, Compress::Yes, Validate::Yes)
            .map(|point| Self(point.into()))
            .map_err(|_| AlgebraError::DecompressElementError)
    }

    fn multi_exp(scalars: &[&BN254Scalar], points: &[&Self]) -> Result<Self> {
        if scalars.len() != points.len() {
            return Err(AlgebraError::ParameterError);
        }
        if points.is_empty() {
            return Ok(Self::get_identity());
        }

        let projective: Vec<G1Projective> = points.iter().map(|p| p.0).collect();
        let bases = G1Projective::normalize_batch(&projective);
        let exponents: Vec<_> = scalars.iter().map(|s| s.0).collect();
        G1Projective::msm(&bases, &exponents)
            .map(Self)
            .map_err(|_| AlgebraError::ParameterError)
    }
}
