use ultra_algebra::{
    bn254::{BN254Scalar, BN254G1},
    prelude::*,
};

/// The field-and-group capability set a verifier is instantiated over.
pub trait VerifierCurve: Clone + Debug + PartialEq + Eq + Default + 'static {
    /// The scalar field of the proving curve, where all widget arithmetic lives.
    type ScalarField: Scalar + Domain;

    /// The group holding commitments.
    type G1: Group<ScalarType = Self::ScalarField>;

    /// A short name for logs.
    const NAME: &'static str;

    /// The `b` coefficient of the embedded curve `y^2 = x^3 + b`, whose base
    /// field is `ScalarField`. The elliptic widget checks additions over it.
    fn embedded_curve_b() -> Self::ScalarField;
}

/// BN254, with Grumpkin (`y^2 = x^3 - 17`) as the embedded curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bn254;

impl VerifierCurve for Bn254 {
    type ScalarField = BN254Scalar;
    type G1 = BN254G1;
    const NAME: &'static str = "bn254";

    fn embedded_curve_b() -> BN254Scalar {
        BN254Scalar::from(17u32).neg()
    }
}
