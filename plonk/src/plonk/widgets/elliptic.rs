use super::{accumulate, alpha_powers, insert_scalar, read_evaluations, ScalarMap, VerifierWidget};
use crate::errors::Result;
use crate::plonk::{
    context::FieldContext, curve::VerifierCurve, key::VerificationKey, settings::BaseSettings,
    transcript::VerifierTranscript,
};
use ultra_algebra::prelude::*;

/// Addition and doubling on the embedded curve `y^2 = x^3 + b`.
///
/// A gate spans two rows: `(x_1, y_1) = (w_2, w_3)`, `(x_2, y_2) =
/// (w_1_omega, w_4_omega)` and the result `(x_3, y_3) = (w_2_omega,
/// w_3_omega)`. `q_1` holds the sign of the second point and `q_m`
/// switches to doubling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EllipticWidget {
    settings: BaseSettings,
}

impl EllipticWidget {
    /// Create an elliptic widget.
    pub fn new(settings: BaseSettings) -> Self {
        Self { settings }
    }

    fn elliptic_identity<E, C, T>(
        &self,
        cs: &mut C,
        alpha_base: &C::Fr,
        transcript: &T,
    ) -> Result<(C::Fr, C::Fr)>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        let (alphas, next) = alpha_powers(cs, transcript, alpha_base, Self::NUM_ALPHA_POWERS)?;
        let [x_1, y_1, x_2, y_2, x_3, y_3] = read_evaluations(
            cs,
            transcript,
            ["w_2", "w_3", "w_1_omega", "w_4_omega", "w_2_omega", "w_3_omega"],
        )?;
        let [q_sign, q_double] = read_evaluations(cs, transcript, ["q_1", "q_m"])?;

        let two = E::ScalarField::from(2u32);
        let x_diff = cs.sub(&x_2, &x_1);
        let x_diff_sqr = cs.square(&x_diff);
        let y_1_sqr = cs.square(&y_1);
        let y_2_sqr = cs.square(&y_2);

        // (x_3 + x_2 + x_1)(x_2 - x_1)^2 - y_2^2 - y_1^2 + 2 q_sign y_1 y_2
        let x_sum = cs.sum(&[x_3, x_2, x_1]);
        let x_add = cs.mul(&x_sum, &x_diff_sqr);
        let x_add = cs.sub(&x_add, &y_2_sqr);
        let x_add = cs.sub(&x_add, &y_1_sqr);
        let cross = cs.product(&[q_sign, y_1, y_2]);
        let cross = cs.mul_constant(&cross, &two);
        let x_add = cs.add(&x_add, &cross);

        // (y_1 + y_3)(x_2 - x_1) + (x_3 - x_1)(q_sign y_2 - y_1)
        let y_sum = cs.add(&y_1, &y_3);
        let y_add = cs.mul(&y_sum, &x_diff);
        let x_3_minus_x_1 = cs.sub(&x_3, &x_1);
        let signed_y_2 = cs.mul(&q_sign, &y_2);
        let slope = cs.sub(&signed_y_2, &y_1);
        let chord = cs.mul(&x_3_minus_x_1, &slope);
        let y_add = cs.add(&y_add, &chord);

        // (x_3 + 2 x_1) 4 y_1^2 - 9 x_1 (y_1^2 - b)
        let x_pow_4 = cs.add_constant(&y_1_sqr, &E::embedded_curve_b().neg());
        let x_pow_4 = cs.mul(&x_pow_4, &x_1);
        let two_x_1 = cs.mul_constant(&x_1, &two);
        let x_double = cs.add(&x_3, &two_x_1);
        let x_double = cs.mul(&x_double, &y_1_sqr);
        let x_double = cs.mul_constant(&x_double, &E::ScalarField::from(4u32));
        let nine_x_pow_4 = cs.mul_constant(&x_pow_4, &E::ScalarField::from(9u32));
        let x_double = cs.sub(&x_double, &nine_x_pow_4);

        // 3 x_1^2 (x_1 - x_3) - 2 y_1 (y_1 + y_3)
        let x_1_sqr = cs.square(&x_1);
        let x_1_minus_x_3 = cs.sub(&x_1, &x_3);
        let tangent = cs.mul(&x_1_sqr, &x_1_minus_x_3);
        let tangent = cs.mul_constant(&tangent, &E::ScalarField::from(3u32));
        let y_rhs = cs.mul(&y_1, &y_sum);
        let y_rhs = cs.mul_constant(&y_rhs, &two);
        let y_double = cs.sub(&tangent, &y_rhs);

        let add_mode = cs.neg(&q_double);
        let add_mode = cs.add_constant(&add_mode, &E::ScalarField::one());
        let mut identities = Vec::with_capacity(2);
        for (add, double) in [(x_add, x_double), (y_add, y_double)] {
            let add = cs.mul(&add, &add_mode);
            let double = cs.mul(&double, &q_double);
            identities.push(cs.add(&add, &double));
        }

        let x_term = cs.mul(&alphas[0], &identities[0]);
        let y_term = cs.mul(&alphas[1], &identities[1]);
        Ok((cs.add(&x_term, &y_term), next))
    }
}

impl VerifierWidget for EllipticWidget {
    const NAME: &'static str = "elliptic";
    const NUM_ALPHA_POWERS: usize = 2;
    const SCALAR_LABELS: &'static [&'static str] = &["Q_ELLIPTIC"];
    type Params = ();

    fn settings(&self) -> &BaseSettings {
        &self.settings
    }

    fn append_scalar_multiplication_inputs<E, C, T>(
        &self,
        cs: &mut C,
        _key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        scalars: &mut ScalarMap<C::Fr>,
        _params: (),
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        let (identity, next) = self.elliptic_identity::<E, C, T>(cs, &alpha_base, transcript)?;
        insert_scalar(scalars, "Q_ELLIPTIC", identity)?;
        Ok(next)
    }

    fn compute_quotient_evaluation_contribution<E, C, T>(
        &self,
        cs: &mut C,
        _key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        quotient: &mut C::Fr,
        _params: (),
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        let (identity, next) = self.elliptic_identity::<E, C, T>(cs, &alpha_base, transcript)?;
        let [q_elliptic] = read_evaluations(cs, transcript, ["q_elliptic"])?;
        let contribution = cs.mul(&q_elliptic, &identity);
        accumulate(cs, quotient, &contribution);
        Ok(next)
    }
}
