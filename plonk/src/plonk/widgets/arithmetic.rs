use super::{
    accumulate, alpha_powers, insert_scalar, read_evaluations, sub_constant, ScalarMap,
    VerifierWidget,
};
use crate::errors::{PlonkError, Result};
use crate::plonk::{
    context::FieldContext, curve::VerifierCurve, key::VerificationKey, settings::BaseSettings,
    transcript::VerifierTranscript,
};
use ultra_algebra::prelude::*;

/// Ultra arithmetic gates.
///
/// `q_arith` selects the mode: 1 is a standard width-four gate with the
/// shifted fourth wire disabled, 2 adds `w_4_omega`, 3 drops the product
/// term, and the second relation (only live for `q_arith = 3`) ties
/// `w_1 + w_4 - w_1_omega + q_m` to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlookupArithmeticWidget {
    settings: BaseSettings,
}

impl PlookupArithmeticWidget {
    /// Create an arithmetic widget.
    pub fn new(settings: BaseSettings) -> Self {
        Self { settings }
    }
}

const WIRES: [&str; 5] = ["w_1", "w_2", "w_3", "w_4", "w_4_omega"];
const SELECTORS: [&str; 7] = ["q_1", "q_2", "q_3", "q_4", "q_m", "q_c", "q_arith"];

/// Return `-1/2`.
fn neg_half<F: Scalar>() -> Result<F> {
    let half = F::from(2u32).inv().map_err(|_| PlonkError::DivisionByZero)?;
    Ok(half.neg())
}

impl VerifierWidget for PlookupArithmeticWidget {
    const NAME: &'static str = "arithmetic";
    const NUM_ALPHA_POWERS: usize = 2;
    const SCALAR_LABELS: &'static [&'static str] = &["Q_1", "Q_2", "Q_3", "Q_4", "Q_M", "Q_C"];
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
        let (alphas, next) = alpha_powers(cs, transcript, &alpha_base, Self::NUM_ALPHA_POWERS)?;
        let [w_1, w_2, w_3, w_4] = read_evaluations(cs, transcript, ["w_1", "w_2", "w_3", "w_4"])?;
        let [q_arith] = read_evaluations(cs, transcript, ["q_arith"])?;

        let gate = cs.mul(&alphas[0], &q_arith);
        for (label, wire) in ["Q_1", "Q_2", "Q_3", "Q_4"].iter().zip([w_1, w_2, w_3, w_4]) {
            let scalar = cs.mul(&gate, &wire);
            insert_scalar(scalars, label, scalar)?;
        }
        insert_scalar(scalars, "Q_C", gate)?;

        let q_arith_minus_1 = sub_constant(cs, &q_arith, 1);
        let q_arith_minus_2 = sub_constant(cs, &q_arith, 2);
        let q_arith_minus_3 = sub_constant(cs, &q_arith, 3);
        let product = cs.product(&[gate, q_arith_minus_3, w_1, w_2]);
        let product = cs.mul_constant(&product, &neg_half::<E::ScalarField>()?);
        let mode_3 = cs.product(&[alphas[1], q_arith, q_arith_minus_1, q_arith_minus_2]);
        let q_m_scalar = cs.add(&product, &mode_3);
        insert_scalar(scalars, "Q_M", q_m_scalar)?;

        Ok(next)
    }

    /// ```text
    ///     a0 * q_arith * ((q_arith - 3) * q_m * w_1 * w_2 * (-1/2)
    ///                     + q_1 w_1 + q_2 w_2 + q_3 w_3 + q_4 w_4 + q_c
    ///                     + (q_arith - 1) * w_4_omega)
    ///   + a1 * q_arith * (q_arith - 1) * (q_arith - 2) * (w_1 + w_4 - w_1_omega + q_m)
    /// ```
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
        let (alphas, next) = alpha_powers(cs, transcript, &alpha_base, Self::NUM_ALPHA_POWERS)?;
        let [w_1, w_2, w_3, w_4, w_4_omega] = read_evaluations(cs, transcript, WIRES)?;
        let [w_1_omega] = read_evaluations(cs, transcript, ["w_1_omega"])?;
        let [q_1, q_2, q_3, q_4, q_m, q_c, q_arith] = read_evaluations(cs, transcript, SELECTORS)?;

        let q_arith_minus_1 = sub_constant(cs, &q_arith, 1);
        let q_arith_minus_2 = sub_constant(cs, &q_arith, 2);
        let q_arith_minus_3 = sub_constant(cs, &q_arith, 3);

        let product = cs.product(&[q_arith_minus_3, q_m, w_1, w_2]);
        let product = cs.mul_constant(&product, &neg_half::<E::ScalarField>()?);
        let linear = [(q_1, w_1), (q_2, w_2), (q_3, w_3), (q_4, w_4), (q_arith_minus_1, w_4_omega)]
            .iter()
            .map(|(q, w)| cs.mul(q, w))
            .collect::<Vec<_>>();
        let mut relation = cs.sum(&linear);
        relation = cs.add(&relation, &product);
        relation = cs.add(&relation, &q_c);
        let term0 = cs.product(&[alphas[0], q_arith, relation]);

        let w_1_plus_w_4 = cs.add(&w_1, &w_4);
        let shifted = cs.sub(&w_1_plus_w_4, &w_1_omega);
        let extra = cs.add(&shifted, &q_m);
        let term1 = cs.product(&[alphas[1], q_arith, q_arith_minus_1, q_arith_minus_2, extra]);

        let contribution = cs.add(&term0, &term1);
        accumulate(cs, quotient, &contribution);
        Ok(next)
    }
}
