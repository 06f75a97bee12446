use super::{
    accumulate, alpha_powers, insert_scalar, read_evaluations, sub_constant, ScalarMap,
    VerifierWidget,
};
use crate::errors::Result;
use crate::plonk::{
    context::FieldContext, curve::VerifierCurve, key::VerificationKey, settings::BaseSettings,
    transcript::VerifierTranscript,
};

/// Delta-range constraints: consecutive wires of a sorted list differ by at
/// most three.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenPermSortWidget {
    settings: BaseSettings,
}

impl GenPermSortWidget {
    /// Create a sort widget.
    pub fn new(settings: BaseSettings) -> Self {
        Self { settings }
    }

    /// `sum_i a_i * d_i (d_i - 1)(d_i - 2)(d_i - 3)` over the four deltas
    /// `w_2 - w_1, w_3 - w_2, w_4 - w_3, w_1_omega - w_4`.
    fn sort_identity<E, C, T>(
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
        let [w_1, w_2, w_3, w_4, w_1_omega] =
            read_evaluations(cs, transcript, ["w_1", "w_2", "w_3", "w_4", "w_1_omega"])?;

        let chain = [w_1, w_2, w_3, w_4, w_1_omega];
        let mut terms = Vec::with_capacity(Self::NUM_ALPHA_POWERS);
        for (pair, alpha) in chain.windows(2).zip(&alphas) {
            let delta = cs.sub(&pair[1], &pair[0]);
            let minus_1 = sub_constant(cs, &delta, 1);
            let minus_2 = sub_constant(cs, &delta, 2);
            let minus_3 = sub_constant(cs, &delta, 3);
            terms.push(cs.product(&[*alpha, delta, minus_1, minus_2, minus_3]));
        }
        Ok((cs.sum(&terms), next))
    }
}

impl VerifierWidget for GenPermSortWidget {
    const NAME: &'static str = "genperm_sort";
    const NUM_ALPHA_POWERS: usize = 4;
    const SCALAR_LABELS: &'static [&'static str] = &["Q_SORT"];
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
        let (identity, next) = self.sort_identity::<E, C, T>(cs, &alpha_base, transcript)?;
        insert_scalar(scalars, "Q_SORT", identity)?;
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
        let (identity, next) = self.sort_identity::<E, C, T>(cs, &alpha_base, transcript)?;
        let [q_sort] = read_evaluations(cs, transcript, ["q_sort"])?;
        let contribution = cs.mul(&q_sort, &identity);
        accumulate(cs, quotient, &contribution);
        Ok(next)
    }
}
