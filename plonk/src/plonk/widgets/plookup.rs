use super::{
    accumulate, alpha_powers, insert_scalar, read_evaluations, sub_constant, ScalarMap,
    VerifierWidget,
};
use crate::errors::{PlonkError, Result};
use crate::plonk::{
    context::FieldContext,
    curve::VerifierCurve,
    helpers::compute_lagrange_evaluations,
    key::VerificationKey,
    settings::{BaseSettings, ULTRA_SETTINGS},
    transcript::VerifierTranscript,
};
use ultra_algebra::prelude::*;

/// The lookup grand product. Queries and table rows are compressed with
/// powers of `eta` before entering the product.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlookupWidget {
    settings: BaseSettings,
}

impl Default for PlookupWidget {
    fn default() -> Self {
        Self::new(ULTRA_SETTINGS)
    }
}

impl PlookupWidget {
    /// Create a lookup widget.
    pub fn new(settings: BaseSettings) -> Self {
        Self { settings }
    }
}

/// Shared values of both passes.
struct LookupTerms<V> {
    alphas: Vec<V>,
    next: V,
    beta: V,
    l_start: V,
    l_end: V,
    /// `z - w^(n-1)`, which removes the last row from the grand product.
    z_minus_last_root: V,
    /// `gamma * (1 + beta)`.
    gamma_beta: V,
    /// `(1 + beta) * (query + gamma) * (gamma * (1 + beta) + t + beta * t_omega)`.
    numerator: V,
}

/// Return `sum_i eta^i * values[i]`.
fn compress<C: FieldContext>(cs: &mut C, values: &[C::Fr], eta: &C::Fr) -> C::Fr {
    let mut result = cs.constant(C::Native::zero());
    for value in values.iter().rev() {
        let scaled = cs.mul(&result, eta);
        result = cs.add(&scaled, value);
    }
    result
}

impl PlookupWidget {
    fn lookup_terms<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: &C::Fr,
        transcript: &T,
    ) -> Result<LookupTerms<C::Fr>>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        let last_index = (key.circuit_size as u64)
            .checked_sub(1)
            .ok_or(PlonkError::FuncParamsError)?;
        let (alphas, next) = alpha_powers(cs, transcript, alpha_base, Self::NUM_ALPHA_POWERS)?;
        let eta = transcript.get_challenge_field_element(cs, "eta", 0)?;
        let beta = transcript.get_challenge_field_element(cs, "beta", 0)?;
        let gamma = transcript.get_challenge_field_element(cs, "beta", 1)?;
        let z = transcript.get_challenge_field_element(cs, "z", 0)?;
        let lagrange = compute_lagrange_evaluations(cs, key, &z, &self.settings)?;

        let [w_1, w_2, w_3, w_1_omega, w_2_omega, w_3_omega] = read_evaluations(
            cs,
            transcript,
            ["w_1", "w_2", "w_3", "w_1_omega", "w_2_omega", "w_3_omega"],
        )?;
        let [q_2, q_3, q_m, q_c, table_type] =
            read_evaluations(cs, transcript, ["q_2", "q_3", "q_m", "q_c", "table_type"])?;
        let table = read_evaluations(
            cs,
            transcript,
            ["table_value_1", "table_value_2", "table_value_3", "table_value_4"],
        )?;
        let table_omega = read_evaluations(
            cs,
            transcript,
            [
                "table_value_1_omega",
                "table_value_2_omega",
                "table_value_3_omega",
                "table_value_4_omega",
            ],
        )?;

        // wire i plus the step selector times its shifted value
        let step_1 = cs.mul(&q_2, &w_1_omega);
        let key_1 = cs.add(&w_1, &step_1);
        let step_2 = cs.mul(&q_m, &w_2_omega);
        let key_2 = cs.add(&w_2, &step_2);
        let step_3 = cs.mul(&q_c, &w_3_omega);
        let key_3 = cs.add(&w_3, &step_3);
        let f = compress(cs, &[key_1, key_2, key_3, q_3], &eta);
        let query = cs.mul(&table_type, &f);

        let t = compress(cs, &table, &eta);
        let t_omega = compress(cs, &table_omega, &eta);

        let one_plus_beta = cs.add_constant(&beta, &E::ScalarField::one());
        let gamma_beta = cs.mul(&gamma, &one_plus_beta);
        let query_plus_gamma = cs.add(&query, &gamma);
        let beta_t_omega = cs.mul(&beta, &t_omega);
        let table_term = cs.sum(&[gamma_beta, t, beta_t_omega]);
        let numerator = cs.product(&[one_plus_beta, query_plus_gamma, table_term]);

        let last_root = key.root_pow(last_index);
        let z_minus_last_root = cs.add_constant(&z, &last_root.neg());

        Ok(LookupTerms {
            alphas,
            next,
            beta,
            l_start: lagrange.l_start,
            l_end: lagrange.l_end,
            z_minus_last_root,
            gamma_beta,
            numerator,
        })
    }
}

impl VerifierWidget for PlookupWidget {
    const NAME: &'static str = "plookup";
    const NUM_ALPHA_POWERS: usize = 3;
    const SCALAR_LABELS: &'static [&'static str] = &["Z_LOOKUP"];
    type Params = ();

    fn settings(&self) -> &BaseSettings {
        &self.settings
    }

    fn append_scalar_multiplication_inputs<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
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
        let terms = self.lookup_terms(cs, key, &alpha_base, transcript)?;
        let grand_product = cs.product(&[terms.alphas[0], terms.z_minus_last_root, terms.numerator]);
        let start = cs.mul(&terms.alphas[1], &terms.l_start);
        let end = cs.mul(&terms.alphas[2], &terms.l_end);
        let scalar = cs.sum(&[grand_product, start, end]);
        insert_scalar(scalars, "Z_LOOKUP", scalar)?;
        Ok(terms.next)
    }

    /// ```text
    ///     a0 * (z - w^(n-1)) * (z_lookup * numerator
    ///           - z_lookup_omega * (gamma * (1 + beta) + s + beta * s_omega))
    ///   + a1 * L_1(z) * (z_lookup - 1)
    ///   + a2 * L_end(z) * (z_lookup - 1)
    /// ```
    fn compute_quotient_evaluation_contribution<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
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
        let terms = self.lookup_terms(cs, key, &alpha_base, transcript)?;
        let [s, s_omega, z_lookup, z_lookup_omega] =
            read_evaluations(cs, transcript, ["s", "s_omega", "z_lookup", "z_lookup_omega"])?;

        let beta_s_omega = cs.mul(&terms.beta, &s_omega);
        let sorted_term = cs.sum(&[terms.gamma_beta, s, beta_s_omega]);
        let denominator = cs.mul(&z_lookup_omega, &sorted_term);
        let numerator = cs.mul(&z_lookup, &terms.numerator);
        let difference = cs.sub(&numerator, &denominator);
        let term0 = cs.product(&[terms.alphas[0], terms.z_minus_last_root, difference]);

        let z_lookup_minus_one = sub_constant(cs, &z_lookup, 1);
        let term1 = cs.product(&[terms.alphas[1], terms.l_start, z_lookup_minus_one]);
        let term2 = cs.product(&[terms.alphas[2], terms.l_end, z_lookup_minus_one]);

        let contribution = cs.sum(&[term0, term1, term2]);
        accumulate(cs, quotient, &contribution);
        Ok(terms.next)
    }
}
