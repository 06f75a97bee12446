use super::{accumulate, alpha_powers, insert_scalar, read_evaluations, ScalarMap, VerifierWidget};
use crate::errors::Result;
use crate::plonk::{
    context::FieldContext, curve::VerifierCurve, key::VerificationKey, settings::BaseSettings,
    transcript::VerifierTranscript,
};
use ultra_algebra::prelude::*;

/// Bits per limb of a non-native field element.
const LIMB_BITS: u64 = 68;
/// Bits per sublimb of the limb accumulator.
const SUBLIMB_BITS: u64 = 14;

/// ROM reads, non-native field multiplication and limb accumulation.
///
/// `q_1 * q_2` enables the ROM relations: the record in `w_4` must equal
/// `w_1 eta + w_2 eta^2 + w_3 eta^3 + q_c`, indices must step by zero or
/// one, and equal indices must hold equal records. `q_2` with `q_3`, `q_4`
/// or `q_m` selects one of the non-native product gates, `q_3 q_4` the limb
/// accumulator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlookupAuxiliaryWidget {
    settings: BaseSettings,
}

impl PlookupAuxiliaryWidget {
    /// Create an auxiliary widget.
    pub fn new(settings: BaseSettings) -> Self {
        Self { settings }
    }

    fn auxiliary_identity<E, C, T>(
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
        let eta = transcript.get_challenge_field_element(cs, "eta", 0)?;
        let [w_1, w_2, w_3, w_4] = read_evaluations(cs, transcript, ["w_1", "w_2", "w_3", "w_4"])?;
        let [w_1_omega, w_2_omega, w_3_omega, w_4_omega] = read_evaluations(
            cs,
            transcript,
            ["w_1_omega", "w_2_omega", "w_3_omega", "w_4_omega"],
        )?;
        let [q_1, q_2, q_3, q_4, q_m, q_c] =
            read_evaluations(cs, transcript, ["q_1", "q_2", "q_3", "q_4", "q_m", "q_c"])?;

        let one = E::ScalarField::one();
        let two = E::ScalarField::from(2u32);
        let limb_shift = two.pow(&[LIMB_BITS]);
        let sublimb_shift = two.pow(&[SUBLIMB_BITS]);

        // memory record
        let mut record = cs.mul(&w_3, &eta);
        record = cs.add(&record, &w_2);
        record = cs.mul(&record, &eta);
        record = cs.add(&record, &w_1);
        record = cs.mul(&record, &eta);
        record = cs.add(&record, &q_c);
        let record_check = cs.sub(&record, &w_4);

        let index_delta = cs.sub(&w_1_omega, &w_1);
        let record_delta = cs.sub(&w_4_omega, &w_4);
        let index_unchanged = cs.neg(&index_delta);
        let index_unchanged = cs.add_constant(&index_unchanged, &one);
        let adjacent_values_match = cs.mul(&index_unchanged, &record_delta);
        let index_delta_sqr = cs.square(&index_delta);
        let index_is_monotonic = cs.sub(&index_delta_sqr, &index_delta);

        let rom_terms = [record_check, adjacent_values_match, index_is_monotonic]
            .iter()
            .zip(&alphas)
            .map(|(term, alpha)| cs.mul(term, alpha))
            .collect::<Vec<_>>();
        let rom = cs.sum(&rom_terms);
        let rom = cs.product(&[q_1, q_2, rom]);

        // non-native field products
        let w_1_w_2_omega = cs.mul(&w_1, &w_2_omega);
        let w_1_omega_w_2 = cs.mul(&w_1_omega, &w_2);
        let limb_subproduct = cs.add(&w_1_w_2_omega, &w_1_omega_w_2);

        let w_1_w_4 = cs.mul(&w_1, &w_4);
        let w_2_w_3 = cs.mul(&w_2, &w_3);
        let high = cs.add(&w_1_w_4, &w_2_w_3);
        let high = cs.sub(&high, &w_3_omega);
        let high = cs.mul_constant(&high, &limb_shift);
        let high = cs.sub(&high, &w_4_omega);
        let high = cs.add(&high, &limb_subproduct);
        let gate_2 = cs.mul(&high, &q_4);

        let shifted_subproduct = cs.mul_constant(&limb_subproduct, &limb_shift);
        let w_omega_product = cs.mul(&w_1_omega, &w_2_omega);
        let limb_subproduct = cs.add(&shifted_subproduct, &w_omega_product);
        let w_3_plus_w_4 = cs.add(&w_3, &w_4);
        let low = cs.sub(&limb_subproduct, &w_3_plus_w_4);
        let gate_1 = cs.mul(&low, &q_3);

        let omega_sum = cs.add(&w_3_omega, &w_4_omega);
        let mid = cs.add(&limb_subproduct, &w_4);
        let mid = cs.sub(&mid, &omega_sum);
        let gate_3 = cs.mul(&mid, &q_m);

        let non_native = cs.sum(&[gate_1, gate_2, gate_3]);
        let non_native = cs.mul(&non_native, &q_2);

        // limb accumulator
        let mut limbs = cs.mul_constant(&w_4, &sublimb_shift);
        limbs = cs.add(&limbs, &w_3);
        limbs = cs.mul_constant(&limbs, &sublimb_shift);
        limbs = cs.add(&limbs, &w_2);
        limbs = cs.mul_constant(&limbs, &sublimb_shift);
        limbs = cs.add(&limbs, &w_1);
        let limbs = cs.sub(&limbs, &w_1_omega);
        let limb_accumulator = cs.product(&[limbs, q_3, q_4]);

        let arithmetic = cs.add(&non_native, &limb_accumulator);
        let arithmetic = cs.mul(&arithmetic, &alphas[3]);
        Ok((cs.add(&rom, &arithmetic), next))
    }
}

impl VerifierWidget for PlookupAuxiliaryWidget {
    const NAME: &'static str = "auxiliary";
    const NUM_ALPHA_POWERS: usize = 4;
    const SCALAR_LABELS: &'static [&'static str] = &["Q_AUX"];
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
        let (identity, next) = self.auxiliary_identity::<E, C, T>(cs, &alpha_base, transcript)?;
        insert_scalar(scalars, "Q_AUX", identity)?;
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
        let (identity, next) = self.auxiliary_identity::<E, C, T>(cs, &alpha_base, transcript)?;
        let [q_aux] = read_evaluations(cs, transcript, ["q_aux"])?;
        let contribution = cs.mul(&q_aux, &identity);
        accumulate(cs, quotient, &contribution);
        Ok(next)
    }
}
