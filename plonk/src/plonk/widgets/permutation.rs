use super::{
    accumulate, alpha_powers, insert_scalar, read_evaluations, sub_constant, ScalarMap,
    VerifierWidget,
};
use crate::errors::Result;
use crate::plonk::{
    context::FieldContext,
    curve::VerifierCurve,
    helpers::{compute_lagrange_evaluations, compute_public_input_delta},
    key::VerificationKey,
    settings::{BaseSettings, ULTRA_SETTINGS},
    transcript::VerifierTranscript,
};

/// The copy-constraint argument: the grand product `z_perm` must start at
/// one, end at the public input delta, and step by the ratio of the identity
/// and sigma permutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermutationWidget {
    settings: BaseSettings,
}

/// The input of both passes chosen by the profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PermutationParams {
    /// Read the identity permutation evaluations `id_i` from the transcript
    /// instead of computing them as `k_i * z`.
    pub idpolys: bool,
}

impl Default for PermutationWidget {
    fn default() -> Self {
        Self::new(ULTRA_SETTINGS)
    }
}

impl PermutationWidget {
    /// Create a permutation widget.
    pub fn new(settings: BaseSettings) -> Self {
        Self { settings }
    }
}

const WIRES: [&str; 4] = ["w_1", "w_2", "w_3", "w_4"];
const SIGMAS: [&str; 4] = ["sigma_1", "sigma_2", "sigma_3", "sigma_4"];
const IDS: [&str; 4] = ["id_1", "id_2", "id_3", "id_4"];

/// The identity permutation at `z`: `id_i` from the transcript when the key
/// stores it, `k_i * z` otherwise.
fn identity_evaluations<E, C, T>(
    cs: &mut C,
    key: &VerificationKey<E>,
    transcript: &T,
    z: &C::Fr,
    params: PermutationParams,
) -> Result<Vec<C::Fr>>
where
    E: VerifierCurve,
    C: FieldContext<Native = E::ScalarField>,
    T: VerifierTranscript<C>,
{
    if params.idpolys {
        return Ok(read_evaluations(cs, transcript, IDS)?.to_vec());
    }
    Ok(key
        .coset_generators
        .iter()
        .map(|k| cs.mul_constant(z, k))
        .collect())
}

/// Return `w + beta * s + gamma` for each pair.
fn permutation_terms<C: FieldContext>(
    cs: &mut C,
    wires: &[C::Fr],
    shifts: &[C::Fr],
    beta: &C::Fr,
    gamma: &C::Fr,
) -> Vec<C::Fr> {
    wires
        .iter()
        .zip(shifts)
        .map(|(w, s)| {
            let beta_s = cs.mul(beta, s);
            let w_plus_gamma = cs.add(w, gamma);
            cs.add(&w_plus_gamma, &beta_s)
        })
        .collect()
}

impl VerifierWidget for PermutationWidget {
    const NAME: &'static str = "permutation";
    const NUM_ALPHA_POWERS: usize = 3;
    const SCALAR_LABELS: &'static [&'static str] = &["Z_PERM", "SIGMA_4"];
    type Params = PermutationParams;

    fn settings(&self) -> &BaseSettings {
        &self.settings
    }

    /// ```text
    ///     Z_PERM  = a0 * prod_i (w_i + beta * id_i + gamma) + a1 * L_1(z)
    ///     SIGMA_4 = -a0 * z_perm_omega * beta * prod_{i<4} (w_i + beta * sigma_i + gamma)
    /// ```
    fn append_scalar_multiplication_inputs<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        scalars: &mut ScalarMap<C::Fr>,
        params: PermutationParams,
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        let (alphas, next) = alpha_powers(cs, transcript, &alpha_base, Self::NUM_ALPHA_POWERS)?;
        let beta = transcript.get_challenge_field_element(cs, "beta", 0)?;
        let gamma = transcript.get_challenge_field_element(cs, "beta", 1)?;
        let z = transcript.get_challenge_field_element(cs, "z", 0)?;
        let lagrange = compute_lagrange_evaluations(cs, key, &z, &self.settings)?;

        let wires = read_evaluations(cs, transcript, WIRES)?;
        let sigmas = read_evaluations(cs, transcript, SIGMAS)?;
        let [z_perm_omega] = read_evaluations(cs, transcript, ["z_perm_omega"])?;

        let ids = identity_evaluations(cs, key, transcript, &z, params)?;
        let id_terms = permutation_terms(cs, &wires, &ids, &beta, &gamma);
        let id_product = cs.product(&id_terms);
        let grand_product = cs.mul(&alphas[0], &id_product);
        let boundary = cs.mul(&alphas[1], &lagrange.l_start);
        let z_perm_scalar = cs.add(&grand_product, &boundary);
        insert_scalar(scalars, "Z_PERM", z_perm_scalar)?;

        let sigma_terms = permutation_terms(cs, &wires[..3], &sigmas[..3], &beta, &gamma);
        let sigma_product = cs.product(&sigma_terms);
        let sigma_scalar = cs.product(&[sigma_product, z_perm_omega, beta, alphas[0]]);
        let sigma_scalar = cs.neg(&sigma_scalar);
        insert_scalar(scalars, "SIGMA_4", sigma_scalar)?;

        Ok(next)
    }

    /// ```text
    ///     a0 * (z_perm * prod_i (w_i + beta * id_i + gamma)
    ///           - z_perm_omega * prod_i (w_i + beta * sigma_i + gamma))
    ///   + a1 * L_1(z) * (z_perm - 1)
    ///   + a2 * L_end(z) * (z_perm_omega - delta)
    /// ```
    fn compute_quotient_evaluation_contribution<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        quotient: &mut C::Fr,
        params: PermutationParams,
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        let (alphas, next) = alpha_powers(cs, transcript, &alpha_base, Self::NUM_ALPHA_POWERS)?;
        let beta = transcript.get_challenge_field_element(cs, "beta", 0)?;
        let gamma = transcript.get_challenge_field_element(cs, "beta", 1)?;
        let z = transcript.get_challenge_field_element(cs, "z", 0)?;
        let lagrange = compute_lagrange_evaluations(cs, key, &z, &self.settings)?;

        let public_inputs = transcript.get_field_element_vector(cs, "public_inputs")?;
        let delta = compute_public_input_delta(cs, key, &public_inputs, &beta, &gamma)?;

        let wires = read_evaluations(cs, transcript, WIRES)?;
        let sigmas = read_evaluations(cs, transcript, SIGMAS)?;
        let [z_perm, z_perm_omega] = read_evaluations(cs, transcript, ["z_perm", "z_perm_omega"])?;

        let ids = identity_evaluations(cs, key, transcript, &z, params)?;

        let id_terms = permutation_terms(cs, &wires, &ids, &beta, &gamma);
        let id_product = cs.product(&id_terms);
        let numerator = cs.mul(&z_perm, &id_product);
        let sigma_terms = permutation_terms(cs, &wires, &sigmas, &beta, &gamma);
        let sigma_product = cs.product(&sigma_terms);
        let denominator = cs.mul(&z_perm_omega, &sigma_product);
        let grand_product = cs.sub(&numerator, &denominator);
        let term0 = cs.mul(&alphas[0], &grand_product);

        let z_perm_minus_one = sub_constant(cs, &z_perm, 1);
        let term1 = cs.product(&[alphas[1], lagrange.l_start, z_perm_minus_one]);

        let z_perm_omega_minus_delta = cs.sub(&z_perm_omega, &delta);
        let term2 = cs.product(&[alphas[2], lagrange.l_end, z_perm_omega_minus_delta]);

        let contribution = cs.sum(&[term0, term1, term2]);
        accumulate(cs, quotient, &contribution);
        Ok(next)
    }
}
