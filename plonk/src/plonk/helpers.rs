use crate::errors::{PlonkError, Result};
use crate::plonk::{
    context::FieldContext, curve::VerifierCurve, key::VerificationKey, settings::BaseSettings,
};
use ultra_algebra::prelude::*;

/// Evaluations at the challenge point `z` that the boundary terms of the
/// permutation and lookup widgets need.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LagrangeEvaluations<V> {
    /// `z^n - 1`.
    pub vanishing_poly: V,
    /// The first Lagrange polynomial at `z`.
    pub l_start: V,
    /// The Lagrange polynomial of the last constrained row,
    /// `n - num_roots_cut_out_of_vanishing_polynomial`, at `z`.
    pub l_end: V,
}

/// Compute `z^n - 1`, `L_1(z) = (z^n - 1) / (n (z - 1))` and
/// `L_end(z) = w^end (z^n - 1) / (n (z - w^end))`.
pub fn compute_lagrange_evaluations<E, C>(
    cs: &mut C,
    key: &VerificationKey<E>,
    z: &C::Fr,
    settings: &BaseSettings,
) -> Result<LagrangeEvaluations<C::Fr>>
where
    E: VerifierCurve,
    C: FieldContext<Native = E::ScalarField>,
{
    let n = E::ScalarField::from(key.circuit_size as u64);
    let one = E::ScalarField::one();

    let z_pow_n = cs.pow(z, key.circuit_size as u64);
    let vanishing_poly = cs.add_constant(&z_pow_n, &one.neg());

    let z_minus_one = cs.add_constant(z, &one.neg());
    let start_denominator = cs.mul_constant(&z_minus_one, &n);
    let l_start = cs.div(&vanishing_poly, &start_denominator)?;

    let end_index = key
        .circuit_size
        .checked_sub(settings.num_roots_cut_out_of_vanishing_polynomial)
        .ok_or(PlonkError::FuncParamsError)?;
    let root_end = key.root_pow(end_index as u64);
    let z_minus_root = cs.add_constant(z, &root_end.neg());
    let end_denominator = cs.mul_constant(&z_minus_root, &n);
    let end_numerator = cs.mul_constant(&vanishing_poly, &root_end);
    let l_end = cs.div(&end_numerator, &end_denominator)?;

    Ok(LagrangeEvaluations {
        vanishing_poly,
        l_start,
        l_end,
    })
}

/// Compute the permutation argument's public input delta
/// ```text
///     prod_j (pi_j + gamma + beta * w^j) / prod_j (pi_j + gamma + beta * k_ext * w^j)
/// ```
/// where `k_ext` is the key's external coset generator. The number of inputs
/// must match the key.
pub fn compute_public_input_delta<E, C>(
    cs: &mut C,
    key: &VerificationKey<E>,
    public_inputs: &[C::Fr],
    beta: &C::Fr,
    gamma: &C::Fr,
) -> Result<C::Fr>
where
    E: VerifierCurve,
    C: FieldContext<Native = E::ScalarField>,
{
    if public_inputs.len() != key.num_public_inputs {
        return Err(PlonkError::PublicInputCountMismatch {
            expected: key.num_public_inputs,
            found: public_inputs.len(),
        });
    }
    let mut numerator = Vec::with_capacity(public_inputs.len());
    let mut denominator = Vec::with_capacity(public_inputs.len());
    let mut root_pow = E::ScalarField::one();
    for pi in public_inputs {
        let pi_plus_gamma = cs.add(pi, gamma);

        let beta_root = cs.mul_constant(beta, &root_pow);
        numerator.push(cs.add(&pi_plus_gamma, &beta_root));

        let beta_coset_root = cs.mul_constant(beta, &root_pow.mul(&key.external_coset_generator));
        denominator.push(cs.add(&pi_plus_gamma, &beta_coset_root));

        root_pow.mul_assign(&key.domain_root);
    }
    let numerator = cs.product(&numerator);
    let denominator = cs.product(&denominator);
    cs.div(&numerator, &denominator)
}

/// The final check of the quotient evaluation: `acc == t(z) * Z_H(z)`.
/// In-circuit the equality is also added as a constraint.
pub fn quotient_identity_holds<C: FieldContext>(
    cs: &mut C,
    quotient_evaluation: &C::Fr,
    t_eval: &C::Fr,
    vanishing_poly: &C::Fr,
) -> bool {
    let rhs = cs.mul(t_eval, vanishing_poly);
    cs.enforce_equal(quotient_evaluation, &rhs);
    cs.value(quotient_evaluation) == cs.value(&rhs)
}
