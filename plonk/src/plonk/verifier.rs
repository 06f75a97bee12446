use crate::errors::{PlonkError, Result};
use crate::plonk::{
    context::{FieldContext, NativeContext},
    curve::VerifierCurve,
    helpers::{compute_lagrange_evaluations, quotient_identity_holds},
    key::VerificationKey,
    settings::{BaseSettings, NUM_CHALLENGE_BYTES, ULTRA_SETTINGS, ULTRA_TO_STANDARD_SETTINGS},
    transcript::{HashType, NativeTranscript, VerifierTranscript},
    widgets::{
        EllipticWidget, GenPermSortWidget, PermutationWidget, PlookupArithmeticWidget,
        PlookupAuxiliaryWidget, PlookupWidget, ScalarMap, WidgetKind,
    },
};
use ark_std::{end_timer, start_timer};
use tracing::{debug, instrument};
use ultra_algebra::prelude::*;

/// The verifier settings of a recursive proof: which widgets check it, in
/// which order, and which transcript it must come with.
///
/// The widget order fixes which powers of `alpha` each widget receives, so it
/// is part of the proof format.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifierProfile {
    name: &'static str,
    hash_type: HashType,
    idpolys: bool,
    num_challenge_bytes: usize,
    settings: BaseSettings,
    widgets: Vec<WidgetKind>,
}

/// Build the widgets that follow the two grand products.
fn gate_widgets(settings: BaseSettings) -> [WidgetKind; 4] {
    [
        WidgetKind::Arithmetic(PlookupArithmeticWidget::new(settings)),
        WidgetKind::GenPermSort(GenPermSortWidget::new(settings)),
        WidgetKind::Elliptic(EllipticWidget::new(settings)),
        WidgetKind::Auxiliary(PlookupAuxiliaryWidget::new(settings)),
    ]
}

impl VerifierProfile {
    /// The profile of a recursive Ultra verifier.
    pub fn ultra() -> Self {
        let mut widgets = vec![
            WidgetKind::Permutation(PermutationWidget::new(ULTRA_SETTINGS)),
            WidgetKind::Plookup(PlookupWidget::new(ULTRA_SETTINGS)),
        ];
        widgets.extend(gate_widgets(ULTRA_SETTINGS));
        Self {
            name: "ultra",
            hash_type: HashType::PedersenBlake3s,
            idpolys: true,
            num_challenge_bytes: NUM_CHALLENGE_BYTES,
            settings: ULTRA_SETTINGS,
            widgets,
        }
    }

    /// The profile of an Ultra verifier whose proof is checked by a Standard
    /// circuit. The grand-product widgets are the Ultra ones; the gate widgets
    /// use the reduced settings.
    pub fn ultra_to_standard() -> Self {
        let ultra = Self::ultra();
        let mut widgets: Vec<WidgetKind> = ultra
            .widgets
            .iter()
            .filter(|w| matches!(w, WidgetKind::Permutation(_) | WidgetKind::Plookup(_)))
            .copied()
            .collect();
        widgets.extend(gate_widgets(ULTRA_TO_STANDARD_SETTINGS));
        Self {
            name: "ultra_to_standard",
            settings: ULTRA_TO_STANDARD_SETTINGS,
            widgets,
            ..ultra
        }
    }

    /// Return the profile with identity permutation evaluations read from the
    /// transcript (`true`) or computed as `k_i * z` (`false`).
    pub fn with_idpolys(mut self, idpolys: bool) -> Self {
        self.idpolys = idpolys;
        self
    }

    /// Return the profile name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Return the Fiat-Shamir hash the transcript must be built with.
    pub fn hash_type(&self) -> HashType {
        self.hash_type
    }

    /// Return whether identity permutation evaluations come from the transcript.
    pub fn idpolys(&self) -> bool {
        self.idpolys
    }

    /// Return the challenge width the transcript must squeeze.
    pub fn num_challenge_bytes(&self) -> usize {
        self.num_challenge_bytes
    }

    /// Return the settings of the profile's gate widgets. The final quotient
    /// check evaluates the vanishing polynomial with them.
    pub fn settings(&self) -> &BaseSettings {
        &self.settings
    }

    /// Return the widgets in evaluation order.
    pub fn widgets(&self) -> &[WidgetKind] {
        &self.widgets
    }

    /// Return the number of alpha powers a pass consumes.
    pub fn num_alpha_powers(&self) -> usize {
        self.widgets.iter().map(|w| w.num_alpha_powers()).sum()
    }

    /// Return every label the scalar pass inserts, in widget order.
    pub fn scalar_labels(&self) -> Vec<&'static str> {
        self.widgets
            .iter()
            .flat_map(|w| w.scalar_labels().iter().copied())
            .collect()
    }

    /// Reject a transcript built with another hash or challenge width.
    pub fn validate_transcript<C, T>(&self, transcript: &T) -> Result<()>
    where
        C: FieldContext,
        T: VerifierTranscript<C>,
    {
        if transcript.hash_type() != self.hash_type {
            return Err(PlonkError::HashTypeMismatch {
                expected: self.hash_type,
                found: transcript.hash_type(),
            });
        }
        if transcript.num_challenge_bytes() != self.num_challenge_bytes {
            return Err(PlonkError::ChallengeBytesMismatch {
                expected: self.num_challenge_bytes,
                found: transcript.num_challenge_bytes(),
            });
        }
        Ok(())
    }

    /// Run every widget's scalar pass, threading the alpha power through
    /// them, and return the power after the last widget.
    #[instrument(skip_all, level = "debug", fields(profile = self.name))]
    pub fn append_scalar_multiplication_inputs<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        scalars: &mut ScalarMap<C::Fr>,
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        self.validate_transcript::<C, T>(transcript)?;
        let timer = start_timer!(|| format!("{}::append_scalar_multiplication_inputs", self.name));
        let alpha = self.widgets.iter().try_fold(alpha_base, |alpha, widget| {
            widget.append_scalar_multiplication_inputs(
                cs,
                key,
                alpha,
                transcript,
                scalars,
                self.idpolys,
            )
        })?;
        end_timer!(timer);
        debug!(scalars = scalars.len(), "scalar multiplication inputs appended");
        Ok(alpha)
    }

    /// Run every widget's quotient pass, threading the alpha power through
    /// them, and return the power after the last widget.
    #[instrument(skip_all, level = "debug", fields(profile = self.name))]
    pub fn compute_quotient_evaluation_contribution<E, C, T>(
        &self,
        cs: &mut C,
        key: &VerificationKey<E>,
        alpha_base: C::Fr,
        transcript: &T,
        quotient: &mut C::Fr,
    ) -> Result<C::Fr>
    where
        E: VerifierCurve,
        C: FieldContext<Native = E::ScalarField>,
        T: VerifierTranscript<C>,
    {
        self.validate_transcript::<C, T>(transcript)?;
        let timer =
            start_timer!(|| format!("{}::compute_quotient_evaluation_contribution", self.name));
        let alpha = self.widgets.iter().try_fold(alpha_base, |alpha, widget| {
            widget.compute_quotient_evaluation_contribution(
                cs,
                key,
                alpha,
                transcript,
                quotient,
                self.idpolys,
            )
        })?;
        end_timer!(timer);
        Ok(alpha)
    }

    /// Fold a scalar map into `sum scalar * [commitment]`. Commitments come
    /// from the key, or from the transcript for the grand products.
    pub fn linearised_commitment<E: VerifierCurve>(
        &self,
        key: &VerificationKey<E>,
        transcript: &NativeTranscript<E::ScalarField>,
        scalars: &ScalarMap<E::ScalarField>,
    ) -> Result<E::G1> {
        let mut points = Vec::with_capacity(scalars.len());
        for label in scalars.keys() {
            let point = match key.commitment(label) {
                Some(point) => *point,
                None => transcript.group_element::<E::G1>(label)?,
            };
            points.push(point);
        }
        let scalars: Vec<&E::ScalarField> = scalars.values().collect();
        let points: Vec<&E::G1> = points.iter().collect();
        Ok(E::G1::multi_exp(&scalars, &points)?)
    }

    /// Check the quotient identity of a native proof and return the scalar
    /// map of its linearisation. The first widget receives `alpha^0 = 1`.
    pub fn verify<E: VerifierCurve>(
        &self,
        key: &VerificationKey<E>,
        transcript: &NativeTranscript<E::ScalarField>,
    ) -> Result<ScalarMap<E::ScalarField>> {
        let mut cs = NativeContext::<E::ScalarField>::new();
        let one = E::ScalarField::one();

        // 1. accumulate the quotient evaluation.
        let mut quotient = E::ScalarField::zero();
        self.compute_quotient_evaluation_contribution(&mut cs, key, one, transcript, &mut quotient)?;

        // 2. compare it with t(z) Z_H(z).
        let z = transcript.challenge("z", 0)?;
        let t_eval = transcript.field_element("t")?;
        let lagrange = compute_lagrange_evaluations(&mut cs, key, &z, &self.settings)?;
        if !quotient_identity_holds(&mut cs, &quotient, &t_eval, &lagrange.vanishing_poly) {
            debug!(profile = self.name, "quotient identity does not hold");
            return Err(PlonkError::VerificationError);
        }

        // 3. derive the linearisation scalars.
        let mut scalars = ScalarMap::new();
        self.append_scalar_multiplication_inputs(&mut cs, key, one, transcript, &mut scalars)?;
        Ok(scalars)
    }
}

#[cfg(test)]
mod test {
    use super::VerifierProfile;
    use crate::errors::PlonkError;
    use crate::plonk::{
        constraint_system::StandardCS,
        context::{FieldContext, NativeContext},
        helpers::{compute_lagrange_evaluations, quotient_identity_holds},
        settings::{ULTRA_SETTINGS, ULTRA_TO_STANDARD_SETTINGS},
        test_utils::{test_key, MapTranscript, ProofData, F},
        transcript::{CircuitTranscript, HashType, VerifierTranscript},
        widgets::{ScalarMap, WidgetKind},
    };
    use ark_std::collections::BTreeSet;
    use ultra_algebra::{bn254::BN254G1, prelude::*};

    fn profiles() -> [VerifierProfile; 2] {
        [VerifierProfile::ultra(), VerifierProfile::ultra_to_standard()]
    }

    /// Run each widget's quotient pass on its own, returning the contributions
    /// and the final alpha power.
    fn contributions(
        profile: &VerifierProfile,
        transcript: &MapTranscript,
        seed: F,
    ) -> (Vec<F>, F) {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 1);
        let mut cs = NativeContext::<F>::new();
        let mut alpha = seed;
        let mut result = vec![];
        for widget in profile.widgets() {
            let mut quotient = F::zero();
            alpha = widget
                .compute_quotient_evaluation_contribution(
                    &mut cs,
                    &key,
                    alpha,
                    transcript,
                    &mut quotient,
                    profile.idpolys(),
                )
                .unwrap();
            result.push(quotient);
        }
        (result, alpha)
    }

    #[test]
    fn profile_layout() {
        let names = [
            "permutation",
            "plookup",
            "arithmetic",
            "genperm_sort",
            "elliptic",
            "auxiliary",
        ];
        for profile in profiles() {
            let found: Vec<&str> = profile.widgets().iter().map(|w| w.name()).collect();
            assert_eq!(found, names);
            assert_eq!(profile.num_alpha_powers(), 18);
            assert_eq!(profile.hash_type(), HashType::PedersenBlake3s);
            assert_eq!(profile.num_challenge_bytes(), 16);
            assert!(profile.idpolys());
        }

        let ultra = VerifierProfile::ultra();
        let to_standard = VerifierProfile::ultra_to_standard();
        assert_eq!(ultra.widgets()[..2], to_standard.widgets()[..2]);
        assert_eq!(*ultra.settings(), ULTRA_SETTINGS);
        assert_eq!(*to_standard.settings(), ULTRA_TO_STANDARD_SETTINGS);
        for (a, b) in ultra.widgets()[2..].iter().zip(&to_standard.widgets()[2..]) {
            assert_eq!(*a.settings(), ULTRA_SETTINGS);
            assert_eq!(*b.settings(), ULTRA_TO_STANDARD_SETTINGS);
        }
        assert!(matches!(
            to_standard.widgets()[0],
            WidgetKind::Permutation(w) if w == Default::default()
        ));
    }

    #[test]
    fn alpha_powers_are_conserved() {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 1);
        let transcript = MapTranscript::random(&mut prng, 1);
        let alpha = transcript.challenge("alpha", 0);
        let alpha_0 = F::random(&mut prng);
        let expected = alpha_0.mul(&alpha.pow(&[18]));

        for profile in profiles() {
            let mut cs = NativeContext::<F>::new();
            let mut scalars = ScalarMap::new();
            let after_scalars = profile
                .append_scalar_multiplication_inputs(&mut cs, &key, alpha_0, &transcript, &mut scalars)
                .unwrap();
            let mut quotient = F::zero();
            let after_quotient = profile
                .compute_quotient_evaluation_contribution(
                    &mut cs,
                    &key,
                    alpha_0,
                    &transcript,
                    &mut quotient,
                )
                .unwrap();
            assert_eq!(after_scalars, expected);
            assert_eq!(after_quotient, expected);
        }
    }

    #[test]
    fn scalar_labels_are_disjoint() {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 1);
        let transcript = MapTranscript::random(&mut prng, 1);

        for profile in profiles() {
            let labels = profile.scalar_labels();
            let distinct: BTreeSet<&str> = labels.iter().copied().collect();
            assert_eq!(labels.len(), 12);
            assert_eq!(distinct.len(), labels.len());

            let mut cs = NativeContext::<F>::new();
            let mut scalars = ScalarMap::new();
            profile
                .append_scalar_multiplication_inputs(&mut cs, &key, F::one(), &transcript, &mut scalars)
                .unwrap();
            let inserted: BTreeSet<&str> = scalars.keys().map(|k| k.as_str()).collect();
            assert_eq!(inserted, distinct);

            // a second pass into the same map collides with the first
            let again = profile.append_scalar_multiplication_inputs(
                &mut cs,
                &key,
                F::one(),
                &transcript,
                &mut scalars,
            );
            assert_eq!(
                again,
                Err(PlonkError::DuplicateScalarLabel("Z_PERM".to_string()))
            );
        }
    }

    #[test]
    fn passes_are_deterministic() {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 1);
        let transcript = MapTranscript::random(&mut prng, 1);
        let profile = VerifierProfile::ultra();

        let run = || {
            let mut cs = NativeContext::<F>::new();
            let mut scalars = ScalarMap::new();
            profile
                .append_scalar_multiplication_inputs(&mut cs, &key, F::one(), &transcript, &mut scalars)
                .unwrap();
            let mut quotient = F::zero();
            profile
                .compute_quotient_evaluation_contribution(
                    &mut cs,
                    &key,
                    F::one(),
                    &transcript,
                    &mut quotient,
                )
                .unwrap();
            (
                bincode::serialize(&scalars).unwrap(),
                bincode::serialize(&quotient).unwrap(),
            )
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn ultra_to_standard_shares_grand_products() {
        let mut prng = test_rng();
        let transcript = MapTranscript::random(&mut prng, 1);
        let seed = F::random(&mut prng);

        let (ultra, ultra_alpha) = contributions(&VerifierProfile::ultra(), &transcript, seed);
        let (to_standard, to_standard_alpha) =
            contributions(&VerifierProfile::ultra_to_standard(), &transcript, seed);
        assert_eq!(ultra[..2], to_standard[..2]);
        assert_eq!(ultra_alpha, to_standard_alpha);
    }

    #[test]
    fn idpolys_only_changes_the_permutation() {
        let mut prng = test_rng();
        let transcript = MapTranscript::random(&mut prng, 1);
        let profile = VerifierProfile::ultra();

        let (with_ids, alpha_with) = contributions(&profile, &transcript, F::one());
        let (without_ids, alpha_without) =
            contributions(&profile.clone().with_idpolys(false), &transcript, F::one());
        assert_ne!(with_ids[0], without_ids[0]);
        assert_eq!(with_ids[1..], without_ids[1..]);
        assert_eq!(alpha_with, alpha_without);

        let key = test_key(&mut prng, 16, 1);
        let scalars = |profile: &VerifierProfile| {
            let mut cs = NativeContext::<F>::new();
            let mut scalars = ScalarMap::new();
            profile
                .append_scalar_multiplication_inputs(&mut cs, &key, F::one(), &transcript, &mut scalars)
                .unwrap();
            scalars
        };
        let mut with_ids = scalars(&profile);
        let mut without_ids = scalars(&profile.clone().with_idpolys(false));
        assert_ne!(with_ids.remove("Z_PERM"), without_ids.remove("Z_PERM"));
        assert_eq!(with_ids, without_ids);
    }

    #[test]
    fn honest_proof_is_accepted() {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 2);
        for profile in profiles() {
            let data = ProofData::honest(&mut prng, &profile, &key);
            let transcript = data.transcript(profile.hash_type());
            let scalars = profile.verify(&key, &transcript).unwrap();
            assert_eq!(scalars.len(), 12);

            let commitment = profile
                .linearised_commitment(&key, &transcript, &scalars)
                .unwrap();
            let mut expected = BN254G1::get_identity();
            for (label, scalar) in &scalars {
                let point = match key.commitment(label) {
                    Some(point) => *point,
                    None => data.commitments[label.as_str()],
                };
                expected = expected.add(&point.mul(scalar));
            }
            assert_eq!(commitment, expected);
        }
    }

    #[test]
    fn tampered_commitment_is_rejected() {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 2);
        let profile = VerifierProfile::ultra();
        let mut data = ProofData::honest(&mut prng, &profile, &key);
        data.commitments.insert("W_2", BN254G1::random(&mut prng));
        let transcript = data.transcript(profile.hash_type());
        assert_eq!(
            profile.verify(&key, &transcript),
            Err(PlonkError::VerificationError)
        );
    }

    #[test]
    fn hash_type_must_match() {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 0);
        let profile = VerifierProfile::ultra();
        let data = ProofData::honest(&mut prng, &profile, &key);
        let transcript = data.transcript(HashType::Keccak256);
        assert_eq!(
            profile.verify(&key, &transcript),
            Err(PlonkError::HashTypeMismatch {
                expected: HashType::PedersenBlake3s,
                found: HashType::Keccak256,
            })
        );

        let mut map = MapTranscript::random(&mut prng, 0);
        map.num_challenge_bytes = 32;
        let mut cs = NativeContext::<F>::new();
        let mut quotient = F::zero();
        assert_eq!(
            profile.compute_quotient_evaluation_contribution(
                &mut cs,
                &key,
                F::one(),
                &map,
                &mut quotient,
            ),
            Err(PlonkError::ChallengeBytesMismatch {
                expected: 16,
                found: 32,
            })
        );
    }

    #[test]
    fn in_circuit_matches_native() {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 2);
        let profile = VerifierProfile::ultra_to_standard();
        let data = ProofData::honest(&mut prng, &profile, &key);
        let transcript = data.transcript(profile.hash_type());
        let native_scalars = profile.verify(&key, &transcript).unwrap();

        let circuit = CircuitTranscript::new(&transcript);
        let mut cs = StandardCS::<F>::new();
        let one = cs.one_var();
        let mut quotient = cs.zero_var();
        profile
            .compute_quotient_evaluation_contribution(&mut cs, &key, one, &circuit, &mut quotient)
            .unwrap();
        let z = circuit.get_challenge_field_element(&mut cs, "z", 0).unwrap();
        let t_eval = circuit.get_field_element(&mut cs, "t").unwrap();
        let lagrange = compute_lagrange_evaluations(&mut cs, &key, &z, profile.settings()).unwrap();
        assert!(quotient_identity_holds(
            &mut cs,
            &quotient,
            &t_eval,
            &lagrange.vanishing_poly
        ));

        let mut scalars = ScalarMap::new();
        profile
            .append_scalar_multiplication_inputs(&mut cs, &key, one, &circuit, &mut scalars)
            .unwrap();
        assert_eq!(scalars.len(), native_scalars.len());
        for (label, var) in &scalars {
            assert_eq!(cs.value(var), native_scalars[label]);
        }

        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_ok());
    }

    #[test]
    fn missing_evaluation() {
        let mut prng = test_rng();
        let key = test_key(&mut prng, 16, 0);
        let profile = VerifierProfile::ultra();
        let mut data = ProofData::honest(&mut prng, &profile, &key);
        data.evaluations.remove("t");
        data.evaluations.remove("q_aux");
        let transcript = data.transcript(profile.hash_type());

        let mut native = NativeContext::<F>::new();
        let mut native_quotient = F::zero();
        assert_eq!(
            profile.compute_quotient_evaluation_contribution(
                &mut native,
                &key,
                F::one(),
                &transcript,
                &mut native_quotient,
            ),
            Err(PlonkError::MissingTranscriptElement("q_aux".to_string()))
        );

        // in-circuit the build completes but no witness satisfies it
        let circuit = CircuitTranscript::new(&transcript);
        let mut cs = StandardCS::<F>::new();
        let one = cs.one_var();
        let mut quotient = cs.zero_var();
        profile
            .compute_quotient_evaluation_contribution(&mut cs, &key, one, &circuit, &mut quotient)
            .unwrap();
        let witness = cs.get_and_clear_witness();
        assert!(cs.verify_witness(&witness, &[]).is_err());
    }
}
