use ark_std::collections::BTreeMap;
use criterion::{criterion_group, criterion_main, Criterion};
use ultra_algebra::{
    bn254::{BN254Scalar, BN254G1},
    prelude::*,
};
use ultra_plonk::plonk::{
    context::NativeContext,
    curve::Bn254,
    key::VerificationKey,
    settings::NUM_CHALLENGE_BYTES,
    transcript::{Manifest, NativeTranscript, ULTRA_EVALUATIONS},
    verifier::VerifierProfile,
    widgets::ScalarMap,
};

const NUM_PUBLIC_INPUTS: usize = 4;

fn random_transcript<R: CryptoRng + RngCore>(
    prng: &mut R,
    profile: &VerifierProfile,
) -> NativeTranscript<BN254Scalar> {
    let mut transcript = NativeTranscript::new(
        Manifest::ultra::<Bn254>(NUM_PUBLIC_INPUTS),
        profile.hash_type(),
        NUM_CHALLENGE_BYTES,
    )
    .unwrap();
    transcript
        .add_element("circuit_size", 1024u32.to_be_bytes().to_vec())
        .unwrap();
    transcript
        .add_element("public_input_size", (NUM_PUBLIC_INPUTS as u32).to_be_bytes().to_vec())
        .unwrap();
    transcript.apply_fiat_shamir("init").unwrap();

    let public_inputs: Vec<BN254Scalar> = (0..NUM_PUBLIC_INPUTS)
        .map(|_| BN254Scalar::random(prng))
        .collect();
    transcript
        .add_field_element_vector("public_inputs", &public_inputs)
        .unwrap();
    let rounds: [(&[&str], &str); 4] = [
        (&["W_1", "W_2", "W_3"], "eta"),
        (&["W_4", "S"], "beta"),
        (&["Z_PERM", "Z_LOOKUP"], "alpha"),
        (&["T_1", "T_2", "T_3", "T_4"], "z"),
    ];
    for (labels, challenge) in rounds {
        for label in labels {
            transcript
                .add_commitment(label, &BN254G1::random(prng))
                .unwrap();
        }
        transcript.apply_fiat_shamir(challenge).unwrap();
    }
    for name in ULTRA_EVALUATIONS {
        transcript
            .add_field_element(name, &BN254Scalar::random(prng))
            .unwrap();
    }
    transcript
}

fn bench_verifier(c: &mut Criterion) {
    let mut prng = test_rng();
    let key = VerificationKey::<Bn254>::new(1024, NUM_PUBLIC_INPUTS, BTreeMap::new()).unwrap();

    let mut verifier_group = c.benchmark_group("bench_verifier");
    for profile in [VerifierProfile::ultra(), VerifierProfile::ultra_to_standard()] {
        let transcript = random_transcript(&mut prng, &profile);

        verifier_group.bench_function(format!("{}/scalars", profile.name()), |b| {
            b.iter(|| {
                let mut cs = NativeContext::<BN254Scalar>::new();
                let mut scalars = ScalarMap::new();
                profile
                    .append_scalar_multiplication_inputs(
                        &mut cs,
                        &key,
                        BN254Scalar::one(),
                        &transcript,
                        &mut scalars,
                    )
                    .unwrap()
            })
        });

        verifier_group.bench_function(format!("{}/quotient", profile.name()), |b| {
            b.iter(|| {
                let mut cs = NativeContext::<BN254Scalar>::new();
                let mut quotient = BN254Scalar::zero();
                profile
                    .compute_quotient_evaluation_contribution(
                        &mut cs,
                        &key,
                        BN254Scalar::one(),
                        &transcript,
                        &mut quotient,
                    )
                    .unwrap()
            })
        });
    }
    verifier_group.finish();
}

criterion_group!(benches, bench_verifier);
criterion_main!(benches);
