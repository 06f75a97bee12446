use rand_chacha::{
    rand_core::{CryptoRng, RngCore, SeedableRng},
    ChaChaRng,
};

/// Environment variable that pins `test_rng` to a fixed seed when set to `1`.
pub const DETERMINISTIC_TEST_RNG: &str = "DETERMINISTIC_TEST_RNG";

fn fixed_seed_rng() -> ChaChaRng {
    let mut seed = [0u8; 32];
    seed[..8].copy_from_slice(b"ultra-rs");
    ChaChaRng::from_seed(seed)
}

/// Should be used only for tests, not for any real world usage.
#[cfg(not(feature = "std"))]
pub fn test_rng() -> impl RngCore + CryptoRng {
    fixed_seed_rng()
}

/// Should be used only for tests, not for any real world usage.
#[cfg(feature = "std")]
pub fn test_rng() -> impl RngCore + CryptoRng {
    let is_deterministic = std::env::var(DETERMINISTIC_TEST_RNG)
        .map(|val| val == "1")
        .unwrap_or(false);
    if is_deterministic {
        fixed_seed_rng()
    } else {
        ChaChaRng::from_entropy()
    }
}
