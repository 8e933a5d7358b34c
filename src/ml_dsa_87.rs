//! ML-DSA-87: security category 5, the largest parameter set.

use crate::error::Result;
use crate::keys::{SigningKey, VerifyingKey};
use crate::params::{ParamSet, ML_DSA_87};
use rand_core::CryptoRngCore;

/// The ML-DSA-87 parameter set.
pub static PARAMS: &ParamSet = &ML_DSA_87;

/// Public key length in bytes.
pub const PK_LEN: usize = 2592;
/// Expanded secret key length in bytes.
pub const SK_LEN: usize = 4896;
/// Signature length in bytes.
pub const SIG_LEN: usize = 4627;

/// Generate an ML-DSA-87 key pair from the OS randomness source.
///
/// # Errors
/// Returns an error when the random number generator fails.
#[cfg(feature = "default-rng")]
pub fn try_keygen() -> Result<(SigningKey, VerifyingKey)> {
    SigningKey::generate(PARAMS, &mut rand_core::OsRng)
}

/// Generate an ML-DSA-87 key pair from the supplied generator.
///
/// # Errors
/// Returns an error when the random number generator fails.
pub fn try_keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<(SigningKey, VerifyingKey)> {
    SigningKey::generate(PARAMS, rng)
}

/// Derive an ML-DSA-87 key pair from a 32-byte seed.
///
/// # Errors
/// Returns an error when the seed is not exactly 32 bytes.
pub fn keygen_from_seed(seed: &[u8]) -> Result<(SigningKey, VerifyingKey)> {
    let sk = SigningKey::from_seed(PARAMS, seed)?;
    let vk = sk.verifying_key();
    Ok((sk, vk))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand_chacha::rand_core::SeedableRng;

    #[test]
    fn smoke() {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(87);
        let (sk, vk) = try_keygen_with_rng(&mut rng).unwrap();
        assert_eq!(vk.encode().len(), PK_LEN);
        assert_eq!(sk.encode_expanded().len(), SK_LEN);
        let sig = sk.sign_deterministic(b"hello", &[]).unwrap();
        assert_eq!(sig.len(), SIG_LEN);
        assert!(vk.verify(b"hello", &sig, &[]));
        assert!(!vk.verify(b"hello", &sig, b"x"));
    }
}
