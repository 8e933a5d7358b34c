//! ML-DSA-44: security category 2, the smallest parameter set.
//!
//! Keys and signatures produced here use [`PARAMS`]; the handles are the
//! shared [`SigningKey`] / [`VerifyingKey`] types, so everything beyond
//! key generation lives on those.

use crate::error::Result;
use crate::keys::{SigningKey, VerifyingKey};
use crate::params::{ParamSet, ML_DSA_44};
use rand_core::CryptoRngCore;

/// The ML-DSA-44 parameter set.
pub static PARAMS: &ParamSet = &ML_DSA_44;

/// Public key length in bytes.
pub const PK_LEN: usize = 1312;
/// Expanded secret key length in bytes.
pub const SK_LEN: usize = 2560;
/// Signature length in bytes.
pub const SIG_LEN: usize = 2420;

/// Generate an ML-DSA-44 key pair from the OS randomness source.
///
/// # Errors
/// Returns an error when the random number generator fails.
#[cfg(feature = "default-rng")]
pub fn try_keygen() -> Result<(SigningKey, VerifyingKey)> {
    SigningKey::generate(PARAMS, &mut rand_core::OsRng)
}

/// Generate an ML-DSA-44 key pair from the supplied generator.
///
/// # Errors
/// Returns an error when the random number generator fails.
pub fn try_keygen_with_rng(rng: &mut impl CryptoRngCore) -> Result<(SigningKey, VerifyingKey)> {
    SigningKey::generate(PARAMS, rng)
}

/// Derive an ML-DSA-44 key pair from a 32-byte seed.
///
/// # Errors
/// Returns an error when the seed is not exactly 32 bytes.
pub fn keygen_from_seed(seed: &[u8]) -> Result<(SigningKey, VerifyingKey)> {
    let sk = SigningKey::from_seed(PARAMS, seed)?;
    let vk = sk.verifying_key();
    Ok((sk, vk))
}
