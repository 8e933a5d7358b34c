//! Trait seams over the key types, so callers can hold signers and
//! verifiers behind a common interface regardless of parameter set.

use crate::error::Result;
use crate::keys::{SigningKey, VerifyingKey};
use alloc::vec::Vec;
use rand_core::CryptoRngCore;
#[cfg(feature = "default-rng")]
use rand_core::OsRng;

/// Message signing over the ML-DSA context-framed interface.
pub trait Signer {
    /// Sign `message` bound to `ctx` (at most 255 bytes) using the
    /// supplied randomness source.
    ///
    /// # Errors
    /// Returns an error for an oversized context or a failing generator.
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        message: &[u8],
        ctx: &[u8],
    ) -> Result<Vec<u8>>;

    /// Sign using the operating system randomness source.
    ///
    /// # Errors
    /// Returns an error for an oversized context or a failing generator.
    #[cfg(feature = "default-rng")]
    fn try_sign(&self, message: &[u8], ctx: &[u8]) -> Result<Vec<u8>> {
        self.try_sign_with_rng(&mut OsRng, message, ctx)
    }
}

/// Signature verification over the ML-DSA context-framed interface.
pub trait Verifier {
    /// True iff `sig` is a valid signature over `message` bound to `ctx`.
    /// Never panics and never errors; malformed input is invalid input.
    fn verify(&self, message: &[u8], sig: &[u8], ctx: &[u8]) -> bool;
}

impl Signer for SigningKey {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        message: &[u8],
        ctx: &[u8],
    ) -> Result<Vec<u8>> {
        self.sign(rng, message, ctx)
    }
}

impl Verifier for VerifyingKey {
    fn verify(&self, message: &[u8], sig: &[u8], ctx: &[u8]) -> bool {
        VerifyingKey::verify(self, message, sig, ctx)
    }
}
