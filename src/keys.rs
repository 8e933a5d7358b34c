//! Key generation and the signing/verifying key handles (FIPS 204
//! Algorithms 1 and 6, plus the key codecs of section 7.2).
//!
//! The canonical signing key is the 32-byte seed. Construction from a seed
//! derives and caches every expanded field; the expanded serialized form
//! exists for interoperability, and decoding it re-derives `t0`, `t1` and
//! `tr` from the secret vectors and insists the re-encoding matches the
//! input byte-for-byte.

use crate::encodings::{pk_decode, pk_encode, sk_encode, sk_parse};
use crate::error::{Error, Result};
use crate::hash::h;
use crate::ntt::{inv_ntt_vec, matrix_vector_ntt, ntt_vec};
use crate::params::ParamSet;
use crate::ring::{add_vec, from_symmetric_vec, power2_round_vec, Rq, Rz};
use crate::sample::{expand_a, expand_s};
use alloc::vec::Vec;
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A public verifying key: the matrix seed rho and the rounded public
/// vector t1. Immutable after construction.
#[derive(Debug, Clone)]
pub struct VerifyingKey {
    pub(crate) cfg: &'static ParamSet,
    pub(crate) rho: [u8; 32],
    pub(crate) t1: Vec<Rz>,
}

/// A secret signing key with all derived fields cached.
///
/// Prefer constructing (and storing) these via the 32-byte seed; the
/// expanded encoding is accepted for interoperability but costs a full key
/// derivation to validate.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SigningKey {
    #[zeroize(skip)]
    pub(crate) cfg: &'static ParamSet,
    seed: Option<[u8; 32]>,
    pub(crate) rho: [u8; 32],
    pub(crate) cap_k: [u8; 32],
    pub(crate) tr: [u8; 64],
    pub(crate) s1: Vec<Rq>,
    pub(crate) s2: Vec<Rq>,
    pub(crate) t0: Vec<Rq>,
    pub(crate) t1: Vec<Rz>,
}

impl VerifyingKey {
    /// Parse a verifying key from its encoded form.
    ///
    /// # Errors
    /// [`Error::InvalidInputLength`] when the input is not `cfg.pk_size`
    /// bytes.
    pub fn decode(cfg: &'static ParamSet, bytes: &[u8]) -> Result<Self> {
        let (rho, t1) = pk_decode(cfg, bytes)?;
        Ok(Self { cfg, rho, t1 })
    }

    /// Serialize: rho followed by the packed t1 polynomials.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        pk_encode(self.cfg, &self.rho, &self.t1)
    }

    /// The parameter set this key belongs to.
    #[must_use]
    pub fn parameter_set(&self) -> &'static ParamSet {
        self.cfg
    }
}

impl SigningKey {
    /// FIPS 204 Algorithm 6: derive a signing key from a 32-byte seed.
    ///
    /// # Errors
    /// [`Error::InvalidSeed`] when `seed` is not exactly 32 bytes.
    pub fn from_seed(cfg: &'static ParamSet, seed: &[u8]) -> Result<Self> {
        let seed: [u8; 32] = seed.try_into().map_err(|_| Error::InvalidSeed)?;

        // (rho, rho', K) <- H(seed || k || l, 128)
        let mut expanded = [0u8; 128];
        h(&[&seed, &[cfg.k, cfg.l]], &mut expanded);
        let mut rho = [0u8; 32];
        rho.copy_from_slice(&expanded[..32]);
        let mut rho_prime = [0u8; 64];
        rho_prime.copy_from_slice(&expanded[32..96]);
        let mut cap_k = [0u8; 32];
        cap_k.copy_from_slice(&expanded[96..]);

        let (s1, s2) = expand_s(cfg, &rho_prime);
        expanded.zeroize();
        rho_prime.zeroize();

        Ok(Self::assemble(cfg, Some(seed), rho, cap_k, s1, s2))
    }

    /// FIPS 204 Algorithm 1: generate a fresh key pair from `rng`.
    ///
    /// # Errors
    /// [`Error::RandomnessFailure`] when the generator cannot produce 32
    /// bytes.
    pub fn generate(
        cfg: &'static ParamSet,
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self, VerifyingKey)> {
        let mut seed = [0u8; 32];
        rng.try_fill_bytes(&mut seed)
            .map_err(|_| Error::RandomnessFailure)?;
        let sk = Self::from_seed(cfg, &seed)?;
        seed.zeroize();
        let vk = sk.verifying_key();
        Ok((sk, vk))
    }

    /// Parse an expanded secret key, re-deriving `t0`, `t1` and `tr` from
    /// the secret vectors and rejecting inputs whose re-encoding differs.
    ///
    /// # Errors
    /// [`Error::InvalidInputLength`] on a wrong-sized input,
    /// [`Error::Malformed`] when s1/s2 coefficients fall outside
    /// `[-eta, eta]`, and [`Error::KeyRoundTripMismatch`] when the claimed
    /// `tr`/`t0` fields do not match the re-derived key.
    pub fn decode_expanded(cfg: &'static ParamSet, bytes: &[u8]) -> Result<Self> {
        let parts = sk_parse(cfg, bytes)?;
        let s1 = from_symmetric_vec(&parts.s1);
        let s2 = from_symmetric_vec(&parts.s2);
        let sk = Self::assemble(cfg, None, parts.rho, parts.cap_k, s1, s2);

        let reencoded = sk.encode_expanded();
        if !bool::from(reencoded.ct_eq(bytes)) {
            return Err(Error::KeyRoundTripMismatch);
        }
        Ok(sk)
    }

    /// Serialize the expanded form. Callers storing keys long-term should
    /// prefer [`SigningKey::seed_bytes`].
    #[must_use]
    pub fn encode_expanded(&self) -> Vec<u8> {
        let s1: Vec<Rz> = self.s1.iter().map(Rq::to_symmetric).collect();
        let s2: Vec<Rz> = self.s2.iter().map(Rq::to_symmetric).collect();
        let t0: Vec<Rz> = self.t0.iter().map(Rq::to_symmetric).collect();
        sk_encode(self.cfg, &self.rho, &self.cap_k, &self.tr, &s1, &s2, &t0)
    }

    /// The canonical 32-byte form, available when this key was built from
    /// a seed (not when decoded from the expanded encoding).
    #[must_use]
    pub fn seed_bytes(&self) -> Option<&[u8; 32]> {
        self.seed.as_ref()
    }

    /// The corresponding public key.
    #[must_use]
    pub fn verifying_key(&self) -> VerifyingKey {
        VerifyingKey {
            cfg: self.cfg,
            rho: self.rho,
            t1: self.t1.clone(),
        }
    }

    /// The parameter set this key belongs to.
    #[must_use]
    pub fn parameter_set(&self) -> &'static ParamSet {
        self.cfg
    }

    /// Complete a key from its secret vectors: t = A*s1 + s2 rounds into
    /// (t1, t0), and tr hashes the encoded public key.
    fn assemble(
        cfg: &'static ParamSet,
        seed: Option<[u8; 32]>,
        rho: [u8; 32],
        cap_k: [u8; 32],
        s1: Vec<Rq>,
        s2: Vec<Rq>,
    ) -> Self {
        let a_hat = expand_a(cfg, &rho);
        let s1_hat = ntt_vec(&s1);
        let t = add_vec(&inv_ntt_vec(&matrix_vector_ntt(&a_hat, &s1_hat)), &s2);
        let (t1, t0) = power2_round_vec(&t);
        let t0 = from_symmetric_vec(&t0);

        let mut tr = [0u8; 64];
        h(&[&pk_encode(cfg, &rho, &t1)], &mut tr);

        Self {
            cfg,
            seed,
            rho,
            cap_k,
            tr,
            s1,
            s2,
            t0,
            t1,
        }
    }
}
