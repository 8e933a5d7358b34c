//! Signing and verification engines (FIPS 204 Algorithms 2, 3, 7 and 8).
//!
//! Signing runs the Fiat-Shamir-with-aborts loop: draw a fresh mask,
//! commit, derive the challenge, and restart whenever the response or hint
//! would leak the secret. The loop carries no iteration bound (FIPS 204
//! Appendix C advises against one); its exit is governed entirely by the
//! rejection probabilities of the parameter set.

use crate::encodings::{sig_decode, sig_encode};
use crate::error::{Error, Result};
use crate::field::FieldElement;
use crate::hash::h;
use crate::keys::{SigningKey, VerifyingKey};
use crate::ntt::{inv_ntt_vec, matrix_vector_ntt, ntt, ntt_vec, scalar_vector_ntt, sub_vector_ntt};
use crate::ring::{
    add_vec, from_symmetric_vec, high_bits_vec, infinity_norm_vec, low_bits_vec, negate_vec,
    sub_vec, Rq, Rz,
};
use crate::rounding::{make_hint, use_hint, w1_encode};
use crate::sample::{expand_a, expand_mask, sample_in_ball};
use crate::D;
use alloc::vec::Vec;
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// M' = 0x00 || len(ctx) || ctx || message, the pure-ML-DSA domain framing.
fn message_representative(ctx: &[u8], message: &[u8]) -> Vec<u8> {
    debug_assert!(ctx.len() <= 255);
    let mut m_prime = Vec::with_capacity(2 + ctx.len() + message.len());
    m_prime.push(0u8);
    m_prime.push(ctx.len() as u8);
    m_prime.extend_from_slice(ctx);
    m_prime.extend_from_slice(message);
    m_prime
}

impl SigningKey {
    /// Sign `message` bound to `ctx`, drawing the 32 bytes of per-signature
    /// randomness from `rng`.
    ///
    /// # Errors
    /// [`Error::InvalidContext`] when `ctx` exceeds 255 bytes,
    /// [`Error::RandomnessFailure`] when the generator fails.
    pub fn sign(
        &self,
        rng: &mut impl CryptoRngCore,
        message: &[u8],
        ctx: &[u8],
    ) -> Result<Vec<u8>> {
        if ctx.len() > 255 {
            return Err(Error::InvalidContext);
        }
        let mut rnd = [0u8; 32];
        rng.try_fill_bytes(&mut rnd)
            .map_err(|_| Error::RandomnessFailure)?;
        let sig = self.sign_internal(&message_representative(ctx, message), &rnd);
        rnd.zeroize();
        Ok(sig)
    }

    /// The deterministic variant: per-signature randomness is all zeros.
    ///
    /// # Errors
    /// [`Error::InvalidContext`] when `ctx` exceeds 255 bytes.
    pub fn sign_deterministic(&self, message: &[u8], ctx: &[u8]) -> Result<Vec<u8>> {
        if ctx.len() > 255 {
            return Err(Error::InvalidContext);
        }
        Ok(self.sign_internal(&message_representative(ctx, message), &[0u8; 32]))
    }

    /// FIPS 204 Algorithm 7: sign a prepared message representative with
    /// explicit randomness. This is the ACVP "internal" interface; callers
    /// normally want [`SigningKey::sign`].
    #[must_use]
    pub fn sign_internal(&self, m_prime: &[u8], rnd: &[u8; 32]) -> Vec<u8> {
        let cfg = self.cfg;
        let s1_hat = ntt_vec(&self.s1);
        let s2_hat = ntt_vec(&self.s2);
        let t0_hat = ntt_vec(&self.t0);
        let a_hat = expand_a(cfg, &self.rho);

        // mu <- H(tr || M', 64)
        let mut mu = [0u8; 64];
        h(&[&self.tr, m_prime], &mut mu);

        // rho'' <- H(K || rnd || mu, 64)
        let mut rho_pp = [0u8; 64];
        h(&[&self.cap_k, rnd, &mu], &mut rho_pp);

        let gamma1_beta = cfg.gamma1() - u32::from(cfg.beta);
        let gamma2_beta = cfg.gamma2 - u32::from(cfg.beta);

        let mut kappa: u16 = 0;
        let sig = loop {
            let y = expand_mask(cfg, &rho_pp, kappa);
            kappa = kappa.wrapping_add(u16::from(cfg.l));

            let w = inv_ntt_vec(&matrix_vector_ntt(&a_hat, &ntt_vec(&y)));
            let w1 = high_bits_vec(&w, cfg.gamma2);

            // Commitment hash binds mu to the encoded high bits.
            let mut c_tilde = alloc::vec![0u8; usize::from(cfg.lambda) / 4];
            h(&[&mu, &w1_encode(cfg, &w1)], &mut c_tilde);

            let c = Rq::from_symmetric(&sample_in_ball(cfg, &c_tilde));
            let c_hat = ntt(&c);

            let cs1 = inv_ntt_vec(&scalar_vector_ntt(&c_hat, &s1_hat));
            let z = add_vec(&y, &cs1);
            if infinity_norm_vec(&z) >= gamma1_beta {
                continue;
            }

            let cs2 = inv_ntt_vec(&scalar_vector_ntt(&c_hat, &s2_hat));
            let w_cs2 = sub_vec(&w, &cs2);
            let r0 = low_bits_vec(&w_cs2, cfg.gamma2);
            if r0.iter().map(Rz::infinity_norm).max().unwrap_or(0) >= gamma2_beta {
                continue;
            }

            let ct0 = inv_ntt_vec(&scalar_vector_ntt(&c_hat, &t0_hat));
            if infinity_norm_vec(&ct0) >= cfg.gamma2 {
                continue;
            }
            let Some(hints) = make_hint(cfg, &negate_vec(&ct0), &add_vec(&w_cs2, &ct0)) else {
                continue;
            };

            let z_sym: Vec<Rz> = z.iter().map(Rq::to_symmetric).collect();
            break sig_encode(cfg, &c_tilde, &z_sym, &hints);
        };
        rho_pp.zeroize();
        mu.zeroize();
        sig
    }
}

impl VerifyingKey {
    /// Verify `sig` over `message` bound to `ctx`. Never errors: malformed
    /// input of any kind is simply an invalid signature.
    #[must_use]
    pub fn verify(&self, message: &[u8], sig: &[u8], ctx: &[u8]) -> bool {
        if ctx.len() > 255 {
            return false;
        }
        self.verify_internal(&message_representative(ctx, message), sig)
    }

    /// FIPS 204 Algorithm 8: verify against a prepared message
    /// representative. This is the ACVP "internal" interface.
    #[must_use]
    pub fn verify_internal(&self, m_prime: &[u8], sigma: &[u8]) -> bool {
        let cfg = self.cfg;
        let Ok((c_tilde, z, hints)) = sig_decode(cfg, sigma) else {
            return false;
        };

        let z_norm = z.iter().map(Rz::infinity_norm).max().unwrap_or(0);
        if z_norm > cfg.gamma1() - u32::from(cfg.beta) {
            return false;
        }

        let a_hat = expand_a(cfg, &self.rho);

        let mut tr = [0u8; 64];
        h(&[&self.encode()], &mut tr);
        let mut mu = [0u8; 64];
        h(&[&tr, m_prime], &mut mu);

        let c = Rq::from_symmetric(&sample_in_ball(cfg, &c_tilde));
        let c_hat = ntt(&c);
        let z_hat = ntt_vec(&from_symmetric_vec(&z));

        // t1 * 2^d, carried into the NTT domain. Coefficients stay below q.
        let two_d = FieldElement::new_reduced(1 << D);
        let t1_2d: Vec<Rq> = self
            .t1
            .iter()
            .map(|poly| Rq::from_symmetric(poly).scalar_mul(two_d))
            .collect();

        // w_approx = invNTT(A*z - c * t1*2^d)
        let w_approx = inv_ntt_vec(&sub_vector_ntt(
            &matrix_vector_ntt(&a_hat, &z_hat),
            &scalar_vector_ntt(&c_hat, &ntt_vec(&t1_2d)),
        ));

        let w1 = use_hint(cfg, &hints, &w_approx);
        let mut c_tilde_prime = alloc::vec![0u8; usize::from(cfg.lambda) / 4];
        h(&[&mu, &w1_encode(cfg, &w1)], &mut c_tilde_prime);

        bool::from(c_tilde.ct_eq(&c_tilde_prime))
    }
}
