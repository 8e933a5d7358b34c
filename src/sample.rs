//! Deterministic samplers (FIPS 204 Algorithms 29-34).
//!
//! Every sampler is a pure function of its seed material; all randomness
//! flows in through SHAKE streams that are created fresh per call and
//! never reset between squeezes.

use crate::field;
use crate::hash::{shake128_xof, shake256_xof};
use crate::pack::bit_unpack;
use crate::params::ParamSet;
use crate::ring::{Rq, Rz, Tq};
use crate::N;
use alloc::vec::Vec;
use sha3::digest::XofReader;

/// Algorithm 29: sample the sparse challenge polynomial with exactly tau
/// coefficients in {-1, +1}.
///
/// The first 8 squeezed bytes supply sign bits; each remaining draw is a
/// Fisher-Yates style index rejection against the growing suffix.
pub(crate) fn sample_in_ball(cfg: &ParamSet, seed: &[u8]) -> Rz {
    let mut c = Rz::ZERO;
    let mut ctx = shake256_xof(&[seed]);

    let mut signs = [0u8; 8];
    ctx.read(&mut signs);

    let tau = usize::from(cfg.tau);
    let mut j = [0u8; 1];
    for i in (N - tau)..N {
        ctx.read(&mut j);
        while usize::from(j[0]) > i {
            ctx.read(&mut j);
        }
        let j = usize::from(j[0]);
        c.0[i] = c.0[j];
        let idx = i + tau - N;
        let bit = (signs[idx / 8] >> (idx & 7)) & 1;
        c.0[j] = 1 - 2 * i32::from(bit);
    }
    c
}

/// Algorithm 30: a uniform T_q element by rejection from a SHAKE-128
/// stream, three bytes per candidate.
pub(crate) fn rej_ntt_poly(seeds: &[&[u8]]) -> Tq {
    let mut a_hat = Tq::ZERO;
    let mut ctx = shake128_xof(seeds);
    let mut buf = [0u8; 3];
    let mut j = 0;
    while j < N {
        ctx.read(&mut buf);
        if let Some(coeff) = field::from_three_bytes(buf[0], buf[1], buf[2]) {
            a_hat.0[j] = coeff;
            j += 1;
        }
    }
    a_hat
}

/// Algorithm 31: a polynomial with coefficients in `[-eta, eta]` by nibble
/// rejection from a SHAKE-256 stream.
pub(crate) fn rej_bounded_poly(eta: u32, seeds: &[&[u8]]) -> Rq {
    let mut a = Rq::ZERO;
    let mut ctx = shake256_xof(seeds);
    let mut z = [0u8; 1];
    let mut j = 0;
    while j < N {
        ctx.read(&mut z);
        if let Some(z0) = field::from_half_byte(eta, z[0] & 0x0f) {
            a.0[j] = z0;
            j += 1;
        }
        if j < N {
            if let Some(z1) = field::from_half_byte(eta, z[0] >> 4) {
                a.0[j] = z1;
                j += 1;
            }
        }
    }
    a
}

/// Algorithm 32: the k x l public matrix in NTT form. The SHAKE-128 domain
/// separator is rho || byte(column) || byte(row).
pub(crate) fn expand_a(cfg: &ParamSet, rho: &[u8; 32]) -> Vec<Vec<Tq>> {
    (0..cfg.k)
        .map(|r| {
            (0..cfg.l)
                .map(|s| rej_ntt_poly(&[&rho[..], &[s, r]]))
                .collect()
        })
        .collect()
}

/// Algorithm 33: the secret vectors s1 (length l) and s2 (length k), each
/// polynomial seeded by rho' || uint16-le(index).
pub(crate) fn expand_s(cfg: &ParamSet, rho_prime: &[u8; 64]) -> (Vec<Rq>, Vec<Rq>) {
    let eta = cfg.eta();
    let l = u16::from(cfg.l);
    let s1 = (0..l)
        .map(|r| rej_bounded_poly(eta, &[&rho_prime[..], &r.to_le_bytes()]))
        .collect();
    let s2 = (0..u16::from(cfg.k))
        .map(|r| rej_bounded_poly(eta, &[&rho_prime[..], &(l + r).to_le_bytes()]))
        .collect();
    (s1, s2)
}

/// Algorithm 34: the signing mask y, an l-vector with coefficients in
/// `(-gamma1, gamma1]`, seeded by rho'' || uint16-le(kappa + r).
pub(crate) fn expand_mask(cfg: &ParamSet, rho_pp: &[u8; 64], kappa: u16) -> Vec<Rq> {
    let c = 1 + usize::from(cfg.log_gamma1);
    let mut v = alloc::vec![0u8; 32 * c];
    (0..u16::from(cfg.l))
        .map(|r| {
            let nonce = kappa.wrapping_add(r);
            let mut ctx = shake256_xof(&[&rho_pp[..], &nonce.to_le_bytes()]);
            ctx.read(&mut v);
            Rq::from_symmetric(&bit_unpack(&v, usize::from(cfg.log_gamma1)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{ML_DSA_44, ML_DSA_65, ML_DSA_87};
    use crate::Q;

    const SEED: [u8; 32] = [
        0xf6, 0x96, 0x48, 0x40, 0x48, 0xec, 0x21, 0xf9, 0x6c, 0xf5, 0x0a, 0x56, 0xd0, 0x75, 0x9c,
        0x44, 0x8f, 0x37, 0x79, 0x75, 0x2f, 0x03, 0x83, 0xd3, 0x74, 0x49, 0x69, 0x06, 0x94, 0xcf,
        0x7a, 0x68,
    ];

    #[test]
    fn rej_bounded_poly_stays_in_range() {
        for eta in [2u32, 4] {
            let a = rej_bounded_poly(eta, &[&SEED]);
            let bound = eta as i32;
            for c in a.0 {
                let v = c.to_symmetric();
                assert!(v >= -bound && v <= bound, "coefficient {v} out of range");
            }
        }
    }

    #[test]
    fn rej_ntt_poly_stays_below_q() {
        let a = rej_ntt_poly(&[&SEED]);
        for c in a.0 {
            assert!(c.to_reduced() < Q);
        }
    }

    #[test]
    fn sample_in_ball_weight_is_tau() {
        for cfg in [&ML_DSA_44, &ML_DSA_65, &ML_DSA_87] {
            let c = sample_in_ball(cfg, &SEED);
            let mut weight = 0;
            for v in c.0 {
                if v != 0 {
                    assert!(v == 1 || v == -1);
                    weight += 1;
                }
            }
            assert_eq!(weight, usize::from(cfg.tau));
        }
    }

    #[test]
    fn samplers_are_deterministic() {
        assert_eq!(rej_ntt_poly(&[&SEED]), rej_ntt_poly(&[&SEED]));
        assert_eq!(
            rej_bounded_poly(2, &[&SEED]).to_symmetric(),
            rej_bounded_poly(2, &[&SEED]).to_symmetric()
        );
        let mut other = SEED;
        other[0] ^= 1;
        assert_ne!(rej_ntt_poly(&[&SEED]), rej_ntt_poly(&[&other]));
    }

    #[test]
    fn expand_a_shape_and_separation() {
        let a = expand_a(&ML_DSA_44, &SEED);
        assert_eq!(a.len(), 4);
        for row in &a {
            assert_eq!(row.len(), 4);
        }
        // Distinct positions draw from distinct streams.
        assert_ne!(a[0][0], a[0][1]);
        assert_ne!(a[0][0], a[1][0]);
    }

    #[test]
    fn expand_s_shapes_and_bounds() {
        let mut rho_prime = [0u8; 64];
        rho_prime[..32].copy_from_slice(&SEED);
        for cfg in [&ML_DSA_44, &ML_DSA_65] {
            let (s1, s2) = expand_s(cfg, &rho_prime);
            assert_eq!(s1.len(), usize::from(cfg.l));
            assert_eq!(s2.len(), usize::from(cfg.k));
            let bound = cfg.eta();
            for p in s1.iter().chain(&s2) {
                assert!(p.infinity_norm() <= bound);
            }
        }
    }

    #[test]
    fn expand_mask_bounds_and_nonces() {
        let mut rho_pp = [0u8; 64];
        rho_pp[32..].copy_from_slice(&SEED);
        for cfg in [&ML_DSA_44, &ML_DSA_87] {
            let y = expand_mask(cfg, &rho_pp, 0);
            assert_eq!(y.len(), usize::from(cfg.l));
            for p in &y {
                // Coefficients lie in (-gamma1, gamma1].
                assert!(p.infinity_norm() <= cfg.gamma1());
            }
            // A different kappa yields a different mask.
            assert_ne!(expand_mask(cfg, &rho_pp, u16::from(cfg.l))[0], y[0]);
        }
    }
}
