//! Hint generation and application (FIPS 204 Algorithms 28, 39, 40).
//!
//! Hints let the verifier reconstruct the signer's commitment from the
//! approximation Az - c*t1*2^d. MakeHint and UseHint operate on public
//! signature material, but MakeHint runs inside the signing loop where its
//! inputs are secret-derived, so its per-coefficient decision is computed
//! with masks rather than branches.

use crate::field::FieldElement;
use crate::pack::simple_bit_pack;
use crate::params::ParamSet;
use crate::ring::{R2, Rq, Rz};
use crate::{N, Q};
use alloc::vec::Vec;

/// Algorithm 28: concatenated SimpleBitPack of the k commitment
/// polynomials at the parameter set's w1 width.
pub(crate) fn w1_encode(cfg: &ParamSet, w1: &[Rz]) -> Vec<u8> {
    debug_assert_eq!(w1.len(), usize::from(cfg.k));
    let mut out = Vec::with_capacity(usize::from(cfg.k) * 32 * usize::from(cfg.w1_bits));
    for poly in w1 {
        out.extend_from_slice(&simple_bit_pack(poly, usize::from(cfg.w1_bits)));
    }
    out
}

/// One hint bit: 1 iff adding `z` to `r` changes the high bits.
#[inline]
fn make_hint_coeff(cfg: &ParamSet, z: FieldElement, r: FieldElement) -> u8 {
    let r1 = r.high_bits(cfg.gamma2);
    let v1 = r.add(z).high_bits(cfg.gamma2);
    // Branch-free r1 != v1.
    let d = r1 ^ v1;
    ((d | d.wrapping_neg()) as u32 >> 31) as u8
}

/// Algorithm 39, vectorized: the hint for `z` against `r`, or `None` when
/// the total Hamming weight exceeds omega and the signing loop must retry.
pub(crate) fn make_hint(cfg: &ParamSet, z: &[Rq], r: &[Rq]) -> Option<Vec<R2>> {
    debug_assert_eq!(z.len(), r.len());
    let mut weight = 0usize;
    let mut hints = Vec::with_capacity(z.len());
    for (zp, rp) in z.iter().zip(r) {
        let mut row = R2::ZERO;
        for j in 0..N {
            let bit = make_hint_coeff(cfg, zp.0[j], rp.0[j]);
            row.0[j] = bit;
            weight += usize::from(bit);
        }
        hints.push(row);
    }
    if weight > usize::from(cfg.omega) {
        return None;
    }
    Some(hints)
}

/// Algorithm 40, vectorized: recover the adjusted high bits of `r` under
/// hint `h`. Inputs are public; branching is fine here.
pub(crate) fn use_hint(cfg: &ParamSet, h: &[R2], r: &[Rq]) -> Vec<Rz> {
    debug_assert_eq!(h.len(), r.len());
    let m = ((Q - 1) / (2 * cfg.gamma2)) as i32;
    h.iter()
        .zip(r)
        .map(|(hp, rp)| {
            let mut out = Rz::ZERO;
            for j in 0..N {
                let (r1, r0) = rp.0[j].decompose(cfg.gamma2);
                out.0[j] = if hp.0[j] == 0 {
                    r1
                } else if r0 > 0 {
                    (r1 + 1) % m
                } else {
                    (r1 - 1 + m) % m
                };
            }
            out
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldElement;
    use crate::params::{ML_DSA_44, ML_DSA_65};
    use crate::ring::high_bits_vec;
    use rand::Rng;

    fn random_rq(rng: &mut impl Rng) -> Rq {
        let mut p = Rq::ZERO;
        for c in &mut p.0 {
            *c = FieldElement::new_reduced(rng.gen_range(0..Q));
        }
        p
    }

    fn random_small(rng: &mut impl Rng, bound: i32) -> Rq {
        let mut z = Rz::ZERO;
        for c in &mut z.0 {
            *c = rng.gen_range(-(bound - 1)..bound);
        }
        Rq::from_symmetric(&z)
    }

    /// UseHint(MakeHint(z, r), r) recovers HighBits(r + z) whenever
    /// ||z||_inf < gamma2. This is the identity sign/verify rely on.
    #[test]
    fn hints_recover_shifted_high_bits() {
        let mut rng = rand::thread_rng();
        for cfg in [&ML_DSA_44, &ML_DSA_65] {
            for _ in 0..16 {
                let r = [random_rq(&mut rng)];
                let z = [random_small(&mut rng, cfg.gamma2 as i32)];
                // Hamming weight is unconstrained here, so build hints
                // directly instead of going through the omega cutoff.
                let mut h = [R2::ZERO];
                for j in 0..N {
                    h[0].0[j] = super::make_hint_coeff(cfg, z[0].0[j], r[0].0[j]);
                }
                let recovered = use_hint(cfg, &h, &r);
                let expected = high_bits_vec(&[r[0].add(&z[0])], cfg.gamma2);
                assert_eq!(recovered, expected);
            }
        }
    }

    #[test]
    fn zero_shift_needs_no_hint() {
        let mut rng = rand::thread_rng();
        let r = [random_rq(&mut rng)];
        let z = [Rq::ZERO];
        let h = make_hint(&ML_DSA_44, &z, &r).unwrap();
        assert_eq!(h[0].weight(), 0);
        assert_eq!(use_hint(&ML_DSA_44, &h, &r), high_bits_vec(&r, ML_DSA_44.gamma2));
    }

    #[test]
    fn overweight_hint_is_rejected() {
        // A shift of gamma2 at every coefficient flips essentially every
        // high-bits bucket, far exceeding omega.
        let mut rng = rand::thread_rng();
        let r: Vec<Rq> = (0..4).map(|_| random_rq(&mut rng)).collect();
        let mut shift = Rz::ZERO;
        shift.0 = [ML_DSA_44.gamma2 as i32; N];
        let z: Vec<Rq> = (0..4).map(|_| Rq::from_symmetric(&shift)).collect();
        assert!(make_hint(&ML_DSA_44, &z, &r).is_none());
    }

    #[test]
    fn w1_encode_lengths() {
        for cfg in [&ML_DSA_44, &ML_DSA_65] {
            let w1 = alloc::vec![Rz::ZERO; usize::from(cfg.k)];
            let encoded = w1_encode(cfg, &w1);
            assert_eq!(
                encoded.len(),
                32 * usize::from(cfg.k) * usize::from(cfg.w1_bits)
            );
        }
    }
}
