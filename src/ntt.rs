//! Number-Theoretic Transform over R_q.
//!
//! zeta = 1753 is a primitive 512-th root of unity mod q, so X^256 + 1
//! splits into 256 linear factors and pointwise multiplication in the
//! transform domain realizes negacyclic polynomial multiplication.
//!
//! The table of zeta powers is indexed in bit-reversed order and baked in
//! at compile time; nothing is derived at startup. Butterflies go through
//! [`FieldElement`] arithmetic only, so the transforms neither branch on
//! nor index by coefficient values.

use crate::field::FieldElement;
use crate::ring::{Rq, Tq};
use crate::{N, Q, ZETA};
use alloc::vec::Vec;

/// 256^{-1} mod q, applied as the final scaling of the inverse transform.
const INV_256: FieldElement = FieldElement::new_reduced(8_347_681);

/// Square-and-multiply exponentiation mod q, for table construction only.
const fn pow_mod_q(base: u32, mut exp: u8) -> u32 {
    let mut result: u64 = 1;
    let mut s = base as u64;
    while exp != 0 {
        if exp & 1 != 0 {
            result = (result * s) % Q as u64;
        }
        exp >>= 1;
        if exp != 0 {
            s = (s * s) % Q as u64;
        }
    }
    result as u32
}

const fn gen_zeta_table() -> [FieldElement; N] {
    let mut table = [FieldElement::ZERO; N];
    let mut i = 0;
    while i < N {
        table[i] = FieldElement::new_reduced(pow_mod_q(ZETA, (i as u8).reverse_bits()));
        i += 1;
    }
    table
}

/// zeta^brv(k) mod q for k in 0..256, matching FIPS 204 Appendix B.
static ZETA_TABLE: [FieldElement; N] = gen_zeta_table();

/// Forward transform (FIPS 204 Algorithm 41): Cooley-Tukey butterflies over
/// the bit-reversed zeta table.
pub(crate) fn ntt(w: &Rq) -> Tq {
    let mut w_hat = Tq(w.0);
    let mut k = 0;
    let mut len = 128;
    while len >= 1 {
        let mut start = 0;
        while start < N {
            k += 1;
            let zeta = ZETA_TABLE[k];
            for j in start..(start + len) {
                let t = zeta.mul(w_hat.0[j + len]);
                w_hat.0[j + len] = w_hat.0[j].sub(t);
                w_hat.0[j] = w_hat.0[j].add(t);
            }
            start += 2 * len;
        }
        len /= 2;
    }
    w_hat
}

/// Inverse transform (FIPS 204 Algorithm 42): Gentleman-Sande butterflies,
/// then scaling by 256^{-1}.
pub(crate) fn inv_ntt(w_hat: &Tq) -> Rq {
    let mut w = Rq(w_hat.0);
    let mut k = N;
    let mut len = 1;
    while len < N {
        let mut start = 0;
        while start < N {
            k -= 1;
            let neg_zeta = ZETA_TABLE[k].neg();
            for j in start..(start + len) {
                let t = w.0[j];
                w.0[j] = t.add(w.0[j + len]);
                w.0[j + len] = neg_zeta.mul(t.sub(w.0[j + len]));
            }
            start += 2 * len;
        }
        len *= 2;
    }
    for c in &mut w.0 {
        *c = c.mul(INV_256);
    }
    w
}

impl Tq {
    pub(crate) const ZERO: Self = Self([FieldElement::ZERO; N]);

    pub(crate) fn add(&self, rhs: &Self) -> Self {
        let mut s = Self::ZERO;
        for i in 0..N {
            s.0[i] = self.0[i].add(rhs.0[i]);
        }
        s
    }

    pub(crate) fn sub(&self, rhs: &Self) -> Self {
        let mut s = Self::ZERO;
        for i in 0..N {
            s.0[i] = self.0[i].sub(rhs.0[i]);
        }
        s
    }

    /// Pointwise product, i.e. multiplication in R_q carried into T_q.
    pub(crate) fn mul_pointwise(&self, rhs: &Self) -> Self {
        let mut s = Self::ZERO;
        for i in 0..N {
            s.0[i] = self.0[i].mul(rhs.0[i]);
        }
        s
    }
}

// ---- vector and matrix forms ----------------------------------------------

pub(crate) fn ntt_vec(v: &[Rq]) -> Vec<Tq> {
    v.iter().map(ntt).collect()
}

pub(crate) fn inv_ntt_vec(v: &[Tq]) -> Vec<Rq> {
    v.iter().map(inv_ntt).collect()
}

/// w[i] = sum_j a[i][j] * v[j], all in T_q.
pub(crate) fn matrix_vector_ntt(a: &[Vec<Tq>], v: &[Tq]) -> Vec<Tq> {
    a.iter()
        .map(|row| {
            debug_assert_eq!(row.len(), v.len());
            row.iter()
                .zip(v)
                .fold(Tq::ZERO, |acc, (aij, vj)| acc.add(&aij.mul_pointwise(vj)))
        })
        .collect()
}

/// Pointwise-multiplies every component of `v` by `c`.
pub(crate) fn scalar_vector_ntt(c: &Tq, v: &[Tq]) -> Vec<Tq> {
    v.iter().map(|p| c.mul_pointwise(p)).collect()
}

#[allow(dead_code)]
pub(crate) fn add_vector_ntt(a: &[Tq], b: &[Tq]) -> Vec<Tq> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x.add(y)).collect()
}

pub(crate) fn sub_vector_ntt(a: &[Tq], b: &[Tq]) -> Vec<Tq> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x.sub(y)).collect()
}
