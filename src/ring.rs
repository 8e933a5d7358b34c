//! Polynomials over the ring R_q = Z_q[X]/(X^256 + 1) and their integer
//! and binary counterparts.
//!
//! Four coefficient domains appear in the scheme: [`Rq`] for reduced ring
//! elements, [`Tq`] for their NTT images, [`Rz`] for signed integer
//! intermediates (decompositions, unpacked signatures) and [`R2`] for hint
//! bits. All are fixed at 256 coefficients.

use crate::field::FieldElement;
use crate::N;
use alloc::vec::Vec;
use zeroize::Zeroize;

/// An element of R_q: 256 coefficients in `[0, q)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroize)]
pub(crate) struct Rq(pub(crate) [FieldElement; N]);

/// An element of T_q, the NTT image of R_q. Same shape as [`Rq`]; the type
/// distinction keeps NTT-domain and ring-domain values from mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroize)]
pub(crate) struct Tq(pub(crate) [FieldElement; N]);

/// A polynomial with signed 32-bit integer coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroize)]
pub(crate) struct Rz(pub(crate) [i32; N]);

/// A polynomial with coefficients in {0, 1}, used for hints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Zeroize)]
pub(crate) struct R2(pub(crate) [u8; N]);

impl Rq {
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

    pub(crate) fn neg(&self) -> Self {
        let mut s = Self::ZERO;
        for i in 0..N {
            s.0[i] = self.0[i].neg();
        }
        s
    }

    pub(crate) fn scalar_mul(&self, c: FieldElement) -> Self {
        let mut s = Self::ZERO;
        for i in 0..N {
            s.0[i] = self.0[i].mul(c);
        }
        s
    }

    /// max over coefficients of min(x, q - x).
    pub(crate) fn infinity_norm(&self) -> u32 {
        self.0.iter().map(|c| c.infinity_norm()).max().unwrap_or(0)
    }

    /// Coefficient-wise Power2Round.
    pub(crate) fn power2_round(&self) -> (Rz, Rz) {
        let (mut r1, mut r0) = (Rz::ZERO, Rz::ZERO);
        for i in 0..N {
            (r1.0[i], r0.0[i]) = self.0[i].power2_round();
        }
        (r1, r0)
    }

    /// Coefficient-wise HighBits.
    pub(crate) fn high_bits(&self, gamma2: u32) -> Rz {
        let mut r1 = Rz::ZERO;
        for i in 0..N {
            r1.0[i] = self.0[i].high_bits(gamma2);
        }
        r1
    }

    /// Coefficient-wise LowBits.
    pub(crate) fn low_bits(&self, gamma2: u32) -> Rz {
        let mut r0 = Rz::ZERO;
        for i in 0..N {
            r0.0[i] = self.0[i].low_bits(gamma2);
        }
        r0
    }

    /// The symmetric `(-q/2, q/2]` view of every coefficient.
    pub(crate) fn to_symmetric(&self) -> Rz {
        let mut z = Rz::ZERO;
        for i in 0..N {
            z.0[i] = self.0[i].to_symmetric();
        }
        z
    }

    pub(crate) fn from_symmetric(z: &Rz) -> Self {
        let mut a = Self::ZERO;
        for i in 0..N {
            a.0[i] = FieldElement::new_symmetric(z.0[i]);
        }
        a
    }
}

impl Rz {
    pub(crate) const ZERO: Self = Self([0i32; N]);

    /// max |coefficient|.
    pub(crate) fn infinity_norm(&self) -> u32 {
        self.0.iter().map(|c| c.unsigned_abs()).max().unwrap_or(0)
    }
}

impl R2 {
    pub(crate) const ZERO: Self = Self([0u8; N]);

    /// Number of 1 coefficients.
    pub(crate) fn weight(&self) -> usize {
        self.0.iter().filter(|&&b| b == 1).count()
    }
}

// ---- vector helpers -------------------------------------------------------
//
// Ring vectors are plain slices/Vecs of length k or l taken from the
// parameter set; none of these helpers alias their inputs.

pub(crate) fn add_vec(a: &[Rq], b: &[Rq]) -> Vec<Rq> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x.add(y)).collect()
}

pub(crate) fn sub_vec(a: &[Rq], b: &[Rq]) -> Vec<Rq> {
    debug_assert_eq!(a.len(), b.len());
    a.iter().zip(b).map(|(x, y)| x.sub(y)).collect()
}

pub(crate) fn negate_vec(a: &[Rq]) -> Vec<Rq> {
    a.iter().map(Rq::neg).collect()
}

pub(crate) fn infinity_norm_vec(a: &[Rq]) -> u32 {
    a.iter().map(Rq::infinity_norm).max().unwrap_or(0)
}

pub(crate) fn high_bits_vec(a: &[Rq], gamma2: u32) -> Vec<Rz> {
    a.iter().map(|p| p.high_bits(gamma2)).collect()
}

pub(crate) fn low_bits_vec(a: &[Rq], gamma2: u32) -> Vec<Rz> {
    a.iter().map(|p| p.low_bits(gamma2)).collect()
}

pub(crate) fn power2_round_vec(a: &[Rq]) -> (Vec<Rz>, Vec<Rz>) {
    a.iter().map(Rq::power2_round).unzip()
}

pub(crate) fn from_symmetric_vec(z: &[Rz]) -> Vec<Rq> {
    z.iter().map(Rq::from_symmetric).collect()
}
