//! Arithmetic in the field F_q, q = 8380417 = 2^23 - 2^13 + 1.
//!
//! Elements are held as reduced representatives in `[0, q)`. All arithmetic
//! used on secret-dependent values (add, sub, neg, mul, `Power2Round`) is
//! branch-free; reductions are a single conditional subtraction expressed
//! as masked arithmetic.

use crate::{D, Q};

/// Floor(2^64 / q), for Barrett reduction of 64-bit products.
const BARRETT_MULTIPLIER: u64 = 2_201_172_575_745;

/// A field element in `[0, q)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, zeroize::Zeroize)]
pub(crate) struct FieldElement(u32);

/// Map `a` in `[0, 2q)` into `[0, q)` with one masked subtraction.
#[inline]
const fn reduce_once(a: u32) -> FieldElement {
    debug_assert!(a < 2 * Q);
    let x = a.wrapping_sub(Q);
    FieldElement(x.wrapping_add((x >> 31) * Q))
}

/// Reduce a 64-bit value mod q. Constant-time Barrett reduction.
#[inline]
const fn reduce64(a: u64) -> FieldElement {
    let quot = ((a as u128 * BARRETT_MULTIPLIER as u128) >> 64) as u64;
    // The approximate quotient is off by at most one, leaving [0, 2q).
    reduce_once((a - quot * Q as u64) as u32)
}

impl FieldElement {
    pub(crate) const ZERO: Self = Self(0);

    /// Build from an already-reduced representative in `[0, q)`.
    #[inline]
    pub(crate) const fn new_reduced(x: u32) -> Self {
        debug_assert!(x < Q);
        Self(x)
    }

    /// Build from a symmetric representative in `[-q/2, q/2]`.
    #[inline]
    pub(crate) const fn new_symmetric(x: i32) -> Self {
        debug_assert!(x >= -((Q / 2) as i32) && x <= (Q / 2) as i32);
        Self((x + ((x >> 31) & Q as i32)) as u32)
    }

    /// The `[0, q)` representative.
    #[inline]
    pub(crate) const fn to_reduced(self) -> u32 {
        self.0
    }

    /// The `(-q/2, q/2]` representative.
    #[inline]
    pub(crate) const fn to_symmetric(self) -> i32 {
        // Subtract q iff the representative exceeds q/2.
        let mask = ((Q / 2).wrapping_sub(self.0) as i32) >> 31;
        self.0 as i32 - (mask & Q as i32)
    }

    #[inline]
    pub(crate) const fn add(self, rhs: Self) -> Self {
        reduce_once(self.0 + rhs.0)
    }

    #[inline]
    pub(crate) const fn sub(self, rhs: Self) -> Self {
        reduce_once(self.0 + Q - rhs.0)
    }

    #[inline]
    pub(crate) const fn neg(self) -> Self {
        reduce_once(Q - self.0)
    }

    #[inline]
    pub(crate) const fn mul(self, rhs: Self) -> Self {
        reduce64(self.0 as u64 * rhs.0 as u64)
    }

    /// |x| of the symmetric representative, i.e. min(x, q - x).
    #[inline]
    pub(crate) const fn infinity_norm(self) -> u32 {
        let other = Q - self.0;
        let mask = (other.wrapping_sub(self.0) as i32) >> 31;
        (self.0 & !(mask as u32)) | (other & mask as u32)
    }

    /// Decompose into `(r1, r0)` with `x = r1 * 2^d + r0 (mod q)` and
    /// `r0` in `(-2^(d-1), 2^(d-1)]`. `r1` lands in `[0, (q-1)/2^d]`.
    pub(crate) const fn power2_round(self) -> (i32, i32) {
        let mut r0 = (self.0 & ((1 << D) - 1)) as i32;
        // Masked subtraction of 2^d when r0 exceeds 2^(d-1).
        let mask = ((1 << (D - 1)) - r0) >> 31;
        r0 -= mask & (1 << D);
        let r1 = (self.0 as i32 - r0) >> D;
        (r1, r0)
    }

    /// Decompose into `(r1, r0)` with `x = r1 * 2*gamma2 + r0 (mod q)` and
    /// `r0` in `(-gamma2, gamma2]`, except at the q-1 wraparound where
    /// `r1 = 0` and `r0` is decremented.
    ///
    /// The high half is computed by reciprocal multiplication; both
    /// reciprocals cover their full `[0, q)` input range exactly.
    pub(crate) const fn decompose(self, gamma2: u32) -> (i32, i32) {
        let r_plus = self.0 as i32;
        let mut r1 = (r_plus + 127) >> 7;
        if gamma2 == (Q - 1) / 88 {
            r1 = (r1 * 11_275 + (1 << 23)) >> 24;
            // Wrap 44 -> 0 (m = 44 buckets).
            r1 ^= ((43 - r1) >> 31) & r1;
        } else {
            r1 = (r1 * 1_025 + (1 << 21)) >> 22;
            r1 &= 15;
        }
        let mut r0 = r_plus - r1 * 2 * gamma2 as i32;
        // Fold the q-1 special case: values past (q-1)/2 pick up a -q shift.
        r0 -= ((((Q - 1) / 2) as i32 - r0) >> 31) & Q as i32;
        (r1, r0)
    }

    /// r1 of [`Self::decompose`].
    #[inline]
    pub(crate) const fn high_bits(self, gamma2: u32) -> i32 {
        self.decompose(gamma2).0
    }

    /// r0 of [`Self::decompose`].
    #[inline]
    pub(crate) const fn low_bits(self, gamma2: u32) -> i32 {
        self.decompose(gamma2).1
    }
}

/// Rejection predicate for uniform sampling mod q (FIPS 204 Algorithm 14).
///
/// Interprets three bytes as a little-endian integer with the top bit of
/// the last byte cleared; values >= q are rejected.
#[inline]
pub(crate) fn from_three_bytes(b0: u8, b1: u8, b2: u8) -> Option<FieldElement> {
    let z = (u32::from(b2 & 0x7f) << 16) | (u32::from(b1) << 8) | u32::from(b0);
    if z < Q {
        Some(FieldElement(z))
    } else {
        None
    }
}

/// Rejection predicate for bounded sampling (FIPS 204 Algorithm 15).
///
/// Maps a nibble onto `[-eta, eta]` for eta in {2, 4}; out-of-range
/// nibbles are rejected.
#[inline]
pub(crate) fn from_half_byte(eta: u32, b: u8) -> Option<FieldElement> {
    debug_assert!(eta == 2 || eta == 4);
    if eta == 2 && b < 15 {
        Some(FieldElement::new_symmetric(2 - (i32::from(b) % 5)))
    } else if eta == 4 && b < 9 {
        Some(FieldElement::new_symmetric(4 - i32::from(b)))
    } else {
        None
    }
}
