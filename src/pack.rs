//! Bit-packed coefficient encodings (FIPS 204 Algorithms 16-21).
//!
//! All packers are LSB-first within each byte and bit-exact. A full ring
//! element at width k always occupies exactly 32*k bytes. The two signed
//! variants store `2^k - v` so that the wire format is unsigned.

use crate::error::{Error, Result};
use crate::ring::{Rz, R2};
use crate::N;
use alloc::vec::Vec;

/// Pack 256 values of `bits` bits each, LSB-first.
fn pack_raw(values: &[u32; N], bits: usize) -> Vec<u8> {
    debug_assert!(bits >= 1 && bits <= 20);
    let mut out = Vec::with_capacity(32 * bits);
    let mut acc: u32 = 0;
    let mut filled = 0;
    for &v in values {
        debug_assert!(v >> bits == 0);
        acc |= v << filled;
        filled += bits;
        while filled >= 8 {
            out.push(acc as u8);
            acc >>= 8;
            filled -= 8;
        }
    }
    debug_assert_eq!(filled, 0);
    out
}

/// Unpack 256 values of `bits` bits each, LSB-first.
fn unpack_raw(bytes: &[u8], bits: usize) -> [u32; N] {
    debug_assert!(bits >= 1 && bits <= 20);
    debug_assert_eq!(bytes.len(), 32 * bits);
    let mut w = [0u32; N];
    let mut acc: u32 = 0;
    let mut avail = 0;
    let mut idx = 0;
    for &b in bytes {
        acc |= u32::from(b) << avail;
        avail += 8;
        while avail >= bits && idx < N {
            w[idx] = acc & ((1 << bits) - 1);
            acc >>= bits;
            avail -= bits;
            idx += 1;
        }
    }
    debug_assert_eq!(idx, N);
    w
}

/// Algorithm 16: coefficients in `[0, 2^k)`, k bits each.
pub(crate) fn simple_bit_pack(w: &Rz, k: usize) -> Vec<u8> {
    let mut vals = [0u32; N];
    for i in 0..N {
        debug_assert!((0..1 << k).contains(&w.0[i]));
        vals[i] = w.0[i] as u32;
    }
    pack_raw(&vals, k)
}

/// Algorithm 18: inverse of [`simple_bit_pack`]. Every k-bit pattern is a
/// valid coefficient, so this cannot fail.
pub(crate) fn simple_bit_unpack(bytes: &[u8], k: usize) -> Rz {
    let vals = unpack_raw(bytes, k);
    let mut w = Rz::ZERO;
    for i in 0..N {
        w.0[i] = vals[i] as i32;
    }
    w
}

/// Algorithm 17 for the open interval `(-2^k, 2^k]`: stores `2^k - v` in
/// k+1 bits.
pub(crate) fn bit_pack(w: &Rz, k: usize) -> Vec<u8> {
    let top = 1i32 << k;
    let mut vals = [0u32; N];
    for i in 0..N {
        debug_assert!(w.0[i] > -top && w.0[i] <= top);
        vals[i] = (top - w.0[i]) as u32;
    }
    pack_raw(&vals, k + 1)
}

/// Algorithm 19 for the open interval: every (k+1)-bit pattern maps back
/// into `(-2^k, 2^k]`, so this cannot fail.
pub(crate) fn bit_unpack(bytes: &[u8], k: usize) -> Rz {
    let top = 1i32 << k;
    let vals = unpack_raw(bytes, k + 1);
    let mut w = Rz::ZERO;
    for i in 0..N {
        w.0[i] = top - vals[i] as i32;
    }
    w
}

/// Algorithm 17 for the closed interval `[-2^k, 2^k]` (eta = 2^k): stores
/// `2^k - v` in k+2 bits.
pub(crate) fn bit_pack_closed(w: &Rz, k: usize) -> Vec<u8> {
    let top = 1i32 << k;
    let mut vals = [0u32; N];
    for i in 0..N {
        debug_assert!(w.0[i] >= -top && w.0[i] <= top);
        vals[i] = (top - w.0[i]) as u32;
    }
    pack_raw(&vals, k + 2)
}

/// Algorithm 19 for the closed interval, with validation: raw values above
/// `2^(k+1)` do not correspond to any coefficient in `[-2^k, 2^k]`.
///
/// Validity is folded into a bitwise accumulator across all 256
/// coefficients; only the final ok/error decision branches.
pub(crate) fn bit_unpack_closed(bytes: &[u8], k: usize) -> Result<Rz> {
    let top = 1i32 << k;
    let vals = unpack_raw(bytes, k + 2);
    let mut w = Rz::ZERO;
    let mut ok: u32 = 1;
    for i in 0..N {
        // 1 iff vals[i] <= 2^(k+1)
        ok &= ((vals[i].wrapping_sub((2 << k) + 1)) >> 31) & 1;
        w.0[i] = top - vals[i] as i32;
    }
    if ok == 0 {
        return Err(Error::Malformed);
    }
    Ok(w)
}

/// Algorithm 20: the positions of 1-coefficients across all k rows, then
/// one running end-offset byte per row. Hints are public signature bytes,
/// so the data-dependent loop is acceptable here.
pub(crate) fn hint_bit_pack(omega: u8, h: &[R2]) -> Vec<u8> {
    let k = h.len();
    debug_assert!(usize::from(omega) + k < 256);
    debug_assert!(h.iter().map(R2::weight).sum::<usize>() <= usize::from(omega));
    let mut y = alloc::vec![0u8; usize::from(omega) + k];
    let mut index = 0usize;
    for (i, row) in h.iter().enumerate() {
        for j in 0..N {
            if row.0[j] == 1 {
                y[index] = j as u8;
                index += 1;
            }
        }
        y[usize::from(omega) + i] = index as u8;
    }
    y
}

/// Algorithm 21: inverse of [`hint_bit_pack`], enforcing the canonical
/// layout: row end-offsets are monotone and bounded by omega, positions
/// strictly increase within a row, and bytes past the final offset are
/// zero.
pub(crate) fn hint_bit_unpack(k: u8, omega: u8, y: &[u8]) -> Result<Vec<R2>> {
    debug_assert_eq!(y.len(), usize::from(omega) + usize::from(k));
    let mut h = alloc::vec![R2::ZERO; usize::from(k)];
    let mut index: u8 = 0;
    for i in 0..usize::from(k) {
        let end = y[usize::from(omega) + i];
        if end < index || end > omega {
            return Err(Error::Malformed);
        }
        let first = index;
        while index < end {
            if index > first && y[usize::from(index) - 1] >= y[usize::from(index)] {
                return Err(Error::Malformed);
            }
            h[i].0[usize::from(y[usize::from(index)])] = 1;
            index += 1;
        }
    }
    for i in usize::from(index)..usize::from(omega) {
        if y[i] != 0 {
            return Err(Error::Malformed);
        }
    }
    Ok(h)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    fn random_rz(rng: &mut impl Rng, lo: i32, hi: i32) -> Rz {
        let mut w = Rz::ZERO;
        for c in &mut w.0 {
            *c = rng.gen_range(lo..=hi);
        }
        w
    }

    #[test]
    fn simple_roundtrip() {
        let mut rng = rand::thread_rng();
        for k in [4, 6, 10, 13] {
            let w = random_rz(&mut rng, 0, (1 << k) - 1);
            let packed = simple_bit_pack(&w, k);
            assert_eq!(packed.len(), 32 * k);
            assert_eq!(simple_bit_unpack(&packed, k), w);
        }
    }

    #[test]
    fn open_roundtrip() {
        let mut rng = rand::thread_rng();
        for k in [12, 17, 19] {
            let w = random_rz(&mut rng, -(1 << k) + 1, 1 << k);
            let packed = bit_pack(&w, k);
            assert_eq!(packed.len(), 32 * (k + 1));
            assert_eq!(bit_unpack(&packed, k), w);
        }
    }

    #[test]
    fn closed_roundtrip() {
        let mut rng = rand::thread_rng();
        for k in [1, 2] {
            let w = random_rz(&mut rng, -(1 << k), 1 << k);
            let packed = bit_pack_closed(&w, k);
            assert_eq!(packed.len(), 32 * (k + 2));
            assert_eq!(bit_unpack_closed(&packed, k).unwrap(), w);
        }
    }

    #[test]
    fn closed_unpack_rejects_out_of_range() {
        // For k=1 every coefficient occupies 3 bits; raw values 5..7 encode
        // nothing in [-2, 2]. 0xff packs raw value 7 in the low bits.
        let mut bytes = alloc::vec![0u8; 96];
        bytes[0] = 0x07;
        assert_eq!(bit_unpack_closed(&bytes, 1), Err(Error::Malformed));
        // Raw value 4 (encoding -2) is the largest accepted.
        bytes[0] = 0x04;
        let w = bit_unpack_closed(&bytes, 1).unwrap();
        assert_eq!(w.0[0], -2);
    }

    #[test]
    fn lsb_first_layout() {
        // Coefficient 0 occupies the low bits of byte 0.
        let mut w = Rz::ZERO;
        w.0[0] = 0b101;
        w.0[1] = 0b011;
        let packed = simple_bit_pack(&w, 3);
        assert_eq!(packed[0], 0b00_011_101);
    }

    #[test]
    fn hint_roundtrip() {
        let mut h = alloc::vec![R2::ZERO; 4];
        h[0].0[10] = 1;
        h[0].0[20] = 1;
        h[1].0[5] = 1;
        h[3].0[255] = 1;
        let y = hint_bit_pack(80, &h);
        assert_eq!(y.len(), 84);
        assert_eq!(hint_bit_unpack(4, 80, &y).unwrap(), h);
    }

    #[test]
    fn hint_empty_roundtrip() {
        let h = alloc::vec![R2::ZERO; 6];
        let y = hint_bit_pack(55, &h);
        assert_eq!(hint_bit_unpack(6, 55, &y).unwrap(), h);
    }

    #[test]
    fn hint_unpack_rejects_bad_layout() {
        let omega = 80u8;
        // Offset exceeds omega.
        let mut y = alloc::vec![0u8; 84];
        y[80] = 81;
        assert!(hint_bit_unpack(4, omega, &y).is_err());

        // Non-monotone row offsets.
        let mut y = alloc::vec![0u8; 84];
        y[80] = 2;
        y[81] = 1;
        y[0] = 3;
        y[1] = 9;
        assert!(hint_bit_unpack(4, omega, &y).is_err());

        // Positions not strictly increasing within a row.
        let mut y = alloc::vec![0u8; 84];
        y[0] = 7;
        y[1] = 7;
        for i in 80..84 {
            y[i] = 2;
        }
        assert!(hint_bit_unpack(4, omega, &y).is_err());

        // Nonzero trailing bytes past the final offset.
        let mut y = alloc::vec![0u8; 84];
        y[0] = 1;
        assert!(hint_bit_unpack(4, omega, &y).is_err());
    }
}
