//! SHAKE adapter (FIPS 204 section 3.7).
//!
//! Every invocation builds a fresh Keccak context; readers are consumed by
//! the caller and never shared across calls.

use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Shake128, Shake256};

/// H(v, out.len()): absorb the concatenation of `v` into SHAKE-256 and
/// squeeze a fixed-length output.
pub(crate) fn h(v: &[&[u8]], out: &mut [u8]) {
    let mut reader = shake256_xof(v);
    reader.read(out);
}

/// Incremental SHAKE-256 stream over the concatenation of `v`.
pub(crate) fn shake256_xof(v: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake256::default();
    for b in v {
        hasher.update(b);
    }
    hasher.finalize_xof()
}

/// Incremental SHAKE-128 stream over the concatenation of `v`.
pub(crate) fn shake128_xof(v: &[&[u8]]) -> impl XofReader {
    let mut hasher = Shake128::default();
    for b in v {
        hasher.update(b);
    }
    hasher.finalize_xof()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concatenation_equals_single_absorb() {
        let mut split = [0u8; 64];
        let mut joined = [0u8; 64];
        h(&[b"abc", b"def"], &mut split);
        h(&[b"abcdef"], &mut joined);
        assert_eq!(split, joined);
    }

    #[test]
    fn squeeze_is_streamable() {
        let mut all = [0u8; 64];
        h(&[b"stream"], &mut all);

        let mut reader = shake256_xof(&[b"stream"]);
        let mut first = [0u8; 16];
        let mut rest = [0u8; 48];
        reader.read(&mut first);
        reader.read(&mut rest);
        assert_eq!(&all[..16], first);
        assert_eq!(&all[16..], rest);
    }

    #[test]
    fn shake256_known_answer() {
        // SHAKE256(""), first 8 bytes.
        let mut out = [0u8; 8];
        h(&[], &mut out);
        assert_eq!(out, [0x46, 0xb9, 0xdd, 0x2b, 0x0b, 0xa8, 0x8d, 0x13]);
    }

    #[test]
    fn shake128_known_answer() {
        // SHAKE128(""), first 8 bytes.
        let mut reader = shake128_xof(&[]);
        let mut out = [0u8; 8];
        reader.read(&mut out);
        assert_eq!(out, [0x7f, 0x9c, 0x2b, 0xa4, 0xe8, 0x8f, 0x82, 0x7d]);
    }
}
