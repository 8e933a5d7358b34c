//! Parameter sets for the three ML-DSA security levels.
//!
//! FIPS 204 defines a single engine instantiated at three strengths; the
//! engine takes its dimensions and bounds from a [`ParamSet`] reference
//! rather than being specialized per level.

use crate::Q;

/// An immutable bundle of constants for one ML-DSA security level.
///
/// Instances are only ever handled as `&'static` references; the three
/// standard bundles are [`ML_DSA_44`], [`ML_DSA_65`] and [`ML_DSA_87`].
#[derive(Debug)]
pub struct ParamSet {
    /// Human-readable name, matching the ACVP `parameterSet` strings.
    pub name: &'static str,
    /// Hamming weight of the challenge polynomial.
    pub tau: u16,
    /// Collision strength of the commitment hash, in bits.
    pub lambda: u16,
    /// log2 of the mask bound gamma1.
    pub log_gamma1: u8,
    /// Low-order rounding range.
    pub gamma2: u32,
    /// Rows of the public matrix A.
    pub k: u8,
    /// Columns of the public matrix A.
    pub l: u8,
    /// log2 of the secret coefficient bound eta.
    pub log_eta: u8,
    /// tau * eta, the rejection threshold margin.
    pub beta: u16,
    /// Maximum number of 1s in the hint vector.
    pub omega: u8,
    /// Bit width of packed w1 entries: bitlen((q-1)/(2*gamma2) - 1).
    pub w1_bits: u8,
    /// Byte size of the expanded secret key encoding.
    pub sk_size: usize,
    /// Byte size of the encoded public key.
    pub pk_size: usize,
    /// Byte size of an encoded signature.
    pub sig_size: usize,
}

impl ParamSet {
    /// gamma1 as a value rather than a bit count.
    #[inline]
    pub(crate) const fn gamma1(&self) -> u32 {
        1 << self.log_gamma1
    }

    /// eta as a value rather than a bit count.
    #[inline]
    pub(crate) const fn eta(&self) -> u32 {
        1 << self.log_eta
    }
}

/// ML-DSA-44 (security category 2).
pub static ML_DSA_44: ParamSet = ParamSet {
    name: "ML-DSA-44",
    tau: 39,
    lambda: 128,
    log_gamma1: 17,
    gamma2: (Q - 1) / 88,
    k: 4,
    l: 4,
    log_eta: 1,
    beta: 78,
    omega: 80,
    w1_bits: 6,
    sk_size: 2560,
    pk_size: 1312,
    sig_size: 2420,
};

/// ML-DSA-65 (security category 3).
pub static ML_DSA_65: ParamSet = ParamSet {
    name: "ML-DSA-65",
    tau: 49,
    lambda: 192,
    log_gamma1: 19,
    gamma2: (Q - 1) / 32,
    k: 6,
    l: 5,
    log_eta: 2,
    beta: 196,
    omega: 55,
    w1_bits: 4,
    sk_size: 4032,
    pk_size: 1952,
    sig_size: 3309,
};

/// ML-DSA-87 (security category 5).
pub static ML_DSA_87: ParamSet = ParamSet {
    name: "ML-DSA-87",
    tau: 60,
    lambda: 256,
    log_gamma1: 19,
    gamma2: (Q - 1) / 32,
    k: 8,
    l: 7,
    log_eta: 1,
    beta: 120,
    omega: 75,
    w1_bits: 4,
    sk_size: 4896,
    pk_size: 2592,
    sig_size: 4627,
};
