#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::many_single_char_names,
    clippy::similar_names
)]

//! ML-DSA: the Module-Lattice-Based Digital Signature Standard of
//! [FIPS 204], at all three security levels.
//!
//! The engine is shared; a [`params::ParamSet`] reference selects the
//! level. The per-level modules [`ml_dsa_44`], [`ml_dsa_65`] and
//! [`ml_dsa_87`] bundle the matching parameter set with its encoded sizes
//! and key-generation entry points.
//!
//! The canonical secret-key form is the 32-byte seed: a
//! [`SigningKey`] built from a seed caches every derived quantity and can
//! reproduce both the expanded secret encoding and the public key at any
//! time.
//!
//! ```
//! # #[cfg(feature = "default-rng")] {
//! use ml_dsa::ml_dsa_65;
//! use ml_dsa::traits::{Signer, Verifier};
//!
//! let (sk, vk) = ml_dsa_65::try_keygen()?;
//! let sig = sk.try_sign(b"post-quantum", b"")?;
//! assert!(vk.verify(b"post-quantum", &sig, b""));
//! # }
//! # Ok::<(), ml_dsa::Error>(())
//! ```
//!
//! [FIPS 204]: https://doi.org/10.6028/NIST.FIPS.204

extern crate alloc;

/// The `rand_core` types are re-exported so that callers do not need to
/// track the exact compatible version of `rand_core`.
pub use rand_core::{CryptoRng, CryptoRngCore, RngCore};

mod encodings;
mod error;
mod field;
mod hash;
mod keys;
mod ntt;
mod pack;
mod ring;
mod rounding;
mod sample;
mod sign;

pub mod ml_dsa_44;
pub mod ml_dsa_65;
pub mod ml_dsa_87;
pub mod params;
pub mod traits;

pub use error::{Error, Result};
pub use keys::{SigningKey, VerifyingKey};

// Ring constants shared by every parameter set (FIPS 204 table 1).
pub(crate) const Q: u32 = 8_380_417; // 2^23 - 2^13 + 1
pub(crate) const N: usize = 256;
pub(crate) const ZETA: u32 = 1753;
pub(crate) const D: u32 = 13;
