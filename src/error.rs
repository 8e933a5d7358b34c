//! Error kinds surfaced by key decoding, signing and verification.

use core::fmt;

/// The result type used throughout this crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors surfaced by the ML-DSA engine.
///
/// Signature verification never returns an error; malformed signatures
/// simply fail to verify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Key or signature bytes have the wrong length.
    InvalidInputLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length provided.
        actual: usize,
    },

    /// Bit-unpacking produced an out-of-range coefficient, or the hint
    /// section of a signature violates its canonical layout.
    Malformed,

    /// Re-encoding a decoded expanded secret key did not reproduce the
    /// input byte-for-byte.
    KeyRoundTripMismatch,

    /// A key seed was not exactly 32 bytes.
    InvalidSeed,

    /// A signing context string exceeded 255 bytes.
    InvalidContext,

    /// The random number generator failed to produce 32 bytes.
    RandomnessFailure,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidInputLength { expected, actual } => {
                write!(f, "invalid input length: expected {expected}, got {actual}")
            }
            Error::Malformed => write!(f, "malformed encoding"),
            Error::KeyRoundTripMismatch => write!(f, "secret key failed round-trip validation"),
            Error::InvalidSeed => write!(f, "seed must be exactly 32 bytes"),
            Error::InvalidContext => write!(f, "context must be at most 255 bytes"),
            Error::RandomnessFailure => write!(f, "random number generator failure"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
