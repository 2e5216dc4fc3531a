//! Error taxonomy for the gate library (spec.md §7).
//!
//! All errors are reported synchronously at the call boundary; no partial
//! outputs are ever written. There is no protocol-level error: for
//! well-formed inputs the computation always succeeds, and ring overflow
//! from oversized inputs is a silent correctness failure the caller must
//! preclude (spec.md §7), not something this enum reports.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    /// `K <= 0`, `l <= 0`, a buffer length mismatch, or a party index not in {0, 1}.
    PreconditionViolation(&'static str),
    /// The underlying CSPRNG failed while sampling a seed or mask.
    RandomnessFailure,
    /// The fixed-key AES permutation failed to initialize.
    CryptoFailure,
}

#[cfg(feature = "std")]
impl std::fmt::Display for GateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateError::PreconditionViolation(msg) => write!(f, "precondition violated: {msg}"),
            GateError::RandomnessFailure => write!(f, "randomness source failed"),
            GateError::CryptoFailure => write!(f, "AES initialization failed"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GateError {}

pub type Result<T> = core::result::Result<T, GateError>;
