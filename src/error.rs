//! Internal error type for point- and scalar-decoding failures.
//!
//! Nothing in the public API returns [`Ed25519Error`] directly: `verify`
//! collapses every variant to `false` at the boundary. It is exposed for
//! callers building their own decode helpers on top of [`crate::edwards`]
//! or [`crate::scalar`].

use thiserror::Error;

/// Failure modes for decoding a compressed point or a scalar.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Ed25519Error {
    /// The candidate y-coordinate (or field element) was not less than `p`.
    #[error("field value is not canonical (>= p)")]
    NonCanonicalField,
    /// No x-coordinate satisfies the curve equation for the given y.
    #[error("no point on the curve has the given y-coordinate")]
    NotOnCurve,
    /// The encoding represents x = 0 with the sign bit set, which RFC 8032
    /// disallows since -0 == 0.
    #[error("encoding of negative zero x-coordinate is disallowed")]
    NegativeZeroX,
    /// A scalar was not less than ℓ.
    #[error("scalar is not canonical (>= L)")]
    NonCanonicalScalar,
}
