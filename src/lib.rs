//! Pure Rust implementation of Ed25519 (RFC 8032) signing and
//! verification.
//!
//! Every layer — prime-field arithmetic over `GF(2^255 - 19)`, the
//! twisted Edwards group, scalar reduction modulo the base-point order,
//! and the sign/verify protocol itself — is implemented from scratch
//! rather than delegated to an existing curve library. Secret-dependent
//! control flow (fixed-base scalar multiplication, field arithmetic,
//! conditional swap/negate/select) is constant-time; operations that only
//! ever see public data (point decoding, scalar bounds checks, the
//! double-scalar multiply used in `verify`) are variable-time and named
//! with a `*_var` suffix.

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod debug;
pub mod edwards;
pub mod error;
pub mod field;
pub mod scalar;
pub mod scalarmul;
pub mod signer;

pub use error::Ed25519Error;
pub use signer::{generate_public_key, precompute, sign, sign_with_public_key, verify};
