//! Internal debugging utilities for the Ed25519 core.
//!
//! Logging is disabled by default to keep the cryptographic core silent.
//! Enable the `ed25519-debug` feature (and optionally set the
//! `ED25519_PURE_DEBUG` environment variable) to surface diagnostic output
//! during development or advanced troubleshooting.

#[cfg(feature = "ed25519-debug")]
use std::sync::OnceLock;

#[cfg(feature = "ed25519-debug")]
fn is_enabled() -> bool {
    static ENABLED: OnceLock<bool> = OnceLock::new();
    *ENABLED.get_or_init(|| std::env::var("ED25519_PURE_DEBUG").is_ok())
}

#[cfg(not(feature = "ed25519-debug"))]
#[inline(always)]
fn is_enabled() -> bool {
    false
}

/// Emit a lazily constructed debug message when debug logging is enabled.
#[inline(always)]
pub fn log<F>(message: F)
where
    F: FnOnce() -> String,
{
    if is_enabled() {
        eprintln!("{}", message());
    }
}
