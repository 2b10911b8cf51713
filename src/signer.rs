//! Orchestrates SHA-512, scalar pruning, and the Ed25519 sign/verify
//! protocols on top of the [`field`](crate::field), [`scalar`](crate::scalar),
//! [`edwards`](crate::edwards), and [`scalarmul`](crate::scalarmul) layers.

use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::debug;
use crate::edwards::{self, EdwardsPoint};
use crate::scalar::{self, Scalar};
use crate::scalarmul;

/// Derive the 32-byte public key for a 32-byte seed.
pub fn generate_public_key(seed: &[u8; 32]) -> [u8; 32] {
    let mut h: [u8; 64] = Sha512::digest(seed).into();
    let mut s_bytes: [u8; 32] = h[0..32].try_into().expect("32-byte slice");
    scalar::prune(&mut s_bytes);

    let public_key = scalarmul::scalarmult_base(&s_bytes).encode();

    h.zeroize();
    s_bytes.zeroize();
    public_key
}

/// Sign `message` under `seed`, recomputing the public key internally.
pub fn sign(seed: &[u8; 32], message: &[u8]) -> [u8; 64] {
    let public_key = generate_public_key(seed);
    sign_with_public_key(seed, &public_key, message)
}

/// Sign `message` under `seed`, given a public key the caller already
/// derived from the same seed. Saves recomputing `s*B` when signing
/// several messages under one key; passing a mismatched `public_key`
/// produces a signature that fails to verify, it does not panic.
pub fn sign_with_public_key(seed: &[u8; 32], public_key: &[u8; 32], message: &[u8]) -> [u8; 64] {
    let mut h: [u8; 64] = Sha512::digest(seed).into();

    let mut s_bytes: [u8; 32] = h[0..32].try_into().expect("32-byte slice");
    scalar::prune(&mut s_bytes);
    let prefix: [u8; 32] = h[32..64].try_into().expect("32-byte slice");

    let mut nonce_hasher = Sha512::new();
    nonce_hasher.update(prefix);
    nonce_hasher.update(message);
    let mut nonce_hash: [u8; 64] = nonce_hasher.finalize().into();
    let mut r_bytes = scalar::reduce512(&nonce_hash);

    let r_encoded = scalarmul::scalarmult_base(&r_bytes).encode();

    let mut k_hasher = Sha512::new();
    k_hasher.update(r_encoded);
    k_hasher.update(public_key);
    k_hasher.update(message);
    let k_hash: [u8; 64] = k_hasher.finalize().into();
    let k_bytes = scalar::reduce512(&k_hash);

    let r_words = Scalar::from_bytes(&r_bytes).0;
    let s_words = Scalar::from_bytes(&s_bytes).0;
    let k_words = Scalar::from_bytes(&k_bytes).0;

    let mut acc = [0u32; 16];
    acc[0..8].copy_from_slice(&r_words);
    scalar::mul_add_to(&k_words, &s_words, &mut acc);

    let mut combined = [0u8; 64];
    for i in 0..16 {
        combined[i * 4..i * 4 + 4].copy_from_slice(&acc[i].to_le_bytes());
    }
    let s_final = scalar::reduce512(&combined);

    let mut signature = [0u8; 64];
    signature[0..32].copy_from_slice(&r_encoded);
    signature[32..64].copy_from_slice(&s_final);

    h.zeroize();
    s_bytes.zeroize();
    nonce_hash.zeroize();
    r_bytes.zeroize();
    acc.zeroize();
    combined.zeroize();

    signature
}

/// Verify a 64-byte signature against a 32-byte public key and message.
///
/// Never panics: every malformed-input case described by RFC 8032 simply
/// returns `false`, including a non-canonical `R` or `S`, a public key
/// that decodes to no valid curve point, or a recomputed `R'` that
/// doesn't match the signature's `R`.
pub fn verify(signature: &[u8; 64], public_key: &[u8; 32], message: &[u8]) -> bool {
    let r_bytes: [u8; 32] = match signature[0..32].try_into() {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };
    let s_bytes: [u8; 32] = match signature[32..64].try_into() {
        Ok(bytes) => bytes,
        Err(_) => return false,
    };

    if !edwards::check_point_var(&r_bytes) {
        debug::log(|| "signer::verify: R is not a canonical field element".to_string());
        return false;
    }

    if Scalar::decode_canonical_var(&s_bytes).is_err() {
        debug::log(|| "signer::verify: S >= L, rejecting as malleable".to_string());
        return false;
    }

    let a_neg = match EdwardsPoint::decode(public_key, true) {
        Ok(point) => point,
        Err(err) => {
            debug::log(|| format!("signer::verify: public key failed to decode ({err})"));
            return false;
        },
    };

    let mut hasher = Sha512::new();
    hasher.update(r_bytes);
    hasher.update(public_key);
    hasher.update(message);
    let k_hash: [u8; 64] = hasher.finalize().into();
    let k_bytes = scalar::reduce512(&k_hash);

    let r_prime = scalarmul::double_scalarmult_var(&s_bytes, &a_neg, &k_bytes);
    let r_prime_bytes = r_prime.encode();

    bool::from(r_prime_bytes.as_slice().ct_eq(r_bytes.as_slice()))
}

/// Eagerly build the fixed-base precomputation table; otherwise the
/// first call to [`sign`], [`sign_with_public_key`], or
/// [`generate_public_key`] triggers it lazily.
pub fn precompute() {
    scalarmul::precompute();
}
