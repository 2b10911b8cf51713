//! Twisted Edwards curve group operations in extended coordinates.
//!
//! The curve is `-x^2 + y^2 = 1 + d*x^2*y^2` over GF(2^255 - 19), with
//! `d = -121665/121666 mod p`. Points are represented as `(X, Y, T, Z)`
//! with the invariant `X*Y = T*Z` (affine coordinates are `X/Z, Y/Z`).
//! The curve constant and base point are derived from field arithmetic
//! the first time they're needed rather than hardcoded, so their
//! correctness rests on the already-tested field layer.

use once_cell::sync::OnceCell;

use crate::debug;
use crate::error::Ed25519Error;
use crate::field::FieldElement;

/// A point in extended twisted Edwards coordinates.
#[derive(Clone, Copy, Debug)]
pub struct EdwardsPoint {
    pub x: FieldElement,
    pub y: FieldElement,
    pub t: FieldElement,
    pub z: FieldElement,
}

/// An affine point prepared for mixed addition: `(Y+X, Y-X, 2d*X*Y)`.
#[derive(Clone, Copy, Debug)]
pub struct PrecomputedPoint {
    pub y_plus_x: FieldElement,
    pub y_minus_x: FieldElement,
    pub xy2d: FieldElement,
}

impl PrecomputedPoint {
    /// The multiplicative identity in precomputed form: looking this up
    /// and adding it leaves a point unchanged.
    pub fn identity() -> Self {
        PrecomputedPoint {
            y_plus_x: FieldElement::one(),
            y_minus_x: FieldElement::one(),
            xy2d: FieldElement::zero(),
        }
    }

    /// Conditionally negate: swap `y_plus_x` / `y_minus_x` and negate
    /// `xy2d`, matching the effect of negating the underlying affine point.
    pub fn cnegate(&self, choice: u8) -> Self {
        let swapped_plus = FieldElement::cselect(&self.y_minus_x, &self.y_plus_x, choice);
        let swapped_minus = FieldElement::cselect(&self.y_plus_x, &self.y_minus_x, choice);
        PrecomputedPoint {
            y_plus_x: swapped_plus,
            y_minus_x: swapped_minus,
            xy2d: self.xy2d.cnegate(choice),
        }
    }
}

#[cfg(feature = "ed25519-debug")]
fn hex_of(bytes: &[u8; 32]) -> String {
    use std::fmt::Write;
    let mut out = String::with_capacity(64);
    for byte in bytes {
        write!(&mut out, "{byte:02x}").expect("writing to String");
    }
    out
}

#[cfg(not(feature = "ed25519-debug"))]
#[inline(always)]
fn hex_of(_bytes: &[u8; 32]) -> &'static str {
    ""
}

fn curve_d() -> FieldElement {
    static D: OnceCell<FieldElement> = OnceCell::new();
    *D.get_or_init(|| {
        let num = -FieldElement::from_u32(121_665);
        let den = FieldElement::from_u32(121_666).inv();
        (num * den).carry()
    })
}

fn curve_d2() -> FieldElement {
    static D2: OnceCell<FieldElement> = OnceCell::new();
    *D2.get_or_init(|| (curve_d() + curve_d()).carry())
}

/// The conventional Ed25519 base point `B`, with `y = 4/5 mod p` and the
/// even (non-negative) square root for `x`, derived via the same decode
/// machinery used for arbitrary points rather than hardcoded bytes.
pub fn base_point() -> EdwardsPoint {
    static B: OnceCell<EdwardsPoint> = OnceCell::new();
    *B.get_or_init(|| {
        let y = (FieldElement::from_u32(4) * FieldElement::from_u32(5).inv()).carry();
        let y2 = y.square().carry();
        let u = (y2 - FieldElement::one()).carry();
        let v = (y2 * curve_d() + FieldElement::one()).carry();
        let (ok, mut x) = FieldElement::sqrt_ratio_var(&u, &v);
        debug_assert!(ok, "base point y=4/5 must yield a valid x-coordinate");
        if x.is_negative() {
            x = (-x).carry();
        }
        EdwardsPoint {
            x,
            y,
            t: (x * y).carry(),
            z: FieldElement::one(),
        }
    })
}

fn base_point_precomp() -> PrecomputedPoint {
    static BP: OnceCell<PrecomputedPoint> = OnceCell::new();
    *BP.get_or_init(|| base_point().to_precomp())
}

/// Pre-decode canonicity check: the candidate 32 bytes, with the sign bit
/// masked off, must represent a value strictly less than `p`. Variable
/// time — only ever applied to public signature/key bytes.
pub fn check_point_var(bytes: &[u8; 32]) -> bool {
    let mut masked = *bytes;
    masked[31] &= 0x7f;
    FieldElement::decode(&masked).encode() == masked
}

impl EdwardsPoint {
    /// The group identity, `(0, 1, 0, 1)`.
    pub fn neutral() -> Self {
        EdwardsPoint {
            x: FieldElement::zero(),
            y: FieldElement::one(),
            t: FieldElement::zero(),
            z: FieldElement::one(),
        }
    }

    /// `B`, the conventional Ed25519 base point.
    pub fn base() -> Self {
        base_point()
    }

    /// Point doubling ("dbl-2008-hwcd").
    pub fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = self.z.square2();
        let h = (a + b).carry();
        let g = (a - b).carry();
        let xy = (self.x + self.y).carry();
        let e = (xy.square() - h).carry();
        let f = (c + g).carry();

        EdwardsPoint {
            x: (e * f).carry(),
            y: (g * h).carry(),
            t: (e * h).carry(),
            z: (f * g).carry(),
        }
    }

    /// General point addition ("add-2008-hwcd-3").
    pub fn add(&self, other: &Self) -> Self {
        let (yp_self, ym_self) = FieldElement::apm(&self.y, &self.x);
        let (yp_other, ym_other) = FieldElement::apm(&other.y, &other.x);

        let a = ym_self * ym_other;
        let b = yp_self * yp_other;
        let tt = self.t * other.t;
        let c = tt * curve_d2();
        let zz = self.z * other.z;
        let d = zz + zz;

        let e = b - a;
        let f = d - c;
        let g = (d + c).carry();
        let h = b + a;

        EdwardsPoint {
            x: (e * f).carry(),
            y: (g * h).carry(),
            t: (e * h).carry(),
            z: (f * g).carry(),
        }
    }

    /// Mixed addition against an affine point prepared as
    /// `(Y+X, Y-X, 2d*X*Y)`; used for both general precomputed-table
    /// lookups and (with the base point's own precomputed form) `addBase`.
    pub fn add_precomp(&self, pp: &PrecomputedPoint) -> Self {
        let (yp_self, ym_self) = FieldElement::apm(&self.y, &self.x);

        let a = ym_self * pp.y_minus_x;
        let b = yp_self * pp.y_plus_x;
        let c = self.t * pp.xy2d;
        let d = self.z + self.z;

        let e = b - a;
        let f = d - c;
        let g = (d + c).carry();
        let h = b + a;

        EdwardsPoint {
            x: (e * f).carry(),
            y: (g * h).carry(),
            t: (e * h).carry(),
            z: (f * g).carry(),
        }
    }

    /// Add the base point `B`.
    pub fn add_base(&self) -> Self {
        self.add_precomp(&base_point_precomp())
    }

    /// Point negation: `(-X, Y, -T, Z)`.
    pub fn negated(&self) -> Self {
        EdwardsPoint {
            x: -self.x,
            y: self.y,
            t: -self.t,
            z: self.z,
        }
    }

    /// Compress to 32 bytes: `y` little-endian with the parity of the
    /// affine `x` coordinate packed into bit 7 of the last byte.
    pub fn encode(&self) -> [u8; 32] {
        let z_inv = self.z.inv();
        let x = (self.x * z_inv).carry();
        let y = (self.y * z_inv).carry();

        let mut bytes = y.encode();
        let x_bytes = x.encode();
        bytes[31] |= (x_bytes[0] & 1) << 7;
        bytes
    }

    /// Decompress a point from its 32-byte encoding. Variable-time —
    /// intended only for public verification inputs.
    ///
    /// If `negate` is set, the returned point is `-P` rather than `P`
    /// (used by verification to decode `-A` directly, as Straus's method
    /// in [`crate::scalarmul`] wants the negated public key).
    pub fn decode(bytes: &[u8; 32], negate: bool) -> Result<Self, Ed25519Error> {
        if !check_point_var(bytes) {
            debug::log(|| format!("edwards::decode: y >= p ({})", hex_of(bytes)));
            return Err(Ed25519Error::NonCanonicalField);
        }

        let sign = (bytes[31] >> 7) & 1;
        let y = FieldElement::decode(bytes);
        let y2 = y.square().carry();
        let u = (y2 - FieldElement::one()).carry();
        let v = (y2 * curve_d() + FieldElement::one()).carry();

        let (ok, mut x) = FieldElement::sqrt_ratio_var(&u, &v);
        if !ok {
            debug::log(|| format!("edwards::decode: no x satisfies the curve equation for y ({})", hex_of(bytes)));
            return Err(Ed25519Error::NotOnCurve);
        }

        if x.is_zero_var() && sign == 1 {
            debug::log(|| "edwards::decode: x = 0 with sign bit set (negative zero, disallowed)".to_string());
            return Err(Ed25519Error::NegativeZeroX);
        }
        if u8::from(x.is_negative()) != sign {
            x = (-x).carry();
        }

        let point = EdwardsPoint {
            x,
            y,
            t: (x * y).carry(),
            z: FieldElement::one(),
        };

        Ok(if negate { point.negated() } else { point })
    }

    /// Convert to the affine precomputed form used by the fixed-base
    /// table and by Straus's double-scalar multiplication.
    pub(crate) fn to_precomp(self) -> PrecomputedPoint {
        let z_inv = self.z.inv();
        let x = (self.x * z_inv).carry();
        let y = (self.y * z_inv).carry();
        let (y_plus_x, y_minus_x) = FieldElement::apm(&y, &x);
        let xy = (x * y).carry();
        let xy2d = (xy * curve_d2()).carry();
        PrecomputedPoint {
            y_plus_x: y_plus_x.carry(),
            y_minus_x: y_minus_x.carry(),
            xy2d,
        }
    }
}
