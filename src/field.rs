//! Field element arithmetic over GF(2^255 - 19).
//!
//! A field element is represented in radix 2^25.5 as ten `i64` limbs,
//! alternating between 26 and 25 bits, matching the representation used by
//! `ref10`/libsodium's `fe25519`. Lazy carry propagation lets several
//! multiplications chain together before the limbs need to be brought back
//! into their canonical bit widths with [`FieldElement::carry`], or into
//! the unique `[0, p)` representative with [`FieldElement::normalize`].

use std::ops::{Add, Mul, Neg, Sub};

/// Field element in GF(2^255 - 19), stored as ten limbs of radix 2^25.5.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldElement(pub [i64; 10]);

impl FieldElement {
    /// Precomputed constant sqrt(-1) mod p.
    pub const SQRT_M1: Self = Self([
        -32595792, -7943725, 9377950, 3500415, 12389472, -272473, -25146209, -2005654, 326686,
        11406482,
    ]);

    /// Additive identity.
    #[inline]
    pub const fn zero() -> Self {
        FieldElement([0; 10])
    }

    /// Multiplicative identity.
    #[inline]
    pub const fn one() -> Self {
        let mut fe = [0i64; 10];
        fe[0] = 1;
        FieldElement(fe)
    }

    /// Build a field element from a small non-negative integer (must fit in
    /// the 26-bit capacity of limb 0, i.e. be less than 2^26).
    #[inline]
    pub fn from_u32(n: u32) -> Self {
        debug_assert!(n < (1 << 26));
        let mut fe = [0i64; 10];
        fe[0] = i64::from(n);
        FieldElement(fe)
    }

    /// Decode a field element from 32 little-endian bytes.
    ///
    /// The top bit of the last byte (reserved elsewhere for a point's sign
    /// bit) is masked off before decoding, per RFC 8032 §5.1.3.
    pub fn decode(bytes: &[u8; 32]) -> Self {
        let mut masked = *bytes;
        masked[31] &= 0x7f;
        Self::decode_unmasked(&masked)
    }

    /// Decode a field element from 32 little-endian bytes without masking
    /// the top bit. Used internally where the caller has already extracted
    /// the sign bit separately.
    fn decode_unmasked(bytes: &[u8; 32]) -> Self {
        let mut h = [0i64; 10];

        h[0] = (bytes[0] as i64)
            | ((bytes[1] as i64) << 8)
            | ((bytes[2] as i64) << 16)
            | (((bytes[3] as i64) & 0x3f) << 24);

        h[1] = (((bytes[3] as i64) >> 6) & 0x03)
            | ((bytes[4] as i64) << 2)
            | ((bytes[5] as i64) << 10)
            | ((bytes[6] as i64) << 18)
            | (((bytes[7] as i64) & 0x01) << 24);

        h[2] = (((bytes[7] as i64) >> 1) & 0x7f)
            | ((bytes[8] as i64) << 7)
            | ((bytes[9] as i64) << 15)
            | (((bytes[10] as i64) & 0x07) << 23);

        h[3] = (((bytes[10] as i64) >> 3) & 0x1f)
            | ((bytes[11] as i64) << 5)
            | ((bytes[12] as i64) << 13)
            | (((bytes[13] as i64) & 0x0f) << 21);

        h[4] = (((bytes[13] as i64) >> 4) & 0x0f)
            | ((bytes[14] as i64) << 4)
            | ((bytes[15] as i64) << 12)
            | (((bytes[16] as i64) & 0x3f) << 20);

        h[5] = (((bytes[16] as i64) >> 6) & 0x03)
            | ((bytes[17] as i64) << 2)
            | ((bytes[18] as i64) << 10)
            | ((bytes[19] as i64) << 18)
            | (((bytes[20] as i64) & 0x01) << 24);

        h[6] = (((bytes[20] as i64) >> 1) & 0x7f)
            | ((bytes[21] as i64) << 7)
            | ((bytes[22] as i64) << 15)
            | (((bytes[23] as i64) & 0x07) << 23);

        h[7] = (((bytes[23] as i64) >> 3) & 0x1f)
            | ((bytes[24] as i64) << 5)
            | ((bytes[25] as i64) << 13)
            | (((bytes[26] as i64) & 0x0f) << 21);

        h[8] = (((bytes[26] as i64) >> 4) & 0x0f)
            | ((bytes[27] as i64) << 4)
            | ((bytes[28] as i64) << 12)
            | (((bytes[29] as i64) & 0x3f) << 20);

        h[9] = (((bytes[29] as i64) >> 6) & 0x03)
            | ((bytes[30] as i64) << 2)
            | ((bytes[31] as i64) << 10);

        FieldElement(h)
    }

    /// Encode the field element as 32 canonical little-endian bytes (value
    /// reduced into `[0, p)` first via [`FieldElement::normalize`]).
    pub fn encode(&self) -> [u8; 32] {
        let h = self.normalize().0;

        let mut output = [0u8; 32];

        output[0] = (h[0] & 0xff) as u8;
        output[1] = ((h[0] >> 8) & 0xff) as u8;
        output[2] = ((h[0] >> 16) & 0xff) as u8;
        output[3] = ((h[0] >> 24) & 0x3f) as u8 | ((h[1] << 6) & 0xc0) as u8;

        output[4] = ((h[1] >> 2) & 0xff) as u8;
        output[5] = ((h[1] >> 10) & 0xff) as u8;
        output[6] = ((h[1] >> 18) & 0xff) as u8;
        output[7] = ((h[1] >> 26) & 0x01) as u8 | ((h[2] << 1) & 0xfe) as u8;

        output[8] = ((h[2] >> 7) & 0xff) as u8;
        output[9] = ((h[2] >> 15) & 0xff) as u8;
        output[10] = ((h[2] >> 23) & 0x07) as u8 | ((h[3] << 3) & 0xf8) as u8;

        output[11] = ((h[3] >> 5) & 0xff) as u8;
        output[12] = ((h[3] >> 13) & 0xff) as u8;
        output[13] = ((h[3] >> 21) & 0x0f) as u8 | ((h[4] << 4) & 0xf0) as u8;

        output[14] = ((h[4] >> 4) & 0xff) as u8;
        output[15] = ((h[4] >> 12) & 0xff) as u8;
        output[16] = ((h[4] >> 20) & 0x3f) as u8 | ((h[5] << 6) & 0xc0) as u8;

        output[17] = ((h[5] >> 2) & 0xff) as u8;
        output[18] = ((h[5] >> 10) & 0xff) as u8;
        output[19] = ((h[5] >> 18) & 0xff) as u8;
        output[20] = ((h[5] >> 26) & 0x01) as u8 | ((h[6] << 1) & 0xfe) as u8;

        output[21] = ((h[6] >> 7) & 0xff) as u8;
        output[22] = ((h[6] >> 15) & 0xff) as u8;
        output[23] = ((h[6] >> 23) & 0x07) as u8 | ((h[7] << 3) & 0xf8) as u8;

        output[24] = ((h[7] >> 5) & 0xff) as u8;
        output[25] = ((h[7] >> 13) & 0xff) as u8;
        output[26] = ((h[7] >> 21) & 0x0f) as u8 | ((h[8] << 4) & 0xf0) as u8;

        output[27] = ((h[8] >> 4) & 0xff) as u8;
        output[28] = ((h[8] >> 12) & 0xff) as u8;
        output[29] = ((h[8] >> 20) & 0x3f) as u8 | ((h[9] << 6) & 0xc0) as u8;

        output[30] = ((h[9] >> 2) & 0xff) as u8;
        output[31] = ((h[9] >> 10) & 0xff) as u8;

        output
    }

    /// Flush accumulated overflow, bringing every limb back within its
    /// 26/25-bit bound. Required before a value produced by a long chain of
    /// pure additions is used as a multiplicand (see the `carry` call-outs
    /// in `edwards.rs`'s `double`/`add`/`add_base`/`add_precomp`).
    pub fn carry(&self) -> Self {
        let mut h = self.0;
        let mut c: i64;

        c = (h[0] + (1 << 25)) >> 26;
        h[1] += c;
        h[0] -= c << 26;
        c = (h[4] + (1 << 25)) >> 26;
        h[5] += c;
        h[4] -= c << 26;

        c = (h[1] + (1 << 24)) >> 25;
        h[2] += c;
        h[1] -= c << 25;
        c = (h[5] + (1 << 24)) >> 25;
        h[6] += c;
        h[5] -= c << 25;

        c = (h[2] + (1 << 25)) >> 26;
        h[3] += c;
        h[2] -= c << 26;
        c = (h[6] + (1 << 25)) >> 26;
        h[7] += c;
        h[6] -= c << 26;

        c = (h[3] + (1 << 24)) >> 25;
        h[4] += c;
        h[3] -= c << 25;
        c = (h[7] + (1 << 24)) >> 25;
        h[8] += c;
        h[7] -= c << 25;

        c = (h[8] + (1 << 25)) >> 26;
        h[9] += c;
        h[8] -= c << 26;

        for _ in 0..3 {
            c = h[9] >> 25;
            h[0] += c * 19;
            h[9] -= c << 25;

            c = h[0] >> 26;
            h[1] += c;
            h[0] -= c << 26;

            c = h[1] >> 25;
            h[2] += c;
            h[1] -= c << 25;
        }

        FieldElement(h)
    }

    /// Reduce to fully canonical form: the unique representative in
    /// `[0, p)`, as opposed to [`FieldElement::carry`], which only
    /// restores each limb's bit width and may still represent a value
    /// up to `p + 18` or so. Needed whenever two field elements must be
    /// compared byte-for-byte (`encode`, `is_zero_var`, `is_negative`).
    pub fn normalize(&self) -> Self {
        let mut h = self.carry().0;

        let mut q = (19 * h[9] + (1 << 24)) >> 25;
        q = (h[0] + q) >> 26;
        q = (h[1] + q) >> 25;
        q = (h[2] + q) >> 26;
        q = (h[3] + q) >> 25;
        q = (h[4] + q) >> 26;
        q = (h[5] + q) >> 25;
        q = (h[6] + q) >> 26;
        q = (h[7] + q) >> 25;
        q = (h[8] + q) >> 26;
        q = (h[9] + q) >> 25;

        h[0] += 19 * q;

        let mut carry = h[0] >> 26;
        h[1] += carry;
        h[0] -= carry << 26;
        carry = h[1] >> 25;
        h[2] += carry;
        h[1] -= carry << 25;
        carry = h[2] >> 26;
        h[3] += carry;
        h[2] -= carry << 26;
        carry = h[3] >> 25;
        h[4] += carry;
        h[3] -= carry << 25;
        carry = h[4] >> 26;
        h[5] += carry;
        h[4] -= carry << 26;
        carry = h[5] >> 25;
        h[6] += carry;
        h[5] -= carry << 25;
        carry = h[6] >> 26;
        h[7] += carry;
        h[6] -= carry << 26;
        carry = h[7] >> 25;
        h[8] += carry;
        h[7] -= carry << 25;
        carry = h[8] >> 26;
        h[9] += carry;
        h[8] -= carry << 26;
        carry = h[9] >> 25;
        h[9] -= carry << 25;

        FieldElement(h)
    }

    /// Paired add-and-subtract: returns `(a + b, a - b)`. The Edwards
    /// addition/doubling formulas use this pattern heavily; computing both
    /// halves together avoids re-reading the operands twice.
    #[inline]
    pub fn apm(a: &Self, b: &Self) -> (Self, Self) {
        (*a + *b, *a - *b)
    }

    #[inline]
    pub fn square(&self) -> Self {
        *self * *self
    }

    /// `2 * self^2`.
    #[inline]
    pub fn square2(&self) -> Self {
        let sq = self.square();
        sq + sq
    }

    #[inline]
    fn pow2k(&self, k: u32) -> Self {
        debug_assert!(k > 0);
        let mut z = self.square().carry();
        for _ in 1..k {
            z = z.square().carry();
        }
        z
    }

    fn pow22501(&self) -> (Self, Self) {
        let t0 = self.square().carry();
        let mut t1 = t0.square().carry();
        t1 = t1.square().carry();
        let t2 = (*self * t1).carry();
        let t3 = (t0 * t2).carry();
        let t4 = t3.square().carry();
        let t5 = (t2 * t4).carry();
        let t6 = t5.pow2k(5);
        let t7 = (t6 * t5).carry();
        let t8 = t7.pow2k(10);
        let t9 = (t8 * t7).carry();
        let t10 = t9.pow2k(20);
        let t11 = (t10 * t9).carry();
        let t12 = t11.pow2k(10);
        let t13 = (t12 * t7).carry();
        let t14 = t13.pow2k(50);
        let t15 = (t14 * t13).carry();
        let t16 = t15.pow2k(100);
        let t17 = (t16 * t15).carry();
        let t18 = t17.pow2k(50);
        let t19 = (t18 * t13).carry();

        (t19, t3)
    }

    /// `self^((p-5)/8)`, the exponent used by [`FieldElement::sqrt_ratio_var`].
    fn pow_p58(&self) -> Self {
        let (t19, _) = self.pow22501();
        (t19.pow2k(2) * *self).carry()
    }

    /// Multiplicative inverse via Fermat's little theorem: `self^(p-2)`.
    /// The exponentiation uses a fixed addition chain regardless of
    /// `self`'s value, so this runs in constant time.
    ///
    /// # Panics
    ///
    /// Never panics; the inverse of zero is conventionally zero for this
    /// representation (the fixed chain computes `0^(p-2) = 0`), so callers
    /// needing to reject zero must check `is_zero_var` themselves.
    pub fn inv(&self) -> Self {
        let (t19, t3) = self.pow22501();
        let t20 = t19.pow2k(5);
        (t20 * t3).carry()
    }

    /// Variable-time attempt to compute `sqrt(u/v)`.
    ///
    /// Returns `(true, r)` with `r` a canonical square root of `u/v` if
    /// `u/v` is a quadratic residue mod p; returns `(false, r)` with `r`
    /// an arbitrary value otherwise. Only ever called on public data
    /// (point decoding during verification), hence the `_var` suffix and
    /// the data-dependent branches below.
    pub fn sqrt_ratio_var(u: &Self, v: &Self) -> (bool, Self) {
        let v2 = v.square().carry();
        let v3 = (v2 * *v).carry();
        let v6 = v3.square().carry();
        let v7 = (v6 * *v).carry();

        let u_v3 = (*u * v3).carry();
        let u_v7 = (*u * v7).carry();

        let candidate = (u_v3 * u_v7.pow_p58()).carry();

        let vxx = (*v * candidate.square()).carry();
        let has_m_root = (vxx - *u).carry().is_zero_var();
        let has_p_root = (vxx + *u).carry().is_zero_var();

        let mut r = candidate;
        if has_p_root {
            r = (r * Self::SQRT_M1).carry();
        }
        if r.is_negative() {
            r = (-r).carry();
        }

        (has_m_root || has_p_root, r)
    }

    /// Conditional select in constant time: returns `a` if `choice == 1`,
    /// `b` if `choice == 0`. `choice` must be exactly 0 or 1.
    #[inline]
    pub fn cselect(a: &Self, b: &Self, choice: u8) -> Self {
        let mask = -(choice as i64);
        let mut result = [0i64; 10];
        for i in 0..10 {
            result[i] = b.0[i] ^ (mask & (a.0[i] ^ b.0[i]));
        }
        FieldElement(result)
    }

    /// Conditional swap in constant time: swaps `a` and `b` iff `choice == 1`.
    pub fn cswap(choice: u8, a: &mut Self, b: &mut Self) {
        let mask = -(choice as i64);
        for i in 0..10 {
            let t = mask & (a.0[i] ^ b.0[i]);
            a.0[i] ^= t;
            b.0[i] ^= t;
        }
    }

    /// Conditional negate in constant time: returns `-self` iff `choice == 1`,
    /// `self` otherwise.
    #[inline]
    pub fn cnegate(&self, choice: u8) -> Self {
        Self::cselect(&(-*self), self, choice)
    }

    /// Equality-to-zero test. Variable-time (only ever used on public
    /// verification intermediates); the `_var` suffix marks this
    /// explicitly per the crate's constant-time discipline.
    pub fn is_zero_var(&self) -> bool {
        self.encode().iter().all(|&b| b == 0)
    }

    /// `true` if the canonical encoding's least-significant bit is 1.
    /// Used to pick a canonical sign for square roots and for point
    /// encoding's x-parity bit.
    pub fn is_negative(&self) -> bool {
        (self.encode()[0] & 1) == 1
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        let mut h = [0i64; 10];
        for i in 0..10 {
            h[i] = self.0[i] + other.0[i];
        }
        FieldElement(h)
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        let mut h = [0i64; 10];
        for i in 0..10 {
            h[i] = self.0[i] - other.0[i];
        }
        FieldElement(h)
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        FieldElement::zero() - self
    }
}

impl Mul for FieldElement {
    type Output = Self;

    /// Full field multiplication with partial reduction: the output's
    /// limbs are brought back within the lazy-limb envelope so a bounded
    /// number of further multiplies cannot overflow, but the result is not
    /// fully canonical (see [`FieldElement::encode`] for that).
    fn mul(self, other: Self) -> Self {
        let f = self.0;
        let g = other.0;

        let f: [i128; 10] = std::array::from_fn(|i| f[i] as i128);
        let g: [i128; 10] = std::array::from_fn(|i| g[i] as i128);

        let f1_2 = 2 * f[1];
        let f3_2 = 2 * f[3];
        let f5_2 = 2 * f[5];
        let f7_2 = 2 * f[7];
        let f9_2 = 2 * f[9];

        let g1_19 = 19 * g[1];
        let g2_19 = 19 * g[2];
        let g3_19 = 19 * g[3];
        let g4_19 = 19 * g[4];
        let g5_19 = 19 * g[5];
        let g6_19 = 19 * g[6];
        let g7_19 = 19 * g[7];
        let g8_19 = 19 * g[8];
        let g9_19 = 19 * g[9];

        let mut h = [0i128; 10];

        h[0] = f[0] * g[0]
            + f1_2 * g9_19
            + f[2] * g8_19
            + f3_2 * g7_19
            + f[4] * g6_19
            + f5_2 * g5_19
            + f[6] * g4_19
            + f7_2 * g3_19
            + f[8] * g2_19
            + f9_2 * g1_19;

        h[1] = f[0] * g[1]
            + f[1] * g[0]
            + f[2] * g9_19
            + f[3] * g8_19
            + f[4] * g7_19
            + f[5] * g6_19
            + f[6] * g5_19
            + f[7] * g4_19
            + f[8] * g3_19
            + f[9] * g2_19;

        h[2] = f[0] * g[2]
            + f1_2 * g[1]
            + f[2] * g[0]
            + f3_2 * g9_19
            + f[4] * g8_19
            + f5_2 * g7_19
            + f[6] * g6_19
            + f7_2 * g5_19
            + f[8] * g4_19
            + f9_2 * g3_19;

        h[3] = f[0] * g[3]
            + f[1] * g[2]
            + f[2] * g[1]
            + f[3] * g[0]
            + f[4] * g9_19
            + f[5] * g8_19
            + f[6] * g7_19
            + f[7] * g6_19
            + f[8] * g5_19
            + f[9] * g4_19;

        h[4] = f[0] * g[4]
            + f1_2 * g[3]
            + f[2] * g[2]
            + f3_2 * g[1]
            + f[4] * g[0]
            + f5_2 * g9_19
            + f[6] * g8_19
            + f7_2 * g7_19
            + f[8] * g6_19
            + f9_2 * g5_19;

        h[5] = f[0] * g[5]
            + f[1] * g[4]
            + f[2] * g[3]
            + f[3] * g[2]
            + f[4] * g[1]
            + f[5] * g[0]
            + f[6] * g9_19
            + f[7] * g8_19
            + f[8] * g7_19
            + f[9] * g6_19;

        h[6] = f[0] * g[6]
            + f1_2 * g[5]
            + f[2] * g[4]
            + f3_2 * g[3]
            + f[4] * g[2]
            + f5_2 * g[1]
            + f[6] * g[0]
            + f7_2 * g9_19
            + f[8] * g8_19
            + f9_2 * g7_19;

        h[7] = f[0] * g[7]
            + f[1] * g[6]
            + f[2] * g[5]
            + f[3] * g[4]
            + f[4] * g[3]
            + f[5] * g[2]
            + f[6] * g[1]
            + f[7] * g[0]
            + f[8] * g9_19
            + f[9] * g8_19;

        h[8] = f[0] * g[8]
            + f1_2 * g[7]
            + f[2] * g[6]
            + f3_2 * g[5]
            + f[4] * g[4]
            + f5_2 * g[3]
            + f[6] * g[2]
            + f7_2 * g[1]
            + f[8] * g[0]
            + f9_2 * g9_19;

        h[9] = f[0] * g[9]
            + f[1] * g[8]
            + f[2] * g[7]
            + f[3] * g[6]
            + f[4] * g[5]
            + f[5] * g[4]
            + f[6] * g[3]
            + f[7] * g[2]
            + f[8] * g[1]
            + f[9] * g[0];

        let mut carry: i128;

        carry = (h[0] + (1i128 << 25)) >> 26;
        h[1] += carry;
        h[0] -= carry << 26;
        carry = (h[4] + (1i128 << 25)) >> 26;
        h[5] += carry;
        h[4] -= carry << 26;

        carry = (h[1] + (1i128 << 24)) >> 25;
        h[2] += carry;
        h[1] -= carry << 25;
        carry = (h[5] + (1i128 << 24)) >> 25;
        h[6] += carry;
        h[5] -= carry << 25;

        carry = (h[2] + (1i128 << 25)) >> 26;
        h[3] += carry;
        h[2] -= carry << 26;
        carry = (h[6] + (1i128 << 25)) >> 26;
        h[7] += carry;
        h[6] -= carry << 26;

        carry = (h[3] + (1i128 << 24)) >> 25;
        h[4] += carry;
        h[3] -= carry << 25;
        carry = (h[7] + (1i128 << 24)) >> 25;
        h[8] += carry;
        h[7] -= carry << 25;

        carry = (h[8] + (1i128 << 25)) >> 26;
        h[9] += carry;
        h[8] -= carry << 26;

        carry = (h[9] + (1i128 << 24)) >> 25;
        h[0] += carry * 19;
        h[9] -= carry << 25;

        carry = h[0] >> 26;
        h[1] += carry;
        h[0] -= carry << 26;

        let h_i64 = std::array::from_fn(|i| h[i] as i64);

        FieldElement(h_i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_one() {
        let zero = FieldElement::zero();
        let one = FieldElement::one();
        assert_eq!(zero.0[0], 0);
        assert_eq!(one.0[0], 1);
        assert_eq!((zero + one).carry().0[0], 1);
    }

    #[test]
    fn addition_and_multiplication() {
        let one = FieldElement::one();
        let two = one + one;
        assert_eq!(two.carry().0[0], 2);
        let four = two * two;
        assert_eq!(four.carry().0[0], 4);
    }

    #[test]
    fn square_matches_mul() {
        let two = FieldElement::one() + FieldElement::one();
        assert_eq!(two.square().carry().0, (two * two).carry().0);
    }

    #[test]
    fn apm_matches_add_sub() {
        let a = FieldElement::from_u32(7);
        let b = FieldElement::from_u32(3);
        let (sum, diff) = FieldElement::apm(&a, &b);
        assert_eq!(sum.carry().encode(), (a + b).carry().encode());
        assert_eq!(diff.carry().encode(), (a - b).carry().encode());
    }

    #[test]
    fn encode_decode_roundtrip() {
        let one = FieldElement::one();
        let bytes = one.encode();
        assert_eq!(FieldElement::decode(&bytes).encode(), bytes);

        let zero = FieldElement::zero();
        let zbytes = zero.encode();
        assert_eq!(FieldElement::decode(&zbytes).encode(), zbytes);
    }

    #[test]
    fn decode_masks_sign_bit() {
        let mut bytes = FieldElement::one().encode();
        bytes[31] |= 0x80;
        assert_eq!(FieldElement::decode(&bytes).encode(), FieldElement::one().encode());
    }

    #[test]
    fn inv_roundtrip() {
        let fe = FieldElement::from_u32(5);
        let inv = fe.inv();
        assert_eq!((fe * inv).carry().encode(), FieldElement::one().encode());
    }

    #[test]
    fn sqrt_ratio_four_over_one() {
        let four = FieldElement::from_u32(4);
        let (ok, r) = FieldElement::sqrt_ratio_var(&four, &FieldElement::one());
        assert!(ok);
        assert_eq!(r.square().carry().encode(), four.encode());
    }

    #[test]
    fn sqrt_ratio_rejects_non_residue() {
        // 2 is a quadratic non-residue mod p (p = 5 mod 8 => 2 is a QNR).
        let two = FieldElement::from_u32(2);
        let (ok, _) = FieldElement::sqrt_ratio_var(&two, &FieldElement::one());
        assert!(!ok);
    }

    #[test]
    fn cselect_and_cswap() {
        let a = FieldElement::from_u32(11);
        let b = FieldElement::from_u32(22);
        assert_eq!(
            FieldElement::cselect(&a, &b, 1).encode(),
            a.carry().encode()
        );
        assert_eq!(
            FieldElement::cselect(&a, &b, 0).encode(),
            b.carry().encode()
        );

        let mut x = a;
        let mut y = b;
        FieldElement::cswap(1, &mut x, &mut y);
        assert_eq!(x.encode(), b.carry().encode());
        assert_eq!(y.encode(), a.carry().encode());
    }

    #[test]
    fn cnegate() {
        let a = FieldElement::from_u32(9);
        assert_eq!(a.cnegate(0).encode(), a.carry().encode());
        assert_eq!(a.cnegate(1).encode(), (-a).carry().encode());
    }

    #[test]
    fn is_zero_var_detects_zero() {
        assert!(FieldElement::zero().is_zero_var());
        assert!(!FieldElement::one().is_zero_var());
    }
}
