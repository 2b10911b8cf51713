//! Scalar multiplication: a constant-time fixed-base multiply driven by a
//! precomputed table, and a variable-time Straus-style double-scalar
//! multiply used only during verification.

use once_cell::sync::OnceCell;

use crate::edwards::{EdwardsPoint, PrecomputedPoint};
use crate::field::FieldElement;
use crate::scalar;

/// Precomputed multiples of the base point: for byte position `i in
/// [0,32)` and multiplier `j in [1,8]`, row `i` slot `j-1` holds
/// `j * 256^i * B` in affine precomputed form.
pub struct BasePointTable(Box<[[PrecomputedPoint; 8]; 32]>);

static TABLE: OnceCell<BasePointTable> = OnceCell::new();

fn build_table() -> BasePointTable {
    let mut rows: Vec<[PrecomputedPoint; 8]> = Vec::with_capacity(32);
    let mut base_at_position = EdwardsPoint::base();

    for _ in 0..32 {
        let mut row = [PrecomputedPoint::identity(); 8];
        let mut multiple = base_at_position;
        for slot in row.iter_mut() {
            *slot = multiple.to_precomp();
            multiple = multiple.add(&base_at_position);
        }
        rows.push(row);

        for _ in 0..8 {
            base_at_position = base_at_position.double();
        }
    }

    let array: [[PrecomputedPoint; 8]; 32] =
        rows.try_into().unwrap_or_else(|_| unreachable!("exactly 32 rows were built"));

    BasePointTable(Box::new(array))
}

fn base_point_table() -> &'static BasePointTable {
    TABLE.get_or_init(build_table)
}

/// Force construction of the fixed-base table. Safe to call eagerly and
/// concurrently from multiple threads: the first caller builds it, every
/// other caller (racing or later) observes the same finished table.
pub fn precompute() {
    base_point_table();
}

/// Constant-time lookup: select `row[abs-1]` without branching or
/// data-dependent memory access, leaving the identity when `abs == 0`.
fn select_precomp(row: &[PrecomputedPoint; 8], abs: u32) -> PrecomputedPoint {
    let mut result = PrecomputedPoint::identity();
    for (j, candidate) in row.iter().enumerate() {
        let j = (j + 1) as u32;
        let matches = (((j ^ abs).wrapping_sub(1)) >> 31) as u8 & 1;
        result = PrecomputedPoint {
            y_plus_x: FieldElement::cselect(&candidate.y_plus_x, &result.y_plus_x, matches),
            y_minus_x: FieldElement::cselect(&candidate.y_minus_x, &result.y_minus_x, matches),
            xy2d: FieldElement::cselect(&candidate.xy2d, &result.xy2d, matches),
        };
    }
    result
}

/// Extract `(sign, abs)` from a signed nibble in `[-8, 8]` using only
/// arithmetic shift and masking, per the crate's constant-time
/// conventions for secret-dependent digits.
fn sign_and_abs(digit: i8) -> (u8, u32) {
    let sign = ((digit >> 7) & 1) as u8;
    let mask = -(sign as i8);
    let abs = (digit - ((digit << 1) & mask)) as u8;
    (sign, u32::from(abs))
}

fn add_windowed_digit(r: EdwardsPoint, row: &[PrecomputedPoint; 8], digit: i8) -> EdwardsPoint {
    let (sign, abs) = sign_and_abs(digit);
    let pp = select_precomp(row, abs).cnegate(sign);
    r.add_precomp(&pp)
}

/// Fixed-base constant-time scalar multiplication: `scalar * B`.
///
/// `scalar_bytes` need not already be reduced mod ℓ; it is consumed only
/// through [`scalar::recode`]'s signed-digit expansion, which is defined
/// on any 256-bit input. Callers computing a public key or a commitment
/// `r*B` pass a pruned or reduced scalar respectively.
pub fn scalarmult_base(scalar_bytes: &[u8; 32]) -> EdwardsPoint {
    let table = base_point_table();
    let digits = scalar::recode(scalar_bytes);
    let mut r = EdwardsPoint::neutral();

    for idx in (1..64).step_by(2) {
        r = add_windowed_digit(r, &table.0[idx / 2], digits[idx]);
    }

    for _ in 0..4 {
        r = r.double();
    }

    for idx in (0..64).step_by(2) {
        r = add_windowed_digit(r, &table.0[idx / 2], digits[idx]);
    }

    r
}

fn bit_at(bytes: &[u8; 32], index: usize) -> bool {
    ((bytes[index / 8] >> (index % 8)) & 1) == 1
}

/// Variable-time double-scalar multiplication (Straus's method):
/// `scalar_s * B + scalar_a * a_neg`, where `a_neg` is the caller-supplied
/// negation of the public key point. Used only in `verify`, where every
/// input is public.
pub fn double_scalarmult_var(
    scalar_s: &[u8; 32],
    a_neg: &EdwardsPoint,
    scalar_a: &[u8; 32],
) -> EdwardsPoint {
    let q = a_neg.add_base();
    let mut r = EdwardsPoint::neutral();

    for i in (0..256).rev() {
        r = r.double();
        let bs = bit_at(scalar_s, i);
        let ba = bit_at(scalar_a, i);
        r = match (bs, ba) {
            (true, true) => r.add(&q),
            (true, false) => r.add_base(),
            (false, true) => r.add(a_neg),
            (false, false) => r,
        };
    }

    r
}
