//! Scalar multiplication on secp256k1.
//!
//! Two strategies are provided. [`JacobianPoint::mul`] is constant time and
//! is the one used with secrets. [`scalar_mult_non_const`] is faster and
//! branches on the scalar, so it is only used with public values such as
//! signature verification and public key recovery.
//!
//! Both split the scalar with the endomorphism `λ(x, y) = (βx, y)`, see
//! "Guide to Elliptic Curve Cryptography" (Hankerson, Menezes, Vanstone),
//! algorithm 3.74. `g1 = round(2^384 b2 / n)` and `g2 = round(2^384 (-b1) / n)`
//! are precise enough that the rounding never goes wrong.

use super::{JacobianPoint, Scalar};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// -λ mod n
const MINUS_LAMBDA: Scalar = Scalar([
    0xB512_83CF,
    0xE0CF_C810,
    0x8EC7_39C2,
    0xA880_B9FC,
    0x77ED_9BA4,
    0x5AD9_E3FD,
    0x3FA3_CF1F,
    0xAC9C_52B3,
]);

/// -b1
const MINUS_B1: Scalar = Scalar([
    0x0ABF_E4C3,
    0x6F54_7FA9,
    0x010E_8828,
    0xE443_7ED6,
    0x0000_0000,
    0x0000_0000,
    0x0000_0000,
    0x0000_0000,
]);

/// -b2 mod n
const MINUS_B2: Scalar = Scalar([
    0x3DB1_562C,
    0xD765_CDA8,
    0x0774_346D,
    0x8A28_0AC5,
    0xFFFF_FFFE,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
]);

const G1: Scalar = Scalar([
    0x45DB_B031,
    0xE893_209A,
    0x71E8_CA7F,
    0x3DAA_8A14,
    0x9284_EB15,
    0xE86C_90E4,
    0xA7D4_6BCD,
    0x3086_D221,
]);

const G2: Scalar = Scalar([
    0x8AC4_7F71,
    0x1571_B4AE,
    0x9DF5_06C6,
    0x2212_08AC,
    0x0ABF_E4C4,
    0x6F54_7FA9,
    0x010E_8828,
    0xE443_7ED6,
]);

const GLV_SHIFT: usize = 384;

/// Splits `k` into `(k1, k2)` with `k1 + k2 λ = k mod n`.
///
/// Each half, or its negation modulo `n`, is below `2^128`. Constant time.
pub fn split_k(k: &Scalar) -> (Scalar, Scalar) {
    // the shift is public, so the _var calls are constant time
    let c1 = k.mul_shift_var(&G1, GLV_SHIFT).mul(&MINUS_B1);
    let c2 = k.mul_shift_var(&G2, GLV_SHIFT).mul(&MINUS_B2);
    let r2 = c1.add(&c2);
    let r1 = k.add(&r2.mul(&MINUS_LAMBDA));
    (r1, r2)
}

/// Non-adjacent form of a big-endian integer.
///
/// The digits are split into two big-endian bit strings of equal length:
/// a set bit in [`Naf::pos`] is a `+1` digit, a set bit in [`Naf::neg`] is a
/// `-1` digit. No two adjacent digits are both nonzero.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Naf {
    pos: [u8; 33],
    neg: [u8; 33],
    start: usize,
}

impl Naf {
    /// Positive digits, big-endian.
    pub fn pos(&self) -> &[u8] {
        &self.pos[self.start..]
    }

    /// Negative digits, big-endian.
    pub fn neg(&self) -> &[u8] {
        &self.neg[self.start..]
    }
}

/// Computes the NAF of `k`, a big-endian integer of at most 32 bytes.
///
/// The output has one byte more than the input when the top digit carries
/// out, otherwise it has the same length. Leading zeros are kept.
///
/// # Panics
///
/// If `k` is longer than 32 bytes.
pub(crate) fn naf(k: &[u8]) -> Naf {
    assert!(k.len() <= 32, "NAF input is limited to 32 bytes");

    let len = k.len();
    let bit = |i: usize| -> u8 {
        if i >= len * 8 {
            0
        } else {
            (k[len - 1 - i / 8] >> (i % 8)) & 1
        }
    };

    // Digit i lands in byte `len - i / 8` of a `len + 1` byte buffer, the
    // first byte holding only a final carry.
    let mut pos = [0u8; 33];
    let mut neg = [0u8; 33];
    let mut carry = 0u8;
    for i in 0..len * 8 {
        let byte = len - i / 8;
        let mask = 1u8 << (i % 8);
        match carry + bit(i) {
            1 => {
                if bit(i + 1) == 1 {
                    neg[byte] |= mask;
                    carry = 1;
                } else {
                    pos[byte] |= mask;
                    carry = 0;
                }
            }
            2 => carry = 1,
            _ => carry = 0,
        }
    }

    let start = if carry == 1 {
        pos[0] = 1;
        0
    } else {
        1
    };

    Naf {
        pos: shift_to_end(&pos, len + 1),
        neg: shift_to_end(&neg, len + 1),
        start: 33 - (len + 1) + start,
    }
}

/// Moves the first `used` bytes of `buf` to its end.
fn shift_to_end(buf: &[u8; 33], used: usize) -> [u8; 33] {
    let mut out = [0u8; 33];
    out[33 - used..].copy_from_slice(&buf[..used]);
    out
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}

/// Returns `k * point`.
///
/// Variable time: only use with public scalars.
pub fn scalar_mult_non_const(k: &Scalar, point: &JacobianPoint) -> JacobianPoint {
    let (mut k1, mut k2) = split_k(k);

    let mut p1 = *point;
    let mut p1_neg = p1.negate();
    let mut p2 = point.endomorphism();
    let mut p2_neg = p2.negate();

    // Keep both halves small by negating them together with their points.
    if bool::from(k1.is_over_half_order()) {
        k1 = k1.negate();
        core::mem::swap(&mut p1, &mut p1_neg);
    }
    if bool::from(k2.is_over_half_order()) {
        k2 = k2.negate();
        core::mem::swap(&mut p2, &mut p2_neg);
    }

    let k1_bytes = k1.to_bytes();
    let k2_bytes = k2.to_bytes();
    let naf1 = naf(strip_leading_zeros(&k1_bytes));
    let naf2 = naf(strip_leading_zeros(&k2_bytes));

    let len = naf1.pos().len().max(naf2.pos().len());
    let pad1 = len - naf1.pos().len();
    let pad2 = len - naf2.pos().len();

    let mut acc = JacobianPoint::IDENTITY;
    for i in 0..len {
        let (pos1, neg1) = if i < pad1 {
            (0, 0)
        } else {
            (naf1.pos()[i - pad1], naf1.neg()[i - pad1])
        };
        let (pos2, neg2) = if i < pad2 {
            (0, 0)
        } else {
            (naf2.pos()[i - pad2], naf2.neg()[i - pad2])
        };

        for bit in (0..8).rev() {
            acc = acc.double_non_const();

            if (pos1 >> bit) & 1 == 1 {
                acc = acc.add_non_const(&p1);
            } else if (neg1 >> bit) & 1 == 1 {
                acc = acc.add_non_const(&p1_neg);
            }

            if (pos2 >> bit) & 1 == 1 {
                acc = acc.add_non_const(&p2);
            } else if (neg2 >> bit) & 1 == 1 {
                acc = acc.add_non_const(&p2_neg);
            }
        }
    }
    acc
}

/// Returns `k * G`.
///
/// Variable time: only use with public scalars.
pub fn scalar_base_mult_non_const(k: &Scalar) -> JacobianPoint {
    scalar_mult_non_const(k, &JacobianPoint::GENERATOR)
}

/// The first eight multiples of a point, indexed by digit magnitude.
struct LookupTable([JacobianPoint; 8]);

impl From<&JacobianPoint> for LookupTable {
    fn from(p: &JacobianPoint) -> Self {
        let mut points = [*p; 8];
        for j in 0..7 {
            points[j + 1] = p.add(&points[j]);
        }
        LookupTable(points)
    }
}

impl LookupTable {
    /// Scans every entry, so the digit `x` in `-8..=8` is not leaked.
    fn select(&self, x: i8) -> JacobianPoint {
        debug_assert!((-8..=8).contains(&x));

        let xmask = x >> 7;
        let xabs = (x + xmask) ^ xmask;

        let mut t = JacobianPoint::IDENTITY;
        for (j, point) in self.0.iter().enumerate() {
            let c = (xabs as u8).ct_eq(&(j as u8 + 1));
            t.conditional_assign(point, c);
        }

        let neg_mask = Choice::from((xmask & 1) as u8);
        t.conditional_assign(&t.negate(), neg_mask);
        t
    }
}

/// Signed base-16 digits of a half-width GLV scalar, least significant
/// first. Every digit but the last lies in `-8..8`; `x` must be below 2^128.
fn to_radix_16_half(x: &Scalar) -> [i8; 33] {
    let mut output = [0i8; 33];

    let bytes = x.to_bytes();
    debug_assert!(bytes[..16].iter().all(|&b| b == 0));
    for i in 0..16 {
        output[2 * i] = (bytes[31 - i] & 0xf) as i8;
        output[2 * i + 1] = ((bytes[31 - i] >> 4) & 0xf) as i8;
    }

    // a digit of 8 or more borrows 16 from the next one up
    for i in 0..32 {
        let carry = (output[i] + 8) >> 4;
        output[i] -= carry << 4;
        output[i + 1] += carry;
    }

    output
}

/// Folds the sign of a GLV half into its point so that the digits come
/// from a scalar below 2^128.
fn signed_half(point: &JacobianPoint, k: &Scalar) -> (LookupTable, [i8; 33]) {
    let negative = k.is_over_half_order();
    let k = Scalar::conditional_select(k, &k.negate(), negative);
    let point = JacobianPoint::conditional_select(point, &point.negate(), negative);
    (LookupTable::from(&point), to_radix_16_half(&k))
}

impl JacobianPoint {
    /// Returns `k * self` in constant time.
    pub fn mul(&self, k: &Scalar) -> Self {
        let (k1, k2) = split_k(k);
        let (table1, digits1) = signed_half(self, &k1);
        let (table2, digits2) = signed_half(&self.endomorphism(), &k2);

        let mut acc = table1.select(digits1[32]).add(&table2.select(digits2[32]));
        for i in (0..32).rev() {
            acc = acc.double().double().double().double();
            acc = acc.add(&table1.select(digits1[i]));
            acc = acc.add(&table2.select(digits2[i]));
        }
        acc
    }

    /// Returns `k * G` in constant time.
    pub fn mul_base(k: &Scalar) -> Self {
        Self::GENERATOR.mul(k)
    }
}
