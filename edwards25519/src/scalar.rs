//! Integers modulo the prime group order
//! `l = 2^252 + 27742317777372353535851937790883648493`.
//!
//! Reduction and multiplication work on 21-bit signed limbs, the way ref10
//! does, folding with `2^252 = -27742317777372353535851937790883648493`.

use crate::{Error, Result};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

/// The group order `l`, little-endian.
pub const ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

const MASK21: i64 = (1 << 21) - 1;

/// Scalars are elements of the field of integers modulo `l`, kept as their
/// canonical little-endian encoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar {
    bytes: [u8; 32],
}

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self { bytes: [0; 32] };

    /// Multiplicative identity.
    pub const ONE: Self = Self {
        bytes: [
            1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
            0, 0, 0,
        ],
    };

    /// `l - 1`
    pub const MINUS_ONE: Self = Self {
        bytes: [
            0xec, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9,
            0xde, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x10,
        ],
    };

    /// Decodes a canonical encoding, failing when the value is not below `l`.
    pub fn from_canonical_bytes(bytes: &[u8; 32]) -> Result<Self> {
        if bool::from(is_below_order(bytes)) {
            Ok(Self { bytes: *bytes })
        } else {
            Err(Error::NonCanonicalScalar)
        }
    }

    /// Reduces a 256-bit little-endian integer modulo `l`.
    pub fn from_bytes_mod_order(bytes: &[u8; 32]) -> Self {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(bytes);
        Self::from_bytes_mod_order_wide(&wide)
    }

    /// Reduces a 512-bit little-endian integer modulo `l`.
    pub fn from_bytes_mod_order_wide(bytes: &[u8; 64]) -> Self {
        let s = load_limbs::<24>(bytes);
        Self {
            bytes: reduce_limbs(s),
        }
    }

    /// Applies the X25519/Ed25519 clamping to `bytes` and reduces the
    /// resulting integer modulo `l`.
    ///
    /// The reduced value generates the same multiple of any point in the
    /// prime order subgroup.
    pub fn from_bytes_with_clamping(bytes: &[u8; 32]) -> Self {
        let mut clamped = *bytes;
        clamped[0] &= 248;
        clamped[31] &= 127;
        clamped[31] |= 64;
        Self::from_bytes_mod_order(&clamped)
    }

    /// Returns a uniformly random scalar.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let mut wide = [0u8; 64];
        rng.fill_bytes(&mut wide);
        Self::from_bytes_mod_order_wide(&wide)
    }

    /// Returns the canonical little-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    /// Borrows the canonical little-endian encoding.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.bytes
    }

    /// Returns `(a * b + c) mod l`.
    pub fn mul_add(a: &Self, b: &Self, c: &Self) -> Self {
        let a = load_limbs::<12>(&a.bytes);
        let b = load_limbs::<12>(&b.bytes);
        let c = load_limbs::<12>(&c.bytes);

        let mut s = [0i64; 24];
        s[..12].copy_from_slice(&c);
        for i in 0..12 {
            for j in 0..12 {
                s[i + j] += a[i] * b[j];
            }
        }

        for i in (0..23).step_by(2) {
            carry_rounded(&mut s, i);
        }
        for i in (1..22).step_by(2) {
            carry_rounded(&mut s, i);
        }

        Self {
            bytes: reduce_limbs(s),
        }
    }

    /// Returns `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        Self::mul_add(self, &Self::ONE, rhs)
    }

    /// Returns `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        Self::mul_add(rhs, &Self::MINUS_ONE, self)
    }

    /// Returns `self * rhs`.
    pub fn mul(&self, rhs: &Self) -> Self {
        Self::mul_add(self, rhs, &Self::ZERO)
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self::mul_add(self, &Self::MINUS_ONE, &Self::ZERO)
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> Choice {
        self.bytes.ct_eq(&[0u8; 32])
    }

    /// Computes the width-`w` non-adjacent form of this scalar.
    ///
    /// Every non-zero digit is odd with absolute value below `2^(w-1)`, and
    /// any `w` consecutive digits hold at most one non-zero value. Runs in
    /// variable time.
    ///
    /// # Panics
    ///
    /// If `w` is outside `2..=8`.
    pub fn non_adjacent_form(&self, w: usize) -> [i8; 256] {
        assert!((2..=8).contains(&w), "NAF width must be in 2..=8");

        let mut x = [0u64; 5];
        for (limb, chunk) in x.iter_mut().zip(self.bytes.chunks_exact(8)) {
            let mut word = [0u8; 8];
            word.copy_from_slice(chunk);
            *limb = u64::from_le_bytes(word);
        }

        let width = 1u64 << w;
        let window_mask = width - 1;

        let mut naf = [0i8; 256];
        let mut pos = 0;
        let mut carry = 0;
        while pos < 256 {
            let idx = pos / 64;
            let bit = pos % 64;
            let bit_buf = if bit < 64 - w {
                x[idx] >> bit
            } else {
                (x[idx] >> bit) | (x[idx + 1] << (64 - bit))
            };

            let window = carry + (bit_buf & window_mask);
            if window & 1 == 0 {
                // the low digit is zero; carry stays as it is
                pos += 1;
                continue;
            }

            if window < width / 2 {
                carry = 0;
                naf[pos] = window as i8;
            } else {
                carry = 1;
                naf[pos] = (window as i16 - width as i16) as i8;
            }
            pos += w;
        }
        naf
    }

    /// Writes this scalar as 64 signed radix-16 digits in `[-8, 8]`,
    /// least significant first.
    pub fn signed_radix16(&self) -> [i8; 64] {
        let mut digits = [0i8; 64];
        for (i, byte) in self.bytes.iter().enumerate() {
            digits[2 * i] = (byte & 15) as i8;
            digits[2 * i + 1] = (byte >> 4) as i8;
        }

        // Recenter [0, 16) to [-8, 8). The top digit absorbs the final carry.
        for i in 0..63 {
            let carry = (digits[i] + 8) >> 4;
            digits[i] -= carry << 4;
            digits[i + 1] += carry;
        }
        digits
    }
}

/// `bytes < l`, computed with a borrow chain over the whole encoding.
fn is_below_order(bytes: &[u8; 32]) -> Choice {
    let mut borrow = 0u16;
    for (b, l) in bytes.iter().zip(ORDER.iter()) {
        let diff = u16::from(*b)
            .wrapping_sub(u16::from(*l))
            .wrapping_sub(borrow);
        borrow = diff >> 15;
    }
    Choice::from(borrow as u8)
}

/// Splits little-endian bytes into `N` limbs of 21 bits. The last limb
/// holds every remaining bit.
fn load_limbs<const N: usize>(bytes: &[u8]) -> [i64; N] {
    let mut limbs = [0i64; N];
    for (i, limb) in limbs.iter_mut().enumerate() {
        let bit = 21 * i;
        let start = bit / 8;
        let mut word = [0u8; 4];
        word.copy_from_slice(&bytes[start..start + 4]);
        let v = i64::from(u32::from_le_bytes(word)) >> (bit % 8);
        *limb = if i + 1 == N { v } else { v & MASK21 };
    }
    limbs
}

/// Adds `s[i] * 2^252` back into `s[i-12..i-6]`, using the low limbs of `l`.
fn fold(s: &mut [i64; 24], i: usize) {
    let v = s[i];
    s[i - 12] += v * 666643;
    s[i - 11] += v * 470296;
    s[i - 10] += v * 654183;
    s[i - 9] -= v * 997805;
    s[i - 8] += v * 136657;
    s[i - 7] -= v * 683901;
    s[i] = 0;
}

fn carry_rounded(s: &mut [i64; 24], i: usize) {
    let carry = (s[i] + (1 << 20)) >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

fn carry_floor(s: &mut [i64; 24], i: usize) {
    let carry = s[i] >> 21;
    s[i + 1] += carry;
    s[i] -= carry << 21;
}

/// Reduces a 24-limb value modulo `l` and packs the canonical result.
fn reduce_limbs(mut s: [i64; 24]) -> [u8; 32] {
    for i in (18..24).rev() {
        fold(&mut s, i);
    }
    for i in (6..17).step_by(2) {
        carry_rounded(&mut s, i);
    }
    for i in (7..16).step_by(2) {
        carry_rounded(&mut s, i);
    }

    for i in (12..18).rev() {
        fold(&mut s, i);
    }
    for i in (0..11).step_by(2) {
        carry_rounded(&mut s, i);
    }
    for i in (1..12).step_by(2) {
        carry_rounded(&mut s, i);
    }

    fold(&mut s, 12);
    for i in 0..12 {
        carry_floor(&mut s, i);
    }
    fold(&mut s, 12);
    for i in 0..11 {
        carry_floor(&mut s, i);
    }

    pack_limbs(&s[..12])
}

fn pack_limbs(limbs: &[i64]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut acc = 0u64;
    let mut bits = 0;
    let mut idx = 0;
    for limb in limbs {
        acc |= (*limb as u64) << bits;
        bits += 21;
        while bits >= 8 {
            out[idx] = acc as u8;
            acc >>= 8;
            bits -= 8;
            idx += 1;
        }
    }
    out[idx] = acc as u8;
    out
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::conditional_select(&a.bytes[i], &b.bytes[i], choice);
        }
        Self { bytes }
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl DefaultIsZeroes for Scalar {}

impl From<u64> for Scalar {
    fn from(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&n.to_le_bytes());
        Self { bytes }
    }
}
