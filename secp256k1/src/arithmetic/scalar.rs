//! Scalar field arithmetic modulo the secp256k1 group order `n`.

mod wide;

use self::wide::WideScalar;
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, CtOption};
use zeroize::DefaultIsZeroes;

/// Constant representing the modulus
/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141
pub(crate) const MODULUS: [u32; 8] = [
    0xD036_4141,
    0xBFD2_5E8C,
    0xAF48_A03B,
    0xBAAE_DCE6,
    0xFFFF_FFFE,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
];

/// Limbs of 2^256 minus the secp256k1 order.
pub(crate) const NEG_MODULUS: [u32; 8] = [
    !MODULUS[0] + 1,
    !MODULUS[1],
    !MODULUS[2],
    !MODULUS[3],
    !MODULUS[4],
    !MODULUS[5],
    !MODULUS[6],
    !MODULUS[7],
];

/// n / 2, rounded down.
const FRAC_MODULUS_2: [u32; 8] = [
    0x681B_20A0,
    0xDFE9_2F46,
    0x57A4_501D,
    0x5D57_6E73,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0xFFFF_FFFF,
    0x7FFF_FFFF,
];

/// n - 2, the inversion exponent.
const MODULUS_MINUS_TWO: [u32; 8] = [
    MODULUS[0] - 2,
    MODULUS[1],
    MODULUS[2],
    MODULUS[3],
    MODULUS[4],
    MODULUS[5],
    MODULUS[6],
    MODULUS[7],
];

/// An element in the finite field modulo
/// n = FFFFFFFF FFFFFFFF FFFFFFFF FFFFFFFE BAAEDCE6 AF48A03B BFD25E8C D0364141.
///
/// Stored as eight little-endian 32-bit limbs. Every constructor and
/// operation returns a fully reduced value in `[0, n)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Scalar(pub(crate) [u32; 8]);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self([0; 8]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0, 0, 0, 0, 0]);

    /// Creates a scalar from a `u32`.
    pub const fn from_u32(v: u32) -> Self {
        Self([v, 0, 0, 0, 0, 0, 0, 0])
    }

    /// Creates a scalar from a `u64`.
    pub const fn from_u64(v: u64) -> Self {
        Self([v as u32, (v >> 32) as u32, 0, 0, 0, 0, 0, 0])
    }

    /// Interprets 32 big-endian bytes as an integer and reduces it modulo
    /// `n`. The returned `Choice` is set when the input was `>= n`.
    pub fn set_bytes(bytes: &[u8; 32]) -> (Self, Choice) {
        let w = limbs_from_be_bytes(bytes);
        let (gt, eq) = ct_compare(&w, &MODULUS);
        let overflow = gt | eq;
        (Self::from_overflow(&w, Choice::from(0)), overflow)
    }

    /// Like [`Scalar::set_bytes`] for a slice of any length. Slices longer
    /// than 32 bytes are truncated to their first 32 bytes, shorter ones are
    /// left-padded with zeros.
    pub fn set_byte_slice(bytes: &[u8]) -> (Self, Choice) {
        let bytes = if bytes.len() > 32 { &bytes[..32] } else { bytes };
        let mut buf = [0u8; 32];
        buf[32 - bytes.len()..].copy_from_slice(bytes);
        Self::set_bytes(&buf)
    }

    /// Parses a canonical big-endian encoding; none if the value is `>= n`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let (scalar, overflow) = Self::set_bytes(bytes);
        CtOption::new(scalar, !overflow)
    }

    /// Returns the big-endian encoding of this scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        for (i, limb) in self.0.iter().enumerate() {
            let start = (7 - i) * 4;
            out[start..start + 4].copy_from_slice(&limb.to_be_bytes());
        }
        out
    }

    /// Determine if this `Scalar` is zero.
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Is this scalar odd?
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Is this scalar greater than `n / 2`?
    pub fn is_over_half_order(&self) -> Choice {
        ct_compare(&self.0, &FRAC_MODULUS_2).0
    }

    /// Returns `self + rhs mod n`.
    pub fn add(&self, rhs: &Self) -> Self {
        let (w, carry) = adc_array(&self.0, &rhs.0);
        Self::from_overflow(&w, Choice::from(carry as u8))
    }

    /// Returns `self - rhs mod n`.
    pub fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.negate())
    }

    /// Returns `-self mod n`, mapping zero to zero.
    pub fn negate(&self) -> Self {
        let (res, _) = sbb_array(&MODULUS, &self.0);
        Self::conditional_select(&Self(res), &Self::ZERO, self.is_zero())
    }

    /// Returns `self * rhs mod n`.
    pub fn mul(&self, rhs: &Self) -> Self {
        WideScalar::mul_wide(&self.0, &rhs.0).reduce()
    }

    /// Returns `self * self mod n`.
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    /// Returns the multiplicative inverse via `self^(n - 2)`, with the
    /// inverse of zero defined as zero.
    ///
    /// Runs in constant time: the exponent is public and walked in fixed
    /// 4-bit windows with one table multiplication per window.
    pub fn invert(&self) -> Self {
        let mut powers = [Self::ONE; 16];
        powers[1] = *self;
        for i in 2..16 {
            powers[i] = powers[i - 1].mul(self);
        }

        let mut acc = Self::ONE;
        for limb in MODULUS_MINUS_TWO.iter().rev() {
            for window in (0..8).rev() {
                acc = acc.square().square().square().square();
                let nibble = (limb >> (window * 4)) & 0xF;
                acc = acc.mul(&powers[nibble as usize]);
            }
        }
        acc
    }

    /// Returns `(self * b) >> shift`, rounded to nearest.
    ///
    /// Constant time in the scalars but not in `shift`, which must be at
    /// least 256.
    pub fn mul_shift_var(&self, b: &Self, shift: usize) -> Self {
        debug_assert!(shift >= 256);

        let l = WideScalar::mul_wide(&self.0, &b.0).0;
        let limbs = shift >> 5;
        let low = shift & 0x1F;

        let mut r = [0u32; 8];
        for (i, limb) in r.iter_mut().enumerate() {
            let idx = limbs + i;
            if idx < 16 {
                let mut v = l[idx] >> low;
                if low != 0 && idx + 1 < 16 {
                    v |= l[idx + 1] << (32 - low);
                }
                *limb = v;
            }
        }

        let round = (l[(shift - 1) >> 5] >> ((shift - 1) & 0x1F)) & 1;
        Self(r).conditional_add_bit(0, Choice::from(round as u8))
    }

    /// Adds `2^bit` when `flag` is set.
    fn conditional_add_bit(&self, bit: usize, flag: Choice) -> Self {
        debug_assert!(bit < 256);

        let mut w = [0u32; 8];
        w[bit >> 5] = 1 << (bit & 0x1F);
        Self::conditional_select(self, &self.add(&Self(w)), flag)
    }

    /// Reduces a value in `[0, 2n)` given as 256 limb bits plus a carry bit.
    pub(crate) fn from_overflow(w: &[u32; 8], high_bit: Choice) -> Self {
        let (gt, eq) = ct_compare(w, &MODULUS);
        let (reduced, _) = sbb_array(w, &MODULUS);
        let mut out = [0u32; 8];
        for i in 0..8 {
            out[i] = u32::conditional_select(&w[i], &reduced[i], high_bit | gt | eq);
        }
        Self(out)
    }
}

impl ConditionallySelectable for Scalar {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut out = [0u32; 8];
        for i in 0..8 {
            out[i] = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(out)
    }
}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Scalar {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Scalar {}

impl DefaultIsZeroes for Scalar {}

impl From<u32> for Scalar {
    fn from(v: u32) -> Self {
        Self::from_u32(v)
    }
}

impl From<u64> for Scalar {
    fn from(v: u64) -> Self {
        Self::from_u64(v)
    }
}

fn limbs_from_be_bytes(bytes: &[u8; 32]) -> [u32; 8] {
    let mut w = [0u32; 8];
    for (i, limb) in w.iter_mut().enumerate() {
        let start = (7 - i) * 4;
        *limb = u32::from_be_bytes([
            bytes[start],
            bytes[start + 1],
            bytes[start + 2],
            bytes[start + 3],
        ]);
    }
    w
}

/// Compares little-endian limbs most significant first, returning
/// `(a > b, a == b)`.
fn ct_compare(a: &[u32; 8], b: &[u32; 8]) -> (Choice, Choice) {
    let mut gt = Choice::from(0);
    let mut eq = Choice::from(1);
    for i in (0..8).rev() {
        gt |= eq & a[i].ct_gt(&b[i]);
        eq &= a[i].ct_eq(&b[i]);
    }
    (gt, eq)
}

/// Adds two multi-limb numbers, returning the sum and the carry (0 or 1).
fn adc_array(lhs: &[u32; 8], rhs: &[u32; 8]) -> ([u32; 8], u32) {
    let mut out = [0u32; 8];
    let mut carry = 0u64;
    for i in 0..8 {
        let t = u64::from(lhs[i]) + u64::from(rhs[i]) + carry;
        out[i] = t as u32;
        carry = t >> 32;
    }
    (out, carry as u32)
}

/// Subtracts two multi-limb numbers, returning the difference modulo
/// 2^256 and the borrow (0 or 1).
fn sbb_array(lhs: &[u32; 8], rhs: &[u32; 8]) -> ([u32; 8], u32) {
    let mut out = [0u32; 8];
    let mut borrow = 0u64;
    for i in 0..8 {
        let t = u64::from(lhs[i]).wrapping_sub(u64::from(rhs[i]) + borrow);
        out[i] = t as u32;
        borrow = t >> 63;
    }
    (out, borrow as u32)
}

#[cfg(test)]
mod tests {
    use super::{FRAC_MODULUS_2, MODULUS, Scalar};
    use crate::arithmetic::dev::{biguint_to_bytes, bytes_to_biguint, hex_to_biguint};
    use num_bigint::BigUint;
    use num_traits::{One, Zero};
    use proptest::prelude::*;

    fn modulus() -> BigUint {
        hex_to_biguint("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141")
    }

    fn to_biguint(s: &Scalar) -> BigUint {
        bytes_to_biguint(&s.to_bytes())
    }

    fn from_biguint(x: &BigUint) -> Scalar {
        Scalar::from_bytes(&biguint_to_bytes(x)).unwrap()
    }

    #[test]
    fn is_over_half_order() {
        assert!(!bool::from(Scalar::ZERO.is_over_half_order()));

        let half = Scalar(FRAC_MODULUS_2);
        assert!(!bool::from(half.is_over_half_order()));
        assert!(bool::from(half.add(&Scalar::ONE).is_over_half_order()));
        assert!(bool::from(Scalar::ONE.negate().is_over_half_order()));
    }

    #[test]
    fn negate_zero_is_zero() {
        assert_eq!(Scalar::ZERO.negate(), Scalar::ZERO);
        assert_eq!(Scalar::ONE.negate().add(&Scalar::ONE), Scalar::ZERO);
    }

    #[test]
    fn set_bytes_reports_overflow() {
        let mut n = [0u8; 32];
        for (i, limb) in MODULUS.iter().enumerate() {
            n[(7 - i) * 4..(7 - i) * 4 + 4].copy_from_slice(&limb.to_be_bytes());
        }
        let (s, overflow) = Scalar::set_bytes(&n);
        assert!(bool::from(overflow));
        assert_eq!(s, Scalar::ZERO);
        assert!(bool::from(Scalar::from_bytes(&n).is_none()));

        let (s, overflow) = Scalar::set_bytes(&[0xFF; 32]);
        assert!(bool::from(overflow));
        assert_eq!(
            to_biguint(&s),
            (BigUint::from(2u8).pow(256) - 1u8) % modulus()
        );
    }

    #[test]
    fn set_byte_slice_pads_and_truncates() {
        let (s, overflow) = Scalar::set_byte_slice(&[0x01, 0x02]);
        assert!(!bool::from(overflow));
        assert_eq!(s, Scalar::from_u32(0x0102));

        let mut long = [0u8; 40];
        long[31] = 7;
        long[39] = 9;
        let (s, _) = Scalar::set_byte_slice(&long);
        assert_eq!(s, Scalar::from_u32(7));

        assert_eq!(Scalar::set_byte_slice(&[]).0, Scalar::ZERO);
    }

    #[test]
    fn invert() {
        assert_eq!(Scalar::ZERO.invert(), Scalar::ZERO);
        assert_eq!(Scalar::ONE.invert(), Scalar::ONE);

        let two = Scalar::from_u32(2);
        assert_eq!(two.mul(&two.invert()), Scalar::ONE);
    }

    #[test]
    fn from_u64() {
        let s = Scalar::from_u64(0x1234_5678_9ABC_DEF0);
        assert_eq!(to_biguint(&s), BigUint::from(0x1234_5678_9ABC_DEF0u64));
    }

    prop_compose! {
        fn scalar()(bytes in any::<[u8; 32]>()) -> Scalar {
            Scalar::set_bytes(&bytes).0
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn fuzzy_add(a in scalar(), b in scalar()) {
            let res_ref = (to_biguint(&a) + to_biguint(&b)) % modulus();
            prop_assert_eq!(a.add(&b), from_biguint(&res_ref));
        }

        #[test]
        fn fuzzy_sub(a in scalar(), b in scalar()) {
            let m = modulus();
            let res_ref = (to_biguint(&a) + &m - to_biguint(&b)) % &m;
            prop_assert_eq!(a.sub(&b), from_biguint(&res_ref));
        }

        #[test]
        fn fuzzy_mul(a in scalar(), b in scalar()) {
            let res_ref = (to_biguint(&a) * to_biguint(&b)) % modulus();
            prop_assert_eq!(a.mul(&b), from_biguint(&res_ref));
        }

        #[test]
        fn fuzzy_negate(a in scalar()) {
            let m = modulus();
            let res_ref = (&m - to_biguint(&a)) % &m;
            prop_assert_eq!(a.negate(), from_biguint(&res_ref));
        }

        #[test]
        fn fuzzy_invert(a in scalar()) {
            let inv = a.invert();
            if bool::from(a.is_zero()) {
                prop_assert_eq!(inv, Scalar::ZERO);
            } else {
                prop_assert_eq!(a.mul(&inv), Scalar::ONE);
                let m = modulus();
                let res_ref = to_biguint(&a).modpow(&(&m - 2u8), &m);
                prop_assert_eq!(inv, from_biguint(&res_ref));
            }
        }

        #[test]
        fn associativity_and_distributivity(a in scalar(), b in scalar(), c in scalar()) {
            prop_assert_eq!(a.add(&b).add(&c), a.add(&b.add(&c)));
            prop_assert_eq!(a.mul(&b).mul(&c), a.mul(&b.mul(&c)));
            prop_assert_eq!(a.mul(&b.add(&c)), a.mul(&b).add(&a.mul(&c)));
        }

        #[test]
        fn fuzzy_mul_shift_var(a in scalar(), b in scalar(), shift in 256usize..512) {
            let product = to_biguint(&a) * to_biguint(&b);
            let mut res_ref = &product >> shift;
            if ((&product >> (shift - 1)) & BigUint::one()) != BigUint::zero() {
                res_ref += 1u8;
            }
            prop_assert_eq!(a.mul_shift_var(&b, shift), from_biguint(&(res_ref % modulus())));
        }

        #[test]
        fn bytes_round_trip(a in scalar()) {
            prop_assert_eq!(Scalar::from_bytes(&a.to_bytes()).unwrap(), a);
        }
    }
}
