//! Field arithmetic modulo p = 2^256 - 2^32 - 977.
//!
//! Elements are ten little-endian 32-bit limbs. In normalized form the
//! first nine hold 26 bits each and the last holds 22, which leaves six
//! bits of headroom per limb for sums computed without carrying.
//!
//! The *magnitude* of an element bounds its limbs: a magnitude `m` element
//! has every limb at most `2 * m` times its nominal maximum. Operations
//! document the magnitude they accept and return. Comparisons, parity and
//! encoding need a normalized element.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, ConstantTimeGreater, CtOption};
use zeroize::DefaultIsZeroes;

const MASK26: u32 = 0x3FF_FFFF;
const MASK22: u32 = 0x3F_FFFF;
const MASK26_64: u64 = MASK26 as u64;
const MASK22_64: u64 = MASK22 as u64;

/// 2^256 - p = 977 + 64 * 2^26, scaled by 16 for terms starting at bit 260.
const REDUCE_LOW: u64 = 977 * 16;
const REDUCE_HIGH: u64 = 64 * 16;
/// `(977 + 64 * 2^26) * 16`, the whole correction for the topmost term.
const REDUCE_TOP: u64 = 68_719_492_368;

/// p - n, in normalized limbs.
const PRIME_MINUS_ORDER: [u32; 10] = [
    0x3C9_BAEE, 0x368_5C8B, 0x1FC_4402, 0x065_42DD, 0x145_5123, 0, 0, 0, 0, 0,
];

/// Largest magnitude accepted by [`FieldElement::negate`].
pub(crate) const MAX_MAGNITUDE: u32 = 31;

/// Element of the secp256k1 base field.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldElement(pub(crate) [u32; 10]);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self([0; 10]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// The group order `n` as a field element.
    pub(crate) const ORDER: Self = Self::from_bytes_unchecked(&[
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ]);

    /// Creates a normalized element from a `u32`.
    pub const fn from_u32(v: u32) -> Self {
        Self([v & MASK26, v >> 26, 0, 0, 0, 0, 0, 0, 0, 0])
    }

    /// Creates a normalized element from a `u64`.
    pub const fn from_u64(v: u64) -> Self {
        Self([
            (v as u32) & MASK26,
            ((v >> 26) as u32) & MASK26,
            (v >> 52) as u32,
            0,
            0,
            0,
            0,
            0,
            0,
            0,
        ])
    }

    /// Packs 32 big-endian bytes into limbs without checking the range.
    pub(crate) const fn from_bytes_unchecked(bytes: &[u8; 32]) -> Self {
        let mut w = [0u32; 10];
        let mut i = 0;
        while i < 32 {
            let bit = 8 * (31 - i);
            let limb = bit / 26;
            let shift = bit % 26;
            let v = bytes[i] as u32;
            w[limb] |= (v << shift) & MASK26;
            if shift > 18 {
                w[limb + 1] |= v >> (26 - shift);
            }
            i += 1;
        }
        Self(w)
    }

    /// Parses a 32-byte big-endian encoding, reducing it modulo `p`.
    /// The returned `Choice` is set when the input was `>= p`.
    pub fn set_bytes(bytes: &[u8; 32]) -> (Self, Choice) {
        let raw = Self::from_bytes_unchecked(bytes);
        (raw.normalize(), raw.overflows())
    }

    /// Like [`FieldElement::set_bytes`] for a slice of any length. Slices
    /// longer than 32 bytes are truncated to their first 32 bytes, shorter
    /// ones are left-padded with zeros.
    pub fn set_byte_slice(bytes: &[u8]) -> (Self, Choice) {
        let bytes = if bytes.len() > 32 { &bytes[..32] } else { bytes };
        let mut buf = [0u8; 32];
        buf[32 - bytes.len()..].copy_from_slice(bytes);
        Self::set_bytes(&buf)
    }

    /// Parses a canonical 32-byte big-endian encoding; none if `>= p`.
    pub fn from_bytes(bytes: &[u8; 32]) -> CtOption<Self> {
        let raw = Self::from_bytes_unchecked(bytes);
        CtOption::new(raw, !raw.overflows())
    }

    /// Writes the big-endian encoding of a normalized element into `out`.
    pub fn put_bytes(&self, out: &mut [u8; 32]) {
        for (i, byte) in out.iter_mut().enumerate() {
            let bit = 8 * (31 - i);
            let limb = bit / 26;
            let shift = bit % 26;
            let mut v = self.0[limb] >> shift;
            if shift > 18 {
                v |= self.0[limb + 1] << (26 - shift);
            }
            *byte = v as u8;
        }
    }

    /// Returns the big-endian encoding of a normalized element.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.put_bytes(&mut out);
        out
    }

    /// Is a magnitude 1 element `>= p`?
    ///
    /// Also true when the top limb carries past bit 256.
    fn overflows(&self) -> Choice {
        let w = &self.0;
        let mid = w[2] & w[3] & w[4] & w[5] & w[6] & w[7] & w[8];
        let carried = !(w[9] >> 22).ct_eq(&0);
        let top_full = w[9].ct_eq(&MASK22) & mid.ct_eq(&MASK26);
        let low_over = (w[1] + 64 + ((w[0] + 977) >> 26)).ct_gt(&MASK26);
        carried | (top_full & low_over)
    }

    /// Adds `x * (2^256 - p)` to the low limbs and carries through.
    fn add_modulus_correction(&self, x: u32) -> Self {
        let mut w = self.0;
        w[0] += x * 977;
        w[1] += x << 6;
        for i in 0..9 {
            w[i + 1] += w[i] >> 26;
            w[i] &= MASK26;
        }
        Self(w)
    }

    /// Brings the magnitude to 1 without a full reduction.
    pub fn normalize_weak(&self) -> Self {
        let x = self.0[9] >> 22;
        let mut t = *self;
        t.0[9] &= MASK22;
        let res = t.add_modulus_correction(x);
        debug_assert!(res.0[9] >> 23 == 0);
        res
    }

    /// Fully reduces the element into `[0, p)` in canonical limbs.
    ///
    /// The final conditional subtraction is always computed and then
    /// selected in constant time.
    pub fn normalize(&self) -> Self {
        let res = self.normalize_weak();
        let overflow = res.overflows();

        let mut corrected = res.add_modulus_correction(1);
        corrected.0[9] &= MASK22;

        Self::conditional_select(&res, &corrected, overflow)
    }

    /// Does the element reduce to zero?
    pub fn normalizes_to_zero(&self) -> Choice {
        let t = self.normalize_weak().0;

        // either a raw zero or a raw p
        let z0 = t.iter().fold(0, |acc, limb| acc | limb);
        let z1 = (t[0] ^ 0x3D0)
            & (t[1] ^ 0x40)
            & t[2]
            & t[3]
            & t[4]
            & t[5]
            & t[6]
            & t[7]
            & t[8]
            & (t[9] ^ 0x3C0_0000);

        z0.ct_eq(&0) | z1.ct_eq(&MASK26)
    }

    /// Is a normalized element zero?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Is a normalized element odd?
    pub fn is_odd(&self) -> Choice {
        Choice::from((self.0[0] & 1) as u8)
    }

    /// Is a normalized element `>= p - n`?
    ///
    /// Compares limbs most significant first.
    pub fn is_gt_or_eq_prime_minus_order(&self) -> Choice {
        let mut result = Choice::from(0);
        let mut high_equal = Choice::from(1);
        for i in (1..10).rev() {
            result |= high_equal & self.0[i].ct_gt(&PRIME_MINUS_ORDER[i]);
            high_equal &= self.0[i].ct_eq(&PRIME_MINUS_ORDER[i]);
        }
        result | (high_equal & !PRIME_MINUS_ORDER[0].ct_gt(&self.0[0]))
    }

    /// Returns `-self`, given an upper bound on its magnitude. The result
    /// has magnitude `magnitude + 1`.
    pub const fn negate(&self, magnitude: u32) -> Self {
        debug_assert!(magnitude <= MAX_MAGNITUDE);
        let m = 2 * (magnitude + 1);
        let mut w = [0u32; 10];
        w[0] = 0x3FF_FC2F * m - self.0[0];
        w[1] = 0x3FF_FFBF * m - self.0[1];
        let mut i = 2;
        while i < 9 {
            w[i] = MASK26 * m - self.0[i];
            i += 1;
        }
        w[9] = MASK22 * m - self.0[9];
        Self(w)
    }

    /// Returns `self + rhs` without reduction; magnitudes add.
    pub const fn add(&self, rhs: &Self) -> Self {
        let mut w = [0u32; 10];
        let mut i = 0;
        while i < 10 {
            w[i] = self.0[i] + rhs.0[i];
            i += 1;
        }
        Self(w)
    }

    /// Returns `self + v` for a small integer without reduction.
    pub const fn add_int(&self, v: u32) -> Self {
        let mut w = self.0;
        w[0] += v;
        Self(w)
    }

    /// Returns `self * v` for a small integer without reduction; the
    /// magnitude is multiplied by `v`.
    pub const fn mul_int(&self, v: u32) -> Self {
        let mut w = [0u32; 10];
        let mut i = 0;
        while i < 10 {
            w[i] = self.0[i] * v;
            i += 1;
        }
        Self(w)
    }

    /// Returns `2 * self`; the magnitude doubles.
    pub const fn double(&self) -> Self {
        self.mul_int(2)
    }

    /// Returns `self * rhs`. Inputs have magnitude at most 8, the output
    /// has magnitude 1.
    pub fn mul(&self, rhs: &Self) -> Self {
        let a = &self.0;
        let b = &rhs.0;

        // Schoolbook columns, carried down to 26 bits each.
        let mut t = [0u64; 20];
        let mut carry = 0u64;
        for (k, term) in t.iter_mut().enumerate().take(19) {
            let mut col = carry;
            for i in k.saturating_sub(9)..=k.min(9) {
                col += u64::from(a[i]) * u64::from(b[k - i]);
            }
            *term = col & MASK26_64;
            carry = col >> 26;
        }
        t[19] = carry;

        // Terms 10..19 start at bit 260 and fold back with 2^260 = 16 (2^256) mod p.
        let mut r = [0u64; 10];
        let mut carry = 0u64;
        for i in 0..9 {
            let mut v = carry + t[i] + t[i + 10] * REDUCE_LOW;
            if i > 0 {
                v += t[i + 9] * REDUCE_HIGH;
            }
            r[i] = v & MASK26_64;
            carry = v >> 26;
        }
        let v = carry + t[9] + t[18] * REDUCE_HIGH + t[19] * REDUCE_TOP;
        r[9] = v & MASK22_64;
        let excess = v >> 22;

        // Whatever sits above 2^256 folds in once more.
        let d = r[0] + excess * 977;
        let w0 = (d & MASK26_64) as u32;
        let d = (d >> 26) + r[1] + excess * 64;
        let w1 = (d & MASK26_64) as u32;
        let w2 = ((d >> 26) + r[2]) as u32;

        Self([
            w0,
            w1,
            w2,
            r[3] as u32,
            r[4] as u32,
            r[5] as u32,
            r[6] as u32,
            r[7] as u32,
            r[8] as u32,
            r[9] as u32,
        ])
    }

    /// Returns `self * self`, with the same magnitude rules as `mul`.
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    fn pow2k(&self, k: usize) -> Self {
        let mut x = *self;
        for _ in 0..k {
            x = x.square();
        }
        x
    }

    /// Powers `self^(2^k - 1)` for the blocks of ones shared by the
    /// inversion and square root exponents, as `(x2, x3, x22, x223)`.
    fn power_blocks(&self) -> (Self, Self, Self, Self) {
        let x2 = self.square().mul(self);
        let x3 = x2.square().mul(self);
        let x6 = x3.pow2k(3).mul(&x3);
        let x9 = x6.pow2k(3).mul(&x3);
        let x11 = x9.pow2k(2).mul(&x2);
        let x22 = x11.pow2k(11).mul(&x11);
        let x44 = x22.pow2k(22).mul(&x22);
        let x88 = x44.pow2k(44).mul(&x44);
        let x176 = x88.pow2k(88).mul(&x88);
        let x220 = x176.pow2k(44).mul(&x44);
        let x223 = x220.pow2k(3).mul(&x3);
        (x2, x3, x22, x223)
    }

    /// Returns `self^(p - 2)`, the inverse of a non-zero element. Zero maps
    /// to zero. Input magnitude at most 8.
    pub fn invert(&self) -> Self {
        // p - 2 is 223 ones, a zero, 22 ones, then 0000101101.
        let (x2, _, x22, x223) = self.power_blocks();
        x223.pow2k(23)
            .mul(&x22)
            .pow2k(5)
            .mul(self)
            .pow2k(3)
            .mul(&x2)
            .pow2k(2)
            .mul(self)
    }

    /// Returns a square root of `self`, if one exists. Input magnitude at
    /// most 8.
    ///
    /// p = 3 mod 4 so the candidate is `self^((p + 1) / 4)`, checked by
    /// squaring it.
    pub fn sqrt(&self) -> CtOption<Self> {
        let (x2, _, x22, x223) = self.power_blocks();
        let r = x223.pow2k(23).mul(&x22).pow2k(6).mul(&x2).pow2k(2);
        let is_root = (r.square().negate(1).add(self)).normalizes_to_zero();
        CtOption::new(r, is_root)
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut w = [0u32; 10];
        for (i, limb) in w.iter_mut().enumerate() {
            *limb = u32::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(w)
    }
}

impl ConstantTimeEq for FieldElement {
    /// Limb-wise comparison; both sides must be normalized.
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0[..].ct_eq(&other.0[..])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl DefaultIsZeroes for FieldElement {}

#[cfg(test)]
mod tests {
    use super::FieldElement;
    use crate::arithmetic::dev::{biguint_to_bytes, bytes_to_biguint, hex_to_biguint};
    use hex_literal::hex;
    use num_bigint::BigUint;
    use proptest::prelude::*;

    fn modulus() -> BigUint {
        hex_to_biguint("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F")
    }

    fn to_biguint(fe: &FieldElement) -> BigUint {
        bytes_to_biguint(&fe.normalize().to_bytes())
    }

    fn from_biguint(x: &BigUint) -> FieldElement {
        FieldElement::from_bytes(&biguint_to_bytes(x)).unwrap()
    }

    #[test]
    fn zero_is_additive_identity() {
        let zero = FieldElement::ZERO;
        let one = FieldElement::ONE;
        assert_eq!(zero.add(&zero).normalize(), zero);
        assert_eq!(one.add(&zero).normalize(), one);
    }

    #[test]
    fn one_is_multiplicative_identity() {
        let one = FieldElement::ONE;
        assert_eq!(one.mul(&one).normalize(), one);
    }

    #[test]
    fn from_bytes() {
        assert_eq!(FieldElement::from_bytes(&[0; 32]).unwrap(), FieldElement::ZERO);
        assert_eq!(
            FieldElement::from_bytes(&hex!(
                "0000000000000000000000000000000000000000000000000000000000000001"
            ))
            .unwrap(),
            FieldElement::ONE
        );
        assert!(bool::from(
            FieldElement::from_bytes(&[0xFF; 32]).is_none()
        ));
        assert!(bool::from(
            FieldElement::from_bytes(&hex!(
                "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F"
            ))
            .is_none()
        ));
    }

    #[test]
    fn set_bytes_reduces_overflow() {
        let (fe, overflow) = FieldElement::set_bytes(&hex!(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC30"
        ));
        assert!(bool::from(overflow));
        assert_eq!(fe, FieldElement::ONE);

        let (fe, overflow) = FieldElement::set_byte_slice(&[0x01, 0x00]);
        assert!(!bool::from(overflow));
        assert_eq!(fe, FieldElement::from_u32(256));
    }

    #[test]
    fn bytes_round_trip() {
        let bytes = hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");
        assert_eq!(FieldElement::from_bytes(&bytes).unwrap().to_bytes(), bytes);
    }

    #[test]
    fn from_u64() {
        let fe = FieldElement::from_u64(0xFFFF_FFFF_FFFF_FFFF);
        assert_eq!(to_biguint(&fe), BigUint::from(u64::MAX));
    }

    #[test]
    fn negation() {
        let two = FieldElement::ONE.double();
        let neg_two = two.negate(2);
        assert_eq!(two.add(&neg_two).normalize(), FieldElement::ZERO);
        assert_eq!(neg_two.negate(3).normalize(), two.normalize());
        assert!(bool::from(two.add(&neg_two).normalizes_to_zero()));
    }

    #[test]
    fn invert() {
        assert_eq!(FieldElement::ZERO.invert().normalize(), FieldElement::ZERO);

        let one = FieldElement::ONE;
        assert_eq!(one.invert().normalize(), one);

        let two = one.add(&one);
        assert_eq!(two.mul(&two.invert()).normalize(), one);
    }

    #[test]
    fn sqrt() {
        let two = FieldElement::ONE.double();
        let four = two.square();
        let root = four.sqrt().unwrap().normalize();
        assert!(root == two.normalize() || root == two.negate(1).normalize());

        // 3 is not a quadratic residue modulo p
        assert!(bool::from(FieldElement::from_u32(3).sqrt().is_none()));
    }

    #[test]
    fn prime_minus_order_boundary() {
        let p_minus_n = from_biguint(&hex_to_biguint("14551231950B75FC4402DA1722FC9BAEE"));
        assert!(bool::from(p_minus_n.is_gt_or_eq_prime_minus_order()));
        assert!(bool::from(
            p_minus_n.add_int(1).normalize().is_gt_or_eq_prime_minus_order()
        ));

        let below = from_biguint(&hex_to_biguint("14551231950B75FC4402DA1722FC9BAED"));
        assert!(!bool::from(below.is_gt_or_eq_prime_minus_order()));
        assert!(!bool::from(FieldElement::ZERO.is_gt_or_eq_prime_minus_order()));
    }

    #[test]
    fn order_constant() {
        assert_eq!(
            to_biguint(&FieldElement::ORDER),
            hex_to_biguint("FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141")
        );
    }

    prop_compose! {
        fn field_element()(bytes in any::<[u8; 32]>()) -> FieldElement {
            FieldElement::set_bytes(&bytes).0
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(1000))]

        #[test]
        fn fuzzy_add(a in field_element(), b in field_element()) {
            let res_ref = (to_biguint(&a) + to_biguint(&b)) % modulus();
            prop_assert_eq!(a.add(&b).normalize(), from_biguint(&res_ref));
        }

        #[test]
        fn fuzzy_mul(a in field_element(), b in field_element()) {
            let res_ref = (to_biguint(&a) * to_biguint(&b)) % modulus();
            prop_assert_eq!(a.mul(&b).normalize(), from_biguint(&res_ref));
        }

        #[test]
        fn fuzzy_mul_max_magnitude(a in field_element(), b in field_element()) {
            // magnitude 8 on both sides
            let a8 = a.mul_int(8);
            let b8 = b.negate(1).mul_int(4);
            let m = modulus();
            let res_ref = (to_biguint(&a) * 8u8 * ((&m - to_biguint(&b)) * 4u8)) % &m;
            prop_assert_eq!(a8.mul(&b8).normalize(), from_biguint(&res_ref));
        }

        #[test]
        fn fuzzy_square(a in field_element()) {
            let a_bi = to_biguint(&a);
            let res_ref = (&a_bi * &a_bi) % modulus();
            prop_assert_eq!(a.square().normalize(), from_biguint(&res_ref));
        }

        #[test]
        fn fuzzy_negate(a in field_element()) {
            let m = modulus();
            let res_ref = (&m - to_biguint(&a)) % &m;
            prop_assert_eq!(a.negate(1).normalize(), from_biguint(&res_ref));
            prop_assert!(bool::from(a.add(&a.negate(1)).normalizes_to_zero()));
        }

        #[test]
        fn fuzzy_invert(a in field_element()) {
            let inv = a.invert().normalize();
            if bool::from(a.normalizes_to_zero()) {
                prop_assert_eq!(inv, FieldElement::ZERO);
            } else {
                prop_assert_eq!(a.mul(&inv).normalize(), FieldElement::ONE);
            }
        }

        #[test]
        fn fuzzy_sqrt(a in field_element()) {
            let square = a.square();
            let root = square.sqrt().unwrap().normalize();
            let a = a.normalize();
            prop_assert!(root == a || root == a.negate(1).normalize());
        }

        #[test]
        fn normalize_is_idempotent(a in field_element(), b in field_element()) {
            let sum = a.add(&b).add(&b).normalize();
            prop_assert_eq!(sum.normalize(), sum);
        }
    }
}
