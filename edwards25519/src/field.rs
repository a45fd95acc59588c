//! Field arithmetic modulo `p = 2^255 - 19`, using five 51-bit limbs.

use subtle::{Choice, ConditionallySelectable, ConditionallyNegatable, ConstantTimeEq};
use zeroize::DefaultIsZeroes;

const MASK51: u64 = (1 << 51) - 1;

/// An element of the field `GF(2^255 - 19)`.
///
/// The value is `l0 + l1 2^51 + l2 2^102 + l3 2^153 + l4 2^204`. Between
/// operations every limb is below `2^52`; the representation is not
/// unique until [`FieldElement::to_bytes`] reduces it.
#[derive(Clone, Copy, Debug, Default)]
pub struct FieldElement(pub(crate) [u64; 5]);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self([0, 0, 0, 0, 0]);

    /// Multiplicative identity.
    pub const ONE: Self = Self([1, 0, 0, 0, 0]);

    /// `p - 1`
    pub const MINUS_ONE: Self = Self([
        2251799813685228,
        2251799813685247,
        2251799813685247,
        2251799813685247,
        2251799813685247,
    ]);

    /// `sqrt(-1)`, the non-negative root.
    pub const SQRT_M1: Self = Self([
        1718705420411056,
        234908883556509,
        2233514472574048,
        2117202627021982,
        765476049583133,
    ]);

    /// Curve constant `d = -121665 / 121666`.
    pub(crate) const D: Self = Self([
        929955233495203,
        466365720129213,
        1662059464998953,
        2033849074728123,
        1442794654840575,
    ]);

    /// `2d`
    pub(crate) const D2: Self = Self([
        1859910466990425,
        932731440258426,
        1072319116312658,
        1815898335770999,
        633789495995903,
    ]);

    /// Decodes 32 little-endian bytes, ignoring the most significant bit.
    ///
    /// Values in `[p, 2^255)` are accepted and reduced.
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        let load = |i: usize| -> u64 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i..i + 8]);
            u64::from_le_bytes(word)
        };

        Self([
            load(0) & MASK51,
            (load(6) >> 3) & MASK51,
            (load(12) >> 6) & MASK51,
            (load(19) >> 1) & MASK51,
            (load(24) >> 12) & MASK51,
        ])
    }

    /// Returns the canonical 32-byte little-endian encoding.
    pub fn to_bytes(&self) -> [u8; 32] {
        let t = self.reduce();

        let mut out = [0u8; 32];
        for (i, limb) in t.0.iter().enumerate() {
            let bit_offset = i * 51;
            let word = (*limb << (bit_offset % 8)).to_le_bytes();
            for (j, byte) in word.iter().enumerate() {
                let off = bit_offset / 8 + j;
                if off >= out.len() {
                    break;
                }
                out[off] |= *byte;
            }
        }
        out
    }

    /// Fully reduces into `[0, p)`.
    fn reduce(&self) -> Self {
        let mut l = self.carry_propagate().0;

        // l < 2^255 + 2^13 * 19 now; find whether l + 19 >= 2^255.
        let mut c = (l[0] + 19) >> 51;
        c = (l[1] + c) >> 51;
        c = (l[2] + c) >> 51;
        c = (l[3] + c) >> 51;
        c = (l[4] + c) >> 51;

        // If so, l - p = l + 19 - 2^255.
        l[0] += 19 * c;
        l[1] += l[0] >> 51;
        l[0] &= MASK51;
        l[2] += l[1] >> 51;
        l[1] &= MASK51;
        l[3] += l[2] >> 51;
        l[2] &= MASK51;
        l[4] += l[3] >> 51;
        l[3] &= MASK51;
        l[4] &= MASK51;
        Self(l)
    }

    /// Brings every limb below `2^51 + 2^13`.
    fn carry_propagate(&self) -> Self {
        let l = self.0;
        let c0 = l[0] >> 51;
        let c1 = l[1] >> 51;
        let c2 = l[2] >> 51;
        let c3 = l[3] >> 51;
        let c4 = l[4] >> 51;

        // c4 is at most 64 - 51 = 13 bits, so c4 * 19 is at most 18 bits
        Self([
            (l[0] & MASK51) + c4 * 19,
            (l[1] & MASK51) + c0,
            (l[2] & MASK51) + c1,
            (l[3] & MASK51) + c2,
            (l[4] & MASK51) + c3,
        ])
    }

    /// Returns `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        let mut l = self.0;
        for (a, b) in l.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
        Self(l).carry_propagate()
    }

    /// Returns `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        // Add 2p to avoid underflow.
        let a = self.0;
        let b = rhs.0;
        Self([
            (a[0] + 0xFFFFFFFFFFFDA) - b[0],
            (a[1] + 0xFFFFFFFFFFFFE) - b[1],
            (a[2] + 0xFFFFFFFFFFFFE) - b[2],
            (a[3] + 0xFFFFFFFFFFFFE) - b[3],
            (a[4] + 0xFFFFFFFFFFFFE) - b[4],
        ])
        .carry_propagate()
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self::ZERO.sub(self)
    }

    /// Returns `self * rhs`.
    pub fn mul(&self, rhs: &Self) -> Self {
        let [a0, a1, a2, a3, a4] = self.0.map(u128::from);
        let [b0, b1, b2, b3, b4] = rhs.0.map(u128::from);

        // 2^255 = 19, so limb products above 2^255 wrap around times 19.
        let b1_19 = b1 * 19;
        let b2_19 = b2 * 19;
        let b3_19 = b3 * 19;
        let b4_19 = b4 * 19;

        let r0 = a0 * b0 + a1 * b4_19 + a2 * b3_19 + a3 * b2_19 + a4 * b1_19;
        let r1 = a0 * b1 + a1 * b0 + a2 * b4_19 + a3 * b3_19 + a4 * b2_19;
        let r2 = a0 * b2 + a1 * b1 + a2 * b0 + a3 * b4_19 + a4 * b3_19;
        let r3 = a0 * b3 + a1 * b2 + a2 * b1 + a3 * b0 + a4 * b4_19;
        let r4 = a0 * b4 + a1 * b3 + a2 * b2 + a3 * b1 + a4 * b0;

        Self::reduce_wide([r0, r1, r2, r3, r4])
    }

    /// Returns `self * self`.
    pub fn square(&self) -> Self {
        let [l0, l1, l2, l3, l4] = self.0.map(u128::from);

        let l0_2 = l0 * 2;
        let l1_2 = l1 * 2;
        let l1_38 = l1 * 38;
        let l2_38 = l2 * 38;
        let l3_38 = l3 * 38;
        let l3_19 = l3 * 19;
        let l4_19 = l4 * 19;

        let r0 = l0 * l0 + l1_38 * l4 + l2_38 * l3;
        let r1 = l0_2 * l1 + l2_38 * l4 + l3_19 * l3;
        let r2 = l0_2 * l2 + l1 * l1 + l3_38 * l4;
        let r3 = l0_2 * l3 + l1_2 * l2 + l4_19 * l4;
        let r4 = l0_2 * l4 + l1_2 * l3 + l2 * l2;

        Self::reduce_wide([r0, r1, r2, r3, r4])
    }

    /// Carries 128-bit column sums back into 51-bit limbs.
    fn reduce_wide(r: [u128; 5]) -> Self {
        let c = r.map(|ri| (ri >> 51) as u64);
        let lo = r.map(|ri| (ri as u64) & MASK51);

        // the carries are below 2^64 / 19
        Self([
            lo[0] + c[4] * 19,
            lo[1] + c[0],
            lo[2] + c[1],
            lo[3] + c[2],
            lo[4] + c[3],
        ])
        .carry_propagate()
    }

    /// Returns `self^(2^k)`.
    fn pow2k(&self, k: u32) -> Self {
        let mut x = *self;
        for _ in 0..k {
            x = x.square();
        }
        x
    }

    /// Returns `(self^11, self^(2^250 - 1))`, the shared prefix of the
    /// inversion and square root chains.
    fn pow250(&self) -> (Self, Self) {
        let z2 = self.square();
        let z9 = z2.pow2k(2).mul(self);
        let z11 = z9.mul(&z2);
        let z2_5_0 = z11.square().mul(&z9);
        let z2_10_0 = z2_5_0.pow2k(5).mul(&z2_5_0);
        let z2_20_0 = z2_10_0.pow2k(10).mul(&z2_10_0);
        let z2_40_0 = z2_20_0.pow2k(20).mul(&z2_20_0);
        let z2_50_0 = z2_40_0.pow2k(10).mul(&z2_10_0);
        let z2_100_0 = z2_50_0.pow2k(50).mul(&z2_50_0);
        let z2_200_0 = z2_100_0.pow2k(100).mul(&z2_100_0);
        let z2_250_0 = z2_200_0.pow2k(50).mul(&z2_50_0);
        (z11, z2_250_0)
    }

    /// Returns `1 / self`, or zero for zero, computed as `self^(p - 2)`.
    pub fn invert(&self) -> Self {
        let (z11, z2_250_0) = self.pow250();
        // 2^255 - 2^5 + 11 = 2^255 - 21
        z2_250_0.pow2k(5).mul(&z11)
    }

    /// Returns `self^((p - 5) / 8) = self^(2^252 - 3)`.
    pub fn pow22523(&self) -> Self {
        let (_, z2_250_0) = self.pow250();
        z2_250_0.pow2k(2).mul(self)
    }

    /// Computes the non-negative square root of `u / v`.
    ///
    /// Returns `(sqrt(u / v), true)` when `u / v` is square,
    /// `(sqrt(i u / v), false)` when it is not, and `(0, true)` when `u`
    /// is zero. For a nonzero `u` and `v = 0` the result is `(0, false)`.
    pub fn sqrt_ratio(u: &Self, v: &Self) -> (Self, Choice) {
        // r = (u v³) (u v⁷)^((p - 5) / 8)
        let v2 = v.square();
        let uv3 = u.mul(&v2.mul(v));
        let uv7 = uv3.mul(&v2.square());
        let mut r = uv3.mul(&uv7.pow22523());

        let check = v.mul(&r.square());
        let u_neg = u.negate();
        let correct_sign = check.ct_eq(u);
        let flipped_sign = check.ct_eq(&u_neg);
        let flipped_sign_i = check.ct_eq(&u_neg.mul(&Self::SQRT_M1));

        let r_prime = r.mul(&Self::SQRT_M1);
        r.conditional_assign(&r_prime, flipped_sign | flipped_sign_i);

        (r.abs(), correct_sign | flipped_sign)
    }

    /// Is the canonical encoding odd?
    pub fn is_negative(&self) -> Choice {
        Choice::from(self.to_bytes()[0] & 1)
    }

    /// Returns the non-negative one of `self` and `-self`.
    pub fn abs(&self) -> Self {
        let mut r = *self;
        r.conditional_negate(self.is_negative());
        r
    }

    /// Is this the zero element?
    pub fn is_zero(&self) -> Choice {
        self.ct_eq(&Self::ZERO)
    }

    /// Swaps `a` and `b` when `choice` is set.
    pub fn conditional_swap(a: &mut Self, b: &mut Self, choice: Choice) {
        for (x, y) in a.0.iter_mut().zip(b.0.iter_mut()) {
            u64::conditional_swap(x, y, choice);
        }
    }
}

impl ConditionallySelectable for FieldElement {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        let mut l = [0u64; 5];
        for (i, limb) in l.iter_mut().enumerate() {
            *limb = u64::conditional_select(&a.0[i], &b.0[i], choice);
        }
        Self(l)
    }
}

impl ConditionallyNegatable for FieldElement {
    fn conditional_negate(&mut self, choice: Choice) {
        let negated = self.negate();
        self.conditional_assign(&negated, choice);
    }
}

impl ConstantTimeEq for FieldElement {
    /// Compares canonical encodings.
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl DefaultIsZeroes for FieldElement {}
