//! Points on edwards25519 in extended coordinates.

mod cached;
mod table;

pub use self::table::init_tables;

use self::{
    cached::{ProjCached, ProjP2},
    table::{NafLookupTable, NafLookupTable5, ProjLookupTable},
};
use crate::{Error, Result, Scalar, field::FieldElement};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// A point `(X:Y:Z:T)` with `x = X/Z`, `y = Y/Z` and `xy = T/Z`.
#[derive(Clone, Copy, Debug)]
pub struct EdwardsPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl EdwardsPoint {
    /// The neutral element `(0, 1)`.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    /// The standard base point `B`, with `y = 4/5` and positive `x`.
    pub const GENERATOR: Self = Self {
        x: FieldElement([
            1738742601995546,
            1146398526822698,
            2070867633025821,
            562264141797630,
            587772402128613,
        ]),
        y: FieldElement([
            1801439850948184,
            1351079888211148,
            450359962737049,
            900719925474099,
            1801439850948198,
        ]),
        z: FieldElement::ONE,
        t: FieldElement([
            1841354044333475,
            16398895984059,
            755974180946558,
            900171276175154,
            1821297809914039,
        ]),
    };

    /// Decodes a 32-byte point encoding.
    ///
    /// The y coordinate is not required to be reduced, and an encoding of
    /// `x = 0` with the sign bit set is accepted.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let y = FieldElement::from_bytes(bytes);

        // -x² + y² = 1 + dx²y²  =>  x² = (y² - 1) / (dy² + 1)
        let y2 = y.square();
        let u = y2.sub(&FieldElement::ONE);
        let v = y2.mul(&FieldElement::D).add(&FieldElement::ONE);
        let (mut x, was_square) = FieldElement::sqrt_ratio(&u, &v);
        if !bool::from(was_square) {
            return Err(Error::InvalidPoint);
        }

        // sqrt_ratio returns the non-negative root
        let x_neg = x.negate();
        x.conditional_assign(&x_neg, Choice::from(bytes[31] >> 7));

        Ok(Self {
            x,
            y,
            z: FieldElement::ONE,
            t: x.mul(&y),
        })
    }

    /// Returns the canonical encoding: y little-endian with the sign of x
    /// in the top bit.
    pub fn to_bytes(&self) -> [u8; 32] {
        let z_inv = self.z.invert();
        let x = self.x.mul(&z_inv);
        let y = self.y.mul(&z_inv);

        let mut out = y.to_bytes();
        out[31] |= x.is_negative().unwrap_u8() << 7;
        out
    }

    /// Returns `self + rhs`.
    pub fn add(&self, rhs: &Self) -> Self {
        ProjCached::from_extended(rhs).add_to(self).to_extended()
    }

    /// Returns `self - rhs`.
    pub fn sub(&self, rhs: &Self) -> Self {
        ProjCached::from_extended(rhs).sub_from(self).to_extended()
    }

    /// Returns `2 * self`.
    pub fn double(&self) -> Self {
        ProjP2::from_extended(self).double().to_extended()
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self {
            x: self.x.negate(),
            y: self.y,
            z: self.z,
            t: self.t.negate(),
        }
    }

    /// Is this the identity point?
    pub fn is_identity(&self) -> Choice {
        self.ct_eq(&Self::IDENTITY)
    }

    /// Returns `k * self` in constant time.
    pub fn scalar_mult(&self, k: &Scalar) -> Self {
        let table = ProjLookupTable::new(self);
        let digits = k.signed_radix16();

        let mut acc = table.select(digits[63]).add_to(&Self::IDENTITY);
        for digit in digits[..63].iter().rev() {
            let mut p2 = acc.to_projective();
            for _ in 0..3 {
                p2 = p2.double().to_projective();
            }
            let p = p2.double().to_extended();
            acc = table.select(*digit).add_to(&p);
        }
        acc.to_extended()
    }

    /// Returns `k * B` in constant time.
    #[cfg(feature = "precomputed-tables")]
    pub fn scalar_base_mult(k: &Scalar) -> Self {
        let tables = &*table::BASEPOINT_TABLE;
        let digits = k.signed_radix16();

        // k = sum(d_i 16^i) = sum(d_odd 16^(2j+1)) + sum(d_even 16^(2j)),
        // and table j covers 256^j
        let mut acc = Self::IDENTITY;
        for i in (1..64).step_by(2) {
            acc = tables[i / 2].select(digits[i]).add_to(&acc).to_extended();
        }

        let mut p2 = ProjP2::from_extended(&acc);
        for _ in 0..3 {
            p2 = p2.double().to_projective();
        }
        acc = p2.double().to_extended();

        for i in (0..64).step_by(2) {
            acc = tables[i / 2].select(digits[i]).add_to(&acc).to_extended();
        }
        acc
    }

    /// Returns `k * B` in constant time.
    #[cfg(not(feature = "precomputed-tables"))]
    pub fn scalar_base_mult(k: &Scalar) -> Self {
        Self::GENERATOR.scalar_mult(k)
    }

    /// Returns `a * A + b * B` in variable time.
    ///
    /// Only for public inputs, such as signature verification.
    #[allow(non_snake_case)]
    pub fn var_time_double_scalar_base_mult(a: &Scalar, A: &Self, b: &Scalar) -> Self {
        let a_table = NafLookupTable5::new(A);
        let a_naf = a.non_adjacent_form(5);

        #[cfg(feature = "precomputed-tables")]
        let b_table = &*table::BASEPOINT_NAF_TABLE;
        #[cfg(feature = "precomputed-tables")]
        let b_naf = b.non_adjacent_form(8);

        #[cfg(not(feature = "precomputed-tables"))]
        let b_table = &NafLookupTable5::new(&Self::GENERATOR);
        #[cfg(not(feature = "precomputed-tables"))]
        let b_naf = b.non_adjacent_form(5);

        double_naf_mult(&a_naf, &a_table, &b_naf, b_table)
    }
}

/// Joint double-and-add over two NAF digit strings, starting at the
/// highest non-zero digit.
fn double_naf_mult<A, B>(
    a_naf: &[i8; 256],
    a_table: &A,
    b_naf: &[i8; 256],
    b_table: &B,
) -> EdwardsPoint
where
    A: NafLookupTable,
    B: NafLookupTable,
{
    let top = match (0..256).rev().find(|&i| a_naf[i] != 0 || b_naf[i] != 0) {
        Some(top) => top,
        None => return EdwardsPoint::IDENTITY,
    };

    let mut p2 = ProjP2::IDENTITY;
    for i in (0..=top).rev() {
        let mut p1 = p2.double();

        if a_naf[i] != 0 {
            p1 = a_table.add_digit(&p1.to_extended(), a_naf[i]);
        }
        if b_naf[i] != 0 {
            p1 = b_table.add_digit(&p1.to_extended(), b_naf[i]);
        }

        p2 = p1.to_projective();
    }
    p2.to_extended()
}

impl Default for EdwardsPoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ConditionallySelectable for EdwardsPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t: FieldElement::conditional_select(&a.t, &b.t, choice),
        }
    }
}

impl ConstantTimeEq for EdwardsPoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        // x1/z1 = x2/z2 and y1/z1 = y2/z2
        let x1 = self.x.mul(&other.z);
        let x2 = other.x.mul(&self.z);
        let y1 = self.y.mul(&other.z);
        let y2 = other.y.mul(&self.z);
        x1.ct_eq(&x2) & y1.ct_eq(&y2)
    }
}

impl PartialEq for EdwardsPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for EdwardsPoint {}

#[cfg(test)]
mod tests {
    use super::EdwardsPoint;
    use crate::{Error, Scalar};
    use hex_literal::hex;
    use proptest::prelude::*;

    const B_BYTES: [u8; 32] =
        hex!("5866666666666666666666666666666666666666666666666666666666666666");

    fn double_and_add(p: &EdwardsPoint, k: &Scalar) -> EdwardsPoint {
        let mut acc = EdwardsPoint::IDENTITY;
        for byte in k.to_bytes().iter().rev() {
            for bit in (0..8).rev() {
                acc = acc.double();
                if (byte >> bit) & 1 == 1 {
                    acc = acc.add(p);
                }
            }
        }
        acc
    }

    #[test]
    fn generator_encoding() {
        let b = EdwardsPoint::GENERATOR;
        assert_eq!(b.to_bytes(), B_BYTES);
        assert_eq!(EdwardsPoint::from_bytes(&B_BYTES).unwrap(), b);
        assert_eq!(b.x.mul(&b.y), b.t);
    }

    #[test]
    fn identity_encoding() {
        let mut one = [0u8; 32];
        one[0] = 1;
        assert_eq!(EdwardsPoint::IDENTITY.to_bytes(), one);
        assert!(bool::from(EdwardsPoint::from_bytes(&one).unwrap().is_identity()));
    }

    #[test]
    fn lenient_decoding() {
        // y = p + 1 is y = 1
        let p_plus_one = hex!("eeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
        assert!(bool::from(
            EdwardsPoint::from_bytes(&p_plus_one).unwrap().is_identity()
        ));

        // x = 0 with the sign bit set
        let mut negative_zero = [0u8; 32];
        negative_zero[0] = 1;
        negative_zero[31] = 0x80;
        let p = EdwardsPoint::from_bytes(&negative_zero).unwrap();
        assert!(bool::from(p.is_identity()));
        assert_eq!(p.to_bytes()[31], 0);
    }

    #[test]
    fn rejects_non_points() {
        // y = 2 gives x² = 3 / (4d + 1), which is not a square
        let mut two = [0u8; 32];
        two[0] = 2;
        assert_eq!(EdwardsPoint::from_bytes(&two), Err(Error::InvalidPoint));
    }

    #[test]
    fn group_law() {
        let b = EdwardsPoint::GENERATOR;
        let b2 = b.double();
        assert_eq!(b.add(&b), b2);
        assert_eq!(b2.sub(&b), b);
        assert!(bool::from(b.add(&b.negate()).is_identity()));
        assert_eq!(b.add(&EdwardsPoint::IDENTITY), b);

        let t = b2.x.mul(&b2.y);
        let z_inv = b2.z.invert();
        assert_eq!(t.mul(&z_inv), b2.t);
    }

    #[test]
    fn order_annihilates() {
        let minus_one = EdwardsPoint::scalar_base_mult(&Scalar::MINUS_ONE);
        assert_eq!(minus_one, EdwardsPoint::GENERATOR.negate());
        assert!(bool::from(
            minus_one.add(&EdwardsPoint::GENERATOR).is_identity()
        ));
    }

    #[test]
    fn double_scalar_zero() {
        let p = EdwardsPoint::var_time_double_scalar_base_mult(
            &Scalar::ZERO,
            &EdwardsPoint::GENERATOR,
            &Scalar::ZERO,
        );
        assert!(bool::from(p.is_identity()));
    }

    prop_compose! {
        fn scalar()(bytes in any::<[u8; 64]>()) -> Scalar {
            Scalar::from_bytes_mod_order_wide(&bytes)
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn fuzzy_scalar_mult(k in scalar()) {
            let p = EdwardsPoint::GENERATOR.double().add(&EdwardsPoint::GENERATOR);
            prop_assert_eq!(p.scalar_mult(&k), double_and_add(&p, &k));
        }

        #[test]
        fn fuzzy_scalar_base_mult(k in scalar()) {
            prop_assert_eq!(
                EdwardsPoint::scalar_base_mult(&k),
                EdwardsPoint::GENERATOR.scalar_mult(&k)
            );
        }

        #[test]
        fn fuzzy_double_scalar_mult(a in scalar(), b in scalar(), c in scalar()) {
            let big_a = EdwardsPoint::scalar_base_mult(&c);
            let expected = big_a.scalar_mult(&a).add(&EdwardsPoint::scalar_base_mult(&b));
            prop_assert_eq!(
                EdwardsPoint::var_time_double_scalar_base_mult(&a, &big_a, &b),
                expected
            );
        }

        #[test]
        fn fuzzy_encoding(k in scalar()) {
            let p = EdwardsPoint::scalar_base_mult(&k);
            let decoded = EdwardsPoint::from_bytes(&p.to_bytes()).unwrap();
            prop_assert_eq!(decoded, p);
        }
    }
}
