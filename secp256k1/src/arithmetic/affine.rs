//! Affine points

use super::{CURVE_EQUATION_B, FieldElement};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq, CtOption};

/// A point on the secp256k1 curve in affine coordinates.
///
/// The point at infinity is represented by `x = y = 0`, which is not a
/// solution of the curve equation. Coordinates are always normalized.
#[derive(Clone, Copy, Debug, Default)]
pub struct AffinePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
}

impl AffinePoint {
    /// The point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
    };

    /// The base point of secp256k1.
    pub const GENERATOR: Self = Self {
        x: FieldElement::from_bytes_unchecked(&[
            0x79, 0xbe, 0x66, 0x7e, 0xf9, 0xdc, 0xbb, 0xac, 0x55, 0xa0, 0x62, 0x95, 0xce, 0x87,
            0x0b, 0x07, 0x02, 0x9b, 0xfc, 0xdb, 0x2d, 0xce, 0x28, 0xd9, 0x59, 0xf2, 0x81, 0x5b,
            0x16, 0xf8, 0x17, 0x98,
        ]),
        y: FieldElement::from_bytes_unchecked(&[
            0x48, 0x3a, 0xda, 0x77, 0x26, 0xa3, 0xc4, 0x65, 0x5d, 0xa4, 0xfb, 0xfc, 0x0e, 0x11,
            0x08, 0xa8, 0xfd, 0x17, 0xb4, 0x48, 0xa6, 0x85, 0x54, 0x19, 0x9c, 0x47, 0xd0, 0x8f,
            0xfb, 0x10, 0xd4, 0xb8,
        ]),
    };

    /// Creates a point from coordinates, none unless it is on the curve.
    pub fn from_coordinates(x: &FieldElement, y: &FieldElement) -> CtOption<Self> {
        let point = Self {
            x: x.normalize(),
            y: y.normalize(),
        };
        CtOption::new(point, point.is_on_curve())
    }

    /// Recovers the point with the given x coordinate and y parity.
    pub fn decompress(x: &FieldElement, y_is_odd: Choice) -> CtOption<Self> {
        let x = x.normalize();
        decompress_y(&x, y_is_odd).map(|y| Self { x, y })
    }

    /// The normalized x coordinate.
    pub fn x(&self) -> FieldElement {
        self.x
    }

    /// The normalized y coordinate.
    pub fn y(&self) -> FieldElement {
        self.y
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> Choice {
        self.x.is_zero() & self.y.is_zero()
    }

    /// Does the point satisfy `y² = x³ + 7`?
    pub fn is_on_curve(&self) -> Choice {
        let lhs = self.y.square();
        let rhs = self.x.square().mul(&self.x).add(&CURVE_EQUATION_B);
        lhs.negate(1).add(&rhs).normalizes_to_zero()
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self {
            x: self.x,
            y: self.y.negate(1).normalize(),
        }
    }
}

/// Computes the y coordinate with the requested parity for `x`, if
/// `x³ + 7` is a square. `x` must have magnitude at most 8.
pub fn decompress_y(x: &FieldElement, y_is_odd: Choice) -> CtOption<FieldElement> {
    let alpha = x.square().mul(x).add(&CURVE_EQUATION_B);
    alpha.sqrt().map(|beta| {
        let beta = beta.normalize();
        let flip = beta.is_odd() ^ y_is_odd;
        FieldElement::conditional_select(&beta, &beta.negate(1).normalize(), flip)
    })
}

impl ConditionallySelectable for AffinePoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
        }
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x) & self.y.ct_eq(&other.y)
    }
}

impl PartialEq for AffinePoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for AffinePoint {}

#[cfg(test)]
mod tests {
    use super::{AffinePoint, decompress_y};
    use crate::arithmetic::FieldElement;
    use hex_literal::hex;
    use subtle::Choice;

    #[test]
    fn generator_is_on_curve() {
        assert!(bool::from(AffinePoint::GENERATOR.is_on_curve()));
        assert!(!bool::from(AffinePoint::IDENTITY.is_on_curve()));
        assert!(bool::from(AffinePoint::IDENTITY.is_identity()));
    }

    #[test]
    fn decompress_generator() {
        let g = AffinePoint::GENERATOR;
        let y_is_odd = g.y.is_odd();
        assert_eq!(AffinePoint::decompress(&g.x, y_is_odd).unwrap(), g);
        assert_eq!(
            AffinePoint::decompress(&g.x, !y_is_odd).unwrap(),
            g.negate()
        );
    }

    #[test]
    fn decompress_rejects_non_residue() {
        // 0³ + 7 = 7 is not a square
        assert!(bool::from(
            decompress_y(&FieldElement::ZERO, Choice::from(0)).is_none()
        ));
    }

    #[test]
    fn from_coordinates_rejects_off_curve() {
        let g = AffinePoint::GENERATOR;
        assert!(bool::from(AffinePoint::from_coordinates(&g.x, &g.y).is_some()));
        let y = g.y.add_int(1);
        assert!(bool::from(AffinePoint::from_coordinates(&g.x, &y).is_none()));
    }

    #[test]
    fn generator_coordinates() {
        assert_eq!(
            AffinePoint::GENERATOR.x().to_bytes(),
            hex!("79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798")
        );
        assert_eq!(
            AffinePoint::GENERATOR.y().to_bytes(),
            hex!("483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8")
        );
    }
}
