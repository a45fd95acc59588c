//! Jacobian points

use super::{AffinePoint, FieldElement};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// β, a non-trivial cube root of unity modulo p. `(βx, y)` is `λ(x, y)`.
const ENDOMORPHISM_BETA: FieldElement = FieldElement::from_bytes_unchecked(&[
    0x7a, 0xe9, 0x6a, 0x2b, 0x65, 0x7c, 0x07, 0x10, 0x6e, 0x64, 0x47, 0x9e, 0xac, 0x34, 0x34, 0xe9,
    0x9c, 0xf0, 0x49, 0x75, 0x12, 0xf5, 0x89, 0x95, 0xc1, 0x39, 0x6c, 0x28, 0x71, 0x95, 0x01, 0xee,
]);

/// A point on the secp256k1 curve in Jacobian coordinates, representing
/// the affine point `(X/Z², Y/Z³)`.
///
/// `Z = 0` is the point at infinity. All coordinates have magnitude 1.
#[derive(Clone, Copy, Debug)]
pub struct JacobianPoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl JacobianPoint {
    /// The point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// The base point of secp256k1.
    pub const GENERATOR: Self = Self {
        x: AffinePoint::GENERATOR.x,
        y: AffinePoint::GENERATOR.y,
        z: FieldElement::ONE,
    };

    /// Lifts an affine point, mapping `(0, 0)` to the point at infinity.
    pub fn from_affine(p: &AffinePoint) -> Self {
        let lifted = Self {
            x: p.x,
            y: p.y,
            z: FieldElement::ONE,
        };
        Self::conditional_select(&lifted, &Self::IDENTITY, p.is_identity())
    }

    /// Converts to affine coordinates with a single inversion. The point
    /// at infinity maps to `(0, 0)`.
    pub fn to_affine(&self) -> AffinePoint {
        let zinv = self.z.invert();
        let zinv2 = zinv.square();
        AffinePoint {
            x: self.x.mul(&zinv2).normalize(),
            y: self.y.mul(&zinv2).mul(&zinv).normalize(),
        }
    }

    /// Is this the point at infinity?
    pub fn is_identity(&self) -> Choice {
        self.z.normalizes_to_zero()
    }

    /// Returns `-self`.
    pub fn negate(&self) -> Self {
        Self {
            x: self.x,
            y: self.y.negate(1).normalize_weak(),
            z: self.z,
        }
    }

    /// Returns `λ * self`, computed as `(βX, Y, Z)`.
    pub fn endomorphism(&self) -> Self {
        Self {
            x: self.x.mul(&ENDOMORPHISM_BETA),
            y: self.y,
            z: self.z,
        }
    }

    /// Returns `2 * self` using the dbl-2009-l formulas for `a = 0`.
    ///
    /// Constant time. The point at infinity doubles to itself since
    /// `Z3 = 2YZ`.
    pub fn double(&self) -> Self {
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let d = self
            .x
            .add(&b)
            .square()
            .add(&a.negate(1))
            .add(&c.negate(1))
            .normalize_weak()
            .double();
        let e = a.mul_int(3);
        let f = e.square();

        let x3 = f.add(&d.double().negate(4)).normalize_weak();
        let y3 = e
            .mul(&d.add(&x3.negate(1)))
            .add(&c.mul_int(8).negate(8))
            .normalize_weak();
        let z3 = self.y.mul(&self.z).double().normalize_weak();

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `2 * self`, returning early for the point at infinity.
    pub fn double_non_const(&self) -> Self {
        if self.is_identity().into() {
            return Self::IDENTITY;
        }
        self.double()
    }

    /// The add-2007-bl formulas. Also returns whether `H = U2 - U1` and
    /// `R = S2 - S1` vanished, in which case the sum is only meaningful as
    /// the point at infinity (`H = 0`, `R != 0`).
    fn add_generic(&self, other: &Self) -> (Self, Choice, Choice) {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x.mul(&z2z2);
        let u2 = other.x.mul(&z1z1);
        let s1 = self.y.mul(&other.z).mul(&z2z2);
        let s2 = other.y.mul(&self.z).mul(&z1z1);

        let h = u2.add(&u1.negate(1));
        let r_half = s2.add(&s1.negate(1));
        let h_is_zero = h.normalizes_to_zero();
        let r_is_zero = r_half.normalizes_to_zero();

        let i = h.double().square();
        let j = h.mul(&i);
        let r = r_half.double();
        let v = u1.mul(&i);

        let x3 = r
            .square()
            .add(&j.negate(1))
            .add(&v.double().negate(2))
            .normalize_weak();
        let y3 = r
            .mul(&v.add(&x3.negate(1)))
            .add(&s1.mul(&j).double().negate(2))
            .normalize_weak();
        let z3 = self
            .z
            .add(&other.z)
            .square()
            .add(&z1z1.negate(1))
            .add(&z2z2.negate(1))
            .mul(&h);

        (
            Self {
                x: x3,
                y: y3,
                z: z3,
            },
            h_is_zero,
            r_is_zero,
        )
    }

    /// Returns `self + other` in constant time, covering the point at
    /// infinity, equal inputs and opposite inputs.
    pub fn add(&self, other: &Self) -> Self {
        let (sum, h_is_zero, r_is_zero) = self.add_generic(other);
        // Opposite inputs already give Z3 = 0.
        let res = Self::conditional_select(&sum, &self.double(), h_is_zero & r_is_zero);
        let res = Self::conditional_select(&res, other, self.is_identity());
        Self::conditional_select(&res, self, other.is_identity())
    }

    /// Returns `self + other`, branching on the special cases.
    pub fn add_non_const(&self, other: &Self) -> Self {
        if self.is_identity().into() {
            return *other;
        }
        if other.is_identity().into() {
            return *self;
        }

        let (sum, h_is_zero, r_is_zero) = self.add_generic(other);
        if h_is_zero.into() {
            if r_is_zero.into() {
                return self.double();
            }
            return Self::IDENTITY;
        }
        sum
    }

    /// Returns `self - other` in constant time.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }
}

impl Default for JacobianPoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<AffinePoint> for JacobianPoint {
    fn from(p: AffinePoint) -> Self {
        Self::from_affine(&p)
    }
}

impl From<&JacobianPoint> for AffinePoint {
    fn from(p: &JacobianPoint) -> Self {
        p.to_affine()
    }
}

impl ConditionallySelectable for JacobianPoint {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}

impl ConstantTimeEq for JacobianPoint {
    /// Compares `X1 Z2² = X2 Z1²` and `Y1 Z2³ = Y2 Z1³`.
    fn ct_eq(&self, other: &Self) -> Choice {
        let z1z1 = self.z.square();
        let z2z2 = other.z.square();

        let x1 = self.x.mul(&z2z2);
        let x2 = other.x.mul(&z1z1);
        let y1 = self.y.mul(&z2z2).mul(&other.z);
        let y2 = other.y.mul(&z1z1).mul(&self.z);

        let x_eq = x1.negate(1).add(&x2).normalizes_to_zero();
        let y_eq = y1.negate(1).add(&y2).normalizes_to_zero();

        let self_id = self.is_identity();
        let other_id = other.is_identity();
        (self_id & other_id) | (!self_id & !other_id & x_eq & y_eq)
    }
}

impl PartialEq for JacobianPoint {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for JacobianPoint {}
