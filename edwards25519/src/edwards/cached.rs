//! Intermediate coordinate systems used by the group law.
//!
//! Additions produce a [`ProjP1xP1`] completed point; converting it back
//! to extended coordinates costs four multiplications, and to projective
//! coordinates three. The cached forms keep the operands of an addition
//! preprocessed so repeated additions of the same point are cheaper.

use super::EdwardsPoint;
use crate::field::FieldElement;
use subtle::{Choice, ConditionallySelectable};

/// Completed point `((X:Z), (Y:T))`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjP1xP1 {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
    t: FieldElement,
}

/// Projective point `(X:Y:Z)`, enough for doubling.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjP2 {
    x: FieldElement,
    y: FieldElement,
    z: FieldElement,
}

/// `(Y + X, Y - X, Z, 2dT)`
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjCached {
    y_plus_x: FieldElement,
    y_minus_x: FieldElement,
    z: FieldElement,
    t2d: FieldElement,
}

/// `(Y + X, Y - X, 2dT)` with `Z = 1`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AffineCached {
    y_plus_x: FieldElement,
    y_minus_x: FieldElement,
    t2d: FieldElement,
}

impl ProjP1xP1 {
    pub(crate) fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            x: self.x.mul(&self.t),
            y: self.y.mul(&self.z),
            z: self.z.mul(&self.t),
            t: self.x.mul(&self.y),
        }
    }

    pub(crate) fn to_projective(&self) -> ProjP2 {
        ProjP2 {
            x: self.x.mul(&self.t),
            y: self.y.mul(&self.z),
            z: self.z.mul(&self.t),
        }
    }
}

impl ProjP2 {
    pub(crate) const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
    };

    pub(crate) fn from_extended(p: &EdwardsPoint) -> Self {
        Self {
            x: p.x,
            y: p.y,
            z: p.z,
        }
    }

    pub(crate) fn to_extended(&self) -> EdwardsPoint {
        EdwardsPoint {
            x: self.x.mul(&self.z),
            y: self.y.mul(&self.z),
            z: self.z.square(),
            t: self.x.mul(&self.y),
        }
    }

    /// dbl-2008-hwcd
    pub(crate) fn double(&self) -> ProjP1xP1 {
        let xx = self.x.square();
        let yy = self.y.square();
        let zz2 = self.z.square();
        let zz2 = zz2.add(&zz2);
        let x_plus_y_sq = self.x.add(&self.y).square();

        let y = yy.add(&xx);
        let z = yy.sub(&xx);
        ProjP1xP1 {
            x: x_plus_y_sq.sub(&y),
            y,
            z,
            t: zz2.sub(&z),
        }
    }
}

impl ProjCached {
    pub(crate) const IDENTITY: Self = Self {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        z: FieldElement::ONE,
        t2d: FieldElement::ZERO,
    };

    pub(crate) fn from_extended(p: &EdwardsPoint) -> Self {
        Self {
            y_plus_x: p.y.add(&p.x),
            y_minus_x: p.y.sub(&p.x),
            z: p.z,
            t2d: p.t.mul(&FieldElement::D2),
        }
    }

    pub(crate) fn negate(&self) -> Self {
        Self {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            z: self.z,
            t2d: self.t2d.negate(),
        }
    }

    /// `p + self`
    pub(crate) fn add_to(&self, p: &EdwardsPoint) -> ProjP1xP1 {
        let pp = p.y.add(&p.x).mul(&self.y_plus_x);
        let mm = p.y.sub(&p.x).mul(&self.y_minus_x);
        let tt2d = p.t.mul(&self.t2d);
        let zz2 = p.z.mul(&self.z);
        let zz2 = zz2.add(&zz2);

        ProjP1xP1 {
            x: pp.sub(&mm),
            y: pp.add(&mm),
            z: zz2.add(&tt2d),
            t: zz2.sub(&tt2d),
        }
    }

    /// `p - self`
    pub(crate) fn sub_from(&self, p: &EdwardsPoint) -> ProjP1xP1 {
        let pp = p.y.add(&p.x).mul(&self.y_minus_x);
        let mm = p.y.sub(&p.x).mul(&self.y_plus_x);
        let tt2d = p.t.mul(&self.t2d);
        let zz2 = p.z.mul(&self.z);
        let zz2 = zz2.add(&zz2);

        ProjP1xP1 {
            x: pp.sub(&mm),
            y: pp.add(&mm),
            z: zz2.sub(&tt2d),
            t: zz2.add(&tt2d),
        }
    }
}

impl AffineCached {
    pub(crate) const IDENTITY: Self = Self {
        y_plus_x: FieldElement::ONE,
        y_minus_x: FieldElement::ONE,
        t2d: FieldElement::ZERO,
    };

    /// Normalizes `p`, paying one inversion.
    pub(crate) fn from_extended(p: &EdwardsPoint) -> Self {
        let z_inv = p.z.invert();
        Self {
            y_plus_x: p.y.add(&p.x).mul(&z_inv),
            y_minus_x: p.y.sub(&p.x).mul(&z_inv),
            t2d: p.t.mul(&FieldElement::D2).mul(&z_inv),
        }
    }

    pub(crate) fn negate(&self) -> Self {
        Self {
            y_plus_x: self.y_minus_x,
            y_minus_x: self.y_plus_x,
            t2d: self.t2d.negate(),
        }
    }

    /// `p + self`
    pub(crate) fn add_to(&self, p: &EdwardsPoint) -> ProjP1xP1 {
        let pp = p.y.add(&p.x).mul(&self.y_plus_x);
        let mm = p.y.sub(&p.x).mul(&self.y_minus_x);
        let tt2d = p.t.mul(&self.t2d);
        let z2 = p.z.add(&p.z);

        ProjP1xP1 {
            x: pp.sub(&mm),
            y: pp.add(&mm),
            z: z2.add(&tt2d),
            t: z2.sub(&tt2d),
        }
    }

    /// `p - self`
    pub(crate) fn sub_from(&self, p: &EdwardsPoint) -> ProjP1xP1 {
        let pp = p.y.add(&p.x).mul(&self.y_minus_x);
        let mm = p.y.sub(&p.x).mul(&self.y_plus_x);
        let tt2d = p.t.mul(&self.t2d);
        let z2 = p.z.add(&p.z);

        ProjP1xP1 {
            x: pp.sub(&mm),
            y: pp.add(&mm),
            z: z2.sub(&tt2d),
            t: z2.add(&tt2d),
        }
    }
}

impl ConditionallySelectable for ProjCached {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
            t2d: FieldElement::conditional_select(&a.t2d, &b.t2d, choice),
        }
    }
}

impl ConditionallySelectable for AffineCached {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Self {
            y_plus_x: FieldElement::conditional_select(&a.y_plus_x, &b.y_plus_x, choice),
            y_minus_x: FieldElement::conditional_select(&a.y_minus_x, &b.y_minus_x, choice),
            t2d: FieldElement::conditional_select(&a.t2d, &b.t2d, choice),
        }
    }
}
