//! Lookup tables of point multiples.

use super::{
    EdwardsPoint,
    cached::{AffineCached, ProjCached, ProjP1xP1},
};
use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

#[cfg(all(
    feature = "precomputed-tables",
    not(any(feature = "critical-section", feature = "std"))
))]
compile_error!("`precomputed-tables` feature requires either `critical-section` or `std`");

cfg_if::cfg_if! {
    if #[cfg(all(feature = "precomputed-tables", feature = "critical-section"))] {
        use once_cell::sync::Lazy as LazyLock;
    } else if #[cfg(feature = "precomputed-tables")] {
        use std::sync::LazyLock;
    }
}

/// Splits `x` in `[-8, 8]` into `(|x|, x < 0)`.
fn abs_and_sign(x: i8) -> (u8, Choice) {
    debug_assert!((-8..=8).contains(&x));
    let xmask = x >> 7;
    let xabs = (x + xmask) ^ xmask;
    (xabs as u8, Choice::from((xmask & 1) as u8))
}

/// `[Q, 2Q, ..., 8Q]` in cached projective form.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ProjLookupTable {
    points: [ProjCached; 8],
}

impl ProjLookupTable {
    pub(crate) fn new(q: &EdwardsPoint) -> Self {
        let mut points = [ProjCached::from_extended(q); 8];
        for i in 0..7 {
            let next = points[i].add_to(q).to_extended();
            points[i + 1] = ProjCached::from_extended(&next);
        }
        Self { points }
    }

    /// Returns `x * Q` for `x` in `[-8, 8]`, in constant time.
    pub(crate) fn select(&self, x: i8) -> ProjCached {
        let (xabs, negative) = abs_and_sign(x);
        let mut t = ProjCached::IDENTITY;
        for (j, point) in (1u8..).zip(self.points.iter()) {
            t.conditional_assign(point, xabs.ct_eq(&j));
        }
        t.conditional_assign(&t.negate(), negative);
        t
    }
}

/// `[Q, 2Q, ..., 8Q]` in cached affine form.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AffineLookupTable {
    points: [AffineCached; 8],
}

impl AffineLookupTable {
    pub(crate) fn new(q: &EdwardsPoint) -> Self {
        let mut points = [AffineCached::from_extended(q); 8];
        let q_cached = points[0];
        let mut acc = *q;
        for point in points.iter_mut().skip(1) {
            acc = q_cached.add_to(&acc).to_extended();
            *point = AffineCached::from_extended(&acc);
        }
        Self { points }
    }

    /// Returns `x * Q` for `x` in `[-8, 8]`, in constant time.
    pub(crate) fn select(&self, x: i8) -> AffineCached {
        let (xabs, negative) = abs_and_sign(x);
        let mut t = AffineCached::IDENTITY;
        for (j, point) in (1u8..).zip(self.points.iter()) {
            t.conditional_assign(point, xabs.ct_eq(&j));
        }
        t.conditional_assign(&t.negate(), negative);
        t
    }
}

/// Table of odd multiples consumed by a wNAF loop.
pub(crate) trait NafLookupTable {
    /// Returns `p + digit * Q` for an odd `digit` within the table range.
    fn add_digit(&self, p: &EdwardsPoint, digit: i8) -> ProjP1xP1;
}

/// `[Q, 3Q, 5Q, ..., 15Q]` for width-5 NAF digits.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NafLookupTable5 {
    points: [ProjCached; 8],
}

impl NafLookupTable5 {
    pub(crate) fn new(q: &EdwardsPoint) -> Self {
        let q2 = q.double();
        let mut points = [ProjCached::from_extended(q); 8];
        for i in 0..7 {
            let next = points[i].add_to(&q2).to_extended();
            points[i + 1] = ProjCached::from_extended(&next);
        }
        Self { points }
    }
}

impl NafLookupTable for NafLookupTable5 {
    fn add_digit(&self, p: &EdwardsPoint, digit: i8) -> ProjP1xP1 {
        let index = usize::from(digit.unsigned_abs() / 2);
        if digit > 0 {
            self.points[index].add_to(p)
        } else {
            self.points[index].sub_from(p)
        }
    }
}

/// `[Q, 3Q, 5Q, ..., 127Q]` for width-8 NAF digits.
#[cfg(feature = "precomputed-tables")]
#[derive(Clone, Copy, Debug)]
pub(crate) struct NafLookupTable8 {
    points: [AffineCached; 64],
}

#[cfg(feature = "precomputed-tables")]
impl NafLookupTable8 {
    fn new(q: &EdwardsPoint) -> Self {
        let q2 = q.double();
        let mut points = [AffineCached::from_extended(q); 64];
        let mut acc = *q;
        for i in 0..63 {
            acc = acc.add(&q2);
            points[i + 1] = AffineCached::from_extended(&acc);
        }
        Self { points }
    }
}

#[cfg(feature = "precomputed-tables")]
impl NafLookupTable for NafLookupTable8 {
    fn add_digit(&self, p: &EdwardsPoint, digit: i8) -> ProjP1xP1 {
        let index = usize::from(digit.unsigned_abs() / 2);
        if digit > 0 {
            self.points[index].add_to(p)
        } else {
            self.points[index].sub_from(p)
        }
    }
}

/// Table `i` holds `[1..8] * 256^i * B`.
#[cfg(feature = "precomputed-tables")]
pub(crate) static BASEPOINT_TABLE: LazyLock<[AffineLookupTable; 32]> = LazyLock::new(|| {
    let mut p = EdwardsPoint::GENERATOR;
    let mut tables = [AffineLookupTable::new(&p); 32];
    for table in tables.iter_mut() {
        *table = AffineLookupTable::new(&p);
        for _ in 0..8 {
            p = p.double();
        }
    }
    tables
});

/// Odd multiples of `B` for the verification double-scalar multiplication.
#[cfg(feature = "precomputed-tables")]
pub(crate) static BASEPOINT_NAF_TABLE: LazyLock<NafLookupTable8> =
    LazyLock::new(|| NafLookupTable8::new(&EdwardsPoint::GENERATOR));

/// Builds the base point tables now instead of on first use.
///
/// Without the `precomputed-tables` feature there is nothing to build.
pub fn init_tables() {
    #[cfg(feature = "precomputed-tables")]
    {
        LazyLock::force(&BASEPOINT_TABLE);
        LazyLock::force(&BASEPOINT_NAF_TABLE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Scalar;

    fn multiple(k: u64) -> EdwardsPoint {
        EdwardsPoint::GENERATOR.scalar_mult(&Scalar::from(k))
    }

    #[test]
    fn proj_table_select() {
        let table = ProjLookupTable::new(&EdwardsPoint::GENERATOR);
        let origin = EdwardsPoint::IDENTITY;
        for x in -8i8..=8 {
            let expected = if x < 0 {
                multiple(u64::from(x.unsigned_abs())).negate()
            } else {
                multiple(x as u64)
            };
            assert_eq!(table.select(x).add_to(&origin).to_extended(), expected);
        }
    }

    #[test]
    fn affine_table_select() {
        let table = AffineLookupTable::new(&EdwardsPoint::GENERATOR);
        let origin = EdwardsPoint::IDENTITY;
        for x in -8i8..=8 {
            let expected = if x < 0 {
                multiple(u64::from(x.unsigned_abs())).negate()
            } else {
                multiple(x as u64)
            };
            assert_eq!(table.select(x).add_to(&origin).to_extended(), expected);
        }
    }

    #[test]
    fn naf_table_odd_multiples() {
        let table = NafLookupTable5::new(&EdwardsPoint::GENERATOR);
        let origin = EdwardsPoint::IDENTITY;
        assert_eq!(table.add_digit(&origin, 15).to_extended(), multiple(15));
        assert_eq!(
            table.add_digit(&origin, -5).to_extended(),
            multiple(5).negate()
        );
    }

    #[cfg(feature = "precomputed-tables")]
    #[test]
    fn basepoint_tables() {
        init_tables();
        let origin = EdwardsPoint::IDENTITY;
        assert_eq!(
            BASEPOINT_NAF_TABLE.add_digit(&origin, 127).to_extended(),
            multiple(127)
        );

        // table i holds 1..=8 times 256^i B
        for i in [0usize, 1, 17, 31] {
            let mut shift = [0u8; 32];
            shift[i] = 1;
            let base = EdwardsPoint::GENERATOR.scalar_mult(&Scalar::from_bytes_mod_order(&shift));
            for j in 1i8..=8 {
                let expected = base.scalar_mult(&Scalar::from(j as u64));
                let entry = BASEPOINT_TABLE[i].select(j).add_to(&origin).to_extended();
                assert_eq!(entry, expected, "table {i}, entry {j}");
            }
        }
    }
}
