//! 96-bit accumulator for sums of 64-bit partial products.

use subtle::ConstantTimeLess;

/// Three 32-bit limbs, least significant first.
///
/// Callers size their sums so the top limb never overflows.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Accumulator96 {
    c0: u32,
    c1: u32,
    c2: u32,
}

/// Returns `1` if `a < b` and `0` otherwise, without branching.
#[inline(always)]
fn ct_lt(a: u32, b: u32) -> u32 {
    u32::from(a.ct_lt(&b).unwrap_u8())
}

impl Accumulator96 {
    pub const ZERO: Self = Self {
        c0: 0,
        c1: 0,
        c2: 0,
    };

    /// Returns the sum of the accumulator and `v`.
    #[inline(always)]
    pub fn add(self, v: u64) -> Self {
        let lo = v as u32;
        let hi = (v >> 32) as u32;

        let c0 = self.c0.wrapping_add(lo);
        let carry0 = ct_lt(c0, lo);

        let c1 = self.c1.wrapping_add(hi);
        let carry1 = ct_lt(c1, hi);
        let c1_carried = c1.wrapping_add(carry0);
        let carry2 = ct_lt(c1_carried, carry0);

        let c2 = self.c2 + carry1 + carry2;
        debug_assert!(c2 >= self.c2);

        Self {
            c0,
            c1: c1_carried,
            c2,
        }
    }

    /// Returns the sum of the accumulator and `a * b`.
    #[inline(always)]
    pub fn mul_add(self, a: u32, b: u32) -> Self {
        self.add(u64::from(a) * u64::from(b))
    }

    /// Splits off the low 32 bits, returning them with the remaining
    /// accumulator shifted down by one limb.
    #[inline(always)]
    pub fn shift_right_32(self) -> (u32, Self) {
        (
            self.c0,
            Self {
                c0: self.c1,
                c1: self.c2,
                c2: 0,
            },
        )
    }

    #[cfg(test)]
    fn to_u128(self) -> u128 {
        u128::from(self.c0) | (u128::from(self.c1) << 32) | (u128::from(self.c2) << 64)
    }
}
