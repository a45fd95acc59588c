//! Wide scalar (32-bit limbs)

use super::{NEG_MODULUS, Scalar};
use crate::arithmetic::accumulator::Accumulator96;
use subtle::Choice;

/// Number of non-zero limbs in `NEG_MODULUS`. The top one is `1`.
const NEG_MODULUS_LIMBS: usize = 5;

/// A 512-bit product awaiting reduction.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct WideScalar(pub(super) [u32; 16]);

impl WideScalar {
    /// Multiplies two scalars without modulo reduction, producing up to a 512-bit scalar.
    pub fn mul_wide(a: &[u32; 8], b: &[u32; 8]) -> Self {
        let mut l = [0u32; 16];
        let mut acc = Accumulator96::ZERO;

        for (k, limb) in l.iter_mut().enumerate().take(15) {
            let lo = k.saturating_sub(7);
            let hi = k.min(7);
            for i in lo..=hi {
                acc = acc.mul_add(a[i], b[k - i]);
            }
            let (low, rest) = acc.shift_right_32();
            *limb = low;
            acc = rest;
        }

        let (top, rest) = acc.shift_right_32();
        debug_assert_eq!(rest, Accumulator96::ZERO);
        l[15] = top;

        Self(l)
    }

    /// Reduces modulo n in three folding stages, each replacing the part
    /// above 2^256 by its product with 2^256 - n.
    pub fn reduce(&self) -> Scalar {
        let (low, high) = self.0.split_at(8);

        // Reduce 512 bits into 385.
        let mut m = [0u32; 13];
        fold(low, high, &mut m);
        debug_assert!(m[12] <= 1);

        // Reduce 385 bits into 258.
        let mut p = [0u32; 9];
        fold(&m[..8], &m[8..], &mut p);
        debug_assert!(p[8] <= 2);

        // Reduce 258 bits into 256.
        let mut r = [0u32; 9];
        fold(&p[..8], &p[8..], &mut r);
        debug_assert!(r[8] <= 1);

        let mut w = [0u32; 8];
        w.copy_from_slice(&r[..8]);
        Scalar::from_overflow(&w, Choice::from(r[8] as u8))
    }
}

/// Writes `low + high * NEG_MODULUS` into `out`, one accumulator column per
/// output limb. `out` must be wide enough to hold the whole sum.
fn fold(low: &[u32], high: &[u32], out: &mut [u32]) {
    let mut acc = Accumulator96::ZERO;

    for (k, limb) in out.iter_mut().enumerate() {
        if k < low.len() {
            acc = acc.add(u64::from(low[k]));
        }
        for (j, neg) in NEG_MODULUS.iter().enumerate().take(NEG_MODULUS_LIMBS) {
            if k >= j && k - j < high.len() {
                acc = acc.mul_add(high[k - j], *neg);
            }
        }
        let (low_limb, rest) = acc.shift_right_32();
        *limb = low_limb;
        acc = rest;
    }

    debug_assert_eq!(acc, Accumulator96::ZERO);
}
