//! Compact "recoverable" signatures.
//!
//! The 65-byte compact form is `header || r || s` where
//! `header = 27 + recovery id + (4 if the key is compressed)`. The
//! recovery id allows the public key to be recomputed from the signature
//! and the message hash alone.

use super::Signature;
use crate::{
    Error, PublicKey, Result,
    arithmetic::{
        AffinePoint, FieldElement, JacobianPoint, Scalar, scalar_base_mult_non_const,
        scalar_mult_non_const,
    },
};
use subtle::Choice;

/// Size of a compact signature in bytes.
pub const COMPACT_SIZE: usize = 65;

const COMPACT_MAGIC_OFFSET: u8 = 27;
const COMPACT_COMPRESSED_FLAG: u8 = 4;

/// Recovery id of a signature: bit 0 is the parity of the nonce point's
/// y coordinate, bit 1 is set when its x coordinate was reduced
/// modulo `n`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct RecoveryId(u8);

impl RecoveryId {
    /// Creates a recovery id from its two flags.
    pub const fn new(is_y_odd: bool, is_x_reduced: bool) -> Self {
        Self(((is_x_reduced as u8) << 1) | (is_y_odd as u8))
    }

    /// Parses a recovery id from its numeric value in `0..4`.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        if byte < 4 { Some(Self(byte)) } else { None }
    }

    /// Numeric value in `0..4`.
    pub const fn to_byte(self) -> u8 {
        self.0
    }

    /// Is the y coordinate of the nonce point odd?
    pub const fn is_y_odd(self) -> bool {
        self.0 & 1 != 0
    }

    /// Did the x coordinate of the nonce point overflow the order?
    pub const fn is_x_reduced(self) -> bool {
        self.0 & 2 != 0
    }
}

impl From<RecoveryId> for u8 {
    fn from(id: RecoveryId) -> u8 {
        id.0
    }
}

impl TryFrom<u8> for RecoveryId {
    type Error = Error;

    fn try_from(byte: u8) -> Result<Self> {
        Self::from_byte(byte).ok_or(Error::InvalidRecoveryCode)
    }
}

/// Encodes a signature in the compact form.
pub(crate) fn encode_compact(
    signature: &Signature,
    id: RecoveryId,
    compressed: bool,
) -> [u8; COMPACT_SIZE] {
    let mut out = [0u8; COMPACT_SIZE];
    out[0] = COMPACT_MAGIC_OFFSET + id.to_byte();
    if compressed {
        out[0] += COMPACT_COMPRESSED_FLAG;
    }
    out[1..].copy_from_slice(&signature.to_bytes());
    out
}

/// Recovers the public key from a compact signature and the message hash
/// that was signed. Also returns whether the signer asked for a
/// compressed key encoding.
///
/// Runs in variable time.
pub fn recover_compact(signature: &[u8], hash: &[u8]) -> Result<(PublicKey, bool)> {
    if signature.len() != COMPACT_SIZE {
        return Err(Error::InvalidLength);
    }

    let header = signature[0];
    if !(COMPACT_MAGIC_OFFSET..COMPACT_MAGIC_OFFSET + 8).contains(&header) {
        return Err(Error::InvalidRecoveryCode);
    }
    let code = header - COMPACT_MAGIC_OFFSET;
    let compressed = code & COMPACT_COMPRESSED_FLAG != 0;
    let id = RecoveryId(code & 3);

    let sig = Signature::from_slice(&signature[1..])?;
    let public_key = sig.recover_public_key(hash, id)?;
    Ok((public_key, compressed))
}

impl Signature {
    /// Recovers the public key that produced this signature over `hash`.
    ///
    /// Runs in variable time.
    pub fn recover_public_key(&self, hash: &[u8], id: RecoveryId) -> Result<PublicKey> {
        if self.r.is_zero().into() {
            return Err(Error::ZeroR);
        }
        if self.s.is_zero().into() {
            return Err(Error::ZeroS);
        }

        // r < n < p, so the conversion never overflows
        let mut x = FieldElement::set_bytes(&self.r.to_bytes()).0;
        if id.is_x_reduced() {
            if x.is_gt_or_eq_prime_minus_order().into() {
                return Err(Error::RecoveredROverflow);
            }
            x = x.add(&FieldElement::ORDER).normalize();
        }

        let big_r = Option::<AffinePoint>::from(AffinePoint::decompress(
            &x,
            Choice::from(id.is_y_odd() as u8),
        ))
        .ok_or(Error::NoSquareRoot)?;

        // Q = r^-1 (sR - eG)
        let e = Scalar::set_byte_slice(hash).0;
        let w = self.r.invert();
        let u1 = e.mul(&w).negate();
        let u2 = self.s.mul(&w);

        let q = scalar_base_mult_non_const(&u1)
            .add_non_const(&scalar_mult_non_const(&u2, &JacobianPoint::from_affine(&big_r)));
        if q.is_identity().into() {
            return Err(Error::RecoveredInfinity);
        }
        PublicKey::from_affine(q.to_affine())
    }
}
