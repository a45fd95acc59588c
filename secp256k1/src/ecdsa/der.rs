//! Strict ASN.1 DER encoding of signatures.
//!
//! ```text
//! 0x30 <len> 0x02 <rlen> <r> 0x02 <slen> <s>
//! ```
//!
//! `r` and `s` are minimal big-endian two's complement integers, so a
//! leading zero byte appears only in front of a byte with its high bit set.

use super::{Signature, parse_component};
use crate::{Error, Result};
use core::fmt;

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

/// Shortest possible encoding: one-byte `r` and `s`.
const MIN_SIG_LEN: usize = 8;

/// Longest possible encoding: 33-byte `r` and `s`.
pub const MAX_SIG_LEN: usize = 72;

/// A DER encoded signature.
#[derive(Clone, Copy)]
pub struct DerSignature {
    bytes: [u8; MAX_SIG_LEN],
    len: usize,
}

impl DerSignature {
    /// The encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Length of the encoding in bytes.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }
}

impl AsRef<[u8]> for DerSignature {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl fmt::Debug for DerSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DerSignature(")?;
        for byte in self.as_bytes() {
            write!(f, "{byte:02x}")?;
        }
        write!(f, ")")
    }
}

impl PartialEq for DerSignature {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl Eq for DerSignature {}

#[cfg(feature = "alloc")]
impl From<DerSignature> for alloc::vec::Vec<u8> {
    fn from(der: DerSignature) -> Self {
        der.as_bytes().to_vec()
    }
}

/// Minimal two's complement encoding of a non-negative 32-byte integer.
fn canonical_int(bytes: &[u8; 32]) -> ([u8; 33], usize) {
    // keep at least one byte
    let first = bytes[..31].iter().position(|&b| b != 0).unwrap_or(31);
    let digits = &bytes[first..];

    let mut out = [0u8; 33];
    let pad = usize::from(digits[0] & 0x80 != 0);
    out[pad..pad + digits.len()].copy_from_slice(digits);
    (out, pad + digits.len())
}

impl Signature {
    /// Parses a strictly DER encoded signature.
    ///
    /// Structural problems are reported as malformed errors, components
    /// outside `[1, n)` as invalid ones. High `s` values are accepted.
    pub fn from_der(sig: &[u8]) -> Result<Self> {
        let len = sig.len();
        if len < MIN_SIG_LEN {
            return Err(Error::SignatureTooShort);
        }
        if len > MAX_SIG_LEN {
            return Err(Error::SignatureTooLong);
        }
        if sig[0] != SEQUENCE_TAG {
            return Err(Error::NoSequenceTag);
        }
        if usize::from(sig[1]) != len - 2 {
            return Err(Error::BadSequenceLength);
        }

        let r_len = usize::from(sig[3]);
        let s_type_offset = 4 + r_len;
        let s_len_offset = s_type_offset + 1;
        if s_type_offset >= len {
            return Err(Error::MissingSTag);
        }
        if s_len_offset >= len {
            return Err(Error::MissingSLength);
        }

        let s_len = usize::from(sig[s_len_offset]);
        let s_offset = s_len_offset + 1;
        if s_offset + s_len != len {
            return Err(Error::BadSLength);
        }

        // R
        if sig[2] != INTEGER_TAG {
            return Err(Error::NoRIntegerTag);
        }
        if r_len == 0 {
            return Err(Error::ZeroLengthR);
        }
        if sig[4] & 0x80 != 0 {
            return Err(Error::NegativeR);
        }
        if r_len > 1 && sig[4] == 0x00 && sig[5] & 0x80 == 0 {
            return Err(Error::ExcessivePaddingR);
        }

        // S
        if sig[s_type_offset] != INTEGER_TAG {
            return Err(Error::NoSIntegerTag);
        }
        if s_len == 0 {
            return Err(Error::ZeroLengthS);
        }
        if sig[s_offset] & 0x80 != 0 {
            return Err(Error::NegativeS);
        }
        if s_len > 1 && sig[s_offset] == 0x00 && sig[s_offset + 1] & 0x80 == 0 {
            return Err(Error::ExcessivePaddingS);
        }

        let r = parse_component(
            strip_leading_zeros(&sig[4..s_type_offset]),
            Error::ROverflowsOrder,
            Error::ZeroR,
        )?;
        let s = parse_component(
            strip_leading_zeros(&sig[s_offset..]),
            Error::SOverflowsOrder,
            Error::ZeroS,
        )?;
        Ok(Self { r, s })
    }

    /// Returns the DER encoding of the low-S form of this signature.
    pub fn to_der(&self) -> DerSignature {
        let sig = self.normalize_s();
        let (r, r_len) = canonical_int(&sig.r.to_bytes());
        let (s, s_len) = canonical_int(&sig.s.to_bytes());

        let mut bytes = [0u8; MAX_SIG_LEN];
        let len = 6 + r_len + s_len;
        bytes[0] = SEQUENCE_TAG;
        bytes[1] = (len - 2) as u8;
        bytes[2] = INTEGER_TAG;
        bytes[3] = r_len as u8;
        bytes[4..4 + r_len].copy_from_slice(&r[..r_len]);
        let offset = 4 + r_len;
        bytes[offset] = INTEGER_TAG;
        bytes[offset + 1] = s_len as u8;
        bytes[offset + 2..offset + 2 + s_len].copy_from_slice(&s[..s_len]);

        DerSignature { bytes, len }
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let first = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    &bytes[first..]
}
