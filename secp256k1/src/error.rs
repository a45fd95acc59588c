//! Error types.

use core::fmt::{self, Display, Formatter};

#[cfg(feature = "std")]
use std::error::Error as StdError;

/// Result type with the `p2pcrypto-secp256k1` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The bytes are not a structurally valid encoding.
    Malformed,
    /// The encoding is well formed but the value it carries is unusable.
    Invalid,
}

/// Decoding and validation errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Input has the wrong number of bytes
    InvalidLength,
    /// DER signature is shorter than the minimum of 8 bytes
    SignatureTooShort,
    /// DER signature is longer than the maximum of 72 bytes
    SignatureTooLong,
    /// DER signature does not start with a sequence tag
    NoSequenceTag,
    /// DER sequence length does not match the remaining bytes
    BadSequenceLength,
    /// DER signature ends before the S integer tag
    MissingSTag,
    /// DER signature ends before the S length byte
    MissingSLength,
    /// DER S length does not end exactly at the end of the signature
    BadSLength,
    /// DER R component is not tagged as an integer
    NoRIntegerTag,
    /// DER S component is not tagged as an integer
    NoSIntegerTag,
    /// DER R component has zero length
    ZeroLengthR,
    /// DER S component has zero length
    ZeroLengthS,
    /// DER R component has its sign bit set
    NegativeR,
    /// DER S component has its sign bit set
    NegativeS,
    /// DER R component has unnecessary leading zero bytes
    ExcessivePaddingR,
    /// DER S component has unnecessary leading zero bytes
    ExcessivePaddingS,
    /// Public key prefix byte is not one of 0x02, 0x03, 0x04, 0x06, 0x07
    InvalidPublicKeyPrefix,
    /// Compact signature recovery byte is out of range
    InvalidRecoveryCode,
    /// R component is zero
    ZeroR,
    /// S component is zero
    ZeroS,
    /// R component is greater than or equal to the group order
    ROverflowsOrder,
    /// S component is greater than or equal to the group order
    SOverflowsOrder,
    /// Secret key is zero after reduction
    ZeroSecretKey,
    /// Coordinate is greater than or equal to the field prime
    CoordinateOverflow,
    /// Point is not on the curve
    NotOnCurve,
    /// No curve point has the given x coordinate
    NoSquareRoot,
    /// Hybrid public key parity does not match its y coordinate
    MismatchedParity,
    /// Recovered R coordinate would overflow the field prime
    RecoveredROverflow,
    /// Recovery produced the point at infinity
    RecoveredInfinity,
}

impl Error {
    /// Classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidLength
            | Error::SignatureTooShort
            | Error::SignatureTooLong
            | Error::NoSequenceTag
            | Error::BadSequenceLength
            | Error::MissingSTag
            | Error::MissingSLength
            | Error::BadSLength
            | Error::NoRIntegerTag
            | Error::NoSIntegerTag
            | Error::ZeroLengthR
            | Error::ZeroLengthS
            | Error::NegativeR
            | Error::NegativeS
            | Error::ExcessivePaddingR
            | Error::ExcessivePaddingS
            | Error::InvalidPublicKeyPrefix
            | Error::InvalidRecoveryCode => ErrorKind::Malformed,
            Error::ZeroR
            | Error::ZeroS
            | Error::ROverflowsOrder
            | Error::SOverflowsOrder
            | Error::ZeroSecretKey
            | Error::CoordinateOverflow
            | Error::NotOnCurve
            | Error::NoSquareRoot
            | Error::MismatchedParity
            | Error::RecoveredROverflow
            | Error::RecoveredInfinity => ErrorKind::Invalid,
        }
    }

    /// Is this a structural encoding error?
    pub fn is_malformed(&self) -> bool {
        self.kind() == ErrorKind::Malformed
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Malformed => write!(f, "malformed"),
            ErrorKind::Invalid => write!(f, "invalid"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::InvalidLength => "input length is invalid",
            Error::SignatureTooShort => "signature is too short",
            Error::SignatureTooLong => "signature is too long",
            Error::NoSequenceTag => "signature has no sequence tag",
            Error::BadSequenceLength => "signature sequence length does not match",
            Error::MissingSTag => "signature is missing the S type tag",
            Error::MissingSLength => "signature is missing the S length",
            Error::BadSLength => "signature S length is invalid",
            Error::NoRIntegerTag => "signature R is not an integer",
            Error::NoSIntegerTag => "signature S is not an integer",
            Error::ZeroLengthR => "signature R has zero length",
            Error::ZeroLengthS => "signature S has zero length",
            Error::NegativeR => "signature R is negative",
            Error::NegativeS => "signature S is negative",
            Error::ExcessivePaddingR => "signature R has excessive padding",
            Error::ExcessivePaddingS => "signature S has excessive padding",
            Error::InvalidPublicKeyPrefix => "public key prefix is invalid",
            Error::InvalidRecoveryCode => "signature recovery code is invalid",
            Error::ZeroR => "signature R is zero",
            Error::ZeroS => "signature S is zero",
            Error::ROverflowsOrder => "signature R is not less than the group order",
            Error::SOverflowsOrder => "signature S is not less than the group order",
            Error::ZeroSecretKey => "secret key is zero",
            Error::CoordinateOverflow => "coordinate is not less than the field prime",
            Error::NotOnCurve => "point is not on the curve",
            Error::NoSquareRoot => "x coordinate has no square root on the curve",
            Error::MismatchedParity => "hybrid public key parity does not match",
            Error::RecoveredROverflow => "recovered R overflows the field prime",
            Error::RecoveredInfinity => "recovered public key is the point at infinity",
        };
        write!(f, "{} {}", self.kind(), msg)
    }
}

#[cfg(feature = "std")]
impl StdError for Error {}

#[cfg(feature = "signature")]
impl From<Error> for signature::Error {
    #[cfg(feature = "std")]
    fn from(err: Error) -> Self {
        signature::Error::from_source(err)
    }

    #[cfg(not(feature = "std"))]
    fn from(_err: Error) -> Self {
        signature::Error::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind};

    #[test]
    fn kinds() {
        assert_eq!(Error::ExcessivePaddingS.kind(), ErrorKind::Malformed);
        assert_eq!(Error::SOverflowsOrder.kind(), ErrorKind::Invalid);
        assert!(Error::NoSequenceTag.is_malformed());
        assert!(!Error::NotOnCurve.is_malformed());
        assert_eq!(Error::NoSquareRoot.kind(), ErrorKind::Invalid);
    }
}
