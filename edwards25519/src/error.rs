//! Error types.

use core::fmt::{self, Display, Formatter};

#[cfg(feature = "std")]
use std::error::Error as StdError;

/// Result type with the `p2pcrypto-edwards25519` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The bytes are not a structurally valid encoding.
    Malformed,
    /// The encoding is well formed but the value it carries is unusable.
    Invalid,
}

/// Decoding errors
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Input has the wrong number of bytes
    InvalidLength,
    /// Point encoding does not decode to a curve point
    InvalidPoint,
    /// Scalar encoding is not reduced modulo the group order
    NonCanonicalScalar,
    /// Public key does not match the one derived from the secret key
    MismatchedPublicKey,
}

impl Error {
    /// The broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidLength => ErrorKind::Malformed,
            Error::InvalidPoint | Error::NonCanonicalScalar | Error::MismatchedPublicKey => {
                ErrorKind::Invalid
            }
        }
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
        match self {
            Error::InvalidLength => write!(f, "{}: input length is invalid", self.kind()),
            Error::InvalidPoint => write!(f, "{}: point encoding is invalid", self.kind()),
            Error::NonCanonicalScalar => {
                write!(f, "{}: scalar is not canonical", self.kind())
            }
            Error::MismatchedPublicKey => {
                write!(f, "{}: public key does not match secret key", self.kind())
            }
        }
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
