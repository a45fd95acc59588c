//! Error types.

use crate::KeyType;
use core::fmt::{self, Display, Formatter};
use p2pcrypto_edwards25519 as edwards25519;
use p2pcrypto_secp256k1 as secp256k1;

/// Result type with the `p2pcrypto-keys` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Broad classification of an [`Error`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// The bytes are not a structurally valid encoding.
    Malformed,
    /// The encoding is well formed but the value it carries is unusable.
    Invalid,
    /// The key type or operation is not available.
    Unsupported,
}

/// Key handling errors
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Error {
    /// Error from the edwards25519 engine
    Ed25519(edwards25519::Error),
    /// Error from the secp256k1 engine
    Secp256k1(secp256k1::Error),
    /// Encoding or signature rejected by the P-256 backend
    Backend,
    /// Operation is not available for this key type
    Unsupported(KeyType),
    /// Key type number is not assigned
    UnknownKeyType(i32),
    /// Key type name is not recognized
    UnknownKeyName,
}

impl Error {
    /// The broad class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Ed25519(err) => match err.kind() {
                edwards25519::ErrorKind::Malformed => ErrorKind::Malformed,
                edwards25519::ErrorKind::Invalid => ErrorKind::Invalid,
            },
            Error::Secp256k1(err) => match err.kind() {
                secp256k1::ErrorKind::Malformed => ErrorKind::Malformed,
                secp256k1::ErrorKind::Invalid => ErrorKind::Invalid,
            },
            Error::Backend => ErrorKind::Malformed,
            Error::Unsupported(_) | Error::UnknownKeyType(_) | Error::UnknownKeyName => {
                ErrorKind::Unsupported
            }
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Malformed => write!(f, "malformed"),
            ErrorKind::Invalid => write!(f, "invalid"),
            ErrorKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::Ed25519(err) => write!(f, "ed25519: {err}"),
            Error::Secp256k1(err) => write!(f, "secp256k1: {err}"),
            Error::Backend => write!(f, "{}: rejected by the P-256 backend", self.kind()),
            Error::Unsupported(key_type) => {
                write!(f, "{}: operation not available for {key_type} keys", self.kind())
            }
            Error::UnknownKeyType(n) => write!(f, "{}: unknown key type {n}", self.kind()),
            Error::UnknownKeyName => write!(f, "{}: unknown key type name", self.kind()),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Ed25519(err) => Some(err),
            Error::Secp256k1(err) => Some(err),
            _ => None,
        }
    }
}

impl From<edwards25519::Error> for Error {
    fn from(err: edwards25519::Error) -> Self {
        Error::Ed25519(err)
    }
}

impl From<secp256k1::Error> for Error {
    fn from(err: secp256k1::Error) -> Self {
        Error::Secp256k1(err)
    }
}

impl From<p256::pkcs8::Error> for Error {
    fn from(_: p256::pkcs8::Error) -> Self {
        Error::Backend
    }
}

impl From<p256::pkcs8::spki::Error> for Error {
    fn from(_: p256::pkcs8::spki::Error) -> Self {
        Error::Backend
    }
}

impl From<p256::ecdsa::Error> for Error {
    fn from(_: p256::ecdsa::Error) -> Self {
        Error::Backend
    }
}
