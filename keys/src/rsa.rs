//! RSA keys, carried as opaque DER bytes.
//!
//! Signing, verification and generation are not available.

use crate::{Error, Key, KeyType, PrivKey, PubKey, Result};
use core::fmt::{self, Debug, Formatter};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// RSA private key bytes.
#[derive(Clone)]
pub struct RsaPrivateKey(Zeroizing<Vec<u8>>);

/// RSA public key bytes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RsaPublicKey(Vec<u8>);

impl RsaPrivateKey {
    /// Wraps the encoded key without parsing it.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        Ok(Self(Zeroizing::new(bytes.to_vec())))
    }
}

impl RsaPublicKey {
    /// Wraps the encoded key without parsing it.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        Ok(Self(bytes.to_vec()))
    }
}

impl Debug for RsaPrivateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaPrivateKey").finish_non_exhaustive()
    }
}

impl PartialEq for RsaPrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_slice().ct_eq(other.0.as_slice()).into()
    }
}

impl Eq for RsaPrivateKey {}

impl Key for RsaPrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Rsa
    }

    fn raw(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_vec())
    }
}

impl PrivKey for RsaPrivateKey {
    type Public = RsaPublicKey;

    fn sign(&self, _msg: &[u8]) -> Result<Vec<u8>> {
        Err(Error::Unsupported(KeyType::Rsa))
    }

    fn public_key(&self) -> Result<RsaPublicKey> {
        Err(Error::Unsupported(KeyType::Rsa))
    }
}

impl Key for RsaPublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Rsa
    }

    fn raw(&self) -> Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

impl PubKey for RsaPublicKey {
    fn verify(&self, _msg: &[u8], _sig: &[u8]) -> Result<bool> {
        Err(Error::Unsupported(KeyType::Rsa))
    }
}
