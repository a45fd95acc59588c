//! ECDSA keys over secp256k1.

use crate::{Key, KeyType, PrivKey, PubKey, Result};
use p2pcrypto_secp256k1::{PublicKey, SecretKey, ecdsa::Signature};
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha256};

/// secp256k1 private key. The raw form is the 32-byte big-endian scalar.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Secp256k1PrivateKey(SecretKey);

/// secp256k1 public key. The raw form is the 33-byte compressed encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Secp256k1PublicKey(PublicKey);

impl Secp256k1PrivateKey {
    /// Generates a uniformly random non-zero key.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self(SecretKey::random(rng))
    }

    /// Decodes a 32-byte big-endian scalar.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; 32] = bytes
            .try_into()
            .map_err(|_| p2pcrypto_secp256k1::Error::InvalidLength)?;
        Ok(Self(SecretKey::from_bytes(bytes)?))
    }

    /// The underlying secret key.
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.0
    }
}

impl Secp256k1PublicKey {
    /// Decodes a SEC1 encoding. Compressed, uncompressed and hybrid forms
    /// are accepted.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        Ok(Self(PublicKey::from_sec1_bytes(bytes)?))
    }

    /// The underlying public key.
    pub fn as_public_key(&self) -> &PublicKey {
        &self.0
    }
}

impl Key for Secp256k1PrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn raw(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_bytes().to_vec())
    }
}

impl PrivKey for Secp256k1PrivateKey {
    type Public = Secp256k1PublicKey;

    /// Signs `SHA-256(msg)` and returns the DER encoding.
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>> {
        let hash = Sha256::digest(msg);
        Ok(self.0.sign(&hash).to_der().as_bytes().to_vec())
    }

    fn public_key(&self) -> Result<Secp256k1PublicKey> {
        Ok(Secp256k1PublicKey(self.0.public_key()))
    }
}

impl Key for Secp256k1PublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Secp256k1
    }

    fn raw(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_compressed().to_vec())
    }
}

impl PubKey for Secp256k1PublicKey {
    fn verify(&self, msg: &[u8], sig: &[u8]) -> Result<bool> {
        let sig = Signature::from_der(sig)?;
        let hash = Sha256::digest(msg);
        Ok(sig.verify(&hash, &self.0))
    }
}

impl From<SecretKey> for Secp256k1PrivateKey {
    fn from(key: SecretKey) -> Self {
        Self(key)
    }
}

impl From<PublicKey> for Secp256k1PublicKey {
    fn from(key: PublicKey) -> Self {
        Self(key)
    }
}
