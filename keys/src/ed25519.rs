//! Ed25519 keys.

use crate::{Error, Key, KeyType, PrivKey, PubKey, Result};
use p2pcrypto_edwards25519::{
    self as edwards25519, KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, Signature,
    SigningKey, VerifyingKey,
};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

/// Older encoders appended a second copy of the public key to the keypair.
const REDUNDANT_KEYPAIR_LENGTH: usize = KEYPAIR_LENGTH + PUBLIC_KEY_LENGTH;

/// Ed25519 private key. The raw form is `seed || public key`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Ed25519PrivateKey(SigningKey);

/// Ed25519 public key. The raw form is the 32-byte point encoding.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Ed25519PublicKey(VerifyingKey);

impl Ed25519PrivateKey {
    /// Generates a key from a fresh random seed.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self(SigningKey::generate(rng))
    }

    /// Decodes a private key.
    ///
    /// Accepts a 32-byte seed, the 64-byte `seed || public key` form, and
    /// the 96-byte form with a redundant trailing public key. Public key
    /// bytes must match the seed.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            SECRET_KEY_LENGTH => {
                let key = SigningKey::try_from(bytes)?;
                Ok(Self(key))
            }
            KEYPAIR_LENGTH => Self::from_keypair(bytes),
            REDUNDANT_KEYPAIR_LENGTH => {
                let (keypair, redundant) = bytes.split_at(KEYPAIR_LENGTH);
                let public = &keypair[SECRET_KEY_LENGTH..];
                if !bool::from(public.ct_eq(redundant)) {
                    return Err(edwards25519::Error::MismatchedPublicKey.into());
                }
                Self::from_keypair(keypair)
            }
            _ => Err(edwards25519::Error::InvalidLength.into()),
        }
    }

    fn from_keypair(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; KEYPAIR_LENGTH] = bytes
            .try_into()
            .map_err(|_| Error::from(edwards25519::Error::InvalidLength))?;
        Ok(Self(SigningKey::from_keypair_bytes(bytes)?))
    }

    /// The underlying signing key.
    pub fn as_signing_key(&self) -> &SigningKey {
        &self.0
    }
}

impl Ed25519PublicKey {
    /// Decodes the 32-byte point encoding.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        Ok(Self(VerifyingKey::try_from(bytes)?))
    }

    /// The underlying verifying key.
    pub fn as_verifying_key(&self) -> &VerifyingKey {
        &self.0
    }
}

impl Key for Ed25519PrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn raw(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_keypair_bytes().to_vec())
    }
}

impl PrivKey for Ed25519PrivateKey {
    type Public = Ed25519PublicKey;

    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>> {
        Ok(self.0.sign(msg).to_bytes().to_vec())
    }

    fn public_key(&self) -> Result<Ed25519PublicKey> {
        Ok(Ed25519PublicKey(self.0.verifying_key()))
    }
}

impl Key for Ed25519PublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ed25519
    }

    fn raw(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_bytes().to_vec())
    }
}

impl PubKey for Ed25519PublicKey {
    fn verify(&self, msg: &[u8], sig: &[u8]) -> Result<bool> {
        let sig = Signature::from_slice(sig)?;
        Ok(self.0.verify(msg, &sig))
    }
}

impl From<SigningKey> for Ed25519PrivateKey {
    fn from(key: SigningKey) -> Self {
        Self(key)
    }
}

impl From<VerifyingKey> for Ed25519PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key)
    }
}
