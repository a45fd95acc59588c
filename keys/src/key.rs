//! Algorithm-tagged keys.

use crate::{
    EcdsaPrivateKey, EcdsaPublicKey, Ed25519PrivateKey, Ed25519PublicKey, Error, Key, KeyType,
    PrivKey, PubKey, Result, RsaPrivateKey, RsaPublicKey, Secp256k1PrivateKey,
    Secp256k1PublicKey,
};
use log::{debug, trace};
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;

/// A private key of any supported algorithm.
#[derive(Clone, Debug)]
pub enum PrivateKey {
    /// RSA
    Rsa(RsaPrivateKey),
    /// Ed25519
    Ed25519(Ed25519PrivateKey),
    /// ECDSA over secp256k1
    Secp256k1(Secp256k1PrivateKey),
    /// ECDSA over NIST P-256
    Ecdsa(EcdsaPrivateKey),
}

/// A public key of any supported algorithm.
#[derive(Clone, Debug)]
pub enum PublicKey {
    /// RSA
    Rsa(RsaPublicKey),
    /// Ed25519
    Ed25519(Ed25519PublicKey),
    /// ECDSA over secp256k1
    Secp256k1(Secp256k1PublicKey),
    /// ECDSA over NIST P-256
    Ecdsa(EcdsaPublicKey),
}

impl Key for PrivateKey {
    fn key_type(&self) -> KeyType {
        match self {
            PrivateKey::Rsa(key) => key.key_type(),
            PrivateKey::Ed25519(key) => key.key_type(),
            PrivateKey::Secp256k1(key) => key.key_type(),
            PrivateKey::Ecdsa(key) => key.key_type(),
        }
    }

    fn raw(&self) -> Result<Vec<u8>> {
        match self {
            PrivateKey::Rsa(key) => key.raw(),
            PrivateKey::Ed25519(key) => key.raw(),
            PrivateKey::Secp256k1(key) => key.raw(),
            PrivateKey::Ecdsa(key) => key.raw(),
        }
    }
}

impl PrivKey for PrivateKey {
    type Public = PublicKey;

    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>> {
        match self {
            PrivateKey::Rsa(key) => key.sign(msg),
            PrivateKey::Ed25519(key) => key.sign(msg),
            PrivateKey::Secp256k1(key) => key.sign(msg),
            PrivateKey::Ecdsa(key) => key.sign(msg),
        }
    }

    fn public_key(&self) -> Result<PublicKey> {
        Ok(match self {
            PrivateKey::Rsa(key) => PublicKey::Rsa(key.public_key()?),
            PrivateKey::Ed25519(key) => PublicKey::Ed25519(key.public_key()?),
            PrivateKey::Secp256k1(key) => PublicKey::Secp256k1(key.public_key()?),
            PrivateKey::Ecdsa(key) => PublicKey::Ecdsa(key.public_key()?),
        })
    }
}

impl Key for PublicKey {
    fn key_type(&self) -> KeyType {
        match self {
            PublicKey::Rsa(key) => key.key_type(),
            PublicKey::Ed25519(key) => key.key_type(),
            PublicKey::Secp256k1(key) => key.key_type(),
            PublicKey::Ecdsa(key) => key.key_type(),
        }
    }

    fn raw(&self) -> Result<Vec<u8>> {
        match self {
            PublicKey::Rsa(key) => key.raw(),
            PublicKey::Ed25519(key) => key.raw(),
            PublicKey::Secp256k1(key) => key.raw(),
            PublicKey::Ecdsa(key) => key.raw(),
        }
    }
}

impl PubKey for PublicKey {
    fn verify(&self, msg: &[u8], sig: &[u8]) -> Result<bool> {
        match self {
            PublicKey::Rsa(key) => key.verify(msg, sig),
            PublicKey::Ed25519(key) => key.verify(msg, sig),
            PublicKey::Secp256k1(key) => key.verify(msg, sig),
            PublicKey::Ecdsa(key) => key.verify(msg, sig),
        }
    }
}

/// Keys are equal when their types and raw encodings are.
impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        if self.key_type() != other.key_type() {
            return false;
        }
        match (self.raw(), other.raw()) {
            (Ok(a), Ok(b)) => a.ct_eq(&b).into(),
            _ => false,
        }
    }
}

impl Eq for PrivateKey {}

/// Keys are equal when their types and raw encodings are.
impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        if self.key_type() != other.key_type() {
            return false;
        }
        match (self.raw(), other.raw()) {
            (Ok(a), Ok(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for PublicKey {}

macro_rules! impl_from_key {
    ($outer:ident, $variant:ident, $inner:ty) => {
        impl From<$inner> for $outer {
            fn from(key: $inner) -> Self {
                $outer::$variant(key)
            }
        }
    };
}

impl_from_key!(PrivateKey, Rsa, RsaPrivateKey);
impl_from_key!(PrivateKey, Ed25519, Ed25519PrivateKey);
impl_from_key!(PrivateKey, Secp256k1, Secp256k1PrivateKey);
impl_from_key!(PrivateKey, Ecdsa, EcdsaPrivateKey);
impl_from_key!(PublicKey, Rsa, RsaPublicKey);
impl_from_key!(PublicKey, Ed25519, Ed25519PublicKey);
impl_from_key!(PublicKey, Secp256k1, Secp256k1PublicKey);
impl_from_key!(PublicKey, Ecdsa, EcdsaPublicKey);

/// Generates a key pair of the given type.
///
/// RSA generation is not available.
pub fn generate_key_pair(
    key_type: KeyType,
    rng: &mut impl CryptoRngCore,
) -> Result<(PrivateKey, PublicKey)> {
    trace!("generating {key_type} key pair");
    let private = match key_type {
        KeyType::Rsa => return Err(Error::Unsupported(KeyType::Rsa)),
        KeyType::Ed25519 => PrivateKey::Ed25519(Ed25519PrivateKey::generate(rng)),
        KeyType::Secp256k1 => PrivateKey::Secp256k1(Secp256k1PrivateKey::generate(rng)),
        KeyType::Ecdsa => PrivateKey::Ecdsa(EcdsaPrivateKey::generate(rng)),
    };
    let public = private.public_key()?;
    Ok((private, public))
}

/// Decodes the raw form of a private key of the given type.
pub fn unmarshal_private_key(key_type: KeyType, raw: &[u8]) -> Result<PrivateKey> {
    let key = match key_type {
        KeyType::Rsa => RsaPrivateKey::from_raw(raw).map(PrivateKey::Rsa),
        KeyType::Ed25519 => Ed25519PrivateKey::from_raw(raw).map(PrivateKey::Ed25519),
        KeyType::Secp256k1 => Secp256k1PrivateKey::from_raw(raw).map(PrivateKey::Secp256k1),
        KeyType::Ecdsa => EcdsaPrivateKey::from_raw(raw).map(PrivateKey::Ecdsa),
    };
    key.inspect_err(|err| debug!("rejected {key_type} private key: {err}"))
}

/// Decodes the raw form of a public key of the given type.
pub fn unmarshal_public_key(key_type: KeyType, raw: &[u8]) -> Result<PublicKey> {
    let key = match key_type {
        KeyType::Rsa => RsaPublicKey::from_raw(raw).map(PublicKey::Rsa),
        KeyType::Ed25519 => Ed25519PublicKey::from_raw(raw).map(PublicKey::Ed25519),
        KeyType::Secp256k1 => Secp256k1PublicKey::from_raw(raw).map(PublicKey::Secp256k1),
        KeyType::Ecdsa => EcdsaPublicKey::from_raw(raw).map(PublicKey::Ecdsa),
    };
    key.inspect_err(|err| debug!("rejected {key_type} public key: {err}"))
}
