//! ECDSA keys over NIST P-256, backed by the `p256` crate.

use crate::{Key, KeyType, PrivKey, PubKey, Result};
use p256::{
    PublicKey, SecretKey,
    ecdsa::{
        Signature, SigningKey, VerifyingKey,
        signature::{Signer, Verifier},
    },
    pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePrivateKey, EncodePublicKey},
};
use rand_core::CryptoRngCore;

/// P-256 private key. The raw form is a PKCS#8 DER document.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EcdsaPrivateKey(SecretKey);

/// P-256 public key. The raw form is a PKIX `SubjectPublicKeyInfo` DER
/// document.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EcdsaPublicKey(PublicKey);

impl EcdsaPrivateKey {
    /// Generates a uniformly random key.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        Self(SecretKey::random(rng))
    }

    /// Decodes a PKCS#8 DER document.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        Ok(Self(SecretKey::from_pkcs8_der(bytes)?))
    }
}

impl EcdsaPublicKey {
    /// Decodes a PKIX DER document.
    pub fn from_raw(bytes: &[u8]) -> Result<Self> {
        Ok(Self(PublicKey::from_public_key_der(bytes)?))
    }
}

impl Key for EcdsaPrivateKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ecdsa
    }

    fn raw(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_pkcs8_der()?.as_bytes().to_vec())
    }
}

impl PrivKey for EcdsaPrivateKey {
    type Public = EcdsaPublicKey;

    /// Signs `SHA-256(msg)` and returns the ASN.1 DER encoding.
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>> {
        let signing_key = SigningKey::from(&self.0);
        let sig: Signature = signing_key.try_sign(msg)?;
        Ok(sig.to_der().as_bytes().to_vec())
    }

    fn public_key(&self) -> Result<EcdsaPublicKey> {
        Ok(EcdsaPublicKey(self.0.public_key()))
    }
}

impl Key for EcdsaPublicKey {
    fn key_type(&self) -> KeyType {
        KeyType::Ecdsa
    }

    fn raw(&self) -> Result<Vec<u8>> {
        Ok(self.0.to_public_key_der()?.as_bytes().to_vec())
    }
}

impl PubKey for EcdsaPublicKey {
    fn verify(&self, msg: &[u8], sig: &[u8]) -> Result<bool> {
        let sig = Signature::from_der(sig)?;
        let verifying_key = VerifyingKey::from(&self.0);
        Ok(verifying_key.verify(msg, &sig).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::{EcdsaPrivateKey, EcdsaPublicKey};
    use crate::{Error, Key, PrivKey, PubKey};
    use rand_core::OsRng;

    #[test]
    fn raw_round_trip() {
        let key = EcdsaPrivateKey::generate(&mut OsRng);
        let raw = key.raw().unwrap();
        assert_eq!(EcdsaPrivateKey::from_raw(&raw).unwrap(), key);

        let public = key.public_key().unwrap();
        let raw = public.raw().unwrap();
        assert_eq!(raw[0], 0x30);
        assert_eq!(EcdsaPublicKey::from_raw(&raw).unwrap(), public);
    }

    #[test]
    fn sign_and_verify() {
        let key = EcdsaPrivateKey::generate(&mut OsRng);
        let public = key.public_key().unwrap();
        let sig = key.sign(b"message").unwrap();

        assert_eq!(public.verify(b"message", &sig), Ok(true));
        assert_eq!(public.verify(b"other", &sig), Ok(false));
        assert_eq!(public.verify(b"message", &[0x30, 0x00]), Err(Error::Backend));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(EcdsaPrivateKey::from_raw(&[0; 16]), Err(Error::Backend));
        assert_eq!(EcdsaPublicKey::from_raw(&[0; 16]), Err(Error::Backend));
    }
}
