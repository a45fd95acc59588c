//! secp256k1 secret keys.

use crate::{
    Error, PublicKey, Result,
    arithmetic::{JacobianPoint, Scalar},
    ecdsa::{self, COMPACT_SIZE, RecoveryId, Signature, recoverable::encode_compact},
};
use core::fmt;
use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[cfg(feature = "signature")]
use {
    sha2::{Digest, Sha256},
    signature::{
        Signer, Verifier,
        hazmat::{PrehashSigner, PrehashVerifier},
    },
};

/// A secp256k1 secret key: a scalar in `[1, n)`.
///
/// The scalar is zeroized when the key is dropped.
#[derive(Clone)]
pub struct SecretKey {
    scalar: Scalar,
}

impl SecretKey {
    /// Interprets `bytes` as a big-endian integer reduced modulo `n`.
    ///
    /// Slices longer than 32 bytes are truncated to their first 32 bytes.
    /// Fails when the result is zero.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let (scalar, _) = Scalar::set_byte_slice(bytes);
        Self::from_scalar(scalar)
    }

    /// Parses 32 big-endian bytes, reduced modulo `n`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        let (scalar, _) = Scalar::set_bytes(bytes);
        Self::from_scalar(scalar)
    }

    /// Wraps a nonzero scalar.
    pub fn from_scalar(scalar: Scalar) -> Result<Self> {
        if scalar.is_zero().into() {
            return Err(Error::ZeroSecretKey);
        }
        Ok(Self { scalar })
    }

    /// Generates a key uniformly at random, retrying on the negligible
    /// chance of drawing zero or a value `>= n`.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let mut bytes = [0u8; 32];
        loop {
            rng.fill_bytes(&mut bytes);
            let (scalar, overflow) = Scalar::set_bytes(&bytes);
            if !bool::from(overflow | scalar.is_zero()) {
                bytes.zeroize();
                return Self { scalar };
            }
        }
    }

    /// Big-endian encoding of the secret scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.scalar.to_bytes()
    }

    /// The secret scalar.
    pub fn as_scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// Derives the public key in constant time.
    pub fn public_key(&self) -> PublicKey {
        // a nonzero scalar never maps to the identity
        PublicKey::from_affine_unchecked(JacobianPoint::mul_base(&self.scalar).to_affine())
    }

    /// Signs a message hash, returning a low-S signature.
    pub fn sign(&self, hash: &[u8]) -> Signature {
        ecdsa::sign_prehashed(&self.scalar, hash).0
    }

    /// Signs a message hash and also returns the recovery id.
    pub fn sign_recoverable(&self, hash: &[u8]) -> (Signature, RecoveryId) {
        ecdsa::sign_prehashed(&self.scalar, hash)
    }

    /// Signs a message hash in the 65-byte compact form. `compressed`
    /// records which public key encoding the verifier should derive.
    pub fn sign_compact(&self, hash: &[u8], compressed: bool) -> [u8; COMPACT_SIZE] {
        let (signature, id) = ecdsa::sign_prehashed(&self.scalar, hash);
        encode_compact(&signature, id, compressed)
    }
}

impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.scalar.ct_eq(&other.scalar)
    }
}

impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SecretKey {}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

impl TryFrom<&[u8]> for SecretKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

#[cfg(feature = "signature")]
impl PrehashSigner<Signature> for SecretKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        Ok(self.sign(prehash))
    }
}

#[cfg(feature = "signature")]
impl Signer<Signature> for SecretKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        self.sign_prehash(&Sha256::digest(msg))
    }
}

#[cfg(feature = "signature")]
impl PrehashVerifier<Signature> for PublicKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        if signature.verify(prehash, self) {
            Ok(())
        } else {
            Err(signature::Error::new())
        }
    }
}

#[cfg(feature = "signature")]
impl Verifier<Signature> for PublicKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        self.verify_prehash(&Sha256::digest(msg), signature)
    }
}
