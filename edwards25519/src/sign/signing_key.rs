use super::{challenge, wide_scalar};
use crate::{
    EdwardsPoint, Error, Result, SECRET_KEY_LENGTH, Scalar, Signature, VerifyingKey,
};
use core::fmt::{self, Debug, Formatter};
use rand_core::CryptoRngCore;
use sha2::{Digest, Sha512};
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Length of the `seed || public key` keypair encoding.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + crate::PUBLIC_KEY_LENGTH;

/// Ed25519 signing key.
///
/// Holds the seed together with what RFC 8032 derives from it: the clamped
/// secret scalar, the nonce prefix and the public key.
#[derive(Clone)]
pub struct SigningKey {
    seed: [u8; SECRET_KEY_LENGTH],
    scalar: Scalar,
    prefix: [u8; 32],
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Expands a 32-byte seed into a signing key.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        let mut h = [0u8; 64];
        h.copy_from_slice(&Sha512::digest(seed));

        let mut scalar_bytes = [0u8; 32];
        scalar_bytes.copy_from_slice(&h[..32]);
        let scalar = Scalar::from_bytes_with_clamping(&scalar_bytes);

        let mut prefix = [0u8; 32];
        prefix.copy_from_slice(&h[32..]);

        h.zeroize();
        scalar_bytes.zeroize();

        let point = EdwardsPoint::scalar_base_mult(&scalar);
        Self {
            seed: *seed,
            scalar,
            prefix,
            verifying_key: VerifyingKey::from_point(point),
        }
    }

    /// Generates a signing key from a fresh random seed.
    pub fn generate(rng: &mut impl CryptoRngCore) -> Self {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        rng.fill_bytes(&mut seed);
        let key = Self::from_seed(&seed);
        seed.zeroize();
        key
    }

    /// Decodes `seed || public key`, checking that the public key is the
    /// one the seed derives.
    pub fn from_keypair_bytes(bytes: &[u8; KEYPAIR_LENGTH]) -> Result<Self> {
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&bytes[..SECRET_KEY_LENGTH]);
        let key = Self::from_seed(&seed);
        seed.zeroize();

        let public = &bytes[SECRET_KEY_LENGTH..];
        if bool::from(key.verifying_key.as_bytes()[..].ct_eq(public)) {
            Ok(key)
        } else {
            Err(Error::MismatchedPublicKey)
        }
    }

    /// Returns `seed || public key`.
    pub fn to_keypair_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut out = [0u8; KEYPAIR_LENGTH];
        out[..SECRET_KEY_LENGTH].copy_from_slice(&self.seed);
        out[SECRET_KEY_LENGTH..].copy_from_slice(self.verifying_key.as_bytes());
        out
    }

    /// Returns the seed.
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.seed
    }

    /// Borrows the seed.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.seed
    }

    /// The public half of this key.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }

    /// Signs `msg` (RFC 8032 § 5.1.6).
    pub fn sign(&self, msg: &[u8]) -> Signature {
        let digest = Sha512::new()
            .chain_update(self.prefix)
            .chain_update(msg)
            .finalize();
        let mut r = wide_scalar(&digest);

        let big_r = EdwardsPoint::scalar_base_mult(&r).to_bytes();
        let k = challenge(&big_r, self.verifying_key.as_bytes(), msg);
        let s = Scalar::mul_add(&k, &self.scalar, &r);
        r.zeroize();

        Signature {
            r: big_r,
            s: s.to_bytes(),
        }
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl Zeroize for SigningKey {
    fn zeroize(&mut self) {
        self.seed.zeroize();
        self.scalar.zeroize();
        self.prefix.zeroize();
    }
}

impl Drop for SigningKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl ZeroizeOnDrop for SigningKey {}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.seed.ct_eq(&other.seed)
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SigningKey {}

impl From<[u8; SECRET_KEY_LENGTH]> for SigningKey {
    fn from(seed: [u8; SECRET_KEY_LENGTH]) -> Self {
        Self::from_seed(&seed)
    }
}

impl TryFrom<&[u8]> for SigningKey {
    type Error = Error;

    fn try_from(seed: &[u8]) -> Result<Self> {
        let seed: &[u8; SECRET_KEY_LENGTH] = seed.try_into().map_err(|_| Error::InvalidLength)?;
        Ok(Self::from_seed(seed))
    }
}

#[cfg(feature = "signature")]
impl ::signature::Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> ::signature::Result<Signature> {
        Ok(SigningKey::sign(self, msg))
    }
}

#[cfg(feature = "signature")]
impl ::signature::Keypair for SigningKey {
    type VerifyingKey = VerifyingKey;

    fn verifying_key(&self) -> VerifyingKey {
        self.verifying_key
    }
}

#[cfg(test)]
mod tests {
    use super::SigningKey;
    use crate::Error;
    use hex_literal::hex;
    use rand_core::OsRng;
    use std::format;

    // RFC 8032 § 7.1, TEST 1
    const SEED: [u8; 32] = hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60");
    const PUBLIC: [u8; 32] =
        hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");

    #[test]
    fn derives_public_key() {
        let key = SigningKey::from_seed(&SEED);
        assert_eq!(key.verifying_key().to_bytes(), PUBLIC);
    }

    #[test]
    fn keypair_bytes() {
        let key = SigningKey::from_seed(&SEED);
        let bytes = key.to_keypair_bytes();
        assert_eq!(&bytes[..32], &SEED);
        assert_eq!(&bytes[32..], &PUBLIC);
        assert_eq!(SigningKey::from_keypair_bytes(&bytes).unwrap(), key);

        let mut tampered = bytes;
        tampered[40] ^= 1;
        assert_eq!(
            SigningKey::from_keypair_bytes(&tampered),
            Err(Error::MismatchedPublicKey)
        );
    }

    #[test]
    fn slice_conversion() {
        assert_eq!(
            SigningKey::try_from(&SEED[..31]),
            Err(Error::InvalidLength)
        );
        assert_eq!(SigningKey::try_from(&SEED[..]).unwrap().to_bytes(), SEED);
    }

    #[test]
    fn generated_keys_sign() {
        let key = SigningKey::generate(&mut OsRng);
        let sig = key.sign(b"message");
        assert!(key.verifying_key().verify(b"message", &sig));
    }

    #[test]
    fn debug_hides_secret() {
        let key = SigningKey::from_seed(&SEED);
        let debug = format!("{key:?}");
        assert!(!debug.contains("seed"));
        assert!(debug.contains("verifying_key"));
    }

    #[cfg(feature = "signature")]
    #[test]
    fn signature_traits() {
        use signature::{Keypair, Signer, Verifier};

        let key = SigningKey::from_seed(&SEED);
        let sig = key.try_sign(b"trait").unwrap();
        assert!(Keypair::verifying_key(&key).verify(b"trait", &sig));
        assert!(Verifier::verify(&key.verifying_key(), b"trait", &sig).is_ok());
        assert!(Verifier::verify(&key.verifying_key(), b"other", &sig).is_err());
    }
}
