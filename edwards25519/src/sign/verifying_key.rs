use super::challenge;
use crate::{EdwardsPoint, Error, PUBLIC_KEY_LENGTH, Result, Scalar, Signature};

#[cfg(feature = "serde")]
use serdect::serde::{Deserialize, Serialize, de, ser};

/// Ed25519 public key.
///
/// Keeps the encoding it was decoded from, since that is what the
/// challenge hash commits to.
#[derive(Clone, Copy, Debug, Eq)]
pub struct VerifyingKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
    point: EdwardsPoint,
}

impl VerifyingKey {
    pub(crate) fn from_point(point: EdwardsPoint) -> Self {
        Self {
            bytes: point.to_bytes(),
            point,
        }
    }

    /// Decodes a public key.
    ///
    /// The encoding is decoded leniently: an unreduced y coordinate is
    /// accepted.
    pub fn from_bytes(bytes: &[u8; PUBLIC_KEY_LENGTH]) -> Result<Self> {
        let point = EdwardsPoint::from_bytes(bytes)?;
        Ok(Self {
            bytes: *bytes,
            point,
        })
    }

    /// Returns the encoding.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.bytes
    }

    /// Borrows the encoding.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// The decoded point `A`.
    pub fn to_point(&self) -> EdwardsPoint {
        self.point
    }

    /// Verifies `signature` over `msg` (RFC 8032 § 5.1.7).
    ///
    /// Fails when `S` is not reduced modulo `l`.
    pub fn verify(&self, msg: &[u8], signature: &Signature) -> bool {
        // S < l < 2^253
        if signature.s[31] & 0xe0 != 0 {
            return false;
        }
        let s = match Scalar::from_canonical_bytes(&signature.s) {
            Ok(s) => s,
            Err(_) => return false,
        };

        let k = challenge(&signature.r, &self.bytes, msg);
        let minus_a = self.point.negate();
        let r = EdwardsPoint::var_time_double_scalar_base_mult(&k, &minus_a, &s);
        r.to_bytes() == signature.r
    }
}

impl PartialEq for VerifyingKey {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl TryFrom<&[u8]> for VerifyingKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; PUBLIC_KEY_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidLength)?;
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for VerifyingKey {
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&crate::SigningKey> for VerifyingKey {
    fn from(signing_key: &crate::SigningKey) -> Self {
        signing_key.verifying_key()
    }
}

#[cfg(feature = "signature")]
impl ::signature::Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> ::signature::Result<()> {
        if VerifyingKey::verify(self, msg, signature) {
            Ok(())
        } else {
            Err(::signature::Error::new())
        }
    }
}

#[cfg(feature = "serde")]
impl Serialize for VerifyingKey {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.bytes, serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for VerifyingKey {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::VerifyingKey;
    use crate::{Error, SigningKey};

    #[test]
    fn rejects_bad_lengths_and_points() {
        assert_eq!(
            VerifyingKey::try_from(&[0u8; 31][..]),
            Err(Error::InvalidLength)
        );
        let mut two = [0u8; 32];
        two[0] = 2;
        assert_eq!(VerifyingKey::from_bytes(&two), Err(Error::InvalidPoint));
    }

    #[test]
    fn rejects_high_bits_in_s() {
        let key = SigningKey::from_seed(&[7; 32]);
        let sig = key.sign(b"msg");
        let mut bytes = sig.to_bytes();
        bytes[63] |= 0x80;
        let tampered = crate::Signature::from_bytes(&bytes);
        assert!(!key.verifying_key().verify(b"msg", &tampered));
    }
}
