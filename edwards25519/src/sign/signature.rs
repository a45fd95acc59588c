use crate::{Error, Result, SIGNATURE_LENGTH};

#[cfg(feature = "serde")]
use serdect::serde::{Deserialize, Serialize, de, ser};

/// Ed25519 signature: the encoded commitment `R` followed by the scalar `S`.
///
/// Decoding only checks the length. Whether `S` is reduced is decided at
/// verification time.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature {
    pub(crate) r: [u8; 32],
    pub(crate) s: [u8; 32],
}

impl Signature {
    /// Splits a 64-byte encoding into `R` and `S`.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Self { r, s }
    }

    /// Parses a signature from a slice, which must be exactly 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; SIGNATURE_LENGTH] =
            bytes.try_into().map_err(|_| Error::InvalidLength)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Returns `R || S`.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut out = [0u8; SIGNATURE_LENGTH];
        out[..32].copy_from_slice(&self.r);
        out[32..].copy_from_slice(&self.s);
        out
    }

    /// The encoded commitment point.
    pub fn r_bytes(&self) -> &[u8; 32] {
        &self.r
    }

    /// The encoded response scalar.
    pub fn s_bytes(&self) -> &[u8; 32] {
        &self.s
    }
}

impl From<[u8; SIGNATURE_LENGTH]> for Signature {
    fn from(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self::from_bytes(&bytes)
    }
}

impl From<Signature> for [u8; SIGNATURE_LENGTH] {
    fn from(signature: Signature) -> Self {
        signature.to_bytes()
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

#[cfg(feature = "signature")]
impl ::signature::SignatureEncoding for Signature {
    type Repr = [u8; SIGNATURE_LENGTH];
}

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_lower_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Ok(Self::from_bytes(&bytes))
    }
}
