//! secp256k1 public keys.

use crate::{
    Error, Result,
    arithmetic::{AffinePoint, FieldElement, JacobianPoint},
};
use subtle::Choice;

#[cfg(feature = "serde")]
use serdect::serde::{Deserialize, Serialize, de, ser};

/// Size of a compressed SEC1 encoding.
pub const COMPRESSED_SIZE: usize = 33;

/// Size of an uncompressed or hybrid SEC1 encoding.
pub const UNCOMPRESSED_SIZE: usize = 65;

const TAG_EVEN: u8 = 0x02;
const TAG_ODD: u8 = 0x03;
const TAG_UNCOMPRESSED: u8 = 0x04;
const TAG_HYBRID_EVEN: u8 = 0x06;
const TAG_HYBRID_ODD: u8 = 0x07;

/// A secp256k1 public key: a point on the curve other than the point at
/// infinity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Parses a SEC1 encoded public key.
    ///
    /// Accepts the 33-byte compressed form (`0x02`/`0x03`), the 65-byte
    /// uncompressed form (`0x04`) and the 65-byte hybrid form
    /// (`0x06`/`0x07`), whose prefix must match the parity of `y`.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.len() {
            COMPRESSED_SIZE => {
                let tag = bytes[0];
                if tag != TAG_EVEN && tag != TAG_ODD {
                    return Err(Error::InvalidPublicKeyPrefix);
                }

                let x = parse_coordinate(&bytes[1..33])?;
                let point = AffinePoint::decompress(&x, Choice::from(tag & 1));
                Option::<AffinePoint>::from(point)
                    .map(|point| Self { point })
                    .ok_or(Error::NoSquareRoot)
            }
            UNCOMPRESSED_SIZE => {
                let tag = bytes[0];
                if tag != TAG_UNCOMPRESSED && tag != TAG_HYBRID_EVEN && tag != TAG_HYBRID_ODD {
                    return Err(Error::InvalidPublicKeyPrefix);
                }

                let x = parse_coordinate(&bytes[1..33])?;
                let y = parse_coordinate(&bytes[33..65])?;
                if tag != TAG_UNCOMPRESSED && y.is_odd().unwrap_u8() != tag & 1 {
                    return Err(Error::MismatchedParity);
                }

                Option::<AffinePoint>::from(AffinePoint::from_coordinates(&x, &y))
                    .map(|point| Self { point })
                    .ok_or(Error::NotOnCurve)
            }
            _ => Err(Error::InvalidLength),
        }
    }

    /// Wraps a point, failing for the point at infinity.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if point.is_identity().into() {
            return Err(Error::NotOnCurve);
        }
        Ok(Self { point })
    }

    pub(crate) fn from_affine_unchecked(point: AffinePoint) -> Self {
        debug_assert!(!bool::from(point.is_identity()));
        Self { point }
    }

    /// Returns the 33-byte compressed SEC1 encoding.
    pub fn to_compressed(&self) -> [u8; COMPRESSED_SIZE] {
        let mut out = [0u8; COMPRESSED_SIZE];
        out[0] = TAG_EVEN | self.point.y.is_odd().unwrap_u8();
        out[1..].copy_from_slice(&self.point.x.to_bytes());
        out
    }

    /// Returns the 65-byte uncompressed SEC1 encoding.
    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_SIZE] {
        let mut out = [0u8; UNCOMPRESSED_SIZE];
        out[0] = TAG_UNCOMPRESSED;
        out[1..33].copy_from_slice(&self.point.x.to_bytes());
        out[33..].copy_from_slice(&self.point.y.to_bytes());
        out
    }

    /// The affine point of this key.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    pub(crate) fn to_jacobian(self) -> JacobianPoint {
        JacobianPoint::from_affine(&self.point)
    }
}

/// Parses a 32-byte big-endian coordinate, rejecting values `>= p`.
fn parse_coordinate(bytes: &[u8]) -> Result<FieldElement> {
    let (fe, overflow) = FieldElement::set_byte_slice(bytes);
    if overflow.into() {
        return Err(Error::CoordinateOverflow);
    }
    Ok(fe)
}

impl From<PublicKey> for AffinePoint {
    fn from(public_key: PublicKey) -> AffinePoint {
        public_key.point
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_sec1_bytes(bytes)
    }
}

#[cfg(feature = "serde")]
impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_upper_or_bin(&self.to_compressed(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; COMPRESSED_SIZE];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_sec1_bytes(&bytes).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::PublicKey;
    use crate::{Error, ErrorKind};
    use hex_literal::hex;

    const G_COMPRESSED: [u8; 33] =
        hex!("0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798");
    const G_UNCOMPRESSED: [u8; 65] = hex!(
        "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798"
        "483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8"
    );

    #[test]
    fn compressed_and_uncompressed_agree() {
        let a = PublicKey::from_sec1_bytes(&G_COMPRESSED).unwrap();
        let b = PublicKey::from_sec1_bytes(&G_UNCOMPRESSED).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_compressed(), G_COMPRESSED);
        assert_eq!(a.to_uncompressed(), G_UNCOMPRESSED);
    }

    #[test]
    fn odd_prefix_selects_negated_point() {
        let mut bytes = G_COMPRESSED;
        bytes[0] = 0x03;
        let key = PublicKey::from_sec1_bytes(&bytes).unwrap();
        assert_eq!(key.as_affine(), &crate::AffinePoint::GENERATOR.negate());
        assert_eq!(key.to_compressed(), bytes);
    }

    #[test]
    fn hybrid_encoding() {
        // G has an even y
        let mut bytes = G_UNCOMPRESSED;
        bytes[0] = 0x06;
        assert!(PublicKey::from_sec1_bytes(&bytes).is_ok());
        bytes[0] = 0x07;
        assert_eq!(PublicKey::from_sec1_bytes(&bytes), Err(Error::MismatchedParity));
    }

    #[test]
    fn malformed_encodings() {
        assert_eq!(PublicKey::from_sec1_bytes(&[]), Err(Error::InvalidLength));
        assert_eq!(PublicKey::from_sec1_bytes(&G_COMPRESSED[..32]), Err(Error::InvalidLength));

        let mut bytes = G_COMPRESSED;
        bytes[0] = 0x04;
        let err = PublicKey::from_sec1_bytes(&bytes).unwrap_err();
        assert_eq!(err, Error::InvalidPublicKeyPrefix);
        assert_eq!(err.kind(), ErrorKind::Malformed);

        let mut bytes = G_UNCOMPRESSED;
        bytes[0] = 0x05;
        assert_eq!(PublicKey::from_sec1_bytes(&bytes), Err(Error::InvalidPublicKeyPrefix));
    }

    #[test]
    fn invalid_points() {
        let mut bytes = [0xffu8; 33];
        bytes[0] = 0x02;
        let err = PublicKey::from_sec1_bytes(&bytes).unwrap_err();
        assert_eq!(err, Error::CoordinateOverflow);
        assert_eq!(err.kind(), ErrorKind::Invalid);

        // x = 5 has no point: 5^3 + 7 = 132 is not a square mod p
        let mut bytes = [0u8; 33];
        bytes[0] = 0x02;
        bytes[32] = 5;
        let err = PublicKey::from_sec1_bytes(&bytes).unwrap_err();
        assert_eq!(err, Error::NoSquareRoot);
        assert_eq!(err.kind(), ErrorKind::Invalid);

        let mut bytes = G_UNCOMPRESSED;
        bytes[64] ^= 1;
        assert_eq!(PublicKey::from_sec1_bytes(&bytes), Err(Error::NotOnCurve));
    }

    #[test]
    fn identity_is_rejected() {
        assert_eq!(
            PublicKey::from_affine(crate::AffinePoint::IDENTITY),
            Err(Error::NotOnCurve)
        );
    }
}
