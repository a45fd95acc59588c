//! Elliptic Curve Digital Signature Algorithm (ECDSA)
//!
//! Signatures use deterministic [RFC6979] nonces and are always produced
//! with a low `s` value. Verification accepts either `s`.
//!
//! [RFC6979]: https://datatracker.ietf.org/doc/html/rfc6979

mod der;
pub mod recoverable;

pub use self::{
    der::{DerSignature, MAX_SIG_LEN},
    recoverable::{COMPACT_SIZE, RecoveryId, recover_compact},
};

use crate::{
    Error, PublicKey, Result,
    arithmetic::{
        FieldElement, JacobianPoint, Scalar, scalar_base_mult_non_const, scalar_mult_non_const,
    },
    nonce::nonce_rfc6979,
};
use subtle::ConditionallySelectable;
use zeroize::Zeroize;

#[cfg(feature = "serde")]
use serdect::serde::{Deserialize, Serialize, de, ser};

/// Size of the fixed-width `r || s` encoding.
pub const SIGNATURE_SIZE: usize = 64;

/// ECDSA/secp256k1 signature
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature {
    r: Scalar,
    s: Scalar,
}

impl Signature {
    /// Creates a signature from its components without validating them.
    pub fn new(r: Scalar, s: Scalar) -> Self {
        Self { r, s }
    }

    /// The `r` component.
    pub fn r(&self) -> &Scalar {
        &self.r
    }

    /// The `s` component.
    pub fn s(&self) -> &Scalar {
        &self.s
    }

    /// Parses the 64-byte `r || s` form. Both components must be in
    /// `[1, n)`.
    pub fn from_bytes(bytes: &[u8; SIGNATURE_SIZE]) -> Result<Self> {
        let r = parse_component(&bytes[..32], Error::ROverflowsOrder, Error::ZeroR)?;
        let s = parse_component(&bytes[32..], Error::SOverflowsOrder, Error::ZeroS)?;
        Ok(Self { r, s })
    }

    /// Parses the 64-byte `r || s` form from a slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes = <&[u8; SIGNATURE_SIZE]>::try_from(bytes).map_err(|_| Error::InvalidLength)?;
        Self::from_bytes(bytes)
    }

    /// Returns the 64-byte `r || s` form.
    pub fn to_bytes(&self) -> [u8; SIGNATURE_SIZE] {
        let mut out = [0u8; SIGNATURE_SIZE];
        out[..32].copy_from_slice(&self.r.to_bytes());
        out[32..].copy_from_slice(&self.s.to_bytes());
        out
    }

    /// Returns the equivalent signature with `s <= n / 2`.
    pub fn normalize_s(&self) -> Self {
        let high = self.s.is_over_half_order();
        Self {
            r: self.r,
            s: Scalar::conditional_select(&self.s, &self.s.negate(), high),
        }
    }

    /// Checks the signature against a message hash and public key.
    ///
    /// The hash is reduced like RFC6979 `bits2int`: only its first 32 bytes
    /// are used. Runs in variable time.
    pub fn verify(&self, hash: &[u8], public_key: &PublicKey) -> bool {
        if bool::from(self.r.is_zero() | self.s.is_zero()) {
            return false;
        }

        let e = Scalar::set_byte_slice(hash).0;
        let w = self.s.invert();
        let u1 = e.mul(&w);
        let u2 = self.r.mul(&w);

        let x = scalar_base_mult_non_const(&u1)
            .add_non_const(&scalar_mult_non_const(&u2, &public_key.to_jacobian()));
        if x.is_identity().into() {
            return false;
        }

        // Compare in Jacobian form: x(X) == r  <=>  X.x == r * z².
        let z2 = x.z.square();
        let x_coord = x.x.normalize();
        let r = FieldElement::set_bytes(&self.r.to_bytes()).0;
        if r.mul(&z2).normalize() == x_coord {
            return true;
        }

        // R.x may have been reduced modulo n.
        if r.is_gt_or_eq_prime_minus_order().into() {
            return false;
        }
        r.add(&FieldElement::ORDER).mul(&z2).normalize() == x_coord
    }
}

/// Parses a big-endian component, which must be in `[1, n)`.
fn parse_component(bytes: &[u8], overflow_err: Error, zero_err: Error) -> Result<Scalar> {
    let (scalar, overflow) = Scalar::set_byte_slice(bytes);
    if bytes.len() > 32 || bool::from(overflow) {
        return Err(overflow_err);
    }
    if scalar.is_zero().into() {
        return Err(zero_err);
    }
    Ok(scalar)
}

/// Signs a message hash with RFC6979 nonces, returning a low-S signature
/// together with the recovery id of the nonce point.
pub(crate) fn sign_prehashed(secret: &Scalar, hash: &[u8]) -> (Signature, RecoveryId) {
    let mut secret_bytes = secret.to_bytes();
    let e = Scalar::set_byte_slice(hash).0;

    let mut iteration = 0u32;
    let result = loop {
        let mut k = nonce_rfc6979(&secret_bytes, hash, &[], &[], iteration);
        iteration += 1;

        let big_r = JacobianPoint::mul_base(&k).to_affine();
        let (r, x_reduced) = Scalar::set_bytes(&big_r.x().to_bytes());
        if r.is_zero().into() {
            k.zeroize();
            continue;
        }

        let s = k.invert().mul(&e.add(&secret.mul(&r)));
        k.zeroize();
        if s.is_zero().into() {
            continue;
        }

        let high = s.is_over_half_order();
        let s = Scalar::conditional_select(&s, &s.negate(), high);
        let y_odd = big_r.y().is_odd() ^ high;

        break (
            Signature { r, s },
            RecoveryId::new(y_odd.into(), x_reduced.into()),
        );
    };

    secret_bytes.zeroize();
    result
}

impl From<Signature> for [u8; SIGNATURE_SIZE] {
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

#[cfg(feature = "serde")]
impl Serialize for Signature {
    fn serialize<S>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serdect::array::serialize_hex_upper_or_bin(&self.to_bytes(), serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let mut bytes = [0u8; SIGNATURE_SIZE];
        serdect::array::deserialize_hex_or_bin(&mut bytes, deserializer)?;
        Self::from_bytes(&bytes).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::{Signature, sign_prehashed};
    use crate::{Error, ErrorKind, PublicKey, Scalar, SecretKey};
    use hex_literal::hex;
    use proptest::prelude::*;
    use sha2::{Digest, Sha256};

    struct SignVector {
        key: [u8; 32],
        msg: &'static [u8],
        r: [u8; 32],
        s: [u8; 32],
        y_odd: bool,
    }

    const SIGN_VECTORS: &[SignVector] = &[
        SignVector {
            key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
            msg: b"Satoshi Nakamoto",
            r: hex!("934b1ea10a4b3c1757e2b0c017d0b6143ce3c9a7e6a4a49860d7a6ab210ee3d8"),
            s: hex!("2442ce9d2b916064108014783e923ec36b49743e2ffa1c4496f01a512aafd9e5"),
            y_odd: true,
        },
        SignVector {
            key: hex!("0000000000000000000000000000000000000000000000000000000000000001"),
            msg: b"All those moments will be lost in time, like tears in rain. Time to die...",
            r: hex!("8600dbd41e348fe5c9465ab92d23e3db8b98b873beecd930736488696438cb6b"),
            s: hex!("547fe64427496db33bf66019dacbf0039c04199abb0122918601db38a72cfc21"),
            y_odd: false,
        },
        SignVector {
            key: hex!("fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364140"),
            msg: b"Satoshi Nakamoto",
            r: hex!("fd567d121db66e382991534ada77a6bd3106f0a1098c231e47993447cd6af2d0"),
            s: hex!("6b39cd0eb1bc8603e159ef5c20a5c8ad685a45b06ce9bebed3f153d10d93bed5"),
            y_odd: false,
        },
        SignVector {
            key: hex!("f8b8af8ce3c7cca5e300d33939540c10d45ce001b8f252bfbc57ba0342904181"),
            msg: b"Alan Turing",
            r: hex!("7063ae83e7f62bbb171798131b4a0564b956930092b33b07b395615d9ec7e15c"),
            s: hex!("58dfcc1e00a35e1572f366ffe34ba0fc47db1e7189759b9fb233c5b05ab388ea"),
            y_odd: false,
        },
    ];

    #[test]
    fn rfc6979_signatures() {
        for vector in SIGN_VECTORS {
            let secret = SecretKey::from_bytes(&vector.key).unwrap();
            let hash = Sha256::digest(vector.msg);

            let (sig, id) = sign_prehashed(secret.as_scalar(), &hash);
            assert_eq!(sig.r().to_bytes(), vector.r);
            assert_eq!(sig.s().to_bytes(), vector.s);
            assert_eq!(id.is_y_odd(), vector.y_odd);
            assert!(!id.is_x_reduced());
            assert!(sig.verify(&hash, &secret.public_key()));
        }
    }

    #[test]
    fn verify_rejects_mismatches() {
        let secret = SecretKey::from_bytes(&SIGN_VECTORS[0].key).unwrap();
        let other = SecretKey::from_bytes(&SIGN_VECTORS[3].key).unwrap();
        let hash = Sha256::digest(SIGN_VECTORS[0].msg);
        let sig = secret.sign(&hash);

        assert!(!sig.verify(&Sha256::digest(b"Satoshi Nakamoto!"), &secret.public_key()));
        assert!(!sig.verify(&hash, &other.public_key()));
        assert!(!Signature::new(*sig.r(), sig.s().add(&Scalar::ONE)).verify(&hash, &secret.public_key()));
        assert!(!Signature::new(Scalar::ZERO, *sig.s()).verify(&hash, &secret.public_key()));
        assert!(!Signature::new(*sig.r(), Scalar::ZERO).verify(&hash, &secret.public_key()));
    }

    #[test]
    fn verify_accepts_high_s() {
        let secret = SecretKey::from_bytes(&SIGN_VECTORS[1].key).unwrap();
        let hash = Sha256::digest(SIGN_VECTORS[1].msg);
        let sig = secret.sign(&hash);
        let high = Signature::new(*sig.r(), sig.s().negate());

        assert!(bool::from(high.s().is_over_half_order()));
        assert!(high.verify(&hash, &secret.public_key()));
        assert_eq!(high.normalize_s(), sig);
    }

    #[test]
    fn fixed_width_encoding() {
        let v = &SIGN_VECTORS[0];
        let mut bytes = [0u8; 64];
        bytes[..32].copy_from_slice(&v.r);
        bytes[32..].copy_from_slice(&v.s);

        let sig = Signature::from_bytes(&bytes).unwrap();
        assert_eq!(sig.to_bytes(), bytes);
        assert_eq!(Signature::from_slice(&bytes[..63]), Err(Error::InvalidLength));

        let mut zero_r = bytes;
        zero_r[..32].fill(0);
        assert_eq!(Signature::from_bytes(&zero_r), Err(Error::ZeroR));

        let mut big_s = bytes;
        big_s[32..].fill(0xff);
        let err = Signature::from_bytes(&big_s).unwrap_err();
        assert_eq!(err, Error::SOverflowsOrder);
        assert_eq!(err.kind(), ErrorKind::Invalid);
    }

    #[test]
    fn hash_is_truncated_to_32_bytes() {
        let secret = SecretKey::from_bytes(&SIGN_VECTORS[0].key).unwrap();
        let hash = Sha256::digest(SIGN_VECTORS[0].msg);
        let mut long = [0x5au8; 48];
        long[..32].copy_from_slice(&hash);

        let sig = secret.sign(&hash);
        assert!(sig.verify(&long, &secret.public_key()));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn sign_then_verify(key in any::<[u8; 32]>(), hash in any::<[u8; 32]>()) {
            prop_assume!(SecretKey::from_bytes(&key).is_ok());
            let secret = SecretKey::from_bytes(&key).unwrap();
            let public = secret.public_key();

            let sig = secret.sign(&hash);
            prop_assert!(!bool::from(sig.s().is_over_half_order()));
            prop_assert!(sig.verify(&hash, &public));

            let encoded = PublicKey::from_sec1_bytes(&public.to_compressed()).unwrap();
            prop_assert!(sig.verify(&hash, &encoded));
        }
    }
}
