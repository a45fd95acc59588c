//! Ed25519 test vectors from RFC 8032 § 7.1, plus verification edge cases.

use hex_literal::hex;
use p2pcrypto_edwards25519::{EdwardsPoint, Scalar, Signature, SigningKey, VerifyingKey};

struct Vector {
    seed: [u8; 32],
    public: [u8; 32],
    msg: &'static [u8],
    sig: [u8; 64],
}

const VECTORS: &[Vector] = &[
    Vector {
        seed: hex!("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60"),
        public: hex!("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"),
        msg: b"",
        sig: hex!(
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        ),
    },
    Vector {
        seed: hex!("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb"),
        public: hex!("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c"),
        msg: &hex!("72"),
        sig: hex!(
            "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00"
        ),
    },
    Vector {
        seed: hex!("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7"),
        public: hex!("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025"),
        msg: &hex!("af82"),
        sig: hex!(
            "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a"
        ),
    },
];

/// Little-endian `a + b` over 32 bytes, dropping the final carry.
fn add_le(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut carry = 0u16;
    for i in 0..32 {
        let sum = u16::from(a[i]) + u16::from(b[i]) + carry;
        out[i] = sum as u8;
        carry = sum >> 8;
    }
    out
}

#[test]
fn rfc8032_vectors() {
    for vector in VECTORS {
        let key = SigningKey::from_seed(&vector.seed);
        assert_eq!(key.verifying_key().to_bytes(), vector.public);

        let sig = key.sign(vector.msg);
        assert_eq!(sig.to_bytes(), vector.sig);

        let public = VerifyingKey::from_bytes(&vector.public).unwrap();
        assert!(public.verify(vector.msg, &Signature::from_bytes(&vector.sig)));
        assert!(!public.verify(b"not the message", &sig));
    }
}

#[test]
fn rejects_tampered_signatures() {
    let vector = &VECTORS[1];
    let public = VerifyingKey::from_bytes(&vector.public).unwrap();

    for i in [0, 31, 32, 63] {
        let mut sig = vector.sig;
        sig[i] ^= 0x01;
        assert!(!public.verify(vector.msg, &Signature::from_bytes(&sig)));
    }
}

#[test]
fn rejects_unreduced_s() {
    let vector = &VECTORS[0];
    let public = VerifyingKey::from_bytes(&vector.public).unwrap();

    let mut s = [0u8; 32];
    s.copy_from_slice(&vector.sig[32..]);
    let order = add_le(&Scalar::MINUS_ONE.to_bytes(), &Scalar::ONE.to_bytes());

    // S + l is below 2^253, so only the range check can reject it
    let s_plus_l = add_le(&s, &order);
    assert_eq!(s_plus_l[31] & 0xe0, 0);

    let mut sig = vector.sig;
    sig[32..].copy_from_slice(&s_plus_l);
    assert!(!public.verify(vector.msg, &Signature::from_bytes(&sig)));
}

#[test]
fn lenient_public_key_decoding() {
    // p + 1 decodes to y = 1, the identity
    let identity = hex!("eeffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff7f");
    let public = VerifyingKey::from_bytes(&identity).unwrap();
    assert!(bool::from(public.to_point().is_identity()));
    assert_eq!(public.to_bytes(), identity);

    // with A the identity, (R, S) = ([S]B, S) verifies for any message
    let s = Scalar::from(5u64);
    let mut sig = [0u8; 64];
    sig[..32].copy_from_slice(&EdwardsPoint::scalar_base_mult(&s).to_bytes());
    sig[32..].copy_from_slice(&s.to_bytes());
    assert!(public.verify(b"anything", &Signature::from_bytes(&sig)));

    // x = 0 with the sign bit set
    let mut negative_zero = [0u8; 32];
    negative_zero[0] = 1;
    negative_zero[31] = 0x80;
    assert!(VerifyingKey::from_bytes(&negative_zero).is_ok());
}

#[test]
fn signatures_are_deterministic() {
    let key = SigningKey::from_seed(&[0x11; 32]);
    assert_eq!(key.sign(b"same"), key.sign(b"same"));
    assert_ne!(key.sign(b"same"), key.sign(b"different"));
}
