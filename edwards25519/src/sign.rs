//! Ed25519 signatures as specified in [RFC 8032 § 5.1].
//!
//! Signing hashes the message twice with SHA-512: once with the secret
//! prefix to derive the nonce, once with the nonce commitment and public
//! key to derive the challenge. Verification is the cofactorless check
//! `[S]B - [k]A == R`, compared on encodings.
//!
//! [RFC 8032 § 5.1]: https://datatracker.ietf.org/doc/html/rfc8032#section-5.1

mod signature;
mod signing_key;
mod verifying_key;

pub use self::{
    signature::Signature,
    signing_key::{KEYPAIR_LENGTH, SigningKey},
    verifying_key::VerifyingKey,
};

use crate::Scalar;
use sha2::{Digest, Sha512};
use zeroize::Zeroize;

/// Length of an encoded [`VerifyingKey`].
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Length of the seed a [`SigningKey`] is derived from.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of an encoded [`Signature`].
pub const SIGNATURE_LENGTH: usize = 64;

/// `SHA-512(R || A || M) mod l`
fn challenge(r: &[u8; 32], a: &[u8; PUBLIC_KEY_LENGTH], msg: &[u8]) -> Scalar {
    let digest = Sha512::new()
        .chain_update(r)
        .chain_update(a)
        .chain_update(msg)
        .finalize();
    wide_scalar(&digest)
}

fn wide_scalar(digest: &[u8]) -> Scalar {
    let mut wide = [0u8; 64];
    wide.copy_from_slice(digest);
    let scalar = Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    scalar
}
