//! Private and public keys for a peer-to-peer stack.
//!
//! Keys of every supported algorithm are carried by the [`PrivateKey`] and
//! [`PublicKey`] enums, which dispatch the [`Key`], [`PrivKey`] and
//! [`PubKey`] operations to the per-algorithm types:
//!
//! | [`KeyType`]  | private raw form         | public raw form       | signature       |
//! |--------------|--------------------------|-----------------------|-----------------|
//! | `Ed25519`    | seed `\|\|` public key   | 32-byte encoding      | RFC 8032        |
//! | `Secp256k1`  | 32-byte big-endian       | 33-byte compressed    | DER, SHA-256    |
//! | `Ecdsa`      | PKCS#8 DER (P-256)       | PKIX DER              | DER, SHA-256    |
//! | `Rsa`        | opaque                   | opaque                | unsupported     |
//!
//! # Usage
//!
//! ```
//! use p2pcrypto_keys::{KeyType, PrivKey, PubKey, Key, generate_key_pair, unmarshal_public_key};
//! use rand_core::OsRng;
//!
//! let (private, public) = generate_key_pair(KeyType::Secp256k1, &mut OsRng)?;
//! let signature = private.sign(b"hello")?;
//!
//! let decoded = unmarshal_public_key(KeyType::Secp256k1, &public.raw()?)?;
//! assert!(decoded.verify(b"hello", &signature)?);
//! assert!(!decoded.verify(b"goodbye", &signature)?);
//! # Ok::<(), p2pcrypto_keys::Error>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

mod ecdsa;
mod ed25519;
mod error;
mod key;
mod key_type;
mod rsa;
mod secp256k1;

pub use crate::{
    ecdsa::{EcdsaPrivateKey, EcdsaPublicKey},
    ed25519::{Ed25519PrivateKey, Ed25519PublicKey},
    error::{Error, ErrorKind, Result},
    key::{PrivateKey, PublicKey, generate_key_pair, unmarshal_private_key, unmarshal_public_key},
    key_type::KeyType,
    rsa::{RsaPrivateKey, RsaPublicKey},
    secp256k1::{Secp256k1PrivateKey, Secp256k1PublicKey},
};
pub use p2pcrypto_edwards25519;
pub use p2pcrypto_secp256k1;

/// Operations shared by every key.
pub trait Key {
    /// The algorithm of this key.
    fn key_type(&self) -> KeyType;

    /// The raw encoding of this key, without any envelope.
    fn raw(&self) -> Result<Vec<u8>>;
}

/// A key that can produce signatures.
pub trait PrivKey: Key {
    /// The matching public key type.
    type Public: PubKey;

    /// Signs `msg`, hashing it as the algorithm requires.
    fn sign(&self, msg: &[u8]) -> Result<Vec<u8>>;

    /// Derives the public half of this key.
    fn public_key(&self) -> Result<Self::Public>;
}

/// A key that can check signatures.
pub trait PubKey: Key {
    /// Checks `sig` over `msg`.
    ///
    /// A well-formed signature that does not match is `Ok(false)`; bytes
    /// that cannot be parsed as a signature are an error.
    fn verify(&self, msg: &[u8], sig: &[u8]) -> Result<bool>;
}
