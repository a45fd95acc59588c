//! secp256k1 elliptic curve arithmetic and ECDSA.
//!
//! The curve's equation is `y² = x³ + 7` over the ~256-bit prime field
//! `p = 2^256 - 2^32 - 977`, as specified in SEC 2: Recommended Elliptic
//! Curve Domain Parameters:
//!
//! <https://www.secg.org/sec2-v2.pdf>
//!
//! # Usage
//!
//! ```
//! use p2pcrypto_secp256k1::{SecretKey, ecdsa::Signature};
//! use sha2::{Digest, Sha256};
//!
//! let secret_key = SecretKey::from_slice(&[0x11; 32]).unwrap();
//! let public_key = secret_key.public_key();
//!
//! let hash = Sha256::digest(b"hello");
//! let signature = secret_key.sign(&hash);
//! assert!(signature.verify(&hash, &public_key));
//!
//! let der = signature.to_der();
//! assert_eq!(Signature::from_der(der.as_ref()).unwrap(), signature);
//! ```
//!
//! All field, scalar and point types are `Copy` values. Arithmetic is
//! exposed only through named methods such as [`FieldElement::mul`] and
//! [`Scalar::negate`], each returning a new value.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

#[cfg(any(feature = "alloc", test))]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod arithmetic;
pub mod ecdsa;

mod error;
mod nonce;
mod public_key;
mod secret_key;

pub use crate::{
    arithmetic::{AffinePoint, FieldElement, JacobianPoint, Scalar},
    error::{Error, ErrorKind, Result},
    nonce::nonce_rfc6979,
    public_key::{COMPRESSED_SIZE, PublicKey, UNCOMPRESSED_SIZE},
    secret_key::SecretKey,
};
pub use rand_core;
pub use subtle;

/// Size of a serialized field element or scalar in bytes.
pub const FIELD_BYTES: usize = 32;
