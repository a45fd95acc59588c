//! The edwards25519 group and Ed25519 signatures.
//!
//! The curve is the twisted Edwards curve `-x² + y² = 1 + d x² y²` over the
//! prime field `p = 2^255 - 19`, with a prime order subgroup of order
//! `l = 2^252 + 27742317777372353535851937790883648493`. Ed25519 follows
//! [RFC 8032].
//!
//! # Usage
//!
//! ```
//! use p2pcrypto_edwards25519::{SigningKey, Signature};
//!
//! let signing_key = SigningKey::from_seed(&[0x2a; 32]);
//! let verifying_key = signing_key.verifying_key();
//!
//! let signature = signing_key.sign(b"hello");
//! assert!(verifying_key.verify(b"hello", &signature));
//!
//! let decoded = Signature::from_slice(&signature.to_bytes()).unwrap();
//! assert!(!verifying_key.verify(b"goodbye", &decoded));
//! ```
//!
//! Field elements, scalars and points are `Copy` values whose arithmetic
//! is exposed through named methods. Everything touching secret scalars
//! runs in constant time. The base point tables used by
//! [`EdwardsPoint::scalar_base_mult`] are built on first use, or eagerly
//! with [`init_tables`].
//!
//! [RFC 8032]: https://datatracker.ietf.org/doc/html/rfc8032

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]

#[cfg(any(feature = "alloc", test))]
extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

pub mod edwards;
pub mod field;
pub mod scalar;

mod error;
mod sign;

pub use crate::{
    edwards::{EdwardsPoint, init_tables},
    error::{Error, ErrorKind, Result},
    field::FieldElement,
    scalar::Scalar,
    sign::{
        KEYPAIR_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SIGNATURE_LENGTH, Signature,
        SigningKey, VerifyingKey,
    },
};
pub use rand_core;
pub use subtle;
