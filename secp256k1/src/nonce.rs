//! Deterministic nonce generation as described by [RFC6979] section 3.2,
//! instantiated with HMAC-SHA256.
//!
//! [RFC6979]: https://datatracker.ietf.org/doc/html/rfc6979

use crate::arithmetic::Scalar;
use hmac::{
    Hmac, Mac,
    digest::{Key, KeyInit},
};
use sha2::Sha256;
use zeroize::Zeroize;

type HmacSha256 = Hmac<Sha256>;

const SIZE: usize = 32;
const EXTRA_SIZE: usize = 32;
const VERSION_SIZE: usize = 16;

/// Computes `HMAC_K(parts...)`.
fn hmac(k: &[u8; SIZE], parts: &[&[u8]]) -> [u8; SIZE] {
    // HMAC zero pads keys shorter than a block.
    let mut key = Key::<HmacSha256>::default();
    key[..SIZE].copy_from_slice(k);
    let mut mac = <HmacSha256 as KeyInit>::new(&key);
    key.zeroize();

    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().into()
}

/// Copies `src` into `dst` the way RFC6979 `bits2octets` treats 32-byte
/// quantities: longer inputs keep their leading bytes, shorter inputs are
/// left-padded with zeros.
fn copy_padded(dst: &mut [u8], src: &[u8]) {
    let src = if src.len() > SIZE { &src[..SIZE] } else { src };
    dst[SIZE - src.len()..SIZE].copy_from_slice(src);
}

/// Generates an RFC6979 nonce for the private key and message hash.
///
/// `extra` is appended to the HMAC key material only when it is exactly 32
/// bytes and `version` only when it is exactly 16 bytes. If a version is
/// given without extra data, the extra data slot is zero filled. Other
/// lengths are ignored.
///
/// Returns the `extra_iterations`-th valid candidate in `[1, n)`, counting
/// from zero.
pub fn nonce_rfc6979(
    priv_key: &[u8],
    hash: &[u8],
    extra: &[u8],
    version: &[u8],
    extra_iterations: u32,
) -> Scalar {
    let has_extra = extra.len() == EXTRA_SIZE;
    let has_version = version.len() == VERSION_SIZE;

    let mut key_buf = [0u8; 2 * SIZE + EXTRA_SIZE + VERSION_SIZE];
    copy_padded(&mut key_buf[..SIZE], priv_key);
    copy_padded(&mut key_buf[SIZE..2 * SIZE], hash);
    let mut offset = 2 * SIZE;
    if has_extra {
        key_buf[offset..offset + EXTRA_SIZE].copy_from_slice(extra);
    }
    if has_version {
        offset += EXTRA_SIZE;
        key_buf[offset..offset + VERSION_SIZE].copy_from_slice(version);
        offset += VERSION_SIZE;
    } else if has_extra {
        offset += EXTRA_SIZE;
    }
    let key_material = &key_buf[..offset];

    // Step B and C
    let mut v = [0x01u8; SIZE];
    let mut k = [0x00u8; SIZE];

    // Steps D to G
    k = hmac(&k, &[&v, &[0x00], key_material]);
    v = hmac(&k, &[&v]);
    k = hmac(&k, &[&v, &[0x01], key_material]);
    v = hmac(&k, &[&v]);

    // Step H
    let mut generated = 0u32;
    let nonce = loop {
        v = hmac(&k, &[&v]);

        let (candidate, overflow) = Scalar::set_bytes(&v);
        if !bool::from(overflow | candidate.is_zero()) {
            generated += 1;
            if generated > extra_iterations {
                break candidate;
            }
        }

        k = hmac(&k, &[&v, &[0x00]]);
        v = hmac(&k, &[&v]);
    };

    key_buf.zeroize();
    k.zeroize();
    v.zeroize();
    nonce
}
