//! Reference big-integer conversions for tests.

use num_bigint::BigUint;

/// Reads a 32-byte big-endian value.
pub fn bytes_to_biguint(bytes: &[u8; 32]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Writes a value below 2^256 as 32 big-endian bytes.
pub fn biguint_to_bytes(x: &BigUint) -> [u8; 32] {
    let be = x.to_bytes_be();
    assert!(be.len() <= 32, "value does not fit in 256 bits");
    let mut bytes = [0u8; 32];
    bytes[32 - be.len()..].copy_from_slice(&be);
    bytes
}

/// Parses a big-endian hex string.
pub fn hex_to_biguint(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).unwrap()
}
