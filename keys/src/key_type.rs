use crate::Error;
use core::{
    fmt::{self, Display, Formatter},
    str::FromStr,
};

/// Supported key algorithms, numbered as in the key envelope.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[repr(i32)]
pub enum KeyType {
    /// RSA
    Rsa = 0,
    /// Ed25519
    Ed25519 = 1,
    /// ECDSA over secp256k1
    Secp256k1 = 2,
    /// ECDSA over NIST P-256
    Ecdsa = 3,
}

impl KeyType {
    /// Every key type, in wire order.
    pub const ALL: [KeyType; 4] = [
        KeyType::Rsa,
        KeyType::Ed25519,
        KeyType::Secp256k1,
        KeyType::Ecdsa,
    ];

    /// The canonical name, as used by [`Display`] and [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyType::Rsa => "RSA",
            KeyType::Ed25519 => "Ed25519",
            KeyType::Secp256k1 => "Secp256k1",
            KeyType::Ecdsa => "ECDSA",
        }
    }
}

impl TryFrom<i32> for KeyType {
    type Error = Error;

    fn try_from(value: i32) -> Result<Self, Error> {
        match value {
            0 => Ok(KeyType::Rsa),
            1 => Ok(KeyType::Ed25519),
            2 => Ok(KeyType::Secp256k1),
            3 => Ok(KeyType::Ecdsa),
            other => Err(Error::UnknownKeyType(other)),
        }
    }
}

impl From<KeyType> for i32 {
    fn from(key_type: KeyType) -> i32 {
        key_type as i32
    }
}

impl Display for KeyType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyType {
    type Err = Error;

    /// Names are matched case-insensitively.
    fn from_str(s: &str) -> Result<Self, Error> {
        KeyType::ALL
            .into_iter()
            .find(|key_type| key_type.as_str().eq_ignore_ascii_case(s))
            .ok_or(Error::UnknownKeyName)
    }
}
