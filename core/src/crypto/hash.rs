// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: APACHE-2.0

use crate::crypto::error::CryptoError;
use crate::types::Bytes32;
use getset::Getters;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

/// Length of hash digests in bytes.
pub const HASH_LENGTH: usize = 32;

/// A structure representing a hash value.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy, Getters, Hash)]
pub struct HashValue {
    #[getset(get = "pub")]
    hash: [u8; HASH_LENGTH],
}

impl HashValue {
    /// Creates a new `HashValue` from a given hash.
    ///
    /// # Arguments
    ///
    /// * `hash` - A byte array of length `HASH_LENGTH` representing the hash value.
    ///
    /// # Returns
    ///
    /// A new `HashValue` instance.
    pub const fn new(hash: [u8; HASH_LENGTH]) -> Self {
        HashValue { hash }
    }

    /// Creates a `HashValue` from a slice.
    ///
    /// # Arguments
    ///
    /// * `bytes` - A byte slice from which to create the `HashValue`.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok` if the `HashValue` could be created successfully. If the slice has an invalid length,
    /// the `Result` is `Err` with a `CryptoError::InvalidLength`.
    pub fn from_slice<T: AsRef<[u8]>>(bytes: T) -> Result<Self, CryptoError> {
        let bytes = bytes.as_ref();
        <[u8; HASH_LENGTH]>::try_from(bytes)
            .map_err(|_| CryptoError::InvalidLength {
                structure: "HashValue".into(),
                expected: HASH_LENGTH,
                actual: bytes.len(),
            })
            .map(Self::new)
    }

    /// Parses a `0x`-prefixed (or bare) hexadecimal string into a `HashValue`.
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let bytes = hex::decode(hex_str.strip_prefix("0x").unwrap_or(hex_str))
            .map_err(|err| CryptoError::InvalidHexadecimal { source: err.into() })?;
        Self::from_slice(bytes)
    }

    /// Returns the `0x`-prefixed hexadecimal representation of the hash.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.hash))
    }

    /// Converts the `HashValue` into a vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.hash.to_vec()
    }
}

impl AsRef<[u8]> for HashValue {
    fn as_ref(&self) -> &[u8] {
        &self.hash
    }
}

impl From<Bytes32> for HashValue {
    fn from(bytes: Bytes32) -> Self {
        HashValue::new(bytes)
    }
}

impl From<HashValue> for Bytes32 {
    fn from(value: HashValue) -> Self {
        value.hash
    }
}

impl Serialize for HashValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for HashValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex_str = String::deserialize(deserializer)?;
        Self::from_hex(&hex_str).map_err(serde::de::Error::custom)
    }
}

/// Hashes the given data with SHA-256.
///
/// # Arguments
///
/// * `data` - The bytes to hash.
///
/// # Returns
///
/// The digest wrapped in a `HashValue`.
pub fn sha2_hash(data: &[u8]) -> HashValue {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut hash = [0u8; HASH_LENGTH];
    hash.copy_from_slice(&hasher.finalize());
    HashValue::new(hash)
}

/// Hashes the concatenation of two 32-byte nodes, `sha256(left ‖ right)`.
///
/// Both operands are `HashValue`s so their width is fixed at compile time.
pub fn sha2_hash_concat(left: &HashValue, right: &HashValue) -> HashValue {
    let mut hasher = Sha256::new();
    hasher.update(left.hash());
    hasher.update(right.hash());
    let mut hash = [0u8; HASH_LENGTH];
    hash.copy_from_slice(&hasher.finalize());
    HashValue::new(hash)
}
