// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Field encoding
//!
//! The proof circuits cannot manipulate 381-bit integers natively. Every base field element is
//! therefore handed to them as [`LIMB_COUNT`] limbs of [`LIMB_BITS`] bits, least significant limb
//! first. Raw byte strings (hashes, compressed keys) are handed over one integer per byte.
//!
//! Both encodings serialize to JSON as arrays of decimal strings, the format the prover expects.

use crate::config::{FIELD_ELEMENT_LEN, LIMB_BITS, LIMB_CAPACITY_BITS, LIMB_COUNT};
use crate::crypto::error::CryptoError;
use serde::{Serialize, Serializer};
use uint::construct_uint;

construct_uint! {
    /// Unsigned integer wide enough to hold a full limb array (448 bits).
    pub struct U448(7);
}

/// A field element split in [`LIMB_COUNT`] limbs of [`LIMB_BITS`] bits, least significant limb
/// first.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LimbArray([u64; LIMB_COUNT]);

impl LimbArray {
    /// Mask selecting the bits of a single limb.
    const LIMB_MASK: u64 = (1 << LIMB_BITS) - 1;

    /// Splits an integer into limbs.
    ///
    /// # Arguments
    ///
    /// * `value` - The integer to split. Must be strictly lower than `2^385`.
    ///
    /// # Returns
    ///
    /// The limb representation of `value`, or a `CryptoError::FieldOverflow` if it does not fit.
    pub fn from_int(value: &U448) -> Result<Self, CryptoError> {
        if value.bits() > LIMB_CAPACITY_BITS {
            return Err(CryptoError::FieldOverflow { bits: value.bits() });
        }

        let mask = U448::from(Self::LIMB_MASK);
        let mut limbs = [0u64; LIMB_COUNT];
        for (i, limb) in limbs.iter_mut().enumerate() {
            *limb = ((*value >> (i * LIMB_BITS)) & mask).low_u64();
        }

        Ok(Self(limbs))
    }

    /// Recombines the limbs into the integer they represent.
    pub fn to_int(&self) -> U448 {
        self.0
            .iter()
            .rev()
            .fold(U448::zero(), |acc, limb| (acc << LIMB_BITS) | U448::from(*limb))
    }

    /// Parses a decimal integer and splits it into limbs.
    ///
    /// # Errors
    ///
    /// Fails with `CryptoError::NegativeValue` on a leading minus sign, with
    /// `CryptoError::InvalidDecimal` on anything that is not a decimal integer and with
    /// `CryptoError::FieldOverflow` if the value does not fit in the limbs.
    pub fn from_dec_str(value: &str) -> Result<Self, CryptoError> {
        Self::from_int(&parse_decimal(value)?)
    }

    /// Splits a big-endian encoded base field element into limbs.
    pub fn from_field_bytes(bytes: &[u8; FIELD_ELEMENT_LEN]) -> Result<Self, CryptoError> {
        Self::from_int(&U448::from_big_endian(bytes))
    }

    /// Returns the limbs, least significant first.
    pub const fn limbs(&self) -> &[u64; LIMB_COUNT] {
        &self.0
    }
}

impl TryFrom<[u64; LIMB_COUNT]> for LimbArray {
    type Error = CryptoError;

    fn try_from(limbs: [u64; LIMB_COUNT]) -> Result<Self, Self::Error> {
        if let Some(limb) = limbs.iter().find(|limb| **limb > Self::LIMB_MASK) {
            return Err(CryptoError::FieldOverflow {
                bits: 64 - limb.leading_zeros() as usize,
            });
        }

        Ok(Self(limbs))
    }
}

impl Serialize for LimbArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(u64::to_string))
    }
}

/// Parses a non-negative decimal integer, ignoring surrounding whitespace.
///
/// # Errors
///
/// Fails with `CryptoError::NegativeValue` on a leading minus sign and with
/// `CryptoError::InvalidDecimal` on an empty string or anything that is not a decimal integer.
pub fn parse_decimal(value: &str) -> Result<U448, CryptoError> {
    let value = value.trim();
    if value.starts_with('-') {
        return Err(CryptoError::NegativeValue);
    }
    // `from_dec_str` reads an empty string as zero.
    if value.is_empty() {
        return Err(CryptoError::InvalidDecimal {
            value: value.to_string(),
        });
    }

    U448::from_dec_str(value).map_err(|_| CryptoError::InvalidDecimal {
        value: value.to_string(),
    })
}

/// Convenience wrapper around [`LimbArray::from_int`].
pub fn int_to_limbs(value: &U448) -> Result<LimbArray, CryptoError> {
    LimbArray::from_int(value)
}

/// Convenience wrapper around [`LimbArray::to_int`].
pub fn limbs_to_int(limbs: &LimbArray) -> U448 {
    limbs.to_int()
}

/// A raw byte string handed to a circuit as one integer per byte.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ByteInts(Vec<u8>);

impl ByteInts {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for ByteInts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(u8::to_string))
    }
}

/// Decodes a hexadecimal string, with or without `0x` prefix, into its bytes.
///
/// # Errors
///
/// Returns a `CryptoError::InvalidHexadecimal` if the string has an odd length or contains
/// characters outside of `[0-9a-fA-F]`.
pub fn decode_hex_bytes(hex_str: &str) -> Result<Vec<u8>, CryptoError> {
    let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
    if hex_str.len() % 2 != 0 {
        return Err(CryptoError::InvalidHexadecimal {
            source: format!("odd number of hexadecimal characters: {}", hex_str.len()).into(),
        });
    }

    hex::decode(hex_str).map_err(|err| CryptoError::InvalidHexadecimal { source: err.into() })
}
