// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Participation bitfield
//!
//! Beacon nodes return the sync committee participation of a sync aggregate as packed bytes. Bit
//! `i` of byte `j` (least significant first) tells whether committee member `8j + i` signed.

use crate::crypto::field::decode_hex_bytes;
use crate::shape_error;
use crate::types::error::{ShapeError, TypesError};

/// Unpacked participation bits, one per committee member in committee order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct ParticipationBitfield {
    bits: Vec<bool>,
}

impl ParticipationBitfield {
    pub const fn from_bits(bits: Vec<bool>) -> Self {
        Self { bits }
    }

    /// Unpacks `bit_count` participation bits from their packed form.
    ///
    /// # Arguments
    ///
    /// * `bytes` - The packed bits, exactly `ceil(bit_count / 8)` bytes.
    /// * `bit_count` - The committee size.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError::Shape` if the byte length does not match the bit count or if a bit
    /// past `bit_count` is set.
    pub fn from_bytes(bytes: &[u8], bit_count: usize) -> Result<Self, TypesError> {
        let expected = bit_count.div_ceil(8);
        if bytes.len() != expected {
            return Err(shape_error!(
                "ParticipationBitfield",
                ShapeError::BitfieldByteLength {
                    bit_count,
                    expected,
                    actual: bytes.len(),
                }
            ));
        }

        let mut bits = bytes
            .iter()
            .flat_map(|byte| (0..8u32).map(move |i| (*byte >> i) & 1 == 1))
            .collect::<Vec<_>>();

        if bits[bit_count..].iter().any(|bit| *bit) {
            return Err(shape_error!(
                "ParticipationBitfield",
                ShapeError::BitfieldPadding { bit_count }
            ));
        }
        bits.truncate(bit_count);

        Ok(Self { bits })
    }

    /// Decodes participation bits from their hexadecimal packed form, as served by beacon nodes.
    pub fn from_hex(hex_str: &str, bit_count: usize) -> Result<Self, TypesError> {
        Self::from_bytes(&decode_hex_bytes(hex_str)?, bit_count)
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Number of members that took part.
    pub fn participation_count(&self) -> usize {
        self.bits.iter().filter(|bit| **bit).count()
    }

    /// Items of `committee` whose participation bit is set, in order.
    pub fn select<'a, T>(&'a self, committee: &'a [T]) -> impl Iterator<Item = &'a T> + 'a {
        committee
            .iter()
            .zip(&self.bits)
            .filter_map(|(item, bit)| bit.then_some(item))
    }

    /// The bits as `0`/`1` integers, the form expected by the header circuit.
    pub fn to_circuit_bits(&self) -> Vec<u8> {
        self.bits.iter().map(|bit| u8::from(*bit)).collect()
    }
}
