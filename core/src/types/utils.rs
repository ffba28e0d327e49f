// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::config::{
    FINALITY_DELAY_SLOTS, FORK_VERSION_LEN, SLOTS_PER_EPOCH, SLOTS_PER_SYNC_COMMITTEE_PERIOD,
};
use crate::crypto::error::CryptoError;
use crate::crypto::field::decode_hex_bytes;
use crate::types::ForkVersion;

/// Calculate the sync committee period of a slot.
///
/// # Arguments
///
/// * `slot` - The slot to get the period of.
///
/// # Returns
///
/// The sync committee period.
pub const fn calc_sync_period(slot: u64) -> u64 {
    slot / SLOTS_PER_SYNC_COMMITTEE_PERIOD
}

/// Epoch containing `slot`.
pub const fn epoch_at_slot(slot: u64) -> u64 {
    slot / SLOTS_PER_EPOCH
}

/// First slot of a sync committee period, `None` on overflow.
pub const fn period_start_slot(period: u64) -> Option<u64> {
    period.checked_mul(SLOTS_PER_SYNC_COMMITTEE_PERIOD)
}

/// Slots used to hand over the committee of `period`.
///
/// The finalized header is the first slot of the previous period, and its finality is attested
/// [`FINALITY_DELAY_SLOTS`] later.
///
/// # Returns
///
/// `(finalized_slot, attested_slot)`, or `None` for period 0 which has no previous period.
pub const fn update_slots_for_period(period: u64) -> Option<(u64, u64)> {
    if period == 0 {
        return None;
    }

    match period_start_slot(period - 1) {
        Some(finalized_slot) => match finalized_slot.checked_add(FINALITY_DELAY_SLOTS) {
            Some(attested_slot) => Some((finalized_slot, attested_slot)),
            None => None,
        },
        None => None,
    }
}

/// Parses a hexadecimal fork version such as `0x04000000`.
pub fn fork_version_from_hex(hex_str: &str) -> Result<ForkVersion, CryptoError> {
    let bytes = decode_hex_bytes(hex_str)?;

    bytes
        .as_slice()
        .try_into()
        .map_err(|_| CryptoError::InvalidLength {
            structure: "ForkVersion".into(),
            expected: FORK_VERSION_LEN,
            actual: bytes.len(),
        })
}
