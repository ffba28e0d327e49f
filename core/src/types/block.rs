// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Beacon block header
//!
//! This module contains the `BeaconBlockHeader` data structure, which represents the header of a
//! beacon block, and `HeaderTuple`, its normalized form in a light client update.

use crate::crypto::hash::HashValue;
use crate::merkle::error::MerkleError;
use crate::merkle::utils::{merkle_root, DataType};
use crate::merkle::Merkleized;
use getset::{CopyGetters, Getters};
use serde::{Deserialize, Serialize};

/// `BeaconBlockHeader` represents the header of a beacon block.
///
/// From [the CL specifications](https://github.com/ethereum/consensus-specs/blob/v1.3.0/specs/phase0/beacon-chain.md#beaconblockheader).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Getters, CopyGetters)]
pub struct BeaconBlockHeader {
    #[getset(get_copy = "pub")]
    slot: u64,
    #[getset(get_copy = "pub")]
    proposer_index: u64,
    #[getset(get = "pub")]
    parent_root: HashValue,
    #[getset(get = "pub")]
    state_root: HashValue,
    #[getset(get = "pub")]
    body_root: HashValue,
}

impl BeaconBlockHeader {
    pub const fn new(
        slot: u64,
        proposer_index: u64,
        parent_root: HashValue,
        state_root: HashValue,
        body_root: HashValue,
    ) -> Self {
        Self {
            slot,
            proposer_index,
            parent_root,
            state_root,
            body_root,
        }
    }
}

impl Merkleized for BeaconBlockHeader {
    /// Root of the five header fields, padded to eight leaves. Integers are little-endian, right
    /// padded to 32 bytes.
    fn hash_tree_root(&self) -> Result<HashValue, MerkleError> {
        let leaves = vec![
            self.slot.hash_tree_root()?,
            self.proposer_index.hash_tree_root()?,
            self.parent_root,
            self.state_root,
            self.body_root,
        ];

        merkle_root(DataType::Struct(leaves))
    }
}

/// A header as submitted to the on-chain light client: integers as numbers, roots as hexadecimal
/// strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderTuple {
    pub slot: u64,
    pub proposer_index: u64,
    pub parent_root: HashValue,
    pub state_root: HashValue,
    pub body_root: HashValue,
}

impl From<&BeaconBlockHeader> for HeaderTuple {
    fn from(header: &BeaconBlockHeader) -> Self {
        Self {
            slot: header.slot,
            proposer_index: header.proposer_index,
            parent_root: header.parent_root,
            state_root: header.state_root,
            body_root: header.body_root,
        }
    }
}

impl From<&HeaderTuple> for BeaconBlockHeader {
    fn from(header: &HeaderTuple) -> Self {
        Self::new(
            header.slot,
            header.proposer_index,
            header.parent_root,
            header.state_root,
            header.body_root,
        )
    }
}
