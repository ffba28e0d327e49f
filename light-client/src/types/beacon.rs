// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Beacon module
//!
//! This module contains the data structures returned by the JSON endpoints of the Beacon Node API,
//! and their conversion to the types of [`beacon_lc_core`].
//!
//! The Beacon Node API encodes integers as decimal strings. They are kept as received and parsed
//! when the record is converted.

use beacon_lc_core::crypto::hash::HashValue;
use beacon_lc_core::deserialization_error;
use beacon_lc_core::types::block::BeaconBlockHeader;
use beacon_lc_core::types::error::TypesError;
use beacon_lc_core::types::utils::fork_version_from_hex;
use beacon_lc_core::types::ForkVersion;
use getset::{CopyGetters, Getters};
use serde::Deserialize;

/// Envelope of every Beacon Node API response.
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct BeaconResponse<T> {
    data: T,
}

impl<T> BeaconResponse<T> {
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Response data of `/eth/v1/beacon/states/{state_id}/sync_committees`.
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct SyncCommitteeData {
    /// Validator indices of the committee members, in committee order.
    validators: Vec<String>,
}

/// An entry of `/eth/v1/beacon/states/{state_id}/validators`.
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ValidatorData {
    index: String,
    validator: ValidatorRecord,
}

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ValidatorRecord {
    pubkey: String,
}

/// Response data of `/eth/v1/beacon/headers/{block_id}`.
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct HeaderData {
    root: String,
    header: SignedHeaderData,
}

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct SignedHeaderData {
    message: HeaderMessage,
}

/// A `BeaconBlockHeader` as encoded by the Beacon Node API.
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct HeaderMessage {
    slot: String,
    proposer_index: String,
    parent_root: String,
    state_root: String,
    body_root: String,
}

impl TryFrom<&HeaderMessage> for BeaconBlockHeader {
    type Error = TypesError;

    fn try_from(message: &HeaderMessage) -> Result<Self, Self::Error> {
        Ok(Self::new(
            parse_quantity("slot", &message.slot)?,
            parse_quantity("proposer_index", &message.proposer_index)?,
            HashValue::from_hex(&message.parent_root)?,
            HashValue::from_hex(&message.state_root)?,
            HashValue::from_hex(&message.body_root)?,
        ))
    }
}

/// A block header together with the root reported by the beacon node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters)]
#[getset(get = "pub")]
pub struct HeaderRecord {
    header: BeaconBlockHeader,
    root: HashValue,
}

impl HeaderRecord {
    pub const fn new(header: BeaconBlockHeader, root: HashValue) -> Self {
        Self { header, root }
    }
}

impl TryFrom<&HeaderData> for HeaderRecord {
    type Error = TypesError;

    fn try_from(data: &HeaderData) -> Result<Self, Self::Error> {
        Ok(Self {
            header: BeaconBlockHeader::try_from(data.header.message())?,
            root: HashValue::from_hex(&data.root)?,
        })
    }
}

/// Response data of `/eth/v1/beacon/genesis`.
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct GenesisData {
    genesis_validators_root: String,
}

/// Response data of `/eth/v1/beacon/states/{state_id}/fork`.
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ForkInfo {
    previous_version: String,
    current_version: String,
    epoch: String,
}

impl ForkInfo {
    /// The fork version that signatures at this state are domain-separated with.
    pub fn current_fork_version(&self) -> Result<ForkVersion, TypesError> {
        Ok(fork_version_from_hex(&self.current_version)?)
    }
}

/// Response data of `/eth/v1/beacon/states/{state_id}/finality_checkpoints`.
#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct FinalityCheckpointsData {
    previous_justified: CheckpointData,
    current_justified: CheckpointData,
    finalized: CheckpointData,
}

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct CheckpointData {
    epoch: String,
    root: String,
}

/// A finalized checkpoint: an epoch and the root of the block at its start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Getters, CopyGetters)]
pub struct Checkpoint {
    #[getset(get_copy = "pub")]
    epoch: u64,
    #[getset(get = "pub")]
    root: HashValue,
}

impl Checkpoint {
    pub const fn new(epoch: u64, root: HashValue) -> Self {
        Self { epoch, root }
    }
}

impl TryFrom<&CheckpointData> for Checkpoint {
    type Error = TypesError;

    fn try_from(data: &CheckpointData) -> Result<Self, Self::Error> {
        Ok(Self {
            epoch: parse_quantity("epoch", &data.epoch)?,
            root: HashValue::from_hex(&data.root)?,
        })
    }
}

/// A signed block from `/eth/v2/beacon/blocks/{block_id}`, tagged with its fork.
///
/// Only forks carrying a sync aggregate are accepted. A phase 0 block fails to deserialize.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "version", content = "data", rename_all = "lowercase")]
pub enum VersionedBlock {
    Altair(SignedBlock),
    Bellatrix(SignedBlock),
    Capella(SignedBlock),
    Deneb(SignedBlock),
    Electra(SignedBlock),
}

impl VersionedBlock {
    pub const fn block(&self) -> &SignedBlock {
        match self {
            VersionedBlock::Altair(block)
            | VersionedBlock::Bellatrix(block)
            | VersionedBlock::Capella(block)
            | VersionedBlock::Deneb(block)
            | VersionedBlock::Electra(block) => block,
        }
    }

    pub const fn sync_aggregate(&self) -> &SyncAggregateData {
        &self.block().message.body.sync_aggregate
    }
}

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct SignedBlock {
    message: BlockMessage,
}

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct BlockMessage {
    slot: String,
    body: BlockBody,
}

#[derive(Debug, Clone, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct BlockBody {
    sync_aggregate: SyncAggregateData,
}

/// Packed participation bits and aggregate signature of a sync aggregate, as hexadecimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct SyncAggregateData {
    sync_committee_bits: String,
    sync_committee_signature: String,
}

impl SyncAggregateData {
    pub const fn new(sync_committee_bits: String, sync_committee_signature: String) -> Self {
        Self {
            sync_committee_bits,
            sync_committee_signature,
        }
    }
}

/// Parses an integer encoded as a decimal string.
pub fn parse_quantity(field: &str, value: &str) -> Result<u64, TypesError> {
    value
        .parse::<u64>()
        .map_err(|err| deserialization_error!(field, err))
}
