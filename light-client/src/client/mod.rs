// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Client module
//!
//! This module contains the clients of the remote services the light client depends on. Each
//! service is described by a capability trait, so that the pipeline can run against any source of
//! consensus data or proofs.
//!
//! ## Sub-modules
//!
//! - `beacon`: The Beacon Client fetches consensus data from a Beacon Node API.
//! - `prover`: The Prover Client requests proofs from the proving service.

use crate::client::error::ClientError;
use crate::types::beacon::{Checkpoint, HeaderRecord, SyncAggregateData};
use async_trait::async_trait;
use beacon_lc_core::crypto::hash::HashValue;
use beacon_lc_core::merkle::tree::MerkleTree;
use beacon_lc_core::types::proof::ProverResponse;
use beacon_lc_core::types::ForkVersion;
use serde_json::Value;

pub mod beacon;
pub mod error;
pub mod prover;
mod utils;

/// Source of the consensus data needed to prepare light client witnesses.
///
/// Every method either returns a complete value or a terminal error.
#[async_trait]
pub trait BeaconApi: Send + Sync {
    /// Compressed public keys of the sync committee at `slot`, hex encoded, in committee order.
    async fn get_committee_pubkeys(&self, slot: u64) -> Result<Vec<String>, ClientError>;

    /// The block header at `slot` and its root.
    async fn get_header(&self, slot: u64) -> Result<HeaderRecord, ClientError>;

    /// The sync aggregate included in the block at `slot`. It attests to the block at the
    /// previous slot.
    async fn get_sync_aggregate(&self, slot: u64) -> Result<SyncAggregateData, ClientError>;

    async fn get_genesis_validators_root(&self) -> Result<HashValue, ClientError>;

    /// The current fork version of the state at `slot`.
    async fn get_fork_version(&self, slot: u64) -> Result<ForkVersion, ClientError>;

    /// The finalized checkpoint recorded in the state at `slot`.
    async fn get_finalized_checkpoint(&self, slot: u64) -> Result<Checkpoint, ClientError>;

    /// The Merkle tree of the `BeaconState` at `slot`.
    async fn get_state_tree(&self, slot: u64) -> Result<MerkleTree, ClientError>;

    /// The Merkle tree of the body of the block at `slot`.
    async fn get_body_tree(&self, slot: u64) -> Result<MerkleTree, ClientError>;
}

/// A service generating Groth16 proofs for the light client circuits.
#[async_trait]
pub trait ProvingService: Send + Sync {
    /// Proves `inputs` with the circuit named `circuit`.
    async fn prove(&self, circuit: &str, inputs: &Value) -> Result<ProverResponse, ClientError>;
}
