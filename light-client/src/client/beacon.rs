// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Beacon client module
//!
//! This module contains the client for the Beacon Node API. It is responsible for fetching the
//! consensus data needed to prepare the witnesses of a sync committee signature: committee keys,
//! block headers, sync aggregates, fork and genesis data, and finality checkpoints.
//!
//! It maintains an internal HTTP client to handle communication with the Beacon Node.

use crate::client::error::ClientError;
use crate::client::utils::{get_json, test_connection};
use crate::client::BeaconApi;
use crate::types::beacon::{
    BeaconResponse, Checkpoint, FinalityCheckpointsData, ForkInfo, GenesisData, HeaderData,
    HeaderRecord, SyncAggregateData, SyncCommitteeData, ValidatorData, VersionedBlock,
};
use async_trait::async_trait;
use beacon_lc_core::crypto::hash::HashValue;
use beacon_lc_core::merkle::tree::MerkleTree;
use beacon_lc_core::types::ForkVersion;
use getset::Getters;
use log::debug;
use reqwest::Client;
use std::collections::HashMap;

/// Maximum number of validator indices queried in one `validators` request.
pub const PUB_KEY_BATCH_SIZE: usize = 100;

/// A client to handle communication with a Beacon Node.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct BeaconClient {
    /// The address of the Beacon Node API.
    beacon_node_address: String,
    /// The inner HTTP client.
    inner: Client,
}

impl BeaconClient {
    /// Create a new client with the given address.
    ///
    /// # Arguments
    ///
    /// * `beacon_node_address` - The address of the Beacon Node API.
    ///
    /// # Returns
    ///
    /// A new `BeaconClient`.
    pub fn new(beacon_node_address: &str) -> Self {
        Self {
            beacon_node_address: beacon_node_address.trim_end_matches('/').to_string(),
            inner: Client::new(),
        }
    }

    /// Test the connection to the beacon node.
    ///
    /// # Returns
    ///
    /// A result indicating whether the connection was successful.
    pub async fn test_endpoint(&self) -> Result<(), ClientError> {
        test_connection(&self.inner, &self.beacon_node_address).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/eth/{}", self.beacon_node_address, path)
    }

    async fn get_data<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, ClientError> {
        let response: BeaconResponse<T> = get_json(&self.inner, url).await?;
        Ok(response.into_data())
    }
}

/// Maps a conversion error of a response body to a `ClientError::Response`.
fn response_error<E>(endpoint: &str) -> impl FnOnce(E) -> ClientError + '_
where
    E: std::error::Error + Sync + Send + 'static,
{
    move |err| ClientError::Response {
        endpoint: endpoint.to_string(),
        source: Box::new(err),
    }
}

#[async_trait]
impl BeaconApi for BeaconClient {
    /// Resolves the committee at `slot` to validator indices, then fetches the keys of those
    /// validators in batches of [`PUB_KEY_BATCH_SIZE`].
    async fn get_committee_pubkeys(&self, slot: u64) -> Result<Vec<String>, ClientError> {
        let url = self.url(&format!("v1/beacon/states/{slot}/sync_committees"));
        let committee: SyncCommitteeData = self.get_data(&url).await?;

        let mut pubkeys_by_index = HashMap::with_capacity(committee.validators().len());
        for batch in committee.validators().chunks(PUB_KEY_BATCH_SIZE) {
            let url = self.url(&format!(
                "v1/beacon/states/{slot}/validators?id={}",
                batch.join(",")
            ));
            let validators: Vec<ValidatorData> = self.get_data(&url).await?;
            debug!("Fetched {} validators at slot {slot}", validators.len());

            pubkeys_by_index.extend(
                validators
                    .into_iter()
                    .map(|data| (data.index().clone(), data.validator().pubkey().clone())),
            );
        }

        committee
            .validators()
            .iter()
            .map(|index| {
                pubkeys_by_index
                    .get(index)
                    .cloned()
                    .ok_or_else(|| ClientError::Response {
                        endpoint: url.clone(),
                        source: format!("No public key returned for validator {index}").into(),
                    })
            })
            .collect()
    }

    async fn get_header(&self, slot: u64) -> Result<HeaderRecord, ClientError> {
        let url = self.url(&format!("v1/beacon/headers/{slot}"));
        let data: HeaderData = self.get_data(&url).await?;

        HeaderRecord::try_from(&data).map_err(response_error(&url))
    }

    async fn get_sync_aggregate(&self, slot: u64) -> Result<SyncAggregateData, ClientError> {
        let url = self.url(&format!("v2/beacon/blocks/{slot}"));
        let block: VersionedBlock = get_json(&self.inner, &url).await?;

        Ok(block.sync_aggregate().clone())
    }

    async fn get_genesis_validators_root(&self) -> Result<HashValue, ClientError> {
        let url = self.url("v1/beacon/genesis");
        let genesis: GenesisData = self.get_data(&url).await?;

        HashValue::from_hex(genesis.genesis_validators_root()).map_err(response_error(&url))
    }

    async fn get_fork_version(&self, slot: u64) -> Result<ForkVersion, ClientError> {
        let url = self.url(&format!("v1/beacon/states/{slot}/fork"));
        let fork: ForkInfo = self.get_data(&url).await?;

        fork.current_fork_version().map_err(response_error(&url))
    }

    async fn get_finalized_checkpoint(&self, slot: u64) -> Result<Checkpoint, ClientError> {
        let url = self.url(&format!("v1/beacon/states/{slot}/finality_checkpoints"));
        let checkpoints: FinalityCheckpointsData = self.get_data(&url).await?;

        Checkpoint::try_from(checkpoints.finalized()).map_err(response_error(&url))
    }

    /// Merkleizing a full `BeaconState` needs its SSZ schema, which the JSON endpoints do not
    /// provide.
    async fn get_state_tree(&self, _slot: u64) -> Result<MerkleTree, ClientError> {
        Err(ClientError::Unsupported {
            operation: "BeaconState Merkleization",
        })
    }

    async fn get_body_tree(&self, _slot: u64) -> Result<MerkleTree, ClientError> {
        Err(ClientError::Unsupported {
            operation: "BeaconBlockBody Merkleization",
        })
    }
}
