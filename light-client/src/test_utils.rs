// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! In-memory collaborators for the pipeline tests. [`MockBeacon`] serves a consistent chain
//! around a sync committee handover, [`MockProver`] answers every request with the same proof.

use crate::client::error::ClientError;
use crate::client::{BeaconApi, ProvingService};
use crate::types::beacon::{Checkpoint, HeaderRecord, SyncAggregateData};
use async_trait::async_trait;
use beacon_lc_core::crypto::hash::HashValue;
use beacon_lc_core::merkle::tree::MerkleTree;
use beacon_lc_core::merkle::Merkleized;
use beacon_lc_core::test_utils::{
    aggregate_signature, body_tree_with_execution, header, keypairs, state_tree_with,
};
use beacon_lc_core::types::block::BeaconBlockHeader;
use beacon_lc_core::types::proof::ProverResponse;
use beacon_lc_core::types::signing_data::{compute_signing_root, compute_sync_committee_domain};
use beacon_lc_core::types::utils::{calc_sync_period, epoch_at_slot, update_slots_for_period};
use beacon_lc_core::types::ForkVersion;
use bls12_381::Scalar;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Size of the committee served by [`MockBeacon`].
pub const MOCK_COMMITTEE_SIZE: usize = 8;

const FORK_VERSION: ForkVersion = [4, 0, 0, 0];

fn missing(what: &str, key: u64) -> ClientError {
    ClientError::Response {
        endpoint: format!("mock/{what}/{key}"),
        source: "not found".into(),
    }
}

/// Packs participation bits, least significant bit first.
pub fn pack_bits(bits: &[bool]) -> String {
    let bytes = bits
        .chunks(8)
        .map(|byte| {
            byte.iter()
                .enumerate()
                .fold(0u8, |acc, (i, bit)| acc | (u8::from(*bit) << i))
        })
        .collect::<Vec<_>>();

    format!("0x{}", hex::encode(bytes))
}

/// A beacon node holding the data needed to hand over the committee of one period.
#[derive(Debug, Clone)]
pub struct MockBeacon {
    finalized_slot: u64,
    attested_slot: u64,
    block_number: u64,
    secrets: Vec<Scalar>,
    committees: HashMap<u64, Vec<String>>,
    headers: HashMap<u64, HeaderRecord>,
    aggregates: HashMap<u64, SyncAggregateData>,
    states: HashMap<u64, MerkleTree>,
    bodies: HashMap<u64, MerkleTree>,
    checkpoints: HashMap<u64, Checkpoint>,
    genesis_validators_root: HashValue,
    signing_root: HashValue,
}

impl MockBeacon {
    /// A chain where the committee of `period - 1` signs the header attesting to the first
    /// header of `period - 1`, and is also the committee of `period`.
    pub fn for_period(period: u64) -> Self {
        let (finalized_slot, attested_slot) = update_slots_for_period(period).unwrap();
        let block_number = 19_000_000 + period;
        let genesis_validators_root = HashValue::new([0x4b; 32]);

        let (secrets, pubkeys): (Vec<_>, Vec<_>) = keypairs(MOCK_COMMITTEE_SIZE).into_iter().unzip();
        let pubkeys = pubkeys
            .iter()
            .map(|pubkey| format!("0x{}", hex::encode(pubkey.compressed_pubkey())))
            .collect::<Vec<_>>();

        let finalized_body = body_tree_with_execution(&HashValue::new([0xee; 32]), block_number);
        let finalized_state = state_tree_with(&header(finalized_slot - 1), &HashValue::new([0x55; 32]));
        let finalized_header = BeaconBlockHeader::new(
            finalized_slot,
            7,
            HashValue::new([1; 32]),
            finalized_state.root(),
            finalized_body.root(),
        );
        let finalized_root = finalized_header.hash_tree_root().unwrap();

        let attested_state = state_tree_with(&finalized_header, &HashValue::new([0x66; 32]));
        let attested_header = BeaconBlockHeader::new(
            attested_slot,
            9,
            HashValue::new([3; 32]),
            attested_state.root(),
            HashValue::new([4; 32]),
        );
        let attested_root = attested_header.hash_tree_root().unwrap();

        let domain = compute_sync_committee_domain(FORK_VERSION, &genesis_validators_root).unwrap();
        let signing_root = compute_signing_root(&attested_root, &domain).unwrap();

        let mut beacon = Self {
            finalized_slot,
            attested_slot,
            block_number,
            secrets,
            committees: HashMap::from([
                (calc_sync_period(attested_slot), pubkeys.clone()),
                (period, pubkeys),
            ]),
            headers: HashMap::from([
                (
                    finalized_slot,
                    HeaderRecord::new(finalized_header, finalized_root),
                ),
                (
                    attested_slot,
                    HeaderRecord::new(attested_header, attested_root),
                ),
            ]),
            aggregates: HashMap::new(),
            states: HashMap::from([
                (finalized_slot, finalized_state),
                (attested_slot, attested_state),
            ]),
            bodies: HashMap::from([(finalized_slot, finalized_body)]),
            checkpoints: HashMap::from([(
                attested_slot,
                Checkpoint::new(epoch_at_slot(finalized_slot), finalized_root),
            )]),
            genesis_validators_root,
            signing_root,
        };
        beacon.set_signers(MOCK_COMMITTEE_SIZE - 1);

        beacon
    }

    pub const fn finalized_slot(&self) -> u64 {
        self.finalized_slot
    }

    pub const fn attested_slot(&self) -> u64 {
        self.attested_slot
    }

    pub const fn block_number(&self) -> u64 {
        self.block_number
    }

    fn sign(&mut self, signers: usize, message: &HashValue) {
        let bits = (0..MOCK_COMMITTEE_SIZE)
            .map(|i| i < signers)
            .collect::<Vec<_>>();
        let signature = aggregate_signature(&self.secrets[..signers], message.hash());

        self.aggregates.insert(
            self.attested_slot + 1,
            SyncAggregateData::new(
                pack_bits(&bits),
                format!("0x{}", hex::encode(signature.compressed_sig())),
            ),
        );
    }

    /// The first `signers` committee members sign the attested header.
    pub fn set_signers(&mut self, signers: usize) {
        let signing_root = self.signing_root;
        self.sign(signers, &signing_root);
    }

    /// The committee signs something other than the attested header.
    pub fn sign_wrong_message(&mut self) {
        let mut message = *self.signing_root.hash();
        message[0] ^= 1;
        self.sign(MOCK_COMMITTEE_SIZE - 1, &HashValue::new(message));
    }

    pub fn corrupt_header_root(&mut self, slot: u64) {
        if let Some(record) = self.headers.get_mut(&slot) {
            *record = HeaderRecord::new(*record.header(), HashValue::new([0xff; 32]));
        }
    }

    pub fn set_finalized_epoch(&mut self, slot: u64, epoch: u64) {
        if let Some(checkpoint) = self.checkpoints.get_mut(&slot) {
            *checkpoint = Checkpoint::new(epoch, *checkpoint.root());
        }
    }
}

#[async_trait]
impl BeaconApi for MockBeacon {
    async fn get_committee_pubkeys(&self, slot: u64) -> Result<Vec<String>, ClientError> {
        self.committees
            .get(&calc_sync_period(slot))
            .cloned()
            .ok_or_else(|| missing("committee", slot))
    }

    async fn get_header(&self, slot: u64) -> Result<HeaderRecord, ClientError> {
        self.headers
            .get(&slot)
            .copied()
            .ok_or_else(|| missing("header", slot))
    }

    async fn get_sync_aggregate(&self, slot: u64) -> Result<SyncAggregateData, ClientError> {
        self.aggregates
            .get(&slot)
            .cloned()
            .ok_or_else(|| missing("block", slot))
    }

    async fn get_genesis_validators_root(&self) -> Result<HashValue, ClientError> {
        Ok(self.genesis_validators_root)
    }

    async fn get_fork_version(&self, _slot: u64) -> Result<ForkVersion, ClientError> {
        Ok(FORK_VERSION)
    }

    async fn get_finalized_checkpoint(&self, slot: u64) -> Result<Checkpoint, ClientError> {
        self.checkpoints
            .get(&slot)
            .copied()
            .ok_or_else(|| missing("checkpoint", slot))
    }

    async fn get_state_tree(&self, slot: u64) -> Result<MerkleTree, ClientError> {
        self.states
            .get(&slot)
            .cloned()
            .ok_or_else(|| missing("state", slot))
    }

    async fn get_body_tree(&self, slot: u64) -> Result<MerkleTree, ClientError> {
        self.bodies
            .get(&slot)
            .cloned()
            .ok_or_else(|| missing("body", slot))
    }
}

/// A proving service answering every request with the same proof. The 33rd public signal is the
/// committee commitment `4660` (`0x1234`).
#[derive(Debug, Default)]
pub struct MockProver {
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockProver {
    /// The requests received so far.
    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn response() -> ProverResponse {
        let mut pub_signals = (0..33).map(|i| i.to_string()).collect::<Vec<_>>();
        pub_signals[32] = "4660".to_string();

        ProverResponse::new(
            serde_json::from_str(
                r#"{"pi_a": ["1", "2", "1"], "pi_b": [["3", "4"], ["5", "6"], ["1", "0"]], "pi_c": ["7", "8", "1"], "protocol": "groth16"}"#,
            )
            .unwrap(),
            pub_signals,
        )
    }
}

#[async_trait]
impl ProvingService for MockProver {
    async fn prove(&self, circuit: &str, inputs: &Value) -> Result<ProverResponse, ClientError> {
        self.requests
            .lock()
            .unwrap()
            .push((circuit.to_string(), inputs.clone()));

        Ok(Self::response())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_pack_bits() {
        let mut bits = vec![false; 16];
        bits[0] = true;
        bits[9] = true;
        assert_eq!(pack_bits(&bits), "0x0102");
        assert_eq!(pack_bits(&[true; 7]), "0x7f");
    }
}
