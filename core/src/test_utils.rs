// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! Fixtures shared by the tests of this crate and of the crates depending on it: BLS key pairs
//! derived from small secret scalars, and beacon state and block body trees in which the fields
//! proven by a light client update sit at their mainnet generalized indices.

use crate::config::{
    EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX, EXECUTION_STATE_ROOT_GENERALIZED_INDEX,
    FINALIZED_ROOT_GENERALIZED_INDEX, NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX,
};
use crate::crypto::hash::HashValue;
use crate::crypto::sig::{hash, PublicKey, Signature};
use crate::merkle::tree::MerkleTree;
use crate::merkle::Merkleized;
use crate::types::block::BeaconBlockHeader;
use crate::types::utils::epoch_at_slot;
use bls12_381::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};

/// Number of leaves of the Bellatrix `BeaconState` tree (25 fields).
const BEACON_STATE_LEAVES: u64 = 32;
/// Number of leaves of the Bellatrix `BeaconBlockBody` tree (10 fields).
const BEACON_BODY_LEAVES: u64 = 16;
/// Number of leaves of the Bellatrix `ExecutionPayload` tree (14 fields).
const EXECUTION_PAYLOAD_LEAVES: u64 = 16;

/// `n` deterministic key pairs.
pub fn keypairs(n: usize) -> Vec<(Scalar, PublicKey)> {
    (0..n as u64)
        .map(|i| {
            let secret = Scalar::from(0x5eed_0000 + i);
            let point = G1Affine::from(G1Projective::generator() * secret);
            let pubkey = PublicKey::from_bytes(&point.to_compressed()).unwrap();
            (secret, pubkey)
        })
        .collect()
}

/// Aggregate signature of `msg` by all the given secret keys.
pub fn aggregate_signature(secrets: &[Scalar], msg: &[u8]) -> Signature {
    let hashed = hash(msg);
    let aggregate = secrets
        .iter()
        .map(|secret| hashed * secret)
        .fold(G2Projective::identity(), |acc, sig| acc + sig);

    Signature::from_bytes(&G2Affine::from(aggregate).to_compressed()).unwrap()
}

/// A header at `slot` with roots derived from the slot.
pub fn header(slot: u64) -> BeaconBlockHeader {
    let tag = slot.to_le_bytes()[0];
    BeaconBlockHeader::new(
        slot,
        slot % 1_000,
        HashValue::new([tag; 32]),
        HashValue::new([tag.wrapping_add(1); 32]),
        HashValue::new([tag.wrapping_add(2); 32]),
    )
}

fn filler_leaves(count: u64, seed: u8) -> Vec<HashValue> {
    (0..count)
        .map(|i| HashValue::new([seed ^ i as u8; 32]))
        .collect()
}

/// A beacon state tree whose finalized checkpoint points to `finalized_header` and whose next
/// sync committee root is `next_committee_root`.
pub fn state_tree_with(
    finalized_header: &BeaconBlockHeader,
    next_committee_root: &HashValue,
) -> MerkleTree {
    let checkpoint = MerkleTree::from_leaves(&[
        epoch_at_slot(finalized_header.slot())
            .hash_tree_root()
            .unwrap(),
        finalized_header.hash_tree_root().unwrap(),
    ])
    .unwrap();

    // Checkpoint fields are at 2 * checkpoint + {0, 1}
    let checkpoint_index = FINALIZED_ROOT_GENERALIZED_INDEX / 2;

    let mut leaves = filler_leaves(BEACON_STATE_LEAVES, 0xa0);
    leaves[(checkpoint_index - BEACON_STATE_LEAVES) as usize] = checkpoint.root();
    leaves[(NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX - BEACON_STATE_LEAVES) as usize] =
        *next_committee_root;

    let mut state = MerkleTree::from_leaves(&leaves).unwrap();
    state.graft(checkpoint_index, &checkpoint).unwrap();
    state
}

/// A block body tree whose execution payload holds `state_root` and `block_number`.
pub fn body_tree_with_execution(state_root: &HashValue, block_number: u64) -> MerkleTree {
    // Both fields are leaves of the payload tree, itself a leaf of the body tree
    let payload_index = EXECUTION_STATE_ROOT_GENERALIZED_INDEX / EXECUTION_PAYLOAD_LEAVES;
    let state_root_field = EXECUTION_STATE_ROOT_GENERALIZED_INDEX % EXECUTION_PAYLOAD_LEAVES;
    let block_number_field = EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX % EXECUTION_PAYLOAD_LEAVES;

    let mut payload_leaves = filler_leaves(EXECUTION_PAYLOAD_LEAVES, 0xc0);
    payload_leaves[state_root_field as usize] = *state_root;
    payload_leaves[block_number_field as usize] = block_number.hash_tree_root().unwrap();
    let payload = MerkleTree::from_leaves(&payload_leaves).unwrap();

    let mut body_leaves = filler_leaves(BEACON_BODY_LEAVES, 0xb0);
    body_leaves[(payload_index - BEACON_BODY_LEAVES) as usize] = payload.root();

    let mut body = MerkleTree::from_leaves(&body_leaves).unwrap();
    body.graft(payload_index, &payload).unwrap();
    body
}
