// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Merkle branch verification
//!
//! Checks of the branches carried by a light client update against the roots they are anchored
//! to: the attested state root for finality and sync committee branches, the finalized body root
//! for execution payload branches.

use crate::config::{
    EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX, EXECUTION_STATE_ROOT_GENERALIZED_INDEX,
    FINALIZED_ROOT_GENERALIZED_INDEX, NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX,
};
use crate::crypto::hash::{sha2_hash_concat, HashValue};
use crate::merkle::error::MerkleError;
use crate::merkle::utils::{generalized_index_depth, get_subtree_index};
use crate::merkle::Merkleized;
use crate::types::block::BeaconBlockHeader;

/// Verifies the validity of a finality branch.
///
/// # Arguments
///
/// * `state_root` - The state root of the attested header.
/// * `finalized_header` - The header the attested state records as finalized.
/// * `finality_branch` - The branch of the Merkle tree that proves the finality of the block.
///
/// # Returns
///
/// A `bool` indicating whether the finality proof is valid.
pub fn is_finality_proof_valid(
    state_root: &HashValue,
    finalized_header: &BeaconBlockHeader,
    finality_branch: &[HashValue],
) -> Result<bool, MerkleError> {
    is_proof_valid(
        state_root,
        finalized_header,
        finality_branch,
        FINALIZED_ROOT_GENERALIZED_INDEX,
    )
}

/// Verifies the validity of a next sync committee branch.
///
/// # Arguments
///
/// * `state_root` - The state root of the attested header.
/// * `next_committee_root` - The hash tree root of the next sync committee.
/// * `next_committee_branch` - The branch of the Merkle tree that proves the sync committee.
///
/// # Returns
///
/// A `bool` indicating whether the sync committee proof is valid.
pub fn is_next_committee_proof_valid(
    state_root: &HashValue,
    next_committee_root: &HashValue,
    next_committee_branch: &[HashValue],
) -> Result<bool, MerkleError> {
    is_proof_valid(
        state_root,
        next_committee_root,
        next_committee_branch,
        NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX,
    )
}

/// Verifies that an execution state root is part of a block body.
pub fn is_execution_state_root_proof_valid(
    body_root: &HashValue,
    execution_state_root: &HashValue,
    branch: &[HashValue],
) -> Result<bool, MerkleError> {
    is_proof_valid(
        body_root,
        execution_state_root,
        branch,
        EXECUTION_STATE_ROOT_GENERALIZED_INDEX,
    )
}

/// Verifies that an execution block number is part of a block body.
pub fn is_block_number_proof_valid(
    body_root: &HashValue,
    block_number: u64,
    branch: &[HashValue],
) -> Result<bool, MerkleError> {
    is_proof_valid(
        body_root,
        &block_number,
        branch,
        EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX,
    )
}

/// Generic function to verify the validity of a Merkle proof.
///
/// # Arguments
///
/// * `root` - The root the proof is anchored to.
/// * `leaf_object` - The object that the proof is attesting to.
/// * `branch` - The branch of the Merkle tree that proves the object.
/// * `generalized_index` - The generalized index of the object in the Merkle tree.
///
/// # Returns
///
/// A `bool` indicating whether the proof is valid.
pub fn is_proof_valid<M: Merkleized + ?Sized>(
    root: &HashValue,
    leaf_object: &M,
    branch: &[HashValue],
    generalized_index: u64,
) -> Result<bool, MerkleError> {
    let leaf_hash = leaf_object.hash_tree_root()?;

    is_valid_merkle_branch(&leaf_hash, branch, generalized_index, root)
}

/// Checks that `branch` proves `leaf` at `generalized_index` under `root`.
///
/// # Errors
///
/// Returns a `MerkleError` if the branch length does not match the depth of the index.
pub fn is_valid_merkle_branch(
    leaf: &HashValue,
    branch: &[HashValue],
    generalized_index: u64,
    root: &HashValue,
) -> Result<bool, MerkleError> {
    Ok(compute_root_from_branch(leaf, branch, generalized_index)? == *root)
}

/// Folds a branch over a leaf and returns the root it leads to.
///
/// # Arguments
///
/// * `leaf` - The hash of the proven node.
/// * `branch` - The sibling hashes, bottom first.
/// * `generalized_index` - The generalized index of the proven node.
///
/// # Errors
///
/// Returns a `MerkleError::InvalidGeneralizedIndex` for index 0, and a
/// `MerkleError::InvalidBranchLength` if the branch does not have one sibling per level.
pub fn compute_root_from_branch(
    leaf: &HashValue,
    branch: &[HashValue],
    generalized_index: u64,
) -> Result<HashValue, MerkleError> {
    let depth = generalized_index_depth(generalized_index);

    if generalized_index == 0 {
        return Err(MerkleError::InvalidGeneralizedIndex {
            depth: branch.len(),
            generalized_index,
            generalized_index_depth: depth,
        });
    }

    // Ensure we receive the number of siblings we expected
    if branch.len() != depth {
        return Err(MerkleError::InvalidBranchLength {
            expected: depth,
            actual: branch.len(),
        });
    }

    // 1. Convert generalized index to field index.
    let subtree_index = get_subtree_index(generalized_index);

    // 2. Calculate path based on the subtree index
    let path = (0..depth).map(|i| (subtree_index >> i) & 1 == 1);

    // 3. Reconstruct the root hash
    Ok(branch.iter().zip(path).fold(*leaf, accumulator_update))
}

/// Updates the accumulator hash during proof verification.
///
/// # Arguments
///
/// * `acc_hash: HashValue` - The current accumulator hash.
/// * `(sibling_hash, bit): (&HashValue, bool)` - The hash of the
///   sibling node and a boolean indicating whether the current node is a right child.
///
/// # Returns
///
/// A `HashValue` representing the updated accumulator hash.
fn accumulator_update(acc_hash: HashValue, (sibling_hash, bit): (&HashValue, bool)) -> HashValue {
    if bit {
        sha2_hash_concat(sibling_hash, &acc_hash)
    } else {
        sha2_hash_concat(&acc_hash, sibling_hash)
    }
}
