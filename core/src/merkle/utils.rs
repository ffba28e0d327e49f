// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::crypto::hash::{sha2_hash_concat, HashValue};
use crate::merkle::error::MerkleError;

/// Returns the index of the subtree that a given generalized index belongs to. The generalized index
/// is the index of a leaf in a binary tree where the leaves are numbered from left to right.
///
/// # Arguments
///
/// * `generalized_index` - The generalized index of the leaf.
///
/// # Returns
///
/// The index of the subtree that the leaf belongs to.
///
/// # Notes
///
/// From [the Altaïr specifications](https://github.com/ethereum/consensus-specs/blob/dev/specs/altair/light-client/sync-protocol.md#get_subtree_index).
pub const fn get_subtree_index(generalized_index: u64) -> u64 {
    let power_of_two = 1u64 << generalized_index_depth(generalized_index);

    generalized_index % power_of_two
}

/// Depth of a node in a tree, the root (generalized index 1) being at depth 0.
///
/// It is also the number of siblings in a branch proving that node. Index 0 is not a node and is
/// reported at depth 0.
pub const fn generalized_index_depth(generalized_index: u64) -> usize {
    (u64::BITS - 1).saturating_sub(generalized_index.leading_zeros()) as usize
}

/// Generalized index, in the outer tree, of the node at `inner` in the subtree rooted at `outer`.
///
/// Returns `None` if either index is 0 or the result does not fit in a `u64`.
pub const fn concat_generalized_indices(outer: u64, inner: u64) -> Option<u64> {
    if outer == 0 || inner == 0 {
        return None;
    }

    let inner_depth = generalized_index_depth(inner);
    if outer.leading_zeros() < inner_depth as u32 {
        return None;
    }

    Some((outer << inner_depth) | (inner ^ (1u64 << inner_depth)))
}

/// The type of data that can be used to compute a Merkle root.
pub enum DataType {
    Struct(Vec<HashValue>),
}

/// Computes the Merkle root of the given data.
///
/// # Arguments
///
/// * `data_type` - The type of data to compute the Merkle root of.
///
/// # Returns
///
/// The Merkle root of the given data.
pub fn merkle_root(data_type: DataType) -> Result<HashValue, MerkleError> {
    match data_type {
        DataType::Struct(elts) => {
            if elts.is_empty() {
                return Err(MerkleError::InvalidLeafCount);
            }

            Ok(calculate_root(elts))
        }
    }
}

/// Computes the root of a Merkle tree given a non-empty list of leaves.
///
/// # Arguments
///
/// * `leaves` - The leaves of the Merkle tree.
///
/// # Returns
///
/// The root of the Merkle tree.
pub(crate) fn calculate_root(mut leaves: Vec<HashValue>) -> HashValue {
    let num_leaves = leaves.len().next_power_of_two();

    // Pad the leaves vector with empty leaves to ensure the tree is balanced
    leaves.resize(num_leaves, HashValue::default());

    while leaves.len() > 1 {
        leaves = leaves
            .chunks(2)
            .map(|pair| sha2_hash_concat(&pair[0], &pair[1]))
            .collect();
    }

    leaves.first().copied().unwrap_or_default()
}
