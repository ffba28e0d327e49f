// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Sparse Merkle trees
//!
//! A [`MerkleTree`] stores the nodes of a binary SHA-256 tree keyed by their generalized index:
//! the root is `1` and the children of node `i` are `2i` and `2i + 1`. Subtrees can be grafted
//! under a leaf, which is how the root of a nested container is expanded into its own fields when
//! a branch has to go through it.

use crate::crypto::hash::{sha2_hash_concat, HashValue};
use crate::merkle::error::MerkleError;
use crate::merkle::utils::{concat_generalized_indices, generalized_index_depth};
use std::collections::BTreeMap;

/// Generalized index of the root of any tree.
pub const ROOT_GENERALIZED_INDEX: u64 = 1;

/// A binary Merkle tree addressed by generalized index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    nodes: BTreeMap<u64, HashValue>,
}

impl MerkleTree {
    /// Builds a complete tree over the given leaves, padding them with zero hashes up to the next
    /// power of two.
    ///
    /// # Errors
    ///
    /// Returns a `MerkleError::InvalidLeafCount` if `leaves` is empty.
    pub fn from_leaves(leaves: &[HashValue]) -> Result<Self, MerkleError> {
        if leaves.is_empty() {
            return Err(MerkleError::InvalidLeafCount);
        }

        let width = leaves.len().next_power_of_two() as u64;
        let mut nodes = BTreeMap::new();

        for i in 0..width {
            let leaf = leaves.get(i as usize).copied().unwrap_or_default();
            nodes.insert(width + i, leaf);
        }

        let mut tree = Self { nodes };
        for index in (ROOT_GENERALIZED_INDEX..width).rev() {
            tree.rehash(index)?;
        }

        Ok(tree)
    }

    /// Root of the tree.
    pub fn root(&self) -> HashValue {
        self.nodes
            .get(&ROOT_GENERALIZED_INDEX)
            .copied()
            .unwrap_or_default()
    }

    /// Value of the node at `generalized_index`.
    ///
    /// # Errors
    ///
    /// Returns a `MerkleError::IndexOutOfRange` if the node is not part of the tree.
    pub fn node(&self, generalized_index: u64) -> Result<&HashValue, MerkleError> {
        self.nodes
            .get(&generalized_index)
            .ok_or(MerkleError::IndexOutOfRange { generalized_index })
    }

    /// Whether the node at `generalized_index` is in the tree and has no children.
    pub fn is_leaf(&self, generalized_index: u64) -> bool {
        self.nodes.contains_key(&generalized_index)
            && generalized_index
                .checked_mul(2)
                .map_or(true, |left| !self.nodes.contains_key(&left))
    }

    /// Replaces the leaf at `generalized_index` by `subtree`, then recomputes the ancestors.
    ///
    /// The root of `subtree` does not need to match the replaced leaf. Grafting a subtree whose
    /// root is equal to the leaf keeps the root of the tree unchanged.
    ///
    /// # Errors
    ///
    /// Returns a `MerkleError::Graft` if the target node is missing or has children, or if the
    /// resulting indices would overflow.
    pub fn graft(&mut self, generalized_index: u64, subtree: &MerkleTree) -> Result<(), MerkleError> {
        if !self.is_leaf(generalized_index) {
            return Err(MerkleError::Graft {
                generalized_index,
                reason: "target is not a leaf of the tree",
            });
        }

        // The tree is left untouched if any index overflows.
        let grafted = subtree
            .nodes
            .iter()
            .map(|(inner, hash)| {
                concat_generalized_indices(generalized_index, *inner)
                    .map(|outer| (outer, *hash))
                    .ok_or(MerkleError::Graft {
                        generalized_index,
                        reason: "subtree is too deep",
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.nodes.extend(grafted);

        let mut index = generalized_index;
        while index > ROOT_GENERALIZED_INDEX {
            index /= 2;
            self.rehash(index)?;
        }

        Ok(())
    }

    /// Returns the sibling hashes from the node at `generalized_index` up to the root, bottom
    /// first.
    ///
    /// # Errors
    ///
    /// Returns a `MerkleError::IndexOutOfRange` if the node, or one of the siblings on its path, is
    /// not part of the tree.
    pub fn branch(&self, generalized_index: u64) -> Result<Vec<HashValue>, MerkleError> {
        self.node(generalized_index)?;

        let mut branch = Vec::with_capacity(generalized_index_depth(generalized_index));
        let mut index = generalized_index;
        while index > ROOT_GENERALIZED_INDEX {
            branch.push(*self.node(index ^ 1)?);
            index /= 2;
        }

        Ok(branch)
    }

    fn rehash(&mut self, index: u64) -> Result<(), MerkleError> {
        let left = *self.node(2 * index)?;
        let right = *self.node(2 * index + 1)?;
        self.nodes.insert(index, sha2_hash_concat(&left, &right));

        Ok(())
    }
}

/// Sibling path proving the node at `generalized_index` of `tree`. See [`MerkleTree::branch`].
pub fn merkle_branch(tree: &MerkleTree, generalized_index: u64) -> Result<Vec<HashValue>, MerkleError> {
    tree.branch(generalized_index)
}
