// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Merkle Tree
//!
//! This module provides the utilities to create and manipulate SSZ Merkle Trees. The Merkle Tree is
//! a binary tree where each leaf node is a 32-byte chunk and each internal node is the SHA-256 hash
//! of its children. Nodes are addressed by generalized index.
//!
//! ## Sub-modules
//!
//! - `error`: This sub-module contains the error types that can be returned by the Merkle Tree
//!   utilities.
//! - `proof`: This sub-module contains the utilities to verify the branches carried by a light
//!   client update.
//! - `tree`: This sub-module contains the `MerkleTree` type, used to extract branches.
//! - `utils`: This sub-module contains the root computation and generalized index helpers.

use crate::crypto::hash::HashValue;
use crate::merkle::error::MerkleError;
use crate::types::BYTES_32_LEN;

pub mod error;
pub mod proof;
pub mod tree;
pub mod utils;

/// The `Merkleized` trait is implemented by types that can be hashed and represented as a single
/// Merkle Tree root.
pub trait Merkleized {
    /// Hash the object following [SSZ standard](https://www.ssz.dev/show) and return the root of the
    /// Merkle Tree.
    ///
    /// # Returns
    ///
    /// The root of the Merkle Tree.
    fn hash_tree_root(&self) -> Result<HashValue, MerkleError>;
}

impl Merkleized for HashValue {
    fn hash_tree_root(&self) -> Result<HashValue, MerkleError> {
        Ok(*self)
    }
}

impl Merkleized for u64 {
    fn hash_tree_root(&self) -> Result<HashValue, MerkleError> {
        let mut leaf = [0; BYTES_32_LEN];
        leaf[..8].copy_from_slice(&self.to_le_bytes());

        Ok(HashValue::new(leaf))
    }
}
