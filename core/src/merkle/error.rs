// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Errors possible while building Merkle trees or producing and checking branches.
#[derive(Debug, Error)]
pub enum MerkleError {
    #[error("Generalized index {generalized_index} is not a node of the tree")]
    IndexOutOfRange { generalized_index: u64 },
    #[error("Cannot graft a subtree at generalized index {generalized_index}: {reason}")]
    Graft {
        generalized_index: u64,
        reason: &'static str,
    },
    #[error("A Merkle tree needs at least one leaf")]
    InvalidLeafCount,
    #[error("Unexpected branch length received. Expected {expected}, got {actual}")]
    InvalidBranchLength { expected: usize, actual: usize },
    #[error("Unexpected generalized index for the depth. Generalized index {generalized_index} (depth {generalized_index_depth}) is not valid for depth {depth}")]
    InvalidGeneralizedIndex {
        depth: usize,
        generalized_index: u64,
        generalized_index_depth: usize,
    },
}
