// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Signing Data
//!
//! The module contains the `SigningData` data structure which is used to sign messages in the Ethereum 2.0 network.
//! The data structure notably contains the object root and the domain to sign the message.
//!
//! The domain binds a signature to a fork and a chain: it is the domain type followed by the first
//! 28 bytes of the `ForkData` root.

use crate::config::DOMAIN_SYNC_COMMITTEE;
use crate::crypto::hash::HashValue;
use crate::merkle::error::MerkleError;
use crate::merkle::utils::{merkle_root, DataType};
use crate::merkle::Merkleized;
use crate::types::{Bytes32, DomainType, ForkVersion, BYTES_32_LEN};

/// `ForkData` as defined in [the CL specifications](https://github.com/ethereum/consensus-specs/blob/dev/specs/phase0/beacon-chain.md#forkdata).
pub struct ForkData {
    current_version: ForkVersion,
    genesis_validators_root: HashValue,
}

impl ForkData {
    pub const fn new(current_version: ForkVersion, genesis_validators_root: HashValue) -> Self {
        Self {
            current_version,
            genesis_validators_root,
        }
    }
}

impl Merkleized for ForkData {
    fn hash_tree_root(&self) -> Result<HashValue, MerkleError> {
        let mut version = [0; BYTES_32_LEN];
        version[..self.current_version.len()].copy_from_slice(&self.current_version);

        merkle_root(DataType::Struct(vec![
            HashValue::new(version),
            self.genesis_validators_root,
        ]))
    }
}

pub struct SigningData {
    object_root: HashValue,
    domain: Bytes32,
}

impl SigningData {
    pub const fn new(object_root: HashValue, domain: Bytes32) -> Self {
        Self {
            object_root,
            domain,
        }
    }
}

impl Merkleized for SigningData {
    fn hash_tree_root(&self) -> Result<HashValue, MerkleError> {
        let leaves: Vec<HashValue> = vec![self.object_root, self.domain.into()];

        merkle_root(DataType::Struct(leaves))
    }
}

/// Computes a signature domain.
///
/// # Arguments
///
/// * `domain_type` - The kind of message signed.
/// * `fork_version` - The fork active at the signed slot.
/// * `genesis_validators_root` - Identifies the chain.
///
/// # Returns
///
/// `domain_type || fork_data_root[..28]`.
pub fn compute_domain(
    domain_type: DomainType,
    fork_version: ForkVersion,
    genesis_validators_root: &HashValue,
) -> Result<Bytes32, MerkleError> {
    let fork_data_root =
        ForkData::new(fork_version, *genesis_validators_root).hash_tree_root()?;

    let mut domain = [0; BYTES_32_LEN];
    domain[..domain_type.len()].copy_from_slice(&domain_type);
    domain[domain_type.len()..]
        .copy_from_slice(&fork_data_root.hash()[..BYTES_32_LEN - domain_type.len()]);

    Ok(domain)
}

/// Computes the domain of sync committee signatures, see [`compute_domain`].
pub fn compute_sync_committee_domain(
    fork_version: ForkVersion,
    genesis_validators_root: &HashValue,
) -> Result<Bytes32, MerkleError> {
    compute_domain(DOMAIN_SYNC_COMMITTEE, fork_version, genesis_validators_root)
}

/// Computes the message signed by the sync committee for a header root.
///
/// # Arguments
///
/// * `object_root` - The hash tree root of the signed header.
/// * `domain` - The signature domain.
///
/// # Returns
///
/// `sha256(object_root || domain)`.
pub fn compute_signing_root(
    object_root: &HashValue,
    domain: &Bytes32,
) -> Result<HashValue, MerkleError> {
    SigningData::new(*object_root, *domain).hash_tree_root()
}
