// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: APACHE-2.0

//! # Types Module
//!
//! This module provides the data structures flowing through witness preparation: beacon block
//! headers and participation bits as received from a beacon node, the circuit inputs derived from
//! them, the proofs returned by the prover and the light client update submitted on chain.
//!
//! ## Sub-modules
//!
//! - `bitfield`: Participation bits of a sync aggregate.
//! - `block`: The `BeaconBlockHeader` structure and its normalized on-chain form.
//! - `signing_data`: Domain and signing root computation.
//! - `proof_input`: Inputs of the header signature and committee commitment circuits.
//! - `proof`: Groth16 proofs as returned by the prover.
//! - `update`: The `LightClientUpdate` structure and its assembly.
//! - `utils`: Slot, epoch and period arithmetic.
//!
//! For more detailed information, users should refer to the specific
//! documentation for each sub-module.

pub mod bitfield;
pub mod block;
pub mod error;
pub mod proof;
pub mod proof_input;
pub mod signing_data;
pub mod update;
pub mod utils;

/// Length of a bytes32 array.
pub const BYTES_32_LEN: usize = 32;

/// Length of u64 in bytes.
pub const U64_LEN: usize = (u64::BITS / 8) as usize;

/// A 32-byte array.
pub type Bytes32 = [u8; BYTES_32_LEN];

/// A fork version, e.g. `0x04000000` for Deneb on mainnet.
pub type ForkVersion = [u8; crate::config::FORK_VERSION_LEN];

/// A domain type, e.g. [`crate::config::DOMAIN_SYNC_COMMITTEE`].
pub type DomainType = [u8; crate::config::DOMAIN_TYPE_LEN];
