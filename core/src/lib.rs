// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: APACHE-2.0

//! # Beacon Light Client Core
//!
//! This crate provides the core types and utilities used to turn beacon chain data into witnesses
//! for the sync committee proof circuits, and into updates for an on-chain light client. It is
//! divided into several sub-modules, each with its own specific functionality.
//!
//! ## Sub-modules
//!
//! - `config`: Protocol and circuit parameters.
//! - `crypto`: Field encoding, hashing and BLS signature verification.
//! - `merkle`: SSZ Merkleization, Merkle trees and branch verification.
//! - `types`: Headers, participation bits, circuit inputs, proofs and light client updates.
//! - `test_utils`: Test fixtures. It is only included in tests or when the `test-utils` feature is
//!   enabled.
//!
//! For more detailed information, users should refer to the specific documentation for each sub-module.

pub mod config;
pub mod crypto;
pub mod merkle;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod types;
