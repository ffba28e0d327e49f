// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Light Client
//!
//! This crate fetches the data needed to prove that a sync committee signed a beacon block header,
//! prepares the inputs of the proving circuits with [`beacon_lc_core`], requests the proofs and
//! assembles the light client updates submitted on-chain.
//!
//! ## Binary
//!
//! - `client`: A CLI preparing circuit inputs and proofs for a slot or a sync committee period,
//!   and managing the artifacts exchanged with the proving service.
//!
//! ## Library
//!
//! - [`artifacts`]: The on-disk layout of circuit inputs and proofs.
//! - [`client`]: The clients of the Beacon Node API and of the proving service.
//! - [`pipeline`]: The orchestration of witness preparation.
//! - [`types`]: Types and utilities to leverage data from the remote services.
//!
//! For more detailed information, users should refer to the specific documentation for each
//! sub-module.

pub mod artifacts;
pub mod client;
pub mod pipeline;
#[cfg(test)]
pub mod test_utils;
pub mod types;
