// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: APACHE-2.0

//! # Types module
//!
//! This module contains the types and utilities necessary to leverage data from the remote
//! services.
//!
//! ## Sub-modules
//!
//! - `beacon`: This sub-module contains the data structures used by the Beacon Node.
//!
//! For more detailed information, users should refer to the specific documentation for each
//! sub-module.

pub mod beacon;
