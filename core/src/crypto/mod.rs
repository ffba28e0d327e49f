// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: APACHE-2.0

//! # Cryptographic Utilities for the Beacon Light Client
//!
//! This module contains the cryptographic building blocks used to prepare circuit witnesses.
//!
//! ## Sub-modules
//!
//! - `field`: Limb encoding of BLS12-381 field elements and per-byte encoding of raw bytes.
//! - `hash`: The `HashValue` type and SHA-256 helpers.
//! - `sig`: The `Signature` and `PublicKey` structures and their associated methods.
//! - `curve`: The `CurveOps` capability the verifier is written against.
//! - `verifier`: The `SignatureVerifier`, enforcing the committee quorum before the pairing check.
//! - `error`: The `CryptoError` and `VerificationError` types used throughout the `crypto` module.

pub mod curve;
pub mod error;
pub mod field;
pub mod hash;
pub mod sig;
pub mod verifier;
