// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: APACHE-2.0

use crate::types::error::ShapeError;
use thiserror::Error;

/// The error type for the `crypto` module.
///
/// Every variant is a decoding failure: the input could not be turned into the value the caller
/// asked for. They are always fatal to the current update attempt.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("Error while decoding hexadecimal value: {source}")]
    InvalidHexadecimal {
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("Received data of invalid length for {structure}. Expected {expected}, got {actual}.")]
    InvalidLength {
        structure: String,
        expected: usize,
        actual: usize,
    },
    #[error("Bytes received for {structure} do not encode a valid point of the expected subgroup")]
    InvalidPoint { structure: String },
    #[error("Value does not fit in the limb representation, it has {bits} significant bits")]
    FieldOverflow { bits: usize },
    #[error("Negative values cannot be encoded as limbs")]
    NegativeValue,
    #[error("Invalid decimal integer: {value}")]
    InvalidDecimal { value: String },
}

/// Errors raised while checking an aggregate signature.
///
/// A pairing check that simply fails is not an error, see
/// [`crate::crypto::verifier::VerificationOutcome`].
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("Malformed verification input: {0}")]
    Shape(#[from] ShapeError),
    #[error("Insufficient sync committee participation: {active_count} signers, more than {threshold} required")]
    Quorum { active_count: usize, threshold: usize },
}
