// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

use crate::crypto::error::CryptoError;
use crate::merkle::error::MerkleError;
use thiserror::Error;

/// Errors possible during type manipulation.
#[derive(Debug, Error)]
pub enum TypesError {
    #[error("Failed to deserialize {structure}: {source}")]
    DeserializationError {
        structure: String,
        #[source]
        source: Box<dyn std::error::Error + Sync + Send>,
    },
    #[error("Malformed {structure}: {source}")]
    Shape {
        structure: String,
        #[source]
        source: ShapeError,
    },
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error(transparent)]
    Merkle(#[from] MerkleError),
}

/// Structural errors: an input has the wrong number of elements, or is missing one.
#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("Participation covers {actual} validators, expected {expected}")]
    BitfieldLength { expected: usize, actual: usize },
    #[error("Packed participation is {actual} bytes long, expected {expected} for {bit_count} validators")]
    BitfieldByteLength {
        bit_count: usize,
        expected: usize,
        actual: usize,
    },
    #[error("Packed participation has bits set past validator {bit_count}")]
    BitfieldPadding { bit_count: usize },
    #[error("Sync committee has {actual} members, expected {expected}")]
    CommitteeSize { expected: usize, actual: usize },
    #[error("Sync committee is empty")]
    EmptyCommittee,
    #[error("Branch for {field} has {actual} siblings, expected {expected}")]
    BranchLength {
        field: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Missing {field}")]
    MissingField { field: String },
}

/// Macro to create a `TypesError::DeserializationError` with the given structure and source.
#[macro_export]
macro_rules! deserialization_error {
    ($structure:expr, $source:expr) => {
        TypesError::DeserializationError {
            structure: String::from($structure),
            source: $source.into(),
        }
    };
}

/// Macro to create a `TypesError::Shape` with the given structure and shape error.
#[macro_export]
macro_rules! shape_error {
    ($structure:expr, $source:expr) => {
        TypesError::Shape {
            structure: String::from($structure),
            source: $source,
        }
    };
}
