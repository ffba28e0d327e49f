// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Circuit inputs
//!
//! Inputs of the two circuits run by the prover: the header signature circuit, which checks a
//! sync committee signature over a signing root, and the committee commitment circuit, which
//! computes a Poseidon commitment to a sync committee.

use crate::config::{COMMITTEE_CIRCUIT, HEADER_CIRCUIT};
use crate::crypto::field::ByteInts;
use crate::crypto::hash::HashValue;
use crate::crypto::sig::{G1Limbs, G2Limbs, PublicKey, Signature};
use crate::shape_error;
use crate::types::bitfield::ParticipationBitfield;
use crate::types::error::{ShapeError, TypesError};
use getset::Getters;
use serde::Serialize;

/// Input of the header signature circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[getset(get = "pub")]
pub struct HeaderProofInput {
    signing_root: ByteInts,
    pubkeys: Vec<G1Limbs>,
    pubkeybits: Vec<u8>,
    signature: G2Limbs,
}

impl HeaderProofInput {
    /// Builds the input from decoded values.
    ///
    /// # Arguments
    ///
    /// * `signing_root` - The signed message.
    /// * `pubkeys` - The full committee, in committee order.
    /// * `participation` - One bit per committee member.
    /// * `signature` - The aggregate signature.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError` if the participation does not cover the committee or a point cannot
    /// be converted to limbs.
    pub fn new(
        signing_root: &HashValue,
        pubkeys: &[PublicKey],
        participation: &ParticipationBitfield,
        signature: &Signature,
    ) -> Result<Self, TypesError> {
        if participation.len() != pubkeys.len() {
            return Err(shape_error!(
                "HeaderProofInput",
                ShapeError::BitfieldLength {
                    expected: pubkeys.len(),
                    actual: participation.len(),
                }
            ));
        }

        Ok(Self {
            signing_root: ByteInts::new(signing_root.to_vec()),
            pubkeys: pubkeys
                .iter()
                .map(PublicKey::to_limbs)
                .collect::<Result<_, _>>()?,
            pubkeybits: participation.to_circuit_bits(),
            signature: signature.to_limbs()?,
        })
    }

    pub const fn circuit(&self) -> &'static str {
        HEADER_CIRCUIT
    }
}

/// Input of the committee commitment circuit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[serde(rename_all = "camelCase")]
#[getset(get = "pub")]
pub struct CommitteeProofInput {
    pubkeys: Vec<G1Limbs>,
    pubkey_hex: Vec<ByteInts>,
    aggregate_pubkey_hex: ByteInts,
}

impl CommitteeProofInput {
    /// Builds the input for a committee and its aggregate key, as published in the beacon state.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError` if the committee is empty or a key cannot be converted to limbs.
    pub fn new(pubkeys: &[PublicKey], aggregate_pubkey: &PublicKey) -> Result<Self, TypesError> {
        if pubkeys.is_empty() {
            return Err(shape_error!(
                "CommitteeProofInput",
                ShapeError::EmptyCommittee
            ));
        }

        Ok(Self {
            pubkeys: pubkeys
                .iter()
                .map(PublicKey::to_limbs)
                .collect::<Result<_, _>>()?,
            pubkey_hex: pubkeys
                .iter()
                .map(|pubkey| ByteInts::new(*pubkey.compressed_pubkey()))
                .collect(),
            aggregate_pubkey_hex: ByteInts::new(*aggregate_pubkey.compressed_pubkey()),
        })
    }

    pub const fn circuit(&self) -> &'static str {
        COMMITTEE_CIRCUIT
    }
}

/// A circuit input together with the name of the circuit, the body of a proof request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackedInput<'a, T: Serialize> {
    inputs: &'a T,
    circuit: &'a str,
}

impl<'a, T: Serialize> PackedInput<'a, T> {
    pub const fn new(inputs: &'a T, circuit: &'a str) -> Self {
        Self { inputs, circuit }
    }

    pub const fn inputs(&self) -> &'a T {
        self.inputs
    }

    pub const fn circuit(&self) -> &'a str {
        self.circuit
    }
}

impl<'a> From<&'a HeaderProofInput> for PackedInput<'a, HeaderProofInput> {
    fn from(input: &'a HeaderProofInput) -> Self {
        Self::new(input, input.circuit())
    }
}

impl<'a> From<&'a CommitteeProofInput> for PackedInput<'a, CommitteeProofInput> {
    fn from(input: &'a CommitteeProofInput) -> Self {
        Self::new(input, input.circuit())
    }
}
