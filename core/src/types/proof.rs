// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Groth16 proofs
//!
//! The prover answers with a proof in the snarkjs layout and the public signals of the circuit.
//! [`Groth16Proof`] is the layout expected by the on-chain verifier, where the coordinates of
//! each `b` component are swapped.

use crate::config::SYNC_COMMITTEE_COMMITMENT_SIGNAL_INDEX;
use crate::crypto::field::parse_decimal;
use crate::shape_error;
use crate::types::error::{ShapeError, TypesError};
use getset::Getters;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A proof in the snarkjs layout. Fields other than the three points are kept as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct RawProof {
    pi_a: Vec<String>,
    pi_b: Vec<Vec<String>>,
    pi_c: Vec<String>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Response of the prover for a proof generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct ProverResponse {
    proof: RawProof,
    #[serde(alias = "publicSignals")]
    pub_signals: Vec<String>,
}

impl ProverResponse {
    pub const fn new(proof: RawProof, pub_signals: Vec<String>) -> Self {
        Self { proof, pub_signals }
    }

    /// The Poseidon commitment to a sync committee, from the public signals of the commitment
    /// circuit.
    ///
    /// # Errors
    ///
    /// Returns a `TypesError` if the signal is missing or is not a decimal integer.
    pub fn committee_commitment(&self) -> Result<String, TypesError> {
        let signal = self
            .pub_signals
            .get(SYNC_COMMITTEE_COMMITMENT_SIGNAL_INDEX)
            .ok_or_else(|| {
                shape_error!(
                    "ProverResponse",
                    ShapeError::MissingField {
                        field: format!("pub_signals[{SYNC_COMMITTEE_COMMITMENT_SIGNAL_INDEX}]"),
                    }
                )
            })?;

        decimal_to_hex(signal)
    }
}

/// A Groth16 proof in the layout of the on-chain verifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct Groth16Proof {
    a: [String; 2],
    b: [[String; 2]; 2],
    c: [String; 2],
}

impl TryFrom<&RawProof> for Groth16Proof {
    type Error = TypesError;

    fn try_from(proof: &RawProof) -> Result<Self, Self::Error> {
        let coordinate = |point: &[String], index: usize, field: &str| {
            point.get(index).cloned().ok_or_else(|| {
                shape_error!(
                    "RawProof",
                    ShapeError::MissingField {
                        field: format!("{field}[{index}]"),
                    }
                )
            })
        };
        let b_row = |row: usize| {
            proof.pi_b.get(row).map(Vec::as_slice).ok_or_else(|| {
                shape_error!(
                    "RawProof",
                    ShapeError::MissingField {
                        field: format!("pi_b[{row}]"),
                    }
                )
            })
        };

        let (b0, b1) = (b_row(0)?, b_row(1)?);

        Ok(Self {
            a: [
                coordinate(&proof.pi_a, 0, "pi_a")?,
                coordinate(&proof.pi_a, 1, "pi_a")?,
            ],
            b: [
                [coordinate(b0, 1, "pi_b[0]")?, coordinate(b0, 0, "pi_b[0]")?],
                [coordinate(b1, 1, "pi_b[1]")?, coordinate(b1, 0, "pi_b[1]")?],
            ],
            c: [
                coordinate(&proof.pi_c, 0, "pi_c")?,
                coordinate(&proof.pi_c, 1, "pi_c")?,
            ],
        })
    }
}

/// A committee commitment proof with the commitment it proves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct CommitmentProof {
    proof: Groth16Proof,
    commitment: String,
}

impl TryFrom<&ProverResponse> for CommitmentProof {
    type Error = TypesError;

    fn try_from(response: &ProverResponse) -> Result<Self, Self::Error> {
        Ok(Self {
            proof: Groth16Proof::try_from(response.proof())?,
            commitment: response.committee_commitment()?,
        })
    }
}

/// Minimal even-length `0x` hexadecimal form of a decimal integer.
///
/// # Errors
///
/// Returns a `TypesError::Crypto` if `value` is not a non-negative decimal integer.
pub fn decimal_to_hex(value: &str) -> Result<String, TypesError> {
    let int = parse_decimal(value)?;

    let digits = format!("{int:x}");
    if digits.len() % 2 == 0 {
        Ok(format!("0x{digits}"))
    } else {
        Ok(format!("0x0{digits}"))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn raw_proof() -> RawProof {
        serde_json::from_str(
            r#"{
                "pi_a": ["1", "2", "1"],
                "pi_b": [["3", "4"], ["5", "6"], ["1", "0"]],
                "pi_c": ["7", "8", "1"],
                "protocol": "groth16",
                "curve": "bn128"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_b_coordinates_swapped() {
        let proof = Groth16Proof::try_from(&raw_proof()).unwrap();

        assert_eq!(proof.a(), &["1".to_string(), "2".to_string()]);
        assert_eq!(
            proof.b(),
            &[
                ["4".to_string(), "3".to_string()],
                ["6".to_string(), "5".to_string()]
            ]
        );
        assert_eq!(proof.c(), &["7".to_string(), "8".to_string()]);
    }

    #[test]
    fn test_extra_fields_kept() {
        let proof = raw_proof();
        assert_eq!(proof.extra()["protocol"], "groth16");

        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(json["curve"], "bn128");
        assert_eq!(json["pi_b"][1][0], "5");
    }

    #[test]
    fn test_missing_coordinate() {
        let mut proof = raw_proof();
        proof.pi_b.truncate(1);

        assert!(matches!(
            Groth16Proof::try_from(&proof),
            Err(TypesError::Shape {
                source: ShapeError::MissingField { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_commitment() {
        let mut signals = (0..33).map(|i| i.to_string()).collect::<Vec<_>>();
        signals[32] = "4660".to_string();
        let response = ProverResponse::new(raw_proof(), signals);

        let proof = CommitmentProof::try_from(&response).unwrap();
        assert_eq!(proof.commitment(), "0x1234");

        let response = ProverResponse::new(raw_proof(), vec!["1".to_string(); 32]);
        assert!(response.committee_commitment().is_err());

        let mut signals = vec!["1".to_string(); 33];
        signals[32] = String::new();
        let response = ProverResponse::new(raw_proof(), signals);
        assert!(response.committee_commitment().is_err());
    }

    #[test]
    fn test_decimal_to_hex() {
        assert_eq!(decimal_to_hex("0").unwrap(), "0x00");
        assert_eq!(decimal_to_hex("15").unwrap(), "0x0f");
        assert_eq!(decimal_to_hex("256").unwrap(), "0x0100");
        assert!(decimal_to_hex("-5").is_err());
        assert!(decimal_to_hex("0x10").is_err());
        assert!(decimal_to_hex("").is_err());
        assert!(decimal_to_hex("  ").is_err());
    }

    #[test]
    fn test_prover_response_aliases() {
        let json = r#"{
            "proof": {"pi_a": ["1", "2"], "pi_b": [["3", "4"], ["5", "6"]], "pi_c": ["7", "8"]},
            "publicSignals": ["9"]
        }"#;
        let response: ProverResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.pub_signals(), &vec!["9".to_string()]);
    }
}
