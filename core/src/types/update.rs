// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Light Client Update
//!
//! The module contains the `LightClientUpdate` data structure, the payload submitted to the on-chain
//! light client to move it to the next sync committee period. It carries the attested and
//! finalized headers, the branches anchoring the finalized header, the next sync committee and the
//! execution payload fields, and the proof that the sync committee signed the attested header.

use crate::config::{
    EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX, EXECUTION_STATE_ROOT_GENERALIZED_INDEX,
    FINALIZED_ROOT_GENERALIZED_INDEX, NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX,
};
use crate::crypto::hash::HashValue;
use crate::merkle::error::MerkleError;
use crate::merkle::proof::{
    is_block_number_proof_valid, is_execution_state_root_proof_valid, is_finality_proof_valid,
    is_next_committee_proof_valid,
};
use crate::merkle::utils::generalized_index_depth;
use crate::types::block::{BeaconBlockHeader, HeaderTuple};
use crate::types::error::ShapeError;
use crate::types::proof::Groth16Proof;
use getset::Getters;
use serde::{Deserialize, Serialize};

/// Participation and signature proof of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[getset(get = "pub")]
pub struct SignatureSection {
    participation: u64,
    proof: Groth16Proof,
}

/// Everything needed to assemble a [`LightClientUpdate`].
#[derive(Debug, Clone)]
pub struct UpdateParts {
    pub attested_header: BeaconBlockHeader,
    pub finalized_header: BeaconBlockHeader,
    pub finality_branch: Vec<HashValue>,
    pub next_sync_committee_root: HashValue,
    pub next_sync_committee_branch: Vec<HashValue>,
    pub execution_state_root: HashValue,
    pub execution_state_root_branch: Vec<HashValue>,
    pub block_number: u64,
    pub block_number_branch: Vec<HashValue>,
    pub participation: u64,
    pub signature_proof: Groth16Proof,
}

/// A light client update in the form expected by the on-chain light client.
///
/// Deserialized updates go through [`LightClientUpdate::assemble`], so their branches are
/// checked the same way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase", try_from = "UpdateRecord")]
#[getset(get = "pub")]
pub struct LightClientUpdate {
    attested_header: HeaderTuple,
    finalized_header: HeaderTuple,
    finality_branch: Vec<HashValue>,
    next_sync_committee_root: HashValue,
    next_sync_committee_branch: Vec<HashValue>,
    execution_state_root: HashValue,
    execution_state_root_branch: Vec<HashValue>,
    block_number: u64,
    block_number_branch: Vec<HashValue>,
    signature: SignatureSection,
}

/// The serialized form of a [`LightClientUpdate`], before its branches are checked.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateRecord {
    attested_header: HeaderTuple,
    finalized_header: HeaderTuple,
    finality_branch: Vec<HashValue>,
    next_sync_committee_root: HashValue,
    next_sync_committee_branch: Vec<HashValue>,
    execution_state_root: HashValue,
    execution_state_root_branch: Vec<HashValue>,
    block_number: u64,
    block_number_branch: Vec<HashValue>,
    signature: SignatureSection,
}

impl TryFrom<UpdateRecord> for LightClientUpdate {
    type Error = ShapeError;

    fn try_from(record: UpdateRecord) -> Result<Self, Self::Error> {
        Self::assemble(UpdateParts {
            attested_header: BeaconBlockHeader::from(&record.attested_header),
            finalized_header: BeaconBlockHeader::from(&record.finalized_header),
            finality_branch: record.finality_branch,
            next_sync_committee_root: record.next_sync_committee_root,
            next_sync_committee_branch: record.next_sync_committee_branch,
            execution_state_root: record.execution_state_root,
            execution_state_root_branch: record.execution_state_root_branch,
            block_number: record.block_number,
            block_number_branch: record.block_number_branch,
            participation: record.signature.participation,
            signature_proof: record.signature.proof,
        })
    }
}

impl LightClientUpdate {
    /// Assembles an update, normalizing headers to their on-chain form.
    ///
    /// # Errors
    ///
    /// Returns a `ShapeError::BranchLength` if a branch does not have exactly one sibling per
    /// level between its leaf and its root.
    pub fn assemble(parts: UpdateParts) -> Result<Self, ShapeError> {
        check_branch_length(
            "finality_branch",
            &parts.finality_branch,
            FINALIZED_ROOT_GENERALIZED_INDEX,
        )?;
        check_branch_length(
            "next_sync_committee_branch",
            &parts.next_sync_committee_branch,
            NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX,
        )?;
        check_branch_length(
            "execution_state_root_branch",
            &parts.execution_state_root_branch,
            EXECUTION_STATE_ROOT_GENERALIZED_INDEX,
        )?;
        check_branch_length(
            "block_number_branch",
            &parts.block_number_branch,
            EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX,
        )?;

        Ok(Self {
            attested_header: HeaderTuple::from(&parts.attested_header),
            finalized_header: HeaderTuple::from(&parts.finalized_header),
            finality_branch: parts.finality_branch,
            next_sync_committee_root: parts.next_sync_committee_root,
            next_sync_committee_branch: parts.next_sync_committee_branch,
            execution_state_root: parts.execution_state_root,
            execution_state_root_branch: parts.execution_state_root_branch,
            block_number: parts.block_number,
            block_number_branch: parts.block_number_branch,
            signature: SignatureSection {
                participation: parts.participation,
                proof: parts.signature_proof,
            },
        })
    }

    /// Checks every branch of the update against the root it is anchored to.
    ///
    /// The finality branch is anchored to the attested state root. The next sync committee and
    /// execution payload branches are anchored to the finalized state and body roots.
    ///
    /// # Returns
    ///
    /// `true` if all branches are valid.
    pub fn verify_branches(&self) -> Result<bool, MerkleError> {
        let finalized_header = BeaconBlockHeader::from(&self.finalized_header);
        let finalized_body_root = &self.finalized_header.body_root;

        Ok(is_finality_proof_valid(
            &self.attested_header.state_root,
            &finalized_header,
            &self.finality_branch,
        )? && is_next_committee_proof_valid(
            &self.finalized_header.state_root,
            &self.next_sync_committee_root,
            &self.next_sync_committee_branch,
        )? && is_execution_state_root_proof_valid(
            finalized_body_root,
            &self.execution_state_root,
            &self.execution_state_root_branch,
        )? && is_block_number_proof_valid(
            finalized_body_root,
            self.block_number,
            &self.block_number_branch,
        )?)
    }
}

fn check_branch_length(
    field: &'static str,
    branch: &[HashValue],
    generalized_index: u64,
) -> Result<(), ShapeError> {
    let expected = generalized_index_depth(generalized_index);
    if branch.len() != expected {
        return Err(ShapeError::BranchLength {
            field,
            expected,
            actual: branch.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::merkle::Merkleized;
    use crate::test_utils::{body_tree_with_execution, header, state_tree_with};
    use crate::types::proof::RawProof;

    fn signature_proof() -> Groth16Proof {
        let raw: RawProof = serde_json::from_str(
            r#"{"pi_a": ["1", "2"], "pi_b": [["3", "4"], ["5", "6"]], "pi_c": ["7", "8"]}"#,
        )
        .unwrap();
        Groth16Proof::try_from(&raw).unwrap()
    }

    fn parts() -> UpdateParts {
        let execution_state_root = HashValue::new([0xee; 32]);
        let body = body_tree_with_execution(&execution_state_root, 19_000_000);
        let committee_root = HashValue::new([0x55; 32]);
        let finalized_state = state_tree_with(&header(7_397_376), &committee_root);
        let finalized_header = BeaconBlockHeader::new(
            7_405_568,
            42,
            HashValue::new([1; 32]),
            finalized_state.root(),
            body.root(),
        );

        let attested_state = state_tree_with(&finalized_header, &HashValue::new([0x66; 32]));
        let attested_header = BeaconBlockHeader::new(
            7_405_632,
            43,
            HashValue::new([3; 32]),
            attested_state.root(),
            HashValue::new([4; 32]),
        );

        UpdateParts {
            attested_header,
            finalized_header,
            finality_branch: attested_state
                .branch(FINALIZED_ROOT_GENERALIZED_INDEX)
                .unwrap(),
            next_sync_committee_root: committee_root,
            next_sync_committee_branch: finalized_state
                .branch(NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX)
                .unwrap(),
            execution_state_root,
            execution_state_root_branch: body
                .branch(EXECUTION_STATE_ROOT_GENERALIZED_INDEX)
                .unwrap(),
            block_number: 19_000_000,
            block_number_branch: body.branch(EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX).unwrap(),
            participation: 500,
            signature_proof: signature_proof(),
        }
    }

    #[test]
    fn test_assemble_and_verify() {
        let update = LightClientUpdate::assemble(parts()).unwrap();

        assert_eq!(update.finalized_header().slot, 7_405_568);
        assert_eq!(*update.signature().participation(), 500);
        assert!(update.verify_branches().unwrap());

        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json["attestedHeader"]["proposerIndex"], 43);
        assert_eq!(json["finalityBranch"].as_array().unwrap().len(), 6);
        assert_eq!(json["nextSyncCommitteeBranch"].as_array().unwrap().len(), 5);
        assert_eq!(json["blockNumber"], 19_000_000);
        assert_eq!(json["signature"]["proof"]["b"][0][0], "4");
        assert_eq!(
            json["nextSyncCommitteeRoot"],
            format!("0x{}", "55".repeat(32))
        );
    }

    #[test]
    fn test_wrong_anchor_detected() {
        let mut parts = parts();
        parts.block_number += 1;

        let update = LightClientUpdate::assemble(parts).unwrap();
        assert!(!update.verify_branches().unwrap());
    }

    #[test]
    fn test_branch_length_rejected() {
        let mut short = parts();
        short.finality_branch.pop();
        assert!(matches!(
            LightClientUpdate::assemble(short),
            Err(ShapeError::BranchLength {
                field: "finality_branch",
                expected: 6,
                actual: 5
            })
        ));

        let mut long = parts();
        long.block_number_branch.push(HashValue::default());
        assert!(matches!(
            LightClientUpdate::assemble(long),
            Err(ShapeError::BranchLength {
                field: "block_number_branch",
                expected: 8,
                actual: 9
            })
        ));

        let mut missing = parts();
        missing.next_sync_committee_branch.clear();
        assert!(LightClientUpdate::assemble(missing).is_err());
    }

    #[test]
    fn test_deserialize_checks_branches() {
        let update = LightClientUpdate::assemble(parts()).unwrap();
        let json = serde_json::to_value(&update).unwrap();

        let parsed: LightClientUpdate = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(parsed, update);

        let mut empty = json.clone();
        empty["finalityBranch"] = serde_json::json!([]);
        let err = serde_json::from_value::<LightClientUpdate>(empty).unwrap_err();
        assert!(err.to_string().contains("finality_branch"));

        let mut short = json;
        short["nextSyncCommitteeBranch"] = serde_json::json!([format!("0x{}", "00".repeat(32))]);
        assert!(serde_json::from_value::<LightClientUpdate>(short).is_err());
    }

    #[test]
    fn test_finalized_header_root_is_finality_leaf() {
        let parts = parts();
        let leaf = parts.finalized_header.hash_tree_root().unwrap();
        let update = LightClientUpdate::assemble(parts).unwrap();

        assert!(crate::merkle::proof::is_valid_merkle_branch(
            &leaf,
            update.finality_branch(),
            FINALIZED_ROOT_GENERALIZED_INDEX,
            &update.attested_header().state_root,
        )
        .unwrap());
    }
}
