// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Pipeline
//!
//! Orchestration of the witness preparation. The pipeline fetches consensus data from a
//! [`BeaconApi`], runs it through the core (domain and signing root computation, participation
//! decoding, signature verification, limb encoding), requests proofs from a [`ProvingService`]
//! and assembles light client updates.
//!
//! Independent fetches run concurrently. Every error is logged with the slot or period it occurred
//! at before being returned.

use crate::client::error::ClientError;
use crate::client::{BeaconApi, ProvingService};
use crate::types::beacon::HeaderRecord;
use beacon_lc_core::config::{
    COMMITTEE_CIRCUIT, EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX,
    EXECUTION_STATE_ROOT_GENERALIZED_INDEX, FINALIZED_ROOT_GENERALIZED_INDEX, HEADER_CIRCUIT,
    NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX,
};
use beacon_lc_core::crypto::error::VerificationError;
use beacon_lc_core::crypto::hash::HashValue;
use beacon_lc_core::crypto::sig::PublicKey;
use beacon_lc_core::crypto::verifier::SignatureVerifier;
use beacon_lc_core::merkle::error::MerkleError;
use beacon_lc_core::merkle::Merkleized;
use beacon_lc_core::types::bitfield::ParticipationBitfield;
use beacon_lc_core::types::block::BeaconBlockHeader;
use beacon_lc_core::types::error::{ShapeError, TypesError};
use beacon_lc_core::types::proof::{CommitmentProof, Groth16Proof, ProverResponse};
use beacon_lc_core::types::proof_input::{CommitteeProofInput, HeaderProofInput};
use beacon_lc_core::types::signing_data::{compute_signing_root, compute_sync_committee_domain};
use beacon_lc_core::types::update::{LightClientUpdate, UpdateParts};
use beacon_lc_core::types::utils::{epoch_at_slot, period_start_slot, update_slots_for_period};
use beacon_lc_core::types::U64_LEN;
use getset::{CopyGetters, Getters};
use log::{debug, info, warn};
use std::fmt;
use thiserror::Error;

/// What the pipeline was working on when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Context {
    Slot(u64),
    Period(u64),
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Context::Slot(slot) => write!(f, "slot {slot}"),
            Context::Period(period) => write!(f, "period {period}"),
        }
    }
}

/// Errors possible while preparing witnesses or updates.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Failed to fetch data for {context}: {source}")]
    Client {
        context: Context,
        #[source]
        source: ClientError,
    },
    #[error("Malformed data for {context}: {source}")]
    Types {
        context: Context,
        #[source]
        source: TypesError,
    },
    #[error("Merkleization failed for {context}: {source}")]
    Merkle {
        context: Context,
        #[source]
        source: MerkleError,
    },
    #[error("Signature check failed for {context}: {source}")]
    Verification {
        context: Context,
        #[source]
        source: VerificationError,
    },
    #[error("Invalid shape for {context}: {source}")]
    Shape {
        context: Context,
        #[source]
        source: ShapeError,
    },
    #[error("Failed to serialize circuit input for {context}: {source}")]
    Serialization {
        context: Context,
        #[source]
        source: serde_json::Error,
    },
    #[error("Aggregate signature does not verify for {context}")]
    InvalidSignature { context: Context },
    #[error("Inconsistent data for {context}: {reason}")]
    Inconsistent { context: Context, reason: String },
}

/// Attaches a [`Context`] to the errors of the steps of the pipeline.
trait WithContext<T> {
    fn at(self, context: Context) -> Result<T, PipelineError>;
}

macro_rules! impl_with_context {
    ($($error:ty => $variant:ident),* $(,)?) => {
        $(
            impl<T> WithContext<T> for Result<T, $error> {
                fn at(self, context: Context) -> Result<T, PipelineError> {
                    self.map_err(|source| PipelineError::$variant { context, source })
                }
            }
        )*
    };
}

impl_with_context!(
    ClientError => Client,
    TypesError => Types,
    MerkleError => Merkle,
    VerificationError => Verification,
    ShapeError => Shape,
    serde_json::Error => Serialization,
);

fn inconsistent(context: Context, reason: String) -> PipelineError {
    PipelineError::Inconsistent { context, reason }
}

/// Everything prepared for the header signature circuit at a slot.
#[derive(Debug, Clone, Getters, CopyGetters)]
pub struct HeaderWitness {
    /// Slot of the signed header.
    #[getset(get_copy = "pub")]
    slot: u64,
    #[getset(get = "pub")]
    header: BeaconBlockHeader,
    #[getset(get = "pub")]
    input: HeaderProofInput,
    /// Number of committee members that signed.
    #[getset(get_copy = "pub")]
    participation: usize,
    #[getset(get = "pub")]
    signing_root: HashValue,
    /// Whether the aggregate signature verifies.
    #[getset(get_copy = "pub")]
    verified: bool,
}

/// Orchestrates witness preparation over a beacon node and a proving service.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Pipeline<B, P> {
    beacon: B,
    prover: P,
    verifier: SignatureVerifier,
}

impl<B: BeaconApi, P: ProvingService> Pipeline<B, P> {
    /// A pipeline for mainnet sized sync committees.
    pub const fn new(beacon: B, prover: P) -> Self {
        Self {
            beacon,
            prover,
            verifier: SignatureVerifier::new(),
        }
    }

    /// A pipeline for sync committees of `committee_size` members.
    pub const fn with_committee_size(beacon: B, prover: P, committee_size: usize) -> Self {
        Self {
            beacon,
            prover,
            verifier: SignatureVerifier::with_committee_size(committee_size),
        }
    }

    /// Prepares the input of the header signature circuit for the header at `slot`.
    ///
    /// The signature over the header is read from the sync aggregate of the block at `slot + 1`.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if data could not be fetched or decoded, or if too few committee
    /// members signed. A signature that does not verify is reported through
    /// [`HeaderWitness::verified`].
    pub async fn generate_header_witness(&self, slot: u64) -> Result<HeaderWitness, PipelineError> {
        self.header_witness(slot)
            .await
            .inspect_err(|err| warn!("Could not prepare header witness at slot {slot}: {err}"))
    }

    async fn header_witness(&self, slot: u64) -> Result<HeaderWitness, PipelineError> {
        let context = Context::Slot(slot);
        let aggregate_slot = slot
            .checked_add(1)
            .ok_or_else(|| inconsistent(context, "no slot after the signed header".into()))?;

        let (pubkeys, record, aggregate, genesis_validators_root, fork_version) = tokio::try_join!(
            self.beacon.get_committee_pubkeys(slot),
            self.beacon.get_header(slot),
            self.beacon.get_sync_aggregate(aggregate_slot),
            self.beacon.get_genesis_validators_root(),
            self.beacon.get_fork_version(slot),
        )
        .at(context)?;

        info!(
            "Preparing header witness at slot {slot}, fork version 0x{}, genesis validators root {}",
            hex::encode(fork_version),
            genesis_validators_root.to_hex()
        );

        let header_root = checked_header_root(&record, slot)?;
        let header = *record.header();
        info!(
            "Header: slot {}, proposer {}, parent root {}, state root {}, body root {}",
            header.slot(),
            header.proposer_index(),
            header.parent_root().to_hex(),
            header.state_root().to_hex(),
            header.body_root().to_hex()
        );

        let domain = compute_sync_committee_domain(fork_version, &genesis_validators_root).at(context)?;
        let signing_root = compute_signing_root(&header_root, &domain).at(context)?;
        info!("Signing root: {}", signing_root.to_hex());

        let pubkeys = self
            .verifier
            .decode_public_keys(&pubkeys)
            .map_err(TypesError::from)
            .at(context)?;
        let participation = ParticipationBitfield::from_hex(
            aggregate.sync_committee_bits(),
            self.verifier.committee_size(),
        )
        .at(context)?;
        let signature = self
            .verifier
            .decode_signature(aggregate.sync_committee_signature())
            .map_err(TypesError::from)
            .at(context)?;

        let outcome = self
            .verifier
            .verify(&signing_root, &pubkeys, &participation, &signature)
            .at(context)?;
        info!(
            "Participation: {} of {}",
            outcome.active_count(),
            self.verifier.committee_size()
        );
        if !outcome.ok() {
            warn!("Aggregate signature at slot {slot} does not verify");
        }

        let input =
            HeaderProofInput::new(&signing_root, &pubkeys, &participation, &signature).at(context)?;

        Ok(HeaderWitness {
            slot,
            header,
            input,
            participation: outcome.active_count(),
            signing_root,
            verified: outcome.ok(),
        })
    }

    /// Prepares the input of the committee commitment circuit for the sync committee of `period`.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if the committee could not be fetched or decoded.
    pub async fn generate_committee_input(
        &self,
        period: u64,
    ) -> Result<CommitteeProofInput, PipelineError> {
        self.committee_input(period)
            .await
            .inspect_err(|err| warn!("Could not prepare committee input for period {period}: {err}"))
    }

    async fn committee_input(&self, period: u64) -> Result<CommitteeProofInput, PipelineError> {
        let context = Context::Period(period);
        let slot = period_start_slot(period)
            .ok_or_else(|| inconsistent(context, "period has no start slot".into()))?;
        info!("Preparing committee input for period {period} at slot {slot}");

        let pubkeys = self.beacon.get_committee_pubkeys(slot).await.at(context)?;
        let pubkeys = self
            .verifier
            .decode_public_keys(&pubkeys)
            .map_err(TypesError::from)
            .at(context)?;
        if pubkeys.len() != self.verifier.committee_size() {
            return Err(PipelineError::Shape {
                context,
                source: ShapeError::CommitteeSize {
                    expected: self.verifier.committee_size(),
                    actual: pubkeys.len(),
                },
            });
        }

        let aggregate = PublicKey::from_bytes(&PublicKey::aggregate(&pubkeys).to_compressed())
            .map_err(TypesError::from)
            .at(context)?;
        debug!("Aggregate committee key: 0x{}", hex::encode(aggregate.compressed_pubkey()));

        CommitteeProofInput::new(&pubkeys, &aggregate).at(context)
    }

    /// Prepares the header witness at `slot` and proves it.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if the witness could not be prepared, if the aggregate signature
    /// does not verify or if the proof request failed. No proof is requested for a signature that
    /// does not verify.
    pub async fn prove_header(
        &self,
        slot: u64,
    ) -> Result<(HeaderWitness, ProverResponse), PipelineError> {
        let context = Context::Slot(slot);
        let witness = self.generate_header_witness(slot).await?;
        if !witness.verified() {
            return Err(PipelineError::InvalidSignature { context });
        }

        let response = self
            .request_proof(HEADER_CIRCUIT, witness.input(), context)
            .await?;

        Ok((witness, response))
    }

    /// Proves the commitment to the sync committee of `period`.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if the input could not be prepared, the proof request failed or
    /// the response does not carry a commitment.
    pub async fn prove_committee(&self, period: u64) -> Result<CommitmentProof, PipelineError> {
        let context = Context::Period(period);
        let input = self.generate_committee_input(period).await?;
        let response = self.request_proof(COMMITTEE_CIRCUIT, &input, context).await?;

        CommitmentProof::try_from(&response).at(context)
    }

    async fn request_proof<T: serde::Serialize>(
        &self,
        circuit: &str,
        input: &T,
        context: Context,
    ) -> Result<ProverResponse, PipelineError> {
        let inputs = serde_json::to_value(input).at(context)?;
        info!("Requesting {circuit} proof for {context}");

        self.prover
            .prove(circuit, &inputs)
            .await
            .at(context)
            .inspect_err(|err| warn!("Proof request failed: {err}"))
    }

    /// Builds the light client update handing over the sync committee of `period`.
    ///
    /// The finalized header is the first header of the previous period. Its finality is attested
    /// at `attested_slot`, two epochs later unless specified.
    ///
    /// # Errors
    ///
    /// Returns a `PipelineError` if data could not be fetched, if the fetched data is not
    /// consistent, if the attested header is not validly signed by a supermajority of the
    /// committee, or if a proof request failed.
    pub async fn build_light_client_update(
        &self,
        period: u64,
        attested_slot: Option<u64>,
    ) -> Result<LightClientUpdate, PipelineError> {
        self.light_client_update(period, attested_slot)
            .await
            .inspect_err(|err| warn!("Could not build update for period {period}: {err}"))
    }

    async fn light_client_update(
        &self,
        period: u64,
        attested_slot: Option<u64>,
    ) -> Result<LightClientUpdate, PipelineError> {
        let context = Context::Period(period);
        let (finalized_slot, default_attested_slot) = update_slots_for_period(period)
            .ok_or_else(|| inconsistent(context, "period has no previous period".into()))?;
        let attested_slot = attested_slot.unwrap_or(default_attested_slot);
        if attested_slot <= finalized_slot {
            return Err(inconsistent(
                context,
                format!("attested slot {attested_slot} is not after finalized slot {finalized_slot}"),
            ));
        }
        info!("Building update for period {period}: finalized slot {finalized_slot}, attested slot {attested_slot}");

        let (finalized_state, finalized_body, attested_state, finalized_record, checkpoint) = tokio::try_join!(
            async {
                self.beacon
                    .get_state_tree(finalized_slot)
                    .await
                    .at(Context::Slot(finalized_slot))
            },
            async {
                self.beacon
                    .get_body_tree(finalized_slot)
                    .await
                    .at(Context::Slot(finalized_slot))
            },
            async {
                self.beacon
                    .get_state_tree(attested_slot)
                    .await
                    .at(Context::Slot(attested_slot))
            },
            async {
                self.beacon
                    .get_header(finalized_slot)
                    .await
                    .at(Context::Slot(finalized_slot))
            },
            async {
                self.beacon
                    .get_finalized_checkpoint(attested_slot)
                    .await
                    .at(Context::Slot(attested_slot))
            },
        )?;

        let finalized_context = Context::Slot(finalized_slot);
        let finalized_root = checked_header_root(&finalized_record, finalized_slot)?;
        let finalized_header = *finalized_record.header();

        let expected_epoch = epoch_at_slot(finalized_slot);
        if checkpoint.epoch() != expected_epoch || checkpoint.root() != &finalized_root {
            return Err(inconsistent(
                Context::Slot(attested_slot),
                format!(
                    "attested state finalized epoch {} ({}), expected epoch {expected_epoch} ({})",
                    checkpoint.epoch(),
                    checkpoint.root().to_hex(),
                    finalized_root.to_hex()
                ),
            ));
        }
        if finalized_header.state_root() != &finalized_state.root()
            || finalized_header.body_root() != &finalized_body.root()
        {
            return Err(inconsistent(
                finalized_context,
                "state or body tree does not match the finalized header".into(),
            ));
        }

        let witness = self.generate_header_witness(attested_slot).await?;
        let attested_context = Context::Slot(attested_slot);
        if !witness.verified() {
            return Err(PipelineError::InvalidSignature {
                context: attested_context,
            });
        }
        if witness.header().state_root() != &attested_state.root() {
            return Err(inconsistent(
                attested_context,
                "state tree does not match the attested header".into(),
            ));
        }

        let response = self
            .request_proof(HEADER_CIRCUIT, witness.input(), attested_context)
            .await?;
        let signature_proof = Groth16Proof::try_from(response.proof()).at(attested_context)?;

        let finality_branch = attested_state
            .branch(FINALIZED_ROOT_GENERALIZED_INDEX)
            .at(attested_context)?;
        let next_sync_committee_root = *finalized_state
            .node(NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX)
            .at(finalized_context)?;
        let next_sync_committee_branch = finalized_state
            .branch(NEXT_SYNC_COMMITTEE_GENERALIZED_INDEX)
            .at(finalized_context)?;
        let execution_state_root = *finalized_body
            .node(EXECUTION_STATE_ROOT_GENERALIZED_INDEX)
            .at(finalized_context)?;
        let execution_state_root_branch = finalized_body
            .branch(EXECUTION_STATE_ROOT_GENERALIZED_INDEX)
            .at(finalized_context)?;
        let block_number_leaf = finalized_body
            .node(EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX)
            .at(finalized_context)?;
        let block_number = read_u64_leaf(block_number_leaf).ok_or_else(|| {
            inconsistent(
                finalized_context,
                format!("block number leaf {} is not a u64", block_number_leaf.to_hex()),
            )
        })?;
        let block_number_branch = finalized_body
            .branch(EXECUTION_BLOCK_NUMBER_GENERALIZED_INDEX)
            .at(finalized_context)?;
        debug!(
            "Next sync committee root {}, execution state root {}, block number {block_number}",
            next_sync_committee_root.to_hex(),
            execution_state_root.to_hex()
        );

        let update = LightClientUpdate::assemble(UpdateParts {
            attested_header: *witness.header(),
            finalized_header,
            finality_branch,
            next_sync_committee_root,
            next_sync_committee_branch,
            execution_state_root,
            execution_state_root_branch,
            block_number,
            block_number_branch,
            participation: witness.participation() as u64,
            signature_proof,
        })
        .at(context)?;

        if !update.verify_branches().at(context)? {
            return Err(inconsistent(
                context,
                "assembled branches do not verify".into(),
            ));
        }
        info!("Built update for period {period}");

        Ok(update)
    }
}

/// Checks that a fetched header is at `slot` and that its root matches its fields.
///
/// # Returns
///
/// The header root.
fn checked_header_root(record: &HeaderRecord, slot: u64) -> Result<HashValue, PipelineError> {
    let context = Context::Slot(slot);
    if record.header().slot() != slot {
        return Err(inconsistent(
            context,
            format!("beacon node returned the header at slot {}", record.header().slot()),
        ));
    }

    let root = record.header().hash_tree_root().at(context)?;
    if &root != record.root() {
        return Err(inconsistent(
            context,
            format!(
                "header root {} does not match the reported root {}",
                root.to_hex(),
                record.root().to_hex()
            ),
        ));
    }

    Ok(root)
}

/// Reads a `u64` leaf: little-endian, zero padded to 32 bytes.
fn read_u64_leaf(leaf: &HashValue) -> Option<u64> {
    let (value, padding) = leaf.hash().split_at(U64_LEN);
    if padding.iter().any(|byte| *byte != 0) {
        return None;
    }

    let mut bytes = [0; U64_LEN];
    bytes.copy_from_slice(value);
    Some(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::{MockBeacon, MockProver, MOCK_COMMITTEE_SIZE};
    use beacon_lc_core::config::SYNC_COMMITTEE_SIZE;

    const PERIOD: u64 = 904;

    fn pipeline(beacon: MockBeacon) -> Pipeline<MockBeacon, MockProver> {
        Pipeline::with_committee_size(beacon, MockProver::default(), MOCK_COMMITTEE_SIZE)
    }

    #[test]
    fn test_read_u64_leaf() {
        let leaf = 19_000_000u64.hash_tree_root().unwrap();
        assert_eq!(read_u64_leaf(&leaf), Some(19_000_000));

        let mut bytes = *leaf.hash();
        bytes[31] = 1;
        assert_eq!(read_u64_leaf(&HashValue::new(bytes)), None);
    }

    #[test]
    fn test_default_committee_size() {
        let pipeline = Pipeline::new(MockBeacon::for_period(PERIOD), MockProver::default());
        assert_eq!(pipeline.verifier().committee_size(), SYNC_COMMITTEE_SIZE);
    }

    #[tokio::test]
    async fn test_header_witness() {
        let beacon = MockBeacon::for_period(PERIOD);
        let slot = beacon.attested_slot();
        let pipeline = pipeline(beacon);

        let witness = pipeline.generate_header_witness(slot).await.unwrap();

        assert_eq!(witness.slot(), slot);
        assert!(witness.verified());
        assert_eq!(witness.participation(), MOCK_COMMITTEE_SIZE - 1);
        assert_eq!(witness.input().pubkeys().len(), MOCK_COMMITTEE_SIZE);
        assert_eq!(
            witness.input().signing_root().as_bytes(),
            witness.signing_root().hash()
        );
    }

    #[tokio::test]
    async fn test_header_witness_bad_signature() {
        let mut beacon = MockBeacon::for_period(PERIOD);
        let slot = beacon.attested_slot();
        beacon.sign_wrong_message();

        let witness = pipeline(beacon).generate_header_witness(slot).await.unwrap();
        assert!(!witness.verified());
    }

    #[tokio::test]
    async fn test_prove_header() {
        let beacon = MockBeacon::for_period(PERIOD);
        let slot = beacon.attested_slot();
        let pipeline = pipeline(beacon);

        let (witness, response) = pipeline.prove_header(slot).await.unwrap();
        assert!(witness.verified());
        assert_eq!(response, MockProver::response());

        let requests = pipeline.prover().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, HEADER_CIRCUIT);
        assert_eq!(requests[0].1, serde_json::to_value(witness.input()).unwrap());
    }

    #[tokio::test]
    async fn test_prove_header_rejects_bad_signature() {
        let mut beacon = MockBeacon::for_period(PERIOD);
        let slot = beacon.attested_slot();
        beacon.sign_wrong_message();
        let pipeline = pipeline(beacon);

        let err = pipeline.prove_header(slot).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::InvalidSignature {
                context: Context::Slot(s)
            } if s == slot
        ));
        assert!(pipeline.prover().requests().is_empty());
    }

    #[tokio::test]
    async fn test_header_witness_below_quorum() {
        let mut beacon = MockBeacon::for_period(PERIOD);
        let slot = beacon.attested_slot();
        beacon.set_signers(MOCK_COMMITTEE_SIZE * 2 / 3);

        let err = pipeline(beacon)
            .generate_header_witness(slot)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Verification {
                context: Context::Slot(s),
                source: VerificationError::Quorum { .. },
            } if s == slot
        ));
    }

    #[tokio::test]
    async fn test_header_witness_wrong_root() {
        let mut beacon = MockBeacon::for_period(PERIOD);
        let slot = beacon.attested_slot();
        beacon.corrupt_header_root(slot);

        let err = pipeline(beacon)
            .generate_header_witness(slot)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::Inconsistent { .. }));
    }

    #[tokio::test]
    async fn test_missing_data() {
        let beacon = MockBeacon::for_period(PERIOD);
        let err = pipeline(beacon)
            .generate_header_witness(12)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Client {
                context: Context::Slot(12),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_committee_input() {
        let beacon = MockBeacon::for_period(PERIOD);
        let pipeline = pipeline(beacon);

        let input = pipeline.generate_committee_input(PERIOD).await.unwrap();
        assert_eq!(input.pubkeys().len(), MOCK_COMMITTEE_SIZE);
        assert_eq!(input.pubkey_hex().len(), MOCK_COMMITTEE_SIZE);

        let err = pipeline
            .generate_committee_input(PERIOD + 5)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Client {
                context: Context::Period(p),
                ..
            } if p == PERIOD + 5
        ));
    }

    #[tokio::test]
    async fn test_committee_size_checked() {
        let beacon = MockBeacon::for_period(PERIOD);
        let pipeline =
            Pipeline::with_committee_size(beacon, MockProver::default(), MOCK_COMMITTEE_SIZE * 2);

        let err = pipeline.generate_committee_input(PERIOD).await.unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Shape {
                source: ShapeError::CommitteeSize { expected: 16, actual: 8 },
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_prove_committee() {
        let beacon = MockBeacon::for_period(PERIOD);
        let proof = pipeline(beacon).prove_committee(PERIOD).await.unwrap();

        assert_eq!(proof.commitment(), "0x1234");
        assert_eq!(proof.proof().b()[0][0], "4");
    }

    #[tokio::test]
    async fn test_build_light_client_update() {
        let beacon = MockBeacon::for_period(PERIOD);
        let (finalized_slot, attested_slot) = (beacon.finalized_slot(), beacon.attested_slot());
        let pipeline = pipeline(beacon);

        let update = pipeline
            .build_light_client_update(PERIOD, None)
            .await
            .unwrap();

        assert_eq!(update.finalized_header().slot, finalized_slot);
        assert_eq!(update.attested_header().slot, attested_slot);
        assert_eq!(
            *update.signature().participation(),
            (MOCK_COMMITTEE_SIZE - 1) as u64
        );
        assert_eq!(*update.block_number(), pipeline.beacon().block_number());
        assert!(update.verify_branches().unwrap());

        let requests = pipeline.prover().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, HEADER_CIRCUIT);
    }

    #[tokio::test]
    async fn test_update_rejects_wrong_finalized_epoch() {
        let mut beacon = MockBeacon::for_period(PERIOD);
        let attested_slot = beacon.attested_slot();
        beacon.set_finalized_epoch(attested_slot, 0);

        let err = pipeline(beacon)
            .build_light_client_update(PERIOD, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Inconsistent {
                context: Context::Slot(s),
                ..
            } if s == attested_slot
        ));
    }

    #[tokio::test]
    async fn test_update_rejects_bad_signature() {
        let mut beacon = MockBeacon::for_period(PERIOD);
        beacon.sign_wrong_message();

        let pipeline = pipeline(beacon);
        let err = pipeline
            .build_light_client_update(PERIOD, None)
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::InvalidSignature { .. }));
        assert!(pipeline.prover().requests().is_empty());
    }

    #[tokio::test]
    async fn test_update_period_bounds() {
        let pipeline = pipeline(MockBeacon::for_period(PERIOD));

        assert!(matches!(
            pipeline.build_light_client_update(0, None).await,
            Err(PipelineError::Inconsistent {
                context: Context::Period(0),
                ..
            })
        ));

        let finalized_slot = period_start_slot(PERIOD - 1).unwrap();
        assert!(matches!(
            pipeline
                .build_light_client_update(PERIOD, Some(finalized_slot))
                .await,
            Err(PipelineError::Inconsistent { .. })
        ));
    }
}
