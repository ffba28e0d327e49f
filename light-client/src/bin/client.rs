// Copyright (c) Yatima, Inc.
// SPDX-License-Identifier: Apache-2.0

use anyhow::{anyhow, Context, Result};
use beacon_lc::artifacts::{pack_input, split_proof, ArtifactKind, ArtifactStore};
use beacon_lc::client::beacon::BeaconClient;
use beacon_lc::client::prover::ProverClient;
use beacon_lc::pipeline::Pipeline;
use beacon_lc_core::types::proof::Groth16Proof;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::PathBuf;

/// The CLI for the light client witness preparation.
#[derive(Parser)]
struct Cli {
    /// The address for the beacon node API.
    #[arg(short, long, env = "BEACON_NODE_API")]
    beacon_node_address: Option<String>,

    /// The address of the proving service.
    #[arg(short, long, env = "PROVER_API")]
    prover_address: Option<String>,

    /// The directory proof artifacts are written to.
    #[arg(short, long, env = "OUTPUT_DIR", default_value = "proof_data")]
    output_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Prepare the header signature circuit input for the header at a slot.
    Header {
        #[arg(long)]
        slot: u64,
    },
    /// Prepare the committee commitment circuit input for a sync committee period.
    Commitment {
        #[arg(long)]
        period: u64,
    },
    /// Prepare and prove the header signature circuit input for the header at a slot.
    ProveHeader {
        #[arg(long)]
        slot: u64,
    },
    /// Prepare and prove the committee commitment of a sync committee period.
    ProveCommitment {
        #[arg(long)]
        period: u64,
    },
    /// Wrap the `input.json` of a directory with its circuit name.
    Pack {
        #[arg(long)]
        circuit: String,
        #[arg(long)]
        dir: PathBuf,
    },
    /// Split a full prover response into `proof.json` and `public.json`.
    Split {
        #[arg(long)]
        dir: PathBuf,
        #[arg(long)]
        full_proof: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let Cli {
        beacon_node_address,
        prover_address,
        output_dir,
        command,
    } = Cli::parse();

    // Initialize the logger.
    env_logger::init();

    let store = ArtifactStore::new(output_dir);
    let pipeline = || -> Result<Pipeline<BeaconClient, ProverClient>> {
        let beacon_node_address = beacon_node_address
            .as_deref()
            .ok_or_else(|| anyhow!("A beacon node address is required (BEACON_NODE_API)"))?;
        let prover_address = prover_address.as_deref().unwrap_or_default();

        Ok(Pipeline::new(
            BeaconClient::new(beacon_node_address),
            ProverClient::new(prover_address),
        ))
    };
    let check_prover = || -> Result<()> {
        if prover_address.is_none() {
            return Err(anyhow!("A proving service address is required (PROVER_API)"));
        }
        Ok(())
    };

    match command {
        Command::Header { slot } => {
            let pipeline = pipeline()?;
            pipeline.beacon().test_endpoint().await?;

            let witness = pipeline.generate_header_witness(slot).await?;
            if !witness.verified() {
                warn!("The aggregate signature over the header at slot {slot} does not verify");
            }
            store
                .write_input(ArtifactKind::Header, slot, witness.input())
                .await?;
        }
        Command::Commitment { period } => {
            let pipeline = pipeline()?;
            pipeline.beacon().test_endpoint().await?;

            let input = pipeline.generate_committee_input(period).await?;
            store
                .write_input(ArtifactKind::Commitment, period, &input)
                .await?;
        }
        Command::ProveHeader { slot } => {
            check_prover()?;
            let pipeline = pipeline()?;
            pipeline.beacon().test_endpoint().await?;
            pipeline.prover().test_endpoint().await?;

            let (witness, response) = pipeline.prove_header(slot).await?;
            store
                .write_input(ArtifactKind::Header, slot, witness.input())
                .await?;
            store
                .write_proof(ArtifactKind::Header, slot, &response)
                .await?;

            let proof = Groth16Proof::try_from(response.proof())?;
            info!("Header proof at slot {slot} generated");
            println!("{}", serde_json::to_string_pretty(&proof)?);
        }
        Command::ProveCommitment { period } => {
            check_prover()?;
            let pipeline = pipeline()?;
            pipeline.beacon().test_endpoint().await?;
            pipeline.prover().test_endpoint().await?;

            let proof = pipeline.prove_committee(period).await?;
            info!(
                "Commitment proof for period {period} generated, commitment {}",
                proof.commitment()
            );
            println!("{}", serde_json::to_string_pretty(&proof)?);
        }
        Command::Pack { circuit, dir } => {
            pack_input(&dir, &circuit)
                .await
                .with_context(|| format!("Failed to pack the input of {}", dir.display()))?;
        }
        Command::Split { dir, full_proof } => {
            split_proof(&dir, &full_proof)
                .await
                .with_context(|| format!("Failed to split the proof into {}", dir.display()))?;
        }
    }

    Ok(())
}
