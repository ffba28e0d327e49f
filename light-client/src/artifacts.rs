// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Artifacts
//!
//! On-disk layout of the files exchanged with the proving service. Each run gets a directory
//! `<root>/<kind>/proof_data_<id>/` where `id` is a slot or a period, holding:
//!
//! - `input.json`: the circuit input.
//! - `packInput.json`: the circuit input wrapped with the name of its circuit.
//! - `proof.json` and `public.json`: the proof and public signals returned by the prover.

use beacon_lc_core::types::proof::ProverResponse;
use beacon_lc_core::types::proof_input::PackedInput;
use log::info;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const INPUT_FILE: &str = "input.json";
pub const PACK_INPUT_FILE: &str = "packInput.json";
pub const PROOF_FILE: &str = "proof.json";
pub const PUBLIC_FILE: &str = "public.json";

/// Errors possible while reading or writing artifacts.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid JSON for {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The kind of a run, naming the directory its artifacts are grouped in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    Header,
    Commitment,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Header => write!(f, "header"),
            ArtifactKind::Commitment => write!(f, "commitment"),
        }
    }
}

/// Root of the artifact directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory of the run of `kind` for `id`.
    pub fn run_dir(&self, kind: ArtifactKind, id: u64) -> PathBuf {
        self.root.join(kind.to_string()).join(format!("proof_data_{id}"))
    }

    /// Writes the circuit input of a run, creating its directory if needed.
    ///
    /// # Returns
    ///
    /// The path of the written file.
    pub async fn write_input<T: Serialize>(
        &self,
        kind: ArtifactKind,
        id: u64,
        input: &T,
    ) -> Result<PathBuf, ArtifactError> {
        let dir = self.run_dir(kind, id);
        create_dir(&dir).await?;

        let path = dir.join(INPUT_FILE);
        write_json(&path, input).await?;
        info!("Finished writing proof input file {}", path.display());

        Ok(path)
    }

    /// Writes the proof and public signals of a run, creating its directory if needed.
    pub async fn write_proof(
        &self,
        kind: ArtifactKind,
        id: u64,
        response: &ProverResponse,
    ) -> Result<(PathBuf, PathBuf), ArtifactError> {
        let dir = self.run_dir(kind, id);
        create_dir(&dir).await?;

        write_proof(&dir, response).await
    }
}

/// Wraps the `input.json` of `dir` with the name of its circuit into `packInput.json`.
///
/// # Returns
///
/// The path of the written file.
///
/// # Errors
///
/// Returns an `ArtifactError` if `input.json` cannot be read or is not valid JSON.
pub async fn pack_input(dir: &Path, circuit: &str) -> Result<PathBuf, ArtifactError> {
    let inputs: Value = read_json(&dir.join(INPUT_FILE)).await?;

    let path = dir.join(PACK_INPUT_FILE);
    write_json(&path, &PackedInput::new(&inputs, circuit)).await?;
    info!("Finished writing pack input file {}", path.display());

    Ok(path)
}

/// Splits a full prover response into `proof.json` and `public.json` in `dir`.
///
/// # Errors
///
/// Returns an `ArtifactError` if `full_proof` is not a prover response or a file cannot be
/// written.
pub async fn split_proof(dir: &Path, full_proof: &str) -> Result<(PathBuf, PathBuf), ArtifactError> {
    let response: ProverResponse =
        serde_json::from_str(full_proof).map_err(|source| ArtifactError::Json {
            path: dir.to_path_buf(),
            source,
        })?;
    create_dir(dir).await?;

    write_proof(dir, &response).await
}

async fn write_proof(
    dir: &Path,
    response: &ProverResponse,
) -> Result<(PathBuf, PathBuf), ArtifactError> {
    let proof_path = dir.join(PROOF_FILE);
    write_json(&proof_path, response.proof()).await?;
    info!("Finished writing proof file {}", proof_path.display());

    let public_path = dir.join(PUBLIC_FILE);
    write_json(&public_path, response.pub_signals()).await?;
    info!("Finished writing public file {}", public_path.display());

    Ok((proof_path, public_path))
}

async fn create_dir(dir: &Path) -> Result<(), ArtifactError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|source| ArtifactError::Io {
            path: dir.to_path_buf(),
            source,
        })
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ArtifactError> {
    let bytes = serde_json::to_vec(value).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Reads and deserializes a JSON file.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_slice(&bytes).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::test_utils::MockProver;
    use serde_json::json;

    #[test]
    fn test_run_dir() {
        let store = ArtifactStore::new("proof_data");

        assert_eq!(
            store.run_dir(ArtifactKind::Header, 7_405_632),
            Path::new("proof_data/header/proof_data_7405632")
        );
        assert_eq!(
            store.run_dir(ArtifactKind::Commitment, 904),
            Path::new("proof_data/commitment/proof_data_904")
        );
    }

    #[tokio::test]
    async fn test_input_and_pack() {
        let root = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(root.path());

        let input = json!({"pubkeys": [["1", "2"]], "pubkeybits": [1]});
        let path = store
            .write_input(ArtifactKind::Header, 12, &input)
            .await
            .unwrap();
        assert_eq!(path, store.run_dir(ArtifactKind::Header, 12).join(INPUT_FILE));

        let packed = pack_input(path.parent().unwrap(), "blsHeaderVerify")
            .await
            .unwrap();
        let packed: Value = read_json(&packed).await.unwrap();
        assert_eq!(packed["circuit"], "blsHeaderVerify");
        assert_eq!(packed["inputs"], input);
    }

    #[tokio::test]
    async fn test_pack_without_input() {
        let root = tempfile::tempdir().unwrap();

        assert!(matches!(
            pack_input(root.path(), "ssz2Poseidon").await,
            Err(ArtifactError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_split_proof() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("commitment").join("proof_data_904");
        let full_proof = serde_json::to_string(&MockProver::response()).unwrap();

        let (proof, public) = split_proof(&dir, &full_proof).await.unwrap();

        let proof: Value = read_json(&proof).await.unwrap();
        assert_eq!(proof["pi_b"][0], json!(["3", "4"]));
        assert_eq!(proof["protocol"], "groth16");

        let public: Vec<String> = read_json(&public).await.unwrap();
        assert_eq!(public.len(), 33);
        assert_eq!(public[32], "4660");

        assert!(matches!(
            split_proof(&dir, "{\"proof\": 1}").await,
            Err(ArtifactError::Json { .. })
        ));
    }
}
