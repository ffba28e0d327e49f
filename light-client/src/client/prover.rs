// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! # Prover client module
//!
//! This module contains the client of the proving service. Proof requests are JSON documents
//! naming the circuit and carrying its inputs, answered with a snarkjs proof and the public
//! signals of the circuit.

use crate::client::error::ClientError;
use crate::client::utils::test_connection;
use crate::client::ProvingService;
use async_trait::async_trait;
use beacon_lc_core::types::proof::ProverResponse;
use getset::Getters;
use log::debug;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

/// Path of the proof generation endpoint.
pub const PROOF_ENDPOINT: &str = "/api/v1/proof/generate";

/// Body of a proof generation request.
#[derive(Debug, Clone, Serialize)]
struct ProofRequest<'a> {
    circuit: &'a str,
    inputs: &'a Value,
}

/// A client to handle communication with the proving service.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct ProverClient {
    /// The address of the proving service.
    address: String,
    /// The inner HTTP client.
    inner: Client,
}

impl ProverClient {
    pub fn new(prover_address: &str) -> Self {
        Self {
            address: prover_address.trim_end_matches('/').to_string(),
            inner: Client::new(),
        }
    }

    /// Test the connection to the proving service.
    pub async fn test_endpoint(&self) -> Result<(), ClientError> {
        test_connection(&self.inner, &self.address).await
    }
}

/// Describes a failed proof request from its status and response body. The message is the
/// `error` field of a JSON body, or the body itself when it is not JSON.
fn service_error(status: u16, body: &str) -> String {
    let body = body.trim();
    match serde_json::from_str::<Value>(body) {
        Ok(json) => match json.get("error") {
            Some(Value::String(message)) => format!("HTTP code {status}: {message}"),
            Some(error) => format!("HTTP code {status}: {error}"),
            None => format!("HTTP code {status}"),
        },
        Err(_) if body.is_empty() => format!("HTTP code {status}"),
        Err(_) => format!("HTTP code {status}: {body}"),
    }
}

#[async_trait]
impl ProvingService for ProverClient {
    /// Proof generation is not retried: a failed request is terminal.
    async fn prove(&self, circuit: &str, inputs: &Value) -> Result<ProverResponse, ClientError> {
        let url = format!("{}{}", self.address, PROOF_ENDPOINT);
        debug!("Requesting a {circuit} proof from {url}");

        // Send the HTTP request
        let response = self
            .inner
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .json(&ProofRequest { circuit, inputs })
            .send()
            .await
            .map_err(|err| ClientError::Request {
                endpoint: url.clone(),
                source: Box::new(err),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|err| ClientError::Response {
            endpoint: url.clone(),
            source: Box::new(err),
        })?;

        if status.is_client_error() || status.is_server_error() {
            return Err(ClientError::Response {
                endpoint: url,
                source: service_error(status.as_u16(), &body).into(),
            });
        }

        serde_json::from_str(&body).map_err(|err| ClientError::Response {
            endpoint: url,
            source: Box::new(err),
        })
    }
}
