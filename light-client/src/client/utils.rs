// Copyright (c) Argument Computer Corporation
// SPDX-License-Identifier: Apache-2.0

//! Request helpers shared by the HTTP clients.

use crate::client::error::ClientError;
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Number of connection attempts before giving up on a remote service.
pub(crate) const CONNECTION_RETRIES: u32 = 10;

/// Delay between two connection attempts.
pub(crate) const CONNECTION_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Tries to reach `address`, retrying [`CONNECTION_RETRIES`] times.
///
/// # Errors
///
/// Returns a `ClientError::Connection` if the address could not be reached.
pub(crate) async fn test_connection(inner: &Client, address: &str) -> Result<(), ClientError> {
    let mut retries = 0;
    loop {
        match inner.get(address).send().await {
            Ok(_) => {
                break;
            }
            Err(_) if retries < CONNECTION_RETRIES => {
                retries += 1;
                tokio::time::sleep(CONNECTION_RETRY_DELAY).await;
            }
            Err(_) => {
                return Err(ClientError::Connection {
                    address: address.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Makes a GET request to `url` and deserializes its JSON body.
///
/// # Errors
///
/// Returns an error if the request fails or the response is not successful or properly formatted.
pub(crate) async fn get_json<T: DeserializeOwned>(inner: &Client, url: &str) -> Result<T, ClientError> {
    // Send the HTTP request
    let response = inner
        .get(url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|err| ClientError::Request {
            endpoint: url.to_string(),
            source: Box::new(err),
        })?;

    if !response.status().is_success() {
        return Err(ClientError::Request {
            endpoint: url.to_string(),
            source: format!(
                "Request not successful, got HTTP code {}",
                response.status().as_str()
            )
            .into(),
        });
    }

    // Deserialize the response
    response.json().await.map_err(|err| ClientError::Response {
        endpoint: url.to_string(),
        source: Box::new(err),
    })
}
