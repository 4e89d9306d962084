// Shared reqwest plumbing for the drone backend adapters
use crate::application::error::FetchError;
use anyhow::Context;
use reqwest::{Client, Response};
use serde_json::Value;
use std::time::Duration;

/// One client for every backend call; `timeout` bounds each whole request.
pub fn build_client(timeout: Duration) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

pub fn transport_error(err: reqwest::Error) -> FetchError {
    if err.is_decode() {
        FetchError::Parse(err.to_string())
    } else if let Some(status) = err.status() {
        FetchError::Protocol(status.as_u16())
    } else if err.is_timeout() {
        FetchError::Network(format!("request timed out: {}", err))
    } else {
        FetchError::Network(err.to_string())
    }
}

pub fn check_status(response: &Response) -> Result<(), FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(FetchError::Protocol(status.as_u16()))
    }
}

/// Body read failures are network errors; only undecodable bytes are parse errors.
pub async fn read_json(response: Response) -> Result<Value, FetchError> {
    check_status(&response)?;
    let body = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&body).map_err(|e| FetchError::Parse(e.to_string()))
}
