//! YGOPRODeck API client for resolving card identifiers
//!
//! One HTTP GET per unresolved identifier against `cardinfo.php`, with a
//! fixed request timeout and no retries.

use crate::error::{ConvertError, Result};
use serde::Deserialize;
use std::time::Duration;

/// YGOPRODeck API base URL (v7)
pub const API_BASE_URL: &str = "https://db.ygoprodeck.com/api/v7";

/// Per-request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = "ydk_converter/1.0";

/// One card record in a cardinfo.php response
#[derive(Debug, Deserialize)]
pub struct ApiCard {
    pub id: u64,
    pub name: String,
}

/// cardinfo.php response body: `{"data": [...]}`
#[derive(Debug, Deserialize)]
pub struct CardInfoResponse {
    pub data: Vec<ApiCard>,
}

impl CardInfoResponse {
    /// Name of the first matching record, if any
    pub fn first_name(&self) -> Option<&str> {
        self.data.first().map(|c| c.name.as_str())
    }
}

fn client() -> Result<reqwest::Client> {
    Ok(reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .build()?)
}

/// Fetch a card name by identifier from the production API
pub async fn fetch_card_name(card_id: &str) -> Result<String> {
    fetch_card_name_from(API_BASE_URL, card_id).await
}

/// Fetch a card name by identifier from a specific API base URL.
/// Separated from [`fetch_card_name`] so tests can point at a mock server.
pub async fn fetch_card_name_from(base_url: &str, card_id: &str) -> Result<String> {
    let url = format!("{}/cardinfo.php?id={}", base_url, card_id);

    log::debug!("Fetching card info from YGOPRODeck: {}", url);

    let response = client()?
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ConvertError::HttpStatus(response.status()));
    }

    let body: CardInfoResponse = response.json().await?;
    match body.first_name() {
        Some(name) => Ok(name.to_string()),
        None => Err(ConvertError::CardNotFound(card_id.to_string())),
    }
}

/// Download the full card database dump (every card, no `id` filter).
/// Returns the raw JSON body so the caller can write it to disk.
pub async fn fetch_card_database_from(base_url: &str) -> Result<String> {
    let url = format!("{}/cardinfo.php", base_url);

    log::info!("Downloading card database from {}", url);

    let response = client()?
        .get(&url)
        .header("User-Agent", USER_AGENT)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ConvertError::HttpStatus(response.status()));
    }

    Ok(response.text().await?)
}

/// Download the full card database dump from the production API
pub async fn fetch_card_database() -> Result<String> {
    fetch_card_database_from(API_BASE_URL).await
}

#[cfg(test)]
#[path = "ygoprodeck_tests.rs"]
mod tests;
