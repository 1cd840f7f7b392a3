//! Remote search gateway.
//!
//! Validates and normalizes tool input, performs one call through a
//! [`SearchApi`], and records successful searches in the [`Ledger`]. All
//! failures come back as [`GatewayError`], whose `Display` output is the text
//! handed to the tool caller.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{ContentsRequest, FindSimilarRequest, SearchApi, SearchRequest};
use crate::core::Ledger;
use crate::error::GatewayError;

/// Result count used when the caller does not supply one.
pub const DEFAULT_NUM_RESULTS: u32 = 10;
/// Smallest accepted result count.
pub const MIN_NUM_RESULTS: u32 = 1;
/// Largest accepted result count.
pub const MAX_NUM_RESULTS: u32 = 50;

/// Clamps a requested result count into `[MIN_NUM_RESULTS, MAX_NUM_RESULTS]`.
///
/// Out-of-range values are pulled to the nearest bound rather than rejected.
#[must_use]
pub fn clamp_num_results(requested: Option<i64>) -> u32 {
    requested.map_or(DEFAULT_NUM_RESULTS, |n| {
        let clamped = n.clamp(i64::from(MIN_NUM_RESULTS), i64::from(MAX_NUM_RESULTS));
        u32::try_from(clamped).unwrap_or(DEFAULT_NUM_RESULTS)
    })
}

fn require_non_empty<'a>(value: &'a str, what: &str) -> Result<&'a str, GatewayError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GatewayError::Validation(format!("No {what} provided.")));
    }
    Ok(trimmed)
}

/// Translates tool invocations into Exa API calls.
#[derive(Clone)]
pub struct Gateway {
    api: Arc<dyn SearchApi>,
    ledger: Arc<Ledger>,
}

impl std::fmt::Debug for Gateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gateway")
            .field("api", &self.api.name())
            .field("ledger", &self.ledger)
            .finish()
    }
}

impl Gateway {
    /// Creates a gateway over `api` that records searches into `ledger`.
    #[must_use]
    pub fn new(api: Arc<dyn SearchApi>, ledger: Arc<Ledger>) -> Self {
        Self { api, ledger }
    }

    /// The ledger this gateway writes to.
    #[must_use]
    pub const fn ledger(&self) -> &Arc<Ledger> {
        &self.ledger
    }

    /// Runs a web search and records it on success.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Validation`] for a blank query (no network call), or
    /// [`GatewayError::Api`] when the remote call fails (ledger untouched).
    pub async fn search(
        &self,
        query: &str,
        num_results: Option<i64>,
    ) -> Result<Value, GatewayError> {
        let query = require_non_empty(query, "search query")?;
        let request = SearchRequest::new(query, clamp_num_results(num_results));

        let response = self.api.search(&request).await?;
        self.ledger.record(query, response.clone());
        tracing::info!(query, ledger_size = self.ledger.len(), "search recorded");

        Ok(response)
    }

    /// Finds content similar to `url`.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Validation`] for a blank URL, or [`GatewayError::Api`].
    pub async fn find_similar(
        &self,
        url: &str,
        num_results: Option<i64>,
    ) -> Result<Value, GatewayError> {
        let url = require_non_empty(url, "URL")?;
        let request = FindSimilarRequest::new(url, clamp_num_results(num_results));
        Ok(self.api.find_similar(&request).await?)
    }

    /// Retrieves document contents for Exa IDs.
    ///
    /// # Errors
    ///
    /// [`GatewayError::Validation`] for an empty ID list (no network call), or
    /// [`GatewayError::Api`].
    pub async fn get_contents(&self, ids: Vec<String>) -> Result<Value, GatewayError> {
        if ids.is_empty() {
            return Err(GatewayError::Validation(
                "No document IDs provided.".to_string(),
            ));
        }
        Ok(self.api.contents(&ContentsRequest::new(ids)).await?)
    }
}
