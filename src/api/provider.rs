//! Pluggable search API trait.

use async_trait::async_trait;
use serde_json::Value;

use super::request::{ContentsRequest, FindSimilarRequest, SearchRequest};
use crate::error::ApiError;

/// Trait for remote search backends.
///
/// Each method performs exactly one outbound call and returns the decoded
/// response body untouched. Implementations do not retry.
#[async_trait]
pub trait SearchApi: Send + Sync {
    /// Backend name (e.g., `"exa"`).
    fn name(&self) -> &'static str;

    /// Runs a web search.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on non-success status, transport failure, or an
    /// undecodable body.
    async fn search(&self, request: &SearchRequest) -> Result<Value, ApiError>;

    /// Finds pages similar to a URL.
    ///
    /// # Errors
    ///
    /// Same as [`SearchApi::search`].
    async fn find_similar(&self, request: &FindSimilarRequest) -> Result<Value, ApiError>;

    /// Retrieves document contents by ID.
    ///
    /// # Errors
    ///
    /// Same as [`SearchApi::search`].
    async fn contents(&self, request: &ContentsRequest) -> Result<Value, ApiError>;
}
