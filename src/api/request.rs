//! Request bodies for the Exa endpoints.

use serde::Serialize;

/// Content options attached to every request; full page text is always asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextContents {
    /// Include extracted page text.
    pub text: bool,
}

impl Default for TextContents {
    fn default() -> Self {
        Self { text: true }
    }
}

/// Body for `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Search query.
    pub query: String,
    /// Search type; always `"auto"`.
    #[serde(rename = "type")]
    pub search_type: &'static str,
    /// Number of results (already clamped).
    pub num_results: u32,
    /// Content options.
    pub contents: TextContents,
}

impl SearchRequest {
    /// Creates an auto-type search request with text contents.
    #[must_use]
    pub fn new(query: impl Into<String>, num_results: u32) -> Self {
        Self {
            query: query.into(),
            search_type: "auto",
            num_results,
            contents: TextContents::default(),
        }
    }
}

/// Body for `POST /findSimilar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindSimilarRequest {
    /// Reference URL.
    pub url: String,
    /// Number of results (already clamped).
    pub num_results: u32,
    /// Content options.
    pub contents: TextContents,
}

impl FindSimilarRequest {
    /// Creates a similarity request with text contents.
    #[must_use]
    pub fn new(url: impl Into<String>, num_results: u32) -> Self {
        Self {
            url: url.into(),
            num_results,
            contents: TextContents::default(),
        }
    }
}

/// Body for `POST /contents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentsRequest {
    /// Exa document IDs.
    pub ids: Vec<String>,
    /// Content options.
    pub contents: TextContents,
}

impl ContentsRequest {
    /// Creates a contents request with text contents.
    #[must_use]
    pub fn new(ids: Vec<String>) -> Self {
        Self {
            ids,
            contents: TextContents::default(),
        }
    }
}
