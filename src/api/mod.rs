//! Remote Exa API boundary.
//!
//! [`SearchApi`] is the seam between the gateway and the network. The
//! production implementation is [`ExaClient`]; tests substitute mocks.

pub mod client;
pub mod provider;
pub mod request;

pub use client::ExaClient;
pub use provider::SearchApi;
pub use request::{ContentsRequest, FindSimilarRequest, SearchRequest, TextContents};
