//! MCP (Model Context Protocol) server for exa-mcp-rs.
//!
//! Exposes the Exa gateway as MCP tools and the recent-search ledger as MCP
//! resources.
//!
//! # Architecture
//!
//! ```text
//! MCP Client
//!   ↓ search / find_similar / get_contents
//! ExaMcpServer
//!   ↓
//! Gateway ──→ ExaClient ──→ api.exa.ai
//!   ↓ (search only, on success)
//! Ledger ←── exa://searches, exa://searches/{index}
//! ```

pub mod params;
pub mod server;
pub mod transport;

pub use params::{FindSimilarParams, GetContentsParams, SearchParams};
pub use server::ExaMcpServer;
pub use transport::{serve_http, serve_stdio};
