//! # exa-mcp-rs
//!
//! A Model Context Protocol server for web search using Exa AI.
//!
//! Tools:
//! - `search`: web search; successful searches are kept in the ledger
//! - `find_similar`: pages similar to a URL
//! - `get_contents`: document contents by Exa ID
//!
//! Resources:
//! - `exa://searches`: summary of recent searches
//! - `exa://searches/{index}`: one recent search in full (0 = most recent)
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use exa_mcp::{ExaClient, ExaMcpServer, Gateway, Ledger, ServerConfig};
//!
//! # fn main() -> Result<(), exa_mcp::Error> {
//! let config = ServerConfig::builder().api_key("exa-key").build()?;
//! let gateway = Gateway::new(Arc::new(ExaClient::new(&config)?), Arc::new(Ledger::new()));
//! let _server = ExaMcpServer::new(gateway);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod gateway;
pub mod mcp;

pub use api::{ExaClient, SearchApi};
pub use config::ServerConfig;
pub use crate::core::{Ledger, SearchRecord, SearchSummary};
pub use error::{ApiError, ConfigError, Error, GatewayError, LedgerError, Result};
pub use gateway::{Gateway, clamp_num_results};
pub use mcp::ExaMcpServer;
