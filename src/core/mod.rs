//! Core in-memory state shared by the gateway and the MCP resources.

pub mod ledger;

pub use ledger::{EMPTY_LISTING, Ledger, SearchRecord, SearchSummary};
