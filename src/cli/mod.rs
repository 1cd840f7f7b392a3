//! CLI layer for exa-mcp-rs.
//!
//! Provides the command-line interface using clap; the subcommand selects
//! the MCP transport.

pub mod commands;
pub mod parser;

pub use commands::{execute, resolve_config};
pub use parser::{BindArgs, Cli, Commands};
