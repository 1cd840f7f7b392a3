//! Error types for exa-mcp-rs.
//!
//! Each layer owns a `thiserror` enum. Tool-facing errors ([`GatewayError`],
//! [`ApiError`], [`LedgerError`]) render as the human-readable strings returned
//! to MCP callers; [`Error`] aggregates the failures that can stop the binary.

use thiserror::Error;

/// Result alias using the crate's top-level [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error for the binary and server startup.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// HTTP client construction failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// I/O failure (runtime creation, socket binding).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The MCP server terminated with an error.
    #[error("MCP server error: {0}")]
    Server(String),
}

/// Configuration errors. Always fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No API key was supplied.
    #[error("EXA_API_KEY environment variable is required")]
    ApiKeyMissing,

    /// A configuration value could not be parsed.
    #[error("invalid value for {key}: {value}")]
    InvalidValue {
        /// Setting name (environment variable).
        key: &'static str,
        /// The offending raw value.
        value: String,
    },
}

/// Errors from the remote Exa API boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered with a non-success status.
    #[error("Exa API error: {status}{}", message_suffix(.message.as_deref()))]
    Status {
        /// HTTP status code.
        status: u16,
        /// `message` field from the response body, when present.
        message: Option<String>,
    },

    /// The request did not complete within the configured deadline.
    #[error("Request error: request timed out after {secs}s")]
    Timeout {
        /// Deadline in seconds.
        secs: u64,
    },

    /// Connection, DNS, or other transport failure.
    #[error("Request error: {0}")]
    Transport(String),

    /// The API answered with success but the body was not valid JSON.
    #[error("Exa API error: invalid response body: {0}")]
    InvalidResponse(String),

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// Errors surfaced by gateway tool operations.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Input rejected before any network call.
    #[error("Error: {0}")]
    Validation(String),

    /// The remote call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Errors from ledger lookups.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Requested position is outside the ledger.
    #[error("Search result not found at index {index}. {}", describe_range(.len))]
    IndexOutOfRange {
        /// Requested index.
        index: i64,
        /// Ledger size at lookup time.
        len: usize,
    },
}

fn message_suffix(message: Option<&str>) -> String {
    message.map(|m| format!(" - {m}")).unwrap_or_default()
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn describe_range(len: &usize) -> String {
    if *len == 0 {
        "No searches recorded yet; available indices: none.".to_string()
    } else {
        format!("Available indices: 0-{}", len - 1)
    }
}
