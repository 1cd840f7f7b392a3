//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use clap::{Args, Parser, Subcommand};

/// exa-mcp-rs: MCP server for web search using Exa AI.
///
/// Exposes `search`, `find_similar`, and `get_contents` tools plus the most
/// recent searches as `exa://searches` resources. Requires `EXA_API_KEY`.
#[derive(Parser, Debug)]
#[command(name = "exa-mcp-rs")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging (stderr).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Transport to serve on. Defaults to stdio.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available transports.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Serve over stdin/stdout (default).
    ///
    /// Reads JSON-RPC messages from stdin, writes responses to stdout.
    #[command(after_help = r#"Examples:
  exa-mcp-rs                          # stdio is the default
  EXA_API_KEY=... exa-mcp-rs stdio    # With API key
"#)]
    Stdio,

    /// Serve streamable HTTP at http://HOST:PORT/mcp.
    #[command(after_help = r#"Examples:
  exa-mcp-rs http                           # Listen on 0.0.0.0:8000
  exa-mcp-rs http --host 127.0.0.1 -p 9000  # Custom bind address
  HOST=127.0.0.1 PORT=9000 exa-mcp-rs http  # Same, via environment
"#)]
    Http(BindArgs),

    /// Serve at http://HOST:PORT/sse for clients configured with the SSE endpoint.
    Sse(BindArgs),
}

/// Bind address overrides for the HTTP transports.
///
/// Unset values fall back to the `HOST`/`PORT` environment variables, then to
/// `0.0.0.0:8000`.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct BindArgs {
    /// Host to bind to.
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_is_no_subcommand() {
        let cli = Cli::try_parse_from(["exa-mcp-rs"]).unwrap_or_else(|_| unreachable!());
        assert_eq!(cli.command, None);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_http_with_bind_args() {
        let cli = Cli::try_parse_from(["exa-mcp-rs", "-v", "http", "--host", "127.0.0.1", "-p", "9000"])
            .unwrap_or_else(|_| unreachable!());
        assert!(cli.verbose);
        assert_eq!(
            cli.command,
            Some(Commands::Http(BindArgs {
                host: Some("127.0.0.1".to_string()),
                port: Some(9000),
            }))
        );
    }

    #[test]
    fn test_sse_without_args() {
        let cli = Cli::try_parse_from(["exa-mcp-rs", "sse"]).unwrap_or_else(|_| unreachable!());
        assert_eq!(cli.command, Some(Commands::Sse(BindArgs::default())));
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(Cli::try_parse_from(["exa-mcp-rs", "http", "--port", "99999"]).is_err());
    }
}
