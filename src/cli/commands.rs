//! CLI command implementations.

use crate::cli::parser::{BindArgs, Cli, Commands};
use crate::config::{ServerConfig, ServerConfigBuilder};
use crate::error::{Error, Result};
use crate::mcp::transport::{HTTP_PATH, SSE_PATH};
use crate::mcp::{ExaMcpServer, serve_http, serve_stdio};

/// Resolves configuration for the selected transport.
///
/// Explicit `--host`/`--port` win over the environment, which is only
/// consulted for the bind address when an HTTP transport is selected. A
/// missing API key is reported here, before any transport is started.
///
/// # Errors
///
/// Returns [`Error::Config`] if configuration is incomplete or malformed.
pub fn resolve_config(command: Option<&Commands>) -> Result<ServerConfig> {
    Ok(config_builder(command)?.from_env()?.build()?)
}

/// Starts a builder with the bind address for networked transports. Stdio
/// never reads `HOST`/`PORT`.
fn config_builder(command: Option<&Commands>) -> Result<ServerConfigBuilder> {
    let builder = ServerConfigBuilder::default();
    match command {
        Some(Commands::Http(bind) | Commands::Sse(bind)) => {
            Ok(apply_bind(builder, bind).bind_from_env()?)
        }
        Some(Commands::Stdio) | None => Ok(builder),
    }
}

fn apply_bind(mut builder: ServerConfigBuilder, bind: &BindArgs) -> ServerConfigBuilder {
    if let Some(host) = &bind.host {
        builder = builder.host(host.clone());
    }
    if let Some(port) = bind.port {
        builder = builder.port(port);
    }
    builder
}

/// Executes the CLI command.
///
/// Resolves configuration, builds the server, and runs the selected
/// transport until the client disconnects (stdio) or the process receives
/// Ctrl-C (HTTP).
///
/// # Errors
///
/// Returns an error on configuration failure, client construction failure,
/// or if the transport exits with an error.
pub fn execute(cli: &Cli) -> Result<()> {
    let config = resolve_config(cli.command.as_ref())?;
    let server = ExaMcpServer::from_config(&config)?;

    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        match cli.command.as_ref().unwrap_or(&Commands::Stdio) {
            Commands::Stdio => serve_stdio(server).await,
            Commands::Http(_) => serve_http(server, &config.host, config.port, HTTP_PATH).await,
            Commands::Sse(_) => serve_http(server, &config.host, config.port, SSE_PATH).await,
        }
    })
    .map_err(|e| Error::Server(e.to_string()))
}
