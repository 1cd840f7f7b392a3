//! MCP transport layer for stdio and HTTP.
//!
//! Provides functions to start the MCP server with different transports.

use std::sync::Arc;

use rmcp::ServiceExt;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};

use super::server::ExaMcpServer;

/// Mount path for the streamable HTTP transport.
pub const HTTP_PATH: &str = "/mcp";
/// Mount path used when clients are configured for the legacy SSE endpoint.
pub const SSE_PATH: &str = "/sse";

/// Starts the MCP server with stdio transport.
///
/// The server reads JSON-RPC messages from stdin and writes responses to stdout.
///
/// # Errors
///
/// Returns an error if the server fails to start or encounters a runtime error.
pub async fn serve_stdio(server: ExaMcpServer) -> anyhow::Result<()> {
    tracing::info!("Exa Search MCP server running on stdio");
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}

/// Starts the MCP server with streamable HTTP transport.
///
/// Listens on `host:port` and serves MCP at `path` (normally [`HTTP_PATH`], or
/// [`SSE_PATH`] for clients still pointed at the SSE endpoint; streamable HTTP
/// answers those with event streams). Every session gets a clone of `server`,
/// so all sessions share one ledger.
///
/// # Errors
///
/// Returns an error if the server fails to bind or encounters a runtime error.
pub async fn serve_http(
    server: ExaMcpServer,
    host: &str,
    port: u16,
    path: &str,
) -> anyhow::Result<()> {
    let ct = tokio_util::sync::CancellationToken::new();

    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        Arc::new(LocalSessionManager::default()),
        StreamableHttpServerConfig {
            cancellation_token: ct.child_token(),
            ..Default::default()
        },
    );

    let router = axum::Router::new().nest_service(path, service);
    let addr = format!("{host}:{port}");
    let tcp_listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Exa Search MCP server listening on http://{addr}{path}");

    axum::serve(tcp_listener, router)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            ct.cancel();
        })
        .await?;

    Ok(())
}
