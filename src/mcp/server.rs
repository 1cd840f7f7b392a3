//! MCP server implementation for exa-mcp-rs.
//!
//! Exposes the Exa gateway as MCP tools and the search ledger as MCP
//! resources. Tool failures are returned as error results carrying the
//! gateway's message; they never surface as protocol faults.

use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, Implementation, ListResourceTemplatesResult,
    ListResourcesResult, PaginatedRequestParams, ProtocolVersion, RawResource, RawResourceTemplate,
    ReadResourceRequestParams, ReadResourceResult, Resource, ResourceContents, ServerCapabilities,
    ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{ErrorData as McpError, RoleServer, ServerHandler, tool, tool_handler, tool_router};
use serde_json::Value;

use crate::api::ExaClient;
use crate::config::ServerConfig;
use crate::core::Ledger;
use crate::error::{GatewayError, LedgerError};
use crate::gateway::Gateway;

use super::params::{FindSimilarParams, GetContentsParams, SearchParams};

/// URI of the ledger listing resource.
pub const SEARCHES_URI: &str = "exa://searches";
/// URI template of a single ledger record.
pub const SEARCH_URI_TEMPLATE: &str = "exa://searches/{index}";

/// A parsed ledger resource URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LedgerUri {
    Listing,
    Record(i64),
}

impl LedgerUri {
    const fn mime_type(self) -> &'static str {
        match self {
            Self::Listing => "text/plain",
            Self::Record(_) => "application/json",
        }
    }
}

fn parse_uri(uri: &str) -> Result<LedgerUri, McpError> {
    let rest = uri.strip_prefix(SEARCHES_URI).ok_or_else(|| {
        McpError::invalid_params(
            format!("Invalid URI, expected {SEARCHES_URI} or {SEARCH_URI_TEMPLATE}: {uri}"),
            None,
        )
    })?;

    match rest.trim_end_matches('/') {
        "" => Ok(LedgerUri::Listing),
        segment => {
            let index = segment
                .strip_prefix('/')
                .filter(|s| !s.contains('/'))
                .ok_or_else(|| {
                    McpError::invalid_params(format!("Invalid URI format: {uri}"), None)
                })?;
            index.parse().map(LedgerUri::Record).map_err(|_| {
                McpError::invalid_params(format!("Invalid search index: {index}"), None)
            })
        }
    }
}

/// Converts a gateway outcome into a tool result.
fn tool_result(outcome: Result<Value, GatewayError>) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(value) => {
            let json = serde_json::to_string_pretty(&value).map_err(|e| {
                McpError::internal_error(format!("Serialization error: {e}"), None)
            })?;
            Ok(CallToolResult::success(vec![Content::text(json)]))
        }
        Err(e) => Ok(CallToolResult::error(vec![Content::text(e.to_string())])),
    }
}

/// Exa search MCP server.
///
/// Cloning is cheap and every clone shares the same gateway and ledger, so
/// per-session instances created by the HTTP transport see one ledger.
#[derive(Clone)]
pub struct ExaMcpServer {
    tool_router: ToolRouter<Self>,
    gateway: Gateway,
}

#[tool_router]
impl ExaMcpServer {
    /// Search the web using Exa.
    #[tool(
        name = "search",
        description = "Search the web using Exa AI. Returns JSON with titles, URLs, and text content for each result. num_results is clamped to 1-50 (default 10). Successful searches are kept in exa://searches."
    )]
    async fn search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        tool_result(self.gateway.search(&params.query, params.num_results).await)
    }

    /// Find content similar to a URL.
    #[tool(
        name = "find_similar",
        description = "Find content similar to a given URL using Exa AI. Returns JSON with similar pages and their text content. num_results is clamped to 1-50 (default 10)."
    )]
    async fn find_similar(
        &self,
        Parameters(params): Parameters<FindSimilarParams>,
    ) -> Result<CallToolResult, McpError> {
        tool_result(
            self.gateway
                .find_similar(&params.url, params.num_results)
                .await,
        )
    }

    /// Retrieve document contents by Exa ID.
    #[tool(
        name = "get_contents",
        description = "Get the contents of specific documents by their Exa IDs. Returns JSON with the document contents."
    )]
    async fn get_contents(
        &self,
        Parameters(params): Parameters<GetContentsParams>,
    ) -> Result<CallToolResult, McpError> {
        tool_result(self.gateway.get_contents(params.ids).await)
    }
}

#[tool_handler]
impl ServerHandler for ExaMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: "exa-search-server".to_string(),
                title: Some("Exa Search MCP Server".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Web search using Exa AI. Use `search` for queries, `find_similar` for pages \
                 like a given URL, and `get_contents` to fetch documents by ID. The last few \
                 searches are browsable via exa://searches; indices count from the most recent \
                 search and shift as new searches complete."
                    .to_string(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(ListResourcesResult {
            resources: self.resources(),
            next_cursor: None,
            meta: None,
        })
    }

    async fn read_resource(
        &self,
        ReadResourceRequestParams { uri, .. }: ReadResourceRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        Ok(ReadResourceResult {
            contents: vec![self.ledger_contents(uri)?],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let record_template = RawResourceTemplate {
            uri_template: SEARCH_URI_TEMPLATE.to_string(),
            name: "Recent search".to_string(),
            title: None,
            description: Some(
                "Returns JSON with the query, timestamp, and full Exa response of a recent \
                 search. Index 0 is the most recent search."
                    .to_string(),
            ),
            mime_type: Some("application/json".to_string()),
            icons: None,
        };

        Ok(ListResourceTemplatesResult {
            resource_templates: vec![record_template.no_annotation()],
            next_cursor: None,
            meta: None,
        })
    }
}

impl ExaMcpServer {
    /// Creates a server over an existing gateway.
    #[must_use]
    pub fn new(gateway: Gateway) -> Self {
        Self {
            tool_router: Self::tool_router(),
            gateway,
        }
    }

    /// Creates a server with a fresh ledger and an [`ExaClient`] built from
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &ServerConfig) -> Result<Self, crate::error::Error> {
        let client = ExaClient::new(config)?;
        let ledger = Arc::new(Ledger::with_capacity(config.max_cached_searches));
        Ok(Self::new(Gateway::new(Arc::new(client), ledger)))
    }

    /// The ledger backing the resources.
    #[must_use]
    pub const fn ledger(&self) -> &Arc<Ledger> {
        self.gateway.ledger()
    }

    /// The listing resource plus one resource per current record.
    fn resources(&self) -> Vec<Resource> {
        let records = self.ledger().snapshot();
        let mut resources = Vec::with_capacity(records.len() + 1);

        let mut listing = RawResource::new(SEARCHES_URI, "Recent searches");
        listing.description = Some(format!(
            "Summary of the {} most recent searches",
            self.ledger().capacity()
        ));
        listing.mime_type = Some(LedgerUri::Listing.mime_type().to_string());
        resources.push(listing.no_annotation());

        for (index, record) in records.iter().enumerate() {
            let mut raw = RawResource::new(
                format!("{SEARCHES_URI}/{index}"),
                format!("Search {index}: {}", record.query),
            );
            raw.description = Some(format!(
                "{} results, captured {}",
                record.result_count(),
                record.timestamp()
            ));
            raw.mime_type = Some(LedgerUri::Record(0).mime_type().to_string());
            resources.push(raw.no_annotation());
        }

        resources
    }

    /// Resource contents for `uri`, tagged with the MIME type the listing
    /// advertises for it.
    fn ledger_contents(&self, uri: String) -> Result<ResourceContents, McpError> {
        let mime = parse_uri(&uri)?.mime_type();
        let text = self.read_ledger(&uri)?;
        let mut contents = ResourceContents::text(text, uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = Some(mime.to_string());
        }
        Ok(contents)
    }

    /// Renders the ledger view addressed by `uri`.
    fn read_ledger(&self, uri: &str) -> Result<String, McpError> {
        match parse_uri(uri)? {
            LedgerUri::Listing => Ok(self.ledger().render_listing()),
            LedgerUri::Record(index) => {
                let record = self.ledger().get(index).map_err(|e| match e {
                    LedgerError::IndexOutOfRange { .. } => {
                        McpError::resource_not_found(e.to_string(), None)
                    }
                })?;
                serde_json::to_string_pretty(&*record).map_err(|e| {
                    McpError::internal_error(format!("Serialization error: {e}"), None)
                })
            }
        }
    }
}
