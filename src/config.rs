//! Server configuration with builder pattern and environment variable support.
//!
//! Configuration is resolved in order: explicit values → environment variables → defaults.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Exa API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.exa.ai";
/// Default overall deadline for one outbound request, in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;
/// Default bind host for the networked transports.
const DEFAULT_HOST: &str = "0.0.0.0";
/// Default bind port for the networked transports.
const DEFAULT_PORT: u16 = 8000;
/// Default number of searches kept in the ledger.
pub const DEFAULT_MAX_CACHED_SEARCHES: usize = 5;

/// Configuration for the MCP server and its Exa client.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Exa API key, sent as `x-api-key`.
    pub api_key: SecretString,
    /// API base URL (overridable for proxies and tests).
    pub base_url: String,
    /// Overall deadline per outbound request.
    pub timeout: Duration,
    /// Bind host for HTTP transports.
    pub host: String,
    /// Bind port for HTTP transports.
    pub port: u16,
    /// Ledger capacity.
    pub max_cached_searches: usize,
}

impl ServerConfig {
    /// Creates a new builder for `ServerConfig`.
    #[must_use]
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// Creates configuration from environment variables with defaults,
    /// including the `HOST`/`PORT` bind address.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ApiKeyMissing`] if no API key is found, or
    /// [`ConfigError::InvalidValue`] for an unparseable numeric variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder().from_env()?.bind_from_env()?.build()
    }
}

/// Builder for [`ServerConfig`].
#[derive(Debug, Clone, Default)]
pub struct ServerConfigBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    host: Option<String>,
    port: Option<u16>,
    max_cached_searches: Option<usize>,
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T: std::str::FromStr>(key: &'static str) -> Result<Option<T>, ConfigError> {
    env_var(key)
        .map(|raw| {
            raw.trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue { key, value: raw })
        })
        .transpose()
}

impl ServerConfigBuilder {
    /// Populates unset client and ledger fields from environment variables.
    ///
    /// The bind address is left alone; see [`Self::bind_from_env`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if a numeric variable does not parse.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        if self.api_key.is_none() {
            self.api_key = env_var("EXA_API_KEY");
        }
        if self.base_url.is_none() {
            self.base_url = env_var("EXA_BASE_URL");
        }
        if self.timeout.is_none() {
            self.timeout = parse_env::<u64>("EXA_TIMEOUT_SECS")?.map(Duration::from_secs);
        }
        if self.max_cached_searches.is_none() {
            self.max_cached_searches = parse_env("EXA_MAX_CACHED_SEARCHES")?;
        }
        Ok(self)
    }

    /// Populates an unset bind address from `HOST` and `PORT`.
    ///
    /// Only the networked transports call this, so a stray `PORT` never
    /// affects a stdio server.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if `PORT` is not a valid port.
    pub fn bind_from_env(mut self) -> Result<Self, ConfigError> {
        if self.host.is_none() {
            self.host = env_var("HOST");
        }
        if self.port.is_none() {
            self.port = parse_env("PORT")?;
        }
        Ok(self)
    }

    /// Sets the API key.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the base URL override.
    #[must_use]
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets the bind host.
    #[must_use]
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Sets the bind port.
    #[must_use]
    pub const fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Sets the ledger capacity.
    #[must_use]
    pub const fn max_cached_searches(mut self, n: usize) -> Self {
        self.max_cached_searches = Some(n);
        self
    }

    /// Builds the [`ServerConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ApiKeyMissing`] if no non-empty API key was set,
    /// or [`ConfigError::InvalidValue`] for a zero ledger capacity.
    pub fn build(self) -> Result<ServerConfig, ConfigError> {
        let api_key = self
            .api_key
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::ApiKeyMissing)?;

        let max_cached_searches = self
            .max_cached_searches
            .unwrap_or(DEFAULT_MAX_CACHED_SEARCHES);
        if max_cached_searches == 0 {
            return Err(ConfigError::InvalidValue {
                key: "EXA_MAX_CACHED_SEARCHES",
                value: "0".to_string(),
            });
        }

        Ok(ServerConfig {
            api_key: SecretString::from(api_key),
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            host: self.host.unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: self.port.unwrap_or(DEFAULT_PORT),
            max_cached_searches,
        })
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = ServerConfig::builder()
            .api_key("test-key")
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.api_key.expose_secret(), "test-key");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8000);
        assert_eq!(config.max_cached_searches, 5);
    }

    #[test]
    fn test_builder_missing_api_key() {
        let result = ServerConfig::builder().build();
        assert!(matches!(result, Err(ConfigError::ApiKeyMissing)));
    }

    #[test]
    fn test_builder_blank_api_key_is_missing() {
        let result = ServerConfig::builder().api_key("   ").build();
        assert!(matches!(result, Err(ConfigError::ApiKeyMissing)));
    }

    #[test]
    fn test_builder_zero_capacity_rejected() {
        let result = ServerConfig::builder()
            .api_key("key")
            .max_cached_searches(0)
            .build();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_builder_custom_values() {
        let config = ServerConfig::builder()
            .api_key("key")
            .base_url("http://127.0.0.1:9999")
            .timeout(Duration::from_secs(5))
            .host("127.0.0.1")
            .port(9000)
            .max_cached_searches(3)
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert_eq!(config.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 9000);
        assert_eq!(config.max_cached_searches, 3);
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ServerConfig::builder()
            .api_key("super-secret")
            .build()
            .unwrap_or_else(|_| unreachable!());
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
