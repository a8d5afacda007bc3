//! Configuration for the Facebook client.
//!
//! Supports configuration via:
//! - Builder pattern
//! - Environment variables

use crate::auth::Credentials;
use crate::errors::{ConfigurationError, FacebookError, FacebookResult};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default Graph API host.
pub const DEFAULT_BASE_URL: &str = "https://graph.facebook.com";

/// Default Graph API version.
pub const DEFAULT_API_VERSION: &str = "v2.11";

/// Configuration for the Facebook client.
#[derive(Clone, Debug)]
pub struct FacebookConfig {
    /// Access token and API version.
    pub credentials: Arc<Credentials>,

    /// Base URL for the API, always ending in `/`.
    pub base_url: Url,

    /// Default timeout for requests.
    pub timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// User agent string.
    pub user_agent: String,

    /// Pool configuration.
    pub pool: PoolConfig,
}

/// Connection pool configuration.
#[derive(Clone, Debug)]
pub struct PoolConfig {
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,

    /// Idle timeout.
    pub idle_timeout: Option<Duration>,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            idle_timeout: Some(Duration::from_secs(90)),
        }
    }
}

impl FacebookConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> FacebookConfigBuilder {
        FacebookConfigBuilder::new()
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `FB_AUTH_TOKEN` (required), `FB_API_VERSION`, `FB_BASE_URL` and
    /// `FB_TIMEOUT` (seconds).
    pub fn from_env() -> FacebookResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> FacebookResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup("FB_AUTH_TOKEN").ok_or_else(|| {
            FacebookError::Configuration(ConfigurationError::MissingCredentials(
                "FB_AUTH_TOKEN not specified".to_string(),
            ))
        })?;

        let mut builder = FacebookConfigBuilder::new().access_token(token);

        if let Some(version) = lookup("FB_API_VERSION") {
            builder = builder.api_version(version);
        }

        if let Some(url) = lookup("FB_BASE_URL") {
            builder = builder.base_url(url);
        }

        if let Some(timeout) = lookup("FB_TIMEOUT") {
            if let Ok(secs) = timeout.parse::<u64>() {
                builder = builder.timeout(Duration::from_secs(secs));
            }
        }

        builder.build()
    }

    /// Gets the API version tag.
    pub fn api_version(&self) -> &str {
        self.credentials.api_version()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> FacebookResult<()> {
        if self.credentials.is_empty() {
            return Err(FacebookError::Configuration(
                ConfigurationError::MissingCredentials("Access token is required".to_string()),
            ));
        }

        let version = self.credentials.api_version();
        if version.is_empty() || version.contains('/') {
            return Err(FacebookError::configuration(format!(
                "Invalid API version: {:?}",
                version
            )));
        }

        // Plain http is only useful against local test servers.
        match self.base_url.scheme() {
            "https" | "http" => {}
            other => {
                return Err(FacebookError::configuration(format!(
                    "Unsupported URL scheme: {}",
                    other
                )))
            }
        }

        if self.base_url.cannot_be_a_base() {
            return Err(FacebookError::configuration("Base URL cannot be a base"));
        }

        Ok(())
    }
}

/// Builder for FacebookConfig.
pub struct FacebookConfigBuilder {
    access_token: Option<String>,
    api_version: String,
    base_url: Option<String>,
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
    pool: PoolConfig,
}

impl FacebookConfigBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            access_token: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            base_url: None,
            timeout: Duration::from_secs(300),
            connect_timeout: Duration::from_secs(30),
            user_agent: None,
            pool: PoolConfig::default(),
        }
    }

    /// Sets the access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Sets the API version tag.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Sets the user agent string.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Sets the pool configuration.
    pub fn pool(mut self, pool: PoolConfig) -> Self {
        self.pool = pool;
        self
    }

    /// Builds the configuration.
    pub fn build(self) -> FacebookResult<FacebookConfig> {
        let access_token = self.access_token.ok_or_else(|| {
            FacebookError::Configuration(ConfigurationError::MissingCredentials(
                "Access token is required".to_string(),
            ))
        })?;

        let raw_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let mut base_url = Url::parse(raw_url)
            .map_err(|e| FacebookError::configuration(format!("Invalid base URL: {}", e)))?;

        // Url::join replaces the last segment unless the path ends in '/'.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("integrations-facebook/{}", env!("CARGO_PKG_VERSION")));

        let config = FacebookConfig {
            credentials: Arc::new(Credentials::new(access_token, self.api_version)),
            base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            user_agent,
            pool: self.pool,
        };

        config.validate()?;

        Ok(config)
    }
}

impl Default for FacebookConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
