//! Facebook Graph API client implementation.

use crate::config::{FacebookConfig, FacebookConfigBuilder};
use crate::errors::{FacebookError, FacebookResult};
use crate::params::{BinaryPart, Params};
use crate::services::{AlbumsService, UsersService, VideosService};
use crate::transport::{HttpMethod, HttpTransport, ReqwestTransport};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

mod executor;
pub use executor::RequestExecutor;

/// Facebook Graph API client.
///
/// The entry point for every call. Cloning is cheap and clones share the
/// connection pool, so one client can serve many tasks.
#[derive(Clone)]
pub struct FacebookClient {
    /// Configuration.
    config: FacebookConfig,
    /// Request executor.
    executor: Arc<RequestExecutor>,
}

impl FacebookClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use integrations_facebook::{FacebookClient, FacebookConfig};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = FacebookConfig::builder()
    ///     .access_token("EAAB...")
    ///     .build()?;
    ///
    /// let client = FacebookClient::new(config)?;
    /// let me = client.users().profile("me").await?;
    /// println!("{} {}", me.first_name, me.last_name);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: FacebookConfig) -> FacebookResult<Self> {
        config.validate()?;

        let transport = ReqwestTransport::from_config(&config).map_err(|e| {
            FacebookError::configuration(format!("Failed to create transport: {}", e))
        })?;

        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client over a caller-supplied transport.
    pub fn with_transport(config: FacebookConfig, transport: Arc<dyn HttpTransport>) -> Self {
        let executor = Arc::new(RequestExecutor::new(config.clone(), transport));
        Self { config, executor }
    }

    /// Creates a client from `FB_*` environment variables.
    pub fn from_env() -> FacebookResult<Self> {
        Self::new(FacebookConfig::from_env()?)
    }

    /// Creates a new client builder.
    pub fn builder() -> FacebookClientBuilder {
        FacebookClientBuilder::new()
    }

    /// Access the users service.
    pub fn users(&self) -> UsersService {
        UsersService::new(self.executor.clone())
    }

    /// Access the albums service.
    pub fn albums(&self) -> AlbumsService {
        AlbumsService::new(self.executor.clone())
    }

    /// Access the videos service for resumable ad video uploads.
    pub fn videos(&self) -> VideosService {
        VideosService::new(self.executor.clone())
    }

    /// Performs one Graph API call and decodes the JSON result.
    ///
    /// `path` is relative to the versioned base, e.g. `"me"` or
    /// `"act_123/advideos"`. Binary parts require [`HttpMethod::Post`].
    pub async fn execute<T: DeserializeOwned>(
        &self,
        method: HttpMethod,
        path: &str,
        params: Params,
        parts: Vec<BinaryPart>,
    ) -> FacebookResult<T> {
        self.executor.execute(method, path, params, parts).await
    }

    /// Gets the configuration.
    pub fn config(&self) -> &FacebookConfig {
        &self.config
    }

    /// Gets the request executor.
    pub fn executor(&self) -> &Arc<RequestExecutor> {
        &self.executor
    }
}

/// Builder for FacebookClient.
pub struct FacebookClientBuilder {
    config_builder: FacebookConfigBuilder,
}

impl FacebookClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: FacebookConfig::builder(),
        }
    }

    /// Sets the access token.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.access_token(token);
        self
    }

    /// Sets the API version, e.g. `v2.11`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.api_version(version);
        self
    }

    /// Sets the base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the connect timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.connect_timeout(timeout);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Builds the client.
    pub fn build(self) -> FacebookResult<FacebookClient> {
        let config = self.config_builder.build()?;
        FacebookClient::new(config)
    }
}

impl Default for FacebookClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
