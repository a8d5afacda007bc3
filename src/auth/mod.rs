//! Credentials for the Graph API.
//!
//! A client is bound to one access token and one API version for its whole
//! lifetime. Both are shared read-only by every request.

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Query parameter carrying the access token on every request.
pub const ACCESS_TOKEN_PARAM: &str = "access_token";

/// Access token plus the API version tag it is used with.
#[derive(Clone)]
pub struct Credentials {
    access_token: SecretString,
    api_version: String,
}

impl Credentials {
    /// Creates credentials from a token and version tag such as `v2.11`.
    pub fn new(access_token: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self {
            access_token: SecretString::new(access_token.into()),
            api_version: api_version.into(),
        }
    }

    /// Gets the API version tag.
    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    /// Returns true if no token is set.
    pub fn is_empty(&self) -> bool {
        self.access_token.expose_secret().is_empty()
    }

    /// Expose the token for use in requests.
    pub(crate) fn expose_token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credentials({}, [REDACTED])", self.api_version)
    }
}
