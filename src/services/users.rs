//! Users service.

use crate::client::RequestExecutor;
use crate::errors::{FacebookError, FacebookResult};
use crate::params::Params;
use crate::transport::HttpMethod;
use crate::types::UserProfile;
use std::sync::Arc;

/// Fields requested for a user profile.
pub const PROFILE_FIELDS: &[&str] = &[
    "first_name",
    "last_name",
    "email",
    "picture",
    "adaccounts",
    "accounts{name,id,access_token,picture}",
];

/// Service for user profiles.
pub struct UsersService {
    executor: Arc<RequestExecutor>,
}

impl UsersService {
    /// Creates a new users service.
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Gets a user profile, including managed accounts and ad accounts.
    ///
    /// Use `"me"` for the token owner.
    pub async fn profile(&self, user_id: &str) -> FacebookResult<UserProfile> {
        if user_id.is_empty() {
            return Err(FacebookError::invalid_argument("user_id is required"));
        }

        self.executor
            .execute(HttpMethod::Get, user_id, Params::fields(PROFILE_FIELDS), vec![])
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FacebookConfig;
    use crate::mocks::RecordingTransport;
    use serde_json::json;

    fn service(transport: Arc<RecordingTransport>) -> UsersService {
        let config = FacebookConfig::builder()
            .access_token("test-token")
            .build()
            .unwrap();
        UsersService::new(Arc::new(RequestExecutor::new(config, transport)))
    }

    #[test]
    fn test_profile() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_json(
            200,
            json!({"id": "123", "first_name": "Ann", "email": "ann@example.com"}),
        );
        let users = service(transport.clone());

        let profile = tokio_test::block_on(users.profile("123")).unwrap();
        assert_eq!(profile.id, "123");
        assert_eq!(profile.email, "ann@example.com");

        let request = &transport.requests()[0];
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.url.path(), "/v2.11/123");
    }

    #[test]
    fn test_empty_user_id_rejected() {
        let transport = Arc::new(RecordingTransport::new());
        let users = service(transport.clone());

        let err = tokio_test::block_on(users.profile("")).unwrap_err();
        assert!(matches!(err, FacebookError::InvalidArgument(_)));
        assert!(transport.requests().is_empty());
    }
}
