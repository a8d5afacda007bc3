//! Albums service.

use crate::client::RequestExecutor;
use crate::errors::{FacebookError, FacebookResult};
use crate::params::Params;
use crate::transport::HttpMethod;
use crate::types::{Album, CreatedObject, DataEnvelope, Privacy};
use std::sync::Arc;

/// Service for photo albums.
pub struct AlbumsService {
    executor: Arc<RequestExecutor>,
}

impl AlbumsService {
    /// Creates a new albums service.
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Lists the albums of a user.
    pub async fn list(&self, user_id: &str) -> FacebookResult<Vec<Album>> {
        require("user_id", user_id)?;

        let page: DataEnvelope<Vec<Album>> = self
            .executor
            .execute(
                HttpMethod::Get,
                &format!("{}/albums", user_id),
                Params::new(),
                vec![],
            )
            .await?;
        Ok(page.into_inner())
    }

    /// Gets an album with the renditions of its photos.
    pub async fn get(&self, album_id: &str) -> FacebookResult<Album> {
        require("album_id", album_id)?;

        self.executor
            .execute(
                HttpMethod::Get,
                album_id,
                Params::fields(&["id", "name", "photos{images}"]),
                vec![],
            )
            .await
    }

    /// Creates an album and returns it with its new id.
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        message: &str,
        privacy: Privacy,
    ) -> FacebookResult<Album> {
        require("user_id", user_id)?;
        require("name", name)?;

        let params = Params::new()
            .with("name", name)
            .with("message", message)
            .with("privacy", privacy.to_param());

        let created: CreatedObject = self
            .executor
            .execute(
                HttpMethod::Post,
                &format!("{}/albums", user_id),
                params,
                vec![],
            )
            .await?;

        Ok(Album {
            id: created.id,
            name: name.to_string(),
            message: message.to_string(),
            images: Vec::new(),
        })
    }
}

fn require(name: &str, value: &str) -> FacebookResult<()> {
    if value.is_empty() {
        return Err(FacebookError::invalid_argument(format!("{} is required", name)));
    }
    Ok(())
}
