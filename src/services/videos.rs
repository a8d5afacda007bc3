//! Ad video service: drives resumable upload sessions.

use crate::client::RequestExecutor;
use crate::errors::{FacebookResult, UploadError};
use crate::params::{BinaryPart, Params};
use crate::services::upload::{
    phase, FinishResponse, StartResponse, TransferResponse, UploadSession, UploadState,
    VIDEO_CHUNK_FIELD,
};
use crate::transport::HttpMethod;
use std::path::Path;
use std::sync::Arc;
use tokio::fs::File;
use tracing::{debug, info};

/// Service for ad video uploads.
pub struct VideosService {
    executor: Arc<RequestExecutor>,
}

impl VideosService {
    /// Creates a new videos service.
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// Moves `session` forward by one protocol step.
    ///
    /// Makes exactly one request, chosen by the session state:
    /// `start` when not started, `transfer` while offsets differ, `finish`
    /// once all bytes are acknowledged. A session that is already done is
    /// returned unchanged without a request.
    ///
    /// On error the session is not modified and the same step can be retried.
    /// The source file is opened and closed within the call.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use integrations_facebook::*;
    /// # async fn example(client: FacebookClient) -> FacebookResult<()> {
    /// let mut session = UploadSession::new("act_123", "/tmp/clip.mp4")
    ///     .with_title("Chunked Upload");
    ///
    /// while !session.is_done() {
    ///     if let Err(e) = client.videos().advance(&mut session).await {
    ///         if !e.is_temporary() {
    ///             return Err(e);
    ///         }
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn advance(&self, session: &mut UploadSession) -> FacebookResult<UploadState> {
        let path = format!("{}/advideos", session.ad_account());

        match session.state() {
            UploadState::NotStarted => {
                let file = open_source(session.path()).await?;
                let size = source_len(&file, session.path()).await?;
                drop(file);

                let params = Params::new()
                    .with("upload_phase", phase::START)
                    .with("file_size", size);

                let response: StartResponse = self
                    .executor
                    .execute(HttpMethod::Post, &path, params, vec![])
                    .await?;
                session.apply_start(size, response)?;

                info!(
                    upload_session_id = %session.upload_session_id(),
                    size = size,
                    "Upload session started"
                );
            }
            UploadState::Transferring => {
                let file = open_source(session.path()).await?;
                let len = source_len(&file, session.path()).await?;
                session.check_chunk(len)?;

                let part = BinaryPart::new(
                    VIDEO_CHUNK_FIELD,
                    session.file_name(),
                    file,
                    session.start_offset(),
                    session.end_offset(),
                )?;

                let params = Params::new()
                    .with("upload_phase", phase::TRANSFER)
                    .with("start_offset", session.start_offset())
                    .with("upload_session_id", session.upload_session_id());

                debug!(
                    start_offset = session.start_offset(),
                    end_offset = session.end_offset(),
                    "Uploading chunk"
                );

                let response: TransferResponse = self
                    .executor
                    .execute(HttpMethod::Post, &path, params, vec![part])
                    .await?;
                session.apply_transfer(response)?;

                debug!(
                    start_offset = session.start_offset(),
                    end_offset = session.end_offset(),
                    progress = session.progress(),
                    "Chunk acknowledged"
                );
            }
            UploadState::Finishing => {
                let params = Params::new()
                    .with("upload_phase", phase::FINISH)
                    .with("upload_session_id", session.upload_session_id())
                    .with("title", session.title())
                    .with("description", session.description());

                let response: FinishResponse = self
                    .executor
                    .execute(HttpMethod::Post, &path, params, vec![])
                    .await?;
                session.apply_finish(response)?;

                info!(
                    video_id = %session.video_id(),
                    success = ?session.success(),
                    "Upload session finished"
                );
            }
            UploadState::Done => {
                debug!("Upload session already done");
            }
        }

        Ok(session.state())
    }

    /// Advances `session` until it is done.
    ///
    /// Stops at the first error without retrying; the session keeps its last
    /// good state so the caller can resume. Returns the server's verdict.
    pub async fn upload(&self, session: &mut UploadSession) -> FacebookResult<bool> {
        while self.advance(session).await? != UploadState::Done {}
        Ok(session.success().unwrap_or(false))
    }
}

async fn open_source(path: &Path) -> FacebookResult<File> {
    File::open(path).await.map_err(|e| {
        UploadError::FileAccess {
            path: path.display().to_string(),
            message: e.to_string(),
        }
        .into()
    })
}

async fn source_len(file: &File, path: &Path) -> FacebookResult<u64> {
    let metadata = file.metadata().await.map_err(|e| UploadError::FileAccess {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(metadata.len())
}
