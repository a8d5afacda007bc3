//! Resumable video upload sessions.
//!
//! A video is uploaded to an ad account in three phases, each one request:
//!
//! 1. `start`: announce the file size, receive an upload session id and the
//!    first byte range to send.
//! 2. `transfer`: send the requested byte range as a multipart chunk, receive
//!    the next range. Repeated until the range is empty.
//! 3. `finish`: attach title and description, receive the outcome and video id.
//!
//! [`UploadSession`] only records protocol state. Requests are made by
//! [`VideosService::advance`](crate::services::VideosService::advance), which
//! moves a session forward by exactly one phase step per call.
//!
//! # Concurrency
//!
//! A session is single-writer. `advance` takes `&mut UploadSession`; callers
//! that share a session between tasks must serialize access themselves, for
//! example with a `tokio::sync::Mutex` per session.
//!
//! # Failures
//!
//! Session fields are only written after a response has been fully decoded
//! and validated. A failed call leaves the session exactly as it was, so the
//! same step can be retried by calling `advance` again. A failed transfer is
//! resent from the same offsets.

use crate::errors::{DecodeError, FacebookResult, UploadError};
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Form field carrying a transfer chunk.
pub const VIDEO_CHUNK_FIELD: &str = "video_file_chunk";

/// Upload phase names as sent in `upload_phase`.
pub mod phase {
    /// Open the session.
    pub const START: &str = "start";
    /// Send one chunk.
    pub const TRANSFER: &str = "transfer";
    /// Close the session.
    pub const FINISH: &str = "finish";
}

/// Where a session is in the upload protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    /// No upload session id yet; next step is `start`.
    NotStarted,
    /// Offsets differ; next step is `transfer`.
    Transferring,
    /// All bytes acknowledged; next step is `finish`.
    Finishing,
    /// The server resolved the upload as succeeded or failed.
    Done,
}

/// State of one resumable video upload.
///
/// The session is `Serialize`/`Deserialize` so an in-flight upload can be
/// persisted and resumed later.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadSession {
    ad_account: String,
    path: PathBuf,
    size: Option<u64>,
    upload_session_id: String,
    start_offset: u64,
    end_offset: u64,
    title: String,
    description: String,
    video_id: String,
    success: Option<bool>,
}

impl UploadSession {
    /// Creates a session that will upload `path` to `ad_account` (`act_<id>`).
    pub fn new(ad_account: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            ad_account: ad_account.into(),
            path: path.into(),
            ..Default::default()
        }
    }

    /// Sets the video title sent with `finish`.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the video description sent with `finish`.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Ad account the video is uploaded to.
    pub fn ad_account(&self) -> &str {
        &self.ad_account
    }

    /// Source file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File size, known once `start` succeeded.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Server-assigned upload session id; empty before `start`.
    pub fn upload_session_id(&self) -> &str {
        &self.upload_session_id
    }

    /// First byte of the next chunk.
    pub fn start_offset(&self) -> u64 {
        self.start_offset
    }

    /// End (exclusive) of the next chunk.
    pub fn end_offset(&self) -> u64 {
        self.end_offset
    }

    /// Video title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Video description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Id of the uploaded video; empty until the server reports it.
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Outcome: `None` while unresolved.
    pub fn success(&self) -> Option<bool> {
        self.success
    }

    /// Current protocol state.
    pub fn state(&self) -> UploadState {
        if self.success.is_some() {
            UploadState::Done
        } else if self.upload_session_id.is_empty() {
            UploadState::NotStarted
        } else if self.start_offset != self.end_offset {
            UploadState::Transferring
        } else {
            UploadState::Finishing
        }
    }

    /// Returns true once the outcome is known.
    pub fn is_done(&self) -> bool {
        self.state() == UploadState::Done
    }

    /// Fraction of the file acknowledged, in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        if self.upload_session_id.is_empty() {
            return 0.0;
        }
        if self.start_offset == self.end_offset {
            return 1.0;
        }
        match self.size {
            Some(size) if size > 0 => (self.start_offset as f64 / size as f64).min(1.0),
            _ => 0.0,
        }
    }

    /// File name sent with transfer chunks.
    pub(crate) fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.to_string_lossy().into_owned())
    }

    /// Checks that the pending chunk lies inside a source of `len` bytes.
    pub(crate) fn check_chunk(&self, len: u64) -> FacebookResult<()> {
        if self.start_offset > self.end_offset {
            return Err(UploadError::InvalidChunkRange {
                start: self.start_offset,
                end: self.end_offset,
            }
            .into());
        }
        if self.end_offset > len {
            return Err(UploadError::ChunkExceedsSource {
                end: self.end_offset,
                len,
            }
            .into());
        }
        Ok(())
    }

    pub(crate) fn apply_start(&mut self, size: u64, response: StartResponse) -> FacebookResult<()> {
        if response.upload_session_id.is_empty() {
            return Err(DecodeError::MissingField("upload_session_id".to_string()).into());
        }
        check_range(response.start_offset, response.end_offset)?;
        if response.end_offset > size {
            return Err(UploadError::ChunkExceedsSource {
                end: response.end_offset,
                len: size,
            }
            .into());
        }

        self.size = Some(size);
        self.upload_session_id = response.upload_session_id;
        self.start_offset = response.start_offset;
        self.end_offset = response.end_offset;
        if !response.video_id.is_empty() {
            self.video_id = response.video_id;
        }
        Ok(())
    }

    pub(crate) fn apply_transfer(&mut self, response: TransferResponse) -> FacebookResult<()> {
        check_range(response.start_offset, response.end_offset)?;
        if response.start_offset < self.start_offset {
            return Err(UploadError::OffsetRegression {
                previous: self.start_offset,
                next: response.start_offset,
            }
            .into());
        }
        if let Some(size) = self.size {
            if response.end_offset > size {
                return Err(UploadError::ChunkExceedsSource {
                    end: response.end_offset,
                    len: size,
                }
                .into());
            }
        }

        self.start_offset = response.start_offset;
        self.end_offset = response.end_offset;
        Ok(())
    }

    pub(crate) fn apply_finish(&mut self, response: FinishResponse) -> FacebookResult<()> {
        let success = response
            .success
            .ok_or_else(|| DecodeError::MissingField("success".to_string()))?;

        self.success = Some(success);
        if !response.video_id.is_empty() {
            self.video_id = response.video_id;
        }
        Ok(())
    }
}

/// Rejects a server-supplied range whose start lies after its end.
fn check_range(start: u64, end: u64) -> FacebookResult<()> {
    if start > end {
        return Err(UploadError::InvalidChunkRange { start, end }.into());
    }
    Ok(())
}

/// Response to the `start` phase.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct StartResponse {
    #[serde(default)]
    pub upload_session_id: String,
    #[serde(default)]
    pub video_id: String,
    #[serde(default, deserialize_with = "deserialize_offset")]
    pub start_offset: u64,
    #[serde(default, deserialize_with = "deserialize_offset")]
    pub end_offset: u64,
}

/// Response to the `transfer` phase.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct TransferResponse {
    #[serde(default, deserialize_with = "deserialize_offset")]
    pub start_offset: u64,
    #[serde(default, deserialize_with = "deserialize_offset")]
    pub end_offset: u64,
}

/// Response to the `finish` phase.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct FinishResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub video_id: String,
}

/// Offsets arrive as numeric strings; an empty string or null means 0.
fn deserialize_offset<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawOffset {
        Number(u64),
        Text(String),
    }

    match Option::<RawOffset>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawOffset::Number(n)) => Ok(n),
        Some(RawOffset::Text(s)) if s.is_empty() => Ok(0),
        Some(RawOffset::Text(s)) => s
            .parse()
            .map_err(|_| D::Error::custom(format!("invalid offset {:?}", s))),
    }
}
