//! Error types for the Facebook Graph API integration.
//!
//! Every failure is surfaced to the caller; nothing is retried inside the
//! crate. Use [`FacebookError::is_temporary`] to decide whether re-issuing a
//! request is worthwhile.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Result type for Facebook operations.
pub type FacebookResult<T> = Result<T, FacebookError>;

/// Graph API error code for "Calls to this api have exceeded the rate limit".
pub const RATE_LIMIT_EXCEEDED_CODE: i64 = 613;

/// Top-level error type for the Facebook integration.
#[derive(Debug, Error)]
pub enum FacebookError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// The request never produced an HTTP response.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The response body did not have the expected JSON shape.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Non-success status whose body was not a structured error.
    #[error("Status: {status}")]
    Status {
        /// HTTP status code returned by the server.
        status: StatusCode,
    },

    /// Structured error returned by the Graph API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Local upload validation or file access error.
    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// A caller-supplied argument was rejected before any request was made.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl FacebookError {
    /// Creates a configuration error.
    pub fn configuration(msg: impl Into<String>) -> Self {
        FacebookError::Configuration(ConfigurationError::InvalidConfiguration(msg.into()))
    }

    /// Creates an invalid argument error.
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        FacebookError::InvalidArgument(msg.into())
    }

    /// Creates a status error.
    pub fn status(status: StatusCode) -> Self {
        FacebookError::Status { status }
    }

    /// Returns true if re-issuing the request may succeed.
    ///
    /// Only structured API errors are candidates. Error code 613 means the
    /// caller is already over a rate limit, so it is reported as not temporary;
    /// every other API error code is.
    pub fn is_temporary(&self) -> bool {
        match self {
            FacebookError::Api(err) => err.code != RATE_LIMIT_EXCEEDED_CODE,
            _ => false,
        }
    }

    /// Returns the structured API error, if this is one.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            FacebookError::Api(err) => Some(err),
            _ => None,
        }
    }

    /// Returns the HTTP status code for status errors.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            FacebookError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

/// Reports whether `err` is worth retrying. See [`FacebookError::is_temporary`].
pub fn is_temporary(err: &FacebookError) -> bool {
    err.is_temporary()
}

/// Structured Graph API error, decoded from `{"error": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Error)]
#[error("{error_type}: {message} ({code}) {error_user_title}: {error_user_msg}")]
pub struct ApiError {
    /// Error message.
    #[serde(default)]
    pub message: String,
    /// Error type tag, e.g. `OAuthException`.
    #[serde(default, rename = "type")]
    pub error_type: String,
    /// Numeric error code.
    #[serde(default)]
    pub code: i64,
    /// Numeric error subcode.
    #[serde(default)]
    pub error_subcode: i64,
    /// Whether the server flagged the error as transient.
    #[serde(default)]
    pub is_transient: bool,
    /// User-facing title.
    #[serde(default)]
    pub error_user_title: String,
    /// User-facing message.
    #[serde(default)]
    pub error_user_msg: String,
    /// Trace id for support requests.
    #[serde(default)]
    pub fbtrace_id: String,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Missing credentials.
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Transport errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Timeout error.
    #[error("Timeout: {0}")]
    Timeout(String),

    /// Connection or DNS failure.
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Any other failure while sending or reading the response.
    #[error("Request failed: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else {
            TransportError::Request(err.to_string())
        }
    }
}

/// Response decoding errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Body is not valid JSON for the expected shape.
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    /// A required field was absent.
    #[error("Missing field: {0}")]
    MissingField(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::InvalidJson(err.to_string())
    }
}

/// Upload errors.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The source file could not be opened or read.
    #[error("File access failed for {path}: {message}")]
    FileAccess {
        /// File path.
        path: String,
        /// Underlying I/O error.
        message: String,
    },

    /// Chunk start is after its end.
    #[error("Invalid chunk range [{start}, {end})")]
    InvalidChunkRange {
        /// Chunk start offset.
        start: u64,
        /// Chunk end offset (exclusive).
        end: u64,
    },

    /// Chunk end lies past the end of the source.
    #[error("Chunk end {end} exceeds source length {len}")]
    ChunkExceedsSource {
        /// Chunk end offset (exclusive).
        end: u64,
        /// Source length in bytes.
        len: u64,
    },

    /// Source ran out of bytes while a part was being read.
    #[error("Source ended before chunk [{start}, {end}) was read")]
    ShortRead {
        /// Chunk start offset.
        start: u64,
        /// Chunk end offset (exclusive).
        end: u64,
    },

    /// Server moved the start offset backwards.
    #[error("Offset moved backwards from {previous} to {next}")]
    OffsetRegression {
        /// Current start offset.
        previous: u64,
        /// Start offset returned by the server.
        next: u64,
    },

    /// A binary part could not be encoded.
    #[error("Invalid part: {0}")]
    InvalidPart(String),
}
