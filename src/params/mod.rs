//! Request parameter encoding.
//!
//! Parameters are a closed set of scalar kinds rendered as their canonical
//! string form. They are encoded as a query string for GET, an URL-encoded
//! form for POST, or a `multipart/form-data` body when binary parts are
//! attached.

use crate::errors::{FacebookResult, UploadError};
use crate::transport::{FilePart, MultipartBody};
use bytes::Bytes;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::io::SeekFrom;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt};

/// A scalar parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// String value.
    Str(String),
    /// Integer value.
    Int(i64),
    /// Boolean value.
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl Serialize for ParamValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ParamValue::Str(s) => serializer.serialize_str(s),
            other => serializer.serialize_str(&other.to_string()),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<&String> for ParamValue {
    fn from(value: &String) -> Self {
        ParamValue::Str(value.clone())
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

macro_rules! int_param {
    ($($t:ty),*) => {
        $(
            impl From<$t> for ParamValue {
                fn from(value: $t) -> Self {
                    ParamValue::Int(value as i64)
                }
            }
        )*
    };
}

int_param!(i32, i64, u32, u64, usize);

/// Named request parameters, kept in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `fields=a,b,c` parameter set.
    pub fn fields(list: &[&str]) -> Self {
        Self::new().with("fields", list.join(","))
    }

    /// Adds or replaces a parameter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds or replaces a parameter in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    /// Gets a parameter value.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    /// Number of parameters.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no parameters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates parameters in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Byte source for a binary part.
pub trait PartSource: AsyncRead + AsyncSeek + Unpin + Send {}

impl<T: AsyncRead + AsyncSeek + Unpin + Send> PartSource for T {}

/// A byte range of a seekable source sent as a multipart file field.
pub struct BinaryPart {
    /// Form field name.
    pub field_name: String,
    /// File name reported in the part header.
    pub file_name: String,
    source: Box<dyn PartSource>,
    start: u64,
    end: u64,
}

impl BinaryPart {
    /// Creates a part covering `[start, end)` of `source`.
    pub fn new(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        source: impl PartSource + 'static,
        start: u64,
        end: u64,
    ) -> FacebookResult<Self> {
        if start > end {
            return Err(UploadError::InvalidChunkRange { start, end }.into());
        }

        Ok(Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            source: Box::new(source),
            start,
            end,
        })
    }

    /// Start offset (inclusive).
    pub fn start(&self) -> u64 {
        self.start
    }

    /// End offset (exclusive).
    pub fn end(&self) -> u64 {
        self.end
    }

    /// Number of bytes this part carries.
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    /// Returns true if the part carries no bytes.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Seeks to `start` and reads exactly `end - start` bytes.
    ///
    /// The buffer grows with the bytes actually read, so a range past the end
    /// of the source fails with `ShortRead`.
    async fn read_range(&mut self) -> FacebookResult<Vec<u8>> {
        let len = self.len();

        self.source
            .seek(SeekFrom::Start(self.start))
            .await
            .map_err(|e| UploadError::InvalidPart(format!("seek failed: {}", e)))?;

        let mut buf = Vec::new();
        (&mut self.source)
            .take(len)
            .read_to_end(&mut buf)
            .await
            .map_err(|e| UploadError::InvalidPart(format!("read failed: {}", e)))?;

        if (buf.len() as u64) < len {
            return Err(UploadError::ShortRead {
                start: self.start,
                end: self.end,
            }
            .into());
        }
        Ok(buf)
    }
}

impl fmt::Debug for BinaryPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BinaryPart")
            .field("field_name", &self.field_name)
            .field("file_name", &self.file_name)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

/// Encodes parameters as a query string.
pub fn encode_query(params: &Params) -> String {
    // Serializing a map of strings cannot fail.
    serde_urlencoded::to_string(params).unwrap_or_default()
}

/// Encodes parameters as an `application/x-www-form-urlencoded` body.
pub fn encode_form(params: &Params) -> Bytes {
    Bytes::from(encode_query(params))
}

/// Reads binary parts and collects them, followed by scalar parameters, into
/// a `multipart/form-data` body.
///
/// Each part's source is advanced by the read; a part is consumed by encoding.
pub async fn encode_multipart(
    parts: Vec<BinaryPart>,
    params: &Params,
) -> FacebookResult<MultipartBody> {
    let mut body = MultipartBody::default();

    for mut part in parts {
        let data = part.read_range().await?;
        body.files.push(FilePart {
            field_name: part.field_name,
            file_name: part.file_name,
            data: Bytes::from(data),
        });
    }

    body.fields = params
        .iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Ok(body)
}
