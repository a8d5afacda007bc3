//! Wire envelopes that wrap the meaningful value of a field.

use serde::Deserialize;

/// `{"data": T}`, used for edges and lists.
///
/// Sibling keys such as `paging` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct DataEnvelope<T> {
    /// Wrapped value.
    #[serde(default)]
    pub data: T,
}

impl<T> DataEnvelope<T> {
    /// Unwraps the value.
    pub fn into_inner(self) -> T {
        self.data
    }
}

/// `{"data": {"url": ...}}`, used for pictures.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PictureEnvelope {
    #[serde(default)]
    data: PictureData,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct PictureData {
    #[serde(default)]
    url: String,
}

impl PictureEnvelope {
    /// Unwraps the picture URL.
    pub fn into_url(self) -> String {
        self.data.url
    }
}
