//! Graph API object types.
//!
//! Several fields arrive wrapped in an envelope, e.g. `{"data": [...]}` for
//! edges or `{"data": {"url": ...}}` for pictures. Each public type is decoded
//! through a raw shape that mirrors the wire format and is then converted, so
//! the public shapes only carry the unwrapped values.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

pub mod envelope;

pub use envelope::{DataEnvelope, PictureEnvelope};

/// Facebook user profile.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "RawUserProfile")]
pub struct UserProfile {
    /// User id.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
    /// Profile picture URL.
    pub picture: String,
    /// Pages and other accounts the user manages.
    pub accounts: Vec<Account>,
    /// Ad accounts the user can act on.
    pub ad_accounts: Vec<AdAccount>,
}

#[derive(Deserialize)]
struct RawUserProfile {
    #[serde(default)]
    id: String,
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    picture: PictureEnvelope,
    #[serde(default)]
    accounts: DataEnvelope<Vec<Account>>,
    #[serde(default)]
    adaccounts: DataEnvelope<Vec<AdAccount>>,
}

impl From<RawUserProfile> for UserProfile {
    fn from(raw: RawUserProfile) -> Self {
        Self {
            id: raw.id,
            first_name: raw.first_name,
            last_name: raw.last_name,
            email: raw.email,
            picture: raw.picture.into_url(),
            accounts: raw.accounts.into_inner(),
            ad_accounts: raw.adaccounts.into_inner(),
        }
    }
}

/// A page or other account managed by the user.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawAccount")]
pub struct Account {
    /// Account id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Page access token, when requested.
    pub access_token: Option<SecretString>,
    /// Picture URL.
    pub picture: String,
}

#[derive(Deserialize)]
struct RawAccount {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    picture: PictureEnvelope,
}

impl From<RawAccount> for Account {
    fn from(raw: RawAccount) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            access_token: raw.access_token.map(SecretString::new),
            picture: raw.picture.into_url(),
        }
    }
}

/// Ad account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdAccount {
    /// Graph id, `act_<account_id>`.
    #[serde(default)]
    pub id: String,
    /// Numeric account id.
    #[serde(default)]
    pub account_id: String,
}

/// Photo album.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawAlbum")]
pub struct Album {
    /// Album id.
    pub id: String,
    /// Album name.
    pub name: String,
    /// Album description.
    pub message: String,
    /// Photos in the album, when requested.
    pub images: Vec<Image>,
}

#[derive(Deserialize)]
struct RawAlbum {
    #[serde(default)]
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    photos: DataEnvelope<Vec<Image>>,
}

impl From<RawAlbum> for Album {
    fn from(raw: RawAlbum) -> Self {
        Self {
            id: raw.id,
            name: raw.name,
            message: raw.message,
            images: raw.photos.into_inner(),
        }
    }
}

/// A photo with its available renditions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Image {
    /// Photo id.
    #[serde(default)]
    pub id: String,
    /// Renditions at different sizes.
    #[serde(default)]
    pub images: Vec<ImageSource>,
}

/// One rendition of a photo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ImageSource {
    /// Width in pixels.
    #[serde(default)]
    pub width: u32,
    /// Height in pixels.
    #[serde(default)]
    pub height: u32,
    /// Download URL.
    #[serde(default)]
    pub source: String,
}

/// Visibility of a created object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Privacy {
    /// Only visible to the user.
    #[serde(rename = "SELF")]
    SelfOnly,
    /// Visible to all of the user's friends.
    #[serde(rename = "ALL_FRIENDS")]
    AllFriends,
}

impl Privacy {
    /// Wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Privacy::SelfOnly => "SELF",
            Privacy::AllFriends => "ALL_FRIENDS",
        }
    }

    /// Privacy parameter value, a JSON object such as `{"value":"SELF"}`.
    pub fn to_param(&self) -> String {
        serde_json::json!({ "value": self }).to_string()
    }
}

/// Response to a create call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CreatedObject {
    /// Id of the new object.
    pub id: String,
}
