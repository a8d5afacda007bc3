//! Facebook Graph API Integration Module
//!
//! A thin, typed client for the Facebook Graph API. It builds versioned
//! request URLs, attaches the access token, encodes parameters as a query,
//! a form or a multipart body, and decodes JSON results or structured API
//! errors.
//!
//! # Features
//!
//! - **Generic calls**: any Graph path with [`FacebookClient::execute`]
//! - **Users**: profile with managed accounts and ad accounts
//! - **Albums**: list, fetch and create photo albums
//! - **Ad videos**: resumable chunked uploads driven one step at a time
//! - **Error classification**: [`is_temporary`] tells retryable failures apart
//!
//! Nothing is retried inside the crate. Retry policy belongs to the caller.
//!
//! # Example
//!
//! ```no_run
//! use integrations_facebook::{is_temporary, FacebookClient, FacebookConfig, UploadSession};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = FacebookConfig::from_env()?;
//! let client = FacebookClient::new(config)?;
//!
//! let mut session = UploadSession::new("act_123", "/tmp/clip.mp4")
//!     .with_title("Chunked Upload")
//!     .with_description("Uploaded in pieces");
//!
//! while !session.is_done() {
//!     match client.videos().advance(&mut session).await {
//!         Ok(_) => println!("{:.0}%", session.progress() * 100.0),
//!         Err(e) if is_temporary(&e) => continue,
//!         Err(e) => return Err(e.into()),
//!     }
//! }
//! println!("video {}", session.video_id());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Core modules
pub mod auth;
pub mod client;
pub mod config;
pub mod errors;
pub mod observability;
pub mod params;
pub mod services;
pub mod transport;
pub mod types;

// Internal modules (not part of public API)
#[cfg(test)]
#[allow(missing_docs)]
mod mocks;

// Re-exports for convenience
pub use client::{FacebookClient, FacebookClientBuilder};
pub use config::{FacebookConfig, FacebookConfigBuilder};
pub use errors::{is_temporary, ApiError, FacebookError, FacebookResult};
pub use params::{BinaryPart, ParamValue, Params};
pub use services::{UploadSession, UploadState};
pub use transport::HttpMethod;
pub use types::{Account, AdAccount, Album, Image, ImageSource, Privacy, UserProfile};

/// Prelude module with commonly used types and traits.
///
/// ```no_run
/// use integrations_facebook::prelude::*;
/// ```
pub mod prelude {
    // Client
    pub use crate::client::{FacebookClient, FacebookClientBuilder};

    // Configuration
    pub use crate::config::{FacebookConfig, FacebookConfigBuilder};

    // Services
    pub use crate::services::{
        AlbumsService, UploadSession, UploadState, UsersService, VideosService,
    };

    // Request building
    pub use crate::params::{BinaryPart, ParamValue, Params};
    pub use crate::transport::HttpMethod;

    // Common types
    pub use crate::types::{Account, AdAccount, Album, Image, Privacy, UserProfile};

    // Errors
    pub use crate::errors::{is_temporary, ApiError, FacebookError, FacebookResult};
}
