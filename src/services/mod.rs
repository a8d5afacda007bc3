//! Service modules for the Graph API.

pub mod albums;
pub mod upload;
pub mod users;
pub mod videos;

pub use albums::AlbumsService;
pub use upload::{UploadSession, UploadState};
pub use users::UsersService;
pub use videos::VideosService;
