pub mod api_client;
pub mod auth_service;
pub mod error;
pub mod navigation;

pub use api_client::*;
pub use auth_service::*;
pub use error::{ApiError, ErrorKind};
pub use navigation::*;
