pub mod env_config;
pub mod error;
pub mod http;
pub mod misc;

pub use error::{AppError, Res};
pub use http::Success;
