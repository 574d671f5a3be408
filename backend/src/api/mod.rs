//! HTTP adapter surface.

pub mod error;

pub use error::{ApiError, ApiErrorCode, ApiResult};
