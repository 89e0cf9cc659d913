//! 工具模块

pub mod error;
pub mod logger;
pub mod validation;

pub use error::{AppError, AppResponse};

/// Application-level Result type
///
/// Used in HTTP handlers and application logic
pub type AppResult<T> = Result<T, AppError>;
