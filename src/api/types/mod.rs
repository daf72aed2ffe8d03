//! Request and error types for the relay API

pub mod error;
pub mod generate;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use generate::GenerateRequest;
