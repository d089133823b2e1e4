//! Backend Error Module
//!
//! This module defines the error type shared by every backend component and
//! its conversion into HTTP responses.
//!
//! # Architecture
//!
//! - **`types`** - `BackendError`, `AuthFailure` and the status mapping
//! - **`conversion`** - `IntoResponse` and framework rejection conversions
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use minilink::backend::error::BackendError;
//! use axum::response::Response;
//!
//! async fn handler() -> Result<Response, BackendError> {
//!     Err(BackendError::not_found("Post not found."))
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use conversion::ErrorBody;
pub use types::{AuthFailure, BackendError};
