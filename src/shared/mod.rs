//! Shared Module
//!
//! This module contains types and rules that do not depend on the HTTP
//! server. A native or WASM client can reuse them to validate a form before
//! it is ever sent.
//!
//! # Overview
//!
//! - **`error`** - Field-level validation errors
//! - **`validation`** - Rules for names, emails, passwords, posts and comments

/// Shared error types
pub mod error;

/// Input validation rules
pub mod validation;

/// Re-export commonly used types for convenience
pub use error::{FieldError, SharedError};
pub use validation::{normalize_email, Validator};
