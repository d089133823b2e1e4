//! API integration tests
//!
//! Tests for the HTTP API endpoints

pub mod auth_test;
pub mod posts_test;
