//! Test suite for minilink
//!
//! This module organizes all tests
