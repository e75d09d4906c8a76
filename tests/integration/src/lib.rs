//! Integration test utilities for the academy API
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API over HTTP. Servers run on the in-memory store, so no
//! external services are needed.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
