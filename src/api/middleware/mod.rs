//! HTTP middleware.
//!
//! - [`tracing`] - Structured request/response logging

pub mod tracing;
