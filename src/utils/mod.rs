//! Helper functions used across the application:
//!
//! - [`code_generator`] - Short code generation
//! - [`base_url`] - Short URL construction and base URL extraction from headers
//! - [`location`] - Encoding of redirect targets for the `Location` header

pub mod base_url;
pub mod code_generator;
pub mod location;
