//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization; request bodies
//! are checked with `validator` before reaching the registry.

pub mod health;
pub mod link;
pub mod pagination;
pub mod shorten;
