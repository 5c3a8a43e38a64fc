//! # API Shared
//!
//! Shared definitions for the diet APIs.
//!
//! Contains:
//! - JSON request/response types with OpenAPI schemas (`types` module)
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the root runner.

pub mod health;
pub mod types;

pub use health::HealthService;
pub use types::*;
