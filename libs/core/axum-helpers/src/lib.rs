//! Shared axum plumbing: the service-wide error envelope, request
//! extractors, health endpoint, and server lifecycle glue.

pub mod errors;
pub mod extractors;
pub mod health;
pub mod server;
pub mod shutdown;

pub use errors::{AppError, ErrorResponse};
pub use extractors::{UserIdentity, UuidPath, ValidatedJson};
