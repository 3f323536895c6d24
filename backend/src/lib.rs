//! Backend library modules.

pub mod auth;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by external tooling.
pub use doc::ApiDoc;
/// Trace middleware attaching a per-request identifier.
pub use middleware::RequestTrace;
