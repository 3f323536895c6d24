//! HTTP inbound adapter exposing the REST endpoints.

pub mod bearer;
pub mod error;
pub mod health;
pub mod login;
pub mod shipments;
pub mod state;

pub use error::ApiResult;
