//! Backend entry-point: wires the REST endpoints and OpenAPI document.

use actix_web::web;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use tms_backend::inbound::http::health::HealthState;
use tms_backend::server::{Cli, ServerConfig, build_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::from(Cli::parse());
    let health_state = web::Data::new(HealthState::new());
    let server = build_server(health_state.clone(), &config)?;
    health_state.mark_ready();
    server.await
}
