//! Backend entry-point: loads settings, initialises logging and serves HTTP.

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use carebridge::config::AppSettings;
use carebridge::inbound::http::health::HealthState;
use carebridge::server::create_server;

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

    let settings = AppSettings::load()
        .map_err(std::io::Error::other)?
        .validate()
        .map_err(|e| {
            error!(error = %e, "invalid configuration");
            std::io::Error::other(e)
        })?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), &settings)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
