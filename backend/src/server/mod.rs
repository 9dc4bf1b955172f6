//! Server construction and middleware wiring.

mod state_builders;

pub use state_builders::{MemoryRepositories, build_http_state};

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tokio::runtime::Handle;
use tracing::info;

use crate::Trace;
use crate::config::ServerSettings;
use crate::inbound::http::configure;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;

/// Assemble the application: trace middleware, probes and the versioned
/// API scope.
pub fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure))
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server over fresh in-memory repositories.
///
/// Readiness is flagged once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when no tokio runtime is running, an
/// outbound client cannot be built, or binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    settings: &ServerSettings,
) -> std::io::Result<Server> {
    let runtime = Handle::try_current().map_err(std::io::Error::other)?;
    let http_state = build_http_state(settings, &MemoryRepositories::default(), runtime)
        .map_err(std::io::Error::other)?;
    let http_state = web::Data::new(http_state);

    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(settings.bind_addr)?
    .run();

    health_state.mark_ready();
    info!(bind_addr = %settings.bind_addr, "listening");
    Ok(server)
}
