// SUNAT Lookup - Web Server
// REST API with Axum: GET /api/sunat, GET /api/health

use anyhow::{Context, Result};
use sunat_lookup::{server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    sunat_lookup::init_logging();

    tracing::info!(version = sunat_lookup::VERSION, "Starting SUNAT lookup server");

    let config = Config::from_env().context("Failed to load configuration")?;
    let service = config.build_service()?;

    let app = server::router(service);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "Server running - try /api/sunat?type=ruc&value=20131312955");

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
