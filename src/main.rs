mod api_models;
mod app;
mod handler;
mod pms;
mod routes;
mod services;
mod utils;

use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    utils::logging::init_logging();

    let cfg = utils::config::ServerConfig::from_env()?;
    let addr: SocketAddr = cfg.addr;
    let app = app::build_app()?;

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Axum listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
