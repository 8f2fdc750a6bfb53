use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use stucode_api::state::AppStateInner;
use stucode_server::app;
use stucode_server::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "stucode_server=debug,stucode_api=debug,stucode_db=debug,tower_http=debug".into()
            }),
        )
        .init();

    let config = Config::load()?;

    let db = stucode_db::Database::open(&PathBuf::from(&config.db_path))?;

    let state = Arc::new(AppStateInner {
        db,
        jwt_secret: config.jwt_secret.clone(),
        hash_cost: config.hash_cost,
        token_ttl_days: config.token_ttl_days,
    });

    let router = app(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    info!("StuCode server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
