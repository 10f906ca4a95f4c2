use std::net::SocketAddr;
use std::sync::Arc;

use offerwall_api::{app, AppState};
use offerwall_store::association_repo::PostgresAssociationStore;
use offerwall_store::offer_repo::PostgresOfferStore;
use offerwall_store::wall_repo::PostgresWallStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "offerwall_api=debug,tower_http=debug,axum::rejection=trace".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = offerwall_store::app_config::Config::load()?;
    tracing::info!("Starting OfferWall API on port {}", config.server.port);

    let db = offerwall_store::DbClient::new(&config.database.connection_string()).await?;
    db.migrate().await?;

    let state = AppState {
        walls: Arc::new(PostgresWallStore {
            pool: db.pool.clone(),
        }),
        offers: Arc::new(PostgresOfferStore {
            pool: db.pool.clone(),
        }),
        associations: Arc::new(PostgresAssociationStore {
            pool: db.pool.clone(),
        }),
    };

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
