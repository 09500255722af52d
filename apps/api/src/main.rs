//! LendHub API - REST server for the item sharing service

use axum_helpers::server::{close_postgres, create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod config;
mod openapi;
mod routes;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let db =
        database::postgres::connect_from_config_with_retry(config.database.clone(), None).await?;

    database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name).await?;

    let api_routes = routes::api_routes(&db);
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;
    let app = router
        .merge(health_router(config.app))
        .merge(routes::ready_router(db.clone()));

    info!("Starting LendHub API on port {}", config.server.port);

    let cleanup_db = db.clone();
    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        close_postgres(cleanup_db, "lendhub").await;
    })
    .await?;

    info!("LendHub API shutdown complete");
    Ok(())
}
