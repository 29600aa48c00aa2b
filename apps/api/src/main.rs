use axum::Router;
use axum_helpers::server::{build_router, serve};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tracing::info;

mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    let db = database::postgres::connect_from_config_with_retry(config.database.clone(), None)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    database::postgres::run_migrations::<migration::Migrator>(&db)
        .await
        .map_err(|e| eyre::eyre!("Migrations failed: {}", e))?;

    let assets = asset_storage::LocalAssetStore::new(
        config.uploads.dir.clone(),
        config.uploads.public_prefix.clone(),
    );
    assets.ensure_root().await?;

    let items_service =
        domain_items::ItemService::new(domain_items::PgItemRepository::new(db.clone()));
    let users_service = domain_users::UserService::new(domain_users::PgUserRepository::new(db));

    let apis = Router::new()
        .nest(
            "/items",
            domain_items::handlers::router(items_service, Arc::new(assets)),
        )
        .merge(domain_users::handlers::router(users_service));

    let app = build_router::<openapi::ApiDoc>(apis).nest_service(
        config.uploads.public_prefix.as_str(),
        ServeDir::new(&config.uploads.dir),
    );

    info!(address = %config.server.address(), "Starting campusfind-api");
    serve(app, &config.server).await?;

    Ok(())
}
