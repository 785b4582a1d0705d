use actix_web::HttpServer;
use departament_api::repository::{PgUnitOfWork, UnitOfWork};
use departament_api::services::{DepartamentService, LoginService};
use departament_api::{create_app, CacheConfig, JwtConfig, ServerConfig};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let server_config = ServerConfig::from_env();
    let jwt_config = JwtConfig::from_env();
    let cache_config = CacheConfig::from_env();

    let pool = PgPoolOptions::new()
        .max_connections(server_config.max_connections)
        .connect(&server_config.database_url)
        .await
        .map_err(std::io::Error::other)?;

    sqlx::migrate!()
        .run(&pool)
        .await
        .map_err(std::io::Error::other)?;

    // Built once so the list cache is shared by every worker.
    let uow: Arc<dyn UnitOfWork> = Arc::new(PgUnitOfWork::new(pool));
    let departament_service = DepartamentService::new(uow, &cache_config);
    let login_service = LoginService::new(jwt_config.clone());

    info!(address = %server_config.bind_address, "server starting");

    HttpServer::new(move || {
        create_app(
            departament_service.clone(),
            login_service.clone(),
            jwt_config.clone(),
        )
    })
    .bind(&server_config.bind_address)?
    .run()
    .await
}
