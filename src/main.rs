use std::sync::Arc;

use actix_web::{middleware::DefaultHeaders, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};
use ripplefind_api::{
    config::Config,
    db::{init_db_pool, AffiliateStore, PgStore},
    handlers,
    service::{cors::cors, log::{init_logger, LoggerMiddleware}, AppState},
    PGPool,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    init_logger();

    let config = Config::from_env().map_err(|err| {
        error!("invalid configuration: {}", err);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, err)
    })?;
    info!("starting with {:?}", config);

    let pool: PGPool = init_db_pool(&config).await.map_err(|err| {
        error!("database unavailable: {}", err);
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, err)
    })?;
    let store: Arc<dyn AffiliateStore> = Arc::new(PgStore::new(pool.clone()));
    let state = web::Data::new(AppState::new(store));

    let cors_origins = config.cors_origins.clone();
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(
                DefaultHeaders::new()
                    .add(("X-Content-Type-Options", "nosniff"))
                    .add(("X-Frame-Options", "SAMEORIGIN"))
                    .add(("Referrer-Policy", "no-referrer"))
                    .add(("Cross-Origin-Resource-Policy", "same-origin")),
            )
            .wrap(cors(&cors_origins))
            .wrap(LoggerMiddleware)
            .configure(handlers::config)
            .default_service(web::to(handlers::not_found))
    })
    .bind((config.host.as_str(), config.port))?;

    info!("API on {}:{}", config.host, config.port);
    info!("health check: http://localhost:{}/api/health", config.port);
    server.run().await?;

    info!("shutting down, closing database pool");
    pool.close().await;
    Ok(())
}
