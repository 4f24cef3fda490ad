pub mod affiliates;
pub mod health;
pub mod invites;
pub mod members;

use actix_web::{web, HttpResponse};
use log::warn;

use crate::errors::ApiError;

/// Mounts every `/api` route plus the JSON body/query error handlers.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, req| {
        warn!("rejected body on {}: {}", req.path(), err);
        ApiError::BadClientData.into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, req| {
        warn!("rejected query on {}: {}", req.path(), err);
        ApiError::BadClientData.into()
    }))
    .service(
        web::scope("/api")
            .service(web::scope("/health").configure(health::config))
            .service(web::scope("/affiliates").configure(affiliates::config))
            .service(web::scope("/invites").configure(invites::config))
            .service(web::scope("/members").configure(members::config)),
    );
}

pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ApiError::NotFound.body())
}

#[cfg(test)]
pub fn test_app(
    store: crate::db::memory::MemoryStore,
) -> actix_web::App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let state = crate::service::AppState::new(std::sync::Arc::new(store));
    actix_web::App::new()
        .app_data(web::Data::new(state))
        .configure(config)
        .default_service(web::to(not_found))
}
