use actix_web::{get, web, HttpResponse, Responder};
use chrono::Utc;

use crate::{dto::HealthResponse, service::AppState};

/// Liveness only; the store is not queried.
#[get("")]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
        .json(HealthResponse {
            status: "ok".to_string(),
            ts: Utc::now().timestamp_millis(),
            uptime: state.started_at.elapsed().as_secs_f64(),
            node: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(health);
}
