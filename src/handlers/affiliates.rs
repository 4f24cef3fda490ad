use actix_web::{error::InternalError, get, post, web, HttpResponse, Responder, ResponseError};
use log::{info, warn};

use crate::{
    dto::{non_blank, Resolution, ResolveQuery, TrackClickDto, TrackOutcome},
    errors::ApiError,
    service::AppState,
};

// GET /api/affiliates/resolve?token=XYZ or ?code=ABC123
#[get("/resolve")]
pub async fn resolve(query: web::Query<ResolveQuery>, state: web::Data<AppState>) -> impl Responder {
    let identifier = query.identifier().unwrap_or_default();
    match state.resolver.resolve(identifier).await {
        Ok(resolution) => {
            info!("RESOLVE '{}': valid={}", identifier, resolution.valid);
            HttpResponse::Ok().json(resolution)
        }
        Err(err) => HttpResponse::build(err.status_code()).json(Resolution::failed(err)),
    }
}

// POST /api/affiliates/track-click
#[post("/track-click")]
pub async fn track_click(dto: web::Json<TrackClickDto>, state: web::Data<AppState>) -> impl Responder {
    let TrackClickDto { code, landing_url, referrer } = dto.into_inner();
    let code = match non_blank(code) {
        Some(code) => code,
        None => {
            return HttpResponse::BadRequest().json(TrackOutcome {
                ok: false,
                error: Some(ApiError::MissingCode.to_string()),
            })
        }
    };
    let outcome = state
        .tracker
        .track(&code, non_blank(landing_url), non_blank(referrer))
        .await;
    HttpResponse::Ok().json(outcome)
}

pub fn config(cfg: &mut web::ServiceConfig) {
    // resolve answers in its own `{valid, error}` shape, even for a bad query string
    cfg.app_data(web::QueryConfig::default().error_handler(|err, req| {
        warn!("rejected query on {}: {}", req.path(), err);
        let body = Resolution::failed(ApiError::BadClientData);
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    }))
    .service(resolve)
    .service(track_click);
}
