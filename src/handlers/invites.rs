use actix_web::{post, web, HttpResponse, Responder};
use log::info;

use crate::{dto::NewNamedInviteDto, service::AppState};

// POST /api/invites/named
#[post("/named")]
pub async fn create_named(dto: web::Json<NewNamedInviteDto>, state: web::Data<AppState>) -> impl Responder {
    match state.invites.create_named(dto.into_inner()).await {
        Ok(invite) => {
            info!("RESPONSE /INVITES/NAMED: {}", invite.invitee_id);
            HttpResponse::Ok().json(invite)
        }
        Err(err) => HttpResponse::from_error(err),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create_named);
}
