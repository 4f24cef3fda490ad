use actix_web::{post, web, HttpResponse, Responder};
use log::info;

use crate::{dto::NewMemberDto, service::AppState};

// POST /api/members
#[post("")]
pub async fn create(dto: web::Json<NewMemberDto>, state: web::Data<AppState>) -> impl Responder {
    match state.members.create(dto.into_inner()).await {
        Ok(member) => {
            info!("RESPONSE /MEMBERS: {}", member.id);
            HttpResponse::Created().json(member)
        }
        Err(err) => HttpResponse::from_error(err),
    }
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(create);
}
