use actix_cors::Cors;
use actix_web::http::{header, Method};

use crate::config::CorsOrigins;

/// Builds the CORS policy from `CORS_ORIGIN`.
///
/// A configured origin list is echoed back with credentials allowed. The
/// wildcard answers `*` and never allows credentials, so a browser will not
/// send cookies to an open policy.
pub fn cors(origins: &CorsOrigins) -> Cors {
    let cors = Cors::default()
        .allowed_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(600);

    match origins {
        CorsOrigins::Any => cors.allow_any_origin().send_wildcard(),
        CorsOrigins::List(list) => list
            .iter()
            .fold(cors.supports_credentials(), |cors, origin| cors.allowed_origin(origin)),
    }
}
