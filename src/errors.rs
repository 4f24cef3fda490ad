use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::{Display, Error};

/// Every failure a handler can answer with. `Display` is the machine-readable
/// code sent back as `{"error": "<code>"}`.
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    #[display(fmt = "missing_identifier")]
    MissingIdentifier,

    #[display(fmt = "missing_code")]
    MissingCode,

    #[display(fmt = "missing_fields")]
    MissingFields,

    #[display(fmt = "missing_email")]
    MissingEmail,

    #[display(fmt = "invalid_email")]
    InvalidEmail,

    #[display(fmt = "invalid_private_code")]
    InvalidPrivateCode,

    #[display(fmt = "unknown_code")]
    UnknownCode,

    #[display(fmt = "unknown_invitee")]
    UnknownInvitee,

    #[display(fmt = "email_taken")]
    EmailTaken,

    #[display(fmt = "bad_request")]
    BadClientData,

    #[display(fmt = "not_found")]
    NotFound,

    #[display(fmt = "insert_failed")]
    InsertFailed,

    #[display(fmt = "token_check_failed")]
    TokenCheckFailed,

    #[display(fmt = "token_update_failed")]
    TokenUpdateFailed,

    #[display(fmt = "token_generation_failed")]
    TokenGenerationFailed,

    #[display(fmt = "server_error")]
    InternalError,
}

impl ApiError {
    pub fn body(&self) -> serde_json::Value {
        serde_json::json!({ "error": self.to_string() })
    }
}

impl error::ResponseError for ApiError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self.body())
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::MissingIdentifier
            | ApiError::MissingCode
            | ApiError::MissingFields
            | ApiError::MissingEmail
            | ApiError::InvalidEmail
            | ApiError::InvalidPrivateCode
            | ApiError::UnknownCode
            | ApiError::UnknownInvitee
            | ApiError::BadClientData => StatusCode::BAD_REQUEST,
            ApiError::EmailTaken => StatusCode::CONFLICT,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InsertFailed
            | ApiError::TokenCheckFailed
            | ApiError::TokenUpdateFailed
            | ApiError::TokenGenerationFailed
            | ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Field validators carry the wire code of the error they stand for. When
/// several fields fail, missing input outranks a malformed e-mail.
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let codes: Vec<String> = errors
            .field_errors()
            .values()
            .flat_map(|errs| errs.iter().map(|e| e.code.to_string()))
            .collect();
        [ApiError::MissingFields, ApiError::MissingEmail, ApiError::InvalidEmail]
            .into_iter()
            .find(|err| codes.contains(&err.to_string()))
            .unwrap_or(ApiError::BadClientData)
    }
}

/// Unique-index violations are expected outcomes for token claims and member
/// e-mails, so callers need to tell them apart from outages.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .map(|db_err| db_err.is_unique_violation())
        .unwrap_or(false)
}
