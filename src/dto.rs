use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ResolveQuery {
    pub code: Option<String>,
    pub token: Option<String>,
}

impl ResolveQuery {
    /// `token` wins over `code` when both are present. Blank values count as absent.
    pub fn identifier(&self) -> Option<&str> {
        let token = self.token.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let code = self.code.as_deref().map(str::trim).filter(|s| !s.is_empty());
        token.or(code)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InviteKind {
    Named,
    Private,
    Public,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Attribution {
    #[serde(rename = "type")]
    pub kind: InviteKind,
    pub inviter_user_id: Uuid,
    pub inviter_display_name: Option<String>,
    pub invitee_name: Option<String>,
}

/// Body of every `/api/affiliates/resolve` response.
///
/// Not-found serialises as `{"valid": false}`; faults add an `error` code.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub valid: bool,
    #[serde(flatten)]
    pub attribution: Option<Attribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Resolution {
    pub fn found(attribution: Attribution) -> Self {
        Self { valid: true, attribution: Some(attribution), error: None }
    }

    pub fn not_found() -> Self {
        Self { valid: false, attribution: None, error: None }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self { valid: false, attribution: None, error: Some(error.to_string()) }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackClickDto {
    pub code: Option<String>,
    pub landing_url: Option<String>,
    pub referrer: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TrackOutcome {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TrackOutcome {
    pub fn recorded() -> Self {
        Self { ok: true, error: None }
    }

    pub fn dropped() -> Self {
        Self { ok: false, error: None }
    }
}

/// Validation error codes are the wire codes of the matching `ApiError`.
#[derive(Debug, Deserialize, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewNamedInviteDto {
    #[validate(required(code = "missing_fields"))]
    pub inviter_user_id: Option<Uuid>,
    #[validate(required(code = "missing_fields"))]
    pub private_code_id: Option<Uuid>,
    #[validate(required(code = "missing_fields"), length(min = 1, code = "missing_fields"))]
    pub full_name: Option<String>,
    #[validate(email(code = "invalid_email"))]
    pub email: Option<String>,
}

impl NewNamedInviteDto {
    /// Trims text fields and drops blank ones before validation.
    pub fn normalized(self) -> Self {
        Self {
            full_name: self.full_name.map(|v| v.trim().to_string()),
            email: non_blank(self.email),
            ..self
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NamedInviteResponse {
    pub invitee_id: Uuid,
    pub invite_token: String,
    pub link: String,
}

#[derive(Debug, Deserialize, Clone, Default, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewMemberDto {
    #[validate(required(code = "missing_email"), email(code = "invalid_email"))]
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub code: Option<String>,
    pub invitee_id: Option<Uuid>,
}

impl NewMemberDto {
    /// Emails are matched case-insensitively, so they are stored lower-cased.
    pub fn normalized(self) -> Self {
        Self {
            email: non_blank(self.email).map(|e| e.to_lowercase()),
            display_name: non_blank(self.display_name),
            code: non_blank(self.code),
            ..self
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub ts: i64,
    pub uptime: f64,
    pub node: String,
}

/// Trims and drops blank strings from optional request fields.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
