use chrono::{DateTime, Utc};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
pub struct User {
    pub id: Uuid,
    pub display_name: String,
}

#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
pub struct PrivateCode {
    pub id: Uuid,
    pub code: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
pub struct PublicCode {
    pub id: Uuid,
    pub code: String,
    pub user_id: Uuid,
    pub active: bool,
}

#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
pub struct Invitee {
    pub id: Uuid,
    pub inviter_user_id: Uuid,
    pub private_code_id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub invite_token: Option<String>,
}

/// Invitee row joined with the display name of whoever sent the invite.
/// `inviter_display_name` is `None` when the owning user row is gone.
#[derive(Debug, Clone, FromRow)]
pub struct NamedInvite {
    pub full_name: String,
    pub inviter_user_id: Uuid,
    pub inviter_display_name: Option<String>,
}

/// Owner of a private or public code.
#[derive(Debug, Clone, FromRow)]
pub struct CodeOwner {
    pub user_id: Uuid,
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
pub struct ClickEvent {
    pub id: Uuid,
    pub code: String,
    pub landing_url: Option<String>,
    pub referrer: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, FromRow, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
    pub inviter_user_id: Option<Uuid>,
    pub code: Option<String>,
    pub invitee_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}
