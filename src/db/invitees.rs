use uuid::Uuid;

use crate::{models::{Invitee, NamedInvite}, PGPool};

pub async fn find_by_token(token: &str, pool: &PGPool) -> Result<Option<NamedInvite>, sqlx::Error> {
    sqlx::query_as::<_, NamedInvite>(
        "SELECT i.full_name, i.inviter_user_id, u.display_name AS inviter_display_name
        FROM invitees i
        LEFT JOIN users u ON u.id = i.inviter_user_id
        WHERE i.invite_token = $1
        LIMIT 1",
    )
    .bind(token)
    .fetch_optional(pool)
    .await
}

pub async fn get_by_id(id: Uuid, pool: &PGPool) -> Result<Option<Invitee>, sqlx::Error> {
    sqlx::query_as::<_, Invitee>(
        "SELECT id, inviter_user_id, private_code_id, full_name, email, invite_token
        FROM invitees WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn create(invitee: Invitee, pool: &PGPool) -> Result<Invitee, sqlx::Error> {
    sqlx::query_as::<_, Invitee>(
        "INSERT INTO invitees (id, inviter_user_id, private_code_id, full_name, email, invite_token)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, inviter_user_id, private_code_id, full_name, email, invite_token",
    )
    .bind(invitee.id)
    .bind(invitee.inviter_user_id)
    .bind(invitee.private_code_id)
    .bind(invitee.full_name)
    .bind(invitee.email)
    .bind(invitee.invite_token)
    .fetch_one(pool)
    .await
}

pub async fn token_exists(token: &str, pool: &PGPool) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM invitees WHERE invite_token = $1)")
        .bind(token)
        .fetch_one(pool)
        .await
}

/// Claims `token` for a row that has none yet. A token is never overwritten.
pub async fn set_token(id: Uuid, token: &str, pool: &PGPool) -> Result<bool, sqlx::Error> {
    let res = sqlx::query("UPDATE invitees SET invite_token = $1 WHERE id = $2 AND invite_token IS NULL")
        .bind(token)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(res.rows_affected() == 1)
}
