use uuid::Uuid;

use crate::{models::{CodeOwner, PrivateCode}, PGPool};

pub async fn find_private_owner(code: &str, pool: &PGPool) -> Result<Option<CodeOwner>, sqlx::Error> {
    sqlx::query_as::<_, CodeOwner>(
        "SELECT c.user_id, u.display_name
        FROM private_codes c
        LEFT JOIN users u ON u.id = c.user_id
        WHERE c.code = $1
        LIMIT 1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

pub async fn find_active_public_owner(code: &str, pool: &PGPool) -> Result<Option<CodeOwner>, sqlx::Error> {
    sqlx::query_as::<_, CodeOwner>(
        "SELECT c.user_id, u.display_name
        FROM public_codes c
        LEFT JOIN users u ON u.id = c.user_id
        WHERE c.code = $1 AND c.active
        LIMIT 1",
    )
    .bind(code)
    .fetch_optional(pool)
    .await
}

pub async fn get_private_by_id(id: Uuid, pool: &PGPool) -> Result<Option<PrivateCode>, sqlx::Error> {
    sqlx::query_as::<_, PrivateCode>("SELECT id, code, user_id FROM private_codes WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
