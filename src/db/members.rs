use crate::{models::Member, PGPool};

pub async fn create(member: Member, pool: &PGPool) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "INSERT INTO members (id, email, display_name, inviter_user_id, code, invitee_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, email, display_name, inviter_user_id, code, invitee_id, created_at",
    )
    .bind(member.id)
    .bind(member.email)
    .bind(member.display_name)
    .bind(member.inviter_user_id)
    .bind(member.code)
    .bind(member.invitee_id)
    .bind(member.created_at)
    .fetch_one(pool)
    .await
}
