use crate::{models::ClickEvent, PGPool};

pub async fn create(click: ClickEvent, pool: &PGPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO click_events (id, code, landing_url, referrer, created_at)
        VALUES ($1, $2, $3, $4, $5)",
    )
    .bind(click.id)
    .bind(click.code)
    .bind(click.landing_url)
    .bind(click.referrer)
    .bind(click.created_at)
    .execute(pool)
    .await?;
    Ok(())
}
