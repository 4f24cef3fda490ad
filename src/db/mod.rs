pub mod clicks;
pub mod codes;
pub mod invitees;
pub mod members;
#[cfg(test)]
pub mod memory;

use async_trait::async_trait;
use log::info;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use crate::{
    config::Config,
    models::{ClickEvent, CodeOwner, Invitee, Member, NamedInvite, PrivateCode},
    PGPool,
};

pub async fn init_db_pool(config: &Config) -> Result<PGPool, sqlx::Error> {
    let pool: PGPool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(config.db_acquire_timeout)
        .connect(&config.database_url)
        .await?;
    info!("connected to postgresql (max {} connections)", config.db_max_connections);
    if config.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        info!("migrations applied");
    }
    Ok(pool)
}

/// Everything the referral services read from or write to the relational
/// store. Lookups return `Ok(None)` for a missing row and `Err` only when the
/// store itself failed.
#[async_trait]
pub trait AffiliateStore: Send + Sync {
    async fn find_named_invite(&self, token: &str) -> Result<Option<NamedInvite>, sqlx::Error>;

    async fn find_private_code_owner(&self, code: &str) -> Result<Option<CodeOwner>, sqlx::Error>;

    /// Only rows with `active = true` qualify.
    async fn find_public_code_owner(&self, code: &str) -> Result<Option<CodeOwner>, sqlx::Error>;

    async fn find_private_code(&self, id: Uuid) -> Result<Option<PrivateCode>, sqlx::Error>;

    async fn find_invitee(&self, id: Uuid) -> Result<Option<Invitee>, sqlx::Error>;

    async fn insert_invitee(&self, invitee: Invitee) -> Result<Invitee, sqlx::Error>;

    async fn invite_token_exists(&self, token: &str) -> Result<bool, sqlx::Error>;

    /// Returns `false` when the row already carries a token.
    async fn set_invite_token(&self, invitee_id: Uuid, token: &str) -> Result<bool, sqlx::Error>;

    async fn insert_click(&self, click: ClickEvent) -> Result<(), sqlx::Error>;

    async fn insert_member(&self, member: Member) -> Result<Member, sqlx::Error>;
}

/// Postgres-backed store; cloning shares the pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PGPool,
}

impl PgStore {
    pub fn new(pool: PGPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AffiliateStore for PgStore {
    async fn find_named_invite(&self, token: &str) -> Result<Option<NamedInvite>, sqlx::Error> {
        invitees::find_by_token(token, &self.pool).await
    }

    async fn find_private_code_owner(&self, code: &str) -> Result<Option<CodeOwner>, sqlx::Error> {
        codes::find_private_owner(code, &self.pool).await
    }

    async fn find_public_code_owner(&self, code: &str) -> Result<Option<CodeOwner>, sqlx::Error> {
        codes::find_active_public_owner(code, &self.pool).await
    }

    async fn find_private_code(&self, id: Uuid) -> Result<Option<PrivateCode>, sqlx::Error> {
        codes::get_private_by_id(id, &self.pool).await
    }

    async fn find_invitee(&self, id: Uuid) -> Result<Option<Invitee>, sqlx::Error> {
        invitees::get_by_id(id, &self.pool).await
    }

    async fn insert_invitee(&self, invitee: Invitee) -> Result<Invitee, sqlx::Error> {
        invitees::create(invitee, &self.pool).await
    }

    async fn invite_token_exists(&self, token: &str) -> Result<bool, sqlx::Error> {
        invitees::token_exists(token, &self.pool).await
    }

    async fn set_invite_token(&self, invitee_id: Uuid, token: &str) -> Result<bool, sqlx::Error> {
        invitees::set_token(invitee_id, token, &self.pool).await
    }

    async fn insert_click(&self, click: ClickEvent) -> Result<(), sqlx::Error> {
        clicks::create(click, &self.pool).await
    }

    async fn insert_member(&self, member: Member) -> Result<Member, sqlx::Error> {
        members::create(member, &self.pool).await
    }
}
