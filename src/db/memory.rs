//! In-memory `AffiliateStore` used by the service and handler tests.

use std::{collections::HashSet, fmt, sync::Arc};

use async_trait::async_trait;
use sqlx::error::{DatabaseError, ErrorKind};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::AffiliateStore;
use crate::models::{
    ClickEvent, CodeOwner, Invitee, Member, NamedInvite, PrivateCode, PublicCode, User,
};

/// What Postgres reports when a unique index rejects a write.
#[derive(Debug)]
struct UniqueViolation(&'static str);

impl fmt::Display for UniqueViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "duplicate key value violates unique constraint \"{}\"", self.0)
    }
}

impl std::error::Error for UniqueViolation {}

impl DatabaseError for UniqueViolation {
    fn message(&self) -> &str {
        "duplicate key value violates unique constraint"
    }

    fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
        self
    }

    fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self
    }

    fn constraint(&self) -> Option<&str> {
        Some(self.0)
    }

    fn kind(&self) -> ErrorKind {
        ErrorKind::UniqueViolation
    }
}

fn unique_violation(constraint: &'static str) -> sqlx::Error {
    sqlx::Error::Database(Box::new(UniqueViolation(constraint)))
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    private_codes: Vec<PrivateCode>,
    public_codes: Vec<PublicCode>,
    invitees: Vec<Invitee>,
    clicks: Vec<ClickEvent>,
    members: Vec<Member>,
}

#[derive(Default, Clone)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
    /// Operations that answer with a pool error instead of touching the tables.
    failing: Arc<RwLock<HashSet<&'static str>>>,
    /// Token the "database" assigns on insert, like a column default would.
    default_token: Arc<RwLock<Option<String>>>,
    /// Pretend every candidate token is already in use.
    tokens_exhausted: Arc<RwLock<bool>>,
    /// Number of upcoming token claims another writer wins between check and update.
    lost_claims: Arc<RwLock<usize>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails, as if Postgres were unreachable.
    pub async fn unreachable() -> Self {
        let store = Self::new();
        for op in [
            "find_named_invite",
            "find_private_code_owner",
            "find_public_code_owner",
            "find_private_code",
            "find_invitee",
            "insert_invitee",
            "invite_token_exists",
            "set_invite_token",
            "insert_click",
            "insert_member",
        ] {
            store.fail(op).await;
        }
        store
    }

    pub async fn fail(&self, op: &'static str) {
        self.failing.write().await.insert(op);
    }

    pub async fn assign_tokens_on_insert(&self, token: &str) {
        *self.default_token.write().await = Some(token.to_string());
    }

    pub async fn exhaust_tokens(&self) {
        *self.tokens_exhausted.write().await = true;
    }

    /// The next `n` token claims pass the existence check but then hit the
    /// unique index, as if a concurrent request took the same token.
    pub async fn lose_token_claims(&self, n: usize) {
        *self.lost_claims.write().await = n;
    }

    pub async fn add_user(&self, display_name: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.write().await.users.push(User { id, display_name: display_name.to_string() });
        id
    }

    pub async fn add_private_code(&self, code: &str, user_id: Uuid) -> Uuid {
        let id = Uuid::new_v4();
        self.tables
            .write()
            .await
            .private_codes
            .push(PrivateCode { id, code: code.to_string(), user_id });
        id
    }

    pub async fn add_public_code(&self, code: &str, user_id: Uuid, active: bool) -> Uuid {
        let id = Uuid::new_v4();
        self.tables
            .write()
            .await
            .public_codes
            .push(PublicCode { id, code: code.to_string(), user_id, active });
        id
    }

    pub async fn add_invitee(&self, inviter_user_id: Uuid, private_code_id: Uuid, full_name: &str, token: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.tables.write().await.invitees.push(Invitee {
            id,
            inviter_user_id,
            private_code_id,
            full_name: full_name.to_string(),
            email: None,
            invite_token: token.map(String::from),
        });
        id
    }

    pub async fn invitee(&self, id: Uuid) -> Option<Invitee> {
        self.tables.read().await.invitees.iter().find(|i| i.id == id).cloned()
    }

    pub async fn clicks(&self) -> Vec<ClickEvent> {
        self.tables.read().await.clicks.clone()
    }

    pub async fn members(&self) -> Vec<Member> {
        self.tables.read().await.members.clone()
    }

    async fn check(&self, op: &'static str) -> Result<(), sqlx::Error> {
        if self.failing.read().await.contains(op) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }

    fn owner(tables: &Tables, user_id: Uuid) -> CodeOwner {
        CodeOwner {
            user_id,
            display_name: tables
                .users
                .iter()
                .find(|u| u.id == user_id)
                .map(|u| u.display_name.clone()),
        }
    }
}

#[async_trait]
impl AffiliateStore for MemoryStore {
    async fn find_named_invite(&self, token: &str) -> Result<Option<NamedInvite>, sqlx::Error> {
        self.check("find_named_invite").await?;
        let tables = self.tables.read().await;
        Ok(tables
            .invitees
            .iter()
            .find(|i| i.invite_token.as_deref() == Some(token))
            .map(|i| NamedInvite {
                full_name: i.full_name.clone(),
                inviter_user_id: i.inviter_user_id,
                inviter_display_name: Self::owner(&tables, i.inviter_user_id).display_name,
            }))
    }

    async fn find_private_code_owner(&self, code: &str) -> Result<Option<CodeOwner>, sqlx::Error> {
        self.check("find_private_code_owner").await?;
        let tables = self.tables.read().await;
        Ok(tables
            .private_codes
            .iter()
            .find(|c| c.code == code)
            .map(|c| Self::owner(&tables, c.user_id)))
    }

    async fn find_public_code_owner(&self, code: &str) -> Result<Option<CodeOwner>, sqlx::Error> {
        self.check("find_public_code_owner").await?;
        let tables = self.tables.read().await;
        Ok(tables
            .public_codes
            .iter()
            .find(|c| c.active && c.code == code)
            .map(|c| Self::owner(&tables, c.user_id)))
    }

    async fn find_private_code(&self, id: Uuid) -> Result<Option<PrivateCode>, sqlx::Error> {
        self.check("find_private_code").await?;
        Ok(self.tables.read().await.private_codes.iter().find(|c| c.id == id).cloned())
    }

    async fn find_invitee(&self, id: Uuid) -> Result<Option<Invitee>, sqlx::Error> {
        self.check("find_invitee").await?;
        Ok(self.invitee(id).await)
    }

    async fn insert_invitee(&self, mut invitee: Invitee) -> Result<Invitee, sqlx::Error> {
        self.check("insert_invitee").await?;
        if invitee.invite_token.is_none() {
            invitee.invite_token = self.default_token.read().await.clone();
        }
        let mut tables = self.tables.write().await;
        if invitee.invite_token.is_some()
            && tables.invitees.iter().any(|i| i.invite_token == invitee.invite_token)
        {
            return Err(unique_violation("invitees_invite_token_key"));
        }
        tables.invitees.push(invitee.clone());
        Ok(invitee)
    }

    async fn invite_token_exists(&self, token: &str) -> Result<bool, sqlx::Error> {
        self.check("invite_token_exists").await?;
        if *self.tokens_exhausted.read().await {
            return Ok(true);
        }
        Ok(self
            .tables
            .read()
            .await
            .invitees
            .iter()
            .any(|i| i.invite_token.as_deref() == Some(token)))
    }

    async fn set_invite_token(&self, invitee_id: Uuid, token: &str) -> Result<bool, sqlx::Error> {
        self.check("set_invite_token").await?;
        {
            let mut lost = self.lost_claims.write().await;
            if *lost > 0 {
                *lost -= 1;
                return Err(unique_violation("invitees_invite_token_key"));
            }
        }
        let mut tables = self.tables.write().await;
        // the `invite_token IS NULL` guard filters rows before the unique index is checked
        let claimable = tables
            .invitees
            .iter()
            .any(|i| i.id == invitee_id && i.invite_token.is_none());
        if !claimable {
            return Ok(false);
        }
        if tables.invitees.iter().any(|i| i.invite_token.as_deref() == Some(token)) {
            return Err(unique_violation("invitees_invite_token_key"));
        }
        if let Some(invitee) = tables.invitees.iter_mut().find(|i| i.id == invitee_id) {
            invitee.invite_token = Some(token.to_string());
        }
        Ok(true)
    }

    async fn insert_click(&self, click: ClickEvent) -> Result<(), sqlx::Error> {
        self.check("insert_click").await?;
        self.tables.write().await.clicks.push(click);
        Ok(())
    }

    async fn insert_member(&self, member: Member) -> Result<Member, sqlx::Error> {
        self.check("insert_member").await?;
        let mut tables = self.tables.write().await;
        if tables.members.iter().any(|m| m.email == member.email) {
            return Err(unique_violation("members_email_key"));
        }
        tables.members.push(member.clone());
        Ok(member)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::is_unique_violation;
    use chrono::Utc;

    fn member(email: &str) -> Member {
        Member {
            id: Uuid::new_v4(),
            email: email.to_string(),
            display_name: None,
            inviter_user_id: None,
            code: None,
            invitee_id: None,
            created_at: Utc::now(),
        }
    }

    #[actix_rt::test]
    async fn duplicate_email_is_a_unique_violation() {
        let store = MemoryStore::new();
        store.insert_member(member("jane@example.com")).await.unwrap();

        let err = store.insert_member(member("jane@example.com")).await.unwrap_err();
        assert!(is_unique_violation(&err));
        assert_eq!(store.members().await.len(), 1);
    }

    #[actix_rt::test]
    async fn token_held_by_another_invitee_cannot_be_claimed() {
        let store = MemoryStore::new();
        let user = store.add_user("Mike Helm").await;
        let code = store.add_private_code("MHELM2", user).await;
        store.add_invitee(user, code, "Jane Doe", Some("ABCD1234")).await;
        let other = store.add_invitee(user, code, "John Roe", None).await;

        let err = store.set_invite_token(other, "ABCD1234").await.unwrap_err();
        assert!(is_unique_violation(&err));
        assert_eq!(store.invitee(other).await.unwrap().invite_token, None);
    }
}
