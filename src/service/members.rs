use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::AffiliateStore,
    dto::NewMemberDto,
    errors::{is_unique_violation, ApiError},
    models::Member,
};

use super::resolver::Resolver;

/// Creates members and ties them to whoever referred them.
#[derive(Clone)]
pub struct MemberCreator {
    store: Arc<dyn AffiliateStore>,
    resolver: Resolver,
}

impl MemberCreator {
    pub fn new(store: Arc<dyn AffiliateStore>) -> Self {
        Self { resolver: Resolver::new(store.clone()), store }
    }

    pub async fn create(&self, dto: NewMemberDto) -> Result<Member, ApiError> {
        let dto = dto.normalized();
        dto.validate()?;
        let NewMemberDto { email, display_name, code, invitee_id } = dto;
        let email = email.ok_or(ApiError::MissingEmail)?;

        // a named invite pins the inviter more precisely than a shared code
        let inviter_user_id = match (invitee_id, code.as_deref()) {
            (Some(invitee_id), _) => Some(self.inviter_of_invitee(invitee_id).await?),
            (None, Some(code)) => Some(self.inviter_of_code(code).await?),
            (None, None) => None,
        };

        let member = Member {
            id: Uuid::new_v4(),
            email,
            display_name,
            inviter_user_id,
            code,
            invitee_id,
            created_at: Utc::now(),
        };
        let member = self.store.insert_member(member).await.map_err(|err| {
            if is_unique_violation(&err) {
                ApiError::EmailTaken
            } else {
                error!("create member: insert failed: {:?}", err);
                ApiError::InternalError
            }
        })?;
        info!("member {} created (inviter: {:?})", member.id, member.inviter_user_id);
        Ok(member)
    }

    async fn inviter_of_invitee(&self, invitee_id: Uuid) -> Result<Uuid, ApiError> {
        let invitee = self.store.find_invitee(invitee_id).await.map_err(|err| {
            error!("create member: invitee lookup failed: {:?}", err);
            ApiError::InternalError
        })?;
        invitee
            .map(|i| i.inviter_user_id)
            .ok_or(ApiError::UnknownInvitee)
    }

    async fn inviter_of_code(&self, code: &str) -> Result<Uuid, ApiError> {
        let resolution = self.resolver.resolve(code).await?;
        resolution
            .attribution
            .map(|a| a.inviter_user_id)
            .ok_or(ApiError::UnknownCode)
    }
}
