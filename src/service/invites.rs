use std::sync::Arc;

use log::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    db::AffiliateStore,
    dto::{NamedInviteResponse, NewNamedInviteDto},
    errors::{is_unique_violation, ApiError},
    models::Invitee,
};

use super::token::{generate_invite_token, DEFAULT_TOKEN_LEN};

pub const MAX_TOKEN_ATTEMPTS: usize = 10;

/// Mints named invites: one row per recipient, addressed by a unique token.
#[derive(Clone)]
pub struct InviteCreator {
    store: Arc<dyn AffiliateStore>,
}

impl InviteCreator {
    pub fn new(store: Arc<dyn AffiliateStore>) -> Self {
        Self { store }
    }

    pub async fn create_named(&self, dto: NewNamedInviteDto) -> Result<NamedInviteResponse, ApiError> {
        let dto = dto.normalized();
        dto.validate()?;
        let NewNamedInviteDto { inviter_user_id, private_code_id, full_name, email } = dto;
        let (inviter_user_id, private_code_id, full_name) =
            match (inviter_user_id, private_code_id, full_name) {
                (Some(inviter), Some(code), Some(name)) => (inviter, code, name),
                _ => return Err(ApiError::MissingFields),
            };

        let private_code = self.store.find_private_code(private_code_id).await.map_err(|err| {
            error!("named invite: private code lookup failed: {:?}", err);
            ApiError::InternalError
        })?;
        match private_code {
            Some(code) if code.user_id == inviter_user_id => {}
            _ => return Err(ApiError::InvalidPrivateCode),
        }

        let invitee = self
            .store
            .insert_invitee(Invitee {
                id: Uuid::new_v4(),
                inviter_user_id,
                private_code_id,
                full_name,
                email,
                invite_token: None,
            })
            .await
            .map_err(|err| {
                error!("named invite: insert failed: {:?}", err);
                ApiError::InsertFailed
            })?;

        let token = match invitee.invite_token {
            Some(token) => token,
            None => self.claim_token(invitee.id).await?,
        };
        info!("named invite {} created for user {}", invitee.id, inviter_user_id);

        Ok(NamedInviteResponse {
            invitee_id: invitee.id,
            link: format!("/{}", token),
            invite_token: token,
        })
    }

    /// Optimistic claim: check a candidate is free, then write it onto the row.
    /// A candidate that loses a race on the unique index counts as a collision.
    async fn claim_token(&self, invitee_id: Uuid) -> Result<String, ApiError> {
        for attempt in 1..=MAX_TOKEN_ATTEMPTS {
            let candidate = generate_invite_token(DEFAULT_TOKEN_LEN);
            let taken = self.store.invite_token_exists(&candidate).await.map_err(|err| {
                error!("named invite: token check failed: {:?}", err);
                ApiError::TokenCheckFailed
            })?;
            if taken {
                warn!("invite token collision on attempt {}", attempt);
                continue;
            }
            match self.store.set_invite_token(invitee_id, &candidate).await {
                Ok(true) => return Ok(candidate),
                Ok(false) => {
                    error!("named invite: invitee {} vanished or already has a token", invitee_id);
                    return Err(ApiError::TokenUpdateFailed);
                }
                Err(err) if is_unique_violation(&err) => {
                    warn!("invite token claimed concurrently on attempt {}", attempt);
                }
                Err(err) => {
                    error!("named invite: token update failed: {:?}", err);
                    return Err(ApiError::TokenUpdateFailed);
                }
            }
        }
        error!("named invite: no free token after {} attempts", MAX_TOKEN_ATTEMPTS);
        Err(ApiError::TokenGenerationFailed)
    }
}
