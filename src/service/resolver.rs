use std::sync::Arc;

use log::{debug, error};

use crate::{
    db::AffiliateStore,
    dto::{Attribution, InviteKind, Resolution},
    errors::ApiError,
    models::CodeOwner,
};

/// Turns a named-invite token or an affiliate code into attribution data.
///
/// Lookups run in a fixed order and the first hit wins:
/// named invite token, then private code, then active public code.
/// Every lookup is an exact match on the stored value.
/// A store failure at any stage aborts the whole chain; it is never
/// reported as "not found".
#[derive(Clone)]
pub struct Resolver {
    store: Arc<dyn AffiliateStore>,
}

impl Resolver {
    pub fn new(store: Arc<dyn AffiliateStore>) -> Self {
        Self { store }
    }

    pub async fn resolve(&self, identifier: &str) -> Result<Resolution, ApiError> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(ApiError::MissingIdentifier);
        }

        let named = self.store.find_named_invite(identifier).await.map_err(|err| {
            error!("resolve: named invite lookup failed: {:?}", err);
            ApiError::InternalError
        })?;
        if let Some(invite) = named {
            debug!("resolve: '{}' is a named invite", identifier);
            return Ok(Resolution::found(Attribution {
                kind: InviteKind::Named,
                inviter_user_id: invite.inviter_user_id,
                inviter_display_name: invite.inviter_display_name,
                invitee_name: Some(invite.full_name),
            }));
        }

        let private = self.store.find_private_code_owner(identifier).await.map_err(|err| {
            error!("resolve: private code lookup failed: {:?}", err);
            ApiError::InternalError
        })?;
        if let Some(owner) = private {
            debug!("resolve: '{}' is a private code", identifier);
            return Ok(code_resolution(InviteKind::Private, owner));
        }

        let public = self.store.find_public_code_owner(identifier).await.map_err(|err| {
            error!("resolve: public code lookup failed: {:?}", err);
            ApiError::InternalError
        })?;
        if let Some(owner) = public {
            debug!("resolve: '{}' is a public code", identifier);
            return Ok(code_resolution(InviteKind::Public, owner));
        }

        debug!("resolve: '{}' matched nothing", identifier);
        Ok(Resolution::not_found())
    }
}

fn code_resolution(kind: InviteKind, owner: CodeOwner) -> Resolution {
    Resolution::found(Attribution {
        kind,
        inviter_user_id: owner.user_id,
        inviter_display_name: owner.display_name,
        invitee_name: None,
    })
}
