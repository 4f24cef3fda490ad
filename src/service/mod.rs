pub mod codes;
pub mod cors;
pub mod invites;
pub mod log;
pub mod members;
pub mod resolver;
pub mod token;
pub mod tracker;

use std::{sync::Arc, time::Instant};

use crate::db::AffiliateStore;

use self::{invites::InviteCreator, members::MemberCreator, resolver::Resolver, tracker::ClickTracker};

/// Shared per-process state handed to every handler through `web::Data`.
pub struct AppState {
    pub resolver: Resolver,
    pub tracker: ClickTracker,
    pub invites: InviteCreator,
    pub members: MemberCreator,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Arc<dyn AffiliateStore>) -> Self {
        Self {
            resolver: Resolver::new(store.clone()),
            tracker: ClickTracker::new(store.clone()),
            invites: InviteCreator::new(store.clone()),
            members: MemberCreator::new(store),
            started_at: Instant::now(),
        }
    }
}
