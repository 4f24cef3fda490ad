use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::{db::AffiliateStore, dto::TrackOutcome, models::ClickEvent};

use super::codes::classify;

/// Records landing-page clicks for attribution. Best effort: a failed insert
/// is logged and reported as `ok: false`, never as an error.
#[derive(Clone)]
pub struct ClickTracker {
    store: Arc<dyn AffiliateStore>,
}

impl ClickTracker {
    pub fn new(store: Arc<dyn AffiliateStore>) -> Self {
        Self { store }
    }

    pub async fn track(&self, code: &str, landing_url: Option<String>, referrer: Option<String>) -> TrackOutcome {
        let click = ClickEvent {
            id: Uuid::new_v4(),
            code: code.to_string(),
            landing_url,
            referrer,
            created_at: Utc::now(),
        };
        match self.store.insert_click(click).await {
            Ok(()) => {
                info!("click recorded for {:?} code '{}'", classify(code), code);
                TrackOutcome::recorded()
            }
            Err(err) => {
                warn!("click for code '{}' dropped: {:?}", code, err);
                TrackOutcome::dropped()
            }
        }
    }
}
