//! Activity log recording
//!
//! Failures to write the audit trail are logged and swallowed; they never
//! fail the operation that produced them.

use crate::contract::{AuthContext, NewActivity};
use super::repository::ActivityRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct ActivityLog {
    repo: Arc<dyn ActivityRepository>,
}

impl ActivityLog {
    pub fn new(repo: Arc<dyn ActivityRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn ActivityRepository> {
        &self.repo
    }

    pub async fn record(
        &self,
        actor: &AuthContext,
        action: &str,
        target: impl Into<String>,
        details: Option<String>,
    ) {
        let activity = NewActivity {
            user_id: actor.user_id,
            username: actor.username.clone(),
            user_role: actor.role,
            action: action.to_string(),
            target: target.into(),
            details,
        };

        if let Err(e) = self.repo.record(&activity).await {
            tracing::warn!(
                error = ?e,
                action = %activity.action,
                user = %activity.username,
                "Failed to record activity"
            );
        }
    }
}
