use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// A notification addressed to a single user.
///
/// Write-once except for the seen flag, which is toggled by the user-facing
/// surface outside this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub user_id: Uuid,
    pub seen: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(user_id: Uuid, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            body: body.into(),
            user_id,
            seen: false,
            created_at: Utc::now(),
        }
    }
}

/// Append-only notification sink. Every workflow side effect that reaches a
/// user goes through here.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, user_id: Uuid, title: &str, body: &str) -> Result<Uuid, StoreError>;
}
