use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// Account roles recognised by the back office.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Vendor,
    Support,
    Admin,
}

/// A user account. Vendor accounts additionally carry the running average
/// rating maintained by the rating aggregator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub active: bool,
    pub approved: bool,
    pub rating: f64,
    pub rating_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            name: name.into(),
            role,
            active: true,
            approved: true,
            rating: 0.0,
            rating_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Directory of user accounts.
///
/// Injected into every workflow that resolves a party or fans notifications
/// out to a role (admins on low stock, support staff on cancel requests).
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn resolve(&self, id: Uuid) -> Result<Option<Account>, StoreError>;

    async fn list_by_role(&self, role: Role) -> Result<Vec<Account>, StoreError>;

    async fn update_account(&self, id: Uuid, account: &Account) -> Result<(), StoreError>;
}
