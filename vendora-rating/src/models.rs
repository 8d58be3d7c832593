use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vendora_core::error::StoreError;

/// A customer's rating of a vendor. At most one exists per
/// (customer, vendor) pair; only the comment may be edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorRating {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub vendor_id: Uuid,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VendorRating {
    pub fn new(customer_id: Uuid, vendor_id: Uuid, rating: f64, comment: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            vendor_id,
            rating,
            comment,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Repository trait for vendor rating records.
#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn get_rating(&self, id: Uuid) -> Result<Option<VendorRating>, StoreError>;

    /// The at-most-one-per-pair invariant is checked through this lookup.
    async fn find_by_pair(
        &self,
        customer_id: Uuid,
        vendor_id: Uuid,
    ) -> Result<Option<VendorRating>, StoreError>;

    async fn insert_rating(&self, rating: &VendorRating) -> Result<(), StoreError>;

    async fn replace_rating(&self, id: Uuid, rating: &VendorRating) -> Result<(), StoreError>;

    async fn list_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<VendorRating>, StoreError>;
}
