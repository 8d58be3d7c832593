use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use vendora_core::{AccountDirectory, Role, WorkflowError, WorkflowResult};

use crate::models::{RatingRepository, VendorRating};

/// Round to two decimal places, half away from zero (`f64::round`).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// The vendor average is maintained iteratively, folding each new rating into
/// the stored average rather than recomputing the arithmetic mean over all
/// ratings. The two diverge from the third rating on; the iterative form is
/// the contract.
fn running_average(old_avg: f64, old_count: u32, rating: f64) -> f64 {
    round2((old_avg + rating) / (f64::from(old_count) + 1.0))
}

/// Maintains the running average rating per vendor, at most one rating per
/// (customer, vendor) pair.
pub struct RatingAggregator {
    accounts: Arc<dyn AccountDirectory>,
    ratings: Arc<dyn RatingRepository>,
}

impl RatingAggregator {
    pub fn new(accounts: Arc<dyn AccountDirectory>, ratings: Arc<dyn RatingRepository>) -> Self {
        Self { accounts, ratings }
    }

    pub async fn rate_vendor(
        &self,
        customer_id: Uuid,
        vendor_id: Uuid,
        rating: f64,
        comment: Option<String>,
    ) -> WorkflowResult<VendorRating> {
        let customer = self.accounts.resolve(customer_id).await?.ok_or_else(|| {
            WorkflowError::NotFound(format!("customer {customer_id} does not exist"))
        })?;
        let mut vendor = self.accounts.resolve(vendor_id).await?.ok_or_else(|| {
            WorkflowError::NotFound(format!("vendor {vendor_id} does not exist"))
        })?;
        if vendor.role != Role::Vendor {
            return Err(WorkflowError::Validation(format!(
                "account {} is not a vendor",
                vendor.id
            )));
        }

        if self
            .ratings
            .find_by_pair(customer.id, vendor.id)
            .await?
            .is_some()
        {
            return Err(WorkflowError::Conflict(format!(
                "{} has already rated this vendor",
                customer.name
            )));
        }

        vendor.rating = running_average(vendor.rating, vendor.rating_count, rating);
        vendor.rating_count += 1;
        vendor.updated_at = Utc::now();
        self.accounts.update_account(vendor.id, &vendor).await?;

        let record = VendorRating::new(customer.id, vendor.id, rating, comment);
        self.ratings.insert_rating(&record).await?;
        tracing::info!(
            "Vendor {} rated by customer {}; average now {}",
            vendor.id,
            customer.id,
            vendor.rating
        );
        Ok(record)
    }

    /// Edit the comment of an existing rating. The stored average is not
    /// recomputed; only the text changes.
    pub async fn update_comment(
        &self,
        rating_id: Uuid,
        comment: &str,
    ) -> WorkflowResult<VendorRating> {
        let mut record = self.ratings.get_rating(rating_id).await?.ok_or_else(|| {
            WorkflowError::Validation("vendor rating id provided is incorrect".into())
        })?;
        record.comment = Some(comment.to_string());
        record.updated_at = Utc::now();
        self.ratings.replace_rating(record.id, &record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_truncates_to_cents() {
        assert_eq!(round2(3.14159), 3.14);
        assert_eq!(round2(2.0 + 1.0 / 3.0), 2.33);
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        // 0.125 is exact in binary, so 12.5 hits the tie case: half-away
        // gives 0.13 where banker's rounding would give 0.12.
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
    }

    #[test]
    fn running_average_matches_reference_example() {
        // Ratings 4 then 2 on a fresh vendor: 4.00, then 3.00.
        let first = running_average(0.0, 0, 4.0);
        assert_eq!(first, 4.0);
        let second = running_average(first, 1, 2.0);
        assert_eq!(second, 3.0);
    }

    #[test]
    fn running_average_is_not_the_arithmetic_mean() {
        // 4, 2, 6: iterative form folds the stored average, giving 3.0
        // where the plain mean would be 4.0.
        let a = running_average(0.0, 0, 4.0);
        let b = running_average(a, 1, 2.0);
        let c = running_average(b, 2, 6.0);
        assert_eq!(c, 3.0);
    }
}
