pub mod aggregator;
pub mod models;

pub use aggregator::RatingAggregator;
pub use models::{RatingRepository, VendorRating};
