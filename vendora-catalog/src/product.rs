use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vendora_core::error::StoreError;

/// Default stock level below which restock alerts are raised.
pub const LOW_STOCK_THRESHOLD: i32 = 10;

/// A catalog product with a live stock counter.
///
/// Stock is only ever decremented through [`Product::take_stock`], which
/// refuses to go below zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in minor currency units.
    pub price: i64,
    pub stock: i32,
    pub vendor_id: Uuid,
    pub category_id: Uuid,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        price: i64,
        stock: i32,
        vendor_id: Uuid,
        category_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            price,
            stock,
            vendor_id,
            category_id,
            active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Conditional stock decrement for a sale.
    ///
    /// Succeeds only when the full quantity is on hand, so the stock counter
    /// can never go negative.
    pub fn take_stock(&mut self, quantity: i32) -> Result<(), StockError> {
        if quantity <= 0 {
            return Err(StockError::InvalidQuantity(quantity));
        }
        if self.stock < quantity {
            return Err(StockError::Insufficient {
                requested: quantity,
                available: self.stock,
            });
        }
        self.stock -= quantity;
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Return units to stock (restock or cancellation compensation).
    pub fn restock(&mut self, quantity: i32) {
        self.stock = self.stock.saturating_add(quantity.max(0));
        self.updated_at = Utc::now();
    }

    /// True once remaining stock has fallen below the restock threshold.
    pub fn is_low_stock(&self, threshold: i32) -> bool {
        self.stock < threshold
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StockError {
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(i32),

    #[error("Insufficient stock: requested {requested}, available {available}")]
    Insufficient { requested: i32, available: i32 },
}

/// Repository trait for catalog access.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn resolve_product(&self, id: Uuid) -> Result<Option<Product>, StoreError>;

    async fn update_product(&self, id: Uuid, product: &Product) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock: i32) -> Product {
        Product::new("Test Product", 1500, stock, Uuid::new_v4(), Uuid::new_v4())
    }

    #[test]
    fn take_stock_decrements() {
        let mut p = product(12);
        p.take_stock(5).unwrap();
        assert_eq!(p.stock, 7);
    }

    #[test]
    fn take_stock_refuses_to_go_negative() {
        let mut p = product(3);
        let err = p.take_stock(5).unwrap_err();
        assert!(matches!(
            err,
            StockError::Insufficient {
                requested: 5,
                available: 3
            }
        ));
        // Stock untouched on failure
        assert_eq!(p.stock, 3);
    }

    #[test]
    fn take_stock_rejects_non_positive_quantity() {
        let mut p = product(3);
        assert!(p.take_stock(0).is_err());
        assert!(p.take_stock(-1).is_err());
        assert_eq!(p.stock, 3);
    }

    #[test]
    fn take_stock_exact_quantity_empties_shelf() {
        let mut p = product(5);
        p.take_stock(5).unwrap();
        assert_eq!(p.stock, 0);
        assert!(p.is_low_stock(LOW_STOCK_THRESHOLD));
    }

    #[test]
    fn low_stock_is_strictly_below_threshold() {
        assert!(!product(10).is_low_stock(LOW_STOCK_THRESHOLD));
        assert!(product(9).is_low_stock(LOW_STOCK_THRESHOLD));
    }
}
