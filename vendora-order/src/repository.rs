use async_trait::async_trait;
use uuid::Uuid;

use vendora_core::error::StoreError;

use crate::models::{Cart, Order, OrderItem};

/// Repository trait for cart staging data.
#[async_trait]
pub trait CartRepository: Send + Sync {
    async fn get_cart(&self, id: Uuid) -> Result<Option<Cart>, StoreError>;

    /// The one-cart-per-customer invariant is checked through this lookup.
    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Option<Cart>, StoreError>;

    async fn insert_cart(&self, cart: &Cart) -> Result<(), StoreError>;

    async fn delete_cart(&self, id: Uuid) -> Result<(), StoreError>;
}

/// Repository trait for order records.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, StoreError>;

    async fn insert_order(&self, order: &Order) -> Result<(), StoreError>;

    async fn replace_order(&self, id: Uuid, order: &Order) -> Result<(), StoreError>;

    /// Removes the order record only. Items survive as independent
    /// historical records and lose their rollup from then on.
    async fn delete_order(&self, id: Uuid) -> Result<(), StoreError>;

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, StoreError>;

    /// Work queue for support staff: orders carrying an open cancel request.
    async fn list_cancel_requests(&self) -> Result<Vec<Order>, StoreError>;
}

/// Repository trait for order items. Items are independently persisted and
/// addressable even though the order owns their lifecycle.
#[async_trait]
pub trait OrderItemRepository: Send + Sync {
    async fn get_item(&self, id: Uuid) -> Result<Option<OrderItem>, StoreError>;

    async fn insert_item(&self, item: &OrderItem) -> Result<(), StoreError>;

    async fn replace_item(&self, id: Uuid, item: &OrderItem) -> Result<(), StoreError>;

    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>, StoreError>;

    async fn list_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<OrderItem>, StoreError>;

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<OrderItem>, StoreError>;
}
