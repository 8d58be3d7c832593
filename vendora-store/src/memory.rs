//! In-memory reference implementations of the engine's collaborator traits.
//!
//! These back the integration tests and any host that does not bring its own
//! persistence. Each store guards its map with a `tokio::sync::RwLock`, so a
//! single store operation is atomic; cross-store transactions are explicitly
//! not provided, matching the contract the workflows are written against.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use vendora_catalog::{Product, ProductRepository};
use vendora_core::error::StoreError;
use vendora_core::{Account, AccountDirectory, Notification, NotificationSink, Role};
use vendora_order::models::{Cart, Order, OrderItem};
use vendora_order::repository::{CartRepository, OrderItemRepository, OrderRepository};
use vendora_rating::models::{RatingRepository, VendorRating};

#[derive(Default)]
pub struct MemoryAccounts {
    accounts: RwLock<HashMap<Uuid, Account>>,
}

impl MemoryAccounts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.write().await.insert(id, account);
        id
    }
}

#[async_trait]
impl AccountDirectory for MemoryAccounts {
    async fn resolve(&self, id: Uuid) -> Result<Option<Account>, StoreError> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }

    async fn list_by_role(&self, role: Role) -> Result<Vec<Account>, StoreError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .filter(|account| account.role == role)
            .cloned()
            .collect())
    }

    async fn update_account(&self, id: Uuid, account: &Account) -> Result<(), StoreError> {
        self.accounts.write().await.insert(id, account.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCatalog {
    products: RwLock<HashMap<Uuid, Product>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn seed(&self, product: Product) -> Uuid {
        let id = product.id;
        self.products.write().await.insert(id, product);
        id
    }
}

#[async_trait]
impl ProductRepository for MemoryCatalog {
    async fn resolve_product(&self, id: Uuid) -> Result<Option<Product>, StoreError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn update_product(&self, id: Uuid, product: &Product) -> Result<(), StoreError> {
        self.products.write().await.insert(id, product.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCarts {
    carts: RwLock<HashMap<Uuid, Cart>>,
}

impl MemoryCarts {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartRepository for MemoryCarts {
    async fn get_cart(&self, id: Uuid) -> Result<Option<Cart>, StoreError> {
        Ok(self.carts.read().await.get(&id).cloned())
    }

    async fn find_by_customer(&self, customer_id: Uuid) -> Result<Option<Cart>, StoreError> {
        Ok(self
            .carts
            .read()
            .await
            .values()
            .find(|cart| cart.customer_id == customer_id)
            .cloned())
    }

    async fn insert_cart(&self, cart: &Cart) -> Result<(), StoreError> {
        self.carts.write().await.insert(cart.id, cart.clone());
        Ok(())
    }

    async fn delete_cart(&self, id: Uuid) -> Result<(), StoreError> {
        self.carts.write().await.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryOrders {
    orders: RwLock<HashMap<Uuid, Order>>,
}

impl MemoryOrders {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for MemoryOrders {
    async fn get_order(&self, id: Uuid) -> Result<Option<Order>, StoreError> {
        Ok(self.orders.read().await.get(&id).cloned())
    }

    async fn insert_order(&self, order: &Order) -> Result<(), StoreError> {
        self.orders.write().await.insert(order.id, order.clone());
        Ok(())
    }

    async fn replace_order(&self, id: Uuid, order: &Order) -> Result<(), StoreError> {
        self.orders.write().await.insert(id, order.clone());
        Ok(())
    }

    async fn delete_order(&self, id: Uuid) -> Result<(), StoreError> {
        self.orders.write().await.remove(&id);
        Ok(())
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .filter(|order| order.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn list_cancel_requests(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self
            .orders
            .read()
            .await
            .values()
            .filter(|order| order.cancel_request)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryOrderItems {
    items: RwLock<HashMap<Uuid, OrderItem>>,
}

impl MemoryOrderItems {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderItemRepository for MemoryOrderItems {
    async fn get_item(&self, id: Uuid) -> Result<Option<OrderItem>, StoreError> {
        Ok(self.items.read().await.get(&id).cloned())
    }

    async fn insert_item(&self, item: &OrderItem) -> Result<(), StoreError> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(())
    }

    async fn replace_item(&self, id: Uuid, item: &OrderItem) -> Result<(), StoreError> {
        self.items.write().await.insert(id, item.clone());
        Ok(())
    }

    async fn list_by_order(&self, order_id: Uuid) -> Result<Vec<OrderItem>, StoreError> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect())
    }

    async fn list_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<OrderItem>, StoreError> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.vendor_id == vendor_id)
            .cloned()
            .collect())
    }

    async fn list_by_customer(&self, customer_id: Uuid) -> Result<Vec<OrderItem>, StoreError> {
        Ok(self
            .items
            .read()
            .await
            .values()
            .filter(|item| item.customer_id == customer_id)
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct MemoryRatings {
    ratings: RwLock<HashMap<Uuid, VendorRating>>,
}

impl MemoryRatings {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RatingRepository for MemoryRatings {
    async fn get_rating(&self, id: Uuid) -> Result<Option<VendorRating>, StoreError> {
        Ok(self.ratings.read().await.get(&id).cloned())
    }

    async fn find_by_pair(
        &self,
        customer_id: Uuid,
        vendor_id: Uuid,
    ) -> Result<Option<VendorRating>, StoreError> {
        Ok(self
            .ratings
            .read()
            .await
            .values()
            .find(|rating| rating.customer_id == customer_id && rating.vendor_id == vendor_id)
            .cloned())
    }

    async fn insert_rating(&self, rating: &VendorRating) -> Result<(), StoreError> {
        self.ratings.write().await.insert(rating.id, rating.clone());
        Ok(())
    }

    async fn replace_rating(&self, id: Uuid, rating: &VendorRating) -> Result<(), StoreError> {
        self.ratings.write().await.insert(id, rating.clone());
        Ok(())
    }

    async fn list_by_vendor(&self, vendor_id: Uuid) -> Result<Vec<VendorRating>, StoreError> {
        Ok(self
            .ratings
            .read()
            .await
            .values()
            .filter(|rating| rating.vendor_id == vendor_id)
            .cloned()
            .collect())
    }
}

/// Append-only notification sink that keeps everything it is sent, so tests
/// can assert on fan-out.
#[derive(Default)]
pub struct MemoryNotifications {
    sent: RwLock<Vec<Notification>>,
}

impl MemoryNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn all(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    pub async fn sent_to(&self, user_id: Uuid) -> Vec<Notification> {
        self.sent
            .read()
            .await
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl NotificationSink for MemoryNotifications {
    async fn send(&self, user_id: Uuid, title: &str, body: &str) -> Result<Uuid, StoreError> {
        let notification = Notification::new(user_id, title, body);
        let id = notification.id;
        self.sent.write().await.push(notification);
        Ok(id)
    }
}
