use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use uuid::Uuid;

use vendora_catalog::{Product, ProductRepository, LOW_STOCK_THRESHOLD};
use vendora_core::{AccountDirectory, NotificationSink, Role, WorkflowError, WorkflowResult};

use crate::models::{Order, OrderItem};
use crate::repository::{CartRepository, OrderItemRepository, OrderRepository};

/// Checkout tunables, loaded from configuration by the host.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutPolicy {
    pub low_stock_threshold: i32,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            low_stock_threshold: LOW_STOCK_THRESHOLD,
        }
    }
}

/// Converts a validated cart into an order plus its order items.
///
/// This is the only place stock is mutated. The workflow runs in two phases:
/// phase 1 resolves and checks every line without writing, phase 2 commits
/// the decrements and writes the snapshots. A failure on any line therefore
/// leaves no earlier line decremented.
pub struct CheckoutService {
    accounts: Arc<dyn AccountDirectory>,
    products: Arc<dyn ProductRepository>,
    carts: Arc<dyn CartRepository>,
    orders: Arc<dyn OrderRepository>,
    items: Arc<dyn OrderItemRepository>,
    notifications: Arc<dyn NotificationSink>,
    policy: CheckoutPolicy,
}

impl CheckoutService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        products: Arc<dyn ProductRepository>,
        carts: Arc<dyn CartRepository>,
        orders: Arc<dyn OrderRepository>,
        items: Arc<dyn OrderItemRepository>,
        notifications: Arc<dyn NotificationSink>,
        policy: CheckoutPolicy,
    ) -> Self {
        Self {
            accounts,
            products,
            carts,
            orders,
            items,
            notifications,
            policy,
        }
    }

    pub async fn create_order(&self, cart_id: Uuid) -> WorkflowResult<Order> {
        let cart = self
            .carts
            .get_cart(cart_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("cart {cart_id} not found")))?;

        if cart.lines.is_empty() {
            return Err(WorkflowError::Validation("cart items are missing".into()));
        }

        let customer = self
            .accounts
            .resolve(cart.customer_id)
            .await?
            .ok_or_else(|| {
                WorkflowError::Validation(format!("customer {} does not exist", cart.customer_id))
            })?;

        // Phase 1: resolve each distinct product once and validate the
        // summed quantity across its lines, so duplicate lines for the same
        // product cannot validate against stale stock and oversell. The
        // running sum fails on the first line that exceeds what is on hand.
        let mut products: Vec<Product> = Vec::new();
        let mut index: HashMap<Uuid, usize> = HashMap::new();
        let mut requested: HashMap<Uuid, i32> = HashMap::new();
        for line in &cart.lines {
            if !index.contains_key(&line.product_id) {
                let product = self
                    .products
                    .resolve_product(line.product_id)
                    .await?
                    .ok_or_else(|| {
                        WorkflowError::NotFound(format!(
                            "product {} is not available",
                            line.product_id
                        ))
                    })?;
                index.insert(product.id, products.len());
                products.push(product);
            }
            let product = &products[index[&line.product_id]];
            let total = requested.entry(line.product_id).or_insert(0);
            *total += line.quantity;
            if product.stock < *total {
                return Err(WorkflowError::InsufficientStock {
                    product_id: product.id,
                    name: product.name.clone(),
                    available: product.stock,
                });
            }
        }

        // Phase 2: commit one decrement per distinct product, then write the
        // item snapshots per line. The order id is minted up front so items
        // carry their owner from the start.
        let mut order = Order::new(customer.id, cart.cart_total, cart.address.clone());
        for product in &mut products {
            let quantity = requested[&product.id];
            let available = product.stock;
            product
                .take_stock(quantity)
                .map_err(|_| WorkflowError::InsufficientStock {
                    product_id: product.id,
                    name: product.name.clone(),
                    available,
                })?;
            self.products.update_product(product.id, product).await?;

            if product.is_low_stock(self.policy.low_stock_threshold) {
                self.notify_low_stock(product).await?;
            }
        }
        for line in &cart.lines {
            let product = &products[index[&line.product_id]];
            let item = OrderItem::new(order.id, product, line.quantity, line.line_total, customer.id);
            self.items.insert_item(&item).await?;
            order.item_ids.push(item.id);
        }

        self.orders.insert_order(&order).await?;
        self.carts.delete_cart(cart.id).await?;
        tracing::info!(
            "Order {} created for customer {} ({} items, total {})",
            order.id,
            customer.id,
            order.item_ids.len(),
            order.order_total
        );
        Ok(order)
    }

    /// Restock alert to the product's vendor and every admin account.
    async fn notify_low_stock(&self, product: &Product) -> WorkflowResult<()> {
        let title = format!("{} running out of stock", product.name);
        let body = format!(
            "{} only has {} items remaining. Please make sure to restock.",
            product.name, product.stock
        );
        self.notifications
            .send(product.vendor_id, &title, &body)
            .await?;
        for admin in self.accounts.list_by_role(Role::Admin).await? {
            self.notifications.send(admin.id, &title, &body).await?;
        }
        tracing::warn!(
            "Product {} low on stock: {} remaining",
            product.id,
            product.stock
        );
        Ok(())
    }
}
