use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vendora_catalog::Product;

/// Delivery status shared by orders and order items.
///
/// `PartialDelivered` is a rollup-only value: an order holds it when some
/// but not all of its items are delivered. Items never carry it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Dispatched,
    PartialDelivered,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Terminal statuses admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// Derive the delivery rollup for an order from its items' statuses.
///
/// Returns `None` when no item is delivered yet (the order keeps whatever
/// status it already has), `PartialDelivered` when some items are delivered,
/// and `Delivered` only when every item is.
pub fn rollup_status(items: &[OrderItem]) -> Option<OrderStatus> {
    if items.is_empty() {
        return None;
    }
    let delivered = items
        .iter()
        .filter(|item| item.status == OrderStatus::Delivered)
        .count();
    if delivered == items.len() {
        Some(OrderStatus::Delivered)
    } else if delivered > 0 {
        Some(OrderStatus::PartialDelivered)
    } else {
        None
    }
}

/// One line of a shopping cart, already resolved against the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
    /// Line total in minor currency units, priced at assembly time.
    pub line_total: i64,
}

/// Pre-order staging area. Exactly one open cart per customer; destroyed the
/// instant it is converted into an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub lines: Vec<CartLine>,
    pub cart_total: i64,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Cart {
    pub fn new(customer_id: Uuid, lines: Vec<CartLine>, address: Option<String>) -> Self {
        let now = Utc::now();
        let cart_total = lines.iter().map(|line| line.line_total).sum();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            lines,
            cart_total,
            address,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Durable record of a completed checkout.
///
/// The status is a rollup derived from the owned items; keeping the two
/// consistent is the job of the status engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub item_ids: Vec<Uuid>,
    pub order_total: i64,
    pub status: OrderStatus,
    pub cancel_request: bool,
    pub cancel_reason: Option<String>,
    pub staff_cancel_reason: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Mint a new pending order. The id exists before any item is persisted,
    /// so items are written already carrying their owning order id.
    pub fn new(customer_id: Uuid, order_total: i64, address: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            customer_id,
            item_ids: Vec::new(),
            order_total,
            status: OrderStatus::Pending,
            cancel_request: false,
            cancel_reason: None,
            staff_cancel_reason: None,
            address,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }
}

/// The unit of delivery tracking: one per cart line, snapshotting the
/// product's identity and price at checkout time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_id: Uuid,
    pub product_name: String,
    /// Unit price frozen at order time, in minor currency units.
    pub unit_price: i64,
    pub quantity: i32,
    pub line_total: i64,
    pub vendor_id: Uuid,
    pub customer_id: Uuid,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderItem {
    pub fn new(
        order_id: Uuid,
        product: &Product,
        quantity: i32,
        line_total: i64,
        customer_id: Uuid,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            order_id,
            product_id: product.id,
            product_name: product.name.clone(),
            unit_price: product.price,
            quantity,
            line_total,
            vendor_id: product.vendor_id,
            customer_id,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn update_status(&mut self, new_status: OrderStatus) {
        self.status = new_status;
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_with_status(order_id: Uuid, status: OrderStatus) -> OrderItem {
        let product = Product::new("Widget", 100, 50, Uuid::new_v4(), Uuid::new_v4());
        let mut item = OrderItem::new(order_id, &product, 1, 100, Uuid::new_v4());
        item.status = status;
        item
    }

    #[test]
    fn rollup_all_delivered() {
        let order_id = Uuid::new_v4();
        let items = vec![
            item_with_status(order_id, OrderStatus::Delivered),
            item_with_status(order_id, OrderStatus::Delivered),
        ];
        assert_eq!(rollup_status(&items), Some(OrderStatus::Delivered));
    }

    #[test]
    fn rollup_some_delivered() {
        let order_id = Uuid::new_v4();
        let items = vec![
            item_with_status(order_id, OrderStatus::Delivered),
            item_with_status(order_id, OrderStatus::Pending),
        ];
        assert_eq!(rollup_status(&items), Some(OrderStatus::PartialDelivered));
    }

    #[test]
    fn rollup_none_delivered() {
        let order_id = Uuid::new_v4();
        let items = vec![
            item_with_status(order_id, OrderStatus::Dispatched),
            item_with_status(order_id, OrderStatus::Pending),
        ];
        assert_eq!(rollup_status(&items), None);
    }

    #[test]
    fn rollup_of_no_items_is_none() {
        assert_eq!(rollup_status(&[]), None);
    }

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Pending.is_terminal());
        assert!(!OrderStatus::Dispatched.is_terminal());
        assert!(!OrderStatus::PartialDelivered.is_terminal());
    }

    #[test]
    fn cart_total_is_sum_of_line_totals() {
        let cart = Cart::new(
            Uuid::new_v4(),
            vec![
                CartLine {
                    product_id: Uuid::new_v4(),
                    quantity: 2,
                    line_total: 3000,
                },
                CartLine {
                    product_id: Uuid::new_v4(),
                    quantity: 1,
                    line_total: 500,
                },
            ],
            None,
        );
        assert_eq!(cart.cart_total, 3500);
    }

    #[test]
    fn order_item_snapshots_product() {
        let mut product = Product::new("Lamp", 2500, 10, Uuid::new_v4(), Uuid::new_v4());
        let item = OrderItem::new(Uuid::new_v4(), &product, 2, 5000, Uuid::new_v4());

        // Later catalog edits must not leak into the snapshot
        product.price = 9999;
        assert_eq!(item.unit_price, 2500);
        assert_eq!(item.product_name, "Lamp");
        assert_eq!(item.status, OrderStatus::Pending);
    }
}
