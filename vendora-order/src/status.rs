use std::sync::Arc;

use uuid::Uuid;

use vendora_core::{NotificationSink, WorkflowError, WorkflowResult};

use crate::models::{rollup_status, Order, OrderItem, OrderStatus};
use crate::repository::{OrderItemRepository, OrderRepository};

/// Drives orders and order items through the delivery state machine, keeping
/// the order's aggregate status consistent with its items' statuses.
pub struct StatusEngine {
    orders: Arc<dyn OrderRepository>,
    items: Arc<dyn OrderItemRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl StatusEngine {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        items: Arc<dyn OrderItemRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            orders,
            items,
            notifications,
        }
    }

    /// Order-level transition. Delivered and Cancelled fan out to every item;
    /// any other target is set directly.
    pub async fn set_order_status(
        &self,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> WorkflowResult<Order> {
        let mut order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("order {order_id} not found")))?;

        // Idempotent: re-setting the current status has no side effects.
        if order.status == new_status {
            return Ok(order);
        }
        if order.status.is_terminal() {
            return Err(WorkflowError::Conflict(format!(
                "order {} is already {:?}",
                order.id, order.status
            )));
        }

        match new_status {
            OrderStatus::Delivered => {
                self.cascade_items(&order, OrderStatus::Delivered).await?;
                order.update_status(OrderStatus::Delivered);
                self.orders.replace_order(order.id, &order).await?;
                self.notify_order_delivered(&order).await?;
            }
            OrderStatus::Cancelled => {
                self.cascade_items(&order, OrderStatus::Cancelled).await?;
                order.update_status(OrderStatus::Cancelled);
                self.orders.replace_order(order.id, &order).await?;
                let reason = order.cancel_reason.as_deref().unwrap_or("not given");
                self.notifications
                    .send(
                        order.customer_id,
                        &format!("Order {} is Cancelled", order.id),
                        &format!(
                            "Order {} is cancelled due to the reason given as: {}",
                            order.id, reason
                        ),
                    )
                    .await?;
            }
            other => {
                order.update_status(other);
                self.orders.replace_order(order.id, &order).await?;
            }
        }

        tracing::info!("Order {} moved to {:?}", order.id, order.status);
        Ok(order)
    }

    /// Item-level transition. A delivery recomputes the parent order's
    /// aggregate status from all siblings.
    pub async fn set_item_status(
        &self,
        item_id: Uuid,
        new_status: OrderStatus,
    ) -> WorkflowResult<OrderItem> {
        if new_status == OrderStatus::PartialDelivered {
            return Err(WorkflowError::Validation(
                "PARTIAL_DELIVERED is derived for orders and cannot be set on an item".into(),
            ));
        }

        let mut item = self
            .items
            .get_item(item_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("order item {item_id} not found")))?;

        item.update_status(new_status);
        self.items.replace_item(item.id, &item).await?;

        // Orphaned items (order deleted afterwards) get no rollup.
        let Some(mut order) = self.orders.get_order(item.order_id).await? else {
            return Ok(item);
        };

        if new_status == OrderStatus::Delivered {
            self.notifications
                .send(
                    item.customer_id,
                    &format!("Order item {} is Delivered", item.id),
                    &format!(
                        "Order item {} is delivered. Enjoy the item! Feel free to rate the vendor.",
                        item.id
                    ),
                )
                .await?;

            let siblings = self.items.list_by_order(order.id).await?;
            if let Some(rollup) = rollup_status(&siblings) {
                if rollup != order.status {
                    order.update_status(rollup);
                    self.orders.replace_order(order.id, &order).await?;
                    tracing::info!("Order {} rolled up to {:?}", order.id, rollup);
                    if rollup == OrderStatus::Delivered {
                        self.notify_order_delivered(&order).await?;
                    }
                }
            }
        }

        Ok(item)
    }

    async fn cascade_items(&self, order: &Order, status: OrderStatus) -> WorkflowResult<()> {
        for item_id in &order.item_ids {
            if let Some(mut item) = self.items.get_item(*item_id).await? {
                item.update_status(status);
                self.items.replace_item(item.id, &item).await?;
            }
        }
        Ok(())
    }

    async fn notify_order_delivered(&self, order: &Order) -> WorkflowResult<()> {
        self.notifications
            .send(
                order.customer_id,
                &format!("Order {} is Delivered", order.id),
                &format!(
                    "Order {} is delivered. Thank you for shopping with us!",
                    order.id
                ),
            )
            .await?;
        Ok(())
    }
}
