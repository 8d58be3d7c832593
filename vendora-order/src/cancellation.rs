use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use vendora_core::{AccountDirectory, NotificationSink, Role, WorkflowError, WorkflowResult};

use crate::models::{Order, OrderStatus};
use crate::repository::{OrderItemRepository, OrderRepository};

/// Two-step cancellation arbitration: a customer's wish to cancel is a
/// request, and support staff make the terminal decision.
pub struct CancellationDesk {
    accounts: Arc<dyn AccountDirectory>,
    orders: Arc<dyn OrderRepository>,
    items: Arc<dyn OrderItemRepository>,
    notifications: Arc<dyn NotificationSink>,
}

impl CancellationDesk {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        orders: Arc<dyn OrderRepository>,
        items: Arc<dyn OrderItemRepository>,
        notifications: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            accounts,
            orders,
            items,
            notifications,
        }
    }

    /// Customer-initiated request. Flags the order and alerts support staff;
    /// the order status itself does not change.
    pub async fn request(&self, order_id: Uuid, reason: &str) -> WorkflowResult<Order> {
        let mut order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("order {order_id} not found")))?;

        if order.status != OrderStatus::Pending {
            return Err(WorkflowError::Conflict(
                "order is already dispatched, cannot request to cancel the order".into(),
            ));
        }

        order.cancel_request = true;
        order.cancel_reason = Some(reason.to_string());
        order.updated_at = Utc::now();

        for agent in self.accounts.list_by_role(Role::Support).await? {
            self.notifications
                .send(
                    agent.id,
                    &format!("Order cancel request for order {}", order.id),
                    &format!(
                        "Order {} is requested to be cancelled due to the reason given as: {}",
                        order.id, reason
                    ),
                )
                .await?;
        }

        self.orders.replace_order(order.id, &order).await?;
        tracing::info!("Cancel request recorded for order {}", order.id);
        Ok(order)
    }

    /// Staff-initiated terminal decision. Cancels the order and every item;
    /// item-level notifications are suppressed in favour of one aggregate
    /// customer notification combining both reasons.
    pub async fn staff_resolve(&self, order_id: Uuid, staff_reason: &str) -> WorkflowResult<Order> {
        let mut order = self
            .orders
            .get_order(order_id)
            .await?
            .ok_or_else(|| WorkflowError::NotFound(format!("order {order_id} not found")))?;

        if order.status != OrderStatus::Pending {
            return Err(WorkflowError::Conflict(format!(
                "cannot cancel the order as the order is {:?}",
                order.status
            )));
        }

        order.staff_cancel_reason = Some(staff_reason.to_string());
        order.update_status(OrderStatus::Cancelled);

        for item_id in &order.item_ids {
            if let Some(mut item) = self.items.get_item(*item_id).await? {
                item.update_status(OrderStatus::Cancelled);
                self.items.replace_item(item.id, &item).await?;
            }
        }

        self.orders.replace_order(order.id, &order).await?;

        let customer_reason = order.cancel_reason.as_deref().unwrap_or("not given");
        self.notifications
            .send(
                order.customer_id,
                &format!("Order {} is Cancelled", order.id),
                &format!(
                    "Order {} is cancelled due to the customer reason given as: {}. Support feedback: {}",
                    order.id, customer_reason, staff_reason
                ),
            )
            .await?;

        tracing::info!("Order {} cancelled by support staff", order.id);
        Ok(order)
    }
}
