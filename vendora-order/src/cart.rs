use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vendora_catalog::ProductRepository;
use vendora_core::{AccountDirectory, WorkflowError, WorkflowResult};

use crate::models::{Cart, CartLine};
use crate::repository::CartRepository;

/// A raw, unresolved cart line as it arrives from the caller. The product id
/// is optional because the reference may simply be absent from the request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineRequest {
    pub product_id: Option<Uuid>,
    pub quantity: i32,
}

/// Validates and materializes a cart from raw item references into priced,
/// resolved line items. No stock is touched here; reservation happens only
/// at order creation.
pub struct CartAssembler {
    accounts: Arc<dyn AccountDirectory>,
    products: Arc<dyn ProductRepository>,
    carts: Arc<dyn CartRepository>,
}

impl CartAssembler {
    pub fn new(
        accounts: Arc<dyn AccountDirectory>,
        products: Arc<dyn ProductRepository>,
        carts: Arc<dyn CartRepository>,
    ) -> Self {
        Self {
            accounts,
            products,
            carts,
        }
    }

    pub async fn assemble(
        &self,
        customer_id: Uuid,
        lines: &[CartLineRequest],
        address: Option<String>,
    ) -> WorkflowResult<Cart> {
        if lines.is_empty() {
            return Err(WorkflowError::Validation("cart items are missing".into()));
        }

        let customer = self
            .accounts
            .resolve(customer_id)
            .await?
            .ok_or_else(|| {
                WorkflowError::Validation(format!("customer {customer_id} does not exist"))
            })?;

        if self.carts.find_by_customer(customer.id).await?.is_some() {
            return Err(WorkflowError::Conflict(
                "customer already has items in a shopping cart".into(),
            ));
        }

        let mut resolved = Vec::with_capacity(lines.len());
        for line in lines {
            let product_id = line
                .product_id
                .ok_or_else(|| WorkflowError::Validation("product id is missing".into()))?;
            if line.quantity <= 0 {
                return Err(WorkflowError::Validation(format!(
                    "quantity for product {product_id} must be positive"
                )));
            }
            let product = self
                .products
                .resolve_product(product_id)
                .await?
                .ok_or_else(|| {
                    WorkflowError::Validation(format!("product {product_id} does not exist"))
                })?;
            resolved.push(CartLine {
                product_id: product.id,
                quantity: line.quantity,
                line_total: product.price * i64::from(line.quantity),
            });
        }

        let cart = Cart::new(customer.id, resolved, address);
        self.carts.insert_cart(&cart).await?;
        tracing::info!(
            "Cart {} assembled for customer {} with {} lines",
            cart.id,
            customer.id,
            cart.lines.len()
        );
        Ok(cart)
    }
}
