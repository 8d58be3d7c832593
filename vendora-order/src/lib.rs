pub mod cancellation;
pub mod cart;
pub mod checkout;
pub mod models;
pub mod repository;
pub mod status;

pub use cancellation::CancellationDesk;
pub use cart::{CartAssembler, CartLineRequest};
pub use checkout::{CheckoutPolicy, CheckoutService};
pub use models::{Cart, CartLine, Order, OrderItem, OrderStatus};
pub use repository::{CartRepository, OrderItemRepository, OrderRepository};
pub use status::StatusEngine;
