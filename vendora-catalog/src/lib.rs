pub mod product;

pub use product::{Product, ProductRepository, StockError, LOW_STOCK_THRESHOLD};
