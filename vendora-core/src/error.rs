use uuid::Uuid;

/// Error type returned by repository and sink seams. Individual store
/// operations are atomic but the stores are external collaborators, so the
/// engine treats their failures as opaque.
pub type StoreError = Box<dyn std::error::Error + Send + Sync>;

/// Error taxonomy shared by every workflow operation.
///
/// All variants except `Store` are caller-facing business errors: the
/// operation applied none of its effects and retrying without changing the
/// input will fail the same way.
#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not enough stock for product {name}. Available stock: {available}")]
    InsufficientStock {
        product_id: Uuid,
        name: String,
        available: i32,
    },

    #[error("Store operation failed: {0}")]
    Store(#[from] StoreError),
}

pub type WorkflowResult<T> = Result<T, WorkflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_stock_message_names_product_and_stock() {
        let err = WorkflowError::InsufficientStock {
            product_id: Uuid::new_v4(),
            name: "Trail Mix".to_string(),
            available: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("Trail Mix"));
        assert!(msg.contains('3'));
    }
}
