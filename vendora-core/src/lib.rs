pub mod account;
pub mod error;
pub mod notification;

pub use account::{Account, AccountDirectory, Role};
pub use error::{StoreError, WorkflowError, WorkflowResult};
pub use notification::{Notification, NotificationSink};
