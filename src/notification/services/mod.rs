//! Notification services.

mod retrier;

pub use retrier::NotificationRetrier;
