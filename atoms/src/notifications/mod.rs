pub mod model;
pub mod service;

pub use model::{CreateNotificationPayload, Notification, NotificationKind};
pub use service::*;
