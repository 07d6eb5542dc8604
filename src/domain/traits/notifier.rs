use crate::domain::entities::Notification;

/// Sink for user-visible notices (toasts)
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}
