//! In-memory adapter that records every signal, for tests and embedding

use std::sync::Mutex;

use crate::domain::entities::{Notification, Route};
use crate::domain::traits::{Navigator, Notifier};

#[derive(Default)]
pub struct MemoryAdapter {
    notifications: Mutex<Vec<Notification>>,
    redirects: Mutex<Vec<Route>>,
}

impl MemoryAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|n| n.clone())
            .unwrap_or_default()
    }

    pub fn redirects(&self) -> Vec<Route> {
        self.redirects.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut n) = self.notifications.lock() {
            n.clear();
        }
        if let Ok(mut r) = self.redirects.lock() {
            r.clear();
        }
    }
}

impl Notifier for MemoryAdapter {
    fn notify(&self, notification: Notification) {
        if let Ok(mut n) = self.notifications.lock() {
            n.push(notification);
        }
    }
}

impl Navigator for MemoryAdapter {
    fn redirect(&self, route: Route) {
        if let Ok(mut r) = self.redirects.lock() {
            r.push(route);
        }
    }
}
