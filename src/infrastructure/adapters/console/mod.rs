//! Console adapter for the CLI

use std::sync::Mutex;

use crate::domain::entities::{Level, Notification, Route};
use crate::domain::traits::{Navigator, Notifier};

/// Prints notifications and redirects to stdout
pub struct ConsoleAdapter {
    location: Mutex<Route>,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self {
            location: Mutex::new(Route::Root),
        }
    }

    /// Route of the last redirect
    pub fn location(&self) -> Route {
        self.location.lock().map(|r| *r).unwrap_or(Route::Root)
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for ConsoleAdapter {
    fn notify(&self, notification: Notification) {
        match notification.level {
            Level::Error => tracing::warn!("{}", notification.message),
            _ => tracing::info!("{}", notification.message),
        }
        println!("{}", notification);
    }
}

impl Navigator for ConsoleAdapter {
    fn redirect(&self, route: Route) {
        if let Ok(mut location) = self.location.lock() {
            *location = route;
        }
        println!("[redirect] {}", route.path());
    }
}
