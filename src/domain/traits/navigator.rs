use crate::domain::entities::Route;

/// Client-side navigation, used for redirects after a mutation or a failed gate
pub trait Navigator: Send + Sync {
    fn redirect(&self, route: Route);
}
