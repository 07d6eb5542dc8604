//! Plan-based navigation gate

use std::sync::Arc;

use crate::domain::entities::{PlanKey, Route};
use crate::domain::traits::Navigator;

/// Whether a merchant on `current` may see a page requiring `required`
pub fn is_allowed(required: &PlanKey, current: &PlanKey) -> bool {
    required == current
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Allowed,
    Redirecting,
}

/// Gate owned by a plan-specific page.
///
/// [`PlanGate::view`] is pure and safe to call while rendering.
/// [`PlanGate::evaluate`] is the effect boundary: it redirects to the root
/// route only when the current plan key changed since the last evaluation.
pub struct PlanGate {
    required: PlanKey,
    navigator: Arc<dyn Navigator>,
    last_seen: Option<PlanKey>,
    state: GateState,
}

impl PlanGate {
    pub fn new(required: PlanKey, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            required,
            navigator,
            last_seen: None,
            state: GateState::Allowed,
        }
    }

    pub fn required(&self) -> &PlanKey {
        &self.required
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn view(&self, current: &PlanKey) -> GateState {
        if is_allowed(&self.required, current) {
            GateState::Allowed
        } else {
            GateState::Redirecting
        }
    }

    pub fn evaluate(&mut self, current: &PlanKey) -> GateState {
        if self.last_seen.as_ref() == Some(current) {
            return self.state;
        }
        self.last_seen = Some(current.clone());
        self.state = self.view(current);

        if self.state == GateState::Redirecting {
            tracing::debug!(
                "plan {} does not match required {}, redirecting",
                current,
                self.required
            );
            self.navigator.redirect(Route::Root);
        }
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::adapters::MemoryAdapter;

    #[test]
    fn test_mismatch_redirects_to_root() {
        let nav = Arc::new(MemoryAdapter::new());
        let mut gate = PlanGate::new(PlanKey::new("HOTELSANDAPARTMENTS"), nav.clone());

        assert_eq!(gate.evaluate(&PlanKey::new("RETAIL")), GateState::Redirecting);
        assert_eq!(nav.redirects(), vec![Route::Root]);
    }

    #[test]
    fn test_match_stays_allowed() {
        let nav = Arc::new(MemoryAdapter::new());
        let mut gate = PlanGate::new(PlanKey::new("HOTELSANDAPARTMENTS"), nav.clone());

        assert_eq!(gate.evaluate(&PlanKey::new("HOTELSANDAPARTMENTS")), GateState::Allowed);
        assert!(nav.redirects().is_empty());
        assert!(nav.notifications().is_empty());
    }

    #[test]
    fn test_view_never_redirects() {
        let nav = Arc::new(MemoryAdapter::new());
        let gate = PlanGate::new(PlanKey::new("RETAIL"), nav.clone());

        assert_eq!(gate.view(&PlanKey::new("WHOLESALE")), GateState::Redirecting);
        assert_eq!(gate.view(&PlanKey::new("WHOLESALE")), GateState::Redirecting);
        assert!(nav.redirects().is_empty());
    }

    #[test]
    fn test_effect_reruns_only_on_dependency_change() {
        let nav = Arc::new(MemoryAdapter::new());
        let mut gate = PlanGate::new(PlanKey::new("RETAIL"), nav.clone());

        gate.evaluate(&PlanKey::new("WHOLESALE"));
        gate.evaluate(&PlanKey::new("WHOLESALE"));
        assert_eq!(nav.redirects().len(), 1);

        assert_eq!(gate.evaluate(&PlanKey::new("RETAIL")), GateState::Allowed);
        gate.evaluate(&PlanKey::new("FOODMART"));
        assert_eq!(nav.redirects().len(), 2);
    }

    #[test]
    fn test_is_allowed_is_exact() {
        assert!(is_allowed(&PlanKey::new("RETAIL"), &PlanKey::new("RETAIL")));
        assert!(!is_allowed(&PlanKey::new("RETAIL"), &PlanKey::new("retail")));
    }
}
