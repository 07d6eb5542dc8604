//! Result dispatcher - routes classified outcomes to notifications and side effects

use std::sync::Arc;

use async_trait::async_trait;

use super::classifier::classify;
use crate::application::errors::ApiError;
use crate::application::mutation::MutationHandler;
use crate::application::query::{InvalidationTarget, QueryClient};
use crate::domain::entities::{Notification, Outcome, ResponseEnvelope, Route};
use crate::domain::traits::{Navigator, Notifier};

pub const UNEXPECTED_RESULT: &str = "Unexpected response from the server";

/// Side effect run after a successful write
#[derive(Debug, Clone, PartialEq)]
pub enum SuccessEffect {
    Invalidate(InvalidationTarget),
    RefetchStale,
    Navigate(Route),
}

/// How one operation's responses are read and acted on
#[derive(Debug, Clone, PartialEq)]
pub struct OperationProfile {
    pub success_flag: String,
    pub success_message: String,
    pub effects: Vec<SuccessEffect>,
}

impl OperationProfile {
    pub fn new(success_flag: impl Into<String>, success_message: impl Into<String>) -> Self {
        Self {
            success_flag: success_flag.into(),
            success_message: success_message.into(),
            effects: Vec::new(),
        }
    }

    pub fn invalidate(mut self, target: InvalidationTarget) -> Self {
        self.effects.push(SuccessEffect::Invalidate(target));
        self
    }

    pub fn refetch_stale(mut self) -> Self {
        self.effects.push(SuccessEffect::RefetchStale);
        self
    }

    pub fn navigate(mut self, route: Route) -> Self {
        self.effects.push(SuccessEffect::Navigate(route));
        self
    }
}

#[derive(Clone)]
pub struct ResultDispatcher {
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    queries: QueryClient,
    fallback_message: String,
}

impl ResultDispatcher {
    pub fn new(
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        queries: QueryClient,
        fallback_message: impl Into<String>,
    ) -> Self {
        Self {
            notifier,
            navigator,
            queries,
            fallback_message: fallback_message.into(),
        }
    }

    /// Classify a settled response, notify, and run effects on success only
    pub async fn dispatch_success(&self, profile: &OperationProfile, envelope: &ResponseEnvelope) -> Outcome {
        let outcome = classify(envelope, &profile.success_flag);

        match &outcome {
            Outcome::Success { .. } => {
                self.notifier
                    .notify(Notification::success(profile.success_message.clone()));
                for effect in &profile.effects {
                    self.apply(effect).await;
                }
            }
            Outcome::SoftError { message } => {
                self.notifier.notify(Notification::error(self.or_fallback(message)));
            }
            Outcome::Unrecognized { raw } => {
                tracing::warn!("unrecognized response for {}: {}", profile.success_flag, raw);
                self.notifier.notify(Notification::info(UNEXPECTED_RESULT));
            }
        }

        outcome
    }

    /// One error notification per message of a rejected call.
    /// Returns how many were emitted.
    pub fn dispatch_error(&self, error: &ApiError) -> usize {
        let messages = error.messages();
        if messages.is_empty() {
            self.notifier.notify(Notification::error(self.fallback_for(error)));
            return 1;
        }

        let count = messages.len();
        for message in messages {
            self.notifier.notify(Notification::error(self.or_fallback(&message)));
        }
        count
    }

    async fn apply(&self, effect: &SuccessEffect) {
        match effect {
            SuccessEffect::Invalidate(target) => {
                self.queries.invalidate(target);
            }
            SuccessEffect::RefetchStale => {
                let refetched = self.queries.refetch_stale().await;
                tracing::debug!("refetched {} stale queries", refetched);
            }
            SuccessEffect::Navigate(route) => self.navigator.redirect(*route),
        }
    }

    fn or_fallback(&self, message: &str) -> String {
        if message.trim().is_empty() {
            self.fallback_message.clone()
        } else {
            message.to_string()
        }
    }

    fn fallback_for(&self, error: &ApiError) -> String {
        match error {
            ApiError::Transport(_) => error.to_string(),
            _ => self.fallback_message.clone(),
        }
    }
}

/// Mutation handler that reports through a [`ResultDispatcher`]
pub struct NotifyingHandler {
    profile: OperationProfile,
    dispatcher: ResultDispatcher,
}

impl NotifyingHandler {
    pub fn new(profile: OperationProfile, dispatcher: ResultDispatcher) -> Self {
        Self {
            profile,
            dispatcher,
        }
    }
}

#[async_trait]
impl MutationHandler for NotifyingHandler {
    async fn on_success(&self, response: &ResponseEnvelope) {
        self.dispatcher.dispatch_success(&self.profile, response).await;
    }

    async fn on_error(&self, error: &ApiError) {
        self.dispatcher.dispatch_error(error);
    }
}
