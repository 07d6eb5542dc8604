//! Mutation executor - triggered writes with one-shot callbacks

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::ApiError;
use crate::domain::entities::ResponseEnvelope;
use crate::infrastructure::api::Binding;

/// Lifecycle callbacks of a mutation.
///
/// The executor never looks inside the envelope; interpreting it is the
/// handler's job.
#[async_trait]
pub trait MutationHandler: Send + Sync {
    async fn on_success(&self, response: &ResponseEnvelope);

    async fn on_error(&self, error: &ApiError);
}

/// Handler that ignores both outcomes
pub struct NoopHandler;

#[async_trait]
impl MutationHandler for NoopHandler {
    async fn on_success(&self, _response: &ResponseEnvelope) {}

    async fn on_error(&self, _error: &ApiError) {}
}

/// A write bound to one endpoint and one handler.
///
/// Every `mutate` call is an independent invocation; nothing is coalesced
/// and nothing is retried.
pub struct Mutation<P> {
    binding: Binding<P>,
    handler: Arc<dyn MutationHandler>,
    in_flight: Arc<AtomicUsize>,
}

impl<P: Send + Sync> Mutation<P> {
    pub fn new(binding: Binding<P>, handler: Arc<dyn MutationHandler>) -> Self {
        Self {
            binding,
            handler,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// True while at least one invocation has not settled.
    /// Callers disable their trigger on this to avoid double submits.
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn mutate(&self, params: P) -> Result<ResponseEnvelope, ApiError> {
        let invocation = uuid::Uuid::new_v4();
        let _flight = InFlight::enter(self.in_flight.clone());
        tracing::debug!("[{}] mutation {} started", self.binding.name(), invocation);

        let result = self.binding.call(&params).await;

        match &result {
            Ok(response) => {
                tracing::info!(
                    "[{}] mutation {} settled with status {}",
                    self.binding.name(),
                    invocation,
                    response.status
                );
                self.handler.on_success(response).await;
            }
            Err(error) => {
                tracing::warn!("[{}] mutation {} failed: {}", self.binding.name(), invocation, error);
                self.handler.on_error(error).await;
            }
        }

        result
    }
}

/// Counts an invocation as in flight until dropped
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}
