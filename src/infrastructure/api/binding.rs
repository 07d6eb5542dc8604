use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;

use super::client::ApiClient;
use super::request::ApiRequest;
use crate::application::errors::ApiError;
use crate::domain::entities::ResponseEnvelope;

type RequestBuilder<P> = Arc<dyn Fn(&P) -> ApiRequest + Send + Sync>;

/// A named remote operation: maps params to a request and sends it
pub struct Binding<P> {
    name: &'static str,
    client: Arc<dyn ApiClient>,
    build: RequestBuilder<P>,
}

impl<P> Clone for Binding<P> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            client: self.client.clone(),
            build: self.build.clone(),
        }
    }
}

impl<P: Send + Sync> Binding<P> {
    pub fn new<F>(name: &'static str, client: Arc<dyn ApiClient>, build: F) -> Self
    where
        F: Fn(&P) -> ApiRequest + Send + Sync + 'static,
    {
        Self {
            name,
            client,
            build: Arc::new(build),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn request(&self, params: &P) -> ApiRequest {
        (self.build)(params)
    }

    pub async fn call(&self, params: &P) -> Result<ResponseEnvelope, ApiError> {
        let request = self.request(params);
        tracing::debug!("[{}] {} {}", self.name, request.method.as_str(), request.path);
        self.client.send(request).await
    }
}

impl<P: Clone + Send + Sync + 'static> Binding<P> {
    /// Read closure for the query cache, bound to `params`
    pub fn fetcher(
        &self,
        params: P,
    ) -> impl Fn() -> BoxFuture<'static, Result<ResponseEnvelope, ApiError>> + Send + Sync + 'static {
        let binding = self.clone();
        move || {
            let binding = binding.clone();
            let params = params.clone();
            async move { binding.call(&params).await }.boxed()
        }
    }
}
