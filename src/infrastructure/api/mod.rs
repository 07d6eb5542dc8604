//! Remote API access: request shapes, transport and named bindings

pub mod binding;
pub mod client;
pub mod endpoints;
pub mod request;

pub use binding::Binding;
pub use client::{ApiClient, HttpApiClient};
pub use request::{ApiRequest, Method};
