use serde_json::Value;

use crate::application::dispatch::OperationProfile;
use crate::application::query::{InvalidationGraph, InvalidationTarget};
use crate::domain::entities::ResourceKind;
use crate::infrastructure::api::ApiRequest;

pub const OFFERS: &str = "__offers";

pub fn offers() -> ApiRequest {
    ApiRequest::get("/offers")
}

pub fn create(body: Value) -> ApiRequest {
    ApiRequest::post("/offers", body)
}

pub fn delete(id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/offers/{}", id))
}

pub fn create_profile() -> OperationProfile {
    OperationProfile::new("createdOffer", "Offer published")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Offer))
}

pub fn delete_profile() -> OperationProfile {
    OperationProfile::new("deletedOffer", "Offer removed")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Offer))
}

pub(super) fn register(graph: &mut InvalidationGraph) {
    graph.register(ResourceKind::Offer, &[OFFERS]);
}
