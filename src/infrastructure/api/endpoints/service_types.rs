use serde_json::Value;

use crate::application::dispatch::OperationProfile;
use crate::application::query::{InvalidationGraph, InvalidationTarget};
use crate::domain::entities::ResourceKind;
use crate::infrastructure::api::ApiRequest;

pub const SERVICE_TYPES: &str = "__serviceTypes";

pub fn service_types() -> ApiRequest {
    ApiRequest::get("/service-types")
}

pub fn create(body: Value) -> ApiRequest {
    ApiRequest::post("/service-types", body)
}

pub fn update(id: &str, body: Value) -> ApiRequest {
    ApiRequest::put(format!("/service-types/{}", id), body)
}

pub fn delete(id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/service-types/{}", id))
}

pub fn create_profile() -> OperationProfile {
    OperationProfile::new("createdServiceType", "Service type added")
        .invalidate(InvalidationTarget::Resource(ResourceKind::ServiceType))
}

pub fn update_profile() -> OperationProfile {
    OperationProfile::new("updatedServiceType", "Service type updated")
        .invalidate(InvalidationTarget::Resource(ResourceKind::ServiceType))
}

pub fn delete_profile() -> OperationProfile {
    OperationProfile::new("deletedServiceType", "Service type removed")
        .invalidate(InvalidationTarget::Resource(ResourceKind::ServiceType))
}

pub(super) fn register(graph: &mut InvalidationGraph) {
    graph.register(ResourceKind::ServiceType, &[SERVICE_TYPES]);
}
