//! Merchant real-estate listings

use serde_json::Value;

use crate::application::dispatch::OperationProfile;
use crate::application::query::{InvalidationGraph, InvalidationTarget};
use crate::domain::entities::{ResourceKind, Route};
use crate::infrastructure::api::ApiRequest;

pub const LISTINGS: &str = "__listings";
pub const LIST_BY_ID: &str = "__listById";

pub fn listings(page: u32) -> ApiRequest {
    ApiRequest::get("/listings").with_query("page", page)
}

pub fn list_by_id(id: &str) -> ApiRequest {
    ApiRequest::get(format!("/listings/{}", id))
}

pub fn create(body: Value) -> ApiRequest {
    ApiRequest::post("/listings", body)
}

pub fn update(id: &str, body: Value) -> ApiRequest {
    ApiRequest::put(format!("/listings/{}", id), body)
}

pub fn delete(id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/listings/{}", id))
}

pub fn create_profile() -> OperationProfile {
    OperationProfile::new("createdListing", "Listing created")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Listing))
        .navigate(Route::Listings)
}

pub fn update_profile() -> OperationProfile {
    OperationProfile::new("updatedListing", "Listing updated")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Listing))
}

pub fn delete_profile() -> OperationProfile {
    OperationProfile::new("deletedListing", "Listing deleted")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Listing))
        .refetch_stale()
}

pub(super) fn register(graph: &mut InvalidationGraph) {
    graph.register(ResourceKind::Listing, &[LISTINGS, LIST_BY_ID]);
}
