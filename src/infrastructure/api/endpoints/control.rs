//! Admin-side listing moderation under `/control`

use serde_json::json;

use crate::application::dispatch::OperationProfile;
use crate::application::query::{InvalidationGraph, InvalidationTarget};
use crate::domain::entities::ResourceKind;
use crate::infrastructure::api::ApiRequest;

pub const PENDING_LISTINGS: &str = "__controlListings";
pub const LISTING_BY_ID: &str = "__controlListById";

pub fn pending_listings(page: u32) -> ApiRequest {
    ApiRequest::get("/control/listings").with_query("page", page)
}

pub fn listing_by_id(id: &str) -> ApiRequest {
    ApiRequest::get(format!("/control/listings/{}", id))
}

pub fn approve_listing(id: &str) -> ApiRequest {
    ApiRequest::put(format!("/control/listings/{}/approve", id), json!({}))
}

pub fn reject_listing(id: &str, reason: &str) -> ApiRequest {
    ApiRequest::put(
        format!("/control/listings/{}/reject", id),
        json!({ "reason": reason }),
    )
}

pub fn approve_profile() -> OperationProfile {
    OperationProfile::new("approvedListing", "Listing approved")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Listing))
        .refetch_stale()
}

pub fn reject_profile() -> OperationProfile {
    OperationProfile::new("rejectedListing", "Listing rejected")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Listing))
        .refetch_stale()
}

pub(super) fn register(graph: &mut InvalidationGraph) {
    graph.register(ResourceKind::Listing, &[PENDING_LISTINGS, LISTING_BY_ID]);
}
