use serde_json::Value;

use super::listings;
use crate::application::dispatch::OperationProfile;
use crate::application::query::{InvalidationGraph, InvalidationTarget};
use crate::domain::entities::ResourceKind;
use crate::infrastructure::api::ApiRequest;

pub const ROOMS: &str = "__rooms";
pub const ROOM_BY_ID: &str = "__roomById";

pub fn rooms(listing_id: &str) -> ApiRequest {
    ApiRequest::get(format!("/listings/{}/rooms", listing_id))
}

pub fn room_by_id(id: &str) -> ApiRequest {
    ApiRequest::get(format!("/rooms/{}", id))
}

pub fn create(listing_id: &str, body: Value) -> ApiRequest {
    ApiRequest::post(format!("/listings/{}/rooms", listing_id), body)
}

pub fn update(id: &str, body: Value) -> ApiRequest {
    ApiRequest::put(format!("/rooms/{}", id), body)
}

pub fn delete(id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/rooms/{}", id))
}

pub fn create_profile() -> OperationProfile {
    OperationProfile::new("createdRoom", "Room added")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Room))
}

pub fn update_profile() -> OperationProfile {
    OperationProfile::new("updatedRoom", "Room updated")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Room))
}

pub fn delete_profile() -> OperationProfile {
    OperationProfile::new("deletedRoom", "Room removed")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Room))
}

pub(super) fn register(graph: &mut InvalidationGraph) {
    // a listing's detail view embeds its room count
    graph.register(ResourceKind::Room, &[ROOMS, ROOM_BY_ID, listings::LIST_BY_ID]);
}
