//! Food mart menus

use serde_json::Value;

use crate::application::dispatch::OperationProfile;
use crate::application::query::{InvalidationGraph, InvalidationTarget};
use crate::domain::entities::{ResourceKind, Route};
use crate::infrastructure::api::ApiRequest;

pub const MENUS: &str = "__foodMenus";
pub const MENU_BY_ID: &str = "__foodMenuById";

pub fn menus() -> ApiRequest {
    ApiRequest::get("/food-mart/menus")
}

pub fn menu_by_id(id: &str) -> ApiRequest {
    ApiRequest::get(format!("/food-mart/menus/{}", id))
}

pub fn create(body: Value) -> ApiRequest {
    ApiRequest::post("/food-mart/menus", body)
}

pub fn update(id: &str, body: Value) -> ApiRequest {
    ApiRequest::put(format!("/food-mart/menus/{}", id), body)
}

pub fn delete(id: &str) -> ApiRequest {
    ApiRequest::delete(format!("/food-mart/menus/{}", id))
}

pub fn create_profile() -> OperationProfile {
    OperationProfile::new("createdMenu", "Menu item added")
        .invalidate(InvalidationTarget::Resource(ResourceKind::FoodMenu))
        .navigate(Route::FoodMartMenu)
}

pub fn update_profile() -> OperationProfile {
    OperationProfile::new("updatedMenu", "Menu item updated")
        .invalidate(InvalidationTarget::Resource(ResourceKind::FoodMenu))
}

pub fn delete_profile() -> OperationProfile {
    OperationProfile::new("deletedMenu", "Menu item removed")
        .invalidate(InvalidationTarget::Resource(ResourceKind::FoodMenu))
}

pub(super) fn register(graph: &mut InvalidationGraph) {
    graph.register(ResourceKind::FoodMenu, &[MENUS, MENU_BY_ID]);
}
