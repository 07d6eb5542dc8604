//! Hotel and apartment reservations

use serde_json::json;

use crate::application::dispatch::OperationProfile;
use crate::application::query::{InvalidationGraph, InvalidationTarget};
use crate::domain::entities::ResourceKind;
use crate::infrastructure::api::ApiRequest;

pub const RESERVATIONS: &str = "__reservations";
pub const RESERVATION_BY_ID: &str = "__reservationById";

pub fn reservations(status: Option<&str>) -> ApiRequest {
    let request = ApiRequest::get("/reservations");
    match status {
        Some(status) => request.with_query("status", status),
        None => request,
    }
}

pub fn reservation_by_id(id: &str) -> ApiRequest {
    ApiRequest::get(format!("/reservations/{}", id))
}

pub fn update_status(id: &str, status: &str) -> ApiRequest {
    ApiRequest::put(
        format!("/reservations/{}/status", id),
        json!({ "status": status }),
    )
}

pub fn update_status_profile() -> OperationProfile {
    OperationProfile::new("updatedReservation", "Reservation updated")
        .invalidate(InvalidationTarget::Resource(ResourceKind::Reservation))
}

pub(super) fn register(graph: &mut InvalidationGraph) {
    graph.register(ResourceKind::Reservation, &[RESERVATIONS, RESERVATION_BY_ID]);
}
