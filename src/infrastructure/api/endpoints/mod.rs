//! Remote endpoint bindings, one module per resource

pub mod control;
pub mod food_mart;
pub mod listings;
pub mod offers;
pub mod reservations;
pub mod rooms;
pub mod service_types;
pub mod shop_account;

use serde_json::json;

use crate::application::query::InvalidationGraph;
use crate::domain::entities::QueryKey;
use super::ApiRequest;

/// Resource-to-read dependencies of every endpoint module
pub fn default_graph() -> InvalidationGraph {
    let mut graph = InvalidationGraph::new();
    control::register(&mut graph);
    listings::register(&mut graph);
    service_types::register(&mut graph);
    reservations::register(&mut graph);
    rooms::register(&mut graph);
    offers::register(&mut graph);
    food_mart::register(&mut graph);
    shop_account::register(&mut graph);
    graph
}

/// Request and cache key for a read operation.
///
/// `id` is the resource id for `ById` reads, the parent listing for rooms,
/// the status filter for reservations, and ignored elsewhere.
pub fn read(operation: &str, id: Option<&str>) -> Option<(QueryKey, ApiRequest)> {
    let keyed = |request: ApiRequest, id: &str| {
        Some((QueryKey::with_params(operation, json!({ "id": id })), request))
    };
    let plain = |request: ApiRequest| Some((QueryKey::new(operation), request));

    match (operation, id) {
        (control::PENDING_LISTINGS, _) => plain(control::pending_listings(1)),
        (control::LISTING_BY_ID, Some(id)) => keyed(control::listing_by_id(id), id),
        (listings::LISTINGS, _) => plain(listings::listings(1)),
        (listings::LIST_BY_ID, Some(id)) => keyed(listings::list_by_id(id), id),
        (service_types::SERVICE_TYPES, _) => plain(service_types::service_types()),
        (reservations::RESERVATIONS, Some(status)) => Some((
            QueryKey::with_params(operation, json!({ "status": status })),
            reservations::reservations(Some(status)),
        )),
        (reservations::RESERVATIONS, None) => plain(reservations::reservations(None)),
        (reservations::RESERVATION_BY_ID, Some(id)) => keyed(reservations::reservation_by_id(id), id),
        (rooms::ROOMS, Some(listing)) => keyed(rooms::rooms(listing), listing),
        (rooms::ROOM_BY_ID, Some(id)) => keyed(rooms::room_by_id(id), id),
        (offers::OFFERS, _) => plain(offers::offers()),
        (food_mart::MENUS, _) => plain(food_mart::menus()),
        (food_mart::MENU_BY_ID, Some(id)) => keyed(food_mart::menu_by_id(id), id),
        (shop_account::ACCOUNT, _) => plain(shop_account::account()),
        (shop_account::WITHDRAWALS, _) => plain(shop_account::withdrawals(1)),
        _ => None,
    }
}
