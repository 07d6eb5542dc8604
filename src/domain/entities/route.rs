//! Client-side route table and navigation menu

use super::plan::{PlanKey, PlanKeys, Vertical};

/// Symbolic page identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Root,
    Products,
    Orders,
    WholesaleOrders,
    Listings,
    ListingCreate,
    Bookings,
    Reservations,
    Rooms,
    ServiceTypes,
    Offers,
    FoodMartMenu,
    ShopAccount,
    Withdrawals,
    ControlListings,
}

impl Route {
    pub const ALL: [Route; 15] = [
        Route::Root,
        Route::Products,
        Route::Orders,
        Route::WholesaleOrders,
        Route::Listings,
        Route::ListingCreate,
        Route::Bookings,
        Route::Reservations,
        Route::Rooms,
        Route::ServiceTypes,
        Route::Offers,
        Route::FoodMartMenu,
        Route::ShopAccount,
        Route::Withdrawals,
        Route::ControlListings,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Products => "/products",
            Route::Orders => "/orders",
            Route::WholesaleOrders => "/wholesale/orders",
            Route::Listings => "/listings",
            Route::ListingCreate => "/listings/create",
            Route::Bookings => "/bookings",
            Route::Reservations => "/reservations",
            Route::Rooms => "/rooms",
            Route::ServiceTypes => "/service-types",
            Route::Offers => "/offers",
            Route::FoodMartMenu => "/food-mart/menu",
            Route::ShopAccount => "/account",
            Route::Withdrawals => "/account/withdrawals",
            Route::ControlListings => "/control/listings",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }
}

/// Entry of the side navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub route: Route,
    pub label: &'static str,
    /// `None` means every plan sees the item
    pub vertical: Option<Vertical>,
}

const fn item(route: Route, label: &'static str, vertical: Option<Vertical>) -> MenuItem {
    MenuItem {
        route,
        label,
        vertical,
    }
}

pub const MENU: &[MenuItem] = &[
    item(Route::Root, "Dashboard", None),
    item(Route::Products, "Products", Some(Vertical::Retail)),
    item(Route::Orders, "Orders", Some(Vertical::Retail)),
    item(Route::WholesaleOrders, "Wholesale orders", Some(Vertical::Wholesale)),
    item(Route::Listings, "Listings", Some(Vertical::RealEstate)),
    item(Route::ListingCreate, "New listing", Some(Vertical::RealEstate)),
    item(Route::Bookings, "Bookings", Some(Vertical::HotelsAndApartments)),
    item(Route::Reservations, "Reservations", Some(Vertical::HotelsAndApartments)),
    item(Route::Rooms, "Rooms", Some(Vertical::HotelsAndApartments)),
    item(Route::ServiceTypes, "Service types", Some(Vertical::HotelsAndApartments)),
    item(Route::Offers, "Offers", None),
    item(Route::FoodMartMenu, "Menu", Some(Vertical::FoodMart)),
    item(Route::ShopAccount, "Account", None),
    item(Route::Withdrawals, "Withdrawals", None),
];

/// Menu items visible to a merchant on `current`
pub fn menu_for(current: &PlanKey, plans: &PlanKeys) -> Vec<&'static MenuItem> {
    MENU.iter()
        .filter(|item| match item.vertical {
            None => true,
            Some(v) => plans.key_for(v) == current,
        })
        .collect()
}
