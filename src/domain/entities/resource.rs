use std::fmt;

/// Kinds of backend resources a mutation can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Listing,
    ServiceType,
    Reservation,
    Room,
    Offer,
    FoodMenu,
    ShopAccount,
    Withdrawal,
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            ResourceKind::Listing => "listing",
            ResourceKind::ServiceType => "service_type",
            ResourceKind::Reservation => "reservation",
            ResourceKind::Room => "room",
            ResourceKind::Offer => "offer",
            ResourceKind::FoodMenu => "food_menu",
            ResourceKind::ShopAccount => "shop_account",
            ResourceKind::Withdrawal => "withdrawal",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
