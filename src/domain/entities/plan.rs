use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of the merchant's plan, compared by exact string equality
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanKey(String);

impl PlanKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlanKey {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Business vertical a plan belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vertical {
    Retail,
    Wholesale,
    HotelsAndApartments,
    RealEstate,
    FoodMart,
}

/// Plan key strings per vertical, injected at deploy time
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanKeys {
    pub retail: PlanKey,
    pub wholesale: PlanKey,
    pub hotels_and_apartments: PlanKey,
    pub real_estate: PlanKey,
    pub food_mart: PlanKey,
}

impl Default for PlanKeys {
    fn default() -> Self {
        Self {
            retail: PlanKey::new("RETAIL"),
            wholesale: PlanKey::new("WHOLESALE"),
            hotels_and_apartments: PlanKey::new("HOTELSANDAPARTMENTS"),
            real_estate: PlanKey::new("REALESTATE"),
            food_mart: PlanKey::new("FOODMART"),
        }
    }
}

impl PlanKeys {
    pub fn key_for(&self, vertical: Vertical) -> &PlanKey {
        match vertical {
            Vertical::Retail => &self.retail,
            Vertical::Wholesale => &self.wholesale,
            Vertical::HotelsAndApartments => &self.hotels_and_apartments,
            Vertical::RealEstate => &self.real_estate,
            Vertical::FoodMart => &self.food_mart,
        }
    }

    /// Vertical whose key equals `key`, if any
    pub fn vertical_of(&self, key: &PlanKey) -> Option<Vertical> {
        [
            Vertical::Retail,
            Vertical::Wholesale,
            Vertical::HotelsAndApartments,
            Vertical::RealEstate,
            Vertical::FoodMart,
        ]
        .into_iter()
        .find(|v| self.key_for(*v) == key)
    }
}
