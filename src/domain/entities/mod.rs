//! Domain entities - Core business objects with no external dependencies

pub mod envelope;
pub mod money;
pub mod notification;
pub mod plan;
pub mod query_key;
pub mod resource;
pub mod route;

pub use envelope::{is_truthy, Outcome, ResponseEnvelope};
pub use money::{Commission, Money};
pub use notification::{Level, Notification};
pub use plan::{PlanKey, PlanKeys, Vertical};
pub use query_key::QueryKey;
pub use resource::ResourceKind;
pub use route::{menu_for, MenuItem, Route, MENU};
