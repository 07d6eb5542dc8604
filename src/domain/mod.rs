//! Domain layer - Core business logic with no external dependencies
//! 
//! This layer contains:
//! - Entities: Query keys, envelopes, notifications, plans, routes, money
//! - Traits: Abstractions for infrastructure (Notifier, Navigator)

pub mod entities;
pub mod traits;
