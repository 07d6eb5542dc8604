//! Application layer - Use cases and business logic
//! 
//! This layer contains:
//! - Query: Cached reads with coalescing and invalidation
//! - Mutation: Triggered writes with lifecycle callbacks
//! - Dispatch: Response classification and notifications
//! - Gate: Plan-based navigation gating
//! - Errors: Application errors

pub mod dispatch;
pub mod errors;
pub mod gate;
pub mod mutation;
pub mod query;
