//! Writes against the remote API

pub mod executor;

pub use executor::{Mutation, MutationHandler, NoopHandler};
