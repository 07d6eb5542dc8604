//! Query cache accessor - cached reads with coalescing and invalidation

pub mod cache;
pub mod client;
pub mod dependencies;

pub use cache::{Fetcher, QueryCache, QueryEntry, QueryStatus};
pub use client::{QueryClient, QueryOptions, QueryResult};
pub use dependencies::{InvalidationGraph, InvalidationTarget};
