//! Infrastructure layer - External concerns
//! 
//! This layer contains:
//! - Config: Configuration loading
//! - Api: Remote endpoint bindings and HTTP transport
//! - Adapters: Notification and navigation sinks (console, memory)

pub mod adapters;
pub mod api;
pub mod config;
