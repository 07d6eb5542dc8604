//! Which cached reads a write makes stale

use std::collections::{BTreeSet, HashMap};

use crate::domain::entities::{QueryKey, ResourceKind};

/// What to mark stale after a write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationTarget {
    /// Exactly one cached read
    Key(QueryKey),
    /// Every params variant of one operation name
    Operation(String),
    /// Every operation registered for the resource in the graph
    Resource(ResourceKind),
    All,
}

impl InvalidationTarget {
    pub fn operation(name: impl Into<String>) -> Self {
        InvalidationTarget::Operation(name.into())
    }
}

/// Registered edges from a resource type to the query operations reading it
#[derive(Debug, Clone, Default)]
pub struct InvalidationGraph {
    edges: HashMap<ResourceKind, BTreeSet<String>>,
}

impl InvalidationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, resource: ResourceKind, operations: &[&str]) -> &mut Self {
        let set = self.edges.entry(resource).or_default();
        set.extend(operations.iter().map(|op| op.to_string()));
        self
    }

    /// Operation names affected by a change to `resource`
    pub fn operations(&self, resource: ResourceKind) -> Vec<&str> {
        self.edges
            .get(&resource)
            .map(|ops| ops.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_accumulates() {
        let mut graph = InvalidationGraph::new();
        graph
            .register(ResourceKind::Room, &["__rooms"])
            .register(ResourceKind::Room, &["__roomById", "__rooms"]);

        assert_eq!(graph.operations(ResourceKind::Room), vec!["__roomById", "__rooms"]);
        assert!(graph.operations(ResourceKind::Offer).is_empty());
    }
}
