//! Navigation gating by merchant plan

pub mod plan_gate;

pub use plan_gate::{is_allowed, GateState, PlanGate};
