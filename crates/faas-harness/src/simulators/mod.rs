//! Individual adverse-condition simulators
//!
//! One module per condition. Each simulator is independently invocable
//! with explicit collaborator handles (RNG, memory pool), so tests can
//! drive them deterministically against private state; [`crate::Harness`]
//! composes them in its fixed orchestration order.

pub mod cache;
pub mod cold_start;
pub mod concurrency;
pub mod memory;
pub mod retry;
pub mod timeout;
