// ABOUTME: Instance and relationship model at the orchestration-host boundary.
// ABOUTME: Declared properties are read-only; runtime properties persist across operations.

mod instance;
mod relationship;

pub use instance::{NodeInstance, RuntimeProperties};
pub use relationship::{Relationship, RelationshipKind};
