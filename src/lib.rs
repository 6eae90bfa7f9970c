// ABOUTME: Library root for dockhand - a relationship-driven Docker lifecycle adapter.
// ABOUTME: The orchestration host links this crate and invokes one operation per transition.

pub mod build_context;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod lifecycle;
pub mod state;
pub mod types;

pub use error::{Error, Result};
