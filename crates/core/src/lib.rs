//! `toolfleet-core`: shared building blocks for the tool-fleet crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod entity;
pub mod error;
pub mod id;
pub mod math;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{CostCenterId, CrewId, ProjectId, RuleId, ToolId};
