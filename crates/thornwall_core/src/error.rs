//! # Core Error Types
//!
//! Caller misuse is surfaced as a typed failure and left to the calling
//! system to handle; absence of a component or entity is *not* an error
//! (those paths return `Option` or an empty result instead).

use crate::ecs::EntityId;
use thiserror::Error;

/// Errors that can occur in the core runtime.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreError {
    /// Operated on a destroyed or never-created entity handle.
    #[error("stale or destroyed entity handle {0}")]
    DeadEntity(EntityId),

    /// Added a component kind the entity already holds.
    ///
    /// Callers must `remove` first or use the `replace` variant.
    #[error("entity {entity} already holds component {component}")]
    DuplicateComponent {
        /// The entity that already holds the component.
        entity: EntityId,
        /// Name of the duplicated component kind.
        component: &'static str,
    },

    /// Inserted an id the spatial hash already tracks (use `update`).
    #[error("entity {0} is already tracked by the spatial hash")]
    AlreadyTracked(EntityId),
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
