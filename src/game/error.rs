//! ECS error taxonomy
//!
//! `CapacityExceeded` is recoverable (skip the action). The other variants
//! are precondition violations: a system asked for something it should have
//! queried for first.

use std::fmt;

use thiserror::Error;

use super::component::ComponentKind;
use super::entity::Entity;

/// Which fixed-size pool ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    Entities,
    ComponentKinds,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pool::Entities => write!(f, "entity"),
            Pool::ComponentKinds => write!(f, "component kind"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EcsError {
    #[error("capacity exceeded: all {capacity} {pool} slots are in use")]
    CapacityExceeded { pool: Pool, capacity: usize },

    #[error("component `{0}` was never registered")]
    UnknownComponent(String),

    #[error("entity {entity} has no {kind:?} component")]
    MissingComponent { entity: Entity, kind: ComponentKind },

    #[error("entity {0} is not alive (destroyed or stale handle)")]
    DeadEntity(Entity),
}

impl EcsError {
    /// Resource exhaustion rather than a programming error.
    pub fn is_capacity(&self) -> bool {
        matches!(self, EcsError::CapacityExceeded { .. })
    }
}
