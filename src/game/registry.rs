//! Component Registry
//!
//! Assigns each component kind one bit of the entity bitmask. Assignment is
//! first-registered-first-served, ascending from bit 0, and permanent: there
//! is no de-registration. Capacity is the width of [`Bitmask`].

use std::fmt::Debug;

use super::error::{EcsError, Pool};

/// Set of component kinds, one bit per registered kind.
pub type Bitmask = u16;

/// Number of component kinds a registry can hold.
pub const MAX_COMPONENT_KINDS: usize = Bitmask::BITS as usize;

/// Maps component kinds to bit positions.
///
/// Generic over the key so the registry does not care what a "kind" is;
/// the world uses [`ComponentKind`](super::component::ComponentKind).
#[derive(Debug, Clone)]
pub struct ComponentRegistry<K> {
    /// Registered kinds; the position in this list is the kind's bit
    slots: Vec<K>,
}

impl<K: Copy + Eq + Debug> ComponentRegistry<K> {
    pub fn new() -> Self {
        Self { slots: Vec::with_capacity(MAX_COMPONENT_KINDS) }
    }

    /// Register a kind and return its bit. Idempotent.
    pub fn register(&mut self, kind: K) -> Result<u8, EcsError> {
        if let Some(bit) = self.position(kind) {
            return Ok(bit);
        }
        if self.slots.len() == MAX_COMPONENT_KINDS {
            return Err(EcsError::CapacityExceeded {
                pool: Pool::ComponentKinds,
                capacity: MAX_COMPONENT_KINDS,
            });
        }
        self.slots.push(kind);
        Ok((self.slots.len() - 1) as u8)
    }

    /// Bit position of a registered kind.
    pub fn bit_of(&self, kind: K) -> Result<u8, EcsError> {
        self.position(kind)
            .ok_or_else(|| EcsError::UnknownComponent(format!("{:?}", kind)))
    }

    /// `1 << bit` for a single registered kind.
    pub fn bitmask_for(&self, kind: K) -> Result<Bitmask, EcsError> {
        Ok(1 << self.bit_of(kind)?)
    }

    /// Union of the masks of every given kind. All must be registered.
    pub fn bitmask_for_all(&self, kinds: &[K]) -> Result<Bitmask, EcsError> {
        kinds
            .iter()
            .try_fold(0, |mask, &kind| Ok(mask | self.bitmask_for(kind)?))
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    fn position(&self, kind: K) -> Option<u8> {
        self.slots.iter().position(|&k| k == kind).map(|p| p as u8)
    }
}

impl<K: Copy + Eq + Debug> Default for ComponentRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}
