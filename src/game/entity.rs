//! Entity System with Generational Indices
//!
//! Entities are lightweight identifiers into a fixed-size slot table.
//! The generational index pattern prevents dangling references:
//! - Each entity slot has a generation counter
//! - When an entity is destroyed, its slot goes back to the free pool
//! - The generation increments on free, invalidating old handles
//!
//! Obstacles are created and destroyed constantly, so a handle to an
//! obstacle that was consumed by a collision must never alias the next
//! obstacle that lands in the same slot.

use std::fmt;

use super::error::{EcsError, Pool};

/// Maximum number of simultaneously alive entities.
pub const MAX_ENTITIES: usize = 100;

/// A unique identifier for a game entity.
///
/// Consists of an index (which slot in the entity table) and a generation
/// (which version of that slot). Two entities with the same index but
/// different generations are different entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// Index into the entity table
    index: u32,
    /// Generation counter - increments when the slot is freed
    generation: u32,
}

impl Entity {
    /// Create a new entity with the given index and generation.
    /// Should only be called by EntityAllocator.
    pub(crate) fn new(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Get the index of this entity (slot in the table, query order key).
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Get the generation of this entity.
    #[cfg(test)]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// Allocates and tracks entity lifetimes in a fixed-capacity pool.
///
/// Freed slots are reused last-in-first-out with incremented generations.
pub struct EntityAllocator {
    /// Generation counter for each slot
    generations: Vec<u32>,
    /// Whether each slot is currently handed out
    alive: Vec<bool>,
    /// Free slots available for reuse (LIFO)
    free_indices: Vec<u32>,
    /// Number of currently alive entities
    alive_count: u32,
}

impl EntityAllocator {
    /// Create an allocator with `capacity` slots, all free.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            generations: vec![0; capacity],
            alive: vec![false; capacity],
            // Reverse order so the first allocations hand out the lowest indices
            free_indices: (0..capacity as u32).rev().collect(),
            alive_count: 0,
        }
    }

    /// Allocate a new entity, or fail when every slot is alive.
    pub fn allocate(&mut self) -> Result<Entity, EcsError> {
        let index = self.free_indices.pop().ok_or(EcsError::CapacityExceeded {
            pool: Pool::Entities,
            capacity: self.capacity(),
        })?;
        self.alive[index as usize] = true;
        self.alive_count += 1;
        // Generation was already incremented on free
        Ok(Entity::new(index, self.generations[index as usize]))
    }

    /// Free an entity, making its slot available for reuse.
    /// Returns true if the entity was alive and is now freed.
    pub fn free(&mut self, entity: Entity) -> bool {
        if !self.is_alive(entity) {
            return false;
        }

        let idx = entity.index as usize;
        self.generations[idx] = self.generations[idx].wrapping_add(1);
        self.alive[idx] = false;
        self.free_indices.push(entity.index);
        self.alive_count -= 1;
        true
    }

    /// Check if an entity handle refers to a currently alive slot.
    pub fn is_alive(&self, entity: Entity) -> bool {
        let idx = entity.index as usize;
        idx < self.generations.len() && self.alive[idx] && self.generations[idx] == entity.generation
    }

    /// Handle for the live entity in slot `index`, if any.
    pub fn live_at(&self, index: usize) -> Option<Entity> {
        if *self.alive.get(index)? {
            Some(Entity::new(index as u32, self.generations[index]))
        } else {
            None
        }
    }

    /// Get the number of currently alive entities.
    #[cfg(test)]
    pub fn alive_count(&self) -> u32 {
        self.alive_count
    }

    /// Total number of slots.
    pub fn capacity(&self) -> usize {
        self.generations.len()
    }
}

impl Default for EntityAllocator {
    fn default() -> Self {
        Self::with_capacity(MAX_ENTITIES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_and_free() {
        let mut alloc = EntityAllocator::default();

        let e1 = alloc.allocate().unwrap();
        let e2 = alloc.allocate().unwrap();
        assert_eq!(alloc.alive_count(), 2);
        assert!(alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));

        assert!(alloc.free(e1));
        assert_eq!(alloc.alive_count(), 1);
        assert!(!alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));
    }

    #[test]
    fn test_first_allocations_are_ascending() {
        let mut alloc = EntityAllocator::with_capacity(4);
        let indices: Vec<u32> = (0..4).map(|_| alloc.allocate().unwrap().index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_generation_prevents_reuse_collision() {
        let mut alloc = EntityAllocator::default();

        let e1 = alloc.allocate().unwrap();
        let old_gen = e1.generation();
        alloc.free(e1);

        // Allocate again - LIFO reuse hands back slot 0 with a new generation
        let e2 = alloc.allocate().unwrap();
        assert_eq!(e2.index(), e1.index());
        assert_ne!(e2.generation(), old_gen);

        assert!(!alloc.is_alive(e1));
        assert!(alloc.is_alive(e2));
    }

    #[test]
    fn test_double_free_is_guarded() {
        let mut alloc = EntityAllocator::with_capacity(2);
        let e = alloc.allocate().unwrap();
        assert!(alloc.free(e));
        assert!(!alloc.free(e));

        // The pool must not contain the slot twice
        let a = alloc.allocate().unwrap();
        let b = alloc.allocate().unwrap();
        assert_ne!(a.index(), b.index());
        assert!(alloc.allocate().is_err());
    }

    #[test]
    fn test_capacity_exceeded() {
        let mut alloc = EntityAllocator::with_capacity(MAX_ENTITIES);
        for _ in 0..MAX_ENTITIES {
            alloc.allocate().unwrap();
        }
        assert_eq!(
            alloc.allocate(),
            Err(EcsError::CapacityExceeded { pool: Pool::Entities, capacity: MAX_ENTITIES })
        );
    }
}
