//! Game World
//!
//! The World is the central container for all simulation state:
//! - Component registry (kind -> bit)
//! - Entity allocation and lifetime tracking
//! - Per-entity bitmask plus component data, indexed by registry bit
//!
//! Destroy is immediate, not deferred: systems collect a query result up
//! front (a `Vec<Entity>`) so removing entities mid-loop never invalidates
//! an iterator.

use super::component::{Component, ComponentData, ComponentKind};
use super::entity::{Entity, EntityAllocator, MAX_ENTITIES};
use super::error::EcsError;
use super::registry::{Bitmask, ComponentRegistry, MAX_COMPONENT_KINDS};

/// Bitmask and component data for one entity slot.
///
/// Invariant: bit `b` is set in `mask` iff `data[b]` is `Some`.
#[derive(Debug, Clone, Default)]
struct EntityRecord {
    mask: Bitmask,
    data: [Option<Component>; MAX_COMPONENT_KINDS],
}

impl EntityRecord {
    fn clear(&mut self) {
        self.mask = 0;
        self.data = Default::default();
    }
}

/// The game world containing all entities and their components.
pub struct World {
    registry: ComponentRegistry<ComponentKind>,
    entities: EntityAllocator,
    records: Vec<EntityRecord>,
}

impl World {
    /// Create an empty world with the default entity capacity.
    pub fn new() -> Self {
        Self::with_capacity(MAX_ENTITIES)
    }

    /// Create an empty world with room for `capacity` live entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            registry: ComponentRegistry::new(),
            entities: EntityAllocator::with_capacity(capacity),
            records: vec![EntityRecord::default(); capacity],
        }
    }

    // =========================================================================
    // Registry
    // =========================================================================

    /// Register a component kind, returning its single-bit mask.
    pub fn register(&mut self, kind: ComponentKind) -> Result<Bitmask, EcsError> {
        Ok(1 << self.registry.register(kind)?)
    }

    /// Register every kind the game uses.
    pub fn register_all(&mut self) -> Result<(), EcsError> {
        for kind in ComponentKind::ALL {
            self.register(kind)?;
        }
        Ok(())
    }

    /// Combined mask of the given kinds.
    #[cfg(test)]
    pub fn bitmask_for(&self, kinds: &[ComponentKind]) -> Result<Bitmask, EcsError> {
        self.registry.bitmask_for_all(kinds)
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Create a new entity with an empty bitmask.
    pub fn create(&mut self) -> Result<Entity, EcsError> {
        let entity = self.entities.allocate()?;
        self.records[entity.index() as usize].clear();
        Ok(entity)
    }

    /// Immediately destroy an entity and all its components.
    /// Returns false (and does nothing) if the handle is already dead.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.entities.free(entity) {
            return false;
        }
        self.records[entity.index() as usize].clear();
        true
    }

    /// Check if an entity is currently alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Get the number of alive entities.
    #[cfg(test)]
    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.entities.capacity()
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attach a component, overwriting any previous value of the same kind.
    pub fn assign(&mut self, entity: Entity, component: impl Into<Component>) -> Result<(), EcsError> {
        let component = component.into();
        let bit = self.registry.bit_of(component.kind())?;
        let record = self.record_mut(entity)?;
        record.mask |= 1 << bit;
        record.data[bit as usize] = Some(component);
        Ok(())
    }

    /// Detach a component. No-op if the entity does not have it.
    pub fn unassign(&mut self, entity: Entity, kind: ComponentKind) -> Result<(), EcsError> {
        let bit = self.registry.bit_of(kind)?;
        let record = self.record_mut(entity)?;
        record.mask &= !(1 << bit);
        record.data[bit as usize] = None;
        Ok(())
    }

    /// Does the entity currently hold a component of this kind?
    pub fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        match (self.registry.bitmask_for(kind), self.record(entity)) {
            (Ok(bit), Ok(record)) => record.mask & bit != 0,
            _ => false,
        }
    }

    /// The entity's component bitmask.
    #[cfg(test)]
    pub fn mask(&self, entity: Entity) -> Result<Bitmask, EcsError> {
        Ok(self.record(entity)?.mask)
    }

    /// Typed read access. Query first: a missing component is an error.
    pub fn get<T: ComponentData>(&self, entity: Entity) -> Result<&T, EcsError> {
        let bit = self.registry.bit_of(T::KIND)?;
        self.record(entity)?.data[bit as usize]
            .as_ref()
            .and_then(T::from_component)
            .ok_or(EcsError::MissingComponent { entity, kind: T::KIND })
    }

    /// Typed write access. Query first: a missing component is an error.
    pub fn get_mut<T: ComponentData>(&mut self, entity: Entity) -> Result<&mut T, EcsError> {
        let bit = self.registry.bit_of(T::KIND)?;
        self.record_mut(entity)?.data[bit as usize]
            .as_mut()
            .and_then(T::from_component_mut)
            .ok_or(EcsError::MissingComponent { entity, kind: T::KIND })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every live entity holding all of `kinds`, in ascending index order.
    ///
    /// Full linear scan over the table. Systems rely on the stable order
    /// (e.g. "first entity with Position + Health" is the ship).
    pub fn query(&self, kinds: &[ComponentKind]) -> Result<Vec<Entity>, EcsError> {
        let wanted = self.registry.bitmask_for_all(kinds)?;
        Ok((0..self.records.len())
            .filter(|&index| self.records[index].mask & wanted == wanted)
            .filter_map(|index| self.entities.live_at(index))
            .collect())
    }

    /// First (lowest index) entity matching `kinds`.
    pub fn query_first(&self, kinds: &[ComponentKind]) -> Result<Option<Entity>, EcsError> {
        Ok(self.query(kinds)?.into_iter().next())
    }

    fn record(&self, entity: Entity) -> Result<&EntityRecord, EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::DeadEntity(entity));
        }
        Ok(&self.records[entity.index() as usize])
    }

    fn record_mut(&mut self, entity: Entity) -> Result<&mut EntityRecord, EcsError> {
        if !self.entities.is_alive(entity) {
            return Err(EcsError::DeadEntity(entity));
        }
        Ok(&mut self.records[entity.index() as usize])
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
impl World {
    /// Check the mask/data invariant for every slot.
    pub(crate) fn assert_consistent(&self) {
        for (index, record) in self.records.iter().enumerate() {
            for bit in 0..MAX_COMPONENT_KINDS {
                let flagged = record.mask & (1 << bit) != 0;
                assert_eq!(
                    flagged,
                    record.data[bit].is_some(),
                    "slot {index}: bit {bit} disagrees with stored data"
                );
            }
        }
    }
}
