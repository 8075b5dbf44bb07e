use crate::{
    entity::EntityData, group::GroupIndex, BitSet32, Component, EcsConfig, EcsResult, Entity,
    EntityState, Group, TypeRegistry,
};
use log::*;

/// Wrapper for reading a single entity inside an [`EntityManager`](crate::EntityManager).
pub struct EntityAccessor<'m> {
    pub(crate) registry: &'m TypeRegistry,
    pub(crate) data: &'m EntityData,
}

impl<'m> EntityAccessor<'m> {
    pub fn entity(&self) -> Entity {
        self.data.handle()
    }

    pub fn state(&self) -> EntityState {
        self.data.state()
    }

    pub fn is_alive(&self) -> bool {
        self.data.is_alive()
    }

    pub fn has_component<T: Component>(&self) -> bool {
        self.data.has_component::<T>(&*self.registry)
    }

    /// Returns the attached component of type `T`.
    ///
    /// ## Errors
    /// [`EcsError::MissingComponent`](crate::EcsError::MissingComponent) if the entity has no `T`.
    pub fn get_component<T: Component>(&self) -> EcsResult<&'m T> {
        self.data.get_component(&*self.registry)
    }

    pub fn component_count(&self) -> usize {
        self.data.component_count()
    }

    pub fn has_group(&self, group: Group) -> bool {
        self.data.has_group(group)
    }

    pub fn groups(&self) -> BitSet32 {
        self.data.group_bits()
    }

    /// Returns the ids of all attached component types, as registered in
    /// [`EntityManager::registry`](crate::EntityManager::registry).
    pub fn component_ids(&self) -> BitSet32 {
        self.data.component_bits()
    }
}

/// Same as [`EntityAccessor`], but allows for mutation.
///
/// Components receive one of these in their `update` and `draw` hooks, referring to their owner.
pub struct EntityAccessorMut<'m> {
    pub(crate) config: &'m EcsConfig,
    pub(crate) registry: &'m mut TypeRegistry,
    pub(crate) groups: &'m mut GroupIndex,
    pub(crate) data: &'m mut EntityData,
}

impl<'m> EntityAccessorMut<'m> {
    pub fn entity(&self) -> Entity {
        self.data.handle()
    }

    pub fn state(&self) -> EntityState {
        self.data.state()
    }

    pub fn is_alive(&self) -> bool {
        self.data.is_alive()
    }

    /// Marks the entity as dead. It stays in storage and in its groups until the manager is
    /// refreshed. Calling this more than once has no further effect.
    pub fn destroy(&mut self) {
        if self.data.is_alive() {
            trace!("Tombstoning entity {}", self.data.handle());
        }
        self.data.destroy();
    }

    /// Attaches `value` to the entity, returning a reference to the attached component.
    ///
    /// ## Errors
    ///  - [`EcsError::DuplicateComponent`](crate::EcsError::DuplicateComponent) if the entity
    ///    already has a `T`. The existing component is left untouched.
    ///  - [`EcsError::TooManyComponentTypes`](crate::EcsError::TooManyComponentTypes) if `T` is a
    ///    new type and the registry is full.
    pub fn add_component<T: Component>(&mut self, value: T) -> EcsResult<&mut T> {
        self.data.add_component(&mut *self.registry, value)
    }

    pub fn has_component<T: Component>(&self) -> bool {
        self.data.has_component::<T>(&*self.registry)
    }

    /// Returns the attached component of type `T`.
    ///
    /// ## Errors
    ///  - [`EcsError::MissingComponent`](crate::EcsError::MissingComponent) if the entity has no `T`
    ///  - [`EcsError::ComponentInUse`](crate::EcsError::ComponentInUse) if `T` is the component
    ///    currently being dispatched
    pub fn get_component<T: Component>(&self) -> EcsResult<&T> {
        self.data.get_component(&*self.registry)
    }

    /// Like [`Self::get_component`], but returns a mutable reference.
    pub fn get_component_mut<T: Component>(&mut self) -> EcsResult<&mut T> {
        self.data.get_component_mut(&*self.registry)
    }

    pub fn component_count(&self) -> usize {
        self.data.component_count()
    }

    /// Adds the entity to `group`, making it show up in the manager's group list right away.
    ///
    /// Adding an entity to a group it's already in appends a second entry to the group list.
    pub fn add_group(&mut self, group: Group) {
        let entity = self.data.handle();
        if self.data.set_group(group) && self.config.warn_duplicate_groups {
            warn!("Entity {entity} added to group {group} twice, the group list will contain duplicates");
        }
        self.groups.push(group, entity);
    }

    /// Removes the entity from `group`. The manager's group list keeps the entity until the next
    /// refresh.
    pub fn remove_group(&mut self, group: Group) {
        self.data.clear_group(group);
    }

    pub fn has_group(&self, group: Group) -> bool {
        self.data.has_group(group)
    }

    pub fn groups(&self) -> BitSet32 {
        self.data.group_bits()
    }

    /// Downgrades this accessor to a read-only one.
    pub fn as_accessor(&self) -> EntityAccessor<'_> {
        EntityAccessor {
            registry: &*self.registry,
            data: &*self.data,
        }
    }
}
