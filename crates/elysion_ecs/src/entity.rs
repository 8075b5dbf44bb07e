use crate::{
    group::GroupIndex, BitSet32, Component, ComponentId, EcsConfig, EcsError, EcsResult, Entity,
    EntityAccessorMut, Group, TypeRegistry, MAX_COMPONENTS,
};
use std::any::type_name;

/// Lifecycle state of an entity.
///
/// `Alive` entities become `Tombstoned` once destroyed, and `Purged` on the next refresh of their
/// manager. `Purged` is terminal and only ever reported for stale handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityState {
    Alive,
    Tombstoned,
    Purged,
}

struct ComponentSlot {
    id: ComponentId,
    /// Empty while the component is being dispatched.
    value: Option<Box<dyn Component>>,
}

/// Storage record of a single entity, owned by the entity pool of an
/// [`EntityManager`](crate::EntityManager).
pub(crate) struct EntityData {
    handle: Entity,
    alive: bool,
    components: Vec<ComponentSlot>,
    /// Maps component ids to indices in `components`.
    lookup: [Option<u8>; MAX_COMPONENTS],
    component_bits: BitSet32,
    group_bits: BitSet32,
}

impl EntityData {
    pub fn new(handle: Entity) -> Self {
        Self {
            handle,
            alive: true,
            components: vec![],
            lookup: [None; MAX_COMPONENTS],
            component_bits: BitSet32::new(),
            group_bits: BitSet32::new(),
        }
    }

    #[inline]
    pub fn handle(&self) -> Entity {
        self.handle
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn state(&self) -> EntityState {
        match self.alive {
            true => EntityState::Alive,
            false => EntityState::Tombstoned,
        }
    }

    /// Tombstones the entity. Nothing gets deallocated.
    #[inline]
    pub fn destroy(&mut self) {
        self.alive = false;
    }

    #[inline]
    pub fn has_group(&self, group: Group) -> bool {
        self.group_bits.get(group.index())
    }

    /// Sets the group bit, returning whether it was already set.
    #[inline]
    pub fn set_group(&mut self, group: Group) -> bool {
        self.group_bits.set(group.index())
    }

    #[inline]
    pub fn clear_group(&mut self, group: Group) {
        self.group_bits.clear(group.index());
    }

    #[inline]
    pub fn group_bits(&self) -> BitSet32 {
        self.group_bits
    }

    #[inline]
    pub fn component_bits(&self) -> BitSet32 {
        self.component_bits
    }

    #[inline]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    pub fn has_component<T: Component>(&self, registry: &TypeRegistry) -> bool {
        registry
            .get::<T>()
            .map(|id| self.component_bits.get(id.index()))
            .unwrap_or(false)
    }

    /// Attaches a new component of type `T`.
    ///
    /// ## Errors
    ///  - [`EcsError::DuplicateComponent`] if a `T` is already attached, in which case `value` is
    ///    dropped and the attached one is kept
    ///  - [`EcsError::TooManyComponentTypes`] if `T` can't be registered
    pub fn add_component<T: Component>(
        &mut self,
        registry: &mut TypeRegistry,
        value: T,
    ) -> EcsResult<&mut T> {
        if self.has_component::<T>(registry) {
            return Err(EcsError::DuplicateComponent {
                entity: self.handle,
                type_name: type_name::<T>(),
            });
        }

        let id = registry.register::<T>()?;

        self.lookup[id.index()] = Some(self.components.len() as u8);
        self.components.push(ComponentSlot {
            id,
            value: Some(Box::new(value)),
        });
        self.component_bits.set(id.index());

        self.get_component_mut::<T>(registry)
    }

    pub fn get_component<T: Component>(&self, registry: &TypeRegistry) -> EcsResult<&T> {
        let slot = self.slot::<T>(registry)?;
        let value = slot.value.as_deref().ok_or_else(|| self.in_use::<T>())?;

        // The slot was found by the id of `T`, so this can only fail on a registry mixup
        value
            .as_any()
            .downcast_ref::<T>()
            .ok_or_else(|| self.missing::<T>())
    }

    pub fn get_component_mut<T: Component>(&mut self, registry: &TypeRegistry) -> EcsResult<&mut T> {
        let Some(index) = self.slot_index::<T>(registry) else {
            return Err(self.missing::<T>());
        };

        let in_use = self.in_use::<T>();
        let missing = self.missing::<T>();
        self.components[index]
            .value
            .as_deref_mut()
            .ok_or(in_use)?
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or(missing)
    }

    /// Invokes `hook` on every attached component, in attach order.
    ///
    /// Each component is detached from its slot for the duration of its call, so that it can be
    /// handed an accessor to its own entity. Components attached during the pass aren't visited.
    pub fn dispatch(
        &mut self,
        config: &EcsConfig,
        registry: &mut TypeRegistry,
        groups: &mut GroupIndex,
        mut hook: impl FnMut(&mut dyn Component, &mut EntityAccessorMut<'_>),
    ) {
        for index in 0..self.components.len() {
            let Some(mut component) = self.components[index].value.take() else {
                continue;
            };

            let mut ctx = EntityAccessorMut {
                config,
                registry: &mut *registry,
                groups: &mut *groups,
                data: &mut *self,
            };
            hook(&mut *component, &mut ctx);

            self.components[index].value = Some(component);
        }
    }

    fn slot_index<T: Component>(&self, registry: &TypeRegistry) -> Option<usize> {
        let id = registry.get::<T>()?;
        let index = self.lookup[id.index()]? as usize;
        debug_assert_eq!(self.components[index].id, id);
        Some(index)
    }

    fn slot<T: Component>(&self, registry: &TypeRegistry) -> EcsResult<&ComponentSlot> {
        self.slot_index::<T>(registry)
            .map(|index| &self.components[index])
            .ok_or_else(|| self.missing::<T>())
    }

    fn missing<T>(&self) -> EcsError {
        EcsError::MissingComponent {
            entity: self.handle,
            type_name: type_name::<T>(),
        }
    }

    fn in_use<T>(&self) -> EcsError {
        EcsError::ComponentInUse {
            entity: self.handle,
            type_name: type_name::<T>(),
        }
    }
}
