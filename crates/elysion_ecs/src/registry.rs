use crate::{Component, EcsError, EcsResult, MAX_COMPONENTS};
use ahash::AHashMap;
use log::*;
use std::{any::TypeId, fmt};

/// Numeric identity of a component type, unique within its [`TypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ComponentId(u8);

impl ComponentId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Assigns [`ComponentId`]s to component types.
///
/// Ids are handed out on first registration, starting from 0 and increasing by one for every new
/// type. An id is never reassigned, and the registry holds at most [`MAX_COMPONENTS`] types.
///
/// Every [`EntityManager`](crate::EntityManager) owns its own registry, so two managers may number
/// the same types differently.
#[derive(Default)]
pub struct TypeRegistry {
    ids: AHashMap<TypeId, ComponentId>,
    names: Vec<&'static str>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `T`, registering the type if it's seen for the first time.
    ///
    /// ## Errors
    /// Fails with [`EcsError::TooManyComponentTypes`] if `T` is new and the registry is full. The
    /// registry is left unchanged in that case.
    pub fn register<T: Component>(&mut self) -> EcsResult<ComponentId> {
        if let Some(&id) = self.ids.get(&TypeId::of::<T>()) {
            return Ok(id);
        }

        if self.names.len() >= MAX_COMPONENTS {
            return Err(EcsError::too_many_types::<T>());
        }

        let id = ComponentId(self.names.len() as u8);
        let name = std::any::type_name::<T>();
        self.ids.insert(TypeId::of::<T>(), id);
        self.names.push(name);

        trace!("Registered component type `{name}` as #{id}");
        Ok(id)
    }

    /// Returns the id of `T`, if it was registered.
    #[inline]
    pub fn get<T: Component>(&self) -> Option<ComponentId> {
        self.ids.get(&TypeId::of::<T>()).copied()
    }

    /// Returns the name of the type registered under `id`.
    pub fn type_name(&self, id: ComponentId) -> Option<&'static str> {
        self.names.get(id.index()).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Distinct component type for every `N`, for filling up registries.
    pub(crate) struct Filler<const N: usize>;
    impl<const N: usize> Component for Filler<N> {}

    /// Registers `Filler<0>` up to `Filler<31>`.
    pub(crate) fn fill(registry: &mut TypeRegistry) {
        macro_rules! register_fillers {
            ($($n:literal)*) => {
                $( registry.register::<Filler<$n>>().unwrap(); )*
            };
        }

        register_fillers!(
            0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15
            16 17 18 19 20 21 22 23 24 25 26 27 28 29 30 31
        );
    }

    struct Position;
    impl Component for Position {}

    struct Velocity;
    impl Component for Velocity {}

    #[test]
    fn ids_are_assigned_in_registration_order() {
        let mut registry = TypeRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.get::<Position>(), None);

        let velocity = registry.register::<Velocity>().unwrap();
        let position = registry.register::<Position>().unwrap();
        assert_eq!(velocity.index(), 0);
        assert_eq!(position.index(), 1);

        // Repeated registrations are stable
        assert_eq!(registry.register::<Velocity>().unwrap(), velocity);
        assert_eq!(registry.get::<Position>(), Some(position));
        assert_eq!(registry.len(), 2);
        assert!(registry.type_name(position).unwrap().ends_with("Position"));
    }

    #[test]
    fn registries_are_independent() {
        let mut a = TypeRegistry::new();
        let mut b = TypeRegistry::new();

        a.register::<Position>().unwrap();
        a.register::<Velocity>().unwrap();
        b.register::<Velocity>().unwrap();

        assert_eq!(a.get::<Velocity>().unwrap().index(), 1);
        assert_eq!(b.get::<Velocity>().unwrap().index(), 0);
    }

    #[test]
    fn thirty_third_type_is_rejected() {
        let mut registry = TypeRegistry::new();
        fill(&mut registry);
        assert_eq!(registry.len(), MAX_COMPONENTS);

        // Already registered types still resolve
        assert_eq!(registry.register::<Filler<31>>().unwrap().index(), 31);

        let error = registry.register::<Filler<32>>().unwrap_err();
        assert!(matches!(
            error,
            EcsError::TooManyComponentTypes { limit: MAX_COMPONENTS, .. }
        ));
        assert_eq!(registry.len(), MAX_COMPONENTS);
        assert_eq!(registry.get::<Filler<32>>(), None);
    }
}
