//! The Elysion entity component system implementation
//!
//! Entities are owned by an [`EntityManager`] and referred to by cheap [`Entity`] handles. Each
//! entity owns a set of boxed [`Component`]s (at most one per type), which get their `update` and
//! `draw` hooks invoked once per frame. Entities can also be tagged with up to 32 [`Group`]s,
//! which are indexed by the manager for fast bulk queries.
//!
//! ## Deferred destruction
//! Destroying an entity only tombstones it. The entity stays in storage, keeps being dispatched
//! (unless configured otherwise) and keeps showing up in group queries, until the next call to
//! [`EntityManager::refresh`] purges it. After that, its handle is stale and every lookup
//! with it fails with [`EcsError::StaleEntity`].
//!
//! ## Example
//! ```
//! use elysion_ecs::{Component, EntityAccessorMut, EntityManager, Group};
//!
//! struct Health(u32);
//! impl Component for Health {}
//!
//! struct Poison;
//! impl Component for Poison {
//!     fn update(&mut self, ctx: &mut EntityAccessorMut<'_>, _dt: f32) {
//!         let health = ctx.get_component_mut::<Health>().unwrap();
//!         health.0 = health.0.saturating_sub(10);
//!         if health.0 == 0 {
//!             ctx.destroy();
//!         }
//!     }
//! }
//!
//! let enemies = Group::new(1).unwrap();
//! let mut manager = EntityManager::new();
//!
//! let goblin = manager.add_entity();
//! let mut accessor = manager.entity_mut(goblin).unwrap();
//! accessor.add_component(Health(10)).unwrap();
//! accessor.add_component(Poison).unwrap();
//! accessor.add_group(enemies);
//!
//! manager.update(1.0 / 60.0);
//! assert!(!manager.entity(goblin).unwrap().is_alive());
//! assert_eq!(manager.get_entities_by_group(enemies).len(), 1);
//!
//! manager.refresh();
//! assert!(manager.get_entities_by_group(enemies).is_empty());
//! assert!(manager.entity(goblin).is_err());
//! ```

use elysion_utils::PoolHandle;
use std::{any::Any, fmt, num::NonZeroU32};

#[doc(inline)]
pub use accessor::*;
mod accessor;

#[doc(inline)]
pub use bits::*;
mod bits;

#[doc(inline)]
pub use config::*;
mod config;

#[doc(inline)]
pub use entity::*;
mod entity;

#[doc(inline)]
pub use error::*;
mod error;

#[doc(inline)]
pub use group::*;
mod group;

#[doc(inline)]
pub use manager::*;
mod manager;

#[doc(inline)]
pub use registry::*;
mod registry;

/// Maximum amount of distinct component types a single [`TypeRegistry`] can hold.
pub const MAX_COMPONENTS: usize = BitSet32::CAPACITY;

/// Maximum amount of groups. Valid group ids are `0..MAX_GROUPS`.
pub const MAX_GROUPS: usize = BitSet32::CAPACITY;

/// An entity handle. It's very cheap to copy (2x32-bit values)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Entity {
    /// The entity's slot index within the manager's entity pool.
    pub index: u32,
    /// The entity's generation number. It's never reused, even across managers.
    pub generation: NonZeroU32,
}

impl From<PoolHandle> for Entity {
    fn from(handle: PoolHandle) -> Self {
        Self {
            index: handle.index,
            generation: handle.generation,
        }
    }
}

impl From<Entity> for PoolHandle {
    fn from(entity: Entity) -> Self {
        Self {
            index: entity.index,
            generation: entity.generation,
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

/// A unit of entity behavior.
///
/// Both hooks are no-ops by default. The `ctx` accessor refers to the component's owning entity,
/// and can be used to look up sibling components. The component being dispatched is detached from
/// its entity for the duration of the call, so it can't look itself up through `ctx`.
pub trait Component: AsAny {
    /// Per-frame mutation hook.
    fn update(&mut self, _ctx: &mut EntityAccessorMut<'_>, _dt: f32) {}

    /// Per-frame render hook.
    fn draw(&mut self, _ctx: &mut EntityAccessorMut<'_>) {}
}

/// Helper trait for downcasting boxed components.
///
/// It's implemented for every `'static` type, so component implementations don't have to care.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self as &dyn Any
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self as &mut dyn Any
    }
}
