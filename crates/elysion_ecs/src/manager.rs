use crate::{
    entity::EntityData, group::GroupIndex, Component, EcsConfig, EcsError, EcsResult, Entity,
    EntityAccessor, EntityAccessorMut, EntityState, Group, TypeRegistry,
};
use elysion_utils::Pool;
use log::*;

/// Summary of a single [`EntityManager::refresh`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefreshReport {
    /// How many tombstoned entities were purged.
    pub purged: usize,
    /// How many group list entries were dropped, either because the entity was dead or because
    /// it left the group.
    pub dropped_group_entries: usize,
}

/// Owns all entities, and drives their per-frame dispatch.
///
/// A frame is expected to look like this:
///  1. compose entities (add entities, components and groups)
///  2. call [`EntityManager::update`] and [`EntityManager::draw`]
///  3. call [`EntityManager::refresh`] to purge entities destroyed along the way
pub struct EntityManager {
    config: EcsConfig,
    registry: TypeRegistry,

    pool: Pool<EntityData>,
    /// Handles of all owned entities, in creation order. This is the dispatch order.
    entities: Vec<Entity>,

    groups: GroupIndex,
}

impl EntityManager {
    pub fn new() -> Self {
        Self::with_config(EcsConfig::default())
    }

    pub fn with_config(config: EcsConfig) -> Self {
        debug!("Creating an entity manager with {config:?}");
        Self {
            registry: TypeRegistry::new(),
            pool: Pool::with_growth(config.pool_growth),
            entities: vec![],
            groups: GroupIndex::new(),
            config,
        }
    }

    pub fn config(&self) -> &EcsConfig {
        &self.config
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Creates a new, blank entity.
    ///
    /// The returned handle stays valid until the entity gets destroyed and purged by
    /// [`Self::refresh`], regardless of how many other entities are created in the meantime.
    pub fn add_entity(&mut self) -> Entity {
        let entity = Entity::from(
            self.pool
                .insert_with(|handle| EntityData::new(handle.into())),
        );
        self.entities.push(entity);

        trace!("Created entity {entity}");
        entity
    }

    /// Checks whether provided [`Entity`] constitutes a valid handle, i.e. it hasn't been purged.
    #[inline]
    pub fn is_valid(&self, entity: Entity) -> bool {
        self.pool.is_valid(entity.into())
    }

    /// Returns the lifecycle state of an entity. Stale handles report [`EntityState::Purged`].
    pub fn state(&self, entity: Entity) -> EntityState {
        self.pool
            .try_get(entity.into())
            .map(EntityData::state)
            .unwrap_or(EntityState::Purged)
    }

    /// Provides read access to a single entity.
    ///
    /// ## Errors
    /// [`EcsError::StaleEntity`] if the handle is no longer valid.
    pub fn entity(&self, entity: Entity) -> EcsResult<EntityAccessor<'_>> {
        let data = self
            .pool
            .try_get(entity.into())
            .ok_or(EcsError::StaleEntity(entity))?;

        Ok(EntityAccessor {
            registry: &self.registry,
            data,
        })
    }

    /// Provides write access to a single entity, for attaching components and groups.
    ///
    /// ## Errors
    /// [`EcsError::StaleEntity`] if the handle is no longer valid.
    pub fn entity_mut(&mut self, entity: Entity) -> EcsResult<EntityAccessorMut<'_>> {
        let Self {
            config,
            registry,
            pool,
            groups,
            ..
        } = self;

        let data = pool
            .try_get_mut(entity.into())
            .ok_or(EcsError::StaleEntity(entity))?;

        Ok(EntityAccessorMut {
            config,
            registry,
            groups,
            data,
        })
    }

    /// Appends `entity` to the list of `group`. Entries are never deduplicated.
    ///
    /// This only touches the group list. Unless the entity also has the group bit set (which
    /// [`EntityAccessorMut::add_group`] takes care of), the entry is dropped on the next refresh.
    pub fn add_to_group(&mut self, entity: Entity, group: Group) {
        self.groups.push(group, entity);
    }

    /// Returns the list of entities in `group`.
    ///
    /// Between refreshes, the list may contain entities that have been destroyed or removed from
    /// the group since they were added.
    pub fn get_entities_by_group(&self, group: Group) -> &[Entity] {
        self.groups.get(group)
    }

    /// Returns handles of all owned entities (including tombstoned ones), in creation order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Returns the amount of owned entities, including tombstoned ones.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Calls `update` on the components of every entity, in entity creation order.
    ///
    /// Tombstoned entities are included, unless [`EcsConfig::dispatch_tombstoned`] is off.
    pub fn update(&mut self, dt: f32) {
        self.dispatch(|component, ctx| component.update(ctx, dt));
    }

    /// Calls `draw` on the components of every entity, in the same order as [`Self::update`].
    pub fn draw(&mut self) {
        self.dispatch(|component, ctx| component.draw(ctx));
    }

    /// Purges tombstoned entities.
    ///
    /// First, every group list is filtered down to entities that are alive and still in that
    /// group. Then, every tombstoned entity is dropped from storage, along with its components.
    /// Handles to purged entities become stale.
    pub fn refresh(&mut self) -> RefreshReport {
        let Self {
            pool,
            entities,
            groups,
            ..
        } = self;

        let mut report = RefreshReport::default();

        for group in Group::all() {
            report.dropped_group_entries += groups.retain(group, |&entity| {
                pool.try_get(entity.into())
                    .map(|data| data.is_alive() && data.has_group(group))
                    .unwrap_or(false)
            });
        }

        entities.retain(|&entity| {
            let alive = pool
                .try_get(entity.into())
                .map(EntityData::is_alive)
                .unwrap_or(false);

            if !alive {
                pool.remove(entity.into());
                report.purged += 1;
                trace!("Purged entity {entity}");
            }

            alive
        });

        if report != RefreshReport::default() {
            debug!(
                "Refresh purged {} entities and {} group entries, {} entities remain",
                report.purged,
                report.dropped_group_entries,
                entities.len()
            );
        }

        report
    }

    fn dispatch(&mut self, mut hook: impl FnMut(&mut dyn Component, &mut EntityAccessorMut<'_>)) {
        let Self {
            config,
            registry,
            pool,
            entities,
            groups,
        } = self;

        for &entity in entities.iter() {
            let Some(data) = pool.try_get_mut(entity.into()) else {
                continue;
            };

            if !data.is_alive() && !config.dispatch_tombstoned {
                continue;
            }

            data.dispatch(config, registry, groups, &mut hook);
        }
    }
}

impl Default for EntityManager {
    fn default() -> Self {
        Self::new()
    }
}
