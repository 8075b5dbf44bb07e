use crate::{Entity, MAX_COMPONENTS, MAX_GROUPS};

pub type EcsResult<T> = Result<T, EcsError>;

#[derive(Debug, thiserror::Error)]
pub enum EcsError {
    #[error("cannot register component type `{type_name}`, the limit of {limit} types is reached")]
    TooManyComponentTypes {
        limit: usize,
        type_name: &'static str,
    },

    #[error("group id {0} is out of range (must be below {})", MAX_GROUPS)]
    GroupOutOfRange(usize),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("entity {entity} already has a component of type `{type_name}`")]
    DuplicateComponent {
        entity: Entity,
        type_name: &'static str,
    },

    #[error("entity {entity} has no component of type `{type_name}`")]
    MissingComponent {
        entity: Entity,
        type_name: &'static str,
    },

    #[error("component `{type_name}` of entity {entity} is currently being dispatched")]
    ComponentInUse {
        entity: Entity,
        type_name: &'static str,
    },

    #[error("entity handle {0} is stale or doesn't belong to this manager")]
    StaleEntity(Entity),
}

impl EcsError {
    pub(crate) fn too_many_types<T>() -> Self {
        Self::TooManyComponentTypes {
            limit: MAX_COMPONENTS,
            type_name: std::any::type_name::<T>(),
        }
    }
}
