use crate::EcsResult;
use serde::Deserialize;
use std::num::NonZeroU32;

/// Tunables of an [`EntityManager`](crate::EntityManager).
///
/// Can be loaded from TOML, missing keys fall back to their defaults:
/// ```toml
/// pool_growth = 64
/// dispatch_tombstoned = false
/// warn_duplicate_groups = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EcsConfig {
    /// How many entity slots the entity pool grows by once it's full.
    pub pool_growth: NonZeroU32,

    /// Whether destroyed entities keep getting `update`/`draw` calls until the next refresh.
    pub dispatch_tombstoned: bool,

    /// Whether adding an entity to a group it's already in gets logged as a warning.
    ///
    /// The entity gets appended to the group list again either way.
    pub warn_duplicate_groups: bool,
}

impl Default for EcsConfig {
    fn default() -> Self {
        Self {
            pool_growth: NonZeroU32::new(16).unwrap(),
            dispatch_tombstoned: true,
            warn_duplicate_groups: true,
        }
    }
}

impl EcsConfig {
    /// Parses a configuration from a TOML document.
    pub fn from_toml_str(text: &str) -> EcsResult<Self> {
        Ok(toml::from_str(text)?)
    }
}
