use crate::{EcsError, EcsResult, Entity, MAX_GROUPS};
use std::fmt;

/// A validated group id, in range `0..MAX_GROUPS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Group(u8);

impl Group {
    /// Creates a group id.
    ///
    /// ## Errors
    /// Fails with [`EcsError::GroupOutOfRange`] for ids that don't fit in a group bitset.
    pub fn new(id: usize) -> EcsResult<Self> {
        if id < MAX_GROUPS {
            Ok(Self(id as u8))
        } else {
            Err(EcsError::GroupOutOfRange(id))
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterates over every valid group id.
    pub fn all() -> impl Iterator<Item = Group> {
        (0..MAX_GROUPS as u8).map(Group)
    }
}

impl TryFrom<usize> for Group {
    type Error = EcsError;

    fn try_from(id: usize) -> EcsResult<Self> {
        Self::new(id)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Per-group lists of entity handles.
///
/// The lists are append-only between compactions, and may hold handles of dead entities, or of
/// entities that have since left the group.
pub(crate) struct GroupIndex {
    lists: [Vec<Entity>; MAX_GROUPS],
}

impl GroupIndex {
    pub fn new() -> Self {
        Self {
            lists: std::array::from_fn(|_| Vec::new()),
        }
    }

    #[inline]
    pub fn push(&mut self, group: Group, entity: Entity) {
        self.lists[group.index()].push(entity);
    }

    #[inline]
    pub fn get(&self, group: Group) -> &[Entity] {
        &self.lists[group.index()]
    }

    /// Keeps only the entries of `group` for which `keep` returns true, returning how many were
    /// dropped.
    pub fn retain(&mut self, group: Group, keep: impl FnMut(&Entity) -> bool) -> usize {
        let list = &mut self.lists[group.index()];
        let before = list.len();
        list.retain(keep);
        before - list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_ids_are_bounded() {
        assert_eq!(Group::new(0).unwrap().index(), 0);
        assert_eq!(Group::new(31).unwrap().index(), 31);
        assert!(matches!(Group::new(32), Err(EcsError::GroupOutOfRange(32))));
        assert!(Group::try_from(1000usize).is_err());
        assert_eq!(Group::all().count(), MAX_GROUPS);
    }
}
