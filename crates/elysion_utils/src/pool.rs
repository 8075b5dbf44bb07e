use std::{
    num::NonZeroU32,
    sync::atomic::{AtomicU32, Ordering},
};

/// Source of generation numbers for every pool in the process.
static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

/// Untyped handle for a [`Pool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolHandle {
    pub index: u32,
    pub generation: NonZeroU32,
}

/// Generic pool implementation. Stores values of type `T` in stable slots, and allows accessing
/// them via dedicated handles. The handles include 32-bit index and generation counts, the latter
/// being used as a simple use-after-free test.
///
/// Generations are handed out from a single process-wide counter shared by all pools, so a handle
/// is never valid again once its entry has been removed, even if the slot index gets reused, and
/// a handle issued by one pool is never valid in another.
///
/// Note, this implementation isn't panic-proof. There are some conditions that can cause panics:
///  * overflowing the 32-bit index counter
///  * overflowing the 32-bit generation counter (reached after inserting over 4 294 967 294
///    entries total, across all pools)
///  * improper handle accesses in `get` or `get_mut` (`try_*` variants exist)
///
/// ## Example
/// ```
/// # use elysion_utils::Pool;
///
/// let mut pool: Pool<u32> = Pool::new();
///
/// // Insert a new pool element with a value of 10
/// let handle = pool.insert(10);
/// assert_eq!(*pool.get(handle), 10);
///
/// // Remove it - the handle becomes invalid
/// assert_eq!(pool.remove(handle), Some(10));
/// assert!(pool.try_get(handle).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool<T> {
    free_indices: Vec<u32>,
    slots: Vec<Slot<T>>,
    len: usize,

    /// The amount of slots the pool grows by once it runs out of free ones.
    growth_amount: NonZeroU32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Slot<T> {
    generation: Option<NonZeroU32>,
    value: Option<T>,
}

impl<T> Pool<T> {
    /// The default growth amount used by [`Pool::new`].
    pub const DEFAULT_GROWTH: NonZeroU32 = match NonZeroU32::new(10) {
        Some(n) => n,
        None => unreachable!(),
    };

    /// Creates a new pool.
    pub fn new() -> Self {
        Self::with_growth(Self::DEFAULT_GROWTH)
    }

    /// Creates a new pool, which grows by `growth_amount` slots at a time.
    /// Small `T` values should keep it high, big `T` values should keep it low.
    pub fn with_growth(growth_amount: NonZeroU32) -> Self {
        Self {
            free_indices: vec![],
            slots: vec![],
            len: 0,
            growth_amount,
        }
    }

    /// Inserts a new pool entry, fills it with `value`, and returns its handle.
    ///
    /// ## Panics
    ///  * On 32-bit index overflow
    ///  * On 32-bit generation overflow
    pub fn insert(&mut self, value: T) -> PoolHandle {
        self.insert_with(|_| value)
    }

    /// Like [`Pool::insert`], but builds the value from the handle it's going to be stored under.
    pub fn insert_with(&mut self, make: impl FnOnce(PoolHandle) -> T) -> PoolHandle {
        if self.free_indices.is_empty() {
            self.grow();
        }

        // grow() always leaves at least one free index behind
        let index = self.free_indices.pop().expect("pool has no free slots");

        let generation = NonZeroU32::new(NEXT_GENERATION.fetch_add(1, Ordering::Relaxed))
            .expect("pool generation overflow");

        let handle = PoolHandle { index, generation };
        let slot = &mut self.slots[index as usize];
        slot.generation = Some(generation);
        slot.value = Some(make(handle));
        self.len += 1;

        handle
    }

    /// Removes a specified pool entry, returning the held value. Returns [`None`] if the handle
    /// is invalid.
    pub fn remove(&mut self, handle: PoolHandle) -> Option<T> {
        if !self.is_valid(handle) {
            return None;
        }

        let slot = &mut self.slots[handle.index as usize];
        slot.generation = None;
        self.free_indices.push(handle.index);
        self.len -= 1;
        slot.value.take()
    }

    /// Returns an immutable reference to a specified pool entry.
    ///
    /// ## Panics
    /// Panics if the handle is invalid.
    pub fn get(&self, handle: PoolHandle) -> &T {
        self.try_get(handle).expect("invalid pool handle")
    }

    /// Returns an immutable reference to a specified pool entry. If the handle is invalid, [`None`]
    /// is returned.
    pub fn try_get(&self, handle: PoolHandle) -> Option<&T> {
        self.slots
            .get(handle.index as usize)
            .filter(|slot| slot.generation == Some(handle.generation))
            .and_then(|slot| slot.value.as_ref())
    }

    /// Returns a mutable reference to a specified pool entry.
    ///
    /// ## Panics
    /// Panics if the handle is invalid.
    pub fn get_mut(&mut self, handle: PoolHandle) -> &mut T {
        self.try_get_mut(handle).expect("invalid pool handle")
    }

    /// Returns a mutable reference to a specified pool entry. If the handle is invalid, [`None`]
    /// is returned.
    pub fn try_get_mut(&mut self, handle: PoolHandle) -> Option<&mut T> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|slot| slot.generation == Some(handle.generation))
            .and_then(|slot| slot.value.as_mut())
    }

    /// Verifies the validity of the specified handle.
    #[inline]
    pub fn is_valid(&self, handle: PoolHandle) -> bool {
        self.slots
            .get(handle.index as usize)
            .map(|slot| slot.generation == Some(handle.generation))
            .unwrap_or(false)
    }

    /// Returns how many pool entries are occupied.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn grow(&mut self) {
        let low_index = self.slots.len() as u32;
        let high_index = low_index
            .checked_add(self.growth_amount.get())
            .expect("pool index overflow");
        let growth_range = low_index..high_index;

        // Reverse index range, so that pop gets lowest entries
        self.free_indices.extend(growth_range.clone().rev());
        self.slots.extend(growth_range.map(|_| Slot {
            generation: None,
            value: None,
        }));
    }
}

impl<T> Default for Pool<T> {
    fn default() -> Self {
        Self::new()
    }
}
