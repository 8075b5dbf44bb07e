use std::fmt;

/// Fixed-width set of 32 bits, used for component and group membership masks.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BitSet32(u32);

impl BitSet32 {
    pub const CAPACITY: usize = u32::BITS as usize;

    pub const fn new() -> Self {
        Self(0)
    }

    /// Returns the bit at `index`. Out of range indices are never set.
    #[inline]
    pub const fn get(self, index: usize) -> bool {
        index < Self::CAPACITY && self.0 & (1 << index) != 0
    }

    /// Sets the bit at `index`, returning its previous value.
    ///
    /// ## Panics
    /// Panics if `index` is out of range.
    #[inline]
    pub fn set(&mut self, index: usize) -> bool {
        assert!(index < Self::CAPACITY, "bit index {index} out of range");
        let previous = self.get(index);
        self.0 |= 1 << index;
        previous
    }

    /// Clears the bit at `index`, returning its previous value.
    ///
    /// ## Panics
    /// Panics if `index` is out of range.
    #[inline]
    pub fn clear(&mut self, index: usize) -> bool {
        assert!(index < Self::CAPACITY, "bit index {index} out of range");
        let previous = self.get(index);
        self.0 &= !(1 << index);
        previous
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Iterates over the indices of all set bits, lowest first.
    pub fn iter(self) -> impl Iterator<Item = usize> {
        (0..Self::CAPACITY).filter(move |&index| self.get(index))
    }
}

impl fmt::Debug for BitSet32 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitSet32({:#034b})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::BitSet32;

    #[test]
    fn set_and_clear_report_previous_state() {
        let mut bits = BitSet32::new();
        assert!(bits.is_empty());

        assert!(!bits.set(0));
        assert!(bits.set(0));
        assert!(!bits.set(31));
        assert_eq!(bits.count(), 2);
        assert_eq!(bits.iter().collect::<Vec<_>>(), vec![0, 31]);

        assert!(bits.clear(0));
        assert!(!bits.clear(0));
        assert!(bits.get(31));
        assert!(!bits.get(32));
        assert_eq!(bits.bits(), 1 << 31);
    }

    #[test]
    #[should_panic]
    fn out_of_range_set_panics() {
        BitSet32::new().set(32);
    }
}
