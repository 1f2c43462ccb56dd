//! # Capability Masks
//!
//! A behaviour advertises what it can do as a bitmask of up to 64
//! capabilities. Interface-style queries become a mask test.

use std::ops::BitOr;

/// Set of capability bits (0-63).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CapabilitySet(u64);

impl CapabilitySet {
    /// No capabilities. Every set satisfies it.
    pub const EMPTY: Self = Self(0);

    /// A set holding the single capability `bit`.
    ///
    /// # Panics
    ///
    /// Panics if `bit >= 64`.
    #[inline]
    #[must_use]
    pub const fn of(bit: u8) -> Self {
        assert!(bit < 64, "capability bit must be below 64");
        Self(1 << bit)
    }

    /// This set plus capability `bit`.
    ///
    /// # Panics
    ///
    /// Panics if `bit >= 64`.
    #[inline]
    #[must_use]
    pub const fn with(self, bit: u8) -> Self {
        self.union(Self::of(bit))
    }

    /// Union of two sets.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether capability `bit` is in this set.
    #[inline]
    #[must_use]
    pub const fn contains(self, bit: u8) -> bool {
        bit < 64 && (self.0 & (1 << bit)) != 0
    }

    /// Whether this set provides every capability in `required`.
    #[inline]
    #[must_use]
    pub const fn satisfies(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Whether the set is empty.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw mask.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u64 {
        self.0
    }
}

impl BitOr for CapabilitySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}
