//! The capability contract for values stored in a [`HashedTree`].
//!
//! [`HashedTree`]: crate::HashedTree

/// A value that can be stored in a [`HashedTree`].
///
/// The container sorts entries in ascending order of the key returned
/// by [`order_key`]. For a timer record this is typically the due
/// time; any totally ordered key type works.
///
/// # Contract
///
/// The key must be stable: `order_key()` must return the same value
/// for as long as the entry is stored. The container captures the key
/// once at insertion and locates the entry by it on removal; an entry
/// whose key drifts after insert becomes unremovable from the order
/// index, which trips a debug assertion.
///
/// Equal keys are allowed. The container retains every entry and
/// breaks ties by insertion order.
///
/// [`HashedTree`]: crate::HashedTree
/// [`order_key`]: TreeEntry::order_key
pub trait TreeEntry {
    /// The key entries are sorted by.
    type OrderKey: Ord + Clone;

    /// The current sort key of this entry.
    fn order_key(&self) -> Self::OrderKey;
}

impl<K: Ord + Clone, T> TreeEntry for (K, T) {
    type OrderKey = K;

    fn order_key(&self) -> K {
        self.0.clone()
    }
}
