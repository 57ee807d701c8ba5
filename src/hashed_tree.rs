//! HashedTree: one set of values behind a handle index and an order index.

use crate::entry::TreeEntry;
use crate::reentrancy::ReentrancyCheck;
use core::hash::BuildHasher;
use hashbrown::HashMap;
use std::collections::hash_map::RandomState;
use std::collections::BTreeSet;

/// Opaque identifier for an entry in a [`HashedTree`].
///
/// Handles are issued by [`HashedTree::add`] starting at 1 and strictly
/// increasing; 0 is never issued and no handle is reused after its
/// entry is removed. A handle carries no container identity: it is
/// only meaningful with the container that issued it.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Handle(u64);

impl Handle {
    pub(crate) fn new(id: u64) -> Self {
        Handle(id)
    }

    /// The numeric identity of this handle. Positive for every issued
    /// handle.
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// A container storing each value under two simultaneous indices: a
/// hash index keyed by [`Handle`] and an ordered index keyed by the
/// value's [`TreeEntry::order_key`].
///
/// `add` and `remove` are O(log n); `find` is O(1) average; `top` and
/// `pop` reach the minimum without scanning. Both indices are updated
/// within each mutating call, so they always agree between calls.
///
/// Absence is uniform: `find`, `remove`, `top`, and `pop` return
/// `None` for an unknown handle or an empty container, and nothing
/// panics or errors.
pub struct HashedTree<V: TreeEntry, S = RandomState> {
    /// Owns every stored value.
    entries: HashMap<Handle, V, S>,
    /// Owns a clone of each entry's sort key; resolves through `entries`.
    order: BTreeSet<(V::OrderKey, Handle)>,
    next_handle: u64,
    reentrancy: ReentrancyCheck,
}

impl<V: TreeEntry> HashedTree<V> {
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }
}

impl<V: TreeEntry> Default for HashedTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> HashedTree<V, S>
where
    V: TreeEntry,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            entries: HashMap::with_hasher(hasher),
            order: BTreeSet::new(),
            next_handle: 1, // handle 0 is never issued
            reentrancy: ReentrancyCheck::new(),
        }
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether `handle` currently resolves to a live entry.
    pub fn contains(&self, handle: Handle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Insert `value` into both indices and return its handle.
    ///
    /// The sort key is captured here; equal keys are retained and later
    /// extract in insertion order.
    pub fn add(&mut self, value: V) -> Handle {
        let _g = self.reentrancy.enter();
        let handle = Handle::new(self.next_handle);
        self.next_handle += 1;

        let key = value.order_key();
        let displaced = self.entries.insert(handle, value);
        debug_assert!(displaced.is_none(), "handle counter issued a duplicate");

        // Handles are unique, so the (key, handle) pair is fresh even
        // when the key ties an existing entry.
        let fresh = self.order.insert((key, handle));
        debug_assert!(fresh, "order index already held the new entry");

        handle
    }

    /// The live entry for `handle`, or `None` if it was never issued
    /// by this container or has been removed.
    pub fn find(&self, handle: Handle) -> Option<&V> {
        let _g = self.reentrancy.enter();
        self.entries.get(&handle)
    }

    /// Remove the entry for `handle` from both indices and return it.
    ///
    /// An unknown or stale handle returns `None` and leaves the
    /// container untouched. A removed handle never resolves again.
    pub fn remove(&mut self, handle: Handle) -> Option<V> {
        let _g = self.reentrancy.enter();
        let value = self.entries.remove(&handle)?;
        let unlinked = self.order.remove(&(value.order_key(), handle));
        debug_assert!(unlinked, "order index lost the entry for a live handle");
        Some(value)
    }

    /// The entry with the smallest sort key, without removing it.
    pub fn top(&self) -> Option<&V> {
        let _g = self.reentrancy.enter();
        let (_, handle) = self.order.first()?;
        let value = self.entries.get(handle);
        debug_assert!(value.is_some(), "order index points at a missing entry");
        value
    }

    /// Remove and return the entry with the smallest sort key.
    pub fn pop(&mut self) -> Option<V> {
        let _g = self.reentrancy.enter();
        let (_, handle) = self.order.pop_first()?;
        let value = self.entries.remove(&handle);
        debug_assert!(value.is_some(), "order index points at a missing entry");
        value
    }
}
