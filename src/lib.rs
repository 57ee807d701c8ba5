//! hashed-tree: a single-threaded container indexing the same set of
//! values two ways at once: by opaque handle and by sort order.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: back a timer/event queue. Callers schedule entries by a
//!   sortable key, cancel a specific entry by handle, and repeatedly
//!   extract the earliest-due entry.
//! - Two owning sub-indices over the same logical set:
//!   - handle index: `hashbrown::HashMap<Handle, V>`, owns every stored
//!     value, O(1) average lookup and removal by handle.
//!   - order index: `BTreeSet<(V::OrderKey, Handle)>`, owns a clone of
//!     each entry's sort key, resolves back through the handle index.
//! - The order index never holds a reference into the hash map's
//!   storage, so rehashing and relocation cannot invalidate it.
//!
//! Constraints
//! - Single-threaded: `!Send`/`!Sync` by design (no atomics).
//! - Handles are monotonically assigned from 1 by a plain counter and
//!   never reused; 0 is never issued.
//! - Every operation is total: absence (unknown handle, empty
//!   container) is `None`, never a panic or an error variant.
//! - Sort keys must be stable while an entry is stored; there is no
//!   decrease-key or reschedule. Cancel and re-add instead.
//! - Equal sort keys are all retained; ties extract in insertion order.
//! - Reentrancy: the only user code that runs while the structure is
//!   mutating is `TreeEntry::order_key`; a debug-only guard panics if
//!   it calls back into the container.
//!
//! Notes and non-goals
//! - No iteration over the ordered set; the public surface is exactly
//!   the scheduling contract (`add`/`find`/`remove`/`top`/`pop`).
//! - No internal locking. Concurrent use requires an external lock
//!   around the whole container.
//! - The container never mutates stored values. The handle is
//!   container bookkeeping, kept in the order index, not written into
//!   the value.
//! - Internal index desynchronization is a programming error, checked
//!   with `debug_assert!` rather than handled at runtime.

mod entry;
mod hashed_tree;
mod hashed_tree_proptest;
mod reentrancy;

// Public surface
pub use entry::TreeEntry;
pub use hashed_tree::{Handle, HashedTree};
