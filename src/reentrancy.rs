//! Debug-only reentrancy check.
//!
//! The container invokes user code (`TreeEntry::order_key`) while its
//! two indices may be transiently out of sync. A key implementation
//! that calls back into the same container from there would observe or
//! corrupt that intermediate state. In debug builds this check panics
//! on nested entry; in release builds it compiles to nothing.

use core::cell::Cell;
use core::marker::PhantomData;

/// Per-instance nested-entry detector. Guard each public operation
/// with `let _g = self.reentrancy.enter();`.
///
/// Also pins the owning structure to one thread: the raw-pointer
/// `PhantomData` makes it `!Send` and `!Sync`.
#[derive(Debug)]
pub struct ReentrancyCheck {
    #[cfg(debug_assertions)]
    entered: Cell<bool>,
    _not_thread_safe: PhantomData<*mut ()>,
}

impl ReentrancyCheck {
    pub const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            entered: Cell::new(false),
            _not_thread_safe: PhantomData,
        }
    }

    /// Mark the structure as entered until the returned guard drops.
    /// Debug builds panic on a second `enter` while a guard is live.
    #[inline]
    pub fn enter(&self) -> EnterGuard<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.entered.replace(true),
                "reentrant call into HashedTree while an operation is in progress"
            );
            EnterGuard { check: self }
        }

        #[cfg(not(debug_assertions))]
        {
            EnterGuard { _life: PhantomData }
        }
    }
}

impl Default for ReentrancyCheck {
    fn default() -> Self {
        Self::new()
    }
}

/// RAII guard returned by [`ReentrancyCheck::enter`].
pub struct EnterGuard<'a> {
    #[cfg(debug_assertions)]
    check: &'a ReentrancyCheck,
    #[cfg(not(debug_assertions))]
    _life: PhantomData<&'a ()>,
}

impl Drop for EnterGuard<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.check.entered.set(false);
    }
}
