//! Per-instance cache behind the relationship accessors.
//!
//! Every instance carries one slot per relationship declared on its model,
//! created when the instance is built. A slot is either empty (not resolved
//! yet) or holds the resolved [`Related`] value. A resolved "nothing" is
//! stored like any other value, so an owner whose `has_one` target does not
//! exist is only fetched once.
//!
//! Slots are `once_cell::unsync::OnceCell`s: instances are `Send` but not
//! `Sync`, and callers sharing one across threads must serialise access.

use crate::error::Result;
use crate::relation::Related;
use once_cell::unsync::OnceCell;

/// Cache slots for the relationships of one instance
#[derive(Debug, Clone, Default)]
pub struct LazyRelations {
    slots: Box<[OnceCell<Related>]>,
}

impl LazyRelations {
    /// `count` empty slots
    pub fn new(count: usize) -> Self {
        Self {
            slots: (0..count).map(|_| OnceCell::new()).collect(),
        }
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots at all
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Cached value of slot `index`, if resolved
    pub fn get(&self, index: usize) -> Option<&Related> {
        self.slots.get(index).and_then(OnceCell::get)
    }

    /// Whether slot `index` holds a resolved value
    pub fn is_loaded(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Number of resolved slots
    pub fn loaded_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }

    /// Return the value of slot `index`, running `resolve` first if it is empty
    ///
    /// An error from `resolve` leaves the slot empty, so the next call
    /// tries again.
    ///
    /// # Panics
    ///
    /// If `index` is out of range; callers take indices from the model the
    /// slots were created for.
    pub fn get_or_resolve<F>(&self, index: usize, resolve: F) -> Result<&Related>
    where
        F: FnOnce() -> Result<Related>,
    {
        self.slots[index].get_or_try_init(resolve)
    }
}
