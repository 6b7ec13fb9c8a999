//! Deferred-flush registration lists.
//!
//! A [`RegistrationList`] tracks a set of registered items with
//! buffered add/remove. Mutations accumulate as pending operations and
//! become visible in the committed [`snapshot`](RegistrationList::snapshot)
//! only when [`flush`](RegistrationList::flush) runs, so code iterating
//! the snapshot during a processing pass never observes it changing
//! underneath.
//!
//! Membership queries ([`is_registered`](RegistrationList::is_registered))
//! see pending operations immediately. The snapshot preserves
//! first-registered order; flushed additions append at the end.

use std::collections::HashSet;
use std::hash::Hash;

use crate::error::RegistryError;

/// An ordered registration set with buffered mutations.
#[derive(Debug, Clone)]
pub struct RegistrationList<T> {
    snapshot: Vec<T>,
    snapshot_set: HashSet<T>,
    pending_adds: Vec<T>,
    pending_removes: HashSet<T>,
}

impl<T: Copy + Eq + Hash> RegistrationList<T> {
    /// Creates an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self {
            snapshot: Vec::new(),
            snapshot_set: HashSet::new(),
            pending_adds: Vec::new(),
            pending_removes: HashSet::new(),
        }
    }

    /// Buffers a registration.
    ///
    /// Returns `true` iff the call changed the item's effective status.
    /// Registering an item with a pending unregister cancels the
    /// pending removal instead of buffering a duplicate add.
    pub fn register(&mut self, item: T) -> bool {
        if self.is_registered(item) {
            return false;
        }
        if self.pending_removes.remove(&item) {
            // The item is still in the snapshot; canceling the pending
            // removal restores it without a new pending add.
            return true;
        }
        self.pending_adds.push(item);
        true
    }

    /// Buffers an unregistration.
    ///
    /// Returns `true` iff the item was considered registered before the
    /// call. Unregistering a pending add discards the add.
    pub fn unregister(&mut self, item: T) -> bool {
        if !self.is_registered(item) {
            return false;
        }
        if let Some(pos) = self.pending_adds.iter().position(|&p| p == item) {
            self.pending_adds.remove(pos);
            return true;
        }
        self.pending_removes.insert(item);
        true
    }

    /// Buffers unregistration of every currently-registered item.
    ///
    /// Returns `true` iff anything was registered. The snapshot is
    /// untouched until the next flush.
    pub fn unregister_all(&mut self) -> bool {
        let mut items = Vec::new();
        self.registered_items(&mut items);
        let mut changed = false;
        for item in items {
            changed |= self.unregister(item);
        }
        changed
    }

    /// Applies pending removals, then pending additions, to the
    /// snapshot. New entries append in first-registered order.
    pub fn flush(&mut self) {
        if !self.pending_removes.is_empty() {
            let removes = std::mem::take(&mut self.pending_removes);
            self.snapshot.retain(|item| !removes.contains(item));
            for item in &removes {
                self.snapshot_set.remove(item);
            }
        }
        for item in self.pending_adds.drain(..) {
            self.snapshot.push(item);
            self.snapshot_set.insert(item);
        }
    }

    /// Returns `true` if the item is registered, considering both the
    /// snapshot and pending operations.
    #[must_use]
    pub fn is_registered(&self, item: T) -> bool {
        (self.snapshot_set.contains(&item) && !self.pending_removes.contains(&item))
            || self.pending_adds.contains(&item)
    }

    /// Fast-path check for items known to be in the snapshot: `false`
    /// iff a pending unregister exists for the item.
    ///
    /// Only meaningful while iterating the snapshot during processing.
    #[must_use]
    pub fn is_still_registered(&self, item: T) -> bool {
        !self.pending_removes.contains(&item)
    }

    /// Inserts or repositions an item in the snapshot immediately,
    /// bypassing the buffer.
    ///
    /// Fails with [`RegistryError::PendingChanges`] while any buffered
    /// register or unregister is outstanding; flush first. Returns
    /// `Ok(true)` iff the item's effective position changed or it was
    /// newly inserted.
    pub fn move_item_immediately(&mut self, item: T, index: usize) -> Result<bool, RegistryError> {
        if !self.pending_adds.is_empty() || !self.pending_removes.is_empty() {
            return Err(RegistryError::PendingChanges);
        }

        if let Some(current) = self.snapshot.iter().position(|&s| s == item) {
            let target = index.min(self.snapshot.len() - 1);
            if current == target {
                return Ok(false);
            }
            self.snapshot.remove(current);
            self.snapshot.insert(target, item);
        } else {
            let target = index.min(self.snapshot.len());
            self.snapshot.insert(target, item);
            self.snapshot_set.insert(item);
        }
        Ok(true)
    }

    /// Collects snapshot ∪ pending-adds − pending-removes into `out`,
    /// in registration order.
    pub fn registered_items(&self, out: &mut Vec<T>) {
        out.clear();
        out.extend(
            self.snapshot
                .iter()
                .filter(|item| !self.pending_removes.contains(*item)),
        );
        out.extend_from_slice(&self.pending_adds);
    }

    /// The committed snapshot, for iteration during processing.
    #[must_use]
    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    /// Number of items in the committed snapshot.
    #[must_use]
    pub fn flushed_count(&self) -> usize {
        self.snapshot.len()
    }

    /// Returns `true` if any buffered register or unregister is
    /// outstanding.
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        !self.pending_adds.is_empty() || !self.pending_removes.is_empty()
    }
}

impl<T: Copy + Eq + Hash> Default for RegistrationList<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_types::assert_error_code;

    #[test]
    fn register_is_idempotent() {
        let mut list = RegistrationList::new();
        assert!(list.register(1));
        assert!(!list.register(1));
        assert!(list.is_registered(1));
    }

    #[test]
    fn snapshot_changes_only_on_flush() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.register(2);
        assert!(list.snapshot().is_empty());

        list.flush();
        assert_eq!(list.snapshot(), &[1, 2]);

        list.unregister(1);
        list.register(3);
        assert_eq!(list.snapshot(), &[1, 2]);

        list.flush();
        assert_eq!(list.snapshot(), &[2, 3]);
    }

    #[test]
    fn unregister_pending_add_discards_it() {
        let mut list = RegistrationList::new();
        assert!(list.register(1));
        assert!(list.unregister(1));
        assert!(!list.is_registered(1));

        list.flush();
        assert!(list.snapshot().is_empty());
    }

    #[test]
    fn reregister_cancels_pending_removal_without_snapshot_change() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.flush();

        assert!(list.unregister(1));
        assert!(!list.is_registered(1));
        assert!(list.register(1));
        assert!(list.is_registered(1));
        assert!(!list.has_pending_changes());

        list.flush();
        assert_eq!(list.snapshot(), &[1]);
    }

    #[test]
    fn is_still_registered_sees_pending_unregister() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.flush();

        assert!(list.is_still_registered(1));
        list.unregister(1);
        assert!(!list.is_still_registered(1));
    }

    #[test]
    fn move_item_immediately_repositions_without_flush() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.register(2);
        list.register(3);
        list.flush();

        assert_eq!(list.move_item_immediately(3, 0), Ok(true));
        assert_eq!(list.snapshot(), &[3, 1, 2]);

        // Same position reports no change.
        assert_eq!(list.move_item_immediately(3, 0), Ok(false));
    }

    #[test]
    fn move_item_immediately_inserts_new_item() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.flush();

        assert_eq!(list.move_item_immediately(2, 0), Ok(true));
        assert_eq!(list.snapshot(), &[2, 1]);
        assert!(list.is_registered(2));
    }

    #[test]
    fn move_item_immediately_fails_with_pending_changes() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.flush();
        list.register(2);

        let err = list.move_item_immediately(1, 0).unwrap_err();
        assert_error_code(&err, "REGISTRY_PENDING_CHANGES");
        // Nothing moved, nothing committed.
        assert_eq!(list.snapshot(), &[1]);
    }

    #[test]
    fn move_item_immediately_clamps_index() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.register(2);
        list.flush();

        assert_eq!(list.move_item_immediately(1, 99), Ok(true));
        assert_eq!(list.snapshot(), &[2, 1]);
    }

    #[test]
    fn unregister_all_buffers_everything() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.flush();
        list.register(2);

        assert!(list.unregister_all());
        assert!(!list.is_registered(1));
        assert!(!list.is_registered(2));
        assert_eq!(list.snapshot(), &[1]);

        list.flush();
        assert!(list.snapshot().is_empty());
        assert!(!list.unregister_all());
    }

    #[test]
    fn registered_items_sees_pending_operations() {
        let mut list = RegistrationList::new();
        list.register(1);
        list.register(2);
        list.flush();
        list.unregister(1);
        list.register(3);

        let mut items = Vec::new();
        list.registered_items(&mut items);
        assert_eq!(items, vec![2, 3]);
    }
}
