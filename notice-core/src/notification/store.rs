// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Notification Store
//!
//! Ordered, deduplicated notification list with a derived unread counter.
//!
//! Every operation is total and synchronous. The unread counter is recounted
//! from the record list after each mutation, so it cannot drift from the
//! records it describes. Removed ids are tombstoned for the rest of the
//! session so a late or duplicated push cannot bring them back.

use std::collections::{HashSet, VecDeque};

use super::record::{NotificationId, NotificationRecord};

/// Default number of deleted ids remembered per session.
pub const DEFAULT_TOMBSTONE_CAPACITY: usize = 1024;

/// Local notification cache; the single source of truth the UI reads.
#[derive(Debug, Clone)]
pub struct NotificationStore {
    records: Vec<NotificationRecord>,
    unread: usize,
    tombstones: Tombstones,
}

impl NotificationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::with_tombstone_capacity(DEFAULT_TOMBSTONE_CAPACITY)
    }

    /// Creates an empty store remembering at most `capacity` deleted ids.
    pub fn with_tombstone_capacity(capacity: usize) -> Self {
        NotificationStore {
            records: Vec::new(),
            unread: 0,
            tombstones: Tombstones::new(capacity),
        }
    }

    /// Replaces the whole list with a server snapshot.
    ///
    /// Server order is preserved. Repeated ids keep their first occurrence
    /// and tombstoned ids are skipped.
    pub fn load_snapshot(&mut self, records: Vec<NotificationRecord>) {
        let mut seen = HashSet::with_capacity(records.len());
        self.records = records
            .into_iter()
            .filter(|r| !self.tombstones.contains(r.id) && seen.insert(r.id))
            .collect();
        self.recount();
    }

    /// Inserts a pushed notification at the front.
    ///
    /// Returns `false` when the id is already present or was deleted earlier
    /// in this session.
    pub fn insert(&mut self, record: NotificationRecord) -> bool {
        if self.contains(record.id) || self.tombstones.contains(record.id) {
            return false;
        }
        self.records.insert(0, record);
        self.recount();
        true
    }

    /// Marks a notification as read.
    ///
    /// Returns `false` when the id is unknown or already read.
    pub fn mark_read(&mut self, id: NotificationId) -> bool {
        let changed = match self.records.iter_mut().find(|r| r.id == id) {
            Some(record) if !record.is_read => {
                record.is_read = true;
                true
            }
            _ => false,
        };
        if changed {
            self.recount();
        }
        changed
    }

    /// Removes a notification and tombstones its id.
    ///
    /// Returns the removed record, or `None` if it was not present.
    pub fn remove(&mut self, id: NotificationId) -> Option<NotificationRecord> {
        self.tombstones.insert(id);
        let pos = self.records.iter().position(|r| r.id == id)?;
        let removed = self.records.remove(pos);
        self.recount();
        Some(removed)
    }

    /// Records in display order.
    pub fn records(&self) -> &[NotificationRecord] {
        &self.records
    }

    /// Looks up a record by id.
    pub fn get(&self, id: NotificationId) -> Option<&NotificationRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Returns true if a record with this id is present.
    pub fn contains(&self, id: NotificationId) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Returns true if this id was deleted during the session.
    pub fn is_tombstoned(&self, id: NotificationId) -> bool {
        self.tombstones.contains(id)
    }

    /// Number of unread records.
    pub fn unread_count(&self) -> usize {
        self.unread
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn recount(&mut self) {
        self.unread = self.records.iter().filter(|r| !r.is_read).count();
    }
}

impl Default for NotificationStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Bounded set of deleted ids, oldest evicted first.
#[derive(Debug, Clone)]
struct Tombstones {
    ids: HashSet<NotificationId>,
    order: VecDeque<NotificationId>,
    capacity: usize,
}

impl Tombstones {
    fn new(capacity: usize) -> Self {
        Tombstones {
            ids: HashSet::new(),
            order: VecDeque::new(),
            capacity,
        }
    }

    fn insert(&mut self, id: NotificationId) {
        if self.capacity == 0 || !self.ids.insert(id) {
            return;
        }
        self.order.push_back(id);
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
            }
        }
    }

    fn contains(&self, id: NotificationId) -> bool {
        self.ids.contains(&id)
    }
}
