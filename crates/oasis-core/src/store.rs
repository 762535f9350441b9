//! # Entity Store
//!
//! The authoritative, ordered list of records of one entity kind.
//!
//! ## Store Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Entity Store Operations                              │
//! │                                                                         │
//! │  User Action            Store Call                 Effect               │
//! │  ───────────            ──────────                 ──────               │
//! │                                                                         │
//! │  Submit new form ──────► insert_with(|id| ..) ────► records.push(r)     │
//! │                                                                         │
//! │  Submit edit form ─────► update(id, patch) ───────► fields replaced     │
//! │                                                                         │
//! │  Click delete ─────────► remove(id) ──────────────► records.remove(i)   │
//! │                                                                         │
//! │  Render list ──────────► find_all() ──────────────► (read only)         │
//! │                                                                         │
//! │  NOTE: insertion order is storage order. Views and sorts borrow the     │
//! │        records; they never reorder them.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Ids come from a per-store counter. The counter only moves forward, so an
//! id freed by `remove` is never handed out again.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Entity Id
// =============================================================================

/// Unique, never-reused identifier of a record within its store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EntityId(u64);

impl EntityId {
    /// Wraps a raw id value.
    #[inline]
    pub const fn new(raw: u64) -> Self {
        EntityId(raw)
    }

    /// Returns the raw id value.
    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(EntityId)
    }
}

// =============================================================================
// Entity Trait
// =============================================================================

/// A record that can live in an [`EntityStore`].
pub trait Entity: Clone {
    /// Kind name used in logs and errors ("room", "order", ...).
    const KIND: &'static str;

    /// Partial update: every `Some` field replaces the current value.
    type Patch;

    fn id(&self) -> EntityId;

    /// Applies `patch`, leaving fields it does not mention untouched.
    fn apply_patch(&mut self, patch: Self::Patch);
}

// =============================================================================
// Entity Store
// =============================================================================

/// Ordered collection of entities of one kind, keyed by [`EntityId`].
///
/// ## Invariants
/// - Ids are unique within the store
/// - `find_all()` returns records in insertion order
/// - The id counter is always greater than every id ever stored
#[derive(Debug, Clone)]
pub struct EntityStore<E: Entity> {
    records: Vec<E>,
    next_id: u64,
}

impl<E: Entity> EntityStore<E> {
    /// Creates an empty store. The first allocated id is 1.
    pub fn new() -> Self {
        EntityStore {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Builds a store from existing records, keeping their order.
    ///
    /// Fails on the first duplicate id.
    pub fn from_records(records: Vec<E>) -> CoreResult<Self> {
        let mut store = Self::new();
        for record in records {
            store.insert(record)?;
        }
        Ok(store)
    }

    /// Reserves the next id.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Appends a record to the end of the store.
    ///
    /// ## Returns
    /// - `Ok(id)` on success
    /// - `Err(CoreError::DuplicateId)` if the id is already present; the
    ///   store is unchanged
    pub fn insert(&mut self, record: E) -> CoreResult<EntityId> {
        let id = record.id();
        if self.contains(id) {
            return Err(CoreError::DuplicateId {
                kind: E::KIND,
                id: id.get(),
            });
        }

        if id.get() >= self.next_id {
            self.next_id = id.get() + 1;
        }

        self.records.push(record);
        debug!(kind = E::KIND, id = %id, count = self.records.len(), "Inserted entity");
        Ok(id)
    }

    /// Allocates an id, builds the record with it and appends it.
    ///
    /// Cannot collide: allocated ids are always above every stored id.
    pub fn insert_with<F>(&mut self, build: F) -> &E
    where
        F: FnOnce(EntityId) -> E,
    {
        let id = self.next_id();
        let record = build(id);
        debug_assert_eq!(record.id(), id, "builder must use the allocated id");
        self.records.push(record);
        debug!(kind = E::KIND, id = %id, count = self.records.len(), "Inserted entity");
        &self.records[self.records.len() - 1]
    }

    /// Applies `patch` to the record with `id`.
    ///
    /// Returns the updated record, or `None` (no-op) when the id is unknown.
    pub fn update(&mut self, id: EntityId, patch: E::Patch) -> Option<&E> {
        let Some(index) = self.position(id) else {
            debug!(kind = E::KIND, id = %id, "Update skipped, entity not found");
            return None;
        };

        self.records[index].apply_patch(patch);
        debug!(kind = E::KIND, id = %id, "Updated entity");
        Some(&self.records[index])
    }

    /// Removes the record with `id`, keeping the order of the others.
    ///
    /// Returns the removed record, or `None` (no-op) when the id is unknown.
    pub fn remove(&mut self, id: EntityId) -> Option<E> {
        let Some(index) = self.position(id) else {
            debug!(kind = E::KIND, id = %id, "Remove skipped, entity not found");
            return None;
        };

        let removed = self.records.remove(index);
        debug!(kind = E::KIND, id = %id, count = self.records.len(), "Removed entity");
        Some(removed)
    }

    /// Gets a record by id.
    pub fn get(&self, id: EntityId) -> Option<&E> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Gets a mutable record by id.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut E> {
        self.records.iter_mut().find(|r| r.id() == id)
    }

    /// Checks whether a record with `id` exists.
    pub fn contains(&self, id: EntityId) -> bool {
        self.position(id).is_some()
    }

    /// All records in insertion order.
    pub fn find_all(&self) -> &[E] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, E> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn position(&self, id: EntityId) -> Option<usize> {
        self.records.iter().position(|r| r.id() == id)
    }
}

impl<E: Entity> Default for EntityStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, E: Entity> IntoIterator for &'a EntityStore<E> {
    type Item = &'a E;
    type IntoIter = std::slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub(crate) struct Note {
        pub id: EntityId,
        pub title: String,
        pub body: String,
        pub pinned: bool,
    }

    #[derive(Debug, Clone, Default)]
    pub(crate) struct NotePatch {
        pub title: Option<String>,
        pub body: Option<String>,
        pub pinned: Option<bool>,
    }

    impl Entity for Note {
        const KIND: &'static str = "note";
        type Patch = NotePatch;

        fn id(&self) -> EntityId {
            self.id
        }

        fn apply_patch(&mut self, patch: NotePatch) {
            if let Some(title) = patch.title {
                self.title = title;
            }
            if let Some(body) = patch.body {
                self.body = body;
            }
            if let Some(pinned) = patch.pinned {
                self.pinned = pinned;
            }
        }
    }

    pub(crate) fn note(id: u64, title: &str) -> Note {
        Note {
            id: EntityId::new(id),
            title: title.to_string(),
            body: format!("body of {}", title),
            pinned: false,
        }
    }

    fn ids(store: &EntityStore<Note>) -> Vec<u64> {
        store.iter().map(|n| n.id.get()).collect()
    }

    #[test]
    fn test_insert_preserves_order() {
        let mut store = EntityStore::new();
        store.insert(note(3, "c")).unwrap();
        store.insert(note(1, "a")).unwrap();
        store.insert(note(2, "b")).unwrap();

        assert_eq!(ids(&store), vec![3, 1, 2]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_insert_rejects_duplicate_id() {
        let mut store = EntityStore::new();
        store.insert(note(1, "a")).unwrap();

        let err = store.insert(note(1, "again")).unwrap_err();
        assert!(matches!(err, CoreError::DuplicateId { kind: "note", id: 1 }));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(EntityId::new(1)).unwrap().title, "a");
    }

    #[test]
    fn test_allocated_ids_are_never_reused() {
        let mut store = EntityStore::new();
        let first = store.insert_with(|id| note(id.get(), "a")).id;
        let second = store.insert_with(|id| note(id.get(), "b")).id;
        store.remove(second);

        let third = store.insert_with(|id| note(id.get(), "c")).id;
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
        assert_eq!(third.get(), 3);
    }

    #[test]
    fn test_allocator_skips_past_seeded_ids() {
        let mut store = EntityStore::from_records(vec![note(5, "a"), note(2, "b")]).unwrap();
        let next = store.insert_with(|id| note(id.get(), "c")).id;
        assert_eq!(next.get(), 6);
    }

    #[test]
    fn test_from_records_rejects_duplicates() {
        let result = EntityStore::from_records(vec![note(1, "a"), note(1, "b")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_update_touches_only_patched_fields() {
        let mut store = EntityStore::new();
        store.insert(note(1, "a")).unwrap();
        let before = store.get(EntityId::new(1)).unwrap().clone();

        let updated = store
            .update(
                EntityId::new(1),
                NotePatch {
                    pinned: Some(true),
                    ..Default::default()
                },
            )
            .unwrap()
            .clone();

        assert!(updated.pinned);
        assert_eq!(updated.title, before.title);
        assert_eq!(updated.body, before.body);
        assert_eq!(updated.id, before.id);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = EntityStore::new();
        store.insert(note(1, "a")).unwrap();

        let result = store.update(
            EntityId::new(42),
            NotePatch {
                title: Some("x".to_string()),
                ..Default::default()
            },
        );
        assert!(result.is_none());
        assert_eq!(store.get(EntityId::new(1)).unwrap().title, "a");
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = EntityStore::new();
        store.insert(note(1, "a")).unwrap();
        store.insert(note(2, "b")).unwrap();

        assert!(store.remove(EntityId::new(1)).is_some());
        assert!(store.remove(EntityId::new(1)).is_none());
        assert_eq!(ids(&store), vec![2]);
    }

    #[test]
    fn test_length_tracks_inserts_minus_removes() {
        let mut store = EntityStore::new();
        for i in 1..=6 {
            store.insert(note(i, "n")).unwrap();
        }
        store.remove(EntityId::new(2));
        store.remove(EntityId::new(5));
        store.remove(EntityId::new(5));

        assert_eq!(store.len(), 4);
        assert_eq!(ids(&store), vec![1, 3, 4, 6]);
    }

    #[test]
    fn test_entity_id_parse_and_display() {
        let id: EntityId = " 17 ".parse().unwrap();
        assert_eq!(id, EntityId::new(17));
        assert_eq!(id.to_string(), "17");
        assert!("abc".parse::<EntityId>().is_err());
    }
}
