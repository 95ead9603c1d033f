//! The set of key changes a planning call asks the caller to persist

use std::hash::Hash;
use std::num::NonZeroUsize;

use indexmap::map::{IntoIter, Iter};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::batch::Batches;

/// Mapping from record id to its newly assigned order key
///
/// Entries keep the order in which they were first recorded. Recording an id
/// again updates its key in place without moving the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeMap<Id: Hash + Eq> {
    entries: IndexMap<Id, i64>,
}

impl<Id: Hash + Eq> ChangeMap<Id> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Record `order` as the new key for `id`, returning the previously recorded key
    pub fn insert(&mut self, id: Id, order: i64) -> Option<i64> {
        self.entries.insert(id, order)
    }

    /// Drop the entry for `id`, keeping the relative order of the rest
    pub fn remove(&mut self, id: &Id) -> Option<i64> {
        self.entries.shift_remove(id)
    }

    pub fn get(&self, id: &Id) -> Option<i64> {
        self.entries.get(id).copied()
    }

    pub fn contains(&self, id: &Id) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Id, i64> {
        self.entries.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &Id> {
        self.entries.keys()
    }

    /// Consume the map into batches of at most `batch_size` `(id, order)` pairs
    pub fn into_batches(self, batch_size: NonZeroUsize) -> Batches<IntoIter<Id, i64>> {
        Batches::new(self.entries.into_iter(), batch_size)
    }
}

impl<Id: Hash + Eq> Default for ChangeMap<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id: Hash + Eq> IntoIterator for ChangeMap<Id> {
    type Item = (Id, i64);
    type IntoIter = IntoIter<Id, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, Id: Hash + Eq> IntoIterator for &'a ChangeMap<Id> {
    type Item = (&'a Id, &'a i64);
    type IntoIter = Iter<'a, Id, i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<Id: Hash + Eq> FromIterator<(Id, i64)> for ChangeMap<Id> {
    fn from_iter<T: IntoIterator<Item = (Id, i64)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
