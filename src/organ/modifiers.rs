//! Integrity modifier store: named, attributable damage contributions
//!
//! Each entry is keyed by `(identifier, owner)`. Two owners using the same
//! identifier are separate entries; the same owner reapplying an identifier
//! targets the existing one. Positive magnitudes damage, negative ones heal.
//!
//! The store never recomputes integrity itself; the engine does that once
//! per public call.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Fixed2};

/// Composite identity of one modifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierKey {
    pub identifier: String,
    pub owner: EntityId,
}

impl ModifierKey {
    pub fn new(identifier: impl Into<String>, owner: EntityId) -> Self {
        Self {
            identifier: identifier.into(),
            owner,
        }
    }
}

/// How `upsert` treats an existing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upsert {
    /// Only insert; an existing entry makes the call fail
    Create,
    /// Insert or overwrite
    Overwrite,
}

/// Per-organ modifier map, exclusively owned by its organ
#[derive(Debug, Clone, Default)]
pub struct ModifierStore {
    entries: AHashMap<ModifierKey, Fixed2>,
}

impl ModifierStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert (or, with `Upsert::Overwrite`, replace) an entry
    ///
    /// Fails on a zero magnitude, and on an existing key in `Create` mode.
    pub fn upsert(&mut self, key: ModifierKey, magnitude: Fixed2, mode: Upsert) -> bool {
        if magnitude.is_zero() {
            return false;
        }

        match mode {
            Upsert::Create => {
                if self.entries.contains_key(&key) {
                    return false;
                }
                self.entries.insert(key, magnitude);
            }
            Upsert::Overwrite => {
                self.entries.insert(key, magnitude);
            }
        }
        true
    }

    /// Add `delta` to an existing entry
    ///
    /// The result may reach zero or flip sign; the entry stays in the store.
    pub fn accumulate(&mut self, key: &ModifierKey, delta: Fixed2) -> bool {
        if delta.is_zero() {
            return false;
        }

        match self.entries.get_mut(key) {
            Some(value) => {
                *value += delta;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &ModifierKey) -> bool {
        self.entries.remove(key).is_some()
    }

    pub fn get(&self, key: &ModifierKey) -> Option<Fixed2> {
        self.entries.get(key).copied()
    }

    pub fn contains(&self, key: &ModifierKey) -> bool {
        self.entries.contains_key(key)
    }

    /// Sum of every magnitude
    pub fn total(&self) -> Fixed2 {
        self.entries.values().sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
