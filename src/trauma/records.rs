//! Trauma records: persistent injuries attributed to an owner entity
//!
//! A record is keyed by its owner. Removing the owner's organ modifier
//! resolves the record; so does the organ healing past the record.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::organ::OrganSeverity;

/// What a trauma record sits on
///
/// Organ consequences only ever clean up `OrganDamage`. Other kinds share the
/// registry and must survive organ healing and destruction untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraumaKind {
    /// Damage carried by an organ's modifier
    OrganDamage,
    /// Fracture on a woundable part, owned by the skeletal side
    BoneDamage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraumaRecord {
    pub owner: EntityId,
    pub kind: TraumaKind,
    /// Organ (or other entity) the trauma sits on
    pub target: EntityId,
    /// Woundable part the trauma was inflicted through
    pub part: Option<EntityId>,
    /// Organ severity right after the trauma landed
    pub inflicted_at: OrganSeverity,
}

#[derive(Debug, Clone, Default)]
pub struct TraumaRegistry {
    records: AHashMap<EntityId, TraumaRecord>,
}

impl TraumaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record, replacing whatever the same owner held
    pub fn insert(&mut self, record: TraumaRecord) -> Option<TraumaRecord> {
        self.records.insert(record.owner, record)
    }

    pub fn get(&self, owner: EntityId) -> Option<&TraumaRecord> {
        self.records.get(&owner)
    }

    pub fn remove(&mut self, owner: EntityId) -> Option<TraumaRecord> {
        self.records.remove(&owner)
    }

    /// Owners of `kind` traumas on `target`, collected so callers can remove while iterating
    pub fn targeting(&self, target: EntityId, kind: TraumaKind) -> Vec<EntityId> {
        self.matching(|r| r.target == target && r.kind == kind)
    }

    /// Owners of `kind` traumas inflicted through `part` on `target`
    pub fn on_part_targeting(&self, part: EntityId, target: EntityId, kind: TraumaKind) -> Vec<EntityId> {
        self.matching(|r| r.part == Some(part) && r.target == target && r.kind == kind)
    }

    /// Owners of every trauma inflicted through `part`
    pub fn on_part(&self, part: EntityId) -> Vec<EntityId> {
        self.matching(|r| r.part == Some(part))
    }

    /// Owners of traumas inflicted through any of `parts`
    pub fn on_parts(&self, parts: &[EntityId]) -> Vec<EntityId> {
        self.matching(|r| r.part.is_some_and(|p| parts.contains(&p)))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching(&self, pred: impl Fn(&TraumaRecord) -> bool) -> Vec<EntityId> {
        self.records
            .values()
            .filter(|r| pred(r))
            .map(|r| r.owner)
            .collect()
    }
}
