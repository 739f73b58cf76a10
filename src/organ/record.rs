//! Organ record: integrity state owned by one organ entity
//!
//! `recompute_integrity` is the only writer of current integrity and
//! `reclassify` the only writer of current severity. Both report a change
//! only when the value actually moved.

use crate::core::{EntityId, Fixed2};
use crate::organ::modifiers::ModifierStore;
use crate::organ::prototype::OrganPrototype;
use crate::organ::severity::{OrganSeverity, ThresholdTable};

/// An integrity value before and after a recompute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegrityChange {
    pub old: Fixed2,
    pub new: Fixed2,
}

/// A severity tier before and after a reclassify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityChange {
    pub old: OrganSeverity,
    pub new: OrganSeverity,
}

#[derive(Debug, Clone)]
pub struct Organ {
    pub prototype: String,
    integrity_cap: Fixed2,
    integrity: Fixed2,
    severity: OrganSeverity,
    thresholds: ThresholdTable,
    modifiers: ModifierStore,
    /// Weak back-reference to the owning body, used to find its nerve system
    body: Option<EntityId>,
}

impl Organ {
    /// A fresh organ at full integrity
    pub fn new(prototype: impl Into<String>, integrity_cap: Fixed2, thresholds: ThresholdTable) -> Self {
        Self {
            prototype: prototype.into(),
            integrity_cap,
            integrity: integrity_cap,
            severity: OrganSeverity::Normal,
            thresholds,
            modifiers: ModifierStore::new(),
            body: None,
        }
    }

    pub fn from_prototype(proto: &OrganPrototype) -> Self {
        Self::new(proto.id.clone(), proto.integrity_cap, proto.thresholds.clone())
    }

    pub fn integrity(&self) -> Fixed2 {
        self.integrity
    }

    pub fn integrity_cap(&self) -> Fixed2 {
        self.integrity_cap
    }

    /// Cap minus current integrity
    pub fn missing_integrity(&self) -> Fixed2 {
        self.integrity_cap - self.integrity
    }

    pub fn severity(&self) -> OrganSeverity {
        self.severity
    }

    pub fn thresholds(&self) -> &ThresholdTable {
        &self.thresholds
    }

    pub fn modifiers(&self) -> &ModifierStore {
        &self.modifiers
    }

    pub(crate) fn modifiers_mut(&mut self) -> &mut ModifierStore {
        &mut self.modifiers
    }

    pub fn body(&self) -> Option<EntityId> {
        self.body
    }

    pub(crate) fn set_body(&mut self, body: Option<EntityId>) {
        self.body = body;
    }

    /// Explicitly change the cap; integrity is re-derived and clamped on the next recompute
    pub(crate) fn reconfigure_cap(&mut self, cap: Fixed2) {
        self.integrity_cap = cap;
    }

    /// Re-derive integrity from the modifier store
    ///
    /// With no modifiers the last value stays: removing the final modifier
    /// does not heal the organ back to its cap. A stale value is still pulled
    /// down under a lowered cap.
    pub fn recompute_integrity(&mut self) -> Option<IntegrityChange> {
        let old = self.integrity;

        self.integrity = if self.modifiers.is_empty() {
            old.clamp(Fixed2::ZERO, self.integrity_cap)
        } else {
            let damage = self.modifiers.total();
            (self.integrity_cap - damage).clamp(Fixed2::ZERO, self.integrity_cap)
        };

        (old != self.integrity).then_some(IntegrityChange {
            old,
            new: self.integrity,
        })
    }

    /// Re-derive severity from current integrity
    pub fn reclassify(&mut self) -> Option<SeverityChange> {
        let old = self.severity;
        self.severity = self.thresholds.classify(self.integrity, old);

        (old != self.severity).then_some(SeverityChange {
            old,
            new: self.severity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organ::modifiers::{ModifierKey, Upsert};
    use OrganSeverity::*;

    fn heart() -> Organ {
        Organ::from_prototype(&OrganPrototype::new(
            "heart",
            100,
            &[(Light, 75), (Moderate, 50), (Severe, 25), (Destroyed, 0)],
        ))
    }

    fn add(organ: &mut Organ, id: &str, amount: i64) {
        organ
            .modifiers_mut()
            .upsert(ModifierKey::new(id, EntityId::new()), Fixed2::new(amount), Upsert::Create);
    }

    #[test]
    fn test_new_organ_is_whole() {
        let organ = heart();
        assert_eq!(organ.integrity(), Fixed2::new(100));
        assert_eq!(organ.severity(), Normal);
        assert_eq!(organ.missing_integrity(), Fixed2::ZERO);
    }

    #[test]
    fn test_recompute_reports_change_once() {
        let mut organ = heart();
        add(&mut organ, "Burn", 30);
        let change = organ.recompute_integrity().unwrap();
        assert_eq!(change.old, Fixed2::new(100));
        assert_eq!(change.new, Fixed2::new(70));
        assert!(organ.recompute_integrity().is_none());
    }

    #[test]
    fn test_recompute_clamps_both_ways() {
        let mut organ = heart();
        add(&mut organ, "Crush", 250);
        organ.recompute_integrity();
        assert_eq!(organ.integrity(), Fixed2::ZERO);

        let mut organ = heart();
        add(&mut organ, "Crush", 10);
        organ.recompute_integrity();
        add(&mut organ, "Salve", -50);
        organ.recompute_integrity();
        assert_eq!(organ.integrity(), Fixed2::new(100));
    }

    #[test]
    fn test_empty_store_keeps_last_value() {
        let mut organ = heart();
        let key = ModifierKey::new("Burn", EntityId::new());
        organ.modifiers_mut().upsert(key.clone(), Fixed2::new(40), Upsert::Create);
        organ.recompute_integrity();
        organ.modifiers_mut().remove(&key);
        assert!(organ.recompute_integrity().is_none());
        assert_eq!(organ.integrity(), Fixed2::new(60));
    }

    #[test]
    fn test_reclassify_follows_integrity() {
        let mut organ = heart();
        add(&mut organ, "Burn", 60);
        organ.recompute_integrity();
        let change = organ.reclassify().unwrap();
        assert_eq!(change, SeverityChange { old: Normal, new: Moderate });
        assert!(organ.reclassify().is_none());
    }

    #[test]
    fn test_reconfigured_cap_applies_on_recompute() {
        let mut organ = heart();
        add(&mut organ, "Burn", 10);
        organ.reconfigure_cap(Fixed2::new(50));
        organ.recompute_integrity();
        assert_eq!(organ.integrity(), Fixed2::new(40));
    }

    #[test]
    fn test_lowered_cap_clamps_empty_store() {
        let mut organ = heart();
        organ.reconfigure_cap(Fixed2::new(60));
        let change = organ.recompute_integrity().unwrap();
        assert_eq!(change.old, Fixed2::new(100));
        assert_eq!(change.new, Fixed2::new(60));
        assert_eq!(organ.missing_integrity(), Fixed2::ZERO);

        // Raising it again does not heal a stale value
        organ.reconfigure_cap(Fixed2::new(100));
        assert!(organ.recompute_integrity().is_none());
        assert_eq!(organ.integrity(), Fixed2::new(60));
    }

    #[test]
    fn test_huge_modifiers_clamp_to_zero() {
        let mut organ = heart();
        add(&mut organ, "Crush", 500_000_000_000_000_000);
        add(&mut organ, "Crush", 500_000_000_000_000_000);
        organ.recompute_integrity();
        assert_eq!(organ.integrity(), Fixed2::ZERO);
    }
}
