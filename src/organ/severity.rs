//! Organ severity tiers and threshold classification
//!
//! An organ's severity is derived from its integrity through a per-prototype
//! threshold table. The table only defines transition points: integrity above
//! every threshold leaves the previous tier in place.

use serde::{Deserialize, Serialize};

use crate::core::Fixed2;

/// Organ damage tiers, ordered from healthy to gone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OrganSeverity {
    /// Implicit initial state, never produced by a threshold table
    Normal,
    /// Bruised, works fine
    Light,
    /// Noticeably impaired
    Moderate,
    /// Barely functioning
    Severe,
    /// On the verge of failure
    Critical,
    /// Organ lost, removed from the body
    Destroyed,
}

impl OrganSeverity {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrganSeverity::Destroyed)
    }

    /// True when moving from `self` to `new` makes things worse
    pub fn escalates_to(&self, new: OrganSeverity) -> bool {
        new > *self
    }

    pub fn name(&self) -> &'static str {
        match self {
            OrganSeverity::Normal => "Normal",
            OrganSeverity::Light => "Light",
            OrganSeverity::Moderate => "Moderate",
            OrganSeverity::Severe => "Severe",
            OrganSeverity::Critical => "Critical",
            OrganSeverity::Destroyed => "Destroyed",
        }
    }
}

/// One row of a threshold table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Threshold {
    pub severity: OrganSeverity,
    pub value: Fixed2,
}

/// Ordered `(tier, value)` pairs used to classify integrity
///
/// Rows are kept sorted by value, lowest first. The sort is stable, so rows
/// sharing a value keep their declaration order and the earlier-declared
/// tier wins the tie.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Threshold>", into = "Vec<Threshold>")]
pub struct ThresholdTable {
    rows: Vec<Threshold>,
}

impl ThresholdTable {
    pub fn new(rows: impl IntoIterator<Item = Threshold>) -> Self {
        let mut rows: Vec<Threshold> = rows.into_iter().collect();
        rows.sort_by_key(|t| t.value);
        Self { rows }
    }

    /// Build from `(tier, whole-number value)` pairs
    pub fn from_pairs(pairs: &[(OrganSeverity, i64)]) -> Self {
        Self::new(pairs.iter().map(|&(severity, value)| Threshold {
            severity,
            value: Fixed2::new(value),
        }))
    }

    pub fn rows(&self) -> &[Threshold] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Classify `integrity`, falling back to `current` when nothing matches
    ///
    /// Picks the nearest threshold at or above the integrity. Never fails:
    /// integrity above every threshold is a stable state.
    pub fn classify(&self, integrity: Fixed2, current: OrganSeverity) -> OrganSeverity {
        self.rows
            .iter()
            .find(|t| t.value >= integrity)
            .map(|t| t.severity)
            .unwrap_or(current)
    }

    /// The tier with the lowest threshold value, if any
    pub fn terminal(&self) -> Option<OrganSeverity> {
        self.rows.first().map(|t| t.severity)
    }

    pub fn value_of(&self, severity: OrganSeverity) -> Option<Fixed2> {
        self.rows.iter().find(|t| t.severity == severity).map(|t| t.value)
    }
}

impl From<Vec<Threshold>> for ThresholdTable {
    fn from(rows: Vec<Threshold>) -> Self {
        Self::new(rows)
    }
}

impl From<ThresholdTable> for Vec<Threshold> {
    fn from(table: ThresholdTable) -> Self {
        table.rows
    }
}
