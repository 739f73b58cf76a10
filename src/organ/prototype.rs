//! Organ prototypes loaded from TOML
//!
//! A prototype fixes an organ type's integrity cap and threshold table.
//! Thresholds are written as an array of tables so their declaration order
//! survives parsing; that order breaks ties between equal values.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{Result, TraumaError};
use crate::core::Fixed2;
use crate::organ::severity::{OrganSeverity, ThresholdTable};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrganPrototype {
    pub id: String,
    pub integrity_cap: Fixed2,
    pub thresholds: ThresholdTable,
}

impl OrganPrototype {
    pub fn new(id: impl Into<String>, integrity_cap: i64, thresholds: &[(OrganSeverity, i64)]) -> Self {
        Self {
            id: id.into(),
            integrity_cap: Fixed2::new(integrity_cap),
            thresholds: ThresholdTable::from_pairs(thresholds),
        }
    }

    /// Check cap and threshold table for consistency
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.integrity_cap <= Fixed2::ZERO {
            return Err(format!("{}: integrity_cap must be positive", self.id));
        }

        let rows = self.thresholds.rows();
        for (i, row) in rows.iter().enumerate() {
            if row.severity == OrganSeverity::Normal {
                return Err(format!("{}: Normal is implicit and cannot have a threshold", self.id));
            }
            if row.value.is_negative() || row.value > self.integrity_cap {
                return Err(format!(
                    "{}: {} threshold {} outside 0..={}",
                    self.id,
                    row.severity.name(),
                    row.value,
                    self.integrity_cap
                ));
            }
            if rows[..i].iter().any(|r| r.severity == row.severity) {
                return Err(format!("{}: duplicate {} threshold", self.id, row.severity.name()));
            }
        }

        // Rows are sorted by value; a lower value must never mean a milder tier
        for pair in rows.windows(2) {
            if pair[1].severity > pair[0].severity {
                return Err(format!(
                    "{}: {} ({}) is worse than {} ({}) but has a higher threshold",
                    self.id,
                    pair[1].severity.name(),
                    pair[1].value,
                    pair[0].severity.name(),
                    pair[0].value
                ));
            }
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct PrototypeFile {
    #[serde(rename = "organ", default)]
    organs: Vec<OrganPrototype>,
}

/// Registry of organ prototypes by id
#[derive(Debug, Clone, Default)]
pub struct PrototypeRegistry {
    by_id: AHashMap<String, OrganPrototype>,
}

impl PrototypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in human organ set
    pub fn with_defaults() -> Self {
        use OrganSeverity::*;

        let mut registry = Self::new();
        let standard = [(Light, 75), (Moderate, 50), (Severe, 25), (Destroyed, 0)];
        for id in ["heart", "lungs", "liver", "kidneys", "stomach"] {
            registry.insert(OrganPrototype::new(id, 100, &standard));
        }
        registry.insert(OrganPrototype::new(
            "brain",
            100,
            &[(Light, 80), (Moderate, 60), (Severe, 40), (Critical, 20), (Destroyed, 0)],
        ));
        registry.insert(OrganPrototype::new(
            "eyes",
            50,
            &[(Light, 35), (Severe, 15), (Destroyed, 0)],
        ));
        registry
    }

    pub fn insert(&mut self, prototype: OrganPrototype) -> Option<OrganPrototype> {
        self.by_id.insert(prototype.id.clone(), prototype)
    }

    /// Parse prototypes from TOML, validating each one
    ///
    /// Later definitions with the same id replace earlier ones.
    pub fn load_from_str(&mut self, content: &str) -> Result<usize> {
        let file: PrototypeFile = toml::from_str(content)?;
        let count = file.organs.len();

        for proto in &file.organs {
            proto.validate().map_err(TraumaError::Validation)?;
        }
        for proto in file.organs {
            self.insert(proto);
        }

        tracing::debug!("Loaded {} organ prototypes", count);
        Ok(count)
    }

    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let content = fs::read_to_string(path.as_ref())?;
        self.load_from_str(&content)
    }

    pub fn get(&self, id: &str) -> Result<&OrganPrototype> {
        self.by_id
            .get(id)
            .ok_or_else(|| TraumaError::UnknownPrototype(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Prototype ids, sorted
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.by_id.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}
