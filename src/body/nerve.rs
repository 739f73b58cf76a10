//! Nerve system: the pain modifiers a body carries
//!
//! Only the call contract the organ consequences need lives here. Pain
//! modifiers are keyed by `(part, identifier)` like organ modifiers are keyed
//! by `(identifier, owner)`.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EntityId, Fixed2};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PainType {
    /// Pain from wounds on the skin and flesh
    WoundPain,
    /// Internal pain, e.g. from damaged organs
    TraumaticPain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PainModifier {
    pub amount: Fixed2,
    pub kind: PainType,
}

#[derive(Debug, Clone)]
pub struct NerveSystem {
    modifiers: AHashMap<(EntityId, String), PainModifier>,
    /// Paralysis length (seconds) when one of the body's organs is destroyed
    pub organ_damage_stun_time: f32,
}

impl NerveSystem {
    pub fn new(organ_damage_stun_time: f32) -> Self {
        Self {
            modifiers: AHashMap::new(),
            organ_damage_stun_time,
        }
    }

    /// Add a new modifier; fails on a zero amount or an existing key
    pub fn try_add_pain_modifier(
        &mut self,
        part: EntityId,
        identifier: &str,
        amount: Fixed2,
        kind: PainType,
    ) -> bool {
        if amount.is_zero() {
            return false;
        }

        let key = (part, identifier.to_string());
        if self.modifiers.contains_key(&key) {
            return false;
        }
        self.modifiers.insert(key, PainModifier { amount, kind });
        true
    }

    /// Replace the amount of an existing modifier; fails if absent
    pub fn try_change_pain_modifier(&mut self, part: EntityId, identifier: &str, amount: Fixed2) -> bool {
        match self.modifiers.get_mut(&(part, identifier.to_string())) {
            Some(modifier) => {
                modifier.amount = amount;
                true
            }
            None => false,
        }
    }

    pub fn pain_modifier(&self, part: EntityId, identifier: &str) -> Option<PainModifier> {
        self.modifiers.get(&(part, identifier.to_string())).copied()
    }

    pub fn total_pain(&self) -> Fixed2 {
        self.modifiers.values().map(|m| m.amount).sum()
    }

    pub fn modifier_count(&self) -> usize {
        self.modifiers.len()
    }
}

impl Default for NerveSystem {
    fn default() -> Self {
        Self::new(crate::core::config::config().default_stun_time)
    }
}
