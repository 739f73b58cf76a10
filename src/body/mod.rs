//! Bodies and body parts
//!
//! A body owns parts; a part contains organs. Containment is looked up, never
//! mutated, by the organ engine.

pub mod nerve;

use crate::core::EntityId;

pub use nerve::{NerveSystem, PainModifier, PainType};

/// A woundable body part holding organs
#[derive(Debug, Clone)]
pub struct BodyPart {
    pub name: String,
    pub body: Option<EntityId>,
    /// Contained organs, in insertion order
    pub organs: Vec<EntityId>,
}

impl BodyPart {
    pub fn new(name: impl Into<String>, body: Option<EntityId>) -> Self {
        Self {
            name: name.into(),
            body,
            organs: Vec::new(),
        }
    }

    pub fn contains(&self, organ: EntityId) -> bool {
        self.organs.contains(&organ)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Body {
    pub parts: Vec<EntityId>,
    /// Bodies without nerves feel nothing and are never stunned
    pub nerve_system: Option<NerveSystem>,
    pub dead: bool,
}

impl Body {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_nerves(nerve_system: NerveSystem) -> Self {
        Self {
            nerve_system: Some(nerve_system),
            ..Self::default()
        }
    }

    /// Nerve system of a living body
    pub fn living_nerves(&self) -> Option<&NerveSystem> {
        if self.dead {
            return None;
        }
        self.nerve_system.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dead_body_has_no_living_nerves() {
        let mut body = Body::with_nerves(NerveSystem::new(1.0));
        assert!(body.living_nerves().is_some());
        body.dead = true;
        assert!(body.living_nerves().is_none());
    }

    #[test]
    fn test_part_contains() {
        let mut part = BodyPart::new("chest", None);
        let organ = EntityId::new();
        assert!(!part.contains(organ));
        part.organs.push(organ);
        assert!(part.contains(organ));
    }
}
