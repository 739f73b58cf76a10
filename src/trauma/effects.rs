//! Consequence effects handed to external collaborators
//!
//! Pain sounds, stuns, slowdowns and popups belong to other subsystems. The
//! organ consequences only describe them; whoever drives the world drains
//! the outbox and carries them out.

use serde::{Deserialize, Serialize};

use crate::core::EntityId;
use crate::organ::OrganSeverity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ConsequenceEffect {
    /// Tell the body's player an organ in `part` got worse
    Notice { body: EntityId, part: EntityId, organ: EntityId, severity: OrganSeverity },
    /// Reflex scream on organ destruction
    PainSound { body: EntityId },
    /// Paralyze for `duration` seconds
    Stun { body: EntityId, duration: f32 },
    /// Reduce movement speed for `duration` seconds
    Slowdown { body: EntityId, duration: f32, walk_speed: f32, run_speed: f32 },
    OrganDestroyedSound { body: EntityId, organ: EntityId },
    /// Organ taken out of its part and body
    OrganRemoved { organ: EntityId, part: Option<EntityId>, body: Option<EntityId> },
    Disposed { entity: EntityId },
}

impl ConsequenceEffect {
    pub fn name(&self) -> &'static str {
        match self {
            ConsequenceEffect::Notice { .. } => "notice",
            ConsequenceEffect::PainSound { .. } => "pain_sound",
            ConsequenceEffect::Stun { .. } => "stun",
            ConsequenceEffect::Slowdown { .. } => "slowdown",
            ConsequenceEffect::OrganDestroyedSound { .. } => "organ_destroyed_sound",
            ConsequenceEffect::OrganRemoved { .. } => "organ_removed",
            ConsequenceEffect::Disposed { .. } => "disposed",
        }
    }
}
