//! Organ trauma: the damage engine and what follows from it

pub mod consequences;
pub mod effects;
pub mod engine;
pub mod events;
pub mod records;

pub use effects::ConsequenceEffect;
pub use engine::{
    apply_organ_damage, change_organ_damage, inflict_organ_trauma, reconfigure_integrity_cap,
    remove_organ_damage, set_organ_damage, TRAUMA_MODIFIER_IDENTIFIER,
};
pub use events::{EventLog, LoggedEvent, OrganEvent, OrganListener};
pub use records::{TraumaKind, TraumaRecord, TraumaRegistry};
