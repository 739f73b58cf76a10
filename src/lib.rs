//! Organ Trauma - organ integrity and severity engine for simulated bodies
//!
//! Organs collect named damage modifiers, derive a clamped integrity from
//! them, classify it into a severity tier, and notify their body part when
//! either changes. Consequences (pain, stun, destruction) hang off those
//! notifications.

pub mod body;
pub mod core;
pub mod ecs;
pub mod organ;
pub mod trauma;
