//! Organ damage engine: the public modifier API
//!
//! Every call mutates one organ's modifier store, then recomputes integrity
//! and severity exactly once and emits notifications for whatever actually
//! changed. Failure is a `false` return with no state change; nothing here
//! panics or returns an error.
//!
//! Notifications run synchronously and may re-enter the engine. All organ
//! state is committed before listeners run, and the organ is looked up again
//! after each round of listeners since one of them may have disposed it.
//! An organ that ends a call in the terminal tier is always disposed.

use crate::core::{EntityId, Fixed2};
use crate::ecs::World;
use crate::organ::{ModifierKey, Upsert};
use crate::trauma::consequences;
use crate::trauma::events::OrganEvent;
use crate::trauma::records::{TraumaKind, TraumaRecord};

/// Modifier identifier used by `inflict_organ_trauma`
pub const TRAUMA_MODIFIER_IDENTIFIER: &str = "OrganTrauma";

/// Add damage under `(identifier, owner)`, creating the entry or adding to it
///
/// The preferred entry point. Tries to create first; if the key already
/// exists the magnitude is accumulated onto it instead.
pub fn apply_organ_damage(
    world: &mut World,
    organ: EntityId,
    magnitude: Fixed2,
    owner: EntityId,
    identifier: &str,
) -> bool {
    if magnitude.is_zero() {
        return false;
    }

    if !create_organ_damage(world, organ, magnitude, owner, identifier)
        && !change_organ_damage(world, organ, magnitude, owner, identifier)
    {
        tracing::trace!("Organ damage {} from {} rejected on {}", identifier, owner, organ);
        return false;
    }
    true
}

/// Insert a new modifier; fails if the key already exists
fn create_organ_damage(
    world: &mut World,
    organ: EntityId,
    magnitude: Fixed2,
    owner: EntityId,
    identifier: &str,
) -> bool {
    let Some(o) = world.organ_mut(organ) else {
        return false;
    };
    if !o.modifiers_mut().upsert(ModifierKey::new(identifier, owner), magnitude, Upsert::Create) {
        return false;
    }

    update_organ_integrity(world, organ);
    true
}

/// Insert or overwrite a modifier with exactly `magnitude`
pub fn set_organ_damage(
    world: &mut World,
    organ: EntityId,
    magnitude: Fixed2,
    owner: EntityId,
    identifier: &str,
) -> bool {
    let Some(o) = world.organ_mut(organ) else {
        return false;
    };
    if !o.modifiers_mut().upsert(ModifierKey::new(identifier, owner), magnitude, Upsert::Overwrite) {
        return false;
    }

    update_organ_integrity(world, organ);
    true
}

/// Add `delta` to an existing modifier; fails if there is none
pub fn change_organ_damage(
    world: &mut World,
    organ: EntityId,
    delta: Fixed2,
    owner: EntityId,
    identifier: &str,
) -> bool {
    let Some(o) = world.organ_mut(organ) else {
        return false;
    };
    if !o.modifiers_mut().accumulate(&ModifierKey::new(identifier, owner), delta) {
        return false;
    }

    update_organ_integrity(world, organ);
    true
}

/// Remove a modifier, resolving the owner's trauma on this organ with it
pub fn remove_organ_damage(world: &mut World, organ: EntityId, owner: EntityId, identifier: &str) -> bool {
    let Some(o) = world.organ_mut(organ) else {
        return false;
    };
    if !o.modifiers_mut().remove(&ModifierKey::new(identifier, owner)) {
        return false;
    }

    if world.traumas.get(owner).is_some_and(|t| t.target == organ) {
        world.traumas.remove(owner);
        tracing::debug!("Trauma {} on organ {} resolved with its modifier", owner, organ);
    }

    update_organ_integrity(world, organ);
    true
}

/// Damage an organ and record the owner's trauma on it
///
/// The trauma is resolved when the owner's modifier is removed, or when the
/// organ heals past the severity it caused.
pub fn inflict_organ_trauma(world: &mut World, organ: EntityId, owner: EntityId, magnitude: Fixed2) -> bool {
    let part = world.containing_part(organ);
    if !apply_organ_damage(world, organ, magnitude, owner, TRAUMA_MODIFIER_IDENTIFIER) {
        return false;
    }

    // The hit may have destroyed and disposed the organ already
    if let Some(o) = world.organ(organ) {
        let record = TraumaRecord {
            owner,
            kind: TraumaKind::OrganDamage,
            target: organ,
            part,
            inflicted_at: o.severity(),
        };
        world.traumas.insert(record);
    }
    true
}

/// Change an organ's integrity cap and re-derive its state
pub fn reconfigure_integrity_cap(world: &mut World, organ: EntityId, cap: Fixed2) -> bool {
    if cap <= Fixed2::ZERO {
        return false;
    }
    let Some(o) = world.organ_mut(organ) else {
        return false;
    };
    if o.integrity_cap() == cap {
        return false;
    }
    o.reconfigure_cap(cap);

    update_organ_integrity(world, organ);
    true
}

/// Recompute integrity, then severity, notifying after each real change
fn update_organ_integrity(world: &mut World, organ: EntityId) {
    let Some(o) = world.organ_mut(organ) else {
        return;
    };

    if let Some(change) = o.recompute_integrity() {
        tracing::debug!("Organ {} integrity {} -> {}", organ, change.old, change.new);

        emit(world, OrganEvent::IntegrityChanged {
            organ,
            old: change.old,
            new: change.new,
        });
        if let Some(part) = world.containing_part(organ) {
            emit(world, OrganEvent::IntegrityChangedOnPart {
                part,
                organ,
                old: change.old,
                new: change.new,
            });
        }
    }

    let Some(o) = world.organ_mut(organ) else {
        return;
    };

    if let Some(change) = o.reclassify() {
        tracing::debug!(
            "Organ {} severity {} -> {}",
            organ,
            change.old.name(),
            change.new.name()
        );

        emit(world, OrganEvent::SeverityChanged {
            organ,
            old: change.old,
            new: change.new,
        });
        if let Some(part) = world.containing_part(organ) {
            emit(world, OrganEvent::SeverityChangedOnPart {
                part,
                organ,
                old: change.old,
                new: change.new,
            });
        }

        // Listeners may have taken the organ out of its part before the part
        // handler ran; a destroyed organ still leaves the world exactly once
        if world.organ(organ).is_some_and(|o| o.severity().is_terminal()) {
            consequences::dispose_destroyed(world, organ);
        }
    }
}

fn emit(world: &mut World, event: OrganEvent) {
    world.record_event(event.clone());
    consequences::dispatch(world, &event);

    for listener in world.listeners_snapshot() {
        listener(world, &event);
    }
}
