//! Consequence listeners for organ notifications
//!
//! These react to committed integrity and severity changes: pain on the part,
//! trauma cleanup, and the stun, slowdown and disposal that follow an organ's
//! destruction. Listeners tolerate organs that were disposed earlier in the
//! same dispatch.

use crate::body::PainType;
use crate::core::config::config;
use crate::core::{EntityId, Fixed2};
use crate::ecs::World;
use crate::organ::OrganSeverity;
use crate::trauma::effects::ConsequenceEffect;
use crate::trauma::events::OrganEvent;
use crate::trauma::records::TraumaKind;

/// Route an event to its listener
pub fn dispatch(world: &mut World, event: &OrganEvent) {
    match *event {
        OrganEvent::IntegrityChanged { organ, new, .. } => on_integrity_changed(world, organ, new),
        OrganEvent::IntegrityChangedOnPart { part, organ, .. } => on_integrity_changed_on_part(world, part, organ),
        OrganEvent::SeverityChanged { organ, old, new } => on_severity_changed(world, organ, old, new),
        OrganEvent::SeverityChangedOnPart { part, organ, old, new } => {
            on_severity_changed_on_part(world, part, organ, old, new)
        }
    }
}

/// Fully healed organs shed their organ-damage traumas
fn on_integrity_changed(world: &mut World, organ: EntityId, new: Fixed2) {
    let Some(o) = world.organ(organ) else {
        return;
    };
    if o.body().is_none() || new < o.integrity_cap() {
        return;
    }

    for owner in world.traumas.targeting(organ, TraumaKind::OrganDamage) {
        world.traumas.remove(owner);
    }
}

/// Internal pain tracks how much integrity the part's organs are missing
fn on_integrity_changed_on_part(world: &mut World, part: EntityId, organ: EntityId) {
    let Some(body) = world.owning_body(organ) else {
        return;
    };

    let (cap, integrity) = world
        .part_organs(part)
        .iter()
        .filter_map(|id| world.organ(*id))
        .fold((Fixed2::ZERO, Fixed2::ZERO), |(cap, integrity), o| {
            (cap + o.integrity_cap(), integrity + o.integrity())
        });

    let cfg = config();
    let pain = (cap - integrity).div_int(cfg.pain_divisor);
    let identifier = cfg.organ_damage_pain_identifier.as_str();

    let Some(nerves) = world.body_mut(body).and_then(|b| b.nerve_system.as_mut()) else {
        return;
    };
    if !nerves.try_change_pain_modifier(part, identifier, pain) {
        nerves.try_add_pain_modifier(part, identifier, pain, PainType::TraumaticPain);
    }
}

/// Drop traumas the organ has healed past
fn on_severity_changed(world: &mut World, organ: EntityId, old: OrganSeverity, new: OrganSeverity) {
    if new < old {
        let stale: Vec<EntityId> = world
            .traumas
            .targeting(organ, TraumaKind::OrganDamage)
            .into_iter()
            .filter(|owner| world.traumas.get(*owner).is_some_and(|t| t.inflicted_at > new))
            .collect();
        for owner in stale {
            world.traumas.remove(owner);
        }
    }
}

/// Final cleanup for an organ left in the terminal tier
///
/// Contained organs normally go through the part listener first; this picks
/// up loose organs and any organ a listener detached mid-cascade.
pub(crate) fn dispose_destroyed(world: &mut World, organ: EntityId) {
    for owner in world.traumas.targeting(organ, TraumaKind::OrganDamage) {
        world.traumas.remove(owner);
    }
    world.remove_organ(organ);
    if world.dispose(organ) {
        tracing::info!("Destroyed organ {} disposed", organ);
    }
}

/// Escalations notify the body; destruction stuns it and removes the organ
fn on_severity_changed_on_part(
    world: &mut World,
    part: EntityId,
    organ: EntityId,
    old: OrganSeverity,
    new: OrganSeverity,
) {
    if !old.escalates_to(new) || world.organ(organ).is_none() {
        return;
    }

    let body = world.owning_body(organ);
    if let Some(body) = body {
        world.push_effect(ConsequenceEffect::Notice {
            body,
            part,
            organ,
            severity: new,
        });
    }

    if !new.is_terminal() {
        return;
    }

    if let Some(body) = body {
        let stun_time = world
            .body(body)
            .and_then(|b| b.living_nerves())
            .map(|n| n.organ_damage_stun_time);

        if let Some(stun_time) = stun_time {
            let cfg = config();
            world.push_effect(ConsequenceEffect::PainSound { body });
            world.push_effect(ConsequenceEffect::Stun {
                body,
                duration: stun_time,
            });
            world.push_effect(ConsequenceEffect::Slowdown {
                body,
                duration: stun_time * cfg.slowdown_time_multiplier,
                walk_speed: cfg.walk_speed_slowdown,
                run_speed: cfg.run_speed_slowdown,
            });
        }
    }

    for owner in world.traumas.on_part_targeting(part, organ, TraumaKind::OrganDamage) {
        world.traumas.remove(owner);
    }

    if let Some(body) = body {
        world.push_effect(ConsequenceEffect::OrganDestroyedSound { body, organ });
    }
    world.remove_organ(organ);
    if world.dispose(organ) {
        tracing::info!("Organ {} destroyed in part {}", organ, part);
    }
}
