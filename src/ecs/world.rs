//! ECS World - owns every organ, body part and body, addressed by id

use ahash::{AHashMap, AHashSet};

use crate::body::{Body, BodyPart, NerveSystem};
use crate::core::types::{EntityId, Tick};
use crate::organ::{Organ, OrganPrototype};
use crate::trauma::effects::ConsequenceEffect;
use crate::trauma::events::{EventLog, LoggedEvent, OrganEvent, OrganListener};
use crate::trauma::records::TraumaRegistry;

/// The simulation world containing all bodies and their organs
pub struct World {
    pub current_tick: Tick,
    organs: AHashMap<EntityId, Organ>,
    parts: AHashMap<EntityId, BodyPart>,
    bodies: AHashMap<EntityId, Body>,
    /// organ -> containing part
    containment: AHashMap<EntityId, EntityId>,
    disposed: AHashSet<EntityId>,
    pub traumas: TraumaRegistry,
    events: EventLog,
    effects: Vec<ConsequenceEffect>,
    listeners: Vec<OrganListener>,
}

impl World {
    pub fn new() -> Self {
        Self {
            current_tick: 0,
            organs: AHashMap::new(),
            parts: AHashMap::new(),
            bodies: AHashMap::new(),
            containment: AHashMap::new(),
            disposed: AHashSet::new(),
            traumas: TraumaRegistry::new(),
            events: EventLog::new(),
            effects: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn spawn_body(&mut self, nerve_system: Option<NerveSystem>) -> EntityId {
        let id = EntityId::new();
        let body = match nerve_system {
            Some(nerves) => Body::with_nerves(nerves),
            None => Body::new(),
        };
        self.bodies.insert(id, body);
        id
    }

    pub fn spawn_part(&mut self, body: Option<EntityId>, name: impl Into<String>) -> EntityId {
        let id = EntityId::new();
        self.parts.insert(id, BodyPart::new(name, body));
        if let Some(b) = body.and_then(|b| self.bodies.get_mut(&b)) {
            b.parts.push(id);
        }
        id
    }

    /// Spawn a loose organ, not inside any part
    pub fn spawn_organ(&mut self, proto: &OrganPrototype) -> EntityId {
        let id = EntityId::new();
        self.organs.insert(id, Organ::from_prototype(proto));
        id
    }

    /// Spawn an organ directly inside `part`
    pub fn spawn_organ_in(&mut self, part: EntityId, proto: &OrganPrototype) -> EntityId {
        let id = self.spawn_organ(proto);
        self.insert_organ(part, id);
        id
    }

    /// Place an organ in a part, taking it out of any previous part
    ///
    /// The organ's body back-reference follows the part's body.
    pub fn insert_organ(&mut self, part: EntityId, organ: EntityId) -> bool {
        if !self.organs.contains_key(&organ) {
            return false;
        }
        let Some(body) = self.parts.get(&part).map(|p| p.body) else {
            return false;
        };

        self.detach(organ);
        if let Some(p) = self.parts.get_mut(&part) {
            p.organs.push(organ);
        }
        self.containment.insert(organ, part);
        if let Some(o) = self.organs.get_mut(&organ) {
            o.set_body(body);
        }
        true
    }

    /// Take an organ out of its part and body; the organ itself stays alive
    pub fn remove_organ(&mut self, organ: EntityId) -> bool {
        let Some(body) = self.organs.get(&organ).map(|o| o.body()) else {
            return false;
        };
        let part = self.detach(organ);
        if part.is_none() && body.is_none() {
            return false;
        }

        if let Some(o) = self.organs.get_mut(&organ) {
            o.set_body(None);
        }
        self.effects.push(ConsequenceEffect::OrganRemoved { organ, part, body });
        true
    }

    /// Delete an entity's record; false if unknown or already disposed
    pub fn dispose(&mut self, entity: EntityId) -> bool {
        if self.disposed.contains(&entity) {
            return false;
        }

        let found = if self.organs.contains_key(&entity) {
            self.detach(entity);
            self.organs.remove(&entity);
            true
        } else if let Some(part) = self.parts.remove(&entity) {
            for organ in part.organs {
                self.containment.remove(&organ);
            }
            if let Some(b) = part.body.and_then(|b| self.bodies.get_mut(&b)) {
                b.parts.retain(|p| *p != entity);
            }
            true
        } else {
            self.bodies.remove(&entity).is_some()
        };

        if !found {
            return false;
        }

        self.traumas.remove(entity);
        self.disposed.insert(entity);
        self.effects.push(ConsequenceEffect::Disposed { entity });
        tracing::debug!("Disposed entity {}", entity);
        true
    }

    fn detach(&mut self, organ: EntityId) -> Option<EntityId> {
        let part = self.containment.remove(&organ)?;
        if let Some(p) = self.parts.get_mut(&part) {
            p.organs.retain(|o| *o != organ);
        }
        Some(part)
    }

    pub fn organ(&self, id: EntityId) -> Option<&Organ> {
        self.organs.get(&id)
    }

    pub fn organ_mut(&mut self, id: EntityId) -> Option<&mut Organ> {
        self.organs.get_mut(&id)
    }

    pub fn part(&self, id: EntityId) -> Option<&BodyPart> {
        self.parts.get(&id)
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.bodies.get(&id)
    }

    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        self.bodies.get_mut(&id)
    }

    /// The part an organ currently sits in
    pub fn containing_part(&self, organ: EntityId) -> Option<EntityId> {
        self.containment.get(&organ).copied()
    }

    pub fn owning_body(&self, organ: EntityId) -> Option<EntityId> {
        self.organs.get(&organ).and_then(|o| o.body())
    }

    /// Organs of a part in insertion order
    pub fn part_organs(&self, part: EntityId) -> &[EntityId] {
        self.parts.get(&part).map(|p| p.organs.as_slice()).unwrap_or(&[])
    }

    /// Owners of traumas inflicted through any of the body's parts
    pub fn body_traumas(&self, body: EntityId) -> Vec<EntityId> {
        self.bodies
            .get(&body)
            .map(|b| self.traumas.on_parts(&b.parts))
            .unwrap_or_default()
    }

    pub fn is_disposed(&self, id: EntityId) -> bool {
        self.disposed.contains(&id)
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Hand logged events to a consumer and free the log
    pub fn drain_events(&mut self) -> Vec<LoggedEvent> {
        self.events.drain()
    }

    pub(crate) fn record_event(&mut self, event: OrganEvent) {
        self.events.record(event);
    }

    pub fn subscribe(&mut self, listener: OrganListener) {
        self.listeners.push(listener);
    }

    /// Copy of the listener list, so listeners can subscribe while being notified
    pub(crate) fn listeners_snapshot(&self) -> Vec<OrganListener> {
        self.listeners.clone()
    }

    pub(crate) fn push_effect(&mut self, effect: ConsequenceEffect) {
        self.effects.push(effect);
    }

    pub fn effects(&self) -> &[ConsequenceEffect] {
        &self.effects
    }

    /// Hand pending effects to whoever carries them out
    pub fn drain_effects(&mut self) -> Vec<ConsequenceEffect> {
        std::mem::take(&mut self.effects)
    }

    pub fn tick(&mut self) {
        self.current_tick += 1;
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::organ::PrototypeRegistry;

    fn heart() -> OrganPrototype {
        PrototypeRegistry::with_defaults().get("heart").unwrap().clone()
    }

    #[test]
    fn test_insert_sets_containment_and_body() {
        let mut world = World::new();
        let body = world.spawn_body(None);
        let chest = world.spawn_part(Some(body), "chest");
        let organ = world.spawn_organ_in(chest, &heart());

        assert_eq!(world.containing_part(organ), Some(chest));
        assert_eq!(world.owning_body(organ), Some(body));
        assert_eq!(world.part_organs(chest), &[organ]);
        assert_eq!(world.body(body).unwrap().parts, vec![chest]);
    }

    #[test]
    fn test_moving_organ_between_parts() {
        let mut world = World::new();
        let body = world.spawn_body(None);
        let chest = world.spawn_part(Some(body), "chest");
        let groin = world.spawn_part(Some(body), "groin");
        let organ = world.spawn_organ_in(chest, &heart());

        assert!(world.insert_organ(groin, organ));
        assert!(world.part_organs(chest).is_empty());
        assert_eq!(world.containing_part(organ), Some(groin));
    }

    #[test]
    fn test_remove_organ_keeps_it_alive() {
        let mut world = World::new();
        let body = world.spawn_body(None);
        let chest = world.spawn_part(Some(body), "chest");
        let organ = world.spawn_organ_in(chest, &heart());

        assert!(world.remove_organ(organ));
        assert!(world.organ(organ).is_some());
        assert_eq!(world.containing_part(organ), None);
        assert_eq!(world.owning_body(organ), None);
        assert!(!world.remove_organ(organ));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let mut world = World::new();
        let chest = world.spawn_part(None, "chest");
        let organ = world.spawn_organ_in(chest, &heart());

        assert!(world.dispose(organ));
        assert!(!world.dispose(organ));
        assert!(world.is_disposed(organ));
        assert!(world.organ(organ).is_none());
        assert!(world.part_organs(chest).is_empty());

        let disposals = world
            .drain_effects()
            .into_iter()
            .filter(|e| matches!(e, ConsequenceEffect::Disposed { .. }))
            .count();
        assert_eq!(disposals, 1);
    }

    #[test]
    fn test_dispose_unknown_entity_fails() {
        let mut world = World::new();
        assert!(!world.dispose(EntityId::new()));
        assert!(world.effects().is_empty());
    }

    #[test]
    fn test_insert_into_missing_part_fails() {
        let mut world = World::new();
        let organ = world.spawn_organ(&heart());
        assert!(!world.insert_organ(EntityId::new(), organ));
        assert_eq!(world.containing_part(organ), None);
    }

    #[test]
    fn test_body_traumas_follow_parts() {
        use crate::organ::OrganSeverity;
        use crate::trauma::records::{TraumaKind, TraumaRecord};

        let mut world = World::new();
        let body = world.spawn_body(None);
        let chest = world.spawn_part(Some(body), "chest");
        let organ = world.spawn_organ_in(chest, &heart());
        let owner = EntityId::new();
        world.traumas.insert(TraumaRecord {
            owner,
            kind: TraumaKind::OrganDamage,
            target: organ,
            part: Some(chest),
            inflicted_at: OrganSeverity::Light,
        });

        assert_eq!(world.body_traumas(body), vec![owner]);
        assert!(world.body_traumas(EntityId::new()).is_empty());
    }

    #[test]
    fn test_drain_events_keeps_sequence() {
        use crate::core::Fixed2;
        use crate::trauma::apply_organ_damage;

        let mut world = World::new();
        let organ = world.spawn_organ(&heart());
        apply_organ_damage(&mut world, organ, Fixed2::new(10), EntityId::new(), "Burn");

        let drained = world.drain_events();
        assert_eq!(drained.len(), 1);
        assert!(world.events().is_empty());

        apply_organ_damage(&mut world, organ, Fixed2::new(10), EntityId::new(), "Burn");
        assert_eq!(world.events().len(), 1);
        assert_eq!(world.events().next_seq(), 2);
    }
}
