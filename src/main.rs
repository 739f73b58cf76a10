//! Organ Sim - headless organ damage scenario runner
//!
//! Builds one body, then drives a seeded schedule of hits, healing and
//! trauma through the public modifier API, one call per tick. Prints a
//! summary of where every organ ended up.

use std::collections::BTreeMap;

use clap::Parser;
use organ_trauma::body::NerveSystem;
use organ_trauma::core::config::{load_config, set_config, TraumaConfig};
use organ_trauma::core::error::Result;
use organ_trauma::core::{EntityId, Fixed2};
use organ_trauma::ecs::World;
use organ_trauma::organ::PrototypeRegistry;
use organ_trauma::trauma::{
    apply_organ_damage, inflict_organ_trauma, remove_organ_damage, ConsequenceEffect,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

/// Organ Sim - drive organ damage through a body and report the outcome
#[derive(Parser, Debug)]
#[command(name = "organ-sim")]
#[command(about = "Run a seeded organ damage scenario and print the outcome")]
struct Args {
    /// Organ prototype file (built-in prototypes are used if it fails to load)
    #[arg(long, default_value = "data/organs.toml")]
    organs: String,

    /// Consequence tuning file
    #[arg(long, default_value = "data/trauma.toml")]
    config: String,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Largest single hit
    #[arg(long, default_value_t = 12)]
    max_hit: i64,

    /// Chance per tick that a medic heals instead of an attacker hitting
    #[arg(long, default_value_t = 0.35)]
    heal_chance: f64,

    /// Random seed for deterministic runs
    #[arg(long)]
    seed: Option<u64>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Serialize)]
struct OrganReport {
    integrity: Fixed2,
    integrity_cap: Fixed2,
    severity: String,
    modifiers: usize,
}

/// Organ-level notifications seen over the run
#[derive(Serialize, Default)]
struct EventTally {
    integrity: usize,
    severity: usize,
    by_organ: BTreeMap<String, usize>,
}

#[derive(Serialize)]
struct SimResult {
    seed: u64,
    ticks: u64,
    organs: BTreeMap<String, Option<OrganReport>>,
    destroyed: Vec<String>,
    events: EventTally,
    effects: BTreeMap<&'static str, usize>,
    open_traumas: usize,
    total_pain: Fixed2,
}

const ATTACKS: [&str; 3] = ["Blunt", "Toxin", "Burn"];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = load_config(&args.config).unwrap_or_else(|e| {
        tracing::warn!("Failed to load config '{}': {} - using defaults", args.config, e);
        TraumaConfig::default()
    });
    let stun_time = config.default_stun_time;
    if set_config(config).is_err() {
        tracing::warn!("Trauma config already set");
    }

    let mut registry = PrototypeRegistry::new();
    if let Err(e) = registry.load_from_file(&args.organs) {
        tracing::warn!("Failed to load organs '{}': {} - using built-ins", args.organs, e);
        registry = PrototypeRegistry::with_defaults();
    }

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    // Build the body
    let mut world = World::new();
    let body = world.spawn_body(Some(NerveSystem::new(stun_time)));
    let mut organs: Vec<(String, EntityId)> = Vec::new();
    for (part_name, organ_ids) in [
        ("chest", &["heart", "lungs"][..]),
        ("abdomen", &["liver", "stomach"][..]),
        ("head", &["brain"][..]),
    ] {
        let part = world.spawn_part(Some(body), part_name);
        for id in organ_ids {
            match registry.get(id) {
                Ok(proto) => organs.push((id.to_string(), world.spawn_organ_in(part, proto))),
                Err(e) => tracing::warn!("Skipping organ: {}", e),
            }
        }
    }
    tracing::info!("Spawned body with {} organs (seed {})", organs.len(), seed);

    let attackers: Vec<EntityId> = (0..3).map(|_| EntityId::new()).collect();
    let medic = EntityId::new();
    let mut effect_counts: BTreeMap<&'static str, usize> = BTreeMap::new();
    let mut tally = EventTally::default();

    while world.current_tick < args.ticks {
        let alive: Vec<EntityId> = organs
            .iter()
            .map(|(_, id)| *id)
            .filter(|id| world.organ(*id).is_some())
            .collect();
        if alive.is_empty() {
            break;
        }
        let organ = alive[rng.gen_range(0..alive.len())];
        let attacker = attackers[rng.gen_range(0..attackers.len())];

        let roll: f64 = rng.gen();
        if roll < args.heal_chance {
            let amount = Fixed2::new(rng.gen_range(1..=args.max_hit.max(1)));
            apply_organ_damage(&mut world, organ, -amount, medic, "Medicine");
        } else if roll < args.heal_chance + 0.05 {
            // An attacker's effect wears off
            let identifier = ATTACKS[rng.gen_range(0..ATTACKS.len())];
            remove_organ_damage(&mut world, organ, attacker, identifier);
        } else if roll < args.heal_chance + 0.10 {
            let amount = Fixed2::new(rng.gen_range(1..=args.max_hit.max(1)));
            inflict_organ_trauma(&mut world, organ, attacker, amount);
        } else {
            let identifier = ATTACKS[rng.gen_range(0..ATTACKS.len())];
            let amount = Fixed2::new(rng.gen_range(1..=args.max_hit.max(1)));
            apply_organ_damage(&mut world, organ, amount, attacker, identifier);
        }

        for effect in world.drain_effects() {
            if let ConsequenceEffect::Disposed { entity } = &effect {
                if let Some((name, _)) = organs.iter().find(|(_, id)| id == entity) {
                    tracing::info!("Tick {}: {} destroyed", world.current_tick, name);
                }
            }
            *effect_counts.entry(effect.name()).or_default() += 1;
        }

        // Part-level events mirror the organ ones
        for logged in world.drain_events() {
            let event = logged.event;
            if event.is_on_part() {
                continue;
            }
            if event.is_integrity() {
                tally.integrity += 1;
            } else {
                tally.severity += 1;
            }
            if let Some((name, _)) = organs.iter().find(|(_, id)| *id == event.organ()) {
                *tally.by_organ.entry(name.clone()).or_default() += 1;
            }
        }
        world.tick();
    }

    let mut reports = BTreeMap::new();
    let mut destroyed = Vec::new();
    for (name, id) in &organs {
        let report = world.organ(*id).map(|o| OrganReport {
            integrity: o.integrity(),
            integrity_cap: o.integrity_cap(),
            severity: o.severity().name().to_string(),
            modifiers: o.modifiers().len(),
        });
        if report.is_none() {
            destroyed.push(name.clone());
        }
        reports.insert(name.clone(), report);
    }

    let total_pain = world
        .body(body)
        .and_then(|b| b.nerve_system.as_ref())
        .map(|n| n.total_pain())
        .unwrap_or_default();

    let result = SimResult {
        seed,
        ticks: world.current_tick,
        organs: reports,
        destroyed,
        events: tally,
        effects: effect_counts,
        open_traumas: world.traumas.len(),
        total_pain,
    };

    match args.format.as_str() {
        "text" => {
            println!("Organ Sim Result");
            println!("================");
            println!("Seed: {}  Ticks: {}", result.seed, result.ticks);
            for (name, report) in &result.organs {
                match report {
                    Some(r) => println!(
                        "  {:<8} {:>7} / {:<7} {}",
                        name, r.integrity, r.integrity_cap, r.severity
                    ),
                    None => println!("  {:<8} destroyed", name),
                }
            }
            println!(
                "Events: {} integrity, {} severity  Open traumas: {}",
                result.events.integrity, result.events.severity, result.open_traumas
            );
            println!("Total pain: {}", result.total_pain);
            for (name, count) in &result.effects {
                println!("  {}: {}", name, count);
            }
        }
        other => {
            if other != "json" {
                tracing::warn!("Unknown format '{}', defaulting to json", other);
            }
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
