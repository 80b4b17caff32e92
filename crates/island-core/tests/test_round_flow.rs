//! Integration tests for a full round driven through the engine.
//!
//! Exercises: menu → Ground → Estate → Tunnels → Harbor → boat
//!
//! The player is moved by writing to the world directly so the script does
//! not depend on pathfinding around walls.

use island_core::prelude::*;
use island_logic::constants::{arena, harbor};
use island_logic::difficulty::Difficulty;
use island_logic::geometry::Vec2;
use island_logic::items::ItemKind;
use island_logic::zones::{KeyKind, Zone};

// ── Helpers ────────────────────────────────────────────────────────────

fn start(seed: u64, difficulty: Difficulty) -> GameEngine {
    let mut engine = GameEngine::new(seed);
    while engine.phase()
        != (Phase::Menu {
            selected: difficulty,
        })
    {
        engine.handle(Command::MenuDown);
    }
    engine.handle(Command::Start);
    assert_eq!(engine.phase(), Phase::Playing);

    // Guards keep shooting while the script runs.
    for (_, state) in engine.world.query_mut::<&mut PlayerState>() {
        state.health = 100_000;
    }
    engine
}

fn teleport(engine: &mut GameEngine, top_left: Vec2) {
    for (_, (_, body)) in engine.world.query_mut::<(&PlayerState, &mut Body)>() {
        body.rect.set_top_left(top_left);
    }
}

fn tick(engine: &mut GameEngine) {
    engine.update(arena::TICK_SECONDS + 0.0005, &PlayerInput::idle());
}

fn wait(engine: &mut GameEngine, seconds: f32) {
    let mut left = seconds;
    while left > 0.0 {
        engine.update(0.2, &PlayerInput::idle());
        left -= 0.2;
    }
}

/// Walk onto every pickup in the zone and press E.
fn collect_zone(engine: &mut GameEngine) {
    let spots: Vec<Vec2> = engine
        .visible_items()
        .iter()
        .map(|item| item.rect.top_left())
        .collect();
    for spot in spots {
        teleport(engine, spot);
        engine.handle(Command::Interact);
    }
    assert!(engine.visible_items().is_empty());
}

fn recruit_survivor(engine: &mut GameEngine) {
    let survivor = engine
        .survivors_in_zone()
        .into_iter()
        .find(|s| !s.following)
        .expect("a survivor waits here");
    teleport(engine, survivor.rect.top_left());
    engine.handle(Command::Interact);
    assert_eq!(engine.message(), Some("Survivor is now following you."));
}

fn take_forward_gate(engine: &mut GameEngine, to: Zone) {
    let gate = engine
        .layout()
        .gates
        .iter()
        .find(|g| g.target == to)
        .cloned()
        .expect("gate exists");
    teleport(engine, gate.rect.top_left());
    tick(engine);
    assert_eq!(engine.zone(), to, "stuck: {:?}", engine.message());
}

fn reach_harbor(engine: &mut GameEngine) {
    collect_zone(engine);
    take_forward_gate(engine, Zone::Estate);

    collect_zone(engine);
    recruit_survivor(engine);
    wait(engine, 0.8);
    take_forward_gate(engine, Zone::Tunnels);

    collect_zone(engine);
    recruit_survivor(engine);
    wait(engine, 0.8);
    take_forward_gate(engine, Zone::Harbor);
}

// ── Full run ───────────────────────────────────────────────────────────

#[test]
fn scripted_escape_reaches_victory() {
    let mut engine = start(5, Difficulty::Story);
    reach_harbor(&mut engine);

    let progress = engine.progress();
    assert_eq!(progress.clues, 3);
    assert!(progress.has_all_keys());
    assert!(progress.has_gun);
    assert_eq!(engine.survivors_in_zone().len(), 2);

    // Stand on the shore below the pier and put both followers past the rescue line.
    teleport(&mut engine, Vec2::new(950.0, 320.0));
    for (_, (s, body)) in engine.world.query_mut::<(&Survivor, &mut Body)>() {
        if s.following {
            body.rect.set_center(Vec2::new(1030.0, 330.0));
        }
    }
    tick(&mut engine);
    assert_eq!(engine.player().unwrap().state.rescued, 2);
    assert!(engine.survivors_in_zone().is_empty());

    engine.drain_events();
    teleport(&mut engine, Vec2::new(1030.0, 215.0));
    tick(&mut engine);

    assert_eq!(engine.phase(), Phase::Victory);
    let events = engine.drain_events();
    assert!(events.contains(&GameEvent::Victory));
    assert!(events.contains(&GameEvent::Sound {
        cue: SoundCue::Victory,
        priority: true
    }));

    engine.handle(Command::ReturnToMenu);
    assert_eq!(
        engine.phase(),
        Phase::Menu {
            selected: Difficulty::Story
        }
    );
}

#[test]
fn boat_refuses_unfinished_escape() {
    let mut engine = start(8, Difficulty::Survivor);
    reach_harbor(&mut engine);

    teleport(&mut engine, Vec2::new(1030.0, 215.0));
    tick(&mut engine);

    assert_eq!(engine.phase(), Phase::Playing);
    assert_eq!(
        engine.message(),
        Some("Not ready: need all clues, keys, and rescued survivors.")
    );
}

#[test]
fn harbor_water_sends_player_ashore() {
    let mut engine = start(13, Difficulty::Story);
    reach_harbor(&mut engine);
    engine.drain_events();

    teleport(&mut engine, Vec2::new(300.0, 100.0));
    tick(&mut engine);

    assert_eq!(engine.player().unwrap().rect.center(), harbor::LAND_RESCUE);
    assert_eq!(engine.message(), Some("You can't swim! Get back on land."));
    assert!(engine.drain_events().contains(&GameEvent::Sound {
        cue: SoundCue::Hurt,
        priority: false
    }));
}

// ── Gating ─────────────────────────────────────────────────────────────

#[test]
fn unfinished_region_keeps_gate_shut() {
    let mut engine = start(2, Difficulty::Story);

    // Only the key: clue and weapon still missing.
    let key_spot = engine
        .visible_items()
        .iter()
        .find(|i| i.id.kind == ItemKind::Key(KeyKind::Jail))
        .map(|i| i.rect.top_left())
        .unwrap();
    teleport(&mut engine, key_spot);
    engine.handle(Command::Interact);

    let gate = engine.layout().gates[0].clone();
    teleport(&mut engine, gate.rect.top_left());
    tick(&mut engine);

    assert_eq!(engine.zone(), Zone::Ground);
    assert_eq!(engine.message(), Some("Complete this region's tasks first."));
}

#[test]
fn walking_back_is_always_allowed() {
    let mut engine = start(4, Difficulty::Story);
    collect_zone(&mut engine);
    take_forward_gate(&mut engine, Zone::Estate);
    wait(&mut engine, 0.8);

    let back = engine
        .layout()
        .gates
        .iter()
        .find(|g| g.target == Zone::Ground)
        .cloned()
        .unwrap();
    teleport(&mut engine, back.rect.top_left());
    tick(&mut engine);
    assert_eq!(engine.zone(), Zone::Ground);
    assert!(engine.visible_items().is_empty());
}

// ── Persistence and determinism ────────────────────────────────────────

#[test]
fn save_mid_run_and_resume() {
    let mut engine = start(17, Difficulty::Nightmare);
    collect_zone(&mut engine);
    take_forward_gate(&mut engine, Zone::Estate);

    let mut buffer = Vec::new();
    engine.save(&mut buffer).expect("save failed");

    let mut resumed = GameEngine::new(0);
    resumed.load(&buffer[..]).expect("load failed");

    assert_eq!(resumed.zone(), Zone::Estate);
    assert_eq!(resumed.difficulty(), Difficulty::Nightmare);
    assert_eq!(resumed.progress(), engine.progress());
    assert_eq!(resumed.collected(), engine.collected());
    assert_eq!(resumed.visible_items().len(), engine.visible_items().len());
    assert_eq!(resumed.guards_in_zone().len(), engine.guards_in_zone().len());
}

#[test]
fn next_round_after_load_continues_the_sequence() {
    let mut engine = GameEngine::new(7);
    engine.reset_round(Difficulty::Survivor);
    let first = engine.items().clone();
    engine.reset_round(Difficulty::Survivor);
    assert_ne!(engine.items(), &first);

    let mut buffer = Vec::new();
    engine.save(&mut buffer).expect("save failed");
    let mut resumed = GameEngine::new(0);
    resumed.load(&buffer[..]).expect("load failed");
    assert_eq!(resumed.rounds(), 2);

    engine.reset_round(Difficulty::Survivor);
    resumed.reset_round(Difficulty::Survivor);
    assert_eq!(resumed.items(), engine.items());
    assert_ne!(resumed.items(), &first);
}

#[test]
fn same_seed_same_round() {
    let a = start(99, Difficulty::Survivor);
    let b = start(99, Difficulty::Survivor);
    assert_eq!(a.items(), b.items());
    assert_eq!(a.guards_in_zone(), b.guards_in_zone());
}
