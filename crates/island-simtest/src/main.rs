//! Escape the Secret Island Headless Harness
//!
//! Validates zone data, spawn tables and whole rounds without a window.
//! Runs entirely in-process: no rendering, no audio, no files.
//!
//! Usage:
//!   cargo run -p island-simtest
//!   cargo run -p island-simtest -- --verbose
//!   cargo run -p island-simtest -- --json

use std::collections::HashSet;

use island_core::engine::{Command, GameEngine, Phase};
use island_core::generation::randomize_items;
use island_core::systems::PlayerInput;
use island_logic::constants::{arena, player};
use island_logic::difficulty::Difficulty;
use island_logic::geometry::{Rect, Vec2};
use island_logic::spawns::{guard_plan, is_guard_spawn_valid, is_position_safe, safe_candidates};
use island_logic::zones::{layout, Zone};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

/// Seeds swept by the randomized checks.
const SEEDS: u64 = 50;
/// Simulated seconds per headless round.
const ROUND_SECONDS: f32 = 30.0;

// ── Test harness ────────────────────────────────────────────────────────

#[derive(Serialize)]
struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

#[derive(Serialize)]
struct Report<'a> {
    passed: usize,
    failed: usize,
    results: &'a [TestResult],
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let json = std::env::args().any(|a| a == "--json");
    if !json {
        println!("=== Escape the Secret Island Harness ===\n");
    }

    let mut results = Vec::new();

    let verbose = verbose && !json;
    let sections: [(&str, fn(bool) -> Vec<TestResult>); 6] = [
        // 1. Zone layouts and gates
        ("Zone Layouts", validate_layouts),
        // 2. Pickup spots and the player start
        ("Spawn Safety", validate_spawn_safety),
        // 3. Guard rosters per difficulty
        ("Guard Plans", validate_guard_plans),
        // 4. Item randomization across seeds
        ("Item Randomization", validate_item_randomization),
        // 5. Headless rounds
        ("Headless Rounds", validate_headless_rounds),
        // 6. Save / load
        ("Save / Load", validate_persistence),
    ];
    for (title, run) in sections {
        if !json {
            println!("--- {} ---", title);
        }
        results.extend(run(verbose));
    }

    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    if json {
        let report = Report {
            passed,
            failed,
            results: &results,
        };
        match serde_json::to_string_pretty(&report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("could not encode report: {}", e);
                std::process::exit(2);
            }
        }
    } else {
        // ── Summary ──
        println!();
        for r in &results {
            let icon = if r.passed { "✓" } else { "✗" };
            if !r.passed || verbose {
                println!("  {} {}: {}", icon, r.name, r.detail);
            }
        }
        println!(
            "\n=== RESULT: {}/{} passed, {} failed ===",
            passed, total, failed
        );
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn arena_rect() -> Rect {
    Rect::new(0.0, 0.0, arena::WIDTH, arena::HEIGHT)
}

fn inside_arena(r: &Rect) -> bool {
    r.left() >= 0.0 && r.top() >= 0.0 && r.right() <= arena::WIDTH && r.bottom() <= arena::HEIGHT
}

// ── 1. Layouts ──────────────────────────────────────────────────────────

fn validate_layouts(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    for zone in Zone::all() {
        let l = layout(*zone);

        let outside: Vec<_> = l.gates.iter().filter(|g| !inside_arena(&g.rect)).collect();
        results.push(TestResult {
            name: format!("{}_gates_inside_arena", zone.name().to_lowercase()),
            passed: outside.is_empty(),
            detail: format!("{} gate(s), {} outside", l.gates.len(), outside.len()),
        });

        // Arriving bodies must not start inside a wall of the target zone.
        for gate in &l.gates {
            let body = Rect::new(gate.spawn.x, gate.spawn.y, player::WIDTH, player::HEIGHT);
            let walls = layout(gate.target).collision_walls();
            let blocked = walls.iter().filter(|w| w.intersects(&body)).count();
            results.push(TestResult {
                name: format!("{}_to_{}_spawn_clear", zone, gate.target).to_lowercase(),
                passed: blocked == 0 && inside_arena(&body),
                detail: format!(
                    "arrive at ({:.0}, {:.0}), {} wall overlap(s)",
                    gate.spawn.x, gate.spawn.y, blocked
                ),
            });

            let back = layout(gate.target).gates.iter().any(|g| g.target == *zone);
            results.push(TestResult {
                name: format!("{}_to_{}_reciprocal", zone, gate.target).to_lowercase(),
                passed: back,
                detail: format!("{} leads back to {}: {}", gate.target, zone, back),
            });
        }

        if verbose {
            println!(
                "  {}: {} obstacles, {} collision walls, {} gates, extraction={}",
                zone,
                l.obstacles.len(),
                l.collision_walls().len(),
                l.gates.len(),
                l.extraction.is_some()
            );
        }
    }

    let harbor_exits = Zone::all()
        .iter()
        .filter(|z| layout(**z).extraction.is_some())
        .count();
    results.push(TestResult {
        name: "single_extraction_point".into(),
        passed: harbor_exits == 1 && layout(Zone::Harbor).extraction.is_some(),
        detail: format!("{} zone(s) with a boat", harbor_exits),
    });

    results
}

// ── 2. Spawn Safety ─────────────────────────────────────────────────────

fn validate_spawn_safety(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    for zone in [Zone::Ground, Zone::Estate, Zone::Tunnels] {
        let spots = safe_candidates(zone);
        let unsafe_spots = spots.iter().filter(|p| !is_position_safe(zone, **p)).count();
        results.push(TestResult {
            name: format!("{}_candidates_safe", zone.name().to_lowercase()),
            passed: !spots.is_empty() && unsafe_spots == 0,
            detail: format!("{} candidates, {} unsafe", spots.len(), unsafe_spots),
        });
    }

    let start = Rect::new(player::START_X, player::START_Y, player::WIDTH, player::HEIGHT);
    let walls = layout(Zone::Ground).collision_walls();
    results.push(TestResult {
        name: "player_start_clear".into(),
        passed: !walls.iter().any(|w| w.intersects(&start)) && arena_rect().intersects(&start),
        detail: format!("start at ({}, {})", player::START_X, player::START_Y),
    });

    results
}

// ── 3. Guard Plans ──────────────────────────────────────────────────────

fn validate_guard_plans(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let mut counts = Vec::new();

    for difficulty in Difficulty::all() {
        let profile = difficulty.profile();
        let plans = guard_plan(&profile);
        counts.push(plans.len());

        let bad: Vec<String> = plans
            .iter()
            .filter(|p| !is_guard_spawn_valid(p.zone, p.spawn))
            .map(|p| format!("{}@({:.0},{:.0})", p.zone, p.spawn.x, p.spawn.y))
            .collect();
        results.push(TestResult {
            name: format!("{}_guard_spawns_valid", difficulty.name().to_lowercase()),
            passed: bad.is_empty(),
            detail: if bad.is_empty() {
                format!("{} guards placed clear of walls", plans.len())
            } else {
                format!("blocked: {}", bad.join(", "))
            },
        });

        let no_patrol = plans.iter().filter(|p| p.patrol.is_empty()).count();
        results.push(TestResult {
            name: format!("{}_guard_patrols", difficulty.name().to_lowercase()),
            passed: no_patrol == 0,
            detail: format!("{} guard(s) without waypoints", no_patrol),
        });

        if verbose {
            for zone in Zone::all() {
                let n = plans.iter().filter(|p| p.zone == *zone).count();
                println!("  {:9} {:8}: {} guards", difficulty.name(), zone, n);
            }
        }
    }

    results.push(TestResult {
        name: "guard_count_scales_with_difficulty".into(),
        passed: counts.windows(2).all(|w| w[0] < w[1]),
        detail: format!("{:?}", counts),
    });

    results
}

// ── 4. Item Randomization ───────────────────────────────────────────────

fn validate_item_randomization(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut duplicate_seeds = Vec::new();
    let mut unsafe_seeds = Vec::new();
    let mut layouts = HashSet::new();
    for seed in 0..SEEDS {
        let table = randomize_items(&mut StdRng::seed_from_u64(seed));
        let corners: Vec<(i32, i32)> = table
            .items
            .iter()
            .map(|i| (i.rect.x as i32, i.rect.y as i32))
            .collect();
        let unique: HashSet<_> = corners.iter().collect();
        if unique.len() != corners.len() {
            duplicate_seeds.push(seed);
        }
        if table.items.iter().any(|i| {
            let walls = layout(i.id.zone).collision_walls();
            walls.iter().any(|w| w.intersects(&i.rect))
        }) {
            unsafe_seeds.push(seed);
        }
        layouts.insert(corners);
    }

    results.push(TestResult {
        name: "items_unique_positions".into(),
        passed: duplicate_seeds.is_empty(),
        detail: format!("{} seeds, duplicates in {:?}", SEEDS, duplicate_seeds),
    });
    results.push(TestResult {
        name: "items_clear_of_walls".into(),
        passed: unsafe_seeds.is_empty(),
        detail: format!("{} seeds, wall overlap in {:?}", SEEDS, unsafe_seeds),
    });
    results.push(TestResult {
        name: "items_vary_by_seed".into(),
        passed: layouts.len() > 1,
        detail: format!("{} distinct layouts", layouts.len()),
    });

    results
}

// ── 5. Headless Rounds ──────────────────────────────────────────────────

fn start_round(seed: u64, difficulty: Difficulty) -> GameEngine {
    let mut engine = GameEngine::new(seed);
    while engine.phase() != (Phase::Menu { selected: difficulty }) {
        engine.handle(Command::MenuDown);
    }
    engine.handle(Command::Start);
    engine
}

/// Wander in a slow square, sprinting every other leg.
fn scripted_input(t: f32) -> PlayerInput {
    let leg = (t / 2.0) as u32 % 4;
    let direction = match leg {
        0 => Vec2::new(1.0, 0.0),
        1 => Vec2::new(0.0, -1.0),
        2 => Vec2::new(-1.0, 0.0),
        _ => Vec2::new(0.0, 1.0),
    };
    PlayerInput {
        direction,
        sprint: leg % 2 == 0,
    }
}

fn validate_headless_rounds(verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();
    let frame = 1.0 / 60.0;

    for difficulty in Difficulty::all() {
        let name = difficulty.name().to_lowercase();
        let mut engine = start_round(7, *difficulty);
        let guards_at_start = engine.guards_in_zone().len();

        let mut t = 0.0;
        let mut escaped_arena = false;
        let mut in_wall = false;
        let mut shots = 0;
        let mut events = 0;
        while t < ROUND_SECONDS && engine.phase() == Phase::Playing {
            if (t * 4.0) as u32 % 7 == 0 {
                engine.handle(Command::Interact);
            }
            if let Some(p) = engine.player() {
                let aim = p.rect.center() + Vec2::new(100.0, 0.0);
                engine.handle(Command::Fire { target: aim });
            }
            engine.update(frame, &scripted_input(t));
            events += engine.drain_events().len();
            shots = shots.max(engine.bullets().len());

            if let Some(p) = engine.player() {
                escaped_arena |= !inside_arena(&p.rect);
                in_wall |= engine.walls().iter().any(|w| w.intersects(&p.rect));
            }
            t += frame;
        }

        results.push(TestResult {
            name: format!("{}_round_runs", name),
            passed: matches!(engine.phase(), Phase::Playing | Phase::Defeated),
            detail: format!(
                "{:.1}s simulated, phase {:?}, {} events",
                t,
                engine.phase(),
                events
            ),
        });
        results.push(TestResult {
            name: format!("{}_player_stays_on_map", name),
            passed: !escaped_arena && !in_wall,
            detail: format!("left arena={} inside wall={}", escaped_arena, in_wall),
        });
        results.push(TestResult {
            name: format!("{}_guards_present", name),
            passed: guards_at_start > 0,
            detail: format!("{} guards in the starting zone", guards_at_start),
        });

        if verbose {
            println!(
                "  {:9}: most bullets in flight {}, health left {}",
                difficulty.name(),
                shots,
                engine.player().map(|p| p.state.health).unwrap_or(0)
            );
        }
    }

    results
}

// ── 6. Persistence ──────────────────────────────────────────────────────

fn validate_persistence(_verbose: bool) -> Vec<TestResult> {
    let mut results = Vec::new();

    let mut engine = start_round(11, Difficulty::Nightmare);
    for _ in 0..120 {
        engine.update(1.0 / 60.0, &scripted_input(0.0));
    }

    let mut buffer = Vec::new();
    if let Err(e) = engine.save(&mut buffer) {
        results.push(TestResult {
            name: "save_round".into(),
            passed: false,
            detail: format!("save failed: {}", e),
        });
        return results;
    }
    results.push(TestResult {
        name: "save_round".into(),
        passed: !buffer.is_empty(),
        detail: format!("{} bytes", buffer.len()),
    });

    let mut resumed = GameEngine::new(0);
    match resumed.load(&buffer[..]) {
        Ok(()) => {
            let same = resumed.zone() == engine.zone()
                && resumed.difficulty() == engine.difficulty()
                && resumed.progress() == engine.progress()
                && resumed.items() == engine.items()
                && resumed.world.len() == engine.world.len()
                && resumed.player() == engine.player();
            results.push(TestResult {
                name: "load_round".into(),
                passed: same,
                detail: format!("{} entities restored", resumed.world.len()),
            });
        }
        Err(e) => results.push(TestResult {
            name: "load_round".into(),
            passed: false,
            detail: format!("load failed: {}", e),
        }),
    }

    buffer.truncate(buffer.len() / 3);
    results.push(TestResult {
        name: "truncated_save_rejected".into(),
        passed: GameEngine::new(0).load(&buffer[..]).is_err(),
        detail: format!("{} bytes offered", buffer.len()),
    });

    results
}
