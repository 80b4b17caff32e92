//! Integration tests for the island map as a whole.
//!
//! Exercises: zones → spawns → items → tasks, the way a round walks through
//! them. All tests are pure logic, no ECS and no rendering.

use island_logic::constants::{arena, player};
use island_logic::difficulty::Difficulty;
use island_logic::geometry::{Rect, Vec2};
use island_logic::items::ItemTable;
use island_logic::sight::line_of_sight;
use island_logic::spawns::{guard_plan, is_position_safe, survivor_homes};
use island_logic::tasks::{ready_to_escape, region_complete, Progress};
use island_logic::zones::{is_forward, layout, KeyKind, Zone};

// ── Helpers ────────────────────────────────────────────────────────────

fn arena_rect() -> Rect {
    Rect::new(0.0, 0.0, arena::WIDTH, arena::HEIGHT)
}

fn player_body_at(corner: Vec2) -> Rect {
    Rect::new(corner.x, corner.y, player::WIDTH, player::HEIGHT)
}

fn inside(outer: &Rect, inner: &Rect) -> bool {
    inner.left() >= outer.left()
        && inner.right() <= outer.right()
        && inner.top() >= outer.top()
        && inner.bottom() <= outer.bottom()
}

// ── Map coherence ──────────────────────────────────────────────────────

#[test]
fn gates_lie_inside_the_arena() {
    for zone in Zone::all() {
        for gate in layout(*zone).gates {
            assert!(inside(&arena_rect(), &gate.rect), "{} gate {:?}", zone, gate.rect);
        }
    }
}

#[test]
fn gate_arrivals_are_clear_of_walls() {
    for zone in Zone::all() {
        for gate in layout(*zone).gates {
            let walls = layout(gate.target).collision_walls();
            let body = player_body_at(gate.spawn);
            assert!(
                !walls.iter().any(|w| w.intersects(&body)),
                "{} -> {} arrival {:?} is inside a wall",
                zone,
                gate.target,
                gate.spawn
            );
        }
    }
}

#[test]
fn every_gate_has_a_way_back() {
    for zone in Zone::all() {
        for gate in layout(*zone).gates {
            let back = layout(gate.target);
            assert!(
                back.gates.iter().any(|g| g.target == *zone),
                "{} -> {} is one-way",
                zone,
                gate.target
            );
        }
    }
}

#[test]
fn the_island_is_a_chain() {
    let forward: Vec<(Zone, Zone)> = Zone::all()
        .iter()
        .flat_map(|z| {
            layout(*z)
                .gates
                .into_iter()
                .filter(move |g| is_forward(*z, g.target))
                .map(move |g| (*z, g.target))
        })
        .collect();
    assert_eq!(
        forward,
        vec![
            (Zone::Ground, Zone::Estate),
            (Zone::Estate, Zone::Tunnels),
            (Zone::Tunnels, Zone::Harbor),
        ]
    );
}

// ── Spawns ─────────────────────────────────────────────────────────────

#[test]
fn player_start_is_clear() {
    let body = player_body_at(Vec2::new(player::START_X, player::START_Y));
    let walls = layout(Zone::Ground).collision_walls();
    assert!(!walls.iter().any(|w| w.intersects(&body)));
}

#[test]
fn survivors_wait_in_open_ground() {
    for (zone, home) in survivor_homes() {
        let body = Rect::new(home.x, home.y, 20.0, 30.0);
        let walls = layout(zone).collision_walls();
        assert!(!walls.iter().any(|w| w.intersects(&body)), "{}", zone);
    }
}

#[test]
fn default_items_sit_inside_the_border() {
    let b = arena::BORDER;
    let field = Rect::new(b, b, arena::WIDTH - 2.0 * b, arena::HEIGHT - 2.0 * b);
    for item in ItemTable::default_layout().items {
        assert!(inside(&field, &item.rect), "{:?}", item.id);
    }
}

#[test]
fn guards_exist_in_every_zone_on_every_difficulty() {
    for difficulty in Difficulty::all() {
        let plans = guard_plan(&difficulty.profile());
        for zone in Zone::all() {
            assert!(plans.iter().any(|p| p.zone == *zone), "{} {}", difficulty, zone);
        }
    }
}

#[test]
fn wall_in_the_middle_blocks_sight() {
    // Ground's inner wall at y=320 separates the north and south halves
    let walls = layout(Zone::Ground).collision_walls();
    assert!(!line_of_sight(
        Vec2::new(450.0, 250.0),
        Vec2::new(450.0, 420.0),
        &walls
    ));
    assert!(is_position_safe(Zone::Ground, Vec2::new(450.0, 420.0)));
}

// ── Objectives ─────────────────────────────────────────────────────────

#[test]
fn full_run_progression() {
    let mut p = Progress::default();

    p.clues_found.push(Zone::Ground);
    p.clues += 1;
    p.keys.push(KeyKind::Jail);
    p.has_gun = true;
    assert!(region_complete(Zone::Ground, &p));
    assert!(!region_complete(Zone::Estate, &p));

    p.clues_found.push(Zone::Estate);
    p.clues += 1;
    p.keys.push(KeyKind::Cave);
    p.survivors_helped.push(Zone::Estate);
    assert!(region_complete(Zone::Estate, &p));

    p.clues_found.push(Zone::Tunnels);
    p.clues += 1;
    p.keys.push(KeyKind::Boat);
    p.survivors_helped.push(Zone::Tunnels);
    assert!(region_complete(Zone::Tunnels, &p));

    assert!(!ready_to_escape(&p));
    p.rescued = 2;
    assert!(ready_to_escape(&p));
    assert!(region_complete(Zone::Harbor, &p));
}
