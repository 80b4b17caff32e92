//! Spawn tables and placement checks for guards, pickups and survivors.
//!
//! Randomness lives in the engine; this module only decides which spots are
//! acceptable and where each guard wants to stand.

use crate::constants::{arena, guard};
use crate::difficulty::DifficultyProfile;
use crate::geometry::{Rect, Vec2};
use crate::zones::{layout, Zone};

/// One guard to place: zone, intended spawn corner and patrol loop.
#[derive(Debug, Clone, PartialEq)]
pub struct GuardPlan {
    pub zone: Zone,
    pub spawn: Vec2,
    pub patrol: Vec<Vec2>,
}

/// Hand-picked pickup spots for each zone, before wall filtering.
pub fn candidate_positions(zone: Zone) -> Vec<Vec2> {
    let raw: &[(f32, f32)] = match zone {
        Zone::Ground => &[
            (150.0, 550.0),
            (300.0, 200.0),
            (800.0, 500.0),
            (1000.0, 300.0),
            (500.0, 400.0),
            (250.0, 600.0),
            (700.0, 200.0),
            (900.0, 550.0),
            (400.0, 300.0),
            (600.0, 500.0),
        ],
        Zone::Estate => &[
            (250.0, 250.0),
            (700.0, 400.0),
            (900.0, 200.0),
            (400.0, 500.0),
            (300.0, 350.0),
            (600.0, 300.0),
            (500.0, 200.0),
            (800.0, 450.0),
        ],
        Zone::Tunnels => &[
            (200.0, 200.0),
            (500.0, 200.0),
            (800.0, 200.0),
            (300.0, 350.0),
            (600.0, 350.0),
            (200.0, 500.0),
            (500.0, 500.0),
            (800.0, 500.0),
            (400.0, 250.0),
            (700.0, 450.0),
            (350.0, 400.0),
            (550.0, 300.0),
        ],
        Zone::Harbor => &[
            (800.0, 300.0),
            (600.0, 400.0),
            (400.0, 200.0),
            (500.0, 300.0),
            (700.0, 350.0),
        ],
    };
    raw.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
}

fn fallback_candidates(zone: Zone) -> Vec<Vec2> {
    let raw: &[(f32, f32)] = match zone {
        Zone::Ground => &[(200.0, 550.0), (400.0, 300.0), (800.0, 500.0)],
        Zone::Tunnels => &[(300.0, 300.0), (500.0, 400.0), (700.0, 300.0)],
        Zone::Estate | Zone::Harbor => &[(300.0, 300.0)],
    };
    raw.iter().map(|&(x, y)| Vec2::new(x, y)).collect()
}

fn in_safe_window(pos: Vec2) -> bool {
    pos.x >= arena::SAFE_MIN_X
        && pos.x <= arena::SAFE_MAX_X
        && pos.y >= arena::SAFE_MIN_Y
        && pos.y <= arena::SAFE_MAX_Y
}

/// A pickup spot is safe inside the spawn window with no wall within the probe.
pub fn is_position_safe(zone: Zone, pos: Vec2) -> bool {
    is_position_safe_among(&layout(zone).obstacles, pos)
}

pub(crate) fn is_position_safe_among(walls: &[Rect], pos: Vec2) -> bool {
    if !in_safe_window(pos) {
        return false;
    }
    let probe = Rect::centered(pos, arena::SAFE_PROBE, arena::SAFE_PROBE);
    !walls.iter().any(|w| w.intersects(&probe))
}

/// Candidate spots that survive the wall check, or the zone's fallbacks.
pub fn safe_candidates(zone: Zone) -> Vec<Vec2> {
    let walls = layout(zone).obstacles;
    let safe: Vec<Vec2> = candidate_positions(zone)
        .into_iter()
        .filter(|p| is_position_safe_among(&walls, *p))
        .collect();
    if safe.is_empty() {
        fallback_candidates(zone)
    } else {
        safe
    }
}

/// Whether a guard body with its corner at `pos` stands clear of every wall.
pub fn is_guard_spawn_valid(zone: Zone, pos: Vec2) -> bool {
    let walls = layout(zone).obstacles;
    let body = Rect::new(pos.x, pos.y, guard::WIDTH, guard::HEIGHT);
    if walls.iter().any(|w| w.intersects(&body)) {
        return false;
    }
    in_safe_window(pos)
}

fn guard_fallback(zone: Zone) -> Vec2 {
    match zone {
        Zone::Ground => Vec2::new(200.0, 600.0),
        Zone::Estate => Vec2::new(200.0, 400.0),
        Zone::Tunnels => Vec2::new(200.0, 300.0),
        Zone::Harbor => Vec2::new(200.0, 500.0),
    }
}

/// Spiral outward from `intended` until a valid guard spot is found.
pub fn find_guard_spawn(zone: Zone, intended: Vec2) -> Vec2 {
    if is_guard_spawn_valid(zone, intended) {
        return intended;
    }

    const ATTEMPTS: u32 = 20;
    for attempt in 0..ATTEMPTS {
        let angle = attempt as f32 * 0.5;
        let radius = 20.0 + attempt as f32 * 10.0;
        let x = (intended.x + (radius * angle.cos()).trunc())
            .clamp(arena::SAFE_MIN_X, arena::SAFE_MAX_X);
        let y = (intended.y + (radius * angle.sin()).trunc())
            .clamp(arena::SAFE_MIN_Y, arena::SAFE_MAX_Y);
        let candidate = Vec2::new(x, y);
        if is_guard_spawn_valid(zone, candidate) {
            return candidate;
        }
    }

    guard_fallback(zone)
}

type RawGuard = (f32, f32, &'static [(f32, f32)]);

fn base_guards(zone: Zone) -> &'static [RawGuard] {
    match zone {
        Zone::Ground => &[
            (540.0, 500.0, &[(500.0, 500.0), (760.0, 500.0), (760.0, 640.0), (500.0, 640.0)]),
            (950.0, 250.0, &[(900.0, 210.0), (1080.0, 210.0), (1080.0, 420.0), (900.0, 420.0)]),
        ],
        Zone::Estate => &[
            (350.0, 300.0, &[(250.0, 300.0), (550.0, 300.0)]),
            (850.0, 520.0, &[(760.0, 520.0), (1040.0, 520.0)]),
        ],
        Zone::Tunnels => &[(700.0, 300.0, &[(620.0, 260.0), (920.0, 340.0), (620.0, 500.0)])],
        Zone::Harbor => &[(800.0, 420.0, &[(680.0, 420.0), (1000.0, 420.0)])],
    }
}

fn extra_guards(zone: Zone) -> &'static [RawGuard] {
    match zone {
        Zone::Ground => &[
            (760.0, 180.0, &[(680.0, 180.0), (860.0, 180.0), (860.0, 300.0), (680.0, 300.0)]),
            (420.0, 210.0, &[(360.0, 200.0), (520.0, 200.0), (520.0, 300.0), (360.0, 300.0)]),
        ],
        Zone::Estate => &[
            (1010.0, 230.0, &[(940.0, 220.0), (1080.0, 220.0), (1080.0, 320.0), (940.0, 320.0)]),
            (140.0, 500.0, &[(100.0, 450.0), (220.0, 520.0)]),
        ],
        Zone::Tunnels => &[
            (350.0, 460.0, &[(300.0, 420.0), (480.0, 500.0), (320.0, 560.0)]),
            (980.0, 140.0, &[(930.0, 120.0), (1080.0, 180.0)]),
        ],
        Zone::Harbor => &[
            (620.0, 280.0, &[(560.0, 260.0), (760.0, 260.0)]),
            (1000.0, 520.0, &[(900.0, 500.0), (1080.0, 580.0)]),
        ],
    }
}

fn plan_from(zone: Zone, raw: &RawGuard) -> GuardPlan {
    let (x, y, patrol) = raw;
    GuardPlan {
        zone,
        spawn: find_guard_spawn(zone, Vec2::new(*x, *y)),
        patrol: patrol.iter().map(|&(px, py)| Vec2::new(px, py)).collect(),
    }
}

/// Every guard for a round: the base roster plus `extra_guards` per zone.
pub fn guard_plan(profile: &DifficultyProfile) -> Vec<GuardPlan> {
    let mut plans = Vec::new();
    for zone in Zone::all() {
        plans.extend(base_guards(*zone).iter().map(|g| plan_from(*zone, g)));
    }
    for zone in Zone::all() {
        plans.extend(
            extra_guards(*zone)
                .iter()
                .take(profile.extra_guards)
                .map(|g| plan_from(*zone, g)),
        );
    }
    plans
}

/// Where each trapped survivor waits (zone, top-left corner).
pub fn survivor_homes() -> [(Zone, Vec2); 2] {
    [
        (Zone::Estate, Vec2::new(350.0, 300.0)),
        (Zone::Tunnels, Vec2::new(500.0, 350.0)),
    ]
}
