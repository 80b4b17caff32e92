//! Random pickup placement
//!
//! Order matters: keys first, then clues, then the gun, then ammo, so the
//! important pickups get first pick of the safe spots.

use island_logic::constants::arena;
use island_logic::geometry::Vec2;
use island_logic::items::{ItemKind, ItemSpawn, ItemTable};
use island_logic::spawns::{is_position_safe, safe_candidates};
use island_logic::zones::{KeyKind, Zone};
use rand::seq::SliceRandom;
use rand::Rng;

/// Random tries once a zone's candidate spots are used up.
const EXTRA_TRIES: usize = 20;
/// Keep random spots this far from the screen edge.
const EDGE_MARGIN: i32 = 100;

/// A safe spot in `zone` not yet in `used`.
fn unique_position(zone: Zone, used: &[Vec2], rng: &mut impl Rng) -> Vec2 {
    let candidates = safe_candidates(zone);
    let available: Vec<Vec2> = candidates
        .iter()
        .copied()
        .filter(|p| !used.contains(p))
        .collect();

    if let Some(pos) = available.choose(rng) {
        return *pos;
    }

    for _ in 0..EXTRA_TRIES {
        let x = rng.gen_range(EDGE_MARGIN..=arena::WIDTH as i32 - EDGE_MARGIN) as f32;
        let y = rng.gen_range(EDGE_MARGIN..=arena::HEIGHT as i32 - EDGE_MARGIN) as f32;
        let pos = Vec2::new(x, y);
        if is_position_safe(zone, pos) && !used.contains(&pos) {
            return pos;
        }
    }

    candidates.first().copied().unwrap_or(Vec2::new(300.0, 300.0))
}

fn place(
    zone: Zone,
    kind: ItemKind,
    used: &mut Vec<Vec2>,
    items: &mut Vec<ItemSpawn>,
    rng: &mut impl Rng,
) {
    let pos = unique_position(zone, used, rng);
    used.push(pos);
    items.push(ItemSpawn::at(zone, kind, pos));
}

/// Scatter keys, clues, the gun and 2-3 ammo boxes per zone over safe spots.
pub fn randomize_items(rng: &mut impl Rng) -> ItemTable {
    let mut used: Vec<Vec2> = Vec::new();
    let mut items: Vec<ItemSpawn> = Vec::new();

    for key in KeyKind::all() {
        place(key.found_in(), ItemKind::Key(*key), &mut used, &mut items, rng);
    }
    for zone in [Zone::Ground, Zone::Estate, Zone::Tunnels] {
        place(zone, ItemKind::Clue, &mut used, &mut items, rng);
    }
    place(Zone::Ground, ItemKind::Gun, &mut used, &mut items, rng);
    for zone in [Zone::Ground, Zone::Estate, Zone::Tunnels] {
        let boxes: u8 = rng.gen_range(2..=3);
        for n in 0..boxes {
            place(zone, ItemKind::Ammo(n), &mut used, &mut items, rng);
        }
    }

    ItemTable::new(items)
}
