//! Interaction system - the E key picks things up and recruits survivors

use std::collections::HashSet;

use hecs::World;
use island_logic::constants::{combat, objectives, survivor};
use island_logic::items::{ItemId, ItemKind, ItemTable};
use island_logic::zones::Zone;

use crate::components::{Body, Located, PlayerState, Survivor};

use super::player_rect;

/// Pick up everything the player overlaps in `zone` and recruit nearby survivors.
///
/// Returns the banner text for the last thing that happened, or `None` if the
/// key press did nothing.
pub fn interact_system(
    world: &mut World,
    zone: Zone,
    items: &ItemTable,
    collected: &mut HashSet<ItemId>,
) -> Option<String> {
    let reach = player_rect(world)?;

    let mut found: Vec<ItemId> = items
        .in_zone(zone)
        .filter(|item| !collected.contains(&item.id) && reach.intersects(&item.rect))
        .map(|item| item.id)
        .collect();
    found.sort_by_key(|id| pickup_order(&id.kind));

    let mut message = None;

    for (_, state) in world.query_mut::<&mut PlayerState>() {
        for id in &found {
            match id.kind {
                ItemKind::Gun => {
                    state.has_gun = true;
                    state.ammo += combat::GUN_AMMO;
                    message = Some(format!("You found a pistol with {} ammo.", combat::GUN_AMMO));
                }
                ItemKind::Ammo(_) => {
                    state.ammo += combat::AMMO_BOX;
                    message = Some(format!("Picked up ammo (+{}).", combat::AMMO_BOX));
                }
                ItemKind::Clue => {
                    state.clues += 1;
                    message = Some(format!(
                        "Clue found ({}/{}).",
                        state.clues,
                        objectives::CLUES_REQUIRED
                    ));
                }
                ItemKind::Key(key) => {
                    state.keys.insert(key);
                    message = Some(format!("Collected {}.", key.label()));
                }
            }
            collected.insert(*id);
            log::debug!("Picked up {:?} in {}", id.kind, zone);
        }
    }

    for (_, (s, body, located)) in world.query_mut::<(&mut Survivor, &Body, &Located)>() {
        if located.0 != zone || s.following || s.rescued {
            continue;
        }
        let reach_area = body
            .rect
            .inflate(survivor::INTERACT_REACH, survivor::INTERACT_REACH);
        if reach.intersects(&reach_area) {
            s.following = true;
            message = Some("Survivor is now following you.".to_string());
        }
    }

    message
}

fn pickup_order(kind: &ItemKind) -> (u8, u8) {
    match kind {
        ItemKind::Gun => (0, 0),
        ItemKind::Ammo(n) => (1, *n),
        ItemKind::Clue => (2, 0),
        ItemKind::Key(_) => (3, 0),
    }
}
