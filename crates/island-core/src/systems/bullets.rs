//! Bullet system - flight, wall hits and damage

use hecs::{Entity, World};
use island_logic::constants::{arena, combat};
use island_logic::difficulty::DifficultyProfile;
use island_logic::geometry::Rect;
use island_logic::zones::Zone;

use crate::components::{Body, Bullet, Faction, Guard, Located};

use super::player_rect;

/// What the bullets hit this tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BulletReport {
    /// Guard bullets that struck the player
    pub player_hits: u32,
    pub guards_hit: u32,
    pub guards_killed: u32,
}

/// Advance every bullet, resolve hits and remove dead guards.
///
/// Damage to the player is left to the caller; guards take
/// `profile.player_damage` per hit directly.
pub fn bullet_system(
    world: &mut World,
    zone: Zone,
    walls: &[Rect],
    profile: &DifficultyProfile,
) -> BulletReport {
    let mut report = BulletReport::default();
    let player = player_rect(world);

    let guards: Vec<(Entity, Rect)> = world
        .query::<(&Guard, &Body, &Located)>()
        .iter()
        .filter(|(_, (_, _, located))| located.0 == zone)
        .map(|(e, (_, body, _))| (e, body.rect))
        .collect();

    let mut spent: Vec<Entity> = Vec::new();
    let mut damage: Vec<Entity> = Vec::new();

    for (entity, bullet) in world.query_mut::<&mut Bullet>() {
        bullet.pos += bullet.dir * combat::BULLET_SPEED;

        let p = bullet.pos;
        if p.x < 0.0 || p.x > arena::WIDTH || p.y < 0.0 || p.y > arena::HEIGHT {
            spent.push(entity);
            continue;
        }
        let hitbox = bullet.hitbox();
        if walls.iter().any(|w| w.intersects(&hitbox)) {
            spent.push(entity);
            continue;
        }

        match bullet.owner {
            Faction::Guard => {
                if player.is_some_and(|r| r.contains_point(p)) {
                    report.player_hits += 1;
                    spent.push(entity);
                }
            }
            Faction::Player => {
                if let Some((target, _)) = guards.iter().find(|(_, r)| r.contains_point(p)) {
                    damage.push(*target);
                    spent.push(entity);
                }
            }
        }
    }

    for entity in spent {
        let _ = world.despawn(entity);
    }

    for target in damage {
        if let Ok(mut g) = world.get::<&mut Guard>(target) {
            g.health -= profile.player_damage;
            report.guards_hit += 1;
        }
    }

    let dead: Vec<Entity> = world
        .query::<&Guard>()
        .iter()
        .filter(|(_, g)| g.is_dead())
        .map(|(e, _)| e)
        .collect();
    for entity in dead {
        let _ = world.despawn(entity);
        report.guards_killed += 1;
    }

    report
}

/// Drop every bullet in flight.
pub fn clear_bullets(world: &mut World) {
    let bullets: Vec<Entity> = world.query::<&Bullet>().iter().map(|(e, _)| e).collect();
    for entity in bullets {
        let _ = world.despawn(entity);
    }
}
