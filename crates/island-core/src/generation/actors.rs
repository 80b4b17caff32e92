//! Player, guard and survivor spawning

use hecs::{Entity, World};
use island_logic::constants::{arena, guard, player, survivor};
use island_logic::difficulty::DifficultyProfile;
use island_logic::spawns::{guard_plan, survivor_homes};
use rand::Rng;

use crate::components::*;

/// Spawn the player at the Ground start point.
pub fn spawn_player(world: &mut World, profile: &DifficultyProfile) -> Entity {
    world.spawn((
        PlayerState::new(profile),
        Body::new(player::START_X, player::START_Y, player::WIDTH, player::HEIGHT),
        Velocity::default(),
        Facing::default(),
    ))
}

/// Spawn every guard of the difficulty's roster with a staggered first shot.
pub fn spawn_guards(
    world: &mut World,
    profile: &DifficultyProfile,
    rng: &mut impl Rng,
) -> Vec<Entity> {
    guard_plan(profile)
        .into_iter()
        .map(|plan| {
            let x = plan
                .spawn
                .x
                .clamp(guard::CLAMP_MIN, arena::WIDTH - guard::CLAMP_MARGIN);
            let y = plan
                .spawn
                .y
                .clamp(guard::CLAMP_MIN, arena::HEIGHT - guard::CLAMP_MARGIN);
            let first_shot = rng.gen_range(guard::FIRST_SHOT_MIN..guard::FIRST_SHOT_MAX);
            world.spawn((
                Guard::new(plan.patrol, profile.guard_health, first_shot),
                Body::new(x, y, guard::WIDTH, guard::HEIGHT),
                Velocity::default(),
                Facing::default(),
                Located(plan.zone),
            ))
        })
        .collect()
}

/// Spawn the trapped survivors at their home spots.
pub fn spawn_survivors(world: &mut World) -> Vec<Entity> {
    survivor_homes()
        .into_iter()
        .map(|(zone, home)| {
            world.spawn((
                Survivor::new(zone),
                Body::new(home.x, home.y, survivor::WIDTH, survivor::HEIGHT),
                Velocity::default(),
                Located(zone),
            ))
        })
        .collect()
}
