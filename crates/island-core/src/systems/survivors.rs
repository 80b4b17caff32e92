//! Survivor system - followers trail the player and board at the pier

use hecs::World;
use island_logic::constants::survivor;
use island_logic::geometry::{Rect, Vec2};
use island_logic::movement::move_and_collide;
use island_logic::zones::Zone;

use crate::components::{Body, Located, PlayerState, Survivor, Velocity};

use super::player_rect;

/// Move followers in `zone` and rescue any that reach the pier end.
///
/// Returns the number of survivors rescued this tick; the player's tally is
/// updated here as well.
pub fn survivor_system(world: &mut World, zone: Zone, walls: &[Rect]) -> u32 {
    let Some(target) = player_rect(world).map(|r| r.center()) else {
        return 0;
    };

    let mut rescued = 0;
    for (_, (s, body, velocity, located)) in
        world.query_mut::<(&mut Survivor, &mut Body, &mut Velocity, &Located)>()
    {
        if located.0 != zone || s.rescued || !s.following {
            continue;
        }

        let to_player = target - body.center();
        velocity.0 = follow_velocity(to_player);
        body.rect = move_and_collide(body.rect, velocity.0, walls);

        if zone == Zone::Harbor && body.center().x > survivor::RESCUE_X {
            s.rescued = true;
            rescued += 1;
        }
    }

    if rescued > 0 {
        for (_, state) in world.query_mut::<&mut PlayerState>() {
            state.rescued += rescued;
        }
    }
    rescued
}

/// Stay in the band between `FOLLOW_NEAR` and `FOLLOW_FAR` of the player.
fn follow_velocity(to_player: Vec2) -> Vec2 {
    let distance = to_player.length();
    if distance > survivor::FOLLOW_FAR {
        to_player.normalize() * survivor::FOLLOW_SPEED
    } else if distance < survivor::FOLLOW_NEAR && distance > 0.0 {
        -to_player.normalize() * survivor::RETREAT_SPEED
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Facing;
    use island_logic::constants::player;
    use island_logic::difficulty::Difficulty;

    fn world_with_player(x: f32, y: f32) -> World {
        let mut world = World::new();
        world.spawn((
            PlayerState::new(&Difficulty::Story.profile()),
            Body::new(x, y, player::WIDTH, player::HEIGHT),
            Velocity::default(),
            Facing::default(),
        ));
        world
    }

    fn spawn_follower(world: &mut World, zone: Zone, x: f32, y: f32) -> hecs::Entity {
        let mut s = Survivor::new(Zone::Estate);
        s.following = true;
        world.spawn((
            s,
            Body::new(x, y, survivor::WIDTH, survivor::HEIGHT),
            Velocity::default(),
            Located(zone),
        ))
    }

    #[test]
    fn test_band() {
        assert_eq!(follow_velocity(Vec2::new(40.0, 0.0)), Vec2::ZERO);
        assert_eq!(follow_velocity(Vec2::new(100.0, 0.0)), Vec2::new(2.2, 0.0));
        assert_eq!(follow_velocity(Vec2::new(0.0, 10.0)), Vec2::new(0.0, -1.0));
        assert_eq!(follow_velocity(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn test_follower_closes_in() {
        let mut world = world_with_player(500.0, 400.0);
        let s = spawn_follower(&mut world, Zone::Estate, 300.0, 400.0);
        assert_eq!(survivor_system(&mut world, Zone::Estate, &[]), 0);
        assert!(world.get::<&Body>(s).unwrap().rect.x > 300.0);
    }

    #[test]
    fn test_waiting_survivor_stays_put() {
        let mut world = world_with_player(500.0, 400.0);
        let s = world.spawn((
            Survivor::new(Zone::Estate),
            Body::new(300.0, 400.0, survivor::WIDTH, survivor::HEIGHT),
            Velocity::default(),
            Located(Zone::Estate),
        ));
        survivor_system(&mut world, Zone::Estate, &[]);
        assert_eq!(world.get::<&Body>(s).unwrap().rect.x, 300.0);
    }

    #[test]
    fn test_rescue_at_pier_end() {
        let mut world = world_with_player(1060.0, 205.0);
        let s = spawn_follower(&mut world, Zone::Harbor, 1005.0, 205.0);
        assert_eq!(survivor_system(&mut world, Zone::Harbor, &[]), 1);
        assert!(world.get::<&Survivor>(s).unwrap().rescued);

        let rescued: u32 = world
            .query::<&PlayerState>()
            .iter()
            .map(|(_, p)| p.rescued)
            .sum();
        assert_eq!(rescued, 1);

        // Rescued survivors are not counted twice
        assert_eq!(survivor_system(&mut world, Zone::Harbor, &[]), 0);
    }
}
