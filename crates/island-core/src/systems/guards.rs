//! Guard system - patrol, spot, chase and shoot

use hecs::World;
use island_logic::constants::{guard, player};
use island_logic::difficulty::DifficultyProfile;
use island_logic::geometry::{Rect, Vec2};
use island_logic::movement::move_and_collide;
use island_logic::sight::line_of_sight;
use island_logic::zones::Zone;

use crate::components::{Body, Bullet, Facing, Faction, Guard, Located, Velocity};

use super::player_rect;

/// Update every guard in `zone`. Returns whether any of them sees the player.
pub fn guard_system(
    world: &mut World,
    zone: Zone,
    profile: &DifficultyProfile,
    walls: &[Rect],
    dt: f32,
) -> bool {
    let Some(target) = player_rect(world).map(|r| r.center()) else {
        return false;
    };

    let mut shots: Vec<Bullet> = Vec::new();
    let mut any_alerted = false;

    for (_, (g, body, velocity, facing, located)) in world.query_mut::<(
        &mut Guard,
        &mut Body,
        &mut Velocity,
        &mut Facing,
        &Located,
    )>() {
        if located.0 != zone {
            continue;
        }

        let center = body.center();
        let to_player = target - center;
        let distance = to_player.length();
        let can_see = distance <= profile.guard_sight && line_of_sight(center, target, walls);
        g.alerted = can_see;
        any_alerted |= can_see;

        velocity.0 = if can_see {
            if distance > 0.0 {
                facing.look = to_player.normalize();
            }
            if distance > guard::STOP_DISTANCE {
                facing.look * profile.guard_speed
            } else {
                Vec2::ZERO
            }
        } else {
            patrol_step(g, center, facing, profile.guard_speed)
        };

        body.rect = move_and_collide(body.rect, velocity.0, walls);

        g.shoot_timer -= dt;
        facing.tick(dt);
        if can_see && g.shoot_timer <= 0.0 {
            g.shoot_timer = profile.guard_shoot_cooldown;
            facing.muzzle_timer = player::MUZZLE_FLASH;
            shots.push(Bullet::new(body.center(), to_player, Faction::Guard));
        }
    }

    for bullet in shots {
        world.spawn((bullet,));
    }

    any_alerted
}

/// Velocity toward the current waypoint, advancing it once reached.
fn patrol_step(g: &mut Guard, center: Vec2, facing: &mut Facing, speed: f32) -> Vec2 {
    let Some(&waypoint) = g.patrol.get(g.current_waypoint) else {
        return Vec2::ZERO;
    };
    let mut path = waypoint - center;
    if path.length() < guard::WAYPOINT_RADIUS {
        g.current_waypoint = (g.current_waypoint + 1) % g.patrol.len();
        path = g.patrol[g.current_waypoint] - center;
    }
    if path.length_squared() > 0.0 {
        facing.look = path.normalize();
        facing.look * speed
    } else {
        Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::PlayerState;
    use island_logic::difficulty::Difficulty;

    fn spawn_player_at(world: &mut World, x: f32, y: f32) {
        world.spawn((
            PlayerState::new(&Difficulty::Survivor.profile()),
            Body::new(x, y, player::WIDTH, player::HEIGHT),
            Velocity::default(),
            Facing::default(),
        ));
    }

    fn spawn_guard_at(world: &mut World, x: f32, y: f32, patrol: Vec<Vec2>) -> hecs::Entity {
        world.spawn((
            Guard::new(patrol, 55, 0.5),
            Body::new(x, y, guard::WIDTH, guard::HEIGHT),
            Velocity::default(),
            Facing::default(),
            Located(Zone::Ground),
        ))
    }

    #[test]
    fn test_guard_spots_and_chases() {
        let mut world = World::new();
        spawn_player_at(&mut world, 400.0, 100.0);
        let g = spawn_guard_at(&mut world, 200.0, 100.0, vec![Vec2::new(100.0, 100.0)]);
        let profile = Difficulty::Survivor.profile();

        assert!(guard_system(&mut world, Zone::Ground, &profile, &[], 1.0 / 60.0));
        let body = world.get::<&Body>(g).unwrap();
        assert!((body.rect.x - (200.0 + profile.guard_speed)).abs() < 1e-4);
    }

    #[test]
    fn test_wall_hides_player() {
        let mut world = World::new();
        spawn_player_at(&mut world, 400.0, 100.0);
        spawn_guard_at(&mut world, 200.0, 100.0, vec![Vec2::new(100.0, 116.0)]);
        let walls = [Rect::new(300.0, 0.0, 20.0, 400.0)];
        let profile = Difficulty::Survivor.profile();
        assert!(!guard_system(&mut world, Zone::Ground, &profile, &walls, 1.0 / 60.0));
    }

    #[test]
    fn test_guard_stops_close_and_fires() {
        let mut world = World::new();
        spawn_player_at(&mut world, 250.0, 100.0);
        let g = spawn_guard_at(&mut world, 200.0, 100.0, vec![Vec2::new(100.0, 100.0)]);
        let profile = Difficulty::Survivor.profile();

        // Timer starts at 0.5s
        guard_system(&mut world, Zone::Ground, &profile, &[], 0.6);
        assert_eq!(world.get::<&Body>(g).unwrap().rect.x, 200.0);
        assert_eq!(world.query::<&Bullet>().iter().count(), 1);
        let guard = world.get::<&Guard>(g).unwrap();
        assert_eq!(guard.shoot_timer, profile.guard_shoot_cooldown);
    }

    #[test]
    fn test_patrol_advances_waypoint() {
        let mut world = World::new();
        spawn_player_at(&mut world, 1000.0, 600.0);
        // Center is (111, 116), within reach of the first waypoint
        let g = spawn_guard_at(
            &mut world,
            100.0,
            100.0,
            vec![Vec2::new(115.0, 116.0), Vec2::new(300.0, 116.0)],
        );
        let profile = Difficulty::Story.profile();
        let walls = [Rect::new(600.0, 0.0, 20.0, 720.0)];

        assert!(!guard_system(&mut world, Zone::Ground, &profile, &walls, 1.0 / 60.0));
        let guard = world.get::<&Guard>(g).unwrap();
        assert_eq!(guard.current_waypoint, 1);
    }

    #[test]
    fn test_other_zones_are_frozen() {
        let mut world = World::new();
        spawn_player_at(&mut world, 400.0, 100.0);
        let g = spawn_guard_at(&mut world, 200.0, 100.0, vec![Vec2::new(100.0, 100.0)]);
        let profile = Difficulty::Survivor.profile();
        assert!(!guard_system(&mut world, Zone::Estate, &profile, &[], 1.0 / 60.0));
        assert_eq!(world.get::<&Body>(g).unwrap().rect.x, 200.0);
    }
}
