//! Player system - movement, stamina and the pistol

use hecs::World;
use island_logic::constants::player;
use island_logic::difficulty::DifficultyProfile;
use island_logic::geometry::{Rect, Vec2};
use island_logic::movement::move_and_collide;

use crate::components::{Body, Bullet, Facing, Faction, PlayerState, Velocity};

/// Held controls for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlayerInput {
    /// Raw direction; normalized before use
    pub direction: Vec2,
    pub sprint: bool,
}

impl PlayerInput {
    pub fn idle() -> Self {
        Self::default()
    }

    /// Build from the four direction keys.
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool, sprint: bool) -> Self {
        let mut direction = Vec2::ZERO;
        if up {
            direction.y -= 1.0;
        }
        if down {
            direction.y += 1.0;
        }
        if left {
            direction.x -= 1.0;
        }
        if right {
            direction.x += 1.0;
        }
        Self { direction, sprint }
    }
}

/// The player's body, if a round is running.
pub fn player_rect(world: &World) -> Option<Rect> {
    world
        .query::<(&PlayerState, &Body)>()
        .iter()
        .next()
        .map(|(_, (_, body))| body.rect)
}

/// Apply input, stamina and timers, then move through the walls.
///
/// Returns how far the player travelled this tick.
pub fn player_movement_system(
    world: &mut World,
    input: &PlayerInput,
    profile: &DifficultyProfile,
    walls: &[Rect],
    dt: f32,
) -> f32 {
    let mut travelled = 0.0;

    for (_, (state, body, velocity, facing)) in
        world.query_mut::<(&mut PlayerState, &mut Body, &mut Velocity, &mut Facing)>()
    {
        let moving = input.direction.length_squared() > 0.0;
        let sprinting = input.sprint && state.stamina > 0.0 && moving;

        if sprinting {
            state.stamina = (state.stamina - profile.stamina_drain * dt).max(0.0);
        } else {
            state.stamina = (state.stamina + profile.stamina_recover * dt).min(player::MAX_STAMINA);
        }

        let speed = player::SPEED
            * if sprinting {
                player::SPRINT_MULTIPLIER
            } else {
                1.0
            };
        let direction = if moving {
            let d = input.direction.normalize();
            facing.look = d;
            d
        } else {
            Vec2::ZERO
        };
        velocity.0 = direction * speed;

        state.fire_cooldown = (state.fire_cooldown - dt).max(0.0);
        facing.tick(dt);

        let before = body.rect.top_left();
        body.rect = move_and_collide(body.rect, velocity.0, walls);
        travelled += before.distance(body.rect.top_left());
    }

    travelled
}

/// Fire toward `target` if the pistol is ready. Returns whether a shot left the barrel.
pub fn try_fire(world: &mut World, target: Vec2) -> bool {
    let mut shot = None;

    for (_, (state, body, facing)) in
        world.query_mut::<(&mut PlayerState, &Body, &mut Facing)>()
    {
        if !state.can_fire() {
            continue;
        }
        state.ammo -= 1;
        state.fire_cooldown = player::FIRE_COOLDOWN;
        let origin = body.center();
        let direction = target - origin;
        if direction.length_squared() > 0.0 {
            facing.look = direction.normalize();
        }
        facing.muzzle_timer = player::MUZZLE_FLASH;
        shot = Some(Bullet::new(origin, direction, Faction::Player));
    }

    match shot {
        Some(bullet) => {
            world.spawn((bullet,));
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use island_logic::difficulty::Difficulty;

    fn spawn_test_player(world: &mut World) -> hecs::Entity {
        let profile = Difficulty::Survivor.profile();
        world.spawn((
            PlayerState::new(&profile),
            Body::new(100.0, 100.0, player::WIDTH, player::HEIGHT),
            Velocity::default(),
            Facing::default(),
        ))
    }

    #[test]
    fn test_walk_speed() {
        let mut world = World::new();
        let e = spawn_test_player(&mut world);
        let input = PlayerInput::from_keys(false, false, false, true, false);
        let moved = player_movement_system(
            &mut world,
            &input,
            &Difficulty::Survivor.profile(),
            &[],
            1.0 / 60.0,
        );
        assert!((moved - player::SPEED).abs() < 1e-4);
        let body = world.get::<&Body>(e).unwrap();
        assert_eq!(body.rect.x, 103.0);
    }

    #[test]
    fn test_sprint_drains_stamina() {
        let mut world = World::new();
        let e = spawn_test_player(&mut world);
        let profile = Difficulty::Survivor.profile();
        let input = PlayerInput::from_keys(true, false, false, false, true);
        let moved = player_movement_system(&mut world, &input, &profile, &[], 0.5);
        assert!((moved - player::SPEED * player::SPRINT_MULTIPLIER).abs() < 1e-4);
        let state = world.get::<&PlayerState>(e).unwrap();
        assert_eq!(state.stamina, player::MAX_STAMINA - profile.stamina_drain * 0.5);
    }

    #[test]
    fn test_standing_sprint_recovers() {
        let mut world = World::new();
        let e = spawn_test_player(&mut world);
        world.get::<&mut PlayerState>(e).unwrap().stamina = 10.0;
        let profile = Difficulty::Survivor.profile();
        let input = PlayerInput {
            direction: Vec2::ZERO,
            sprint: true,
        };
        player_movement_system(&mut world, &input, &profile, &[], 1.0);
        let state = world.get::<&PlayerState>(e).unwrap();
        assert_eq!(state.stamina, 10.0 + profile.stamina_recover);
    }

    #[test]
    fn test_fire_needs_gun_and_ammo() {
        let mut world = World::new();
        let e = spawn_test_player(&mut world);
        assert!(!try_fire(&mut world, Vec2::new(500.0, 100.0)));

        {
            let mut state = world.get::<&mut PlayerState>(e).unwrap();
            state.has_gun = true;
            state.ammo = 1;
        }
        assert!(try_fire(&mut world, Vec2::new(500.0, 100.0)));
        assert_eq!(world.query::<&Bullet>().iter().count(), 1);

        // Out of ammo, and still on cooldown
        assert!(!try_fire(&mut world, Vec2::new(500.0, 100.0)));
        let state = world.get::<&PlayerState>(e).unwrap();
        assert_eq!(state.ammo, 0);
        assert_eq!(state.fire_cooldown, player::FIRE_COOLDOWN);
    }
}
