//! Keeps the player on solid ground and inside the border walls

use hecs::World;
use island_logic::movement::{clamp_to_arena, harbor_footing, Footing};
use island_logic::zones::Zone;

use crate::components::{Body, PlayerState};

/// Apply the Harbor water rule and the arena clamp.
///
/// Returns `true` if the player stepped into the water and was put back ashore.
pub fn validate_player_position(world: &mut World, zone: Zone) -> bool {
    let mut fell_in = false;
    for (_, (_, body)) in world.query_mut::<(&PlayerState, &mut Body)>() {
        let mut rect = body.rect;
        if zone == Zone::Harbor {
            rect = match harbor_footing(rect) {
                Footing::Pier => rect,
                Footing::Land(r) => r,
                Footing::Water(r) => {
                    fell_in = true;
                    r
                }
            };
        }
        body.rect = clamp_to_arena(rect);
    }
    fell_in
}

#[cfg(test)]
mod tests {
    use super::*;
    use island_logic::constants::{arena, harbor};
    use island_logic::difficulty::Difficulty;

    fn world_with_player_at(x: f32, y: f32) -> (World, hecs::Entity) {
        let mut world = World::new();
        let e = world.spawn((
            PlayerState::new(&Difficulty::Survivor.profile()),
            Body::new(x, y, 22.0, 32.0),
        ));
        (world, e)
    }

    #[test]
    fn test_water_only_in_harbor() {
        let (mut world, e) = world_with_player_at(300.0, 100.0);
        assert!(!validate_player_position(&mut world, Zone::Ground));
        assert_eq!(world.get::<&Body>(e).unwrap().rect.y, 100.0);

        assert!(validate_player_position(&mut world, Zone::Harbor));
        assert_eq!(world.get::<&Body>(e).unwrap().center(), harbor::LAND_RESCUE);
    }

    #[test]
    fn test_clamped_to_border() {
        let (mut world, e) = world_with_player_at(1190.0, 10.0);
        validate_player_position(&mut world, Zone::Tunnels);
        let rect = world.get::<&Body>(e).unwrap().rect;
        assert_eq!(rect.right(), arena::WIDTH - arena::BORDER);
        assert_eq!(rect.top(), arena::BORDER);
    }
}
