//! Gate system - locked pathways, region checks and zone transfer

use hecs::World;
use island_logic::constants::{harbor, survivor};
use island_logic::geometry::{Rect, Vec2};
use island_logic::movement::clamp_to_arena;
use island_logic::zones::{is_forward, KeyKind, Zone, ZoneGate};

use crate::components::{Body, KeyRing, Located, PlayerState, Survivor};

/// Result of the player standing on the gates of a zone
#[derive(Debug, Clone)]
pub enum GateCheck {
    /// Not touching any gate
    Clear,
    Locked(KeyKind),
    /// Forward gate while the current region still has open tasks
    Unfinished,
    Open(ZoneGate),
}

/// The first gate the player may walk through, or the reason they may not.
pub fn check_gates(
    player: &Rect,
    from: Zone,
    gates: &[ZoneGate],
    keys: &KeyRing,
    region_done: bool,
) -> GateCheck {
    let mut result = GateCheck::Clear;
    for gate in gates {
        if !player.intersects(&gate.rect) {
            continue;
        }
        if let Some(key) = gate.required_key {
            if !keys.has(key) {
                result = GateCheck::Locked(key);
                continue;
            }
        }
        if is_forward(from, gate.target) && !region_done {
            result = GateCheck::Unfinished;
            continue;
        }
        return GateCheck::Open(gate.clone());
    }
    result
}

/// Move the player and their followers from `from` through `gate`.
///
/// Followers line up behind the arrival point. Returns how many came along.
pub fn transfer_through_gate(world: &mut World, from: Zone, gate: &ZoneGate) -> usize {
    let mut arrival = Vec2::ZERO;
    for (_, (_, body)) in world.query_mut::<(&PlayerState, &mut Body)>() {
        body.rect.set_top_left(gate.spawn);
        if gate.target == Zone::Harbor && body.rect.center().y < harbor::ARRIVAL_MIN_Y {
            let x = body.rect.center().x;
            body.rect.set_center(Vec2::new(x, harbor::ARRIVAL_Y));
        }
        arrival = body.rect.center();
    }

    let mut moved = 0;
    for (_, (s, body, located)) in world.query_mut::<(&Survivor, &mut Body, &mut Located)>() {
        if !s.following || s.rescued || located.0 != from {
            continue;
        }
        located.0 = gate.target;
        let offset = Vec2::new(
            survivor::TRANSFER_OFFSET_X - moved as f32 * survivor::TRANSFER_SPACING,
            survivor::TRANSFER_OFFSET_Y,
        );
        body.rect.set_center(arrival + offset);
        body.rect = clamp_to_arena(body.rect);
        moved += 1;
    }
    moved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::{Facing, Velocity};
    use island_logic::constants::player;
    use island_logic::difficulty::Difficulty;
    use island_logic::zones::layout;

    fn ground_gate() -> ZoneGate {
        layout(Zone::Ground).gates[0].clone()
    }

    #[test]
    fn test_locked_without_key() {
        let gate = ground_gate();
        let on_gate = gate.rect;
        match check_gates(&on_gate, Zone::Ground, &[gate], &KeyRing::default(), true) {
            GateCheck::Locked(KeyKind::Jail) => {}
            other => panic!("expected locked, got {:?}", other),
        }
    }

    #[test]
    fn test_unfinished_region_blocks_forward() {
        let gate = ground_gate();
        let keys = KeyRing {
            jail: true,
            ..Default::default()
        };
        assert!(matches!(
            check_gates(&gate.rect, Zone::Ground, &[gate.clone()], &keys, false),
            GateCheck::Unfinished
        ));
        assert!(matches!(
            check_gates(&gate.rect, Zone::Ground, &[gate.clone()], &keys, true),
            GateCheck::Open(_)
        ));
    }

    #[test]
    fn test_backward_gates_always_open() {
        let back = layout(Zone::Estate)
            .gates
            .into_iter()
            .find(|g| g.target == Zone::Ground)
            .unwrap();
        assert!(matches!(
            check_gates(&back.rect, Zone::Estate, &[back.clone()], &KeyRing::default(), false),
            GateCheck::Open(_)
        ));
    }

    #[test]
    fn test_not_touching_is_clear() {
        let gate = ground_gate();
        let away = Rect::new(600.0, 600.0, 22.0, 32.0);
        assert!(matches!(
            check_gates(&away, Zone::Ground, &[gate], &KeyRing::default(), false),
            GateCheck::Clear
        ));
    }

    #[test]
    fn test_followers_come_along() {
        let mut world = World::new();
        let p = world.spawn((
            PlayerState::new(&Difficulty::Survivor.profile()),
            Body::new(60.0, 100.0, player::WIDTH, player::HEIGHT),
            Velocity::default(),
            Facing::default(),
        ));
        let mut follower = Survivor::new(Zone::Estate);
        follower.following = true;
        let a = world.spawn((follower, Body::new(90.0, 100.0, 20.0, 30.0), Located(Zone::Ground)));
        let b = world.spawn((follower, Body::new(120.0, 100.0, 20.0, 30.0), Located(Zone::Ground)));
        let waiting = world.spawn((
            Survivor::new(Zone::Estate),
            Body::new(300.0, 300.0, 20.0, 30.0),
            Located(Zone::Ground),
        ));

        let gate = ground_gate();
        assert_eq!(transfer_through_gate(&mut world, Zone::Ground, &gate), 2);

        let arrival = world.get::<&Body>(p).unwrap().rect;
        assert_eq!(arrival.top_left(), gate.spawn);
        for s in [a, b] {
            assert_eq!(world.get::<&Located>(s).unwrap().0, Zone::Estate);
            let body = world.get::<&Body>(s).unwrap();
            assert!(body.center().x < arrival.center().x);
        }
        assert_eq!(world.get::<&Located>(waiting).unwrap().0, Zone::Ground);
    }

    #[test]
    fn test_harbor_arrival_on_land() {
        let mut world = World::new();
        let p = world.spawn((
            PlayerState::new(&Difficulty::Survivor.profile()),
            Body::new(60.0, 100.0, player::WIDTH, player::HEIGHT),
        ));
        let gate = ZoneGate {
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            target: Zone::Harbor,
            spawn: Vec2::new(500.0, 100.0),
            required_key: None,
        };
        transfer_through_gate(&mut world, Zone::Tunnels, &gate);
        assert_eq!(world.get::<&Body>(p).unwrap().center().y, harbor::ARRIVAL_Y);
    }
}
