//! Island zones, their walls, the gates between them and the escape boat.
//!
//! | Zone | Gates | Locked by |
//! |------|-------|-----------|
//! | Ground | → Estate | jail key |
//! | Estate | → Ground, → Tunnels | –, cave key |
//! | Tunnels | → Estate, → Harbor | –, boat key |
//! | Harbor | → Tunnels | – |
//!
//! Only the Harbor has an extraction point.

use serde::{Deserialize, Serialize};

use crate::constants::{arena, harbor};
use crate::geometry::{Rect, Vec2};

/// A region of the island. Declaration order is progression order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Zone {
    Ground,
    Estate,
    Tunnels,
    Harbor,
}

impl Zone {
    pub fn all() -> &'static [Zone] {
        &[Zone::Ground, Zone::Estate, Zone::Tunnels, Zone::Harbor]
    }

    /// Position along the escape route (Ground = 0).
    pub fn order(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            Zone::Ground => "Ground",
            Zone::Estate => "Estate",
            Zone::Tunnels => "Tunnels",
            Zone::Harbor => "Harbor",
        }
    }
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The three keys that unlock the forward gates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyKind {
    Jail,
    Cave,
    Boat,
}

impl KeyKind {
    pub fn all() -> &'static [KeyKind] {
        &[KeyKind::Jail, KeyKind::Cave, KeyKind::Boat]
    }

    pub fn label(&self) -> &'static str {
        match self {
            KeyKind::Jail => "jail key",
            KeyKind::Cave => "cave key",
            KeyKind::Boat => "boat key",
        }
    }

    /// Zone where the key is hidden.
    pub fn found_in(&self) -> Zone {
        match self {
            KeyKind::Jail => Zone::Ground,
            KeyKind::Cave => Zone::Estate,
            KeyKind::Boat => Zone::Tunnels,
        }
    }
}

/// Portal from one zone into another.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZoneGate {
    pub rect: Rect,
    pub target: Zone,
    /// Top-left corner of the player's body on arrival.
    pub spawn: Vec2,
    pub required_key: Option<KeyKind>,
}

impl ZoneGate {
    fn new(rect: Rect, target: Zone, spawn: (f32, f32), required_key: Option<KeyKind>) -> Self {
        Self {
            rect,
            target,
            spawn: Vec2::new(spawn.0, spawn.1),
            required_key,
        }
    }
}

/// Static geometry of one zone.
#[derive(Debug, Clone)]
pub struct ZoneLayout {
    pub zone: Zone,
    pub obstacles: Vec<Rect>,
    pub gates: Vec<ZoneGate>,
    pub extraction: Option<Rect>,
}

impl ZoneLayout {
    /// Walls that block movement, bullets and sight.
    ///
    /// In the Harbor the pier pilings are not solid so the pier stays walkable.
    pub fn collision_walls(&self) -> Vec<Rect> {
        if self.zone == Zone::Harbor {
            self.obstacles
                .iter()
                .filter(|o| !o.intersects(&harbor::PIER_CLEARANCE))
                .copied()
                .collect()
        } else {
            self.obstacles.clone()
        }
    }
}

/// Border walls shared by every zone.
pub fn border_walls() -> [Rect; 4] {
    let b = arena::BORDER;
    [
        Rect::new(0.0, 0.0, arena::WIDTH, b),
        Rect::new(0.0, arena::HEIGHT - b, arena::WIDTH, b),
        Rect::new(0.0, 0.0, b, arena::HEIGHT),
        Rect::new(arena::WIDTH - b, 0.0, b, arena::HEIGHT),
    ]
}

/// Build the walls, gates and extraction point of a zone.
pub fn layout(zone: Zone) -> ZoneLayout {
    let mut obstacles: Vec<Rect> = border_walls().to_vec();
    let mut extraction = None;

    let gates = match zone {
        Zone::Ground => {
            obstacles.extend([
                Rect::new(270.0, 90.0, 620.0, 24.0),
                Rect::new(270.0, 90.0, 24.0, 220.0),
                Rect::new(866.0, 90.0, 24.0, 200.0),
                Rect::new(180.0, 320.0, 560.0, 24.0),
                Rect::new(716.0, 320.0, 24.0, 210.0),
                Rect::new(330.0, 530.0, 410.0, 24.0),
            ]);
            vec![ZoneGate::new(
                Rect::new(52.0, 84.0, 54.0, 92.0),
                Zone::Estate,
                (1060.0, 620.0),
                Some(KeyKind::Jail),
            )]
        }
        Zone::Estate => {
            obstacles.extend([
                Rect::new(130.0, 180.0, 840.0, 24.0),
                Rect::new(130.0, 180.0, 24.0, 360.0),
                Rect::new(946.0, 180.0, 24.0, 360.0),
                Rect::new(350.0, 340.0, 430.0, 24.0),
                Rect::new(350.0, 340.0, 24.0, 180.0),
                Rect::new(756.0, 340.0, 24.0, 180.0),
                Rect::new(550.0, 530.0, 230.0, 24.0),
            ]);
            vec![
                ZoneGate::new(
                    Rect::new(1082.0, 620.0, 56.0, 56.0),
                    Zone::Ground,
                    (100.0, 140.0),
                    None,
                ),
                ZoneGate::new(
                    Rect::new(80.0, 620.0, 60.0, 60.0),
                    Zone::Tunnels,
                    (1040.0, 600.0),
                    Some(KeyKind::Cave),
                ),
            ]
        }
        Zone::Tunnels => {
            obstacles.extend([
                Rect::new(120.0, 120.0, 200.0, 20.0),
                Rect::new(400.0, 120.0, 500.0, 20.0),
                Rect::new(120.0, 120.0, 20.0, 300.0),
                Rect::new(880.0, 120.0, 20.0, 300.0),
                Rect::new(120.0, 400.0, 300.0, 20.0),
                Rect::new(500.0, 400.0, 400.0, 20.0),
                Rect::new(400.0, 200.0, 20.0, 220.0),
                Rect::new(600.0, 200.0, 20.0, 220.0),
                Rect::new(120.0, 520.0, 300.0, 20.0),
                Rect::new(580.0, 520.0, 300.0, 20.0),
                Rect::new(120.0, 400.0, 20.0, 140.0),
                Rect::new(860.0, 400.0, 20.0, 140.0),
                Rect::new(250.0, 220.0, 100.0, 20.0),
                Rect::new(650.0, 220.0, 100.0, 20.0),
            ]);
            vec![
                ZoneGate::new(
                    Rect::new(1082.0, 620.0, 56.0, 56.0),
                    Zone::Estate,
                    (120.0, 620.0),
                    None,
                ),
                ZoneGate::new(
                    Rect::new(70.0, 80.0, 80.0, 80.0),
                    Zone::Harbor,
                    (500.0, 400.0),
                    Some(KeyKind::Boat),
                ),
            ]
        }
        Zone::Harbor => {
            obstacles.extend([
                // warehouses and the harbor office
                Rect::new(200.0, 400.0, 150.0, 80.0),
                Rect::new(500.0, 450.0, 120.0, 60.0),
                Rect::new(900.0, 400.0, 150.0, 70.0),
                // crates and barrels
                Rect::new(300.0, 550.0, 40.0, 40.0),
                Rect::new(600.0, 350.0, 40.0, 40.0),
                Rect::new(400.0, 500.0, 30.0, 30.0),
                Rect::new(700.0, 500.0, 30.0, 30.0),
                // pier pilings
                Rect::new(820.0, 180.0, 15.0, 60.0),
                Rect::new(920.0, 180.0, 15.0, 60.0),
                Rect::new(1020.0, 180.0, 15.0, 60.0),
            ]);
            extraction = Some(harbor::BOAT);
            vec![ZoneGate::new(
                Rect::new(1080.0, 620.0, 60.0, 60.0),
                Zone::Tunnels,
                (160.0, 140.0),
                None,
            )]
        }
    };

    ZoneLayout {
        zone,
        obstacles,
        gates,
        extraction,
    }
}

/// Whether travelling `from` → `to` moves deeper into the island.
pub fn is_forward(from: Zone, to: Zone) -> bool {
    to.order() > from.order()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_zone_has_borders() {
        for zone in Zone::all() {
            let l = layout(*zone);
            assert!(l.obstacles.len() >= 4);
            assert_eq!(&l.obstacles[..4], &border_walls());
        }
    }

    #[test]
    fn test_only_harbor_has_extraction() {
        for zone in Zone::all() {
            assert_eq!(layout(*zone).extraction.is_some(), *zone == Zone::Harbor);
        }
    }

    #[test]
    fn test_forward_gates_are_locked() {
        for zone in Zone::all() {
            for gate in layout(*zone).gates {
                if is_forward(*zone, gate.target) {
                    assert!(gate.required_key.is_some(), "{} -> {}", zone, gate.target);
                } else {
                    assert!(gate.required_key.is_none());
                }
            }
        }
    }

    #[test]
    fn test_harbor_pilings_not_solid() {
        let l = layout(Zone::Harbor);
        let walls = l.collision_walls();
        assert_eq!(walls.len(), l.obstacles.len() - 3);
        assert!(!walls.iter().any(|w| w.intersects(&harbor::PIER_CLEARANCE)));
    }

    #[test]
    fn test_keys_unlock_the_gate_out_of_their_zone() {
        for key in KeyKind::all() {
            let l = layout(key.found_in());
            assert!(l.gates.iter().any(|g| g.required_key == Some(*key)));
        }
    }
}
