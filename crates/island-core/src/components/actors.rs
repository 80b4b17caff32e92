//! Player, guard and survivor state.

use island_logic::constants::player;
use island_logic::difficulty::DifficultyProfile;
use island_logic::geometry::Vec2;
use island_logic::zones::{KeyKind, Zone};
use serde::{Deserialize, Serialize};

/// The three gate keys
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeyRing {
    pub jail: bool,
    pub cave: bool,
    pub boat: bool,
}

impl KeyRing {
    pub fn has(&self, key: KeyKind) -> bool {
        match key {
            KeyKind::Jail => self.jail,
            KeyKind::Cave => self.cave,
            KeyKind::Boat => self.boat,
        }
    }

    pub fn insert(&mut self, key: KeyKind) {
        match key {
            KeyKind::Jail => self.jail = true,
            KeyKind::Cave => self.cave = true,
            KeyKind::Boat => self.boat = true,
        }
    }

    pub fn has_all(&self) -> bool {
        self.jail && self.cave && self.boat
    }

    /// Held keys in gate order.
    pub fn held(&self) -> Vec<KeyKind> {
        KeyKind::all().iter().copied().filter(|k| self.has(*k)).collect()
    }
}

/// Everything the player carries
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlayerState {
    pub health: i32,
    pub stamina: f32,
    pub has_gun: bool,
    pub ammo: u32,
    pub keys: KeyRing,
    pub clues: u32,
    pub rescued: u32,
    /// Seconds until the pistol can fire again
    pub fire_cooldown: f32,
}

impl PlayerState {
    pub fn new(profile: &DifficultyProfile) -> Self {
        Self {
            health: profile.player_health,
            stamina: player::MAX_STAMINA,
            has_gun: false,
            ammo: 0,
            keys: KeyRing::default(),
            clues: 0,
            rescued: 0,
            fire_cooldown: 0.0,
        }
    }

    pub fn can_fire(&self) -> bool {
        self.has_gun && self.ammo > 0 && self.fire_cooldown <= 0.0
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Patrolling antagonist
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Guard {
    /// Waypoints visited in a loop, by body center
    pub patrol: Vec<Vec2>,
    pub current_waypoint: usize,
    pub health: i32,
    /// Seconds until the next shot; may run negative while the player is hidden
    pub shoot_timer: f32,
    /// Sees the player this tick
    pub alerted: bool,
}

impl Guard {
    pub fn new(patrol: Vec<Vec2>, health: i32, shoot_timer: f32) -> Self {
        Self {
            patrol,
            current_waypoint: 0,
            health,
            shoot_timer,
            alerted: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }
}

/// Trapped survivor the player escorts to the pier
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Survivor {
    /// Zone the survivor was found in
    pub home: Zone,
    pub following: bool,
    pub rescued: bool,
}

impl Survivor {
    pub fn new(home: Zone) -> Self {
        Self {
            home,
            following: false,
            rescued: false,
        }
    }

    /// Counts toward the region task of the zone it stands in.
    pub fn is_helped(&self) -> bool {
        self.following || self.rescued
    }
}
