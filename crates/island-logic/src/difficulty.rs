//! Difficulty profiles, the knobs that separate Story from Nightmare.

use serde::{Deserialize, Serialize};

/// Tuning values for one difficulty level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyProfile {
    pub name: String,
    pub player_health: i32,
    /// Stamina lost per second while sprinting.
    pub stamina_drain: f32,
    /// Stamina regained per second otherwise.
    pub stamina_recover: f32,
    /// Guard speed in pixels per tick.
    pub guard_speed: f32,
    /// How far a guard can see, in pixels.
    pub guard_sight: f32,
    /// Seconds between guard shots.
    pub guard_shoot_cooldown: f32,
    pub guard_health: i32,
    /// Damage a guard bullet deals to the player.
    pub guard_damage: i32,
    /// Damage a player bullet deals to a guard.
    pub player_damage: i32,
    /// Extra guards added per zone on top of the base roster.
    pub extra_guards: usize,
}

/// The three selectable difficulties, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Story,
    Survivor,
    Nightmare,
}

impl Difficulty {
    pub fn all() -> &'static [Difficulty] {
        &[Difficulty::Story, Difficulty::Survivor, Difficulty::Nightmare]
    }

    pub fn index(&self) -> usize {
        match self {
            Difficulty::Story => 0,
            Difficulty::Survivor => 1,
            Difficulty::Nightmare => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }

    /// Next entry in the menu, wrapping to the top.
    pub fn next(&self) -> Self {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    /// Previous entry in the menu, wrapping to the bottom.
    pub fn previous(&self) -> Self {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Difficulty::Story => "Story",
            Difficulty::Survivor => "Survivor",
            Difficulty::Nightmare => "Nightmare",
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Story => DifficultyProfile {
                name: self.name().to_string(),
                player_health: 120,
                stamina_drain: 24.0,
                stamina_recover: 20.0,
                guard_speed: 1.45,
                guard_sight: 260.0,
                guard_shoot_cooldown: 1.2,
                guard_health: 38,
                guard_damage: 12,
                player_damage: 24,
                extra_guards: 0,
            },
            Difficulty::Survivor => DifficultyProfile {
                name: self.name().to_string(),
                player_health: 95,
                stamina_drain: 30.0,
                stamina_recover: 15.0,
                guard_speed: 1.9,
                guard_sight: 340.0,
                guard_shoot_cooldown: 0.85,
                guard_health: 55,
                guard_damage: 18,
                player_damage: 20,
                extra_guards: 1,
            },
            Difficulty::Nightmare => DifficultyProfile {
                name: self.name().to_string(),
                player_health: 75,
                stamina_drain: 38.0,
                stamina_recover: 11.0,
                guard_speed: 2.4,
                guard_sight: 420.0,
                guard_shoot_cooldown: 0.62,
                guard_health: 70,
                guard_damage: 24,
                player_damage: 18,
                extra_guards: 2,
            },
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Survivor
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
